//! # MapProject Core Library
//!
//! Project file persistence for a tile map editor.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - Loading and saving of project files with paths relative to the file
//! - Custom property type definitions (enums and classes)
//! - User-configured commands
//! - A shared registry that receives the property types of loaded projects
//!
//! ## Example
//!
//! ```rust,no_run
//! use mapproject_core::prelude::*;
//!
//! let mut project = Project::open("game/game.tiled-project", Preferences::global())?;
//! project.add_folder("/home/user/game/maps");
//! project.save()?;
//! # Ok::<(), mapproject_core::ProjectError>(())
//! ```

pub mod command;
pub mod error;
pub mod key_value;
pub mod preferences;
pub mod project;
pub mod property_types;

pub use error::{ProjectError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::command::Command;
    pub use crate::error::{ProjectError, Result};
    pub use crate::key_value::{KeyValueEntry, KeyValueMap};
    pub use crate::preferences::{Preferences, PropertyTypeRegistry};
    pub use crate::project::{DocumentFormat, Project, ProjectDocument};
    pub use crate::property_types::{
        ClassMember, ClassType, EnumType, PropertyType, PropertyTypeKind, StorageType,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
