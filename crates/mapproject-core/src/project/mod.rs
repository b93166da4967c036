//! Project Management
//!
//! Loads and saves project files. A project file is a JSON document that
//! lists the content folders of a project together with its custom property
//! types, commands and references to auxiliary files:
//!
//! ```text
//! {
//!   "propertyTypes": [ { "id": 1, "name": "Direction", "type": "enum", ... } ],
//!   "folders": [ ".", "maps", "../shared/tilesets" ],
//!   "extensionsPath": "extensions",
//!   "objectTypesFile": "objecttypes.xml",
//!   "automappingRulesFile": "",
//!   "commands": [ { "name": "Build", "executable": "make", ... } ]
//! }
//! ```
//!
//! Paths in the file are relative to the directory containing it, so a
//! project can be moved or checked out anywhere.

mod document;
pub mod paths;
mod project;
mod save_file;

pub use document::{DocumentFormat, ProjectDocument, DEFAULT_EXTENSIONS_DIR};
pub use project::Project;
pub use save_file::SaveFile;
