//! Shared property type registry
//!
//! Loading a project makes its property types visible to the rest of the
//! application through a registry, so consumers do not need a reference to
//! the project itself. The registry is passed to [`Project::load`] so the
//! side effect is visible at the call site.
//!
//! [`Project::load`]: crate::project::Project::load

use std::sync::{OnceLock, RwLock};

use crate::property_types::PropertyType;

/// Receiver for the property types of a freshly loaded project
pub trait PropertyTypeRegistry {
    /// Replace the registered property types
    fn set_property_types(&self, types: &[PropertyType]);
}

/// Application-wide preferences holding the active property types
#[derive(Debug, Default)]
pub struct Preferences {
    property_types: RwLock<Vec<PropertyType>>,
}

impl Preferences {
    /// Create preferences with no property types
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide instance, created on first use
    pub fn global() -> &'static Preferences {
        static INSTANCE: OnceLock<Preferences> = OnceLock::new();
        INSTANCE.get_or_init(Preferences::new)
    }

    /// Snapshot of the registered property types
    pub fn property_types(&self) -> Vec<PropertyType> {
        match self.property_types.read() {
            Ok(types) => types.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl PropertyTypeRegistry for Preferences {
    fn set_property_types(&self, types: &[PropertyType]) {
        let mut guard = match self.property_types.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = types.to_vec();
        tracing::debug!("Registered {} property types", guard.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_previous_types() {
        let prefs = Preferences::new();
        prefs.set_property_types(&[PropertyType::new_enum(1, "A", vec![])]);
        prefs.set_property_types(&[
            PropertyType::new_enum(2, "B", vec![]),
            PropertyType::new_class(3, "C", vec![]),
        ]);

        let names: Vec<String> = prefs.property_types().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["B".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(Preferences::global(), Preferences::global()));
    }
}
