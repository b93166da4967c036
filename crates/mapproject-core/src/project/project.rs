//! Project struct and persistence functions

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::document::{DocumentFormat, ProjectDocument, DEFAULT_EXTENSIONS_DIR};
use super::paths;
use super::save_file::SaveFile;
use crate::command::Command;
use crate::error::{ProjectError, Result};
use crate::key_value::KeyValueEntry;
use crate::preferences::PropertyTypeRegistry;
use crate::property_types::PropertyType;

/// A map editor project
///
/// All paths held by a project are absolute. They are written relative to
/// the project file's directory on save and resolved again on load.
#[derive(Debug, Clone, Default)]
pub struct Project {
    /// Location of the project file, once saved or loaded
    file_name: Option<PathBuf>,

    /// Modification time of the project file after the last save or load
    last_saved: Option<DateTime<Utc>>,

    /// Whether the project was ever written to or read from disk
    has_been_saved: bool,

    extensions_path: Option<PathBuf>,
    object_types_file: Option<PathBuf>,
    automapping_rules_file: Option<PathBuf>,

    folders: Vec<PathBuf>,
    property_types: Vec<PropertyType>,
    commands: Vec<Command>,

    /// How the document is formatted on save
    document_format: DocumentFormat,
}

impl Project {
    /// Create an empty, unsaved project
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an existing project file
    ///
    /// Property types of the loaded project are pushed to `registry`.
    pub fn open<P: AsRef<Path>>(path: P, registry: &dyn PropertyTypeRegistry) -> Result<Self> {
        let mut project = Project::new();
        project.load(path, registry)?;
        Ok(project)
    }

    /// Save to the file the project was last saved to or loaded from
    pub fn save(&mut self) -> Result<()> {
        let file_name = self.file_name.clone().ok_or(ProjectError::NoFileName)?;
        self.save_to(file_name)
    }

    /// Save the project to `file_name`
    ///
    /// On the first save of a project without an extensions path, the
    /// path defaults to an `extensions` directory next to the file. The
    /// file name, extensions path and save time are only updated once the
    /// file has been committed; on error the project is left unchanged.
    pub fn save_to<P: AsRef<Path>>(&mut self, file_name: P) -> Result<()> {
        let file_name = paths::absolute_path(file_name.as_ref());
        let extensions_path = self.resolve_extensions_path(&file_name);

        let base_dir = paths::base_dir(&file_name);
        let document = self.build_document(&base_dir, extensions_path.as_deref());
        let bytes = document.to_bytes(self.document_format)?;

        let mut file = SaveFile::create(&file_name)?;
        file.write_all(&bytes)?;
        file.commit()?;

        self.last_saved = Some(modified_time(&file_name));
        self.extensions_path = extensions_path;
        self.has_been_saved = true;

        tracing::info!("Saved project to {}", file_name.display());
        self.file_name = Some(file_name);

        Ok(())
    }

    /// Replace the project contents with those of the file at `path`
    ///
    /// Loading is all or nothing: on error the project keeps its previous
    /// state and `registry` is not touched.
    pub fn load<P: AsRef<Path>>(
        &mut self,
        path: P,
        registry: &dyn PropertyTypeRegistry,
    ) -> Result<()> {
        let path = path.as_ref();

        let bytes = fs::read(path).map_err(|e| ProjectError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source: e,
        })?;
        let document = ProjectDocument::from_slice(&bytes, path)?;

        let mut project = Self::from_document(&document, path)?;
        project.document_format = self.document_format;
        project.last_saved = fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from);

        registry.set_property_types(&project.property_types);

        tracing::info!("Loaded project from {}", path.display());
        tracing::debug!(
            "Project has {} folders, {} property types, {} commands",
            project.folders.len(),
            project.property_types.len(),
            project.commands.len()
        );

        *self = project;
        Ok(())
    }

    /// Build the document that saving to `file_name` would write
    pub fn to_document(&self, file_name: &Path) -> ProjectDocument {
        let file_name = paths::absolute_path(file_name);
        let extensions_path = self.resolve_extensions_path(&file_name);
        self.build_document(&paths::base_dir(&file_name), extensions_path.as_deref())
    }

    /// Build a project from a document read from `file_name`
    ///
    /// Fails if any property type or command entry cannot be rebuilt.
    pub fn from_document(document: &ProjectDocument, file_name: &Path) -> Result<Self> {
        let base_dir = paths::base_dir(file_name);

        let property_types = document
            .property_types
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                PropertyType::from_entry(entry)
                    .map_err(|source| ProjectError::InvalidPropertyType { index, source })
            })
            .collect::<Result<Vec<_>>>()?;

        let folders = document
            .folders
            .iter()
            .map(|folder| paths::absolutize(&base_dir, folder).unwrap_or_else(|| base_dir.clone()))
            .collect();

        let commands = document
            .commands
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                Command::from_entry(entry)
                    .map_err(|source| ProjectError::InvalidCommand { index, source })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            file_name: Some(paths::absolute_path(file_name)),
            last_saved: None,
            has_been_saved: true,
            extensions_path: paths::absolutize(&base_dir, &document.extensions_path),
            object_types_file: paths::absolutize(&base_dir, &document.object_types_file),
            automapping_rules_file: paths::absolutize(&base_dir, &document.automapping_rules_file),
            folders,
            property_types,
            commands,
            document_format: DocumentFormat::default(),
        })
    }

    fn build_document(&self, base_dir: &Path, extensions_path: Option<&Path>) -> ProjectDocument {
        ProjectDocument {
            property_types: self
                .property_types
                .iter()
                .map(|entry| Value::Object(entry.to_key_value_map()))
                .collect(),
            folders: self
                .folders
                .iter()
                .map(|folder| paths::relativize(base_dir, folder))
                .collect(),
            extensions_path: paths::relativize_optional(base_dir, extensions_path),
            object_types_file: paths::relativize_optional(
                base_dir,
                self.object_types_file.as_deref(),
            ),
            automapping_rules_file: paths::relativize_optional(
                base_dir,
                self.automapping_rules_file.as_deref(),
            ),
            commands: self
                .commands
                .iter()
                .map(|entry| Value::Object(entry.to_key_value_map()))
                .collect(),
        }
    }

    /// Extensions path to use when saving to `file_name`
    fn resolve_extensions_path(&self, file_name: &Path) -> Option<PathBuf> {
        if !self.has_been_saved && self.extensions_path.is_none() {
            return Some(paths::base_dir(file_name).join(DEFAULT_EXTENSIONS_DIR));
        }
        self.extensions_path.clone()
    }

    /// Append a folder to the end of the folder list
    pub fn add_folder(&mut self, folder: impl Into<PathBuf>) {
        self.folders.push(folder.into());
    }

    /// Remove and return the folder at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_folder(&mut self, index: usize) -> PathBuf {
        assert!(
            index < self.folders.len(),
            "folder index {index} out of range (len {})",
            self.folders.len()
        );
        self.folders.remove(index)
    }

    /// Content folders in display order
    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    /// Location of the project file, if it was saved or loaded
    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    /// Directory containing the project file
    pub fn directory(&self) -> Option<PathBuf> {
        self.file_name.as_deref().map(paths::base_dir)
    }

    /// Modification time of the project file after the last save or load
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    /// Whether the project was ever saved or loaded
    pub fn has_been_saved(&self) -> bool {
        self.has_been_saved
    }

    /// Whether the project file changed on disk since it was saved or loaded
    pub fn is_modified_externally(&self) -> bool {
        let (Some(file_name), Some(last_saved)) = (&self.file_name, self.last_saved) else {
            return false;
        };

        match fs::metadata(file_name).and_then(|m| m.modified()) {
            Ok(modified) => DateTime::<Utc>::from(modified) != last_saved,
            Err(_) => false,
        }
    }

    /// Directory holding scripted extensions
    pub fn extensions_path(&self) -> Option<&Path> {
        self.extensions_path.as_deref()
    }

    /// Set the extensions directory (absolute)
    pub fn set_extensions_path(&mut self, path: Option<PathBuf>) {
        self.extensions_path = path;
    }

    /// Referenced object types file, if any
    pub fn object_types_file(&self) -> Option<&Path> {
        self.object_types_file.as_deref()
    }

    /// Set or clear the object types file (absolute)
    pub fn set_object_types_file(&mut self, path: Option<PathBuf>) {
        self.object_types_file = path;
    }

    /// Referenced automapping rules file, if any
    pub fn automapping_rules_file(&self) -> Option<&Path> {
        self.automapping_rules_file.as_deref()
    }

    /// Set or clear the automapping rules file (absolute)
    pub fn set_automapping_rules_file(&mut self, path: Option<PathBuf>) {
        self.automapping_rules_file = path;
    }

    /// Custom property types in document order
    pub fn property_types(&self) -> &[PropertyType] {
        &self.property_types
    }

    /// Replace the custom property types
    pub fn set_property_types(&mut self, types: Vec<PropertyType>) {
        self.property_types = types;
    }

    /// Commands in document order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Replace the commands
    pub fn set_commands(&mut self, commands: Vec<Command>) {
        self.commands = commands;
    }

    /// Output style used on save
    pub fn document_format(&self) -> DocumentFormat {
        self.document_format
    }

    /// Change the output style used on save
    pub fn set_document_format(&mut self, format: DocumentFormat) {
        self.document_format = format;
    }
}

/// Modification time of a freshly written file
fn modified_time(path: &Path) -> DateTime<Utc> {
    match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => DateTime::from(modified),
        Err(e) => {
            tracing::warn!(
                "Could not read modification time of {}: {e}",
                path.display()
            );
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_first_save_synthesizes_extensions_path() {
        let project = Project::new();
        let doc = project.to_document(Path::new("/a/b/project.json"));
        assert_eq!(doc.extensions_path, "extensions");
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_project_keeps_missing_extensions_path() {
        let project = Project {
            has_been_saved: true,
            ..Project::new()
        };
        let doc = project.to_document(Path::new("/a/b/project.json"));
        assert_eq!(doc.extensions_path, "");
    }

    #[cfg(unix)]
    #[test]
    fn test_explicit_extensions_path_is_relativized() {
        let mut project = Project::new();
        project.set_extensions_path(Some(PathBuf::from("/a/scripts")));
        let doc = project.to_document(Path::new("/a/b/project.json"));
        assert_eq!(doc.extensions_path, "../scripts");
    }

    #[cfg(unix)]
    #[test]
    fn test_folders_relative_to_document() {
        let mut project = Project::new();
        project.add_folder("/a/b");
        project.add_folder("/a/b/maps");
        project.add_folder("/a/other");
        let doc = project.to_document(Path::new("/a/b/project.json"));
        assert_eq!(doc.folders, vec![".", "maps", "../other"]);
        assert_eq!(doc.object_types_file, "");
        assert_eq!(doc.automapping_rules_file, "");
    }

    #[cfg(unix)]
    #[test]
    fn test_from_document_resolves_paths() {
        let document = ProjectDocument {
            folders: vec![".".into(), "maps/../tilesets".into(), "".into()],
            object_types_file: "types/objecttypes.xml".into(),
            ..ProjectDocument::default()
        };
        let project = Project::from_document(&document, Path::new("/a/b/project.json")).unwrap();

        assert_eq!(
            project.folders(),
            &[
                PathBuf::from("/a/b"),
                PathBuf::from("/a/b/tilesets"),
                PathBuf::from("/a/b"),
            ]
        );
        assert_eq!(project.extensions_path(), Some(Path::new("/a/b/extensions")));
        assert_eq!(
            project.object_types_file(),
            Some(Path::new("/a/b/types/objecttypes.xml"))
        );
        assert_eq!(project.automapping_rules_file(), None);
        assert!(project.has_been_saved());
    }

    #[test]
    fn test_folder_mutation_order() {
        let mut project = Project::new();
        project.add_folder("X");
        project.add_folder("Y");
        assert_eq!(project.folders(), &[PathBuf::from("X"), PathBuf::from("Y")]);

        assert_eq!(project.remove_folder(0), PathBuf::from("X"));
        assert_eq!(project.folders(), &[PathBuf::from("Y")]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_remove_folder_out_of_range() {
        let mut project = Project::new();
        project.add_folder("X");
        project.remove_folder(1);
    }

    #[test]
    fn test_save_without_file_name() {
        let mut project = Project::new();
        assert!(matches!(project.save(), Err(ProjectError::NoFileName)));
        assert!(project.file_name().is_none());
    }
}
