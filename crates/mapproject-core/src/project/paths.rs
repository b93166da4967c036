//! Path helpers for project documents
//!
//! Every path inside a project document is stored relative to the directory
//! containing the document, while the in-memory project only holds absolute,
//! lexically clean paths. These functions convert between the two forms.

use std::env;
use std::path::{Component, Path, PathBuf};

/// Relative form of the project directory itself.
///
/// An empty relative path would be indistinguishable from "not set", so the
/// project directory is always written as `"."`.
pub const CURRENT_DIR: &str = ".";

/// Lexically normalize a path.
///
/// Removes `.` segments and resolves `..` against the preceding segment
/// without touching the file system. `..` directly above the root is
/// dropped; leading `..` of a relative path is kept. An empty result
/// becomes `"."`.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            other => components.push(other),
        }
    }

    if components.is_empty() {
        return PathBuf::from(CURRENT_DIR);
    }

    components.into_iter().collect()
}

/// Resolve a path against the current working directory and clean it.
pub fn absolute_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return clean_path(path);
    }

    match env::current_dir() {
        Ok(cwd) => clean_path(&cwd.join(path)),
        Err(e) => {
            tracing::warn!("Could not determine working directory: {e}");
            clean_path(path)
        }
    }
}

/// Directory that paths in the document at `file_name` are relative to.
///
/// The file itself does not need to exist.
pub fn base_dir(file_name: &Path) -> PathBuf {
    let absolute = absolute_path(file_name);
    match absolute.parent() {
        Some(parent) => parent.to_path_buf(),
        None => absolute,
    }
}

/// Express `path` relative to `base_dir`, using `/` as separator.
///
/// A relative `path` is first resolved against `base_dir`. Returns `"."`
/// when the path is the base directory itself. When the two paths do not
/// share a root (for example different drives) the cleaned path is
/// returned as is.
pub fn relativize(base_dir: &Path, path: &Path) -> String {
    let base = clean_path(base_dir);
    let target = clean_path(&base.join(path));

    let base_components: Vec<Component> = base.components().collect();
    let target_components: Vec<Component> = target.components().collect();

    let common = base_components
        .iter()
        .zip(&target_components)
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 {
        return target.to_string_lossy().into_owned();
    }

    let mut segments: Vec<String> = Vec::new();
    for _ in common..base_components.len() {
        segments.push("..".to_string());
    }
    for component in &target_components[common..] {
        segments.push(component.as_os_str().to_string_lossy().into_owned());
    }

    if segments.is_empty() {
        CURRENT_DIR.to_string()
    } else {
        segments.join("/")
    }
}

/// Relative form of an optional file reference; `None` becomes `""`.
pub fn relativize_optional(base_dir: &Path, path: Option<&Path>) -> String {
    match path {
        Some(path) => relativize(base_dir, path),
        None => String::new(),
    }
}

/// Resolve a document path against `base_dir`.
///
/// An empty string means "not set" and yields `None`. `"."` resolves to
/// `base_dir` itself and absolute inputs are only cleaned.
pub fn absolutize(base_dir: &Path, path: &str) -> Option<PathBuf> {
    if path.is_empty() {
        return None;
    }
    Some(clean_path(&base_dir.join(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path_relative() {
        assert_eq!(clean_path(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(clean_path(Path::new("../a/b/..")), PathBuf::from("../a"));
        assert_eq!(clean_path(Path::new("a/..")), PathBuf::from("."));
        assert_eq!(clean_path(Path::new("")), PathBuf::from("."));
    }

    #[cfg(unix)]
    #[test]
    fn test_clean_path_absolute() {
        assert_eq!(clean_path(Path::new("/a/b/../c/")), PathBuf::from("/a/c"));
        assert_eq!(clean_path(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(clean_path(Path::new("/a/./././b")), PathBuf::from("/a/b"));
    }

    #[cfg(unix)]
    #[test]
    fn test_relativize() {
        let base = Path::new("/a/b");
        assert_eq!(relativize(base, Path::new("/a/b/maps")), "maps");
        assert_eq!(relativize(base, Path::new("/a/b/maps/town")), "maps/town");
        assert_eq!(relativize(base, Path::new("/a/shared")), "../shared");
        assert_eq!(relativize(base, Path::new("/x/y")), "../../x/y");
        assert_eq!(relativize(base, Path::new("/a/b")), ".");
        assert_eq!(relativize(base, Path::new("/a/b/")), ".");
        assert_eq!(relativize(base, Path::new("maps/../tilesets")), "tilesets");
    }

    #[cfg(unix)]
    #[test]
    fn test_relativize_optional() {
        let base = Path::new("/a/b");
        assert_eq!(relativize_optional(base, None), "");
        assert_eq!(
            relativize_optional(base, Some(Path::new("/a/b/objecttypes.xml"))),
            "objecttypes.xml"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_absolutize() {
        let base = Path::new("/a/b");
        assert_eq!(absolutize(base, ""), None);
        assert_eq!(absolutize(base, "."), Some(PathBuf::from("/a/b")));
        assert_eq!(absolutize(base, "maps"), Some(PathBuf::from("/a/b/maps")));
        assert_eq!(absolutize(base, "../shared"), Some(PathBuf::from("/a/shared")));
        assert_eq!(absolutize(base, "/opt/./rules.txt"), Some(PathBuf::from("/opt/rules.txt")));
    }

    #[cfg(unix)]
    #[test]
    fn test_base_dir() {
        assert_eq!(base_dir(Path::new("/a/b/project.json")), PathBuf::from("/a/b"));
        assert_eq!(base_dir(Path::new("/a/b/../c/project.json")), PathBuf::from("/a/c"));
        assert!(base_dir(Path::new("project.json")).is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn test_relativize_absolutize_agree() {
        let base = Path::new("/home/user/game");
        for path in ["/home/user/game", "/home/user/game/maps", "/home/other", "/etc"] {
            let relative = relativize(base, Path::new(path));
            assert_eq!(absolutize(base, &relative), Some(PathBuf::from(path)));
        }
    }
}
