//! Path canonicalization that does not require the path to exist.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Removes `.` and redundant separators and folds `..` into the preceding
/// component. `..` directly below the filesystem root is dropped (as the kernel
/// does); `..` at the start of a relative path cannot be folded and is kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::Prefix(_) | Component::RootDir => out.push(comp.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

/// Lexically normalizes `path`, then resolves symlinks on the longest prefix
/// that exists on disk and re-appends the remaining components.
pub fn canonicalize_lenient(path: &Path) -> PathBuf {
    let normalized = normalize_lexically(path);
    let mut existing = normalized.as_path();
    let mut tail: Vec<&OsStr> = Vec::new();
    loop {
        if let Ok(mut real) = std::fs::canonicalize(existing) {
            for name in tail.iter().rev() {
                real.push(name);
            }
            return real;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name);
                existing = parent;
            }
            _ => return normalized,
        }
    }
}

/// True if any component of `path` is `..`.
pub fn has_parent_segment(path: &Path) -> bool {
    path.components().any(|c| c == Component::ParentDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_dots() {
        assert_eq!(
            normalize_lexically(Path::new("/tmp/example.com/a/../1.jpg")),
            PathBuf::from("/tmp/example.com/1.jpg")
        );
        assert_eq!(
            normalize_lexically(Path::new("/tmp//x/./y")),
            PathBuf::from("/tmp/x/y")
        );
    }

    #[test]
    fn parent_of_root_is_root() {
        assert_eq!(
            normalize_lexically(Path::new("/../../etc/passwd")),
            PathBuf::from("/etc/passwd")
        );
    }

    #[test]
    fn leading_parent_kept_for_relative() {
        let p = normalize_lexically(Path::new("../a/../../b"));
        assert_eq!(p, PathBuf::from("../../b"));
        assert!(has_parent_segment(&p));
    }

    #[test]
    fn lenient_keeps_missing_tail() {
        let dir = tempfile::tempdir().unwrap();
        let root = std::fs::canonicalize(dir.path()).unwrap();
        let p = canonicalize_lenient(&root.join("host/a/../b/file.bin"));
        assert_eq!(p, root.join("host/b/file.bin"));
    }

    #[cfg(unix)]
    #[test]
    fn lenient_resolves_existing_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let root = std::fs::canonicalize(dir.path()).unwrap();
        let outside = root.join("outside");
        std::fs::create_dir(&outside).unwrap();
        std::fs::create_dir(root.join("host")).unwrap();
        std::os::unix::fs::symlink(&outside, root.join("host/link")).unwrap();
        let p = canonicalize_lenient(&root.join("host/link/file.bin"));
        assert_eq!(p, outside.join("file.bin"));
    }
}
