// Path utilities
//
// Import specifiers are resolved purely lexically: the files they name may not
// exist yet (virtual modules) and this crate never touches the filesystem.

use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Resolve an import specifier against the project root
///
/// Bundler post-processing leaves root-relative specifiers with a leading `/`
/// (`/src/loaders/user.ts`); one such separator is stripped before joining.
/// `.` and `..` components are folded.
///
/// # Examples
/// ```
/// use page_routes_core::utils::paths::resolve_specifier;
/// use std::path::{Path, PathBuf};
///
/// let root = Path::new("/project");
/// assert_eq!(
///     resolve_specifier(root, "/src/loaders/../loaders/user.ts"),
///     PathBuf::from("/project/src/loaders/user.ts")
/// );
/// ```
pub fn resolve_specifier(root: &Path, specifier: &str) -> PathBuf {
    let relative = specifier.strip_prefix('/').unwrap_or(specifier);
    normalize_lexically(&root.join(relative))
}

/// Fold `.` and `..` without requiring the path to exist
///
/// `..` never climbs above the root; on a relative path leading `..` are kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            Component::Normal(name) => normalized.push(name),
        }
    }
    normalized
}

/// Path as a `/`-separated string, for pattern matching
pub fn to_unix_style(path: &Path) -> String {
    let path_str = path.to_string_lossy();
    // On Unix, MAIN_SEPARATOR is already '/'
    if MAIN_SEPARATOR == '\\' {
        path_str.replace('\\', "/")
    } else {
        path_str.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_root_relative_specifier() {
        let root = Path::new("/home/dev/app");
        assert_eq!(
            resolve_specifier(root, "/src/loaders/user.ts"),
            PathBuf::from("/home/dev/app/src/loaders/user.ts")
        );
        assert_eq!(
            resolve_specifier(root, "src/loaders/user.ts"),
            PathBuf::from("/home/dev/app/src/loaders/user.ts")
        );
    }

    #[test]
    fn test_only_one_leading_separator_is_stripped() {
        let root = Path::new("/home/dev/app");
        // the second separator makes the rest absolute again
        assert_eq!(
            resolve_specifier(root, "//src/a.ts"),
            PathBuf::from("/src/a.ts")
        );
    }

    #[test]
    fn test_dot_components_are_folded() {
        let root = Path::new("/home/dev/app");
        assert_eq!(
            resolve_specifier(root, "./src/pages/../loaders/./user.ts"),
            PathBuf::from("/home/dev/app/src/loaders/user.ts")
        );
        assert_eq!(
            resolve_specifier(root, "../../../../../etc/x.ts"),
            PathBuf::from("/etc/x.ts")
        );
    }

    #[test]
    fn test_normalize_relative_path() {
        assert_eq!(
            normalize_lexically(Path::new("../a/./b/../c")),
            PathBuf::from("../a/c")
        );
        assert_eq!(normalize_lexically(Path::new("a/../..")), PathBuf::from(".."));
    }

    #[test]
    fn test_to_unix_style() {
        assert_eq!(
            to_unix_style(Path::new("/home/dev/app/src/a.ts")),
            "/home/dev/app/src/a.ts"
        );
    }
}
