use tracing::debug;

use crate::capabilities::FileSystem;

/// Root of the staging tree, living next to the live files on the device.
pub const STAGING_ROOT: &str = "tmp";

const SEPARATOR: char = '/';

/// Staging location of a manifest-listed file. The file's own leading
/// separator provides the join.
pub fn staging_path(file: &str) -> String {
    format!("{STAGING_ROOT}{file}")
}

/// Ancestor directories of `path`, shallowest first, so creating them in
/// order never attempts a directory whose parent is missing.
pub fn directories_for(path: &str) -> Vec<String> {
    let parts: Vec<&str> = path
        .trim_matches(SEPARATOR)
        .split(SEPARATOR)
        .filter(|part| !part.is_empty())
        .collect();
    (1..parts.len()).map(|end| parts[..end].join("/")).collect()
}

/// Create the missing ancestors of `path`, shallowest first. Directories
/// that already exist are not an error.
pub(crate) fn ensure_directories<F: FileSystem>(fs: &F, path: &str) {
    for dir in directories_for(path) {
        if fs.stat(&dir).is_ok() {
            continue;
        }
        if let Err(err) = fs.mkdir(&dir) {
            debug!(%dir, %err, "mkdir skipped");
        }
    }
}

/// Join a directory and an entry name with a single separator.
pub(crate) fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() || dir == "/" {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ancestors_come_parent_before_child() {
        assert_eq!(directories_for("/a/b/c.py"), vec!["a", "a/b"]);
    }

    #[test]
    fn root_level_files_need_no_directories() {
        assert!(directories_for("/main.py").is_empty());
        assert!(directories_for("main.py").is_empty());
    }

    #[test]
    fn staging_paths_reuse_the_leading_separator() {
        assert_eq!(staging_path("/lib/foo.py"), "tmp/lib/foo.py");
        assert_eq!(directories_for(&staging_path("/lib/foo.py")), vec!["tmp", "tmp/lib"]);
    }

    #[test]
    fn join_handles_the_device_root() {
        assert_eq!(join("/", "main.py"), "/main.py");
        assert_eq!(join("/lib", "foo.py"), "/lib/foo.py");
        assert_eq!(join("tmp", "main.py"), "tmp/main.py");
    }
}
