//! Lexical path helpers for URI rewriting.
//!
//! Everything here is pure string manipulation. Container paths must be
//! derivable without touching the filesystem, so `..`/`.` collapsing and
//! directory/basename splitting are done lexically rather than through
//! `std::fs` canonicalization.

/// Ensure a directory reference ends with exactly one `/`.
///
/// Copy tooling downstream needs a trailing slash to distinguish "copy into
/// this directory" from "overwrite this object", so every directory-shaped
/// URI in the data model carries one. Idempotent.
pub fn directory_fmt(directory: &str) -> String {
    format!("{}/", directory.trim_end_matches('/'))
}

/// Split a URI at the last `/` into (directory, basename).
///
/// The directory half keeps no trailing slash (unless it is all slashes,
/// i.e. the root), the basename half never contains one. A URI without any
/// `/` is all basename.
pub fn split_uri(uri: &str) -> (&str, &str) {
    match uri.rfind('/') {
        None => ("", uri),
        Some(i) => {
            let head = &uri[..=i];
            let tail = &uri[i + 1..];
            let stripped = head.trim_end_matches('/');
            if stripped.is_empty() {
                (head, tail)
            } else {
                (stripped, tail)
            }
        }
    }
}

/// Collapse `.` segments, `..` indirects, and repeated slashes lexically.
///
/// A leading `..` survives on relative paths (there is nothing to pop) and is
/// dropped at the root of absolute paths. The empty path normalizes to `.`.
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut comps: Vec<&str> = Vec::new();

    for comp in path.split('/') {
        match comp {
            "" | "." => {}
            ".." => {
                if let Some(last) = comps.last() {
                    if *last == ".." {
                        comps.push("..");
                    } else {
                        comps.pop();
                    }
                } else if !absolute {
                    comps.push("..");
                }
            }
            other => comps.push(other),
        }
    }

    let joined = comps.join("/");
    if absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Resolve a path to normalized absolute form against the current directory.
pub fn absolutize(path: &str) -> String {
    if path.starts_with('/') {
        return normalize(path);
    }
    let cwd = std::env::current_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "/".to_string());
    normalize(&format!("{cwd}/{path}"))
}

/// Join two path fragments, treating an absolute right-hand side as a reset.
pub fn join(base: &str, rest: &str) -> String {
    if rest.starts_with('/') || base.is_empty() {
        rest.to_string()
    } else if base.ends_with('/') {
        format!("{base}{rest}")
    } else {
        format!("{base}/{rest}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_fmt_appends_exactly_one_slash() {
        assert_eq!(directory_fmt("/tmp/data"), "/tmp/data/");
        assert_eq!(directory_fmt("/tmp/data///"), "/tmp/data/");
        assert_eq!(directory_fmt("gs://bucket/folder"), "gs://bucket/folder/");
    }

    #[test]
    fn directory_fmt_is_idempotent() {
        for input in ["/a/b", "/a/b/", "gs://b/x", "/"] {
            let once = directory_fmt(input);
            assert_eq!(directory_fmt(&once), once);
            assert!(once.ends_with('/'));
            assert!(!once.ends_with("//") || once == "/");
        }
    }

    #[test]
    fn split_uri_basics() {
        assert_eq!(split_uri("/tmp/ab.txt"), ("/tmp", "ab.txt"));
        assert_eq!(split_uri("/tmp/tempdir1/"), ("/tmp/tempdir1", ""));
        assert_eq!(split_uri("ab.txt"), ("", "ab.txt"));
        assert_eq!(split_uri("/newfile"), ("/", "newfile"));
        assert_eq!(
            split_uri("gs://bucket/folder/file.txt"),
            ("gs://bucket/folder", "file.txt")
        );
    }

    #[test]
    fn normalize_collapses_indirects() {
        assert_eq!(normalize("/tmp/a_path/../B_PATH"), "/tmp/B_PATH");
        assert_eq!(normalize("/myhome/./mydir"), "/myhome/mydir");
        assert_eq!(normalize("./../upper_dir"), "../upper_dir");
        assert_eq!(normalize("file:///tmp/data"), "file:/tmp/data");
        assert_eq!(normalize("/.."), "/");
        assert_eq!(normalize(""), ".");
        assert_eq!(normalize("a/b/.."), "a");
    }

    #[test]
    fn join_handles_empty_and_absolute() {
        assert_eq!(join("output", "file/data/"), "output/file/data/");
        assert_eq!(join("", "file/data/"), "file/data/");
        assert_eq!(join("/", "tmp/data"), "/tmp/data");
        assert_eq!(join("/home/user", "docs"), "/home/user/docs");
        assert_eq!(join("a", "/reset"), "/reset");
    }
}
