//! URI policy checking and the provider-specific rewriters.
//!
//! Every file parameter carries two derived paths: the normalized client-side
//! URI (what the invoking machine's copy tooling sees) and the container path
//! (where the file appears inside the isolated execution environment). Both
//! are derived here with pure string transformations.

use crate::error::ParamError;
use crate::params::types::Provider;
use crate::util::path::{absolutize, directory_fmt, join, normalize, split_uri};

/// Reject path and wildcard patterns the transfer layer cannot honor.
///
/// Only filename-level `*` wildcards are supported: character ranges (`[`,
/// `]`), `?` wildcards, directory-level `*`, and `**` would at best work by
/// accident. Non-recursive references must name a concrete file or
/// file-level pattern, not a bare directory.
pub fn validate_path_or_fail(uri: &str, recursive: bool) -> Result<(), ParamError> {
    let (path, filename) = split_uri(uri);

    if uri.contains('[') || uri.contains(']') {
        return Err(ParamError::UnsupportedPathPattern(format!(
            "square bracket (character ranges) are not supported: {uri}"
        )));
    }
    if uri.contains('?') {
        return Err(ParamError::UnsupportedPathPattern(format!(
            "question mark wildcards are not supported: {uri}"
        )));
    }
    if path.contains('*') {
        return Err(ParamError::UnsupportedPathPattern(format!(
            "path wildcard (*) are only supported for files: {uri}"
        )));
    }
    if filename.contains("**") {
        return Err(ParamError::UnsupportedPathPattern(format!(
            "recursive wildcards (\"**\") are not supported: {uri}"
        )));
    }
    if filename == "." || filename == ".." {
        return Err(ParamError::UnsupportedPathPattern(format!(
            "path characters \"..\" and \".\" are not supported for file names: {uri}"
        )));
    }
    if !recursive && filename.is_empty() {
        return Err(ParamError::UnsupportedPathPattern(format!(
            "non-recursive values must reference a filename or wildcard: {uri}"
        )));
    }

    Ok(())
}

/// Rewrite a raw URI into (normalized URI, container path) for its provider
/// and prefix the container path with the caller's mount root.
pub fn rewrite_uris(raw_uri: &str, provider: Provider, mount_root: &str) -> (String, String) {
    let (normalized, container) = match provider {
        Provider::CloudStorage => cloud_rewrite(raw_uri),
        Provider::Local => local_rewrite(raw_uri),
    };
    (normalized, join(mount_root, &container))
}

/// Cloud object storage needs no normalization; the container path just
/// swaps the scheme separator for a mountable prefix.
fn cloud_rewrite(raw_uri: &str) -> (String, String) {
    (raw_uri.to_string(), raw_uri.replacen("gs://", "gs/", 1))
}

/// Local URIs get two independent derivations from the same split.
///
/// The normalized URI is resolved for the invoking machine: scheme and `~`/
/// `.` prefixes substituted, then made absolute with indirects collapsed.
///
/// The container path must not leak the invoking machine's directory layout
/// into the execution environment, so it starts from the raw directory (never
/// the resolved one) and rewrites the relative machinery into synthetic
/// `_dotdot_`/`_home_` segments. The rewrites are ordered and each consumes
/// the previous rule's output.
fn local_rewrite(raw_uri: &str) -> (String, String) {
    // The filename half is split off first so it is never rewritten.
    let (raw_path, filename) = split_uri(raw_uri);

    let home = dirs::home_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "/".to_string());
    let prefix_replacements = [
        ("file:///", "/"),
        ("~/", home.as_str()),
        ("./", ""),
        ("file:/", "/"),
    ];
    let mut normed_path = raw_path.to_string();
    for (prefix, replacement) in prefix_replacements {
        if let Some(rest) = normed_path.strip_prefix(prefix) {
            normed_path = join(replacement, rest);
        }
    }
    // Absolutization strips the trailing '/' from bare directory references,
    // so it is re-forced before the filename goes back on.
    let normalized = join(&directory_fmt(&absolutize(&normed_path)), filename);

    let mut container = normalize(raw_path);
    container = container.replace("/..", "/_dotdot_");
    if let Some(rest) = container.strip_prefix("..") {
        container = format!("_dotdot_{rest}");
    }
    if let Some(rest) = container.strip_prefix("~/") {
        container = format!("_home_/{rest}");
    }
    if let Some(rest) = container.strip_prefix("file:/") {
        container = rest.to_string();
    }
    let container = container.trim_start_matches(['.', '/']);
    let container = format!("{}{}", directory_fmt(&format!("file/{container}")), filename);

    (normalized, container)
}
