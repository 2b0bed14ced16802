//! Factory producing typed file parameters from raw flag or cell values.

use crate::error::ParamError;
use crate::params::types::{FileParam, FileRole, LoggingParam, Provider, UriParts};
use crate::params::validate::validate_name;
use crate::uri::provider::detect_provider;
use crate::uri::rewrite::{rewrite_uris, validate_path_or_fail};
use crate::util::path::{directory_fmt, split_uri};

/// Builds input or output [`FileParam`]s from raw URIs.
///
/// One factory per role per compilation pass: the auto-name counter is plain
/// mutable state, so a factory must not be shared across concurrent passes
/// (use one factory per pass, or wrap it in a lock). Counters are
/// role-independent, so auto-generated input and output names never collide
/// within a role.
#[derive(Debug)]
pub struct FileParamFactory {
    role: FileRole,
    mount_root: String,
    auto_index: u32,
}

impl FileParamFactory {
    pub fn new(role: FileRole, mount_root: impl Into<String>) -> Self {
        Self {
            role,
            mount_root: mount_root.into(),
            auto_index: 0,
        }
    }

    /// Factory for input parameters mounted under `mount_root`.
    pub fn inputs(mount_root: impl Into<String>) -> Self {
        Self::new(FileRole::Input, mount_root)
    }

    /// Factory for output parameters mounted under `mount_root`.
    pub fn outputs(mount_root: impl Into<String>) -> Self {
        Self::new(FileRole::Output, mount_root)
    }

    pub fn role(&self) -> FileRole {
        self.role
    }

    /// Return `name` as given, or the next auto-generated one if empty.
    pub fn next_auto_name(&mut self, name: &str) -> String {
        if !name.is_empty() {
            return name.to_string();
        }
        let name = format!("{}{}", self.role.auto_prefix(), self.auto_index);
        self.auto_index += 1;
        name
    }

    /// Classify, policy-check, and rewrite a raw URI.
    ///
    /// Returns the container path, the normalized URI split into parts, and
    /// the detected provider. Recursive URIs are forced to directory form
    /// before validation.
    pub fn parse_uri(
        &self,
        raw_uri: &str,
        recursive: bool,
    ) -> Result<(String, UriParts, Provider), ParamError> {
        let raw = if recursive {
            directory_fmt(raw_uri)
        } else {
            raw_uri.to_string()
        };

        let provider = detect_provider(&raw)?;
        validate_path_or_fail(&raw, recursive)?;
        let (normalized, container_path) = rewrite_uris(&raw, provider, &self.mount_root);

        let (dir, basename) = split_uri(&normalized);
        let uri = UriParts::new(directory_fmt(dir), basename);
        Ok((container_path, uri, provider))
    }

    /// Build a role-typed [`FileParam`] from a name and raw URI.
    pub fn make_param(
        &self,
        name: &str,
        raw_uri: &str,
        recursive: bool,
    ) -> Result<FileParam, ParamError> {
        let (container_path, uri, provider) = self.parse_uri(raw_uri, recursive)?;
        validate_name(name, self.role.param_kind())?;
        Ok(FileParam {
            role: self.role,
            name: name.to_string(),
            raw_value: raw_uri.to_string(),
            container_path,
            uri,
            recursive,
            provider,
        })
    }
}

/// Build the logging destination parameter.
///
/// An empty URI means no logging is configured. A URI ending in `.log` names
/// a single file; anything else is a directory root that receives one log
/// file per task. Wildcards are never valid in a logging destination.
pub fn build_logging_param(logging_uri: &str) -> Result<LoggingParam, ParamError> {
    if logging_uri.is_empty() {
        return Ok(LoggingParam::empty());
    }

    let recursive = !logging_uri.ends_with(".log");
    let factory = FileParamFactory::outputs("");
    let (_, uri, provider) = factory.parse_uri(logging_uri, recursive)?;
    if uri.basename.contains('*') {
        return Err(ParamError::UnsupportedPathPattern(format!(
            "wildcards are not allowed in the logging URI: {}",
            uri.full()
        )));
    }

    Ok(LoggingParam {
        uri: Some(uri),
        provider: Some(provider),
    })
}
