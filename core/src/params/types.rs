//! Canonical parameter types handed to an execution backend.
//!
//! All values are immutable once constructed: they are built during a single
//! compilation pass and discarded with the task that owns them. Constructors
//! validate, so holding one of these types means the contained strings
//! already passed the naming/label rules.

use std::fmt;

use serde::Serialize;

use crate::error::ParamError;
use crate::params::validate::{validate_label, validate_name};

/// Storage system that owns a URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Provider {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "cloud-object-storage")]
    CloudStorage,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Local => "local",
            Provider::CloudStorage => "cloud-object-storage",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URI held as its directory prefix plus basename.
///
/// `path_prefix` always ends in `/`; `basename` is empty for pure directory
/// references. Keeping the halves separate removes the ambiguity of a URI
/// like `/tmp/dir/` vs `/tmp/file` at the point where copy commands are
/// generated.
///
/// | full()                        | path_prefix            | basename   |
/// |-------------------------------|------------------------|------------|
/// | `gs://bucket/folder/file.txt` | `gs://bucket/folder/`  | `file.txt` |
/// | `/tmp/tempdir1/`              | `/tmp/tempdir1/`       | ``         |
/// | `/tmp/ab.txt`                 | `/tmp/`                | `ab.txt`   |
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UriParts {
    pub path_prefix: String,
    pub basename: String,
}

impl UriParts {
    pub fn new(path_prefix: impl Into<String>, basename: impl Into<String>) -> Self {
        let path_prefix = path_prefix.into();
        debug_assert!(path_prefix.ends_with('/'), "path prefix must end in '/'");
        Self {
            path_prefix,
            basename: basename.into(),
        }
    }

    /// The complete URI: prefix + basename.
    pub fn full(&self) -> String {
        format!("{}{}", self.path_prefix, self.basename)
    }
}

impl fmt::Display for UriParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.path_prefix, self.basename)
    }
}

/// Name/value environment variable parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvParam {
    pub name: String,
    pub value: Option<String>,
}

impl EnvParam {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Result<Self, ParamError> {
        let name = name.into();
        validate_name(&name, "environment variable")?;
        Ok(Self { name, value })
    }
}

/// Name/value label parameter.
///
/// User-supplied labels reject the reserved bookkeeping keys; the `system`
/// constructor is for internally generated labels only and bypasses that
/// check (nothing else).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelParam {
    pub name: String,
    pub value: Option<String>,
}

impl LabelParam {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Result<Self, ParamError> {
        Self::build(name.into(), value, false)
    }

    pub fn system(name: impl Into<String>, value: Option<String>) -> Result<Self, ParamError> {
        Self::build(name.into(), value, true)
    }

    fn build(name: String, value: Option<String>, allow_reserved: bool) -> Result<Self, ParamError> {
        validate_label(&name, value.as_deref(), allow_reserved)?;
        Ok(Self { name, value })
    }
}

/// Role of a file parameter: localized before the task runs, or delocalized
/// after it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRole {
    Input,
    Output,
}

impl FileRole {
    /// Prefix used when auto-generating a variable name.
    pub(crate) fn auto_prefix(&self) -> &'static str {
        match self {
            FileRole::Input => "INPUT_",
            FileRole::Output => "OUTPUT_",
        }
    }

    /// Wording used when name validation fails.
    pub(crate) fn param_kind(&self) -> &'static str {
        match self {
            FileRole::Input => "input parameter",
            FileRole::Output => "output parameter",
        }
    }

    /// Wording used in submission whitelist violations.
    pub(crate) fn arg_kind(&self) -> &'static str {
        match self {
            FileRole::Input => "input",
            FileRole::Output => "output",
        }
    }
}

/// File parameter to be localized or delocalized for a task.
///
/// `raw_value` is the URI exactly as the user supplied it; `uri` is the
/// normalized client-side form and `container_path` the location visible
/// inside the isolated execution environment (also exported as the value of
/// the environment variable `name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileParam {
    pub role: FileRole,
    pub name: String,
    pub raw_value: String,
    pub container_path: String,
    pub uri: UriParts,
    pub recursive: bool,
    pub provider: Provider,
}

/// Destination for task log files. May be entirely empty when no logging is
/// configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct LoggingParam {
    pub uri: Option<UriParts>,
    pub provider: Option<Provider>,
}

impl LoggingParam {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.uri.is_none() && self.provider.is_none()
    }
}

/// One task's worth of compiled parameters.
///
/// Produced either from one data row of a batch file (`task_id` numbered from
/// 1) or from a single flag-style invocation (`task_id` absent).
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskParams {
    pub task_id: Option<u32>,
    pub envs: Vec<EnvParam>,
    pub labels: Vec<LabelParam>,
    pub inputs: Vec<FileParam>,
    pub outputs: Vec<FileParam>,
}

impl TaskParams {
    pub fn numbered(task_id: u32) -> Self {
        Self {
            task_id: Some(task_id),
            ..Self::default()
        }
    }
}
