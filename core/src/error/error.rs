use thiserror::Error;

/// Errors produced while compiling job parameters into task descriptors.
///
/// Everything here is a configuration/input error: synchronous, non-retryable,
/// and fatal to the compilation pass that produced it. The only tolerated
/// irregularity (a batch-file row width mismatch) is downgraded to a
/// `tracing::warn!` instead of surfacing as a variant.
#[derive(Error, Debug)]
pub enum ParamError {
    #[error("invalid {kind}: {name}")]
    InvalidName { kind: &'static str, name: String },
    #[error("invalid label: {0}")]
    InvalidLabel(String),
    #[error("file provider not supported: {0}://")]
    UnsupportedProvider(String),
    #[error("unsupported path pattern: {0}")]
    UnsupportedPathPattern(String),
    #[error("unrecognized column header: {0}")]
    UnrecognizedColumn(String),
    #[error("no tasks added from {0}")]
    NoTasks(String),
    #[error("unsupported {kind} path ({path}) for provider '{backend}'")]
    ProviderNotWhitelisted {
        kind: &'static str,
        path: String,
        backend: String,
    },
    #[error("unable to parse age string: {0}")]
    InvalidAgeSpec(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
