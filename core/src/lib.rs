//! Parameter normalization and task compilation for jobsub.
//!
//! Turns user-supplied job parameters (environment variables, labels, and
//! input/output file references) into canonical per-task descriptors for a
//! batch-job execution backend. Parameters arrive either as flag-style token
//! lists describing a single job or as rows of a tab-delimited batch file
//! describing many tasks over a shared column schema.
//!
//! This crate is a pure transformation layer: no network, no persistence.
//! The only I/O is a streaming read of the batch file plus cwd/home lookups
//! during local path resolution. File transfer, dispatch, and flag parsing
//! belong to the callers on either side.

pub mod compile;
pub mod error;
pub mod params;
pub mod submit;
pub mod uri;
pub mod util;

pub use compile::{compile_args, compile_tasks, compile_tasks_file};
pub use error::ParamError;
pub use params::{
    build_logging_param, EnvParam, FileParam, FileParamFactory, FileRole, LabelParam,
    LoggingParam, Provider, TaskParams, UriParts, RESERVED_LABELS,
};
pub use submit::validate_submit;
pub use uri::detect_provider;
pub use util::{directory_fmt, parse_age};
