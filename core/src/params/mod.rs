pub mod factory;
pub mod types;
pub mod validate;

pub use factory::{build_logging_param, FileParamFactory};
pub use types::{
    EnvParam, FileParam, FileRole, LabelParam, LoggingParam, Provider, TaskParams, UriParts,
};
pub use validate::{validate_name, RESERVED_LABELS};
