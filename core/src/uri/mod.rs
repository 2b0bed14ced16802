pub mod provider;
pub mod rewrite;

pub use provider::detect_provider;
pub use rewrite::{rewrite_uris, validate_path_or_fail};
