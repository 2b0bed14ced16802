pub mod age;
pub mod path;

pub use age::parse_age;
pub use path::directory_fmt;
