pub mod args;
pub mod table;

pub use args::compile_args;
pub use table::{compile_tasks, compile_tasks_file};
