pub mod error;
pub mod error_help;
pub mod path;

pub use error::{GhpmError, GhpmResult};
