pub mod class_methods;
pub mod empty_params;
pub mod warnings_log;

pub use class_methods::ClassDocuments;
pub use empty_params::parse_empty_params;
pub use warnings_log::{parse_warnings, WarningLog};
