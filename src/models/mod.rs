pub mod symbol;
pub mod warning;

pub use symbol::SymbolEntry;
pub use warning::{RawWarning, WarningKey, WarningRecord};
