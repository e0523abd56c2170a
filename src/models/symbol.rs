use serde::Serialize;

/// A declaration found in the Doxygen XML export for one source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SymbolEntry {
    /// Line of the declaration inside its file (1-based).
    #[serde(rename = "l")]
    pub declaration_line: u32,
    /// Raw parameter list, e.g. `(int count, double *buf)`.
    #[serde(rename = "a")]
    pub parameter_list: String,
}
