/// Scanner-facing value types for declarations and cross-references.
use std::path::PathBuf;

/// A method declaration directive found in a documentation file.
/// The signature text is unparsed here; `Signature::parse` decides whether
/// it is well formed.
#[derive(Debug, Clone)]
pub struct Declaration {
    /// One-based line number of the directive in the source file.
    pub line: u32,
    /// Raw signature text following the directive marker, trimmed.
    pub signature: String,
    /// Documentation file containing this directive.
    pub source: PathBuf,
}

/// An inline cross-reference role found in a documentation file.
/// Resolution is unimplemented, so every occurrence is reported as
/// unresolved and its target degrades to plain text.
#[derive(Debug, Clone)]
pub struct CrossRef {
    /// One-based line number of the role in the source file.
    pub line: u32,
    /// Documentation file containing this role.
    pub source: PathBuf,
    /// Raw target text between the role's backticks.
    pub target: String,
}
