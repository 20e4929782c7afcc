/// Crate-level error types for objcdoc diagnostics.

/// All errors in objcdoc carry enough context to produce a useful diagnostic
/// without a debugger. Parse failures always carry the offending signature
/// text verbatim so the broken documentation line can be found by grep.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// A signature string does not match the declaration grammar.
    #[error("malformed signature: `{signature}`")]
    MalformedSignature {
        /// The raw signature text exactly as it appeared in the input.
        signature: String,
    },

    /// A class-scoped canonical name was requested for a signature that has
    /// no class scope. `ref_name` and `full_name` both require `[Class ...]`.
    #[error("signature `{selector}` has no class scope")]
    MissingClassScope {
        /// Selector of the signature the caller tried to render.
        selector: String,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// Filesystem watcher could not be created or attached.
    #[error("watch setup failed: {reason}")]
    WatchFailed {
        /// Description of the watcher failure.
        reason: String,
    },
}
