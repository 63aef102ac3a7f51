//! Registration-time error types.

/// An error raised while compiling a route template.
///
/// These are configuration errors: they surface during application setup and
/// are fatal to startup. A dispatch can never produce one.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The same `:name` placeholder appears more than once in one template,
    /// which would make the capture binding ambiguous.
    #[error("duplicate symbol `:{symbol}` in route template `{template}`")]
    DuplicateSymbol {
        /// The offending template.
        template: String,
        /// The symbol declared twice.
        symbol: String,
    },

    /// A placeholder segment with no name (a bare `:`).
    #[error("empty symbol name in route template `{template}`")]
    EmptySymbol {
        /// The offending template.
        template: String,
    },

    /// A `*` segment somewhere other than the final position.
    #[error("wildcard `*` must be the final segment in route template `{template}`")]
    WildcardPosition {
        /// The offending template.
        template: String,
    },

    /// The compiled matcher was rejected by the regex engine.
    #[error("invalid route matcher: {0}")]
    Matcher(#[from] regex::Error),
}

/// A specialized result type for route registration.
pub type Result<T, E = RouteError> = std::result::Result<T, E>;
