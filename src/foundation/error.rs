/// Convenience result type used across kksubs.
pub type SubsResult<T> = Result<T, SubsError>;

/// Top-level error taxonomy.
///
/// Every variant is fatal for the subtitle group being applied; callers that process many images
/// decide whether to skip the failing image or abort.
#[derive(thiserror::Error, Debug)]
pub enum SubsError {
    /// Invalid profile or script data, unresolvable font, unreadable image path.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Rasterization or buffer failure while drawing text layers.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing script documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SubsError {
    /// Build a [`SubsError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`SubsError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SubsError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Prefix the message with `ctx`, keeping the variant.
    pub fn in_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            Self::Configuration(msg) => Self::Configuration(format!("{ctx}: {msg}")),
            Self::Render(msg) => Self::Render(format!("{ctx}: {msg}")),
            Self::Serde(msg) => Self::Serde(format!("{ctx}: {msg}")),
            Self::Other(err) => Self::Other(err.context(ctx.to_string())),
        }
    }

    /// Return `true` for [`SubsError::Configuration`].
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
