use crate::errors::CoreError;

/// How a portfolio is addressed on the remote API.
///
/// A raw identifier that is exactly 24 hex characters is treated as a
/// server-assigned id and looked up directly; anything else is a
/// user-chosen alias and goes through the alias-keyed endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioRef {
    /// Server-assigned opaque id (24 hex characters)
    ServerId(String),
    /// User-chosen alias (alphanumeric, length ≥ 3)
    Alias(String),
}

impl PortfolioRef {
    /// Validate and classify a raw user-entered identifier.
    ///
    /// Rule: trimmed input must be ASCII alphanumeric and at least 3
    /// characters, otherwise `InvalidIdentifier` — before any network call.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let id = raw.trim();
        if id.len() < 3 || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidIdentifier(raw.to_string()));
        }

        if id.len() == 24 && id.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(PortfolioRef::ServerId(id.to_string()))
        } else {
            Ok(PortfolioRef::Alias(id.to_string()))
        }
    }

    /// The identifier as the user entered it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            PortfolioRef::ServerId(id) => id,
            PortfolioRef::Alias(alias) => alias,
        }
    }

    /// URL path under `/api/portfolio` for this identifier.
    /// Server ids address the portfolio directly; aliases go through
    /// the `byUserId` route.
    #[must_use]
    pub fn path_segment(&self) -> String {
        match self {
            PortfolioRef::ServerId(id) => id.clone(),
            PortfolioRef::Alias(alias) => format!("byUserId/{alias}"),
        }
    }
}

impl std::fmt::Display for PortfolioRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
