use cypherstore_api::IdentityError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Name carried by precondition failures of the existence checks.
pub const EXISTS_ERROR: &str = "neo4j-exists-error";

#[derive(Debug, Error)]
pub enum Error {
    /// Failure reported by the database session, passed through unchanged.
    #[error(transparent)]
    Session(Box<dyn std::error::Error + Send + Sync>),

    #[error("{name}: {message}")]
    Precondition {
        name: &'static str,
        message: &'static str,
    },

    #[error("invalid identity: {0}")]
    Identity(#[from] IdentityError),

    #[error("column `{column}` holds {found}, expected {expected}")]
    UnexpectedValue {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn session<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Session(Box::new(err))
    }

    pub(crate) fn exists(message: &'static str) -> Self {
        Error::Precondition {
            name: EXISTS_ERROR,
            message,
        }
    }
}
