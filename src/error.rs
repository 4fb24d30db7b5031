use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(#[from] DieselError),

    #[error("row id {0} exceeds the 32-bit key range")]
    IdOutOfRange(i64),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("credential error: {0}")]
    Credential(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the store rejected a write because of a declared constraint
    /// (unique, foreign key, not-null, or check).
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Error::Database(DieselError::DatabaseError(kind, info)) => {
                matches!(
                    kind,
                    DatabaseErrorKind::UniqueViolation
                        | DatabaseErrorKind::ForeignKeyViolation
                        | DatabaseErrorKind::NotNullViolation
                        | DatabaseErrorKind::CheckViolation
                ) || info.message().contains("constraint failed")
            }
            _ => false,
        }
    }

    /// Whether a lookup found no row.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Database(DieselError::NotFound))
    }
}

impl From<diesel::r2d2::PoolError> for Error {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Error::Connection(err.to_string())
    }
}

impl From<diesel::ConnectionError> for Error {
    fn from(err: diesel::ConnectionError) -> Self {
        Error::Connection(err.to_string())
    }
}
