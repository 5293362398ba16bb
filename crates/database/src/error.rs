use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database connection settings: {0}")]
    ConnectionConfigError(String),

    #[error("{0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Validation(#[from] core_types::ValidationError),

    #[error("The requested data was not found in the database.")]
    NotFound,
}

impl DbError {
    /// Maps sqlx's "no rows" into `NotFound` and passes anything else through.
    pub(crate) fn from_lookup(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            other => other.into(),
        }
    }
}
