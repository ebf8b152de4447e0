/// Error type shared by every store adapter
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// PostgreSQL errors surfaced by SeaORM
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// A staged update or delete referenced a record the store does not hold
    #[error("{entity} with id {id} does not exist")]
    RecordNotFound { entity: &'static str, id: String },

    /// No ids remain for new records
    #[error("{entity} id sequence exhausted")]
    IdSequenceExhausted { entity: &'static str },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

impl DatabaseError {
    pub fn record_not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::RecordNotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
