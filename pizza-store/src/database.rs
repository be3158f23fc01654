use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use tracing::info;
use pizza_core::CoreError;

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(connection_string: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(connection_string)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed successfully.");
        Ok(())
    }
}

/// Map a driver error, turning unique-key violations into `on_unique`.
pub(crate) fn map_db_error(err: sqlx::Error, on_unique: impl FnOnce() -> CoreError) -> CoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => on_unique(),
        _ => CoreError::StorageError(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct FakeDbError(ErrorKind);

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "fake database error: {:?}", self.0)
        }
    }

    impl StdError for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint \"orders_payment_reference_key\""
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed("23505"))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match &self.0 {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    #[test]
    fn test_unique_violation_maps_to_caller_error() {
        let err = sqlx::Error::database(FakeDbError(ErrorKind::UniqueViolation));
        let mapped = map_db_error(err, || CoreError::DuplicateReference("PIZZA_1_abc123".to_string()));
        assert!(matches!(mapped, CoreError::DuplicateReference(r) if r == "PIZZA_1_abc123"));
    }

    #[test]
    fn test_other_errors_are_storage_errors() {
        let err = sqlx::Error::database(FakeDbError(ErrorKind::CheckViolation));
        let mapped = map_db_error(err, || CoreError::DuplicateReference("unused".to_string()));
        assert!(matches!(mapped, CoreError::StorageError(_)));

        let mapped = map_db_error(sqlx::Error::RowNotFound, || CoreError::DuplicateReference("unused".to_string()));
        assert!(matches!(mapped, CoreError::StorageError(_)));
    }
}
