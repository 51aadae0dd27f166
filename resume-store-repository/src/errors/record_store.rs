use thiserror::Error;

/// Represents errors that can occur within the record store.
///
/// This enum consolidates various error conditions specific to database interactions,
/// such as SQLx errors during database operations.
#[derive(Debug, Error)]
pub enum RecordStoreError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// A record with the same file name was written concurrently.
    #[error("Record already exists: {0}")]
    Conflict(String),
}

impl RecordStoreError {
    /// Whether this error is a uniqueness conflict on `file_name`.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Whether the database could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            )
        )
    }

    /// Whether the database refused the row itself, e.g. text it cannot store.
    pub fn is_rejected(&self) -> bool {
        match self {
            Self::DatabaseError(sqlx::Error::Database(e)) => {
                e.code().is_some_and(|code| is_data_exception(&code))
            }
            _ => false,
        }
    }
}

/// SQLSTATE class 22 covers invalid values such as `22P05` (untranslatable character).
fn is_data_exception(code: &str) -> bool {
    code.starts_with("22")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(RecordStoreError::Conflict("a.json".to_string()).is_conflict());
        assert!(RecordStoreError::DatabaseError(sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(!RecordStoreError::DatabaseError(sqlx::Error::RowNotFound).is_unavailable());
        assert!(!RecordStoreError::Conflict("a.json".to_string()).is_unavailable());
        assert!(!RecordStoreError::Conflict("a.json".to_string()).is_rejected());
        assert!(!RecordStoreError::DatabaseError(sqlx::Error::PoolTimedOut).is_rejected());
    }

    #[test]
    fn test_data_exception_codes() {
        assert!(is_data_exception("22P05"));
        assert!(is_data_exception("22021"));
        assert!(!is_data_exception("23505"));
        assert!(!is_data_exception("08006"));
    }
}
