use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Converts Diesel errors into structured `AppError` values.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Maps a Diesel error raised while running `operation`.
    ///
    /// Unique violations become `Duplicate`, foreign key / not-null / check
    /// violations become `Validation`, and a bare `NotFound` becomes a
    /// generic "Resource not found".
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::not_found("Resource"),
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn diesel::result::DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let detailed = match info.details() {
            Some(details) => format!("{message}\nDETAIL: {details}"),
            None => message.to_string(),
        };
        let constraint_name = info.constraint_name();

        let converted = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ConstraintParser::parse_unique_violation(&detailed, constraint_name).map(
                    |(entity, field, value)| AppError::Duplicate {
                        entity,
                        field,
                        value,
                    },
                )
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                ConstraintParser::parse_foreign_key_violation(&detailed, constraint_name).map(
                    |(entity, field, value)| AppError::Validation {
                        field,
                        reason: format!("Invalid reference from {} with value '{}'", entity, value),
                    },
                )
            }
            DatabaseErrorKind::NotNullViolation => {
                ConstraintParser::parse_column_violation(&detailed, constraint_name).map(
                    |(entity, field)| AppError::Validation {
                        field,
                        reason: format!("Field is required for {}", entity),
                    },
                )
            }
            DatabaseErrorKind::CheckViolation => {
                ConstraintParser::parse_column_violation(&detailed, constraint_name).map(
                    |(entity, field)| AppError::Validation {
                        field,
                        reason: format!("Check constraint failed for {} field", entity),
                    },
                )
            }
            DatabaseErrorKind::ReadOnlyTransaction => Some(AppError::Database {
                operation: operation.to_string(),
                source: anyhow::anyhow!("Write attempted in read-only transaction: {}", message),
            }),
            _ => None,
        };

        converted.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::anyhow!("{:?}: {}", kind, message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
        details: Option<String>,
        constraint_name: Option<String>,
    }

    impl MockDatabaseErrorInfo {
        fn boxed(
            message: &str,
            details: Option<&str>,
            constraint_name: Option<&str>,
        ) -> Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync> {
            Box::new(Self {
                message: message.to_string(),
                details: details.map(String::from),
                constraint_name: constraint_name.map(String::from),
            })
        }
    }

    impl diesel::result::DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            self.details.as_deref()
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn test_convert_not_found_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find");
        assert!(matches!(result, AppError::NotFound { ref entity } if entity == "Resource"));
        assert_eq!(result.to_string(), "Resource not found");
    }

    #[test]
    fn test_convert_unique_violation_reads_details() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            MockDatabaseErrorInfo::boxed(
                "duplicate key value violates unique constraint \"users_email_key\"",
                Some("Key (email)=(test@example.com) already exists."),
                Some("users_email_key"),
            ),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert user") {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "users");
                assert_eq!(field, "email");
                assert_eq!(value, "test@example.com");
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_foreign_key_violation() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            MockDatabaseErrorInfo::boxed(
                "insert or update on table \"managers\" violates foreign key constraint \"managers_user_id_fkey\"",
                Some("Key (user_id)=(999) is not present in table \"users\"."),
                Some("managers_user_id_fkey"),
            ),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert manager") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "user_id");
                assert!(reason.contains("999"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_not_null_violation() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::NotNullViolation,
            MockDatabaseErrorInfo::boxed(
                "null value in column \"email\" violates not-null constraint",
                None,
                None,
            ),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert user") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "email");
                assert!(reason.contains("required"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_read_only_violation_is_a_database_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ReadOnlyTransaction,
            MockDatabaseErrorInfo::boxed(
                "cannot execute INSERT in a read-only transaction",
                None,
                None,
            ),
        );

        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert todo");
        assert!(matches!(result, AppError::Database { ref operation, .. } if operation == "insert todo"));
    }

    #[test]
    fn test_unparseable_violation_falls_back_to_database_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            MockDatabaseErrorInfo::boxed("duplicate key", None, None),
        );

        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert");
        assert!(matches!(result, AppError::Database { .. }));
    }
}
