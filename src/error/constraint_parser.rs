use regex::Regex;
use std::sync::OnceLock;

/// Pulls table, column and value out of PostgreSQL constraint violation
/// messages and constraint names such as `users_email_key`.
pub struct ConstraintParser;

struct RegexPatterns {
    key_value: Option<Regex>,
    column_name: Option<Regex>,
    table_name: Option<Regex>,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // "Key (email)=(a@b.c) already exists."
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").ok(),
            column_name: Regex::new(r#"column "([^"]+)""#).ok(),
            table_name: Regex::new(r#"(?:table|relation) "([^"]+)""#).ok(),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

/// Suffixes PostgreSQL gives to generated constraint names.
const CONSTRAINT_SUFFIXES: [&str; 5] = ["_fkey", "_key", "_check", "_pkey", "_idx"];

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Returns (entity, field, value) for a unique violation.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = Self::extract_key_value_from_message(message);

        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = key_value
                .map(|(_, value)| value)
                .unwrap_or_else(|| "duplicate_value".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = key_value?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Returns (entity, field, referenced value) for a foreign key violation.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = Self::extract_key_value_from_message(message);

        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = key_value
                .map(|(_, value)| value)
                .unwrap_or_else(|| "invalid_reference".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = key_value?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Returns (entity, field) for not-null and check violations.
    pub fn parse_column_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(parsed) = constraint_name.and_then(Self::parse_constraint_name) {
            return Some(parsed);
        }

        let field = Self::extract_column_from_message(message)?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Splits `<table>_<column...>_<suffix>` into (table, column).
    ///
    /// - "users_email_key" -> ("users", "email")
    /// - "comments_todo_id_fkey" -> ("comments", "todo_id")
    /// - "users_user_role_check" -> ("users", "user_role")
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint_name.strip_suffix(suffix))?;
        let (entity, field) = stem.split_once('_')?;
        if entity.is_empty() || field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        let caps = Self::patterns().key_value.as_ref()?.captures(message)?;
        let field = caps.get(1)?.as_str().to_string();
        let value = caps.get(2)?.as_str().to_string();
        Some((field, value))
    }

    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .as_ref()?
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_table_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .as_ref()?
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_email_key"),
            Some(("users".to_string(), "email".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("managers_todo_id_fkey"),
            Some(("managers".to_string(), "todo_id".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_user_role_check"),
            Some(("users".to_string(), "user_role".to_string()))
        );
        assert_eq!(ConstraintParser::parse_constraint_name("nosuffix"), None);
        assert_eq!(ConstraintParser::parse_constraint_name("users_key"), None);
    }

    #[test]
    fn test_parse_unique_violation() {
        let message = "duplicate key value violates unique constraint \"users_email_key\"\nDETAIL: Key (email)=(test@example.com) already exists.";
        assert_eq!(
            ConstraintParser::parse_unique_violation(message, Some("users_email_key")),
            Some((
                "users".to_string(),
                "email".to_string(),
                "test@example.com".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_unique_violation_without_constraint_name() {
        let message = "duplicate key value violates unique constraint on table \"users\"\nDETAIL: Key (email)=(x@y.z) already exists.";
        assert_eq!(
            ConstraintParser::parse_unique_violation(message, None),
            Some(("users".to_string(), "email".to_string(), "x@y.z".to_string()))
        );
    }

    #[test]
    fn test_parse_foreign_key_violation() {
        let message = "insert or update on table \"comments\" violates foreign key constraint \"comments_todo_id_fkey\"\nDETAIL: Key (todo_id)=(999) is not present in table \"todos\".";
        assert_eq!(
            ConstraintParser::parse_foreign_key_violation(message, Some("comments_todo_id_fkey")),
            Some((
                "comments".to_string(),
                "todo_id".to_string(),
                "999".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_not_null_violation_from_message() {
        let message =
            "null value in column \"title\" of relation \"todos\" violates not-null constraint";
        assert_eq!(
            ConstraintParser::parse_column_violation(message, None),
            Some(("todos".to_string(), "title".to_string()))
        );
    }

    proptest! {
        #[test]
        fn prop_parse_constraint_name_recovers_parts(
            table in "[a-z]{1,12}",
            column in "[a-z]{1,8}(_[a-z]{1,8})?",
            suffix in prop::sample::select(vec!["_key", "_fkey", "_check"]),
        ) {
            let name = format!("{table}_{column}{suffix}");
            prop_assert_eq!(
                ConstraintParser::parse_constraint_name(&name),
                Some((table, column))
            );
        }
    }
}
