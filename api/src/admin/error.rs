use entity::validation::validation_messages;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Unknown admin resource '{0}'")]
    UnknownResource(String),
    #[error("Unknown action '{0}'")]
    UnknownAction(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0} records are read-only in the admin")]
    ReadOnly(&'static str),
    #[error("{0}: the acting user has no member profile")]
    MemberProfileRequired(&'static str),
    #[error("{}", .0.join("; "))]
    Invalid(Vec<String>),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Db(DbErr),
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

impl AdminError {
    /// Messages a form would show next to its fields.
    pub fn messages(&self) -> Vec<String> {
        match self {
            AdminError::Invalid(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl From<DbErr> for AdminError {
    fn from(err: DbErr) -> Self {
        if let Some(messages) = validation_messages(&err) {
            return AdminError::Invalid(messages);
        }
        if let DbErr::AttrNotSet(field) = &err {
            return AdminError::Invalid(vec![format!("{field}: This field is required")]);
        }
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AdminError::Invalid(vec![
                "A record with these values already exists".to_string(),
            ]),
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => AdminError::Invalid(vec![
                "A referenced record does not exist".to_string(),
            ]),
            _ => AdminError::Db(err),
        }
    }
}

/// Form errors for a payload that did not deserialize into a record.
pub(crate) fn payload_error(err: serde_json::Error) -> AdminError {
    let message = err.to_string();
    if let Some(rest) = message.strip_prefix("missing field `")
        && let Some((field, _)) = rest.split_once('`')
    {
        return AdminError::Invalid(vec![format!("{field}: This field is required")]);
    }
    AdminError::Invalid(vec![message])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Form {
        name: String,
        budget_cents: i64,
    }

    #[test]
    fn missing_fields_name_the_field() {
        let err = serde_json::from_value::<Form>(serde_json::json!({"name": "x"})).unwrap_err();
        assert_eq!(
            payload_error(err).messages(),
            vec!["budget_cents: This field is required".to_string()]
        );
    }

    #[test]
    fn validation_failures_become_form_errors() {
        let mut errors = entity::validation::ValidationErrors::new();
        errors.add("end_date", "End date must be after start date");
        let err: AdminError = DbErr::from(errors).into();
        assert!(matches!(err, AdminError::Invalid(ref m) if m.len() == 1));
        assert_eq!(err.to_string(), "end_date: End date must be after start date");
    }

    #[test]
    fn storage_failures_stay_internal() {
        let err: AdminError = DbErr::Custom("disk full".into()).into();
        assert!(matches!(err, AdminError::Db(_)));
    }
}
