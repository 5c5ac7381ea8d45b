//! Field-level validation shared by every entity save hook.
//!
//! Models implement [`Validate`]; the `before_save` hooks run it on the
//! fully-populated model and turn failures into [`DbErr::Custom`] values
//! prefixed with [`VALIDATION_PREFIX`], so callers holding only a `DbErr`
//! can still tell a rejected record apart from a storage failure.

use sea_orm::DbErr;
use thiserror::Error;

pub const VALIDATION_PREFIX: &str = "validation: ";
const SEPARATOR: &str = "; ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn render(&self) -> String {
        format!("{}: {}", self.field, self.message)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Error)]
#[error("{}", render_all(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn render_all(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::render)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|err| err.field == field)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Require `value` to sit inside `min..=max`.
    pub fn check_range<T>(&mut self, field: &'static str, value: T, min: T, max: T)
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            self.add(
                field,
                format!("Ensure this value is between {} and {}", min, max),
            );
        }
    }

    pub fn check_non_negative<T>(&mut self, field: &'static str, value: T)
    where
        T: PartialOrd + Default,
    {
        if value < T::default() {
            self.add(field, "Ensure this value is greater than or equal to 0");
        }
    }

    pub fn check_not_blank(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "This field cannot be blank");
        }
    }
}

impl From<ValidationErrors> for DbErr {
    fn from(value: ValidationErrors) -> Self {
        DbErr::Custom(format!("{}{}", VALIDATION_PREFIX, value))
    }
}

/// Business rules a record must satisfy before it is written.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Returns the rendered validation failure if `err` came from a save hook.
pub fn validation_message(err: &DbErr) -> Option<&str> {
    match err {
        DbErr::Custom(message) => message.strip_prefix(VALIDATION_PREFIX),
        _ => None,
    }
}

/// Splits a save-hook failure back into its per-field messages.
pub fn validation_messages(err: &DbErr) -> Option<Vec<String>> {
    validation_message(err).map(|message| {
        message
            .split(SEPARATOR)
            .map(str::to_string)
            .collect::<Vec<_>>()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_errors_carry_field_messages() {
        let mut errors = ValidationErrors::new();
        errors.add("end_date", "End date must be after start date");
        errors.add("actual_spend_cents", "Actual spend cannot exceed budget");
        let err: DbErr = errors.into();
        assert_eq!(
            validation_messages(&err).unwrap(),
            vec![
                "end_date: End date must be after start date".to_string(),
                "actual_spend_cents: Actual spend cannot exceed budget".to_string(),
            ]
        );
    }

    #[test]
    fn storage_errors_are_not_validation_failures() {
        let err = DbErr::Custom("disk full".into());
        assert!(validation_message(&err).is_none());
        assert!(validation_message(&DbErr::RecordNotFound("x".into())).is_none());
    }

    #[test]
    fn range_checks_are_inclusive() {
        let mut errors = ValidationErrors::new();
        errors.check_range("progress", 0, 0, 100);
        errors.check_range("progress", 100, 0, 100);
        assert!(errors.is_empty());
        errors.check_range("progress", 101, 0, 100);
        assert!(errors.has_field("progress"));
    }
}
