use std::sync::Arc;

use async_graphql::{Error, ErrorExtensions};
use thiserror::Error;

pub mod pagination;

/// Shared GraphQL result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("Login required")]
    Unauthenticated,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("{0}")]
    BadRequest(String),
    #[error("internal server error")]
    Internal(Arc<anyhow::Error>),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated => "UNAUTHENTICATED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Validation(_) => "VALIDATION",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self::Internal(Arc::new(err))
    }

    /// Messages suitable for a mutation payload's `errors` list.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ApiError::Validation(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> Error {
        if let ApiError::Internal(source) = self {
            tracing::error!(error = %source, "request failed");
        }
        let mut err = Error::new(self.to_string());
        err = err.extend_with(|_err, e| {
            e.set("code", self.code());
        });
        if let ApiError::Validation(messages) = self {
            let messages = messages.clone();
            err = err.extend_with(move |_err, e| {
                e.set("messages", messages.clone());
            });
        }
        err
    }
}

/// Plain GraphQL error tagged with an extension `code`.
pub fn error_with_code(code: &'static str, message: impl Into<String>) -> Error {
    Error::new(message.into()).extend_with(|_, e| e.set("code", code))
}

/// Convert any error into a GraphQL error payload while hiding internals.
pub fn internal_error(err: impl Into<anyhow::Error>) -> Error {
    ApiError::internal(err.into()).extend()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::Value;

    fn code_of(err: &Error) -> Option<Value> {
        err.extensions
            .as_ref()
            .and_then(|map| map.get("code"))
            .cloned()
    }

    #[test]
    fn internal_errors_are_masked() {
        let err = internal_error(anyhow::anyhow!("connection reset by peer"));
        assert_eq!(err.message, "internal server error");
        assert_eq!(code_of(&err), Some(Value::from("INTERNAL")));
    }

    #[test]
    fn validation_errors_keep_every_message() {
        let err = ApiError::Validation(vec![
            "end_date: End date must be after start date".into(),
            "name: This field cannot be blank".into(),
        ]);
        assert_eq!(err.messages().len(), 2);
        let gql = err.extend();
        assert_eq!(code_of(&gql), Some(Value::from("VALIDATION")));
        assert!(gql.message.starts_with("end_date: "));
    }

    #[test]
    fn not_found_names_the_resource() {
        let err = ApiError::NotFound("Initiative");
        assert_eq!(err.messages(), vec!["Initiative not found".to_string()]);
        assert_eq!(
            code_of(&error_with_code("UNAUTHENTICATED", "Login required")),
            Some(Value::from("UNAUTHENTICATED"))
        );
    }
}
