use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, DbErr, ModelTrait, TryIntoModel, prelude::DateTimeWithTimeZone};
use uuid::Uuid;

use crate::validation::Validate;

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}

/// Value held by an active field, whether freshly set or loaded.
pub fn current<V>(value: &ActiveValue<V>) -> Option<&V>
where
    V: Into<sea_orm::Value>,
{
    match value {
        ActiveValue::Set(inner) | ActiveValue::Unchanged(inner) => Some(inner),
        ActiveValue::NotSet => None,
    }
}

pub(crate) fn assign_id(id: &mut ActiveValue<Uuid>) {
    if matches!(id, ActiveValue::NotSet) {
        *id = ActiveValue::Set(Uuid::new_v4());
    }
}

pub(crate) fn stamp(
    created_at: &mut ActiveValue<DateTimeWithTimeZone>,
    updated_at: &mut ActiveValue<DateTimeWithTimeZone>,
    insert: bool,
) {
    let now = now();
    if insert && matches!(created_at, ActiveValue::NotSet) {
        *created_at = ActiveValue::Set(now);
    }
    *updated_at = ActiveValue::Set(now);
}

pub(crate) fn stamp_created(created_at: &mut ActiveValue<DateTimeWithTimeZone>, insert: bool) {
    if insert && matches!(created_at, ActiveValue::NotSet) {
        *created_at = ActiveValue::Set(now());
    }
}

/// Materialise the pending row and run its business rules.
pub(crate) fn validated<A, M>(active: &A) -> Result<M, DbErr>
where
    A: TryIntoModel<M> + Clone,
    M: ModelTrait + Validate,
{
    let model = active.clone().try_into_model()?;
    model.validate()?;
    Ok(model)
}

/// Lowercase ASCII slug: alphanumerics kept, runs of separators become `-`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            pending_dash = true;
        }
    }
    slug.trim_matches('_').to_string()
}

pub(crate) fn short_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..6].to_string()
}

pub(crate) fn is_blank(value: &ActiveValue<String>) -> bool {
    current(value).is_none_or(|slug| slug.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Green Earth  Foundation"), "green-earth-foundation");
        assert_eq!(slugify("  Data & AI -- Labs "), "data-ai-labs");
        assert_eq!(slugify("Café Rustique"), "caf-rustique");
    }

    #[test]
    fn suffixes_are_six_hex_chars() {
        let suffix = short_suffix();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
