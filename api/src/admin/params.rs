use uuid::Uuid;

use super::error::AdminError;

/// Comparison requested by a `field__lookup` filter key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    Exact,
    Gte,
    Lte,
    IsNull,
}

impl Lookup {
    /// Split `start_date__gte` into the field name and its lookup.
    pub fn split(key: &str) -> (&str, Lookup) {
        match key.rsplit_once("__") {
            Some((field, "gte")) => (field, Lookup::Gte),
            Some((field, "lte")) => (field, Lookup::Lte),
            Some((field, "isnull")) => (field, Lookup::IsNull),
            Some((field, "exact")) => (field, Lookup::Exact),
            _ => (key, Lookup::Exact),
        }
    }
}

/// Changelist query: search, filters, ordering and page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    pub q: Option<String>,
    /// Comma-separated field names, `-` prefix for descending.
    pub ordering: Option<String>,
    /// 1-based page number.
    pub page: u64,
    pub filters: Vec<(String, String)>,
    /// Restricts the rows to an explicit selection.
    pub ids: Option<Vec<Uuid>>,
}

impl ListParams {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }

    /// Parse query-string pairs. `q`, `o`, `p` and `ids` are reserved; every
    /// other key is a field filter.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, AdminError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            match key {
                "q" => params.q = Some(value.to_string()).filter(|q| !q.is_empty()),
                "o" => params.ordering = Some(value.to_string()).filter(|o| !o.is_empty()),
                "p" => {
                    params.page = value
                        .parse::<u64>()
                        .ok()
                        .filter(|page| *page > 0)
                        .ok_or_else(|| AdminError::BadRequest(format!("Invalid page '{value}'")))?;
                }
                "ids" => params.ids = Some(parse_ids(value)?),
                _ if value.is_empty() => {}
                _ => params.filters.push((key.to_string(), value.to_string())),
            }
        }
        Ok(params)
    }

    pub fn search(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    pub fn order_by(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = Some(ordering.into());
        self
    }

    pub fn page(mut self, page: u64) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn only(mut self, ids: Vec<Uuid>) -> Self {
        self.ids = Some(ids);
        self
    }
}

pub fn parse_ids(raw: &str) -> Result<Vec<Uuid>, AdminError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            Uuid::parse_str(part).map_err(|_| AdminError::BadRequest(format!("Invalid id '{part}'")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_keys_are_not_filters() {
        let params = ListParams::from_pairs([
            ("q", "water"),
            ("o", "-created_at"),
            ("p", "2"),
            ("status", "IN_PROGRESS"),
            ("start_date__gte", "2024-01-01"),
            ("department_id", ""),
        ])
        .unwrap();
        assert_eq!(params.q.as_deref(), Some("water"));
        assert_eq!(params.ordering.as_deref(), Some("-created_at"));
        assert_eq!(params.page, 2);
        assert_eq!(params.filters.len(), 2);
    }

    #[test]
    fn rejects_bad_pages_and_ids() {
        assert!(ListParams::from_pairs([("p", "0")]).is_err());
        assert!(ListParams::from_pairs([("ids", "nope")]).is_err());
        let id = Uuid::new_v4();
        let params = ListParams::from_pairs([("ids", format!("{id}, "))]).unwrap();
        assert_eq!(params.ids, Some(vec![id]));
    }

    #[test]
    fn lookups_split_on_the_last_separator() {
        assert_eq!(Lookup::split("due_date__lte"), ("due_date", Lookup::Lte));
        assert_eq!(Lookup::split("milestone_id__isnull"), ("milestone_id", Lookup::IsNull));
        assert_eq!(Lookup::split("status"), ("status", Lookup::Exact));
        assert_eq!(Lookup::split("a__b"), ("a__b", Lookup::Exact));
    }
}
