//! Offset-backed Relay connections.
//!
//! Cursors are the zero-based row offset of an edge. Windows follow the Relay
//! algorithm: `after`/`before` bound the slice, then `first` trims from the
//! front and `last` from the back.

use async_graphql::connection::{Connection, Edge};
use async_graphql::{OutputType, SimpleObject};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// Extra connection field carrying the unpaged row count.
#[derive(Debug, Clone, Copy, SimpleObject)]
pub struct TotalCount {
    #[graphql(name = "totalCount")]
    pub total_count: u64,
}

pub type OffsetConnection<N> = Connection<usize, N, TotalCount>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: usize,
    pub limit: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PageArgs {
    pub after: Option<usize>,
    pub before: Option<usize>,
    pub first: Option<usize>,
    pub last: Option<usize>,
}

impl PageArgs {
    /// Resolve the requested slice against `total` rows.
    pub fn window(&self, total: usize) -> PageWindow {
        let mut start = self.after.map_or(0, |after| after.saturating_add(1)).min(total);
        let mut end = self.before.unwrap_or(total).min(total).max(start);

        match (self.first, self.last) {
            (None, None) => end = end.min(start + DEFAULT_PAGE_SIZE),
            (first, last) => {
                if let Some(first) = first {
                    end = end.min(start + first.min(MAX_PAGE_SIZE));
                }
                if let Some(last) = last {
                    start = start.max(end.saturating_sub(last.min(MAX_PAGE_SIZE)));
                }
            }
        }

        PageWindow {
            offset: start,
            limit: end - start,
            has_previous: start > 0,
            has_next: end < total,
        }
    }
}

/// Wrap a page of nodes fetched for `window` into a connection.
pub fn connection<N>(window: PageWindow, total: u64, nodes: Vec<N>) -> OffsetConnection<N>
where
    N: OutputType,
{
    let mut conn = Connection::with_additional_fields(
        window.has_previous,
        window.has_next,
        TotalCount { total_count: total },
    );
    conn.edges.extend(
        nodes
            .into_iter()
            .enumerate()
            .map(|(idx, node)| Edge::new(window.offset + idx, node)),
    );
    conn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page() {
        let window = PageArgs::default().window(45);
        assert_eq!(window.offset, 0);
        assert_eq!(window.limit, DEFAULT_PAGE_SIZE);
        assert!(!window.has_previous);
        assert!(window.has_next);
    }

    #[test]
    fn first_after_moves_forward() {
        let args = PageArgs {
            after: Some(9),
            first: Some(5),
            ..Default::default()
        };
        let window = args.window(12);
        assert_eq!((window.offset, window.limit), (10, 2));
        assert!(window.has_previous);
        assert!(!window.has_next);
    }

    #[test]
    fn last_before_moves_backward() {
        let args = PageArgs {
            before: Some(10),
            last: Some(3),
            ..Default::default()
        };
        let window = args.window(30);
        assert_eq!((window.offset, window.limit), (7, 3));
        assert!(window.has_next);
    }

    #[test]
    fn cursor_past_the_end_is_empty() {
        let args = PageArgs {
            after: Some(99),
            ..Default::default()
        };
        let window = args.window(4);
        assert_eq!(window.limit, 0);
        assert!(!window.has_next);
    }

    #[test]
    fn page_size_is_capped() {
        let args = PageArgs {
            first: Some(1_000),
            ..Default::default()
        };
        assert_eq!(args.window(5_000).limit, MAX_PAGE_SIZE);
    }
}
