//! Windowed pagination over remote collections
//!
//! The catalog API exposes its collections through offset/limit endpoints.
//! [`paginate`] drives such an endpoint across `[0, total)`, keeps a bounded
//! number of page requests in flight, and hands the pages to a consumer in
//! window order regardless of which request finishes first.

use std::future::Future;

use futures::stream::{self, StreamExt};

use crate::error::Result;

/// Default window width for bulk endpoints
pub const DEFAULT_PAGINATION_SIZE: u64 = 100;

/// Default number of page requests kept in flight
pub const DEFAULT_PARALLEL_REQUESTS: usize = 4;

/// Window width and request concurrency for one [`paginate`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub pagination_size: u64,
    pub num_parallel_requests: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            pagination_size: DEFAULT_PAGINATION_SIZE,
            num_parallel_requests: DEFAULT_PARALLEL_REQUESTS,
        }
    }
}

impl Pagination {
    /// One item per window, one request in flight.
    ///
    /// Used to walk the outdated-set list one set at a time so only a single
    /// deep fetch runs against the remote API at any moment.
    pub fn serial() -> Self {
        Self {
            pagination_size: 1,
            num_parallel_requests: 1,
        }
    }
}

/// Drive `fetch` over `[0, total)` in contiguous `pagination_size` windows
/// (the last window truncated to the remainder) and hand each page to
/// `consume` strictly in ascending offset order.
///
/// Up to `num_parallel_requests` fetches run concurrently; ordering of the
/// delivered pages is still by window, not by completion. A failed fetch
/// aborts the remaining windows and propagates; pages that completed before
/// the failure may already have been consumed. `total = 0` issues no
/// fetches at all.
pub async fn paginate<T, F, Fut, C>(
    total: u64,
    pagination: Pagination,
    fetch: F,
    mut consume: C,
) -> Result<()>
where
    F: Fn(u64, u64) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
    C: FnMut(Vec<T>) -> Result<()>,
{
    debug_assert!(pagination.pagination_size > 0);

    let windows = (0..total)
        .step_by(pagination.pagination_size.max(1) as usize)
        .map(|offset| (offset, pagination.pagination_size.min(total - offset)));

    // `buffered` (not `buffer_unordered`) is what preserves window order.
    let mut pages = stream::iter(windows.map(|(offset, limit)| fetch(offset, limit)))
        .buffered(pagination.num_parallel_requests.max(1));

    while let Some(page) = pages.next().await {
        consume(page?)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use std::cell::RefCell;
    use std::time::Duration;

    #[tokio::test]
    async fn windows_cover_total_without_gaps() {
        let calls = RefCell::new(Vec::new());
        let consumed = RefCell::new(Vec::new());

        paginate(
            250,
            Pagination::default(),
            |offset, limit| {
                calls.borrow_mut().push((offset, limit));
                async move { Ok(vec![offset]) }
            },
            |page| {
                consumed.borrow_mut().extend(page);
                Ok(())
            },
        )
        .await
        .unwrap();

        assert_eq!(*calls.borrow(), vec![(0, 100), (100, 100), (200, 50)]);
        assert_eq!(*consumed.borrow(), vec![0, 100, 200]);
    }

    #[tokio::test]
    async fn short_collection_fits_one_truncated_window() {
        let calls = RefCell::new(Vec::new());

        paginate(
            5,
            Pagination::default(),
            |offset, limit| {
                calls.borrow_mut().push((offset, limit));
                async move { Ok(Vec::<u64>::new()) }
            },
            |_page| Ok(()),
        )
        .await
        .unwrap();

        assert_eq!(*calls.borrow(), vec![(0, 5)]);
    }

    #[tokio::test]
    async fn pages_arrive_in_window_order() {
        let order = RefCell::new(Vec::new());

        paginate(
            3,
            Pagination {
                pagination_size: 1,
                num_parallel_requests: 3,
            },
            |offset, _limit| async move {
                // Later windows finish first
                tokio::time::sleep(Duration::from_millis(30 - offset * 10)).await;
                Ok(vec![offset])
            },
            |page| {
                order.borrow_mut().extend(page);
                Ok(())
            },
        )
        .await
        .unwrap();

        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn zero_total_issues_no_fetches() {
        let fetches = RefCell::new(0u32);
        let consumes = RefCell::new(0u32);

        paginate(
            0,
            Pagination::default(),
            |_offset, _limit| {
                *fetches.borrow_mut() += 1;
                async { Ok(Vec::<u64>::new()) }
            },
            |_page| {
                *consumes.borrow_mut() += 1;
                Ok(())
            },
        )
        .await
        .unwrap();

        assert_eq!(*fetches.borrow(), 0);
        assert_eq!(*consumes.borrow(), 0);
    }

    #[tokio::test]
    async fn failed_fetch_aborts_pagination() {
        let consumed = RefCell::new(Vec::new());

        let result = paginate(
            300,
            Pagination {
                pagination_size: 100,
                num_parallel_requests: 1,
            },
            |offset, _limit| async move {
                if offset >= 100 {
                    Err(SyncError::InvalidRecord(format!("boom at {}", offset)))
                } else {
                    Ok(vec![offset])
                }
            },
            |page| {
                consumed.borrow_mut().extend(page);
                Ok(())
            },
        )
        .await;

        assert!(result.is_err());
        // The page before the failure was already delivered
        assert_eq!(*consumed.borrow(), vec![0]);
    }

    #[tokio::test]
    async fn consume_error_stops_the_drive_loop() {
        let fetches = RefCell::new(0u64);

        let result = paginate(
            200,
            Pagination {
                pagination_size: 100,
                num_parallel_requests: 1,
            },
            |offset, _limit| {
                *fetches.borrow_mut() += 1;
                async move { Ok(vec![offset]) }
            },
            |_page| Err(SyncError::InvalidRecord("rejected".into())),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(*fetches.borrow(), 1);
    }
}
