//! Paginated stream for lazy iteration over page/limit endpoints.
//!
//! Account history and gain/loss are paged with a 1-based `page` number and
//! a `limit`. The server does not report a total, so a [`PaginatedStream`]
//! keeps requesting pages until one comes back short or empty.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;

use crate::Result;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Type alias for a boxed future used internally.
pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type FetchPage<T> = Box<dyn Fn(u32) -> BoxFuture<'static, Result<Vec<T>>> + Send + Sync>;

/// A stream that lazily fetches pages from a paginated API endpoint.
///
/// This stream yields individual items from each page, fetching the next
/// page only when the current one is exhausted. An error ends the stream
/// after it is yielded.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
/// use tradier_rs::api::HistoryQuery;
///
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// let mut events = client.account().history_stream(None, HistoryQuery::new(), 50)?;
///
/// while let Some(event) = events.next().await {
///     let event = event?;
///     println!("{} {}", event.date, event.amount);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaginatedStream<T> {
    fetch_page: FetchPage<T>,
    page_size: u32,
    current_items: VecDeque<T>,
    /// Next page to fetch, `None` once exhausted.
    next_page: Option<u32>,
    pending_fetch: Option<BoxFuture<'static, Result<Vec<T>>>>,
}

impl<T> PaginatedStream<T> {
    /// Create a stream starting at `first_page`.
    ///
    /// `fetch_page` is called with successive page numbers; a page holding
    /// fewer than `page_size` items is taken to be the last.
    pub(crate) fn new<F>(first_page: u32, page_size: u32, fetch_page: F) -> Self
    where
        F: Fn(u32) -> BoxFuture<'static, Result<Vec<T>>> + Send + Sync + 'static,
    {
        Self {
            fetch_page: Box::new(fetch_page),
            page_size,
            current_items: VecDeque::new(),
            next_page: Some(first_page),
            pending_fetch: None,
        }
    }
}

impl<T> Stream for PaginatedStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if let Some(item) = this.current_items.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if let Some(fut) = this.pending_fetch.as_mut() {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(items)) => {
                        this.pending_fetch = None;
                        let short = (items.len() as u64) < u64::from(this.page_size);
                        this.next_page = match this.next_page {
                            Some(page) if !short => page.checked_add(1),
                            _ => None,
                        };
                        this.current_items = items.into();

                        if this.current_items.is_empty() {
                            return Poll::Ready(None);
                        }
                        continue;
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.next_page = None;
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            match this.next_page {
                Some(page) => {
                    this.pending_fetch = Some((this.fetch_page)(page));
                }
                None => return Poll::Ready(None),
            }
        }
    }
}

impl<T> Unpin for PaginatedStream<T> {}
