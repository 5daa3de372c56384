//! The Paginated List Iterator.
//!
//! A [`Paginator`] walks a list operation lazily. The first page is fetched
//! on the first advance. Each following page is requested with `page` set to
//! the previous reply's `opc-next-page` token, until a reply carries none.
//!
//! ```text
//! Idle ──► Fetching ──► Buffered ──► Fetching ──► … ──► Drained
//!              │                         │
//!              └─────────► Failed ◄──────┘
//! ```
//!
//! A failed advance poisons the paginator: every later advance returns the
//! same error without calling the transport.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, warn};

use crate::client::{Client, Request};
use crate::error::{ShapeError, TransportError};
use crate::record::Record;
use crate::transport::Transport;

#[derive(Debug)]
enum PageState {
    /// Nothing fetched yet.
    Idle,
    /// A fetch was started; carries the token it sent.
    Fetching(Option<String>),
    /// A page is buffered; carries the token of the next page.
    Buffered(Option<String>),
    Drained,
    Failed(ShapeError),
}

/// Lazy, finite, non-restartable iteration over a list operation.
///
/// Items come with their one-based position across all pages.
///
/// ## Examples
///
/// ```rust,ignore
/// let mut pages = client.paginate("ListBootVolumeReplicas", request)?;
/// while let Some((index, replica)) = pages.next().await? {
///     println!("{index}: {}", replica.get_str("Id").unwrap_or_default());
/// }
/// ```
#[derive(Debug)]
pub struct Paginator<'a, T> {
    client: &'a Client<T>,
    operation: String,
    page_field: String,
    request: Request,
    state: PageState,
    buffer: VecDeque<Record>,
    index: usize,
    pages: usize,
    sent: HashSet<String>,
}

impl<'a, T: Transport> Paginator<'a, T> {
    pub(crate) fn new(
        client: &'a Client<T>,
        operation: String,
        page_field: String,
        request: Request,
    ) -> Self {
        Self {
            client,
            operation,
            page_field,
            request,
            state: PageState::Idle,
            buffer: VecDeque::new(),
            index: 0,
            pages: 0,
            sent: HashSet::new(),
        }
    }

    /// Operation id being walked.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Number of pages received so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    /// Returns true once the sequence has ended or failed.
    pub fn is_finished(&self) -> bool {
        self.buffer.is_empty() && matches!(self.state, PageState::Drained | PageState::Failed(_))
    }

    /// Advances to the next item.
    ///
    /// Returns `Ok(None)` at the end of the sequence.
    ///
    /// ## Errors
    ///
    /// Transport, service and decode errors of a page fetch surface on the
    /// advance that needed the page, and on every advance after it.
    pub async fn next(&mut self) -> Result<Option<(usize, Record)>, ShapeError> {
        loop {
            if let PageState::Failed(err) = &self.state {
                return Err(err.clone());
            }

            if let Some(item) = self.buffer.pop_front() {
                self.index += 1;
                return Ok(Some((self.index, item)));
            }

            let token = match std::mem::replace(&mut self.state, PageState::Drained) {
                PageState::Idle => self
                    .request
                    .record()
                    .get_str(&self.page_field)
                    .filter(|token| !token.is_empty())
                    .map(str::to_string),
                // A fetch that was dropped mid-flight is retried with the same token.
                PageState::Fetching(token) => token,
                PageState::Buffered(Some(token)) => {
                    if self.sent.contains(&token) {
                        let err: ShapeError = TransportError::Request(format!(
                            "{} returned continuation token {token:?} twice",
                            self.operation
                        ))
                        .into();
                        self.state = PageState::Failed(err.clone());
                        return Err(err);
                    }
                    Some(token)
                }
                PageState::Buffered(None) | PageState::Drained => return Ok(None),
                PageState::Failed(err) => {
                    self.state = PageState::Failed(err.clone());
                    return Err(err);
                }
            };

            if let Err(err) = self.fetch(token).await {
                self.state = PageState::Failed(err.clone());
                return Err(err);
            }
        }
    }

    async fn fetch(&mut self, token: Option<String>) -> Result<(), ShapeError> {
        self.state = PageState::Fetching(token.clone());
        let mut request = self.request.clone();
        if let Some(token) = &token {
            self.sent.insert(token.clone());
            request.set(&self.page_field, token.as_str())?;
        }

        let response = self.client.call(&self.operation, &request).await?;
        self.pages += 1;

        let next = response.next_page().map(str::to_string);
        let items = response.into_items();
        debug!(
            operation = %self.operation,
            page = self.pages,
            items = items.len(),
            has_next = next.is_some(),
            "fetched page"
        );

        let next = match next {
            Some(next) if token.as_deref() == Some(next.as_str()) => {
                warn!(
                    operation = %self.operation,
                    token = %next,
                    "continuation token repeated; ending iteration"
                );
                None
            }
            other => other,
        };

        self.buffer.extend(items);
        self.state = PageState::Buffered(next);
        Ok(())
    }
}
