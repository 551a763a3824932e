//! Cursor-paginated results for list methods.
//!
//! `Page<T>` is one page of records as returned by the server.
//!
//! `PagedResult<T>` wraps a `Page<T>` with methods to
//! fetch the next page [`next_page()`](PagedResult::next_page),
//! all pages as a stream [`into_stream()`](PagedResult::into_stream),
//! or collect them into a vector, with [`collect_all()`](PagedResult::collect_all).
//!
//! WHOOP paginates with an opaque `next_token` cursor. A page with `next_token: null`
//! is the last one.
//!
use std::{fmt, ops::Deref, sync::Arc};

use futures::{
    StreamExt,
    stream::{BoxStream, unfold},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned, ser::Serializer};

use crate::{
    Result,
    http_client::{GetPaged, HttpClient},
    params::RequestParams,
};

/// A record type returned by the API.
pub trait Record: DeserializeOwned + Send + 'static {
    /// Fills in client-side fields after the record is decoded.
    fn resolve(&mut self) {}
}

/// One page of records.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page<T> {
    /// Records in server order (most recent first)
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,

    /// Cursor for the next page; `None` on the last page
    #[serde(default)]
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records in this page.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns true if the server reported another page.
    pub fn has_more(&self) -> bool {
        self.next_token.as_deref().is_some_and(|token| !token.is_empty())
    }

    /// Iterates over the records in this page (may need to get next page for all).
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }
}

// create iterator over a shared reference to records
impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A page of records that knows how to fetch the pages after it.
///
/// `PagedResult<T>` implements `Deref` to `Page<T>`,
/// so you can access `.records`, `.next_token`, `.len()`, etc. directly.
///
/// # Example
///
/// ```rust,no_run
/// use whoop::prelude::*;
/// use futures::StreamExt;
///
/// # async fn example(client: &WhoopClient) -> Result<(), WhoopError> {
/// // First page only
/// let page = client.sleep().list_all(None).await?;
/// println!("First page: {} records, more: {}", page.len(), page.has_more());
///
/// // Stream all records from all pages
/// let mut stream = client.sleep().list_all(None).await?.into_stream();
/// while let Some(sleep) = stream.next().await {
///     let sleep = sleep?;
///     println!("sleep {} nap={}", sleep.id, sleep.nap);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PagedResult<T> {
    response: Page<T>,
    refill: Option<Refill>,
}

// client and request parameters needed to get the next Page
#[derive(Clone)]
struct Refill {
    client: Arc<HttpClient>,
    path: String,
    params: RequestParams,
}

impl Refill {
    async fn fetch<T: Record>(&self, token: String) -> Result<PagedResult<T>> {
        let params = self.params.clone().next_token(token);
        self.client.get_request_paged(&self.path, Some(&params)).await
    }
}

impl<T> PagedResult<T> {
    /// Creates a new `PagedResult` from a page, client, and the original request.
    pub(crate) fn new(
        response: Page<T>,
        client: Arc<HttpClient>,
        path: impl Into<String>,
        params: RequestParams,
    ) -> Self {
        Self {
            response,
            refill: Some(Refill {
                client,
                path: path.into(),
                params,
            }),
        }
    }

    /// Creates a single page result from a list of records, with no way to fetch more.
    pub fn from_records(records: Vec<T>) -> Self {
        Self {
            response: Page {
                records,
                next_token: None,
            },
            refill: None,
        }
    }

    /// Consumes this result and returns the underlying `Page<T>`.
    pub fn into_page(self) -> Page<T> {
        self.response
    }
}

impl<T> Deref for PagedResult<T> {
    type Target = Page<T>;

    fn deref(&self) -> &Self::Target {
        &self.response
    }
}

// Implement Debug by delegating to the inner response
impl<T: fmt::Debug> fmt::Debug for PagedResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedResult")
            .field("response", &self.response)
            .finish()
    }
}

// Implement Serialize by delegating to the inner response
// This allows CLI code to serialize PagedResult<T> as if it were Page<T>
impl<T: Serialize> Serialize for PagedResult<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.response.serialize(serializer)
    }
}

// Implement IntoIterator for the first page only (delegates to Page)
impl<'a, T> IntoIterator for &'a PagedResult<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.response.records.iter()
    }
}

struct StreamState<T> {
    records: std::vec::IntoIter<T>,
    next_token: Option<String>,
    refill: Option<Refill>,
    errored: bool,
}

impl<T: Record> PagedResult<T> {
    /// Fetches the page after this one, or returns `None` if this is the last page.
    ///
    /// The request reuses this result's filters, with the returned `next_token` as cursor.
    pub async fn next_page(&self) -> Result<Option<PagedResult<T>>> {
        match (&self.refill, &self.response.next_token) {
            (Some(refill), Some(token)) if !token.is_empty() => {
                refill.fetch(token.clone()).await.map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Converts this paginated result into a stream of all records across all pages.
    ///
    /// The stream yields records from the first page immediately, then fetches
    /// subsequent pages as needed while a `next_token` is present. An empty page
    /// ends the stream. After an error, the stream ends.
    pub fn into_stream(self) -> BoxStream<'static, Result<T>> {
        let state = StreamState {
            records: self.response.records.into_iter(),
            next_token: self.response.next_token,
            refill: self.refill,
            errored: false,
        };

        unfold(state, |mut state| async move {
            if let Some(record) = state.records.next() {
                return Some((Ok(record), state));
            }
            if state.errored {
                return None;
            }
            // Current page exhausted, fetch next page if available
            let token = state.next_token.take().filter(|token| !token.is_empty())?;
            let refill = state.refill.clone()?;
            match refill.fetch::<T>(token).await {
                Ok(next) => {
                    let page = next.into_page();
                    state.next_token = page.next_token;
                    state.records = page.records.into_iter();
                    // Get first record from new page (empty page stops iteration)
                    let record = state.records.next()?;
                    Some((Ok(record), state))
                }
                Err(e) => {
                    state.errored = true;
                    Some((Err(e), state))
                }
            }
        })
        .boxed()
    }

    /// Collects all records from all pages into a vector.
    ///
    /// Stops on the first error encountered.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use whoop::prelude::*;
    ///
    /// # async fn example(client: &WhoopClient) -> Result<(), WhoopError> {
    /// let all_cycles = client.cycles().list_all(None).await?.collect_all().await?;
    /// println!("Total cycles: {}", all_cycles.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn collect_all(self) -> Result<Vec<T>> {
        let mut stream = self.into_stream();
        let mut records = Vec::new();

        while let Some(result) = stream.next().await {
            records.push(result?);
        }

        Ok(records)
    }
}
