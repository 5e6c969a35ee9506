use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};
use log::{info, warn};

use super::query::{Endpoint, Query};
use super::types::PageResult;
use crate::error::{KakaoError, Result};

/// Step-wise and bulk retrieval of result pages.
///
/// The iterator is either ready or exhausted. Once exhausted it never
/// becomes ready again and `next_page` answers `KakaoError::EndOfPages`
/// without touching the network.
#[async_trait]
pub trait PageIterator: Send {
    type Document: Send;

    /// Fetch the page under the cursor and advance.
    ///
    /// A failed fetch leaves the cursor and the exhaustion flag untouched.
    async fn next_page(&mut self) -> Result<PageResult<Self::Document>>;

    /// Fetch every remaining page concurrently and mark the iterator exhausted.
    ///
    /// Pages that fail are dropped; the rest come back in page order.
    async fn collect_all(&mut self) -> Result<Vec<PageResult<Self::Document>>>;

    fn is_exhausted(&self) -> bool;
}

#[async_trait]
impl<E: Endpoint> PageIterator for Query<E> {
    type Document = E::Document;

    async fn next_page(&mut self) -> Result<PageResult<E::Document>> {
        if let Some(err) = self.last_error.take() {
            return Err(err);
        }
        if self.exhausted {
            return Err(KakaoError::EndOfPages);
        }
        self.params.endpoint.check(self.params.sort)?;

        let result = self.params.fetch(self.page).await?;

        self.page += 1;
        if result.meta.is_end || self.page > E::MAX_PAGE {
            self.exhausted = true;
        }
        Ok(result)
    }

    async fn collect_all(&mut self) -> Result<Vec<PageResult<E::Document>>> {
        let was_exhausted = self.exhausted;
        self.exhausted = true;

        if let Some(err) = self.last_error.take() {
            return Err(err);
        }
        if was_exhausted {
            return Ok(Vec::new());
        }
        self.params.endpoint.check(self.params.sort)?;
        if self.params.authorization.is_none() {
            return Err(KakaoError::NoApiKey);
        }

        let first = self.page;
        let remaining = (E::MAX_PAGE - first + 1) as usize;
        let limit = self.params.client.max_concurrent().min(remaining);
        info!(
            "Collecting {} pages {}..={} with up to {} concurrent requests",
            E::NAME,
            first,
            E::MAX_PAGE,
            limit
        );

        let params = &self.params;
        // `buffered` yields in input order, so slot i always holds page first + i
        let fetched: Vec<(u32, Result<PageResult<E::Document>>)> = stream::iter(first..=E::MAX_PAGE)
            .map(|page| {
                let snapshot = params.clone();
                async move { (page, snapshot.fetch(page).await) }
            })
            .buffered(limit)
            .collect()
            .await;

        let mut pages = Vec::with_capacity(fetched.len());
        for (page, result) in fetched {
            match result {
                Ok(result) => pages.push(result),
                Err(err) => warn!("Dropping {} page {}: {}", E::NAME, page, err),
            }
        }
        info!("Collected {} of {} {} pages", pages.len(), remaining, E::NAME);
        Ok(pages)
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl<E: Endpoint> Query<E> {
    /// Drive the query as a stream of pages.
    ///
    /// The stream ends at exhaustion, or right after yielding the first error.
    pub fn pages(self) -> impl Stream<Item = Result<PageResult<E::Document>>> + Send {
        stream::unfold(Some(self), |state| async move {
            let mut query = state?;
            match query.next_page().await {
                Ok(page) => Some((Ok(page), Some(query))),
                Err(KakaoError::EndOfPages) => None,
                Err(err) => Some((Err(err), None)),
            }
        })
    }
}
