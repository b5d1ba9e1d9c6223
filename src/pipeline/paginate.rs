// file: src/pipeline/paginate.rs
// description: walks a paged list endpoint and flattens its results
// reference: count request for meta.page.total_pages, then fetch pages 1..=total in order

use crate::client::SearchApi;
use crate::error::Result;
use crate::models::page::{take_results, total_pages};
use crate::models::{Endpoint, PageRequest};
use crate::pipeline::progress::ProgressObserver;
use serde_json::Value;
use tracing::{debug, info};

pub struct Paginator<'a> {
    api: &'a dyn SearchApi,
    progress: &'a dyn ProgressObserver,
    page_size: u32,
}

impl<'a> Paginator<'a> {
    pub fn new(api: &'a dyn SearchApi, progress: &'a dyn ProgressObserver, page_size: u32) -> Self {
        Self {
            api,
            progress,
            page_size,
        }
    }

    /// Returns every result item of `endpoint`, in page order then in-page order.
    ///
    /// Issues one unpaged request to learn the page count and then one request
    /// per page; the count request's own results are not used. Any failed request
    /// aborts the walk.
    pub async fn paginate(&self, endpoint: Endpoint) -> Result<Vec<Value>> {
        let first = self.api.get(endpoint, None).await?;
        let pages = total_pages(endpoint, &first)?;
        info!("{}: {} page(s) to fetch", endpoint, pages);

        let mut items = Vec::new();
        if pages == 0 {
            return Ok(items);
        }

        self.progress.start(endpoint.path(), u64::from(pages));
        for current in 1..=pages {
            let body = PageRequest::new(self.page_size, current).to_value()?;
            let response = self.api.get(endpoint, Some(&body)).await?;
            let results = take_results(endpoint, response)?;
            debug!("{} page {}/{}: {} item(s)", endpoint, current, pages, results.len());

            items.extend(results);
            self.progress.advance(u64::from(current));
        }
        self.progress.finish();

        Ok(items)
    }
}
