//! Traits for the upstream data providers the merge reads from.

use anyhow::Result;

use crate::catalog::RawCatalog;
use crate::journey_time::{Granularity, JourneyTimeTable};

/// Source of the route/stop catalog.
#[async_trait::async_trait]
pub trait CatalogApi: Send + Sync {
    /// Returns the full raw catalog (`routeList` and `stopList`).
    async fn fetch_catalog(&self) -> Result<RawCatalog>;
}

/// Source of inter-stop journey-time tables.
///
/// One call returns the table for every origin stop at the given granularity.
#[async_trait::async_trait]
pub trait JourneyTimeApi: Send + Sync {
    async fn fetch_times(&self, granularity: Granularity) -> Result<JourneyTimeTable>;
}

#[async_trait::async_trait]
impl<T: JourneyTimeApi + ?Sized> JourneyTimeApi for &T {
    async fn fetch_times(&self, granularity: Granularity) -> Result<JourneyTimeTable> {
        (**self).fetch_times(granularity).await
    }
}
