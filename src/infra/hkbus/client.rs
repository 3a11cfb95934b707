use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::catalog::RawCatalog;
use crate::config::Endpoints;
use crate::fetch::{BasicClient, HttpClient, fetch_json};
use crate::journey_time::{Granularity, JourneyTimeTable, decode_table};
use crate::services::{CatalogApi, JourneyTimeApi};

/// Client for the public hkbus.app catalog and the journey-time interval
/// tables that accompany it.
pub struct HkbusDataClient<C = BasicClient> {
    http: C,
    endpoints: Endpoints,
}

impl HkbusDataClient<BasicClient> {
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        Ok(Self::with_http(BasicClient::new()?, endpoints))
    }
}

impl<C: HttpClient> HkbusDataClient<C> {
    pub fn with_http(http: C, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    /// URL of the whole table for `granularity`.
    pub fn times_url(&self, granularity: Granularity) -> String {
        let base = self.endpoints.times_base_url.trim_end_matches('/');
        match granularity {
            Granularity::Aggregate => format!("{base}/times/all.json"),
            Granularity::Hourly { weekday, hour } => {
                format!("{base}/times_hourly/{weekday}/{hour}/all.json")
            }
        }
    }
}

#[async_trait]
impl<C: HttpClient> CatalogApi for HkbusDataClient<C> {
    async fn fetch_catalog(&self) -> Result<RawCatalog> {
        let url = &self.endpoints.catalog_url;
        fetch_json(&self.http, url)
            .await
            .with_context(|| format!("Failed to fetch route catalog from {url}"))
    }
}

#[async_trait]
impl<C: HttpClient> JourneyTimeApi for HkbusDataClient<C> {
    async fn fetch_times(&self, granularity: Granularity) -> Result<JourneyTimeTable> {
        let url = self.times_url(granularity);
        let document: Value = fetch_json(&self.http, &url)
            .await
            .with_context(|| format!("Failed to fetch journey times from {url}"))?;
        Ok(decode_table(document, granularity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey_time::{Hour, Weekday};

    struct Unreachable;

    #[async_trait]
    impl HttpClient for Unreachable {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            panic!("unexpected request to {}", req.url());
        }
    }

    fn client(times_base_url: &str) -> HkbusDataClient<Unreachable> {
        let endpoints = Endpoints {
            times_base_url: times_base_url.to_string(),
            ..Endpoints::default()
        };
        HkbusDataClient::with_http(Unreachable, endpoints)
    }

    #[test]
    fn test_aggregate_url() {
        let c = client("https://timeinterval.hkbuseta.com");
        assert_eq!(
            c.times_url(Granularity::Aggregate),
            "https://timeinterval.hkbuseta.com/times/all.json"
        );
    }

    #[test]
    fn test_hourly_url_pads_hour() {
        let c = client("http://localhost:8080/");
        let granularity = Granularity::Hourly {
            weekday: Weekday::new(5).unwrap(),
            hour: Hour::new(9).unwrap(),
        };
        assert_eq!(
            c.times_url(granularity),
            "http://localhost:8080/times_hourly/5/09/all.json"
        );
    }
}
