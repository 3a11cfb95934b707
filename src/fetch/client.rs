use async_trait::async_trait;
use reqwest::{Request, Response};

/// Transport seam for every outbound GET made by the data-source clients.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
