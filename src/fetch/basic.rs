use super::client::HttpClient;
use async_trait::async_trait;

/// Plain `reqwest` client that negotiates gzip bodies.
///
/// No request timeout is set: the journey-time tables are large and a run
/// makes a single attempt per table anyway.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().gzip(true).build()?;
        Ok(Self(client))
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
