mod client;
mod basic;

pub use client::HttpClient;
pub use basic::BasicClient;

use anyhow::Result;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Issues a GET through `client` and returns the body.
///
/// Non-2xx responses are turned into errors.
pub async fn fetch_bytes<C: HttpClient>(
    client: &C,
    url: &str,
) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse()?,
    );

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

/// Fetches `url` and decodes the body as JSON.
#[tracing::instrument(skip(client))]
pub async fn fetch_json<C: HttpClient, T: DeserializeOwned>(
    client: &C,
    url: &str,
) -> Result<T> {
    let bytes = fetch_bytes(client, url).await?;
    debug!(bytes = bytes.len(), "Response body received, decoding");
    Ok(serde_json::from_slice(&bytes)?)
}
