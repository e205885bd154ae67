//! Client for the voice-AI vendor's bot-management API

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::VendorConfig;

#[derive(Error, Debug)]
pub enum VendorError {
    #[error("Vendor API key is not configured")]
    NotConfigured,

    #[error("Vendor returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Vendor request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type VendorResult<T> = Result<T, VendorError>;

#[derive(Debug, Clone)]
pub struct VendorClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl VendorClient {
    pub fn new(config: &VendorConfig) -> VendorResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn create_bot(&self, bot: &Value) -> VendorResult<Value> {
        let request = self.http.post(self.bots_url());
        self.send_json(request.json(bot)).await
    }

    pub async fn list_bots(&self) -> VendorResult<Value> {
        self.send_json(self.http.get(self.bots_url())).await
    }

    pub async fn get_bot(&self, uid: &str) -> VendorResult<Value> {
        self.send_json(self.http.get(self.bot_url(uid))).await
    }

    pub async fn update_bot(&self, uid: &str, updates: &Value) -> VendorResult<Value> {
        let request = self.http.patch(self.bot_url(uid));
        self.send_json(request.json(updates)).await
    }

    pub async fn delete_bot(&self, uid: &str) -> VendorResult<()> {
        self.send(self.http.delete(self.bot_url(uid))).await?;
        Ok(())
    }

    fn bots_url(&self) -> String {
        format!("{}/bots", self.base_url)
    }

    fn bot_url(&self, uid: &str) -> String {
        format!("{}/bots/{}", self.base_url, urlencoding::encode(uid))
    }

    async fn send_json(&self, request: RequestBuilder) -> VendorResult<Value> {
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    async fn send(&self, request: RequestBuilder) -> VendorResult<reqwest::Response> {
        let api_key = self.api_key.as_deref().ok_or(VendorError::NotConfigured)?;
        let response = request.bearer_auth(api_key).send().await?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Vendor API response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VendorError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: Option<&str>) -> VendorClient {
        VendorClient::new(&VendorConfig {
            base_url: "https://vendor.example/v1/".to_string(),
            api_key: api_key.map(str::to_string),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_urls_are_normalized_and_encoded() {
        let client = client(Some("key"));
        assert_eq!(client.bots_url(), "https://vendor.example/v1/bots");
        assert_eq!(client.bot_url("a/b c"), "https://vendor.example/v1/bots/a%2Fb%20c");
    }

    #[test]
    fn test_blank_key_is_unconfigured() {
        assert!(!client(Some("  ")).is_configured());
        assert!(client(Some("key")).is_configured());
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let result = client(None).list_bots().await;
        assert!(matches!(result, Err(VendorError::NotConfigured)));
    }
}
