//! HTTP transport. Every call resolves to an [`ApiResponse`]; failures below
//! HTTP become a status-less response instead of an error value so that all
//! flows go through the same completion rule.

use std::future::Future;

use reqwest::multipart::Form;
use tracing::{debug, warn};

use crate::protocol::{ApplyForm, DaemonConfig};
use crate::response::ApiResponse;

/// The three request shapes the panel issues.
pub trait Transport {
    fn get(&self, url: &str) -> impl Future<Output = ApiResponse> + Send;

    fn post_form(&self, url: &str, form: &ApplyForm) -> impl Future<Output = ApiResponse> + Send;

    fn put_json(
        &self,
        url: &str,
        config: &DaemonConfig,
    ) -> impl Future<Output = ApiResponse> + Send;
}

/// reqwest-backed transport. No request timeout is set: a hung request
/// leaves its flow unresolved.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn finish(
        &self,
        what: &str,
        url: &str,
        sent: Result<reqwest::Response, reqwest::Error>,
    ) -> ApiResponse {
        let response = match sent {
            Ok(r) => r,
            Err(e) => {
                warn!("[http] {} {} failed: {}", what, url, e);
                return ApiResponse::transport_failure();
            }
        };
        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => {
                debug!("[http] {} {} -> {} ({} bytes)", what, url, status, body.len());
                ApiResponse::new(status, body)
            }
            Err(e) => {
                // Status arrived but the body did not; keep the status.
                warn!("[http] {} {} -> {}, body read failed: {}", what, url, status, e);
                ApiResponse::new(status, String::new())
            }
        }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> ApiResponse {
        let sent = self.client.get(url).send().await;
        self.finish("GET", url, sent).await
    }

    async fn post_form(&self, url: &str, form: &ApplyForm) -> ApiResponse {
        let multipart = form
            .fields()
            .into_iter()
            .fold(Form::new(), |acc, (name, value)| acc.text(name, value));
        let sent = self.client.post(url).multipart(multipart).send().await;
        self.finish("POST", url, sent).await
    }

    async fn put_json(&self, url: &str, config: &DaemonConfig) -> ApiResponse {
        let sent = self.client.put(url).json(config).send().await;
        self.finish("PUT", url, sent).await
    }
}
