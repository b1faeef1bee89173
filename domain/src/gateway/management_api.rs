use crate::error::{DomainErrorKind, Error, ExternalErrorKind};
use crate::push::PushChannel;
use async_trait::async_trait;
use log::*;
use reqwest::StatusCode;
use service::config::Config;
use std::time::Duration;

/// Pushes data to connections through the gateway's management endpoint:
/// `POST {API_URL}/@connections/{connection_id}` with the raw bytes as body.
///
/// A missing `API_URL` is not caught at construction; every send then fails
/// with a config error, which the dispatcher logs like any other delivery
/// failure.
pub struct ManagementApiClient {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl ManagementApiClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        Self::with_endpoint(config.api_url(), config.delivery_timeout())
    }

    pub fn with_endpoint(endpoint: Option<String>, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()?;

        Ok(Self { client, endpoint })
    }

    fn connection_url(&self, connection_id: &str) -> Result<String, Error> {
        let endpoint = self.endpoint.as_deref().ok_or_else(|| {
            warn!("Failed to get gateway management endpoint (API_URL) from config");
            Error::config("API_URL is not set")
        })?;

        Ok(format!(
            "{}/@connections/{}",
            endpoint.trim_end_matches('/'),
            urlencoding::encode(connection_id)
        ))
    }
}

#[async_trait]
impl PushChannel for ManagementApiClient {
    async fn send(&self, connection_id: &str, data: &[u8]) -> Result<(), Error> {
        let url = self.connection_url(connection_id)?;

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(data.to_vec())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status == StatusCode::GONE {
            Err(Error::stale_connection())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Other(format!(
                    "{status}: {error_text}"
                ))),
            })
        }
    }
}
