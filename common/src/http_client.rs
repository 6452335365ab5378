use crate::errors::AppError;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// HTTP client for JSON GETs. One attempt per call, no retries.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Build a client. `timeout` of `None` leaves the transport default in place.
    pub fn new(timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client })
    }

    /// Fetch JSON from `url` with the given query parameters.
    ///
    /// Query values are not recorded in the span since they may carry
    /// credentials.
    #[instrument(skip(self, query), fields(url = %url))]
    pub async fn get_json<T>(&self, url: &str, query: &[(&str, &str)]) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Upstream returned error status");
            return Err(AppError::http(
                status.as_u16(),
                format!("HTTP error: {}", status),
            ));
        }

        let text = response.text().await?;
        let json: T = serde_json::from_str(&text)?;

        info!(url = %url, "Request successful");
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    #[tokio::test]
    async fn test_get_json_sends_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data"))
            .and(query_param("q", "New York"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(None).unwrap();
        let body: serde_json::Value = client
            .get_json(&format!("{}/data", mock_server.uri()), &[("q", "New York")])
            .await
            .unwrap();

        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("city not found"))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(None).unwrap();
        let err = client
            .get_json::<serde_json::Value>(&format!("{}/missing", mock_server.uri()), &[])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::HttpError { status: 404, .. }));
        assert_eq!(err.kind(), ErrorKind::Provider);
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/garbage"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(None).unwrap();
        let err = client
            .get_json::<serde_json::Value>(&format!("{}/garbage", mock_server.uri()), &[])
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn test_configured_timeout_applies() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(Some(Duration::from_millis(100))).unwrap();
        let err = client
            .get_json::<serde_json::Value>(&format!("{}/slow", mock_server.uri()), &[])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NetworkError(_)));
    }
}
