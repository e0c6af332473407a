//! HTTP client wrapper for the FixedFloat API

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as ReqwestClient, Method};
use serde_json::Value;

use crate::auth::{Credentials, API_KEY_HEADER, API_SIGN_HEADER};
use crate::error::{Error, Result};
use crate::payload::Payload;
use crate::types::Envelope;

/// Base URL of the FixedFloat API
pub const BASE_URL: &str = "https://fixedfloat.com/api/v1/";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Endpoint prefix; operation names are appended to it
    pub base_url: String,
    /// Whole-request timeout, none by default
    pub timeout: Option<Duration>,
    /// Value of the `User-Agent` header
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: None,
            user_agent: Some(concat!("fixedfloat-sdk/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

impl ClientConfig {
    /// Point the client at another endpoint prefix
    ///
    /// A missing trailing slash is added.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(base_url.into());
        self
    }

    /// Set a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

fn normalize_base_url(mut base_url: String) -> String {
    if !base_url.ends_with('/') {
        base_url.push('/');
    }
    base_url
}

/// FixedFloat API client
///
/// Holds only the credentials, the configuration and a pooled HTTP client, so it can
/// be cloned and shared across tasks freely.
#[derive(Debug, Clone)]
pub struct Client {
    http: ReqwestClient,
    credentials: Credentials,
    base_url: String,
}

impl Client {
    /// Create a client for the public endpoint
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client from an API key and secret key
    ///
    /// Fails with [`Error::InvalidCall`] if either key is empty.
    pub fn from_keys(api_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        Self::new(Credentials::new(api_key, secret_key)?)
    }

    /// Create a client with a custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        let http = builder.build().map_err(Error::Http)?;

        Ok(Self {
            http,
            credentials,
            base_url: normalize_base_url(config.base_url),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the credentials
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Full URL of an operation, with the payload as query string for GET
    pub fn request_url(&self, method: &Method, api_method: &str, encoded: &str) -> String {
        if *method == Method::GET && !encoded.is_empty() {
            format!("{}{}?{}", self.base_url, api_method, encoded)
        } else {
            format!("{}{}", self.base_url, api_method)
        }
    }

    /// Sign and send one request, returning the envelope's `data`
    ///
    /// The payload is encoded once; those exact bytes are signed and then placed in the
    /// query string (GET) or the body (POST).
    pub async fn send(&self, method: &Method, api_method: &str, payload: &Payload) -> Result<Value> {
        if *method != Method::GET && *method != Method::POST {
            return Err(Error::invalid_call(format!(
                "Unsupported request method {}, expected GET or POST",
                method
            )));
        }
        if api_method.trim().is_empty() {
            return Err(Error::invalid_call("API method name is required"));
        }

        let encoded = payload.encode()?;
        let signature = self.credentials.sign(&encoded)?;
        let url = self.request_url(method, api_method, &encoded);

        tracing::debug!(%method, api_method, payload_len = encoded.len(), "Sending request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(API_KEY_HEADER, self.credentials.api_key())
            .header(API_SIGN_HEADER, signature);

        if *method == Method::POST {
            request = request.header(CONTENT_TYPE, FORM_CONTENT_TYPE).body(encoded);
        }

        let response = request.send().await.map_err(Error::Http)?;
        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        let envelope: Envelope = serde_json::from_str(&body)?;
        match envelope.into_result() {
            Ok(data) => {
                tracing::debug!(api_method, http_status = status.as_u16(), "Request succeeded");
                Ok(data)
            }
            Err(err) => {
                tracing::warn!(api_method, http_status = status.as_u16(), error = %err, "Request rejected");
                Err(err)
            }
        }
    }

    pub(crate) async fn get(&self, api_method: &str, payload: &Payload) -> Result<Value> {
        self.send(&Method::GET, api_method, payload).await
    }

    pub(crate) async fn post(&self, api_method: &str, payload: &Payload) -> Result<Value> {
        self.send(&Method::POST, api_method, payload).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use mockito::{Matcher, Server};
    use serde_json::json;

    pub(crate) const TEST_API_KEY: &str = "key";
    pub(crate) const TEST_SECRET_KEY: &str = "secret";

    pub(crate) fn test_client(server_url: &str) -> Client {
        let credentials = Credentials::new(TEST_API_KEY, TEST_SECRET_KEY).unwrap();
        Client::with_config(credentials, ClientConfig::default().with_base_url(server_url)).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://fixedfloat.com/api/v1/");
        assert_eq!(config.timeout, None);
        assert!(config.user_agent.unwrap().starts_with("fixedfloat-sdk/"));
    }

    #[test]
    fn test_base_url_normalized() {
        let config = ClientConfig::default().with_base_url("http://localhost:1234/api");
        assert_eq!(config.base_url, "http://localhost:1234/api/");

        let config = ClientConfig::default().with_base_url("http://localhost:1234/api/");
        assert_eq!(config.base_url, "http://localhost:1234/api/");
    }

    #[test]
    fn test_client_creation() {
        let client = Client::from_keys("key", "secret").unwrap();
        assert_eq!(client.base_url(), BASE_URL);
        assert_eq!(client.credentials().api_key(), "key");
    }

    #[test]
    fn test_client_rejects_empty_secret() {
        let err = Client::from_keys("key", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCall);
    }

    #[test]
    fn test_client_with_raw_config_normalizes_base_url() {
        let credentials = Credentials::new("key", "secret").unwrap();
        let config = ClientConfig {
            base_url: "http://localhost:8080/v1".to_string(),
            timeout: Some(Duration::from_secs(5)),
            user_agent: None,
        };
        let client = Client::with_config(credentials, config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/v1/");
    }

    #[test]
    fn test_request_urls() {
        let client = Client::from_keys("key", "secret").unwrap();
        assert_eq!(
            client.request_url(&Method::GET, "getCurrencies", ""),
            "https://fixedfloat.com/api/v1/getCurrencies"
        );
        assert_eq!(
            client.request_url(&Method::GET, "getOrder", "id=A&token=B"),
            "https://fixedfloat.com/api/v1/getOrder?id=A&token=B"
        );
        assert_eq!(
            client.request_url(&Method::POST, "getPrice", "type=float"),
            "https://fixedfloat.com/api/v1/getPrice"
        );
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Client>();
        assert_sync::<Client>();
    }

    #[tokio::test]
    async fn test_send_get_signs_query_payload() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/getOrder")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("id".into(), "ABC123".into()),
                Matcher::UrlEncoded("token".into(), "tok".into()),
            ]))
            .match_header("x-api-key", TEST_API_KEY)
            .match_header(
                "x-api-sign",
                "83a5555f8d503287ac310023cb4c32a31b275aab3b1da4b8502f4c1adf0ed662",
            )
            .match_body("")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code":0,"msg":"OK","data":{"id":"ABC123"}}"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let payload: Payload = [("id", "ABC123"), ("token", "tok")].into_iter().collect();
        let data = client.send(&Method::GET, "getOrder", &payload).await.unwrap();

        assert_eq!(data, json!({"id": "ABC123"}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_post_signs_body_payload() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/getPrice")
            .match_header("x-api-key", TEST_API_KEY)
            .match_header(
                "x-api-sign",
                "012d8447c75be82271bf616ba06cb4d5e5800a9b05a9bd96ddb8a9d403481660",
            )
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body("type=float&fromQty=0.1&fromCurrency=ETH&toCurrency=BTC")
            .with_status(200)
            .with_body(r#"{"code":0,"msg":"OK","data":{"foo":1}}"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let payload: Payload = [
            ("type", "float"),
            ("fromQty", "0.1"),
            ("fromCurrency", "ETH"),
            ("toCurrency", "BTC"),
        ]
        .into_iter()
        .collect();
        let data = client.send(&Method::POST, "getPrice", &payload).await.unwrap();

        assert_eq!(data, json!({"foo": 1}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_signature_matches_reencoded_payload() {
        let mut server = Server::new_async().await;
        let payload: Payload = [("toAddress", "bc1q xyz:memo"), ("extra", "a&b=c")]
            .into_iter()
            .collect();
        let encoded = payload.encode().unwrap();
        let expected = Credentials::new(TEST_API_KEY, TEST_SECRET_KEY)
            .unwrap()
            .sign(&payload.encode().unwrap())
            .unwrap();

        let mock = server
            .mock("POST", "/createOrder")
            .match_header("x-api-sign", expected.as_str())
            .match_body(encoded.as_str())
            .with_status(200)
            .with_body(r#"{"code":0,"msg":"OK","data":{}}"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        client.post("createOrder", &payload).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_remote_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/getCurrencies")
            .with_status(200)
            .with_body(r#"{"code":1,"msg":"Bad request","data":{}}"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = client.get("getCurrencies", &Payload::new()).await.unwrap_err();

        match &err {
            Error::Remote { code, message } => {
                assert_eq!(*code, 1);
                assert_eq!(message, "Bad request");
            }
            other => panic!("expected remote error, got {:?}", other),
        }
        assert_eq!(err.kind(), ErrorKind::Remote);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_remote_error_on_http_error_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/getCurrencies")
            .with_status(401)
            .with_body(r#"{"code":301,"msg":"Invalid API key","data":null}"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = client.get("getCurrencies", &Payload::new()).await.unwrap_err();

        assert_eq!(err.remote_code(), Some(301));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_malformed_body_is_transport_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/getCurrencies")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = client.get("getCurrencies", &Payload::new()).await.unwrap_err();

        assert!(matches!(err, Error::Json(_)));
        assert_eq!(err.kind(), ErrorKind::Transport);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_connection_failure_is_transport_error() {
        // Nothing listens on port 1 of the loopback interface
        let client = test_client("http://127.0.0.1:1/api/v1/");
        let err = client.get("getCurrencies", &Payload::new()).await.unwrap_err();

        assert!(matches!(err, Error::Http(_)));
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_concurrent_calls_share_one_client() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/getCurrencies")
            .with_status(200)
            .with_body(r#"{"code":0,"msg":"OK","data":[]}"#)
            .expect(3)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let empty = Payload::new();
        let (a, b, c) = tokio::join!(
            client.get("getCurrencies", &empty),
            client.get("getCurrencies", &empty),
            client.get("getCurrencies", &empty),
        );

        assert_eq!(a.unwrap(), json!([]));
        assert_eq!(b.unwrap(), json!([]));
        assert_eq!(c.unwrap(), json!([]));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_rejects_unsupported_method_before_io() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = client
            .send(&Method::DELETE, "getOrder", &Payload::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidCall(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_rejects_empty_api_method_before_io() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = client
            .send(&Method::GET, "", &Payload::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidCall(_)));
        mock.assert_async().await;
    }
}
