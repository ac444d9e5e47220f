use crate::error::TmdbError;
use cinescope_config::TmdbConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    token: String,
    base_url: String,
    language: String,
}

/// Build the shared reqwest client with the configured timeout
pub fn create_tmdb_client(timeout_secs: u64) -> Client {
    Client::builder()
        .user_agent(concat!("cinescope/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig, token: String) -> Result<Self, TmdbError> {
        if token.trim().is_empty() {
            return Err(TmdbError::MissingToken);
        }

        Ok(Self {
            client: Arc::new(create_tmdb_client(config.timeout_secs)),
            token,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` with bearer auth, the configured language and `query`
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TmdbError> {
        let url = self.url(path);
        debug!(operation = "tmdb_request", path = path, "GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .query(&[("language", self.language.as_str())])
            .query(query)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, TmdbError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TmdbError::Api {
                status: status.as_u16(),
                message: extract_status_message(&body),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// TMDB error bodies look like `{"status_code": 7, "status_message": "..."}`
fn extract_status_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("status_message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_token() {
        let config = TmdbConfig::default();
        assert!(matches!(TmdbClient::new(&config, "  ".to_string()), Err(TmdbError::MissingToken)));
        assert!(TmdbClient::new(&config, "token".to_string()).is_ok());
    }

    #[test]
    fn test_url_joins_base() {
        let mut config = TmdbConfig::default();
        config.base_url = "http://localhost:9000/3/".to_string();
        let client = TmdbClient::new(&config, "token".to_string()).unwrap();
        assert_eq!(client.url("/movie/popular"), "http://localhost:9000/3/movie/popular");
    }

    #[test]
    fn test_extract_status_message() {
        let body = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;
        assert_eq!(extract_status_message(body), "Invalid API key: You must be granted a valid key.");
        assert_eq!(extract_status_message("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_not_found_detection() {
        let err = TmdbError::Api { status: 404, message: "missing".to_string() };
        assert!(err.is_not_found());
        assert!(!TmdbError::MissingToken.is_not_found());
    }
}
