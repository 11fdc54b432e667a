use crate::connection::{ApiPath, Connection};
use crate::errors::ApiError;
use async_trait::async_trait;
use reqwest::Client;

/// Plain HTTP transport: attaches the bearer credential when configured and
/// returns the body text regardless of status. Error bodies must reach the
/// layers above intact, since the API reports some failures inside 200s and
/// some valid-looking text inside 400s.
pub struct HttpConnection {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpConnection {
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }
}

#[async_trait]
impl Connection for HttpConnection {
    async fn fetch(&self, path: &ApiPath) -> Result<String, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("GET {url}");

        let mut request = self.client.get(&url).header("Content-Type", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        Ok(response.text().await?)
    }
}
