//! Common utilities for the WAPI client
//!
//! Provides the authenticated HTTP plumbing shared by every connector call.

pub mod query;

use crate::error::IbError;
use crate::models::Reference;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Paged response wrapper returned when `_return_as_object=1`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResponse {
    /// Objects on this page
    pub result: Vec<Value>,
    /// Cursor for the next page; absent on the last one
    #[serde(default)]
    pub next_page_id: Option<String>,
}

/// Error body WAPI returns on failures
#[derive(Debug, Clone, Deserialize)]
struct WapiErrorBody {
    #[serde(rename = "Error", default)]
    error: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

/// `NotFound` for a 404 on `path`: a reference or an object kind
fn not_found(path: &str) -> IbError {
    IbError::not_found(Reference::new(path).kind(), path)
}

/// HTTP client wrapper with basic authentication
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl HttpClient {
    /// Create a new HTTP client wrapper. `base_url` is the WAPI root,
    /// e.g. `https://gm:443/wapi/v2.12/`
    pub fn new(client: Client, base_url: String, username: String, password: String) -> Self {
        let base_url = format!("{}/", base_url.trim_end_matches('/'));
        Self {
            client,
            base_url,
            username,
            password,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from an object kind or reference, plus query pairs
    pub fn build_url(&self, path: &str, pairs: &[(String, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, path.trim_start_matches('/'));
        if !pairs.is_empty() {
            url.push('?');
            url.push_str(&Self::build_query_string(pairs));
        }
        url
    }

    /// Build query string from key/value pairs
    pub fn build_query_string(pairs: &[(String, String)]) -> String {
        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
    }

    /// Send a request and decode its JSON body, mapping WAPI failures
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        pairs: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value, IbError> {
        let url = self.build_url(path, pairs);
        match body {
            Some(body) => debug!(
                "{} {} with body: {}",
                method,
                url,
                serde_json::to_string(body).unwrap_or_default()
            ),
            None => debug!("{} {}", method, url),
        }

        let mut request = self.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(IbError::Http)?;

        let response = Self::check_status(&method, path, response).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            IbError::Api(format!(
                "error decoding response body: {} - Response (first 500 chars): {}",
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }

    async fn check_status(method: &Method, path: &str, response: Response) -> Result<Response, IbError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<WapiErrorBody>(&body)
            .ok()
            .and_then(|e| e.text.or(e.error))
            .unwrap_or(body);

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                IbError::Authentication(format!("{status} - {message}"))
            }
            StatusCode::NOT_FOUND => {
                debug!("{method} {path} not found: {message}");
                not_found(path)
            }
            _ => IbError::Api(format!("{method} {path} failed: {status} - {message}")),
        })
    }

    /// Fetch all pages of a paged search
    pub async fn fetch_all_pages(
        &self,
        path: &str,
        mut pairs: Vec<(String, String)>,
        page_size: u32,
    ) -> Result<Vec<Value>, IbError> {
        let mut all_results = Vec::new();
        pairs.push(("_paging".to_string(), "1".to_string()));
        pairs.push(("_return_as_object".to_string(), "1".to_string()));
        pairs.push(("_max_results".to_string(), page_size.to_string()));

        loop {
            let value = self.send(Method::GET, path, &pairs, None).await?;
            let page: PagedResponse = serde_json::from_value(value)?;
            debug!("Fetched page of {} objects from {}", page.result.len(), path);
            all_results.extend(page.result);

            match page.next_page_id {
                Some(page_id) => {
                    pairs = vec![
                        ("_page_id".to_string(), page_id),
                        ("_return_as_object".to_string(), "1".to_string()),
                    ];
                }
                None => break,
            }
        }

        Ok(all_results)
    }
}
