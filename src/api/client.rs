// src/api/client.rs

//! HTTP client for the package service
//!
//! Wraps a blocking reqwest client. Each call issues exactly one request;
//! failures are reported, never retried.

use super::{Fetcher, Page};
use crate::error::{Error, Result};
use crate::failure::{FailureReport, FieldErrors};
use crate::models::Entity;
use crate::pagination::{PageInfo, PageRequest};
use crate::query::{QueryTerm, encode_query};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default API endpoint
pub const DEFAULT_API_HOST: &str = "https://api.cloudsmith.io/v1";

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the API key
const API_KEY_HEADER: &str = "X-Api-Key";

/// Connection settings for [`ApiClient`]
#[derive(Debug, Clone)]
pub struct ApiOptions {
    pub host: String,
    pub api_key: Option<String>,
    pub user_agent: String,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_API_HOST.to_string(),
            api_key: None,
            user_agent: format!("cloudsmith-cli/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Blocking HTTP implementation of [`Fetcher`]
pub struct ApiClient {
    client: Client,
    base: Url,
    api_key: Option<String>,
}

impl ApiClient {
    /// Create a client for the given options
    pub fn new(options: &ApiOptions) -> Result<Self> {
        let base = Url::parse(&options.host)
            .map_err(|e| Error::Config(format!("Invalid API host '{}': {e}", options.host)))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!("Invalid API host '{}'", options.host)));
        }

        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(options.user_agent.clone())
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base,
            api_key: options.api_key.clone().filter(|key| !key.is_empty()),
        })
    }

    /// Endpoint URL for the given path segments, with a trailing slash
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments).push("");
        }
        url
    }

    fn get_page(&self, url: Url, params: &[(&str, String)]) -> Result<Page> {
        debug!("GET {} {:?}", url, params);

        let mut request = self.client.get(url.clone()).query(params);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .map_err(|e| Error::Transport(format!("Failed to fetch {}: {}", url, e)))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .map_err(|e| Error::Transport(format!("Failed to read response from {}: {}", url, e)))?;

        if !status.is_success() {
            debug!("HTTP {} from {}: {}", status, url, body);
            return Err(failure_from_parts(status.as_u16(), &headers, &body).into());
        }

        let results: Vec<Entity> = serde_json::from_str(&body)
            .map_err(|e| Error::Decode(format!("{} (from {})", e, url)))?;
        let page_info = PageInfo::from_headers(&headers);
        debug!("Fetched {} results, pagination {:?}", results.len(), page_info);

        Ok(Page { results, page_info })
    }
}

impl Fetcher for ApiClient {
    fn list_packages(
        &self,
        owner: &str,
        repo: &str,
        query: &[QueryTerm],
        page: PageRequest,
    ) -> Result<Page> {
        let mut params = page.query_params();
        if let Some(query) = encode_query(query) {
            params.push(("query", query));
        }
        self.get_page(self.endpoint(&["packages", owner, repo]), &params)
    }

    fn list_repos(&self, owner: Option<&str>, page: PageRequest) -> Result<Page> {
        let url = match owner {
            Some(owner) => self.endpoint(&["repos", owner]),
            None => self.endpoint(&["repos"]),
        };
        self.get_page(url, &page.query_params())
    }

    fn list_distros(&self, package_format: Option<&str>) -> Result<Vec<Entity>> {
        let page = self.get_page(self.endpoint(&["distros"]), &[])?;
        Ok(match package_format {
            Some(format) => page
                .results
                .into_iter()
                .filter(|distro| distro.text("format") == Some(format))
                .collect(),
            None => page.results,
        })
    }
}

/// Build a failure report from a non-success response
///
/// The body is expected to be a JSON object with an optional `detail`
/// string and an optional `fields` object of field name to message(s).
/// Anything else leaves those parts empty.
pub fn failure_from_parts(status: u16, headers: &HeaderMap, body: &str) -> FailureReport {
    let status_description = StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown")
        .to_string();

    let mut report = FailureReport::new(status, status_description);

    if let Ok(Value::Object(data)) = serde_json::from_str::<Value>(body) {
        report.detail = data
            .get("detail")
            .and_then(Value::as_str)
            .filter(|detail| !detail.is_empty())
            .map(str::to_string);

        if data.get("fields").is_some_and(Value::is_object) {
            // Value sorts object keys, so read the fields again in wire order
            if let Ok(ErrorFields { fields }) = serde_json::from_str::<ErrorFields>(body) {
                let fields: FieldErrors = fields
                    .0
                    .into_iter()
                    .map(|(name, messages)| (name, messages_of(&messages)))
                    .filter(|(_, messages)| !messages.is_empty())
                    .collect();
                if !fields.is_empty() {
                    report.fields = Some(fields);
                }
            }
        }
    }

    let headers: BTreeMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    if !headers.is_empty() {
        report.headers = Some(headers);
    }

    report
}

/// The `fields` object of an error body
#[derive(Deserialize)]
struct ErrorFields {
    fields: OrderedEntries,
}

/// Object entries kept in the order they appear in the document
struct OrderedEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

fn messages_of(value: &Value) -> Vec<String> {
    match value {
        Value::String(message) => vec![message.clone()],
        Value::Array(items) => items.iter().flat_map(messages_of).collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn client(host: &str) -> ApiClient {
        ApiClient::new(&ApiOptions {
            host: host.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_paths() {
        let api = client("https://api.example.com/v1");
        assert_eq!(
            api.endpoint(&["packages", "acme", "web"]).as_str(),
            "https://api.example.com/v1/packages/acme/web/"
        );

        let api = client("https://api.example.com/v1/");
        assert_eq!(api.endpoint(&["repos"]).as_str(), "https://api.example.com/v1/repos/");
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let api = client("https://api.example.com/v1");
        assert_eq!(
            api.endpoint(&["repos", "a b"]).as_str(),
            "https://api.example.com/v1/repos/a%20b/"
        );
    }

    #[test]
    fn test_invalid_host() {
        let result = ApiClient::new(&ApiOptions {
            host: "not a url".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_failure_from_json_body() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("abc"));
        let body = r#"{"detail": "Invalid input.", "fields": {"page_size": ["Too big.", "Really."], "query": "Bad term.", "empty": []}}"#;

        let report = failure_from_parts(422, &headers, body);
        assert_eq!(report.status, 422);
        assert_eq!(report.status_description, "Unprocessable Entity");
        assert_eq!(report.detail.as_deref(), Some("Invalid input."));

        let fields = report.fields.unwrap();
        assert_eq!(
            fields,
            vec![
                ("page_size".to_string(), vec!["Too big.".to_string(), "Really.".to_string()]),
                ("query".to_string(), vec!["Bad term.".to_string()]),
            ]
        );

        assert_eq!(report.headers.unwrap()["x-request-id"], "abc");
    }

    #[test]
    fn test_failure_fields_keep_body_order() {
        let body = r#"{"fields": {"zeta": ["Last."], "alpha": "First.", "mid": ["Middle."]}}"#;
        let report = failure_from_parts(400, &HeaderMap::new(), body);

        let names: Vec<&str> = report
            .fields
            .as_ref()
            .unwrap()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert!(report.detail.is_none());
    }

    #[test]
    fn test_failure_fields_not_an_object() {
        let body = r#"{"detail": "Nope.", "fields": "oops"}"#;
        let report = failure_from_parts(400, &HeaderMap::new(), body);
        assert_eq!(report.detail.as_deref(), Some("Nope."));
        assert!(report.fields.is_none());
    }

    #[test]
    fn test_failure_from_non_json_body() {
        let report = failure_from_parts(502, &HeaderMap::new(), "<html>Bad Gateway</html>");
        assert_eq!(report.status_description, "Bad Gateway");
        assert!(report.detail.is_none());
        assert!(report.fields.is_none());
        assert!(report.headers.is_none());
    }
}
