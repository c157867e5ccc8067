use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use yansi::Paint;

use crate::error::ProviderError;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// Hetzner's error envelope: `{"error": {"code": "...", "message": "..."}}`
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Authenticated client for the Hetzner Cloud API.
///
/// Every call is sent exactly once; failures are returned, never retried.
pub struct HetznerClient {
    base_url: String,
    api_token: String,
    client: reqwest::Client,
}

impl HetznerClient {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        let agent = format!("rescale/{}", env!("CARGO_PKG_VERSION"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&agent).map_err(|e| ProviderError::ClientBuild(e.to_string()))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ProviderError::ClientBuild(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and decode a success body into `T`.
    pub(crate) async fn send<B, T>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, ProviderError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let body_json = match body {
            Some(b) => Some(
                serde_json::to_value(b).map_err(|e| ProviderError::UnexpectedResponse(e.to_string()))?,
            ),
            None => None,
        };
        log_output(format!("Request:\n{}", curl_line(method.as_str(), &url, body_json.as_ref())));

        let mut req = self
            .client
            .request(method, &url)
            .bearer_auth(&self.api_token);
        if let Some(ref b) = body_json {
            req = req.json(b);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            log_output(format!(
                "Response:\n{}",
                format!("HTTP {}: {}", status, text).red()
            ));
            return Err(api_error(status, &text));
        }

        // Grayed out so the payload doesn't compete with the status lines
        log_output(format!("Response:\n{}", text.as_str().rgb(100, 100, 100)));

        serde_json::from_str(&text).map_err(|e| {
            ProviderError::UnexpectedResponse(format!("Failed to parse JSON: {}", e))
        })
    }
}

/// Map a non-success response to a [`ProviderError::Api`].
fn api_error(status: StatusCode, text: &str) -> ProviderError {
    match serde_json::from_str::<ErrorEnvelope>(text) {
        Ok(env) => ProviderError::Api {
            status: status.as_u16(),
            code: env.error.code,
            message: env.error.message,
        },
        Err(_) => ProviderError::Api {
            status: status.as_u16(),
            code: status
                .canonical_reason()
                .unwrap_or("unknown")
                .to_lowercase()
                .replace(' ', "_"),
            message: if text.trim().is_empty() {
                "(empty response body)".to_string()
            } else {
                text.trim().to_string()
            },
        },
    }
}

/// Render the request as a colourised curl command. The token is redacted.
fn curl_line(method: &str, url: &str, body: Option<&serde_json::Value>) -> String {
    let mut parts = Vec::new();
    parts.push("curl".green().bold().to_string());
    parts.push(format!("-X {}", method.yellow().bold()));
    parts.push(format!("'{}'", url.cyan()));
    parts.push(format!("{} {}", "-H".magenta(), "'Authorization: Bearer ****'".magenta()));

    if let Some(d) = body {
        parts.push(format!("{} {}", "-H".magenta(), "'Content-Type: application/json'".magenta()));
        let json_str = serde_json::to_string(d).unwrap_or_default();
        let escaped_json = json_str.replace('\'', "'\\''");
        parts.push(format!("{} {}", "-d".blue(), format!("'{}'", escaped_json).white()));
    }
    parts.join(" ")
}
