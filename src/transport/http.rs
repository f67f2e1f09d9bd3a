//! HTTP implementation of [`ChatTransport`]
//!
//! Every query is a single `POST` with a JSON body and bearer authorization.
//! The destination depends only on the request phase:
//!
//! - initial query: [`ResolvedConfig::initial_url`], body `{"query"}`
//! - follow-up query: [`ResolvedConfig::follow_up_url`], body
//!   `{"query", "threadId"}` (`threadId` omitted when no thread is known)
//!
//! The response must be 2xx *and* carry a truthy `success` field; anything
//! else becomes an [`ExchangeError`].

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ResolvedConfig;
use crate::error::{ExchangeError, Result, WidgetError};
use crate::transport::{Answer, ChatTransport, QueryRequest};

/// JSON body sent to the chat API
#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct QueryBody<'a> {
    query: &'a str,
    #[serde(rename = "threadId", skip_serializing_if = "Option::is_none")]
    thread_id: Option<&'a str>,
}

impl<'a> QueryBody<'a> {
    pub(crate) fn from_request(request: &'a QueryRequest) -> Self {
        let thread_id = if request.is_initial {
            None
        } else {
            request.thread_id.as_deref()
        };
        Self {
            query: &request.query,
            thread_id,
        }
    }
}

/// JSON body returned by the chat API
#[derive(Debug, Deserialize, Default)]
struct ApiResponse {
    #[serde(default)]
    success: serde_json::Value,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "threadId")]
    thread_id: Option<String>,
    #[serde(default)]
    answer: Option<ApiAnswer>,
}

#[derive(Debug, Deserialize, Default)]
struct ApiAnswer {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

/// JSON truthiness of the `success` field
fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl ApiResponse {
    fn into_result(self) -> std::result::Result<Answer, ExchangeError> {
        if !is_truthy(&self.success) {
            return Err(ExchangeError::Rejected {
                message: self.message.filter(|m| !m.trim().is_empty()),
            });
        }

        let answer = self.answer.unwrap_or_default();
        Ok(Answer {
            text: answer.text,
            source: answer.source.filter(|s| !s.trim().is_empty()),
            thread_id: self.thread_id.filter(|t| !t.is_empty()),
        })
    }
}

/// Chat API client over HTTP
///
/// # Examples
///
/// ```no_run
/// use chatbubble::config::WidgetConfig;
/// use chatbubble::transport::{ChatTransport, HttpTransport, QueryRequest};
///
/// # async fn example() -> chatbubble::error::Result<()> {
/// let config = WidgetConfig::new("secret").resolve()?;
/// let transport = HttpTransport::new(&config)?;
/// let answer = transport.send_query(&QueryRequest::initial("Hello")).await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_key: String,
    initial_url: Url,
    follow_up_url: Url,
}

impl HttpTransport {
    /// Build a transport from a resolved configuration
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be constructed
    pub fn new(config: &ResolvedConfig) -> Result<Self> {
        Self::with_urls(
            config.api_key.clone(),
            config.initial_url.clone(),
            config.follow_up_url.clone(),
            config.request_timeout,
        )
    }

    /// Build a transport with explicit destinations
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be constructed
    pub fn with_urls(
        api_key: String,
        initial_url: Url,
        follow_up_url: Url,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("chatbubble/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(WidgetError::Http)?;

        Ok(Self {
            client,
            api_key,
            initial_url,
            follow_up_url,
        })
    }

    /// Destination URL for a request
    pub fn endpoint_for(&self, request: &QueryRequest) -> &Url {
        if request.is_initial {
            &self.initial_url
        } else {
            &self.follow_up_url
        }
    }
}

#[async_trait::async_trait]
impl ChatTransport for HttpTransport {
    async fn send_query(&self, request: &QueryRequest) -> std::result::Result<Answer, ExchangeError> {
        let url = self.endpoint_for(request);
        let body = QueryBody::from_request(request);

        tracing::debug!(
            url = %url,
            initial = request.is_initial,
            has_thread = body.thread_id.is_some(),
            "Sending chat query"
        );

        let response = self
            .client
            .post(url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Chat request failed: {}", e);
                ExchangeError::transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Chat API returned error status {}", status);
            return Err(ExchangeError::Status {
                status: status.as_u16(),
            });
        }

        let parsed: ApiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse chat API response: {}", e);
            ExchangeError::transport(e)
        })?;

        let result = parsed.into_result();
        if let Err(ref rejected) = result {
            tracing::warn!("Chat API rejected query: {}", rejected);
        }
        result
    }
}
