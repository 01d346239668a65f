//! Execution of one request and classification of its outcome.
//!
//! The executor performs exactly one GET through a [`Transport`] and turns the
//! raw response into an [`Outcome`]:
//!
//! 1. a status other than 200 is a [`SteamError::Protocol`] failure carrying
//!    the body text when a `content-type` header is present,
//! 2. a 200 whose `content-type` does not mention `json` is a failure carrying
//!    the body text,
//! 3. otherwise the body is parsed as JSON, and a parse error or a falsy value
//!    (`null`, `false`, `0`, `""`) is a failure,
//! 4. anything else is a success.
//!
//! Transport errors are converted into [`SteamError::Transport`]; nothing here panics.

use std::fmt;

use log::{debug, warn};
use reqwest::Url;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use serde_json::Value;

use crate::error::SteamError;
use crate::steam::requester::{RawResponse, Transport, TransportOptions};

/// Message of the failure raised when the JSON body is a falsy value.
const UNRESOLVABLE_RESPONSE: &str = "unresolvable response";

/// Fully resolved request of one endpoint call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// Absolute url including the encoded query
    pub url: Url,
    /// Transport options for this call
    pub options: TransportOptions,
}

impl RequestDescriptor {
    /// Returns the url with the value of the `key` parameter masked.
    pub fn redacted_url(&self) -> String {
        if !self.url.query_pairs().any(|(name, _)| name == "key") {
            return self.url.to_string();
        }

        let mut url = self.url.clone();
        let pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .map(|(name, value)| {
                let value = if name == "key" {
                    "***".to_owned()
                } else {
                    value.into_owned()
                };
                (name.into_owned(), value)
            })
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
        url.to_string()
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GET {}", self.redacted_url())
    }
}

/// Successful response of one request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code, always 200
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

/// Result of one network attempt, before endpoint specific unwrapping.
pub type Outcome = Result<HttpResponse, SteamError>;

/// Performs the request described by `request` and classifies the response.
pub async fn execute<T: Transport>(transport: &T, request: &RequestDescriptor) -> Outcome {
    debug!("request {}", request);

    let raw = match transport.get(&request.url, &request.options).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("request to {} failed: {}", request.url.path(), e);
            return Err(SteamError::Transport(e));
        }
    };

    let outcome = classify(raw);
    if let Err(e) = &outcome {
        warn!("request to {} failed: {}", request.url.path(), e);
    }
    outcome
}

/// Classifies a raw response into an [`Outcome`].
pub fn classify(raw: RawResponse) -> Outcome {
    let content_type = raw
        .headers
        .get(CONTENT_TYPE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

    if raw.status != 200 {
        let message = match content_type {
            Some(_) => raw.body,
            None => String::new(),
        };
        return Err(SteamError::Protocol {
            status: raw.status,
            message,
        });
    }

    if let Some(content_type) = &content_type {
        if !content_type.contains("json") {
            return Err(SteamError::Protocol {
                status: raw.status,
                message: raw.body,
            });
        }
    }

    let body: Value = serde_json::from_str(&raw.body).map_err(|e| SteamError::Protocol {
        status: raw.status,
        message: e.to_string(),
    })?;

    if is_falsy(&body) {
        return Err(SteamError::Protocol {
            status: raw.status,
            message: UNRESOLVABLE_RESPONSE.to_owned(),
        });
    }

    Ok(HttpResponse {
        status: raw.status,
        headers: raw.headers,
        body,
    })
}

/// Objects and arrays are truthy even when empty.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::steam::requester::MockTransport;
    use reqwest::header::HeaderValue;

    fn raw(status: u16, content_type: Option<&str>, body: &str) -> RawResponse {
        let mut headers = HeaderMap::new();
        if let Some(content_type) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        }
        RawResponse {
            status,
            headers,
            body: body.to_owned(),
        }
    }

    fn descriptor(url: &str) -> RequestDescriptor {
        RequestDescriptor {
            url: url.parse().unwrap(),
            options: TransportOptions::default(),
        }
    }

    fn protocol_message(outcome: Outcome) -> (u16, String) {
        match outcome {
            Err(SteamError::Protocol { status, message }) => (status, message),
            other => panic!("expected a protocol error, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_success() {
        let response = classify(raw(
            200,
            Some("application/json; charset=UTF-8"),
            r#"{"response": {"player_count": 3}}"#,
        ))
        .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body["response"]["player_count"], 3);
        assert!(response.headers.contains_key(CONTENT_TYPE));
    }

    #[test]
    fn test_classify_without_content_type_parses_json() {
        let response = classify(raw(200, None, r#"{"applist": {"apps": []}}"#)).unwrap();
        assert!(response.body["applist"]["apps"].is_array());
    }

    #[test]
    fn test_classify_error_status_with_content_type() {
        let outcome = classify(raw(500, Some("text/plain"), "server error"));
        assert_eq!(protocol_message(outcome), (500, "server error".to_owned()));
    }

    #[test]
    fn test_classify_error_status_without_content_type() {
        let outcome = classify(raw(403, None, "forbidden"));
        assert_eq!(protocol_message(outcome), (403, String::new()));
    }

    #[test]
    fn test_classify_non_json_success() {
        let outcome = classify(raw(200, Some("text/html"), "<html>maintenance</html>"));
        assert_eq!(
            protocol_message(outcome),
            (200, "<html>maintenance</html>".to_owned())
        );
    }

    #[test]
    fn test_classify_invalid_json() {
        let outcome = classify(raw(200, Some("application/json"), "{not json"));
        let (status, message) = protocol_message(outcome);
        assert_eq!(status, 200);
        assert!(!message.is_empty());
    }

    #[test]
    fn test_classify_falsy_json() {
        for body in ["null", "false", "0", "\"\""] {
            let outcome = classify(raw(200, Some("application/json"), body));
            assert_eq!(
                protocol_message(outcome),
                (200, UNRESOLVABLE_RESPONSE.to_owned())
            );
        }
    }

    #[test]
    fn test_classify_empty_object_is_success() {
        assert!(classify(raw(200, Some("application/json"), "{}")).is_ok());
        assert!(classify(raw(200, Some("application/json"), "[]")).is_ok());
    }

    #[test]
    fn test_redacted_url() {
        let request = descriptor("https://api.steampowered.com/ISteamUser/GetFriendList/v0001?key=secret&steamid=1");
        assert_eq!(
            request.redacted_url(),
            "https://api.steampowered.com/ISteamUser/GetFriendList/v0001?key=***&steamid=1"
        );
        assert!(!request.to_string().contains("secret"));
    }

    #[test]
    fn test_redacted_url_without_key() {
        let request = descriptor("https://api.steampowered.com/ISteamApps/GetAppList/v0002");
        assert_eq!(
            request.redacted_url(),
            "https://api.steampowered.com/ISteamApps/GetAppList/v0002"
        );
    }

    #[tokio::test]
    async fn test_execute_calls_transport_once() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .withf(|url, _| url.path() == "/ISteamApps/GetAppList/v0002")
            .times(1)
            .returning(|_, _| Ok(raw(200, Some("application/json"), r#"{"applist": {}}"#)));

        let request = descriptor("https://api.steampowered.com/ISteamApps/GetAppList/v0002");
        let response = execute(&transport, &request).await.unwrap();
        assert!(response.body["applist"].is_object());
    }

    #[tokio::test]
    async fn test_execute_wraps_transport_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|_, _| Err(TransportError::InvalidHeader("x".to_owned())));

        let request = descriptor("https://api.steampowered.com/ISteamApps/GetAppList/v0002");
        let outcome = execute(&transport, &request).await;
        assert!(matches!(
            outcome,
            Err(SteamError::Transport(TransportError::InvalidHeader(_)))
        ));
    }
}
