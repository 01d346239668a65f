//! Unwrapping of the endpoint envelopes.
//!
//! The Steam Web API never returns the payload at the JSON root: it is nested
//! under an endpoint specific key, e.g. `{"applist": {"apps": [...]}}`. A
//! malformed answer sometimes carries a bare string where the envelope object
//! is expected (`{"response": "rate limited"}`); that case is rejected like a
//! missing envelope.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::SteamError;
use crate::steam::endpoint::Endpoint;

/// Decodes the object found at `body[outer]`.
///
/// # Errors
///
/// [`SteamError::InvalidResponse`] when `outer` is missing, null, a string or
/// not an object, or when the object does not decode into `T`.
pub(crate) fn unwrap_object<T: DeserializeOwned>(
    endpoint: Endpoint,
    mut body: Value,
    outer: &str,
) -> Result<T, SteamError> {
    let envelope = take_envelope(endpoint, &mut body, outer)?;
    decode(endpoint, envelope, outer)
}

/// Decodes the value found at `body[outer][inner]`.
///
/// # Errors
///
/// [`SteamError::InvalidResponse`] when the `outer` envelope is invalid (see
/// [`unwrap_object`]), when `inner` is missing or null, or when the value does
/// not decode into `T`.
pub(crate) fn unwrap_nested<T: DeserializeOwned>(
    endpoint: Endpoint,
    mut body: Value,
    outer: &str,
    inner: &str,
) -> Result<T, SteamError> {
    let mut envelope = take_envelope(endpoint, &mut body, outer)?;
    let path = format!("{}.{}", outer, inner);

    match envelope.get_mut(inner).map(Value::take) {
        None | Some(Value::Null) => Err(SteamError::invalid(
            endpoint.method(),
            format!("missing {}", path),
        )),
        Some(payload) => decode(endpoint, payload, &path),
    }
}

fn take_envelope(endpoint: Endpoint, body: &mut Value, outer: &str) -> Result<Value, SteamError> {
    match body.get_mut(outer).map(Value::take) {
        None | Some(Value::Null) => Err(SteamError::invalid(
            endpoint.method(),
            format!("missing {}", outer),
        )),
        Some(Value::String(text)) => Err(SteamError::invalid(
            endpoint.method(),
            format!("{} is a string: {}", outer, text),
        )),
        Some(envelope @ Value::Object(_)) => Ok(envelope),
        Some(other) => Err(SteamError::invalid(
            endpoint.method(),
            format!("{} is not an object: {}", outer, other),
        )),
    }
}

fn decode<T: DeserializeOwned>(
    endpoint: Endpoint,
    payload: Value,
    path: &str,
) -> Result<T, SteamError> {
    serde_json::from_value(payload).map_err(|e| {
        SteamError::invalid(endpoint.method(), format!("{} cannot be decoded: {}", path, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reason(result: Result<Value, SteamError>) -> String {
        match result {
            Err(SteamError::InvalidResponse { reason, .. }) => reason,
            other => panic!("expected an invalid response, got {:?}", other),
        }
    }

    #[test]
    fn test_unwrap_nested() {
        let body = json!({"applist": {"apps": [{"appid": 1, "name": "A"}]}});
        let apps: Vec<Value> = unwrap_nested(Endpoint::GetAppList, body, "applist", "apps").unwrap();
        assert_eq!(apps, vec![json!({"appid": 1, "name": "A"})]);
    }

    #[test]
    fn test_unwrap_nested_missing_envelope() {
        let body = json!({"other": {}});
        let result = unwrap_nested(Endpoint::GetAppList, body, "applist", "apps");
        assert_eq!(reason(result), "missing applist");
    }

    #[test]
    fn test_unwrap_nested_string_envelope() {
        let body = json!({"response": "rate limited"});
        let result = unwrap_nested(Endpoint::GetServersAtAddress, body, "response", "servers");
        assert_eq!(reason(result), "response is a string: rate limited");
    }

    #[test]
    fn test_unwrap_nested_missing_payload() {
        let body = json!({"response": {"success": false}});
        let result = unwrap_nested(Endpoint::GetServersAtAddress, body, "response", "servers");
        assert_eq!(reason(result), "missing response.servers");
    }

    #[test]
    fn test_unwrap_nested_null_payload() {
        let body = json!({"friendslist": {"friends": null}});
        let result = unwrap_nested(Endpoint::GetFriendList, body, "friendslist", "friends");
        assert_eq!(reason(result), "missing friendslist.friends");
    }

    #[test]
    fn test_unwrap_object_rejects_array() {
        let body = json!({"response": [1, 2]});
        let result = unwrap_object(Endpoint::GetOwnedGames, body, "response");
        assert_eq!(reason(result), "response is not an object: [1,2]");
    }

    #[test]
    fn test_unwrap_object_decode_error() {
        let body = json!({"response": {"player_count": "many"}});
        let result: Result<u64, SteamError> = unwrap_nested(
            Endpoint::GetNumberOfCurrentPlayers,
            body,
            "response",
            "player_count",
        );
        match result {
            Err(SteamError::InvalidResponse { endpoint, reason }) => {
                assert_eq!(endpoint, "GetNumberOfCurrentPlayers");
                assert!(reason.starts_with("response.player_count cannot be decoded"));
            }
            other => panic!("expected an invalid response, got {:?}", other),
        }
    }
}
