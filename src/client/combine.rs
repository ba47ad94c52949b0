//! URL composition with optional access_token injection.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;

use crate::error::WeappError;

/// Characters that must be encoded in query keys and values.
/// Includes: space, &, =, %, +, #, ? and control characters.
const QUERY_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'&')
    .add(b'=')
    .add(b'%')
    .add(b'+')
    .add(b'#')
    .add(b'?');

const SENSITIVE_FIELDS: &[&str] = &[
    "access_token",
    "appsecret",
    "secret",
    "session_key",
    "signature",
    "password",
    "token",
];

/// Builds full request URLs for the API modules.
///
/// Implemented by [`WeappClient`](super::WeappClient) and injected into every
/// module next to the request helper.
pub trait CombineUrl: Send + Sync {
    /// Joins `path` onto the base URL and appends `params` as a query string.
    ///
    /// `params` must be a JSON object or `Null`. When `with_token` is set the
    /// current access_token is appended as well.
    ///
    /// # Errors
    /// - `WeappError::Config` when `params` is neither an object nor `Null`
    /// - `WeappError::Token` when `with_token` is set but no token is available
    /// - `WeappError::Url` when the result is not a valid URL
    fn combine_url(&self, path: &str, params: &Value, with_token: bool)
        -> Result<String, WeappError>;
}

/// Flattens a JSON object into query pairs. Null fields are skipped,
/// strings are used verbatim and everything else as its JSON text.
pub(crate) fn query_pairs(params: &Value) -> Result<Vec<(String, String)>, WeappError> {
    let map = match params {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(WeappError::Config(format!(
                "request params must be a JSON object, got {}",
                json_kind(other)
            )))
        }
    };

    Ok(map
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| {
            let value = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), value)
        })
        .collect())
}

pub(crate) fn append_query(url: &mut String, pairs: &[(String, String)]) {
    for (key, value) in pairs {
        let separator = if url.contains('?') { '&' } else { '?' };
        url.push(separator);
        url.extend(utf8_percent_encode(key, QUERY_ENCODE_SET));
        url.push('=');
        url.extend(utf8_percent_encode(value, QUERY_ENCODE_SET));
    }
}

/// Masks the values of credential-like query parameters.
pub(crate) fn redact_url(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let redacted: Vec<String> = query
        .split('&')
        .map(|param| match param.split_once('=') {
            Some((key, _)) if SENSITIVE_FIELDS.iter().any(|s| key.eq_ignore_ascii_case(s)) => {
                format!("{key}=[REDACTED]")
            }
            _ => param.to_string(),
        })
        .collect();
    format!("{}?{}", base, redacted.join("&"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_pairs_null_is_empty() {
        assert!(query_pairs(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_query_pairs_scalars_and_nested() {
        let pairs = query_pairs(&json!({
            "a": "text",
            "b": 7,
            "c": true,
            "d": null,
            "e": [1, 2]
        }))
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "text".to_string()),
                ("b".to_string(), "7".to_string()),
                ("c".to_string(), "true".to_string()),
                ("e".to_string(), "[1,2]".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_rejects_non_object() {
        let err = query_pairs(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, WeappError::Config(ref m) if m.contains("array")));
    }

    #[test]
    fn test_append_query_separators() {
        let mut url = "https://example.com/a".to_string();
        append_query(
            &mut url,
            &[
                ("x".to_string(), "1".to_string()),
                ("y".to_string(), "a b&c".to_string()),
            ],
        );
        assert_eq!(url, "https://example.com/a?x=1&y=a%20b%26c");

        let mut url = "https://example.com/a?fixed=1".to_string();
        append_query(&mut url, &[("x".to_string(), "2".to_string())]);
        assert_eq!(url, "https://example.com/a?fixed=1&x=2");
    }

    #[test]
    fn test_redact_url_without_query() {
        let url = "https://api.weixin.qq.com/wxa/getwxadevinfo";
        assert_eq!(redact_url(url), url);
    }

    #[test]
    fn test_redact_url_masks_credentials() {
        let url = "https://api.weixin.qq.com/sns/jscode2session?appid=wx1&secret=s3cr3t&access_token=abc&js_code=c";
        let redacted = redact_url(url);
        assert!(redacted.contains("secret=[REDACTED]"));
        assert!(redacted.contains("access_token=[REDACTED]"));
        assert!(redacted.contains("appid=wx1"));
        assert!(redacted.contains("js_code=c"));
        assert!(!redacted.contains("s3cr3t"));
    }
}
