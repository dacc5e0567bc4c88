//! Transport seam between the client and the remote service.
//!
//! The client layer only ever talks to the [`Transport`] trait, so tests can
//! substitute a scripted implementation while the reqwest adapter stays an
//! implementation detail. Decoding the YAML response bodies also lives here:
//! whatever performs the HTTP round trip hands back an already-parsed
//! mapping.

pub mod reqwest_client;

pub use reqwest_client::ReqwestTransport;

use std::collections::BTreeMap;

use async_trait::async_trait;
use http::Method;
use thiserror::Error;
use url::Url;
use yaml_rust::{Yaml, YamlLoader, yaml::Hash};

use crate::response::{ActionResponse, FieldValue};

/// Wire parameters submitted with an action, ordered deterministically.
pub type ParamMap = BTreeMap<String, String>;

/// Errors surfaced by transport implementations.
///
/// A `Request` failure means the round trip never completed; `Decode` means
/// the service answered but the body was not the expected mapping. Both are
/// distinct from an application-level `fail` status, which the client layer
/// interprets.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("response body could not be decoded: {0}")]
    Decode(String),
}

/// Contract that abstracts the HTTP round trip to the service.
///
/// GET requests carry their parameters as a query string, anything else as a
/// form-encoded body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn perform(
        &self,
        method: &Method,
        url: &Url,
        params: &ParamMap,
    ) -> Result<ActionResponse, TransportError>;
}

const RESULT_ROOT: &str = "defensio-result";

/// Decodes a YAML response body into the shared mapping representation.
///
/// The service nests every payload under a single `defensio-result` root,
/// which is unwrapped when present; flat mappings decode as-is. Non-scalar
/// values are skipped.
pub(crate) fn decode_body(body: &str) -> Result<ActionResponse, TransportError> {
    let documents =
        YamlLoader::load_from_str(body).map_err(|err| TransportError::Decode(err.to_string()))?;
    let document = documents
        .into_iter()
        .next()
        .ok_or_else(|| TransportError::Decode("empty response body".to_string()))?;

    let mapping = match document {
        Yaml::Hash(mapping) => mapping,
        other => {
            return Err(TransportError::Decode(format!(
                "expected a mapping, got {other:?}"
            )));
        }
    };

    let mapping = unwrap_result_root(&mapping).cloned().unwrap_or(mapping);

    Ok(mapping
        .into_iter()
        .filter_map(|(key, value)| {
            let key = key.as_str()?.to_string();
            Some((key, field_value(&value)?))
        })
        .collect())
}

fn unwrap_result_root(mapping: &Hash) -> Option<&Hash> {
    if mapping.len() != 1 {
        return None;
    }
    match mapping.get(&Yaml::String(RESULT_ROOT.to_string()))? {
        Yaml::Hash(inner) => Some(inner),
        _ => None,
    }
}

fn field_value(yaml: &Yaml) -> Option<FieldValue> {
    match yaml {
        Yaml::String(text) => Some(FieldValue::Text(text.clone())),
        Yaml::Boolean(flag) => Some(FieldValue::Bool(*flag)),
        Yaml::Integer(number) => Some(FieldValue::Integer(*number)),
        Yaml::Real(_) => yaml.as_f64().map(FieldValue::Float),
        Yaml::Null => Some(FieldValue::Null),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_flat_mappings() {
        let response = decode_body("status: success\nmessage: \"\"").expect("decode");
        assert!(response.is_success());
        assert_eq!(response.message(), Some(""));
    }

    #[test]
    fn unwraps_the_result_root() {
        let body = "defensio-result:\n  status: fail\n  message: Invalid key";
        let response = decode_body(body).expect("decode");
        assert!(response.is_failure());
        assert_eq!(response.message(), Some("Invalid key"));
        assert!(response.get(RESULT_ROOT).is_none());
    }

    #[test]
    fn decodes_scalar_payloads() {
        let body = "status: success\nsignature: abc123\nspam: true\nspaminess: 0.5000";
        let response = decode_body(body).expect("decode");
        assert_eq!(response.text("signature"), Some("abc123"));
        assert_eq!(response.flag("spam"), Some(true));
        assert_eq!(response.number("spaminess"), Some(0.5));
    }

    #[test]
    fn widens_integer_fields_to_numbers() {
        let response = decode_body("status: success\nspaminess: 1").expect("decode");
        assert_eq!(response.number("spaminess"), Some(1.0));
    }

    #[test]
    fn skips_non_scalar_values() {
        let body = "status: success\nextra:\n  nested: 1";
        let response = decode_body(body).expect("decode");
        assert!(response.is_success());
        assert!(response.get("extra").is_none());
    }

    #[test]
    fn keeps_sibling_keys_next_to_a_result_root() {
        let body = "defensio-result:\n  status: success\nstatus: fail";
        let response = decode_body(body).expect("decode");
        assert!(response.is_failure());
    }

    #[test]
    fn rejects_empty_bodies() {
        let error = decode_body("").unwrap_err();
        assert!(matches!(error, TransportError::Decode(_)));
    }

    #[test]
    fn rejects_non_mapping_bodies() {
        let error = decode_body("- one\n- two").unwrap_err();
        assert!(matches!(error, TransportError::Decode(_)));
    }

    #[test]
    fn rejects_unparseable_bodies() {
        let error = decode_body("status: [unterminated").unwrap_err();
        assert!(matches!(error, TransportError::Decode(_)));
    }
}
