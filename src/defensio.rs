//! High level client orchestration.
//!
//! Wires the typed request payloads, URL templating, and transport seam into
//! the remote Defensio actions, applying the shared failure contract to
//! every fallible call.

use std::fmt;
use std::sync::Arc;

use http::Method;
use thiserror::Error;
use url::Url;

use crate::comment::Comment;
use crate::response::{ActionResponse, AuditResult};
use crate::transport::{ParamMap, ReqwestTransport, Transport, TransportError};

/// Result alias used across the client layer.
pub type DefensioResult<T> = Result<T, DefensioError>;

/// Version segment used for the standard service tier.
pub const API_VERSION: &str = "1.2";

/// Alternate path segment selecting the extended service tier.
pub const ADVANCED_API_VERSION: &str = "advanced/1.2";

/// Host serving the production API.
pub const DEFAULT_HOST: &str = "api.defensio.com";

/// Extension selecting the response encoding.
const RESPONSE_FORMAT: &str = "yaml";

const ACTION_VALIDATE_KEY: &str = "validate-key";
const ACTION_AUDIT_COMMENT: &str = "audit-comment";
const ACTION_REPORT_FALSE_POSITIVES: &str = "report-false-positives";
const ACTION_REPORT_FALSE_NEGATIVES: &str = "report-false-negatives";

const PARAM_OWNER_URL: &str = "owner-url";
const PARAM_SIGNATURES: &str = "signatures";

/// High-level error surfaced by the client.
#[derive(Debug, Error)]
pub enum DefensioError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
    /// Remote failure status; displays the service-provided message verbatim.
    #[error("{0}")]
    Remote(String),
    #[error("response is missing the `{0}` field")]
    MissingField(&'static str),
    #[error("api key must not be empty")]
    MissingApiKey,
    #[error("owner url must not be empty")]
    MissingOwnerUrl,
}

/// Client configuration used by the builder.
#[derive(Clone)]
pub struct DefensioConfig {
    pub api_key: String,
    pub owner_url: String,
    pub advanced_mode: bool,
    pub host: String,
    pub transport: Option<Arc<dyn Transport>>,
}

/// Fluent builder for [`Defensio`].
pub struct DefensioBuilder {
    config: DefensioConfig,
}

impl DefensioBuilder {
    pub fn new(api_key: impl Into<String>, owner_url: impl Into<String>) -> Self {
        Self {
            config: DefensioConfig {
                api_key: api_key.into(),
                owner_url: owner_url.into(),
                advanced_mode: false,
                host: DEFAULT_HOST.to_string(),
                transport: None,
            },
        }
    }

    pub fn advanced_mode(mut self, enabled: bool) -> Self {
        self.config.advanced_mode = enabled;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.config.transport = Some(transport);
        self
    }

    pub fn build(self) -> DefensioResult<Defensio> {
        Defensio::with_config(self.config)
    }
}

/// Client for the Defensio comment spam filtering API.
///
/// Holds immutable configuration and the transport capability; instances are
/// cheap to share across tasks and hold no mutable state between calls.
pub struct Defensio {
    config: DefensioConfig,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Defensio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Defensio").finish_non_exhaustive()
    }
}

impl Defensio {
    /// Construct a client for the production service with the default
    /// reqwest transport.
    pub fn new(api_key: impl Into<String>, owner_url: impl Into<String>) -> DefensioResult<Self> {
        DefensioBuilder::new(api_key, owner_url).build()
    }

    /// Obtain a builder to customise the client instance.
    pub fn builder(
        api_key: impl Into<String>,
        owner_url: impl Into<String>,
    ) -> DefensioBuilder {
        DefensioBuilder::new(api_key, owner_url)
    }

    /// Construct a client from an explicit configuration.
    ///
    /// Fails before any network interaction when a required credential is
    /// empty.
    pub fn with_config(config: DefensioConfig) -> DefensioResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(DefensioError::MissingApiKey);
        }
        if config.owner_url.trim().is_empty() {
            return Err(DefensioError::MissingOwnerUrl);
        }

        let transport: Arc<dyn Transport> = match config.transport.clone() {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        Ok(Self { config, transport })
    }

    /// Checks whether the configured API key is recognised by the service.
    ///
    /// A `fail` status means the key is invalid, not that the call failed,
    /// so this is the one operation that never raises on it. Transport
    /// errors still propagate.
    pub async fn valid_key(&self) -> DefensioResult<bool> {
        let response = self
            .call_action(ACTION_VALIDATE_KEY, ParamMap::new())
            .await?;
        Ok(response.is_success())
    }

    /// Submits a comment for auditing and returns the typed verdict.
    pub async fn audit_comment(&self, comment: Comment) -> DefensioResult<AuditResult> {
        let response = self
            .call_action(ACTION_AUDIT_COMMENT, comment.into_params())
            .await?;
        Self::ensure_success(&response)?;

        let signature = response
            .text("signature")
            .ok_or(DefensioError::MissingField("signature"))?
            .to_string();
        let spam = response
            .flag("spam")
            .ok_or(DefensioError::MissingField("spam"))?;
        let spaminess = response
            .number("spaminess")
            .ok_or(DefensioError::MissingField("spaminess"))?;

        Ok(AuditResult::new(signature, spam, spaminess))
    }

    /// Reports previously audited items the service wrongly flagged as spam.
    pub async fn report_false_positives<S>(&self, signatures: S) -> DefensioResult<ActionResponse>
    where
        S: Into<SignatureList>,
    {
        self.report(ACTION_REPORT_FALSE_POSITIVES, signatures.into())
            .await
    }

    /// Reports previously audited items the service wrongly let through.
    pub async fn report_false_negatives<S>(&self, signatures: S) -> DefensioResult<ActionResponse>
    where
        S: Into<SignatureList>,
    {
        self.report(ACTION_REPORT_FALSE_NEGATIVES, signatures.into())
            .await
    }

    /// Invokes a named remote action with the given wire parameters.
    ///
    /// Parameterless lookups go out as GET, everything else as a
    /// form-encoded POST; the `owner-url` parameter every action requires is
    /// merged in here. Returns the decoded response without inspecting its
    /// status, so callers own the failure contract for custom actions.
    pub async fn call_action(
        &self,
        action: &str,
        params: ParamMap,
    ) -> DefensioResult<ActionResponse> {
        let method = if params.is_empty() {
            Method::GET
        } else {
            Method::POST
        };

        let mut wire = params;
        wire.insert(PARAM_OWNER_URL.to_string(), self.config.owner_url.clone());

        let url = Url::parse(&self.url(action))?;
        log::debug!("{method} {url} ({} wire parameters)", wire.len());

        Ok(self.transport.perform(&method, &url, &wire).await?)
    }

    /// Fully qualified endpoint for the given action.
    pub fn url(&self, action: &str) -> String {
        format!(
            "http://{}/blog/{}/{}/{}.{}",
            self.config.host,
            self.version_segment(),
            action,
            self.config.api_key,
            RESPONSE_FORMAT
        )
    }

    fn version_segment(&self) -> &'static str {
        if self.config.advanced_mode {
            ADVANCED_API_VERSION
        } else {
            API_VERSION
        }
    }

    async fn report(
        &self,
        action: &str,
        signatures: SignatureList,
    ) -> DefensioResult<ActionResponse> {
        let mut params = ParamMap::new();
        params.insert(PARAM_SIGNATURES.to_string(), signatures.join());

        let response = self.call_action(action, params).await?;
        Self::ensure_success(&response)?;
        Ok(response)
    }

    fn ensure_success(response: &ActionResponse) -> DefensioResult<()> {
        if response.is_failure() {
            let message = response.message().unwrap_or_default().to_string();
            return Err(DefensioError::Remote(message));
        }
        Ok(())
    }
}

/// Ordered collection of audit signatures submitted with correction reports.
///
/// Order is preserved and duplicates are kept; the wire form is a single
/// comma-separated string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureList(Vec<String>);

impl SignatureList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, signature: impl Into<String>) {
        self.0.push(signature.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn join(&self) -> String {
        self.0.join(",")
    }
}

impl From<&str> for SignatureList {
    fn from(signature: &str) -> Self {
        Self(vec![signature.to_string()])
    }
}

impl From<String> for SignatureList {
    fn from(signature: String) -> Self {
        Self(vec![signature])
    }
}

impl From<u64> for SignatureList {
    fn from(signature: u64) -> Self {
        Self(vec![signature.to_string()])
    }
}

impl From<&AuditResult> for SignatureList {
    fn from(result: &AuditResult) -> Self {
        Self(vec![result.signature().to_string()])
    }
}

impl<T: fmt::Display> From<Vec<T>> for SignatureList {
    fn from(signatures: Vec<T>) -> Self {
        signatures.into_iter().collect()
    }
}

impl<T: fmt::Display> From<&[T]> for SignatureList {
    fn from(signatures: &[T]) -> Self {
        signatures.iter().collect()
    }
}

impl<T: fmt::Display> FromIterator<T> for SignatureList {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(|item| item.to_string()).collect())
    }
}
