//! # defensio-rs
//!
//! An async Rust client for the Defensio comment spam filtering service.
//!
//! The crate covers the full action surface of the blog API: key validation,
//! comment auditing, and false-positive/false-negative reporting. Requests
//! are shaped and normalized locally; classification happens entirely on the
//! remote service.
//!
//! ## Features
//!
//! - Typed audit results carrying the spam flag, spaminess score, and the
//!   signature used for later correction reports
//! - Defensive normalization of caller-supplied data: IPv6-mapped IPv4
//!   addresses collapse to their dotted-quad form, article dates render as
//!   `YYYY/MM/DD`, and logical field names translate to the wire convention
//! - A pluggable [`Transport`] seam so tests run without network access
//! - Access to arbitrary service actions through [`Defensio::call_action`]
//!
//! ## Example
//!
//! ```no_run
//! use defensio_rs::{Comment, Defensio};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Defensio::new("my-api-key", "http://example.com")?;
//!
//!     if !client.valid_key().await? {
//!         return Err("the service rejected the API key".into());
//!     }
//!
//!     let result = client
//!         .audit_comment(
//!             Comment::new()
//!                 .with_user_ip("127.0.0.1")
//!                 .with_author("Jane Doe")
//!                 .with_comment_type("comment")
//!                 .with_content("Nice post!"),
//!         )
//!         .await?;
//!
//!     if result.is_spam() {
//!         println!("spam ({:.4}): {}", result.spaminess(), result.signature());
//!     }
//!     Ok(())
//! }
//! ```

mod defensio;

pub mod comment;
pub mod response;
pub mod transport;

pub use crate::defensio::{
    ADVANCED_API_VERSION,
    API_VERSION,
    DEFAULT_HOST,
    Defensio,
    DefensioBuilder,
    DefensioConfig,
    DefensioError,
    DefensioResult,
    SignatureList,
};

pub use crate::comment::{Comment, TestForce};

pub use crate::response::{ActionResponse, AuditResult, FieldValue};

pub use crate::transport::{ParamMap, ReqwestTransport, Transport, TransportError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
