//! Typed audit-comment payload.
//!
//! Collects the fields the audit-comment action accepts and owns the
//! normalization rules applied before submission: IPv6-mapped addresses
//! collapse to their embedded IPv4 form, article dates render as
//! `YYYY/MM/DD`, and logical `snake_case` field names translate to the
//! wire's `kebab-case`.

use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv6Addr;

use chrono::{DateTime, Utc};

use crate::transport::ParamMap;

/// Forces a deterministic classification when exercising the service.
///
/// Only honored by the service in testing and validation contexts; the
/// carried score becomes the reported spaminess.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TestForce {
    Spam(f64),
    Ham(f64),
}

impl fmt::Display for TestForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestForce::Spam(spaminess) => write!(f, "spam,{spaminess:.4}"),
            TestForce::Ham(spaminess) => write!(f, "ham,{spaminess:.4}"),
        }
    }
}

/// Comment details submitted to the audit-comment action.
///
/// Unrecognised fields the remote API accepts can be added with
/// [`Comment::insert_field`] under their logical `snake_case` name; they are
/// translated to the wire convention on submission.
#[derive(Debug, Clone, Default)]
pub struct Comment {
    user_ip: Option<String>,
    article_date: Option<DateTime<Utc>>,
    author: Option<String>,
    author_email: Option<String>,
    author_url: Option<String>,
    comment_type: Option<String>,
    content: Option<String>,
    permalink: Option<String>,
    test_force: Option<TestForce>,
    extra: BTreeMap<String, String>,
}

impl Comment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_ip(mut self, ip: impl Into<String>) -> Self {
        self.user_ip = Some(ip.into());
        self
    }

    pub fn with_article_date(mut self, date: DateTime<Utc>) -> Self {
        self.article_date = Some(date);
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_author_email(mut self, email: impl Into<String>) -> Self {
        self.author_email = Some(email.into());
        self
    }

    pub fn with_author_url(mut self, url: impl Into<String>) -> Self {
        self.author_url = Some(url.into());
        self
    }

    pub fn with_comment_type(mut self, kind: impl Into<String>) -> Self {
        self.comment_type = Some(kind.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_permalink(mut self, permalink: impl Into<String>) -> Self {
        self.permalink = Some(permalink.into());
        self
    }

    pub fn with_test_force(mut self, force: TestForce) -> Self {
        self.test_force = Some(force);
        self
    }

    /// Adds a passthrough field under its logical `snake_case` name.
    pub fn insert_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Renders the payload as normalized wire parameters.
    pub fn into_params(self) -> ParamMap {
        let mut params = ParamMap::new();

        if let Some(ip) = self.user_ip {
            params.insert("user-ip".to_string(), canonicalize_ip(&ip));
        }
        if let Some(date) = self.article_date {
            params.insert("article-date".to_string(), format_article_date(&date));
        }
        if let Some(author) = self.author {
            params.insert("comment-author".to_string(), author);
        }
        if let Some(email) = self.author_email {
            params.insert("comment-author-email".to_string(), email);
        }
        if let Some(url) = self.author_url {
            params.insert("comment-author-url".to_string(), url);
        }
        if let Some(kind) = self.comment_type {
            params.insert("comment-type".to_string(), kind);
        }
        if let Some(content) = self.content {
            params.insert("comment-content".to_string(), content);
        }
        if let Some(permalink) = self.permalink {
            params.insert("permalink".to_string(), permalink);
        }
        if let Some(force) = self.test_force {
            params.insert("test-force".to_string(), force.to_string());
        }
        for (key, value) in self.extra {
            params.insert(hyphenate(&key), value);
        }

        params
    }
}

/// Collapses IPv6-mapped IPv4 addresses to their embedded dotted-quad form.
///
/// Anything that is not an IPv6-mapped address passes through unchanged.
fn canonicalize_ip(raw: &str) -> String {
    if let Ok(address) = raw.parse::<Ipv6Addr>() {
        if let Some(mapped) = address.to_ipv4_mapped() {
            return mapped.to_string();
        }
    }
    match raw.strip_prefix("::ffff:") {
        Some(rest) => rest.to_string(),
        None => raw.to_string(),
    }
}

/// Renders a timestamp as the zero-padded `YYYY/MM/DD` form the wire expects.
fn format_article_date(date: &DateTime<Utc>) -> String {
    date.format("%Y/%m/%d").to_string()
}

fn hyphenate(key: &str) -> String {
    key.replace('_', "-")
}
