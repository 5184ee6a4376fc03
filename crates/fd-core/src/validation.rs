//! Client-side validation of form input.
//!
//! Validation is synchronous and runs before anything touches the cache or the
//! network. Errors are keyed by field so forms can render them inline.
//! 校验在写缓存和发请求之前同步执行，错误按字段归档以便表单就地展示。

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Field-level validation messages, keyed by field path (`email`, `contacts[0].name`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`. The first message per field wins.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn require_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.insert(field, "This field is required");
        }
    }

    pub fn check_optional_text(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.require_text(field, value);
        }
    }

    pub fn check_email(&mut self, field: &str, value: Option<&str>) {
        if let Some(email) = value {
            if !looks_like_email(email) {
                self.insert(field, "Invalid email address");
            }
        }
    }

    pub fn check_non_negative(&mut self, field: &str, value: Option<f64>) {
        if let Some(v) = value {
            if !(v >= 0.0) {
                self.insert(field, "Must be zero or greater");
            }
        }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Implemented by create drafts and update patches.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
                    .unwrap_or(false)
        }
        None => false,
    }
}
