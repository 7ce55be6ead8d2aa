//! Structured validation errors for inventory parsing.
//!
//! Every problem found in an inventory is accumulated as a [`ValidationError`]
//! carrying the scope and identifier of the offending record, a stable code,
//! and a human-readable message. None of them abort parsing.

use std::fmt;

use serde::Serialize;

/// Kind of record a validation error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// A `PROVIDER_<name>_*` record.
    Provider,
    /// A `SERVER_<id>_*` record.
    Server,
    /// The input text as a whole (e.g. a malformed key).
    File,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Provider => f.write_str("provider"),
            Scope::Server => f.write_str("server"),
            Scope::File => f.write_str("file"),
        }
    }
}

/// A non-fatal diagnostic describing a missing or malformed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Kind of record the error belongs to.
    pub scope: Scope,
    /// Identifier of the offending record (provider name, server id, or key).
    pub id: Option<String>,
    /// Stable error code (e.g., `"E001"`).
    pub code: &'static str,
    /// Inventory field that caused the error (e.g., `"PORT"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    /// Human-readable message.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error for the given scope and record id.
    #[must_use]
    pub fn new(
        scope: Scope,
        id: Option<&str>,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            scope,
            id: id.map(str::to_string),
            code,
            field: None,
            message: message.into(),
        }
    }

    /// Set the field that caused this error.
    #[must_use]
    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "[{} {id}] {}", self.scope, self.message),
            None => write!(f, "[{}] {}", self.scope, self.message),
        }
    }
}

// ── Error code constants ────────────────────────────────────────────────

/// Provider is missing `TYPE`.
pub const E001: &str = "E001";

/// Server `PORT` is not a valid port number.
pub const E010: &str = "E010";
/// Server is missing `PROVIDER`.
pub const E011: &str = "E011";
/// Server is missing `KIND`.
pub const E012: &str = "E012";
/// Server is missing `NAME`.
pub const E013: &str = "E013";
/// Server is missing `CONNECT_VIA`.
pub const E014: &str = "E014";

/// `PROVIDER_`/`SERVER_` key with too few segments (strict mode only).
pub const E020: &str = "E020";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_id() {
        let e = ValidationError::new(
            Scope::Server,
            Some("web1"),
            E011,
            "Server web1 is missing PROVIDER",
        );
        assert_eq!(e.to_string(), "[server web1] Server web1 is missing PROVIDER");
    }

    #[test]
    fn display_without_id() {
        let e = ValidationError::new(Scope::File, None, E020, "malformed key");
        assert_eq!(e.to_string(), "[file] malformed key");
    }

    #[test]
    fn with_field_sets_field() {
        let e = ValidationError::new(Scope::Provider, Some("oci"), E001, "x").with_field("TYPE");
        assert_eq!(e.field, Some("TYPE"));
    }

    #[test]
    fn serialize_json_scope_lowercase() {
        let e = ValidationError::new(Scope::Provider, Some("oci"), E001, "missing TYPE")
            .with_field("TYPE");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["scope"], "provider");
        assert_eq!(json["id"], "oci");
        assert_eq!(json["code"], "E001");
        assert_eq!(json["field"], "TYPE");
    }

    #[test]
    fn serialize_json_omits_missing_field() {
        let e = ValidationError::new(Scope::File, None, E020, "bad");
        let json = serde_json::to_value(&e).unwrap();
        assert!(json.get("field").is_none());
        assert!(json["id"].is_null());
    }

    #[test]
    fn error_codes_are_unique() {
        let codes = [E001, E010, E011, E012, E013, E014, E020];
        let mut seen = std::collections::HashSet::new();
        for code in &codes {
            assert!(seen.insert(code), "duplicate error code: {code}");
        }
    }
}
