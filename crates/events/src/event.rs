//! Platform event envelope.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use contracts_core::{
    Contract, ContractResult, EventId, SchemaVersion, SourceSystem, TenantId, Timestamp,
    ValidationError,
};

/// Dotted event type name, e.g. `transaction.classified`.
///
/// Lowercase ASCII segments (alphanumerics and underscores) joined by dots,
/// at least two segments: `<subject>.<verb>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventType(String);

impl EventType {
    pub fn new(value: impl Into<String>) -> ContractResult<Self> {
        let value = value.into();
        let segments: Vec<&str> = value.split('.').collect();
        let well_formed = segments.len() >= 2
            && segments.iter().all(|s| {
                !s.is_empty()
                    && s.chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
            });
        if !well_formed {
            return Err(ValidationError::type_mismatch(
                "event_type",
                format!("'{value}' is not a dotted event type like 'transaction.classified'"),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for EventType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EventType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EventType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        value.0
    }
}

/// Event names emitted by the platform today.
///
/// Advisory, not closed: services may introduce new event types without a
/// schema change.
pub fn known_event_types() -> &'static [&'static str] {
    &[
        "transaction.classified",
        "transaction.posted",
        "clarification.requested",
        "clarification.completed",
        "clarification.timed_out",
        "suspense.created",
        "suspense.cleared",
        "digest.generated",
        "digest.approved",
        "message.sent",
        "message.delivered",
        "message.read",
        "message.failed",
        "conversation.started",
        "conversation.completed",
        "conversation.timed_out",
    ]
}

/// Standard event envelope for cross-service communication.
///
/// The envelope is a standalone fact: it references other entities by
/// identifier only, and the payload is an opaque document tagged by
/// `event_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEvent {
    pub event_id: EventId,
    pub event_type: EventType,
    pub source_system: SourceSystem,
    pub tenant_id: TenantId,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(default, skip_serializing_if = "SchemaVersion::is_baseline")]
    pub schema_version: SchemaVersion,
}

impl PlatformEvent {
    pub fn new(
        event_id: EventId,
        event_type: EventType,
        source_system: SourceSystem,
        tenant_id: TenantId,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            event_id,
            event_type,
            source_system,
            tenant_id,
            timestamp,
            payload: Value::Null,
            correlation_id: None,
            schema_version: SchemaVersion::default(),
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }
}

impl Contract for PlatformEvent {}
