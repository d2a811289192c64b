//! Audit trail events.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use contracts_core::{ActorId, Contract, EventId, SchemaVersion, TenantId, Timestamp};

use crate::event::EventType;

/// Append-only record of an action, for compliance logging.
///
/// An audit event is a fact: once written it is never amended, which is why
/// this type exposes no update helpers at all. Corrections are new events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub audit_id: EventId,
    pub event_type: EventType,
    pub actor_id: ActorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_type: Option<String>,
    pub tenant_id: TenantId,
    pub resource_type: String,
    pub resource_id: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub before_state: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub after_state: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "SchemaVersion::is_baseline")]
    pub schema_version: SchemaVersion,
}

impl Contract for AuditEvent {}
