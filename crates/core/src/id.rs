//! Strongly-typed identifiers used across the contract namespaces.
//!
//! Identifiers are opaque strings on the wire (`"tx_1"`, `"acc_123"`, or
//! whatever the source system assigned). Each entity kind gets its own
//! newtype so ids cannot be mixed up across record fields.

use core::str::FromStr;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{ContractResult, ValidationError};

macro_rules! contract_id {
    ($(#[$meta:meta])* $t:ident, $field:literal, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $t(String);

        impl $t {
            /// Wrap an existing identifier, rejecting blank values.
            pub fn new(value: impl Into<String>) -> ContractResult<Self> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::type_mismatch(
                        $field,
                        "identifier must not be blank",
                    ));
                }
                Ok(Self(value))
            }

            /// Mint a fresh identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing ids explicitly in
            /// tests for determinism.
            pub fn generate() -> Self {
                Self(format!("{}_{}", $prefix, Uuid::now_v7().simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $t {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $t {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

contract_id!(
    /// Identifier of a tenant (multi-tenant boundary).
    TenantId, "tenant_id", "tenant"
);
contract_id!(
    /// Identifier of a client (the tenant's customer).
    ClientId, "client_id", "client"
);
contract_id!(
    /// Identifier of a bank transaction.
    TransactionId, "transaction_id", "txn"
);
contract_id!(
    /// Identifier of a chart-of-accounts node.
    AccountId, "account_id", "acc"
);
contract_id!(
    /// Identifier of a vendor / payee.
    VendorId, "vendor_id", "vendor"
);
contract_id!(
    /// Identifier of a classification taxonomy entry.
    ClassificationId, "classification_id", "cls"
);
contract_id!(
    /// Identifier of a suspense item.
    SuspenseId, "suspense_id", "susp"
);
contract_id!(
    /// Identifier of a journal entry.
    JournalEntryId, "entry_id", "je"
);
contract_id!(
    /// Identifier of a message.
    MessageId, "message_id", "msg"
);
contract_id!(
    /// Identifier of a conversation.
    ConversationId, "conversation_id", "conv"
);
contract_id!(
    /// Identifier of a platform or audit event.
    EventId, "event_id", "evt"
);
contract_id!(
    /// Identifier of an actor (user, service, or automation).
    ActorId, "actor_id", "actor"
);

/// Reference to an entity in an external system (e.g. "qbo", "plaid").
///
/// Cross-system links are carried by value; no contract ever holds a live
/// reference into another system's object graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRef {
    /// External system name (e.g. "qbo", "plaid", "stripe").
    pub system: String,
    /// Id of the entity in the external system.
    pub external_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_type: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

impl ExternalRef {
    pub fn new(system: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            external_id: external_id.into(),
            external_type: None,
            metadata: BTreeMap::new(),
        }
    }
}

impl crate::contract::Contract for ExternalRef {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Contract;
    use serde_json::json;

    #[test]
    fn blank_identifier_is_rejected() {
        assert!(TransactionId::new("").is_err());
        assert!(TransactionId::new("   ").is_err());
        assert!(TransactionId::new("tx_1").is_ok());
    }

    #[test]
    fn identifier_wire_form_is_a_plain_string() {
        let id = AccountId::new("acc_123").unwrap();
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("acc_123"));
        let back: AccountId = serde_json::from_value(json!("acc_123")).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn blank_identifier_is_rejected_on_the_wire_too() {
        let err = serde_json::from_value::<AccountId>(json!("")).unwrap_err();
        assert!(err.to_string().contains("must not be blank"));
    }

    #[test]
    fn generated_identifiers_carry_the_kind_prefix() {
        assert!(TransactionId::generate().as_str().starts_with("txn_"));
        assert!(VendorId::generate().as_str().starts_with("vendor_"));
        assert_ne!(EventId::generate(), EventId::generate());
    }

    #[test]
    fn external_ref_round_trips() {
        let mut reference = ExternalRef::new("plaid", "txn_abc");
        reference.external_type = Some("transaction".to_string());
        reference
            .metadata
            .insert("account_id".to_string(), json!("acc_123"));
        let value = reference.to_value().unwrap();
        assert_eq!(ExternalRef::from_value(value).unwrap(), reference);
    }

    #[test]
    fn external_ref_requires_system_and_external_id() {
        let err = ExternalRef::from_value(json!({"system": "qbo"})).unwrap_err();
        assert_eq!(err.field(), "external_id");
    }
}
