//! Suspense items: transactions parked pending resolution.

use serde::{Deserialize, Serialize};

use contracts_core::{
    AccountId, ActorId, ClientId, Contract, ContractResult, Money, SchemaVersion, SuspenseId,
    TenantId, Timestamp, TransactionId, ValidationError,
};

/// Why a transaction was parked in suspense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspenseReason {
    LowConfidence,
    NeedsClientInput,
    MonthlyCall,
    Declined,
    EscalatedMaxClarification,
}

/// Transaction parked in suspense.
///
/// A suspense item is transient by design: it exists to be resolved.
/// Resolution state is all-or-nothing: a resolved item always carries
/// `resolved_at` and `resolution_account_id`, an unresolved one never does.
/// Resolution produces a new instance via [`SuspenseItem::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSuspenseItem")]
pub struct SuspenseItem {
    suspense_id: SuspenseId,
    transaction_id: TransactionId,
    tenant_id: TenantId,
    client_id: ClientId,
    reason: SuspenseReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    suspense_account_id: Option<AccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parked_at: Option<Timestamp>,
    #[serde(default)]
    resolved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolved_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolution_account_id: Option<AccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolved_by: Option<ActorId>,
    #[serde(default)]
    clarification_attempts: u32,
    #[serde(default, skip_serializing_if = "SchemaVersion::is_baseline")]
    schema_version: SchemaVersion,
}

impl SuspenseItem {
    pub fn new(
        suspense_id: SuspenseId,
        transaction_id: TransactionId,
        tenant_id: TenantId,
        client_id: ClientId,
        reason: SuspenseReason,
    ) -> Self {
        Self {
            suspense_id,
            transaction_id,
            tenant_id,
            client_id,
            reason,
            suspense_account_id: None,
            original_amount: None,
            description: None,
            parked_at: None,
            resolved: false,
            resolved_at: None,
            resolution_account_id: None,
            resolved_by: None,
            clarification_attempts: 0,
            schema_version: SchemaVersion::default(),
        }
    }

    pub fn with_suspense_account(mut self, account_id: AccountId) -> Self {
        self.suspense_account_id = Some(account_id);
        self
    }

    pub fn with_original_amount(mut self, amount: Money) -> Self {
        self.original_amount = Some(amount);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_parked_at(mut self, parked_at: Timestamp) -> Self {
        self.parked_at = Some(parked_at);
        self
    }

    pub fn with_clarification_attempts(mut self, attempts: u32) -> Self {
        self.clarification_attempts = attempts;
        self
    }

    /// Resolve into the given account, producing a new instance.
    ///
    /// Fails if the item is already resolved or the resolution predates the
    /// parking time.
    pub fn resolve(
        self,
        resolution_account_id: AccountId,
        resolved_by: ActorId,
        resolved_at: Timestamp,
    ) -> ContractResult<Self> {
        if self.resolved {
            return Err(ValidationError::invariant(
                "resolved",
                "suspense item is already resolved",
            ));
        }
        if let Some(parked_at) = self.parked_at {
            if resolved_at < parked_at {
                return Err(ValidationError::invariant(
                    "resolved_at",
                    "resolution cannot predate parking",
                ));
            }
        }
        Ok(Self {
            resolved: true,
            resolved_at: Some(resolved_at),
            resolution_account_id: Some(resolution_account_id),
            resolved_by: Some(resolved_by),
            ..self
        })
    }

    pub fn suspense_id(&self) -> &SuspenseId {
        &self.suspense_id
    }

    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn reason(&self) -> SuspenseReason {
        self.reason
    }

    pub fn suspense_account_id(&self) -> Option<&AccountId> {
        self.suspense_account_id.as_ref()
    }

    pub fn original_amount(&self) -> Option<&Money> {
        self.original_amount.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn parked_at(&self) -> Option<Timestamp> {
        self.parked_at
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn resolved_at(&self) -> Option<Timestamp> {
        self.resolved_at
    }

    pub fn resolution_account_id(&self) -> Option<&AccountId> {
        self.resolution_account_id.as_ref()
    }

    pub fn resolved_by(&self) -> Option<&ActorId> {
        self.resolved_by.as_ref()
    }

    pub fn clarification_attempts(&self) -> u32 {
        self.clarification_attempts
    }

    pub fn schema_version(&self) -> SchemaVersion {
        self.schema_version
    }
}

impl Contract for SuspenseItem {}

#[derive(Debug, Deserialize)]
struct RawSuspenseItem {
    suspense_id: SuspenseId,
    transaction_id: TransactionId,
    tenant_id: TenantId,
    client_id: ClientId,
    reason: SuspenseReason,
    #[serde(default)]
    suspense_account_id: Option<AccountId>,
    #[serde(default)]
    original_amount: Option<Money>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parked_at: Option<Timestamp>,
    #[serde(default)]
    resolved: bool,
    #[serde(default)]
    resolved_at: Option<Timestamp>,
    #[serde(default)]
    resolution_account_id: Option<AccountId>,
    #[serde(default)]
    resolved_by: Option<ActorId>,
    #[serde(default)]
    clarification_attempts: u32,
    #[serde(default)]
    schema_version: SchemaVersion,
}

impl TryFrom<RawSuspenseItem> for SuspenseItem {
    type Error = ValidationError;

    fn try_from(raw: RawSuspenseItem) -> Result<Self, Self::Error> {
        if raw.resolved {
            if raw.resolved_at.is_none() || raw.resolution_account_id.is_none() {
                return Err(ValidationError::invariant(
                    "resolved",
                    "a resolved item requires resolved_at and resolution_account_id",
                ));
            }
            if let (Some(parked_at), Some(resolved_at)) = (raw.parked_at, raw.resolved_at) {
                if resolved_at < parked_at {
                    return Err(ValidationError::invariant(
                        "resolved_at",
                        "resolution cannot predate parking",
                    ));
                }
            }
        } else if raw.resolved_at.is_some()
            || raw.resolution_account_id.is_some()
            || raw.resolved_by.is_some()
        {
            return Err(ValidationError::invariant(
                "resolved",
                "an unresolved item cannot carry resolution fields",
            ));
        }

        Ok(Self {
            suspense_id: raw.suspense_id,
            transaction_id: raw.transaction_id,
            tenant_id: raw.tenant_id,
            client_id: raw.client_id,
            reason: raw.reason,
            suspense_account_id: raw.suspense_account_id,
            original_amount: raw.original_amount,
            description: raw.description,
            parked_at: raw.parked_at,
            resolved: raw.resolved,
            resolved_at: raw.resolved_at,
            resolution_account_id: raw.resolution_account_id,
            resolved_by: raw.resolved_by,
            clarification_attempts: raw.clarification_attempts,
            schema_version: raw.schema_version,
        })
    }
}
