//! Classification taxonomy and per-transaction classification results.

use serde::{Deserialize, Serialize};

use contracts_core::{
    AccountId, ClassificationId, Contract, ContractResult, SchemaVersion, TransactionId,
    ValidationError, VendorId,
};

use crate::account::AccountType;
use crate::risk::RiskFlag;

/// Confidence band reported alongside a numeric confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
    Uncertain,
}

/// Who or what produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    Rule,
    Ai,
    Historical,
    Client,
    Accountant,
}

/// Accountant review outcome for a suggested classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
    Modified,
    AutoApplied,
}

/// Numeric confidence in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    pub fn new(value: f64) -> ContractResult<Self> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::type_mismatch(
                "confidence",
                format!("expected a value in [0, 1], got {value}"),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Confidence {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(value: Confidence) -> Self {
        value.0
    }
}

/// Category taxonomy entry.
///
/// Parallel to [`crate::account::Account`] but independent of any chart: a
/// classification names a bookkeeping category a transaction can land in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub id: ClassificationId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_c_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ClassificationId>,
}

impl Classification {
    pub fn new(id: ClassificationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            account_type: None,
            schedule_c_line: None,
            parent_id: None,
        }
    }
}

impl Contract for Classification {}

/// Lower-ranked alternative to a suggested classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeSuggestion {
    pub account_id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub confidence: Confidence,
}

/// Classification outcome for a single transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub transaction_id: TransactionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_account_id: Option<AccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_vendor_id: Option<VendorId>,
    pub confidence: Confidence,
    pub confidence_band: ConfidenceBand,
    pub source: ClassificationSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub needs_review: bool,
    #[serde(default)]
    pub needs_clarification: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarification_question: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risk_flags: Vec<RiskFlag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_suggestions: Vec<AlternativeSuggestion>,
    #[serde(default, skip_serializing_if = "SchemaVersion::is_baseline")]
    pub schema_version: SchemaVersion,
}

impl Contract for ClassificationResult {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn confidence_bounds_are_enforced() {
        assert!(Confidence::new(0.0).is_ok());
        assert!(Confidence::new(1.0).is_ok());
        assert!(Confidence::new(0.5).is_ok());
        assert!(Confidence::new(-0.1).is_err());
        assert!(Confidence::new(1.1).is_err());
        assert!(Confidence::new(f64::NAN).is_err());
    }

    #[test]
    fn confidence_is_enforced_on_the_wire() {
        let err = ClassificationResult::from_value(json!({
            "transaction_id": "txn_001",
            "confidence": 1.5,
            "confidence_band": "high",
            "source": "ai",
        }))
        .unwrap_err();
        assert_eq!(err.field(), "confidence");
    }

    #[test]
    fn result_round_trips() {
        let result = ClassificationResult {
            transaction_id: TransactionId::new("txn_001").unwrap(),
            suggested_account_id: Some(AccountId::new("acc_123").unwrap()),
            suggested_account_name: Some("Office Supplies".to_string()),
            suggested_vendor_id: None,
            confidence: Confidence::new(0.85).unwrap(),
            confidence_band: ConfidenceBand::High,
            source: ClassificationSource::Ai,
            reasoning: Some("Matches historical pattern".to_string()),
            needs_review: false,
            needs_clarification: false,
            clarification_question: None,
            risk_flags: vec![],
            alternative_suggestions: vec![AlternativeSuggestion {
                account_id: AccountId::new("acc_789").unwrap(),
                name: None,
                confidence: Confidence::new(0.6).unwrap(),
            }],
            schema_version: SchemaVersion::default(),
        };
        let value = result.to_value().unwrap();
        assert_eq!(ClassificationResult::from_value(value).unwrap(), result);
    }

    #[test]
    fn taxonomy_entry_round_trips() {
        let mut classification = Classification::new(
            ClassificationId::new("groceries").unwrap(),
            "Groceries",
        );
        classification.schedule_c_line = Some("27a".to_string());
        let value = classification.to_value().unwrap();
        assert_eq!(Classification::from_value(value).unwrap(), classification);
    }

    #[test]
    fn source_outside_the_set_is_rejected() {
        assert!(serde_json::from_value::<ClassificationSource>(json!("oracle")).is_err());
        for wire in ["rule", "ai", "historical", "client", "accountant"] {
            assert!(serde_json::from_value::<ClassificationSource>(json!(wire)).is_ok(), "{wire}");
        }
    }
}
