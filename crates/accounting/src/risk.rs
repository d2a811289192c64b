//! Risk flags attached to transactions and classifications.

use serde::{Deserialize, Serialize};

use contracts_core::{Contract, ContractResult, TransactionId, ValidationError};

/// Severity of a risk indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Single risk indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFlag {
    /// Stable machine code, e.g. `LARGE_AMOUNT`. See [`known_risk_codes`].
    pub code: String,
    #[serde(default = "default_severity")]
    pub severity: RiskSeverity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

fn default_severity() -> RiskSeverity {
    RiskSeverity::Medium
}

impl RiskFlag {
    pub fn new(code: impl Into<String>, severity: RiskSeverity) -> Self {
        Self {
            code: code.into(),
            severity,
            message: None,
            category: None,
        }
    }
}

impl Contract for RiskFlag {}

/// Documented risk codes and what they mean.
///
/// The set is advisory, not closed: producers may emit new codes without a
/// schema change, which is why `RiskFlag::code` is a string and not an enum.
pub fn known_risk_codes() -> &'static [(&'static str, &'static str)] {
    &[
        (
            "OWNER_TXN_POSSIBLE",
            "Transfer may be owner-related (draw, loan, contribution)",
        ),
        (
            "LARGE_AMOUNT",
            "Transaction exceeds normal range for this category",
        ),
        ("DUPLICATE_POSSIBLE", "Possible duplicate transaction detected"),
        ("TAX_SENSITIVE", "Classification affects tax-sensitive category"),
        (
            "PERSONAL_EXPENSE",
            "Possible personal expense in business account",
        ),
        (
            "ROUND_AMOUNT",
            "Round dollar amount may indicate estimate or transfer",
        ),
        ("NEW_VENDOR", "First transaction with this vendor/payee"),
        (
            "PATTERN_BREAK",
            "Transaction does not match historical patterns for this vendor",
        ),
    ]
}

/// Numeric risk score in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RiskScore(f64);

impl RiskScore {
    pub fn new(value: f64) -> ContractResult<Self> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::type_mismatch(
                "score",
                format!("expected a value in [0, 1], got {value}"),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for RiskScore {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RiskScore> for f64 {
    fn from(value: RiskScore) -> Self {
        value.0
    }
}

/// Risk score plus supporting flags for one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub transaction_id: TransactionId,
    pub score: RiskScore,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<RiskFlag>,
}

impl Contract for RiskAssessment {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn severity_defaults_to_medium() {
        let flag = RiskFlag::from_value(json!({"code": "LARGE_AMOUNT"})).unwrap();
        assert_eq!(flag.severity, RiskSeverity::Medium);
    }

    #[test]
    fn known_codes_cover_the_documented_set() {
        let codes: Vec<&str> = known_risk_codes().iter().map(|(code, _)| *code).collect();
        for code in [
            "OWNER_TXN_POSSIBLE",
            "LARGE_AMOUNT",
            "DUPLICATE_POSSIBLE",
            "TAX_SENSITIVE",
            "PERSONAL_EXPENSE",
            "ROUND_AMOUNT",
            "NEW_VENDOR",
            "PATTERN_BREAK",
        ] {
            assert!(codes.contains(&code), "{code} missing");
        }
    }

    #[test]
    fn score_outside_the_unit_interval_is_rejected() {
        let err = RiskAssessment::from_value(json!({
            "transaction_id": "txn_1",
            "score": 1.2,
        }))
        .unwrap_err();
        assert_eq!(err.field(), "score");
    }

    #[test]
    fn assessment_round_trips() {
        let assessment = RiskAssessment {
            transaction_id: TransactionId::new("txn_1").unwrap(),
            score: RiskScore::new(0.7).unwrap(),
            flags: vec![RiskFlag::new("NEW_VENDOR", RiskSeverity::Low)],
        };
        let value = assessment.to_value().unwrap();
        assert_eq!(RiskAssessment::from_value(value).unwrap(), assessment);
    }
}
