//! Bank transaction record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use contracts_core::{
    ClassificationId, Contract, Money, SchemaVersion, Timestamp, TransactionId,
};

/// Debit/credit direction of a bank transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Debit,
    Credit,
}

/// Kind of bank account a transaction was observed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankAccountType {
    Checking,
    Savings,
    CreditCard,
    LineOfCredit,
    Loan,
    Other,
}

/// Where a transaction sits in the classification pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Classified,
    Posted,
    InSuspense,
    Excluded,
}

/// Canonical bank transaction.
///
/// An unclassified transaction carries no `classification`; parking it in
/// suspense is represented by [`TransactionStatus::InSuspense`] plus a
/// separate [`crate::suspense::SuspenseItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub amount: Money,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClassificationId>,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_type: Option<BankAccountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_number: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "SchemaVersion::is_baseline")]
    pub schema_version: SchemaVersion,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        amount: Money,
        timestamp: Timestamp,
        status: TransactionStatus,
    ) -> Self {
        Self {
            id,
            amount,
            timestamp,
            classification: None,
            status,
            transaction_type: None,
            bank_account_type: None,
            description: None,
            vendor_name: None,
            memo: None,
            check_number: None,
            metadata: BTreeMap::new(),
            schema_version: SchemaVersion::default(),
        }
    }

    /// New instance with the given status; the original stays unchanged.
    pub fn with_status(self, status: TransactionStatus) -> Self {
        Self { status, ..self }
    }

    /// New instance carrying a classification outcome.
    pub fn classified(self, classification: ClassificationId) -> Self {
        Self {
            classification: Some(classification),
            status: TransactionStatus::Classified,
            ..self
        }
    }
}

impl Contract for Transaction {}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts_core::{CurrencyCode, ValidationError};
    use serde_json::json;

    fn sample() -> Transaction {
        Transaction::new(
            TransactionId::new("tx_1").unwrap(),
            Money::new(1050, CurrencyCode::usd()),
            "2024-01-01T00:00:00Z".parse().unwrap(),
            TransactionStatus::Posted,
        )
    }

    #[test]
    fn serializes_to_the_documented_wire_form() {
        let txn = Transaction {
            classification: Some(ClassificationId::new("groceries").unwrap()),
            ..sample()
        };
        assert_eq!(
            txn.to_json().unwrap(),
            r#"{"id":"tx_1","amount":{"amount":1050,"currency":"USD"},"timestamp":"2024-01-01T00:00:00Z","classification":"groceries","status":"posted"}"#
        );
    }

    #[test]
    fn round_trips_with_and_without_optional_fields() {
        let bare = sample();
        assert_eq!(Transaction::from_value(bare.to_value().unwrap()).unwrap(), bare);

        let mut full = sample().classified(ClassificationId::new("groceries").unwrap());
        full.description = Some("Grocery run".to_string());
        full.vendor_name = Some("Safeway".to_string());
        full.transaction_type = Some(TransactionType::Debit);
        full.bank_account_type = Some(BankAccountType::Checking);
        full.metadata.insert("imported_from".to_string(), json!("plaid"));
        assert_eq!(Transaction::from_value(full.to_value().unwrap()).unwrap(), full);
    }

    #[test]
    fn missing_required_field_names_the_field() {
        let err = Transaction::from_value(json!({
            "id": "tx_1",
            "amount": {"amount": 1050, "currency": "USD"},
            "timestamp": "2024-01-01T00:00:00Z",
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::missing_field("status"));
    }

    #[test]
    fn status_outside_the_set_is_rejected() {
        let mut value = sample().to_value().unwrap();
        value["status"] = json!("archived");
        assert!(Transaction::from_value(value).is_err());
        for wire in ["pending", "classified", "posted", "in_suspense", "excluded"] {
            assert!(serde_json::from_value::<TransactionStatus>(json!(wire)).is_ok(), "{wire}");
        }
    }

    #[test]
    fn classified_returns_a_new_instance() {
        let original = sample();
        let updated = original.clone().classified(ClassificationId::new("groceries").unwrap());
        assert_eq!(original.classification, None);
        assert_eq!(original.status, TransactionStatus::Posted);
        assert_eq!(updated.status, TransactionStatus::Classified);
        assert_eq!(
            updated.classification.as_ref().map(|c| c.as_str()),
            Some("groceries")
        );
    }
}
