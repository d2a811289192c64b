//! Journal entry records (double-entry).

use serde::{Deserialize, Serialize};

use contracts_core::{
    AccountId, Contract, ContractResult, CurrencyCode, JournalEntryId, Money, SchemaVersion,
    Timestamp, ValidationError,
};

/// One side of a journal entry.
///
/// Exactly one of `debit`/`credit` is positive; the other is zero in the
/// same currency. Amounts are never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawJournalLine")]
pub struct JournalLine {
    account_id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    debit: Money,
    credit: Money,
}

impl JournalLine {
    /// Debit line for the given amount (must be positive).
    pub fn debit(account_id: AccountId, amount: Money) -> ContractResult<Self> {
        let zero = Money::zero(amount.currency.clone());
        Self::from_sides(account_id, amount, zero)
    }

    /// Credit line for the given amount (must be positive).
    pub fn credit(account_id: AccountId, amount: Money) -> ContractResult<Self> {
        let zero = Money::zero(amount.currency.clone());
        Self::from_sides(account_id, zero, amount)
    }

    pub fn with_account_name(mut self, name: impl Into<String>) -> Self {
        self.account_name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn account_name(&self) -> Option<&str> {
        self.account_name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn debit_amount(&self) -> &Money {
        &self.debit
    }

    pub fn credit_amount(&self) -> &Money {
        &self.credit
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.debit.currency
    }

    pub fn is_debit(&self) -> bool {
        self.debit.is_positive()
    }

    fn from_sides(account_id: AccountId, debit: Money, credit: Money) -> ContractResult<Self> {
        validate_sides(&debit, &credit)?;
        Ok(Self {
            account_id,
            account_name: None,
            description: None,
            debit,
            credit,
        })
    }
}

fn validate_sides(debit: &Money, credit: &Money) -> ContractResult<()> {
    if debit.currency != credit.currency {
        return Err(ValidationError::invariant(
            "credit",
            format!(
                "debit and credit must share one currency ({} vs {})",
                debit.currency, credit.currency
            ),
        ));
    }
    if debit.is_negative() || credit.is_negative() {
        return Err(ValidationError::invariant(
            "debit",
            "journal amounts must not be negative",
        ));
    }
    if debit.is_positive() == credit.is_positive() {
        return Err(ValidationError::invariant(
            "debit",
            "exactly one of debit/credit must be positive",
        ));
    }
    Ok(())
}

impl Contract for JournalLine {}

#[derive(Debug, Deserialize)]
struct RawJournalLine {
    account_id: AccountId,
    #[serde(default)]
    account_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    debit: Money,
    credit: Money,
}

impl TryFrom<RawJournalLine> for JournalLine {
    type Error = ValidationError;

    fn try_from(raw: RawJournalLine) -> Result<Self, Self::Error> {
        validate_sides(&raw.debit, &raw.credit)?;
        Ok(Self {
            account_id: raw.account_id,
            account_name: raw.account_name,
            description: raw.description,
            debit: raw.debit,
            credit: raw.credit,
        })
    }
}

/// Balanced journal entry.
///
/// Constructed only from line sets where the debit total equals the credit
/// total and all lines share one currency; an instance is balanced by
/// construction for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawJournalEntry")]
pub struct JournalEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    entry_id: Option<JournalEntryId>,
    entry_date: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    memo: Option<String>,
    lines: Vec<JournalLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference_id: Option<String>,
    #[serde(default)]
    is_adjusting: bool,
    #[serde(default, skip_serializing_if = "SchemaVersion::is_baseline")]
    schema_version: SchemaVersion,
}

impl JournalEntry {
    pub fn new(entry_date: Timestamp, lines: Vec<JournalLine>) -> ContractResult<Self> {
        validate_lines(&lines)?;
        Ok(Self {
            entry_id: None,
            entry_date,
            memo: None,
            lines,
            source: None,
            reference_id: None,
            is_adjusting: false,
            schema_version: SchemaVersion::default(),
        })
    }

    pub fn with_entry_id(mut self, entry_id: JournalEntryId) -> Self {
        self.entry_id = Some(entry_id);
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_reference(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }

    /// Mark as an adjusting entry (period-end correction).
    pub fn adjusting(mut self) -> Self {
        self.is_adjusting = true;
        self
    }

    pub fn entry_id(&self) -> Option<&JournalEntryId> {
        self.entry_id.as_ref()
    }

    pub fn entry_date(&self) -> Timestamp {
        self.entry_date
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    pub fn lines(&self) -> &[JournalLine] {
        &self.lines
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn reference_id(&self) -> Option<&str> {
        self.reference_id.as_deref()
    }

    pub fn is_adjusting(&self) -> bool {
        self.is_adjusting
    }

    pub fn schema_version(&self) -> SchemaVersion {
        self.schema_version
    }

    pub fn currency(&self) -> &CurrencyCode {
        self.lines[0].currency()
    }

    /// Sum of the debit side (equals the credit side by construction).
    pub fn total_debits(&self) -> Money {
        let total: i64 = self.lines.iter().map(|l| l.debit_amount().amount).sum();
        Money::new(total, self.currency().clone())
    }

    pub fn total_credits(&self) -> Money {
        let total: i64 = self.lines.iter().map(|l| l.credit_amount().amount).sum();
        Money::new(total, self.currency().clone())
    }
}

impl Contract for JournalEntry {}

fn validate_lines(lines: &[JournalLine]) -> ContractResult<()> {
    let Some(first) = lines.first() else {
        return Err(ValidationError::invariant(
            "lines",
            "journal entry must have at least one line",
        ));
    };

    let currency = first.currency();
    let mut debit_total: i128 = 0;
    let mut credit_total: i128 = 0;
    for line in lines {
        if line.currency() != currency {
            return Err(ValidationError::invariant(
                "lines",
                "journal entry lines must share one currency",
            ));
        }
        debit_total += i128::from(line.debit_amount().amount);
        credit_total += i128::from(line.credit_amount().amount);
    }

    if debit_total != credit_total {
        return Err(ValidationError::invariant(
            "lines",
            format!("debits must equal credits ({debit_total} != {credit_total})"),
        ));
    }
    if i64::try_from(debit_total).is_err() {
        return Err(ValidationError::invariant("lines", "journal total overflow"));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct RawJournalEntry {
    #[serde(default)]
    entry_id: Option<JournalEntryId>,
    entry_date: Timestamp,
    #[serde(default)]
    memo: Option<String>,
    lines: Vec<JournalLine>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    reference_id: Option<String>,
    #[serde(default)]
    is_adjusting: bool,
    #[serde(default)]
    schema_version: SchemaVersion,
}

impl TryFrom<RawJournalEntry> for JournalEntry {
    type Error = ValidationError;

    fn try_from(raw: RawJournalEntry) -> Result<Self, Self::Error> {
        validate_lines(&raw.lines)?;
        Ok(Self {
            entry_id: raw.entry_id,
            entry_date: raw.entry_date,
            memo: raw.memo,
            lines: raw.lines,
            source: raw.source,
            reference_id: raw.reference_id,
            is_adjusting: raw.is_adjusting,
            schema_version: raw.schema_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn usd(amount: i64) -> Money {
        Money::new(amount, CurrencyCode::usd())
    }

    fn account(id: &str) -> AccountId {
        AccountId::new(id).unwrap()
    }

    fn date() -> Timestamp {
        "2024-01-15T00:00:00Z".parse().unwrap()
    }

    fn balanced_entry(amount: i64) -> JournalEntry {
        JournalEntry::new(
            date(),
            vec![
                JournalLine::debit(account("acc_dep_exp"), usd(amount)).unwrap(),
                JournalLine::credit(account("acc_accum_dep"), usd(amount)).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn balanced_entry_constructs() {
        let entry = balanced_entry(500)
            .with_entry_id(JournalEntryId::new("je_001").unwrap())
            .with_memo("Monthly depreciation")
            .with_source("system")
            .adjusting();
        assert_eq!(entry.total_debits(), usd(500));
        assert_eq!(entry.total_credits(), usd(500));
        assert!(entry.is_adjusting());
    }

    #[test]
    fn unbalanced_entry_is_rejected() {
        let err = JournalEntry::new(
            date(),
            vec![
                JournalLine::debit(account("acc_1"), usd(100)).unwrap(),
                JournalLine::credit(account("acc_2"), usd(90)).unwrap(),
            ],
        )
        .unwrap_err();
        match err {
            ValidationError::InvariantViolation { field, reason } => {
                assert_eq!(field, "lines");
                assert!(reason.contains("debits must equal credits"));
            }
            other => panic!("expected invariant violation, got {other:?}"),
        }
    }

    #[test]
    fn unbalanced_entry_is_rejected_on_the_wire_too() {
        let err = JournalEntry::from_value(json!({
            "entry_date": "2024-01-15T00:00:00Z",
            "lines": [
                {"account_id": "acc_1",
                 "debit": {"amount": 100, "currency": "USD"},
                 "credit": {"amount": 0, "currency": "USD"}},
                {"account_id": "acc_2",
                 "debit": {"amount": 0, "currency": "USD"},
                 "credit": {"amount": 50, "currency": "USD"}},
            ],
        }))
        .unwrap_err();
        assert_eq!(err.field(), "lines");
    }

    #[test]
    fn empty_entry_is_rejected() {
        assert!(JournalEntry::new(date(), vec![]).is_err());
    }

    #[test]
    fn mixed_currency_lines_are_rejected() {
        let eur = Money::new(100, CurrencyCode::new("EUR").unwrap());
        let err = JournalEntry::new(
            date(),
            vec![
                JournalLine::debit(account("acc_1"), usd(100)).unwrap(),
                JournalLine::credit(account("acc_2"), eur).unwrap(),
            ],
        )
        .unwrap_err();
        assert_eq!(err.field(), "lines");
    }

    #[test]
    fn line_with_both_sides_set_is_rejected() {
        let err = JournalLine::from_value(json!({
            "account_id": "acc_1",
            "debit": {"amount": 100, "currency": "USD"},
            "credit": {"amount": 100, "currency": "USD"},
        }))
        .unwrap_err();
        assert!(matches!(err, ValidationError::TypeMismatch { .. } | ValidationError::InvariantViolation { .. }));
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(JournalLine::debit(account("acc_1"), usd(-5)).is_err());
        assert!(JournalLine::debit(account("acc_1"), usd(0)).is_err());
    }

    #[test]
    fn multi_line_entry_balances_across_lines() {
        let entry = JournalEntry::new(
            date(),
            vec![
                JournalLine::debit(account("acc_1"), usd(100)).unwrap(),
                JournalLine::debit(account("acc_2"), usd(50)).unwrap(),
                JournalLine::credit(account("acc_3"), usd(75)).unwrap(),
                JournalLine::credit(account("acc_4"), usd(75)).unwrap(),
            ],
        )
        .unwrap();
        assert_eq!(entry.total_debits(), usd(150));
    }

    #[test]
    fn round_trip_is_identity() {
        let entry = balanced_entry(500).with_memo("Depreciation");
        let value = entry.to_value().unwrap();
        assert_eq!(JournalEntry::from_value(value).unwrap(), entry);
    }

    proptest! {
        /// Any one-debit-one-credit pair with matching amounts constructs
        /// and stays balanced; mismatched amounts never construct.
        #[test]
        fn balance_invariant_holds(
            amount in 1i64..1_000_000_000,
            skew in 0i64..1_000,
        ) {
            let balanced = JournalEntry::new(
                date(),
                vec![
                    JournalLine::debit(account("acc_1"), usd(amount)).unwrap(),
                    JournalLine::credit(account("acc_2"), usd(amount)).unwrap(),
                ],
            );
            prop_assert!(balanced.is_ok());
            let entry = balanced.unwrap();
            prop_assert_eq!(entry.total_debits(), entry.total_credits());

            if skew > 0 {
                let unbalanced = JournalEntry::new(
                    date(),
                    vec![
                        JournalLine::debit(account("acc_1"), usd(amount)).unwrap(),
                        JournalLine::credit(account("acc_2"), usd(amount + skew)).unwrap(),
                    ],
                );
                prop_assert!(unbalanced.is_err());
            }
        }

        #[test]
        fn wire_round_trip_is_identity(amount in 1i64..1_000_000_000) {
            let entry = balanced_entry(amount);
            let value = entry.to_value().unwrap();
            prop_assert_eq!(JournalEntry::from_value(value).unwrap(), entry);
        }
    }
}
