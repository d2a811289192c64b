//! Accounting contract namespace.
//!
//! Pure record definitions only: no ledger state, no IO, no persistence
//! concerns. Every type validates at construction and round-trips through
//! the canonical JSON representation.

pub mod account;
pub mod classification;
pub mod journal;
pub mod risk;
pub mod suspense;
pub mod transaction;
pub mod vendor;

pub use account::{Account, AccountType, ChartOfAccounts};
pub use classification::{
    AlternativeSuggestion, Classification, ClassificationResult, ClassificationSource,
    Confidence, ConfidenceBand, ReviewStatus,
};
pub use journal::{JournalEntry, JournalLine};
pub use risk::{RiskAssessment, RiskFlag, RiskScore, RiskSeverity, known_risk_codes};
pub use suspense::{SuspenseItem, SuspenseReason};
pub use transaction::{BankAccountType, Transaction, TransactionStatus, TransactionType};
pub use vendor::Vendor;
