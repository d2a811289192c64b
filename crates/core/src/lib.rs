//! `contracts-core` — shared contract primitives.
//!
//! This crate contains **pure value types** (no transport or persistence
//! concerns): typed identifiers, money, timestamps, schema versioning, and
//! the validation error model used by every contract namespace.

pub mod contract;
pub mod enums;
pub mod error;
pub mod id;
pub mod money;
pub mod time;
pub mod version;

pub use contract::Contract;
pub use enums::SourceSystem;
pub use error::{ContractResult, ValidationError};
pub use id::{
    AccountId, ActorId, ClassificationId, ClientId, ConversationId, EventId, ExternalRef,
    JournalEntryId, MessageId, SuspenseId, TenantId, TransactionId, VendorId,
};
pub use money::{CurrencyCode, Money};
pub use time::{Timestamp, utc_now};
pub use version::SchemaVersion;
