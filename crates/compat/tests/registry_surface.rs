//! Black-box checks that the registry snapshot stays in lockstep with the
//! concrete contract types.

use serde::de::DeserializeOwned;
use serde_json::json;

use contracts_accounting::{
    AccountType, BankAccountType, ClassificationSource, ConfidenceBand, ReviewStatus,
    RiskSeverity, SuspenseReason, TransactionStatus, TransactionType,
};
use contracts_compat::{CompatibilityError, FieldKind, Verdict, registry};
use contracts_core::{
    ClassificationId, Contract, CurrencyCode, Money, SourceSystem, TransactionId,
};
use contracts_events::known_event_types;
use contracts_messaging::{Channel, ConversationStatus, MessageDirection, MessageStatus};
use contracts_tax::{EntityType, PaymentStatus, TaxFilingType};

fn assert_variants_parse<T: DeserializeOwned>(enum_name: &str) {
    let registry = registry::current();
    let descriptor = registry
        .enumeration(enum_name)
        .unwrap_or_else(|| panic!("enum '{enum_name}' missing from registry"));
    assert!(!descriptor.variants().is_empty());
    for variant in descriptor.variants() {
        assert!(
            serde_json::from_value::<T>(json!(variant)).is_ok(),
            "registry variant '{variant}' does not parse into {enum_name}"
        );
    }
}

#[test]
fn every_registry_enum_variant_parses_into_its_rust_enum() {
    assert_variants_parse::<AccountType>("account_type");
    assert_variants_parse::<TransactionType>("transaction_type");
    assert_variants_parse::<BankAccountType>("bank_account_type");
    assert_variants_parse::<TransactionStatus>("transaction_status");
    assert_variants_parse::<SuspenseReason>("suspense_reason");
    assert_variants_parse::<RiskSeverity>("risk_severity");
    assert_variants_parse::<ConfidenceBand>("confidence_band");
    assert_variants_parse::<ClassificationSource>("classification_source");
    assert_variants_parse::<ReviewStatus>("review_status");
    assert_variants_parse::<MessageDirection>("message_direction");
    assert_variants_parse::<MessageStatus>("message_status");
    assert_variants_parse::<Channel>("channel");
    assert_variants_parse::<ConversationStatus>("conversation_status");
    assert_variants_parse::<SourceSystem>("source_system");
    assert_variants_parse::<EntityType>("entity_type");
    assert_variants_parse::<TaxFilingType>("tax_filing_type");
    assert_variants_parse::<PaymentStatus>("payment_status");
}

#[test]
fn transaction_wire_keys_match_the_descriptor() {
    let mut txn = contracts_accounting::Transaction::new(
        TransactionId::new("tx_1").unwrap(),
        Money::new(1050, CurrencyCode::usd()),
        "2024-01-01T00:00:00Z".parse().unwrap(),
        TransactionStatus::Posted,
    )
    .classified(ClassificationId::new("groceries").unwrap());
    txn.transaction_type = Some(TransactionType::Debit);
    txn.bank_account_type = Some(BankAccountType::Checking);
    txn.description = Some("Grocery run".to_string());
    txn.vendor_name = Some("Safeway".to_string());
    txn.memo = Some("weekly".to_string());
    txn.check_number = Some("1234".to_string());
    txn.metadata.insert("imported_from".to_string(), json!("plaid"));
    txn.schema_version = "1.1".parse().unwrap();

    let value = txn.to_value().unwrap();
    let registry = registry::current();
    let descriptor = registry.record("accounting.transaction").unwrap();
    for key in value.as_object().unwrap().keys() {
        assert!(
            descriptor.field_named(key).is_some(),
            "wire field '{key}' missing from accounting.transaction descriptor"
        );
    }
    // Required descriptor fields must all be present on a full payload.
    for field in descriptor.fields() {
        if field.required {
            assert!(value.get(&field.name).is_some(), "'{}' absent", field.name);
        }
    }
}

#[test]
fn known_event_types_are_valid_event_type_values() {
    for name in known_event_types() {
        assert!(
            contracts_events::EventType::new(*name).is_ok(),
            "{name} rejected"
        );
    }
}

#[test]
fn additive_revision_passes_review() {
    let old = registry::current();
    let base = old.record("accounting.transaction").unwrap().clone();
    let new = registry::current()
        .with_version(old.version().bump_minor())
        .with_record(base.optional_field("settlement_date", FieldKind::Timestamp));
    assert_eq!(contracts_compat::check(&old, &new).verdict(), Verdict::Compatible);
    assert!(contracts_compat::review(&old, &new).is_ok());
}

#[test]
fn dropping_a_record_fails_review_without_a_major_bump() {
    let old = registry::current();
    let mut rebuilt = contracts_compat::SchemaSet::new(old.version().bump_minor());
    for record in old.records().filter(|r| r.name() != "accounting.vendor") {
        rebuilt = rebuilt.with_record(record.clone());
    }
    for descriptor in old.enums() {
        rebuilt = rebuilt.with_enum(descriptor.clone());
    }
    assert!(matches!(
        contracts_compat::review(&old, &rebuilt),
        Err(CompatibilityError::BreakingChanges { .. })
    ));
    // The same cut under a major bump is accepted.
    let rebuilt = rebuilt.with_version(old.version().bump_major());
    assert!(contracts_compat::review(&old, &rebuilt).is_ok());
}
