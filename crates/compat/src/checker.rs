//! Compatibility checker: pairwise diff of two schema snapshots.
//!
//! Governance rule: within a major version, evolution is additive only.
//! New optional fields, new enum variants, and new records are fine; any
//! removal, rename (observed as remove+add), or narrowing demands a major
//! version bump.

use thiserror::Error;

use contracts_core::SchemaVersion;

use crate::model::{FieldKind, RecordDescriptor, SchemaSet};

/// One observed difference between two schema snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    RecordAdded { record: String },
    RecordRemoved { record: String },
    FieldAdded { record: String, field: String, required: bool },
    FieldRemoved { record: String, field: String },
    /// Optional became required: old payloads may omit the field.
    FieldRequiredTightened { record: String, field: String },
    /// Required became optional: every old payload still satisfies it.
    FieldRequiredRelaxed { record: String, field: String },
    FieldKindChanged { record: String, field: String, from: FieldKind, to: FieldKind },
    EnumAdded { name: String },
    EnumRemoved { name: String },
    VariantAdded { name: String, variant: String },
    VariantRemoved { name: String, variant: String },
}

impl Change {
    pub fn is_breaking(&self) -> bool {
        match self {
            Change::RecordAdded { .. }
            | Change::FieldRequiredRelaxed { .. }
            | Change::EnumAdded { .. }
            | Change::VariantAdded { .. } => false,
            Change::FieldAdded { required, .. } => *required,
            Change::RecordRemoved { .. }
            | Change::FieldRemoved { .. }
            | Change::FieldRequiredTightened { .. }
            | Change::FieldKindChanged { .. }
            | Change::EnumRemoved { .. }
            | Change::VariantRemoved { .. } => true,
        }
    }
}

impl core::fmt::Display for Change {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Change::RecordAdded { record } => write!(f, "record '{record}' added"),
            Change::RecordRemoved { record } => write!(f, "record '{record}' removed"),
            Change::FieldAdded { record, field, required: true } => {
                write!(f, "{record}.{field}: required field added without a default")
            }
            Change::FieldAdded { record, field, required: false } => {
                write!(f, "{record}.{field}: optional field added")
            }
            Change::FieldRemoved { record, field } => {
                write!(f, "{record}.{field}: field removed")
            }
            Change::FieldRequiredTightened { record, field } => {
                write!(f, "{record}.{field}: optional field became required")
            }
            Change::FieldRequiredRelaxed { record, field } => {
                write!(f, "{record}.{field}: required field became optional")
            }
            Change::FieldKindChanged { record, field, from, to } => {
                write!(f, "{record}.{field}: type changed from {from} to {to}")
            }
            Change::EnumAdded { name } => write!(f, "enum '{name}' added"),
            Change::EnumRemoved { name } => write!(f, "enum '{name}' removed"),
            Change::VariantAdded { name, variant } => {
                write!(f, "enum '{name}': variant '{variant}' added")
            }
            Change::VariantRemoved { name, variant } => {
                write!(f, "enum '{name}': variant '{variant}' removed")
            }
        }
    }
}

/// Overall verdict of a schema diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Compatible,
    Breaking,
}

impl core::fmt::Display for Verdict {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Verdict::Compatible => write!(f, "compatible"),
            Verdict::Breaking => write!(f, "breaking"),
        }
    }
}

/// Outcome of [`check`]: every observed change, breaking or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatReport {
    changes: Vec<Change>,
}

impl CompatReport {
    pub fn verdict(&self) -> Verdict {
        if self.changes.iter().any(Change::is_breaking) {
            Verdict::Breaking
        } else {
            Verdict::Compatible
        }
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn breaking(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(|c| c.is_breaking())
    }

    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }

    /// Human-readable reasons for every breaking change.
    pub fn breaking_reasons(&self) -> Vec<String> {
        self.breaking().map(|c| c.to_string()).collect()
    }
}

/// Raised during schema-evolution review, never at runtime.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompatibilityError {
    #[error("breaking changes require a major version bump ({old} -> {new}): {reasons}")]
    BreakingChanges {
        old: SchemaVersion,
        new: SchemaVersion,
        reasons: String,
    },

    #[error("schema changed but the version did not move ({version})")]
    MissingVersionBump { version: SchemaVersion },

    #[error("schema version moved backwards ({old} -> {new})")]
    VersionRegression {
        old: SchemaVersion,
        new: SchemaVersion,
    },
}

/// Diff two schema snapshots field by field and variant by variant.
pub fn check(old: &SchemaSet, new: &SchemaSet) -> CompatReport {
    let mut changes = Vec::new();

    for old_record in old.records() {
        match new.record(old_record.name()) {
            Some(new_record) => diff_record(old_record, new_record, &mut changes),
            None => changes.push(Change::RecordRemoved {
                record: old_record.name().to_string(),
            }),
        }
    }
    for new_record in new.records() {
        if old.record(new_record.name()).is_none() {
            changes.push(Change::RecordAdded {
                record: new_record.name().to_string(),
            });
        }
    }

    for old_enum in old.enums() {
        match new.enumeration(old_enum.name()) {
            Some(new_enum) => {
                for variant in old_enum.variants() {
                    if !new_enum.has_variant(variant) {
                        changes.push(Change::VariantRemoved {
                            name: old_enum.name().to_string(),
                            variant: variant.clone(),
                        });
                    }
                }
                for variant in new_enum.variants() {
                    if !old_enum.has_variant(variant) {
                        changes.push(Change::VariantAdded {
                            name: old_enum.name().to_string(),
                            variant: variant.clone(),
                        });
                    }
                }
            }
            None => changes.push(Change::EnumRemoved {
                name: old_enum.name().to_string(),
            }),
        }
    }
    for new_enum in new.enums() {
        if old.enumeration(new_enum.name()).is_none() {
            changes.push(Change::EnumAdded {
                name: new_enum.name().to_string(),
            });
        }
    }

    for change in &changes {
        tracing::debug!(breaking = change.is_breaking(), %change, "schema diff");
    }

    CompatReport { changes }
}

fn diff_record(old: &RecordDescriptor, new: &RecordDescriptor, changes: &mut Vec<Change>) {
    let record = old.name().to_string();

    for old_field in old.fields() {
        match new.field_named(&old_field.name) {
            None => changes.push(Change::FieldRemoved {
                record: record.clone(),
                field: old_field.name.clone(),
            }),
            Some(new_field) => {
                if old_field.kind != new_field.kind {
                    changes.push(Change::FieldKindChanged {
                        record: record.clone(),
                        field: old_field.name.clone(),
                        from: old_field.kind.clone(),
                        to: new_field.kind.clone(),
                    });
                }
                if !old_field.required && new_field.required {
                    changes.push(Change::FieldRequiredTightened {
                        record: record.clone(),
                        field: old_field.name.clone(),
                    });
                } else if old_field.required && !new_field.required {
                    changes.push(Change::FieldRequiredRelaxed {
                        record: record.clone(),
                        field: old_field.name.clone(),
                    });
                }
            }
        }
    }

    for new_field in new.fields() {
        if old.field_named(&new_field.name).is_none() {
            changes.push(Change::FieldAdded {
                record: record.clone(),
                field: new_field.name.clone(),
                required: new_field.required,
            });
        }
    }
}

/// Gate a proposed schema revision against the governance rule.
///
/// Breaking changes demand a major bump; any change demands some bump; the
/// version never moves backwards.
pub fn review(old: &SchemaSet, new: &SchemaSet) -> Result<(), CompatibilityError> {
    let report = check(old, new);
    let (old_version, new_version) = (old.version(), new.version());

    if new_version < old_version {
        return Err(CompatibilityError::VersionRegression {
            old: old_version,
            new: new_version,
        });
    }

    match report.verdict() {
        Verdict::Breaking => {
            if new_version.major() <= old_version.major() {
                return Err(CompatibilityError::BreakingChanges {
                    old: old_version,
                    new: new_version,
                    reasons: report.breaking_reasons().join("; "),
                });
            }
        }
        Verdict::Compatible => {
            if !report.is_unchanged() && new_version == old_version {
                return Err(CompatibilityError::MissingVersionBump {
                    version: old_version,
                });
            }
        }
    }

    tracing::debug!(%old_version, %new_version, verdict = %report.verdict(), "schema review passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EnumDescriptor;
    use proptest::prelude::*;

    fn v(major: u32, minor: u32) -> SchemaVersion {
        SchemaVersion::new(major, minor)
    }

    fn base_record() -> RecordDescriptor {
        RecordDescriptor::new("accounting.transaction")
            .field("id", FieldKind::Identifier)
            .field("amount", FieldKind::Money)
            .optional_field("memo", FieldKind::String)
    }

    fn base_set(version: SchemaVersion) -> SchemaSet {
        SchemaSet::new(version)
            .with_record(base_record())
            .with_enum(
                EnumDescriptor::new("transaction_status")
                    .variant("pending")
                    .variant("posted"),
            )
    }

    #[test]
    fn identical_sets_are_compatible_and_unchanged() {
        let report = check(&base_set(v(1, 0)), &base_set(v(1, 0)));
        assert!(report.is_unchanged());
        assert_eq!(report.verdict(), Verdict::Compatible);
    }

    #[test]
    fn adding_an_optional_field_is_compatible() {
        let old = base_set(v(1, 0));
        let new = base_set(v(1, 1))
            .with_record(base_record().optional_field("check_number", FieldKind::String));
        let report = check(&old, &new);
        assert_eq!(report.verdict(), Verdict::Compatible);
        assert!(review(&old, &new).is_ok());
    }

    #[test]
    fn adding_a_required_field_is_breaking() {
        let new = base_set(v(1, 1))
            .with_record(base_record().field("posted_by", FieldKind::Identifier));
        let report = check(&base_set(v(1, 0)), &new);
        assert_eq!(report.verdict(), Verdict::Breaking);
    }

    #[test]
    fn removing_a_required_field_is_breaking() {
        let old = base_set(v(1, 0));
        let new = base_set(v(1, 1)).with_record(
            RecordDescriptor::new("accounting.transaction")
                .field("id", FieldKind::Identifier)
                .optional_field("memo", FieldKind::String),
        );
        let report = check(&old, &new);
        assert_eq!(report.verdict(), Verdict::Breaking);
        assert!(
            report
                .breaking_reasons()
                .iter()
                .any(|r| r.contains("accounting.transaction.amount"))
        );
        assert!(matches!(
            review(&old, &new),
            Err(CompatibilityError::BreakingChanges { .. })
        ));
    }

    #[test]
    fn narrowing_optional_to_required_is_breaking() {
        let new = base_set(v(1, 1)).with_record(
            RecordDescriptor::new("accounting.transaction")
                .field("id", FieldKind::Identifier)
                .field("amount", FieldKind::Money)
                .field("memo", FieldKind::String),
        );
        assert_eq!(check(&base_set(v(1, 0)), &new).verdict(), Verdict::Breaking);
    }

    #[test]
    fn widening_required_to_optional_is_compatible() {
        let new = base_set(v(1, 1)).with_record(
            RecordDescriptor::new("accounting.transaction")
                .field("id", FieldKind::Identifier)
                .optional_field("amount", FieldKind::Money)
                .optional_field("memo", FieldKind::String),
        );
        assert_eq!(check(&base_set(v(1, 0)), &new).verdict(), Verdict::Compatible);
    }

    #[test]
    fn changing_a_field_kind_is_breaking() {
        let new = base_set(v(1, 1)).with_record(
            RecordDescriptor::new("accounting.transaction")
                .field("id", FieldKind::Identifier)
                .field("amount", FieldKind::Integer)
                .optional_field("memo", FieldKind::String),
        );
        let report = check(&base_set(v(1, 0)), &new);
        assert_eq!(report.verdict(), Verdict::Breaking);
        assert!(
            report
                .breaking_reasons()
                .iter()
                .any(|r| r.contains("type changed from money to integer"))
        );
    }

    #[test]
    fn enum_variant_add_is_compatible_removal_is_breaking() {
        let old = base_set(v(1, 0));

        let widened = base_set(v(1, 1)).with_enum(
            EnumDescriptor::new("transaction_status")
                .variant("pending")
                .variant("posted")
                .variant("excluded"),
        );
        assert_eq!(check(&old, &widened).verdict(), Verdict::Compatible);

        let narrowed = base_set(v(2, 0))
            .with_enum(EnumDescriptor::new("transaction_status").variant("posted"));
        let report = check(&old, &narrowed);
        assert_eq!(report.verdict(), Verdict::Breaking);
        assert!(review(&old, &narrowed).is_ok(), "major bump clears breaking changes");
    }

    #[test]
    fn removing_a_record_or_enum_is_breaking() {
        let old = base_set(v(1, 0));
        let emptied = SchemaSet::new(v(1, 1));
        let report = check(&old, &emptied);
        assert_eq!(report.verdict(), Verdict::Breaking);
        assert_eq!(report.breaking().count(), 2);
    }

    #[test]
    fn new_records_and_enums_are_compatible() {
        let new = base_set(v(1, 1))
            .with_record(RecordDescriptor::new("accounting.vendor").field("id", FieldKind::Identifier))
            .with_enum(EnumDescriptor::new("risk_severity").variant("low"));
        assert_eq!(check(&base_set(v(1, 0)), &new).verdict(), Verdict::Compatible);
    }

    #[test]
    fn review_requires_a_bump_for_any_change() {
        let old = base_set(v(1, 0));
        let new = base_set(v(1, 0))
            .with_record(base_record().optional_field("check_number", FieldKind::String));
        assert!(matches!(
            review(&old, &new),
            Err(CompatibilityError::MissingVersionBump { .. })
        ));
    }

    #[test]
    fn review_rejects_version_regression() {
        assert!(matches!(
            review(&base_set(v(1, 1)), &base_set(v(1, 0))),
            Err(CompatibilityError::VersionRegression { .. })
        ));
    }

    #[test]
    fn unchanged_set_needs_no_bump() {
        assert!(review(&base_set(v(1, 0)), &base_set(v(1, 0))).is_ok());
    }

    proptest! {
        /// Adding any batch of fresh optional fields under a minor bump is
        /// always additive.
        #[test]
        fn adding_optional_fields_is_always_compatible(
            names in proptest::collection::btree_set("[a-z][a-z0-9_]{0,8}", 0..8)
        ) {
            let old = base_set(v(1, 0));
            let mut record = base_record();
            for name in &names {
                if base_record().field_named(name).is_none() {
                    record = record.optional_field(name, FieldKind::String);
                }
            }
            let new = base_set(v(1, 1)).with_record(record);
            prop_assert_eq!(check(&old, &new).verdict(), Verdict::Compatible);
            prop_assert!(review(&old, &new).is_ok());
        }
    }
}
