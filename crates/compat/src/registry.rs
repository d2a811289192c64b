//! Descriptor snapshot of the contract surface shipped by this workspace.
//!
//! [`current`] is the source of truth a release pipeline snapshots per
//! version tag; reviewing a proposed revision is
//! `checker::review(&previous_snapshot, &registry::current())`.

use contracts_core::SchemaVersion;

use crate::model::{EnumDescriptor, FieldKind, RecordDescriptor, SchemaSet};

fn money() -> FieldKind {
    FieldKind::Money
}

fn record(name: &str) -> FieldKind {
    FieldKind::Record(name.to_string())
}

fn an_enum(name: &str) -> FieldKind {
    FieldKind::Enum(name.to_string())
}

fn list(kind: FieldKind) -> FieldKind {
    FieldKind::List(Box::new(kind))
}

/// Schema snapshot for the current library version.
pub fn current() -> SchemaSet {
    SchemaSet::new(SchemaVersion::BASELINE)
        .with_record(
            RecordDescriptor::new("common.money")
                .field("amount", FieldKind::Integer)
                .field("currency", FieldKind::String),
        )
        .with_record(
            RecordDescriptor::new("common.external_ref")
                .field("system", FieldKind::String)
                .field("external_id", FieldKind::String)
                .optional_field("external_type", FieldKind::String)
                .optional_field("metadata", FieldKind::Map),
        )
        .with_record(
            RecordDescriptor::new("accounting.account")
                .field("id", FieldKind::Identifier)
                .field("name", FieldKind::String)
                .field("account_type", an_enum("account_type"))
                .optional_field("sub_type", FieldKind::String)
                .optional_field("account_number", FieldKind::String)
                .optional_field("schedule_c_line", FieldKind::String)
                .optional_field("is_active", FieldKind::Bool)
                .optional_field("parent_id", FieldKind::Identifier),
        )
        .with_record(
            RecordDescriptor::new("accounting.transaction")
                .field("id", FieldKind::Identifier)
                .field("amount", record("common.money"))
                .field("timestamp", FieldKind::Timestamp)
                .optional_field("classification", FieldKind::Identifier)
                .field("status", an_enum("transaction_status"))
                .optional_field("transaction_type", an_enum("transaction_type"))
                .optional_field("bank_account_type", an_enum("bank_account_type"))
                .optional_field("description", FieldKind::String)
                .optional_field("vendor_name", FieldKind::String)
                .optional_field("memo", FieldKind::String)
                .optional_field("check_number", FieldKind::String)
                .optional_field("metadata", FieldKind::Map)
                .optional_field("schema_version", FieldKind::String),
        )
        .with_record(
            RecordDescriptor::new("accounting.classification")
                .field("id", FieldKind::Identifier)
                .field("name", FieldKind::String)
                .optional_field("account_type", an_enum("account_type"))
                .optional_field("schedule_c_line", FieldKind::String)
                .optional_field("parent_id", FieldKind::Identifier),
        )
        .with_record(
            RecordDescriptor::new("accounting.alternative_suggestion")
                .field("account_id", FieldKind::Identifier)
                .optional_field("name", FieldKind::String)
                .field("confidence", FieldKind::Float),
        )
        .with_record(
            RecordDescriptor::new("accounting.classification_result")
                .field("transaction_id", FieldKind::Identifier)
                .optional_field("suggested_account_id", FieldKind::Identifier)
                .optional_field("suggested_account_name", FieldKind::String)
                .optional_field("suggested_vendor_id", FieldKind::Identifier)
                .field("confidence", FieldKind::Float)
                .field("confidence_band", an_enum("confidence_band"))
                .field("source", an_enum("classification_source"))
                .optional_field("reasoning", FieldKind::String)
                .optional_field("needs_review", FieldKind::Bool)
                .optional_field("needs_clarification", FieldKind::Bool)
                .optional_field("clarification_question", FieldKind::String)
                .optional_field("risk_flags", list(record("accounting.risk_flag")))
                .optional_field(
                    "alternative_suggestions",
                    list(record("accounting.alternative_suggestion")),
                )
                .optional_field("schema_version", FieldKind::String),
        )
        .with_record(
            RecordDescriptor::new("accounting.journal_line")
                .field("account_id", FieldKind::Identifier)
                .optional_field("account_name", FieldKind::String)
                .optional_field("description", FieldKind::String)
                .field("debit", money())
                .field("credit", money()),
        )
        .with_record(
            RecordDescriptor::new("accounting.journal_entry")
                .optional_field("entry_id", FieldKind::Identifier)
                .field("entry_date", FieldKind::Timestamp)
                .optional_field("memo", FieldKind::String)
                .field("lines", list(record("accounting.journal_line")))
                .optional_field("source", FieldKind::String)
                .optional_field("reference_id", FieldKind::String)
                .optional_field("is_adjusting", FieldKind::Bool)
                .optional_field("schema_version", FieldKind::String),
        )
        .with_record(
            RecordDescriptor::new("accounting.vendor")
                .field("id", FieldKind::Identifier)
                .field("name", FieldKind::String)
                .optional_field("display_name", FieldKind::String)
                .optional_field("is_1099_eligible", FieldKind::Bool)
                .optional_field("is_active", FieldKind::Bool),
        )
        .with_record(
            RecordDescriptor::new("accounting.suspense_item")
                .field("suspense_id", FieldKind::Identifier)
                .field("transaction_id", FieldKind::Identifier)
                .field("tenant_id", FieldKind::Identifier)
                .field("client_id", FieldKind::Identifier)
                .field("reason", an_enum("suspense_reason"))
                .optional_field("suspense_account_id", FieldKind::Identifier)
                .optional_field("original_amount", money())
                .optional_field("description", FieldKind::String)
                .optional_field("parked_at", FieldKind::Timestamp)
                .optional_field("resolved", FieldKind::Bool)
                .optional_field("resolved_at", FieldKind::Timestamp)
                .optional_field("resolution_account_id", FieldKind::Identifier)
                .optional_field("resolved_by", FieldKind::Identifier)
                .optional_field("clarification_attempts", FieldKind::Integer)
                .optional_field("schema_version", FieldKind::String),
        )
        .with_record(
            RecordDescriptor::new("accounting.risk_flag")
                .field("code", FieldKind::String)
                .optional_field("severity", an_enum("risk_severity"))
                .optional_field("message", FieldKind::String)
                .optional_field("category", FieldKind::String),
        )
        .with_record(
            RecordDescriptor::new("accounting.risk_assessment")
                .field("transaction_id", FieldKind::Identifier)
                .field("score", FieldKind::Float)
                .optional_field("flags", list(record("accounting.risk_flag"))),
        )
        .with_record(
            RecordDescriptor::new("messaging.message")
                .field("id", FieldKind::Identifier)
                .field("conversation_id", FieldKind::Identifier)
                .field("direction", an_enum("message_direction"))
                .field("sender", FieldKind::String)
                .field("recipient", FieldKind::String)
                .field("body", FieldKind::String)
                .optional_field("channel", an_enum("channel"))
                .optional_field("status", an_enum("message_status"))
                .field("timestamp", FieldKind::Timestamp)
                .optional_field("template_name", FieldKind::String)
                .optional_field("template_params", FieldKind::Map)
                .optional_field("context_type", FieldKind::String)
                .optional_field("context_id", FieldKind::String)
                .optional_field("schema_version", FieldKind::String),
        )
        .with_record(
            RecordDescriptor::new("messaging.delivery_receipt")
                .field("message_id", FieldKind::Identifier)
                .optional_field("conversation_id", FieldKind::Identifier)
                .optional_field("channel_message_id", FieldKind::String)
                .field("status", an_enum("message_status"))
                .optional_field("error_message", FieldKind::String)
                .field("timestamp", FieldKind::Timestamp),
        )
        .with_record(
            RecordDescriptor::new("messaging.conversation")
                .field("id", FieldKind::Identifier)
                .field("participants", list(FieldKind::String))
                .optional_field("status", an_enum("conversation_status"))
                .field("started_at", FieldKind::Timestamp)
                .optional_field("last_activity_at", FieldKind::Timestamp)
                .optional_field("messages", list(record("messaging.message")))
                .optional_field("schema_version", FieldKind::String),
        )
        .with_record(
            RecordDescriptor::new("messaging.template_button")
                .field("id", FieldKind::String)
                .field("title", FieldKind::String),
        )
        .with_record(
            RecordDescriptor::new("messaging.template")
                .field("name", FieldKind::String)
                .optional_field("language", FieldKind::String)
                .optional_field("category", FieldKind::String)
                .field("body", FieldKind::String)
                .optional_field("buttons", list(record("messaging.template_button"))),
        )
        .with_record(
            RecordDescriptor::new("events.platform_event")
                .field("event_id", FieldKind::Identifier)
                .field("event_type", FieldKind::String)
                .field("source_system", an_enum("source_system"))
                .field("tenant_id", FieldKind::Identifier)
                .field("timestamp", FieldKind::Timestamp)
                .optional_field("payload", FieldKind::Any)
                .optional_field("correlation_id", FieldKind::String)
                .optional_field("schema_version", FieldKind::String),
        )
        .with_record(
            RecordDescriptor::new("events.audit_event")
                .field("audit_id", FieldKind::Identifier)
                .field("event_type", FieldKind::String)
                .field("actor_id", FieldKind::Identifier)
                .optional_field("actor_type", FieldKind::String)
                .field("tenant_id", FieldKind::Identifier)
                .field("resource_type", FieldKind::String)
                .field("resource_id", FieldKind::String)
                .field("action", FieldKind::String)
                .optional_field("before_state", FieldKind::Map)
                .optional_field("after_state", FieldKind::Map)
                .optional_field("metadata", FieldKind::Map)
                .field("timestamp", FieldKind::Timestamp)
                .optional_field("ip_address", FieldKind::String)
                .optional_field("schema_version", FieldKind::String),
        )
        .with_record(
            RecordDescriptor::new("tax.compute_request")
                .field("tenant_id", FieldKind::Identifier)
                .field("client_id", FieldKind::Identifier)
                .field("tax_year", FieldKind::Integer)
                .field("as_of_month", FieldKind::Integer)
                .field("filing_type", an_enum("tax_filing_type"))
                .field("entity_type", an_enum("entity_type"))
                .field("state", FieldKind::String)
                .field("gross_receipts_ytd", money())
                .field("cost_of_goods_sold_ytd", money())
                .field("total_expenses_ytd", money())
                .field("estimated_payments_ytd", money())
                .optional_field("qbi_eligible", FieldKind::Bool)
                .optional_field("schema_version", FieldKind::String),
        )
        .with_record(
            RecordDescriptor::new("tax.quarterly_payment")
                .field("quarter", FieldKind::Integer)
                .optional_field("due_date", FieldKind::String)
                .field("federal_amount", money())
                .field("state_amount", money())
                .field("total_amount", money())
                .optional_field("status", an_enum("payment_status")),
        )
        .with_record(
            RecordDescriptor::new("tax.compute_response")
                .field("tenant_id", FieldKind::Identifier)
                .field("client_id", FieldKind::Identifier)
                .field("tax_year", FieldKind::Integer)
                .field("as_of_month", FieldKind::Integer)
                .field("projected_net_income", money())
                .field("total_federal_tax", money())
                .field("total_state_tax", money())
                .field("total_self_employment_tax", money())
                .field("total_tax_liability", money())
                .field("effective_tax_rate", FieldKind::Float)
                .field("marginal_tax_rate", FieldKind::Float)
                .field("qbi_deduction", money())
                .optional_field("quarterly_payments", list(record("tax.quarterly_payment")))
                .optional_field("engine_version", FieldKind::String)
                .optional_field("schema_version", FieldKind::String),
        )
        .with_enum(
            EnumDescriptor::new("account_type")
                .variant("asset")
                .variant("liability")
                .variant("equity")
                .variant("revenue")
                .variant("expense")
                .variant("cost_of_goods_sold")
                .variant("other_income")
                .variant("other_expense"),
        )
        .with_enum(
            EnumDescriptor::new("transaction_type")
                .variant("debit")
                .variant("credit"),
        )
        .with_enum(
            EnumDescriptor::new("bank_account_type")
                .variant("checking")
                .variant("savings")
                .variant("credit_card")
                .variant("line_of_credit")
                .variant("loan")
                .variant("other"),
        )
        .with_enum(
            EnumDescriptor::new("transaction_status")
                .variant("pending")
                .variant("classified")
                .variant("posted")
                .variant("in_suspense")
                .variant("excluded"),
        )
        .with_enum(
            EnumDescriptor::new("suspense_reason")
                .variant("low_confidence")
                .variant("needs_client_input")
                .variant("monthly_call")
                .variant("declined")
                .variant("escalated_max_clarification"),
        )
        .with_enum(
            EnumDescriptor::new("risk_severity")
                .variant("low")
                .variant("medium")
                .variant("high")
                .variant("critical"),
        )
        .with_enum(
            EnumDescriptor::new("confidence_band")
                .variant("high")
                .variant("medium")
                .variant("low")
                .variant("uncertain"),
        )
        .with_enum(
            EnumDescriptor::new("classification_source")
                .variant("rule")
                .variant("ai")
                .variant("historical")
                .variant("client")
                .variant("accountant"),
        )
        .with_enum(
            EnumDescriptor::new("review_status")
                .variant("pending")
                .variant("approved")
                .variant("rejected")
                .variant("modified")
                .variant("auto_applied"),
        )
        .with_enum(
            EnumDescriptor::new("message_direction")
                .variant("inbound")
                .variant("outbound"),
        )
        .with_enum(
            EnumDescriptor::new("message_status")
                .variant("queued")
                .variant("sent")
                .variant("delivered")
                .variant("read")
                .variant("failed"),
        )
        .with_enum(
            EnumDescriptor::new("channel")
                .variant("whatsapp")
                .variant("sms")
                .variant("email"),
        )
        .with_enum(
            EnumDescriptor::new("conversation_status")
                .variant("active")
                .variant("waiting_reply")
                .variant("timed_out")
                .variant("completed"),
        )
        .with_enum(
            EnumDescriptor::new("source_system")
                .variant("hub")
                .variant("qbo_leg")
                .variant("gl_leg")
                .variant("ai_translator")
                .variant("messaging")
                .variant("tax_engine"),
        )
        .with_enum(
            EnumDescriptor::new("entity_type")
                .variant("sole_proprietor")
                .variant("llc")
                .variant("s_corp")
                .variant("c_corp")
                .variant("partnership"),
        )
        .with_enum(
            EnumDescriptor::new("tax_filing_type")
                .variant("schedule_c")
                .variant("form_1120s")
                .variant("form_1120")
                .variant("form_1065"),
        )
        .with_enum(
            EnumDescriptor::new("payment_status")
                .variant("upcoming")
                .variant("due")
                .variant("paid"),
        )
}
