//! Tax estimate request/response records (mirror of the tax engine API).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use contracts_core::{
    ClientId, Contract, ContractResult, Money, SchemaVersion, TenantId, ValidationError,
};

/// Legal entity type of the filer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    SoleProprietor,
    Llc,
    SCorp,
    CCorp,
    Partnership,
}

/// Federal filing form the estimate is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxFilingType {
    ScheduleC,
    #[serde(rename = "form_1120s")]
    Form1120s,
    #[serde(rename = "form_1120")]
    Form1120,
    #[serde(rename = "form_1065")]
    Form1065,
}

/// Status of a quarterly estimated payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Upcoming,
    Due,
    Paid,
}

/// Calendar month, `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(u8);

impl Month {
    pub fn new(value: u8) -> ContractResult<Self> {
        if !(1..=12).contains(&value) {
            return Err(ValidationError::type_mismatch(
                "as_of_month",
                format!("expected a month in 1..=12, got {value}"),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Month {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(value: Month) -> Self {
        value.0
    }
}

/// Estimated-tax quarter, `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quarter(u8);

impl Quarter {
    pub fn new(value: u8) -> ContractResult<Self> {
        if !(1..=4).contains(&value) {
            return Err(ValidationError::type_mismatch(
                "quarter",
                format!("expected a quarter in 1..=4, got {value}"),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Quarter {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quarter> for u8 {
    fn from(value: Quarter) -> Self {
        value.0
    }
}

/// Tax rate in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rate(f64);

impl Rate {
    pub fn new(value: f64) -> ContractResult<Self> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::type_mismatch(
                "rate",
                format!("expected a rate in [0, 1], got {value}"),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Rate {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rate> for f64 {
    fn from(value: Rate) -> Self {
        value.0
    }
}

/// Request to compute estimated taxes for a client year-to-date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputeRequest {
    pub tenant_id: TenantId,
    pub client_id: ClientId,
    pub tax_year: i32,
    pub as_of_month: Month,
    pub filing_type: TaxFilingType,
    pub entity_type: EntityType,
    /// State jurisdiction, two-letter USPS code (e.g. "CA").
    pub state: String,
    pub gross_receipts_ytd: Money,
    pub cost_of_goods_sold_ytd: Money,
    pub total_expenses_ytd: Money,
    pub estimated_payments_ytd: Money,
    #[serde(default = "default_true")]
    pub qbi_eligible: bool,
    #[serde(default, skip_serializing_if = "SchemaVersion::is_baseline")]
    pub schema_version: SchemaVersion,
}

fn default_true() -> bool {
    true
}

impl Contract for TaxComputeRequest {}

/// Single quarterly estimated payment.
///
/// Invariant: `total_amount` equals `federal_amount + state_amount` in one
/// currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuarterlyPayment")]
pub struct QuarterlyPayment {
    quarter: Quarter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
    federal_amount: Money,
    state_amount: Money,
    total_amount: Money,
    #[serde(default = "default_payment_status")]
    status: PaymentStatus,
}

fn default_payment_status() -> PaymentStatus {
    PaymentStatus::Upcoming
}

impl QuarterlyPayment {
    /// Build a payment row; the total is the validated sum of the parts.
    pub fn new(quarter: Quarter, federal_amount: Money, state_amount: Money) -> ContractResult<Self> {
        let total_amount = federal_amount.checked_add(&state_amount)?;
        Ok(Self {
            quarter,
            due_date: None,
            federal_amount,
            state_amount,
            total_amount,
            status: default_payment_status(),
        })
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn quarter(&self) -> Quarter {
        self.quarter
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn federal_amount(&self) -> &Money {
        &self.federal_amount
    }

    pub fn state_amount(&self) -> &Money {
        &self.state_amount
    }

    pub fn total_amount(&self) -> &Money {
        &self.total_amount
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }
}

impl Contract for QuarterlyPayment {}

#[derive(Debug, Deserialize)]
struct RawQuarterlyPayment {
    quarter: Quarter,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    federal_amount: Money,
    state_amount: Money,
    total_amount: Money,
    #[serde(default = "default_payment_status")]
    status: PaymentStatus,
}

impl TryFrom<RawQuarterlyPayment> for QuarterlyPayment {
    type Error = ValidationError;

    fn try_from(raw: RawQuarterlyPayment) -> Result<Self, Self::Error> {
        let expected = raw.federal_amount.checked_add(&raw.state_amount)?;
        if raw.total_amount != expected {
            return Err(ValidationError::invariant(
                "total_amount",
                "total_amount must equal federal_amount + state_amount",
            ));
        }
        Ok(Self {
            quarter: raw.quarter,
            due_date: raw.due_date,
            federal_amount: raw.federal_amount,
            state_amount: raw.state_amount,
            total_amount: raw.total_amount,
            status: raw.status,
        })
    }
}

/// Computed estimate returned by the tax engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxComputeResponse {
    pub tenant_id: TenantId,
    pub client_id: ClientId,
    pub tax_year: i32,
    pub as_of_month: Month,
    pub projected_net_income: Money,
    pub total_federal_tax: Money,
    pub total_state_tax: Money,
    pub total_self_employment_tax: Money,
    pub total_tax_liability: Money,
    pub effective_tax_rate: Rate,
    pub marginal_tax_rate: Rate,
    pub qbi_deduction: Money,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quarterly_payments: Vec<QuarterlyPayment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_version: Option<String>,
    #[serde(default, skip_serializing_if = "SchemaVersion::is_baseline")]
    pub schema_version: SchemaVersion,
}

impl Contract for TaxComputeResponse {}
