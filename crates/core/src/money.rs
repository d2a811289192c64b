//! Money and currency value objects.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ContractResult, ValidationError};

/// ISO 4217 currency code: exactly three ASCII uppercase letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> ContractResult<Self> {
        let code = code.into();
        let well_formed = code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase());
        if !well_formed {
            return Err(ValidationError::type_mismatch(
                "currency",
                format!("'{code}' is not a 3-letter ISO 4217 currency code"),
            ));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// US dollar, the platform's default settlement currency.
    pub fn usd() -> Self {
        Self("USD".to_string())
    }
}

impl core::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for CurrencyCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

/// Monetary amount in integer minor units (e.g. cents) plus currency.
///
/// Wire form: `{"amount": <integer>, "currency": "USD"}`. A fractional
/// amount is rejected at construction; the minor-unit exponent of the
/// currency is out of scope here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMoney")]
pub struct Money {
    pub amount: i64,
    pub currency: CurrencyCode,
}

impl Money {
    pub fn new(amount: i64, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Zero in the given currency (additive identity for `checked_add`).
    pub fn zero(currency: CurrencyCode) -> Self {
        Self::new(0, currency)
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Add two amounts of the same currency.
    ///
    /// Fails on currency mismatch and on amount overflow; mixed-currency
    /// arithmetic is never performed implicitly.
    pub fn checked_add(&self, other: &Money) -> ContractResult<Money> {
        self.same_currency(other)?;
        let amount = self.amount.checked_add(other.amount).ok_or_else(|| {
            ValidationError::invariant("amount", "amount overflow in addition")
        })?;
        Ok(Money::new(amount, self.currency.clone()))
    }

    /// Subtract an amount of the same currency. See [`Money::checked_add`].
    pub fn checked_sub(&self, other: &Money) -> ContractResult<Money> {
        self.same_currency(other)?;
        let amount = self.amount.checked_sub(other.amount).ok_or_else(|| {
            ValidationError::invariant("amount", "amount overflow in subtraction")
        })?;
        Ok(Money::new(amount, self.currency.clone()))
    }

    fn same_currency(&self, other: &Money) -> ContractResult<()> {
        if self.currency != other.currency {
            return Err(ValidationError::invariant(
                "currency",
                format!(
                    "currency mismatch: {} vs {}",
                    self.currency, other.currency
                ),
            ));
        }
        Ok(())
    }
}

impl crate::contract::Contract for Money {}

/// Decode-side shadow of [`Money`].
///
/// `amount` lands as an arbitrary JSON number first so a fractional value is
/// reported as a type mismatch on the `amount` field rather than a generic
/// decode failure.
#[derive(Debug, Deserialize)]
struct RawMoney {
    amount: serde_json::Number,
    currency: CurrencyCode,
}

impl TryFrom<RawMoney> for Money {
    type Error = ValidationError;

    fn try_from(raw: RawMoney) -> Result<Self, Self::Error> {
        let amount = raw.amount.as_i64().ok_or_else(|| {
            ValidationError::type_mismatch(
                "amount",
                format!("expected integer minor units, got {}", raw.amount),
            )
        })?;
        Ok(Money::new(amount, raw.currency))
    }
}
