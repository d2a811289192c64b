//! Chart-of-accounts records.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use contracts_core::{AccountId, Contract, ContractResult, ValidationError};

/// High-level account type (determines normal balance side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
    CostOfGoodsSold,
    OtherIncome,
    OtherExpense,
}

/// Chart-of-accounts node.
///
/// `parent_id` forms a tree; the no-cycle invariant is enforced by
/// [`ChartOfAccounts`], which owns the whole hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub account_type: AccountType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_c_line: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<AccountId>,
}

fn default_true() -> bool {
    true
}

impl Account {
    pub fn new(id: AccountId, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id,
            name: name.into(),
            account_type,
            sub_type: None,
            account_number: None,
            schedule_c_line: None,
            is_active: true,
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: AccountId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

impl Contract for Account {}

/// Validated account hierarchy.
///
/// Invariants: account ids are unique, every `parent_id` resolves, and the
/// parent graph is a tree (no cycles). Wire form is a plain array of
/// accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Account>", into = "Vec<Account>")]
pub struct ChartOfAccounts {
    accounts: BTreeMap<AccountId, Account>,
}

impl ChartOfAccounts {
    pub fn new(accounts: Vec<Account>) -> ContractResult<Self> {
        Self::try_from(accounts)
    }

    pub fn get(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn parent_of(&self, id: &AccountId) -> Option<&Account> {
        self.get(id)
            .and_then(|a| a.parent_id.as_ref())
            .and_then(|p| self.get(p))
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Contract for ChartOfAccounts {}

impl TryFrom<Vec<Account>> for ChartOfAccounts {
    type Error = ValidationError;

    fn try_from(accounts: Vec<Account>) -> Result<Self, Self::Error> {
        let mut by_id: BTreeMap<AccountId, Account> = BTreeMap::new();
        for account in accounts {
            let id = account.id.clone();
            if by_id.insert(id.clone(), account).is_some() {
                return Err(ValidationError::invariant(
                    "accounts",
                    format!("duplicate account id {id}"),
                ));
            }
        }

        for (id, account) in &by_id {
            if let Some(parent) = &account.parent_id {
                if !by_id.contains_key(parent) {
                    return Err(ValidationError::invariant(
                        format!("accounts.{id}.parent_id"),
                        format!("unknown parent account {parent}"),
                    ));
                }
            }
        }

        // Tree check: every parent chain must terminate without revisits.
        for id in by_id.keys() {
            let mut seen: HashSet<&AccountId> = HashSet::new();
            seen.insert(id);
            let mut current = by_id[id].parent_id.as_ref();
            while let Some(parent) = current {
                if !seen.insert(parent) {
                    return Err(ValidationError::invariant(
                        "accounts",
                        format!("account hierarchy cycle involving {parent}"),
                    ));
                }
                current = by_id.get(parent).and_then(|a| a.parent_id.as_ref());
            }
        }

        Ok(Self { accounts: by_id })
    }
}

impl From<ChartOfAccounts> for Vec<Account> {
    fn from(value: ChartOfAccounts) -> Self {
        value.accounts.into_values().collect()
    }
}
