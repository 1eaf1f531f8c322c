//! Account nodes of the four-level chart of accounts

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Position of a node in the chart, root to leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccountLevel {
    ControlGroup,
    SubControlGroup,
    ControlAccount,
    LedgerAccount,
}

impl AccountLevel {
    /// 1-based depth, which is also the number of segments in the node's code
    pub fn depth(&self) -> usize {
        match self {
            AccountLevel::ControlGroup => 1,
            AccountLevel::SubControlGroup => 2,
            AccountLevel::ControlAccount => 3,
            AccountLevel::LedgerAccount => 4,
        }
    }

    /// Level a parent must have, `None` for the root level
    pub fn parent_level(&self) -> Option<AccountLevel> {
        match self {
            AccountLevel::ControlGroup => None,
            AccountLevel::SubControlGroup => Some(AccountLevel::ControlGroup),
            AccountLevel::ControlAccount => Some(AccountLevel::SubControlGroup),
            AccountLevel::LedgerAccount => Some(AccountLevel::ControlAccount),
        }
    }

    /// Levels 1-3 hold children; ledger accounts hold balances
    pub fn is_group(&self) -> bool {
        !matches!(self, AccountLevel::LedgerAccount)
    }

    pub(crate) fn id_prefix(&self) -> &'static str {
        match self {
            AccountLevel::ControlGroup => "cg",
            AccountLevel::SubControlGroup => "scg",
            AccountLevel::ControlAccount => "ca",
            AccountLevel::LedgerAccount => "la",
        }
    }
}

/// Level 1: root of the hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlGroup {
    pub id: String,
    pub code: String,
    pub name: String,
    /// Nature of every account below this group
    pub account_type: AccountType,
}

/// Level 2
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubControlGroup {
    pub id: String,
    pub code: String,
    pub name: String,
    pub control_group_id: String,
}

/// Level 3
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlAccount {
    pub id: String,
    pub code: String,
    pub name: String,
    pub sub_control_group_id: String,
}

/// Level 4: the only level vouchers post to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerAccount {
    pub id: String,
    pub code: String,
    pub name: String,
    pub control_account_id: String,
    /// Signed balance, debit-positive
    pub balance: BigDecimal,
    /// Whether vouchers may post to this account
    pub can_post: bool,
    /// ISO currency code
    pub currency: String,
}

impl LedgerAccount {
    /// Apply one journal line: debits raise the balance, credits lower it
    pub fn apply(&mut self, debit: &BigDecimal, credit: &BigDecimal) {
        self.balance = &self.balance + debit - credit;
    }

    /// Side the balance currently sits on, `None` when zero
    pub fn balance_side(&self) -> Option<EntryType> {
        let zero = zero();
        if self.balance > zero {
            Some(EntryType::Debit)
        } else if self.balance < zero {
            Some(EntryType::Credit)
        } else {
            None
        }
    }
}

/// A node of the chart, discriminated by level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum AccountNode {
    ControlGroup(ControlGroup),
    SubControlGroup(SubControlGroup),
    ControlAccount(ControlAccount),
    LedgerAccount(LedgerAccount),
}

impl AccountNode {
    pub fn level(&self) -> AccountLevel {
        match self {
            AccountNode::ControlGroup(_) => AccountLevel::ControlGroup,
            AccountNode::SubControlGroup(_) => AccountLevel::SubControlGroup,
            AccountNode::ControlAccount(_) => AccountLevel::ControlAccount,
            AccountNode::LedgerAccount(_) => AccountLevel::LedgerAccount,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            AccountNode::ControlGroup(n) => &n.id,
            AccountNode::SubControlGroup(n) => &n.id,
            AccountNode::ControlAccount(n) => &n.id,
            AccountNode::LedgerAccount(n) => &n.id,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            AccountNode::ControlGroup(n) => &n.code,
            AccountNode::SubControlGroup(n) => &n.code,
            AccountNode::ControlAccount(n) => &n.code,
            AccountNode::LedgerAccount(n) => &n.code,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AccountNode::ControlGroup(n) => &n.name,
            AccountNode::SubControlGroup(n) => &n.name,
            AccountNode::ControlAccount(n) => &n.name,
            AccountNode::LedgerAccount(n) => &n.name,
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        match self {
            AccountNode::ControlGroup(n) => n.name = name,
            AccountNode::SubControlGroup(n) => n.name = name,
            AccountNode::ControlAccount(n) => n.name = name,
            AccountNode::LedgerAccount(n) => n.name = name,
        }
    }

    /// Id of the parent node, `None` for control groups
    pub fn parent_id(&self) -> Option<&str> {
        match self {
            AccountNode::ControlGroup(_) => None,
            AccountNode::SubControlGroup(n) => Some(&n.control_group_id),
            AccountNode::ControlAccount(n) => Some(&n.sub_control_group_id),
            AccountNode::LedgerAccount(n) => Some(&n.control_account_id),
        }
    }

    pub fn as_ledger(&self) -> Option<&LedgerAccount> {
        match self {
            AccountNode::LedgerAccount(ledger) => Some(ledger),
            _ => None,
        }
    }

    pub fn as_ledger_mut(&mut self) -> Option<&mut LedgerAccount> {
        match self {
            AccountNode::LedgerAccount(ledger) => Some(ledger),
            _ => None,
        }
    }
}

impl From<ControlGroup> for AccountNode {
    fn from(node: ControlGroup) -> Self {
        AccountNode::ControlGroup(node)
    }
}

impl From<SubControlGroup> for AccountNode {
    fn from(node: SubControlGroup) -> Self {
        AccountNode::SubControlGroup(node)
    }
}

impl From<ControlAccount> for AccountNode {
    fn from(node: ControlAccount) -> Self {
        AccountNode::ControlAccount(node)
    }
}

impl From<LedgerAccount> for AccountNode {
    fn from(node: LedgerAccount) -> Self {
        AccountNode::LedgerAccount(node)
    }
}

/// Form input for a new node
#[derive(Debug, Clone, PartialEq)]
pub struct NewNode {
    pub level: AccountLevel,
    pub parent_id: Option<String>,
    pub code: String,
    pub name: String,
    /// Required for control groups, ignored elsewhere
    pub account_type: Option<AccountType>,
    /// Ledger only
    pub opening_balance: BigDecimal,
    /// Ledger only
    pub can_post: bool,
    /// Ledger only; the configured base currency when `None`
    pub currency: Option<String>,
}

impl NewNode {
    fn new(level: AccountLevel, parent_id: Option<String>, code: String, name: String) -> Self {
        Self {
            level,
            parent_id,
            code,
            name,
            account_type: None,
            opening_balance: zero(),
            can_post: true,
            currency: None,
        }
    }

    pub fn control_group(code: String, name: String, account_type: AccountType) -> Self {
        let mut node = Self::new(AccountLevel::ControlGroup, None, code, name);
        node.account_type = Some(account_type);
        node
    }

    pub fn sub_control_group(control_group_id: String, code: String, name: String) -> Self {
        Self::new(
            AccountLevel::SubControlGroup,
            Some(control_group_id),
            code,
            name,
        )
    }

    pub fn control_account(sub_control_group_id: String, code: String, name: String) -> Self {
        Self::new(
            AccountLevel::ControlAccount,
            Some(sub_control_group_id),
            code,
            name,
        )
    }

    pub fn ledger_account(control_account_id: String, code: String, name: String) -> Self {
        Self::new(
            AccountLevel::LedgerAccount,
            Some(control_account_id),
            code,
            name,
        )
    }

    pub fn with_opening_balance(mut self, balance: BigDecimal) -> Self {
        self.opening_balance = balance;
        self
    }

    pub fn with_currency(mut self, currency: String) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Mark a ledger as a summary account vouchers cannot post to
    pub fn posting_disabled(mut self) -> Self {
        self.can_post = false;
        self
    }
}
