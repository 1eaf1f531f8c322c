//! Structural rules of the chart of accounts
//!
//! Every function here works on a caller-owned slice of nodes and holds no
//! state of its own. [`ChartManager`](super::ChartManager) applies the same
//! rules against a [`BookStorage`](crate::traits::BookStorage).

use std::collections::BTreeMap;

use bigdecimal::BigDecimal;

use super::node::*;
use crate::config::BooksConfig;
use crate::types::*;

/// Validate a draft against the existing chart and build the new node
///
/// Fails when the code or name is empty, when the parent is missing or sits
/// at the wrong level, when the code is already taken, and (if enforced)
/// when the code does not extend the parent's code by one segment.
pub fn create_node(
    nodes: &[AccountNode],
    draft: NewNode,
    config: &BooksConfig,
) -> BookResult<AccountNode> {
    let code = draft.code.trim().to_string();
    let name = draft.name.trim().to_string();

    if code.is_empty() {
        return Err(BookError::validation("Account code cannot be empty"));
    }

    if name.is_empty() {
        return Err(BookError::validation("Account name cannot be empty"));
    }

    let parent = match (draft.level.parent_level(), draft.parent_id.as_deref()) {
        (None, None) => None,
        (None, Some(_)) => {
            return Err(BookError::validation(
                "A control group cannot have a parent",
            ));
        }
        (Some(expected), parent_id) => {
            let parent_id = parent_id.unwrap_or_default();
            let parent = find_node(nodes, parent_id).ok_or_else(|| {
                BookError::Validation(format!(
                    "Parent '{}' does not exist",
                    parent_id
                ))
            })?;
            if parent.level() != expected {
                return Err(BookError::Validation(format!(
                    "Parent '{}' is a {:?}, expected a {:?}",
                    parent_id,
                    parent.level(),
                    expected
                )));
            }
            Some(parent)
        }
    };

    if nodes.iter().any(|n| n.code() == code) {
        return Err(BookError::Validation(format!(
            "Account code '{}' is already in use",
            code
        )));
    }

    if config.enforce_code_convention {
        validate_code_position(&code, draft.level, parent.map(|p| p.code()))?;
    }

    let id = format!("{}-{}", draft.level.id_prefix(), uuid::Uuid::new_v4());
    let parent_id = parent.map(|p| p.id().to_string()).unwrap_or_default();

    let node = match draft.level {
        AccountLevel::ControlGroup => {
            let account_type = draft.account_type.ok_or_else(|| {
                BookError::validation("A control group requires an account type")
            })?;
            AccountNode::ControlGroup(ControlGroup {
                id,
                code,
                name,
                account_type,
            })
        }
        AccountLevel::SubControlGroup => AccountNode::SubControlGroup(SubControlGroup {
            id,
            code,
            name,
            control_group_id: parent_id,
        }),
        AccountLevel::ControlAccount => AccountNode::ControlAccount(ControlAccount {
            id,
            code,
            name,
            sub_control_group_id: parent_id,
        }),
        AccountLevel::LedgerAccount => {
            let currency = draft
                .currency
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| config.base_currency.clone());
            AccountNode::LedgerAccount(LedgerAccount {
                id,
                code,
                name,
                control_account_id: parent_id,
                balance: draft.opening_balance,
                can_post: draft.can_post,
                currency,
            })
        }
    };

    Ok(node)
}

/// Check the dotted-segment convention: `depth` non-empty segments, prefixed
/// by the parent's code
pub fn validate_code_position(
    code: &str,
    level: AccountLevel,
    parent_code: Option<&str>,
) -> BookResult<()> {
    let segments: Vec<&str> = code.split('.').collect();

    if segments.iter().any(|s| s.is_empty()) {
        return Err(BookError::Validation(format!(
            "Account code '{}' has an empty segment",
            code
        )));
    }

    if segments.len() != level.depth() {
        return Err(BookError::Validation(format!(
            "Account code '{}' has {} segment(s), a {:?} needs {}",
            code,
            segments.len(),
            level,
            level.depth()
        )));
    }

    if let Some(parent_code) = parent_code {
        if !code.starts_with(&format!("{}.", parent_code)) {
            return Err(BookError::Validation(format!(
                "Account code '{}' must extend parent code '{}'",
                code, parent_code
            )));
        }
    }

    Ok(())
}

/// Guard a deletion without performing it
pub fn check_deletion(nodes: &[AccountNode], node: &AccountNode) -> BookResult<()> {
    match node {
        AccountNode::LedgerAccount(ledger) => {
            if ledger.balance != zero() {
                return Err(BookError::NonZeroBalance {
                    id: ledger.id.clone(),
                    balance: ledger.balance.clone(),
                });
            }
        }
        _ => {
            let children = nodes
                .iter()
                .filter(|n| n.parent_id() == Some(node.id()))
                .count();
            if children > 0 {
                return Err(BookError::HasChildren {
                    id: node.id().to_string(),
                    children,
                });
            }
        }
    }

    Ok(())
}

/// Remove a node after its deletion guard passes
pub fn delete_node(nodes: &mut Vec<AccountNode>, id: &str) -> BookResult<AccountNode> {
    let position = nodes
        .iter()
        .position(|n| n.id() == id)
        .ok_or_else(|| BookError::NotFound(format!("account '{}'", id)))?;

    check_deletion(nodes.as_slice(), &nodes[position])?;

    Ok(nodes.remove(position))
}

/// Direct children of a node, ordered by code
pub fn list_children<'a>(nodes: &'a [AccountNode], parent_id: &str) -> Vec<&'a AccountNode> {
    let mut children: Vec<&AccountNode> = nodes
        .iter()
        .filter(|n| n.parent_id() == Some(parent_id))
        .collect();
    children.sort_by(|a, b| a.code().cmp(b.code()));
    children
}

/// Control groups, ordered by code
pub fn list_roots(nodes: &[AccountNode]) -> Vec<&AccountNode> {
    let mut roots: Vec<&AccountNode> = nodes
        .iter()
        .filter(|n| n.level() == AccountLevel::ControlGroup)
        .collect();
    roots.sort_by(|a, b| a.code().cmp(b.code()));
    roots
}

pub fn find_node<'a>(nodes: &'a [AccountNode], id: &str) -> Option<&'a AccountNode> {
    nodes.iter().find(|n| n.id() == id)
}

/// Nodes from the control group down to `id`
pub fn account_path<'a>(nodes: &'a [AccountNode], id: &str) -> BookResult<Vec<&'a AccountNode>> {
    let mut path = Vec::new();
    let mut current = Some(id);

    while let Some(id) = current {
        let node =
            find_node(nodes, id).ok_or_else(|| BookError::NotFound(format!("account '{}'", id)))?;
        // a well-formed chart is never deeper than a ledger
        if path.len() >= AccountLevel::LedgerAccount.depth() {
            return Err(BookError::Validation(format!(
                "Account '{}' has a cyclic parent chain",
                node.id()
            )));
        }
        current = node.parent_id();
        path.insert(0, node);
    }

    Ok(path)
}

/// Account type of a node, taken from its control group
pub fn account_type_of(nodes: &[AccountNode], id: &str) -> BookResult<AccountType> {
    let path = account_path(nodes, id)?;
    match path.first() {
        Some(AccountNode::ControlGroup(root)) => Ok(root.account_type),
        _ => Err(BookError::Validation(format!(
            "Account '{}' is not rooted in a control group",
            id
        ))),
    }
}

/// Sum of descendant ledger balances for every group node
///
/// Groups without ledgers below them report zero.
pub fn group_balances(nodes: &[AccountNode]) -> BookResult<BTreeMap<String, BigDecimal>> {
    let mut totals: BTreeMap<String, BigDecimal> = nodes
        .iter()
        .filter(|n| n.level().is_group())
        .map(|n| (n.id().to_string(), zero()))
        .collect();

    for ledger in nodes.iter().filter_map(AccountNode::as_ledger) {
        for ancestor in account_path(nodes, &ledger.id)? {
            if let Some(total) = totals.get_mut(ancestor.id()) {
                *total += &ledger.balance;
            }
        }
    }

    Ok(totals)
}
