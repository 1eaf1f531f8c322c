//! Chart-of-accounts operations against a storage backend

use tracing::{debug, info, warn};

use super::hierarchy;
use super::node::*;
use crate::config::BooksConfig;
use crate::traits::*;
use crate::types::*;

/// Account manager for handling chart of accounts operations
pub struct ChartManager<S: BookStorage> {
    pub(crate) storage: S,
    validator: Box<dyn NodeValidator>,
    config: BooksConfig,
}

impl<S: BookStorage> ChartManager<S> {
    /// Create a new chart manager
    pub fn new(storage: S, config: BooksConfig) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultNodeValidator),
            config,
        }
    }

    /// Create a new chart manager with a custom validator
    pub fn with_validator(
        storage: S,
        config: BooksConfig,
        validator: Box<dyn NodeValidator>,
    ) -> Self {
        Self {
            storage,
            validator,
            config,
        }
    }

    /// Create a node under its parent
    pub async fn create_node(&mut self, draft: NewNode) -> BookResult<AccountNode> {
        let nodes = self.storage.list_nodes(None).await?;

        let node = hierarchy::create_node(&nodes, draft, &self.config).inspect_err(|e| {
            warn!(error = %e, "account creation rejected");
        })?;
        self.validator.validate_node(&node)?;

        self.storage.save_node(&node).await?;
        info!(id = node.id(), code = node.code(), level = ?node.level(), "account created");

        Ok(node)
    }

    /// Get a node by ID
    pub async fn get_node(&self, id: &str) -> BookResult<Option<AccountNode>> {
        self.storage.get_node(id).await
    }

    /// Get a node by ID, returning an error if not found
    pub async fn get_node_required(&self, id: &str) -> BookResult<AccountNode> {
        self.storage
            .get_node(id)
            .await?
            .ok_or_else(|| BookError::NotFound(format!("account '{}'", id)))
    }

    /// Get a ledger account by ID; other levels are rejected
    pub async fn get_ledger_required(&self, id: &str) -> BookResult<LedgerAccount> {
        match self.get_node_required(id).await? {
            AccountNode::LedgerAccount(ledger) => Ok(ledger),
            other => Err(BookError::Validation(format!(
                "Account '{}' is a {:?}, not a ledger account",
                id,
                other.level()
            ))),
        }
    }

    /// List every node
    pub async fn list_nodes(&self) -> BookResult<Vec<AccountNode>> {
        self.storage.list_nodes(None).await
    }

    /// List ledger accounts ordered by code
    pub async fn list_ledgers(&self) -> BookResult<Vec<LedgerAccount>> {
        let mut ledgers: Vec<LedgerAccount> = self
            .storage
            .list_nodes(Some(AccountLevel::LedgerAccount))
            .await?
            .into_iter()
            .filter_map(|node| match node {
                AccountNode::LedgerAccount(ledger) => Some(ledger),
                _ => None,
            })
            .collect();
        ledgers.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(ledgers)
    }

    /// Children of a node ordered by code
    pub async fn list_children(&self, parent_id: &str) -> BookResult<Vec<AccountNode>> {
        let nodes = self.storage.list_nodes(None).await?;
        Ok(hierarchy::list_children(&nodes, parent_id)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Control groups ordered by code
    pub async fn list_roots(&self) -> BookResult<Vec<AccountNode>> {
        let nodes = self.storage.list_nodes(Some(AccountLevel::ControlGroup)).await?;
        Ok(hierarchy::list_roots(&nodes).into_iter().cloned().collect())
    }

    /// Path from the control group down to the node
    pub async fn account_path(&self, id: &str) -> BookResult<Vec<AccountNode>> {
        let nodes = self.storage.list_nodes(None).await?;
        Ok(hierarchy::account_path(&nodes, id)?
            .into_iter()
            .cloned()
            .collect())
    }

    /// Rename a node; code and position stay fixed
    pub async fn rename_node(&mut self, id: &str, name: String) -> BookResult<AccountNode> {
        let mut node = self.get_node_required(id).await?;
        node.set_name(name.trim().to_string());
        self.validator.validate_node(&node)?;

        self.storage.update_node(&node).await?;
        debug!(id, name = node.name(), "account renamed");

        Ok(node)
    }

    /// Persist a ledger whose balance changed
    pub(crate) async fn update_ledger(&mut self, ledger: LedgerAccount) -> BookResult<()> {
        self.storage
            .update_node(&AccountNode::LedgerAccount(ledger))
            .await
    }

    /// Delete a node once it has no children (groups) or a zero balance (ledgers)
    pub async fn delete_node(&mut self, id: &str) -> BookResult<AccountNode> {
        let node = self.get_node_required(id).await?;
        let nodes = self.storage.list_nodes(None).await?;

        hierarchy::check_deletion(&nodes, &node).inspect_err(|e| {
            warn!(id, error = %e, "account deletion rejected");
        })?;

        self.storage.delete_node(id).await?;
        info!(id, code = node.code(), "account deleted");

        Ok(node)
    }
}
