//! # Budget Book
//!
//! Owner-scoped category budgets. Spend accrual happens in the expense
//! book; progress math lives on the core `Budget` type.

use std::sync::Arc;

use tracing::info;

use shopkeep_core::types::{Budget, NewBudget};
use shopkeep_core::validation::{validate_category, validate_price_cents};
use shopkeep_store::RemoteStore;

use crate::config::{retry_read, write_once, ClientConfig};
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// The owner's budgets.
pub struct BudgetBook {
    store: Arc<dyn RemoteStore>,
    session: Session,
    config: ClientConfig,
}

impl BudgetBook {
    /// Creates a book with the default timeout policy.
    pub fn new(store: Arc<dyn RemoteStore>, session: Session) -> Self {
        BudgetBook::with_config(store, session, ClientConfig::default())
    }

    /// Creates a book with an explicit policy.
    pub fn with_config(store: Arc<dyn RemoteStore>, session: Session, config: ClientConfig) -> Self {
        BudgetBook {
            store,
            session,
            config,
        }
    }

    fn require_owner(&self) -> ClientResult<String> {
        self.session
            .current_owner()
            .ok_or(ClientError::NotAuthenticated)
    }

    /// Creates a budget with zero spend.
    ///
    /// Category is unique per owner: a duplicate resolves to
    /// [`ClientError::Conflict`].
    pub async fn create_budget(&self, new: NewBudget) -> ClientResult<Budget> {
        let owner = self.require_owner()?;
        validate_category(&new.category)?;
        validate_price_cents(new.limit_cents)?;

        let budget = write_once(&self.config, self.store.insert_budget(&owner, new)).await?;
        info!(
            id = %budget.id,
            category = %budget.category,
            limit_cents = budget.limit_cents,
            "Budget created"
        );
        Ok(budget)
    }

    /// Lists the owner's budgets.
    pub async fn list_budgets(&self) -> ClientResult<Vec<Budget>> {
        let owner = self.require_owner()?;
        retry_read(&self.config, || self.store.select_budgets(&owner)).await
    }

    /// Deletes the owner's budget.
    pub async fn delete_budget(&self, id: &str) -> ClientResult<()> {
        let owner = self.require_owner()?;
        write_once(&self.config, self.store.delete_budget(&owner, id)).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
