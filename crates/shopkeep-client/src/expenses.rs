//! # Expense Book
//!
//! Owner-scoped expense log with best-effort budget accrual.

use std::sync::Arc;

use tracing::{info, warn};

use shopkeep_core::types::{Expense, NewExpense};
use shopkeep_core::validation::validate_new_expense;
use shopkeep_store::RemoteStore;

use crate::config::{retry_read, write_once, ClientConfig};
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Sums a list of expenses, in cents.
pub fn total_cents(expenses: &[Expense]) -> i64 {
    expenses.iter().map(|e| e.amount_cents).sum()
}

/// The owner's expense log.
pub struct ExpenseBook {
    store: Arc<dyn RemoteStore>,
    session: Session,
    config: ClientConfig,
}

impl ExpenseBook {
    /// Creates a book with the default timeout policy.
    pub fn new(store: Arc<dyn RemoteStore>, session: Session) -> Self {
        ExpenseBook::with_config(store, session, ClientConfig::default())
    }

    /// Creates a book with an explicit policy.
    pub fn with_config(store: Arc<dyn RemoteStore>, session: Session, config: ClientConfig) -> Self {
        ExpenseBook {
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

    /// Logs an expense.
    ///
    /// When a budget tracks the expense's category, its spend is accrued as
    /// a best-effort follow-up: an accrual failure is logged and absorbed,
    /// the expense itself stands.
    pub async fn add_expense(&self, new: NewExpense) -> ClientResult<Expense> {
        let owner = self.require_owner()?;
        validate_new_expense(&new)?;

        let expense = write_once(&self.config, self.store.insert_expense(&owner, new)).await?;
        info!(id = %expense.id, category = %expense.category, "Expense logged");

        match write_once(
            &self.config,
            self.store
                .add_budget_spend(&owner, &expense.category, expense.amount_cents),
        )
        .await
        {
            Ok(Some(budget)) => {
                info!(
                    category = %budget.category,
                    spent_cents = budget.spent_cents,
                    progress = budget.progress_percent(),
                    "Budget spend accrued"
                );
            }
            Ok(None) => {} // no budget tracks this category
            Err(e) => {
                warn!(category = %expense.category, error = %e, "Budget accrual failed");
            }
        }

        Ok(expense)
    }

    /// Lists the owner's expenses, most recent date first.
    pub async fn list_expenses(&self) -> ClientResult<Vec<Expense>> {
        let owner = self.require_owner()?;
        retry_read(&self.config, || self.store.select_expenses(&owner)).await
    }

    /// Deletes the owner's expense.
    pub async fn delete_expense(&self, id: &str) -> ClientResult<()> {
        let owner = self.require_owner()?;
        write_once(&self.config, self.store.delete_expense(&owner, id)).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
