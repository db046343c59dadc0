//! Expense ledger operations.

use chrono::{DateTime, Utc};
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Currency, Expense, ExpenseItem, MoneyCents, ResultEngine, expense_items, expenses,
};

use super::{Engine, with_tx};

/// Arguments for [`Engine::create_expense`].
#[derive(Clone, Debug)]
pub struct ExpenseCmd {
    pub group_id: String,
    /// The authenticated caller; they are recorded as the payer.
    pub paid_by: String,
    pub amount: MoneyCents,
    pub currency: Currency,
    pub description: String,
    pub category: Option<String>,
    pub date: DateTime<Utc>,
    /// Per-member shares `(user_id, amount)`.
    pub items: Vec<(String, MoneyCents)>,
}

impl Engine {
    /// Lists a group's expenses with their items, most recent date first.
    pub async fn list_expenses(&self, group_id: &str, user_id: &str) -> ResultEngine<Vec<Expense>> {
        self.require_group_member(&self.database, group_id, user_id)
            .await?;

        let rows: Vec<(expenses::Model, Vec<expense_items::Model>)> = expenses::Entity::find()
            .filter(expenses::Column::GroupId.eq(group_id.to_string()))
            .order_by_desc(expenses::Column::Date)
            .order_by_desc(expenses::Column::CreatedAt)
            .find_with_related(expense_items::Entity)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (expense_model, item_models) in rows {
            let mut expense = Expense::try_from(expense_model)?;
            expense.items = item_models
                .into_iter()
                .map(ExpenseItem::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;
            out.push(expense);
        }
        Ok(out)
    }

    /// Creates an expense with its per-member shares.
    ///
    /// All structural validation (positive total, non-empty items, item-sum
    /// conservation within one cent) happens in `Expense::new` before the
    /// transaction opens; the expense row and every item row then persist
    /// as one unit, so a failed item insert leaves no expense behind.
    ///
    /// Item payees are not re-checked against the membership relation:
    /// membership is guarded at the group level for the caller, and
    /// historical items are allowed to outlive membership changes.
    pub async fn create_expense(&self, cmd: ExpenseCmd) -> ResultEngine<Expense> {
        with_tx!(self, |tx| {
            self.require_group_member(&tx, &cmd.group_id, &cmd.paid_by)
                .await?;

            let expense = Expense::new(
                cmd.group_id,
                cmd.paid_by,
                cmd.amount,
                cmd.currency,
                cmd.description,
                cmd.category,
                cmd.date,
                cmd.items,
            )?;

            expenses::ActiveModel::from(&expense).insert(&tx).await?;
            for item in &expense.items {
                expense_items::ActiveModel::from(item).insert(&tx).await?;
            }

            Ok(expense)
        })
    }
}
