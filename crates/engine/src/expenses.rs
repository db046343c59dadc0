//! Expense primitives.
//!
//! An `Expense` is a single immutable transaction paid by one member and
//! decomposed into per-member [`ExpenseItem`](crate::ExpenseItem) shares.
//! The ledger's conservation law lives here: item shares must sum to the
//! expense total within [`ITEM_SUM_TOLERANCE`].

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{Currency, EngineError, MoneyCents, ResultEngine, expense_items::ExpenseItem};

/// Allowed absolute gap between an expense total and the sum of its item
/// shares: one cent, the integer-cents equivalent of the 0.01 tolerance.
pub const ITEM_SUM_TOLERANCE: MoneyCents = MoneyCents::new(1);

/// One transaction within a group, with its ownership shares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub group_id: String,
    pub paid_by: String,
    pub amount: MoneyCents,
    pub currency: Currency,
    pub description: String,
    pub category: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub items: Vec<ExpenseItem>,
}

impl Expense {
    /// Builds a validated expense with its items.
    ///
    /// Enforced here, before anything touches the database:
    /// - the total amount is positive
    /// - at least one item share
    /// - no negative item share
    /// - `|sum(items) - amount| <= ITEM_SUM_TOLERANCE`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        group_id: String,
        paid_by: String,
        amount: MoneyCents,
        currency: Currency,
        description: String,
        category: Option<String>,
        date: DateTime<Utc>,
        items: Vec<(String, MoneyCents)>,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::Validation(
                "expense amount must be positive".to_string(),
            ));
        }
        if items.is_empty() {
            return Err(EngineError::Validation(
                "expense needs at least one item".to_string(),
            ));
        }
        if items.iter().any(|(_, share)| share.is_negative()) {
            return Err(EngineError::Validation(
                "item amounts must not be negative".to_string(),
            ));
        }

        let item_sum = items
            .iter()
            .fold(MoneyCents::ZERO, |acc, (_, share)| acc + *share);
        if (item_sum - amount).abs() > ITEM_SUM_TOLERANCE {
            return Err(EngineError::Validation(format!(
                "item amounts sum to {item_sum}, expected total {amount}"
            )));
        }

        let id = Uuid::new_v4();
        let items = items
            .into_iter()
            .map(|(user_id, share)| ExpenseItem {
                id: Uuid::new_v4(),
                expense_id: id,
                user_id,
                amount: share,
            })
            .collect();

        Ok(Self {
            id,
            group_id,
            paid_by,
            amount,
            currency,
            description,
            category,
            date,
            created_at: Utc::now(),
            items,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub group_id: String,
    pub paid_by: String,
    pub amount_minor: i64,
    pub currency: String,
    pub description: String,
    pub category: Option<String>,
    pub date: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::groups::Entity",
        from = "Column::GroupId",
        to = "super::groups::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Groups,
    #[sea_orm(has_many = "super::expense_items::Entity")]
    ExpenseItems,
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Groups.def()
    }
}

impl Related<super::expense_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(value: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            group_id: ActiveValue::Set(value.group_id.clone()),
            paid_by: ActiveValue::Set(value.paid_by.clone()),
            amount_minor: ActiveValue::Set(value.amount.cents()),
            currency: ActiveValue::Set(value.currency.code().to_string()),
            description: ActiveValue::Set(value.description.clone()),
            category: ActiveValue::Set(value.category.clone()),
            date: ActiveValue::Set(value.date),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    /// Converts a database row into an expense header with no items; the
    /// ops layer attaches items after loading them.
    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::Validation("invalid expense id".to_string()))?,
            group_id: model.group_id,
            paid_by: model.paid_by,
            amount: MoneyCents::new(model.amount_minor),
            currency: Currency::try_from(model.currency.as_str()).unwrap_or_default(),
            description: model.description,
            category: model.category,
            date: model.date,
            created_at: model.created_at,
            items: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(user: &str, cents: i64) -> (String, MoneyCents) {
        (user.to_string(), MoneyCents::new(cents))
    }

    fn expense(amount: i64, items: Vec<(String, MoneyCents)>) -> ResultEngine<Expense> {
        Expense::new(
            "group".to_string(),
            "alice".to_string(),
            MoneyCents::new(amount),
            Currency::default(),
            "Dinner".to_string(),
            None,
            Utc::now(),
            items,
        )
    }

    #[test]
    fn accepts_exact_item_sum() {
        let expense = expense(90_00, vec![item("alice", 30_00), item("bob", 60_00)]).unwrap();
        assert_eq!(expense.items.len(), 2);
        assert!(expense.items.iter().all(|i| i.expense_id == expense.id));
    }

    #[test]
    fn accepts_one_cent_gap() {
        assert!(expense(10_00, vec![item("alice", 999)]).is_ok());
    }

    #[test]
    fn rejects_two_cent_gap() {
        let err = expense(10_00, vec![item("alice", 501), item("bob", 501)]).unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation("item amounts sum to 10.02, expected total 10.00".to_string())
        );
    }

    #[test]
    fn rejects_non_positive_amount() {
        assert!(expense(0, vec![item("alice", 0)]).is_err());
        assert!(expense(-100, vec![item("alice", -100)]).is_err());
    }

    #[test]
    fn rejects_empty_items_and_negative_shares() {
        assert!(expense(100, vec![]).is_err());
        assert!(expense(100, vec![item("alice", 200), item("bob", -100)]).is_err());
    }
}
