//! Settlement primitives.
//!
//! A `Settlement` records a directed payment between two members intended
//! to offset ledger balances. It is a log of payment intent/fact, not a
//! clamped transaction: nothing stops a member from recording more than
//! they owe. Settlements are born `pending`; moving them to `completed` or
//! `cancelled` belongs to an external collaborator, the engine only reads
//! the status and lets exclusively `completed` ones influence balances.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{Currency, EngineError, MoneyCents, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettlementStatus {
    Pending,
    Completed,
    Cancelled,
}

impl SettlementStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for SettlementStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(EngineError::Validation(format!(
                "invalid settlement status: {other}"
            ))),
        }
    }
}

/// A directed payment record between two members of a group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub id: Uuid,
    pub group_id: String,
    pub from_user_id: String,
    pub to_user_id: String,
    pub amount: MoneyCents,
    pub currency: Currency,
    pub status: SettlementStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Settlement {
    /// Builds a new `pending` settlement.
    ///
    /// The amount must be positive and payer and payee must differ; there
    /// is deliberately no check against current balances.
    pub fn new(
        group_id: String,
        from_user_id: String,
        to_user_id: String,
        amount: MoneyCents,
        currency: Currency,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::Validation(
                "settlement amount must be positive".to_string(),
            ));
        }
        if from_user_id == to_user_id {
            return Err(EngineError::Validation(
                "settlement payer and payee must differ".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            group_id,
            from_user_id,
            to_user_id,
            amount,
            currency,
            status: SettlementStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "settlements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub group_id: String,
    pub from_user_id: String,
    pub to_user_id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub completed_at: Option<DateTimeUtc>,
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
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Groups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Settlement> for ActiveModel {
    fn from(value: &Settlement) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            group_id: ActiveValue::Set(value.group_id.clone()),
            from_user_id: ActiveValue::Set(value.from_user_id.clone()),
            to_user_id: ActiveValue::Set(value.to_user_id.clone()),
            amount_minor: ActiveValue::Set(value.amount.cents()),
            currency: ActiveValue::Set(value.currency.code().to_string()),
            status: ActiveValue::Set(value.status.as_str().to_string()),
            created_at: ActiveValue::Set(value.created_at),
            completed_at: ActiveValue::Set(value.completed_at),
        }
    }
}

impl TryFrom<Model> for Settlement {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::Validation("invalid settlement id".to_string()))?,
            group_id: model.group_id,
            from_user_id: model.from_user_id,
            to_user_id: model.to_user_id,
            amount: MoneyCents::new(model.amount_minor),
            currency: Currency::try_from(model.currency.as_str()).unwrap_or_default(),
            status: SettlementStatus::try_from(model.status.as_str())?,
            created_at: model.created_at,
            completed_at: model.completed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_settlement_is_pending() {
        let settlement = Settlement::new(
            "group".to_string(),
            "bob".to_string(),
            "alice".to_string(),
            MoneyCents::new(30_00),
            Currency::default(),
        )
        .unwrap();
        assert_eq!(settlement.status, SettlementStatus::Pending);
        assert!(settlement.completed_at.is_none());
    }

    #[test]
    fn rejects_self_settlement_and_non_positive_amount() {
        assert!(
            Settlement::new(
                "group".to_string(),
                "bob".to_string(),
                "bob".to_string(),
                MoneyCents::new(100),
                Currency::default(),
            )
            .is_err()
        );
        assert!(
            Settlement::new(
                "group".to_string(),
                "bob".to_string(),
                "alice".to_string(),
                MoneyCents::ZERO,
                Currency::default(),
            )
            .is_err()
        );
    }
}
