//! Settlement ledger operations.

use sea_orm::{QueryFilter, QueryOrder, prelude::*};

use crate::{Currency, MoneyCents, ResultEngine, Settlement, settlements};

use super::Engine;

impl Engine {
    /// Records a payment intent from the caller to another member.
    ///
    /// The settlement is always created `pending`; there is deliberately no
    /// check against the pair's current balance, the ledger logs what the
    /// caller declares.
    pub async fn create_settlement(
        &self,
        group_id: &str,
        from_user_id: &str,
        to_user_id: &str,
        amount: MoneyCents,
        currency: Currency,
    ) -> ResultEngine<Settlement> {
        self.require_group_member(&self.database, group_id, from_user_id)
            .await?;

        let settlement = Settlement::new(
            group_id.to_string(),
            from_user_id.to_string(),
            to_user_id.to_string(),
            amount,
            currency,
        )?;
        settlements::ActiveModel::from(&settlement)
            .insert(&self.database)
            .await?;
        Ok(settlement)
    }

    /// Lists a group's settlements in creation order, all statuses.
    pub async fn list_settlements(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> ResultEngine<Vec<Settlement>> {
        self.require_group_member(&self.database, group_id, user_id)
            .await?;

        let models: Vec<settlements::Model> = settlements::Entity::find()
            .filter(settlements::Column::GroupId.eq(group_id.to_string()))
            .order_by_asc(settlements::Column::CreatedAt)
            .order_by_asc(settlements::Column::Id)
            .all(&self.database)
            .await?;

        models.into_iter().map(Settlement::try_from).collect()
    }
}
