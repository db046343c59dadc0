//! The balance engine: derives per-member net positions from the ledgers.

use std::collections::HashMap;

use sea_orm::{QueryFilter, QueryOrder, prelude::*};

use crate::{
    FormerMemberTotals, GroupBalance, MoneyCents, ResultEngine, Settlement, SettlementStatus,
    UserBalance, expense_items, expenses, settlements,
};

use super::Engine;

impl Engine {
    /// Computes the balance view of a group.
    ///
    /// A deterministic pure function of the current expense ledger,
    /// settlement ledger and membership relation: calling it twice without
    /// intervening writes returns identical results. Nothing is persisted.
    ///
    /// Per expense, the full amount raises the payer's `total_owed` and
    /// each item share raises that member's `total_owing`; `completed`
    /// settlements then move value from `from.total_owing` and
    /// `to.total_owed`. Ledger entries referencing users who are no longer
    /// members land in the `former_members` bucket instead of being
    /// dropped, so the nets (bucket included) always sum to zero cents.
    ///
    /// The returned settlement list is unfiltered by status; only the
    /// `completed` entries influenced the balances.
    pub async fn group_balance(&self, group_id: &str, user_id: &str) -> ResultEngine<GroupBalance> {
        let group = self
            .require_group_member(&self.database, group_id, user_id)
            .await?;
        let members = self.load_members(&self.database, group_id).await?;

        let mut balances: Vec<UserBalance> = members
            .into_iter()
            .map(|member| UserBalance {
                user_id: member.user_id,
                user_name: member.user_name,
                user_picture: member.user_picture,
                total_owed: MoneyCents::ZERO,
                total_owing: MoneyCents::ZERO,
                net_balance: MoneyCents::ZERO,
            })
            .collect();
        let index: HashMap<String, usize> = balances
            .iter()
            .enumerate()
            .map(|(i, balance)| (balance.user_id.clone(), i))
            .collect();
        let mut former = FormerMemberTotals::default();

        let expense_rows: Vec<(expenses::Model, Vec<expense_items::Model>)> =
            expenses::Entity::find()
                .filter(expenses::Column::GroupId.eq(group_id.to_string()))
                .find_with_related(expense_items::Entity)
                .all(&self.database)
                .await?;

        for (expense, items) in expense_rows {
            let amount = MoneyCents::new(expense.amount_minor);
            match index.get(&expense.paid_by) {
                Some(&i) => balances[i].total_owed += amount,
                None => former.total_owed += amount,
            }
            for item in items {
                let share = MoneyCents::new(item.amount_minor);
                match index.get(&item.user_id) {
                    Some(&i) => balances[i].total_owing += share,
                    None => former.total_owing += share,
                }
            }
        }

        let settlement_models: Vec<settlements::Model> = settlements::Entity::find()
            .filter(settlements::Column::GroupId.eq(group_id.to_string()))
            .order_by_asc(settlements::Column::CreatedAt)
            .order_by_asc(settlements::Column::Id)
            .all(&self.database)
            .await?;
        let settlements = settlement_models
            .into_iter()
            .map(Settlement::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        for settlement in &settlements {
            if settlement.status != SettlementStatus::Completed {
                continue;
            }
            match index.get(&settlement.from_user_id) {
                Some(&i) => balances[i].total_owing -= settlement.amount,
                None => former.total_owing -= settlement.amount,
            }
            match index.get(&settlement.to_user_id) {
                Some(&i) => balances[i].total_owed -= settlement.amount,
                None => former.total_owed -= settlement.amount,
            }
        }

        for balance in &mut balances {
            balance.net_balance = balance.total_owed - balance.total_owing;
        }
        former.net_balance = former.total_owed - former.total_owing;

        Ok(GroupBalance {
            group_id: group.id,
            group_name: group.name,
            balances,
            former_members: (!former.is_zero()).then_some(former),
            settlements,
        })
    }
}
