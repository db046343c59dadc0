//! Group creation and lookup.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{Group, GroupMember, MemberRole, ResultEngine, group_memberships, groups};

use super::{Engine, normalize_optional_text, normalize_required_name, with_tx};

impl Engine {
    /// Creates a group owned by `user_id`.
    ///
    /// The creator becomes a member with the `owner` role; every id in
    /// `member_ids` is added with the `member` role. Duplicates and the
    /// creator itself are skipped; unknown users fail the whole creation
    /// with `NotFound`. Group and memberships persist in one transaction.
    pub async fn create_group(
        &self,
        name: &str,
        description: Option<&str>,
        member_ids: &[String],
        user_id: &str,
    ) -> ResultEngine<Group> {
        let name = normalize_required_name(name, "group")?;
        let description = normalize_optional_text(description);

        with_tx!(self, |tx| {
            let group = Group::new(name, description, user_id);
            groups::ActiveModel::from(&group).insert(&tx).await?;

            let now = Utc::now();
            let owner = group_memberships::ActiveModel {
                group_id: ActiveValue::Set(group.id.clone()),
                user_id: ActiveValue::Set(user_id.to_string()),
                role: ActiveValue::Set(MemberRole::Owner.as_str().to_string()),
                joined_at: ActiveValue::Set(now),
            };
            owner.insert(&tx).await?;

            let mut seen = vec![user_id.to_string()];
            for member_id in member_ids {
                if seen.contains(member_id) {
                    continue;
                }
                self.require_user_exists(&tx, member_id).await?;
                let membership = group_memberships::ActiveModel {
                    group_id: ActiveValue::Set(group.id.clone()),
                    user_id: ActiveValue::Set(member_id.clone()),
                    role: ActiveValue::Set(MemberRole::Member.as_str().to_string()),
                    joined_at: ActiveValue::Set(now),
                };
                membership.insert(&tx).await?;
                seen.push(member_id.clone());
            }

            Ok(group)
        })
    }

    /// Returns a group with its current members (canonical member order).
    pub async fn group(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> ResultEngine<(Group, Vec<GroupMember>)> {
        let model = self
            .require_group_member(&self.database, group_id, user_id)
            .await?;
        let members = self.load_members(&self.database, group_id).await?;
        Ok((Group::from(model), members))
    }

    /// Lists the groups the caller belongs to, oldest membership first.
    pub async fn list_groups(&self, user_id: &str) -> ResultEngine<Vec<Group>> {
        let rows: Vec<(group_memberships::Model, Option<groups::Model>)> =
            group_memberships::Entity::find()
                .filter(group_memberships::Column::UserId.eq(user_id.to_string()))
                .order_by_asc(group_memberships::Column::JoinedAt)
                .order_by_asc(group_memberships::Column::GroupId)
                .find_also_related(groups::Entity)
                .all(&self.database)
                .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, group)| group.map(Group::from))
            .collect())
    }
}
