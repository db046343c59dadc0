//! Membership guard: every group-scoped operation funnels through here.

use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, GroupMember, MemberRole, ResultEngine, group_memberships, groups, users,
};

use super::Engine;

impl Engine {
    async fn find_group_by_id(
        &self,
        db: &impl ConnectionTrait,
        group_id: &str,
    ) -> ResultEngine<Option<groups::Model>> {
        groups::Entity::find_by_id(group_id.to_string())
            .one(db)
            .await
            .map_err(Into::into)
    }

    pub(super) async fn group_membership_role(
        &self,
        db: &impl ConnectionTrait,
        group_id: &str,
        user_id: &str,
    ) -> ResultEngine<Option<MemberRole>> {
        // Pk lookup on (group_id, user_id), so the guard stays O(1).
        let row =
            group_memberships::Entity::find_by_id((group_id.to_string(), user_id.to_string()))
                .one(db)
                .await?;
        row.as_ref()
            .map(|m| MemberRole::try_from(m.role.as_str()))
            .transpose()
    }

    /// Fails with `NotFound` when the group does not exist and `Forbidden`
    /// when the caller has no membership row. Read-only, no side effects.
    pub(super) async fn require_group_member(
        &self,
        db: &impl ConnectionTrait,
        group_id: &str,
        user_id: &str,
    ) -> ResultEngine<groups::Model> {
        let model = self
            .find_group_by_id(db, group_id)
            .await?
            .ok_or_else(|| EngineError::NotFound("group".to_string()))?;
        if self
            .group_membership_role(db, group_id, user_id)
            .await?
            .is_none()
        {
            return Err(EngineError::Forbidden(
                "you are not a member of this group".to_string(),
            ));
        }
        Ok(model)
    }

    pub(super) async fn require_user_exists(
        &self,
        db: &impl ConnectionTrait,
        username: &str,
    ) -> ResultEngine<()> {
        let exists = users::Entity::find_by_id(username.to_string())
            .one(db)
            .await?
            .is_some();
        if !exists {
            return Err(EngineError::NotFound(format!("user {username}")));
        }
        Ok(())
    }

    /// Loads the current members of a group with their display snapshots.
    ///
    /// Ordered by `joined_at` then `user_id`; this is the canonical member
    /// order, reused by balance accumulators and equal-split designation.
    pub(super) async fn load_members(
        &self,
        db: &impl ConnectionTrait,
        group_id: &str,
    ) -> ResultEngine<Vec<GroupMember>> {
        let rows: Vec<(group_memberships::Model, Option<users::Model>)> =
            group_memberships::Entity::find()
                .filter(group_memberships::Column::GroupId.eq(group_id.to_string()))
                .order_by_asc(group_memberships::Column::JoinedAt)
                .order_by_asc(group_memberships::Column::UserId)
                .find_also_related(users::Entity)
                .all(db)
                .await?;

        let mut members = Vec::with_capacity(rows.len());
        for (membership, user) in rows {
            let role = MemberRole::try_from(membership.role.as_str())?;
            let (user_name, user_picture) = match user {
                Some(user) => (user.name, user.picture),
                None => ("Unknown".to_string(), None),
            };
            members.push(GroupMember {
                user_id: membership.user_id,
                user_name,
                user_picture,
                role,
                joined_at: membership.joined_at,
            });
        }
        Ok(members)
    }
}
