//! Group API endpoints.

use api_types::group::{
    GroupDetail, GroupNew, GroupView, GroupsResponse, MemberRole as ApiRole, MemberView,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState, user};

pub(crate) fn group_view(group: engine::Group) -> GroupView {
    GroupView {
        id: group.id,
        name: group.name,
        description: group.description,
        created_by: group.created_by,
        created_at: group.created_at.fixed_offset(),
    }
}

fn member_view(member: engine::GroupMember) -> MemberView {
    MemberView {
        user_id: member.user_id,
        user_name: member.user_name,
        user_picture: member.user_picture,
        role: match member.role {
            engine::MemberRole::Owner => ApiRole::Owner,
            engine::MemberRole::Member => ApiRole::Member,
        },
    }
}

/// Handle requests for creating a new group.
pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<GroupNew>,
) -> Result<(StatusCode, Json<GroupView>), ServerError> {
    let member_ids = payload.member_ids.unwrap_or_default();
    let group = state
        .engine
        .create_group(
            &payload.name,
            payload.description.as_deref(),
            &member_ids,
            &user.username,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(group_view(group))))
}

/// Handle requests for listing the caller's groups.
pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<GroupsResponse>, ServerError> {
    let groups = state
        .engine
        .list_groups(&user.username)
        .await?
        .into_iter()
        .map(group_view)
        .collect();

    Ok(Json(GroupsResponse { groups }))
}

/// Handle requests for one group with its member list.
pub async fn get_detail(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> Result<Json<GroupDetail>, ServerError> {
    let (group, members) = state.engine.group(&group_id, &user.username).await?;
    let members: Vec<MemberView> = members.into_iter().map(member_view).collect();
    let member_count = members.len();

    Ok(Json(GroupDetail {
        group: group_view(group),
        members,
        member_count,
    }))
}
