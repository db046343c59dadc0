//! Balance API endpoint.

use api_types::balance::{FormerMembersView, GroupBalanceResponse, UserBalanceView};
use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{ServerError, server::ServerState, settlements::settlement_view, user};

/// Handle requests for a group's derived balance view.
pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> Result<Json<GroupBalanceResponse>, ServerError> {
    let balance = state.engine.group_balance(&group_id, &user.username).await?;

    let balances = balance
        .balances
        .into_iter()
        .map(|b| UserBalanceView {
            user_id: b.user_id,
            user_name: b.user_name,
            user_picture: b.user_picture,
            total_owed_minor: b.total_owed.cents(),
            total_owing_minor: b.total_owing.cents(),
            net_balance_minor: b.net_balance.cents(),
        })
        .collect();

    let former_members = balance.former_members.map(|f| FormerMembersView {
        total_owed_minor: f.total_owed.cents(),
        total_owing_minor: f.total_owing.cents(),
        net_balance_minor: f.net_balance.cents(),
    });

    Ok(Json(GroupBalanceResponse {
        group_id: balance.group_id,
        group_name: balance.group_name,
        balances,
        former_members,
        settlements: balance.settlements.into_iter().map(settlement_view).collect(),
    }))
}
