//! Settlement API endpoints.

use api_types::settlement::{
    SettlementNew, SettlementStatus as ApiStatus, SettlementView, SettlementsResponse,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Currency, MoneyCents};

use crate::{ServerError, server::ServerState, user};

pub(crate) fn settlement_view(settlement: engine::Settlement) -> SettlementView {
    SettlementView {
        id: settlement.id,
        group_id: settlement.group_id,
        from_user_id: settlement.from_user_id,
        to_user_id: settlement.to_user_id,
        amount_minor: settlement.amount.cents(),
        currency: settlement.currency.code().to_string(),
        status: match settlement.status {
            engine::SettlementStatus::Pending => ApiStatus::Pending,
            engine::SettlementStatus::Completed => ApiStatus::Completed,
            engine::SettlementStatus::Cancelled => ApiStatus::Cancelled,
        },
        created_at: settlement.created_at.fixed_offset(),
        completed_at: settlement.completed_at.map(|at| at.fixed_offset()),
    }
}

/// Handle requests for listing a group's settlements.
pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> Result<Json<SettlementsResponse>, ServerError> {
    let settlements = state
        .engine
        .list_settlements(&group_id, &user.username)
        .await?
        .into_iter()
        .map(settlement_view)
        .collect();

    Ok(Json(SettlementsResponse { settlements }))
}

/// Handle requests for declaring a payment to another member.
pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
    Json(payload): Json<SettlementNew>,
) -> Result<(StatusCode, Json<SettlementView>), ServerError> {
    let currency = Currency::try_from(payload.currency.as_str())?;
    let settlement = state
        .engine
        .create_settlement(
            &group_id,
            &user.username,
            &payload.to_user_id,
            MoneyCents::new(payload.amount_minor),
            currency,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(settlement_view(settlement))))
}
