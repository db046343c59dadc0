//! Expense API endpoints.

use api_types::expense::{ExpenseItemView, ExpenseNew, ExpenseView, ExpensesResponse};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use engine::{Currency, ExpenseCmd, MoneyCents};

use crate::{ServerError, server::ServerState, user};

fn expense_view(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        group_id: expense.group_id,
        paid_by: expense.paid_by,
        amount_minor: expense.amount.cents(),
        currency: expense.currency.code().to_string(),
        description: expense.description,
        category: expense.category,
        date: expense.date.fixed_offset(),
        items: expense
            .items
            .into_iter()
            .map(|item| ExpenseItemView {
                user_id: item.user_id,
                amount_minor: item.amount.cents(),
            })
            .collect(),
    }
}

/// Handle requests for listing a group's expenses.
pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> Result<Json<ExpensesResponse>, ServerError> {
    let expenses = state
        .engine
        .list_expenses(&group_id, &user.username)
        .await?
        .into_iter()
        .map(expense_view)
        .collect();

    Ok(Json(ExpensesResponse { expenses }))
}

/// Handle requests for creating a new expense.
///
/// When the payload carries no `items`, the total is split equally over the
/// group's current members, with the residual cents on the first member in
/// membership order.
pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let amount = MoneyCents::new(payload.amount_minor);
    let currency = Currency::try_from(payload.currency.as_str())?;

    let items: Vec<(String, MoneyCents)> = match payload.items {
        Some(items) => items
            .into_iter()
            .map(|item| (item.user_id, MoneyCents::new(item.amount_minor)))
            .collect(),
        None => {
            let (_, members) = state.engine.group(&group_id, &user.username).await?;
            let shares = amount.split_even(members.len());
            members
                .into_iter()
                .zip(shares)
                .map(|(member, share)| (member.user_id, share))
                .collect()
        }
    };

    let expense = state
        .engine
        .create_expense(ExpenseCmd {
            group_id,
            paid_by: user.username,
            amount,
            currency,
            description: payload.description,
            category: payload.category,
            date: payload.date.with_timezone(&Utc),
            items,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(expense_view(expense))))
}
