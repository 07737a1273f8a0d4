//! Expenses API endpoints

use api_types::{
    Message,
    expense::{ExpenseListResponse, ExpenseNew, ExpenseResponse, ExpenseUpdate, ExpenseView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, extract::ApiJson, server::ServerState};

fn map_expense(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        title: expense.title,
        description: expense.description,
        amount: expense.amount,
        date: expense.date,
        category: expense.category,
        user_id: expense.user_id,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<ExpenseNew>,
) -> Result<(StatusCode, Json<Message>), ServerError> {
    state
        .engine
        .new_expense(engine::ExpenseNew {
            title: payload.title,
            description: payload.description,
            amount: payload.amount,
            category: payload.category,
            user_id: payload.user_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Message::ok("Expense created successfully")),
    ))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<ExpenseListResponse>, ServerError> {
    let data = state
        .engine
        .expenses()
        .await?
        .into_iter()
        .map(map_expense)
        .collect();

    Ok(Json(ExpenseListResponse {
        success: true,
        data,
    }))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(expense_id): Path<i32>,
) -> Result<Json<ExpenseResponse>, ServerError> {
    let expense = state.engine.expense(expense_id).await?;
    Ok(Json(ExpenseResponse {
        success: true,
        data: map_expense(expense),
    }))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(expense_id): Path<i32>,
    ApiJson(payload): ApiJson<ExpenseUpdate>,
) -> Result<Json<Message>, ServerError> {
    let patch = engine::ExpensePatch {
        title: payload.title,
        description: payload.description,
        amount: payload.amount,
        category: payload.category,
        user_id: payload.user_id,
    };
    state.engine.update_expense(expense_id, patch).await?;
    Ok(Json(Message::ok("Expense updated successfully")))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(expense_id): Path<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_expense(expense_id).await?;
    Ok(Json(Message::ok("Expense deleted successfully")))
}
