use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use domain::{Todo, TodoQuery};
use tracing::info;

use crate::error::ApiError;
use crate::models::{
    CreateTodoRequest, HealthBody, ListEnvelope, TodoEnvelope, UpdateTodoRequest,
};
use crate::ws::Mutation;
use crate::{ApiJson, AppState, AuthUser};

pub async fn health() -> (StatusCode, Json<HealthBody>) {
    (StatusCode::OK, Json(HealthBody { status: "ok" }))
}

pub async fn list_todos(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<TodoQuery>,
) -> Result<Json<ListEnvelope>, ApiError> {
    let query = query.normalized();
    let list = state.repo.load(&user).await;

    let list = list
        .items()
        .iter()
        .filter(|todo| query.matches(todo))
        .cloned()
        .collect();

    Ok(Json(ListEnvelope { list }))
}

pub async fn get_todo(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<TodoEnvelope>, ApiError> {
    let list = state.repo.load(&user).await;
    let todo = list.find(&id).cloned().ok_or(ApiError::NotFound)?;
    Ok(Json(TodoEnvelope { todo }))
}

pub async fn create_todo(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateTodoRequest>,
) -> Result<Json<TodoEnvelope>, ApiError> {
    let request = request.normalized();
    let todo = Todo::new(
        request.title,
        request.todo_time,
        request.todo_keyword,
        Utc::now(),
    )?;

    let mut list = state.repo.load(&user).await;
    list.insert(todo.clone())?;
    state.repo.save(&user, &list).await?;

    info!(todo_id = %todo.id, user = %user, "Todo created");
    state.hub.publish(Mutation::Added, &todo, &user);

    Ok(Json(TodoEnvelope { todo }))
}

pub async fn update_todo(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateTodoRequest>,
) -> Result<Json<TodoEnvelope>, ApiError> {
    let mut list = state.repo.load(&user).await;
    let todo = list.update(&id, request.into_patch())?;
    state.repo.save(&user, &list).await?;

    info!(todo_id = %todo.id, user = %user, "Todo updated");
    state.hub.publish(Mutation::Updated, &todo, &user);

    Ok(Json(TodoEnvelope { todo }))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<TodoEnvelope>, ApiError> {
    let mut list = state.repo.load(&user).await;
    let todo = list.remove(&id)?;
    state.repo.save(&user, &list).await?;

    info!(todo_id = %todo.id, user = %user, "Todo deleted");
    state.hub.publish(Mutation::Deleted, &todo, &user);

    Ok(Json(TodoEnvelope { todo }))
}
