use api_types::goal::{GoalNew, GoalView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Goal, GoalInput, User};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn input(payload: GoalNew) -> GoalInput {
    GoalInput {
        name: payload.name,
        target_minor: payload.target_minor,
        current_minor: payload.current_minor,
        deadline: payload.deadline,
        description: payload.description,
    }
}

fn view(goal: Goal) -> GoalView {
    let progress = goal.progress();
    GoalView {
        id: goal.id,
        user_id: goal.user_id,
        name: goal.name,
        target_minor: goal.target_minor,
        current_minor: goal.current_minor,
        deadline: goal.deadline,
        description: goal.description,
        progress,
    }
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<GoalView>>, ServerError> {
    let goals = state.engine.goals(user.id).await?;
    Ok(Json(goals.into_iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<GoalNew>,
) -> Result<(StatusCode, Json<GoalView>), ServerError> {
    let goal = state.engine.create_goal(user.id, input(payload)).await?;
    Ok((StatusCode::CREATED, Json(view(goal))))
}

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GoalView>, ServerError> {
    Ok(Json(view(state.engine.goal(user.id, id).await?)))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GoalNew>,
) -> Result<Json<GoalView>, ServerError> {
    let goal = state.engine.update_goal(user.id, id, input(payload)).await?;
    Ok(Json(view(goal)))
}

pub async fn delete(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_goal(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
