use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::application::dto::roster_dto::{AddStudentDto, ImportRosterDto, RenameGroupDto};
use crate::presentation::errors::ApiError;

use super::ApiState;

#[derive(Deserialize)]
pub(super) struct AwardPointsBody {
    points: u32,
}

#[derive(Deserialize)]
pub(super) struct MoveStudentBody {
    group: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RenameGroupBody {
    new_name: String,
}

pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(super) async fn get_students(
    State(state): State<ApiState>,
) -> Result<Json<Value>, ApiError> {
    let snapshot = state.roster_service.get_roster().await?;

    Ok(Json(json!({
        "students": snapshot.students,
        "groupOrder": snapshot.group_order,
    })))
}

pub(super) async fn save_students(
    State(state): State<ApiState>,
    Json(body): Json<ImportRosterDto>,
) -> Result<Json<Value>, ApiError> {
    state.roster_service.replace_roster(body).await?;

    Ok(Json(json!({ "success": true })))
}

pub(super) async fn add_student(
    State(state): State<ApiState>,
    Json(body): Json<AddStudentDto>,
) -> Result<Json<Value>, ApiError> {
    let student = state.roster_service.add_student(body).await?;

    Ok(Json(json!({ "success": true, "student": student })))
}

pub(super) async fn award_points(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(body): Json<AwardPointsBody>,
) -> Result<Json<Value>, ApiError> {
    let award = state.roster_service.award_points(&id, body.points).await?;

    Ok(Json(json!({
        "success": true,
        "student": award.student,
        "oldPoints": award.old_points,
        "newPoints": award.new_points,
        "oldLevel": award.old_level,
        "newLevel": award.new_level,
        "leveledUp": award.leveled_up,
    })))
}

pub(super) async fn record_homework(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let student = state.roster_service.record_homework(&id).await?;

    Ok(Json(json!({ "success": true, "student": student })))
}

pub(super) async fn move_student(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(body): Json<MoveStudentBody>,
) -> Result<Json<Value>, ApiError> {
    let student = state
        .roster_service
        .move_student_to_group(&id, &body.group)
        .await?;

    Ok(Json(json!({ "success": true, "student": student })))
}

pub(super) async fn rename_group(
    State(state): State<ApiState>,
    Path(old_name): Path<String>,
    Json(body): Json<RenameGroupBody>,
) -> Result<Json<Value>, ApiError> {
    let result = state
        .roster_service
        .rename_group(RenameGroupDto {
            old_name,
            new_name: body.new_name,
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "updatedCount": result.updated_count,
    })))
}

pub(super) async fn reset_all(State(state): State<ApiState>) -> Result<Json<Value>, ApiError> {
    state.roster_service.reset_all().await?;

    Ok(Json(json!({ "success": true })))
}

pub(super) async fn class_stats(State(state): State<ApiState>) -> Result<Json<Value>, ApiError> {
    let stats = state.roster_service.class_stats().await?;

    Ok(Json(json!(stats)))
}

pub(super) async fn leaderboard(State(state): State<ApiState>) -> Result<Json<Value>, ApiError> {
    let leaderboard = state.roster_service.leaderboard().await?;

    Ok(Json(json!(leaderboard)))
}

pub(super) async fn export_roster(State(state): State<ApiState>) -> Result<Json<Value>, ApiError> {
    let export = state.roster_service.export_roster().await?;

    Ok(Json(json!({
        "fileName": export.suggested_file_name(),
        "exportedAt": export.exported_at,
        "students": export.students,
        "groupOrder": export.group_order,
    })))
}
