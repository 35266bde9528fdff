use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::tournament::{Tournament, TournamentRegistration};
use crate::error::ApiError;
use crate::handlers::{take_limit, TakeQuery};
use crate::middleware::AuthUser;

/// GET /api/tournaments - upcoming tournaments
pub async fn list_tournaments(
    Query(query): Query<TakeQuery>,
) -> Result<Json<Vec<Tournament>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let tournaments: Vec<Tournament> = sqlx::query_as(
        "SELECT * FROM tournaments ORDER BY starts_at ASC, id LIMIT $1",
    )
    .bind(take_limit(&query))
    .fetch_all(&pool)
    .await?;

    Ok(Json(tournaments))
}

/// GET /api/tournaments/:id
pub async fn get_tournament(Path(id): Path<Uuid>) -> Result<Json<Tournament>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let tournament: Option<Tournament> = sqlx::query_as("SELECT * FROM tournaments WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?;

    tournament
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Tournament not found"))
}

/// POST /api/tournaments/:id/register
pub async fn register(
    Extension(user): Extension<AuthUser>,
    Path(tournament_id): Path<Uuid>,
) -> Result<(StatusCode, Json<TournamentRegistration>), ApiError> {
    let pool = DatabaseManager::pool().await?;

    let tournament: Option<Tournament> =
        sqlx::query_as("SELECT * FROM tournaments WHERE id = $1")
            .bind(tournament_id)
            .fetch_optional(&pool)
            .await?;
    let tournament = tournament.ok_or_else(|| ApiError::not_found("Tournament not found"))?;

    if !tournament.registration_open {
        return Err(ApiError::conflict("Registration is closed for this tournament"));
    }

    let existing: Option<(Uuid,)> = sqlx::query_as(
        "SELECT id FROM tournament_registrations WHERE tournament_id = $1 AND user_id = $2",
    )
    .bind(tournament_id)
    .bind(user.user_id)
    .fetch_optional(&pool)
    .await?;
    if existing.is_some() {
        return Err(ApiError::conflict("Already registered for this tournament"));
    }

    let registration: TournamentRegistration = sqlx::query_as(
        r#"
        INSERT INTO tournament_registrations (id, tournament_id, user_id, created_at)
        VALUES ($1, $2, $3, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(tournament_id)
    .bind(user.user_id)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(registration)))
}

/// GET /api/tournaments/registrations - the caller's registrations
pub async fn list_registrations(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<TournamentRegistration>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let registrations: Vec<TournamentRegistration> = sqlx::query_as(
        "SELECT * FROM tournament_registrations WHERE user_id = $1 ORDER BY created_at DESC, id",
    )
    .bind(user.user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(registrations))
}
