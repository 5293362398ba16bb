use crate::{AppState, error::AppError};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::Html,
};
use core_types::{
    CreatedHeroPower, HeroDetail, HeroSummary, NewHeroPower, PowerSummary, ValidationError,
};
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

/// Body of `PATCH /powers/:id`. Only `description` is recognised.
///
/// The outer `Option` is `None` when the key is absent and the inner one is
/// `None` for an explicit `null`.
#[derive(Debug, Deserialize)]
pub struct PowerUpdate {
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Body of `POST /hero_powers`.
#[derive(Debug, Deserialize)]
pub struct HeroPowerPayload {
    pub strength: String,
    pub hero_id: i64,
    pub power_id: i64,
}

/// # GET /
pub async fn index() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}

/// # GET /heroes
pub async fn get_heroes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HeroSummary>>, AppError> {
    let heroes = state.db_repo.get_all_heroes().await?;
    Ok(Json(heroes))
}

/// # GET /heroes/:id
/// The hero plus every linking record it owns, each with its power.
pub async fn get_hero(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<HeroDetail>, AppError> {
    let Path(id) = path?;
    let hero = state
        .db_repo
        .get_hero_detail(id)
        .await
        .map_err(AppError::lookup("Hero not found"))?;
    Ok(Json(hero))
}

/// # GET /powers
pub async fn get_powers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PowerSummary>>, AppError> {
    let powers = state.db_repo.get_all_powers().await?;
    Ok(Json(powers))
}

/// # GET /powers/:id
pub async fn get_power(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<PowerSummary>, AppError> {
    let Path(id) = path?;
    let power = state
        .db_repo
        .get_power(id)
        .await
        .map_err(AppError::lookup("Power not found"))?;
    Ok(Json(power))
}

/// # PATCH /powers/:id
/// A body without `description` changes nothing and echoes the power back.
/// An explicit `null` is a validation failure.
pub async fn update_power(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<PowerUpdate>, JsonRejection>,
) -> Result<Json<PowerSummary>, AppError> {
    let Path(id) = path?;
    let Json(update) = body?;

    let power = match update.description {
        Some(Some(description)) => state.db_repo.update_power_description(id, &description).await,
        Some(None) => {
            state
                .db_repo
                .get_power(id)
                .await
                .map_err(AppError::lookup("Power not found"))?;
            return Err(ValidationError::MissingDescription.into());
        }
        None => state.db_repo.get_power(id).await,
    }
    .map_err(AppError::lookup("Power not found"))?;

    Ok(Json(power))
}

/// # POST /hero_powers
pub async fn create_hero_power(
    State(state): State<Arc<AppState>>,
    body: Result<Json<HeroPowerPayload>, JsonRejection>,
) -> Result<Json<CreatedHeroPower>, AppError> {
    let Json(payload) = body?;
    let hero_power = NewHeroPower::new(&payload.strength, payload.hero_id, payload.power_id)?;
    let created = state.db_repo.create_hero_power(&hero_power).await?;
    Ok(Json(created))
}

/// Any route that isn't registered.
pub async fn fallback() -> AppError {
    AppError::NotFound("Not found".to_string())
}
