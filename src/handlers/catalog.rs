// src/handlers/catalog.rs

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::catalog::{Category, Game, GameWithCategory},
};

// =============================================================================
//  CATEGORIAS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Estratégia")]
    pub name: String,
}

// GET /categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Catálogo",
    responses(
        (status = 200, description = "Lista de categorias", body = Vec<Category>)
    )
)]
pub async fn get_all_categories(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.catalog_service.list_categories().await?;

    Ok((StatusCode::OK, Json(categories)))
}

// POST /categories
#[utoipa::path(
    post,
    path = "/categories",
    tag = "Catálogo",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Category),
        (status = 400, description = "Nome ausente ou vazio"),
        (status = 409, description = "Nome já existe")
    )
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    payload: Result<Json<CreateCategoryPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    // Corpo ilegível ou campo ausente é 400, nunca o 422 padrão do axum.
    let Json(payload) = payload.map_err(|_| AppError::InvalidRequest("corpo JSON inválido"))?;
    payload.validate()?;

    let category = app_state
        .catalog_service
        .create_category(&payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

// =============================================================================
//  JOGOS
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GamesQuery {
    /// Prefixo do nome do jogo.
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGamePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Banco Imobiliário")]
    pub name: String,

    #[schema(example = "http://exemplo.com/banco.jpg")]
    pub image: Option<String>,

    #[validate(range(min = 1, message = "stockTotal deve ser um inteiro positivo."))]
    #[schema(example = 3)]
    pub stock_total: i32,

    pub category_id: Uuid,

    // Em centavos.
    #[validate(range(min = 1, message = "pricePerDay deve ser um inteiro positivo."))]
    #[schema(example = 1500)]
    pub price_per_day: i32,
}

// GET /games
#[utoipa::path(
    get,
    path = "/games",
    tag = "Catálogo",
    params(GamesQuery),
    responses(
        (status = 200, description = "Lista de jogos com o nome da categoria", body = Vec<GameWithCategory>)
    )
)]
pub async fn get_all_games(
    State(app_state): State<AppState>,
    Query(query): Query<GamesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let games = app_state
        .catalog_service
        .list_games(query.name.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(games)))
}

// POST /games
#[utoipa::path(
    post,
    path = "/games",
    tag = "Catálogo",
    request_body = CreateGamePayload,
    responses(
        (status = 201, description = "Jogo criado", body = Game),
        (status = 400, description = "Campos ausentes ou numéricos não positivos")
    )
)]
pub async fn create_game(
    State(app_state): State<AppState>,
    payload: Result<Json<CreateGamePayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|_| AppError::InvalidRequest("corpo JSON inválido"))?;
    payload.validate()?;

    let game = app_state
        .catalog_service
        .create_game(
            &payload.name,
            payload.image.as_deref(),
            payload.stock_total,
            payload.category_id,
            payload.price_per_day,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(game)))
}
