// src/handlers/rentals.rs

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
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
    models::rental::{Rental, RentalWithDetails},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalPayload {
    pub customer_id: Uuid,
    pub game_id: Uuid,

    #[validate(range(min = 1, message = "daysRented deve ser um inteiro positivo."))]
    #[schema(example = 3)]
    pub days_rented: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RentalsQuery {
    /// Filtra pelos aluguéis de um cliente.
    pub customer_id: Option<Uuid>,
    /// Filtra pelos aluguéis de um jogo.
    pub game_id: Option<Uuid>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

// GET /rentals
#[utoipa::path(
    get,
    path = "/rentals",
    tag = "Aluguéis",
    params(RentalsQuery),
    responses(
        (status = 200, description = "Lista de aluguéis com cliente e jogo embutidos", body = Vec<RentalWithDetails>)
    )
)]
pub async fn get_all_rentals(
    State(app_state): State<AppState>,
    Query(query): Query<RentalsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rentals = app_state
        .rental_service
        .list(query.customer_id, query.game_id, query.offset, query.limit)
        .await?;

    Ok((StatusCode::OK, Json(rentals)))
}

// POST /rentals
#[utoipa::path(
    post,
    path = "/rentals",
    tag = "Aluguéis",
    request_body = CreateRentalPayload,
    responses(
        (status = 201, description = "Aluguel criado", body = Rental),
        (status = 400, description = "Referência inexistente, dias não positivos ou jogo sem estoque")
    )
)]
pub async fn create_rental(
    State(app_state): State<AppState>,
    payload: Result<Json<CreateRentalPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|_| AppError::InvalidRequest("corpo JSON inválido"))?;
    payload.validate()?;

    let rental = app_state
        .rental_service
        .create_rental(
            &app_state.db_pool,
            payload.customer_id,
            payload.game_id,
            payload.days_rented,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(rental)))
}

// POST /rentals/{id}/return
#[utoipa::path(
    post,
    path = "/rentals/{id}/return",
    tag = "Aluguéis",
    params(
        ("id" = Uuid, Path, description = "ID do aluguel")
    ),
    responses(
        (status = 200, description = "Devolução registrada", body = Rental),
        (status = 400, description = "Aluguel já devolvido"),
        (status = 404, description = "Aluguel não encontrado")
    )
)]
pub async fn return_rental(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let rental = app_state
        .rental_service
        .return_rental(&app_state.db_pool, id)
        .await?;

    Ok((StatusCode::OK, Json(rental)))
}

// DELETE /rentals/{id}
#[utoipa::path(
    delete,
    path = "/rentals/{id}",
    tag = "Aluguéis",
    params(
        ("id" = Uuid, Path, description = "ID do aluguel")
    ),
    responses(
        (status = 200, description = "Aluguel excluído"),
        (status = 400, description = "Aluguel já devolvido"),
        (status = 404, description = "Aluguel não encontrado")
    )
)]
pub async fn delete_rental(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .rental_service
        .delete_rental(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rental_payload_rejects_non_positive_days() {
        let mut payload = CreateRentalPayload {
            customer_id: Uuid::new_v4(),
            game_id: Uuid::new_v4(),
            days_rented: 0,
        };
        assert!(payload.validate().is_err());

        payload.days_rented = -3;
        assert!(payload.validate().is_err());

        payload.days_rented = 1;
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn rental_payload_uses_camel_case_wire_names() {
        let payload: CreateRentalPayload = serde_json::from_value(serde_json::json!({
            "customerId": Uuid::new_v4(),
            "gameId": Uuid::new_v4(),
            "daysRented": 3,
        }))
        .unwrap();
        assert_eq!(payload.days_rented, 3);
    }

    #[test]
    fn rentals_query_parses_pagination_and_filters() {
        let query: RentalsQuery = serde_json::from_value(serde_json::json!({
            "customerId": Uuid::new_v4(),
            "offset": 10,
            "limit": 5,
        }))
        .unwrap();

        assert!(query.customer_id.is_some());
        assert!(query.game_id.is_none());
        assert_eq!(query.offset, Some(10));
        assert_eq!(query.limit, Some(5));
    }
}
