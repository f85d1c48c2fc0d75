// src/handlers/customers.rs

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{common::error::AppError, config::AppState, models::customer::Customer};

// ---
// Validações customizadas (regras de dígitos do contrato)
// ---

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if (10..=11).contains(&phone.len()) && phone.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(());
    }
    let mut err = ValidationError::new("phone");
    err.message = Some("O telefone deve ter 10 ou 11 dígitos numéricos.".into());
    Err(err)
}

fn validate_cpf(cpf: &str) -> Result<(), ValidationError> {
    if cpf.len() == 11 && cpf.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(());
    }
    let mut err = ValidationError::new("cpf");
    err.message = Some("O CPF deve ter exatamente 11 dígitos numéricos.".into());
    Err(err)
}

// Mesmo corpo no POST e no PUT.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "João Alfredo")]
    pub name: String,

    #[validate(custom(function = "validate_phone"))]
    #[schema(example = "21998899222")]
    pub phone: String,

    #[validate(custom(function = "validate_cpf"))]
    #[schema(example = "01234567890")]
    pub cpf: String,

    #[schema(value_type = String, format = Date, example = "1992-10-05")]
    pub birthday: NaiveDate,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomersQuery {
    /// Prefixo do CPF.
    pub cpf: Option<String>,
}

// GET /customers
#[utoipa::path(
    get,
    path = "/customers",
    tag = "Clientes",
    params(CustomersQuery),
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Customer>)
    )
)]
pub async fn get_all_customers(
    State(app_state): State<AppState>,
    Query(query): Query<CustomersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state
        .customer_service
        .list(query.cpf.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(customers)))
}

// GET /customers/{id}
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "Clientes",
    params(
        ("id" = Uuid, Path, description = "ID do cliente")
    ),
    responses(
        (status = 200, description = "Cliente encontrado (array de um elemento)", body = Vec<Customer>),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state.customer_service.get(id).await?;

    // O contrato responde um array de um elemento, não o objeto solto.
    Ok((StatusCode::OK, Json(vec![customer])))
}

// POST /customers
#[utoipa::path(
    post,
    path = "/customers",
    tag = "Clientes",
    request_body = CustomerPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Customer),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "CPF já cadastrado")
    )
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    payload: Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|_| AppError::InvalidRequest("corpo JSON inválido"))?;
    payload.validate()?;

    let customer = app_state
        .customer_service
        .create(&payload.name, &payload.phone, &payload.cpf, payload.birthday)
        .await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

// PUT /customers/{id}
#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "Clientes",
    request_body = CustomerPayload,
    params(
        ("id" = Uuid, Path, description = "ID do cliente")
    ),
    responses(
        (status = 200, description = "Cliente atualizado"),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "CPF pertence a outro cliente")
    )
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|_| AppError::InvalidRequest("corpo JSON inválido"))?;
    payload.validate()?;

    app_state
        .customer_service
        .update(id, &payload.name, &payload.phone, &payload.cpf, payload.birthday)
        .await?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> CustomerPayload {
        CustomerPayload {
            name: "João Alfredo".to_string(),
            phone: "21998899222".to_string(),
            cpf: "01234567890".to_string(),
            birthday: NaiveDate::from_ymd_opt(1992, 10, 5).unwrap(),
        }
    }

    #[test]
    fn accepts_a_valid_customer() {
        assert!(valid_payload().validate().is_ok());
    }

    #[test]
    fn phone_accepts_ten_or_eleven_digits() {
        let mut payload = valid_payload();
        payload.phone = "2199889922".to_string(); // 10 dígitos
        assert!(payload.validate().is_ok());

        payload.phone = "21998899222".to_string(); // 11 dígitos
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn phone_rejects_wrong_lengths_and_non_digits() {
        let mut payload = valid_payload();
        payload.phone = "219988992".to_string(); // 9 dígitos
        assert!(payload.validate().is_err());

        payload.phone = "219988992223".to_string(); // 12 dígitos
        assert!(payload.validate().is_err());

        payload.phone = "21-99889922".to_string(); // máscara
        assert!(payload.validate().is_err());
    }

    #[test]
    fn cpf_requires_exactly_eleven_digits() {
        let mut payload = valid_payload();
        payload.cpf = "0123456789".to_string(); // 10 dígitos
        assert!(payload.validate().is_err());

        payload.cpf = "012345678901".to_string(); // 12 dígitos
        assert!(payload.validate().is_err());

        payload.cpf = "0123456789a".to_string(); // letra no meio
        assert!(payload.validate().is_err());

        payload.cpf = "01234567890".to_string();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn name_must_not_be_empty() {
        let mut payload = valid_payload();
        payload.name = String::new();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn birthday_parses_iso_dates_from_the_wire() {
        let payload: CustomerPayload = serde_json::from_value(serde_json::json!({
            "name": "João Alfredo",
            "phone": "21998899222",
            "cpf": "01234567890",
            "birthday": "1992-10-05",
        }))
        .unwrap();

        assert_eq!(payload.birthday, NaiveDate::from_ymd_opt(1992, 10, 5).unwrap());
    }

    #[test]
    fn malformed_birthday_fails_deserialization() {
        let result: Result<CustomerPayload, _> = serde_json::from_value(serde_json::json!({
            "name": "João Alfredo",
            "phone": "21998899222",
            "cpf": "01234567890",
            "birthday": "05/10/1992",
        }));
        assert!(result.is_err());
    }
}
