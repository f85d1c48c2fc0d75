// src/models/customer.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub name: String,

    // Telefone: 10 ou 11 dígitos, sem máscara.
    pub phone: String,

    // CPF: exatamente 11 dígitos. Chave natural do cliente, com
    // unicidade garantida no banco.
    pub cpf: String,

    pub birthday: NaiveDate,
    pub created_at: DateTime<Utc>,
}
