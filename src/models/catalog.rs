// src/models/catalog.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- CATEGORIA ---
// Imutável depois de criada: não existe endpoint de update/delete.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// --- JOGO ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,

    // Total de cópias físicas da loja. A checagem de disponibilidade
    // compara este valor com a contagem de aluguéis ativos.
    pub stock_total: i32,

    pub category_id: Uuid,

    // Preço em centavos (unidade mínima da moeda).
    pub price_per_day: i32,

    pub created_at: DateTime<Utc>,
}

// Linha do GET /games: o jogo junto com o nome da categoria (JOIN).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameWithCategory {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub stock_total: i32,
    pub category_id: Uuid,
    pub price_per_day: i32,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
}
