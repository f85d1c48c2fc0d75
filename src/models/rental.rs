// src/models/rental.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- ALUGUEL ---
// Ciclo de vida: ATIVO (return_date nulo) -> DEVOLVIDO (return_date
// preenchido, terminal) ou exclusão física enquanto ainda ATIVO.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub game_id: Uuid,

    // Data da retirada, definida como "hoje" na criação.
    pub rent_date: NaiveDate,

    // Duração combinada, em dias (> 0).
    pub days_rented: i32,

    // Nulo enquanto o jogo ainda está fora.
    pub return_date: Option<NaiveDate>,

    // price_per_day × days_rented, congelado na criação.
    pub original_price: i32,

    // Nulo até a devolução.
    pub delay_fee: Option<i32>,

    pub created_at: DateTime<Utc>,
}

impl Rental {
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }
}

// Linha "achatada" do JOIN de listagem (rentals + customers + games +
// categories). Só existe para o sqlx mapear; o wire usa RentalWithDetails.
#[derive(Debug, Clone, FromRow)]
pub struct RentalDetailRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub game_id: Uuid,
    pub rent_date: NaiveDate,
    pub days_rented: i32,
    pub return_date: Option<NaiveDate>,
    pub original_price: i32,
    pub delay_fee: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub customer_name: String,
    pub game_name: String,
    pub category_id: Uuid,
    pub category_name: String,
}

// --- RESPOSTA DO GET /rentals ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalCustomer {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalGame {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub category_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalWithDetails {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub game_id: Uuid,
    pub rent_date: NaiveDate,
    pub days_rented: i32,
    pub return_date: Option<NaiveDate>,
    pub original_price: i32,
    pub delay_fee: Option<i32>,
    pub customer: RentalCustomer,
    pub game: RentalGame,
}

impl From<RentalDetailRow> for RentalWithDetails {
    fn from(row: RentalDetailRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            game_id: row.game_id,
            rent_date: row.rent_date,
            days_rented: row.days_rented,
            return_date: row.return_date,
            original_price: row.original_price,
            delay_fee: row.delay_fee,
            customer: RentalCustomer {
                id: row.customer_id,
                name: row.customer_name,
            },
            game: RentalGame {
                id: row.game_id,
                name: row.game_name,
                category_id: row.category_id,
                category_name: row.category_name,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> RentalDetailRow {
        RentalDetailRow {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            game_id: Uuid::new_v4(),
            rent_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            days_rented: 3,
            return_date: None,
            original_price: 3000,
            delay_fee: None,
            created_at: Utc::now(),
            customer_name: "João Alfredo".to_string(),
            game_name: "Banco Imobiliário".to_string(),
            category_id: Uuid::new_v4(),
            category_name: "Estratégia".to_string(),
        }
    }

    #[test]
    fn active_rental_serializes_with_null_return_fields() {
        let details = RentalWithDetails::from(sample_row());
        let json = serde_json::to_value(&details).unwrap();

        assert!(json["returnDate"].is_null());
        assert!(json["delayFee"].is_null());
        assert_eq!(json["daysRented"], 3);
        assert_eq!(json["originalPrice"], 3000);
    }

    #[test]
    fn details_embed_customer_and_game_summaries() {
        let row = sample_row();
        let details = RentalWithDetails::from(row.clone());
        let json = serde_json::to_value(&details).unwrap();

        assert_eq!(json["customer"]["id"], json["customerId"]);
        assert_eq!(json["customer"]["name"], "João Alfredo");
        assert_eq!(json["game"]["id"], json["gameId"]);
        assert_eq!(json["game"]["name"], "Banco Imobiliário");
        assert_eq!(json["game"]["categoryName"], "Estratégia");
        assert_eq!(
            json["game"]["categoryId"],
            serde_json::to_value(row.category_id).unwrap()
        );
    }

    #[test]
    fn rental_is_active_until_returned() {
        let row = sample_row();
        let rental = Rental {
            id: row.id,
            customer_id: row.customer_id,
            game_id: row.game_id,
            rent_date: row.rent_date,
            days_rented: row.days_rented,
            return_date: None,
            original_price: row.original_price,
            delay_fee: None,
            created_at: row.created_at,
        };
        assert!(rental.is_active());

        let returned = Rental {
            return_date: NaiveDate::from_ymd_opt(2024, 3, 15),
            delay_fee: Some(500),
            ..rental
        };
        assert!(!returned.is_active());
    }
}
