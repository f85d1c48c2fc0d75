// src/db/rental_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::rental::{Rental, RentalDetailRow},
};

const RENTAL_COLUMNS: &str =
    "id, customer_id, game_id, rent_date, days_rented, return_date, original_price, delay_fee, created_at";

/// Filtros da listagem de aluguéis. `offset` e `limit` chegam aqui já
/// normalizados pelo serviço (não-negativo e limitado).
#[derive(Debug, Clone, Default)]
pub struct RentalFilter {
    pub customer_id: Option<Uuid>,
    pub game_id: Option<Uuid>,
    pub offset: i64,
    pub limit: Option<i64>,
}

/// Monta a query de listagem. Filtros e paginação entram sempre via
/// `push_bind`: nada de interpolar valores no SQL.
fn build_list_query(filter: &RentalFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT \
            r.id, r.customer_id, r.game_id, r.rent_date, r.days_rented, \
            r.return_date, r.original_price, r.delay_fee, r.created_at, \
            c.name AS customer_name, g.name AS game_name, \
            g.category_id, cat.name AS category_name \
         FROM rentals r \
         JOIN customers c ON c.id = r.customer_id \
         JOIN games g ON g.id = r.game_id \
         JOIN categories cat ON cat.id = g.category_id",
    );

    let mut has_where = false;
    if let Some(customer_id) = filter.customer_id {
        qb.push(" WHERE r.customer_id = ").push_bind(customer_id);
        has_where = true;
    }
    if let Some(game_id) = filter.game_id {
        qb.push(if has_where { " AND " } else { " WHERE " });
        qb.push("r.game_id = ").push_bind(game_id);
    }

    qb.push(" ORDER BY r.created_at DESC");
    qb.push(" OFFSET ").push_bind(filter.offset);
    if let Some(limit) = filter.limit {
        qb.push(" LIMIT ").push_bind(limit);
    }

    qb
}

#[derive(Clone)]
pub struct RentalRepository {
    pool: PgPool,
}

impl RentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &RentalFilter) -> Result<Vec<RentalDetailRow>, AppError> {
        let rows = build_list_query(filter)
            .build_query_as::<RentalDetailRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Busca o aluguel trancando a linha (`FOR UPDATE`): a leitura do
    /// estado e a transição que vem em seguida rodam na mesma transação.
    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Rental>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rental = sqlx::query_as::<Postgres, Rental>(&format!(
            "SELECT {RENTAL_COLUMNS} FROM rentals WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(rental)
    }

    /// Quantos aluguéis do jogo ainda estão na rua (return_date nulo).
    pub async fn count_active_for_game<'e, E>(
        &self,
        executor: E,
        game_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM rentals
            WHERE game_id = $1 AND return_date IS NULL
            "#,
        )
        .bind(game_id)
        .fetch_one(executor)
        .await?;

        Ok(count)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
        game_id: Uuid,
        rent_date: NaiveDate,
        days_rented: i32,
        original_price: i32,
    ) -> Result<Rental, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rental = sqlx::query_as::<Postgres, Rental>(&format!(
            "INSERT INTO rentals (customer_id, game_id, rent_date, days_rented, original_price) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {RENTAL_COLUMNS}"
        ))
        .bind(customer_id)
        .bind(game_id)
        .bind(rent_date)
        .bind(days_rented)
        .bind(original_price)
        .fetch_one(executor)
        .await?;

        Ok(rental)
    }

    /// Grava a devolução: data e multa num único UPDATE. O predicado
    /// `return_date IS NULL` repete o guard no SQL; um aluguel já
    /// devolvido nunca é sobrescrito.
    pub async fn mark_returned<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        return_date: NaiveDate,
        delay_fee: i32,
    ) -> Result<Option<Rental>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rental = sqlx::query_as::<Postgres, Rental>(&format!(
            "UPDATE rentals \
             SET return_date = $2, delay_fee = $3 \
             WHERE id = $1 AND return_date IS NULL \
             RETURNING {RENTAL_COLUMNS}"
        ))
        .bind(id)
        .bind(return_date)
        .bind(delay_fee)
        .fetch_optional(executor)
        .await?;

        Ok(rental)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_without_filters_has_no_where_clause() {
        let filter = RentalFilter::default();
        let sql = build_list_query(&filter).into_sql();

        assert!(!sql.contains("WHERE r."));
        assert!(sql.contains("ORDER BY r.created_at DESC"));
        assert!(sql.contains("OFFSET $1"));
        assert!(!sql.contains("LIMIT"));
    }

    #[test]
    fn list_query_binds_each_filter_as_parameter() {
        let filter = RentalFilter {
            customer_id: Some(Uuid::new_v4()),
            game_id: Some(Uuid::new_v4()),
            offset: 20,
            limit: Some(10),
        };
        let sql = build_list_query(&filter).into_sql();

        assert!(sql.contains("WHERE r.customer_id = $1"));
        assert!(sql.contains("AND r.game_id = $2"));
        assert!(sql.contains("OFFSET $3"));
        assert!(sql.contains("LIMIT $4"));
        // Nenhum valor literal no SQL, só placeholders.
        assert!(!sql.contains(&filter.customer_id.unwrap().to_string()));
        assert!(!sql.contains("OFFSET 20"));
    }

    #[test]
    fn list_query_with_single_filter_starts_where_correctly() {
        let filter = RentalFilter {
            customer_id: None,
            game_id: Some(Uuid::new_v4()),
            offset: 0,
            limit: None,
        };
        let sql = build_list_query(&filter).into_sql();

        assert!(sql.contains("WHERE r.game_id = $1"));
        assert!(!sql.contains(" AND "));
    }
}
