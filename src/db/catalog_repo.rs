// src/db/catalog_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Category, Game, GameWithCategory},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CATEGORIAS
    // =========================================================================

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<Postgres, Category>(
            r#"
            SELECT id, name, created_at
            FROM categories
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<Postgres, Category>(
            r#"
            SELECT id, name, created_at
            FROM categories
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, AppError> {
        let category = sqlx::query_as::<Postgres, Category>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // A pré-checagem de nome roda fora de transação; a constraint
            // UNIQUE ainda pode disparar numa corrida.
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!("A categoria '{}' já existe.", name));
                }
            }
            e.into()
        })?;

        Ok(category)
    }

    // =========================================================================
    //  JOGOS
    // =========================================================================

    /// Lista os jogos com o nome da categoria, opcionalmente filtrando
    /// por prefixo do nome (contrato do `?name=` na query string).
    pub async fn list_games(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<GameWithCategory>, AppError> {
        // O padrão do LIKE vai como parâmetro: o prefixo nunca é
        // concatenado direto no SQL.
        let games = match name_prefix {
            Some(prefix) => {
                sqlx::query_as::<Postgres, GameWithCategory>(
                    r#"
                    SELECT
                        g.id, g.name, g.image, g.stock_total, g.category_id,
                        g.price_per_day, c.name AS category_name, g.created_at
                    FROM games g
                    JOIN categories c ON c.id = g.category_id
                    WHERE g.name LIKE $1
                    ORDER BY g.created_at ASC
                    "#,
                )
                .bind(format!("{}%", prefix))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<Postgres, GameWithCategory>(
                    r#"
                    SELECT
                        g.id, g.name, g.image, g.stock_total, g.category_id,
                        g.price_per_day, c.name AS category_name, g.created_at
                    FROM games g
                    JOIN categories c ON c.id = g.category_id
                    ORDER BY g.created_at ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(games)
    }

    pub async fn create_game(
        &self,
        name: &str,
        image: Option<&str>,
        stock_total: i32,
        category_id: Uuid,
        price_per_day: i32,
    ) -> Result<Game, AppError> {
        let game = sqlx::query_as::<Postgres, Game>(
            r#"
            INSERT INTO games (name, image, stock_total, category_id, price_per_day)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, image, stock_total, category_id, price_per_day, created_at
            "#,
        )
        .bind(name)
        .bind(image)
        .bind(stock_total)
        .bind(category_id)
        .bind(price_per_day)
        .fetch_one(&self.pool)
        .await?;

        Ok(game)
    }

    pub async fn find_game_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Game>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let game = sqlx::query_as::<Postgres, Game>(
            r#"
            SELECT id, name, image, stock_total, category_id, price_per_day, created_at
            FROM games
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(game)
    }

    /// Busca o jogo trancando a linha (`FOR UPDATE`). A checagem de
    /// disponibilidade e o INSERT do aluguel rodam na mesma transação,
    /// serializados por jogo.
    pub async fn find_game_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Game>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let game = sqlx::query_as::<Postgres, Game>(
            r#"
            SELECT id, name, image, stock_total, category_id, price_per_day, created_at
            FROM games
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(game)
    }
}
