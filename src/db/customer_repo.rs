// src/db/customer_repo.rs

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::customer::Customer};

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lista os clientes, opcionalmente filtrando por prefixo do CPF
    /// (contrato do `?cpf=` na query string).
    pub async fn list(&self, cpf_prefix: Option<&str>) -> Result<Vec<Customer>, AppError> {
        let customers = match cpf_prefix {
            Some(prefix) => {
                sqlx::query_as::<Postgres, Customer>(
                    r#"
                    SELECT id, name, phone, cpf, birthday, created_at
                    FROM customers
                    WHERE cpf LIKE $1
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(format!("{}%", prefix))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<Postgres, Customer>(
                    r#"
                    SELECT id, name, phone, cpf, birthday, created_at
                    FROM customers
                    ORDER BY created_at ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(customers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<Postgres, Customer>(
            r#"
            SELECT id, name, phone, cpf, birthday, created_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Procura um cliente pelo CPF, podendo excluir um id da busca.
    /// No PUT a exclusão é o próprio cliente: reenviar o mesmo CPF não
    /// pode contar como conflito.
    pub async fn find_by_cpf(
        &self,
        cpf: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<Postgres, Customer>(
            r#"
            SELECT id, name, phone, cpf, birthday, created_at
            FROM customers
            WHERE cpf = $1
              AND ($2::uuid IS NULL OR id <> $2)
            "#,
        )
        .bind(cpf)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn create(
        &self,
        name: &str,
        phone: &str,
        cpf: &str,
        birthday: NaiveDate,
    ) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<Postgres, Customer>(
            r#"
            INSERT INTO customers (name, phone, cpf, birthday)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, phone, cpf, birthday, created_at
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(cpf)
        .bind(birthday)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!("CPF '{}' já cadastrado.", cpf));
                }
            }
            e.into()
        })?;

        Ok(customer)
    }

    /// Atualiza o cliente. O contrato do PUT não tem 404: atualizar um id
    /// inexistente é um no-op com 200, igual ao comportamento original.
    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        phone: &str,
        cpf: &str,
        birthday: NaiveDate,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = $1, phone = $2, cpf = $3, birthday = $4
            WHERE id = $5
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(cpf)
        .bind(birthday)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!("CPF '{}' já cadastrado.", cpf));
                }
            }
            e.into()
        })?;

        Ok(result.rows_affected())
    }
}
