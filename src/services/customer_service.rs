// src/services/customer_service.rs

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{common::error::AppError, db::CustomerRepository, models::customer::Customer};

#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, cpf_prefix: Option<&str>) -> Result<Vec<Customer>, AppError> {
        self.repo.list(cpf_prefix).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Customer, AppError> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn create(
        &self,
        name: &str,
        phone: &str,
        cpf: &str,
        birthday: NaiveDate,
    ) -> Result<Customer, AppError> {
        if self.repo.find_by_cpf(cpf, None).await?.is_some() {
            return Err(AppError::Conflict(format!("CPF '{}' já cadastrado.", cpf)));
        }

        self.repo.create(name, phone, cpf, birthday).await
    }

    /// Atualiza o cadastro. O conflito de CPF ignora o próprio cliente:
    /// reenviar o mesmo corpo precisa continuar respondendo 200.
    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        phone: &str,
        cpf: &str,
        birthday: NaiveDate,
    ) -> Result<(), AppError> {
        if self.repo.find_by_cpf(cpf, Some(id)).await?.is_some() {
            return Err(AppError::Conflict(format!("CPF '{}' já cadastrado.", cpf)));
        }

        // Sem checagem de existência: o contrato do PUT não tem 404.
        self.repo.update(id, name, phone, cpf, birthday).await?;
        Ok(())
    }
}
