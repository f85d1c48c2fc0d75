// src/services/catalog_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{Category, Game, GameWithCategory},
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.repo.list_categories().await
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, AppError> {
        // Checagem explícita para devolver 409; a constraint UNIQUE cobre
        // o que escapar entre a checagem e o INSERT.
        if self.repo.find_category_by_name(name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "A categoria '{}' já existe.",
                name
            )));
        }

        self.repo.create_category(name).await
    }

    pub async fn list_games(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<GameWithCategory>, AppError> {
        self.repo.list_games(name_prefix).await
    }

    pub async fn create_game(
        &self,
        name: &str,
        image: Option<&str>,
        stock_total: i32,
        category_id: Uuid,
        price_per_day: i32,
    ) -> Result<Game, AppError> {
        self.repo
            .create_game(name, image, stock_total, category_id, price_per_day)
            .await
    }
}
