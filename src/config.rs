// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{CatalogRepository, CustomerRepository, RentalRepository},
    services::{CatalogService, CustomerService, RentalService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub port: u16,
    pub catalog_service: CatalogService,
    pub customer_service: CustomerService,
    pub rental_service: RentalService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // Sem essas duas variáveis o processo não tem como subir.
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let port: u16 = env::var("PORT")
            .expect("PORT deve ser definida")
            .parse()
            .expect("PORT deve ser um número de porta válido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let customer_repo = CustomerRepository::new(db_pool.clone());
        let rental_repo = RentalRepository::new(db_pool.clone());

        let catalog_service = CatalogService::new(catalog_repo.clone());
        let customer_service = CustomerService::new(customer_repo.clone());
        let rental_service = RentalService::new(rental_repo, catalog_repo, customer_repo);

        Ok(Self {
            db_pool,
            port,
            catalog_service,
            customer_service,
            rental_service,
        })
    }
}
