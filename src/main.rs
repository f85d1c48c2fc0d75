//src/main.rs

use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let port = app_state.port;

    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/categories",
            post(handlers::catalog::create_category).get(handlers::catalog::get_all_categories),
        )
        .route(
            "/games",
            post(handlers::catalog::create_game).get(handlers::catalog::get_all_games),
        )
        .route(
            "/customers",
            post(handlers::customers::create_customer)
                .get(handlers::customers::get_all_customers),
        )
        .route(
            "/customers/{id}",
            get(handlers::customers::get_customer).put(handlers::customers::update_customer),
        )
        .route(
            "/rentals",
            post(handlers::rentals::create_rental).get(handlers::rentals::get_all_rentals),
        )
        .route("/rentals/{id}/return", post(handlers::rentals::return_rental))
        .route("/rentals/{id}", delete(handlers::rentals::delete_rental))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
