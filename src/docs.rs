// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Catálogo ---
        handlers::catalog::get_all_categories,
        handlers::catalog::create_category,
        handlers::catalog::get_all_games,
        handlers::catalog::create_game,

        // --- Clientes ---
        handlers::customers::get_all_customers,
        handlers::customers::get_customer,
        handlers::customers::create_customer,
        handlers::customers::update_customer,

        // --- Aluguéis ---
        handlers::rentals::get_all_rentals,
        handlers::rentals::create_rental,
        handlers::rentals::return_rental,
        handlers::rentals::delete_rental,
    ),
    components(
        schemas(
            // --- Catálogo ---
            models::catalog::Category,
            models::catalog::Game,
            models::catalog::GameWithCategory,
            handlers::catalog::CreateCategoryPayload,
            handlers::catalog::CreateGamePayload,

            // --- Clientes ---
            models::customer::Customer,
            handlers::customers::CustomerPayload,

            // --- Aluguéis ---
            models::rental::Rental,
            models::rental::RentalWithDetails,
            models::rental::RentalCustomer,
            models::rental::RentalGame,
            handlers::rentals::CreateRentalPayload,
        )
    ),
    tags(
        (name = "Catálogo", description = "Categorias e jogos da locadora"),
        (name = "Clientes", description = "Cadastro de clientes"),
        (name = "Aluguéis", description = "Ciclo de vida dos aluguéis: criação, devolução e exclusão")
    )
)]
pub struct ApiDoc;
