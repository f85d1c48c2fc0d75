use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// O contrato da API não expõe corpo nos caminhos de falha: a resposta
// de erro é somente o status HTTP.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Pré-condição de negócio violada (referência inexistente, sem
    // estoque, dias não positivos...). Sempre vira 400.
    #[error("Requisição inválida: {0}")]
    InvalidRequest(&'static str),

    #[error("Registro duplicado: {0}")]
    Conflict(String),

    #[error("Registro não encontrado")]
    NotFound,

    // Transição ilegal no ciclo de vida do aluguel (devolver ou excluir
    // um aluguel já devolvido).
    #[error("Operação ilegal para o estado atual do registro")]
    InvalidState,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::ValidationError(_)
            | AppError::InvalidRequest(_)
            | AppError::InvalidState => StatusCode::BAD_REQUEST,

            AppError::Conflict(_) => StatusCode::CONFLICT,

            AppError::NotFound => StatusCode::NOT_FOUND,

            // Erros de infraestrutura viram 500. O `tracing` registra a
            // mensagem detalhada que o `thiserror` nos deu.
            e => {
                tracing::error!("Erro interno do servidor: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        status.into_response()
    }
}
