// src/services/rental_service.rs
//
// O coração da locadora: transições do ciclo de vida do aluguel
// (criar, devolver, excluir) e as duas regras de negócio que as
// guardam: disponibilidade de estoque e cálculo de multa.

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        rental_repo::RentalFilter, CatalogRepository, CustomerRepository, RentalRepository,
    },
    models::rental::{Rental, RentalWithDetails},
};

// Teto da paginação do GET /rentals. Valores maiores são rebaixados
// em vez de rejeitados, mantendo o contrato de passthrough.
const MAX_PAGE_SIZE: i64 = 100;

/// Dias corridos entre a retirada e a data de referência. Negativo se a
/// referência for anterior à retirada (relógio voltou, dado corrompido).
fn days_elapsed(rent_date: NaiveDate, reference: NaiveDate) -> i64 {
    (reference - rent_date).num_days()
}

/// Multa de devolução: preço por dia vezes TODOS os dias corridos desde
/// a retirada, não apenas os dias além do prazo combinado. Devolução no
/// mesmo dia (ou antes) não gera multa.
fn delay_fee(price_per_day: i32, rent_date: NaiveDate, reference: NaiveDate) -> i32 {
    let days = days_elapsed(rent_date, reference);
    if days <= 0 {
        return 0;
    }
    price_per_day.saturating_mul(days as i32)
}

/// Um novo aluguel só entra enquanto a contagem de ativos estiver abaixo
/// do total de cópias do jogo.
fn stock_available(stock_total: i32, active_count: i64) -> bool {
    active_count < i64::from(stock_total)
}

/// Guard de transição: devolvido é estado terminal. Vale tanto para a
/// devolução quanto para a exclusão.
fn ensure_active(rental: &Rental) -> Result<(), AppError> {
    if !rental.is_active() {
        return Err(AppError::InvalidState);
    }
    Ok(())
}

fn normalize_paging(offset: Option<i64>, limit: Option<i64>) -> (i64, Option<i64>) {
    let offset = offset.unwrap_or(0).max(0);
    let limit = limit.map(|l| l.clamp(1, MAX_PAGE_SIZE));
    (offset, limit)
}

#[derive(Clone)]
pub struct RentalService {
    rental_repo: RentalRepository,
    catalog_repo: CatalogRepository,
    customer_repo: CustomerRepository,
}

impl RentalService {
    pub fn new(
        rental_repo: RentalRepository,
        catalog_repo: CatalogRepository,
        customer_repo: CustomerRepository,
    ) -> Self {
        Self {
            rental_repo,
            catalog_repo,
            customer_repo,
        }
    }

    pub async fn list(
        &self,
        customer_id: Option<Uuid>,
        game_id: Option<Uuid>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<RentalWithDetails>, AppError> {
        let (offset, limit) = normalize_paging(offset, limit);
        let filter = RentalFilter {
            customer_id,
            game_id,
            offset,
            limit,
        };

        let rows = self.rental_repo.list(&filter).await?;
        Ok(rows.into_iter().map(RentalWithDetails::from).collect())
    }

    /// Cria um aluguel: cliente e jogo precisam existir, os dias precisam
    /// ser positivos e o jogo precisa ter cópia disponível. Qualquer
    /// pré-condição violada é 400, sem escrita parcial.
    pub async fn create_rental(
        &self,
        pool: &PgPool,
        customer_id: Uuid,
        game_id: Uuid,
        days_rented: i32,
    ) -> Result<Rental, AppError> {
        // O validator já barra isso no handler; o serviço repete o guard
        // para quem chegar por outro caminho.
        if days_rented <= 0 {
            return Err(AppError::InvalidRequest("daysRented deve ser positivo"));
        }

        // Referência inválida é requisição inválida (400), não 404.
        self.customer_repo
            .find_by_id(customer_id)
            .await?
            .ok_or(AppError::InvalidRequest("cliente inexistente"))?;

        let mut tx = pool.begin().await?;

        // Tranca a linha do jogo: a contagem de ativos e o INSERT enxergam
        // o mesmo estoque mesmo com criações concorrentes do último
        // exemplar. Quem perder a corrida recebe 400.
        let game = self
            .catalog_repo
            .find_game_for_update(&mut *tx, game_id)
            .await?
            .ok_or(AppError::InvalidRequest("jogo inexistente"))?;

        let active_count = self
            .rental_repo
            .count_active_for_game(&mut *tx, game_id)
            .await?;

        if !stock_available(game.stock_total, active_count) {
            return Err(AppError::InvalidRequest("jogo sem estoque disponível"));
        }

        let rent_date = Utc::now().date_naive();
        let original_price = game.price_per_day.saturating_mul(days_rented);

        let rental = self
            .rental_repo
            .create(
                &mut *tx,
                customer_id,
                game_id,
                rent_date,
                days_rented,
                original_price,
            )
            .await?;

        tx.commit().await?;
        Ok(rental)
    }

    /// Devolve um aluguel ativo: grava data de devolução e multa numa
    /// transição única. Aluguel inexistente é 404; já devolvido é 400.
    pub async fn return_rental(&self, pool: &PgPool, rental_id: Uuid) -> Result<Rental, AppError> {
        let mut tx = pool.begin().await?;

        let rental = self
            .rental_repo
            .find_by_id_for_update(&mut *tx, rental_id)
            .await?
            .ok_or(AppError::NotFound)?;

        ensure_active(&rental)?;

        let game = self
            .catalog_repo
            .find_game_by_id(&mut *tx, rental.game_id)
            .await?
            .ok_or_else(|| {
                AppError::from(anyhow::anyhow!(
                    "aluguel {} referencia jogo inexistente",
                    rental.id
                ))
            })?;

        let today = Utc::now().date_naive();
        let fee = delay_fee(game.price_per_day, rental.rent_date, today);

        let updated = self
            .rental_repo
            .mark_returned(&mut *tx, rental_id, today, fee)
            .await?
            // A linha está trancada e o guard passou; se o UPDATE não
            // encontrou nada, o estado mudou por fora.
            .ok_or(AppError::InvalidState)?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Exclui um aluguel ainda ativo. Mesmos guards da devolução: as duas
    /// transições terminais são mutuamente exclusivas.
    pub async fn delete_rental(&self, pool: &PgPool, rental_id: Uuid) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        let rental = self
            .rental_repo
            .find_by_id_for_update(&mut *tx, rental_id)
            .await?
            .ok_or(AppError::NotFound)?;

        ensure_active(&rental)?;

        self.rental_repo.delete(&mut *tx, rental.id).await?;

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Days};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn active_rental(rent_date: NaiveDate) -> Rental {
        Rental {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            game_id: Uuid::new_v4(),
            rent_date,
            days_rented: 3,
            return_date: None,
            original_price: 3000,
            delay_fee: None,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    // --- Multa ---

    #[test]
    fn same_day_return_has_no_fee() {
        let d = date(2024, 3, 10);
        assert_eq!(delay_fee(1000, d, d), 0);
    }

    #[test]
    fn fee_charges_every_elapsed_day_since_rent_date() {
        // Modelo literal: cobra desde o primeiro dia, não só os dias além
        // do prazo combinado.
        let rent = date(2024, 3, 10);
        for n in 0..30u64 {
            let reference = rent.checked_add_days(Days::new(n)).unwrap();
            assert_eq!(delay_fee(1000, rent, reference), 1000 * n as i32);
        }
    }

    #[test]
    fn fee_for_five_days_at_ten_per_day_is_fifty() {
        let rent = date(2024, 3, 10);
        assert_eq!(delay_fee(10, rent, date(2024, 3, 15)), 50);
    }

    #[test]
    fn reference_before_rent_date_yields_zero_fee() {
        assert_eq!(delay_fee(1000, date(2024, 3, 10), date(2024, 3, 8)), 0);
    }

    #[test]
    fn fee_crosses_month_boundaries_by_calendar_days() {
        assert_eq!(delay_fee(500, date(2024, 1, 30), date(2024, 2, 2)), 1500);
    }

    // --- Disponibilidade ---

    #[test]
    fn stock_is_available_below_the_total() {
        assert!(stock_available(3, 0));
        assert!(stock_available(3, 2));
    }

    #[test]
    fn stock_is_exhausted_at_the_total() {
        assert!(!stock_available(3, 3));
        assert!(!stock_available(3, 4));
        assert!(!stock_available(1, 1));
    }

    #[test]
    fn serialized_creates_never_exceed_stock() {
        // Simulação do invariante: numa sequência estritamente serializada
        // de criações, a contagem de ativos nunca passa do estoque.
        let stock_total = 3;
        let mut active: i64 = 0;
        let mut accepted = 0;

        for _ in 0..10 {
            if stock_available(stock_total, active) {
                active += 1;
                accepted += 1;
            }
        }

        assert_eq!(accepted, 3);
        assert!(active <= i64::from(stock_total));
    }

    #[test]
    fn returning_a_copy_frees_stock_for_the_next_rental() {
        let stock_total = 1;
        let mut active: i64 = 1;
        assert!(!stock_available(stock_total, active));

        active -= 1; // devolução
        assert!(stock_available(stock_total, active));
    }

    // --- Guards de transição ---

    #[test]
    fn active_rental_passes_the_guard() {
        let rental = active_rental(date(2024, 3, 10));
        assert!(ensure_active(&rental).is_ok());
    }

    #[test]
    fn returned_rental_is_terminal_for_both_transitions() {
        // O mesmo guard protege devolução e exclusão: quem vencer primeiro
        // torna a outra transição ilegal.
        let mut rental = active_rental(date(2024, 3, 10));
        rental.return_date = Some(date(2024, 3, 15));
        rental.delay_fee = Some(5000);

        match ensure_active(&rental) {
            Err(AppError::InvalidState) => {}
            other => panic!("esperava InvalidState, veio {:?}", other),
        }
    }

    // --- Paginação ---

    #[test]
    fn paging_defaults_to_zero_offset_and_no_limit() {
        assert_eq!(normalize_paging(None, None), (0, None));
    }

    #[test]
    fn paging_rejects_negative_offset() {
        assert_eq!(normalize_paging(Some(-5), None), (0, None));
    }

    #[test]
    fn paging_clamps_limit_into_bounds() {
        assert_eq!(normalize_paging(None, Some(0)), (0, Some(1)));
        assert_eq!(normalize_paging(None, Some(-3)), (0, Some(1)));
        assert_eq!(normalize_paging(Some(40), Some(25)), (40, Some(25)));
        assert_eq!(normalize_paging(None, Some(10_000)), (0, Some(MAX_PAGE_SIZE)));
    }
}
