// src/common/db_utils.rs

use sqlx::{Postgres, Transaction};

use crate::common::error::AppError;

// ---
// Helper: Classificação de violações de constraint do Postgres
// ---
// Os repositórios usam isso para transformar sqlx::Error em AppError "amigável".
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConstraintViolation {
    Unique(String),
    ForeignKey(String),
    Check(String),
    // SQLSTATE 22003: valor não cabe no NUMERIC(p, s)
    NumericOverflow,
}

const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

pub(crate) fn constraint_violation(err: &sqlx::Error) -> Option<ConstraintViolation> {
    let db_err = err.as_database_error()?;
    let constraint = db_err.constraint().unwrap_or_default().to_string();

    if db_err.is_unique_violation() {
        return Some(ConstraintViolation::Unique(constraint));
    }
    if db_err.is_foreign_key_violation() {
        return Some(ConstraintViolation::ForeignKey(constraint));
    }
    if db_err.is_check_violation() {
        return Some(ConstraintViolation::Check(constraint));
    }
    if db_err.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE) {
        return Some(ConstraintViolation::NumericOverflow);
    }
    None
}

/// Fallback das escritas: valores recusados pelo banco viram 400, o resto 500.
pub(crate) fn write_error(err: sqlx::Error) -> AppError {
    match constraint_violation(&err) {
        Some(ConstraintViolation::Check(constraint)) => AppError::ValueOutOfRange(constraint),
        Some(ConstraintViolation::NumericOverflow) => {
            AppError::ValueOutOfRange("numeric field overflow".to_string())
        }
        _ => AppError::DatabaseError(err),
    }
}

// ---
// Helper: Transação de leitura consistente
// ---
/// Abre uma transação `REPEATABLE READ, READ ONLY`: todas as consultas feitas
/// nela enxergam o mesmo snapshot do banco.
pub(crate) async fn begin_snapshot(
    pool: &sqlx::PgPool,
) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;

    Ok(tx)
}
