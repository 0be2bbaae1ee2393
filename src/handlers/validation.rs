// src/handlers/validation.rs

use rust_decimal::Decimal;
use validator::ValidationError;

// ---
// Validações customizadas compartilhadas pelos payloads.
// O `code` é a chave do catálogo de mensagens (common::i18n).
// ---

pub fn validate_not_blank(val: &str) -> Result<(), ValidationError> {
    if val.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("not_negative");
        err.add_param("min".into(), &0);
        return Err(err);
    }
    Ok(())
}

pub fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("positive");
        err.add_param("exclusive_min".into(), &0);
        return Err(err);
    }
    Ok(())
}

// ---
// Limites das colunas NUMERIC(precisão, escala) da migração.
// Sem isso o Postgres arredonda (0.001 vira 0.00 e cai no CHECK) ou estoura.
// ---
fn fits_numeric_column(val: &Decimal, precision: u32, scale: u32) -> Result<(), ValidationError> {
    if val.normalize().scale() > scale {
        let mut err = ValidationError::new("too_many_decimals");
        err.add_param("max_scale".into(), &scale);
        return Err(err);
    }

    let limit = Decimal::from(10i64.pow(precision - scale));
    if val.abs() >= limit {
        let mut err = ValidationError::new("out_of_range");
        err.add_param("max".into(), &limit);
        return Err(err);
    }
    Ok(())
}

// products.price NUMERIC(12, 2)
pub fn validate_price(val: &Decimal) -> Result<(), ValidationError> {
    validate_positive(val)?;
    fits_numeric_column(val, 12, 2)
}

// raw_materials.stock_quantity NUMERIC(18, 3)
pub fn validate_stock_quantity(val: &Decimal) -> Result<(), ValidationError> {
    validate_not_negative(val)?;
    fits_numeric_column(val, 18, 3)
}

// product_materials.required_quantity NUMERIC(18, 3)
pub fn validate_required_quantity(val: &Decimal) -> Result<(), ValidationError> {
    validate_positive(val)?;
    fits_numeric_column(val, 18, 3)
}
