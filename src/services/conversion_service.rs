use crate::{AppState, error::AppError, models::Conversion};

/// Converts `amount` of `from_coin` into `to_currency` using the cached rate
/// when one is still fresh.
pub async fn convert(
    state: &AppState,
    from_coin: &str,
    to_currency: &str,
    amount: f64,
) -> Result<Conversion, AppError> {
    let from = from_coin.trim().to_lowercase();
    let to = to_currency.trim().to_lowercase();

    if from.is_empty() || to.is_empty() {
        return Err(AppError::InvalidRequest(
            "Invalid request: from_coin and to_currency are required.".to_string(),
        ));
    }

    if from == to {
        return Err(AppError::InvalidRequest(
            "Invalid request: from_coin and to_currency cannot be the same.".to_string(),
        ));
    }

    if !amount.is_finite() {
        return Err(AppError::InvalidRequest(
            "Invalid request: amount must be a finite number.".to_string(),
        ));
    }

    let market = state.market.clone();
    let (pair_from, pair_to) = (from.as_str(), to.as_str());
    let rate = state
        .conversion_cache
        .get_or_fetch(pair_from, pair_to, move || async move {
            market.spot_price(pair_from, pair_to).await
        })
        .await?;

    let Some(conversion_rate) = rate else {
        return Err(AppError::DataNotFound(format!(
            "Conversion rate for {from} to {to} not available."
        )));
    };

    Ok(Conversion {
        converted_amount: conversion_rate * amount,
        from_coin: from,
        to_currency: to,
        amount,
        conversion_rate,
    })
}
