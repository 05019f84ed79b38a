//! Quote and liquidity arithmetic for the swap page.
//!
//! Prices here are derived from market cap and supply, not from any pool.

use serde::{Deserialize, Serialize};

use crate::error::{InputErrorKind, Result, ScreenerError};
use crate::token::Token;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapToken {
    pub symbol: String,
    pub name: String,
    pub market_cap: f64,
    pub total_supply: f64,
    pub change: f64,
    pub price: f64,
}

impl SwapToken {
    /// Builds a token with its price derived from market cap and supply
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        market_cap: f64,
        total_supply: f64,
        change: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            market_cap,
            total_supply,
            change,
            price: unit_price(market_cap, total_supply),
        }
    }

    /// Swap view of a launchpad token. The supply is implied by market cap
    /// and price, so tokens without a price have none.
    pub fn from_token(token: &Token) -> Option<Self> {
        if !(token.price.is_finite() && token.price > 0.0) {
            return None;
        }
        Some(Self {
            symbol: token.symbol.clone(),
            name: token.name.clone(),
            market_cap: token.market_cap,
            total_supply: token.market_cap / token.price,
            change: token.price_change_24h,
            price: token.price,
        })
    }
}

/// Base pairs that are always quotable
pub fn default_catalog() -> Vec<SwapToken> {
    vec![
        SwapToken::new("SOL", "Solana", 72_000_000_000.0, 480_000_000.0, 0.0),
        SwapToken::new("USDC", "USD Coin", 60_000_000_000.0, 60_000_000_000.0, 0.0),
        SwapToken::new("BONK", "Bonk", 1_776_000_000.0, 88_800_000_000_000.0, 0.0),
    ]
}

/// Looks a symbol up in `catalog` first, then among launchpad `tokens`.
/// Symbols compare case-insensitively; a launchpad token may also be named
/// by its mint.
pub fn find_swap_token(catalog: &[SwapToken], tokens: &[Token], key: &str) -> Option<SwapToken> {
    catalog
        .iter()
        .find(|t| t.symbol.eq_ignore_ascii_case(key))
        .cloned()
        .or_else(|| {
            tokens
                .iter()
                .find(|t| t.mint == key || t.symbol.eq_ignore_ascii_case(key))
                .and_then(SwapToken::from_token)
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
    pub amount_out: f64,
    pub rate: f64,
    pub minimum_received: f64,
}

/// Price of one unit, 0 when the supply is empty
pub fn unit_price(market_cap: f64, total_supply: f64) -> f64 {
    if total_supply > 0.0 && market_cap.is_finite() {
        market_cap / total_supply
    } else {
        0.0
    }
}

/// Quotes selling `amount` of `sell` for `buy`
pub fn quote(
    sell: &SwapToken,
    buy: &SwapToken,
    amount: f64,
    slippage_pct: f64,
) -> Result<SwapQuote> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ScreenerError::invalid_input(
            InputErrorKind::InvalidAmount,
            format!("swap amount must be positive, got {}", amount),
        ));
    }
    if !(0.0..=100.0).contains(&slippage_pct) {
        return Err(ScreenerError::invalid_input(
            InputErrorKind::InvalidAmount,
            format!("slippage must be between 0 and 100, got {}", slippage_pct),
        ));
    }
    if !buy.price.is_finite() || buy.price <= 0.0 {
        return Err(ScreenerError::invalid_input(
            InputErrorKind::InvalidPrice,
            format!("{} has no price", buy.symbol),
        ));
    }
    if !sell.price.is_finite() || sell.price < 0.0 {
        return Err(ScreenerError::invalid_input(
            InputErrorKind::InvalidPrice,
            format!("{} has an invalid price", sell.symbol),
        ));
    }

    let rate = sell.price / buy.price;
    let amount_out = amount * rate;
    Ok(SwapQuote {
        amount_out,
        rate,
        minimum_received: amount_out * (1.0 - slippage_pct / 100.0),
    })
}

/// Rough APY for a concentrated liquidity position.
///
/// Narrow ranges earn more, and a price sitting in the middle of the range
/// earns a 1.2x bonus (0.8x otherwise).
pub fn estimate_liquidity_apy(
    base_apr: f64,
    range_min: f64,
    range_max: f64,
    current: f64,
) -> Result<f64> {
    let finite = range_min.is_finite() && range_max.is_finite() && current.is_finite();
    if !finite || range_min >= range_max {
        return Err(ScreenerError::invalid_input(
            InputErrorKind::InvalidRange,
            format!("invalid range [{}, {}]", range_min, range_max),
        ));
    }
    if !base_apr.is_finite() {
        return Err(ScreenerError::invalid_input(
            InputErrorKind::Other,
            "base APR must be finite",
        ));
    }

    let width = range_max - range_min;
    let position = (current - range_min) / width;
    let concentration = (1.0 - width / 2.0).max(0.1);
    let placement = if position > 0.3 && position < 0.7 { 1.2 } else { 0.8 };

    Ok((base_apr * concentration * placement).max(0.0))
}
