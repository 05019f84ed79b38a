use chrono::{DateTime, Utc};
use launchpad_core::RawToken;

use crate::classifier::{bonding_progress, classify, GraduationTracker, Thresholds};
use crate::token::Token;

const IPFS_SCHEME: &str = "ipfs://";
const IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// Rewrites `ipfs://` URLs to the public gateway
pub fn resolve_image_url(url: &str) -> String {
    match url.strip_prefix(IPFS_SCHEME) {
        Some(path) => format!("{}{}", IPFS_GATEWAY, path),
        None => url.to_string(),
    }
}

/// Outcome of mapping one tick's rows
#[derive(Debug, Clone, Default)]
pub struct MappedTokens {
    pub tokens: Vec<Token>,
    pub newly_graduated: usize,
}

/// Maps one upstream row into a `Token`, classifying it through `tracker`.
///
/// `index` stands in for the mint when the row has none; such rows are
/// classified by market cap alone and never enter the graduated set. `now`
/// stands in for a missing or unparseable creation time.
pub fn map_raw_token(
    raw: &RawToken,
    index: usize,
    now: DateTime<Utc>,
    thresholds: &Thresholds,
    tracker: &GraduationTracker,
) -> (Token, bool) {
    let market_cap = raw.market_cap.unwrap_or(0.0).max(0.0);
    let (mint, status, promoted) = match raw.mint.as_deref().filter(|m| !m.is_empty()) {
        Some(mint) => {
            let (status, promoted) = tracker.observe(mint, market_cap, thresholds);
            (mint.to_string(), status, promoted)
        }
        None => (index.to_string(), classify(market_cap, false, thresholds), false),
    };

    let token = Token {
        id: mint.clone(),
        name: raw.name.clone().unwrap_or_default(),
        symbol: raw.symbol.clone().unwrap_or_default(),
        image: raw.image_url().map(resolve_image_url).unwrap_or_default(),
        market_cap,
        volume_24h: raw.volume_24h.unwrap_or(0.0),
        price: raw.price.unwrap_or(0.0),
        price_change_24h: raw.price_change_24h.unwrap_or(0.0),
        progress: bonding_progress(market_cap, thresholds.bonding_target),
        created_at: raw.creation_time().unwrap_or(now),
        creator: raw.creator.clone().filter(|c| !c.is_empty()),
        status,
        market_addresses: raw.market_addresses.clone().unwrap_or_default(),
        mint,
    };
    (token, promoted)
}

/// Maps a full list of rows, preserving upstream order
pub fn map_rows(
    rows: &[RawToken],
    now: DateTime<Utc>,
    thresholds: &Thresholds,
    tracker: &GraduationTracker,
) -> MappedTokens {
    let mut mapped = MappedTokens {
        tokens: Vec::with_capacity(rows.len()),
        newly_graduated: 0,
    };
    for (index, raw) in rows.iter().enumerate() {
        let (token, promoted) = map_raw_token(raw, index, now, thresholds, tracker);
        if promoted {
            mapped.newly_graduated += 1;
        }
        mapped.tokens.push(token);
    }
    mapped
}
