//! Lifecycle classification of launchpad tokens.
//!
//! A token is `New` below `graduating_min`, `Graduating` up to `graduation`,
//! and `Graduated` at or above it. Graduation is sticky: the tracker remembers
//! every mint it has seen at or above the threshold and keeps reporting it as
//! graduated for the life of the process.

use dashmap::DashSet;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

use crate::error::{Result, ScreenerError};
use crate::token::{LifecycleStatus, Token};

/// Market-cap thresholds in USD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub graduating_min: f64,
    pub graduation: f64,
    /// Market cap at which bonding progress reaches 100%
    pub bonding_target: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            graduating_min: 12_000.0,
            graduation: 70_000.0,
            bonding_target: 70_000.0,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<()> {
        let all_finite = [self.graduating_min, self.graduation, self.bonding_target]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if !all_finite {
            return Err(ScreenerError::ConfigError(
                "thresholds must be positive finite numbers".to_string(),
            ));
        }
        if self.graduating_min >= self.graduation {
            return Err(ScreenerError::ConfigError(format!(
                "graduating_min ({}) must be below graduation threshold ({})",
                self.graduating_min, self.graduation
            )));
        }
        Ok(())
    }
}

fn sanitize(market_cap: f64) -> f64 {
    if market_cap.is_finite() && market_cap > 0.0 {
        market_cap
    } else {
        0.0
    }
}

/// Pure classification of a market cap
pub fn classify(
    market_cap: f64,
    already_graduated: bool,
    thresholds: &Thresholds,
) -> LifecycleStatus {
    let market_cap = sanitize(market_cap);
    if already_graduated || market_cap >= thresholds.graduation {
        LifecycleStatus::Graduated
    } else if market_cap >= thresholds.graduating_min {
        LifecycleStatus::Graduating
    } else {
        LifecycleStatus::New
    }
}

/// Bonding progress in percent, clamped to `[0, 100]`
pub fn bonding_progress(market_cap: f64, bonding_target: f64) -> f64 {
    if !(bonding_target.is_finite() && bonding_target > 0.0) {
        return 0.0;
    }
    (sanitize(market_cap) / bonding_target * 100.0).min(100.0)
}

/// Market cap still missing before the bonding target is reached
pub fn remaining_to_bond(market_cap: f64, bonding_target: f64) -> f64 {
    (bonding_target - sanitize(market_cap)).max(0.0)
}

/// Set of mints that have reached graduation at least once
#[derive(Debug, Default)]
pub struct GraduationTracker {
    graduated: DashSet<String>,
}

impl GraduationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_graduated(&self, mint: &str) -> bool {
        self.graduated.contains(mint)
    }

    pub fn len(&self) -> usize {
        self.graduated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graduated.is_empty()
    }

    /// Classifies `mint` at `market_cap`, promoting it for good if it crossed
    /// the graduation threshold. Returns the status and whether this call was
    /// the promotion.
    pub fn observe(
        &self,
        mint: &str,
        market_cap: f64,
        thresholds: &Thresholds,
    ) -> (LifecycleStatus, bool) {
        let already = self.is_graduated(mint);
        let status = classify(market_cap, already, thresholds);
        let promoted = status == LifecycleStatus::Graduated && !already;
        if promoted {
            self.graduated.insert(mint.to_string());
            debug!(mint = %mint, market_cap, "Token graduated");
        }
        (status, promoted)
    }
}

/// Tokens split by lifecycle stage, each list newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassifiedTokens {
    pub new: Vec<Token>,
    pub graduating: Vec<Token>,
    pub graduated: Vec<Token>,
}

impl ClassifiedTokens {
    pub fn section(&self, status: LifecycleStatus) -> &[Token] {
        match status {
            LifecycleStatus::New => &self.new,
            LifecycleStatus::Graduating => &self.graduating,
            LifecycleStatus::Graduated => &self.graduated,
        }
    }

    pub fn len(&self) -> usize {
        self.new.len() + self.graduating.len() + self.graduated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Newest first, ties broken by mint so ordering is stable across ticks
pub fn newest_first(a: &Token, b: &Token) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.mint.cmp(&b.mint))
}

/// Groups already-classified tokens by their status
pub fn bucket(tokens: &[Token]) -> ClassifiedTokens {
    let mut classified = ClassifiedTokens::default();
    for token in tokens {
        match token.status {
            LifecycleStatus::New => classified.new.push(token.clone()),
            LifecycleStatus::Graduating => classified.graduating.push(token.clone()),
            LifecycleStatus::Graduated => classified.graduated.push(token.clone()),
        }
    }
    classified.new.sort_by(newest_first);
    classified.graduating.sort_by(newest_first);
    classified.graduated.sort_by(newest_first);
    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn token(mint: &str, created_ms: i64, status: LifecycleStatus) -> Token {
        Token {
            id: mint.to_string(),
            mint: mint.to_string(),
            name: mint.to_string(),
            symbol: mint.to_string(),
            image: String::new(),
            market_cap: 0.0,
            volume_24h: 0.0,
            price: 0.0,
            price_change_24h: 0.0,
            progress: 0.0,
            created_at: Utc.timestamp_millis_opt(created_ms).unwrap(),
            creator: None,
            status,
            market_addresses: Vec::new(),
        }
    }

    #[test]
    fn test_below_lower_threshold_is_new() {
        let t = Thresholds::default();
        for cap in [0.0, 1.0, 5_000.0, 11_999.99] {
            assert_eq!(classify(cap, false, &t), LifecycleStatus::New, "cap {}", cap);
        }
    }

    #[test]
    fn test_between_thresholds_is_graduating() {
        let t = Thresholds::default();
        for cap in [12_000.0, 40_000.0, 69_999.99] {
            assert_eq!(classify(cap, false, &t), LifecycleStatus::Graduating, "cap {}", cap);
        }
    }

    #[test]
    fn test_at_or_above_graduation_is_graduated() {
        let t = Thresholds::default();
        for cap in [70_000.0, 70_000.01, 12_600_000.0] {
            assert_eq!(classify(cap, false, &t), LifecycleStatus::Graduated, "cap {}", cap);
        }
    }

    #[test]
    fn test_garbage_market_caps_count_as_zero() {
        let t = Thresholds::default();
        assert_eq!(classify(f64::NAN, false, &t), LifecycleStatus::New);
        assert_eq!(classify(-50_000.0, false, &t), LifecycleStatus::New);
        assert_eq!(classify(f64::INFINITY, false, &t), LifecycleStatus::New);
    }

    #[test]
    fn test_graduation_is_sticky() {
        let t = Thresholds::default();
        let tracker = GraduationTracker::new();

        assert_eq!(tracker.observe("MintA", 30_000.0, &t), (LifecycleStatus::Graduating, false));
        assert_eq!(tracker.observe("MintA", 75_000.0, &t), (LifecycleStatus::Graduated, true));
        // Dumped back below both thresholds: still graduated, not promoted again
        assert_eq!(tracker.observe("MintA", 500.0, &t), (LifecycleStatus::Graduated, false));
        assert_eq!(tracker.observe("MintA", 20_000.0, &t), (LifecycleStatus::Graduated, false));

        // Other mints are unaffected
        assert_eq!(tracker.observe("MintB", 500.0, &t), (LifecycleStatus::New, false));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_bonding_progress_is_clamped() {
        assert_eq!(bonding_progress(35_000.0, 70_000.0), 50.0);
        assert_eq!(bonding_progress(140_000.0, 70_000.0), 100.0);
        assert_eq!(bonding_progress(-1.0, 70_000.0), 0.0);
        assert_eq!(bonding_progress(10.0, 0.0), 0.0);
        assert_eq!(remaining_to_bond(50_000.0, 70_000.0), 20_000.0);
        assert_eq!(remaining_to_bond(90_000.0, 70_000.0), 0.0);
    }

    #[test]
    fn test_bucket_sorts_newest_first() {
        let tokens = vec![
            token("old", 1_000, LifecycleStatus::New),
            token("grad", 5_000, LifecycleStatus::Graduated),
            token("newer", 3_000, LifecycleStatus::New),
            token("b-tie", 2_000, LifecycleStatus::Graduating),
            token("a-tie", 2_000, LifecycleStatus::Graduating),
        ];
        let classified = bucket(&tokens);

        let mints = |list: &[Token]| list.iter().map(|t| t.mint.clone()).collect::<Vec<_>>();
        assert_eq!(mints(&classified.new), vec!["newer", "old"]);
        assert_eq!(mints(&classified.graduating), vec!["a-tie", "b-tie"]);
        assert_eq!(mints(classified.section(LifecycleStatus::Graduated)), vec!["grad"]);
        assert_eq!(classified.len(), 5);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(Thresholds::default().validate().is_ok());
        let inverted = Thresholds {
            graduating_min: 70_000.0,
            graduation: 12_000.0,
            bonding_target: 70_000.0,
        };
        assert!(inverted.validate().is_err());
        let zero = Thresholds {
            bonding_target: 0.0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());
    }
}
