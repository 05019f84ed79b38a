use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt::Write;

use super::format::{format_market_cap, relative_time};
use super::transition::MarketCapTransition;
use crate::poller::ScreenerSnapshot;
use crate::token::{LifecycleStatus, Token};

const NAME_WIDTH: usize = 20;

/// Text board of the three lifecycle sections.
///
/// Remembers each mint's market cap from the previous snapshot so a render
/// can animate between the two values.
#[derive(Debug, Default)]
pub struct Board {
    previous: HashMap<String, f64>,
    transitions: HashMap<String, MarketCapTransition>,
    rows_per_section: Option<usize>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows_per_section(mut self, rows: usize) -> Self {
        self.rows_per_section = Some(rows);
        self
    }

    /// Takes in a new snapshot. Mints missing from it are forgotten.
    pub fn update(&mut self, snapshot: &ScreenerSnapshot) {
        let mut current = HashMap::with_capacity(snapshot.tokens.len());
        let mut transitions = HashMap::with_capacity(snapshot.tokens.len());
        for token in &snapshot.tokens {
            let transition = match self.previous.get(&token.mint) {
                Some(&from) => MarketCapTransition::new(from, token.market_cap),
                None => MarketCapTransition::settled(token.market_cap),
            };
            transitions.insert(token.mint.clone(), transition);
            current.insert(token.mint.clone(), token.market_cap);
        }
        self.previous = current;
        self.transitions = transitions;
    }

    pub fn transition(&self, mint: &str) -> Option<&MarketCapTransition> {
        self.transitions.get(mint)
    }

    /// Renders the board at animation progress `t` (0 = previous values,
    /// 1 = current values)
    pub fn render(&self, snapshot: &ScreenerSnapshot, t: f64, now: DateTime<Utc>) -> String {
        let mut out = String::new();
        for status in LifecycleStatus::ALL {
            let tokens = snapshot.classified.section(status);
            let _ = writeln!(out, "== {} ({}) ==", status.label().to_uppercase(), tokens.len());
            if tokens.is_empty() {
                let _ = writeln!(out, "   No tokens to display");
                continue;
            }
            let limit = self.rows_per_section.unwrap_or(tokens.len());
            for token in tokens.iter().take(limit) {
                let _ = writeln!(out, "{}", self.render_row(token, t, now));
            }
            if tokens.len() > limit {
                let _ = writeln!(out, "   ... {} more", tokens.len() - limit);
            }
        }
        out
    }

    fn render_row(&self, token: &Token, t: f64, now: DateTime<Utc>) -> String {
        let (arrow, market_cap) = match self.transition(&token.mint) {
            Some(tr) => (tr.direction().arrow(), tr.value_at(t)),
            None => (" ", token.market_cap),
        };
        let name: String = token.name.chars().take(NAME_WIDTH).collect();
        format!(
            " {} {:<width$} ${:<8} MC {:>8}  {:>9}  {:>5.1}%",
            arrow,
            name,
            token.symbol,
            format_market_cap(market_cap),
            relative_time(token.created_at, now),
            token.progress,
            width = NAME_WIDTH,
        )
    }
}
