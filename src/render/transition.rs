use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Up => "▲",
            Direction::Down => "▼",
            Direction::Flat => " ",
        }
    }
}

/// Animated move of a market cap between two polls
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketCapTransition {
    pub from: f64,
    pub to: f64,
}

impl MarketCapTransition {
    pub fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    /// A transition that starts where it ends, for tokens seen the first time
    pub fn settled(value: f64) -> Self {
        Self { from: value, to: value }
    }

    pub fn direction(&self) -> Direction {
        if self.to > self.from {
            Direction::Up
        } else if self.to < self.from {
            Direction::Down
        } else {
            Direction::Flat
        }
    }

    /// Value at animation progress `t`, eased out cubically. `t` is clamped
    /// to `[0, 1]`.
    pub fn value_at(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        let eased = 1.0 - (1.0 - t).powi(3);
        self.from + (self.to - self.from) * eased
    }
}
