use chrono::{DateTime, Utc};

/// `1.2M`, `3.4K`, or the plain integer below one thousand.
///
/// The unit is picked after rounding, so 999.7 is `1.0K` and not `1000`.
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let thousands = (value / 100.0).round() / 10.0;
    if thousands >= 1_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.round() >= 1_000.0 {
        format!("{:.1}K", thousands)
    } else {
        format!("{:.0}", value)
    }
}

pub fn format_market_cap(value: f64) -> String {
    format!("${}", format_compact(value))
}

pub fn format_price(price: f64) -> String {
    format!("${:.6}", price)
}

pub fn format_change(change: f64) -> String {
    if change > 0.0 {
        format!("+{:.2}%", change)
    } else {
        format!("{:.2}%", change)
    }
}

/// `just now` under a minute, then minutes, hours and days
pub fn relative_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - created_at).num_seconds().max(0);
    if seconds < 60 {
        return "just now".to_string();
    }
    let mins = seconds / 60;
    if mins < 60 {
        return format!("{}m ago", mins);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    format!("{}d ago", hours / 24)
}

/// `abc...xyz`
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 6 {
        return address.to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 3..].iter().collect();
    format!("{}...{}", head, tail)
}

pub fn format_bonk_amount(amount: f64) -> String {
    if amount >= 1_000_000_000.0 {
        format!("{:.2}B BONK", amount / 1_000_000_000.0)
    } else if amount >= 1_000_000.0 {
        format!("{:.2}M BONK", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("{:.2}K BONK", amount / 1_000.0)
    } else {
        format!("{} BONK", amount)
    }
}
