use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage of a launchpad token, derived from its market cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStatus {
    New,
    Graduating,
    Graduated,
}

impl LifecycleStatus {
    pub const ALL: [LifecycleStatus; 3] = [
        LifecycleStatus::New,
        LifecycleStatus::Graduating,
        LifecycleStatus::Graduated,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LifecycleStatus::New => "New",
            LifecycleStatus::Graduating => "Graduating",
            LifecycleStatus::Graduated => "Graduated",
        }
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A launchpad token as the screener presents it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: String,
    pub mint: String,
    pub name: String,
    pub symbol: String,
    pub image: String,
    pub market_cap: f64,
    #[serde(rename = "volume24h")]
    pub volume_24h: f64,
    pub price: f64,
    #[serde(rename = "priceChange24h")]
    pub price_change_24h: f64,
    /// Bonding progress in percent, 0 to 100
    pub progress: f64,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    pub status: LifecycleStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub market_addresses: Vec<String>,
}

/// Body of the mapped token list route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenListResponse {
    pub tokens: Vec<Token>,
    pub last_updated: DateTime<Utc>,
    pub total_tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(LifecycleStatus::Graduating).unwrap(),
            json!("graduating")
        );
        assert_eq!(LifecycleStatus::Graduated.to_string(), "Graduated");
    }

    #[test]
    fn test_token_uses_frontend_field_names() {
        let token = Token {
            id: "Mint1".to_string(),
            mint: "Mint1".to_string(),
            name: "Dog".to_string(),
            symbol: "DOG".to_string(),
            image: String::new(),
            market_cap: 1.0,
            volume_24h: 2.0,
            price: 3.0,
            price_change_24h: 4.0,
            progress: 0.0,
            created_at: Utc.timestamp_millis_opt(0).unwrap(),
            creator: None,
            status: LifecycleStatus::New,
            market_addresses: Vec::new(),
        };
        let value = serde_json::to_value(&token).unwrap();
        assert_eq!(value["marketCap"], json!(1.0));
        assert_eq!(value["volume24h"], json!(2.0));
        assert_eq!(value["priceChange24h"], json!(4.0));
        assert_eq!(value["status"], json!("new"));
        assert!(value.get("creator").is_none());
        assert!(value.get("marketAddresses").is_none());
    }
}
