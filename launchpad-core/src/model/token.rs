use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// One row of the launchpad mint list, as the upstream sends it.
///
/// Every field is optional: the listing is third-party and rows regularly
/// arrive with gaps. Numbers may come as JSON numbers or numeric strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawToken {
    #[serde(default)]
    pub mint: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, rename = "imgUrl")]
    pub img_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, rename = "marketCap", deserialize_with = "lenient_f64")]
    pub market_cap: Option<f64>,
    #[serde(default, rename = "volume24h", deserialize_with = "lenient_f64")]
    pub volume_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, rename = "priceChange24h", deserialize_with = "lenient_f64")]
    pub price_change_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub progress: Option<f64>,
    /// Creation time under the key the mint-list endpoint uses
    #[serde(default, rename = "createAt")]
    pub create_at: Option<RawTimestamp>,
    /// Creation time under the key older proxies used
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<RawTimestamp>,
    #[serde(default)]
    pub creator: Option<String>,
    /// Upstream status. Informational only, the screener derives its own.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "marketAddresses")]
    pub market_addresses: Option<Vec<String>>,
}

impl RawToken {
    /// Image URL, preferring `imgUrl` over `image`
    pub fn image_url(&self) -> Option<&str> {
        self.img_url
            .as_deref()
            .or(self.image.as_deref())
            .filter(|url| !url.is_empty())
    }

    /// Creation time, preferring `createAt` over `createdAt`
    pub fn creation_time(&self) -> Option<DateTime<Utc>> {
        self.create_at
            .as_ref()
            .and_then(RawTimestamp::to_datetime)
            .or_else(|| self.created_at.as_ref().and_then(RawTimestamp::to_datetime))
    }
}

/// Timestamp as found in the wild: epoch millis or a date string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Millis(i64),
    Float(f64),
    Text(String),
}

impl RawTimestamp {
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            RawTimestamp::Millis(ms) => Utc.timestamp_millis_opt(*ms).single(),
            RawTimestamp::Float(ms) if ms.is_finite() => {
                Utc.timestamp_millis_opt(*ms as i64).single()
            }
            RawTimestamp::Float(_) => None,
            RawTimestamp::Text(text) => {
                let text = text.trim();
                if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
                    return text
                        .parse::<i64>()
                        .ok()
                        .and_then(|ms| Utc.timestamp_millis_opt(ms).single());
                }
                DateTime::parse_from_rfc3339(text)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            }
        }
    }
}

/// Envelope of the mint-list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub data: Option<ListData>,
}

/// The list endpoint has shipped both a paged and a flat shape. Rows stay
/// untyped here so one malformed row cannot sink the whole page.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListData {
    Paged {
        #[serde(default)]
        rows: Vec<Value>,
    },
    Flat(Vec<Value>),
}

impl ListResponse {
    /// Decodes every row, skipping (and logging) rows that don't fit `RawToken`
    pub fn into_rows(self) -> Vec<RawToken> {
        let rows = match self.data {
            Some(ListData::Paged { rows }) => rows,
            Some(ListData::Flat(rows)) => rows,
            None => return Vec::new(),
        };
        rows.into_iter()
            .enumerate()
            .filter_map(|(index, row)| match serde_json::from_value::<RawToken>(row) {
                Ok(token) => Some(token),
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed launchpad row");
                    None
                }
            })
            .collect()
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}
