/// Base URL of the launchpad mint-list service
pub const DEFAULT_API_BASE_URL: &str = "https://launch-mint-v1.raydium.io";

/// Platform ids of the BonkChain launchpads
pub const DEFAULT_PLATFORM_IDS: [&str; 2] = [
    "FfYek5vEz23cMkWsdJwG2oa6EphsvXSHrGpdALN4g6W1",
    "BuM6KDpWiTcxvrpXywWFiw45R2RNH8WURdvqoTDV1BW4",
];

/// Configuration for the LaunchpadClient
#[derive(Debug, Clone)]
pub struct LaunchpadConfig {
    pub api_base_url: String,
    pub platform_ids: Vec<String>,
    pub sort: String,
    pub page_size: u32,
    pub mint_type: String,
    pub include_nsfw: bool,
    pub request_timeout_secs: u64,
}

impl Default for LaunchpadConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            platform_ids: DEFAULT_PLATFORM_IDS.iter().map(|id| id.to_string()).collect(),
            sort: "new".to_string(),
            page_size: 100,
            mint_type: "default".to_string(),
            include_nsfw: false,
            request_timeout_secs: 10,
        }
    }
}

impl LaunchpadConfig {
    /// Full URL of the list endpoint, without query string
    pub fn list_url(&self) -> String {
        format!("{}/get/list", self.api_base_url.trim_end_matches('/'))
    }

    /// Query parameters in the order the upstream documents them
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("platformId", self.platform_ids.join(",")),
            ("sort", self.sort.clone()),
            ("size", self.page_size.to_string()),
            ("mintType", self.mint_type.clone()),
            ("includeNsfw", self.include_nsfw.to_string()),
        ]
    }
}
