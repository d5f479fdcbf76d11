use std::path::PathBuf;
use chrono::NaiveDate;
use crate::api::finsage::FinsageClient;
use crate::models::ChartRange;
use crate::services::chart_service::ChartConfig;

/// Runtime settings read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub isin: String,
    pub range: ChartRange,
    pub chart: ChartConfig,
    pub output_dir: PathBuf,
}

impl Settings {
    /// Load settings from process environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary lookup, so tests need not touch the environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let isin = get("MF_ISIN").ok_or("MF_ISIN not set")?;

        let range = match get("MF_RANGE") {
            Some(raw) => raw.parse::<ChartRange>()?,
            None => ChartRange::default(),
        };

        let mut chart = ChartConfig::default();
        if let Some(raw) = get("MF_REFERENCE_DATE") {
            chart.reference_date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .map_err(|e| format!("❌ Invalid MF_REFERENCE_DATE '{}': {}", raw, e))?;
        }

        Ok(Self {
            api_base_url: get("MF_API_BASE_URL")
                .unwrap_or_else(|| FinsageClient::DEFAULT_BASE_URL.to_string()),
            isin,
            range,
            chart,
            output_dir: get("MF_OUTPUT_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}
