use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which macro indicator is being requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    GdpGrowth,
    Inflation,
    Unemployment,
    InterestRate,
}

impl IndicatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKind::GdpGrowth => "gdp_growth",
            IndicatorKind::Inflation => "inflation",
            IndicatorKind::Unemployment => "unemployment",
            IndicatorKind::InterestRate => "interest_rate",
        }
    }
}

/// Single observation of a macro indicator.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorPoint {
    pub value: Decimal,

    /// Reporting period as given upstream ("2023", "2024-06-01", ...).
    pub period: String,

    pub source: String,
}

/// Merged indicator set for one country.
///
/// A provider failure leaves the corresponding field absent rather than
/// failing the whole lookup.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicIndicators {
    pub country: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gdp_growth: Option<IndicatorPoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inflation: Option<IndicatorPoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unemployment: Option<IndicatorPoint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<IndicatorPoint>,
}
