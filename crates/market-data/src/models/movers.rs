use serde::{Deserialize, Serialize};

use super::quote::Quote;

/// Top gainers and losers for one market segment.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoverBoard {
    pub gainers: Vec<Quote>,
    pub losers: Vec<Quote>,
}

/// Full movers snapshot across markets.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopMovers {
    pub stocks: MoverBoard,
    pub crypto: MoverBoard,
}
