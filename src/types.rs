//! Domain result types for subgraph entities
//!
//! These mirror the entities served by the pool and farming subgraphs.
//! Subgraph `BigInt` and `BigDecimal` scalars arrive as JSON strings and are
//! kept as strings here; interpreting them is the caller's concern.
//!
//! Fields that only some query documents select are `Option`s, so the same
//! type deserializes from every document that returns the entity.

use serde::{Deserialize, Serialize};

/// A token tracked by the farming subgraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub decimals: String,
}

/// The token0/token1 selection nested inside a pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolToken {
    pub id: String,
    pub decimals: String,
    pub symbol: String,
}

/// A DEX pool from the analytics subgraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: String,
    pub fee: String,
    pub token0: PoolToken,
    pub token1: PoolToken,
    pub sqrt_price: String,
    pub liquidity: String,
    /// Current tick; null until the pool is initialized.
    pub tick: Option<String>,
    #[serde(rename = "feesUSD")]
    pub fees_usd: String,
    #[serde(rename = "untrackedFeesUSD")]
    pub untracked_fees_usd: String,
}

/// An open-ended liquidity-incentive program tracked by the farming
/// subgraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EternalFarming {
    pub id: String,
    pub reward_token: String,
    pub bonus_reward_token: String,
    pub pool: String,
    pub start_time: String,
    pub end_time: String,
    pub reward: String,
    pub bonus_reward: String,
    pub reward_rate: String,
    pub bonus_reward_rate: String,
    pub is_detached: Option<bool>,
    pub min_range_length: Option<String>,
    pub token_amount_for_tier1: Option<String>,
    pub token_amount_for_tier2: Option<String>,
    pub token_amount_for_tier3: Option<String>,
    pub tier1_multiplier: Option<String>,
    pub tier2_multiplier: Option<String>,
    pub tier3_multiplier: Option<String>,
    pub multiplier_token: Option<String>,
}

/// A liquidity position transferred into the farming center.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub id: String,
    pub owner: String,
    pub pool: String,
    #[serde(rename = "L2tokenId")]
    pub l2_token_id: String,
    pub on_farming_center: bool,
    /// Limit farming the position is entered in, if any.
    pub limit_farming: Option<String>,
    /// Eternal farming the position is entered in, if any.
    pub eternal_farming: Option<String>,
    pub range_length: Option<String>,
    pub entered_in_eternal_farming: Option<String>,
    pub tokens_locked_limit: Option<String>,
    pub tokens_locked_eternal: Option<String>,
    pub tier_limit: Option<String>,
    pub tier_eternal: Option<String>,
}

/// An initialized tick of a pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tick {
    pub tick_idx: String,
    pub liquidity_gross: String,
    pub liquidity_net: String,
    pub price0: String,
    pub price1: String,
}
