//! Subgraph endpoint configuration
//!
//! Two endpoints are involved: the DEX analytics subgraph (pools and ticks)
//! and the farming subgraph (tokens, eternal farmings, deposits).
//!
//! Resolution order:
//! 1. Per-endpoint env vars (POOLS_SUBGRAPH_URL, FARMING_SUBGRAPH_URL) -
//!    highest priority
//! 2. Hosted-service defaults for the selected network
//!
//! # Examples
//!
//! ```bash
//! # Point both endpoints at a custom deployment
//! export POOLS_SUBGRAPH_URL="https://api.thegraph.com/subgraphs/name/your/pools"
//! export FARMING_SUBGRAPH_URL="https://api.thegraph.com/subgraphs/name/your/farming"
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Networks with known subgraph deployments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Polygon,
    Dogechain,
}

impl Network {
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Polygon => 137,
            Network::Dogechain => 2000,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Network::Polygon => "polygon",
            Network::Dogechain => "dogechain",
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "polygon" | "matic" => Ok(Network::Polygon),
            "dogechain" => Ok(Network::Dogechain),
            _ => Err(Error::InvalidArgument(format!(
                "Unknown network: {}. Supported: polygon, dogechain",
                s
            ))),
        }
    }
}

/// Environment variable names
mod env_vars {
    pub const POOLS_SUBGRAPH_URL: &str = "POOLS_SUBGRAPH_URL";
    pub const FARMING_SUBGRAPH_URL: &str = "FARMING_SUBGRAPH_URL";
}

/// Hosted-service endpoints per network
mod hosted {
    use super::Network;

    const POOLS_POLYGON: &str = "https://api.thegraph.com/subgraphs/name/sameepsi/quickswap-v3";
    const FARMING_POLYGON: &str =
        "https://api.thegraph.com/subgraphs/name/sameepsi/quickswap-v3-farming";
    const POOLS_DOGECHAIN: &str =
        "https://api.thegraph.com/subgraphs/name/quickswap/dogechain-v3";
    const FARMING_DOGECHAIN: &str =
        "https://api.thegraph.com/subgraphs/name/quickswap/dogechain-v3-farming";

    pub fn pools(network: Network) -> &'static str {
        match network {
            Network::Polygon => POOLS_POLYGON,
            Network::Dogechain => POOLS_DOGECHAIN,
        }
    }

    pub fn farming(network: Network) -> &'static str {
        match network {
            Network::Polygon => FARMING_POLYGON,
            Network::Dogechain => FARMING_DOGECHAIN,
        }
    }
}

/// Resolved pools/farming endpoint pair
#[derive(Debug, Clone)]
pub struct SubgraphEndpoints {
    pub pools: Url,
    pub farming: Url,
}

impl SubgraphEndpoints {
    /// Create from explicit URLs.
    pub fn from_urls(pools: &str, farming: &str) -> Result<Self> {
        Ok(Self {
            pools: Url::parse(pools)?,
            farming: Url::parse(farming)?,
        })
    }

    /// Resolve endpoints for a network, letting env vars override the
    /// hosted-service defaults.
    pub fn from_env(network: Network) -> Result<Self> {
        let pools = match std::env::var(env_vars::POOLS_SUBGRAPH_URL) {
            Ok(url) => {
                tracing::debug!("Using POOLS_SUBGRAPH_URL for pools subgraph");
                Url::parse(&url)?
            }
            Err(_) => Url::parse(hosted::pools(network))?,
        };
        let farming = match std::env::var(env_vars::FARMING_SUBGRAPH_URL) {
            Ok(url) => {
                tracing::debug!("Using FARMING_SUBGRAPH_URL for farming subgraph");
                Url::parse(&url)?
            }
            Err(_) => Url::parse(hosted::farming(network))?,
        };
        Ok(Self { pools, farming })
    }
}
