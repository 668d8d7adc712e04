//! Query documents and per-operation request/response shapes
//!
//! One module per operation, each carrying the fixed GraphQL document, its
//! operation name, a `Variables` struct serialized into the request body,
//! and the `ResponseData` struct the response envelope deserializes into.
//!
//! The documents are the wire contract with the deployed subgraphs and are
//! kept verbatim, including their baked-in filters and ordering.

use serde::{Deserialize, Serialize};

use crate::types::{Deposit, EternalFarming, Pool, Tick, Token};

/// Page size baked into the surrounding-ticks document.
pub const TICKS_PAGE_SIZE: usize = 1000;

pub mod fetch_pool {
    use super::*;

    pub const OPERATION_NAME: &str = "fetchPool";
    pub const QUERY: &str = r#"
        query fetchPool($poolId: ID) {
            pool(id: $poolId) {
                id
                fee
                token0 {
                    id
                    decimals
                    symbol
                }
                token1 {
                    id
                    decimals
                    symbol
                }
                sqrtPrice
                liquidity
                tick
                feesUSD
                untrackedFeesUSD
            }
        }
    "#;

    #[derive(Debug, Serialize)]
    pub struct Variables {
        #[serde(rename = "poolId")]
        pub pool_id: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub pool: Option<Pool>,
    }
}

pub mod fetch_token {
    use super::*;

    pub const OPERATION_NAME: &str = "fetchToken";
    pub const QUERY: &str = r#"
        query fetchToken($tokenId: ID) {
            token(id: $tokenId) {
                id
                symbol
                name
                decimals
            }
        }
    "#;

    #[derive(Debug, Serialize)]
    pub struct Variables {
        #[serde(rename = "tokenId")]
        pub token_id: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub token: Option<Token>,
    }
}

pub mod eternal_farmings {
    use super::*;

    pub const OPERATION_NAME: &str = "fetchEternalFarmings";
    pub const QUERY: &str = r#"
        query fetchEternalFarmings {
            eternalFarmings(where: { isDetached: false }) {
                id
                rewardToken
                bonusRewardToken
                pool
                startTime
                endTime
                reward
                bonusReward
                rewardRate
                bonusRewardRate
                minRangeLength
                tokenAmountForTier1
                tokenAmountForTier2
                tokenAmountForTier3
                tier1Multiplier
                tier2Multiplier
                tier3Multiplier
                multiplierToken
            }
        }
    "#;

    #[derive(Debug, Serialize)]
    pub struct Variables;

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "eternalFarmings")]
        pub eternal_farmings: Vec<EternalFarming>,
    }
}

pub mod eternal_farming {
    use super::*;

    pub const OPERATION_NAME: &str = "fetchEternalFarm";
    pub const QUERY: &str = r#"
        query fetchEternalFarm($farmingId: ID) {
            eternalFarming(id: $farmingId) {
                id
                rewardToken
                bonusRewardToken
                pool
                startTime
                endTime
                reward
                bonusReward
                rewardRate
                bonusRewardRate
                isDetached
                tier1Multiplier
                tier2Multiplier
                tier3Multiplier
                tokenAmountForTier1
                tokenAmountForTier2
                tokenAmountForTier3
                multiplierToken
            }
        }
    "#;

    #[derive(Debug, Serialize)]
    pub struct Variables {
        #[serde(rename = "farmingId")]
        pub farming_id: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "eternalFarming")]
        pub eternal_farming: Option<EternalFarming>,
    }
}

pub mod eternal_farmings_from_pool {
    use super::*;

    pub const OPERATION_NAME: &str = "eternalFarmingFromPools";
    pub const QUERY: &str = r#"
        query eternalFarmingFromPools($poolAddress: String!) {
            eternalFarmings(
                where: { pool: $poolAddress, isDetached: false, rewardRate_gt: 0 }
            ) {
                id
                rewardToken
                bonusRewardToken
                pool
                startTime
                endTime
                reward
                bonusReward
                rewardRate
                bonusRewardRate
                isDetached
            }
        }
    "#;

    #[derive(Debug, Serialize)]
    pub struct Variables {
        #[serde(rename = "poolAddress")]
        pub pool_address: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "eternalFarmings")]
        pub eternal_farmings: Vec<EternalFarming>,
    }
}

pub mod transferred_positions {
    use super::*;

    pub const OPERATION_NAME: &str = "transferedPositions";
    pub const QUERY: &str = r#"
        query transferedPositions($account: Bytes) {
            deposits(
                orderBy: id
                orderDirection: desc
                where: { owner: $account, onFarmingCenter: true }
            ) {
                id
                owner
                pool
                L2tokenId
                limitFarming
                eternalFarming
                onFarmingCenter
                rangeLength
            }
        }
    "#;

    #[derive(Debug, Serialize)]
    pub struct Variables {
        pub account: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub deposits: Vec<Deposit>,
    }
}

pub mod positions_on_eternal_farming {
    use super::*;

    pub const OPERATION_NAME: &str = "positionsOnEternalFarming";
    pub const QUERY: &str = r#"
        query positionsOnEternalFarming($account: Bytes) {
            deposits(
                orderBy: id
                orderDirection: desc
                where: {
                    owner: $account
                    onFarmingCenter: true
                    eternalFarming_not: null
                }
            ) {
                id
                owner
                pool
                L2tokenId
                eternalFarming
                onFarmingCenter
                enteredInEternalFarming
            }
        }
    "#;

    #[derive(Debug, Serialize)]
    pub struct Variables {
        pub account: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub deposits: Vec<Deposit>,
    }
}

pub mod transferred_positions_for_pool {
    use super::*;

    pub const OPERATION_NAME: &str = "transferedPositionsForPool";
    pub const QUERY: &str = r#"
        query transferedPositionsForPool($account: Bytes, $poolId: Bytes) {
            deposits(
                orderBy: id
                orderDirection: desc
                where: { owner: $account, pool: $poolId, liquidity_not: "0" }
            ) {
                id
                owner
                pool
                L2tokenId
                limitFarming
                eternalFarming
                onFarmingCenter
                enteredInEternalFarming
                tokensLockedLimit
                tokensLockedEternal
                tierLimit
                tierEternal
            }
        }
    "#;

    // minRangeLength is transmitted alongside the declared variables; the
    // document does not reference it and the server ignores the extra entry.
    #[derive(Debug, Serialize)]
    pub struct Variables {
        pub account: String,
        #[serde(rename = "poolId")]
        pub pool_id: String,
        #[serde(rename = "minRangeLength")]
        pub min_range_length: u32,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub deposits: Vec<Deposit>,
    }
}

pub mod surrounding_ticks {
    use super::*;

    pub const OPERATION_NAME: &str = "surroundingTicks";
    pub const QUERY: &str = r#"
        query surroundingTicks(
            $poolAddress: String!
            $tickIdxLowerBound: BigInt!
            $tickIdxUpperBound: BigInt!
            $skip: Int!
        ) {
            ticks(
                subgraphError: allow
                first: 1000
                skip: $skip
                where: {
                    poolAddress: $poolAddress
                    tickIdx_lte: $tickIdxUpperBound
                    tickIdx_gte: $tickIdxLowerBound
                }
            ) {
                tickIdx
                liquidityGross
                liquidityNet
                price0
                price1
            }
        }
    "#;

    #[derive(Debug, Serialize)]
    pub struct Variables {
        #[serde(rename = "poolAddress")]
        pub pool_address: String,
        #[serde(rename = "tickIdxLowerBound")]
        pub tick_idx_lower_bound: i32,
        #[serde(rename = "tickIdxUpperBound")]
        pub tick_idx_upper_bound: i32,
        pub skip: i64,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub ticks: Vec<Tick>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn variables_serialize_with_wire_names() {
        let vars = surrounding_ticks::Variables {
            pool_address: "0x9ceff2f5138fc59eb925d270b8a7a9c02a1810f2".to_string(),
            tick_idx_lower_bound: -120,
            tick_idx_upper_bound: 120,
            skip: 0,
        };
        let value = serde_json::to_value(&vars).expect("serialize");
        assert_eq!(
            value,
            json!({
                "poolAddress": "0x9ceff2f5138fc59eb925d270b8a7a9c02a1810f2",
                "tickIdxLowerBound": -120,
                "tickIdxUpperBound": 120,
                "skip": 0
            })
        );
    }

    #[test]
    fn for_pool_variables_carry_min_range_length() {
        let vars = transferred_positions_for_pool::Variables {
            account: "0x32cff5e166ddeb3e0f9bbffd6b786dcf2cf2a709".to_string(),
            pool_id: "0x9ceff2f5138fc59eb925d270b8a7a9c02a1810f2".to_string(),
            min_range_length: 60,
        };
        let value = serde_json::to_value(&vars).expect("serialize");
        assert_eq!(value["minRangeLength"], json!(60));
    }

    #[test]
    fn empty_variables_serialize_to_null() {
        let value = serde_json::to_value(eternal_farmings::Variables).expect("serialize");
        assert!(value.is_null());
    }
}
