//! Subgraph query clients
//!
//! [`SubgraphClient`] owns the transport: it posts a fixed query document
//! with its variables to one GraphQL endpoint and unwraps the response
//! envelope. [`FarmingClient`] pairs the two endpoints involved (DEX
//! analytics and farming) and exposes one typed method per operation.

use std::time::Instant;

use alloy::primitives::Address;
use graphql_client::{QueryBody, Response};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::config::{Network, SubgraphEndpoints};
use crate::error::{Error, Result};
use crate::queries::{self, TICKS_PAGE_SIZE};
use crate::types::{Deposit, EternalFarming, Pool, Tick, Token};

/// A client for a single subgraph endpoint.
#[derive(Debug, Clone)]
pub struct SubgraphClient {
    http: reqwest::Client,
    url: Url,
}

impl SubgraphClient {
    pub fn new(url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
        }
    }

    /// Create with a shared HTTP client.
    pub fn with_http(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Post one query document and unwrap the response envelope.
    ///
    /// GraphQL-level errors and a missing `data` field both surface as
    /// typed errors; everything else is deserialized into `D`.
    pub async fn query<V, D>(
        &self,
        query: &'static str,
        operation_name: &'static str,
        variables: V,
    ) -> Result<D>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let body = QueryBody {
            variables,
            query,
            operation_name,
        };

        let start = Instant::now();
        let response = self
            .http
            .post(self.url.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let envelope: Response<D> = response.json().await?;

        tracing::debug!(
            operation = operation_name,
            endpoint = %self.url,
            latency_ms = start.elapsed().as_millis() as u64,
            "subgraph query"
        );

        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                let joined = errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                tracing::warn!(
                    operation = operation_name,
                    endpoint = %self.url,
                    "subgraph returned errors: {joined}"
                );
                return Err(Error::Subgraph(joined));
            }
        }

        envelope.data.ok_or(Error::MissingData)
    }
}

/// Typed queries over the pools and farming subgraph pair.
pub struct FarmingClient {
    pools: SubgraphClient,
    farming: SubgraphClient,
}

impl FarmingClient {
    pub fn new(endpoints: SubgraphEndpoints) -> Self {
        let http = reqwest::Client::new();
        Self {
            pools: SubgraphClient::with_http(http.clone(), endpoints.pools),
            farming: SubgraphClient::with_http(http, endpoints.farming),
        }
    }

    /// Create against the endpoints resolved for a network (env overrides
    /// apply, see [`SubgraphEndpoints::from_env`]).
    pub fn from_env(network: Network) -> Result<Self> {
        Ok(Self::new(SubgraphEndpoints::from_env(network)?))
    }

    /// Fetch a pool from the analytics subgraph.
    pub async fn pool(&self, pool_address: Address) -> Result<Option<Pool>> {
        let variables = queries::fetch_pool::Variables {
            pool_id: format!("{pool_address:#x}"),
        };
        let data: queries::fetch_pool::ResponseData = self
            .pools
            .query(
                queries::fetch_pool::QUERY,
                queries::fetch_pool::OPERATION_NAME,
                variables,
            )
            .await?;
        Ok(data.pool)
    }

    /// Fetch a token from the farming subgraph.
    pub async fn token(&self, token_address: Address) -> Result<Option<Token>> {
        let variables = queries::fetch_token::Variables {
            token_id: format!("{token_address:#x}"),
        };
        let data: queries::fetch_token::ResponseData = self
            .farming
            .query(
                queries::fetch_token::QUERY,
                queries::fetch_token::OPERATION_NAME,
                variables,
            )
            .await?;
        Ok(data.token)
    }

    /// All eternal farmings that are not detached.
    pub async fn eternal_farmings(&self) -> Result<Vec<EternalFarming>> {
        let data: queries::eternal_farmings::ResponseData = self
            .farming
            .query(
                queries::eternal_farmings::QUERY,
                queries::eternal_farmings::OPERATION_NAME,
                queries::eternal_farmings::Variables,
            )
            .await?;
        Ok(data.eternal_farmings)
    }

    /// A single eternal farming by incentive id.
    pub async fn eternal_farming(&self, farming_id: &str) -> Result<Option<EternalFarming>> {
        let variables = queries::eternal_farming::Variables {
            farming_id: farming_id.to_string(),
        };
        let data: queries::eternal_farming::ResponseData = self
            .farming
            .query(
                queries::eternal_farming::QUERY,
                queries::eternal_farming::OPERATION_NAME,
                variables,
            )
            .await?;
        Ok(data.eternal_farming)
    }

    /// Active eternal farmings on a pool (attached, nonzero reward rate).
    pub async fn eternal_farmings_for_pool(
        &self,
        pool_address: Address,
    ) -> Result<Vec<EternalFarming>> {
        let variables = queries::eternal_farmings_from_pool::Variables {
            pool_address: format!("{pool_address:#x}"),
        };
        let data: queries::eternal_farmings_from_pool::ResponseData = self
            .farming
            .query(
                queries::eternal_farmings_from_pool::QUERY,
                queries::eternal_farmings_from_pool::OPERATION_NAME,
                variables,
            )
            .await?;
        Ok(data.eternal_farmings)
    }

    /// Positions an account has transferred onto the farming center.
    pub async fn transferred_positions(&self, account: Address) -> Result<Vec<Deposit>> {
        let variables = queries::transferred_positions::Variables {
            account: format!("{account:#x}"),
        };
        let data: queries::transferred_positions::ResponseData = self
            .farming
            .query(
                queries::transferred_positions::QUERY,
                queries::transferred_positions::OPERATION_NAME,
                variables,
            )
            .await?;
        Ok(data.deposits)
    }

    /// Positions of an account currently entered in an eternal farming.
    pub async fn positions_on_eternal_farming(&self, account: Address) -> Result<Vec<Deposit>> {
        let variables = queries::positions_on_eternal_farming::Variables {
            account: format!("{account:#x}"),
        };
        let data: queries::positions_on_eternal_farming::ResponseData = self
            .farming
            .query(
                queries::positions_on_eternal_farming::QUERY,
                queries::positions_on_eternal_farming::OPERATION_NAME,
                variables,
            )
            .await?;
        Ok(data.deposits)
    }

    /// Positions of an account in one pool that still hold liquidity.
    pub async fn transferred_positions_for_pool(
        &self,
        account: Address,
        pool_address: Address,
        min_range_length: u32,
    ) -> Result<Vec<Deposit>> {
        let variables = queries::transferred_positions_for_pool::Variables {
            account: format!("{account:#x}"),
            pool_id: format!("{pool_address:#x}"),
            min_range_length,
        };
        let data: queries::transferred_positions_for_pool::ResponseData = self
            .farming
            .query(
                queries::transferred_positions_for_pool::QUERY,
                queries::transferred_positions_for_pool::OPERATION_NAME,
                variables,
            )
            .await?;
        Ok(data.deposits)
    }

    /// One page (up to 1000) of initialized ticks of a pool within the
    /// given tick index bounds.
    pub async fn surrounding_ticks(
        &self,
        pool_address: Address,
        tick_idx_lower_bound: i32,
        tick_idx_upper_bound: i32,
        skip: i64,
    ) -> Result<Vec<Tick>> {
        let variables = queries::surrounding_ticks::Variables {
            pool_address: format!("{pool_address:#x}"),
            tick_idx_lower_bound,
            tick_idx_upper_bound,
            skip,
        };
        let data: queries::surrounding_ticks::ResponseData = self
            .pools
            .query(
                queries::surrounding_ticks::QUERY,
                queries::surrounding_ticks::OPERATION_NAME,
                variables,
            )
            .await?;
        Ok(data.ticks)
    }

    /// All initialized ticks within the bounds, following the `skip`
    /// pagination of the single-page query until a short page comes back.
    pub async fn all_surrounding_ticks(
        &self,
        pool_address: Address,
        tick_idx_lower_bound: i32,
        tick_idx_upper_bound: i32,
    ) -> Result<Vec<Tick>> {
        let mut ticks = Vec::new();
        let mut skip = 0i64;
        loop {
            let page = self
                .surrounding_ticks(
                    pool_address,
                    tick_idx_lower_bound,
                    tick_idx_upper_bound,
                    skip,
                )
                .await?;
            let len = page.len();
            ticks.extend(page);
            if len < TICKS_PAGE_SIZE {
                break;
            }
            skip += TICKS_PAGE_SIZE as i64;
        }
        Ok(ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use httpmock::{Method, MockServer};
    use serde_json::json;

    const POOL: Address = address!("9ceff2f5138fc59eb925d270b8a7a9c02a1810f2");
    const ACCOUNT: Address = address!("32cff5e166ddeb3e0f9bbffd6b786dcf2cf2a709");

    fn client_for(server: &MockServer) -> FarmingClient {
        let endpoints =
            SubgraphEndpoints::from_urls(&server.url("/pools"), &server.url("/farming"))
                .expect("mock endpoints");
        FarmingClient::new(endpoints)
    }

    #[tokio::test]
    async fn pool_query_lowercases_address_and_decodes() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(Method::POST).path("/pools").json_body_includes(
                json!({
                    "operationName": "fetchPool",
                    "variables": { "poolId": "0x9ceff2f5138fc59eb925d270b8a7a9c02a1810f2" }
                })
                .to_string(),
            );
            then.status(200).json_body(json!({
                "data": {
                    "pool": {
                        "id": "0x9ceff2f5138fc59eb925d270b8a7a9c02a1810f2",
                        "fee": "100",
                        "token0": { "id": "0x01", "decimals": "6", "symbol": "USDC" },
                        "token1": { "id": "0x02", "decimals": "18", "symbol": "WETH" },
                        "sqrtPrice": "1392486909633467119508223330528",
                        "liquidity": "98732460249469331",
                        "tick": "197207",
                        "feesUSD": "104512.882091",
                        "untrackedFeesUSD": "0"
                    }
                }
            }));
        });

        let client = client_for(&server);
        // Uppercase input must reach the wire lowercased.
        let pool_address: Address = "0x9CEFF2F5138FC59EB925D270B8A7A9C02A1810F2"
            .parse()
            .expect("address");
        let pool = client
            .pool(pool_address)
            .await
            .expect("query")
            .expect("pool exists");

        mock.assert_calls(1);
        assert_eq!(pool.fee, "100");
        assert_eq!(pool.token1.symbol, "WETH");
    }

    #[tokio::test]
    async fn missing_entity_is_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST).path("/farming");
            then.status(200).json_body(json!({ "data": { "token": null } }));
        });

        let client = client_for(&server);
        let token = client.token(POOL).await.expect("query");
        assert!(token.is_none());
    }

    #[tokio::test]
    async fn token_goes_to_the_farming_endpoint() {
        let server = MockServer::start();
        let farming_mock = server.mock(|when, then| {
            when.method(Method::POST)
                .path("/farming")
                .json_body_includes(json!({ "operationName": "fetchToken" }).to_string());
            then.status(200).json_body(json!({
                "data": {
                    "token": {
                        "id": "0x2791bca1f2de4661ed88a30c99a7a9449aa84174",
                        "symbol": "USDC",
                        "name": "USD Coin",
                        "decimals": "6"
                    }
                }
            }));
        });

        let client = client_for(&server);
        let token = client
            .token(address!("2791bca1f2de4661ed88a30c99a7a9449aa84174"))
            .await
            .expect("query")
            .expect("token exists");

        farming_mock.assert_calls(1);
        assert_eq!(token.symbol, "USDC");
    }

    #[tokio::test]
    async fn graphql_errors_surface_as_subgraph_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST).path("/farming");
            then.status(200).json_body(json!({
                "errors": [ { "message": "indexing error" } ]
            }));
        });

        let client = client_for(&server);
        let err = client.eternal_farmings().await.expect_err("must fail");
        match err {
            Error::Subgraph(msg) => assert!(msg.contains("indexing error")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_envelope_is_missing_data() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST).path("/farming");
            then.status(200).json_body(json!({}));
        });

        let client = client_for(&server);
        let err = client.eternal_farmings().await.expect_err("must fail");
        assert!(matches!(err, Error::MissingData));
    }

    #[tokio::test]
    async fn deposits_decode_with_nullable_farmings() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(Method::POST).path("/farming").json_body_includes(
                json!({
                    "operationName": "transferedPositions",
                    "variables": { "account": "0x32cff5e166ddeb3e0f9bbffd6b786dcf2cf2a709" }
                })
                .to_string(),
            );
            then.status(200).json_body(json!({
                "data": {
                    "deposits": [
                        {
                            "id": "1204",
                            "owner": "0x32cff5e166ddeb3e0f9bbffd6b786dcf2cf2a709",
                            "pool": "0x9ceff2f5138fc59eb925d270b8a7a9c02a1810f2",
                            "L2tokenId": "301",
                            "limitFarming": null,
                            "eternalFarming": "0x51bcbc",
                            "onFarmingCenter": true,
                            "rangeLength": "1800"
                        },
                        {
                            "id": "1199",
                            "owner": "0x32cff5e166ddeb3e0f9bbffd6b786dcf2cf2a709",
                            "pool": "0x9ceff2f5138fc59eb925d270b8a7a9c02a1810f2",
                            "L2tokenId": "287",
                            "limitFarming": null,
                            "eternalFarming": null,
                            "onFarmingCenter": true,
                            "rangeLength": "600"
                        }
                    ]
                }
            }));
        });

        let client = client_for(&server);
        let deposits = client.transferred_positions(ACCOUNT).await.expect("query");

        mock.assert_calls(1);
        assert_eq!(deposits.len(), 2);
        assert!(deposits[0].eternal_farming.is_some());
        assert!(deposits[1].eternal_farming.is_none());
    }

    #[tokio::test]
    async fn for_pool_variables_reach_the_wire() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(Method::POST).path("/farming").json_body_includes(
                json!({
                    "operationName": "transferedPositionsForPool",
                    "variables": {
                        "account": "0x32cff5e166ddeb3e0f9bbffd6b786dcf2cf2a709",
                        "poolId": "0x9ceff2f5138fc59eb925d270b8a7a9c02a1810f2",
                        "minRangeLength": 60
                    }
                })
                .to_string(),
            );
            then.status(200).json_body(json!({ "data": { "deposits": [] } }));
        });

        let client = client_for(&server);
        let deposits = client
            .transferred_positions_for_pool(ACCOUNT, POOL, 60)
            .await
            .expect("query");

        mock.assert_calls(1);
        assert!(deposits.is_empty());
    }

    fn tick_page(start: i64, len: usize) -> serde_json::Value {
        let ticks: Vec<_> = (0..len as i64)
            .map(|i| {
                json!({
                    "tickIdx": (start + i * 60).to_string(),
                    "liquidityGross": "1",
                    "liquidityNet": "1",
                    "price0": "1",
                    "price1": "1"
                })
            })
            .collect();
        json!({ "data": { "ticks": ticks } })
    }

    #[tokio::test]
    async fn all_ticks_pages_until_short_page() {
        let server = MockServer::start();
        let first_page = server.mock(|when, then| {
            when.method(Method::POST)
                .path("/pools")
                .json_body_includes(json!({ "variables": { "skip": 0 } }).to_string());
            then.status(200).json_body(tick_page(-887220, TICKS_PAGE_SIZE));
        });
        let second_page = server.mock(|when, then| {
            when.method(Method::POST)
                .path("/pools")
                .json_body_includes(json!({ "variables": { "skip": 1000 } }).to_string());
            then.status(200).json_body(tick_page(0, 3));
        });

        let client = client_for(&server);
        let ticks = client
            .all_surrounding_ticks(POOL, -887220, 887220)
            .await
            .expect("query");

        first_page.assert_calls(1);
        second_page.assert_calls(1);
        assert_eq!(ticks.len(), TICKS_PAGE_SIZE + 3);
    }

    #[tokio::test]
    async fn single_tick_page_stops_immediately() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(Method::POST).path("/pools");
            then.status(200).json_body(tick_page(-60, 2));
        });

        let client = client_for(&server);
        let ticks = client
            .all_surrounding_ticks(POOL, -120, 120)
            .await
            .expect("query");

        mock.assert_calls(1);
        assert_eq!(ticks.len(), 2);
    }
}
