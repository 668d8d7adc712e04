//! Farming subgraph client
//!
//! Typed GraphQL queries against the two subgraphs behind an Algebra-style
//! DEX deployment:
//! - the DEX analytics subgraph, serving pools and ticks
//! - the farming subgraph, serving tokens, eternal farmings, and deposits
//!
//! Every operation is a single request/response round trip: build the
//! variables, post a fixed query document, unwrap the response envelope,
//! return the typed result. No caching, no retries, no interpretation of
//! the returned scalars.

pub mod client;
pub mod config;
pub mod queries;
pub mod types;

mod error;

// Re-export commonly used types
pub use client::{FarmingClient, SubgraphClient};
pub use config::{Network, SubgraphEndpoints};
pub use error::{Error, Result};
