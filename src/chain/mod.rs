//! Chain module - JSON-RPC provider access and transaction signing

pub mod client;

pub use client::{ChainClient, RpcChainClient};
