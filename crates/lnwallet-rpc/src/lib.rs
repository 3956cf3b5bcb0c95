//! RPC boundary types for the lnwallet workspace.
//!
//! This crate defines the *contract* the orchestration layer consumes,
//! not a transport:
//!
//! - **[`LightningRpc`]** — the three operation shapes exposed by a
//!   Lightning node: unary [`call()`](LightningRpc::call), pre-unlock
//!   [`unlocker_call()`](LightningRpc::unlocker_call), and streaming
//!   [`stream_call()`](LightningRpc::stream_call). Connection setup,
//!   TLS, and macaroon handling belong to the implementor.
//!
//! - **[`RpcStream`]** — a finite, non-restartable result stream.
//!   `Ok` items are `data` events, an `Err` item is the terminal
//!   `error` event, and stream exhaustion is `end`.
//!
//! - **[`RateClient`]** — the one HTTP call this workspace owns: the
//!   external price API returning the BTC rate for a fiat currency.
//!   Fronted by the [`RateSource`] trait so consumers can be tested
//!   without a network.

pub mod error;
pub mod gateway;
pub mod rates;

pub use error::{RateError, RpcError};
pub use gateway::{LightningRpc, RpcStream};
pub use rates::{RateClient, RateSource};
