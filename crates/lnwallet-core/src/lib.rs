//! Orchestration layer between a remote Lightning node and UI consumers.
//!
//! This crate owns the action layer of the lnwallet workspace: the state
//! machines and asynchronous control flow that turn the three RPC
//! primitives of [`lnwallet_rpc::LightningRpc`] into safe, retryable,
//! observable wallet operations.
//!
//! - **[`ChannelController`]** — channel connect/open/close lifecycle and
//!   reconciliation between active, pending, and closed channel records.
//!
//! - **[`WalletController`]** — the onboarding state machine (seed
//!   generation and verification, password setup, restore), unlock
//!   sequencing, and the balance/exchange-rate pollers.
//!
//! - **[`WalletStore`]** — reactive state container built on
//!   `tokio::sync::watch` cells. Every write is published to observers
//!   before the setter returns; collections are replaced wholesale on
//!   each refresh.
//!
//! - **Seams** ([`ui`]) — [`Navigator`], [`Notifier`], and
//!   [`SettingsStore`] traits for the view layer and the persisted
//!   settings document. Implementations live outside this crate.
//!
//! - **Domain model** ([`model`]) — channel records, the
//!   [`ChannelPoint`] identifier, and satoshi/unit amount parsing.

pub mod channel;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod ui;
pub mod wallet;
pub mod wire;

#[cfg(test)]
pub(crate) mod testutil;

// ── Primary re-exports ──────────────────────────────────────────────
pub use channel::ChannelController;
pub use error::CoreError;
pub use store::{OnboardingState, WalletStore};
pub use ui::{Navigator, NoticeKind, Notifier, SettingsStore, View};
pub use wallet::WalletController;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ChannelPoint, ChannelRecord, ChannelStatus, PeerRecord, PendingChannelRecord, PendingStatus,
    Settings, Unit,
};
