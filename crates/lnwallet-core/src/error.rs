//! Core error taxonomy.
//!
//! Validation errors are detected locally, before any RPC call is
//! issued. RPC and rate failures wrap the boundary crate's errors.

use thiserror::Error;

use lnwallet_rpc::{RateError, RpcError};

#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation (pre-RPC, always user-surfaced) ───────────────────
    #[error("Invalid channel point: {value:?}")]
    InvalidChannelPoint { value: String },

    #[error("Invalid amount: {value:?}")]
    InvalidAmount { value: String },

    #[error("{message}")]
    Validation { message: String },

    // ── Wrapped collaborator failures ────────────────────────────────
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Rate(#[from] RateError),

    #[error("settings persistence failed: {message}")]
    Settings { message: String },
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
