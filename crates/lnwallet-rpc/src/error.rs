//! Error taxonomy for the RPC boundary.

use thiserror::Error;

/// Failures surfaced by a [`LightningRpc`](crate::LightningRpc) implementor.
///
/// The transport itself is external to this workspace, so variants carry
/// the implementor's description rather than a concrete transport error.
#[derive(Debug, Error)]
pub enum RpcError {
    // ── Transport ────────────────────────────────────────────────────
    #[error("transport failure: {0}")]
    Transport(String),

    // ── Node-reported failures ───────────────────────────────────────
    #[error("{method} failed: {message}")]
    Call { method: String, message: String },

    /// A streaming call emitted its terminal `error` event.
    #[error("stream error: {0}")]
    Stream(String),

    // ── Payload decoding ─────────────────────────────────────────────
    #[error("response decoding failed")]
    Decode(#[from] serde_json::Error),
}

impl RpcError {
    /// Build a node-reported failure for `method`.
    pub fn call(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Call {
            method: method.into(),
            message: message.into(),
        }
    }
}

/// Failures from the external price API.
#[derive(Debug, Error)]
pub enum RateError {
    #[error("price API request failed")]
    Transport(#[from] reqwest::Error),

    #[error("price API returned status {code}")]
    Status { code: u16 },

    #[error("price API returned an unparseable rate: {body:?}")]
    Parse { body: String },
}
