// ── Wire records ──
//
// snake_case request/response shapes as the node speaks them. The
// gateway carries loose JSON; these structs are the typed edge of that
// boundary. Balances arrive as decimal strings and passwords leave as
// raw byte buffers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use lnwallet_rpc::RpcError;

use crate::error::CoreError;

/// Encode a request struct into the loose JSON the gateway carries.
pub(crate) fn encode<T: Serialize>(request: &T) -> Result<Value, CoreError> {
    serde_json::to_value(request).map_err(|err| CoreError::Rpc(RpcError::Decode(err)))
}

/// Decode a loose-JSON response into its typed shape.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(raw: Value) -> Result<T, CoreError> {
    serde_json::from_value(raw).map_err(|err| CoreError::Rpc(RpcError::Decode(err)))
}

// ── Channel queries ─────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListChannelsResponse {
    #[serde(default)]
    pub channels: Vec<WireChannel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireChannel {
    #[serde(default)]
    pub remote_pubkey: String,
    #[serde(default)]
    pub capacity: String,
    #[serde(default)]
    pub local_balance: String,
    #[serde(default)]
    pub remote_balance: String,
    #[serde(default)]
    pub channel_point: String,
    #[serde(default)]
    pub active: bool,
}

/// The four pending buckets. Each entry wraps its channel in a
/// bucket-specific envelope; only the inner channel is interesting here.
#[derive(Debug, Default, Deserialize)]
pub struct PendingChannelsResponse {
    #[serde(default)]
    pub pending_open_channels: Vec<PendingEntry>,
    #[serde(default)]
    pub pending_closing_channels: Vec<PendingEntry>,
    #[serde(default)]
    pub pending_force_closing_channels: Vec<PendingEntry>,
    #[serde(default)]
    pub waiting_close_channels: Vec<PendingEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PendingEntry {
    pub channel: WirePendingChannel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePendingChannel {
    #[serde(default)]
    pub remote_node_pub: String,
    #[serde(default)]
    pub capacity: String,
    #[serde(default)]
    pub local_balance: String,
    #[serde(default)]
    pub remote_balance: String,
    #[serde(default)]
    pub channel_point: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListPeersResponse {
    #[serde(default)]
    pub peers: Vec<WirePeer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePeer {
    #[serde(default)]
    pub pub_key: String,
}

// ── Channel mutations ───────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ConnectPeerRequest {
    pub addr: PeerAddress,
}

#[derive(Debug, Serialize)]
pub struct PeerAddress {
    pub pubkey: String,
    pub host: String,
}

#[derive(Debug, Serialize)]
pub struct OpenChannelRequest {
    pub node_pubkey_string: String,
    pub local_funding_amount: i64,
}

#[derive(Debug, Serialize)]
pub struct CloseChannelRequest {
    pub channel_point: WireChannelPoint,
    pub force: bool,
}

#[derive(Debug, Serialize)]
pub struct WireChannelPoint {
    pub funding_txid_str: String,
    pub output_index: u32,
}

/// Intermediate payloads on the `closeChannel` stream. `close_pending`
/// acknowledges the close transaction; `chan_close` confirms a
/// force-close on chain.
#[derive(Debug, Default, Deserialize)]
pub struct CloseStatusUpdate {
    #[serde(default)]
    pub close_pending: Option<serde_json::Value>,
    #[serde(default)]
    pub chan_close: Option<ChannelCloseUpdate>,
}

/// `closing_txid` is raw txid bytes (little-endian; reverse for the
/// usual hex display).
#[derive(Debug, Deserialize)]
pub struct ChannelCloseUpdate {
    #[serde(default)]
    pub closing_txid: Vec<u8>,
}

// ── Wallet queries ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct WalletBalanceResponse {
    #[serde(default)]
    pub total_balance: String,
    #[serde(default)]
    pub confirmed_balance: String,
    #[serde(default)]
    pub unconfirmed_balance: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChannelBalanceResponse {
    #[serde(default)]
    pub balance: String,
    #[serde(default)]
    pub pending_open_balance: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewAddressResponse {
    #[serde(default)]
    pub address: String,
}

// ── Unlocker mode ───────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct GenSeedResponse {
    #[serde(default)]
    pub cipher_seed_mnemonic: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct InitWalletRequest {
    pub wallet_password: Vec<u8>,
    pub cipher_seed_mnemonic: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_window: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct UnlockWalletRequest {
    pub wallet_password: Vec<u8>,
}

#[derive(Debug, Serialize)]
pub struct ChangePasswordRequest {
    pub current_password: Vec<u8>,
    pub new_password: Vec<u8>,
}
