// ── RPC gateway contract ──
//
// The orchestration layer consumes exactly three operation shapes from
// a Lightning node. Implementors own the connection lifecycle; callers
// never coordinate at the connection level.

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use serde_json::Value;

use crate::error::RpcError;

/// A finite result stream produced by [`LightningRpc::stream_call`].
///
/// `Ok` items are intermediate `data` payloads. An `Err` item is the
/// terminal `error` event — no further items follow it. Exhaustion
/// without an `Err` is the `end` event.
pub type RpcStream = BoxStream<'static, Result<Value, RpcError>>;

/// The three operation shapes a Lightning node exposes to this client.
///
/// Methods take wire-level snake_case argument records as loose JSON;
/// typed request/response structs live with the consumer, which
/// serializes at this boundary.
#[async_trait]
pub trait LightningRpc: Send + Sync {
    /// Unary call. Requires an unlocked wallet.
    async fn call(&self, method: &str, args: Value) -> Result<Value, RpcError>;

    /// Unary call in unlocker mode, available before the wallet's keys
    /// are decrypted (`GenSeed`, `InitWallet`, `UnlockWallet`,
    /// `ChangePassword`).
    async fn unlocker_call(&self, method: &str, args: Value) -> Result<Value, RpcError>;

    /// Open a server-streaming call (`openChannel`, `closeChannel`).
    async fn stream_call(&self, method: &str, args: Value) -> Result<RpcStream, RpcError>;
}
