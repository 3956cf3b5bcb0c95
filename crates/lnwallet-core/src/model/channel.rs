// ── Channel and peer records ──
//
// Domain shapes derived from the node's wire responses. Collections of
// these are owned by the store and replaced wholesale on each refresh;
// the single exception is the pending list, which the close procedure
// prunes in place on a force-close confirmation.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::wire::{WireChannel, WirePendingChannel};

/// Status of a confirmed channel. Always `Open` — closed and pending
/// channels live in their own collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ChannelStatus {
    Open,
}

/// Bucket a pending channel was reported in, stamped onto each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PendingStatus {
    PendingOpen,
    PendingClosing,
    PendingForceClosing,
    WaitingClose,
}

/// A confirmed channel with a peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    pub remote_pubkey: String,
    pub capacity: i64,
    pub local_balance: i64,
    pub remote_balance: i64,
    pub channel_point: String,
    pub funding_tx_id: String,
    pub active: bool,
    pub status: ChannelStatus,
}

/// A channel mid-transition, not yet in the confirmed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChannelRecord {
    pub remote_pubkey: String,
    pub capacity: i64,
    pub local_balance: i64,
    pub remote_balance: i64,
    pub channel_point: String,
    pub funding_tx_id: String,
    pub status: PendingStatus,
}

/// A connected peer. Refreshed wholesale alongside channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerRecord {
    pub pub_key: String,
}

/// Numeric-string wire fields parse lossily: the node sends balances as
/// decimal strings, and an absent or malformed value reads as zero.
pub(crate) fn parse_sat(raw: &str) -> i64 {
    raw.parse().unwrap_or(0)
}

/// The funding txid is the portion of the channel point before the `:`.
fn funding_tx_id(channel_point: &str) -> String {
    channel_point
        .split(':')
        .next()
        .unwrap_or_default()
        .to_owned()
}

impl From<WireChannel> for ChannelRecord {
    fn from(raw: WireChannel) -> Self {
        Self {
            remote_pubkey: raw.remote_pubkey,
            capacity: parse_sat(&raw.capacity),
            local_balance: parse_sat(&raw.local_balance),
            remote_balance: parse_sat(&raw.remote_balance),
            funding_tx_id: funding_tx_id(&raw.channel_point),
            channel_point: raw.channel_point,
            active: raw.active,
            status: ChannelStatus::Open,
        }
    }
}

impl PendingChannelRecord {
    /// Build a pending record from a wire entry, stamped with the
    /// status of the bucket it was reported in.
    pub fn from_wire(raw: WirePendingChannel, status: PendingStatus) -> Self {
        Self {
            remote_pubkey: raw.remote_node_pub,
            capacity: parse_sat(&raw.capacity),
            local_balance: parse_sat(&raw.local_balance),
            remote_balance: parse_sat(&raw.remote_balance),
            funding_tx_id: funding_tx_id(&raw.channel_point),
            channel_point: raw.channel_point,
            status,
        }
    }
}
