//! Canonical domain types.

pub mod amount;
pub mod channel;
pub mod channel_point;
pub mod settings;

pub use amount::{Unit, from_satoshis, to_satoshis};
pub use channel::{ChannelRecord, ChannelStatus, PeerRecord, PendingChannelRecord, PendingStatus};
pub use channel_point::ChannelPoint;
pub use settings::Settings;
