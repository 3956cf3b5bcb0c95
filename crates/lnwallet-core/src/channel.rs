// ── Channel lifecycle controller ──
//
// Connect/open/close flows plus the wholesale refresh of the channel,
// pending-channel, and peer collections. Public entry points never
// return errors: failures are logged and, where the user initiated the
// action, surfaced through the notifier.

use std::sync::Arc;

use futures_util::StreamExt;
use serde_json::json;
use tracing::{debug, error, info};

use lnwallet_rpc::LightningRpc;

use crate::error::CoreError;
use crate::model::{
    ChannelPoint, ChannelRecord, PeerRecord, PendingChannelRecord, PendingStatus, to_satoshis,
};
use crate::store::WalletStore;
use crate::ui::{Navigator, NoticeKind, Notifier, View};
use crate::wire::{
    self, CloseChannelRequest, CloseStatusUpdate, ConnectPeerRequest, ListChannelsResponse,
    ListPeersResponse, OpenChannelRequest, PeerAddress, PendingChannelsResponse, WireChannelPoint,
};

/// Drives the channel lifecycle against the node and publishes results
/// into the shared store. Cheap to clone; all fields are shared handles.
#[derive(Clone)]
pub struct ChannelController {
    store: Arc<WalletStore>,
    rpc: Arc<dyn LightningRpc>,
    nav: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl ChannelController {
    pub fn new(
        store: Arc<WalletStore>,
        rpc: Arc<dyn LightningRpc>,
        nav: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            rpc,
            nav,
            notifier,
        }
    }

    // ── Navigation entry points ─────────────────────────────────────

    /// Open the channel list and refresh it.
    pub async fn init(&self) {
        self.nav.go_to(View::Channels);
        self.update().await;
    }

    /// Open the channel-create form with cleared inputs.
    pub fn init_create(&self) {
        self.store.onboarding.update(|ob| {
            ob.pubkey_at_host.clear();
            ob.amount.clear();
        });
        self.nav.go_to(View::ChannelCreate);
    }

    /// Select a channel, refresh, and show its detail view.
    pub async fn select(&self, channel: ChannelRecord) {
        self.store.selected_channel.set(Some(channel));
        self.update().await;
        self.nav.go_to(View::ChannelDetail);
    }

    pub fn set_amount(&self, amount: &str) {
        self.store
            .onboarding
            .update(|ob| ob.amount = amount.to_owned());
    }

    pub fn set_pubkey_at_host(&self, value: &str) {
        self.store
            .onboarding
            .update(|ob| ob.pubkey_at_host = value.to_owned());
    }

    // ── Collection refresh ──────────────────────────────────────────

    /// Refresh all three collections concurrently. Each getter fails
    /// independently; a partial refresh leaves the other collections
    /// updated.
    pub async fn update(&self) {
        tokio::join!(self.get_channels(), self.get_pending_channels(), self.get_peers());
    }

    pub async fn get_channels(&self) {
        if let Err(err) = self.fetch_channels().await {
            error!(%err, "listing channels failed");
        }
    }

    pub async fn get_pending_channels(&self) {
        if let Err(err) = self.fetch_pending_channels().await {
            error!(%err, "listing pending channels failed");
        }
    }

    pub async fn get_peers(&self) {
        if let Err(err) = self.fetch_peers().await {
            error!(%err, "listing peers failed");
        }
    }

    async fn fetch_channels(&self) -> Result<(), CoreError> {
        let raw = self.rpc.call("listChannels", json!({})).await?;
        let resp: ListChannelsResponse = wire::decode(raw)?;
        let channels: Vec<ChannelRecord> = resp.channels.into_iter().map(Into::into).collect();
        self.store.channels.set(Arc::new(channels));
        Ok(())
    }

    async fn fetch_pending_channels(&self) -> Result<(), CoreError> {
        let raw = self.rpc.call("pendingChannels", json!({})).await?;
        let resp: PendingChannelsResponse = wire::decode(raw)?;
        let mut pending = Vec::new();
        for (bucket, status) in [
            (resp.pending_open_channels, PendingStatus::PendingOpen),
            (resp.pending_closing_channels, PendingStatus::PendingClosing),
            (
                resp.pending_force_closing_channels,
                PendingStatus::PendingForceClosing,
            ),
            (resp.waiting_close_channels, PendingStatus::WaitingClose),
        ] {
            pending.extend(
                bucket
                    .into_iter()
                    .map(|entry| PendingChannelRecord::from_wire(entry.channel, status)),
            );
        }
        self.store.pending_channels.set(Arc::new(pending));
        Ok(())
    }

    async fn fetch_peers(&self) -> Result<(), CoreError> {
        let raw = self.rpc.call("listPeers", json!({})).await?;
        let resp: ListPeersResponse = wire::decode(raw)?;
        let peers: Vec<PeerRecord> = resp
            .peers
            .into_iter()
            .map(|p| PeerRecord { pub_key: p.pub_key })
            .collect();
        self.store.peers.set(Arc::new(peers));
        Ok(())
    }

    // ── Open flow ───────────────────────────────────────────────────

    /// Validate the form inputs, connect to the peer, and open the
    /// channel. Any failure bounces back to the create form with a
    /// notice.
    pub async fn connect_and_open(&self) {
        if let Err(err) = self.try_connect_and_open().await {
            error!(%err, "creating channel failed");
            self.nav.go_to(View::ChannelCreate);
            self.notifier
                .display("Creating channel failed!", NoticeKind::Error);
        }
    }

    async fn try_connect_and_open(&self) -> Result<(), CoreError> {
        let ob = self.store.onboarding.get();
        let settings = self.store.settings.get();
        self.nav.go_to(View::Channels);
        let amount = to_satoshis(&ob.amount, &settings)?;
        let (pubkey, host) = ob
            .pubkey_at_host
            .split_once('@')
            .ok_or_else(|| CoreError::validation("Please enter the pubkey@host of the node"))?;
        // A connect failure is tolerated: the peer may already be
        // connected, in which case the node rejects the duplicate.
        self.connect_to_peer(pubkey, host).await;
        self.open_channel(pubkey, amount).await
    }

    /// Connect to a peer by pubkey and network address, refreshing the
    /// peer list on success. Failure is logged, not surfaced.
    pub async fn connect_to_peer(&self, pubkey: &str, host: &str) {
        if let Err(err) = self.try_connect_to_peer(pubkey, host).await {
            info!(%err, "connecting to peer failed");
        }
    }

    async fn try_connect_to_peer(&self, pubkey: &str, host: &str) -> Result<(), CoreError> {
        let req = ConnectPeerRequest {
            addr: PeerAddress {
                pubkey: pubkey.to_owned(),
                host: host.to_owned(),
            },
        };
        self.rpc.call("connectPeer", wire::encode(&req)?).await?;
        self.get_peers().await;
        Ok(())
    }

    /// Open a channel and refresh the collections on every progress
    /// event. Resolves when the node ends the stream.
    pub async fn open_channel(&self, pubkey: &str, amount_satoshis: i64) -> Result<(), CoreError> {
        let req = OpenChannelRequest {
            node_pubkey_string: pubkey.to_owned(),
            local_funding_amount: amount_satoshis,
        };
        let mut stream = self.rpc.stream_call("openChannel", wire::encode(&req)?).await?;
        while let Some(item) = stream.next().await {
            item?;
            self.update().await;
        }
        Ok(())
    }

    // ── Close flow ──────────────────────────────────────────────────

    /// Close the channel selected in the store. Inactive channels are
    /// force-closed.
    pub async fn close_selected_channel(&self) {
        let Some(channel) = self.store.selected_channel.get() else {
            self.notifier.display("No channel selected", NoticeKind::Error);
            return;
        };
        self.nav.go_to(View::Channels);
        let force = !channel.active;
        if let Err(err) = self.close_channel(&channel.channel_point, force).await {
            error!(%err, "closing channel failed");
            self.notifier
                .display("Closing channel failed!", NoticeKind::Error);
        }
    }

    /// Close a channel by its `txid:index` point. The point is parsed
    /// before anything is sent. A cooperative close refreshes the
    /// collections once the close transaction is pending; a confirmed
    /// force-close additionally prunes the pending entries of this
    /// channel in place.
    pub async fn close_channel(&self, channel_point: &str, force: bool) -> Result<(), CoreError> {
        let point: ChannelPoint = channel_point.parse()?;
        let req = CloseChannelRequest {
            channel_point: WireChannelPoint {
                funding_txid_str: point.funding_txid().to_owned(),
                output_index: point.output_index(),
            },
            force,
        };
        let mut stream = self.rpc.stream_call("closeChannel", wire::encode(&req)?).await?;
        while let Some(item) = stream.next().await {
            let update: CloseStatusUpdate = wire::decode(item?)?;
            if update.close_pending.is_some() {
                self.update().await;
            }
            if let Some(close) = update.chan_close {
                let mut txid = close.closing_txid;
                txid.reverse();
                debug!(closing_txid = %hex::encode(txid), "force close confirmed");
                self.remove_pending(point.funding_txid());
            }
        }
        Ok(())
    }

    /// Drop pending entries funded by the given txid. Keyed on the
    /// funding txid of the request, not the closing txid of the
    /// confirmation.
    fn remove_pending(&self, funding_tx_id: &str) {
        self.store.pending_channels.update(|list| {
            let pruned: Vec<PendingChannelRecord> = list
                .iter()
                .filter(|c| c.funding_tx_id != funding_tx_id)
                .cloned()
                .collect();
            *list = Arc::new(pruned);
        });
    }
}
