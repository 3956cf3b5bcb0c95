// ── Reactive wallet store ──
//
// Single shared mutable resource for the controllers. Every field is a
// watch-backed cell: a write is published to subscribers before the
// setter returns (`send_modify` updates unconditionally, even with zero
// receivers). No cross-field transactions — each cell is independent
// and refreshes are idempotent reads, so last-write-wins per field.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;

use crate::config::SEED_VERIFY_COUNT;
use crate::model::{ChannelRecord, PeerRecord, PendingChannelRecord, Settings};

// ── Cell ────────────────────────────────────────────────────────────

/// A single observable state field.
#[derive(Debug)]
pub struct Cell<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone + Send + Sync + 'static> Cell<T> {
    fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Current value (cheap for `Arc`-wrapped collections).
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replace the value, publishing to all subscribers synchronously.
    pub fn set(&self, value: T) {
        self.tx.send_modify(|v| *v = value);
    }

    /// Mutate the value in place, publishing afterwards.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Subscribe to changes.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

// ── Onboarding state ────────────────────────────────────────────────

/// Transient onboarding fields, cleared explicitly at the start of each
/// onboarding step. Owned exclusively by the controllers.
#[derive(Debug, Clone)]
pub struct OnboardingState {
    /// The generated cipher seed, one word per slot.
    pub seed_mnemonic: Vec<String>,
    /// 1-based word positions the user must re-enter to verify the seed.
    pub seed_verify_indexes: Vec<usize>,
    /// User guesses for the verification positions.
    pub seed_verify: Vec<String>,
    pub password: SecretString,
    pub password_verify: SecretString,
    pub new_password: SecretString,
    pub restoring: bool,
    /// Fixed 24-slot buffer filled page by page during restore.
    pub restore_seed: Vec<String>,
    pub restore_index: usize,
    pub pubkey_at_host: String,
    pub amount: String,
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self {
            seed_mnemonic: Vec::new(),
            seed_verify_indexes: Vec::new(),
            seed_verify: vec![String::new(); SEED_VERIFY_COUNT],
            password: SecretString::from(String::new()),
            password_verify: SecretString::from(String::new()),
            new_password: SecretString::from(String::new()),
            restoring: false,
            restore_seed: Vec::new(),
            restore_index: 0,
            pubkey_at_host: String::new(),
            amount: String::new(),
        }
    }
}

// ── Store ───────────────────────────────────────────────────────────

/// The reactive state container shared by the controllers and observed
/// by view-layer consumers.
pub struct WalletStore {
    // Channel collections — replaced wholesale on each refresh.
    pub channels: Cell<Arc<Vec<ChannelRecord>>>,
    pub pending_channels: Cell<Arc<Vec<PendingChannelRecord>>>,
    pub peers: Cell<Arc<Vec<PeerRecord>>>,
    pub selected_channel: Cell<Option<ChannelRecord>>,

    // Wallet status scalars — each updated by its own getter.
    pub first_start: Cell<bool>,
    pub wallet_unlocked: Cell<bool>,
    pub lnd_ready: Cell<bool>,
    pub wallet_address: Cell<Option<String>>,
    pub balance_satoshis: Cell<i64>,
    pub confirmed_balance_satoshis: Cell<i64>,
    pub unconfirmed_balance_satoshis: Cell<i64>,
    pub channel_balance_satoshis: Cell<i64>,
    pub pending_balance_satoshis: Cell<i64>,

    pub onboarding: Cell<OnboardingState>,
    pub settings: Cell<Settings>,
}

impl WalletStore {
    pub fn new() -> Self {
        Self {
            channels: Cell::new(Arc::new(Vec::new())),
            pending_channels: Cell::new(Arc::new(Vec::new())),
            peers: Cell::new(Arc::new(Vec::new())),
            selected_channel: Cell::new(None),
            first_start: Cell::new(false),
            wallet_unlocked: Cell::new(false),
            lnd_ready: Cell::new(false),
            wallet_address: Cell::new(None),
            balance_satoshis: Cell::new(0),
            confirmed_balance_satoshis: Cell::new(0),
            unconfirmed_balance_satoshis: Cell::new(0),
            channel_balance_satoshis: Cell::new(0),
            pending_balance_satoshis: Cell::new(0),
            onboarding: Cell::new(OnboardingState::default()),
            settings: Cell::new(Settings::default()),
        }
    }
}

impl Default for WalletStore {
    fn default() -> Self {
        Self::new()
    }
}
