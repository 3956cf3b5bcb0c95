// ── Wallet controller ──
//
// Onboarding state machine (seed, password, restore), unlock
// sequencing, and the balance/exchange-rate pollers. The onboarding
// steps come in pairs: an `init_*` reset that clears exactly its own
// fields and navigates, and a `check_*` validator that either advances
// the flow or surfaces a notice.

use std::sync::Arc;

use rand::seq::index::sample;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use lnwallet_rpc::{LightningRpc, RateSource};

use crate::config::{
    MIN_PASSWORD_LENGTH, POLL_DELAY, RATE_DELAY, RECOVERY_WINDOW, RESTORE_PAGE_STEP, SEED_LENGTH,
    SEED_VERIFY_COUNT,
};
use crate::error::CoreError;
use crate::model::channel::parse_sat;
use crate::store::WalletStore;
use crate::ui::{Navigator, NoticeKind, Notifier, SettingsStore, View};
use crate::wire::{
    self, ChangePasswordRequest, ChannelBalanceResponse, GenSeedResponse, InitWalletRequest,
    NewAddressResponse, UnlockWalletRequest, WalletBalanceResponse,
};

/// Drives onboarding, unlock, and the wallet-level pollers. Cheap to
/// clone; all fields are shared handles.
#[derive(Clone)]
pub struct WalletController {
    store: Arc<WalletStore>,
    rpc: Arc<dyn LightningRpc>,
    nav: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    settings_store: Arc<dyn SettingsStore>,
    rates: Arc<dyn RateSource>,
}

impl WalletController {
    pub fn new(
        store: Arc<WalletStore>,
        rpc: Arc<dyn LightningRpc>,
        nav: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        settings_store: Arc<dyn SettingsStore>,
        rates: Arc<dyn RateSource>,
    ) -> Self {
        Self {
            store,
            rpc,
            nav,
            notifier,
            settings_store,
            rates,
        }
    }

    // ── Startup probe ───────────────────────────────────────────────

    /// Distinguish first run from returning user with a single probe:
    /// `GenSeed` only succeeds while no wallet exists yet.
    pub async fn init(&self) {
        match self.generate_seed().await {
            Ok(()) => {
                self.store.first_start.set(true);
                self.nav.go_to(View::Loader);
                self.nav.go_to(View::SelectSeed);
            }
            Err(err) => {
                debug!(%err, "wallet exists, asking for unlock password");
                self.store.first_start.set(false);
                self.nav.go_to(View::Password);
            }
        }
    }

    /// Generate a fresh cipher seed. Failure propagates unchanged.
    pub async fn generate_seed(&self) -> Result<(), CoreError> {
        let raw = self.rpc.unlocker_call("GenSeed", json!({})).await?;
        let resp: GenSeedResponse = wire::decode(raw)?;
        self.store
            .onboarding
            .update(|ob| ob.seed_mnemonic = resp.cipher_seed_mnemonic);
        Ok(())
    }

    // ── Seed verification ───────────────────────────────────────────

    /// Pick fresh verification positions, clear the previous guesses,
    /// and show the verify screen. Positions are 1-based labels.
    pub fn init_seed_verify(&self) {
        let len = self.store.onboarding.get().seed_mnemonic.len();
        let mut indexes: Vec<usize> = sample(&mut rand::thread_rng(), len, SEED_VERIFY_COUNT.min(len))
            .into_iter()
            .map(|i| i + 1)
            .collect();
        indexes.sort_unstable();
        self.store.onboarding.update(|ob| {
            ob.seed_verify = vec![String::new(); SEED_VERIFY_COUNT];
            ob.seed_verify_indexes = indexes;
        });
        self.nav.go_to(View::SeedVerify);
    }

    /// Record one guessed seed word, normalized to lowercase.
    pub fn set_seed_verify(&self, word: &str, index: usize) {
        let word = word.to_lowercase();
        self.store.onboarding.update(|ob| {
            if let Some(slot) = ob.seed_verify.get_mut(index) {
                *slot = word;
            }
        });
    }

    /// Compare the guesses against the mnemonic at the chosen
    /// positions; an exact match on all of them advances to password
    /// setup. Fails closed: without a full set of positions and
    /// guesses there is nothing verified, so the flow never advances.
    pub async fn check_seed(&self) {
        let ob = self.store.onboarding.get();
        let matches = ob.seed_verify_indexes.len() == SEED_VERIFY_COUNT
            && ob.seed_verify.len() == SEED_VERIFY_COUNT
            && ob
                .seed_verify_indexes
                .iter()
                .zip(&ob.seed_verify)
                .all(|(&index, guess)| {
                    index
                        .checked_sub(1)
                        .and_then(|i| ob.seed_mnemonic.get(i))
                        .is_some_and(|word| word == guess)
                });
        if matches {
            self.init_set_password();
        } else {
            self.notifier
                .display("Seed words do not match!", NoticeKind::Error);
        }
    }

    // ── Password steps ──────────────────────────────────────────────

    pub fn init_set_password(&self) {
        self.store.onboarding.update(|ob| {
            ob.password = SecretString::from(String::new());
            ob.password_verify = SecretString::from(String::new());
        });
        self.nav.go_to(View::SetPassword);
    }

    pub fn init_password(&self) {
        self.store
            .onboarding
            .update(|ob| ob.password = SecretString::from(String::new()));
        self.nav.go_to(View::Password);
    }

    pub fn init_reset_password(&self) {
        self.store.onboarding.update(|ob| {
            ob.password = SecretString::from(String::new());
            ob.password_verify = SecretString::from(String::new());
            ob.new_password = SecretString::from(String::new());
        });
        self.nav.go_to(View::ResetPasswordCurrent);
    }

    pub fn set_password(&self, password: &str) {
        let password = SecretString::from(password.to_owned());
        self.store.onboarding.update(|ob| ob.password = password);
    }

    pub fn set_password_verify(&self, password: &str) {
        let password = SecretString::from(password.to_owned());
        self.store
            .onboarding
            .update(|ob| ob.password_verify = password);
    }

    pub fn set_new_password(&self, password: &str) {
        let password = SecretString::from(password.to_owned());
        self.store.onboarding.update(|ob| ob.new_password = password);
    }

    /// Validate the new wallet password and initialize the wallet with
    /// the generated seed.
    pub async fn check_new_password(&self) {
        let ob = self.store.onboarding.get();
        let password = ob.password.expose_secret();
        if password.len() < MIN_PASSWORD_LENGTH {
            self.notifier.display(
                "Password must be at least 8 characters long",
                NoticeKind::Error,
            );
            return;
        }
        if password != ob.password_verify.expose_secret() {
            self.notifier
                .display("Passwords do not match!", NoticeKind::Error);
            return;
        }
        self.init_wallet(password, ob.seed_mnemonic.clone(), None)
            .await;
    }

    /// Validate the reset form: length, confirmation match, and that
    /// the new password differs from the current one. Any failure
    /// bounces back to the current-password step.
    pub async fn check_reset_password(&self) {
        let ob = self.store.onboarding.get();
        let current = ob.password.expose_secret();
        let new = ob.new_password.expose_secret();
        let failure = if new.len() < MIN_PASSWORD_LENGTH {
            Some("Password must be at least 8 characters long")
        } else if new == current {
            Some("New password must not match old password!")
        } else if new != ob.password_verify.expose_secret() {
            Some("Passwords do not match!")
        } else {
            None
        };
        if let Some(message) = failure {
            self.notifier.display(message, NoticeKind::Error);
            self.nav.go_to(View::ResetPasswordCurrent);
            return;
        }
        self.reset_password(current, new).await;
    }

    // ── Wallet creation and unlock ──────────────────────────────────

    /// Initialize the wallet from a seed. Success counts as an unlock;
    /// failure is surfaced without navigating.
    pub async fn init_wallet(
        &self,
        wallet_password: &str,
        seed_mnemonic: Vec<String>,
        recovery_window: Option<i32>,
    ) {
        let req = InitWalletRequest {
            wallet_password: wallet_password.as_bytes().to_vec(),
            cipher_seed_mnemonic: seed_mnemonic,
            recovery_window,
        };
        match self.try_unlocker_call("InitWallet", &req).await {
            Ok(()) => {
                self.store.wallet_unlocked.set(true);
                self.nav.go_to(View::SeedSuccess);
            }
            Err(err) => {
                error!(%err, "initializing wallet failed");
                self.notifier
                    .display("Initializing wallet failed!", NoticeKind::Error);
            }
        }
    }

    /// Change the wallet password through the unlocker service.
    pub async fn reset_password(&self, current_password: &str, new_password: &str) {
        let req = ChangePasswordRequest {
            current_password: current_password.as_bytes().to_vec(),
            new_password: new_password.as_bytes().to_vec(),
        };
        match self.try_unlocker_call("ChangePassword", &req).await {
            Ok(()) => self.nav.go_to(View::ResetPasswordSaved),
            Err(err) => {
                error!(%err, "changing password failed");
                self.notifier
                    .display("Changing password failed!", NoticeKind::Error);
            }
        }
    }

    /// Unlock using the password typed on the unlock screen.
    pub async fn check_password(&self) {
        let ob = self.store.onboarding.get();
        self.unlock_wallet(ob.password.expose_secret()).await;
    }

    /// Unlock the wallet. Success shows the wait screen immediately;
    /// the home screen is gated on the separately-signaled node
    /// readiness.
    pub async fn unlock_wallet(&self, wallet_password: &str) {
        let req = UnlockWalletRequest {
            wallet_password: wallet_password.as_bytes().to_vec(),
        };
        match self.try_unlocker_call("UnlockWallet", &req).await {
            Ok(()) => {
                self.store.wallet_unlocked.set(true);
                self.nav.go_to(View::Wait);
                self.go_home_when_ready();
            }
            Err(err) => {
                error!(%err, "unlocking wallet failed");
                self.notifier
                    .display("Unlocking wallet failed!", NoticeKind::Error);
            }
        }
    }

    /// One-shot reactive wait: navigate home on the first `lnd_ready`
    /// observation.
    fn go_home_when_ready(&self) {
        let store = Arc::clone(&self.store);
        let nav = Arc::clone(&self.nav);
        tokio::spawn(async move {
            let mut rx = store.lnd_ready.subscribe();
            loop {
                if *rx.borrow_and_update() {
                    nav.go_to(View::Home);
                    break;
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
        });
    }

    async fn try_unlocker_call<T: serde::Serialize>(
        &self,
        method: &str,
        req: &T,
    ) -> Result<(), CoreError> {
        self.rpc.unlocker_call(method, wire::encode(req)?).await?;
        Ok(())
    }

    // ── Restore flow ────────────────────────────────────────────────

    /// Start restore entry with an empty 24-slot word buffer.
    pub fn init_restore_wallet(&self) {
        self.store.onboarding.update(|ob| {
            ob.restore_seed = vec![String::new(); SEED_LENGTH];
            ob.restore_index = 0;
        });
        self.nav.go_to(View::RestoreSeed);
    }

    /// Record one restored seed word, normalized to lowercase.
    pub fn set_restore_seed(&self, word: &str, index: usize) {
        let word = word.to_lowercase();
        self.store.onboarding.update(|ob| {
            if let Some(slot) = ob.restore_seed.get_mut(index) {
                *slot = word;
            }
        });
    }

    pub fn set_restoring_wallet(&self, restoring: bool) {
        self.store.onboarding.update(|ob| ob.restoring = restoring);
    }

    /// Page backwards; below the first page, return to seed selection.
    pub fn init_prev_restore_page(&self) {
        let index = self.store.onboarding.get().restore_index;
        if index < RESTORE_PAGE_STEP {
            self.nav.go_to(View::SelectSeed);
            return;
        }
        self.store
            .onboarding
            .update(|ob| ob.restore_index = index - RESTORE_PAGE_STEP);
    }

    /// Page forwards; past the last page, advance to the password step.
    pub fn init_next_restore_page(&self) {
        let index = self.store.onboarding.get().restore_index;
        if index + RESTORE_PAGE_STEP >= SEED_LENGTH {
            self.nav.go_to(View::RestorePassword);
            return;
        }
        self.store
            .onboarding
            .update(|ob| ob.restore_index = index + RESTORE_PAGE_STEP);
    }

    /// Initialize the wallet from the accumulated restore buffer with
    /// the fixed recovery look-back window.
    pub async fn restore_wallet(&self) {
        let ob = self.store.onboarding.get();
        self.init_wallet(
            ob.password.expose_secret(),
            ob.restore_seed.clone(),
            Some(RECOVERY_WINDOW),
        )
        .await;
    }

    // ── Initial deposit ─────────────────────────────────────────────

    /// Show the deposit address as soon as one exists. While the
    /// address is still null this waits reactively on the store, not
    /// on a timer.
    pub fn init_initial_deposit(&self) {
        if self.store.wallet_address.get().is_some() {
            self.nav.go_to(View::NewAddress);
            return;
        }
        self.nav.go_to(View::Wait);
        let store = Arc::clone(&self.store);
        let nav = Arc::clone(&self.nav);
        tokio::spawn(async move {
            let mut rx = store.wallet_address.subscribe();
            loop {
                if rx.borrow_and_update().is_some() {
                    nav.go_to(View::NewAddress);
                    break;
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
        });
    }

    // ── Balances ────────────────────────────────────────────────────

    /// Refresh both balances concurrently; each failure is contained.
    pub async fn update(&self) {
        tokio::join!(self.get_balance(), self.get_channel_balance());
    }

    pub async fn get_balance(&self) {
        if let Err(err) = self.fetch_balance().await {
            error!(%err, "getting wallet balance failed");
        }
    }

    pub async fn get_channel_balance(&self) {
        if let Err(err) = self.fetch_channel_balance().await {
            error!(%err, "getting channel balance failed");
        }
    }

    pub async fn get_new_address(&self) {
        if let Err(err) = self.fetch_new_address().await {
            error!(%err, "getting new address failed");
        }
    }

    async fn fetch_balance(&self) -> Result<(), CoreError> {
        let raw = self.rpc.call("WalletBalance", json!({})).await?;
        let resp: WalletBalanceResponse = wire::decode(raw)?;
        self.store.balance_satoshis.set(parse_sat(&resp.total_balance));
        self.store
            .confirmed_balance_satoshis
            .set(parse_sat(&resp.confirmed_balance));
        self.store
            .unconfirmed_balance_satoshis
            .set(parse_sat(&resp.unconfirmed_balance));
        Ok(())
    }

    async fn fetch_channel_balance(&self) -> Result<(), CoreError> {
        let raw = self.rpc.call("ChannelBalance", json!({})).await?;
        let resp: ChannelBalanceResponse = wire::decode(raw)?;
        self.store.channel_balance_satoshis.set(parse_sat(&resp.balance));
        self.store
            .pending_balance_satoshis
            .set(parse_sat(&resp.pending_open_balance));
        Ok(())
    }

    async fn fetch_new_address(&self) -> Result<(), CoreError> {
        let raw = self.rpc.call("NewAddress", json!({ "type": 1 })).await?;
        let resp: NewAddressResponse = wire::decode(raw)?;
        self.store.wallet_address.set(Some(resp.address));
        Ok(())
    }

    // ── Exchange rate and settings ──────────────────────────────────

    /// Fetch the fiat exchange rate; on success store it and persist
    /// the settings. A failed fetch keeps the stale rate and persists
    /// nothing.
    pub async fn get_exchange_rate(&self) {
        if let Err(err) = self.fetch_exchange_rate().await {
            error!(%err, "getting exchange rate failed");
        }
    }

    async fn fetch_exchange_rate(&self) -> Result<(), CoreError> {
        let fiat = self.store.settings.get().fiat;
        let rate = self.rates.to_btc(&fiat).await?;
        self.store.settings.update(|s| {
            s.exchange_rate.insert(fiat.clone(), rate);
        });
        self.save_settings().await
    }

    /// Flip the fiat display preference and persist it.
    pub async fn toggle_display_fiat(&self) {
        self.store
            .settings
            .update(|s| s.display_fiat = !s.display_fiat);
        if let Err(err) = self.save_settings().await {
            error!(%err, "saving settings failed");
        }
    }

    async fn save_settings(&self) -> Result<(), CoreError> {
        let settings = self.store.settings.get();
        self.settings_store.save(&settings).await
    }

    // ── Pollers ─────────────────────────────────────────────────────

    /// Refresh balances forever on a fixed cadence. The token exists
    /// for tests; production callers pass a fresh one and let the task
    /// run for the process lifetime.
    pub fn poll_balances(&self, cancel: CancellationToken) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(POLL_DELAY);
            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    _ = interval.tick() => this.update().await,
                }
            }
        })
    }

    /// Refresh the exchange rate forever on a fixed cadence.
    pub fn poll_exchange_rate(&self, cancel: CancellationToken) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(RATE_DELAY);
            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    _ = interval.tick() => this.get_exchange_rate().await,
                }
            }
        })
    }
}
