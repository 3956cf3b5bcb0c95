// Shared test doubles for the controller unit tests: a scriptable RPC
// gateway plus recording navigator/notifier/settings collaborators.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::stream;
use serde_json::{Value, json};

use lnwallet_rpc::{LightningRpc, RateError, RateSource, RpcError, RpcStream};

use crate::error::CoreError;
use crate::model::Settings;
use crate::ui::{Navigator, NoticeKind, Notifier, SettingsStore, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallKind {
    Unary,
    Unlocker,
    Stream,
}

#[derive(Debug)]
pub(crate) struct RecordedCall {
    pub kind: CallKind,
    pub method: String,
    pub args: Value,
}

/// Scriptable [`LightningRpc`]. Unscripted unary methods resolve to an
/// empty object (every response struct tolerates that); unscripted
/// stream methods produce an immediately-ending stream.
#[derive(Default)]
pub(crate) struct MockRpc {
    unary: Mutex<HashMap<String, VecDeque<Result<Value, RpcError>>>>,
    streams: Mutex<HashMap<String, VecDeque<Vec<Result<Value, RpcError>>>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockRpc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unary (or unlocker) call to `method`.
    pub fn on(&self, method: &str, response: Result<Value, RpcError>) {
        self.unary
            .lock()
            .expect("lock")
            .entry(method.to_owned())
            .or_default()
            .push_back(response);
    }

    /// Queue the item sequence for the next stream call to `method`.
    /// An `Err` item is the terminal error event.
    pub fn on_stream(&self, method: &str, items: Vec<Result<Value, RpcError>>) {
        self.streams
            .lock()
            .expect("lock")
            .entry(method.to_owned())
            .or_default()
            .push_back(items);
    }

    pub fn calls_of(&self, method: &str) -> Vec<Value> {
        self.calls
            .lock()
            .expect("lock")
            .iter()
            .filter(|c| c.method == method)
            .map(|c| c.args.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("lock").len()
    }

    pub fn kinds_of(&self, method: &str) -> Vec<CallKind> {
        self.calls
            .lock()
            .expect("lock")
            .iter()
            .filter(|c| c.method == method)
            .map(|c| c.kind)
            .collect()
    }

    fn record(&self, kind: CallKind, method: &str, args: &Value) {
        self.calls.lock().expect("lock").push(RecordedCall {
            kind,
            method: method.to_owned(),
            args: args.clone(),
        });
    }

    fn next_unary(&self, method: &str) -> Result<Value, RpcError> {
        self.unary
            .lock()
            .expect("lock")
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(json!({})))
    }
}

#[async_trait]
impl LightningRpc for MockRpc {
    async fn call(&self, method: &str, args: Value) -> Result<Value, RpcError> {
        self.record(CallKind::Unary, method, &args);
        self.next_unary(method)
    }

    async fn unlocker_call(&self, method: &str, args: Value) -> Result<Value, RpcError> {
        self.record(CallKind::Unlocker, method, &args);
        self.next_unary(method)
    }

    async fn stream_call(&self, method: &str, args: Value) -> Result<RpcStream, RpcError> {
        self.record(CallKind::Stream, method, &args);
        let items = self
            .streams
            .lock()
            .expect("lock")
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_default();
        Ok(Box::pin(stream::iter(items)))
    }
}

/// Records every navigation target in order.
#[derive(Default)]
pub(crate) struct RecordingNav {
    views: Mutex<Vec<View>>,
}

impl RecordingNav {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn views(&self) -> Vec<View> {
        self.views.lock().expect("lock").clone()
    }
}

impl Navigator for RecordingNav {
    fn go_to(&self, view: View) {
        self.views.lock().expect("lock").push(view);
    }
}

/// Records every displayed notice.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    notices: Mutex<Vec<(String, NoticeKind)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(String, NoticeKind)> {
        self.notices.lock().expect("lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn display(&self, message: &str, kind: NoticeKind) {
        self.notices
            .lock()
            .expect("lock")
            .push((message.to_owned(), kind));
    }
}

/// Records every saved settings document.
#[derive(Default)]
pub(crate) struct RecordingSettingsStore {
    saves: Mutex<Vec<Settings>>,
}

impl RecordingSettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saves(&self) -> Vec<Settings> {
        self.saves.lock().expect("lock").clone()
    }
}

#[async_trait]
impl SettingsStore for RecordingSettingsStore {
    async fn save(&self, settings: &Settings) -> Result<(), CoreError> {
        self.saves.lock().expect("lock").push(settings.clone());
        Ok(())
    }
}

/// Canned [`RateSource`]: `Some(rate)` answers, `None` fails with a
/// server error.
pub(crate) struct FixedRateSource {
    rate: Option<f64>,
}

impl FixedRateSource {
    pub fn new(rate: Option<f64>) -> Self {
        Self { rate }
    }
}

#[async_trait]
impl RateSource for FixedRateSource {
    async fn to_btc(&self, _currency: &str) -> Result<f64, RateError> {
        self.rate.ok_or(RateError::Status { code: 500 })
    }
}
