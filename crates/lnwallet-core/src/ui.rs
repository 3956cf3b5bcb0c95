// ── View-layer and storage seams ──
//
// The controllers drive navigation and user-facing notices as side
// effects, and persist the settings document through an external
// storage collaborator. All three surfaces are traits implemented
// outside this crate.

use async_trait::async_trait;
use strum::Display;

use crate::error::CoreError;
use crate::model::Settings;

/// Navigation targets the controllers steer between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum View {
    Loader,
    SelectSeed,
    SeedVerify,
    SeedSuccess,
    SetPassword,
    Password,
    ResetPasswordCurrent,
    ResetPasswordSaved,
    RestoreSeed,
    RestorePassword,
    NewAddress,
    Wait,
    Home,
    Channels,
    ChannelDetail,
    ChannelCreate,
}

/// Transitions the displayed view.
pub trait Navigator: Send + Sync {
    fn go_to(&self, view: View);
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum NoticeKind {
    Error,
    Info,
}

/// Shows a user-facing banner. Every surfaced failure goes through
/// this single mechanism.
pub trait Notifier: Send + Sync {
    fn display(&self, message: &str, kind: NoticeKind);
}

/// Persists the settings document.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn save(&self, settings: &Settings) -> Result<(), CoreError>;
}
