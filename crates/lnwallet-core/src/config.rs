//! Protocol and policy constants shared across the controllers.

use std::time::Duration;

/// Minimum accepted wallet password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Words in a cipher seed mnemonic.
pub const SEED_LENGTH: usize = 24;

/// Number of indexed positions checked during seed verification.
pub const SEED_VERIFY_COUNT: usize = 3;

/// Words shown per restore-entry page.
pub const RESTORE_PAGE_STEP: usize = 3;

/// Address look-back window when restoring a wallet from seed.
pub const RECOVERY_WINDOW: i32 = 250;

/// Fixed delay between balance refresh iterations.
pub const POLL_DELAY: Duration = Duration::from_secs(3);

/// Fixed delay between exchange-rate refresh iterations.
pub const RATE_DELAY: Duration = Duration::from_secs(15 * 60);
