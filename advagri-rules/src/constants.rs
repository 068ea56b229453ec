//! Centralized rule names, defaults, and message keys for the AdvAgri game rules.
//!
//! Keeping them together ensures the identifiers the host persists and the
//! translation keys players see can only change through reviewed code.

// Logging -------------------------------------------------------------------
pub(crate) const DEBUG_ENV_VAR: &str = "ADVAGRI_DEBUG_LOGS";

// Rule names ----------------------------------------------------------------
pub const RULE_ALLOW_SEASONS_CHANGE: &str = "allowSeasonsChange";
pub const RULE_LENGTH_OF_YEAR: &str = "lengthOfYear";

// Defaults ------------------------------------------------------------------
pub const DEFAULT_ALLOW_SEASONS_CHANGE: bool = true;

// Message keys --------------------------------------------------------------
pub const MSG_LENGTH_NOT_MULTIPLE: &str = "adv_agri.game_rule.lengthOfYear.error1";
pub const MSG_LENGTH_CORRECTED: &str = "adv_agri.game_rule.lengthOfYear.error2";
pub const MSG_LENGTH_BELOW_MINIMUM: &str = "adv_agri.game_rule.lengthOfYear.error3";

/// Name of the single message argument carried by correction messages.
pub const MSG_ARG_VALUE: &str = "value";

#[cfg(debug_assertions)]
pub(crate) fn debug_log_enabled() -> bool {
    matches!(std::env::var(DEBUG_ENV_VAR), Ok(val) if val != "0")
}

#[cfg(not(debug_assertions))]
pub(crate) const fn debug_log_enabled() -> bool {
    false
}
