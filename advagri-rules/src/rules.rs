//! Registration of the AdvAgri game rules and the `lengthOfYear` change hook.
use thiserror::Error;

use crate::constants::{
    DEFAULT_ALLOW_SEASONS_CHANGE, RULE_ALLOW_SEASONS_CHANGE, RULE_LENGTH_OF_YEAR,
    debug_log_enabled,
};
use crate::notify::{Message, NotificationSink};
use crate::registry::{RuleCategory, RuleKey, RuleRegistry};
use crate::solar_term::SolarTerm;
use crate::validation::{BaseUnit, ConfigurationError, Validation};

/// Errors raised while wiring or updating the rules.
#[derive(Debug, Error)]
pub enum RulesError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("rule registry failure: {0}")]
    Registry(#[source] E),
}

/// Handles to the registered rules plus the base unit `lengthOfYear` is held to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvAgriGameRules {
    allow_seasons_change: RuleKey<bool>,
    length_of_year: RuleKey<i32>,
    base_unit: BaseUnit,
}

impl AdvAgriGameRules {
    /// Register both rules under [`RuleCategory::Updates`].
    ///
    /// `lengthOfYear` defaults to one full cycle of the base unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry refuses either rule.
    pub fn register<R: RuleRegistry>(
        registry: &mut R,
        base_unit: BaseUnit,
    ) -> Result<Self, R::Error> {
        let allow_seasons_change = registry.register_bool(
            RULE_ALLOW_SEASONS_CHANGE,
            RuleCategory::Updates,
            DEFAULT_ALLOW_SEASONS_CHANGE,
        )?;
        let length_of_year =
            registry.register_int(RULE_LENGTH_OF_YEAR, RuleCategory::Updates, base_unit.get())?;
        log::debug!(
            "registered game rules {RULE_ALLOW_SEASONS_CHANGE} and {RULE_LENGTH_OF_YEAR} (base unit {})",
            base_unit.get()
        );
        Ok(Self {
            allow_seasons_change,
            length_of_year,
            base_unit,
        })
    }

    /// Register both rules using the solar-term count as the base unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the base unit is unusable or the registry refuses a rule.
    pub fn register_solar<R: RuleRegistry>(registry: &mut R) -> Result<Self, RulesError<R::Error>> {
        let base_unit = SolarTerm::base_unit()?;
        Self::register(registry, base_unit).map_err(RulesError::Registry)
    }

    #[must_use]
    pub const fn base_unit(&self) -> BaseUnit {
        self.base_unit
    }

    #[must_use]
    pub const fn allow_seasons_change_key(&self) -> &RuleKey<bool> {
        &self.allow_seasons_change
    }

    #[must_use]
    pub const fn length_of_year_key(&self) -> &RuleKey<i32> {
        &self.length_of_year
    }

    /// # Errors
    ///
    /// Returns an error if the registry cannot read the rule.
    pub fn allow_seasons_change<R: RuleRegistry>(&self, registry: &R) -> Result<bool, R::Error> {
        registry.get_bool(&self.allow_seasons_change)
    }

    /// # Errors
    ///
    /// Returns an error if the registry cannot store the rule.
    pub fn set_allow_seasons_change<R: RuleRegistry>(
        &self,
        registry: &mut R,
        value: bool,
    ) -> Result<(), R::Error> {
        registry.set_bool(&self.allow_seasons_change, value)
    }

    /// # Errors
    ///
    /// Returns an error if the registry cannot read the rule.
    pub fn length_of_year<R: RuleRegistry>(&self, registry: &R) -> Result<i32, R::Error> {
        registry.get_int(&self.length_of_year)
    }

    /// Handle a request to change the year length.
    ///
    /// The proposal is validated before anything is stored, so the registry
    /// only ever sees the corrected value. Messages are delivered after that
    /// write succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot store the rule; no messages are
    /// sent in that case.
    pub fn set_length_of_year<R, S>(
        &self,
        registry: &mut R,
        sink: &mut S,
        proposed: i32,
    ) -> Result<Validation, R::Error>
    where
        R: RuleRegistry,
        S: NotificationSink + ?Sized,
    {
        let outcome = self.base_unit.validate(proposed);
        registry.set_int(&self.length_of_year, outcome.final_value)?;
        self.report(sink, &outcome);
        Ok(outcome)
    }

    /// Change hook for a `lengthOfYear` value the host has already stored.
    ///
    /// A correction is written back first and messages follow in emission
    /// order. The write-back does not re-enter this hook.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot read or store the rule; no
    /// messages are sent in that case.
    pub fn on_length_of_year_changed<R, S>(
        &self,
        registry: &mut R,
        sink: &mut S,
    ) -> Result<Validation, R::Error>
    where
        R: RuleRegistry,
        S: NotificationSink + ?Sized,
    {
        let proposed = registry.get_int(&self.length_of_year)?;
        let outcome = self.base_unit.validate(proposed);
        if outcome.needs_write_back() {
            registry.set_int(&self.length_of_year, outcome.final_value)?;
        }
        self.report(sink, &outcome);
        Ok(outcome)
    }

    fn report<S: NotificationSink + ?Sized>(&self, sink: &mut S, outcome: &Validation) {
        if debug_log_enabled() {
            log::debug!(
                "{RULE_LENGTH_OF_YEAR} proposed {}: {:?} -> {}",
                outcome.proposed,
                outcome.verdict,
                outcome.final_value
            );
        }

        if !outcome.needs_write_back() {
            return;
        }

        for event in &outcome.events {
            sink.send(&Message::from(event));
        }
        log::warn!(
            "{RULE_LENGTH_OF_YEAR} {} corrected to {} (base unit {})",
            outcome.proposed,
            outcome.final_value,
            self.base_unit.get()
        );
    }
}
