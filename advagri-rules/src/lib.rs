//! AdvAgri Game Rules
//!
//! Registers the `allowSeasonsChange` and `lengthOfYear` game rules and keeps
//! the year length a whole multiple of the solar-term count. Host storage and
//! message delivery sit behind traits so the policy runs without a server.

pub mod config;
pub mod constants;
pub mod i18n;
pub mod notify;
pub mod registry;
pub mod rules;
pub mod solar_term;
pub mod validation;

// Re-export commonly used types
pub use config::{GameRulesConfig, RulesConfigError};
pub use notify::{CollectingSink, LogSink, Message, NotificationSink};
pub use registry::{
    MemoryRuleRegistry, RegistryError, RuleCategory, RuleEntry, RuleKey, RuleKind, RuleRegistry,
    RuleValue,
};
pub use rules::{AdvAgriGameRules, RulesError};
pub use solar_term::{Season, SolarTerm};
pub use validation::{BaseUnit, ConfigurationError, CorrectionEvent, Validation, Verdict, validate};

/// Owns a registry and a sink with the AdvAgri rules registered in it.
pub struct RulesHost<R, S>
where
    R: RuleRegistry,
    S: NotificationSink,
{
    registry: R,
    sink: S,
    rules: AdvAgriGameRules,
}

impl<R, S> RulesHost<R, S>
where
    R: RuleRegistry,
    S: NotificationSink,
{
    /// Register the rules with the solar-term count as base unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the base unit is unusable or registration fails.
    pub fn new(mut registry: R, sink: S) -> Result<Self, RulesError<R::Error>> {
        let rules = AdvAgriGameRules::register_solar(&mut registry)?;
        Ok(Self {
            registry,
            sink,
            rules,
        })
    }

    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub fn with_base_unit(mut registry: R, sink: S, base_unit: BaseUnit) -> Result<Self, R::Error> {
        let rules = AdvAgriGameRules::register(&mut registry, base_unit)?;
        Ok(Self {
            registry,
            sink,
            rules,
        })
    }

    #[must_use]
    pub const fn rules(&self) -> &AdvAgriGameRules {
        &self.rules
    }

    #[must_use]
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Handle a `lengthOfYear` change request.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot read or store the rule.
    pub fn propose_length_of_year(&mut self, proposed: i32) -> Result<Validation, R::Error> {
        self.rules
            .set_length_of_year(&mut self.registry, &mut self.sink, proposed)
    }

    /// # Errors
    ///
    /// Returns an error if the registry cannot store the rule.
    pub fn set_allow_seasons_change(&mut self, value: bool) -> Result<(), R::Error> {
        self.rules
            .set_allow_seasons_change(&mut self.registry, value)
    }

    /// # Errors
    ///
    /// Returns an error if the registry cannot store either rule.
    pub fn apply_config(&mut self, config: &GameRulesConfig) -> Result<Validation, R::Error> {
        config.apply(&self.rules, &mut self.registry, &mut self.sink)
    }

    /// # Errors
    ///
    /// Returns an error if the registry cannot read the rule.
    pub fn length_of_year(&self) -> Result<i32, R::Error> {
        self.rules.length_of_year(&self.registry)
    }

    /// # Errors
    ///
    /// Returns an error if the registry cannot read the rule.
    pub fn allow_seasons_change(&self) -> Result<bool, R::Error> {
        self.rules.allow_seasons_change(&self.registry)
    }

    pub fn into_parts(self) -> (R, S, AdvAgriGameRules) {
        (self.registry, self.sink, self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::convert::Infallible;
    use std::rc::Rc;

    /// Registry that never fails, sharing storage so tests can inspect it.
    #[derive(Clone, Default)]
    struct SharedRegistry {
        values: Rc<RefCell<HashMap<String, RuleValue>>>,
    }

    impl RuleRegistry for SharedRegistry {
        type Error = Infallible;

        fn register_bool(
            &mut self,
            name: &str,
            category: RuleCategory,
            default: bool,
        ) -> Result<RuleKey<bool>, Self::Error> {
            self.values
                .borrow_mut()
                .insert(name.to_string(), RuleValue::Bool(default));
            Ok(RuleKey::new(name, category))
        }

        fn register_int(
            &mut self,
            name: &str,
            category: RuleCategory,
            default: i32,
        ) -> Result<RuleKey<i32>, Self::Error> {
            self.values
                .borrow_mut()
                .insert(name.to_string(), RuleValue::Int(default));
            Ok(RuleKey::new(name, category))
        }

        fn get_bool(&self, key: &RuleKey<bool>) -> Result<bool, Self::Error> {
            Ok(matches!(
                self.values.borrow().get(key.name()),
                Some(RuleValue::Bool(true))
            ))
        }

        fn get_int(&self, key: &RuleKey<i32>) -> Result<i32, Self::Error> {
            match self.values.borrow().get(key.name()) {
                Some(RuleValue::Int(value)) => Ok(*value),
                _ => Ok(0),
            }
        }

        fn set_bool(&mut self, key: &RuleKey<bool>, value: bool) -> Result<(), Self::Error> {
            self.values
                .borrow_mut()
                .insert(key.name().to_string(), RuleValue::Bool(value));
            Ok(())
        }

        fn set_int(&mut self, key: &RuleKey<i32>, value: i32) -> Result<(), Self::Error> {
            self.values
                .borrow_mut()
                .insert(key.name().to_string(), RuleValue::Int(value));
            Ok(())
        }
    }

    #[test]
    fn host_corrects_and_persists_through_any_registry() {
        let registry = SharedRegistry::default();
        let shared = registry.values.clone();
        let mut host = RulesHost::new(registry, CollectingSink::new()).unwrap();

        let outcome = host.propose_length_of_year(30).unwrap();
        assert_eq!(outcome.final_value, 48);
        assert_eq!(
            shared.borrow().get("lengthOfYear"),
            Some(&RuleValue::Int(48))
        );
        assert_eq!(host.sink().messages.len(), 2);

        host.sink_mut().drain();
        host.propose_length_of_year(72).unwrap();
        assert!(host.sink().messages.is_empty());
        assert_eq!(host.length_of_year(), Ok(72));
    }

    #[test]
    fn host_applies_config_and_flags() {
        let mut host = RulesHost::new(MemoryRuleRegistry::new(), CollectingSink::new()).unwrap();
        host.set_allow_seasons_change(false).unwrap();
        assert_eq!(host.allow_seasons_change(), Ok(false));

        let config = GameRulesConfig {
            allow_seasons_change: true,
            length_of_year: 24,
        };
        let outcome = host.apply_config(&config).unwrap();
        assert_eq!(outcome.verdict, Verdict::BelowMinimum);
        assert_eq!(host.allow_seasons_change(), Ok(true));

        let (registry, sink, rules) = host.into_parts();
        assert_eq!(registry.len(), 2);
        assert_eq!(sink.messages.len(), 1);
        assert_eq!(rules.base_unit().get(), SolarTerm::COUNT as i32);
    }

    #[test]
    fn host_accepts_explicit_base_unit() {
        let base_unit = BaseUnit::new(4).unwrap();
        let mut host =
            RulesHost::with_base_unit(MemoryRuleRegistry::new(), CollectingSink::new(), base_unit)
                .unwrap();
        assert_eq!(host.length_of_year(), Ok(4));
        assert_eq!(host.propose_length_of_year(5).unwrap().final_value, 8);
        assert_eq!(host.rules().base_unit(), base_unit);
        assert_eq!(host.registry().len(), 2);
    }
}
