//! Rule registry seam and an in-memory implementation.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

/// Host categories used to group rules in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Player,
    Mobs,
    Spawning,
    Drops,
    /// Rules that affect world update behavior.
    #[default]
    Updates,
    Chat,
    Misc,
}

/// Value held by a registered rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Bool(bool),
    Int(i32),
}

impl RuleValue {
    #[must_use]
    pub const fn kind(self) -> RuleKind {
        match self {
            Self::Bool(_) => RuleKind::Bool,
            Self::Int(_) => RuleKind::Int,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Bool,
    Int,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
        }
    }
}

/// Typed handle to a registered rule.
pub struct RuleKey<T> {
    name: String,
    category: RuleCategory,
    _value: PhantomData<fn() -> T>,
}

impl<T> RuleKey<T> {
    #[must_use]
    pub fn new(name: impl Into<String>, category: RuleCategory) -> Self {
        Self {
            name: name.into(),
            category,
            _value: PhantomData,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn category(&self) -> RuleCategory {
        self.category
    }
}

// Manual impls so `T` need not be Clone/Debug/PartialEq itself.
impl<T> Clone for RuleKey<T> {
    fn clone(&self) -> Self {
        Self::new(self.name.clone(), self.category)
    }
}

impl<T> fmt::Debug for RuleKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleKey")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish()
    }
}

impl<T> PartialEq for RuleKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.category == other.category
    }
}

impl<T> Eq for RuleKey<T> {}

/// Trait for abstracting the host's rule storage.
/// Host-specific implementations should provide this
pub trait RuleRegistry {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Register a boolean rule with its default value.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule cannot be registered.
    fn register_bool(
        &mut self,
        name: &str,
        category: RuleCategory,
        default: bool,
    ) -> Result<RuleKey<bool>, Self::Error>;

    /// Register an integer rule with its default value.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule cannot be registered.
    fn register_int(
        &mut self,
        name: &str,
        category: RuleCategory,
        default: i32,
    ) -> Result<RuleKey<i32>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the rule is unknown to this registry.
    fn get_bool(&self, key: &RuleKey<bool>) -> Result<bool, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the rule is unknown to this registry.
    fn get_int(&self, key: &RuleKey<i32>) -> Result<i32, Self::Error>;

    /// Store a value without running any change hooks.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule is unknown to this registry.
    fn set_bool(&mut self, key: &RuleKey<bool>, value: bool) -> Result<(), Self::Error>;

    /// Store a value without running any change hooks.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule is unknown to this registry.
    fn set_int(&mut self, key: &RuleKey<i32>, value: i32) -> Result<(), Self::Error>;
}

/// Errors raised by [`MemoryRuleRegistry`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("rule `{name}` is already registered")]
    Duplicate { name: String },
    #[error("rule `{name}` is not registered")]
    Unknown { name: String },
    #[error("rule `{name}` holds a {actual} value, not {expected}")]
    TypeMismatch {
        name: String,
        expected: RuleKind,
        actual: RuleKind,
    },
}

/// Registered rule as stored by [`MemoryRuleRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub category: RuleCategory,
    pub default: RuleValue,
    pub value: RuleValue,
}

/// In-process registry keyed by rule name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRuleRegistry {
    rules: BTreeMap<String, RuleEntry>,
}

impl MemoryRuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate rules in name order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &RuleEntry)> {
        self.rules.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn insert(
        &mut self,
        name: &str,
        category: RuleCategory,
        default: RuleValue,
    ) -> Result<(), RegistryError> {
        if self.rules.contains_key(name) {
            return Err(RegistryError::Duplicate {
                name: name.to_string(),
            });
        }
        self.rules.insert(
            name.to_string(),
            RuleEntry {
                category,
                default,
                value: default,
            },
        );
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<&RuleEntry, RegistryError> {
        self.rules.get(name).ok_or_else(|| RegistryError::Unknown {
            name: name.to_string(),
        })
    }

    fn store(&mut self, name: &str, value: RuleValue) -> Result<(), RegistryError> {
        let entry = self.rules.get_mut(name).ok_or_else(|| RegistryError::Unknown {
            name: name.to_string(),
        })?;
        let actual = entry.value.kind();
        if actual != value.kind() {
            return Err(mismatch(name, value.kind(), actual));
        }
        entry.value = value;
        Ok(())
    }
}

fn mismatch(name: &str, expected: RuleKind, actual: RuleKind) -> RegistryError {
    RegistryError::TypeMismatch {
        name: name.to_string(),
        expected,
        actual,
    }
}

impl RuleRegistry for MemoryRuleRegistry {
    type Error = RegistryError;

    fn register_bool(
        &mut self,
        name: &str,
        category: RuleCategory,
        default: bool,
    ) -> Result<RuleKey<bool>, Self::Error> {
        self.insert(name, category, RuleValue::Bool(default))?;
        Ok(RuleKey::new(name, category))
    }

    fn register_int(
        &mut self,
        name: &str,
        category: RuleCategory,
        default: i32,
    ) -> Result<RuleKey<i32>, Self::Error> {
        self.insert(name, category, RuleValue::Int(default))?;
        Ok(RuleKey::new(name, category))
    }

    fn get_bool(&self, key: &RuleKey<bool>) -> Result<bool, Self::Error> {
        match self.lookup(key.name())?.value {
            RuleValue::Bool(value) => Ok(value),
            other => Err(mismatch(key.name(), RuleKind::Bool, other.kind())),
        }
    }

    fn get_int(&self, key: &RuleKey<i32>) -> Result<i32, Self::Error> {
        match self.lookup(key.name())?.value {
            RuleValue::Int(value) => Ok(value),
            other => Err(mismatch(key.name(), RuleKind::Int, other.kind())),
        }
    }

    fn set_bool(&mut self, key: &RuleKey<bool>, value: bool) -> Result<(), Self::Error> {
        self.store(key.name(), RuleValue::Bool(value))
    }

    fn set_int(&mut self, key: &RuleKey<i32>, value: i32) -> Result<(), Self::Error> {
        self.store(key.name(), RuleValue::Int(value))
    }
}
