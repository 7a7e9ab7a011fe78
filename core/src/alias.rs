//! Computed property aliases.
//!
//! A property alias normally names the input key to read. An alias of the form
//! `$STRATEGY(argument)` is instead computed from the object's other keys by
//! the registered [`AliasStrategy`] named `STRATEGY`.
//!
//! # Examples
//!
//! ```
//! use content_schema_core::AliasResolver;
//! use serde_json::json;
//!
//! let resolver = AliasResolver::default();
//! let siblings = json!({ "Family": "monster" });
//! let siblings = siblings.as_object().unwrap();
//!
//! assert_eq!(resolver.resolve("$UPPER_CASE(Family)", siblings), Some(json!("MONSTER")));
//! assert_eq!(resolver.resolve("$UPPER_CASE(Missing)", siblings), None);
//! assert_eq!(resolver.resolve("$SNAKE_CASE(Family)", siblings), None);
//! ```

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};
use tracing::trace;

/// Leading character of a computed alias.
pub const COMPUTED_ALIAS_MARKER: char = '$';

/// Returns `true` if `alias` uses the computed-alias syntax.
pub fn is_computed(alias: &str) -> bool {
    alias.starts_with(COMPUTED_ALIAS_MARKER)
}

/// Parsed `$STRATEGY(argument)` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputedAlias<'a> {
    pub strategy: &'a str,
    pub argument: &'a str,
}

impl<'a> ComputedAlias<'a> {
    /// Parses a computed alias. Returns `None` for plain aliases and for
    /// malformed expressions.
    pub fn parse(expr: &'a str) -> Option<Self> {
        let body = expr.strip_prefix(COMPUTED_ALIAS_MARKER)?;
        let open = body.find('(')?;
        let strategy = &body[..open];
        let argument = body[open + 1..].strip_suffix(')')?.trim();
        if strategy.is_empty() || argument.is_empty() {
            return None;
        }
        Some(Self { strategy, argument })
    }
}

/// Computes a property value from its siblings.
pub trait AliasStrategy: Send + Sync {
    /// Name used between `$` and `(` in schemas.
    fn name(&self) -> &str;

    /// Produces the value for `argument`, or `None` when it cannot be
    /// computed.
    fn resolve(&self, argument: &str, siblings: &Map<String, Value>) -> Option<Value>;
}

/// `$UPPER_CASE(sibling)`: the sibling's string value, upper-cased.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpperCase;

impl AliasStrategy for UpperCase {
    fn name(&self) -> &str {
        "UPPER_CASE"
    }

    fn resolve(&self, argument: &str, siblings: &Map<String, Value>) -> Option<Value> {
        siblings
            .get(argument)?
            .as_str()
            .map(|s| Value::String(s.to_uppercase()))
    }
}

/// Registry of [`AliasStrategy`] implementations.
///
/// [`Default`] registers the built-in [`UpperCase`] strategy.
pub struct AliasResolver {
    strategies: HashMap<String, Box<dyn AliasStrategy>>,
}

impl AliasResolver {
    /// Resolver with no strategies; every computed alias yields nothing.
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Registers `strategy`, returning any strategy it replaced.
    pub fn register(
        &mut self,
        strategy: impl AliasStrategy + 'static,
    ) -> Option<Box<dyn AliasStrategy>> {
        self.strategies
            .insert(strategy.name().to_string(), Box::new(strategy))
    }

    pub fn has_strategy(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// Evaluates a computed alias against `siblings`.
    pub fn resolve(&self, expr: &str, siblings: &Map<String, Value>) -> Option<Value> {
        let Some(alias) = ComputedAlias::parse(expr) else {
            trace!(alias = expr, "Malformed computed alias");
            return None;
        };
        let Some(strategy) = self.strategies.get(alias.strategy) else {
            trace!(strategy = alias.strategy, "No alias strategy registered");
            return None;
        };
        strategy.resolve(alias.argument, siblings)
    }
}

impl Default for AliasResolver {
    fn default() -> Self {
        let mut resolver = Self::empty();
        resolver.register(UpperCase);
        resolver
    }
}

impl fmt::Debug for AliasResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("AliasResolver")
            .field("strategies", &names)
            .finish()
    }
}
