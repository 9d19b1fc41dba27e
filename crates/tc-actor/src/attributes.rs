//! Named integer attributes attached to every actor.
//!
//! The set of names is fixed when the actor is created; reading or writing
//! a name outside that set is an error rather than a silent insert.  Values
//! are always kept inside `[ATTRIBUTE_MIN, ATTRIBUTE_MAX]`.

use std::collections::BTreeMap;

use crate::{ActorError, ActorResult};

pub const ATTRIBUTE_MIN: i32 = 0;
pub const ATTRIBUTE_MAX: i32 = 1_000;

/// Attribute values keyed by name, iterated in name order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    values: BTreeMap<String, i32>,
}

impl Attributes {
    /// The attribute set every new actor starts with.
    pub fn standard() -> Self {
        Self::with(&[("happiness", 500), ("hunger", 1_000), ("learning", 0), ("tiredness", 1_000)])
    }

    /// An attribute set holding exactly `entries`, each value clamped.
    pub fn with(entries: &[(&str, i32)]) -> Self {
        let values = entries
            .iter()
            .map(|&(name, v)| (name.to_owned(), clamp(v)))
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> ActorResult<i32> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| ActorError::UnknownAttribute(name.to_owned()))
    }

    /// Overwrite `name` with `value`, clamped into range.
    pub fn set(&mut self, name: &str, value: i32) -> ActorResult<()> {
        *self.slot(name)? = clamp(value);
        Ok(())
    }

    /// Add `delta` to `name`, clamping the result.  Returns the new value.
    pub fn modify(&mut self, name: &str, delta: i32) -> ActorResult<i32> {
        let slot = self.slot(name)?;
        *slot = clamp(slot.saturating_add(delta));
        Ok(*slot)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn slot(&mut self, name: &str) -> ActorResult<&mut i32> {
        self.values
            .get_mut(name)
            .ok_or_else(|| ActorError::UnknownAttribute(name.to_owned()))
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::standard()
    }
}

#[inline]
fn clamp(v: i32) -> i32 {
    v.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX)
}
