//! Casting engine
//!
//! A cast locates, inside an instance's own chain, the level that represents a
//! given class. It never builds anything; repeated casts yield equal handles.

use tracing::trace;

use super::Instance;
use crate::runtime::class::Class;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::value::Value;

impl Class {
    /// Level of `instance`'s chain owned by this class, if any
    ///
    /// Searches toward more-derived levels first, then toward the root.
    pub fn try_cast(&self, instance: &Instance) -> Option<Instance> {
        if instance.class() == *self {
            return Some(instance.clone());
        }

        let below = std::iter::successors(instance.lower_level(), |level| level.lower_level());
        let above = std::iter::successors(instance.super_level(), |level| level.super_level());
        let found = below.chain(above).find(|level| level.class() == *self);

        trace!(
            target_class = %self.name(),
            from = %instance.class().name(),
            hit = found.is_some(),
            "cast lookup"
        );
        found
    }

    /// Like `try_cast`, but a miss is a `Cast` error
    pub fn cast(&self, instance: &Instance) -> RuntimeResult<Instance> {
        self.try_cast(instance).ok_or_else(|| RuntimeError::Cast {
            target: self.name().to_string(),
            instance: format!("instance of {}", instance.most_derived().class().name()),
        })
    }

    /// `value` is an instance whose chain contains a level of this class
    pub fn made(&self, value: &Value) -> bool {
        match value {
            Value::Instance(instance) => self.try_cast(instance).is_some(),
            _ => false,
        }
    }
}
