//! Virtual dispatch table builder
//!
//! Each class keeps, per virtual name, the implementation it currently resolves
//! to. Instantiation copies that mapping by value into every level of the new
//! chain, so redefinitions after construction never reach live instances.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use super::Class;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::method::Method;
use crate::runtime::value::Value;

/// Virtual name -> resolved implementation
#[derive(Clone, Default)]
pub(crate) struct VirtualTable {
    entries: BTreeMap<String, Value>,
}

impl VirtualTable {
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub(crate) fn resolve(&mut self, name: &str, implementation: Value) {
        self.entries.insert(name.to_string(), implementation);
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Value copy of every resolution, used to seed a new level's record
    pub(crate) fn snapshot(&self) -> HashMap<String, Value> {
        self.entries
            .iter()
            .map(|(name, implementation)| (name.clone(), implementation.clone()))
            .collect()
    }
}

/// Placeholder for a virtual name nothing has implemented yet
pub(crate) fn abstract_stub(name: &str) -> Method {
    let owned = name.to_string();
    Method::new(name, move |this, _| {
        warn!(
            name = %owned,
            class = %this.most_derived().class().name(),
            "abstract method invoked"
        );
        Err(RuntimeError::AbstractMethod {
            name: owned.clone(),
        })
    })
}

impl Class {
    /// Declare `name` virtual on this class
    ///
    /// The current method-table entry becomes the resolution; without one an
    /// abstract stub is installed. Later `define` calls for `name` on this class,
    /// or on subclasses created after this call, update the resolution.
    pub fn declare_virtual(&self, name: &str) -> RuntimeResult<()> {
        self.ensure_unprotected(|| format!("declare '{name}' virtual"))?;
        let resolved = self.resolution_for(name);
        let is_abstract = !self.has_own_entry(name);
        self.0.virtuals.borrow_mut().resolve(name, resolved);
        debug!(class = %self.name(), name, is_abstract, "virtual method declared");
        Ok(())
    }

    pub fn is_virtual(&self, name: &str) -> bool {
        self.0.virtuals.borrow().contains(name)
    }

    /// Virtual names known to this class, sorted
    pub fn virtual_names(&self) -> Vec<String> {
        self.0.virtuals.borrow().names()
    }

    /// Implementation `name` currently resolves to for new instances
    pub fn resolved_virtual(&self, name: &str) -> Option<Value> {
        self.0.virtuals.borrow().get(name).cloned()
    }

    /// Snapshot of every virtual name's current resolution
    pub fn virtual_snapshot(&self) -> HashMap<String, Value> {
        self.0.virtuals.borrow().snapshot()
    }

    /// Re-resolve `name` after its method-table entry changed
    pub(crate) fn refresh_virtual(&self, name: &str) {
        let resolved = self.resolution_for(name);
        self.0.virtuals.borrow_mut().resolve(name, resolved);
        debug!(class = %self.name(), name, "virtual method overridden");
    }

    fn has_own_entry(&self, name: &str) -> bool {
        self.0.methods.borrow().contains_key(name)
    }

    fn resolution_for(&self, name: &str) -> Value {
        self.method(name)
            .unwrap_or_else(|| Value::Method(abstract_stub(name)))
    }
}
