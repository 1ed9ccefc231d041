//! Instance chains
//!
//! An instance is an arena of levels, one per class from the instantiated class
//! up to the root. `Instance` is a handle to one level of such a chain:
//!
//! ```text
//! index 0        index 1        ...   index n-1
//! [Circle] --super--> [Shape] --super--> [Object] --super--> (terminal)
//!          <--lower--         <--lower--
//! ```
//!
//! Every handle keeps the whole chain alive, so levels reached through `super`
//! or a cast never outlive their siblings.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use super::class::Class;
use super::error::RuntimeResult;
use super::value::Value;
use super::RuntimeShared;

/// Attribute protocol (read / write hooks)
pub mod access;

/// Casting engine
pub mod cast;

/// One ancestor's record inside a chain
pub(crate) struct Level {
    owner: Class,
    fields: RefCell<HashMap<String, Value>>,
}

/// Levels ordered most-derived first
pub(crate) struct Chain {
    levels: Vec<Level>,
}

/// Handle to one level of an instance chain
#[derive(Clone)]
pub struct Instance {
    chain: Rc<Chain>,
    index: usize,
}

impl Class {
    /// Instantiate this class
    ///
    /// The full chain is built before any user code runs; then `init` is resolved
    /// on the most-derived level and called with `args`. A failing constructor's
    /// error is returned unchanged and the half-initialized chain is dropped.
    pub fn new(&self, args: &[Value]) -> RuntimeResult<Instance> {
        let instance = Instance::build(self);
        trace!(
            class = %self.name(),
            levels = instance.chain_len(),
            "instance chain built"
        );
        instance.call("init", args)?;
        Ok(instance)
    }
}

impl Instance {
    /// Build the level arena for `class` with every record seeded from its virtual snapshot
    fn build(class: &Class) -> Instance {
        let snapshot = class.virtual_snapshot();
        let levels = class
            .lineage()
            .map(|owner| Level {
                owner,
                fields: RefCell::new(snapshot.clone()),
            })
            .collect();
        Instance {
            chain: Rc::new(Chain { levels }),
            index: 0,
        }
    }

    // ==================== Chain navigation ====================

    fn level(&self) -> &Level {
        &self.chain.levels[self.index]
    }

    fn at(&self, index: usize) -> Instance {
        Instance {
            chain: Rc::clone(&self.chain),
            index,
        }
    }

    /// Class this level represents
    pub fn class(&self) -> Class {
        self.level().owner.clone()
    }

    /// Next level toward the root; `None` at the root level
    pub fn super_level(&self) -> Option<Instance> {
        let next = self.index + 1;
        (next < self.chain.levels.len()).then(|| self.at(next))
    }

    /// Level built directly beneath this one; `None` at the most-derived level
    pub fn lower_level(&self) -> Option<Instance> {
        self.index.checked_sub(1).map(|prev| self.at(prev))
    }

    /// The externally visible instance this level belongs to
    pub fn most_derived(&self) -> Instance {
        self.at(0)
    }

    /// Number of levels in the chain (class depth + 1)
    pub fn chain_len(&self) -> usize {
        self.chain.levels.len()
    }

    /// Position of this level, 0 being the most-derived
    pub fn level_index(&self) -> usize {
        self.index
    }

    pub fn is_most_derived(&self) -> bool {
        self.index == 0
    }

    pub(crate) fn runtime(&self) -> Rc<RuntimeShared> {
        Rc::clone(self.level().owner.runtime())
    }

    // ==================== Raw record ====================

    /// Field stored on this level's own record, ignoring the protocol
    pub fn own_field(&self, key: &str) -> Option<Value> {
        self.level().fields.borrow().get(key).cloned()
    }

    pub fn has_own_field(&self, key: &str) -> bool {
        self.level().fields.borrow().contains_key(key)
    }

    /// Names stored on this level's own record, sorted
    pub fn own_field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.level().fields.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Store on this level's own record; `Nil` removes the field
    fn store(&self, key: &str, value: Value) {
        let mut fields = self.level().fields.borrow_mut();
        if value.is_nil() {
            fields.remove(key);
        } else {
            fields.insert(key.to_string(), value);
        }
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.chain, &other.chain) && self.index == other.index
    }
}

impl Eq for Instance {}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class().name())
            .field("level", &self.index)
            .field("chain_len", &self.chain_len())
            .finish()
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stringify() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "<{} instance>", self.class().name()),
        }
    }
}

// ==================== Tests ====================
