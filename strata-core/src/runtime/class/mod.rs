//! Class descriptor registry
//!
//! A `Class` is a shared handle to one descriptor: name, superclass link, method
//! table, virtual-name set and event table. Handles compare by identity.
//!
//! Descriptors are created by `Class::subclass` (or `Runtime::class`) and are
//! mutated only by the defining code path: `define*` and `declare_virtual`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use super::error::{RuntimeError, RuntimeResult};
use super::events::{default_to_string, Event};
use super::instance::Instance;
use super::method::Method;
use super::value::Value;
use super::RuntimeShared;

/// Virtual dispatch table builder
pub mod dispatch;

use dispatch::VirtualTable;

/// Descriptor data behind a `Class` handle
pub(crate) struct ClassData {
    name: Rc<str>,
    superclass: Option<Class>,
    depth: usize,
    methods: RefCell<HashMap<String, Value>>,
    virtuals: RefCell<VirtualTable>,
    events: RefCell<HashMap<Event, Method>>,
    runtime: Rc<RuntimeShared>,
}

/// Handle to a class descriptor
#[derive(Clone)]
pub struct Class(pub(crate) Rc<ClassData>);

impl Class {
    // ==================== Creation ====================

    /// Create the root class of a runtime
    pub(crate) fn new_root(runtime: Rc<RuntimeShared>) -> Class {
        let name: Rc<str> = Rc::from(runtime.config.runtime.root_name.as_str());
        let mut events = HashMap::new();
        events.insert(Event::ToString, default_to_string());

        Class(Rc::new_cyclic(|weak| {
            let mut methods = HashMap::new();
            methods.insert(
                "init".to_string(),
                Value::Method(Method::new("init", |_, _| Ok(Value::Nil))),
            );
            methods.insert("class".to_string(), Value::Method(class_accessor(weak)));
            ClassData {
                name,
                superclass: None,
                depth: 0,
                methods: RefCell::new(methods),
                virtuals: RefCell::new(VirtualTable::default()),
                events: RefCell::new(events),
                runtime,
            }
        }))
    }

    /// Create a subclass of this class
    ///
    /// The new class starts with:
    /// - a copy of this class's virtual names and their resolutions,
    /// - a copy of this class's event table as it is right now,
    /// - a default `init` delegating to the superclass `init` with no arguments,
    /// - a `class` accessor returning the new class.
    ///
    /// Without a name the configured fallback ("Unnamed") is used.
    pub fn subclass(&self, name: Option<&str>) -> Class {
        let runtime = Rc::clone(&self.0.runtime);
        let name: Rc<str> = match name {
            Some(name) => Rc::from(name),
            None => Rc::from(runtime.config.runtime.unnamed_class_name.as_str()),
        };
        let virtuals = self.0.virtuals.borrow().clone();
        let events = self.0.events.borrow().clone();

        let class = Class(Rc::new_cyclic(|weak| {
            let mut methods = HashMap::new();
            methods.insert("init".to_string(), Value::Method(default_init()));
            methods.insert("class".to_string(), Value::Method(class_accessor(weak)));
            ClassData {
                name,
                superclass: Some(self.clone()),
                depth: self.0.depth + 1,
                methods: RefCell::new(methods),
                virtuals: RefCell::new(virtuals),
                events: RefCell::new(events),
                runtime,
            }
        }));

        debug!(
            class = %class.name(),
            superclass = %self.name(),
            depth = class.depth(),
            "class created"
        );
        class
    }

    // ==================== Descriptor queries ====================

    /// Display name
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Parent class, `None` for the root
    pub fn super_class(&self) -> Option<Class> {
        self.0.superclass.clone()
    }

    pub fn is_root(&self) -> bool {
        self.0.superclass.is_none()
    }

    /// Distance from the root (the root is 0)
    pub fn depth(&self) -> usize {
        self.0.depth
    }

    /// This class followed by every ancestor up to the root
    pub fn lineage(&self) -> impl Iterator<Item = Class> {
        std::iter::successors(Some(self.clone()), |class| class.super_class())
    }

    /// `true` iff `other` is a strict ancestor of this class
    pub fn inherits(&self, other: &Class) -> bool {
        self.lineage().skip(1).any(|ancestor| ancestor == *other)
    }

    /// Entry of this class's own method table (no inheritance)
    pub fn method(&self, name: &str) -> Option<Value> {
        self.0.methods.borrow().get(name).cloned()
    }

    /// Names in this class's own method table, sorted
    pub fn method_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.methods.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Event override of this class
    pub fn event(&self, event: Event) -> Option<Method> {
        self.0.events.borrow().get(&event).cloned()
    }

    pub(crate) fn runtime(&self) -> &Rc<RuntimeShared> {
        &self.0.runtime
    }

    // ==================== Definition ====================

    /// Assign a method-table entry
    ///
    /// Storing `Value::Nil` removes the entry. When `name` is virtual, its
    /// resolution follows the new entry so instances created later see it.
    pub fn define(&self, name: &str, value: impl Into<Value>) -> RuntimeResult<()> {
        self.ensure_unprotected(|| format!("define '{name}'"))?;
        let value = value.into();
        {
            let mut methods = self.0.methods.borrow_mut();
            if value.is_nil() {
                methods.remove(name);
            } else {
                methods.insert(name.to_string(), value);
            }
        }
        trace!(class = %self.name(), name, "method table entry assigned");

        if self.is_virtual(name) {
            self.refresh_virtual(name);
        }
        Ok(())
    }

    /// Assign a native method
    pub fn define_method<F>(&self, name: &str, func: F) -> RuntimeResult<()>
    where
        F: Fn(&Instance, &[Value]) -> RuntimeResult<Value> + 'static,
    {
        self.define(name, Method::new(name, func))
    }

    /// Override an event for this class (and subclasses created afterwards)
    pub fn define_event<F>(&self, event: Event, func: F) -> RuntimeResult<()>
    where
        F: Fn(&Instance, &[Value]) -> RuntimeResult<Value> + 'static,
    {
        self.ensure_unprotected(|| format!("override {event}"))?;
        self.0
            .events
            .borrow_mut()
            .insert(event, Method::new(event.method_name(), func));
        trace!(class = %self.name(), event = event.method_name(), "event override assigned");
        Ok(())
    }

    fn ensure_unprotected(&self, operation: impl FnOnce() -> String) -> RuntimeResult<()> {
        if self.is_root() {
            return Err(RuntimeError::ProtectedClass {
                operation: operation(),
            });
        }
        Ok(())
    }
}

/// Default constructor of a subclass: `self.super:init()`
fn default_init() -> Method {
    Method::new("init", |this, _| {
        if let Some(up) = this.super_level() {
            up.call("init", &[])?;
        }
        Ok(Value::Nil)
    })
}

/// `class()` accessor; holds the descriptor weakly so it does not keep itself alive
fn class_accessor(weak: &Weak<ClassData>) -> Method {
    let weak = weak.clone();
    Method::new("class", move |_, _| {
        Ok(weak
            .upgrade()
            .map(|data| Value::Class(Class(data)))
            .unwrap_or_default())
    })
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Class {}

impl Hash for Class {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({})", self.name())
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ==================== Tests ====================
