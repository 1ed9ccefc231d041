//! Strata runtime
//!
//! The object model proper:
//! - `Class` descriptors and the virtual dispatch builder (`class`)
//! - instance chains, the attribute protocol and casting (`instance`)
//! - dynamic values, methods and event overrides
//!
//! A `Runtime` owns the single root class every hierarchy grows from, plus the
//! configuration and call-depth accounting shared by all of its classes.

use std::cell::Cell;
use std::rc::Rc;

use strata_config::StrataConfig;
use tracing::debug;

// ==================== Modules ====================

/// Class descriptors and virtual dispatch
pub mod class;

/// Error kinds
pub mod error;

/// Event (operator) overrides
pub mod events;

/// Instance chains, attribute protocol, casting
pub mod instance;

/// Callables and forwarding thunks
pub mod method;

/// Dynamic values
pub mod value;

pub use class::Class;
pub use error::{RuntimeError, RuntimeResult};
pub use events::Event;
pub use instance::Instance;
pub use method::{Forward, Method};
pub use value::Value;

// ==================== Runtime ====================

/// State shared by every class (and therefore every instance) of one runtime
pub(crate) struct RuntimeShared {
    pub(crate) config: StrataConfig,
    call_depth: Cell<usize>,
}

impl RuntimeShared {
    fn new(config: StrataConfig) -> Rc<Self> {
        Rc::new(Self {
            config,
            call_depth: Cell::new(0),
        })
    }

    /// Account for one more nested method invocation
    ///
    /// The returned guard releases the slot when dropped, including on error paths.
    pub(crate) fn enter_call(self: &Rc<Self>) -> RuntimeResult<CallGuard> {
        let depth = self.call_depth.get();
        let limit = self.config.limits.max_call_depth;
        if depth >= limit {
            return Err(RuntimeError::CallDepthExceeded { limit });
        }
        self.call_depth.set(depth + 1);
        Ok(CallGuard {
            shared: Rc::clone(self),
        })
    }

    pub(crate) fn call_depth(&self) -> usize {
        self.call_depth.get()
    }
}

/// Releases a call-depth slot on drop
pub(crate) struct CallGuard {
    shared: Rc<RuntimeShared>,
}

impl Drop for CallGuard {
    fn drop(&mut self) {
        let depth = self.shared.call_depth.get();
        self.shared.call_depth.set(depth.saturating_sub(1));
    }
}

/// One object-model universe: a root class and everything derived from it
///
/// Classes and instances are `Rc`-based and stay on the thread that created them.
pub struct Runtime {
    shared: Rc<RuntimeShared>,
    root: Class,
}

impl Runtime {
    /// Create a runtime with the default configuration
    pub fn new() -> Self {
        Self::with_config(StrataConfig::default())
    }

    /// Create a runtime with an explicit configuration
    pub fn with_config(config: StrataConfig) -> Self {
        let shared = RuntimeShared::new(config);
        let root = Class::new_root(Rc::clone(&shared));
        debug!(root = %root.name(), "runtime created");
        Self { shared, root }
    }

    /// The root class; it cannot be modified, only subclassed
    pub fn root(&self) -> Class {
        self.root.clone()
    }

    /// Create a class, defaulting the base to the root class
    pub fn class(&self, name: Option<&str>, base: Option<&Class>) -> Class {
        base.unwrap_or(&self.root).subclass(name)
    }

    /// Configuration this runtime was created with
    pub fn config(&self) -> &StrataConfig {
        &self.shared.config
    }

    /// Current nesting of method invocations (0 outside of any call)
    pub fn call_depth(&self) -> usize {
        self.shared.call_depth()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("root", &self.root.name())
            .field("config", &self.shared.config)
            .finish()
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_uses_configured_name() {
        let mut config = StrataConfig::default();
        config.runtime.root_name = "Base".to_string();
        let rt = Runtime::with_config(config);
        assert_eq!(rt.root().name(), "Base");
        assert!(rt.root().is_root());
    }

    #[test]
    fn test_class_defaults_base_to_root() {
        let rt = Runtime::new();
        let shape = rt.class(Some("Shape"), None);
        assert_eq!(shape.super_class(), Some(rt.root()));

        let circle = rt.class(Some("Circle"), Some(&shape));
        assert_eq!(circle.super_class(), Some(shape));
    }

    #[test]
    fn test_call_guard_releases_depth() {
        let rt = Runtime::new();
        {
            let outer = rt.shared.enter_call().unwrap();
            let inner = rt.shared.enter_call().unwrap();
            assert_eq!(rt.call_depth(), 2);
            drop(inner);
            assert_eq!(rt.call_depth(), 1);
            drop(outer);
        }
        assert_eq!(rt.call_depth(), 0);
    }

    #[test]
    fn test_call_depth_limit() {
        let mut config = StrataConfig::default();
        config.limits.max_call_depth = 1;
        let rt = Runtime::with_config(config);

        let guard = rt.shared.enter_call().unwrap();
        assert!(matches!(
            rt.shared.enter_call(),
            Err(RuntimeError::CallDepthExceeded { limit: 1 })
        ));
        drop(guard);
        assert!(rt.shared.enter_call().is_ok());
    }
}
