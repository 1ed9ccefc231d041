//! Strata Core - single-inheritance object model (pure logic, no IO)
//!
//! Classes, instances built as chains of per-ancestor levels, the attribute
//! read/write protocol those levels share, virtual dispatch pinned at
//! construction time, and casting along a chain.
//!
//! Configuration is passed explicitly to `Runtime::with_config`, not via global state.
//!
//! ```
//! use strata_core::{Runtime, Value};
//!
//! let rt = Runtime::new();
//! let animal = rt.class(Some("Animal"), None);
//! animal.declare_virtual("sound").unwrap();
//! animal
//!     .define_method("speak", |this, _| {
//!         let sound = this.call("sound", &[])?;
//!         Ok(Value::from(format!("says {sound}")))
//!     })
//!     .unwrap();
//!
//! let dog = animal.subclass(Some("Dog"));
//! dog.define_method("sound", |_, _| Ok(Value::from("woof"))).unwrap();
//!
//! let rex = dog.new(&[]).unwrap();
//! assert_eq!(rex.call("speak", &[]).unwrap(), Value::from("says woof"));
//! assert!(animal.made(&Value::from(rex.clone())));
//! assert_eq!(rex.to_string(), "a Dog");
//! ```

pub mod runtime;

// Re-export common types
pub use runtime::{
    Class, Event, Forward, Instance, Method, Runtime, RuntimeError, RuntimeResult, Value,
};

// Re-export config types from strata-config
pub use strata_config::{Component, LimitConfig, RuntimeConfig, StrataConfig};
