//! Test helpers
//!
//! Fixture hierarchies shared by the integration tests

#![allow(dead_code)]

use strata_core::{Class, Instance, Runtime, Value};

/// `A.init` sets `x = 42`; `A.test` returns `self.whoami()`; `whoami` is virtual and undefined
pub struct Fixture {
    pub rt: Runtime,
    pub a: Class,
}

pub fn abstract_base() -> Fixture {
    let rt = Runtime::new();
    let a = rt.class(Some("A"), None);
    a.define_method("init", |this, _| {
        this.set("x", 42);
        Ok(Value::Nil)
    })
    .unwrap();
    a.declare_virtual("whoami").unwrap();
    a.define_method("test", |this, _| this.call("whoami", &[]))
        .unwrap();
    a.define_method("read_x", |this, _| Ok(this.get("x").unwrap_or_default()))
        .unwrap();
    Fixture { rt, a }
}

/// Subclass of `base` whose constructor writes `x` before calling the super constructor
pub fn private_x_subclass(base: &Class) -> Class {
    let b = base.subclass(Some("B"));
    b.define_method("init", |this, args| {
        this.set("x", args.first().cloned().unwrap_or_default());
        super_init(this)?;
        Ok(Value::Nil)
    })
    .unwrap();
    b
}

/// Subclass of `base` whose constructor calls the super constructor before writing `x`
pub fn shared_x_subclass(base: &Class) -> Class {
    let b = base.subclass(Some("B"));
    b.define_method("init", |this, args| {
        super_init(this)?;
        this.set("x", args.first().cloned().unwrap_or_default());
        Ok(Value::Nil)
    })
    .unwrap();
    b
}

/// `self.super:init()`
pub fn super_init(this: &Instance) -> strata_core::RuntimeResult<Value> {
    match this.super_level() {
        Some(up) => up.call("init", &[]),
        None => Ok(Value::Nil),
    }
}

/// Integer field or panic
pub fn int_field(instance: &Instance, key: &str) -> i64 {
    instance
        .get(key)
        .and_then(|v| v.as_int())
        .unwrap_or_else(|| panic!("field '{key}' is not an int"))
}
