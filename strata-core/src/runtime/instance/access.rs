//! Attribute resolution protocol
//!
//! Read order at a level:
//! 1. the level's own record
//! 2. the owner class's method table
//! 3. a full read at the super level, where a plain method found there is wrapped
//!    into a forwarding call bound to that super level
//!
//! Write order at a level:
//! 1. the level's own record, if it already holds the key
//! 2. the super level, if a read there finds the key (shared attribute)
//! 3. otherwise a new field on this level (private attribute)
//!
//! Whether an attribute ends up shared or private depends only on which level
//! writes the name first relative to when the superclass constructor runs.

use tracing::trace;

use super::Instance;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::method::Forward;
use crate::runtime::value::Value;

impl Instance {
    /// Read `key`; `None` means missing
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.own_field(key) {
            return Some(value);
        }

        let owner = self.class();
        if let Some(value) = owner.method(key) {
            return Some(value);
        }

        let up = self.super_level()?;
        let found = up.get(key)?;

        #[cfg(feature = "trace_access")]
        trace!(
            class = %owner.name(),
            key,
            from = %up.class().name(),
            "attribute inherited"
        );

        Some(match found {
            // already bound to the level that owns it; never re-bound lower down
            Value::Forward(forward) => Value::Forward(forward),
            Value::Method(method) => Value::Forward(Forward::new(method, up)),
            data => data,
        })
    }

    /// `get(key)` is not missing
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Write `key`; `Value::Nil` unsets the field at the resolved target level
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        let target = self.write_target(key);
        trace!(
            class = %self.class().name(),
            key,
            target = %target.class().name(),
            shared = target.level_index() != self.level_index(),
            "attribute write"
        );
        target.store(key, value);
    }

    /// Level a write of `key` issued at this level lands on
    pub fn write_target(&self, key: &str) -> Instance {
        let mut current = self.clone();
        loop {
            if current.has_own_field(key) {
                return current;
            }
            match current.super_level() {
                Some(up) if up.has(key) => current = up,
                _ => return current,
            }
        }
    }

    /// Resolve `name` and call it with this level as receiver
    ///
    /// Forwarding calls run against the level they are bound to instead.
    pub fn call(&self, name: &str, args: &[Value]) -> RuntimeResult<Value> {
        match self.get(name) {
            Some(value) if value.is_callable() => value.invoke(self, args),
            Some(value) => Err(RuntimeError::NotCallable {
                name: name.to_string(),
                kind: value.type_name(),
            }),
            None => Err(RuntimeError::UndefinedMethod {
                class: self.class().name().to_string(),
                name: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{Class, Runtime, RuntimeError, Value};

    fn counter_hierarchy(rt: &Runtime) -> (Class, Class) {
        let base = rt.class(Some("Base"), None);
        base.define_method("init", |this, _| {
            this.set("count", 0);
            Ok(Value::Nil)
        })
        .unwrap();
        base.define_method("bump", |this, _| {
            let next = this.get("count").and_then(|v| v.as_int()).unwrap_or(0) + 1;
            this.set("count", next);
            Ok(Value::Int(next))
        })
        .unwrap();
        let derived = base.subclass(Some("Derived"));
        (base, derived)
    }

    #[test]
    fn test_missing_key() {
        let rt = Runtime::new();
        let a = rt.class(Some("A"), None);
        let i = a.new(&[]).unwrap();
        assert_eq!(i.get("nothing"), None);
        assert!(!i.has("nothing"));
    }

    #[test]
    fn test_class_table_read() {
        let rt = Runtime::new();
        let a = rt.class(Some("A"), None);
        a.define("limit", 3).unwrap();
        let i = a.new(&[]).unwrap();
        assert_eq!(i.get("limit"), Some(Value::Int(3)));
    }

    #[test]
    fn test_inherited_method_is_forwarded() {
        let rt = Runtime::new();
        let (_, derived) = counter_hierarchy(&rt);
        let d = derived.new(&[]).unwrap();

        let bump = d.get("bump").unwrap();
        assert!(bump.is_forward());
        if let Value::Forward(forward) = &bump {
            assert_eq!(forward.receiver(), &d.super_level().unwrap());
        }
    }

    #[test]
    fn test_forward_not_rebound_through_deeper_chain() {
        let rt = Runtime::new();
        let (base, derived) = counter_hierarchy(&rt);
        let leaf = derived.subclass(Some("Leaf"));
        let l = leaf.new(&[]).unwrap();

        if let Some(Value::Forward(forward)) = l.get("bump") {
            assert_eq!(forward.receiver().class(), base);
        } else {
            panic!("expected forwarded method");
        }
    }

    #[test]
    fn test_inherited_call_runs_against_owner_level() {
        let rt = Runtime::new();
        let (_, derived) = counter_hierarchy(&rt);
        let d = derived.new(&[]).unwrap();

        assert_eq!(d.call("bump", &[]).unwrap(), Value::Int(1));
        assert_eq!(d.call("bump", &[]).unwrap(), Value::Int(2));
        let up = d.super_level().unwrap();
        assert_eq!(up.own_field("count"), Some(Value::Int(2)));
        assert!(!d.has_own_field("count"));
    }

    #[test]
    fn test_write_routes_to_owning_ancestor() {
        let rt = Runtime::new();
        let (_, derived) = counter_hierarchy(&rt);
        let d = derived.new(&[]).unwrap();

        assert_eq!(d.write_target("count"), d.super_level().unwrap());
        assert_eq!(d.write_target("fresh"), d);
        d.set("count", 10);
        assert_eq!(d.super_level().unwrap().get("count"), Some(Value::Int(10)));
    }

    #[test]
    fn test_nil_write_unsets() {
        let rt = Runtime::new();
        let a = rt.class(Some("A"), None);
        let i = a.new(&[]).unwrap();
        i.set("tmp", "x");
        assert!(i.has("tmp"));
        i.set("tmp", Value::Nil);
        assert!(!i.has("tmp"));
    }

    #[test]
    fn test_call_errors() {
        let rt = Runtime::new();
        let a = rt.class(Some("A"), None);
        let i = a.new(&[]).unwrap();
        i.set("data", 1);

        assert_eq!(
            i.call("data", &[]).unwrap_err(),
            RuntimeError::NotCallable {
                name: "data".to_string(),
                kind: "int"
            }
        );
        assert_eq!(
            i.call("ghost", &[]).unwrap_err(),
            RuntimeError::UndefinedMethod {
                class: "A".to_string(),
                name: "ghost".to_string()
            }
        );
    }

    #[test]
    fn test_own_method_shadows_inherited() {
        let rt = Runtime::new();
        let base = rt.class(Some("Base"), None);
        base.define_method("who", |_, _| Ok(Value::from("base"))).unwrap();
        let derived = base.subclass(Some("Derived"));
        derived.define_method("who", |_, _| Ok(Value::from("derived"))).unwrap();

        let d = derived.new(&[]).unwrap();
        assert_eq!(d.call("who", &[]).unwrap(), Value::from("derived"));
        let up = d.super_level().unwrap();
        assert_eq!(up.call("who", &[]).unwrap(), Value::from("base"));
    }
}
