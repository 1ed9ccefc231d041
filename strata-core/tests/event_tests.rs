//! Event override tests
//!
//! Default stringification, operator hooks and their per-class inheritance

use strata_core::{Class, Event, Runtime, RuntimeError, Value};

fn vector_class(rt: &Runtime) -> Class {
    let vector = rt.class(Some("Vector"), None);
    vector
        .define_method("init", |this, args| {
            this.set("x", args.first().cloned().unwrap_or(Value::Int(0)));
            this.set("y", args.get(1).cloned().unwrap_or(Value::Int(0)));
            Ok(Value::Nil)
        })
        .unwrap();
    vector
        .define_event(Event::Add, |this, args| {
            let other = args
                .first()
                .and_then(|v| v.as_instance())
                .ok_or_else(|| RuntimeError::raise("vector + expects a vector"))?;
            let sum = |key: &str| {
                this.get(key).and_then(|v| v.as_int()).unwrap_or(0)
                    + other.get(key).and_then(|v| v.as_int()).unwrap_or(0)
            };
            let class = this.class();
            let result = class.new(&[Value::Int(sum("x")), Value::Int(sum("y"))])?;
            Ok(Value::from(result))
        })
        .unwrap();
    vector
        .define_event(Event::Eq, |this, args| {
            let Some(other) = args.first().and_then(|v| v.as_instance()) else {
                return Ok(Value::Bool(false));
            };
            Ok(Value::Bool(
                this.get("x") == other.get("x") && this.get("y") == other.get("y"),
            ))
        })
        .unwrap();
    vector
}

#[test]
fn test_default_stringification() {
    let rt = Runtime::new();
    let a = rt.class(Some("Animal"), None);
    let i = a.new(&[]).unwrap();
    assert_eq!(i.stringify().unwrap(), "a Animal");
    assert_eq!(i.to_string(), "a Animal");
    assert_eq!(Value::from(i).to_string(), "a Animal");
}

#[test]
fn test_default_stringification_uses_most_derived_name() {
    let rt = Runtime::new();
    let a = rt.class(Some("Animal"), None);
    let dog = a.subclass(Some("Dog"));
    let i = dog.new(&[]).unwrap();
    assert_eq!(i.super_level().unwrap().stringify().unwrap(), "a Dog");
}

#[test]
fn test_stringification_override() {
    let rt = Runtime::new();
    let point = rt.class(Some("Point"), None);
    point
        .define_event(Event::ToString, |this, _| {
            Ok(Value::from(format!(
                "({}, {})",
                this.get("x").unwrap_or_default(),
                this.get("y").unwrap_or_default()
            )))
        })
        .unwrap();
    let p = point.new(&[]).unwrap();
    p.set("x", 1);
    p.set("y", 2);
    assert_eq!(p.to_string(), "(1, 2)");

    // subclasses created afterwards copy the override
    let labelled = point.subclass(Some("Labelled"));
    let l = labelled.new(&[]).unwrap();
    l.set("x", 0);
    assert_eq!(l.to_string(), "(0, nil)");
}

#[test]
fn test_operator_event() {
    let rt = Runtime::new();
    let vector = vector_class(&rt);
    let a = vector.new(&[Value::Int(1), Value::Int(2)]).unwrap();
    let b = vector.new(&[Value::Int(10), Value::Int(20)]).unwrap();

    let sum = a.invoke_event(Event::Add, &[Value::from(b)]).unwrap();
    let sum = sum.as_instance().unwrap();
    assert_eq!(sum.get("x"), Some(Value::Int(11)));
    assert_eq!(sum.get("y"), Some(Value::Int(22)));
    assert_eq!(sum.class(), vector);
}

#[test]
fn test_operator_event_error_propagates() {
    let rt = Runtime::new();
    let vector = vector_class(&rt);
    let a = vector.new(&[]).unwrap();
    assert_eq!(
        a.invoke_event(Event::Add, &[Value::Int(1)]).unwrap_err(),
        RuntimeError::raise("vector + expects a vector")
    );
}

#[test]
fn test_missing_event() {
    let rt = Runtime::new();
    let plain = rt.class(Some("Plain"), None);
    let i = plain.new(&[]).unwrap();
    assert_eq!(
        i.invoke_event(Event::Len, &[]).unwrap_err(),
        RuntimeError::MissingEvent {
            class: "Plain".to_string(),
            event: "len"
        }
    );
}

#[test]
fn test_equality_event_and_identity() {
    let rt = Runtime::new();
    let vector = vector_class(&rt);
    let a = vector.new(&[Value::Int(1), Value::Int(1)]).unwrap();
    let b = vector.new(&[Value::Int(1), Value::Int(1)]).unwrap();
    assert!(a.equals(&Value::from(b)).unwrap());

    let plain = rt.class(Some("Plain"), None);
    let p = plain.new(&[]).unwrap();
    let q = plain.new(&[]).unwrap();
    assert!(p.equals(&Value::from(p.clone())).unwrap());
    assert!(!p.equals(&Value::from(q)).unwrap());
}

#[test]
fn test_events_not_found_through_chain() {
    let rt = Runtime::new();
    let base = rt.class(Some("Base"), None);
    let derived = base.subclass(Some("Derived"));
    // defined on the parent after the subclass exists
    base.define_event(Event::Len, |_, _| Ok(Value::Int(3))).unwrap();

    let d = derived.new(&[]).unwrap();
    assert!(d.invoke_event(Event::Len, &[]).is_err());
    // the parent's own level does answer
    let up = d.super_level().unwrap();
    assert_eq!(up.invoke_event(Event::Len, &[]).unwrap(), Value::Int(3));
}
