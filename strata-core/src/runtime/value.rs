//! Dynamic values
//!
//! Fields, method-table entries and call arguments all carry a `Value`.
//! Primitives compare structurally; classes, instances and methods compare by identity.

use std::fmt;
use std::rc::Rc;

use super::class::Class;
use super::error::{RuntimeError, RuntimeResult};
use super::instance::Instance;
use super::method::{Forward, Method};

/// Dynamically typed value
#[derive(Clone, Default)]
pub enum Value {
    /// Absence of a value; storing it into a field unsets the field
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    /// Class descriptors are first-class values
    Class(Class),
    /// A level of some instance chain
    Instance(Instance),
    /// Plain callable, invoked against whatever receiver it is called on
    Method(Method),
    /// Forwarding call produced by the read hook, bound to an ancestor level
    Forward(Forward),
}

impl Value {
    // ==================== Type checks ====================

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Everything except `Nil` and `false` counts as true
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Method or forwarding call
    #[inline]
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Method(_) | Value::Forward(_))
    }

    #[inline]
    pub fn is_forward(&self) -> bool {
        matches!(self, Value::Forward(_))
    }

    /// Short type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
            Value::Method(_) | Value::Forward(_) => "method",
        }
    }

    // ==================== Accessors ====================

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Floats, with integers widened
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&Class> {
        match self {
            Value::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Value::Method(method) => Some(method),
            _ => None,
        }
    }

    // ==================== Invocation ====================

    /// Call this value as a method
    ///
    /// A plain method runs against `receiver`; a forwarding call ignores it and
    /// runs against the level it was bound to.
    pub fn invoke(&self, receiver: &Instance, args: &[Value]) -> RuntimeResult<Value> {
        match self {
            Value::Method(method) => method.call(receiver, args),
            Value::Forward(forward) => forward.call(args),
            other => Err(RuntimeError::NotCallable {
                name: other.to_string(),
                kind: other.type_name(),
            }),
        }
    }
}

// ==================== Conversions ====================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<Class> for Value {
    fn from(class: Class) -> Self {
        Value::Class(class)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Instance(instance)
    }
}

impl From<Method> for Value {
    fn from(method: Method) -> Self {
        Value::Method(method)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Nil)
    }
}

// ==================== Equality / formatting ====================

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                (*a as f64) == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Class(a), Value::Class(b)) => a == b,
            (Value::Instance(a), Value::Instance(b)) => a == b,
            (Value::Method(a), Value::Method(b)) => a.ptr_eq(b),
            (Value::Forward(a), Value::Forward(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Class(class) => write!(f, "class {}", class.name()),
            Value::Instance(instance) => write!(f, "{instance}"),
            Value::Method(method) => write!(f, "<method {}>", method.name()),
            Value::Forward(forward) => write!(
                f,
                "<method {} of {}>",
                forward.method().name(),
                forward.receiver().class().name()
            ),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Class(class) => write!(f, "{class:?}"),
            Value::Instance(instance) => write!(f, "{instance:?}"),
            Value::Method(method) => write!(f, "{method:?}"),
            Value::Forward(forward) => write!(f, "{forward:?}"),
        }
    }
}
