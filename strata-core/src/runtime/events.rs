//! Event overrides
//!
//! Events are operator-style hooks (stringification, arithmetic, comparison, call).
//! They are looked up only in the event table of a level's own class, never through
//! the attribute chain, which is why `Class::subclass` copies the parent's table.

use std::fmt;

use super::error::{RuntimeError, RuntimeResult};
use super::instance::Instance;
use super::method::Method;
use super::value::Value;

/// Overridable events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Event {
    // ===== Arithmetic =====
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`
    Div,
    /// `a % b`
    Mod,
    /// `-a`
    Neg,

    // ===== Comparison =====
    /// `a == b`
    Eq,
    /// `a < b`
    Lt,
    /// `a <= b`
    Le,

    // ===== Other =====
    /// `a .. b`
    Concat,
    /// `#a`
    Len,
    /// `a(args)`
    Call,
    /// String conversion
    ToString,
}

impl Event {
    pub const ALL: [Event; 13] = [
        Event::Add,
        Event::Sub,
        Event::Mul,
        Event::Div,
        Event::Mod,
        Event::Neg,
        Event::Eq,
        Event::Lt,
        Event::Le,
        Event::Concat,
        Event::Len,
        Event::Call,
        Event::ToString,
    ];

    /// Method name of the event hook
    pub fn method_name(&self) -> &'static str {
        match self {
            Event::Add => "add",
            Event::Sub => "sub",
            Event::Mul => "mul",
            Event::Div => "div",
            Event::Mod => "mod",
            Event::Neg => "neg",
            Event::Eq => "eq",
            Event::Lt => "lt",
            Event::Le => "le",
            Event::Concat => "concat",
            Event::Len => "len",
            Event::Call => "call",
            Event::ToString => "tostring",
        }
    }

    /// Parse an event from its method name
    pub fn from_method_name(name: &str) -> Option<Self> {
        Event::ALL.into_iter().find(|e| e.method_name() == name)
    }

    /// Operator symbol, for error messages
    pub fn symbol(&self) -> &'static str {
        match self {
            Event::Add => "+",
            Event::Sub | Event::Neg => "-",
            Event::Mul => "*",
            Event::Div => "/",
            Event::Mod => "%",
            Event::Eq => "==",
            Event::Lt => "<",
            Event::Le => "<=",
            Event::Concat => "..",
            Event::Len => "#",
            Event::Call => "()",
            Event::ToString => "tostring",
        }
    }

    /// Takes no operand besides the receiver
    pub fn is_unary(&self) -> bool {
        matches!(self, Event::Neg | Event::Len | Event::ToString)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operator {}", self.method_name())
    }
}

/// Root `ToString`: `"a " + <most-derived class name>`
pub(crate) fn default_to_string() -> Method {
    Method::new(Event::ToString.method_name(), |this, _| {
        let class = this.most_derived().class();
        Ok(Value::from(format!("a {}", class.name())))
    })
}

// ==================== Instance event surface ====================

impl Instance {
    /// Apply an event override of this level's class
    pub fn invoke_event(&self, event: Event, args: &[Value]) -> RuntimeResult<Value> {
        let class = self.class();
        match class.event(event) {
            Some(method) => method.call(self, args),
            None => Err(RuntimeError::MissingEvent {
                class: class.name().to_string(),
                event: event.method_name(),
            }),
        }
    }

    /// String form through the `ToString` event
    pub fn stringify(&self) -> RuntimeResult<String> {
        match self.invoke_event(Event::ToString, &[])? {
            Value::Str(s) => Ok(s.to_string()),
            other => Ok(other.to_string()),
        }
    }

    /// Equality through the `Eq` event, identity when the class has no override
    pub fn equals(&self, other: &Value) -> RuntimeResult<bool> {
        if self.class().event(Event::Eq).is_some() {
            let result = self.invoke_event(Event::Eq, std::slice::from_ref(other))?;
            return Ok(result.is_truthy());
        }
        Ok(matches!(other, Value::Instance(o) if o == self))
    }
}
