//! Callables
//!
//! A `Method` is a native closure taking the receiver level and the arguments.
//! A `Forward` is the thunk the read hook hands out for inherited methods: it owns
//! its (receiver, implementation) pair, so nested forwarded calls never share state.

use std::fmt;
use std::rc::Rc;

use super::error::RuntimeResult;
use super::instance::Instance;
use super::value::Value;

/// Signature of every method body
pub type MethodFn = dyn Fn(&Instance, &[Value]) -> RuntimeResult<Value>;

/// Named native callable
#[derive(Clone)]
pub struct Method {
    name: Rc<str>,
    func: Rc<MethodFn>,
}

impl Method {
    pub fn new<F>(name: &str, func: F) -> Self
    where
        F: Fn(&Instance, &[Value]) -> RuntimeResult<Value> + 'static,
    {
        Self {
            name: Rc::from(name),
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the body against `receiver`
    ///
    /// Counts toward the runtime's call-depth limit for the duration of the call.
    pub fn call(&self, receiver: &Instance, args: &[Value]) -> RuntimeResult<Value> {
        let guard = receiver.runtime().enter_call()?;
        let result = (self.func)(receiver, args);
        drop(guard);
        result
    }

    /// Same underlying body
    pub fn ptr_eq(&self, other: &Method) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method({})", self.name)
    }
}

/// Inherited method bound to the ancestor level that owns it
#[derive(Clone)]
pub struct Forward {
    method: Method,
    receiver: Instance,
}

impl Forward {
    pub fn new(method: Method, receiver: Instance) -> Self {
        Self { method, receiver }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The level the body always runs against
    pub fn receiver(&self) -> &Instance {
        &self.receiver
    }

    pub fn call(&self, args: &[Value]) -> RuntimeResult<Value> {
        self.method.call(&self.receiver, args)
    }
}

impl PartialEq for Forward {
    fn eq(&self, other: &Self) -> bool {
        self.method.ptr_eq(&other.method) && self.receiver == other.receiver
    }
}

impl fmt::Debug for Forward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forward")
            .field("method", &self.method.name)
            .field("receiver", &self.receiver)
            .finish()
    }
}
