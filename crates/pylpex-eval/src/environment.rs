//! Lexical environment chain. Parents are shared by many children
//! (function closures, nested blocks); children are never reachable from
//! their parent, so the graph stays a tree even though nodes are
//! reference-counted.

use crate::value::Value;
use pylpex_errors::RuntimeError;
use pylpex_span::Position;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

struct Frame {
    bindings: HashMap<String, Value>,
    parent: Option<Environment>,
}

/// A single scope, cheaply cloneable (clones share the same underlying
/// frame, matching the reference semantics closures rely on).
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    pub fn new_root() -> Self {
        Environment(Rc::new(RefCell::new(Frame { bindings: HashMap::new(), parent: None })))
    }

    /// Creates a new child scope of `self`.
    pub fn child(&self) -> Self {
        Environment(Rc::new(RefCell::new(Frame { bindings: HashMap::new(), parent: Some(self.clone()) })))
    }

    /// Always binds in the local frame, shadowing any outer binding.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Walks up the chain to find an existing binding and overwrites it.
    pub fn assign(&self, name: &str, value: Value, position: Position) -> Result<(), RuntimeError> {
        if self.0.borrow().bindings.contains_key(name) {
            self.0.borrow_mut().bindings.insert(name.to_string(), value);
            return Ok(());
        }
        let parent = self.0.borrow().parent.clone();
        match parent {
            Some(p) => p.assign(name, value, position),
            None => Err(RuntimeError::new(format!("undefined variable '{name}'"), position)),
        }
    }

    /// Walks up the chain looking for `name`.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(v) = self.0.borrow().bindings.get(name) {
            return Some(v.clone());
        }
        let parent = self.0.borrow().parent.clone();
        parent.and_then(|p| p.lookup(name))
    }
}
