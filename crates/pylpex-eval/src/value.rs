//! Runtime value model.

use crate::environment::Environment;
use indexmap::IndexMap;
use pylpex_ast::expressions::{FunctionDef, Parameter};
use pylpex_ast::statements::Statement;
use pylpex_ast::types::TypeInfo;
use pylpex_errors::RuntimeError;
use pylpex_span::Position;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub type BuiltinImpl = Rc<dyn Fn(&[Value], Position) -> Result<Value, RuntimeError>>;

/// A host-provided function. `signature` is purely advertised metadata
/// consulted by `get_type`; it is never enforced at call time.
pub struct BuiltinFunction {
    pub name: String,
    pub func: BuiltinImpl,
    pub signature: TypeInfo,
}

/// A user-defined function, closing over the environment active where its
/// `function` statement was evaluated.
pub struct UserFunction {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Statement>,
    pub closure: Environment,
}

impl UserFunction {
    pub fn from_def(def: &FunctionDef, closure: Environment) -> Self {
        Self { name: def.name.clone(), parameters: def.parameters.clone(), body: def.body.clone(), closure }
    }
}

#[derive(Clone)]
pub enum Value {
    None,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(Rc<String>),
    List(Rc<RefCell<Vec<Value>>>),
    Dict(Rc<RefCell<IndexMap<String, Value>>>),
    BuiltinFn(Rc<BuiltinFunction>),
    UserFn(Rc<UserFunction>),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Rc::new(s.into()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn dict(entries: IndexMap<String, Value>) -> Self {
        Value::Dict(Rc::new(RefCell::new(entries)))
    }

    /// Falsy values: `none`, `false`, zero, and empty collections/strings.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Boolean(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(l) => !l.borrow().is_empty(),
            Value::Dict(d) => !d.borrow().is_empty(),
            Value::BuiltinFn(_) | Value::UserFn(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "null",
            Value::Integer(_) => "int",
            Value::Float(_) => "float",
            Value::Boolean(_) => "bool",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::BuiltinFn(_) | Value::UserFn(_) => "callable",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::String(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, v) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Value::Dict(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{k}\": {v}")?;
                }
                write!(f, "}}")
            }
            Value::BuiltinFn(b) => write!(f, "<builtin {}>", b.name),
            Value::UserFn(u) => write!(f, "<function {}>", u.name),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => *a as f64 == *b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => *a.borrow() == *b.borrow(),
            (Value::Dict(a), Value::Dict(b)) => *a.borrow() == *b.borrow(),
            _ => false,
        }
    }
}
