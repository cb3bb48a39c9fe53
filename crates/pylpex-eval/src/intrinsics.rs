//! Host-provided callables: the global `print`/`sqrt`/`get_type` functions
//! and the small set of bound container methods (`length`, `push`,
//! `keys`, `upper`, `lower`) reached through `object.attribute(...)`.

use crate::environment::Environment;
use crate::types;
use crate::value::{BuiltinFunction, Value};
use pylpex_ast::types::{BaseType, TypeInfo};
use pylpex_errors::RuntimeError;
use pylpex_span::Position;
use std::rc::Rc;

fn builtin(name: &str, signature: TypeInfo, func: impl Fn(&[Value], Position) -> Result<Value, RuntimeError> + 'static) -> Value {
    Value::BuiltinFn(Rc::new(BuiltinFunction { name: name.to_string(), func: Rc::new(func), signature }))
}

/// Populates the global environment with the language's intrinsic
/// functions.
pub fn install(env: &Environment) {
    env.define(
        "print",
        builtin(
            "print",
            TypeInfo::callable(vec![TypeInfo::scalar(BaseType::Any)], TypeInfo::scalar(BaseType::None)),
            |args, _position| {
                let rendered: Vec<String> = args.iter().map(|v| v.to_string()).collect();
                println!("{}", rendered.join(" "));
                Ok(Value::None)
            },
        ),
    );

    env.define(
        "sqrt",
        builtin(
            "sqrt",
            TypeInfo::callable(
                vec![TypeInfo::union([TypeInfo::scalar(BaseType::Integer), TypeInfo::scalar(BaseType::Float)])],
                TypeInfo::scalar(BaseType::Float),
            ),
            |args, position| {
                let value = args.first().ok_or_else(|| RuntimeError::new("sqrt() expects one argument", position))?;
                let x = match value {
                    Value::Integer(i) => *i as f64,
                    Value::Float(f) => *f,
                    other => {
                        return Err(RuntimeError::new(
                            format!("sqrt() expects a number, found '{}'", other.type_name()),
                            position,
                        ))
                    }
                };
                if x < 0.0 {
                    return Err(RuntimeError::new("sqrt() of a negative number", position));
                }
                Ok(Value::Float(x.sqrt()))
            },
        ),
    );

    env.define(
        "get_type",
        builtin(
            "get_type",
            TypeInfo::callable(vec![TypeInfo::scalar(BaseType::Any)], TypeInfo::scalar(BaseType::String)),
            |args, position| {
                let value = args.first().ok_or_else(|| RuntimeError::new("get_type() expects one argument", position))?;
                Ok(Value::string(types::infer(value).to_string()))
            },
        ),
    );
}

/// Resolves `object.attribute` to a bound method, if one exists for the
/// receiver's runtime type. Returns `None` when no such method is defined,
/// letting the caller raise the usual "no such attribute" error.
pub fn bound_method(receiver: &Value, attribute: &str) -> Option<Value> {
    let receiver = receiver.clone();

    match (receiver.clone(), attribute) {
        (Value::List(list), "length") => Some(builtin("length", length_signature(), move |_args, _pos| {
            Ok(Value::Integer(list.borrow().len() as i64))
        })),
        (Value::Dict(dict), "length") => Some(builtin("length", length_signature(), move |_args, _pos| {
            Ok(Value::Integer(dict.borrow().len() as i64))
        })),
        (Value::String(s), "length") => Some(builtin("length", length_signature(), move |_args, _pos| {
            Ok(Value::Integer(s.chars().count() as i64))
        })),
        (Value::List(list), "push") => Some(builtin(
            "push",
            TypeInfo::callable(vec![TypeInfo::scalar(BaseType::Any)], TypeInfo::scalar(BaseType::None)),
            move |args, position| {
                let value = args
                    .first()
                    .ok_or_else(|| RuntimeError::new("push() expects one argument", position))?
                    .clone();
                list.borrow_mut().push(value);
                Ok(Value::None)
            },
        )),
        (Value::Dict(dict), "keys") => Some(builtin(
            "keys",
            TypeInfo::callable(vec![], TypeInfo::list(TypeInfo::scalar(BaseType::String))),
            move |_args, _pos| Ok(Value::list(dict.borrow().keys().map(|k| Value::string(k.clone())).collect())),
        )),
        (Value::String(s), "upper") => Some(builtin(
            "upper",
            TypeInfo::callable(vec![], TypeInfo::scalar(BaseType::String)),
            move |_args, _pos| Ok(Value::string(s.to_uppercase())),
        )),
        (Value::String(s), "lower") => Some(builtin(
            "lower",
            TypeInfo::callable(vec![], TypeInfo::scalar(BaseType::String)),
            move |_args, _pos| Ok(Value::string(s.to_lowercase())),
        )),
        _ => None,
    }
}

fn length_signature() -> TypeInfo {
    TypeInfo::callable(vec![], TypeInfo::scalar(BaseType::Integer))
}
