//! Semantics for unary and binary operators over [`Value`].

use crate::value::Value;
use pylpex_ast::expressions::{BinaryOp, UnaryOp};
use pylpex_errors::RuntimeError;
use pylpex_span::Position;

fn type_error(op: &str, left: &Value, right: &Value, position: Position) -> RuntimeError {
    RuntimeError::new(
        format!("unsupported operand types for {op}: '{}' and '{}'", left.type_name(), right.type_name()),
        position,
    )
}

pub fn apply_unary(op: UnaryOp, operand: &Value, position: Position) -> Result<Value, RuntimeError> {
    match op {
        UnaryOp::Not => Ok(Value::Boolean(!operand.is_truthy())),
        UnaryOp::Pos => match operand {
            Value::Integer(i) => Ok(Value::Integer(*i)),
            Value::Float(f) => Ok(Value::Float(*f)),
            _ => Err(RuntimeError::new(format!("bad operand type for unary +: '{}'", operand.type_name()), position)),
        },
        UnaryOp::Neg => match operand {
            Value::Integer(i) => Ok(Value::Integer(-i)),
            Value::Float(f) => Ok(Value::Float(-f)),
            _ => Err(RuntimeError::new(format!("bad operand type for unary -: '{}'", operand.type_name()), position)),
        },
    }
}

pub fn apply_binary(op: BinaryOp, left: &Value, right: &Value, position: Position) -> Result<Value, RuntimeError> {
    use BinaryOp::*;
    match op {
        Add => add(left, right, position),
        Sub => arithmetic(left, right, position, "-", |a, b| a - b, |a, b| a - b),
        Mul => mul(left, right, position),
        Div => divide(left, right, position),
        Mod => modulo(left, right, position),
        Pow => power(left, right, position),
        Eq => Ok(Value::Boolean(left == right)),
        NotEq => Ok(Value::Boolean(left != right)),
        Lt => compare(left, right, position, |o| o.is_lt()),
        Gt => compare(left, right, position, |o| o.is_gt()),
        LtEq => compare(left, right, position, |o| o.is_le()),
        GtEq => compare(left, right, position, |o| o.is_ge()),
        And => Ok(if left.is_truthy() { right.clone() } else { left.clone() }),
        Or => Ok(if left.is_truthy() { left.clone() } else { right.clone() }),
        In => membership(left, right, position).map(Value::Boolean),
        NotIn => membership(left, right, position).map(|b| Value::Boolean(!b)),
    }
}

fn add(left: &Value, right: &Value, position: Position) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::String(a), Value::String(b)) => Ok(Value::string(format!("{a}{b}"))),
        (Value::List(a), Value::List(b)) => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::list(items))
        }
        _ => arithmetic(left, right, position, "+", |a, b| a + b, |a, b| a + b),
    }
}

fn mul(left: &Value, right: &Value, position: Position) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::String(s), Value::Integer(n)) | (Value::Integer(n), Value::String(s)) => {
            if *n < 0 {
                return Err(RuntimeError::new("repeat count must be non-negative", position));
            }
            Ok(Value::string(s.repeat(*n as usize)))
        }
        (Value::List(l), Value::Integer(n)) | (Value::Integer(n), Value::List(l)) => {
            if *n < 0 {
                return Err(RuntimeError::new("repeat count must be non-negative", position));
            }
            let base = l.borrow();
            let mut items = Vec::with_capacity(base.len() * (*n as usize));
            for _ in 0..*n {
                items.extend(base.iter().cloned());
            }
            Ok(Value::list(items))
        }
        _ => arithmetic(left, right, position, "*", |a, b| a * b, |a, b| a * b),
    }
}

fn arithmetic(
    left: &Value,
    right: &Value,
    position: Position,
    op: &str,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(int_op(*a, *b))),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(float_op(*a, *b))),
        (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(float_op(*a as f64, *b))),
        (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(float_op(*a, *b as f64))),
        _ => Err(type_error(op, left, right, position)),
    }
}

fn divide(left: &Value, right: &Value, position: Position) -> Result<Value, RuntimeError> {
    let (a, b) = as_f64_pair(left, right, "/", position)?;
    if b == 0.0 {
        return Err(RuntimeError::new("division by zero", position));
    }
    Ok(Value::Float(a / b))
}

fn modulo(left: &Value, right: &Value, position: Position) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => {
            if *b == 0 {
                return Err(RuntimeError::new("division by zero", position));
            }
            Ok(Value::Integer(((a % b) + b) % b))
        }
        _ => {
            let (a, b) = as_f64_pair(left, right, "%", position)?;
            if b == 0.0 {
                return Err(RuntimeError::new("division by zero", position));
            }
            Ok(Value::Float(((a % b) + b) % b))
        }
    }
}

fn power(left: &Value, right: &Value, position: Position) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) if *b >= 0 => Ok(Value::Integer(a.pow(*b as u32))),
        _ => {
            let (a, b) = as_f64_pair(left, right, "**", position)?;
            Ok(Value::Float(a.powf(b)))
        }
    }
}

fn as_f64_pair(left: &Value, right: &Value, op: &str, position: Position) -> Result<(f64, f64), RuntimeError> {
    let a = as_f64(left).ok_or_else(|| type_error(op, left, right, position))?;
    let b = as_f64(right).ok_or_else(|| type_error(op, left, right, position))?;
    Ok((a, b))
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}

fn compare(left: &Value, right: &Value, position: Position, test: fn(std::cmp::Ordering) -> bool) -> Result<Value, RuntimeError> {
    use std::cmp::Ordering;
    let ordering = match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => compare_lists(&a.borrow(), &b.borrow()),
        _ => match as_f64_pair(left, right, "comparison", position) {
            Ok((a, b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            Err(_) => return Err(type_error("comparison", left, right, position)),
        },
    };
    Ok(Value::Boolean(test(ordering)))
}

fn compare_lists(a: &[Value], b: &[Value]) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    for (x, y) in a.iter().zip(b.iter()) {
        if x != y {
            return match (x, y) {
                (Value::Integer(p), Value::Integer(q)) => p.cmp(q),
                (Value::String(p), Value::String(q)) => p.cmp(q),
                _ => match (as_f64(x), as_f64(y)) {
                    (Some(p), Some(q)) => p.partial_cmp(&q).unwrap_or(Ordering::Equal),
                    _ => Ordering::Equal,
                },
            };
        }
    }
    a.len().cmp(&b.len())
}

fn membership(needle: &Value, haystack: &Value, position: Position) -> Result<bool, RuntimeError> {
    match haystack {
        Value::List(items) => Ok(items.borrow().iter().any(|v| v == needle)),
        Value::Dict(entries) => match needle {
            Value::String(key) => Ok(entries.borrow().contains_key(key.as_str())),
            _ => Ok(false),
        },
        Value::String(s) => match needle {
            Value::String(sub) => Ok(s.contains(sub.as_str())),
            _ => Err(RuntimeError::new("'in' requires a string on the left of a string", position)),
        },
        _ => Err(RuntimeError::new(format!("'in' is not supported on '{}'", haystack.type_name()), position)),
    }
}
