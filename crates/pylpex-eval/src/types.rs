//! Runtime type inference backing the `get_type` intrinsic.

use crate::value::Value;
use pylpex_ast::types::{BaseType, TypeInfo};

pub fn infer(value: &Value) -> TypeInfo {
    match value {
        Value::None => TypeInfo::scalar(BaseType::None),
        Value::Integer(_) => TypeInfo::scalar(BaseType::Integer),
        Value::Float(_) => TypeInfo::scalar(BaseType::Float),
        Value::Boolean(_) => TypeInfo::scalar(BaseType::Boolean),
        Value::String(_) => TypeInfo::scalar(BaseType::String),
        Value::List(items) => {
            let element = TypeInfo::union(items.borrow().iter().map(infer));
            TypeInfo::list(element)
        }
        Value::Dict(entries) => {
            let value_type = TypeInfo::union(entries.borrow().values().map(infer));
            TypeInfo::dict(value_type)
        }
        Value::BuiltinFn(b) => b.signature.clone(),
        Value::UserFn(f) => {
            let args = f
                .parameters
                .iter()
                .map(|_| TypeInfo::scalar(BaseType::Any))
                .collect();
            TypeInfo::callable(args, TypeInfo::scalar(BaseType::Any))
        }
    }
}
