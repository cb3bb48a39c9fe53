//! The optional static-type descriptor model backing the `get_type`
//! intrinsic. Not consulted by evaluation; purely informational.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseType {
    None,
    Integer,
    Float,
    String,
    Boolean,
    List,
    Dictionary,
    Callable,
    Union,
    Args,
    Any,
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BaseType::None => "null",
            BaseType::Integer => "int",
            BaseType::Float => "float",
            BaseType::String => "string",
            BaseType::Boolean => "bool",
            BaseType::List => "list",
            BaseType::Dictionary => "dict",
            BaseType::Callable => "callable",
            BaseType::Union => "union",
            BaseType::Args => "args",
            BaseType::Any => "any",
        };
        f.write_str(s)
    }
}

/// A structural type descriptor: a base tag plus an optional list of
/// subtypes (element types for containers, arg/return types for callables).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub base: BaseType,
    pub subtypes: Vec<TypeInfo>,
}

impl TypeInfo {
    pub fn scalar(base: BaseType) -> Self {
        Self { base, subtypes: Vec::new() }
    }

    pub fn list(element: TypeInfo) -> Self {
        Self { base: BaseType::List, subtypes: vec![element] }
    }

    pub fn dict(value: TypeInfo) -> Self {
        Self { base: BaseType::Dictionary, subtypes: vec![TypeInfo::scalar(BaseType::String), value] }
    }

    pub fn callable(arg_types: Vec<TypeInfo>, return_type: TypeInfo) -> Self {
        let args = TypeInfo { base: BaseType::Args, subtypes: arg_types };
        TypeInfo { base: BaseType::Callable, subtypes: vec![args, return_type] }
    }

    /// Builds a simplified union: flattens nested unions, deduplicates,
    /// and collapses a single remaining member to itself.
    pub fn union(types: impl IntoIterator<Item = TypeInfo>) -> Self {
        let mut flattened = Vec::new();
        for t in types {
            if t.base == BaseType::Union {
                flattened.extend(t.subtypes);
            } else {
                flattened.push(t);
            }
        }

        let mut unique: Vec<TypeInfo> = Vec::new();
        for t in flattened {
            if !unique.contains(&t) {
                unique.push(t);
            }
        }

        match unique.len() {
            0 => TypeInfo::scalar(BaseType::Any),
            1 => unique.into_iter().next().unwrap(),
            _ => TypeInfo { base: BaseType::Union, subtypes: unique },
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.subtypes.is_empty() {
            return write!(f, "{}", self.base);
        }
        let inner = self
            .subtypes
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}[{inner}]", self.base)
    }
}
