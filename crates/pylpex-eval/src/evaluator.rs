//! Tree-walking evaluation over the parsed AST.

use crate::environment::Environment;
use crate::flow::Flow;
use crate::intrinsics;
use crate::operators::{apply_binary, apply_unary};
use crate::value::{UserFunction, Value};
use indexmap::IndexMap;
use pylpex_ast::expressions::{AssignOp, Expression, ExpressionKind};
use pylpex_ast::statements::{Program, Statement, StatementKind};
use pylpex_errors::RuntimeError;
use pylpex_span::Position;
use std::rc::Rc;

pub struct Evaluator {
    pub global: Environment,
}

impl Evaluator {
    pub fn new() -> Self {
        let global = Environment::new_root();
        intrinsics::install(&global);
        Self { global }
    }

    /// Evaluates a full program in the global environment, returning the
    /// value of its last top-level statement.
    pub fn evaluate_program(&self, program: &Program) -> Result<Value, RuntimeError> {
        tracing::debug!(statement_count = program.statements.len(), "evaluating program");
        let flow = self.evaluate_block(&program.statements, &self.global)?;
        Ok(flow.into_value())
    }

    fn evaluate_block(&self, statements: &[Statement], env: &Environment) -> Result<Flow, RuntimeError> {
        let mut last = Flow::Value(Value::None);
        for statement in statements {
            last = self.evaluate_statement(statement, env)?;
            if matches!(last, Flow::Break | Flow::Continue | Flow::Return(_)) {
                return Ok(last);
            }
        }
        Ok(last)
    }

    fn evaluate_statement(&self, statement: &Statement, env: &Environment) -> Result<Flow, RuntimeError> {
        match &statement.kind {
            StatementKind::Expression(expr) => Ok(Flow::Value(self.evaluate_expression(expr, env)?)),

            StatementKind::If { condition, then_block, else_block } => {
                let cond = self.evaluate_expression(condition, env)?;
                if cond.is_truthy() {
                    self.evaluate_block(then_block, env)
                } else if let Some(else_block) = else_block {
                    self.evaluate_block(else_block, env)
                } else {
                    Ok(Flow::Value(Value::None))
                }
            }

            StatementKind::While { condition, body } => {
                loop {
                    let cond = self.evaluate_expression(condition, env)?;
                    if !cond.is_truthy() {
                        break;
                    }
                    match self.evaluate_block(body, env)? {
                        Flow::Break => break,
                        Flow::Continue | Flow::Value(_) => continue,
                        ret @ Flow::Return(_) => return Ok(ret),
                    }
                }
                Ok(Flow::Value(Value::None))
            }

            StatementKind::For { variable, iterable, body } => {
                let collection = self.evaluate_expression(iterable, env)?;
                let items = iterate(&collection, statement.position)?;
                for item in items {
                    let loop_env = env.child();
                    loop_env.define(variable.clone(), item);
                    match self.evaluate_block(body, &loop_env)? {
                        Flow::Break => break,
                        Flow::Continue | Flow::Value(_) => continue,
                        ret @ Flow::Return(_) => return Ok(ret),
                    }
                }
                Ok(Flow::Value(Value::None))
            }

            StatementKind::FunctionDef(def) => {
                let function = UserFunction::from_def(def, env.clone());
                env.define(def.name.clone(), Value::UserFn(Rc::new(function)));
                Ok(Flow::Value(Value::None))
            }

            StatementKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.evaluate_expression(expr, env)?,
                    None => Value::None,
                };
                Ok(Flow::Return(value))
            }

            StatementKind::Break => Ok(Flow::Break),
            StatementKind::Continue => Ok(Flow::Continue),
        }
    }

    fn evaluate_expression(&self, expr: &Expression, env: &Environment) -> Result<Value, RuntimeError> {
        match &expr.kind {
            ExpressionKind::None => Ok(Value::None),
            ExpressionKind::Integer(i) => Ok(Value::Integer(*i)),
            ExpressionKind::Float(f) => Ok(Value::Float(*f)),
            ExpressionKind::String(s) => Ok(Value::string(s.clone())),
            ExpressionKind::Boolean(b) => Ok(Value::Boolean(*b)),

            ExpressionKind::List(elements) => {
                let values = elements
                    .iter()
                    .map(|e| self.evaluate_expression(e, env))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::list(values))
            }

            ExpressionKind::Dictionary(entries) => {
                let mut map = IndexMap::new();
                for entry in entries {
                    let value = self.evaluate_expression(&entry.value, env)?;
                    map.insert(entry.key.clone(), value);
                }
                Ok(Value::dict(map))
            }

            ExpressionKind::Identifier(name) => env
                .lookup(name)
                .ok_or_else(|| RuntimeError::new(format!("undefined variable '{name}'"), expr.position)),

            ExpressionKind::Index { collection, index } => {
                let collection = self.evaluate_expression(collection, env)?;
                let index = self.evaluate_expression(index, env)?;
                index_get(&collection, &index, expr.position)
            }

            ExpressionKind::Attribute { object, attribute } => {
                let receiver = self.evaluate_expression(object, env)?;
                intrinsics::bound_method(&receiver, attribute).ok_or_else(|| {
                    RuntimeError::new(
                        format!("'{}' has no attribute '{attribute}'", receiver.type_name()),
                        expr.position,
                    )
                })
            }

            ExpressionKind::Call { callee, arguments } => self.evaluate_call(callee, arguments, expr.position, env),

            ExpressionKind::Unary { op, operand } => {
                let value = self.evaluate_expression(operand, env)?;
                apply_unary(*op, &value, expr.position)
            }

            ExpressionKind::Binary { op, left, right } => {
                use pylpex_ast::expressions::BinaryOp;
                let left_val = self.evaluate_expression(left, env)?;
                if matches!(op, BinaryOp::And) && !left_val.is_truthy() {
                    return Ok(left_val);
                }
                if matches!(op, BinaryOp::Or) && left_val.is_truthy() {
                    return Ok(left_val);
                }
                let right_val = self.evaluate_expression(right, env)?;
                apply_binary(*op, &left_val, &right_val, expr.position)
            }

            ExpressionKind::Ternary { condition, if_true, if_false } => {
                let cond = self.evaluate_expression(condition, env)?;
                if cond.is_truthy() {
                    self.evaluate_expression(if_true, env)
                } else {
                    self.evaluate_expression(if_false, env)
                }
            }

            ExpressionKind::Assignment { target, op, value } => self.evaluate_assignment(target, *op, value, env),
        }
    }

    fn evaluate_assignment(
        &self,
        target: &Expression,
        op: AssignOp,
        value_expr: &Expression,
        env: &Environment,
    ) -> Result<Value, RuntimeError> {
        let rhs = self.evaluate_expression(value_expr, env)?;

        match &target.kind {
            ExpressionKind::Identifier(name) => {
                let new_value = match op.binary_op() {
                    None => rhs,
                    Some(bin_op) => {
                        let current = env
                            .lookup(name)
                            .ok_or_else(|| RuntimeError::new(format!("undefined variable '{name}'"), target.position))?;
                        apply_binary(bin_op, &current, &rhs, target.position)?
                    }
                };
                if op == AssignOp::Assign {
                    env.define(name.clone(), new_value.clone());
                } else {
                    env.assign(name, new_value.clone(), target.position)?;
                }
                Ok(new_value)
            }

            ExpressionKind::Index { collection, index } => {
                let collection_val = self.evaluate_expression(collection, env)?;
                let index_val = self.evaluate_expression(index, env)?;
                let new_value = match op.binary_op() {
                    None => rhs,
                    Some(bin_op) => {
                        let current = index_get(&collection_val, &index_val, target.position)?;
                        apply_binary(bin_op, &current, &rhs, target.position)?
                    }
                };
                index_set(&collection_val, index_val, new_value.clone(), target.position)?;
                Ok(new_value)
            }

            ExpressionKind::Attribute { .. } => {
                Err(RuntimeError::new("attribute assignment is not supported", target.position))
            }

            _ => Err(RuntimeError::new("left-hand side is not assignable", target.position)),
        }
    }

    fn evaluate_call(
        &self,
        callee: &Expression,
        arguments: &[pylpex_ast::expressions::Argument],
        position: Position,
        env: &Environment,
    ) -> Result<Value, RuntimeError> {
        let callee_val = self.evaluate_expression(callee, env)?;

        let mut positional = Vec::new();
        let mut named = Vec::new();
        let mut seen_named = false;
        for arg in arguments {
            let value = self.evaluate_expression(&arg.value, env)?;
            match &arg.name {
                Some(name) => {
                    seen_named = true;
                    named.push((name.clone(), value));
                }
                None => {
                    if seen_named {
                        return Err(RuntimeError::new("positional argument follows named argument", position));
                    }
                    positional.push(value);
                }
            }
        }

        match callee_val {
            Value::BuiltinFn(builtin) => (builtin.func)(&positional, position),
            Value::UserFn(function) => self.call_user_function(&function, positional, named, position),
            other => Err(RuntimeError::new(format!("'{}' is not callable", other.type_name()), position)),
        }
    }

    fn call_user_function(
        &self,
        function: &UserFunction,
        positional: Vec<Value>,
        named: Vec<(String, Value)>,
        position: Position,
    ) -> Result<Value, RuntimeError> {
        if positional.len() > function.parameters.len() {
            return Err(RuntimeError::new(
                format!("{}() takes at most {} arguments ({} given)", function.name, function.parameters.len(), positional.len()),
                position,
            ));
        }

        let call_env = function.closure.child();
        let mut positional = positional.into_iter();

        for parameter in &function.parameters {
            if let Some(value) = positional.next() {
                call_env.define(parameter.name.clone(), value);
                continue;
            }
            if let Some((_, value)) = named.iter().find(|(name, _)| name == &parameter.name) {
                call_env.define(parameter.name.clone(), value.clone());
                continue;
            }
            if let Some(default) = &parameter.default {
                let value = self.evaluate_expression(default, &call_env)?;
                call_env.define(parameter.name.clone(), value);
                continue;
            }
            return Err(RuntimeError::new(
                format!("{}() missing required argument '{}'", function.name, parameter.name),
                position,
            ));
        }

        match self.evaluate_block(&function.body, &call_env)? {
            Flow::Return(value) => Ok(value),
            Flow::Value(value) => Ok(value),
            Flow::Break | Flow::Continue => {
                Err(RuntimeError::new("'break'/'continue' escaped their enclosing loop", position))
            }
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn index_get(collection: &Value, index: &Value, position: Position) -> Result<Value, RuntimeError> {
    match collection {
        Value::List(items) => {
            let items = items.borrow();
            let idx = resolve_index(index, items.len(), position)?;
            items.get(idx).cloned().ok_or_else(|| RuntimeError::new("index out of bounds", position))
        }
        Value::String(s) => {
            let chars: Vec<char> = s.chars().collect();
            let idx = resolve_index(index, chars.len(), position)?;
            chars.get(idx).map(|c| Value::string(c.to_string())).ok_or_else(|| RuntimeError::new("index out of bounds", position))
        }
        Value::Dict(entries) => match index {
            Value::String(key) => entries
                .borrow()
                .get(key.as_str())
                .cloned()
                .ok_or_else(|| RuntimeError::new(format!("key not found: '{key}'"), position)),
            _ => Err(RuntimeError::new("dictionary keys must be strings", position)),
        },
        other => Err(RuntimeError::new(format!("'{}' does not support indexing", other.type_name()), position)),
    }
}

fn index_set(collection: &Value, index: Value, value: Value, position: Position) -> Result<(), RuntimeError> {
    match collection {
        Value::List(items) => {
            let mut items = items.borrow_mut();
            let idx = resolve_index(&index, items.len(), position)?;
            if idx >= items.len() {
                return Err(RuntimeError::new("index out of bounds", position));
            }
            items[idx] = value;
            Ok(())
        }
        Value::Dict(entries) => match index {
            Value::String(key) => {
                entries.borrow_mut().insert((*key).clone(), value);
                Ok(())
            }
            _ => Err(RuntimeError::new("dictionary keys must be strings", position)),
        },
        other => Err(RuntimeError::new(format!("'{}' does not support item assignment", other.type_name()), position)),
    }
}

fn resolve_index(index: &Value, len: usize, position: Position) -> Result<usize, RuntimeError> {
    let Value::Integer(i) = index else {
        return Err(RuntimeError::new("index must be an integer", position));
    };
    let resolved = if *i < 0 { *i + len as i64 } else { *i };
    if resolved < 0 {
        return Err(RuntimeError::new("index out of bounds", position));
    }
    Ok(resolved as usize)
}

fn iterate(value: &Value, position: Position) -> Result<Vec<Value>, RuntimeError> {
    match value {
        Value::List(items) => Ok(items.borrow().clone()),
        Value::Dict(entries) => Ok(entries.borrow().keys().map(|k| Value::string(k.clone())).collect()),
        Value::String(s) => Ok(s.chars().map(|c| Value::string(c.to_string())).collect()),
        other => Err(RuntimeError::new(format!("'{}' is not iterable", other.type_name()), position)),
    }
}
