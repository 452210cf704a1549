//! Full recursive evaluation of an expression tree.

use reckon_syntax::ast::{unquote, Node, VariableModifier};
use reckon_syntax::error::{error, Error, ErrorKind, Result};
use reckon_syntax::{Decimal, Value};

use crate::interpreter::Interpreter;

/// Evaluates `node` to a value. Children are evaluated left to right before
/// the function is looked up and invoked.
pub fn evaluate(interp: &mut Interpreter, node: &Node) -> Result<Value> {
    match node {
        Node::Number(d) => Ok(Value::Number(d.clone())),
        Node::Hex(text) => Ok(Value::Number(Decimal::from_hex(text)?)),
        Node::Bool(b) => Ok(Value::from_bool(*b)),
        Node::Str(text) => Ok(Value::Str(unquote(text).to_string())),
        Node::Assignee(name) => Ok(Value::Str(name.clone())),
        Node::Variable { name, modifier } => read_variable(interp, name, *modifier),
        Node::Unary { op: name, .. } | Node::Operator { op: name, .. } | Node::Function { name, .. } => {
            let args = node
                .children()
                .iter()
                .map(|child| evaluate(interp, child))
                .collect::<Result<Vec<_>>>()?;
            call(interp, name, &args)
        }
    }
}

pub(crate) fn read_variable(interp: &mut Interpreter, name: &str, modifier: VariableModifier) -> Result<Value> {
    if !interp.variables_mut().contains_variable(name, modifier)? {
        return error(ErrorKind::UndefinedVariable(name.to_string()));
    }
    let value = interp.variables_mut().get_variable(name, modifier)?;
    interp.stats.variable_reads += 1;
    Ok(value)
}

pub(crate) fn call(interp: &mut Interpreter, name: &str, args: &[Value]) -> Result<Value> {
    let function = interp
        .functions()
        .lookup(name)
        .ok_or_else(|| Error::new(ErrorKind::UndefinedFunction(name.to_string())))?;
    interp.stats.function_calls += 1;
    function.evaluate(interp, name, args)
}
