//! Standard function library.

mod bitwise;
mod extra;
mod logical;
mod math;
mod operators;

use reckon_syntax::error::{error, Error, ErrorKind, Result};
use reckon_syntax::{Decimal, Value};

use crate::registry::FunctionRegistry;

/// Registers every standard function.
pub fn register_all(registry: &mut FunctionRegistry) {
    registry.register_all(operators::functions());
    registry.register_all(math::functions());
    registry.register_all(bitwise::functions());
    registry.register_all(logical::functions());
    registry.register_all(extra::functions());
}

fn number<'a>(name: &str, args: &'a [Value], index: usize) -> Result<&'a Decimal> {
    match args.get(index) {
        Some(Value::Number(n)) => Ok(n),
        Some(other) => error(ErrorKind::ParameterType {
            name: name.to_string(),
            index: index + 1,
            expected: "number".into(),
            actual: other.type_name().into(),
        }),
        None => Err(Error::evaluation(format!("'{}' is missing argument {}", name, index + 1))),
    }
}

/// Collects the arguments as decimals; callers use [`crate::Params::Numbers`].
fn numbers<'a>(name: &str, args: &'a [Value]) -> Result<Vec<&'a Decimal>> {
    (0..args.len()).map(|i| number(name, args, i)).collect()
}

fn integer(name: &str, value: &Decimal) -> Result<i64> {
    value
        .to_i64()
        .ok_or_else(|| Error::evaluation(format!("'{}' expects an integer, got {}", name, value)))
}
