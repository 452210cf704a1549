//! Non-deterministic functions: `eval` and `random`.

use rand::Rng;
use reckon_syntax::error::{Arity, Error, Result};
use reckon_syntax::{Decimal, Value};

use super::{integer, number};
use crate::function::{Function, Params};
use crate::interpreter::Interpreter;

pub(super) fn functions() -> Vec<Function> {
    vec![
        // Depends on whatever the evaluated text reads, so it is never frozen away.
        Function::new(&["eval"], Arity::exactly(1), |interp, _, args| {
            let Value::Str(text) = &args[0] else {
                return Ok(args[0].clone());
            };
            interp.eval_str(text)
        })
        .with_params(Params::Strings)
        .non_deterministic(),
        Function::new(&["random", "rand"], Arity::new(0, Some(2)), random)
            .with_params(Params::Numbers)
            .non_deterministic(),
    ]
}

/// `random()` is a decimal in `[0, 1)`; `random(n)` an integer in `[1, n]`;
/// `random(a, b)` an integer in `[a, b]`.
fn random(_: &mut Interpreter, name: &str, args: &[Value]) -> Result<Value> {
    let mut rng = rand::thread_rng();
    let (low, high) = match args.len() {
        0 => return Ok(Decimal::from_f64(rng.gen::<f64>())?.into()),
        1 => (1, integer(name, number(name, args, 0)?)?),
        _ => (integer(name, number(name, args, 0)?)?, integer(name, number(name, args, 1)?)?),
    };
    if high < low {
        return Err(Error::evaluation(format!("'{}' range is empty: [{}, {}]", name, low, high)));
    }
    Ok(Value::from(rng.gen_range(low..=high)))
}
