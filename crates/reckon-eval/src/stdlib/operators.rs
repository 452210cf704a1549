//! Assignment and arithmetic operators.

use reckon_syntax::ast::VariableModifier;
use reckon_syntax::error::{error, Arity, Error, ErrorKind, Result};
use reckon_syntax::{Decimal, Value};

use super::{integer, number, numbers};
use crate::function::{Function, Params};
use crate::interpreter::Interpreter;

/// Largest exponent magnitude accepted by `^`.
const MAX_EXPONENT: i64 = 999_999_999;

pub(super) fn functions() -> Vec<Function> {
    vec![
        Function::new(&["=", "set"], Arity::exactly(2), assign),
        Function::new(&["+", "add"], Arity::at_least(1), add),
        Function::new(&["-", "subtract"], Arity::at_least(1), subtract).with_params(Params::Numbers),
        Function::new(&["*", "multiply"], Arity::at_least(2), |_, name, args| {
            let ns = numbers(name, args)?;
            Ok(Value::Number(ns.iter().skip(1).try_fold(ns[0].clone(), |acc, &n| acc.checked_mul(n))?))
        })
        .with_params(Params::Numbers),
        Function::new(&["/", "divide"], Arity::at_least(2), |_, name, args| {
            let ns = numbers(name, args)?;
            let mut acc = ns[0].clone();
            for n in &ns[1..] {
                acc = acc.checked_div(n)?;
            }
            Ok(Value::Number(acc))
        })
        .with_params(Params::Numbers),
        Function::new(&["^", "power"], Arity::exactly(2), power).with_params(Params::Numbers),
    ]
}

fn assign(interp: &mut Interpreter, name: &str, args: &[Value]) -> Result<Value> {
    let Value::Str(target) = &args[0] else {
        return error(ErrorKind::ParameterType {
            name: name.to_string(),
            index: 1,
            expected: "string".into(),
            actual: args[0].type_name().into(),
        });
    };
    let value = args[1].clone();
    interp
        .variables_mut()
        .set_variable(target, VariableModifier::Plain, value.clone())?;
    Ok(value)
}

/// Numbers add; any string argument turns the whole call into concatenation.
fn add(_: &mut Interpreter, name: &str, args: &[Value]) -> Result<Value> {
    if args.iter().any(|a| matches!(a, Value::Str(_))) {
        return Ok(Value::Str(args.iter().map(Value::to_string).collect()));
    }
    let ns = numbers(name, args)?;
    Ok(Value::Number(ns.iter().skip(1).fold(ns[0].clone(), |acc, &n| &acc + n)))
}

/// One argument negates; more subtract left to right.
fn subtract(_: &mut Interpreter, name: &str, args: &[Value]) -> Result<Value> {
    let ns = numbers(name, args)?;
    if ns.len() == 1 {
        return Ok(Value::Number(-ns[0]));
    }
    Ok(Value::Number(ns.iter().skip(1).fold(ns[0].clone(), |acc, &n| &acc - n)))
}

fn power(_: &mut Interpreter, name: &str, args: &[Value]) -> Result<Value> {
    let base = number(name, args, 0)?;
    let exp = integer(name, number(name, args, 1)?)?;
    if exp.abs() > MAX_EXPONENT {
        return Err(Error::evaluation(format!("Exponent out of range: {}", exp)));
    }
    Ok(Value::Number(Decimal::pow(base, exp)?))
}

#[cfg(test)]
mod tests {
    use crate::Interpreter;
    use reckon_syntax::error::ErrorKind;
    use reckon_syntax::Value;

    fn eval(src: &str) -> Value {
        Interpreter::new().eval_str(src).expect(src)
    }

    #[test]
    fn arithmetic_is_exact() {
        assert_eq!(eval("0.1 + 0.2").to_string(), "0.3");
        assert_eq!(eval("1.10 * 3").to_string(), "3.30");
        assert_eq!(eval("10 - 2 - 3"), Value::from(5));
        assert_eq!(eval("-(4)"), Value::from(-4));
        assert_eq!(eval("1 / 4").to_string(), "0.25");
        assert_eq!(eval("2 ^ 10"), Value::from(1024));
        assert_eq!(eval("2 ^ -2").to_string(), "0.25");
    }

    #[test]
    fn plus_concatenates_strings() {
        assert_eq!(eval("'hp: ' + 10"), Value::from("hp: 10"));
        assert_eq!(eval("add(1, 2, 3)"), Value::from(6));
    }

    #[test]
    fn assignment_stores_and_returns_value() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.eval_str("x = 2 * 3").unwrap(), Value::from(6));
        assert_eq!(interp.get_variable("X").unwrap(), Value::from(6));
        assert_eq!(interp.eval_str("set('y', 'up')").unwrap(), Value::from("up"));
        assert_eq!(interp.get_variable("y").unwrap(), Value::from("up"));
    }

    #[test]
    fn operator_failures() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.eval_str("1 / 0").unwrap_err().kind, ErrorKind::DivisionByZero);
        assert!(matches!(interp.eval_str("2 ^ 0.5").unwrap_err().kind, ErrorKind::Evaluation(_)));
        assert!(matches!(
            interp.eval_str("'a' - 1").unwrap_err().kind,
            ErrorKind::ParameterType { index: 1, .. }
        ));
        assert!(matches!(interp.eval_str("set(1, 2)").unwrap_err().kind, ErrorKind::ParameterType { .. }));
        let tiny: reckon_syntax::Decimal = "1e-4294967295".parse().unwrap();
        interp.set_variable("tiny", Value::Number(tiny)).unwrap();
        for src in ["0.00001 ^ 999999999", "0.00001 ^ -999999999", "tiny * 0.1"] {
            assert!(matches!(interp.eval_str(src).unwrap_err().kind, ErrorKind::Evaluation(_)), "{}", src);
        }
    }
}
