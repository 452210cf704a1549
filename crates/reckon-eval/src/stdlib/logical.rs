//! Logical, comparison and string comparison functions. Results are 1 or 0.

use std::cmp::Ordering;

use reckon_syntax::error::{Arity, Result};
use reckon_syntax::Value;

use super::numbers;
use crate::function::{Function, Params};

/// Values of different types are never equal.
fn values_equal(a: &Value, b: &Value) -> bool {
    a == b
}

/// True when `test` holds for every adjacent pair, as in `a < b < c`.
fn chain(name: &str, args: &[Value], test: fn(Ordering) -> bool) -> Result<Value> {
    let ns = numbers(name, args)?;
    Ok(Value::from_bool(ns.windows(2).all(|w| test(w[0].cmp(w[1])))))
}

pub(super) fn functions() -> Vec<Function> {
    vec![
        Function::new(&["!", "not"], Arity::exactly(1), |_, _, args| Ok(Value::from_bool(!args[0].is_truthy()))),
        Function::new(&["||", "or"], Arity::at_least(2), |_, _, args| {
            Ok(Value::from_bool(args.iter().any(Value::is_truthy)))
        }),
        Function::new(&["&&", "and"], Arity::at_least(2), |_, _, args| {
            Ok(Value::from_bool(args.iter().all(Value::is_truthy)))
        }),
        Function::new(&["==", "eq"], Arity::at_least(2), |_, _, args| {
            Ok(Value::from_bool(args.windows(2).all(|w| values_equal(&w[0], &w[1]))))
        }),
        Function::new(&["!=", "neq"], Arity::at_least(2), |_, _, args| {
            Ok(Value::from_bool(args.windows(2).all(|w| !values_equal(&w[0], &w[1]))))
        }),
        Function::new(&[">", "gt"], Arity::at_least(2), |_, name, args| chain(name, args, Ordering::is_gt))
            .with_params(Params::Numbers),
        Function::new(&[">=", "ge"], Arity::at_least(2), |_, name, args| chain(name, args, Ordering::is_ge))
            .with_params(Params::Numbers),
        Function::new(&["<", "lt"], Arity::at_least(2), |_, name, args| chain(name, args, Ordering::is_lt))
            .with_params(Params::Numbers),
        Function::new(&["<=", "le"], Arity::at_least(2), |_, name, args| chain(name, args, Ordering::is_le))
            .with_params(Params::Numbers),
        // Compare string forms, case-sensitively: eqs(1.0, '1.0') is true.
        Function::new(&["eqs"], Arity::exactly(2), |_, _, args| {
            Ok(Value::from_bool(args[0].to_string() == args[1].to_string()))
        }),
        Function::new(&["neqs"], Arity::exactly(2), |_, _, args| {
            Ok(Value::from_bool(args[0].to_string() != args[1].to_string()))
        }),
    ]
}

#[cfg(test)]
mod tests {
    use crate::Interpreter;
    use reckon_syntax::Value;

    fn truth(src: &str) -> bool {
        let v = Interpreter::new().eval_str(src).expect(src);
        assert!(v == Value::from(1) || v == Value::from(0), "{} gave {}", src, v);
        v.is_truthy()
    }

    #[test]
    fn logical_connectives_use_truthiness() {
        assert!(truth("!0"));
        assert!(!truth("!'yes'"));
        assert!(truth("!'FALSE'"));
        assert!(truth("0 || 'x'"));
        assert!(!truth("1 && ''"));
        assert!(truth("true && 2"));
        assert!(!truth("not(true)"));
    }

    #[test]
    fn equality_is_numeric_for_numbers() {
        assert!(truth("2.0 == 2.00"));
        assert!(truth("'a' == 'a'"));
        assert!(!truth("1 == '1'"));
        assert!(truth("1 != 2"));
        assert!(truth("eq(3, 3, 3)"));
    }

    #[test]
    fn comparisons_chain() {
        assert!(truth("1 < 2 < 3"));
        assert!(!truth("1 < 3 < 2"));
        assert!(truth("3 >= 3 >= 1"));
        assert!(truth("le(1, 1, 2)"));
        assert!(!truth("gt(1, 1)"));
    }

    #[test]
    fn string_comparison_is_case_sensitive() {
        assert!(truth("eqs('abc', 'abc')"));
        assert!(!truth("eqs('abc', 'ABC')"));
        assert!(truth("neqs('abc', 'ABC')"));
        assert!(truth("eqs(1.50, '1.50')"));
    }
}
