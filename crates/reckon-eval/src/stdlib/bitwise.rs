//! Bitwise functions over integers that fit in an `i64`.

use reckon_syntax::error::{Arity, Result};
use reckon_syntax::Value;

use super::{integer, number};
use crate::function::{Function, Params};

fn integers(name: &str, args: &[Value]) -> Result<Vec<i64>> {
    (0..args.len()).map(|i| integer(name, number(name, args, i)?)).collect()
}

fn fold_bits(name: &str, args: &[Value], op: fn(i64, i64) -> i64) -> Result<Value> {
    let ns = integers(name, args)?;
    Ok(Value::from(ns.iter().skip(1).fold(ns[0], |acc, &n| op(acc, n))))
}

pub(super) fn functions() -> Vec<Function> {
    vec![
        Function::new(&["band"], Arity::at_least(2), |_, name, args| fold_bits(name, args, |a, b| a & b)),
        Function::new(&["bor"], Arity::at_least(2), |_, name, args| fold_bits(name, args, |a, b| a | b)),
        Function::new(&["bxor"], Arity::at_least(2), |_, name, args| fold_bits(name, args, |a, b| a ^ b)),
        Function::new(&["bnot"], Arity::exactly(1), |_, name, args| {
            Ok(Value::from(!integer(name, number(name, args, 0)?)?))
        }),
        // Negative values keep their sign: hex(-255) is -0xFF.
        Function::new(&["hex"], Arity::exactly(1), |_, name, args| {
            let n = integer(name, number(name, args, 0)?)?;
            let sign = if n < 0 { "-" } else { "" };
            Ok(Value::Str(format!("{}0x{:X}", sign, n.unsigned_abs())))
        }),
    ]
    .into_iter()
    .map(|f| f.with_params(Params::Numbers))
    .collect()
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
    fn bit_operations() {
        assert_eq!(eval("band(12, 10)"), Value::from(8));
        assert_eq!(eval("bor(12, 10, 1)"), Value::from(15));
        assert_eq!(eval("bxor(12, 10)"), Value::from(6));
        assert_eq!(eval("bnot(0)"), Value::from(-1));
        assert_eq!(eval("band(0xFF, 0x0F)"), Value::from(15));
    }

    #[test]
    fn hex_rendering() {
        assert_eq!(eval("hex(255)"), Value::from("0xFF"));
        assert_eq!(eval("hex(-255)"), Value::from("-0xFF"));
        assert_eq!(eval("hex(0)"), Value::from("0x0"));
    }

    #[test]
    fn fractions_are_rejected() {
        let err = Interpreter::new().eval_str("band(1.5, 1)").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Evaluation(_)));
    }
}
