//! Math functions over exact decimals.

use reckon_syntax::error::{Arity, Error, Result};
use reckon_syntax::{Decimal, Value};

use super::{integer, number, numbers};
use crate::function::{Function, Params};

/// Fractional digits computed by `sqrt` and `hypot` unless a scale is given.
const DEFAULT_SQRT_SCALE: u32 = 10;
const MAX_SQRT_ITERATIONS: usize = 1000;

pub(super) fn functions() -> Vec<Function> {
    vec![
        Function::new(&["abs"], Arity::exactly(1), |_, name, args| Ok(number(name, args, 0)?.abs().into())),
        Function::new(&["ceil", "ceiling"], Arity::exactly(1), |_, name, args| Ok(number(name, args, 0)?.ceil().into())),
        Function::new(&["floor"], Arity::exactly(1), |_, name, args| Ok(number(name, args, 0)?.floor().into())),
        Function::new(&["hypot", "hypotenuse"], Arity::exactly(2), |_, name, args| {
            let (a, b) = (number(name, args, 0)?, number(name, args, 1)?);
            Ok(sqrt(&(a.checked_mul(a)? + b.checked_mul(b)?), DEFAULT_SQRT_SCALE)?.into())
        }),
        Function::new(&["max"], Arity::at_least(1), |_, name, args| {
            Ok(numbers(name, args)?.into_iter().max().cloned().unwrap_or_default().into())
        }),
        Function::new(&["min"], Arity::at_least(1), |_, name, args| {
            Ok(numbers(name, args)?.into_iter().min().cloned().unwrap_or_default().into())
        }),
        Function::new(&["round"], Arity::new(1, Some(2)), |_, name, args| {
            let scale = scale_arg(name, args)?.unwrap_or(0);
            Ok(number(name, args, 0)?.round(scale).into())
        }),
        Function::new(&["sqrt", "squareroot"], Arity::new(1, Some(2)), |_, name, args| {
            let scale = scale_arg(name, args)?.unwrap_or(DEFAULT_SQRT_SCALE);
            Ok(sqrt(number(name, args, 0)?, scale)?.into())
        }),
        Function::new(&["mean", "avg", "average"], Arity::at_least(1), |_, name, args| {
            let ns = numbers(name, args)?;
            if ns.len() == 1 {
                return Ok(ns[0].clone().into());
            }
            let total = ns.iter().fold(Decimal::zero(), |acc, &n| &acc + n);
            Ok(total.checked_div(&Decimal::from(ns.len() as u64))?.into())
        }),
        Function::new(&["median"], Arity::at_least(1), |_, name, args| {
            let mut ns = numbers(name, args)?;
            ns.sort();
            let mid = ns.len() / 2;
            if ns.len() % 2 == 1 {
                Ok(ns[mid].clone().into())
            } else {
                Ok((ns[mid - 1] + ns[mid]).checked_div(&Decimal::from(2))?.into())
            }
        }),
        Function::new(&["log"], Arity::new(1, Some(2)), |_, name, args| {
            let x = positive(name, number(name, args, 0)?)?;
            let result = match args.get(1) {
                None => x.log10(),
                Some(_) => {
                    let base = positive(name, number(name, args, 1)?)?;
                    if base == 1.0 {
                        return Err(Error::evaluation("Logarithm base must not be 1"));
                    }
                    match base {
                        b if b == 2.0 => x.log2(),
                        b if b == 10.0 => x.log10(),
                        b => x.ln() / b.ln(),
                    }
                }
            };
            Ok(Decimal::from_f64(result)?.into())
        }),
        Function::new(&["ln"], Arity::exactly(1), |_, name, args| {
            let x = positive(name, number(name, args, 0)?)?;
            Ok(Decimal::from_f64(x.ln())?.into())
        }),
    ]
    .into_iter()
    .map(|f| f.with_params(Params::Numbers))
    .collect()
}

fn scale_arg(name: &str, args: &[Value]) -> Result<Option<u32>> {
    if args.len() < 2 {
        return Ok(None);
    }
    let scale = integer(name, number(name, args, 1)?)?;
    u32::try_from(scale)
        .map(Some)
        .map_err(|_| Error::evaluation(format!("'{}' scale must be a non-negative integer, got {}", name, scale)))
}

fn positive(name: &str, value: &Decimal) -> Result<f64> {
    if value.is_negative() || value.is_zero() {
        return Err(Error::evaluation(format!("'{}' is undefined for {}", name, value)));
    }
    Ok(value.to_f64())
}

/// Square root to `scale` fractional digits by Newton iteration, with
/// trailing zeros removed (`sqrt(16)` is `4`).
fn sqrt(value: &Decimal, scale: u32) -> Result<Decimal> {
    if value.is_negative() {
        return Err(Error::evaluation(format!("Cannot take the square root of {}", value)));
    }
    if value.is_zero() {
        return Ok(Decimal::zero());
    }
    let two = Decimal::from(2);
    let mut x = Decimal::from_f64(value.to_f64().sqrt())
        .ok()
        .filter(|guess| !guess.is_zero())
        .unwrap_or_else(|| value.clone())
        .with_scale(scale);
    for _ in 0..MAX_SQRT_ITERATIONS {
        let next = (&value.div_with_scale(&x, scale)? + &x).div_with_scale(&two, scale)?;
        if next == x {
            break;
        }
        x = next;
    }
    Ok(x.strip_trailing_zeros(0))
}
