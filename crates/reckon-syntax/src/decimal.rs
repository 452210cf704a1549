//! Exact arbitrary-precision decimal numbers.
//!
//! A [`Decimal`] is `unscaled × 10^-scale` with an arbitrary precision
//! `dashu::integer::IBig` for the unscaled part. Addition, subtraction and
//! multiplication are exact, so `0.1 + 0.2` is exactly `0.3`. Division rounds
//! to [`DIV_PRECISION`] significant digits and then strips trailing zeros back
//! to the preferred scale (`scale(lhs) - scale(rhs)`), which keeps exact
//! quotients short: `1 / 4` is `0.25` and `6 / 2` is `3`.
//!
//! Rounding is always half away from zero.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use dashu::integer::IBig;

use crate::error::{Error, ErrorKind, Result};

/// Significant digits kept by [`Decimal::checked_div`] (decimal128 precision).
pub const DIV_PRECISION: u32 = 34;

/// An exact decimal number.
#[derive(Clone)]
pub struct Decimal {
    unscaled: IBig,
    scale: u32,
}

fn pow10(exp: u32) -> IBig {
    IBig::from(10u8).pow(exp as usize)
}

fn magnitude(value: &IBig) -> IBig {
    if *value < IBig::ZERO {
        -value
    } else {
        value.clone()
    }
}

fn scale_overflow() -> Error {
    Error::evaluation("Decimal scale out of range")
}

/// Moves `10^shift` onto the numerator (or `10^-shift` onto the denominator).
fn align_for_division(num: &IBig, den: &IBig, shift: i64) -> Result<(IBig, IBig)> {
    let factor = pow10(u32::try_from(shift.unsigned_abs()).map_err(|_| scale_overflow())?);
    if shift >= 0 {
        Ok((num * &factor, den.clone()))
    } else {
        Ok((num.clone(), den * &factor))
    }
}

fn digit_count(value: &IBig) -> u32 {
    magnitude(value).to_string().len() as u32
}

/// `n / d` rounded half away from zero. `d` must be nonzero.
fn div_half_up(n: &IBig, d: &IBig) -> IBig {
    let negative = (*n < IBig::ZERO) != (*d < IBig::ZERO);
    let (n, d) = (magnitude(n), magnitude(d));
    let mut q = &n / &d;
    let r = &n % &d;
    if r.clone() + r >= d {
        q = q + IBig::ONE;
    }
    if negative {
        -q
    } else {
        q
    }
}

impl Decimal {
    /// Creates `unscaled × 10^-scale`.
    #[must_use]
    pub fn new(unscaled: impl Into<IBig>, scale: u32) -> Self {
        Self {
            unscaled: unscaled.into(),
            scale,
        }
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::new(IBig::ZERO, 0)
    }

    #[must_use]
    pub fn one() -> Self {
        Self::new(IBig::ONE, 0)
    }

    /// `1` for `true`, `0` for `false`.
    #[must_use]
    pub fn from_bool(value: bool) -> Self {
        if value {
            Self::one()
        } else {
            Self::zero()
        }
    }

    /// Parses a hexadecimal literal such as `0x1F`.
    ///
    /// The two-character prefix is skipped and the rest is read as a base-16
    /// integer; sign handling is whatever integer parsing provides.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidNumber`] when the digits are not hexadecimal.
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = text
            .get(2..)
            .ok_or_else(|| Error::new(ErrorKind::InvalidNumber(text.to_string())))?;
        IBig::from_str_radix(digits, 16)
            .map(|v| Self::new(v, 0))
            .map_err(|_| Error::new(ErrorKind::InvalidNumber(text.to_string())))
    }

    /// Converts a finite `f64` through its shortest decimal rendering.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidNumber`] for NaN and infinities.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::new(ErrorKind::InvalidNumber(value.to_string())));
        }
        format!("{}", value).parse()
    }

    #[must_use]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    #[must_use]
    pub fn unscaled(&self) -> &IBig {
        &self.unscaled
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.unscaled == IBig::ZERO
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.unscaled < IBig::ZERO
    }

    /// True when there is no fractional part.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.scale == 0 || (&self.unscaled % &pow10(self.scale)) == IBig::ZERO
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(magnitude(&self.unscaled), self.scale)
    }

    /// Rescales to `scale` digits after the point, rounding half up when
    /// digits are dropped.
    #[must_use]
    pub fn with_scale(&self, scale: u32) -> Self {
        match scale.cmp(&self.scale) {
            Ordering::Equal => self.clone(),
            Ordering::Greater => Self::new(&self.unscaled * &pow10(scale - self.scale), scale),
            Ordering::Less => Self::new(
                div_half_up(&self.unscaled, &pow10(self.scale - scale)),
                scale,
            ),
        }
    }

    /// Rounds half up to `scale` fractional digits.
    #[must_use]
    pub fn round(&self, scale: u32) -> Self {
        if scale >= self.scale {
            self.clone()
        } else {
            self.with_scale(scale)
        }
    }

    /// Largest integer not greater than `self`.
    #[must_use]
    pub fn floor(&self) -> Self {
        let truncated = self.truncate();
        if self.is_negative() && !self.is_integer() {
            truncated - Self::one()
        } else {
            truncated
        }
    }

    /// Smallest integer not less than `self`.
    #[must_use]
    pub fn ceil(&self) -> Self {
        let truncated = self.truncate();
        if !self.is_negative() && !self.is_integer() {
            truncated + Self::one()
        } else {
            truncated
        }
    }

    fn truncate(&self) -> Self {
        if self.scale == 0 {
            return self.clone();
        }
        let negative = self.is_negative();
        let q = magnitude(&self.unscaled) / pow10(self.scale);
        Self::new(if negative { -q } else { q }, 0)
    }

    /// Removes trailing fractional zeros, never going below `min_scale`.
    #[must_use]
    pub fn strip_trailing_zeros(&self, min_scale: u32) -> Self {
        let ten = IBig::from(10u8);
        let mut unscaled = self.unscaled.clone();
        let mut scale = self.scale;
        while scale > min_scale && unscaled != IBig::ZERO && (&unscaled % &ten) == IBig::ZERO {
            unscaled = unscaled / &ten;
            scale -= 1;
        }
        if unscaled == IBig::ZERO {
            scale = scale.min(min_scale);
        }
        Self::new(unscaled, scale)
    }

    /// Rounds to at most `precision` significant digits.
    #[must_use]
    pub fn round_to_precision(&self, precision: u32) -> Self {
        let digits = digit_count(&self.unscaled);
        if digits <= precision {
            return self.clone();
        }
        let drop = digits - precision;
        if drop <= self.scale {
            self.with_scale(self.scale - drop)
        } else {
            // Integer part alone exceeds the precision: keep magnitude, zero the tail.
            let rounded = div_half_up(&self.unscaled, &pow10(drop));
            Self::new(rounded * pow10(drop - self.scale), 0)
        }
    }

    /// Divides, rounding to [`DIV_PRECISION`] significant digits.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DivisionByZero`] when `rhs` is zero.
    pub fn checked_div(&self, rhs: &Decimal) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::new(ErrorKind::DivisionByZero));
        }
        let preferred = (i64::from(self.scale) - i64::from(rhs.scale)).max(0) as u32;
        if self.is_zero() {
            return Ok(Self::new(IBig::ZERO, preferred));
        }
        let int_digits_lhs = i64::from(digit_count(&self.unscaled)) - i64::from(self.scale);
        let int_digits_rhs = i64::from(digit_count(&rhs.unscaled)) - i64::from(rhs.scale);
        // Enough fractional digits for one guard digit past the precision.
        let target = (int_digits_rhs - int_digits_lhs + i64::from(DIV_PRECISION) + 2).max(i64::from(preferred));
        let target = u32::try_from(target.max(0)).map_err(|_| scale_overflow())?;

        let shift = i64::from(target) + i64::from(rhs.scale) - i64::from(self.scale);
        let (num, den) = align_for_division(&self.unscaled, &rhs.unscaled, shift)?;
        let negative = (num < IBig::ZERO) != (den < IBig::ZERO);
        let truncated = magnitude(&num) / magnitude(&den);
        let quotient = Self::new(if negative { -truncated } else { truncated }, target);

        Ok(quotient
            .round_to_precision(DIV_PRECISION)
            .strip_trailing_zeros(preferred))
    }

    /// Divides with a fixed result scale, rounding half up.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DivisionByZero`] when `rhs` is zero.
    pub fn div_with_scale(&self, rhs: &Decimal, scale: u32) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::new(ErrorKind::DivisionByZero));
        }
        // self / rhs = (u1 / u2) * 10^(s2 - s1); want unscaled at `scale`.
        let shift = i64::from(scale) + i64::from(rhs.scale) - i64::from(self.scale);
        let (num, den) = align_for_division(&self.unscaled, &rhs.unscaled, shift)?;
        Ok(Self::new(div_half_up(&num, &den), scale))
    }

    /// Exact product.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Evaluation`] when the combined scale does not fit a `u32`.
    pub fn checked_mul(&self, rhs: &Decimal) -> Result<Self> {
        let scale = self.scale.checked_add(rhs.scale).ok_or_else(scale_overflow)?;
        Ok(Self::new(&self.unscaled * &rhs.unscaled, scale))
    }

    /// Raises to an integer power. Negative exponents divide.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DivisionByZero`] for `0` raised to a negative power,
    /// and [`ErrorKind::Evaluation`] when the result scale does not fit a `u32`.
    pub fn pow(&self, exp: i64) -> Result<Self> {
        let n = u32::try_from(exp.unsigned_abs()).map_err(|_| scale_overflow())?;
        let scale = self.scale.checked_mul(n).ok_or_else(scale_overflow)?;
        let positive = Self::new(self.unscaled.pow(n as usize), scale);
        if exp >= 0 {
            Ok(positive)
        } else {
            Self::one().checked_div(&positive)
        }
    }

    /// The value as an `i64` when it is an integer in range.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        self.truncate().unscaled.try_into().ok()
    }

    /// Lossy conversion for functions with no exact decimal form (`ln`, `log`).
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    fn aligned(&self, other: &Decimal) -> (IBig, IBig, u32) {
        let scale = self.scale.max(other.scale);
        (
            self.with_scale(scale).unscaled,
            other.with_scale(scale).unscaled,
            scale,
        )
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for Decimal {
    type Err = Error;

    /// Accepts `[+-]digits[.digits][(e|E)[+-]digits]`.
    fn from_str(text: &str) -> Result<Self> {
        let invalid = || Error::new(ErrorKind::InvalidNumber(text.to_string()));
        let (mantissa, exponent) = match text.find(['e', 'E']) {
            Some(i) => (&text[..i], text[i + 1..].parse::<i64>().map_err(|_| invalid())?),
            None => (text, 0),
        };
        let (negative, body) = match mantissa.as_bytes().first() {
            Some(b'-') => (true, &mantissa[1..]),
            Some(b'+') => (false, &mantissa[1..]),
            _ => (false, mantissa),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let digits = format!("{}{}", int_part, frac_part);
        let mut unscaled = IBig::from_str_radix(&digits, 10).map_err(|_| invalid())?;
        if negative {
            unscaled = -unscaled;
        }
        let scale = i64::try_from(frac_part.len())
            .ok()
            .and_then(|len| len.checked_sub(exponent))
            .ok_or_else(invalid)?;
        let shift = u32::try_from(scale.unsigned_abs()).map_err(|_| invalid())?;
        if scale >= 0 {
            Ok(Self::new(unscaled, shift))
        } else {
            Ok(Self::new(unscaled * pow10(shift), 0))
        }
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b, _) = self.aligned(other);
        a.cmp(&b)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = magnitude(&self.unscaled).to_string();
        let sign = if self.is_negative() { "-" } else { "" };
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{}{}", sign, digits);
        }
        if digits.len() <= scale {
            write!(f, "{}0.{}{}", sign, "0".repeat(scale - digits.len()), digits)
        } else {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{}{}.{}", sign, int_part, frac_part)
        }
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({})", self)
    }
}

impl Add for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: Self) -> Decimal {
        let (a, b, scale) = self.aligned(rhs);
        Decimal::new(a + b, scale)
    }
}

impl Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Self) -> Decimal {
        &self + &rhs
    }
}

impl Sub for &Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Self) -> Decimal {
        let (a, b, scale) = self.aligned(rhs);
        Decimal::new(a - b, scale)
    }
}

impl Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Self) -> Decimal {
        &self - &rhs
    }
}

impl Mul for &Decimal {
    type Output = Decimal;

    /// # Panics
    ///
    /// Panics when the combined scale overflows a `u32`. Use
    /// [`Decimal::checked_mul`] on untrusted operands.
    fn mul(self, rhs: Self) -> Decimal {
        match self.checked_mul(rhs) {
            Ok(product) => product,
            Err(_) => panic!("decimal scale overflow in multiplication"),
        }
    }
}

impl Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Self) -> Decimal {
        &self * &rhs
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-self.unscaled, self.scale)
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-&self.unscaled, self.scale)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::new(IBig::from(value), 0)
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::new(IBig::from(value), 0)
    }
}

impl From<IBig> for Decimal {
    fn from(value: IBig) -> Self {
        Self::new(value, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_exact_addition() {
        assert_eq!((d("0.1") + d("0.2")).to_string(), "0.3");
        assert_eq!((d("99") + d("0.01")).to_string(), "99.01");
        assert_eq!((d("1.50") + d("1")).to_string(), "2.50");
    }

    #[test]
    fn test_subtraction_and_negation() {
        assert_eq!((d("1") - d("2.5")).to_string(), "-1.5");
        assert_eq!((-d("0.05")).to_string(), "-0.05");
    }

    #[test]
    fn test_multiplication_scale() {
        assert_eq!((d("1.5") * d("0.2")).to_string(), "0.30");
        assert_eq!((d("-3") * d("4")).to_string(), "-12");
    }

    #[test]
    fn test_division() {
        assert_eq!(d("1").checked_div(&d("4")).unwrap().to_string(), "0.25");
        assert_eq!(d("6").checked_div(&d("2")).unwrap().to_string(), "3");
        assert_eq!(
            d("1").checked_div(&d("3")).unwrap().to_string(),
            "0.3333333333333333333333333333333333"
        );
        assert_eq!(
            d("2").checked_div(&d("3")).unwrap().to_string(),
            "0.6666666666666666666666666666666667"
        );
        assert_eq!(d("-7.5").checked_div(&d("2.5")).unwrap().to_string(), "-3");
    }

    #[test]
    fn test_division_by_zero() {
        let err = d("1").checked_div(&d("0.0")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
    }

    #[test]
    fn test_numeric_equality_ignores_scale() {
        assert_eq!(d("2.0"), d("2"));
        assert!(d("2.01") > d("2"));
        assert!(d("-1") < d("0.5"));
    }

    #[test]
    fn test_hex_literal() {
        assert_eq!(Decimal::from_hex("0xFF").unwrap(), Decimal::from(255));
        assert_eq!(Decimal::from_hex("0x1f").unwrap(), Decimal::from(31));
        assert!(Decimal::from_hex("0xZZ").is_err());
    }

    #[test]
    fn test_rounding() {
        assert_eq!(d("2.5").round(0).to_string(), "3");
        assert_eq!(d("-2.5").round(0).to_string(), "-3");
        assert_eq!(d("1.2345").round(2).to_string(), "1.23");
        assert_eq!(d("1.5").floor().to_string(), "1");
        assert_eq!(d("-1.5").floor().to_string(), "-2");
        assert_eq!(d("1.2").ceil().to_string(), "2");
        assert_eq!(d("-1.2").ceil().to_string(), "-1");
    }

    #[test]
    fn test_pow() {
        assert_eq!(d("2").pow(10).unwrap().to_string(), "1024");
        assert_eq!(d("0.5").pow(2).unwrap().to_string(), "0.25");
        assert_eq!(d("2").pow(-2).unwrap().to_string(), "0.25");
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(d("1e3").to_string(), "1000");
        assert_eq!(d("1.5E-2").to_string(), "0.015");
        assert_eq!(d(".5").to_string(), "0.5");
        assert!("abc".parse::<Decimal>().is_err());
        assert!("".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_parse_rejects_unrepresentable_exponents() {
        for text in ["1e-4294967296", "1e4294967296", "1e-9223372036854775808"] {
            let err = text.parse::<Decimal>().unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidNumber(text.to_string()));
        }
        assert_eq!(d("1e-4294967295").scale(), u32::MAX);
    }

    #[test]
    fn test_scale_overflow_is_an_error() {
        let tiny = d("0.00001");
        assert!(matches!(tiny.pow(999_999_999).unwrap_err().kind, ErrorKind::Evaluation(_)));
        assert!(matches!(tiny.pow(-999_999_999).unwrap_err().kind, ErrorKind::Evaluation(_)));
        let huge_scale = d("1e-4294967295");
        assert!(matches!(huge_scale.checked_mul(&tiny).unwrap_err().kind, ErrorKind::Evaluation(_)));
        assert_eq!(d("0.5").checked_mul(&d("0.5")).unwrap().to_string(), "0.25");
    }

    #[test]
    fn test_integer_conversion() {
        assert_eq!(d("42.00").to_i64(), Some(42));
        assert_eq!(d("42.5").to_i64(), None);
        assert_eq!(Decimal::from_f64(0.25).unwrap().to_string(), "0.25");
    }
}
