//! Property-based tests for exact decimal arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::Decimal;

    // Strategy for decimals with up to four fractional digits
    fn small_decimal() -> impl Strategy<Value = Decimal> {
        (-100_000i64..100_000i64, 0u32..5).prop_map(|(u, s)| Decimal::new(u, s))
    }

    fn non_zero_decimal() -> impl Strategy<Value = Decimal> {
        small_decimal().prop_filter("non-zero", |d| !d.is_zero())
    }

    proptest! {
        #[test]
        fn add_then_sub_is_identity(a in small_decimal(), b in small_decimal()) {
            prop_assert_eq!(&(&a + &b) - &b, a);
        }

        #[test]
        fn add_commutative(a in small_decimal(), b in small_decimal()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn mul_distributes_over_add(a in small_decimal(), b in small_decimal(), c in small_decimal()) {
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn display_parses_back(a in small_decimal()) {
            let text = a.to_string();
            let parsed: Decimal = text.parse().unwrap();
            prop_assert_eq!(parsed.scale(), a.scale());
            prop_assert_eq!(parsed, a);
        }

        #[test]
        fn exact_division_recovers_factor(a in small_decimal(), b in non_zero_decimal()) {
            let product = &a * &b;
            prop_assert_eq!(product.checked_div(&b).unwrap(), a);
        }

        #[test]
        fn floor_never_exceeds_ceil(a in small_decimal()) {
            prop_assert!(a.floor() <= a);
            prop_assert!(a <= a.ceil());
        }
    }
}
