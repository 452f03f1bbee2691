//! Custom test assertions
//!
//! Assertion helpers for domain types that give more meaningful failure
//! messages than bare assert_eq.

use rust_decimal::Decimal;

use core_kernel::Money;

/// Asserts that two Money values are equal, reporting both sides
pub fn assert_money_eq(actual: &Money, expected: &Money) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "Money amounts differ: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(money.is_zero(), "Expected zero money, got {money}");
}

/// Asserts that a Money value is strictly positive
pub fn assert_money_positive(money: &Money) {
    assert!(money.is_positive(), "Expected positive money, got {money}");
}

/// Asserts that money parts sum to a total
pub fn assert_money_sum_equals(parts: &[Money], total: &Money) {
    let sum = Money::sum(total.currency(), parts.iter()).expect("currency mismatch in sum");
    assert_eq!(
        sum.amount(),
        total.amount(),
        "Sum of parts ({}) does not equal total ({})",
        sum,
        total
    );
}

/// Asserts that a decimal is within an inclusive range
pub fn assert_decimal_in_range(value: Decimal, min: Decimal, max: Decimal) {
    assert!(
        value >= min && value <= max,
        "Decimal {value} is not in range [{min}, {max}]"
    );
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_assert_money_sum_equals() {
        let parts = vec![
            Money::new(dec!(33.34), Currency::USD),
            Money::new(dec!(33.33), Currency::USD),
            Money::new(dec!(33.33), Currency::USD),
        ];
        assert_money_sum_equals(&parts, &Money::new(dec!(100.00), Currency::USD));
    }

    #[test]
    #[should_panic(expected = "Expected positive money")]
    fn test_assert_money_positive_fails_for_zero() {
        assert_money_positive(&Money::zero(Currency::USD));
    }
}
