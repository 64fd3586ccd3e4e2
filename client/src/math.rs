//! Integer math capability
//!
//! All monetary and share quantities are integers in smallest units, and
//! fractional results floor. The arithmetic strategy is picked once at
//! startup and injected into the client: `WideMath` widens through u128,
//! `SafeMath` bounds every value so results stay exactly representable in an
//! IEEE-754 double.

/// Largest integer exactly representable in a double (2^53 - 1)
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

pub trait IntegerMath: Send + Sync {
    /// `a * b`, or `None` if the product is unrepresentable
    fn checked_mul(&self, a: u64, b: u64) -> Option<u64>;

    /// `floor(a * b / divisor)`, or `None` on overflow or a zero divisor
    fn mul_div_floor(&self, a: u64, b: u64, divisor: u64) -> Option<u64>;
}

/// Full-width arithmetic with u128 intermediates
pub struct WideMath;

impl IntegerMath for WideMath {
    fn checked_mul(&self, a: u64, b: u64) -> Option<u64> {
        u64::try_from(a as u128 * b as u128).ok()
    }

    fn mul_div_floor(&self, a: u64, b: u64, divisor: u64) -> Option<u64> {
        if divisor == 0 {
            return None;
        }
        u64::try_from(a as u128 * b as u128 / divisor as u128).ok()
    }
}

/// Bounded arithmetic that refuses anything a double could not hold exactly
pub struct SafeMath;

impl SafeMath {
    fn in_range(value: u64) -> Option<u64> {
        (value <= MAX_SAFE_INTEGER).then_some(value)
    }
}

impl IntegerMath for SafeMath {
    fn checked_mul(&self, a: u64, b: u64) -> Option<u64> {
        Self::in_range(a)?;
        Self::in_range(b)?;
        a.checked_mul(b).and_then(Self::in_range)
    }

    fn mul_div_floor(&self, a: u64, b: u64, divisor: u64) -> Option<u64> {
        if divisor == 0 {
            return None;
        }
        let product = self.checked_mul(a, b)?;
        Some(product / divisor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_implementations_floor_identically_in_range() {
        let wide = WideMath;
        let safe = SafeMath;

        for (a, b, d) in [(10, 10, 3), (999_999, 250, 10_000), (1, 1, 2), (7, 0, 5)] {
            assert_eq!(wide.mul_div_floor(a, b, d), safe.mul_div_floor(a, b, d));
        }
        assert_eq!(wide.mul_div_floor(10, 10, 3), Some(33));
    }

    #[test]
    fn zero_divisor_is_rejected() {
        assert_eq!(WideMath.mul_div_floor(1, 1, 0), None);
        assert_eq!(SafeMath.mul_div_floor(1, 1, 0), None);
    }

    #[test]
    fn wide_math_accepts_what_safe_math_refuses() {
        let big = MAX_SAFE_INTEGER + 1;

        assert_eq!(SafeMath.checked_mul(big, 1), None);
        assert_eq!(WideMath.checked_mul(big, 1), Some(big));

        assert_eq!(SafeMath.mul_div_floor(u64::MAX, u64::MAX, u64::MAX), None);
        assert_eq!(
            WideMath.mul_div_floor(u64::MAX, u64::MAX, u64::MAX),
            Some(u64::MAX)
        );
    }

    #[test]
    fn overflow_is_none_not_wraparound() {
        assert_eq!(WideMath.checked_mul(u64::MAX, 2), None);
        assert_eq!(SafeMath.checked_mul(u64::MAX, 2), None);
    }
}
