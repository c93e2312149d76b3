use crate::error::MathError;
use alloy_primitives::{U256, U512};

const U256_MAX_WIDE: U512 = U512::from_limbs([
    u64::MAX,
    u64::MAX,
    u64::MAX,
    u64::MAX,
    0,
    0,
    0,
    0,
]);

#[inline(always)]
#[cold]
fn cold_path() {}

/// Branch hint for error paths that are almost never taken.
#[inline(always)]
pub(crate) fn unlikely(b: bool) -> bool {
    if b {
        cold_path();
    }
    b
}

/// Narrows a 512‑bit quotient back to 256 bits, failing if any of the
/// upper limbs are set.
#[inline(always)]
fn narrow(wide: U512) -> Result<U256, MathError> {
    if unlikely(wide > U256_MAX_WIDE) {
        return Err(MathError::Overflow);
    }
    let limbs = wide.as_limbs();
    Ok(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// Computes `floor(a * b / denominator)` with full precision.
///
/// The product is formed in 512 bits, so it never overflows even when
/// `a * b` exceeds `U256::MAX`. Only the final quotient has to fit in
/// 256 bits, otherwise `MathError::Overflow` is returned. This is the
/// Rust counterpart of Solidity's `FullMath.mulDiv`.
#[inline(always)]
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if unlikely(denominator.is_zero()) {
        return Err(MathError::DivisionByZero);
    }

    if let Some(product) = a.checked_mul(b) {
        return Ok(product / denominator);
    }

    let product = U512::from(a) * U512::from(b);
    narrow(product / U512::from(denominator))
}

/// Like [`mul_div`], but rounds the result up when there is a
/// non‑zero remainder, returning an overflow error if the result
/// would exceed `U256::MAX`.
#[inline(always)]
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if unlikely(denominator.is_zero()) {
        return Err(MathError::DivisionByZero);
    }

    let (quotient, remainder) = match a.checked_mul(b) {
        Some(product) => product.div_rem(denominator),
        None => {
            let (quotient, remainder) =
                (U512::from(a) * U512::from(b)).div_rem(U512::from(denominator));
            (narrow(quotient)?, narrow(remainder)?)
        }
    };

    if remainder.is_zero() {
        Ok(quotient)
    } else {
        quotient.checked_add(U256::ONE).ok_or(MathError::Overflow)
    }
}

/// Divides `a` by `b`, rounding the result up to the next integer
/// when there is a non‑zero remainder.
pub fn div_rounding_up(a: U256, b: U256) -> Result<U256, MathError> {
    if unlikely(b.is_zero()) {
        return Err(MathError::DivisionByZero);
    }
    let (quotient, remainder) = a.div_rem(b);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        // quotient < U256::MAX whenever b > 1, and b == 1 never leaves a remainder
        Ok(quotient + U256::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    // ------------------------- mul_div tests -------------------------

    #[test]
    fn mul_div_simple_division() {
        let result = mul_div(U256::from(10u8), U256::from(20u8), U256::from(5u8)).unwrap();
        assert_eq!(result, U256::from(40u8));
    }

    #[test]
    fn mul_div_division_by_zero() {
        let result = mul_div(U256::from(10u8), U256::from(20u8), U256::ZERO);
        assert!(matches!(result, Err(MathError::DivisionByZero)));
    }

    #[test]
    fn mul_div_rounds_down() {
        // 7 * 10 / 8 = 8.75
        let result = mul_div(U256::from(7u8), U256::from(10u8), U256::from(8u8)).unwrap();
        assert_eq!(result, U256::from(8u8));
    }

    #[test]
    fn mul_div_phantom_overflow() {
        // (2^256 - 1) * (2^256 - 1) / (2^256 - 1) = 2^256 - 1
        assert_eq!(mul_div(U256::MAX, U256::MAX, U256::MAX).unwrap(), U256::MAX);

        // Q128 * 35 * Q128 / (8 * Q128) = 4.375 * Q128
        let q128 = U256::ONE << 128;
        let result = mul_div(q128, U256::from(35u8) * q128, U256::from(8u8) * q128).unwrap();
        assert_eq!(result, U256::from(4375u32) * q128 / U256::from(1000u32));
    }

    #[test]
    fn mul_div_phantom_overflow_repeating_decimal() {
        // Q128 * 1000 * Q128 / (3000 * Q128) = Q128 / 3, floored
        let q128 = U256::ONE << 128;
        let result = mul_div(q128, U256::from(1000u32) * q128, U256::from(3000u32) * q128).unwrap();
        assert_eq!(
            result,
            U256::from_str("113427455640312821154458202477256070485").unwrap()
        );
    }

    #[test]
    fn mul_div_result_overflow() {
        // (2^256 - 1) * 2 / 1 does not fit in 256 bits
        let result = mul_div(U256::MAX, U256::from(2u8), U256::ONE);
        assert!(matches!(result, Err(MathError::Overflow)));

        let result = mul_div(U256::MAX, U256::MAX, U256::MAX - U256::ONE);
        assert!(matches!(result, Err(MathError::Overflow)));
    }

    // ------------------------- mul_div_rounding_up tests -------------------------

    #[test]
    fn mul_div_rounding_up_exact_division() {
        let result =
            mul_div_rounding_up(U256::from(20u8), U256::from(10u8), U256::from(5u8)).unwrap();
        assert_eq!(result, U256::from(40u8));
    }

    #[test]
    fn mul_div_rounding_up_non_exact() {
        // 7 * 10 / 3 = 23.33.., rounded up to 24
        let result =
            mul_div_rounding_up(U256::from(7u8), U256::from(10u8), U256::from(3u8)).unwrap();
        assert_eq!(result, U256::from(24u8));
    }

    #[test]
    fn mul_div_rounding_up_phantom_overflow_repeating_decimal() {
        let q128 = U256::ONE << 128;
        let result =
            mul_div_rounding_up(q128, U256::from(1000u32) * q128, U256::from(3000u32) * q128)
                .unwrap();
        assert_eq!(
            result,
            U256::from_str("113427455640312821154458202477256070486").unwrap()
        );
    }

    #[test]
    fn mul_div_rounding_up_division_by_zero() {
        let result = mul_div_rounding_up(U256::from(10u8), U256::from(20u8), U256::ZERO);
        assert!(matches!(result, Err(MathError::DivisionByZero)));
    }

    #[test]
    fn mul_div_rounding_up_overflows_when_rounding_past_max() {
        // floor is exactly U256::MAX but there is a remainder
        let result = mul_div_rounding_up(
            U256::from(535006138814359u64),
            U256::from_str(
                "432862656469423142931042426214547535783388063929571229938474969",
            )
            .unwrap(),
            U256::from(2u8),
        );
        assert!(matches!(result, Err(MathError::Overflow)));
    }

    #[test]
    fn mul_div_rounding_up_propagates_overflow() {
        let result = mul_div_rounding_up(U256::MAX, U256::from(2u8), U256::ONE);
        assert!(matches!(result, Err(MathError::Overflow)));
    }

    // ------------------------- div_rounding_up tests -------------------------

    #[test]
    fn div_rounding_up_exact_division() {
        assert_eq!(
            div_rounding_up(U256::from(10u8), U256::from(5u8)).unwrap(),
            U256::from(2u8)
        );
    }

    #[test]
    fn div_rounding_up_non_exact() {
        assert_eq!(
            div_rounding_up(U256::from(10u8), U256::from(3u8)).unwrap(),
            U256::from(4u8)
        );
        assert_eq!(
            div_rounding_up(U256::MAX, U256::MAX - U256::ONE).unwrap(),
            U256::from(2u8)
        );
    }

    #[test]
    fn div_rounding_up_division_by_zero() {
        let result = div_rounding_up(U256::from(10u8), U256::ZERO);
        assert!(matches!(result, Err(MathError::DivisionByZero)));
    }
}
