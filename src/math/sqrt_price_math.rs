use crate::math::full_math::{div_rounding_up, mul_div, mul_div_rounding_up, unlikely};
use crate::{
    Q96, RESOLUTION, U160_MAX,
    error::{Error, MathError, StateError},
};
use alloy_primitives::U256;

/// Lowest sqrt price representable by the pool (the price at tick -887272).
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
/// Highest sqrt price representable by the pool (the price at tick 887272).
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([6743328256752651558, 17280870778742802505, 4294805859, 0]);

/// Computes the next sqrt price after adding or removing `amount` of
/// token0, rounding the resulting price up.
///
/// Rounding up keeps the price from moving too far when token0 is added
/// (price falls) and makes removal move it at least far enough.
pub fn get_next_sqrt_price_from_amount_0_rounding_up(
    sqrt_p_x96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256, Error> {
    if amount.is_zero() {
        return Ok(sqrt_p_x96);
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION;

    if add {
        if let Some(denominator) = amount
            .checked_mul(sqrt_p_x96)
            .and_then(|product| numerator1.checked_add(product))
        {
            return Ok(mul_div_rounding_up(numerator1, sqrt_p_x96, denominator)?);
        }
        // liquidity / (liquidity / price + amount), loses precision but cannot overflow
        let denominator = (numerator1 / sqrt_p_x96)
            .checked_add(amount)
            .ok_or(MathError::Overflow)?;
        Ok(div_rounding_up(numerator1, denominator)?)
    } else {
        let product = amount
            .checked_mul(sqrt_p_x96)
            .filter(|product| numerator1 > *product)
            .ok_or(StateError::InsufficientReserves)?;
        let next = mul_div_rounding_up(numerator1, sqrt_p_x96, numerator1 - product)?;
        if unlikely(next > U160_MAX) {
            return Err(MathError::Overflow.into());
        }
        Ok(next)
    }
}

/// Computes the next sqrt price after adding or removing `amount` of
/// token1, rounding the resulting price down.
pub fn get_next_sqrt_price_from_amount_1_rounding_down(
    sqrt_p_x96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256, Error> {
    let liquidity = U256::from(liquidity);

    if add {
        let quotient = if amount <= U160_MAX {
            (amount << RESOLUTION)
                .checked_div(liquidity)
                .ok_or(MathError::DivisionByZero)?
        } else {
            mul_div(amount, Q96, liquidity)?
        };

        sqrt_p_x96
            .checked_add(quotient)
            .filter(|next| *next <= U160_MAX)
            .ok_or_else(|| MathError::Overflow.into())
    } else {
        let quotient = if amount <= U160_MAX {
            div_rounding_up(amount << RESOLUTION, liquidity)?
        } else {
            mul_div_rounding_up(amount, Q96, liquidity)?
        };

        if sqrt_p_x96 <= quotient {
            return Err(StateError::InsufficientReserves.into());
        }
        Ok(sqrt_p_x96 - quotient)
    }
}

/// Amount of token0 between two sqrt prices for the given liquidity:
/// `liquidity * (sqrt_b - sqrt_a) / (sqrt_a * sqrt_b)`.
///
/// The prices may be passed in either order. Rounding up yields the
/// amount the pool must receive, rounding down the amount it may pay out.
pub fn get_amount_0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, Error> {
    let (sqrt_ratio_lower_x96, sqrt_ratio_upper_x96) = if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    };

    if unlikely(sqrt_ratio_lower_x96.is_zero()) {
        return Err(StateError::SqrtRatioIsZero.into());
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let numerator2 = sqrt_ratio_upper_x96 - sqrt_ratio_lower_x96;

    if round_up {
        Ok(div_rounding_up(
            mul_div_rounding_up(numerator1, numerator2, sqrt_ratio_upper_x96)?,
            sqrt_ratio_lower_x96,
        )?)
    } else {
        Ok(mul_div(numerator1, numerator2, sqrt_ratio_upper_x96)? / sqrt_ratio_lower_x96)
    }
}

/// Amount of token1 between two sqrt prices for the given liquidity:
/// `liquidity * (sqrt_b - sqrt_a)`.
pub fn get_amount_1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, MathError> {
    let spread = sqrt_ratio_a_x96.abs_diff(sqrt_ratio_b_x96);
    let liquidity = U256::from(liquidity);

    if round_up {
        mul_div_rounding_up(liquidity, spread, Q96)
    } else {
        mul_div(liquidity, spread, Q96)
    }
}

/// Computes the next sqrt price when `amount_in` of the input token is
/// swapped into the pool. `zero_for_one` selects token0 (price falls)
/// or token1 (price rises) as the input.
///
/// The result never overshoots the price that `amount_in` can exactly pay for.
pub fn get_next_sqrt_price_from_input(
    sqrt_p_x96: U256,
    liquidity: u128,
    amount_in: U256,
    zero_for_one: bool,
) -> Result<U256, Error> {
    if unlikely(sqrt_p_x96.is_zero()) {
        return Err(StateError::SqrtPriceIsZero.into());
    }
    if unlikely(liquidity == 0) {
        return Err(StateError::LiquidityIsZero.into());
    }

    if zero_for_one {
        get_next_sqrt_price_from_amount_0_rounding_up(sqrt_p_x96, liquidity, amount_in, true)
    } else {
        get_next_sqrt_price_from_amount_1_rounding_down(sqrt_p_x96, liquidity, amount_in, true)
    }
}

/// Computes the next sqrt price when `amount_out` of the output token
/// is taken out of the pool. `zero_for_one` means token1 is the output.
///
/// The result moves the price at least far enough to pay `amount_out`.
pub fn get_next_sqrt_price_from_output(
    sqrt_p_x96: U256,
    liquidity: u128,
    amount_out: U256,
    zero_for_one: bool,
) -> Result<U256, Error> {
    if unlikely(sqrt_p_x96.is_zero()) {
        return Err(StateError::SqrtPriceIsZero.into());
    }
    if unlikely(liquidity == 0) {
        return Err(StateError::LiquidityIsZero.into());
    }

    if zero_for_one {
        get_next_sqrt_price_from_amount_1_rounding_down(sqrt_p_x96, liquidity, amount_out, false)
    } else {
        get_next_sqrt_price_from_amount_0_rounding_up(sqrt_p_x96, liquidity, amount_out, false)
    }
}
