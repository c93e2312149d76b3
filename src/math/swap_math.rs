use crate::error::{Error, MathError};
use crate::math::full_math::{mul_div, mul_div_rounding_up, unlikely};
use crate::math::sqrt_price_math::{
    get_amount_0_delta, get_amount_1_delta, get_next_sqrt_price_from_input,
    get_next_sqrt_price_from_output,
};
use crate::{MAX_FEE_PIPS, U256_E6};
use alloy_primitives::{I256, U256};
use tracing::trace;

/// Outcome of swapping within a single liquidity segment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapStep {
    /// The price after the step, never past the target price.
    pub sqrt_price_next_x96: U256,
    /// Input consumed to move the price, excluding the fee.
    pub amount_in: U256,
    /// Output paid out by the pool.
    pub amount_out: U256,
    /// Input retained as fee.
    pub fee_amount: U256,
}

impl SwapStep {
    /// A step that moves no tokens and leaves the price unchanged.
    #[inline]
    pub const fn inert(sqrt_price_x96: U256) -> Self {
        Self {
            sqrt_price_next_x96: sqrt_price_x96,
            amount_in: U256::ZERO,
            amount_out: U256::ZERO,
            fee_amount: U256::ZERO,
        }
    }

    /// Total input charged to the trader for this step.
    #[inline]
    pub fn amount_in_with_fee(&self) -> U256 {
        self.amount_in.saturating_add(self.fee_amount)
    }

    /// Whether the step stopped exactly on `sqrt_ratio_target_x96`.
    #[inline]
    pub fn reached(&self, sqrt_ratio_target_x96: U256) -> bool {
        self.sqrt_price_next_x96 == sqrt_ratio_target_x96
    }
}

/// Computes the result of swapping some amount in, or amount out, within
/// one liquidity segment.
///
/// # Arguments
///
/// * `sqrt_ratio_current_x96` - The current sqrt price (Q64.96).
/// * `sqrt_ratio_target_x96` - The price that cannot be exceeded. The swap
///   direction is inferred from it: price falls (`zero_for_one`) when
///   `current >= target`, rises otherwise.
/// * `liquidity` - The usable liquidity between the two prices.
/// * `amount_remaining` - Positive for exact input (input left to spend),
///   negative for exact output (output left to receive).
/// * `fee_pips` - Fee taken from the input, in hundredths of a bip. Must be
///   below `1_000_000`.
///
/// # Invariants
///
/// * The next price lies between the current and target prices inclusive.
/// * Exact input: `amount_in + fee_amount <= amount_remaining`, with equality
///   whenever the target is not reached (the unspendable remainder is kept
///   as fee).
/// * Exact output: `amount_out <= |amount_remaining|`.
/// * Amounts are always recomputed from the realized price move, rounded up
///   for what the pool receives and down for what it pays out.
///
/// With zero liquidity the step is inert: price unchanged, all amounts zero.
pub fn compute_swap_step(
    sqrt_ratio_current_x96: U256,
    sqrt_ratio_target_x96: U256,
    liquidity: u128,
    amount_remaining: I256,
    fee_pips: u32,
) -> Result<SwapStep, Error> {
    if unlikely(liquidity == 0) {
        trace!(sqrt_price = %sqrt_ratio_current_x96, "segment has no liquidity, step is inert");
        return Ok(SwapStep::inert(sqrt_ratio_current_x96));
    }

    let zero_for_one = sqrt_ratio_current_x96 >= sqrt_ratio_target_x96;
    let exact_in = !amount_remaining.is_negative();
    let amount_remaining_abs = amount_remaining.unsigned_abs();

    let fee = U256::from(fee_pips);
    let fee_complement = U256::from(MAX_FEE_PIPS.saturating_sub(fee_pips));

    let mut amount_in = U256::ZERO;
    let mut amount_out = U256::ZERO;

    let sqrt_ratio_next_x96 = if exact_in {
        let amount_remaining_less_fee = mul_div(amount_remaining_abs, fee_complement, U256_E6)?;

        amount_in = if zero_for_one {
            get_amount_0_delta(
                sqrt_ratio_target_x96,
                sqrt_ratio_current_x96,
                liquidity,
                true,
            )?
        } else {
            get_amount_1_delta(
                sqrt_ratio_current_x96,
                sqrt_ratio_target_x96,
                liquidity,
                true,
            )?
        };

        if amount_remaining_less_fee >= amount_in {
            sqrt_ratio_target_x96
        } else {
            get_next_sqrt_price_from_input(
                sqrt_ratio_current_x96,
                liquidity,
                amount_remaining_less_fee,
                zero_for_one,
            )?
        }
    } else {
        amount_out = if zero_for_one {
            get_amount_1_delta(
                sqrt_ratio_target_x96,
                sqrt_ratio_current_x96,
                liquidity,
                false,
            )?
        } else {
            get_amount_0_delta(
                sqrt_ratio_current_x96,
                sqrt_ratio_target_x96,
                liquidity,
                false,
            )?
        };

        if amount_remaining_abs >= amount_out {
            sqrt_ratio_target_x96
        } else {
            get_next_sqrt_price_from_output(
                sqrt_ratio_current_x96,
                liquidity,
                amount_remaining_abs,
                zero_for_one,
            )?
        }
    };

    let max = sqrt_ratio_next_x96 == sqrt_ratio_target_x96;

    // the boundary estimate is only reused when the target was hit in the matching mode
    if zero_for_one {
        if !(max && exact_in) {
            amount_in = get_amount_0_delta(
                sqrt_ratio_next_x96,
                sqrt_ratio_current_x96,
                liquidity,
                true,
            )?;
        }
        if !(max && !exact_in) {
            amount_out = get_amount_1_delta(
                sqrt_ratio_next_x96,
                sqrt_ratio_current_x96,
                liquidity,
                false,
            )?;
        }
    } else {
        if !(max && exact_in) {
            amount_in = get_amount_1_delta(
                sqrt_ratio_current_x96,
                sqrt_ratio_next_x96,
                liquidity,
                true,
            )?;
        }
        if !(max && !exact_in) {
            amount_out = get_amount_0_delta(
                sqrt_ratio_current_x96,
                sqrt_ratio_next_x96,
                liquidity,
                false,
            )?;
        }
    }

    // cap the output at the requested amount
    if !exact_in && amount_out > amount_remaining_abs {
        amount_out = amount_remaining_abs;
    }

    let fee_amount = if exact_in && !max {
        // the target was not reached, so the remainder is taken as fee
        amount_remaining_abs
            .checked_sub(amount_in)
            .ok_or(MathError::Underflow)?
    } else {
        mul_div_rounding_up(amount_in, fee, fee_complement)?
    };

    Ok(SwapStep {
        sqrt_price_next_x96: sqrt_ratio_next_x96,
        amount_in,
        amount_out,
        fee_amount,
    })
}
