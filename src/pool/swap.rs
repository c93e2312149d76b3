use crate::error::{Error, MathError, SwapError};
use crate::math::full_math::{mul_div_rounding_up, unlikely};
use crate::math::liquidity_math::add_delta;
use crate::math::sqrt_price_math::{
    MAX_SQRT_RATIO, MIN_SQRT_RATIO, get_amount_0_delta, get_amount_1_delta,
};
use crate::math::swap_math::{SwapStep, compute_swap_step};
use crate::pool::segment_pool::{LiquidityBoundary, SegmentPool};
use crate::{MAX_FEE_PIPS, U256_E6};
use alloy_primitives::{I256, U256};
use tracing::{debug, trace};

/// The most permissive price limit for a swap direction: one unit inside
/// the representable price range.
#[inline]
pub fn default_sqrt_price_limit(zero_for_one: bool) -> U256 {
    if zero_for_one {
        MIN_SQRT_RATIO + U256::ONE
    } else {
        MAX_SQRT_RATIO - U256::ONE
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapParams {
    /// Swap direction: `true` for token0 → token1, `false` for token1 → token0.
    pub zero_for_one: bool,
    /// Signed amount being swapped. Positive means “exact in”, negative means “exact out”.
    pub amount_specified: I256,
    /// Sqrt‑price limit in Q96 that bounds how far the price is allowed to move.
    ///
    /// Use [`default_sqrt_price_limit`] to swap as far as liquidity allows.
    pub sqrt_price_limit_x96: U256,
}

impl SwapParams {
    #[inline]
    pub fn new(zero_for_one: bool, amount_specified: I256, sqrt_price_limit_x96: U256) -> Self {
        Self {
            zero_for_one,
            amount_specified,
            sqrt_price_limit_x96,
        }
    }
}

/// Outcome of a swap, from the pool's point of view: positive deltas are
/// paid into the pool, negative deltas are paid out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapResult {
    pub amount0_delta: I256,
    pub amount1_delta: I256,
    pub fees_paid: U256,
    /// Price the pool would be left at.
    pub sqrt_price_x96: U256,
    /// Liquidity active at the final price.
    pub liquidity: u128,
    /// Number of segments visited.
    pub steps: usize,
}

// running totals of the swap loop
struct SwapState {
    // the amount remaining to be swapped in/out of the input/output asset
    amount_specified_remaining: I256,
    // the amount already swapped out/in of the output/input asset
    amount_calculated: I256,
    sqrt_price_x96: U256,
    // the current liquidity in range
    liquidity: u128,
    swap_fee: U256,
    // index of the next boundary in the swap direction
    next_boundary: Option<usize>,
}

struct StepComputations {
    // the boundary ending the current segment, if any is left
    boundary: Option<(usize, LiquidityBoundary)>,
    // price the step may move to, already clamped by the limit
    sqrt_price_target_x96: U256,
}

impl SegmentPool {
    #[inline]
    fn step_computations(
        &self,
        next_boundary: Option<usize>,
        zero_for_one: bool,
        sqrt_price_limit_x96: U256,
    ) -> StepComputations {
        let boundary = next_boundary.map(|index| (index, self.boundary(index)));
        let sqrt_price_target_x96 = match boundary {
            Some((_, boundary)) if zero_for_one => {
                boundary.sqrt_price_x96.max(sqrt_price_limit_x96)
            }
            Some((_, boundary)) => boundary.sqrt_price_x96.min(sqrt_price_limit_x96),
            None => sqrt_price_limit_x96,
        };
        StepComputations {
            boundary,
            sqrt_price_target_x96,
        }
    }

    /// Applies the boundary's liquidity change if the price landed on it,
    /// returning the new liquidity and the next boundary index.
    #[inline]
    fn cross(
        &self,
        sqrt_price_x96: U256,
        liquidity: u128,
        next_boundary: Option<usize>,
        step: &StepComputations,
        zero_for_one: bool,
    ) -> Result<(u128, Option<usize>), Error> {
        match step.boundary {
            Some((index, boundary)) if sqrt_price_x96 == boundary.sqrt_price_x96 => {
                let liquidity_net = if zero_for_one {
                    boundary
                        .liquidity_net
                        .checked_neg()
                        .ok_or(MathError::Overflow)?
                } else {
                    boundary.liquidity_net
                };
                Ok((
                    add_delta(liquidity, liquidity_net)?,
                    self.next_boundary(index, zero_for_one),
                ))
            }
            _ => Ok((liquidity, next_boundary)),
        }
    }

    /// Simulates a swap against the pool without mutating it, returning
    /// signed token deltas, total fees charged and the final price.
    ///
    /// The swap walks segment by segment, calling [`compute_swap_step`] for
    /// each, until the specified amount is used up or the price reaches
    /// `sqrt_price_limit_x96`. Segments with no liquidity are skipped.
    pub fn swap(&self, params: SwapParams) -> Result<SwapResult, Error> {
        let amount_specified = params.amount_specified;
        if unlikely(amount_specified.is_zero()) {
            return Err(SwapError::AmountSpecifiedIsZero.into());
        }
        if unlikely(self.fee_pips >= MAX_FEE_PIPS) {
            return Err(SwapError::FeeOutOfRange(self.fee_pips).into());
        }

        let zero_for_one = params.zero_for_one;
        let sqrt_price_limit_x96 = params.sqrt_price_limit_x96;
        if zero_for_one {
            if unlikely(
                (sqrt_price_limit_x96 >= self.sqrt_price_x96)
                    || (sqrt_price_limit_x96 <= MIN_SQRT_RATIO),
            ) {
                return Err(SwapError::SqrtPriceLimitOutOfBounds.into());
            }
        } else if unlikely(
            (sqrt_price_limit_x96 <= self.sqrt_price_x96)
                || (sqrt_price_limit_x96 >= MAX_SQRT_RATIO),
        ) {
            return Err(SwapError::SqrtPriceLimitOutOfBounds.into());
        }

        let exact_input = amount_specified.is_positive();

        let mut state = SwapState {
            amount_specified_remaining: amount_specified,
            amount_calculated: I256::ZERO,
            sqrt_price_x96: self.sqrt_price_x96,
            liquidity: self.liquidity,
            swap_fee: U256::ZERO,
            next_boundary: self.first_boundary(self.sqrt_price_x96, zero_for_one),
        };
        let mut steps = 0usize;

        while !state.amount_specified_remaining.is_zero()
            && state.sqrt_price_x96 != sqrt_price_limit_x96
        {
            let computations =
                self.step_computations(state.next_boundary, zero_for_one, sqrt_price_limit_x96);

            let step = if state.liquidity == 0 {
                // nothing to trade against, move straight to the end of the segment
                SwapStep::inert(computations.sqrt_price_target_x96)
            } else {
                compute_swap_step(
                    state.sqrt_price_x96,
                    computations.sqrt_price_target_x96,
                    state.liquidity,
                    state.amount_specified_remaining,
                    self.fee_pips,
                )?
            };
            steps += 1;

            trace!(
                step = steps,
                sqrt_price_x96 = %state.sqrt_price_x96,
                sqrt_price_target_x96 = %computations.sqrt_price_target_x96,
                liquidity = state.liquidity,
                sqrt_price_next_x96 = %step.sqrt_price_next_x96,
                amount_in = %step.amount_in,
                amount_out = %step.amount_out,
                fee_amount = %step.fee_amount,
                "swap step"
            );

            state.sqrt_price_x96 = step.sqrt_price_next_x96;
            state.swap_fee += step.fee_amount;

            if exact_input {
                state.amount_specified_remaining -= I256::from_raw(step.amount_in_with_fee());
                state.amount_calculated -= I256::from_raw(step.amount_out);
            } else {
                state.amount_specified_remaining += I256::from_raw(step.amount_out);
                state.amount_calculated += I256::from_raw(step.amount_in_with_fee());
            }

            (state.liquidity, state.next_boundary) = self.cross(
                state.sqrt_price_x96,
                state.liquidity,
                state.next_boundary,
                &computations,
                zero_for_one,
            )?;
        }

        let (amount0_delta, amount1_delta) = if zero_for_one == exact_input {
            (
                amount_specified - state.amount_specified_remaining,
                state.amount_calculated,
            )
        } else {
            (
                state.amount_calculated,
                amount_specified - state.amount_specified_remaining,
            )
        };

        debug!(
            zero_for_one,
            exact_input,
            %amount0_delta,
            %amount1_delta,
            fees_paid = %state.swap_fee,
            sqrt_price_x96 = %state.sqrt_price_x96,
            steps,
            "swap simulated"
        );

        Ok(SwapResult {
            amount0_delta,
            amount1_delta,
            fees_paid: state.swap_fee,
            sqrt_price_x96: state.sqrt_price_x96,
            liquidity: state.liquidity,
            steps,
        })
    }

    /// Returns the input, fee included, needed to push the price in the
    /// given direction until the default price limit or until no liquidity
    /// is left anywhere ahead.
    ///
    /// Useful as an upper bound when searching for an optimal trade size.
    /// Saturates at `U256::MAX`.
    pub fn max_amount_in(&self, zero_for_one: bool) -> Result<U256, Error> {
        let sqrt_price_limit_x96 = default_sqrt_price_limit(zero_for_one);

        let mut sqrt_price_x96 = self.sqrt_price_x96;
        let mut liquidity = self.liquidity;
        let mut next_boundary = self.first_boundary(sqrt_price_x96, zero_for_one);
        let mut max_amount_in = U256::ZERO;

        while sqrt_price_x96 != sqrt_price_limit_x96 && (liquidity != 0 || next_boundary.is_some())
        {
            let computations =
                self.step_computations(next_boundary, zero_for_one, sqrt_price_limit_x96);
            let sqrt_price_next_x96 = computations.sqrt_price_target_x96;

            if liquidity != 0 {
                let amount_in = if zero_for_one {
                    get_amount_0_delta(sqrt_price_next_x96, sqrt_price_x96, liquidity, true)?
                } else {
                    get_amount_1_delta(sqrt_price_x96, sqrt_price_next_x96, liquidity, true)?
                };
                max_amount_in = max_amount_in.saturating_add(amount_in);
            }

            sqrt_price_x96 = sqrt_price_next_x96;
            (liquidity, next_boundary) = self.cross(
                sqrt_price_x96,
                liquidity,
                next_boundary,
                &computations,
                zero_for_one,
            )?;
        }

        let fee_complement = U256::from(MAX_FEE_PIPS.saturating_sub(self.fee_pips));
        Ok(mul_div_rounding_up(max_amount_in, U256_E6, fee_complement).unwrap_or(U256::MAX))
    }
}
