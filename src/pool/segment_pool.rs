use crate::MAX_FEE_PIPS;
use crate::error::{Error, StateError, SwapError};
use crate::math::sqrt_price_math::{MAX_SQRT_RATIO, MIN_SQRT_RATIO};
use alloy_primitives::U256;

/// A price at which the active liquidity changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiquidityBoundary {
    pub sqrt_price_x96: U256,
    /// Added to the active liquidity when the price crosses this boundary
    /// upward, subtracted when it crosses downward.
    pub liquidity_net: i128,
}

impl LiquidityBoundary {
    #[inline]
    pub const fn new(sqrt_price_x96: U256, liquidity_net: i128) -> Self {
        Self {
            sqrt_price_x96,
            liquidity_net,
        }
    }
}

/// In-memory pool made of contiguous liquidity segments.
///
/// Between two neighbouring boundaries the active liquidity is constant,
/// so a swap is a sequence of [`compute_swap_step`] calls, one per segment.
///
/// [`compute_swap_step`]: crate::compute_swap_step
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentPool {
    pub fee_pips: u32,
    pub sqrt_price_x96: U256,
    /// Liquidity active at `sqrt_price_x96`.
    pub liquidity: u128,
    boundaries: Vec<LiquidityBoundary>,
}

#[inline(always)]
fn is_valid_sqrt_price(sqrt_price_x96: U256) -> bool {
    sqrt_price_x96 >= MIN_SQRT_RATIO && sqrt_price_x96 < MAX_SQRT_RATIO
}

impl SegmentPool {
    /// Builds a pool at `sqrt_price_x96` with `liquidity` active and the
    /// given boundaries, in any order.
    ///
    /// A boundary sitting exactly at the current price counts as below it:
    /// it has already been crossed upward, and a swap moving down crosses
    /// it first.
    pub fn new(
        sqrt_price_x96: U256,
        liquidity: u128,
        fee_pips: u32,
        mut boundaries: Vec<LiquidityBoundary>,
    ) -> Result<Self, Error> {
        if fee_pips >= MAX_FEE_PIPS {
            return Err(SwapError::FeeOutOfRange(fee_pips).into());
        }
        if !is_valid_sqrt_price(sqrt_price_x96)
            || boundaries
                .iter()
                .any(|boundary| !is_valid_sqrt_price(boundary.sqrt_price_x96))
        {
            return Err(StateError::SqrtPriceOutOfBounds.into());
        }

        boundaries.sort_unstable_by_key(|boundary| boundary.sqrt_price_x96);
        if boundaries
            .windows(2)
            .any(|pair| pair[0].sqrt_price_x96 == pair[1].sqrt_price_x96)
        {
            return Err(SwapError::DuplicateBoundary.into());
        }

        Ok(Self {
            fee_pips,
            sqrt_price_x96,
            liquidity,
            boundaries,
        })
    }

    /// Boundaries sorted by ascending price.
    #[inline]
    pub fn boundaries(&self) -> &[LiquidityBoundary] {
        &self.boundaries
    }

    /// Returns the net liquidity delta at a boundary price, if one exists.
    pub fn get_liquidity_net(&self, sqrt_price_x96: U256) -> Option<i128> {
        self.boundaries
            .binary_search_by_key(&sqrt_price_x96, |boundary| boundary.sqrt_price_x96)
            .ok()
            .map(|index| self.boundaries[index].liquidity_net)
    }

    /// Index of the first boundary a swap starting at `sqrt_price_x96`
    /// meets in the given direction.
    pub(crate) fn first_boundary(&self, sqrt_price_x96: U256, zero_for_one: bool) -> Option<usize> {
        let at_or_below = self
            .boundaries
            .partition_point(|boundary| boundary.sqrt_price_x96 <= sqrt_price_x96);
        if zero_for_one {
            at_or_below.checked_sub(1)
        } else {
            (at_or_below < self.boundaries.len()).then_some(at_or_below)
        }
    }

    /// Index of the boundary after `index` in the given direction.
    #[inline]
    pub(crate) fn next_boundary(&self, index: usize, zero_for_one: bool) -> Option<usize> {
        if zero_for_one {
            index.checked_sub(1)
        } else {
            let next = index + 1;
            (next < self.boundaries.len()).then_some(next)
        }
    }

    #[inline]
    pub(crate) fn boundary(&self, index: usize) -> LiquidityBoundary {
        self.boundaries[index]
    }
}
