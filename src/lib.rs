//! Uniswap V3–style swap step math in pure Rust.
//!
//! This crate exposes:
//! - The swap step calculator ([`compute_swap_step`]), which prices one
//!   segment of a swap between the current price and the next boundary.
//! - The fixed‑point primitives it is built on (`math::*`): full‑precision
//!   multiply‑divide and the sqrt‑price / token‑amount conversions.
//! - A small in‑memory [`SegmentPool`] that strings steps together across
//!   liquidity boundaries, mostly useful for quoting and testing.
//!
//! # Examples
//!
//! ## A single step
//! ```
//! use clmm_swap_step::{compute_swap_step, I256, Q96, U256};
//!
//! // Sell 0.1 token0 (exact input) at a 0.3% fee, price may fall at most to half.
//! let step = compute_swap_step(
//!     Q96,
//!     Q96 >> 1,
//!     1_000_000_000_000_000_000u128,
//!     I256::from_raw(U256::from(100_000_000_000_000_000u128)),
//!     3000,
//! )
//! .unwrap();
//!
//! assert!(step.sqrt_price_next_x96 < Q96);
//! assert_eq!(step.amount_in_with_fee(), U256::from(100_000_000_000_000_000u128));
//! ```
//!
//! ## Swapping across boundaries
//! ```
//! use clmm_swap_step::{
//!     pool::swap::{SwapParams, default_sqrt_price_limit},
//!     I256, LiquidityBoundary, Q96, SegmentPool, U256,
//! };
//!
//! let upper = Q96 * U256::from(11u8) / U256::from(10u8);
//! let pool = SegmentPool::new(
//!     Q96,
//!     1_000_000_000_000_000_000u128,
//!     3000,
//!     vec![LiquidityBoundary::new(upper, -1_000_000_000_000_000_000i128)],
//! )
//! .unwrap();
//!
//! let params = SwapParams::new(
//!     false,
//!     I256::from_raw(U256::from(10_000_000_000_000_000u128)),
//!     default_sqrt_price_limit(false),
//! );
//! let result = pool.swap(params).unwrap();
//! println!("amount0: {}, amount1: {}", result.amount0_delta, result.amount1_delta);
//! ```

pub use alloy_primitives::{I256, U256};

pub mod error;
pub mod math;
pub mod pool;

pub use math::swap_math::{SwapStep, compute_swap_step};
pub use pool::segment_pool::{LiquidityBoundary, SegmentPool};

const U160_MAX: U256 = U256::from_limbs([u64::MAX, u64::MAX, 4294967295, 0]);
const U256_E6: U256 = U256::from_limbs([1000000, 0, 0, 0]);

/// Fee denominator: fees are expressed in hundredths of a basis point.
pub const MAX_FEE_PIPS: u32 = 1_000_000;

pub const RESOLUTION: u8 = 96;
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);
