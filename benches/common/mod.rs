#![allow(dead_code)]

use clmm_swap_step::math::full_math::{mul_div, mul_div_rounding_up};
use clmm_swap_step::math::sqrt_price_math::{
    get_amount_0_delta, get_amount_1_delta, get_next_sqrt_price_from_input,
    get_next_sqrt_price_from_output,
};
use clmm_swap_step::pool::swap::{SwapParams, default_sqrt_price_limit};
use clmm_swap_step::{I256, LiquidityBoundary, Q96, SegmentPool, U256, compute_swap_step};
use criterion::{Criterion, black_box};

const LIQUIDITY: u128 = 1_000_000_000_000_000_000;

fn scaled(numerator: u8, denominator: u8) -> U256 {
    Q96 * U256::from(numerator) / U256::from(denominator)
}

pub fn bench_full_math(c: &mut Criterion) {
    let a = U256::from(LIQUIDITY) << 96;
    let b = scaled(11, 10);
    let denominator = scaled(9, 10);

    c.bench_function("mul_div", |bench| {
        bench.iter(|| mul_div(black_box(a), black_box(b), black_box(denominator)))
    });
    c.bench_function("mul_div_rounding_up", |bench| {
        bench.iter(|| mul_div_rounding_up(black_box(a), black_box(b), black_box(denominator)))
    });
    c.bench_function("mul_div_wide", |bench| {
        bench.iter(|| mul_div(black_box(U256::MAX), black_box(b), black_box(U256::MAX)))
    });
}

pub fn bench_sqrt_price_math(c: &mut Criterion) {
    let lower = scaled(9, 10);
    let upper = scaled(11, 10);
    let amount = U256::from(100_000_000_000_000_000u128);

    c.bench_function("get_amount_0_delta", |bench| {
        bench.iter(|| get_amount_0_delta(black_box(lower), black_box(upper), LIQUIDITY, true))
    });
    c.bench_function("get_amount_1_delta", |bench| {
        bench.iter(|| get_amount_1_delta(black_box(lower), black_box(upper), LIQUIDITY, true))
    });
    c.bench_function("get_next_sqrt_price_from_input", |bench| {
        bench.iter(|| {
            get_next_sqrt_price_from_input(black_box(Q96), LIQUIDITY, black_box(amount), true)
        })
    });
    c.bench_function("get_next_sqrt_price_from_output", |bench| {
        bench.iter(|| {
            get_next_sqrt_price_from_output(black_box(Q96), LIQUIDITY, black_box(amount), false)
        })
    });
}

pub fn bench_swap_math(c: &mut Criterion) {
    let amount = I256::try_from(100_000_000_000_000_000i128).unwrap();
    let target_down = Q96 >> 1;
    let target_up = Q96 << 1;
    let target_near = scaled(99, 100);

    c.bench_function("compute_swap_step_exact_in_partial", |bench| {
        bench.iter(|| {
            compute_swap_step(
                black_box(Q96),
                black_box(target_down),
                LIQUIDITY,
                black_box(amount),
                3000,
            )
        })
    });
    c.bench_function("compute_swap_step_exact_in_reached", |bench| {
        bench.iter(|| {
            compute_swap_step(
                black_box(Q96),
                black_box(target_near),
                LIQUIDITY,
                black_box(amount),
                3000,
            )
        })
    });
    c.bench_function("compute_swap_step_exact_out_partial", |bench| {
        bench.iter(|| {
            compute_swap_step(
                black_box(Q96),
                black_box(target_up),
                LIQUIDITY,
                black_box(-amount),
                3000,
            )
        })
    });
}

// liquidity thins out by 1/40 at every percent away from Q96
pub fn bench_pool_swap(c: &mut Criterion) {
    let net = (LIQUIDITY / 40) as i128;
    let boundaries = (1..=20u8)
        .flat_map(|i| {
            [
                LiquidityBoundary::new(scaled(100 + i, 100), -net),
                LiquidityBoundary::new(scaled(100 - i, 100), net),
            ]
        })
        .collect();
    let pool = SegmentPool::new(Q96, LIQUIDITY, 3000, boundaries).expect("valid pool");
    let amount = I256::try_from(LIQUIDITY / 10).unwrap();

    c.bench_function("segment_pool_swap_zero_for_one", |bench| {
        let params = SwapParams::new(true, amount, default_sqrt_price_limit(true));
        bench.iter(|| pool.swap(black_box(params)))
    });
    c.bench_function("segment_pool_swap_one_for_zero", |bench| {
        let params = SwapParams::new(false, amount, default_sqrt_price_limit(false));
        bench.iter(|| pool.swap(black_box(params)))
    });
    c.bench_function("segment_pool_max_amount_in", |bench| {
        bench.iter(|| pool.max_amount_in(black_box(true)))
    });
}
