use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("Math error - overflow")]
    Overflow,
    #[error("Math error - underflow")]
    Underflow,
    #[error("Math error - division by zero")]
    DivisionByZero,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    #[error("State error - sqrtPrice out of bounds")]
    SqrtPriceOutOfBounds,
    #[error("State error - sqrtPrice is 0")]
    SqrtPriceIsZero,
    #[error("State error - sqrtRatio is 0")]
    SqrtRatioIsZero,

    #[error("State error - liquidity is 0")]
    LiquidityIsZero,

    #[error("State error - requested amount exceeds pool reserves")]
    InsufficientReserves,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SwapError {
    #[error("Swap error - amount specified is 0")]
    AmountSpecifiedIsZero,
    #[error("Swap error - sqrtPrice limit out of bounds")]
    SqrtPriceLimitOutOfBounds,
    #[error("Swap error - fee of {0} pips is out of range")]
    FeeOutOfRange(u32),
    #[error("Swap error - more than one liquidity boundary at the same price")]
    DuplicateBoundary,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] crate::error::MathError),

    #[error(transparent)]
    StateError(#[from] crate::error::StateError),

    #[error(transparent)]
    SwapError(#[from] crate::error::SwapError),
}
