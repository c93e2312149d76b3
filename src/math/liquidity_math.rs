use crate::error::MathError;

/// Applies a signed liquidity change, as happens when a swap crosses a
/// liquidity boundary.
pub fn add_delta(x: u128, y: i128) -> Result<u128, MathError> {
    if y < 0 {
        x.checked_sub(y.unsigned_abs()).ok_or(MathError::Underflow)
    } else {
        x.checked_add(y.unsigned_abs()).ok_or(MathError::Overflow)
    }
}
