//! Overflow-safe arithmetic helpers for price and settlement calculations.
//!
//! All functions use checked arithmetic and return a `ContractError` on
//! overflow/underflow/div-by-zero. Rounding helpers expect a non-negative
//! numerator and a positive denominator.

use bond_errors::ContractError;

/// Checked `u64` addition.
#[inline]
pub fn add_u64(a: u64, b: u64) -> Result<u64, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

/// Checked `i128` addition.
#[inline]
pub fn add_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

/// Checked `i128` subtraction.
#[inline]
pub fn sub_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::Underflow)
}

/// Checked `i128` multiplication.
#[inline]
pub fn mul_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_mul(b).ok_or(ContractError::Overflow)
}

/// Checked `i128` division, truncating toward zero.
#[inline]
pub fn div_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    if b == 0 {
        return Err(ContractError::DivisionByZero);
    }
    a.checked_div(b).ok_or(ContractError::Overflow)
}

/// `ceil(a / b)`.
pub fn ceil_div(a: i128, b: i128) -> Result<i128, ContractError> {
    let q = div_i128(a, b)?;
    if a % b != 0 {
        add_i128(q, 1)
    } else {
        Ok(q)
    }
}

/// `round(a / b)` with ties away from zero.
pub fn round_div(a: i128, b: i128) -> Result<i128, ContractError> {
    let q = div_i128(a, b)?;
    let r = a % b;
    if r >= b - r {
        add_i128(q, 1)
    } else {
        Ok(q)
    }
}

/// `10^decimals` as the base-unit scale of one whole unit.
pub fn unit_scale(decimals: u32) -> Result<i128, ContractError> {
    10_i128
        .checked_pow(decimals)
        .ok_or(ContractError::InvalidDecimals)
}
