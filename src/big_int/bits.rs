// SPDX-License-Identifier: MPL-2.0
//! twos-complement view over magnitude buffers, backing the signed bitwise
//! operators. The view only ever lives in scratch memory; values stay
//! sign+magnitude.
use super::digits::{widening_shr, Digit, DigitBuf, DIGIT_BITS};
use super::signed::{BigInt, Sign};
use super::unsigned::BigInt as BigUInt;

/// in-place twos-complement: negate the lowest nonzero digit, complement
/// everything above it. Applying it twice gives the input back.
pub(super) fn twos_complement_digits(buf: &mut [Digit]) {
    let Some(first_nonzero) = buf.iter().position(|&digit| digit != 0) else {
        return;
    };
    buf[first_nonzero] = buf[first_nonzero].wrapping_neg();
    for digit in &mut buf[first_nonzero + 1..] {
        *digit = !*digit;
    }
}

/// twos-complement encoding of `value` over `width` digits; the zero padding
/// turns into the sign extension for negative values
fn encode(value: &BigInt, width: usize) -> DigitBuf {
    debug_assert!(width >= value.digit_len());
    let mut buf = DigitBuf::zeroed(width);
    for (place, digit) in buf.as_mut_slice().iter_mut().zip(value.abs().le_digits()) {
        *place = digit;
    }
    if value.is_negative() {
        twos_complement_digits(buf.as_mut_slice());
    }
    buf
}

fn decode_vec(mut digits: Vec<Digit>, negative: bool) -> BigInt {
    if negative {
        twos_complement_digits(&mut digits);
    }
    let magnitude = BigUInt::from_vec(digits);
    if negative {
        magnitude.with_sign(Sign::Negative)
    } else {
        magnitude.into()
    }
}

/// sign-extend both operands to a common width (plus a guard digit for the
/// carries a twos-complement magnitude can need), combine digit-wise, read
/// the result back. The sign rule is the operator applied to the two signs.
fn bitop(
    lhs: &BigInt,
    rhs: &BigInt,
    op: impl Fn(Digit, Digit) -> Digit,
    negative: bool,
) -> BigInt {
    let width = lhs.digit_len().max(rhs.digit_len()) + 1;
    let lhs_buf = encode(lhs, width);
    let rhs_buf = encode(rhs, width);
    let mut out = DigitBuf::zeroed(width);
    for i in 0..width {
        out[i] = op(lhs_buf[i], rhs_buf[i]);
    }
    decode_vec(out.into_vec(), negative)
}

pub(super) fn and(lhs: &BigInt, rhs: &BigInt) -> BigInt {
    if !lhs.is_negative() && !rhs.is_negative() {
        return BigUInt::bitand(lhs.abs(), rhs.abs())
            .expect_owned("no mut given")
            .into();
    }
    bitop(lhs, rhs, |a, b| a & b, lhs.is_negative() & rhs.is_negative())
}
pub(super) fn or(lhs: &BigInt, rhs: &BigInt) -> BigInt {
    if !lhs.is_negative() && !rhs.is_negative() {
        return BigUInt::bitor(lhs.abs(), rhs.abs())
            .expect_owned("no mut given")
            .into();
    }
    bitop(lhs, rhs, |a, b| a | b, lhs.is_negative() | rhs.is_negative())
}
pub(super) fn xor(lhs: &BigInt, rhs: &BigInt) -> BigInt {
    if !lhs.is_negative() && !rhs.is_negative() {
        return BigUInt::bitxor(lhs.abs(), rhs.abs())
            .expect_owned("no mut given")
            .into();
    }
    bitop(lhs, rhs, |a, b| a ^ b, lhs.is_negative() ^ rhs.is_negative())
}

/// logical right shift of the twos-complement encoding at the value's own
/// digit width, zero filled from the top
pub(super) fn unsigned_shr(value: &BigInt, shift: usize) -> BigInt {
    if shift == 0 || !value.is_negative() {
        return value.clone() >> shift;
    }
    let width = value.digit_len();
    if shift >= width * DIGIT_BITS {
        return BigInt::ZERO;
    }
    let buf = encode(value, width);
    let full = shift / DIGIT_BITS;
    let partial = shift % DIGIT_BITS;
    let mut kept: Vec<Digit> = buf.as_slice()[full..].to_vec();
    if partial > 0 {
        let mut carry = 0;
        for digit in kept.iter_mut().rev() {
            (carry, *digit) = widening_shr(*digit, partial, carry);
        }
    }
    // the top is zero filled, so the result reads as a plain magnitude
    BigUInt::from_vec(kept).into()
}

fn rotate(value: &BigInt, left_amount: i128) -> BigInt {
    let width = value.digit_len();
    if width == 0 {
        return BigInt::ZERO;
    }
    let width_bits = width * DIGIT_BITS;
    let amount = left_amount.rem_euclid(width_bits as i128) as usize;
    if amount == 0 {
        return value.clone();
    }
    let buf = encode(value, width);
    let full = amount / DIGIT_BITS;
    let partial = amount % DIGIT_BITS;
    let mut out = vec![0; width];
    for (i, &digit) in buf.as_slice().iter().enumerate() {
        let j = (i + full) % width;
        if partial == 0 {
            out[j] |= digit;
        } else {
            out[j] |= digit << partial;
            out[(j + 1) % width] |= digit >> (DIGIT_BITS - partial);
        }
    }
    // the rotated top bit decides the sign of the reinterpreted value
    let negative = out[width - 1] >> (DIGIT_BITS - 1) == 1;
    decode_vec(out, negative)
}
pub(super) fn rotate_left(value: &BigInt, amount: isize) -> BigInt {
    rotate(value, amount as i128)
}
pub(super) fn rotate_right(value: &BigInt, amount: isize) -> BigInt {
    rotate(value, -(amount as i128))
}

/// bits of the shortest twos-complement representation without the sign bit;
/// `-2^n` fits in `n` magnitude bits
pub(super) fn bit_length(value: &BigInt) -> usize {
    let magnitude_bits = value.abs().bit_len();
    if value.is_negative() && value.abs().is_power_of_two() {
        magnitude_bits - 1
    } else {
        magnitude_bits
    }
}
pub(super) fn count_ones(value: &BigInt) -> usize {
    if !value.is_negative() {
        return value.abs().count_ones();
    }
    // popcount of the twos-complement encoding at the value's digit width
    let mut ones = 0;
    let mut seen_nonzero = false;
    for digit in value.abs().le_digits() {
        if seen_nonzero {
            ones += (!digit).count_ones() as usize;
        } else if digit != 0 {
            seen_nonzero = true;
            ones += digit.wrapping_neg().count_ones() as usize;
        }
    }
    ones
}
pub(super) fn leading_zeros(value: &BigInt) -> usize {
    if value.is_negative() {
        return 0;
    }
    if value.is_zero() {
        return DIGIT_BITS;
    }
    value.digit_len() * DIGIT_BITS - value.abs().bit_len()
}
pub(super) fn trailing_zeros(value: &BigInt) -> usize {
    value.abs().trailing_zeros().unwrap_or(DIGIT_BITS)
}
