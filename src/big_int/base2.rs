// SPDX-License-Identifier: MPL-2.0
//! hex and binary strings with twos-complement semantics: the leading
//! character's high bit carries the sign, negative values are emitted and
//! read as their minimal twos-complement digit run.
use super::bits::twos_complement_digits;
use super::digits::{Digit, DigitBuf, DIGIT_BITS};
use super::signed::{BigInt, Sign};
use super::unsigned::BigInt as BigUInt;
use super::ParseBigIntError;

/// formats with `bits_per_char` bits per character (4 for hex, 1 for binary)
pub(super) fn format_pow2(value: &BigInt, bits_per_char: usize) -> String {
    debug_assert!(matches!(bits_per_char, 1 | 4));
    if value.is_zero() {
        return "0".to_owned();
    }
    let negative = value.is_negative();
    let mask = (1 << bits_per_char) - 1;
    let high_bit = 1 << (bits_per_char - 1);

    // a guard digit keeps a clear top character for positives and an all-ones
    // one for negatives
    let width = value.digit_len() + 1;
    let mut buf = DigitBuf::zeroed(width);
    for (place, digit) in buf.as_mut_slice().iter_mut().zip(value.abs().le_digits()) {
        *place = digit;
    }
    if negative {
        twos_complement_digits(buf.as_mut_slice());
    }

    let chars_per_digit = DIGIT_BITS / bits_per_char;
    // least significant character first
    let mut chars: Vec<u32> = (0..width * chars_per_digit)
        .map(|i| {
            buf[i / chars_per_digit] >> ((i % chars_per_digit) * bits_per_char) & mask
        })
        .collect();

    // strip redundant sign fill, keeping the leading character's high bit
    // truthful
    let fill = if negative { mask } else { 0 };
    while chars.len() > 1 {
        let top = *chars.last().expect("len > 1");
        let next = chars[chars.len() - 2];
        if top == fill && (next & high_bit != 0) == negative {
            chars.pop();
        } else {
            break;
        }
    }

    chars
        .iter()
        .rev()
        .map(|&c| char::from_digit(c, 1 << bits_per_char).expect("char values are masked"))
        .collect()
}

/// parses with `bits_per_char` bits per character, sign-extending the
/// unaligned leading block when the top character's high bit is set
pub(super) fn parse_pow2(text: &str, bits_per_char: usize) -> Result<BigInt, ParseBigIntError> {
    debug_assert!(matches!(bits_per_char, 1 | 4));
    if text.is_empty() {
        return Err(ParseBigIntError::Empty);
    }
    let radix = 1u32 << bits_per_char;
    let char_count = text.chars().count();
    let chars_per_digit = DIGIT_BITS / bits_per_char;

    let mut digits = vec![0; char_count.div_ceil(chars_per_digit)];
    let mut negative = false;
    for (i, c) in text.chars().rev().enumerate() {
        let position = char_count - 1 - i;
        let value = c.to_digit(radix).ok_or(ParseBigIntError::InvalidDigit {
            digit: c,
            position,
        })?;
        digits[i / chars_per_digit] |= (value as Digit) << ((i % chars_per_digit) * bits_per_char);
        if position == 0 {
            negative = value >> (bits_per_char - 1) & 1 == 1;
        }
    }

    if negative {
        // fill the bits above the leading character with sign
        let top_bits = ((char_count - 1) % chars_per_digit + 1) * bits_per_char;
        if top_bits < DIGIT_BITS {
            let last = digits.len() - 1;
            digits[last] |= !0 << top_bits;
        }
        twos_complement_digits(&mut digits);
        Ok(BigUInt::from_vec(digits).with_sign(Sign::Negative))
    } else {
        Ok(BigUInt::from_vec(digits).into())
    }
}
