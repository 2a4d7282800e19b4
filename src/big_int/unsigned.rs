// SPDX-License-Identifier: MPL-2.0
use crate::{
    big_int::{
        digits::{Digit, DigitVec, DIGIT_BITS, DIGIT_BYTES, MAX_DIGITS},
        math_shortcuts::MathShortcut,
        ArithmeticError, ParseBigIntError,
    },
    util::boo::{Boo, Moo},
    BigIInt, Sign, SigNum,
};

use itertools::Itertools;
use rand::RngCore;
use std::{
    iter,
    ops::{
        Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
        DivAssign, Mul, MulAssign, RangeInclusive, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign,
        Sub, SubAssign,
    },
    str::FromStr,
};

use super::digits::widening_shl;
use super::{base10, math_algos, math_shortcuts};

/// an unsigned arbitrary-precision integer: the magnitude half of
/// [`BigIInt`]
#[derive(Clone, Default, Hash, PartialEq, Eq)]
pub struct BigInt {
    /// holds the digits in LE order, most-significant digit never zero
    pub(super) digits: DigitVec,
}

impl std::fmt::Debug for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Number {{ ")?;
        self.inner_debug(f)?;
        write!(f, "}}")
    }
}
impl std::fmt::Display for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(true, "", &base10::to_decimal_string(self))
    }
}
impl std::fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(true, if f.alternate() { "0x" } else { "" }, &self.hex_digits(false))
    }
}
impl std::fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(true, if f.alternate() { "0X" } else { "" }, &self.hex_digits(true))
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        math_algos::compare_slices(self.digits.as_slice(), other.digits.as_slice())
    }
}

impl From<BigIInt> for BigInt {
    fn from(value: BigIInt) -> Self {
        value.into_abs()
    }
}
macro_rules! implFromUnsigned {
    ($($prim:ty),*) => {$(
        impl From<$prim> for BigInt {
            fn from(value: $prim) -> Self {
                let mut value = value as u128;
                let mut digits = DigitVec::new();
                while value != 0 {
                    digits.push(value as Digit);
                    value >>= DIGIT_BITS;
                }
                Self { digits }
            }
        }
    )*};
}
implFromUnsigned!(u8, u16, u32, u64, u128, usize);

impl FromStr for BigInt {
    type Err = ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        base10::parse_decimal(s.as_bytes())
    }
}

#[cfg(feature = "base64")]
cfg_if::cfg_if! {
    if #[cfg(target_endian = "little")] {
        fn magnitude_bytes(digits: &DigitVec) -> std::borrow::Cow<'_, [u8]> {
            // SAFETY: digits are plain numbers, reading their bytes is fine
            std::borrow::Cow::Borrowed(unsafe {
                std::slice::from_raw_parts(
                    digits.as_slice().as_ptr().cast(),
                    digits.len() * DIGIT_BYTES,
                )
            })
        }
    } else {
        /// needs to newly allocate on big endian systems
        fn magnitude_bytes(digits: &DigitVec) -> std::borrow::Cow<'_, [u8]> {
            std::borrow::Cow::Owned(
                digits.iter().flat_map(|digit| digit.to_le_bytes()).collect(),
            )
        }
    }
}

trait TieBreaker {
    /// picks which of two read-only operands is cloned into the accumulator
    fn decide<'b>(lhs: Boo<'b, BigInt>, rhs: Boo<'b, BigInt>) -> (BigInt, Boo<'b, BigInt>);
}
struct TieSmaller;
impl TieBreaker for TieSmaller {
    fn decide<'b>(lhs: Boo<'b, BigInt>, rhs: Boo<'b, BigInt>) -> (BigInt, Boo<'b, BigInt>) {
        if *lhs <= *rhs {
            (lhs.cloned(), rhs)
        } else {
            (rhs.cloned(), lhs)
        }
    }
}
struct TieBigger;
impl TieBreaker for TieBigger {
    fn decide<'b>(lhs: Boo<'b, BigInt>, rhs: Boo<'b, BigInt>) -> (BigInt, Boo<'b, BigInt>) {
        if *lhs > *rhs {
            (lhs.cloned(), rhs)
        } else {
            (rhs.cloned(), lhs)
        }
    }
}

impl BigInt {
    pub const ZERO: Self = Self {
        digits: DigitVec::new(),
    };
    pub const ONE: Self = Self {
        digits: DigitVec::from_single(1),
    };

    // construction
    pub fn with_sign(self, sign: Sign) -> BigIInt {
        BigIInt::new(sign, self)
    }
    /// generate a new random number with at least `bytes.start()` and at most
    /// `bytes.end()` bytes of information
    /// # Example
    /// `0x00_0100` <= `BigInt::new_random(2..=3, _)` <= `0xff_ffff`,
    pub fn new_random(bytes: RangeInclusive<usize>, mut rng: impl RngCore) -> Self {
        assert!(*bytes.start() > 0, "need at least one byte");
        let bytes = bytes.start()
            + crate::util::rng::next_bound(*bytes.end() - *bytes.start(), &mut rng, 10);
        let mut rnd_bytes = crate::util::rng::random_bytes(rng);
        let last = rnd_bytes
            .by_ref()
            .take(5) // cap the number of tries
            .find(|&it| it > 0)
            .expect("only zeros found");
        Self::from_le_bytes(rnd_bytes.take(bytes - 1).chain(iter::once(last)))
    }
    pub fn from_digit(value: Digit) -> Self {
        Self {
            digits: DigitVec::from_digit(value),
        }
    }
    /// builds from digits in little endian order
    pub fn from_le_digits(digits: impl IntoIterator<Item = Digit>) -> Self {
        Self {
            digits: digits.into_iter().collect(),
        }
    }
    pub(crate) fn from_vec(digits: Vec<Digit>) -> Self {
        Self {
            digits: DigitVec::from_vec(digits),
        }
    }

    /// builds from little endian bytes, the magnitude counterpart of
    /// [`BigIInt::from_signed_bytes_le`]
    pub fn from_le_bytes(bytes: impl IntoIterator<Item = u8>) -> Self {
        let chunks = bytes.into_iter().chunks(DIGIT_BYTES);
        let digits: DigitVec = chunks
            .into_iter()
            .map(|chunk| {
                let mut buf = [0; DIGIT_BYTES];
                for (place, byte) in buf.iter_mut().zip(chunk) {
                    *place = byte;
                }
                Digit::from_le_bytes(buf)
            })
            .collect();
        Self { digits }
    }
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        Self::from_le_bytes(bytes.iter().rev().copied())
    }
    /// minimal little endian byte run of the magnitude; zero is `[0]`
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut out: Vec<u8> = self
            .digits
            .iter()
            .flat_map(|digit| digit.to_le_bytes())
            .collect();
        while out.last() == Some(&0) {
            out.pop();
        }
        if out.is_empty() {
            out.push(0);
        }
        out
    }
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let mut out = self.to_le_bytes();
        out.reverse();
        out
    }

    #[cfg(feature = "base64")]
    pub fn as_base64(&self, engine: &impl base64::Engine) -> String {
        engine.encode(magnitude_bytes(&self.digits))
    }
    #[cfg(feature = "base64")]
    pub fn from_base64(
        data: impl AsRef<[u8]>,
        engine: &impl base64::Engine,
    ) -> Result<Self, base64::DecodeError> {
        engine.decode(data).map(Self::from_le_bytes)
    }

    // inner utils
    pub(super) fn truncate_leading_zeros(&mut self) {
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
    }
    pub(super) fn push(&mut self, value: Digit) {
        if value == 0 {
            return;
        }
        self.digits.push(value);
    }
    #[cfg(debug_assertions)]
    pub(super) fn assert_canonical(&self) {
        assert!(
            self.digits.last().map_or(true, |&digit| digit != 0),
            "canonical form violated: leading zero digit in {:?}",
            self.digits
        );
    }
    #[cfg(not(debug_assertions))]
    pub(super) fn assert_canonical(&self) {}

    pub(super) fn inner_debug(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x[")?;
        for (pos, elem) in self.digits.iter().rev().with_position() {
            write!(f, "{elem:0size$x}", size = DIGIT_BYTES * 2)?;
            if matches!(
                pos,
                itertools::Position::First | itertools::Position::Middle
            ) {
                f.write_str(", ")?;
            }
        }
        write!(f, "]")
    }
    fn hex_digits(&self, upper: bool) -> String {
        use std::fmt::Write;
        let mut buf = String::new();
        for (pos, digit) in self.digits.iter().rev().with_position() {
            let first = matches!(pos, itertools::Position::First | itertools::Position::Only);
            match (first, upper) {
                (true, false) => write!(buf, "{digit:x}"),
                (true, true) => write!(buf, "{digit:X}"),
                (false, false) => write!(buf, "{digit:08x}"),
                (false, true) => write!(buf, "{digit:08X}"),
            }
            .expect("writing to a string cannot fail");
        }
        if buf.is_empty() {
            buf.push('0');
        }
        buf
    }

    // getter
    pub const fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }
    pub const fn signum(&self) -> SigNum {
        if self.is_zero() {
            SigNum::Zero
        } else {
            SigNum::Positive
        }
    }
    pub fn is_one(&self) -> bool {
        self.digits.len() == 1 && *self.digits.first().expect("len is one") == 1
    }
    pub fn is_even(&self) -> bool {
        self.digits.first().map_or(true, |&digit| digit % 2 == 0)
    }
    pub fn is_power_of_two(&self) -> bool {
        self.digits.last().map_or(false, |&digit| digit.is_power_of_two())
            && self.digits.iter().rev().skip(1).all(|&digit| digit == 0)
    }

    pub fn digit_len(&self) -> usize {
        self.digits.len()
    }
    /// number of significant bits; zero has none
    pub fn bit_len(&self) -> usize {
        self.digits.last().map_or(0, |&top| {
            (self.digits.len() - 1) * DIGIT_BITS + (DIGIT_BITS - top.leading_zeros() as usize)
        })
    }
    pub fn count_ones(&self) -> usize {
        self.digits.iter().map(|digit| digit.count_ones() as usize).sum()
    }
    pub fn trailing_zeros(&self) -> Option<usize> {
        self.digits
            .iter()
            .position(|&digit| digit != 0)
            .map(|pos| pos * DIGIT_BITS + self.digits[pos].trailing_zeros() as usize)
    }
    /// the digits in little endian order
    pub fn le_digits(&self) -> impl ExactSizeIterator<Item = Digit> + DoubleEndedIterator + '_ {
        self.digits.iter().copied()
    }

    pub(super) fn assert_pair_valid(lhs: &Boo<'_, Self>, rhs: &Boo<'_, Self>) {
        assert!(
            !matches!(lhs, Boo::BorrowedMut(_)) || !matches!(rhs, Boo::BorrowedMut(_)),
            "can't have two Borrow_mut's"
        );
    }
    /// runs a commutative assign kernel, writing through whichever side holds
    /// the `&mut`
    fn refer_direct<'b, B1, B2, T, F>(lhs: B1, rhs: B2, func: F) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
        T: TieBreaker,
        F: FnOnce(&mut Self, &Self),
    {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        Self::assert_pair_valid(&lhs, &rhs);

        match (lhs, rhs) {
            (Boo::BorrowedMut(borrow_mut), borrow) | (borrow, Boo::BorrowedMut(borrow_mut)) => {
                func(borrow_mut, &borrow);
                Moo::BorrowedMut(borrow_mut)
            }
            (Boo::Borrowed(borrowed), Boo::Owned(mut owned))
            | (Boo::Owned(mut owned), Boo::Borrowed(borrowed)) => {
                func(&mut owned, borrowed);
                Moo::Owned(owned)
            }
            (lhs, rhs) => {
                let (mut owned, borrowed) = T::decide(lhs, rhs);
                func(&mut owned, &borrowed);
                Moo::Owned(owned)
            }
        }
    }

    // math
    pub(crate) fn bitor<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        Self::refer_direct::<_, _, TieBigger, _>(lhs, rhs, math_algos::bit_math::bit_or_assign)
    }
    pub(crate) fn bitxor<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        Self::refer_direct::<_, _, TieBigger, _>(lhs, rhs, math_algos::bit_math::bit_xor_assign)
    }
    pub(crate) fn bitand<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        Self::refer_direct::<_, _, TieSmaller, _>(lhs, rhs, math_algos::bit_math::bit_and_assign)
    }

    pub(crate) fn shl<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, usize>>,
    {
        Self::try_shl(lhs, rhs).expect("shift would overflow the maximum magnitude size")
    }
    pub fn try_shl<'b, B1, B2>(lhs: B1, rhs: B2) -> Result<Moo<'b, Self>, ArithmeticError>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, usize>>,
    {
        let mut lhs = Moo::<Self>::from(lhs.into());
        let rhs = rhs.into().copied();
        if lhs.is_zero() || rhs == 0 {
            return Ok(lhs);
        }

        let partial = rhs % DIGIT_BITS;
        let full = rhs / DIGIT_BITS;
        if lhs.digit_len() + full + 1 > MAX_DIGITS {
            return Err(ArithmeticError::Overflow);
        }

        let mut carry = 0;
        if partial > 0 {
            for digit in lhs.digits.as_mut_slice() {
                (*digit, carry) = widening_shl(*digit, partial, carry);
            }
        }
        if carry != 0 || full > 0 {
            let digits: DigitVec = iter::repeat(0)
                .take(full)
                .chain(lhs.digits.iter().copied())
                .chain(Some(carry).filter(|&it| it != 0))
                .collect();
            lhs.digits = digits;
        }
        Ok(lhs)
    }

    pub(crate) fn shr<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, usize>>,
    {
        Self::shr_internal(lhs, rhs).0
    }
    /// shifts right and also returns the shifted-out low bits, so a division
    /// by a power of two yields its remainder for free
    pub(crate) fn shr_internal<'b, B1, B2>(lhs: B1, rhs: B2) -> (Moo<'b, Self>, Self)
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, usize>>,
    {
        let mut lhs = Moo::<Self>::from(lhs.into());
        let rhs = rhs.into().copied();
        if rhs == 0 {
            return (lhs, Self::ZERO);
        }

        let partial = rhs % DIGIT_BITS;
        let full = rhs / DIGIT_BITS;

        let mut overflow_digits: Vec<Digit> = lhs.digits.iter().take(full).copied().collect();
        if partial > 0 {
            if let Some(&edge) = lhs.digits.get(full) {
                overflow_digits.push(edge & ((1 << partial) - 1));
            }
        }
        let overflow = Self::from_vec(overflow_digits);

        let mut kept: Vec<Digit> = lhs.digits.iter().skip(full).copied().collect();
        if partial > 0 {
            let mut carry = 0;
            for digit in kept.iter_mut().rev() {
                (carry, *digit) = super::digits::widening_shr(*digit, partial, carry);
            }
        }
        lhs.digits = DigitVec::from_vec(kept);
        (lhs, overflow)
    }

    pub(crate) fn add<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        Self::assert_pair_valid(&lhs, &rhs);

        math_shortcuts::try_all!(lhs, rhs, math_shortcuts::add::Zero,);

        Self::refer_direct::<_, _, TieSmaller, _>(lhs, rhs, math_algos::add::assign)
    }
    pub(crate) fn sub<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        Self::assert_pair_valid(&lhs, &rhs);
        assert!(*lhs >= *rhs, "result would be negative");
        if rhs.is_zero() {
            return math_shortcuts::get_lhs(lhs, rhs);
        }

        match (lhs, rhs) {
            (Boo::BorrowedMut(lhs), rhs) => {
                math_algos::sub::assign_smaller(lhs, &rhs);
                Moo::BorrowedMut(lhs)
            }
            (lhs, Boo::BorrowedMut(rhs)) => {
                let old_rhs = std::mem::replace(rhs, lhs.cloned());
                math_algos::sub::assign_smaller(rhs, &old_rhs);
                Moo::BorrowedMut(rhs)
            }
            (lhs, rhs) => {
                // the kernel can only subtract the smaller side in place
                let mut lhs = lhs.cloned();
                math_algos::sub::assign_smaller(&mut lhs, &rhs);
                Moo::Owned(lhs)
            }
        }
    }

    pub(crate) fn mul_by_digit<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Digit>>,
    {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Digit = rhs.into().copied();

        if lhs.is_zero() {
            return lhs.into();
        }
        if rhs == 0 {
            return Moo::from_with_value(lhs, Self::ZERO);
        }
        let mut lhs = Moo::from(lhs);
        if rhs == 1 {
            return lhs;
        }
        if rhs.is_power_of_two() {
            return Self::shl(lhs, rhs.ilog2() as usize);
        }
        math_algos::mul::assign_mul_digit_at_offset(&mut lhs, rhs, 0);
        lhs
    }

    pub(crate) fn mul<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        Self::assert_pair_valid(&lhs, &rhs);

        math_shortcuts::try_all!(
            lhs,
            rhs,
            math_shortcuts::mul::ByZero,
            math_shortcuts::mul::ByOne,
            math_shortcuts::mul::ByPowerOfTwo,
        );

        if std::ptr::eq::<Self>(lhs.as_ref(), rhs.as_ref()) {
            let result = math_algos::mul::square(&lhs);
            return match (lhs, rhs) {
                (Boo::BorrowedMut(borrow_mut), _) | (_, Boo::BorrowedMut(borrow_mut)) => {
                    *borrow_mut = result;
                    Moo::BorrowedMut(borrow_mut)
                }
                _ => Moo::Owned(result),
            };
        }
        match (lhs, rhs) {
            (Boo::BorrowedMut(borrow_mut), borrow) | (borrow, Boo::BorrowedMut(borrow_mut)) => {
                *borrow_mut = math_algos::mul::naive(borrow_mut, &borrow);
                Moo::BorrowedMut(borrow_mut)
            }
            (lhs, rhs) => Moo::Owned(math_algos::mul::naive(&lhs, &rhs)),
        }
    }

    pub fn try_div_mod<'b, B1, B2>(
        lhs: B1,
        rhs: B2,
    ) -> Result<(Moo<'b, Self>, Moo<'b, Self>), ArithmeticError>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        // both sides may be `&mut`: *lhs = lhs/rhs, *rhs = lhs%rhs
        if rhs.is_zero() {
            return Err(ArithmeticError::DivideByZero);
        }

        use super::math_shortcuts::{div, Left, Right};
        if <div::Smaller as MathShortcut<Left>>::can_shortcut(&lhs, &rhs) {
            return Ok(<div::Smaller as MathShortcut<Left>>::do_shortcut(lhs, rhs));
        }
        if <div::Same as MathShortcut<Left>>::can_shortcut(&lhs, &rhs) {
            return Ok(<div::Same as MathShortcut<Left>>::do_shortcut(lhs, rhs));
        }
        if <div::ByPowerOfTwo as MathShortcut<Right>>::can_shortcut(&lhs, &rhs) {
            return Ok(<div::ByPowerOfTwo as MathShortcut<Right>>::do_shortcut(lhs, rhs));
        }

        let (q, r) = math_algos::div::div_mod(&lhs, &rhs);
        Ok((Moo::from_with_value(lhs, q), Moo::from_with_value(rhs, r)))
    }
    pub fn div_mod<'b, B1, B2>(lhs: B1, rhs: B2) -> (Moo<'b, Self>, Moo<'b, Self>)
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        Self::try_div_mod(lhs, rhs).expect("can't divide by zero")
    }
    pub(crate) fn div<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        Self::div_mod(lhs, rhs).0
    }
    pub(crate) fn rem<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        let lhs: Boo<'_, Self> = lhs.into();
        match lhs {
            Boo::BorrowedMut(lhs) => {
                let (_, r) = Self::div_mod(std::mem::take(lhs), rhs);
                *lhs = r.cloned();
                Moo::BorrowedMut(lhs)
            }
            lhs => Self::div_mod(lhs, rhs).1,
        }
    }
}

macro_rules! implBigMath {
    ($($assign_trait:tt)::*, $assign_func:ident, $($trait:tt)::*, $func:ident) => {
        implBigMath!($($assign_trait)::*, $assign_func, $($trait)::*, $func, $func, BigInt);
    };
    ($($assign_trait:tt)::*, $assign_func:ident, $($trait:tt)::*, $func:ident, $ref_func:ident, $rhs:ty) => {
        impl $($trait)::*<$rhs> for BigInt {
            implBigMath!(body $func, $ref_func, $rhs);
        }
        impl $($trait)::*<&$rhs> for BigInt {
            implBigMath!(body ref $func, $ref_func, $rhs);
        }
        impl $($trait)::*<$rhs> for &BigInt {
            implBigMath!(body $func, $ref_func, $rhs);
        }
        impl $($trait)::*<&$rhs> for &BigInt {
            implBigMath!(body ref $func, $ref_func, $rhs);
        }
        impl $($assign_trait)::*<$rhs> for BigInt {
            fn $assign_func(&mut self, rhs: $rhs) {
                BigInt::$ref_func(self, rhs).expect_mut("did give &mut, shouldn't get result");
            }
        }
        impl $($assign_trait)::*<&$rhs> for BigInt {
            fn $assign_func(&mut self, rhs: &$rhs) {
                BigInt::$ref_func(self, rhs).expect_mut("did give &mut, shouldn't get result");
            }
        }
    };
    (body $func:tt, $ref_func:ident, $rhs:ty) => {
        type Output = BigInt;
        fn $func(self, rhs: $rhs) -> Self::Output {
            BigInt::$ref_func(self, rhs).expect_owned("didn't give &mut, should get result")
        }
    };
    (body ref $func:tt, $ref_func:ident, $rhs:ty) => {
        type Output = BigInt;
        fn $func(self, rhs: &$rhs) -> Self::Output {
            BigInt::$ref_func(self, rhs).expect_owned("didn't give &mut, should get result")
        }
    };
}
implBigMath!(BitOrAssign, bitor_assign, BitOr, bitor);
implBigMath!(BitXorAssign, bitxor_assign, BitXor, bitxor);
implBigMath!(BitAndAssign, bitand_assign, BitAnd, bitand);
implBigMath!(ShlAssign, shl_assign, Shl, shl, shl, usize);
implBigMath!(ShrAssign, shr_assign, Shr, shr, shr, usize);
implBigMath!(SubAssign, sub_assign, Sub, sub);
implBigMath!(AddAssign, add_assign, Add, add);
implBigMath!(MulAssign, mul_assign, Mul, mul, mul_by_digit, Digit);
implBigMath!(MulAssign, mul_assign, Mul, mul);
implBigMath!(DivAssign, div_assign, Div, div, div, BigInt);
implBigMath!(RemAssign, rem_assign, Rem, rem, rem, BigInt);
