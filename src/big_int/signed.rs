// SPDX-License-Identifier: MPL-2.0
use crate::{
    big_int::{
        digits::Digit,
        ArithmeticError, ParseBigIntError, TryFromBigIntError,
    },
    util::boo::{Boo, Moo},
    BigUInt,
};

use std::{
    ops::{
        Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
        DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
        SubAssign,
    },
    str::FromStr,
};

use super::{base10, base2, bits, math_shortcuts};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Sign {
    Negative = -1,
    Positive = 1,
}
impl From<Sign> for SigNum {
    fn from(value: Sign) -> Self {
        match value {
            Sign::Negative => Self::Negative,
            Sign::Positive => Self::Positive,
        }
    }
}
impl From<SigNum> for Sign {
    fn from(value: SigNum) -> Self {
        match value {
            SigNum::Negative => Self::Negative,
            SigNum::Zero | SigNum::Positive => Self::Positive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(i8)]
pub enum SigNum {
    Negative = -1,
    #[default]
    Zero = 0,
    Positive = 1,
}
impl SigNum {
    const fn into_i8(self) -> i8 {
        self as i8
    }
    const fn from_i8(value: i8) -> Self {
        match value {
            -1 => Self::Negative,
            0 => Self::Zero,
            1 => Self::Positive,
            _ => panic!("signum out of range"),
        }
    }
    pub const fn from_uint(is_zero: bool) -> Self {
        if is_zero {
            Self::Zero
        } else {
            Self::Positive
        }
    }
    pub const fn is_negative(self) -> bool {
        self.into_i8().is_negative()
    }
    pub const fn is_positive(self) -> bool {
        self.into_i8().is_positive()
    }
    pub const fn is_zero(self) -> bool {
        self.into_i8() == 0
    }
    #[must_use]
    pub const fn negate(self) -> Self {
        self.const_mul(Self::Negative)
    }
    #[must_use]
    pub const fn abs(self) -> Self {
        Self::from_i8(self.into_i8().abs())
    }
    #[must_use]
    pub const fn const_mul(self, rhs: Self) -> Self {
        Self::from_i8(self.into_i8() * rhs.into_i8())
    }
    /// do the signs point in opposite directions; zero is in nobodys
    /// direction
    pub const fn is_different(self, other: Self) -> bool {
        !self.is_negative() ^ !other.is_negative()
    }
}
impl Neg for SigNum {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}
impl Mul for SigNum {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.const_mul(rhs)
    }
}
impl MulAssign for SigNum {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// a signed arbitrary-precision integer, a [`SigNum`] over a [`BigUInt`]
/// magnitude. Zero has exactly one representation: `SigNum::Zero` with an
/// empty magnitude.
#[derive(Clone, Default, Hash, PartialEq, Eq)]
pub struct BigInt {
    /// the sign of the number, `Zero` exactly when `unsigned` is zero
    pub(super) signum: SigNum,
    /// holds the digits in LE order
    pub(super) unsigned: BigUInt,
}

impl std::fmt::Debug for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Number {{ {} ",
            match self.signum {
                SigNum::Negative => "-",
                SigNum::Zero => "",
                SigNum::Positive => "+",
            }
        )?;
        self.unsigned.inner_debug(f)?;
        write!(f, "}}")
    }
}
impl std::fmt::Display for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(
            !self.is_negative(),
            "",
            &base10::to_decimal_string(&self.unsigned),
        )
    }
}
impl std::fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(
            !self.is_negative(),
            if f.alternate() { "0x" } else { "" },
            &format!("{:x}", self.unsigned),
        )
    }
}
impl std::fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(
            !self.is_negative(),
            if f.alternate() { "0X" } else { "" },
            &format!("{:X}", self.unsigned),
        )
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.signum.cmp(&other.signum).then_with(|| {
            let ord = self.unsigned.cmp(&other.unsigned);
            // both negative: the bigger magnitude is the smaller number
            if self.signum.is_negative() {
                ord.reverse()
            } else {
                ord
            }
        })
    }
}

macro_rules! implFromUnsignedPrim {
    ($($prim:ty),*) => {$(
        impl From<$prim> for BigInt {
            fn from(value: $prim) -> Self {
                BigUInt::from(value).into()
            }
        }
    )*};
}
implFromUnsignedPrim!(u8, u16, u32, u64, u128, usize);
macro_rules! implFromSignedPrim {
    ($($prim:ty),*) => {$(
        impl From<$prim> for BigInt {
            fn from(value: $prim) -> Self {
                let sign = if value < 0 { Sign::Negative } else { Sign::Positive };
                BigUInt::from(value.unsigned_abs()).with_sign(sign)
            }
        }
    )*};
}
implFromSignedPrim!(i8, i16, i32, i64, i128, isize);

impl From<BigUInt> for BigInt {
    fn from(value: BigUInt) -> Self {
        value.with_sign(Sign::Positive)
    }
}

macro_rules! implTryIntoUnsigned {
    ($($prim:ty),*) => {$(
        impl TryFrom<&BigInt> for $prim {
            type Error = TryFromBigIntError;

            fn try_from(value: &BigInt) -> Result<Self, Self::Error> {
                if value.is_negative() {
                    return Err(TryFromBigIntError::new());
                }
                value
                    .try_to_u128()
                    .and_then(|it| Self::try_from(it).ok())
                    .ok_or_else(TryFromBigIntError::new)
            }
        }
        impl TryFrom<BigInt> for $prim {
            type Error = TryFromBigIntError;

            fn try_from(value: BigInt) -> Result<Self, Self::Error> {
                Self::try_from(&value)
            }
        }
    )*};
}
implTryIntoUnsigned!(u64, u128);
macro_rules! implTryIntoSigned {
    ($($prim:ty),*) => {$(
        impl TryFrom<&BigInt> for $prim {
            type Error = TryFromBigIntError;

            fn try_from(value: &BigInt) -> Result<Self, Self::Error> {
                let magnitude = value.try_to_u128().ok_or_else(TryFromBigIntError::new)?;
                if value.is_negative() {
                    if magnitude > <$prim>::MAX as u128 + 1 {
                        return Err(TryFromBigIntError::new());
                    }
                    Ok((magnitude as i128).wrapping_neg() as $prim)
                } else {
                    if magnitude > <$prim>::MAX as u128 {
                        return Err(TryFromBigIntError::new());
                    }
                    Ok(magnitude as $prim)
                }
            }
        }
        impl TryFrom<BigInt> for $prim {
            type Error = TryFromBigIntError;

            fn try_from(value: BigInt) -> Result<Self, Self::Error> {
                Self::try_from(&value)
            }
        }
    )*};
}
implTryIntoSigned!(i64, i128);

impl FromStr for BigInt {
    type Err = ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // trailing NUL padding is accepted for compatibility
        let s = s.trim_end_matches('\0');
        let (sign, rest) = strip_sign(s);
        let offset = s.len() - rest.len();

        rest.parse::<BigUInt>()
            .map(|it| it.with_sign(sign.unwrap_or(Sign::Positive)))
            .map_err(|mut err| {
                if let ParseBigIntError::InvalidDigit { position, .. } = &mut err {
                    *position += offset;
                }
                err
            })
    }
}

fn strip_sign(s: &str) -> (Option<Sign>, &str) {
    match s.chars().next() {
        Some('-') => (Some(Sign::Negative), &s[1..]),
        Some('+') => (Some(Sign::Positive), &s[1..]),
        None | Some(_) => (None, s),
    }
}

impl BigInt {
    pub const ZERO: Self = Self {
        signum: SigNum::Zero,
        unsigned: BigUInt::ZERO,
    };
    pub const ONE: Self = Self {
        signum: SigNum::Positive,
        unsigned: BigUInt::ONE,
    };
    pub const NEG_ONE: Self = Self {
        signum: SigNum::Negative,
        unsigned: BigUInt::ONE,
    };

    pub fn new(sign: impl Into<Sign>, unsigned: impl Into<BigUInt>) -> Self {
        let unsigned = unsigned.into();
        Self {
            signum: Self::get_new_signum(&unsigned, || sign.into()),
            unsigned,
        }
    }
    pub(super) fn with_signum(unsigned: BigUInt, signum: SigNum) -> Self {
        Self {
            signum: if unsigned.is_zero() {
                SigNum::Zero
            } else {
                debug_assert!(!signum.is_zero(), "nonzero magnitude needs a direction");
                signum
            },
            unsigned,
        }
    }
    pub fn from_digit(value: Digit) -> Self {
        BigUInt::from_digit(value).into()
    }
    pub fn from_le_digits(digits: impl IntoIterator<Item = Digit>) -> Self {
        BigUInt::from_le_digits(digits).into()
    }
    pub fn split_sign(self) -> (SigNum, BigUInt) {
        (self.signum, self.unsigned)
    }
    pub fn into_abs(self) -> BigUInt {
        self.unsigned
    }

    /// generate a new random number with at least `bytes.start()` and at most
    /// `bytes.end()` bytes of information
    pub fn new_random(bytes: std::ops::RangeInclusive<usize>, mut rng: impl rand::RngCore) -> Self {
        let sign = if rng.next_u32() % 2 == 0 {
            Sign::Positive
        } else {
            Sign::Negative
        };
        BigUInt::new_random(bytes, rng).with_sign(sign)
    }

    pub(super) fn recalc_sign(&mut self) {
        if self.unsigned.is_zero() {
            self.signum = SigNum::Zero;
        } else {
            assert!(!self.signum.is_zero(), "found {self:?} with SigNum::Zero");
        }
        self.unsigned.assert_canonical();
    }
    fn get_new_signum(unsigned: &BigUInt, sign: impl FnOnce() -> Sign) -> SigNum {
        if unsigned.is_zero() {
            SigNum::Zero
        } else {
            sign().into()
        }
    }

    pub const fn abs(&self) -> &BigUInt {
        &self.unsigned
    }
    pub const fn signum(&self) -> SigNum {
        self.signum
    }
    pub fn set_sign(&mut self, sign: impl Into<Sign>) {
        self.signum = Self::get_new_signum(&self.unsigned, || sign.into());
    }

    pub const fn is_negative(&self) -> bool {
        self.signum().is_negative()
    }
    pub const fn is_positive(&self) -> bool {
        self.signum().is_positive()
    }
    pub const fn is_zero(&self) -> bool {
        self.signum().is_zero()
    }
    pub fn is_one(&self) -> bool {
        self.is_positive() && self.unsigned.is_one()
    }
    pub fn is_even(&self) -> bool {
        self.unsigned.is_even()
    }
    pub fn is_power_of_two(&self) -> bool {
        self.unsigned.is_power_of_two()
    }
    pub fn digit_len(&self) -> usize {
        self.unsigned.digit_len()
    }

    pub fn negate(&mut self) {
        self.signum = -self.signum;
    }
    pub fn take_sign(&mut self) -> SigNum {
        let signum = self.signum;
        self.signum = self.signum.abs();
        signum
    }

    // bit queries, on the twos-complement view for negative values
    /// bits of the shortest twos-complement representation, without the sign
    /// bit. `-2^n` needs one bit fewer than `2^n`
    pub fn bit_len(&self) -> usize {
        bits::bit_length(self)
    }
    pub fn count_ones(&self) -> usize {
        bits::count_ones(self)
    }
    pub fn leading_zero_count(&self) -> usize {
        bits::leading_zeros(self)
    }
    pub fn trailing_zero_count(&self) -> usize {
        bits::trailing_zeros(self)
    }

    // byte conversions
    pub fn from_signed_bytes_le(bytes: &[u8]) -> Self {
        let negative = bytes.last().map_or(false, |&byte| byte >= 0x80);
        if negative {
            let mut buf = bytes.to_vec();
            twos_complement_bytes(&mut buf);
            BigUInt::from_le_bytes(buf).with_sign(Sign::Negative)
        } else {
            BigUInt::from_le_bytes(bytes.iter().copied()).into()
        }
    }
    pub fn from_signed_bytes_be(bytes: &[u8]) -> Self {
        let mut bytes = bytes.to_vec();
        bytes.reverse();
        Self::from_signed_bytes_le(&bytes)
    }
    /// minimal twos-complement little endian bytes; zero is `[0]`
    pub fn to_signed_bytes_le(&self) -> Vec<u8> {
        let mut bytes = self.unsigned.to_le_bytes();
        if self.is_negative() {
            twos_complement_bytes(&mut bytes);
            if *bytes.last().expect("at least one byte") < 0x80 {
                bytes.push(0xff);
            }
        } else if *bytes.last().expect("at least one byte") >= 0x80 {
            bytes.push(0);
        }
        bytes
    }
    pub fn to_signed_bytes_be(&self) -> Vec<u8> {
        let mut bytes = self.to_signed_bytes_le();
        bytes.reverse();
        bytes
    }
    pub fn from_unsigned_bytes_le(bytes: impl IntoIterator<Item = u8>) -> Self {
        BigUInt::from_le_bytes(bytes).into()
    }
    pub fn from_unsigned_bytes_be(bytes: &[u8]) -> Self {
        BigUInt::from_be_bytes(bytes).into()
    }
    /// magnitude bytes, the sign is the caller's problem
    pub fn to_unsigned_bytes_le(&self) -> Vec<u8> {
        self.unsigned.to_le_bytes()
    }
    pub fn to_unsigned_bytes_be(&self) -> Vec<u8> {
        self.unsigned.to_be_bytes()
    }

    // power-of-two radix strings, twos-complement semantics
    pub fn to_hex_string(&self) -> String {
        base2::format_pow2(self, 4)
    }
    pub fn to_binary_string(&self) -> String {
        base2::format_pow2(self, 1)
    }
    pub fn from_hex_str(s: &str) -> Result<Self, ParseBigIntError> {
        base2::parse_pow2(s, 4)
    }
    pub fn from_binary_str(s: &str) -> Result<Self, ParseBigIntError> {
        base2::parse_pow2(s, 1)
    }

    fn try_to_u128(&self) -> Option<u128> {
        if self.digit_len() > 4 {
            return None;
        }
        Some(
            self.unsigned
                .le_digits()
                .rev()
                .fold(0u128, |acc, digit| acc << 32 | digit as u128),
        )
    }
    /// the value when it fits a single digit, for the native fast paths
    fn to_small(&self) -> Option<i64> {
        (self.digit_len() <= 1).then(|| {
            let magnitude = self.unsigned.le_digits().next().unwrap_or(0) as i64;
            if self.is_negative() {
                -magnitude
            } else {
                magnitude
            }
        })
    }

    pub(super) fn assert_pair_valid(lhs: &Boo<'_, Self>, rhs: &Boo<'_, Self>) {
        assert!(
            !matches!(lhs, Boo::BorrowedMut(_)) || !matches!(rhs, Boo::BorrowedMut(_)),
            "can't have two Borrow_mut's"
        );
    }
    /// stores `value` through whichever operand held the `&mut`
    fn store<'b>(lhs: Boo<'b, Self>, rhs: Boo<'b, Self>, value: Self) -> Moo<'b, Self> {
        match (lhs, rhs) {
            (Boo::BorrowedMut(spot), _) | (_, Boo::BorrowedMut(spot)) => {
                *spot = value;
                Moo::BorrowedMut(spot)
            }
            _ => Moo::Owned(value),
        }
    }
    fn abs_boo(value: Boo<'_, Self>) -> Boo<'_, BigUInt> {
        match value {
            Boo::Owned(it) => Boo::Owned(it.unsigned),
            Boo::Borrowed(it) => Boo::Borrowed(&it.unsigned),
            Boo::BorrowedMut(it) => Boo::BorrowedMut(&mut it.unsigned),
        }
    }
    /// runs a magnitude kernel and reapplies the sign, writing through
    /// whichever side holds the `&mut`
    fn refer_to_abs<'b, B1, B2>(
        lhs: B1,
        rhs: B2,
        func: impl for<'u> FnOnce(Boo<'u, BigUInt>, Boo<'u, BigUInt>) -> Moo<'u, BigUInt>,
        new_sign: SigNum,
    ) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();

        match (lhs, rhs) {
            (Boo::BorrowedMut(borrow_mut), borrow) => {
                let _ = func(Boo::BorrowedMut(&mut borrow_mut.unsigned), Self::abs_boo(borrow));
                borrow_mut.signum = new_sign;
                borrow_mut.recalc_sign();
                Moo::BorrowedMut(borrow_mut)
            }
            (borrow, Boo::BorrowedMut(borrow_mut)) => {
                let _ = func(Self::abs_boo(borrow), Boo::BorrowedMut(&mut borrow_mut.unsigned));
                borrow_mut.signum = new_sign;
                borrow_mut.recalc_sign();
                Moo::BorrowedMut(borrow_mut)
            }
            (lhs, rhs) => {
                let owned =
                    func(Self::abs_boo(lhs), Self::abs_boo(rhs)).expect_owned("no mut ref given");
                Moo::Owned(Self::with_signum(owned, new_sign))
            }
        }
    }

    pub(crate) fn add<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        Self::assert_pair_valid(&lhs, &rhs);

        if let (Some(l), Some(r)) = (lhs.to_small(), rhs.to_small()) {
            return Self::store(lhs, rhs, Self::from(l + r));
        }
        if !lhs.is_zero() && !rhs.is_zero() && lhs.signum.is_different(rhs.signum) {
            // a + b == a - (-b)
            return match rhs {
                Boo::Owned(mut rhs) => {
                    rhs.negate();
                    Self::sub(lhs, rhs)
                }
                Boo::Borrowed(rhs) => Self::sub(lhs, -rhs.clone()),
                Boo::BorrowedMut(rhs) => {
                    rhs.negate();
                    Self::sub(lhs, rhs)
                }
            };
        }
        let new_sign = if lhs.is_zero() { rhs.signum } else { lhs.signum };
        Self::refer_to_abs(lhs, rhs, |a, b| BigUInt::add(a, b), new_sign)
    }

    pub(crate) fn sub<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        Self::assert_pair_valid(&lhs, &rhs);

        if let (Some(l), Some(r)) = (lhs.to_small(), rhs.to_small()) {
            return Self::store(lhs, rhs, Self::from(l - r));
        }
        if rhs.is_zero() {
            return math_shortcuts::get_lhs(lhs, rhs);
        }
        if lhs.is_zero() {
            // 0 - b == -b
            return match (lhs, rhs) {
                (_, Boo::BorrowedMut(rhs)) => {
                    rhs.negate();
                    Moo::BorrowedMut(rhs)
                }
                (Boo::BorrowedMut(lhs), rhs) => {
                    *lhs = rhs.cloned();
                    lhs.negate();
                    Moo::BorrowedMut(lhs)
                }
                (_, rhs) => {
                    let mut out = rhs.cloned();
                    out.negate();
                    Moo::Owned(out)
                }
            };
        }
        if lhs.signum.is_different(rhs.signum) {
            // a - b == a + (-b)
            return match rhs {
                Boo::Owned(mut rhs) => {
                    rhs.negate();
                    Self::add(lhs, rhs)
                }
                Boo::Borrowed(rhs) => Self::add(lhs, -rhs.clone()),
                Boo::BorrowedMut(rhs) => {
                    rhs.negate();
                    Self::add(lhs, rhs)
                }
            };
        }

        // same sign: a - b == sign(a) * (|a| - |b|), flipped when |a| < |b|
        let sign = lhs.signum;
        let flipped = lhs.unsigned < rhs.unsigned;
        let new_sign = if flipped { -sign } else { sign };
        let (big, small) = if flipped { (rhs, lhs) } else { (lhs, rhs) };
        Self::refer_to_abs(big, small, |a, b| BigUInt::sub(a, b), new_sign)
    }

    pub(crate) fn mul_by_digit<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Digit>>,
    {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Digit = rhs.into().copied();

        match lhs {
            Boo::BorrowedMut(lhs) => {
                let _ = BigUInt::mul_by_digit(&mut lhs.unsigned, rhs);
                lhs.recalc_sign();
                Moo::BorrowedMut(lhs)
            }
            lhs => {
                let sign = lhs.signum;
                let magnitude =
                    BigUInt::mul_by_digit(Self::abs_boo(lhs), rhs).expect_owned("no mut ref");
                Moo::Owned(Self::with_signum(magnitude, sign))
            }
        }
    }

    pub(crate) fn mul<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        Self::assert_pair_valid(&lhs, &rhs);

        if let (Some(l), Some(r)) = (lhs.to_small(), rhs.to_small()) {
            return Self::store(lhs, rhs, Self::from(l as i128 * r as i128));
        }
        let new_sign = lhs.signum * rhs.signum;
        Self::refer_to_abs(lhs, rhs, |a, b| BigUInt::mul(a, b), new_sign)
    }

    /// truncating division: quotient rounds toward zero, remainder follows
    /// the dividend's sign
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
        if rhs.is_zero() {
            return Err(ArithmeticError::DivideByZero);
        }

        let signum_q = lhs.signum * rhs.signum;
        let signum_r = lhs.signum;

        if let (Some(l), Some(r)) = (lhs.to_small(), rhs.to_small()) {
            return Ok((
                Moo::from_with_value(lhs, Self::from(l / r)),
                Moo::from_with_value(rhs, Self::from(l % r)),
            ));
        }

        #[cfg(debug_assertions)]
        let (n, d) = ((*lhs).clone(), (*rhs).clone());

        let (q, r) = match (lhs, rhs) {
            (Boo::BorrowedMut(lhs), Boo::BorrowedMut(rhs)) => {
                let _ = BigUInt::div_mod(&mut lhs.unsigned, &mut rhs.unsigned);
                lhs.signum = signum_q;
                lhs.recalc_sign();
                rhs.signum = signum_r;
                rhs.recalc_sign();
                (Moo::BorrowedMut(lhs), Moo::BorrowedMut(rhs))
            }
            (Boo::BorrowedMut(lhs), rhs) => {
                let (_, r) = BigUInt::div_mod(&mut lhs.unsigned, Self::abs_boo(rhs));
                let r = r.expect_owned("rhs not mut");
                lhs.signum = signum_q;
                lhs.recalc_sign();
                (
                    Moo::BorrowedMut(lhs),
                    Moo::Owned(Self::with_signum(r, signum_r)),
                )
            }
            (lhs, Boo::BorrowedMut(rhs)) => {
                let (q, _) = BigUInt::div_mod(Self::abs_boo(lhs), &mut rhs.unsigned);
                let q = q.expect_owned("lhs not mut");
                rhs.signum = signum_r;
                rhs.recalc_sign();
                (
                    Moo::Owned(Self::with_signum(q, signum_q)),
                    Moo::BorrowedMut(rhs),
                )
            }
            (lhs, rhs) => {
                let (q, r) = BigUInt::div_mod(Self::abs_boo(lhs), Self::abs_boo(rhs));
                (
                    Moo::Owned(Self::with_signum(q.expect_owned("lhs not mut"), signum_q)),
                    Moo::Owned(Self::with_signum(r.expect_owned("rhs not mut"), signum_r)),
                )
            }
        };

        #[cfg(debug_assertions)]
        {
            debug_assert!(r.abs() < d.abs(), "|r| < |d| failed for r: {}, d: {d}", *r);
            debug_assert_eq!(
                n,
                &*q * &d + &*r,
                "n = dq + r failed for n: {n}, d: {d}, q: {}, r: {}",
                *q,
                *r
            );
        }
        Ok((q, r))
    }
    pub fn div_mod<'b, B1, B2>(lhs: B1, rhs: B2) -> (Moo<'b, Self>, Moo<'b, Self>)
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        Self::try_div_mod(lhs, rhs).expect("can't divide by zero")
    }
    pub fn try_div(&self, rhs: &Self) -> Result<Self, ArithmeticError> {
        Self::try_div_mod(self, rhs).map(|(q, _)| q.expect_owned("no mut given"))
    }
    /// remainder without materializing the quotient
    pub fn try_rem(&self, rhs: &Self) -> Result<Self, ArithmeticError> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivideByZero);
        }
        let magnitude = super::math_algos::div::rem(&self.unsigned, &rhs.unsigned);
        Ok(Self::with_signum(magnitude, self.signum))
    }

    pub(crate) fn div<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        match (lhs, rhs) {
            (lhs, Boo::BorrowedMut(rhs)) => {
                let (q, _) = Self::div_mod(lhs, std::mem::take(rhs));
                *rhs = q.expect_owned("didn't have a mut ref");
                Moo::BorrowedMut(rhs)
            }
            (lhs, rhs) => Self::div_mod(lhs, rhs).0,
        }
    }
    pub(crate) fn rem<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        match (lhs, rhs) {
            (Boo::BorrowedMut(lhs), rhs) => {
                let (_, r) = Self::div_mod(std::mem::take(lhs), rhs);
                *lhs = r.cloned();
                Moo::BorrowedMut(lhs)
            }
            (lhs, rhs) => Self::div_mod(lhs, rhs).1,
        }
    }

    /// Euclidean division: the remainder is always nonnegative
    pub fn div_mod_euclid(&self, rhs: &Self) -> (Self, BigUInt) {
        let (q, r) = Self::div_mod(self, rhs);
        let mut q = q.expect_owned("no mut given");
        let r = r.expect_owned("no mut given");
        if r.is_negative() {
            let rem = rhs.abs() - &r.into_abs();
            q -= match rhs.signum {
                SigNum::Negative => Self::NEG_ONE,
                _ => Self::ONE,
            };
            (q, rem)
        } else {
            (q, r.into_abs())
        }
    }

    // twos-complement bit operations
    pub(crate) fn bitand<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        Self::assert_pair_valid(&lhs, &rhs);
        let out = bits::and(&lhs, &rhs);
        Self::store(lhs, rhs, out)
    }
    pub(crate) fn bitor<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        Self::assert_pair_valid(&lhs, &rhs);
        let out = bits::or(&lhs, &rhs);
        Self::store(lhs, rhs, out)
    }
    pub(crate) fn bitxor<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, Self>>,
    {
        let lhs: Boo<'_, Self> = lhs.into();
        let rhs: Boo<'_, Self> = rhs.into();
        Self::assert_pair_valid(&lhs, &rhs);
        let out = bits::xor(&lhs, &rhs);
        Self::store(lhs, rhs, out)
    }

    pub(crate) fn shl<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, usize>>,
    {
        let mut lhs = Moo::<Self>::from(lhs.into());
        let shift = rhs.into().copied();
        let _ = BigUInt::shl(&mut lhs.get_mut().unsigned, shift);
        lhs
    }
    /// arithmetic right shift: sign extending, so negative values round
    /// toward negative infinity
    pub(crate) fn shr<'b, B1, B2>(lhs: B1, rhs: B2) -> Moo<'b, Self>
    where
        B1: Into<Boo<'b, Self>>,
        B2: Into<Boo<'b, usize>>,
    {
        let mut lhs = Moo::<Self>::from(lhs.into());
        let shift = rhs.into().copied();
        if shift == 0 {
            return lhs;
        }
        if lhs.is_negative() {
            let magnitude = std::mem::take(&mut lhs.get_mut().unsigned);
            lhs.get_mut().unsigned = ((magnitude - BigUInt::ONE) >> shift) + BigUInt::ONE;
        } else {
            let _ = BigUInt::shr(&mut lhs.get_mut().unsigned, shift);
            lhs.get_mut().recalc_sign();
        }
        lhs
    }
    /// logical right shift of the twos-complement encoding, zero filled.
    /// A negative value comes back nonnegative
    pub fn unsigned_shr(&self, shift: usize) -> Self {
        bits::unsigned_shr(self, shift)
    }
    /// shift with a signed amount; negative amounts reverse direction
    #[must_use]
    pub fn shifted_left(self, amount: isize) -> Self {
        if amount < 0 {
            self >> amount.unsigned_abs()
        } else {
            self << amount as usize
        }
    }
    #[must_use]
    pub fn shifted_right(self, amount: isize) -> Self {
        if amount < 0 {
            self << amount.unsigned_abs()
        } else {
            self >> amount as usize
        }
    }
    /// rotates within the value's own twos-complement digit width
    pub fn rotate_left(&self, amount: isize) -> Self {
        bits::rotate_left(self, amount)
    }
    pub fn rotate_right(&self, amount: isize) -> Self {
        bits::rotate_right(self, amount)
    }
}

fn twos_complement_bytes(buf: &mut [u8]) {
    let Some(first_nonzero) = buf.iter().position(|&byte| byte != 0) else {
        return;
    };
    buf[first_nonzero] = buf[first_nonzero].wrapping_neg();
    for byte in &mut buf[first_nonzero + 1..] {
        *byte = !*byte;
    }
}

impl Neg for BigInt {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.negate();
        self
    }
}
impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}
// `!a == -(a + 1)`, the twos-complement complement
impl Not for BigInt {
    type Output = Self;

    fn not(self) -> Self::Output {
        -(self + BigInt::ONE)
    }
}
impl Not for &BigInt {
    type Output = BigInt;

    fn not(self) -> Self::Output {
        -(self + &BigInt::ONE)
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
implBigMath!(SubAssign, sub_assign, Sub, sub);
implBigMath!(AddAssign, add_assign, Add, add);
implBigMath!(MulAssign, mul_assign, Mul, mul, mul_by_digit, Digit);
implBigMath!(MulAssign, mul_assign, Mul, mul);
implBigMath!(DivAssign, div_assign, Div, div, div, BigInt);
implBigMath!(RemAssign, rem_assign, Rem, rem, rem, BigInt);
implBigMath!(BitAndAssign, bitand_assign, BitAnd, bitand);
implBigMath!(BitOrAssign, bitor_assign, BitOr, bitor);
implBigMath!(BitXorAssign, bitxor_assign, BitXor, bitxor);
implBigMath!(ShlAssign, shl_assign, Shl, shl, shl, usize);
implBigMath!(ShrAssign, shr_assign, Shr, shr, shr, usize);
