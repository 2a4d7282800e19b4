// SPDX-License-Identifier: MPL-2.0
use itertools::Itertools;
use std::cmp::Ordering;

use super::digits::{
    borrowing_sub, carrying_add, mul_add, widening_shl, widening_shr, Digit, DigitBuf,
    DoubleDigit, DIGIT_BITS, MAX_DIGITS,
};
use super::unsigned::BigInt;

/// strips most-significant zero digits without copying
pub(crate) fn trim_slice(digits: &[Digit]) -> &[Digit] {
    let mut len = digits.len();
    while len > 0 && digits[len - 1] == 0 {
        len -= 1;
    }
    &digits[..len]
}

/// magnitude compare of two little-endian digit runs, tolerant of
/// most-significant zeros
pub(crate) fn compare_slices(lhs: &[Digit], rhs: &[Digit]) -> Ordering {
    let lhs = trim_slice(lhs);
    let rhs = trim_slice(rhs);
    lhs.len()
        .cmp(&rhs.len())
        .then_with(|| lhs.iter().rev().cmp(rhs.iter().rev()))
}

/// `acc += rhs` over raw little-endian digit runs
pub(crate) fn add_assign_slices(acc: &mut Vec<Digit>, rhs: &[Digit]) {
    if acc.len() < rhs.len() {
        acc.resize(rhs.len(), 0);
    }
    let mut carry = false;
    for (i, &rhs_digit) in rhs.iter().enumerate() {
        (acc[i], carry) = carrying_add(acc[i], rhs_digit, carry);
    }
    for i in rhs.len()..acc.len() {
        if !carry {
            break;
        }
        (acc[i], carry) = carrying_add(acc[i], 0, carry);
    }
    if carry {
        acc.push(1);
    }
}

pub mod bit_math {
    use super::BigInt;

    fn op_assign_zipped(
        lhs: &mut BigInt,
        rhs: &BigInt,
        op: impl Fn(&mut super::Digit, super::Digit),
    ) {
        for (digit, rhs) in lhs.digits.as_mut_slice().iter_mut().zip(rhs.digits.iter()) {
            op(digit, *rhs);
        }
    }

    pub fn bit_or_assign(lhs: &mut BigInt, rhs: &BigInt) {
        op_assign_zipped(lhs, rhs, |l, r| *l |= r);
        let lhs_len = lhs.digits.len();
        lhs.digits.extend(rhs.digits.iter().skip(lhs_len).copied());
    }
    pub fn bit_xor_assign(lhs: &mut BigInt, rhs: &BigInt) {
        op_assign_zipped(lhs, rhs, |l, r| *l ^= r);
        let lhs_len = lhs.digits.len();
        lhs.digits.extend(rhs.digits.iter().skip(lhs_len).copied());
        lhs.truncate_leading_zeros();
    }
    pub fn bit_and_assign(lhs: &mut BigInt, rhs: &BigInt) {
        op_assign_zipped(lhs, rhs, |l, r| *l &= r);
        lhs.digits.truncate(rhs.digits.len());
        lhs.truncate_leading_zeros();
    }
}

pub mod add {
    use super::{carrying_add, BigInt, Digit, Itertools};

    /// calculates `lhs += rhs`; either side may be the longer one
    pub fn assign(lhs: &mut BigInt, rhs: &BigInt) {
        let orig_lhs_len = lhs.digits.len();
        lhs.digits
            .extend(rhs.digits.iter().skip(orig_lhs_len).copied());

        let mut carry = false;
        for elem in lhs
            .digits
            .as_mut_slice()
            .iter_mut()
            .zip_longest(rhs.digits.iter().take(orig_lhs_len))
        {
            use itertools::EitherOrBoth as E;
            let (lhs_digit, rhs_digit) = match elem {
                E::Right(_rhs) => unreachable!("lhs was extended"),
                E::Left(_digit) if !carry => break,
                E::Left(digit) => (digit, 0),
                E::Both(digit, rhs) => (digit, *rhs),
            };
            (*lhs_digit, carry) = carrying_add(*lhs_digit, rhs_digit, carry);
        }
        if carry {
            lhs.push(1);
        }
    }

    /// scalar-add specialization of [`assign`]
    pub fn digit_assign(lhs: &mut BigInt, rhs: Digit) {
        let mut carry = rhs;
        for digit in lhs.digits.as_mut_slice() {
            if carry == 0 {
                return;
            }
            let (res, overflow) = digit.overflowing_add(carry);
            *digit = res;
            carry = Digit::from(overflow);
        }
        lhs.push(carry);
    }
}

pub mod sub {
    use super::{borrowing_sub, BigInt, Itertools};

    /// calculates `lhs -= rhs`; `lhs` must not be smaller than `rhs`
    pub fn assign_smaller(lhs: &mut BigInt, rhs: &BigInt) {
        debug_assert!(&*lhs >= rhs, "lhs is smaller than rhs");

        let mut borrow = false;
        for elem in lhs
            .digits
            .as_mut_slice()
            .iter_mut()
            .zip_longest(rhs.digits.iter())
        {
            use itertools::EitherOrBoth as E;
            let (lhs_digit, rhs_digit) = match elem {
                E::Right(_rhs) => unreachable!("lhs is always bigger"),
                E::Left(_digit) if !borrow => break,
                E::Left(digit) => (digit, 0),
                E::Both(digit, rhs) => (digit, *rhs),
            };
            (*lhs_digit, borrow) = borrowing_sub(*lhs_digit, rhs_digit, borrow);
        }
        debug_assert!(!borrow, "subtraction underflowed");
        lhs.truncate_leading_zeros();
    }
}

pub mod mul {
    use super::{mul_add, BigInt, Digit, DoubleDigit, DIGIT_BITS, MAX_DIGITS};

    /// schoolbook multiply-accumulate into a pre-zeroed `l.len() + r.len()`
    /// buffer
    pub(crate) fn mul_slices(lhs: &[Digit], rhs: &[Digit]) -> Vec<Digit> {
        assert!(
            lhs.len() + rhs.len() <= MAX_DIGITS,
            "product would exceed the maximum magnitude size"
        );
        let mut out = vec![0; lhs.len() + rhs.len()];
        for (i, &rhs_digit) in rhs.iter().enumerate() {
            if rhs_digit == 0 {
                continue;
            }
            let mut carry = 0;
            for (j, &lhs_digit) in lhs.iter().enumerate() {
                (out[i + j], carry) = mul_add(lhs_digit, rhs_digit, out[i + j], carry);
            }
            out[i + lhs.len()] = carry;
        }
        out
    }

    /// each cross term is computed once and doubled, then the squared
    /// diagonal is added; roughly half the multiplies of `mul_slices`
    pub(crate) fn square_slices(digits: &[Digit]) -> Vec<Digit> {
        let n = digits.len();
        assert!(n * 2 <= MAX_DIGITS, "square would exceed the maximum magnitude size");
        let mut out = vec![0; n * 2];
        for i in 0..n {
            let mut carry = 0;
            for j in i + 1..n {
                (out[i + j], carry) = mul_add(digits[i], digits[j], out[i + j], carry);
            }
            out[i + n] = carry;
        }
        // double the cross terms
        let mut carry_bit = 0;
        for digit in &mut out {
            let next = *digit >> (DIGIT_BITS - 1);
            *digit = (*digit << 1) | carry_bit;
            carry_bit = next;
        }
        debug_assert_eq!(carry_bit, 0, "doubled cross terms cannot overflow the square");
        // add the diagonal
        let mut carry: DoubleDigit = 0;
        for i in 0..n {
            let square = digits[i] as DoubleDigit * digits[i] as DoubleDigit;
            let low = out[2 * i] as DoubleDigit + (square as Digit) as DoubleDigit + carry;
            out[2 * i] = low as Digit;
            let high = out[2 * i + 1] as DoubleDigit + (square >> DIGIT_BITS) + (low >> DIGIT_BITS);
            out[2 * i + 1] = high as Digit;
            carry = high >> DIGIT_BITS;
        }
        debug_assert_eq!(carry, 0, "square cannot overflow 2n digits");
        out
    }

    pub fn naive(lhs: &BigInt, rhs: &BigInt) -> BigInt {
        if lhs.is_zero() || rhs.is_zero() {
            return BigInt::ZERO;
        }
        BigInt::from_vec(mul_slices(lhs.digits.as_slice(), rhs.digits.as_slice()))
    }
    pub fn square(value: &BigInt) -> BigInt {
        if value.is_zero() {
            return BigInt::ZERO;
        }
        BigInt::from_vec(square_slices(value.digits.as_slice()))
    }

    /// `lhs = (lhs >> offset digits) * rhs << offset digits`, leaving the low
    /// `offset` digits untouched
    pub fn assign_mul_digit_at_offset(lhs: &mut BigInt, rhs: Digit, offset: usize) {
        let mut carry = 0;
        for digit in lhs.digits.as_mut_slice().iter_mut().skip(offset) {
            (*digit, carry) = mul_add(*digit, rhs, carry, 0);
        }
        lhs.push(carry);
        lhs.truncate_leading_zeros();
    }

    /// `digits = digits * mul + add` over a raw accumulator, the workhorse of
    /// the naive decimal parser
    pub(crate) fn mul_add_digit_in_place(digits: &mut Vec<Digit>, mul: Digit, add: Digit) {
        let mut carry = add;
        for digit in digits.iter_mut() {
            (*digit, carry) = mul_add(*digit, mul, carry, 0);
        }
        if carry != 0 {
            digits.push(carry);
        }
        while digits.last() == Some(&0) {
            digits.pop();
        }
    }
}

pub mod div {
    use super::{
        carrying_add, compare_slices, trim_slice, widening_shl, widening_shr, BigInt, Digit,
        DigitBuf, DoubleDigit, Ordering, DIGIT_BITS,
    };

    /// divisor length at or below which Algorithm D is always used
    const DC_DIVISOR_THRESHOLD: usize = 40;
    /// quotient length at or below which the recursion bottoms out
    const DC_QUOTIENT_THRESHOLD: usize = 32;

    /// computes `(lhs / rhs, lhs % rhs)` over magnitudes.
    /// `rhs` must be nonzero; the caller reports division by zero.
    pub fn div_mod(lhs: &BigInt, rhs: &BigInt) -> (BigInt, BigInt) {
        debug_assert!(!rhs.is_zero(), "division by zero must be caught before the kernels");

        if rhs.digits.len() == 1 {
            let (q, r) = div_rem_digit(lhs.digits.as_slice(), rhs.digits[0]);
            return (BigInt::from_vec(q), BigInt::from_digit(r));
        }
        match compare_slices(lhs.digits.as_slice(), rhs.digits.as_slice()) {
            Ordering::Less => return (BigInt::ZERO, lhs.clone()),
            Ordering::Equal => return (BigInt::ONE, BigInt::ZERO),
            Ordering::Greater => {}
        }

        // normalize so the divisor's top bit is set
        let shift = rhs.digits.last().expect("nonzero divisor").leading_zeros() as usize;
        let u = shl_slice(lhs.digits.as_slice(), shift);
        let v = shl_slice(rhs.digits.as_slice(), shift);
        let u = trim_slice(u.as_slice());
        let v = trim_slice(v.as_slice());

        let (q, r) = if v.len() > DC_DIVISOR_THRESHOLD && u.len() - v.len() > DC_QUOTIENT_THRESHOLD
        {
            div_rem_large(u, v)
        } else {
            div_rem_knuth(u, v)
        };
        (BigInt::from_vec(q), BigInt::from_vec(shr_vec(r, shift)))
    }

    /// single-pass long division by a one-digit divisor
    pub fn div_rem_digit(lhs: &[Digit], rhs: Digit) -> (Vec<Digit>, Digit) {
        debug_assert_ne!(rhs, 0);
        let mut quotient = vec![0; lhs.len()];
        let mut rem: DoubleDigit = 0;
        for (i, &digit) in lhs.iter().enumerate().rev() {
            let acc = rem << DIGIT_BITS | digit as DoubleDigit;
            quotient[i] = (acc / rhs as DoubleDigit) as Digit;
            rem = acc % rhs as DoubleDigit;
        }
        (quotient, rem as Digit)
    }
    /// remainder-only sibling of [`div_rem_digit`], no quotient buffer
    pub fn rem_digit(lhs: &[Digit], rhs: Digit) -> Digit {
        debug_assert_ne!(rhs, 0);
        let mut rem: DoubleDigit = 0;
        for &digit in lhs.iter().rev() {
            rem = (rem << DIGIT_BITS | digit as DoubleDigit) % rhs as DoubleDigit;
        }
        rem as Digit
    }
    /// `lhs % rhs`, skipping the quotient where the divisor allows it
    pub fn rem(lhs: &BigInt, rhs: &BigInt) -> BigInt {
        debug_assert!(!rhs.is_zero(), "division by zero must be caught before the kernels");
        if rhs.digits.len() == 1 {
            return BigInt::from_digit(rem_digit(lhs.digits.as_slice(), rhs.digits[0]));
        }
        div_mod(lhs, rhs).1
    }

    fn shl_slice(src: &[Digit], shift: usize) -> DigitBuf {
        if shift == 0 {
            return DigitBuf::from_slice(src);
        }
        let mut out = DigitBuf::zeroed(src.len() + 1);
        let mut carry = 0;
        for (i, &digit) in src.iter().enumerate() {
            (out[i], carry) = widening_shl(digit, shift, carry);
        }
        out[src.len()] = carry;
        out
    }
    fn shr_vec(mut digits: Vec<Digit>, shift: usize) -> Vec<Digit> {
        if shift > 0 {
            let mut carry = 0;
            for digit in digits.iter_mut().rev() {
                (carry, *digit) = widening_shr(*digit, shift, carry);
            }
        }
        digits
    }

    /// Knuth Algorithm D: per digit, estimate the quotient from the top two
    /// divisor digits and top three remainder digits, correct by at most two,
    /// multiply-subtract with add-back.
    /// `v` must be normalized (top bit set) and at least two digits long;
    /// `u` must not be shorter than `v`. The returned remainder is still
    /// normalized.
    pub(super) fn div_rem_knuth(u: &[Digit], v: &[Digit]) -> (Vec<Digit>, Vec<Digit>) {
        let n = v.len();
        debug_assert!(n >= 2, "one digit divisors have their own path");
        debug_assert!(v[n - 1] >> (DIGIT_BITS - 1) == 1, "divisor is not normalized");
        debug_assert!(u.len() >= n);
        let m = u.len() - n;

        let mut r = DigitBuf::zeroed(u.len() + 1);
        r.as_mut_slice()[..u.len()].copy_from_slice(u);
        let mut q = vec![0; m + 1];

        let v1 = v[n - 1] as DoubleDigit;
        let v2 = v[n - 2] as DoubleDigit;
        for j in (0..=m).rev() {
            let r2 = r[j + n] as DoubleDigit;
            let r1 = r[j + n - 1] as DoubleDigit;
            let r0 = r[j + n - 2] as DoubleDigit;
            debug_assert!(r2 <= v1, "remainder invariant broken");

            let num = r2 << DIGIT_BITS | r1;
            let (mut qhat, mut rhat);
            if r2 == v1 {
                qhat = Digit::MAX as DoubleDigit;
                rhat = num - qhat * v1;
            } else {
                qhat = num / v1;
                rhat = num % v1;
            }
            while rhat >> DIGIT_BITS == 0 && qhat * v2 > (rhat << DIGIT_BITS | r0) {
                qhat -= 1;
                rhat += v1;
            }

            // multiply and subtract
            let mut borrow: DoubleDigit = 0;
            for i in 0..n {
                let p = qhat * v[i] as DoubleDigit + borrow;
                borrow = p >> DIGIT_BITS;
                let (res, underflow) = r[j + i].overflowing_sub(p as Digit);
                r[j + i] = res;
                borrow += DoubleDigit::from(underflow);
            }
            let (res, underflow) = r[j + n].overflowing_sub(borrow as Digit);
            r[j + n] = res;

            if underflow {
                // the estimate was one too high, add the divisor back
                qhat -= 1;
                let mut carry = false;
                for i in 0..n {
                    (r[j + i], carry) = carrying_add(r[j + i], v[i], carry);
                }
                r[j + n] = r[j + n].wrapping_add(Digit::from(carry));
            }
            q[j] = qhat as Digit;
        }

        let mut r = r.into_vec();
        r.truncate(n);
        (q, r)
    }

    /// divide-and-conquer division: split the dividend relative to the
    /// divisor, divide the upper part, fold the partial remainder onto the
    /// lower part and divide again. Bottoms out in [`div_rem_knuth`].
    /// Same normalization contract as the base case.
    pub(super) fn div_rem_large(u: &[Digit], v: &[Digit]) -> (Vec<Digit>, Vec<Digit>) {
        let u = trim_slice(u);
        let n = v.len();
        if compare_slices(u, v) == Ordering::Less {
            return (vec![], u.to_vec());
        }
        let m = u.len();
        if n <= DC_DIVISOR_THRESHOLD || m - n <= DC_QUOTIENT_THRESHOLD {
            return div_rem_knuth(u, v);
        }

        // split the quotient range in half
        let k = (m - n + 1) / 2;
        let (u_lo, u_hi) = u.split_at(k);
        let (q1, r1) = div_rem_large(u_hi, v);

        // fold: (r1 << k digits) + u_lo
        let mut folded = Vec::with_capacity(k + r1.len());
        folded.extend_from_slice(u_lo);
        folded.extend_from_slice(&r1);
        let (q2, r2) = div_rem_large(&folded, v);

        // stitch: (q1 << k digits) + q2, where q2 < B^k
        debug_assert!(trim_slice(&q2).len() <= k, "lower quotient exceeds its digit window");
        let mut q = q2;
        let q1 = trim_slice(&q1);
        if !q1.is_empty() {
            q.resize(k, 0);
            q.extend_from_slice(q1);
        }
        (q, r2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::rng::seeded_rng;

    mod t_add {
        use super::*;

        #[test]
        fn carries_through_zero_run() {
            let mut lhs = BigInt::from_le_digits([Digit::MAX, Digit::MAX, 1]);
            add::assign(&mut lhs, &BigInt::from(1u32));
            assert_eq!(lhs, BigInt::from_le_digits([0, 0, 2]));
        }
        #[test]
        fn extends_shorter_lhs() {
            let mut lhs = BigInt::from(1u32);
            add::assign(&mut lhs, &BigInt::from_le_digits([Digit::MAX, 7]));
            assert_eq!(lhs, BigInt::from_le_digits([0, 8]));
        }
        #[test]
        fn assign_to_zero() {
            let mut lhs = BigInt::ZERO;
            add::assign(&mut lhs, &BigInt::from(1u32));
            assert_eq!(lhs, BigInt::from(1u32));
        }
        #[test]
        fn digit_assign_carries() {
            let mut lhs = BigInt::from_le_digits([Digit::MAX, Digit::MAX]);
            add::digit_assign(&mut lhs, 1);
            assert_eq!(lhs, BigInt::from_le_digits([0, 0, 1]));
        }
    }

    mod t_sub {
        use super::*;

        #[test]
        fn borrows_through_zero_run() {
            let mut lhs = BigInt::from_le_digits([0, 0, 2]);
            sub::assign_smaller(&mut lhs, &BigInt::from(1u32));
            assert_eq!(lhs, BigInt::from_le_digits([Digit::MAX, Digit::MAX, 1]));
        }
        #[test]
        fn equal_goes_to_zero() {
            let mut lhs = BigInt::from(0x1122_3344_5566_7788u64);
            sub::assign_smaller(&mut lhs, &BigInt::from(0x1122_3344_5566_7788u64));
            assert_eq!(lhs, BigInt::ZERO);
        }
    }

    mod t_mul {
        use super::*;

        #[test]
        fn small_cross_check() {
            for (lhs, rhs) in [(3u64, 7u64), (0xffff_ffff, 0xffff_ffff), (1 << 40, 1 << 23)] {
                assert_eq!(
                    mul::naive(&BigInt::from(lhs), &BigInt::from(rhs)),
                    BigInt::from(lhs as u128 * rhs as u128),
                );
            }
        }
        #[test]
        fn all_ones_square() {
            // (B^3 - 1)^2 == B^6 - 2 B^3 + 1
            let b3_minus_1 = BigInt::from_le_digits([Digit::MAX; 3]);
            let expected = BigInt::from_le_digits([1, 0, 0, Digit::MAX - 1, Digit::MAX, Digit::MAX]);
            assert_eq!(mul::naive(&b3_minus_1, &b3_minus_1), expected);
            assert_eq!(mul::square(&b3_minus_1), expected);
        }
        #[test]
        fn square_matches_naive() {
            let (seed, mut rng) = seeded_rng();
            for _ in 0..20 {
                let value = BigInt::new_random(1..=40, &mut rng);
                assert_eq!(
                    mul::square(&value),
                    mul::naive(&value, &value),
                    "square != naive for {value:?} with seed {seed:?}"
                );
            }
        }
        #[test]
        fn digit_at_offset_keeps_low_digits() {
            let mut value = BigInt::from_le_digits([5, 1]);
            mul::assign_mul_digit_at_offset(&mut value, 3, 1);
            assert_eq!(value, BigInt::from_le_digits([5, 3]));
        }
    }

    mod t_div {
        use super::*;

        fn check_u128(lhs: u128, rhs: u128) {
            let (q, r) = div::div_mod(&BigInt::from(lhs), &BigInt::from(rhs));
            assert_eq!(q, BigInt::from(lhs / rhs), "{lhs} / {rhs}");
            assert_eq!(r, BigInt::from(lhs % rhs), "{lhs} % {rhs}");
        }

        #[test]
        fn single_digit_divisor() {
            check_u128(0x1234_5678_9abc_def0_1111_2222_3333_4444, 0x0fed_cba9);
            check_u128(u128::MAX, 3);
            check_u128(7, 7);
        }
        #[test]
        fn smaller_dividend() {
            check_u128(5, 0x1_0000_0000_0000);
        }
        #[test]
        fn knuth_path() {
            check_u128(u128::MAX, 0xffff_ffff_0000_0001);
            check_u128(0x8000_0000_0000_0000_0000_0000_0000_0000, 0x8000_0000_0000_0001);
            check_u128(55_402_179_209_251_644_110_543_835_108_628_647_875, 7_015_904_223_016_035_028_600_428_233_219_344_947);
        }
        #[test]
        fn knuth_needs_correction_step() {
            // top digits equal forces the qhat == B-1 branch
            check_u128(0xffff_ffff_0000_0000_0000_0000, 0xffff_ffff_8000_0000);
        }
        #[test]
        fn exact_multiple() {
            let lhs = BigInt::from(0xffee_ddcc_bbaa_9988_7766_5544_3322_1100u128);
            let square = mul::square(&lhs);
            let (q, r) = div::div_mod(&square, &lhs);
            assert_eq!(q, lhs);
            assert_eq!(r, BigInt::ZERO);
        }

        #[test]
        fn large_path_identity() {
            let (seed, mut rng) = seeded_rng();
            // 100-digit dividends over 45-digit divisors take the
            // divide-and-conquer path (thresholds are 40/32)
            for _ in 0..4 {
                let lhs = BigInt::new_random(396..=400, &mut rng);
                let rhs = BigInt::new_random(178..=180, &mut rng);
                let (q, r) = div::div_mod(&lhs, &rhs);
                assert!(r < rhs, "remainder not reduced with seed {seed:?}");
                let recombined = mul::naive(&q, &rhs) + &r;
                assert_eq!(recombined, lhs, "q*d + r != n with seed {seed:?}");
            }
        }
        #[test]
        fn remainder_only_matches() {
            let lhs = BigInt::from(0x1234_5678_9abc_def0_1111_2222_3333_4444u128);
            let (_, r) = div::div_mod(&lhs, &BigInt::from(97u32));
            assert_eq!(div::rem_digit(lhs.digits.as_slice(), 97), r.digits.first().copied().unwrap_or(0));
        }
    }
}
