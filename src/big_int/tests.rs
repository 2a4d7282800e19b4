// SPDX-License-Identifier: MPL-2.0
use crate::util::boo::{Boo, Moo};
use crate::util::rng::seeded_rng;
use crate::{ArithmeticError, BigIInt, BigUInt, SigNum};
use std::str::FromStr;

fn parse(s: &str) -> BigIInt {
    BigIInt::from_str(s).expect("valid decimal input")
}

pub(super) mod big_math {
    use super::*;

    pub fn test_op_commute(
        lhs: impl Into<BigIInt>,
        rhs: impl Into<BigIInt>,
        op: impl for<'b> Fn(Boo<'b, BigIInt>, Boo<'b, BigIInt>) -> Moo<'b, BigIInt>,
        result: impl Into<BigIInt>,
        op_dbg: &str,
    ) {
        let lhs = lhs.into();
        let rhs = rhs.into();
        let result = result.into();

        test_op(lhs.clone(), rhs.clone(), &op, result.clone(), op_dbg);
        test_op(rhs, lhs, op, result, op_dbg);
    }

    /// runs `op` through every owned/borrowed/mutably-borrowed operand
    /// combination and checks both the result and where it was stored
    pub fn test_op(
        lhs: impl Into<BigIInt>,
        rhs: impl Into<BigIInt>,
        op: impl for<'b> Fn(Boo<'b, BigIInt>, Boo<'b, BigIInt>) -> Moo<'b, BigIInt>,
        result: impl Into<BigIInt>,
        op_dbg: impl AsRef<str>,
    ) {
        let lhs = lhs.into();
        let rhs = rhs.into();
        let result = result.into();
        let op_dbg = op_dbg.as_ref();
        let build_msg_id = |t1: &str, t2: &str| format!("{t1}{lhs:?} {op_dbg} {t2}{rhs:?}");
        let validate = |res: Moo<BigIInt>, dbg: &str| {
            assert_eq!(*res, result, "res equals with {dbg}");
        };
        let validate_mut = |res: Moo<BigIInt>, dbg: &str| {
            assert!(matches!(res, Moo::BorrowedMut(_)), "res mut ref with {dbg}");
            validate(res, dbg);
        };
        let validate_non_mut = |res: Moo<BigIInt>, dbg: &str| {
            assert!(matches!(res, Moo::Owned(_)), "res owned with {dbg}");
            validate(res, dbg);
        };
        {
            let mut lhs = lhs.clone();
            let res = op(Boo::from(&mut lhs), Boo::from(&rhs));
            let msg = build_msg_id("&mut", "&");
            validate_mut(res, &msg);
            assert_eq!(lhs, result, "assigned with {msg}");
        }
        {
            let mut lhs = lhs.clone();
            let res = op(Boo::from(&mut lhs), Boo::from(rhs.clone()));
            let msg = build_msg_id("&mut", "");
            validate_mut(res, &msg);
            assert_eq!(lhs, result, "assigned with {msg}");
        }

        {
            let mut rhs = rhs.clone();
            let res = op(Boo::from(&lhs), Boo::from(&mut rhs));
            let msg = build_msg_id("&", "&mut");
            validate_mut(res, &msg);
            assert_eq!(rhs, result, "assigned with {msg}");
        }
        {
            let mut rhs = rhs.clone();
            let res = op(Boo::from(lhs.clone()), Boo::from(&mut rhs));
            let msg = build_msg_id("", "&mut");
            validate_mut(res, &msg);
            assert_eq!(rhs, result, "assigned with {msg}");
        }

        let res = op(Boo::from(&lhs), Boo::from(&rhs));
        validate_non_mut(res, &format!("res equals with {}", build_msg_id("&", "&")));

        let res = op(Boo::from(lhs.clone()), Boo::from(&rhs));
        validate_non_mut(res, &format!("res equals with {}", build_msg_id("", "&")));

        let res = op(Boo::from(&lhs), Boo::from(rhs.clone()));
        validate_non_mut(res, &format!("res equals with {}", build_msg_id("&", "")));

        let res = op(Boo::from(lhs.clone()), Boo::from(rhs.clone()));
        validate_non_mut(res, &format!("res equals with {}", build_msg_id("", "")));
    }

    #[test]
    fn add_overflow() {
        test_op_commute(
            0xffff_ffff_ffff_ffffu64,
            1u8,
            |a, b| BigIInt::add(a, b),
            0x1_0000_0000_0000_0000u128,
            "+",
        );
    }
    #[test]
    fn add_middle_overflow() {
        test_op_commute(
            0x1000_0000_ffff_ffff_ffff_ffffu128,
            1u8,
            |a, b| BigIInt::add(a, b),
            0x1000_0001_0000_0000_0000_0000u128,
            "+",
        );
    }
    #[test]
    fn add_two_negative() {
        test_op_commute(
            -0x1122_3344_5566_7788i128,
            -0x8877_6655_4433_2211i128,
            |a, b| BigIInt::add(a, b),
            -0x9999_9999_9999_9999i128,
            "+",
        );
    }
    #[test]
    fn add_mixed_sign() {
        test_op(
            0x1122_3344_5566_7788i128,
            -0x8877_6655_4433_2211i128,
            |a, b| BigIInt::sub(a, b),
            0x9999_9999_9999_9999i128,
            "-",
        );
        test_op_commute(
            0x1122_3344_5566_7788i128,
            0x8877_6655_4433_2211i128,
            |a, b| BigIInt::add(a, b),
            0x9999_9999_9999_9999i128,
            "+",
        );
    }
    #[test]
    fn sub_big() {
        test_op(
            0x9999_9999_9999_9999i128,
            0x8877_6655_4433_2211i128,
            |a, b| BigIInt::sub(a, b),
            0x1122_3344_5566_7788i128,
            "-",
        );
        test_op_commute(
            0x9999_9999_9999_9999i128,
            -0x8877_6655_4433_2211i128,
            |a, b| BigIInt::add(a, b),
            0x1122_3344_5566_7788i128,
            "+",
        );
    }
    #[test]
    fn sub_sign() {
        test_op(1u8, 2u8, |a, b| BigIInt::sub(a, b), -1i8, "-");
        test_op(-1i8, -2i8, |a, b| BigIInt::sub(a, b), 1u8, "-");
    }
    #[test]
    fn sub_overflow() {
        test_op(
            0x1_0000_0000_0000_0000_0000_0000_0000i128,
            1u8,
            |a, b| BigIInt::sub(a, b),
            0xffff_ffff_ffff_ffff_ffff_ffff_ffffi128,
            "-",
        );
    }
    #[test]
    fn mul() {
        test_op_commute(7u8, 6u8, |a, b| BigIInt::mul(a, b), 42u8, "*");
        test_op_commute(
            30_000_000_700_000u64,
            60u8,
            |a, b| BigIInt::mul(a, b),
            1_800_000_042_000_000u64,
            "*",
        );
    }
    #[test]
    fn mul_sign() {
        test_op_commute(3u8, 3u8, |a, b| BigIInt::mul(a, b), 9u8, "*");
        test_op_commute(-3i8, 3u8, |a, b| BigIInt::mul(a, b), -9i8, "*");
        test_op_commute(3u8, -3i8, |a, b| BigIInt::mul(a, b), -9i8, "*");
        test_op_commute(-3i8, -3i8, |a, b| BigIInt::mul(a, b), 9u8, "*");
    }
    #[test]
    fn mul_both_big() {
        test_op_commute(
            0x0fee_ddcc_bbaa_9988_7766_5544_3322_1100u128,
            2u8,
            |a, b| BigIInt::mul(a, b),
            0x1fdd_bb99_7755_3310_eecc_aa88_6644_2200u128,
            "*",
        );
    }
    #[test]
    fn div_sign() {
        test_op(7u8, 3u8, |a, b| BigIInt::div(a, b), 2u8, "/");
        test_op(-7i8, 3u8, |a, b| BigIInt::div(a, b), -2i8, "/");
        test_op(7u8, -3i8, |a, b| BigIInt::div(a, b), -2i8, "/");
        test_op(-7i8, -3i8, |a, b| BigIInt::div(a, b), 2u8, "/");
    }
    #[test]
    fn rem_follows_dividend() {
        test_op(7u8, 3u8, |a, b| BigIInt::rem(a, b), 1u8, "%");
        test_op(-7i8, 3u8, |a, b| BigIInt::rem(a, b), -1i8, "%");
        test_op(7u8, -3i8, |a, b| BigIInt::rem(a, b), 1u8, "%");
        test_op(-7i8, -3i8, |a, b| BigIInt::rem(a, b), -1i8, "%");
    }
    #[test]
    fn bit_ops() {
        test_op_commute(
            0x1111_0000_0000_0000_1111_0101_0101u128,
            0x0101_0101_0101_1111_0000u128,
            |a, b| BigIInt::bitor(a, b),
            0x1111_0000_0101_0101_1111_1111_0101u128,
            "|",
        );
        test_op_commute(
            0x1111_0000_0000_0000_1111_0101_0101u128,
            0x0101_0101_0101_1111_0000u128,
            |a, b| BigIInt::bitxor(a, b),
            0x1111_0000_0101_0101_1010_1010_0101u128,
            "^",
        );
        test_op_commute(
            0x1111_0000_0000_0000_1111_0101_0101u128,
            0x0101_0101_0101_1111_0000u128,
            |a, b| BigIInt::bitand(a, b),
            0x0101_0101_0000u128,
            "&",
        );
    }
}

mod worked_examples {
    use super::*;

    #[test]
    fn doubling_a_twenty_digit_number() {
        assert_eq!(
            parse("12345678901234567890") * parse("2"),
            parse("24691357802469135780")
        );
    }
    #[test]
    fn opposite_ones_collapse_to_the_unique_zero() {
        let sum = parse("-1") + parse("1");
        assert_eq!(sum, parse("0"));
        assert_eq!(sum.signum(), SigNum::Zero);
        assert_eq!(sum.digit_len(), 0);
    }
    #[test]
    fn power_of_ten_division() {
        let dividend = parse(&format!("1{}", "0".repeat(50)));
        let divisor = parse(&format!("1{}", "0".repeat(25)));
        let (q, r) = BigIInt::div_mod(&dividend, &divisor);
        assert_eq!(*q, divisor);
        assert_eq!(*r, BigIInt::ZERO);
    }
    #[test]
    fn zero_formats_as_zero() {
        assert_eq!(parse("0").to_string(), "0");
    }
    #[test]
    fn division_by_zero_is_reported() {
        assert_eq!(
            BigIInt::try_div_mod(parse("7"), parse("0")).err(),
            Some(ArithmeticError::DivideByZero)
        );
    }
    #[test]
    fn two_thousand_digit_roundtrip() {
        let text: String = format!("-{}", "5647382910".repeat(200));
        assert_eq!(parse(&text).to_string(), text);
    }
}

mod identities {
    use super::*;

    #[test]
    fn add_sub_roundtrip() {
        let (seed, mut rng) = seeded_rng();
        for _ in 0..30 {
            let a = BigIInt::new_random(1..=48, &mut rng);
            let b = BigIInt::new_random(1..=48, &mut rng);
            assert_eq!(&a + &b - &b, a, "a + b - b == a with seed {seed:?}");
            assert_eq!(&a * &b, &b * &a, "a * b == b * a with seed {seed:?}");
        }
    }
    #[test]
    fn division_recombines() {
        let (seed, mut rng) = seeded_rng();
        for _ in 0..30 {
            let a = BigIInt::new_random(1..=64, &mut rng);
            let b = BigIInt::new_random(1..=32, &mut rng);
            let (q, r) = BigIInt::div_mod(&a, &b);
            assert_eq!(
                &*q * &b + &*r,
                a,
                "(a / b) * b + a % b == a with seed {seed:?}"
            );
            assert!(
                r.is_zero() || r.signum() == a.signum(),
                "sign(a % b) == sign(a) with seed {seed:?}"
            );
            assert!(r.abs() < b.abs(), "|r| < |b| with seed {seed:?}");
        }
    }
    #[test]
    fn comparison_consistency() {
        let (seed, mut rng) = seeded_rng();
        for _ in 0..30 {
            let a = BigIInt::new_random(1..=16, &mut rng);
            let b = BigIInt::new_random(1..=16, &mut rng);
            let c = BigIInt::new_random(1..=16, &mut rng);
            assert_eq!(a.cmp(&b), b.cmp(&a).reverse(), "antisymmetry, seed {seed:?}");
            assert_eq!(a.cmp(&a), std::cmp::Ordering::Equal, "reflexive, seed {seed:?}");
            let mut sorted = [&a, &b, &c];
            sorted.sort();
            assert!(sorted[0] <= sorted[1] && sorted[1] <= sorted[2], "seed {seed:?}");
        }
    }
    #[test]
    fn canonical_after_ops() {
        let (seed, mut rng) = seeded_rng();
        for _ in 0..20 {
            let a = BigIInt::new_random(1..=24, &mut rng);
            let b = BigIInt::new_random(1..=24, &mut rng);
            for value in [&a + &b, &a - &b, &a * &b, &a / &b] {
                assert!(
                    value.abs().le_digits().last().map_or(true, |top| top != 0),
                    "no leading zero digit with seed {seed:?}"
                );
                assert_eq!(
                    value.signum().is_zero(),
                    value.abs().is_zero(),
                    "unique zero with seed {seed:?}"
                );
            }
        }
    }
    #[test]
    fn bit_identities() {
        let (seed, mut rng) = seeded_rng();
        for _ in 0..20 {
            let a = BigIInt::new_random(1..=24, &mut rng);
            assert_eq!(!!a.clone(), a, "~~a == a with seed {seed:?}");
            assert_eq!(&a & &a, a, "a & a == a with seed {seed:?}");
            assert_eq!(&a | &BigIInt::ZERO, a, "a | 0 == a with seed {seed:?}");
            let nonneg = a.abs().clone().with_sign(crate::Sign::Positive);
            for shift in [1usize, 31, 32, 67] {
                assert_eq!(
                    (nonneg.clone() << shift) >> shift,
                    nonneg,
                    "(a << n) >> n == a with seed {seed:?}"
                );
            }
        }
    }
    #[test]
    fn pop_count_of_power_of_two() {
        for shift in [0usize, 1, 31, 32, 100] {
            assert_eq!((BigIInt::ONE << shift).count_ones(), 1, "2^{shift}");
        }
    }
    #[test]
    fn string_roundtrips() {
        let (seed, mut rng) = seeded_rng();
        for _ in 0..20 {
            let a = BigIInt::new_random(1..=40, &mut rng);
            assert_eq!(parse(&a.to_string()), a, "decimal with seed {seed:?}");
            assert_eq!(
                BigIInt::from_hex_str(&a.to_hex_string()),
                Ok(a.clone()),
                "hex with seed {seed:?}"
            );
            assert_eq!(
                BigIInt::from_binary_str(&a.to_binary_string()),
                Ok(a.clone()),
                "binary with seed {seed:?}"
            );
            assert_eq!(
                BigIInt::from_signed_bytes_le(&a.to_signed_bytes_le()),
                a,
                "bytes with seed {seed:?}"
            );
        }
    }
}

mod create {
    use super::*;

    #[test]
    fn sign_digit_pair_roundtrip() {
        let value = parse("-340282366920938463463374607431768211455");
        let (signum, magnitude) = value.clone().split_sign();
        assert_eq!(signum, SigNum::Negative);
        assert_eq!(
            BigIInt::new(crate::Sign::Negative, magnitude),
            value
        );
    }
    #[test]
    fn magnitude_digits_are_little_endian() {
        let value = BigUInt::from(0x1_0000_0002u64);
        assert_eq!(value.le_digits().collect::<Vec<_>>(), [2, 1]);
    }
}
