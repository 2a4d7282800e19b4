// SPDX-License-Identifier: MPL-2.0
use super::unsigned::BigInt;
use crate::util::boo::{Boo, Moo};

macro_rules! try_all {
    ($lhs:ident, $rhs:ident $(, )?) => {};
    ($lhs:ident, $rhs:ident, $($rule:tt)::*, $($tail:tt)*) => {
        if <$($rule)::* as MathShortcut<super::math_shortcuts::Left>>::can_shortcut(&$lhs, &$rhs) {
            return <$($rule)::* as MathShortcut<super::math_shortcuts::Left>>::do_shortcut($lhs, $rhs);
        }
        if <$($rule)::* as MathShortcut<super::math_shortcuts::Right>>::can_shortcut(&$lhs, &$rhs) {
            return <$($rule)::* as MathShortcut<super::math_shortcuts::Right>>::do_shortcut($lhs, $rhs);
        }
        super::math_shortcuts::try_all!($lhs, $rhs, $($tail)*);
    };
}
pub(crate) use try_all;

pub trait Side {
    #[allow(dead_code)]
    fn select<T>(l: T, r: T) -> T;
}
pub struct Left;
impl Side for Left {
    fn select<T>(l: T, _: T) -> T {
        l
    }
}
pub struct Right;
impl Side for Right {
    fn select<T>(_: T, r: T) -> T {
        r
    }
}

pub trait MathShortcut<S: Side> {
    type Res<'b>;

    /// can the operation be made significantly easier by using special info
    /// about one side. For example 0 - x = -x
    fn can_shortcut(lhs: &BigInt, rhs: &BigInt) -> bool;
    /// apply the shortcut
    fn do_shortcut<'b>(lhs: Boo<'b, BigInt>, rhs: Boo<'b, BigInt>) -> Self::Res<'b>;
}
/// refers its methods directly to the rhs impl, with flipped parameters for
/// the lhs impl. For commutative shortcuts like 0 + x = x = x + 0
pub trait MathShortcutFlip {
    fn can_shortcut(lhs: &BigInt, rhs: &BigInt) -> bool;
    fn do_shortcut<'b>(lhs: Boo<'b, BigInt>, rhs: Boo<'b, BigInt>) -> Moo<'b, BigInt>;
}
impl<Flip: MathShortcutFlip> MathShortcut<Right> for Flip {
    type Res<'b> = Moo<'b, BigInt>;

    fn can_shortcut(lhs: &BigInt, rhs: &BigInt) -> bool {
        <Self as MathShortcutFlip>::can_shortcut(lhs, rhs)
    }
    fn do_shortcut<'b>(lhs: Boo<'b, BigInt>, rhs: Boo<'b, BigInt>) -> Moo<'b, BigInt> {
        <Self as MathShortcutFlip>::do_shortcut(lhs, rhs)
    }
}
impl<Flip: MathShortcutFlip> MathShortcut<Left> for Flip {
    type Res<'b> = Moo<'b, BigInt>;

    fn can_shortcut(lhs: &BigInt, rhs: &BigInt) -> bool {
        <Self as MathShortcutFlip>::can_shortcut(rhs, lhs)
    }
    fn do_shortcut<'b>(lhs: Boo<'b, BigInt>, rhs: Boo<'b, BigInt>) -> Moo<'b, BigInt> {
        <Self as MathShortcutFlip>::do_shortcut(rhs, lhs)
    }
}

/// result is lhs; when rhs held the `&mut`, the result has to be stored there
pub(super) fn get_lhs<'b, B: Clone>(lhs: Boo<'b, B>, rhs: Boo<'b, B>) -> Moo<'b, B> {
    match (lhs, rhs) {
        (lhs, Boo::BorrowedMut(rhs)) => {
            *rhs = lhs.cloned();
            Moo::BorrowedMut(rhs)
        }
        (lhs, _) => Moo::<B>::from(lhs),
    }
}

pub mod add {
    use super::{BigInt, Boo, MathShortcutFlip, Moo};

    pub struct Zero;
    impl MathShortcutFlip for Zero {
        fn can_shortcut(_lhs: &BigInt, rhs: &BigInt) -> bool {
            rhs.is_zero()
        }
        fn do_shortcut<'b>(lhs: Boo<'b, BigInt>, rhs: Boo<'b, BigInt>) -> Moo<'b, BigInt> {
            super::get_lhs(lhs, rhs)
        }
    }
}

pub mod mul {
    use super::{BigInt, Boo, MathShortcutFlip, Moo};

    pub struct ByZero;
    impl MathShortcutFlip for ByZero {
        fn can_shortcut(_lhs: &BigInt, rhs: &BigInt) -> bool {
            rhs.is_zero()
        }
        fn do_shortcut<'b>(lhs: Boo<'b, BigInt>, rhs: Boo<'b, BigInt>) -> Moo<'b, BigInt> {
            match (lhs, rhs) {
                (Boo::BorrowedMut(lhs), rhs) => {
                    *lhs = rhs.cloned();
                    Moo::BorrowedMut(lhs)
                }
                (_, Boo::BorrowedMut(rhs)) => Moo::BorrowedMut(rhs),
                (_, rhs) => Moo::Owned(rhs.cloned()),
            }
        }
    }
    pub struct ByOne;
    impl MathShortcutFlip for ByOne {
        fn can_shortcut(_lhs: &BigInt, rhs: &BigInt) -> bool {
            rhs.is_one()
        }
        fn do_shortcut<'b>(lhs: Boo<'b, BigInt>, rhs: Boo<'b, BigInt>) -> Moo<'b, BigInt> {
            super::get_lhs(lhs, rhs)
        }
    }
    pub struct ByPowerOfTwo;
    impl MathShortcutFlip for ByPowerOfTwo {
        fn can_shortcut(_lhs: &BigInt, rhs: &BigInt) -> bool {
            rhs.is_power_of_two()
        }
        fn do_shortcut<'b>(lhs: Boo<'b, BigInt>, rhs: Boo<'b, BigInt>) -> Moo<'b, BigInt> {
            let pow = rhs.bit_len() - 1;
            let mut either = super::get_lhs(lhs, rhs);
            *either <<= pow;
            either
        }
    }
}

pub mod div {
    use super::{BigInt, Boo, MathShortcut, Moo};

    pub struct Smaller;
    impl MathShortcut<super::Left> for Smaller {
        type Res<'b> = (Moo<'b, BigInt>, Moo<'b, BigInt>);

        fn can_shortcut(lhs: &BigInt, rhs: &BigInt) -> bool {
            lhs < rhs
        }
        fn do_shortcut<'b>(lhs: Boo<'b, BigInt>, rhs: Boo<'b, BigInt>) -> Self::Res<'b> {
            let (dividend, lhs) = lhs.take_keep_ref();
            (
                Moo::from_with_value(lhs, BigInt::ZERO),
                Moo::from_with_value(rhs, dividend),
            )
        }
    }
    pub struct Same;
    impl MathShortcut<super::Left> for Same {
        type Res<'b> = (Moo<'b, BigInt>, Moo<'b, BigInt>);

        fn can_shortcut(lhs: &BigInt, rhs: &BigInt) -> bool {
            lhs == rhs
        }
        fn do_shortcut<'b>(lhs: Boo<'b, BigInt>, rhs: Boo<'b, BigInt>) -> Self::Res<'b> {
            (
                Moo::from_with_value(lhs, BigInt::ONE),
                Moo::from_with_value(rhs, BigInt::ZERO),
            )
        }
    }
    pub struct ByPowerOfTwo;
    impl MathShortcut<super::Right> for ByPowerOfTwo {
        type Res<'b> = (Moo<'b, BigInt>, Moo<'b, BigInt>);

        fn can_shortcut(_lhs: &BigInt, rhs: &BigInt) -> bool {
            rhs.is_power_of_two()
        }
        fn do_shortcut<'b>(lhs: Boo<'b, BigInt>, rhs: Boo<'b, BigInt>) -> Self::Res<'b> {
            let pow = rhs.bit_len() - 1;
            let (q, r) = BigInt::shr_internal(lhs, pow);
            (q, Moo::from_with_value(rhs, r))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NON_ZERO: u32 = 42;

    fn can_shortcut<M>(lhs: u32, rhs: u32, l_result: bool, r_result: bool)
    where
        M: MathShortcut<Left> + MathShortcut<Right>,
    {
        let lhs = BigInt::from(lhs);
        let rhs = BigInt::from(rhs);
        assert_eq!(
            <M as MathShortcut<Left>>::can_shortcut(&lhs, &rhs),
            l_result,
            "lhs",
        );
        assert_eq!(
            <M as MathShortcut<Right>>::can_shortcut(&lhs, &rhs),
            r_result,
            "rhs",
        );
    }

    mod t_add {
        use super::*;

        #[test]
        fn can_use_shortcut_zero() {
            can_shortcut::<add::Zero>(0, 0, true, true);
            can_shortcut::<add::Zero>(NON_ZERO, 0, false, true);
            can_shortcut::<add::Zero>(0, NON_ZERO, true, false);
            can_shortcut::<add::Zero>(NON_ZERO, NON_ZERO, false, false);
        }
        #[test]
        fn use_shortcut_keeps_other_side() {
            let res = <add::Zero as MathShortcut<Right>>::do_shortcut(
                Boo::from(BigInt::from(NON_ZERO)),
                Boo::from(BigInt::ZERO),
            );
            assert_eq!(res.expect_owned("no mut given"), BigInt::from(NON_ZERO));
        }
        #[test]
        fn use_shortcut_writes_into_mut_rhs() {
            let mut rhs = BigInt::ZERO;
            let lhs = BigInt::from(NON_ZERO);
            let _ = <add::Zero as MathShortcut<Right>>::do_shortcut(
                Boo::from(&lhs),
                Boo::from(&mut rhs),
            );
            assert_eq!(rhs, BigInt::from(NON_ZERO));
        }
    }

    mod t_mul {
        use super::*;

        #[test]
        fn can_use_shortcut_one() {
            can_shortcut::<mul::ByOne>(1, 1, true, true);
            can_shortcut::<mul::ByOne>(NON_ZERO, 1, false, true);
            can_shortcut::<mul::ByOne>(1, NON_ZERO, true, false);
            can_shortcut::<mul::ByOne>(NON_ZERO, NON_ZERO, false, false);
        }
        #[test]
        fn can_use_shortcut_pow2() {
            can_shortcut::<mul::ByPowerOfTwo>(0b1000_0000, NON_ZERO, true, false);
            can_shortcut::<mul::ByPowerOfTwo>(NON_ZERO, 0b1000_0000, false, true);
        }
        #[test]
        fn use_shortcut_pow2_shifts() {
            let res = <mul::ByPowerOfTwo as MathShortcut<Right>>::do_shortcut(
                Boo::from(BigInt::from(NON_ZERO)),
                Boo::from(BigInt::from(0b1000_0000u32)),
            );
            assert_eq!(res.expect_owned("no mut given"), BigInt::from(NON_ZERO << 7));
        }
    }

    mod t_div {
        use super::*;

        #[test]
        fn use_shortcut_smaller() {
            let (q, r) = <div::Smaller as MathShortcut<Left>>::do_shortcut(
                Boo::from(BigInt::from(1u32)),
                Boo::from(BigInt::from(3u32)),
            );
            assert_eq!(q.expect_owned("no mut given"), BigInt::ZERO);
            assert_eq!(r.expect_owned("no mut given"), BigInt::from(1u32));
        }
        #[test]
        fn use_shortcut_same() {
            let (q, r) = <div::Same as MathShortcut<Left>>::do_shortcut(
                Boo::from(BigInt::from(7u32)),
                Boo::from(BigInt::from(7u32)),
            );
            assert_eq!(q.expect_owned("no mut given"), BigInt::ONE);
            assert_eq!(r.expect_owned("no mut given"), BigInt::ZERO);
        }
        #[test]
        fn use_shortcut_pow2() {
            let (q, r) = <div::ByPowerOfTwo as MathShortcut<Right>>::do_shortcut(
                Boo::from(BigInt::from(0b1101_0110u32)),
                Boo::from(BigInt::from(0b1_0000u32)),
            );
            assert_eq!(q.expect_owned("no mut given"), BigInt::from(0b1101u32));
            assert_eq!(r.expect_owned("no mut given"), BigInt::from(0b0110u32));
        }
    }
}
