// SPDX-License-Identifier: MPL-2.0
//! arbitrary-precision signed integers as a sign over a little-endian `u32`
//! digit array, with divide-and-conquer division and decimal conversion.
pub mod big_int;

pub use big_int::{
    signed::{BigInt as BigIInt, Sign, SigNum},
    unsigned::BigInt as BigUInt,
    ArithmeticError, ParseBigIntError, TryFromBigIntError,
};

pub mod util {
    pub mod boo;
    pub mod rng;
}
