// SPDX-License-Identifier: MPL-2.0
use std::ops::{Deref, DerefMut};

/// Borrowed or Owned, used to capture all possible operand variants when
/// implementing traits for Self/&Self/&mut Self
#[derive(Debug, derive_more::From)]
pub enum Boo<'b, T> {
    Owned(T),
    Borrowed(&'b T),
    BorrowedMut(&'b mut T),
}

impl<T> Deref for Boo<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Owned(t) => t,
            Self::Borrowed(t) => t,
            Self::BorrowedMut(t) => t,
        }
    }
}
impl<T> AsRef<T> for Boo<'_, T> {
    fn as_ref(&self) -> &T {
        self
    }
}

impl<'b, T> Boo<'b, T> {
    /// gives an owned instance of `T` by using `deref` on the held reference
    pub fn into_owned(self, deref: impl FnOnce(&'b T) -> T) -> T {
        match self {
            Self::Owned(t) => t,
            Self::Borrowed(t) => deref(t),
            Self::BorrowedMut(t) => deref(t),
        }
    }

    pub fn try_get_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Owned(t) => Some(t),
            Self::BorrowedMut(t) => Some(&mut **t),
            Self::Borrowed(_) => None,
        }
    }

    /// gives an owned instance of `T` by cloning the held reference
    pub fn cloned(self) -> T
    where
        T: Clone,
    {
        self.into_owned(T::clone)
    }
    pub fn copied(self) -> T
    where
        T: Copy,
    {
        self.into_owned(|&it| it)
    }

    /// moves the current value out while keeping hold of a `&mut` slot, so a
    /// result can be stored back into it later via `Moo::from_with_value`
    pub fn take_keep_ref(self) -> (T, Self)
    where
        T: Clone + Default,
    {
        match self {
            Self::Owned(t) => (t, Self::Owned(T::default())),
            Self::Borrowed(t) => (t.clone(), Self::Borrowed(t)),
            Self::BorrowedMut(t) => (std::mem::take(t), Self::BorrowedMut(t)),
        }
    }
}

/// Mutable ref or Owned, the result side of `Boo`: an operation either wrote
/// through the `&mut` it was given or produced a fresh value
#[derive(Debug, derive_more::From)]
pub enum Moo<'b, T> {
    Owned(T),
    BorrowedMut(&'b mut T),
}

impl<'b, T: Clone> From<Boo<'b, T>> for Moo<'b, T> {
    fn from(value: Boo<'b, T>) -> Self {
        match value {
            Boo::Owned(t) => Self::Owned(t),
            Boo::Borrowed(t) => Self::Owned(t.clone()),
            Boo::BorrowedMut(t) => Self::BorrowedMut(t),
        }
    }
}
impl<'b, T> From<Moo<'b, T>> for Boo<'b, T> {
    fn from(value: Moo<'b, T>) -> Self {
        match value {
            Moo::Owned(t) => Self::Owned(t),
            Moo::BorrowedMut(t) => Self::BorrowedMut(t),
        }
    }
}

impl<'b, T> Moo<'b, T> {
    /// stores `value` through `slot` when it is a `&mut`, otherwise owns it
    pub fn from_with_value(slot: Boo<'b, T>, value: T) -> Self {
        match slot {
            Boo::BorrowedMut(t) => {
                *t = value;
                Self::BorrowedMut(t)
            }
            Boo::Owned(_) | Boo::Borrowed(_) => Self::Owned(value),
        }
    }

    pub fn expect_owned(self, msg: impl AsRef<str>) -> T {
        match self {
            Self::Owned(t) => t,
            Self::BorrowedMut(_) => panic!("{}", msg.as_ref()),
        }
    }
    pub fn expect_mut(self, msg: impl AsRef<str>) -> &'b mut T {
        match self {
            Self::BorrowedMut(t) => t,
            Self::Owned(_) => panic!("{}", msg.as_ref()),
        }
    }

    pub fn get_mut(&mut self) -> &mut T {
        match self {
            Self::Owned(t) => t,
            Self::BorrowedMut(t) => t,
        }
    }

    pub fn cloned(self) -> T
    where
        T: Clone,
    {
        match self {
            Self::Owned(t) => t,
            Self::BorrowedMut(t) => t.clone(),
        }
    }
}

impl<T> Deref for Moo<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Owned(t) => t,
            Self::BorrowedMut(t) => t,
        }
    }
}
impl<T> DerefMut for Moo<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.get_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_with_value_writes_through() {
        let mut spot = 7;
        let moo = Moo::from_with_value(Boo::from(&mut spot), 42);
        assert!(matches!(moo, Moo::BorrowedMut(_)));
        assert_eq!(spot, 42);
    }
    #[test]
    fn from_with_value_owns_otherwise() {
        let spot = 7;
        let moo = Moo::from_with_value(Boo::from(&spot), 42);
        assert_eq!(moo.expect_owned("no mut given"), 42);
    }
    #[test]
    fn take_keep_ref_takes_mut() {
        let mut spot: i32 = 7;
        let (value, slot) = Boo::BorrowedMut(&mut spot).take_keep_ref();
        assert_eq!(value, 7);
        let _ = Moo::from_with_value(slot, 3);
        assert_eq!(spot, 3);
    }
}
