// src/flags.rs

//! Generic option-set codec for SDL's integer flag fields.
//!
//! SDL's C API passes a set of options as a single `Uint32` with one bit
//! per option. Each wrapper module declares its options as a fieldless
//! enum implementing [`BitFlag`], and [`FlagSet`] converts between a
//! typed set of those options and the raw bitfield in both directions.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{BitOr, BitOrAssign};

/// One named bit-valued option in a fixed enumeration.
///
/// Implementors are fieldless enums whose discriminants are the SDL flag
/// values. `ALL` is the exhaustive catalog of variants; decoding a raw
/// bitfield consults it, so every bit SDL defines for the category must
/// have a variant here. Raw values of sibling variants are expected not
/// to overlap, though this is a contract rather than an enforced rule
/// (`SDL_WINDOW_FULLSCREEN_DESKTOP` deliberately includes the
/// `SDL_WINDOW_FULLSCREEN` bit).
pub trait BitFlag: Copy + Eq + fmt::Debug + 'static {
    /// Every variant of the enumeration, in declaration order.
    const ALL: &'static [Self];

    /// The flag's bit value in the native bitfield.
    fn raw(self) -> u32;

    /// Whether this flag's bit(s) are present in `raw`.
    #[inline]
    fn contained_in(self, raw: u32) -> bool {
        self.raw() & raw != 0
    }
}

/// A set of [`BitFlag`] values from one enumeration, stored encoded.
///
/// The in-memory representation is already the native bitfield, so
/// encoding is free and decoding is a single masking pass over the
/// catalog. Unknown bits in a decoded value are dropped rather than
/// reported; SDL adds flags over time and a stale catalog should not
/// turn a query into an error.
pub struct FlagSet<F: BitFlag> {
    raw: u32,
    _marker: PhantomData<F>,
}

impl<F: BitFlag> FlagSet<F> {
    /// The empty set. Encodes to `0`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            raw: 0,
            _marker: PhantomData,
        }
    }

    /// Decodes a raw bitfield against the catalog.
    ///
    /// Bits not matching any catalog entry are silently dropped, so
    /// `FlagSet::from_raw(raw).raw()` retains exactly the known bits
    /// of `raw`.
    pub fn from_raw(raw: u32) -> Self {
        let known = F::ALL
            .iter()
            .filter(|flag| flag.contained_in(raw))
            .fold(0, |acc, flag| acc | flag.raw());
        Self {
            raw: known,
            _marker: PhantomData,
        }
    }

    /// Encodes the set as the bitwise OR of every member's raw value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.raw
    }

    /// Whether `flag`'s bit(s) are present in the set.
    #[inline]
    pub fn contains(self, flag: F) -> bool {
        flag.contained_in(self.raw)
    }

    /// Adds a flag to the set.
    #[inline]
    pub fn insert(&mut self, flag: F) {
        self.raw |= flag.raw();
    }

    /// Removes a flag from the set.
    #[inline]
    pub fn remove(&mut self, flag: F) {
        self.raw &= !flag.raw();
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.raw == 0
    }

    /// Number of catalog members present in the set.
    pub fn len(self) -> usize {
        F::ALL.iter().filter(|flag| self.contains(**flag)).count()
    }

    /// Iterates over the members in catalog order.
    ///
    /// Catalog order makes enumeration deterministic regardless of how
    /// the set was built.
    pub fn iter(self) -> FlagSetIter<F> {
        FlagSetIter {
            set: self,
            catalog: F::ALL.iter(),
        }
    }
}

/// Iterator over the members of a [`FlagSet`], in catalog order.
pub struct FlagSetIter<F: BitFlag> {
    set: FlagSet<F>,
    catalog: std::slice::Iter<'static, F>,
}

impl<F: BitFlag> Iterator for FlagSetIter<F> {
    type Item = F;

    fn next(&mut self) -> Option<F> {
        self.catalog.find(|flag| self.set.contains(**flag)).copied()
    }
}

impl<F: BitFlag> IntoIterator for FlagSet<F> {
    type Item = F;
    type IntoIter = FlagSetIter<F>;

    fn into_iter(self) -> FlagSetIter<F> {
        self.iter()
    }
}

impl<F: BitFlag> FromIterator<F> for FlagSet<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<F: BitFlag> Extend<F> for FlagSet<F> {
    fn extend<I: IntoIterator<Item = F>>(&mut self, iter: I) {
        for flag in iter {
            self.insert(flag);
        }
    }
}

impl<F: BitFlag> From<F> for FlagSet<F> {
    fn from(flag: F) -> Self {
        let mut set = Self::new();
        set.insert(flag);
        set
    }
}

impl<F: BitFlag> BitOr for FlagSet<F> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            raw: self.raw | rhs.raw,
            _marker: PhantomData,
        }
    }
}

impl<F: BitFlag> BitOrAssign for FlagSet<F> {
    fn bitor_assign(&mut self, rhs: Self) {
        self.raw |= rhs.raw;
    }
}

// Manual impls: deriving would put an `F: Trait` bound on the phantom
// parameter.
impl<F: BitFlag> Clone for FlagSet<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: BitFlag> Copy for FlagSet<F> {}

impl<F: BitFlag> Default for FlagSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: BitFlag> PartialEq for FlagSet<F> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<F: BitFlag> Eq for FlagSet<F> {}

impl<F: BitFlag> fmt::Debug for FlagSet<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestFlag {
        A = 0x1,
        B = 0x2,
        C = 0x4,
    }

    impl BitFlag for TestFlag {
        const ALL: &'static [TestFlag] = &[TestFlag::A, TestFlag::B, TestFlag::C];

        fn raw(self) -> u32 {
            self as u32
        }
    }

    #[test]
    fn empty_set_encodes_to_zero() {
        assert_eq!(FlagSet::<TestFlag>::new().raw(), 0);
        assert!(FlagSet::<TestFlag>::new().is_empty());
    }

    #[test]
    fn zero_decodes_to_empty_set() {
        let set = FlagSet::<TestFlag>::from_raw(0);
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn round_trip_holds_for_known_flags() {
        let subsets: &[&[TestFlag]] = &[
            &[],
            &[TestFlag::A],
            &[TestFlag::B],
            &[TestFlag::C],
            &[TestFlag::A, TestFlag::B],
            &[TestFlag::A, TestFlag::C],
            &[TestFlag::B, TestFlag::C],
            &[TestFlag::A, TestFlag::B, TestFlag::C],
        ];
        for members in subsets {
            let set: FlagSet<TestFlag> = members.iter().copied().collect();
            let decoded = FlagSet::<TestFlag>::from_raw(set.raw());
            assert_eq!(decoded, set, "round trip failed for {:?}", members);
        }
    }

    #[test]
    fn unknown_bits_are_dropped_on_decode() {
        // Catalog covers 0x1, 0x2, 0x4; everything else must vanish.
        let set = FlagSet::<TestFlag>::from_raw(0xFFFF_FFFF);
        assert_eq!(set.raw(), 0x7);
        assert!(set.contains(TestFlag::A));
        assert!(set.contains(TestFlag::B));
        assert!(set.contains(TestFlag::C));

        let set = FlagSet::<TestFlag>::from_raw(0xFFFF_FFF8);
        assert_eq!(set.raw(), 0);
    }

    #[test]
    fn membership_matches_bitwise_and() {
        for raw in 0..8u32 {
            for flag in TestFlag::ALL {
                assert_eq!(
                    FlagSet::<TestFlag>::from_raw(raw).contains(*flag),
                    flag.raw() & raw != 0
                );
            }
        }
    }

    #[test]
    fn decode_0x5_yields_a_and_c() {
        let set = FlagSet::<TestFlag>::from_raw(0x5);
        assert!(set.contains(TestFlag::A));
        assert!(!set.contains(TestFlag::B));
        assert!(set.contains(TestFlag::C));
        assert_eq!(set.len(), 2);

        let reencoded: FlagSet<TestFlag> = [TestFlag::A, TestFlag::C].into_iter().collect();
        assert_eq!(reencoded.raw(), 0x5);
    }

    #[test]
    fn encode_is_order_independent() {
        let ab: FlagSet<TestFlag> = [TestFlag::A, TestFlag::B].into_iter().collect();
        let ba: FlagSet<TestFlag> = [TestFlag::B, TestFlag::A].into_iter().collect();
        assert_eq!(ab, ba);
        assert_eq!(ab.raw(), 0x3);
    }

    #[test]
    fn iteration_is_in_catalog_order() {
        let set: FlagSet<TestFlag> = [TestFlag::C, TestFlag::A].into_iter().collect();
        let members: Vec<TestFlag> = set.iter().collect();
        assert_eq!(members, vec![TestFlag::A, TestFlag::C]);
        // Restarting yields the same sequence.
        let again: Vec<TestFlag> = set.iter().collect();
        assert_eq!(members, again);
    }

    #[test]
    fn insert_and_remove() {
        let mut set = FlagSet::<TestFlag>::new();
        set.insert(TestFlag::B);
        assert!(set.contains(TestFlag::B));
        set.insert(TestFlag::B);
        assert_eq!(set.len(), 1);
        set.remove(TestFlag::B);
        assert!(set.is_empty());
    }

    #[test]
    fn bitor_unions_sets() {
        let a = FlagSet::from(TestFlag::A);
        let c = FlagSet::from(TestFlag::C);
        assert_eq!((a | c).raw(), 0x5);
    }
}
