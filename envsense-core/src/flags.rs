//! Ordered flag-table decoding
//!
//! Status and error registers are decoded with a table of
//! `(mask, condition)` pairs evaluated in order; the first entry that
//! matches wins. The tables themselves are plain data, so the priority
//! policy lives in one place per device and can be tested on its own.

/// One decoding rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagRule<T> {
    /// Bit(s) to examine
    pub mask: u8,
    /// Condition reported when the rule matches
    pub condition: T,
}

impl<T> FlagRule<T> {
    pub const fn new(mask: u8, condition: T) -> Self {
        Self { mask, condition }
    }
}

/// Bit `n` as a mask
pub const fn bit(n: u8) -> u8 {
    1 << n
}

/// Is bit `n` of `value` set?
pub const fn is_set(value: u8, n: u8) -> bool {
    value & bit(n) != 0
}

/// First rule whose mask has any bit set in `value`
pub fn first_set<T: Copy>(rules: &[FlagRule<T>], value: u8) -> Option<T> {
    rules
        .iter()
        .find(|rule| value & rule.mask != 0)
        .map(|rule| rule.condition)
}

/// First rule whose mask bits are not all set in `value`
///
/// Used for "must be set" status bits: the rule fires when its
/// required flag is missing.
pub fn first_clear<T: Copy>(rules: &[FlagRule<T>], value: u8) -> Option<T> {
    rules
        .iter()
        .find(|rule| value & rule.mask != rule.mask)
        .map(|rule| rule.condition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tag {
        A,
        B,
        C,
    }

    const RULES: &[FlagRule<Tag>] = &[
        FlagRule::new(bit(0), Tag::A),
        FlagRule::new(bit(1), Tag::B),
        FlagRule::new(bit(5), Tag::C),
    ];

    #[test]
    fn test_bit_helpers() {
        assert_eq!(bit(7), 0x80);
        assert!(is_set(0b1000_0000, 7));
        assert!(!is_set(0b0111_1111, 7));
    }

    #[test]
    fn test_first_set_priority() {
        assert_eq!(first_set(RULES, 0b0000_0011), Some(Tag::A));
        assert_eq!(first_set(RULES, 0b0010_0010), Some(Tag::B));
        assert_eq!(first_set(RULES, 0b0010_0000), Some(Tag::C));
        assert_eq!(first_set(RULES, 0b1101_1100), None);
    }

    #[test]
    fn test_first_clear_priority() {
        assert_eq!(first_clear(RULES, 0xFF), None);
        assert_eq!(first_clear(RULES, 0b0010_0001), Some(Tag::B));
        assert_eq!(first_clear(RULES, 0x00), Some(Tag::A));
    }

    proptest! {
        #[test]
        fn first_set_matches_lowest_listed_bit(value in any::<u8>()) {
            let expected = if value & 0b01 != 0 {
                Some(Tag::A)
            } else if value & 0b10 != 0 {
                Some(Tag::B)
            } else if value & 0b10_0000 != 0 {
                Some(Tag::C)
            } else {
                None
            };
            prop_assert_eq!(first_set(RULES, value), expected);
        }
    }
}
