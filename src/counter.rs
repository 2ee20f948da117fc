use crate::codec::ByteOrder;

/// Running count of message bits as two 32-bit words, low word first.
///
/// The count wraps silently once 2^64 bits have been absorbed, as the
/// padding only has room for a 64-bit length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitCounter {
    low: u32,
    high: u32,
}

impl BitCounter {
    #[cfg(test)]
    pub fn from_words(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// Adds `len` bytes (`8 * len` bits) to the count.
    pub fn add_bytes(&mut self, len: usize) {
        let len = len as u64;
        // Bits shifted out of the low word by the multiply-by-8 land in the
        // high word alongside the carry.
        let (low, carry) = self.low.overflowing_add((len << 3) as u32);
        self.low = low;
        self.high = self
            .high
            .wrapping_add((len >> 29) as u32)
            .wrapping_add(carry as u32);
    }

    pub fn bits(&self) -> u64 {
        (u64::from(self.high) << 32) | u64::from(self.low)
    }

    /// Bytes of the length field appended by the padding.
    pub fn to_bytes(self, order: ByteOrder) -> [u8; 8] {
        let (first, second) = match order {
            ByteOrder::Big => (self.high, self.low),
            ByteOrder::Little => (self.low, self.high),
        };
        let mut out = [0u8; 8];
        out[..4].copy_from_slice(&order.write_word(first));
        out[4..].copy_from_slice(&order.write_word(second));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(1, 8)]
    #[case(64, 512)]
    #[case(1_000_000, 8_000_000)]
    fn add_bytes_counts_bits(#[case] len: usize, #[case] expected_bits: u64) {
        let mut counter = BitCounter::default();

        counter.add_bytes(len);

        assert_eq!(counter.bits(), expected_bits);
    }

    #[test]
    fn low_word_overflow_carries_into_high_word() {
        let mut counter = BitCounter::from_words(u32::MAX - 7, 0);

        counter.add_bytes(1);

        assert_eq!(counter, BitCounter::from_words(0, 1));
    }

    #[test]
    fn carry_and_shifted_bits_combine() {
        let mut counter = BitCounter::from_words(u32::MAX - 7, 2);

        // 2^29 + 1 bytes: 2^32 bits go straight to the high word and the
        // remaining 8 bits overflow the low word.
        counter.add_bytes((1 << 29) + 1);

        assert_eq!(counter, BitCounter::from_words(0, 4));
    }

    #[test]
    fn count_wraps_at_64_bits() {
        let mut counter = BitCounter::from_words(u32::MAX - 7, u32::MAX);

        counter.add_bytes(1);

        assert_eq!(counter.bits(), 0);
    }

    #[test]
    fn matches_wide_arithmetic_over_many_additions() {
        let mut counter = BitCounter::default();
        let mut expected = 0u64;
        for len in [0usize, 3, 63, 64, 65, 8000, 1 << 20, 7] {
            counter.add_bytes(len);
            expected = expected.wrapping_add(len as u64 * 8);
        }

        assert_eq!(counter.bits(), expected);
    }

    #[rstest]
    #[case(ByteOrder::Big, [0, 0, 0, 1, 0, 0, 0, 0x18])]
    #[case(ByteOrder::Little, [0x18, 0, 0, 0, 1, 0, 0, 0])]
    fn to_bytes_encodes_both_words(#[case] order: ByteOrder, #[case] expected: [u8; 8]) {
        let counter = BitCounter::from_words(0x18, 1);

        assert_eq!(counter.to_bytes(order), expected);
    }
}
