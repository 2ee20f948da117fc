/// Byte order of words on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

impl ByteOrder {
    pub fn read_word(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Big => u32::from_be_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
        }
    }

    pub fn write_word(self, word: u32) -> [u8; 4] {
        match self {
            ByteOrder::Big => word.to_be_bytes(),
            ByteOrder::Little => word.to_le_bytes(),
        }
    }
}

/// Reads the sixteen words of a 64-byte block.
///
/// `block` must hold at least 64 bytes; anything past that is ignored.
pub fn load_words(block: &[u8], order: ByteOrder) -> [u32; 16] {
    debug_assert!(block.len() >= 64);
    let mut words = [0u32; 16];
    for (word, bytes) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = order.read_word([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    words
}

/// Serializes `words` into an `N`-byte array, four bytes per word.
pub fn store_words<const N: usize>(words: &[u32], order: ByteOrder) -> [u8; N] {
    debug_assert_eq!(words.len() * 4, N);
    let mut out = [0u8; N];
    for (bytes, &word) in out.chunks_exact_mut(4).zip(words) {
        bytes.copy_from_slice(&order.write_word(word));
    }
    out
}
