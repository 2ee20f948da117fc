use zeroize::Zeroize;

use crate::codec::{self, ByteOrder};
use crate::engine::{Compressor, Engine};
use crate::{HashError, Hasher, Phase, Wipe};

const INITIALISATION_CONSTANTS: [u32; 4] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476];
const MD4_LEN: usize = 16;

/// MD4 as specified in RFC 1320.
#[derive(Debug, Clone)]
pub struct Md4 {
    engine: Engine<Compress, 4>,
}

impl Md4 {
    pub fn new() -> Self {
        Self::with_wipe(Wipe::default())
    }

    pub fn with_wipe(wipe: Wipe) -> Self {
        Self {
            engine: Engine::new(wipe),
        }
    }

    pub fn wipe(&self) -> Wipe {
        self.engine.wipe()
    }
}

impl Default for Md4 {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher<MD4_LEN> for Md4 {
    const NAME: &'static str = "MD4";
    const SHORT_NAME: &'static str = "md4";

    fn reset(&mut self) {
        self.engine.reset();
    }

    fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        self.engine.update(data)
    }

    fn finalize(&mut self) -> Result<[u8; MD4_LEN], HashError> {
        let state = self.engine.finalize()?;
        Ok(codec::store_words(&state, ByteOrder::Little))
    }

    fn digest(&self) -> Result<[u8; MD4_LEN], HashError> {
        let state = self.engine.output()?;
        Ok(codec::store_words(&state, ByteOrder::Little))
    }

    fn phase(&self) -> Phase {
        self.engine.phase()
    }

    fn digest_message(message: &[u8]) -> [u8; MD4_LEN] {
        let state = Engine::<Compress, 4>::oneshot(message, Wipe::default());
        codec::store_words(&state, ByteOrder::Little)
    }
}

#[derive(Debug, Clone, Copy)]
struct Compress;

impl Compressor<4> for Compress {
    const INITIAL_STATE: [u32; 4] = INITIALISATION_CONSTANTS;
    const BYTE_ORDER: ByteOrder = ByteOrder::Little;

    fn compress(state: &mut [u32; 4], block: &[u8], wipe: Wipe) {
        let mut x = codec::load_words(block, ByteOrder::Little);

        // Each step updates one of a, d, c, b in turn, reading the other
        // three in rotated order.
        let mut d = *state;

        // Round 1
        let s = [3, 7, 11, 19];
        for r in 0..16 {
            let i = (16 - r) % 4;
            d[i] = d[i]
                .wrapping_add(f(d[(i + 1) % 4], d[(i + 2) % 4], d[(i + 3) % 4]))
                .wrapping_add(x[r])
                .rotate_left(s[r % 4]);
        }

        // Round 2
        let s = [3, 5, 9, 13];
        for r in 0..16 {
            let i = (16 - r) % 4;
            let k = 4 * (r % 4) + r / 4;
            d[i] = d[i]
                .wrapping_add(g(d[(i + 1) % 4], d[(i + 2) % 4], d[(i + 3) % 4]))
                .wrapping_add(x[k])
                .wrapping_add(0x5A827999)
                .rotate_left(s[r % 4]);
        }

        // Round 3
        let s = [3, 9, 11, 15];
        let k = [0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15];
        for r in 0..16 {
            let i = (16 - r) % 4;
            d[i] = d[i]
                .wrapping_add(h(d[(i + 1) % 4], d[(i + 2) % 4], d[(i + 3) % 4]))
                .wrapping_add(x[k[r]])
                .wrapping_add(0x6ED9EBA1)
                .rotate_left(s[r % 4]);
        }

        for (word, increment) in state.iter_mut().zip(d) {
            *word = word.wrapping_add(increment);
        }

        if wipe == Wipe::AfterTransform {
            d.zeroize();
            x.zeroize();
        }
    }
}

fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (x & z) | (y & z)
}

fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}
