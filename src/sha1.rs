use zeroize::Zeroize;

use crate::codec::{self, ByteOrder};
use crate::engine::{Compressor, Engine};
use crate::{HashError, Hasher, Phase, Wipe};

const INITIALISATION_CONSTANTS: [u32; 5] =
    [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0];
const ROUND_CONSTANTS: [u32; 4] = [0x5A827999, 0x6ED9EBA1, 0x8F1BBCDC, 0xCA62C1D6];
const ROUNDS: usize = 80;
const SHA1_LEN: usize = 20;

/// SHA-1 as specified in FIPS 180-1.
#[derive(Debug, Clone)]
pub struct Sha1 {
    engine: Engine<Compress, 5>,
}

impl Sha1 {
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

impl Default for Sha1 {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher<SHA1_LEN> for Sha1 {
    const NAME: &'static str = "SHA-1";
    const SHORT_NAME: &'static str = "sha1";

    fn reset(&mut self) {
        self.engine.reset();
    }

    fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        self.engine.update(data)
    }

    fn finalize(&mut self) -> Result<[u8; SHA1_LEN], HashError> {
        let state = self.engine.finalize()?;
        Ok(codec::store_words(&state, ByteOrder::Big))
    }

    fn digest(&self) -> Result<[u8; SHA1_LEN], HashError> {
        let state = self.engine.output()?;
        Ok(codec::store_words(&state, ByteOrder::Big))
    }

    fn phase(&self) -> Phase {
        self.engine.phase()
    }

    fn digest_message(message: &[u8]) -> [u8; SHA1_LEN] {
        let state = Engine::<Compress, 5>::oneshot(message, Wipe::default());
        codec::store_words(&state, ByteOrder::Big)
    }
}

#[derive(Debug, Clone, Copy)]
struct Compress;

impl Compressor<5> for Compress {
    const INITIAL_STATE: [u32; 5] = INITIALISATION_CONSTANTS;
    const BYTE_ORDER: ByteOrder = ByteOrder::Big;

    fn compress(state: &mut [u32; 5], block: &[u8], wipe: Wipe) {
        let mut schedule = codec::load_words(block, ByteOrder::Big);

        let [mut a, mut b, mut c, mut d, mut e] = *state;
        for i in 0..ROUNDS {
            let word = if i < 16 {
                schedule[i]
            } else {
                expand(&mut schedule, i)
            };
            let (f, k) = match i {
                0..=19 => (choose(b, c, d), ROUND_CONSTANTS[0]),
                20..=39 => (parity(b, c, d), ROUND_CONSTANTS[1]),
                40..=59 => (majority(b, c, d), ROUND_CONSTANTS[2]),
                _ => (parity(b, c, d), ROUND_CONSTANTS[3]),
            };
            e = e
                .wrapping_add(f)
                .wrapping_add(word)
                .wrapping_add(k)
                .wrapping_add(a.rotate_left(5));
            b = b.rotate_left(30);
            // The freshly mixed word leads the next round.
            (a, b, c, d, e) = (e, a, b, c, d);
        }

        state[0] = state[0].wrapping_add(a);
        state[1] = state[1].wrapping_add(b);
        state[2] = state[2].wrapping_add(c);
        state[3] = state[3].wrapping_add(d);
        state[4] = state[4].wrapping_add(e);

        if wipe == Wipe::AfterTransform {
            a.zeroize();
            b.zeroize();
            c.zeroize();
            d.zeroize();
            e.zeroize();
            schedule.zeroize();
        }
    }
}

/// Computes schedule word `i` (16 <= i < 80) in place over a circular
/// window of the last sixteen words.
fn expand(schedule: &mut [u32; 16], i: usize) -> u32 {
    let word = (schedule[(i + 13) & 15]
        ^ schedule[(i + 8) & 15]
        ^ schedule[(i + 2) & 15]
        ^ schedule[i & 15])
        .rotate_left(1);
    schedule[i & 15] = word;
    word
}

fn choose(x: u32, y: u32, z: u32) -> u32 {
    (x & (y ^ z)) ^ z
}

fn parity(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

fn majority(x: u32, y: u32, z: u32) -> u32 {
    ((x | y) & z) | (x & y)
}
