use std::fmt;
use std::marker::PhantomData;

use zeroize::Zeroize;

use crate::codec::ByteOrder;
use crate::counter::BitCounter;
use crate::HashError;

/// Size in bytes of one compression block.
pub const BLOCK_LEN: usize = 64;
const LENGTH_LEN: usize = 8;

const PADDING: [u8; BLOCK_LEN] = {
    let mut padding = [0u8; BLOCK_LEN];
    padding[0] = 0x80;
    padding
};

/// Whether the compression transform zeroes its working variables and
/// message schedule before returning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Wipe {
    Never,
    #[default]
    AfterTransform,
}

/// Where a hasher is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Absorbing,
    Finalized,
}

/// A compression function over `W` state words.
pub trait Compressor<const W: usize> {
    const INITIAL_STATE: [u32; W];
    /// Order of the message words, the length field and the digest.
    const BYTE_ORDER: ByteOrder;

    /// Mixes one `BLOCK_LEN`-byte block into `state`.
    fn compress(state: &mut [u32; W], block: &[u8], wipe: Wipe);
}

pub struct Engine<C: Compressor<W>, const W: usize> {
    state: [u32; W],
    buffer: [u8; BLOCK_LEN],
    buffer_len: usize,
    counter: BitCounter,
    phase: Phase,
    wipe: Wipe,
    compressor: PhantomData<C>,
}

impl<C: Compressor<W>, const W: usize> Engine<C, W> {
    pub fn new(wipe: Wipe) -> Self {
        Self {
            state: C::INITIAL_STATE,
            buffer: [0u8; BLOCK_LEN],
            buffer_len: 0,
            counter: BitCounter::default(),
            phase: Phase::Idle,
            wipe,
            compressor: PhantomData,
        }
    }

    /// Hashes a complete message without going through the lifecycle checks.
    pub fn oneshot(message: &[u8], wipe: Wipe) -> [u32; W] {
        let mut engine = Self::new(wipe);
        engine.absorb(message);
        engine.pad();
        engine.state
    }

    pub fn reset(&mut self) {
        self.state = C::INITIAL_STATE;
        self.buffer.zeroize();
        self.buffer_len = 0;
        self.counter = BitCounter::default();
        self.phase = Phase::Idle;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn wipe(&self) -> Wipe {
        self.wipe
    }

    pub fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        if self.phase == Phase::Finalized {
            return Err(HashError::UpdateAfterFinalize);
        }
        self.phase = Phase::Absorbing;
        self.absorb(data);
        Ok(())
    }

    /// Pads the message and returns the final state words.
    pub fn finalize(&mut self) -> Result<[u32; W], HashError> {
        if self.phase == Phase::Finalized {
            return Err(HashError::AlreadyFinalized);
        }
        self.pad();
        self.phase = Phase::Finalized;
        Ok(self.state)
    }

    /// The final state words, once finalized.
    pub fn output(&self) -> Result<[u32; W], HashError> {
        match self.phase {
            Phase::Finalized => Ok(self.state),
            Phase::Idle | Phase::Absorbing => Err(HashError::NotFinalized),
        }
    }

    fn absorb(&mut self, data: &[u8]) {
        self.counter.add_bytes(data.len());

        if self.buffer_len + data.len() < BLOCK_LEN {
            self.buffer[self.buffer_len..self.buffer_len + data.len()].copy_from_slice(data);
            self.buffer_len += data.len();
            return;
        }

        let (head, rest) = data.split_at(BLOCK_LEN - self.buffer_len);
        self.buffer[self.buffer_len..].copy_from_slice(head);
        C::compress(&mut self.state, &self.buffer, self.wipe);

        // Whole blocks are compressed straight from the input.
        let mut blocks = rest.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            C::compress(&mut self.state, block, self.wipe);
        }

        let tail = blocks.remainder();
        self.buffer[..tail.len()].copy_from_slice(tail);
        self.buffer_len = tail.len();
    }

    fn pad(&mut self) {
        let length = self.counter.to_bytes(C::BYTE_ORDER);
        let pad_len = if self.buffer_len < BLOCK_LEN - LENGTH_LEN {
            BLOCK_LEN - LENGTH_LEN - self.buffer_len
        } else {
            2 * BLOCK_LEN - LENGTH_LEN - self.buffer_len
        };
        self.absorb(&PADDING[..pad_len]);
        self.absorb(&length);
        debug_assert_eq!(self.buffer_len, 0);

        if self.wipe == Wipe::AfterTransform {
            self.buffer.zeroize();
        }
    }

    #[cfg(test)]
    pub fn with_counter(counter: BitCounter, wipe: Wipe) -> Self {
        let mut engine = Self::new(wipe);
        engine.counter = counter;
        engine
    }

    #[cfg(test)]
    pub fn buffered(&self) -> &[u8] {
        &self.buffer[..self.buffer_len]
    }

    #[cfg(test)]
    pub fn counter(&self) -> BitCounter {
        self.counter
    }
}

impl<C: Compressor<W>, const W: usize> Clone for Engine<C, W> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            buffer: self.buffer,
            buffer_len: self.buffer_len,
            counter: self.counter,
            phase: self.phase,
            wipe: self.wipe,
            compressor: PhantomData,
        }
    }
}

// Buffered message bytes stay out of debug output.
impl<C: Compressor<W>, const W: usize> fmt::Debug for Engine<C, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("buffer_len", &self.buffer_len)
            .field("bits", &self.counter.bits())
            .field("phase", &self.phase)
            .field("wipe", &self.wipe)
            .finish()
    }
}

impl<C: Compressor<W>, const W: usize> Drop for Engine<C, W> {
    fn drop(&mut self) {
        self.state.zeroize();
        self.buffer.zeroize();
        self.buffer_len = 0;
        self.counter = BitCounter::default();
    }
}
