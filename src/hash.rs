use crate::{HashError, Phase};

/// How `Hasher::report` renders a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Uppercase hex bytes separated by spaces, e.g. `A9 99 3E`.
    Hex,
    /// Decimal byte values separated by spaces, e.g. `169 153 62`.
    Digits,
}

/// A streaming hash producing an `N`-byte digest.
///
/// A hasher moves from idle, through absorbing, to finalized. Once
/// finalized it only hands out its digest until `reset` is called. A
/// single instance is not synchronized; concurrent updates must be
/// serialized by the caller.
pub trait Hasher<const N: usize>: Default {
    const NAME: &'static str;
    const SHORT_NAME: &'static str;
    const BLOCK_LEN: usize = crate::BLOCK_LEN;
    const DIGEST_LEN: usize = N;

    /// Returns the hasher to its freshly constructed state.
    fn reset(&mut self);

    /// Absorbs `data`. May be called any number of times before `finalize`;
    /// the digest does not depend on how the message is split.
    fn update(&mut self, data: &[u8]) -> Result<(), HashError>;

    /// Pads the message and computes the digest. Valid once per message.
    fn finalize(&mut self) -> Result<[u8; N], HashError>;

    /// The digest computed by `finalize`.
    fn digest(&self) -> Result<[u8; N], HashError>;

    fn phase(&self) -> Phase;

    /// Hashes a complete message in one go.
    fn digest_message(message: &[u8]) -> [u8; N];

    fn update_and_digest(mut self, message: &[u8]) -> Result<[u8; N], HashError> {
        self.update(message)?;
        self.finalize()
    }

    /// Lowercase hex of the digest.
    fn hex_digest(&self) -> Result<String, HashError> {
        Ok(hex::encode(self.digest()?))
    }

    fn report(&self, format: ReportFormat) -> Result<String, HashError> {
        let digest = self.digest()?;
        let bytes: Vec<String> = match format {
            ReportFormat::Hex => digest.iter().map(|b| format!("{b:02X}")).collect(),
            ReportFormat::Digits => digest.iter().map(|b| b.to_string()).collect(),
        };
        Ok(bytes.join(" "))
    }
}
