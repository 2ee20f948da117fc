mod codec;
mod counter;
mod engine;
mod error;
mod file;
mod hash;
mod md4;
mod sha1;

pub use engine::{Phase, Wipe, BLOCK_LEN};
pub use error::{FileError, HashError};
pub use file::{FileHasher, DEFAULT_CHUNK_SIZE};
pub use hash::{Hasher, ReportFormat};
pub use md4::Md4;
pub use sha1::Sha1;
