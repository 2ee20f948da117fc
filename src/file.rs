use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use log::{debug, trace, warn};
use rayon::prelude::*;

use crate::{FileError, HashError, Hasher, Phase};

/// Read size used when streaming a file into a hasher.
pub const DEFAULT_CHUNK_SIZE: usize = 8000;

/// Streams files into hashers in fixed-size chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHasher {
    chunk_size: usize,
}

impl FileHasher {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Uses reads of `chunk_size` bytes; zero is treated as one.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Feeds the contents of `path` into `hasher` and returns the number of
    /// bytes read.
    ///
    /// The hasher is not finalized, so further data can follow. On error the
    /// hasher holds whatever was read before the failure.
    pub fn hash_file<H: Hasher<N>, const N: usize>(
        &self,
        hasher: &mut H,
        path: impl AsRef<Path>,
    ) -> Result<u64, FileError> {
        if hasher.phase() == Phase::Finalized {
            return Err(FileError::Hasher(HashError::UpdateAfterFinalize));
        }
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|source| {
            warn!("could not open {}: {source}", path.display());
            FileError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!("hashing {} with {}", path.display(), H::NAME);

        let mut chunk = vec![0u8; self.chunk_size];
        let mut total = 0u64;
        loop {
            let read = match file.read(&mut chunk) {
                Ok(0) => break,
                Ok(read) => read,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    warn!("error reading {} after {total} bytes: {source}", path.display());
                    return Err(FileError::Read {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            };
            hasher.update(&chunk[..read])?;
            total += read as u64;
        }

        debug!("read {total} bytes from {}", path.display());
        Ok(total)
    }

    /// Hashes the whole of `path` with a fresh hasher.
    pub fn digest_file<H: Hasher<N>, const N: usize>(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<[u8; N], FileError> {
        let mut hasher = H::default();
        self.hash_file::<H, N>(&mut hasher, path)?;
        Ok(hasher.finalize()?)
    }

    /// Hashes each file independently, spreading the files across the rayon
    /// thread pool. Results are in the same order as `paths`.
    pub fn digest_files<H: Hasher<N>, const N: usize, P: AsRef<Path> + Sync>(
        &self,
        paths: &[P],
    ) -> Vec<Result<[u8; N], FileError>> {
        paths
            .par_iter()
            .map(|path| {
                trace!("queueing {}", path.as_ref().display());
                self.digest_file::<H, N>(path)
            })
            .collect()
    }
}

impl Default for FileHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use rstest::rstest;

    use crate::{Md4, Sha1};

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("mdhash-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[rstest]
    #[case(1)]
    #[case(63)]
    #[case(64)]
    #[case(1000)]
    #[case(DEFAULT_CHUNK_SIZE)]
    fn chunk_size_does_not_affect_digest(#[case] chunk_size: usize) {
        let contents: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        let path = temp_file(&format!("chunks-{chunk_size}"), &contents);

        let digest = FileHasher::new()
            .with_chunk_size(chunk_size)
            .digest_file::<Sha1, 20>(&path)
            .unwrap();

        assert_eq!(digest, Sha1::digest_message(&contents));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn hash_file_leaves_hasher_open() {
        let path = temp_file("open", b"abc");
        let mut hasher = Sha1::new();

        let read = FileHasher::new().hash_file::<Sha1, 20>(&mut hasher, &path).unwrap();
        hasher.update(b"def").unwrap();

        assert_eq!(read, 3);
        assert_eq!(hasher.finalize().unwrap(), Sha1::digest_message(b"abcdef"));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn empty_file_hashes_to_empty_digest() {
        let path = temp_file("empty", b"");

        let digest = FileHasher::new().digest_file::<Md4, 16>(&path).unwrap();

        assert_eq!(hex::encode(digest), "31d6cfe0d16ae931b73c59d7e0c089c0");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let path = std::env::temp_dir().join("mdhash-this-file-does-not-exist");

        let result = FileHasher::new().digest_file::<Sha1, 20>(&path);

        assert!(matches!(result, Err(FileError::Open { .. })));
    }

    #[test]
    fn finalized_hasher_is_reported() {
        let path = temp_file("finalized", b"abc");
        let mut hasher = Sha1::new();
        hasher.finalize().unwrap();

        let result = FileHasher::new().hash_file::<Sha1, 20>(&mut hasher, &path);

        assert!(matches!(
            result,
            Err(FileError::Hasher(HashError::UpdateAfterFinalize))
        ));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn finalized_hasher_is_reported_for_empty_file() {
        let path = temp_file("finalized-empty", b"");
        let mut hasher = Sha1::new();
        hasher.finalize().unwrap();

        let result = FileHasher::new().hash_file::<Sha1, 20>(&mut hasher, &path);

        assert!(matches!(
            result,
            Err(FileError::Hasher(HashError::UpdateAfterFinalize))
        ));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn directory_is_a_read_error() {
        let result = FileHasher::new().digest_file::<Sha1, 20>(std::env::temp_dir());

        assert!(matches!(result, Err(FileError::Read { .. })));
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        assert_eq!(FileHasher::new().with_chunk_size(0).chunk_size(), 1);
    }

    #[test]
    fn digest_files_keeps_input_order() {
        let inputs: [&[u8]; 3] = [b"abc", b"message digest", b"a"];
        let mut paths: Vec<PathBuf> = inputs
            .iter()
            .enumerate()
            .map(|(i, contents)| temp_file(&format!("batch-{i}"), contents))
            .collect();
        paths.push(std::env::temp_dir().join("mdhash-batch-missing"));

        let results = FileHasher::new().digest_files::<Md4, 16, _>(paths.as_slice());

        assert_eq!(results.len(), 4);
        for (result, contents) in results.iter().zip(inputs) {
            assert_eq!(result.as_ref().unwrap(), &Md4::digest_message(contents));
        }
        assert!(matches!(results[3], Err(FileError::Open { .. })));
        for path in &paths[..3] {
            std::fs::remove_file(path).unwrap();
        }
    }
}
