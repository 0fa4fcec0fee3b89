use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256, Sha512};
use std::fmt;

use crate::errors::SaidError;

/// Digest algorithms named by the derivation code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigestAlg {
    /// BLAKE3, extendable output (the default for SAIDs).
    Blake3,
    /// BLAKE2b.
    Blake2b,
    /// BLAKE2s.
    Blake2s,
    /// SHA3-256.
    #[serde(rename = "sha3-256")]
    Sha3_256,
    /// SHA3-512.
    #[serde(rename = "sha3-512")]
    Sha3_512,
    /// SHA-256.
    #[serde(rename = "sha-256")]
    Sha256,
    /// SHA-512.
    #[serde(rename = "sha-512")]
    Sha512,
}

impl DigestAlg {
    /// Whether this build can compute the algorithm.
    pub fn is_supported(self) -> bool {
        matches!(self, DigestAlg::Blake3 | DigestAlg::Sha256 | DigestAlg::Sha512)
    }
}

impl fmt::Display for DigestAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DigestAlg::Blake3 => "blake3",
            DigestAlg::Blake2b => "blake2b",
            DigestAlg::Blake2s => "blake2s",
            DigestAlg::Sha3_256 => "sha3-256",
            DigestAlg::Sha3_512 => "sha3-512",
            DigestAlg::Sha256 => "sha-256",
            DigestAlg::Sha512 => "sha-512",
        };
        f.write_str(name)
    }
}

/// Hashes `bytes` under `alg`, returning exactly `len` raw digest bytes.
///
/// BLAKE3 is an XOF and serves any length. Fixed-output algorithms must be
/// asked for their native size.
///
/// # Errors
///
/// - [`SaidError::UnsupportedAlgorithm`] if `alg` is not compiled in
/// - [`SaidError::EncodingLengthMismatch`] if a fixed-output algorithm is
///   asked for a different length than it produces
pub fn digest(alg: DigestAlg, bytes: &[u8], len: usize) -> Result<Vec<u8>, SaidError> {
    let raw = match alg {
        DigestAlg::Blake3 => {
            let mut out = vec![0u8; len];
            let mut hasher = blake3::Hasher::new();
            hasher.update(bytes);
            hasher.finalize_xof().fill(&mut out);
            out
        }
        DigestAlg::Sha256 => Sha256::digest(bytes).to_vec(),
        DigestAlg::Sha512 => Sha512::digest(bytes).to_vec(),
        other => return Err(SaidError::UnsupportedAlgorithm(other)),
    };

    if raw.len() != len {
        return Err(SaidError::EncodingLengthMismatch {
            code: alg.to_string(),
            expected: len,
            actual: raw.len(),
        });
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake3_256_matches_reference_hash() {
        let raw = digest(DigestAlg::Blake3, b"abc", 32).unwrap();
        assert_eq!(raw, blake3::hash(b"abc").as_bytes().to_vec());
    }

    #[test]
    fn blake3_512_extends_the_256_output() {
        let short = digest(DigestAlg::Blake3, b"abc", 32).unwrap();
        let long = digest(DigestAlg::Blake3, b"abc", 64).unwrap();
        assert_eq!(long.len(), 64);
        assert_eq!(&long[..32], &short[..]);
    }

    #[test]
    fn sha256_rejects_wrong_length() {
        let err = digest(DigestAlg::Sha256, b"abc", 64).unwrap_err();
        assert!(matches!(
            err,
            SaidError::EncodingLengthMismatch {
                expected: 64,
                actual: 32,
                ..
            }
        ));
    }

    #[test]
    fn unsupported_algorithms_fail() {
        for alg in [DigestAlg::Blake2b, DigestAlg::Blake2s, DigestAlg::Sha3_256] {
            assert!(!alg.is_supported());
            assert!(matches!(
                digest(alg, b"abc", 32),
                Err(SaidError::UnsupportedAlgorithm(a)) if a == alg
            ));
        }
    }
}
