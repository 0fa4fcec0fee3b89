use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::digest::DigestAlg;
use crate::errors::SaidError;
use crate::validation::ValidationError;

/// Digest derivation codes.
///
/// Each code fixes the digest algorithm, the raw digest size and the length of
/// the qualified identifier. Prefixes follow the CESR digest code table, so a
/// SAID names its own algorithm and can be verified without side metadata.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DerivationCode {
    /// `E`: BLAKE3, 32 bytes, 44 chars.
    #[default]
    Blake3_256,
    /// `F`: BLAKE2b, 32 bytes, 44 chars.
    Blake2b_256,
    /// `G`: BLAKE2s, 32 bytes, 44 chars.
    Blake2s_256,
    /// `H`: SHA3-256, 32 bytes, 44 chars.
    Sha3_256,
    /// `I`: SHA-256, 32 bytes, 44 chars.
    Sha2_256,
    /// `0D`: BLAKE3, 64 bytes, 88 chars.
    Blake3_512,
    /// `0E`: BLAKE2b, 64 bytes, 88 chars.
    Blake2b_512,
    /// `0F`: SHA3-512, 64 bytes, 88 chars.
    Sha3_512,
    /// `0G`: SHA-512, 64 bytes, 88 chars.
    Sha2_512,
}

impl DerivationCode {
    /// Every code in the table.
    pub const ALL: [DerivationCode; 9] = [
        DerivationCode::Blake3_256,
        DerivationCode::Blake2b_256,
        DerivationCode::Blake2s_256,
        DerivationCode::Sha3_256,
        DerivationCode::Sha2_256,
        DerivationCode::Blake3_512,
        DerivationCode::Blake2b_512,
        DerivationCode::Sha3_512,
        DerivationCode::Sha2_512,
    ];

    /// Prefix string that opens every SAID of this code.
    pub fn prefix(self) -> &'static str {
        match self {
            DerivationCode::Blake3_256 => "E",
            DerivationCode::Blake2b_256 => "F",
            DerivationCode::Blake2s_256 => "G",
            DerivationCode::Sha3_256 => "H",
            DerivationCode::Sha2_256 => "I",
            DerivationCode::Blake3_512 => "0D",
            DerivationCode::Blake2b_512 => "0E",
            DerivationCode::Sha3_512 => "0F",
            DerivationCode::Sha2_512 => "0G",
        }
    }

    /// Digest algorithm.
    pub fn alg(self) -> DigestAlg {
        match self {
            DerivationCode::Blake3_256 | DerivationCode::Blake3_512 => DigestAlg::Blake3,
            DerivationCode::Blake2b_256 | DerivationCode::Blake2b_512 => DigestAlg::Blake2b,
            DerivationCode::Blake2s_256 => DigestAlg::Blake2s,
            DerivationCode::Sha3_256 => DigestAlg::Sha3_256,
            DerivationCode::Sha3_512 => DigestAlg::Sha3_512,
            DerivationCode::Sha2_256 => DigestAlg::Sha256,
            DerivationCode::Sha2_512 => DigestAlg::Sha512,
        }
    }

    /// Raw digest size in bytes.
    pub fn raw_size(self) -> usize {
        match self {
            DerivationCode::Blake3_256
            | DerivationCode::Blake2b_256
            | DerivationCode::Blake2s_256
            | DerivationCode::Sha3_256
            | DerivationCode::Sha2_256 => 32,
            DerivationCode::Blake3_512
            | DerivationCode::Blake2b_512
            | DerivationCode::Sha3_512
            | DerivationCode::Sha2_512 => 64,
        }
    }

    /// Length of the qualified identifier in characters. This is also the
    /// placeholder length used while hashing.
    pub fn full_size(self) -> usize {
        match self.raw_size() {
            32 => 44,
            _ => 88,
        }
    }

    /// Number of zero bytes prepended to the raw digest so it encodes on a
    /// base64 quantum boundary.
    pub fn pad_size(self) -> usize {
        (3 - self.raw_size() % 3) % 3
    }

    /// Checks that the prefix exactly replaces the pad characters, so the
    /// encoded identifier is `full_size` characters long.
    ///
    /// # Errors
    ///
    /// Returns [`SaidError::EncodingLengthMismatch`] if the table entry is
    /// inconsistent.
    pub fn check_layout(self) -> Result<(), SaidError> {
        let encoded = (self.raw_size() + self.pad_size()) / 3 * 4;
        let actual = encoded - self.pad_size() + self.prefix().len();
        if actual != self.full_size() {
            return Err(SaidError::EncodingLengthMismatch {
                code: self.prefix().to_string(),
                expected: self.full_size(),
                actual,
            });
        }
        Ok(())
    }

    /// Checks that this build can produce SAIDs for the code at all.
    ///
    /// # Errors
    ///
    /// - [`SaidError::UnsupportedAlgorithm`] if the digest is not compiled in
    /// - [`SaidError::EncodingLengthMismatch`] if the layout is inconsistent
    pub fn ensure_supported(self) -> Result<(), SaidError> {
        if !self.alg().is_supported() {
            return Err(SaidError::UnsupportedAlgorithm(self.alg()));
        }
        self.check_layout()
    }

    /// Finds the code whose prefix opens `said`.
    pub fn from_said(said: &str) -> Option<Self> {
        // Two-character codes start with a digit; one-character codes never do.
        let len = if said.starts_with(|c: char| c.is_ascii_digit()) {
            2
        } else {
            1
        };
        said.get(..len).and_then(|p| p.parse().ok())
    }
}

impl fmt::Display for DerivationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for DerivationCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DerivationCode::ALL
            .into_iter()
            .find(|code| code.prefix() == s)
            .ok_or_else(|| ValidationError::UnknownCode(s.to_string()))
    }
}

impl TryFrom<String> for DerivationCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DerivationCode> for String {
    fn from(code: DerivationCode) -> Self {
        code.prefix().to_string()
    }
}
