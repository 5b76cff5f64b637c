//! Bearer token formatting, parsing, and verifier construction.
//!
//! Tokens look like `{prefix}_{version}_{uuid}.{secret_hex}`. Only a SHA-256
//! digest of the verifier input is stored; the raw token is shown once.

use std::{
    fmt::{self, Write as _},
    str::FromStr,
};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// Number of secret bytes encoded in a token.
pub const TOKEN_SECRET_BYTES: usize = 32;

const TOKEN_SECRET_HEX_CHARS: usize = TOKEN_SECRET_BYTES * 2;

/// What a token grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Long-lived admin access key, exchanged for sessions.
    AccessKey,
    /// Short-lived admin session.
    Session,
}

impl TokenKind {
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::AccessKey => "ptk",
            Self::Session => "pts",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "ptk" => Some(Self::AccessKey),
            "pts" => Some(Self::Session),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenVersion {
    V1,
}

impl TokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl FromStr for TokenVersion {
    type Err = TokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(TokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct TokenSecret {
    bytes: [u8; TOKEN_SECRET_BYTES],
}

impl TokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(**redacted**)")
    }
}

impl Drop for TokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedToken {
    pub kind: TokenKind,
    pub uuid: Uuid,
    pub version: TokenVersion,
    pub secret: TokenSecret,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token format is invalid")]
    InvalidFormat,

    #[error("token uses an unsupported version")]
    UnsupportedVersion,

    #[error("token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_token_secret() -> TokenSecret {
    let mut secret = [0_u8; TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    TokenSecret::from_bytes(secret)
}

#[must_use]
pub fn format_token(
    kind: TokenKind,
    uuid: Uuid,
    version: TokenVersion,
    secret: &TokenSecret,
) -> String {
    format!(
        "{}_{}_{}.{}",
        kind.prefix(),
        version.segment(),
        uuid.simple(),
        encode_secret_hex(secret.as_bytes())
    )
}

/// Parse a raw token string.
///
/// # Errors
///
/// Returns an error when the token is malformed.
pub fn parse_token(token: &str) -> Result<ParsedToken, TokenError> {
    let (prefix_and_id, secret_hex) = token.trim().split_once('.').ok_or(TokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(TokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(TokenError::InvalidFormat)?;
    let uuid_segment = id_parts.next().ok_or(TokenError::InvalidFormat)?;

    let kind = TokenKind::from_prefix(prefix).ok_or(TokenError::InvalidFormat)?;
    let version = TokenVersion::from_str(version_segment)?;
    let uuid = Uuid::try_parse(uuid_segment).map_err(|_parse| TokenError::InvalidFormat)?;
    let secret = decode_secret_hex(secret_hex).ok_or(TokenError::InvalidSecretEncoding)?;

    Ok(ParsedToken {
        kind,
        uuid,
        version,
        secret: TokenSecret::from_bytes(secret),
    })
}

/// Build the canonical verifier input bytes for a token.
///
/// Format: `{token_uuid_hex}:{version_i16_decimal}:{owner_uuid_hex}:{secret_hex}`
#[must_use]
pub fn build_verifier_input(
    token_uuid: &Uuid,
    version: TokenVersion,
    owner_uuid: &Uuid,
    secret: &TokenSecret,
) -> Vec<u8> {
    format!(
        "{}:{}:{}:{}",
        token_uuid.simple(),
        version.as_i16(),
        owner_uuid.simple(),
        encode_secret_hex(secret.as_bytes()),
    )
    .into_bytes()
}

/// Hex-encoded SHA-256 digest of the verifier input; this is what gets stored.
#[must_use]
pub fn hash_verifier(input: &[u8]) -> String {
    encode_hex(&Sha256::digest(input))
}

fn encode_secret_hex(secret: &[u8; TOKEN_SECRET_BYTES]) -> String {
    encode_hex(secret)
}

fn encode_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
            let _infallible = write!(out, "{byte:02x}");
            out
        })
}

fn decode_secret_hex(secret_hex: &str) -> Option<[u8; TOKEN_SECRET_BYTES]> {
    if secret_hex.len() != TOKEN_SECRET_HEX_CHARS {
        return None;
    }

    let mut secret = [0_u8; TOKEN_SECRET_BYTES];

    for (byte, pair) in secret.iter_mut().zip(secret_hex.as_bytes().chunks_exact(2)) {
        let [hi, lo] = pair else {
            return None;
        };

        *byte = (decode_hex_nibble(*hi)? << 4) | decode_hex_nibble(*lo)?;
    }

    Some(secret)
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}
