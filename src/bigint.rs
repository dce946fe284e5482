//! Conversions between arbitrary precision integers, their minimal
//! big-endian byte form and the two base64 alphabets used by the key
//! exchange formats.
//!
//! The XML key format carries standard padded base64, JWK fields carry
//! URL-safe unpadded base64. The two alphabets are deliberately exposed as
//! separate functions; mixing them up produces output other consumers
//! reject.

use base64ct::{Base64, Base64UrlUnpadded, Encoding};
use num_bigint::BigUint;

use crate::errors::Result;

/// Returns the minimal big-endian representation of `x`.
///
/// The result is `ceil(bits(x) / 8)` bytes with no sign octet; zero encodes
/// as a single zero byte.
pub fn to_bytes_be(x: &BigUint) -> Vec<u8> {
    x.to_bytes_be()
}

/// Interprets `bytes` as a big-endian unsigned integer.
///
/// Inverse of [`to_bytes_be`]; leading zero bytes are accepted.
pub fn from_bytes_be(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Encodes `x` as padded base64 over the standard alphabet.
pub fn to_base64(x: &BigUint) -> String {
    Base64::encode_string(&to_bytes_be(x))
}

/// Decodes a padded standard-alphabet base64 string into an integer.
///
/// Fails on characters outside the alphabet or an incorrect padding length.
pub fn from_base64(s: &str) -> Result<BigUint> {
    Ok(from_bytes_be(&Base64::decode_vec(s)?))
}

/// Encodes `x` as unpadded base64 over the URL-safe alphabet, the form JWK
/// `n` and `e` fields use.
pub fn to_base64url(x: &BigUint) -> String {
    Base64UrlUnpadded::encode_string(&to_bytes_be(x))
}

/// Decodes an unpadded URL-safe base64 string into an integer.
pub fn from_base64url(s: &str) -> Result<BigUint> {
    Ok(from_bytes_be(&Base64UrlUnpadded::decode_vec(s)?))
}
