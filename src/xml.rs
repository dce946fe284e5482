//! The `<RSAKeyValue>` XML key exchange format.
//!
//! Element text is standard padded base64 of each field's own minimal
//! big-endian encoding; fields are not zero-padded to a common width. The
//! private form carries the full CRT parameter set, the public form exactly
//! `Modulus` and `Exponent`. No namespaces, no attributes.

use num_bigint::BigUint;

use crate::bigint;
use crate::errors::{Error, Result};
use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

const ROOT: &str = "RSAKeyValue";

/// Every element name a key document may contain.
const FIELDS: [&str; 8] = ["Modulus", "Exponent", "P", "Q", "DP", "DQ", "InverseQ", "D"];

/// A key decoded from `<RSAKeyValue>`, tagged by which field set was
/// present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlKey {
    /// All eight integer fields were present.
    Private(RsaPrivateKey),
    /// Only `Modulus` and `Exponent` were present.
    Public(RsaPublicKey),
}

/// Encodes the public components as an `<RSAKeyValue>` element.
///
/// The trait bound only reaches `n` and `e`: private fields cannot leak
/// through this function, whatever key stands behind it.
pub fn encode_public_key<K: PublicKeyParts>(key: &K) -> String {
    render(&[("Modulus", key.n()), ("Exponent", key.e())])
}

/// Encodes the full private parameter set as an `<RSAKeyValue>` element.
///
/// Child order matches the key exchange layout consumers expect: `Modulus`,
/// `Exponent`, `P`, `Q`, `DP`, `DQ`, `InverseQ`, `D`.
pub fn encode_private_key<K: PrivateKeyParts>(key: &K) -> String {
    render(&[
        ("Modulus", key.n()),
        ("Exponent", key.e()),
        ("P", key.p()),
        ("Q", key.q()),
        ("DP", key.dp()),
        ("DQ", key.dq()),
        ("InverseQ", key.qinv()),
        ("D", key.d()),
    ])
}

fn render(fields: &[(&str, &BigUint)]) -> String {
    let mut out = String::from("<RSAKeyValue>\n");
    for (name, value) in fields {
        out.push_str("  <");
        out.push_str(name);
        out.push('>');
        out.push_str(&bigint::to_base64(value));
        out.push_str("</");
        out.push_str(name);
        out.push_str(">\n");
    }
    out.push_str("</RSAKeyValue>\n");
    out
}

/// Decodes an `<RSAKeyValue>` document into a private or public key.
///
/// Dispatch is by field presence: a `D` element makes all eight fields
/// mandatory and yields a private key; exactly `Modulus` and `Exponent`
/// yield a public key; any other combination is malformed. Child order is
/// not significant.
pub fn decode_key(xml: &str) -> Result<XmlKey> {
    let mut fields = parse_fields(xml)?;

    if fields.iter().any(|(name, _)| name == "D") {
        let n = take_field(&mut fields, "Modulus")?;
        let e = take_field(&mut fields, "Exponent")?;
        let p = take_field(&mut fields, "P")?;
        let q = take_field(&mut fields, "Q")?;
        let dp = take_field(&mut fields, "DP")?;
        let dq = take_field(&mut fields, "DQ")?;
        let qinv = take_field(&mut fields, "InverseQ")?;
        let d = take_field(&mut fields, "D")?;

        let key = RsaPrivateKey::from_components(n, e, d, p, q)
            .map_err(|err| malformed(format!("unusable private key: {err}")))?;
        if key.dp() != &dp || key.dq() != &dq || key.qinv() != &qinv {
            return Err(malformed("CRT parameters disagree with P, Q and D"));
        }

        Ok(XmlKey::Private(key))
    } else {
        let n = take_field(&mut fields, "Modulus")?;
        let e = take_field(&mut fields, "Exponent")?;
        if let Some((name, _)) = fields.first() {
            return Err(malformed(format!("private element <{name}> without <D>")));
        }

        let key = RsaPublicKey::new(n, e)
            .map_err(|err| malformed(format!("unusable public key: {err}")))?;

        Ok(XmlKey::Public(key))
    }
}

fn malformed(reason: impl Into<String>) -> Error {
    Error::XmlParse {
        reason: reason.into(),
    }
}

fn take_field(fields: &mut Vec<(String, BigUint)>, name: &str) -> Result<BigUint> {
    let index = fields
        .iter()
        .position(|(n, _)| n == name)
        .ok_or_else(|| malformed(format!("missing <{name}>")))?;
    Ok(fields.remove(index).1)
}

/// Scans the flat child list of a `<RSAKeyValue>` element, rejecting
/// unknown names, duplicates and anything that is not well-formed base64.
fn parse_fields(xml: &str) -> Result<Vec<(String, BigUint)>> {
    let mut cursor = strip_open_tag(xml.trim())?;
    let mut fields: Vec<(String, BigUint)> = Vec::new();

    loop {
        cursor = cursor.trim_start();
        if let Some(rest) = cursor.strip_prefix("</") {
            let rest = rest
                .strip_prefix(ROOT)
                .and_then(|r| r.strip_prefix('>'))
                .ok_or_else(|| malformed("mismatched closing tag"))?;
            if !rest.trim().is_empty() {
                return Err(malformed("content after the root element"));
            }
            return Ok(fields);
        }

        let (name, text, rest) = parse_element(cursor)?;
        if !FIELDS.contains(&name) {
            return Err(malformed(format!("unknown element <{name}>")));
        }
        if fields.iter().any(|(n, _)| n == name) {
            return Err(malformed(format!("duplicate element <{name}>")));
        }

        let value = bigint::from_base64(text)
            .map_err(|_| malformed(format!("<{name}> is not valid base64")))?;
        fields.push((name.to_string(), value));
        cursor = rest;
    }
}

fn strip_open_tag(input: &str) -> Result<&str> {
    input
        .strip_prefix('<')
        .and_then(|r| r.strip_prefix(ROOT))
        .and_then(|r| r.strip_prefix('>'))
        .ok_or_else(|| malformed(format!("expected <{ROOT}>")))
}

/// Parses one `<Name>text</Name>` child, returning the name, the trimmed
/// text and the remaining input.
fn parse_element(input: &str) -> Result<(&str, &str, &str)> {
    let rest = input
        .strip_prefix('<')
        .ok_or_else(|| malformed("expected an element"))?;
    let name_end = rest.find('>').ok_or_else(|| malformed("unterminated tag"))?;
    let name = &rest[..name_end];
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(malformed(format!("bad element name `{name}`")));
    }

    let body = &rest[name_end + 1..];
    let close = format!("</{name}>");
    let text_end = body
        .find(close.as_str())
        .ok_or_else(|| malformed(format!("missing {close}")))?;

    Ok((name, body[..text_end].trim(), &body[text_end + close.len()..]))
}
