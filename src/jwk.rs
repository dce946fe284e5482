//! JSON Web Key records for the public half of generated keys.
//!
//! `n` and `e` carry the URL-safe unpadded alphabet, unlike the XML
//! format's standard padded base64. The records are what a `jwks_uri`
//! endpoint serves next to an OpenID Connect discovery document.

use serde::{Deserialize, Serialize};

use crate::bigint;
use crate::errors::Result;
use crate::key::RsaPublicKey;
use crate::traits::PublicKeyParts;

/// Signature algorithm advertised by default.
pub const DEFAULT_ALG: &str = "RS256";

/// A single RSA signing key in JWK form.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type; always `"RSA"`.
    pub kty: String,
    /// Intended key use; always `"sig"`.
    #[serde(rename = "use")]
    pub key_use: String,
    /// Key identifier, matched against JWT `kid` headers.
    pub kid: String,
    /// Intended signature algorithm.
    pub alg: String,
    /// Modulus: URL-safe unpadded base64 of the minimal big-endian bytes.
    pub n: String,
    /// Public exponent, encoded like `n`.
    pub e: String,
}

impl Jwk {
    /// Builds the record for a public key under [`DEFAULT_ALG`].
    ///
    /// Only the public key type is accepted here; private key material is
    /// excluded from this surface by construction rather than by filtering.
    pub fn from_public_key(key: &RsaPublicKey, kid: impl Into<String>) -> Jwk {
        Jwk::from_public_key_with_alg(key, kid, DEFAULT_ALG)
    }

    /// Builds the record with an explicit `alg` value.
    pub fn from_public_key_with_alg(
        key: &RsaPublicKey,
        kid: impl Into<String>,
        alg: impl Into<String>,
    ) -> Jwk {
        Jwk {
            kty: "RSA".into(),
            key_use: "sig".into(),
            kid: kid.into(),
            alg: alg.into(),
            n: bigint::to_base64url(key.n()),
            e: bigint::to_base64url(key.e()),
        }
    }
}

/// The key set document served from a `jwks_uri` endpoint.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct JwkSet {
    /// Member keys, in insertion order.
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    /// Builds a set from `(key, kid)` pairs, preserving their order.
    pub fn from_keys<'a, I, S>(keys: I) -> JwkSet
    where
        I: IntoIterator<Item = (&'a RsaPublicKey, S)>,
        S: Into<String>,
    {
        JwkSet {
            keys: keys
                .into_iter()
                .map(|(key, kid)| Jwk::from_public_key(key, kid))
                .collect(),
        }
    }

    /// Renders the set as a JSON response body.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyPair;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    fn test_pair() -> KeyPair {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        KeyPair::generate(&mut rng, 512).unwrap()
    }

    #[test]
    fn well_known_exponent_encoding() {
        let pair = test_pair();
        let jwk = Jwk::from_public_key(pair.public_key(), "test-key-id");

        assert_eq!(jwk.kty, "RSA");
        assert_eq!(jwk.key_use, "sig");
        assert_eq!(jwk.kid, "test-key-id");
        assert_eq!(jwk.alg, "RS256");
        assert_eq!(jwk.e, "AQAB");
        assert_eq!(
            bigint::from_base64url(&jwk.n).unwrap(),
            *pair.public_key().n()
        );
    }

    #[test]
    fn serializes_use_under_its_wire_name() {
        let pair = test_pair();
        let jwk = Jwk::from_public_key(pair.public_key(), "k1");
        let json = serde_json::to_string(&jwk).unwrap();

        assert!(json.contains("\"use\":\"sig\""));
        assert!(!json.contains("key_use"));

        let back: Jwk = serde_json::from_str(&json).unwrap();
        assert_eq!(back, jwk);
    }

    #[test]
    fn set_preserves_order() {
        let mut rng = ChaCha8Rng::from_seed([7; 32]);
        let a = KeyPair::generate(&mut rng, 512).unwrap();
        let b = KeyPair::generate(&mut rng, 512).unwrap();

        let set = JwkSet::from_keys([(a.public_key(), "first"), (b.public_key(), "second")]);
        assert_eq!(set.keys.len(), 2);
        assert_eq!(set.keys[0].kid, "first");
        assert_eq!(set.keys[1].kid, "second");

        let json = set.to_json().unwrap();
        assert!(json.starts_with("{\"keys\":["));
        assert!(json.find("first").unwrap() < json.find("second").unwrap());
    }

    #[test]
    fn custom_alg() {
        let pair = test_pair();
        let jwk = Jwk::from_public_key_with_alg(pair.public_key(), "k1", "RS384");
        assert_eq!(jwk.alg, "RS384");
    }
}
