#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Representations
//!
//! One generated key pair can be rendered, without loss, as:
//!
//! - unencrypted PKCS#8 / SubjectPublicKeyInfo PEM ([`pem`]),
//! - the `<RSAKeyValue>` XML key exchange format ([`xml`]),
//! - JWK records for a `jwks_uri` endpoint ([`jwk`]).
//!
//! Decoding any of them reproduces the numeric key components exactly; the
//! conversions between integers, minimal big-endian bytes and the two
//! base64 alphabets live in [`bigint`].
//!
//! # Example
//!
//! ```
//! use rsa_keymat::{jwk::Jwk, pem, xml, KeyPair, XmlKey};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let pair = KeyPair::generate(&mut rng, 2048).expect("failed to generate a key");
//!
//! // PEM
//! let private_pem = pem::encode_private_key(pair.private_key()).expect("pem");
//! let restored = pem::decode_private_key(&private_pem).expect("pem");
//! assert_eq!(&restored, pair.private_key());
//!
//! // XML
//! let public_xml = xml::encode_public_key(pair.public_key());
//! assert!(matches!(xml::decode_key(&public_xml), Ok(XmlKey::Public(_))));
//!
//! // JWK
//! let jwk = Jwk::from_public_key(pair.public_key(), "test-key-id");
//! assert_eq!(jwk.e, "AQAB");
//! ```

pub use num_bigint::BigUint;
pub use rand_core;

pub use pkcs1;
pub use pkcs8;

mod algorithms;
pub mod bigint;
pub mod errors;
pub mod jwk;
pub mod pem;
pub mod pkcs1v15;
pub mod store;
pub mod traits;
pub mod xml;

mod encoding;
mod key;

pub use crate::{
    errors::{Error, Result},
    jwk::{Jwk, JwkSet},
    key::{KeyPair, RsaPrivateKey, RsaPublicKey, DEFAULT_EXP},
    store::{KeyFileStore, SavedKeyPair},
    xml::XmlKey,
};
