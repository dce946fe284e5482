//! PKCS#1 v1.5 signatures over the generated keys, per [RFC8017 § 8.2].
//!
//! Exposed as the validity guard for generated and re-imported key
//! material: a pair whose signature fails to round-trip never reaches the
//! export pipeline in one piece.
//!
//! [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2

use digest::Digest;
use pkcs8::AssociatedOid;
use zeroize::Zeroizing;

use crate::algorithms::pkcs1v15::{
    pkcs1v15_generate_prefix, pkcs1v15_sign_pad, pkcs1v15_sign_unpad,
};
use crate::algorithms::rsa::{rsa_decrypt_and_check, rsa_encrypt, uint_to_be_pad};
use crate::bigint;
use crate::errors::{Error, Result};
use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::traits::PublicKeyParts;

/// Signs the digest of `msg` computed with `D`.
///
/// The signature is a byte string of exactly the modulus width.
pub fn sign<D>(priv_key: &RsaPrivateKey, msg: &[u8]) -> Result<Vec<u8>>
where
    D: Digest + AssociatedOid,
{
    let hashed = D::digest(msg);
    let prefix = pkcs1v15_generate_prefix::<D>();
    let em = Zeroizing::new(pkcs1v15_sign_pad(&prefix, &hashed, priv_key.size())?);

    let m = bigint::from_bytes_be(&em);
    uint_to_be_pad(rsa_decrypt_and_check(priv_key, &m)?, priv_key.size())
}

/// Verifies `sig` over the digest of `msg` computed with `D`.
pub fn verify<D>(pub_key: &RsaPublicKey, msg: &[u8], sig: &[u8]) -> Result<()>
where
    D: Digest + AssociatedOid,
{
    if sig.len() != pub_key.size() {
        return Err(Error::Verification);
    }

    let s = bigint::from_bytes_be(sig);
    if &s >= pub_key.n() {
        return Err(Error::Verification);
    }

    let hashed = D::digest(msg);
    let prefix = pkcs1v15_generate_prefix::<D>();
    let em = uint_to_be_pad(rsa_encrypt(pub_key, &s), pub_key.size())?;

    pkcs1v15_sign_unpad(&prefix, &hashed, &em, pub_key.size())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyPair;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    use sha2::Sha256;

    #[test]
    fn sign_verify_roundtrip() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let pair = KeyPair::generate(&mut rng, 512).unwrap();

        let msg = b"test message for signing";
        let sig = sign::<Sha256>(pair.private_key(), msg).unwrap();
        assert_eq!(sig.len(), 64);

        verify::<Sha256>(pair.public_key(), msg, &sig).unwrap();
    }

    #[test]
    fn verify_rejects_tampering() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let pair = KeyPair::generate(&mut rng, 512).unwrap();

        let msg = b"test message for signing";
        let sig = sign::<Sha256>(pair.private_key(), msg).unwrap();

        assert!(matches!(
            verify::<Sha256>(pair.public_key(), b"test message for signinG", &sig),
            Err(Error::Verification)
        ));

        let mut bad_sig = sig.clone();
        bad_sig[10] ^= 1;
        assert!(verify::<Sha256>(pair.public_key(), msg, &bad_sig).is_err());

        assert!(matches!(
            verify::<Sha256>(pair.public_key(), msg, &sig[1..]),
            Err(Error::Verification)
        ));
    }
}
