//! PKCS#8 and SubjectPublicKeyInfo encoding support.
//!
//! The key types plug into the `pkcs8`/`spki` trait machinery here; the
//! inner PKCS#1 structures come from the `pkcs1` crate. PEM-level entry
//! points with crate error mapping live in [`crate::pem`].

use core::convert::{TryFrom, TryInto};

use num_bigint::BigUint;
use pkcs8::{
    der::Encode, Document, EncodePrivateKey, EncodePublicKey, SecretDocument,
};
use zeroize::Zeroizing;

use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Verify that the `AlgorithmIdentifier` for a key names `rsaEncryption`
/// with NULL parameters.
pub(crate) fn verify_algorithm_id(
    algorithm: &pkcs8::AlgorithmIdentifierRef<'_>,
) -> pkcs8::spki::Result<()> {
    match algorithm.oid {
        pkcs1::ALGORITHM_OID => {
            if algorithm.parameters_any()? != pkcs8::der::asn1::Null.into() {
                return Err(pkcs8::spki::Error::KeyMalformed);
            }
        }
        _ => return Err(pkcs8::spki::Error::OidUnknown { oid: algorithm.oid }),
    };

    Ok(())
}

impl TryFrom<pkcs8::PrivateKeyInfo<'_>> for RsaPrivateKey {
    type Error = pkcs8::Error;

    fn try_from(private_key_info: pkcs8::PrivateKeyInfo<'_>) -> pkcs8::Result<Self> {
        verify_algorithm_id(&private_key_info.algorithm)?;

        let pkcs1_key = pkcs1::RsaPrivateKey::try_from(private_key_info.private_key)?;

        // Multi-prime RSA keys are not supported.
        if pkcs1_key.version() != pkcs1::Version::TwoPrime {
            return Err(pkcs8::Error::KeyMalformed);
        }

        let n = BigUint::from_bytes_be(pkcs1_key.modulus.as_bytes());
        let e = BigUint::from_bytes_be(pkcs1_key.public_exponent.as_bytes());
        let d = BigUint::from_bytes_be(pkcs1_key.private_exponent.as_bytes());
        let p = BigUint::from_bytes_be(pkcs1_key.prime1.as_bytes());
        let q = BigUint::from_bytes_be(pkcs1_key.prime2.as_bytes());

        RsaPrivateKey::from_components(n, e, d, p, q).map_err(|_| pkcs8::Error::KeyMalformed)
    }
}

impl TryFrom<pkcs8::SubjectPublicKeyInfoRef<'_>> for RsaPublicKey {
    type Error = pkcs8::spki::Error;

    fn try_from(spki: pkcs8::SubjectPublicKeyInfoRef<'_>) -> pkcs8::spki::Result<Self> {
        use pkcs8::spki::Error::KeyMalformed;

        verify_algorithm_id(&spki.algorithm)?;

        let pkcs1_key =
            pkcs1::RsaPublicKey::try_from(spki.subject_public_key.as_bytes().ok_or(KeyMalformed)?)?;

        let n = BigUint::from_bytes_be(pkcs1_key.modulus.as_bytes());
        let e = BigUint::from_bytes_be(pkcs1_key.public_exponent.as_bytes());

        RsaPublicKey::new(n, e).map_err(|_| KeyMalformed)
    }
}

impl EncodePrivateKey for RsaPrivateKey {
    fn to_pkcs8_der(&self) -> pkcs8::Result<SecretDocument> {
        let modulus = self.n().to_bytes_be();
        let public_exponent = self.e().to_bytes_be();
        let private_exponent = Zeroizing::new(self.d().to_bytes_be());
        let prime1 = Zeroizing::new(self.p().to_bytes_be());
        let prime2 = Zeroizing::new(self.q().to_bytes_be());
        let exponent1 = Zeroizing::new(self.dp().to_bytes_be());
        let exponent2 = Zeroizing::new(self.dq().to_bytes_be());
        let coefficient = Zeroizing::new(self.qinv().to_bytes_be());

        let private_key = Zeroizing::new(
            pkcs1::RsaPrivateKey {
                modulus: pkcs1::UintRef::new(&modulus)?,
                public_exponent: pkcs1::UintRef::new(&public_exponent)?,
                private_exponent: pkcs1::UintRef::new(&private_exponent)?,
                prime1: pkcs1::UintRef::new(&prime1)?,
                prime2: pkcs1::UintRef::new(&prime2)?,
                exponent1: pkcs1::UintRef::new(&exponent1)?,
                exponent2: pkcs1::UintRef::new(&exponent2)?,
                coefficient: pkcs1::UintRef::new(&coefficient)?,
                other_prime_infos: None,
            }
            .to_der()?,
        );

        pkcs8::PrivateKeyInfo::new(pkcs1::ALGORITHM_ID, private_key.as_ref()).try_into()
    }
}

impl EncodePublicKey for RsaPublicKey {
    fn to_public_key_der(&self) -> pkcs8::spki::Result<Document> {
        let modulus = self.n().to_bytes_be();
        let public_exponent = self.e().to_bytes_be();

        let subject_public_key = pkcs1::RsaPublicKey {
            modulus: pkcs1::UintRef::new(&modulus)?,
            public_exponent: pkcs1::UintRef::new(&public_exponent)?,
        }
        .to_der()?;

        pkcs8::SubjectPublicKeyInfoRef {
            algorithm: pkcs1::ALGORITHM_ID,
            subject_public_key: pkcs8::der::asn1::BitStringRef::new(0, &subject_public_key)?,
        }
        .try_into()
    }
}
