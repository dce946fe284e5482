//! Raw RSA operations over the key component traits.

use num_bigint::{BigInt, BigUint, IntoBigUint, ModInverse, Sign};
use num_traits::Signed;
use zeroize::Zeroize;

use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Raw RSA public operation, `m^e mod n`. No padding is performed.
#[inline]
pub(crate) fn rsa_encrypt<K: PublicKeyParts>(key: &K, m: &BigUint) -> BigUint {
    m.modpow(key.e(), key.n())
}

/// Raw RSA private operation via the precomputed CRT parameters.
pub(crate) fn rsa_decrypt<K: PrivateKeyParts>(priv_key: &K, c: &BigUint) -> Result<BigUint> {
    if c >= priv_key.n() {
        return Err(Error::Internal);
    }

    // m1 = c^dP mod p, m2 = c^dQ mod q,
    // h = qInv·(m1 - m2) mod p, m = m2 + h·q
    let mut m = BigInt::from_biguint(Sign::Plus, c.modpow(priv_key.dp(), priv_key.p()));
    let mut m2 = BigInt::from_biguint(Sign::Plus, c.modpow(priv_key.dq(), priv_key.q()));

    m -= &m2;

    let mut p = BigInt::from_biguint(Sign::Plus, priv_key.p().clone());
    let mut q = BigInt::from_biguint(Sign::Plus, priv_key.q().clone());
    let mut qinv = BigInt::from_biguint(Sign::Plus, priv_key.qinv().clone());

    while m.is_negative() {
        m += &p;
    }
    m *= &qinv;
    m %= &p;
    m *= &q;
    m += &m2;

    // clear tmp values
    m2.zeroize();
    p.zeroize();
    q.zeroize();
    qinv.zeroize();

    m.into_biguint().ok_or(Error::Internal)
}

/// Raw RSA private operation, checked against re-encryption to defend
/// against errors in the CRT computation.
#[inline]
pub(crate) fn rsa_decrypt_and_check<K: PrivateKeyParts>(
    priv_key: &K,
    c: &BigUint,
) -> Result<BigUint> {
    let m = rsa_decrypt(priv_key, c)?;

    let check = rsa_encrypt(priv_key, &m);
    if c != &check {
        return Err(Error::Internal);
    }

    Ok(m)
}

/// Left-pads the big-endian form of `x` to exactly `size` bytes.
pub(crate) fn uint_to_be_pad(x: BigUint, size: usize) -> Result<Vec<u8>> {
    let bytes = x.to_bytes_be();
    if bytes.len() > size {
        return Err(Error::Internal);
    }

    let mut out = vec![0u8; size];
    out[size - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}

/// Modular inverse of `a` mod `m` as the canonical non-negative residue.
pub(crate) fn mod_inverse_uint(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    let mut inv = a.clone().mod_inverse(m)?;
    if inv.is_negative() {
        inv += BigInt::from_biguint(Sign::Plus, m.clone());
    }
    inv.into_biguint()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::RsaPrivateKey;

    fn textbook_key() -> RsaPrivateKey {
        RsaPrivateKey::from_components(
            BigUint::from(3233u32),
            BigUint::from(17u32),
            BigUint::from(2753u32),
            BigUint::from(61u32),
            BigUint::from(53u32),
        )
        .unwrap()
    }

    #[test]
    fn crt_decrypt_inverts_encrypt() {
        let key = textbook_key();
        for m in [0u32, 1, 42, 65, 3232] {
            let m = BigUint::from(m);
            let c = rsa_encrypt(&key, &m);
            assert_eq!(rsa_decrypt_and_check(&key, &c).unwrap(), m);
        }
    }

    #[test]
    fn rejects_out_of_range_input() {
        let key = textbook_key();
        assert!(rsa_decrypt(&key, &BigUint::from(3233u32)).is_err());
    }

    #[test]
    fn pads_to_fixed_width() {
        assert_eq!(
            uint_to_be_pad(BigUint::from(0x0102u32), 4).unwrap(),
            vec![0, 0, 1, 2]
        );
        assert!(uint_to_be_pad(BigUint::from(0x01020304u32), 3).is_err());
    }

    #[test]
    fn mod_inverse_is_canonical() {
        let inv = mod_inverse_uint(&BigUint::from(53u32), &BigUint::from(61u32)).unwrap();
        assert_eq!(inv, BigUint::from(38u32));
    }
}
