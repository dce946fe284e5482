//! RSA key types and key pair generation.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::algorithms::generate::generate_key_with_exp;
use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Default public exponent (F4) used by [`KeyPair::generate`].
pub const DEFAULT_EXP: u64 = 65537;

/// Largest supported public exponent, `2^33 - 1`.
const MAX_PUB_EXPONENT: u64 = (1 << 33) - 1;

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    n: BigUint,
    e: BigUint,
}

/// Represents a whole RSA key, public and private parts.
#[derive(Debug, Clone)]
pub struct RsaPrivateKey {
    pubkey_components: RsaPublicKey,
    /// Private exponent
    d: BigUint,
    /// First prime factor of the modulus
    p: BigUint,
    /// Second prime factor of the modulus
    q: BigUint,
    /// Precomputed values to speed up private operations
    precomputed: PrecomputedValues,
}

/// CRT parameters derived from `d`, `p` and `q` at construction time.
#[derive(Debug, Clone)]
pub(crate) struct PrecomputedValues {
    /// D mod (P-1)
    pub(crate) dp: BigUint,
    /// D mod (Q-1)
    pub(crate) dq: BigUint,
    /// Q^-1 mod P, normalized to the canonical non-negative residue
    pub(crate) qinv: BigUint,
}

impl PrecomputedValues {
    fn new(d: &BigUint, p: &BigUint, q: &BigUint) -> Result<PrecomputedValues> {
        let one = BigUint::one();
        if p <= &one || q <= &one {
            return Err(Error::InvalidPrime);
        }

        let dp = d % (p - &one);
        let dq = d % (q - &one);
        let qinv = crate::algorithms::rsa::mod_inverse_uint(q, p).ok_or(Error::InvalidPrime)?;

        Ok(PrecomputedValues { dp, dq, qinv })
    }
}

impl Zeroize for PrecomputedValues {
    fn zeroize(&mut self) {
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

impl Drop for PrecomputedValues {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Check that the public components are well formed: an odd modulus and an
/// odd exponent within `(2, 2^33)`.
pub(crate) fn check_public(public_key: &impl PublicKeyParts) -> Result<()> {
    let e = public_key
        .e()
        .to_u64()
        .ok_or(Error::PublicExponentTooLarge)?;

    if e & 1 == 0 {
        return Err(Error::PublicExponentEven);
    }
    if e < 3 {
        return Err(Error::PublicExponentTooSmall);
    }
    if e > MAX_PUB_EXPONENT {
        return Err(Error::PublicExponentTooLarge);
    }
    if public_key.n().is_even() {
        return Err(Error::InvalidModulus);
    }

    Ok(())
}

impl RsaPublicKey {
    /// Creates a public key from its components, rejecting malformed
    /// exponents and moduli.
    pub fn new(n: BigUint, e: BigUint) -> Result<RsaPublicKey> {
        let key = RsaPublicKey { n, e };
        check_public(&key)?;
        Ok(key)
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl RsaPrivateKey {
    /// Generates a new key of the given modulus size with the default
    /// public exponent, using the given random source.
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R, bit_size: usize) -> Result<RsaPrivateKey> {
        Self::new_with_exp(rng, bit_size, &BigUint::from(DEFAULT_EXP))
    }

    /// Generates a new key of the given modulus size and public exponent.
    pub fn new_with_exp<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        bit_size: usize,
        exp: &BigUint,
    ) -> Result<RsaPrivateKey> {
        let components = generate_key_with_exp(rng, bit_size, exp)?;
        RsaPrivateKey::from_components(
            components.n,
            components.e,
            components.d,
            components.p,
            components.q,
        )
    }

    /// Constructs a key from its numeric components, precomputing the CRT
    /// parameters.
    ///
    /// The public components are checked as in [`RsaPublicKey::new`]; deeper
    /// consistency of `d` with the primes is checked by [`validate`].
    ///
    /// [`validate`]: RsaPrivateKey::validate
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        p: BigUint,
        q: BigUint,
    ) -> Result<RsaPrivateKey> {
        let pubkey_components = RsaPublicKey::new(n, e)?;
        let precomputed = PrecomputedValues::new(&d, &p, &q)?;

        Ok(RsaPrivateKey {
            pubkey_components,
            d,
            p,
            q,
            precomputed,
        })
    }

    /// Returns the public key matching this private key.
    pub fn to_public_key(&self) -> RsaPublicKey {
        self.pubkey_components.clone()
    }

    /// Performs sanity checks on the key: `n = p·q` and
    /// `d·e ≡ 1 mod (p-1)` and `mod (q-1)` (equivalently `mod lcm`).
    pub fn validate(&self) -> Result<()> {
        check_public(self)?;

        if &self.p * &self.q != self.pubkey_components.n {
            return Err(Error::InvalidModulus);
        }

        let de = self.e() * &self.d;
        for prime in [&self.p, &self.q] {
            let congruence: BigUint = &de % (prime - BigUint::one());
            if !congruence.is_one() {
                return Err(Error::InvalidExponent);
            }
        }

        Ok(())
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.pubkey_components.n
    }

    fn e(&self) -> &BigUint {
        &self.pubkey_components.e
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &BigUint {
        &self.d
    }

    fn p(&self) -> &BigUint {
        &self.p
    }

    fn q(&self) -> &BigUint {
        &self.q
    }

    fn dp(&self) -> &BigUint {
        &self.precomputed.dp
    }

    fn dq(&self) -> &BigUint {
        &self.precomputed.dq
    }

    fn qinv(&self) -> &BigUint {
        &self.precomputed.qinv
    }
}

impl PartialEq for RsaPrivateKey {
    #[inline]
    fn eq(&self, other: &RsaPrivateKey) -> bool {
        self.pubkey_components == other.pubkey_components
            && self.d == other.d
            && self.p == other.p
            && self.q == other.q
    }
}

impl Eq for RsaPrivateKey {}

impl Zeroize for RsaPrivateKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.precomputed.zeroize();
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: &RsaPrivateKey) -> Self {
        private_key.to_public_key()
    }
}

impl From<RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: RsaPrivateKey) -> Self {
        private_key.to_public_key()
    }
}

/// A generated key pair: one private key and the public key derived from
/// it. Immutable after generation; generating again yields an unrelated
/// pair.
#[derive(Debug, Clone)]
pub struct KeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl KeyPair {
    /// Generates a fresh pair with the default public exponent
    /// ([`DEFAULT_EXP`]).
    pub fn generate<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        modulus_bits: usize,
    ) -> Result<KeyPair> {
        Ok(KeyPair::from_private_key(RsaPrivateKey::new(
            rng,
            modulus_bits,
        )?))
    }

    /// Generates a fresh pair with an explicit public exponent.
    pub fn generate_with_exp<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        modulus_bits: usize,
        exp: &BigUint,
    ) -> Result<KeyPair> {
        Ok(KeyPair::from_private_key(RsaPrivateKey::new_with_exp(
            rng,
            modulus_bits,
            exp,
        )?))
    }

    /// Wraps an existing private key, deriving its public half.
    pub fn from_private_key(private: RsaPrivateKey) -> KeyPair {
        let public = private.to_public_key();
        KeyPair { private, public }
    }

    /// The private key of the pair.
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }

    /// The public key derived from the private key.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    /// The classic textbook key: p=61, q=53, n=3233, e=17, d=2753.
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
    fn precomputes_crt_parameters() {
        let key = textbook_key();
        assert_eq!(key.dp(), &BigUint::from(53u32));
        assert_eq!(key.dq(), &BigUint::from(49u32));
        assert_eq!(key.qinv(), &BigUint::from(38u32));
        key.validate().unwrap();
    }

    #[test]
    fn derived_public_key_matches() {
        let key = textbook_key();
        let public = key.to_public_key();
        assert_eq!(public.n(), key.n());
        assert_eq!(public.e(), key.e());
    }

    #[test]
    fn rejects_bad_public_components() {
        let n = BigUint::from(3233u32);
        assert!(matches!(
            RsaPublicKey::new(n.clone(), BigUint::from(4u32)),
            Err(Error::PublicExponentEven)
        ));
        assert!(matches!(
            RsaPublicKey::new(n.clone(), BigUint::from(1u32)),
            Err(Error::PublicExponentTooSmall)
        ));
        assert!(matches!(
            RsaPublicKey::new(BigUint::from(3232u32), BigUint::from(17u32)),
            Err(Error::InvalidModulus)
        ));
        assert!(matches!(
            RsaPublicKey::new(n, BigUint::from((1u64 << 34) + 1)),
            Err(Error::PublicExponentTooLarge)
        ));
    }

    #[test]
    fn validate_detects_wrong_modulus() {
        // 3235 = 5 · 647, not 61 · 53.
        let key = RsaPrivateKey::from_components(
            BigUint::from(3235u32),
            BigUint::from(17u32),
            BigUint::from(2753u32),
            BigUint::from(61u32),
            BigUint::from(53u32),
        )
        .unwrap();
        assert!(matches!(key.validate(), Err(Error::InvalidModulus)));
    }

    #[test]
    fn generated_pair_is_valid() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let pair = KeyPair::generate(&mut rng, 512).unwrap();
        assert_eq!(pair.private_key().n().bits(), 512);
        assert_eq!(pair.public_key().e(), &BigUint::from(DEFAULT_EXP));
        pair.private_key().validate().unwrap();
    }

    #[test]
    fn regeneration_yields_unrelated_pairs() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let a = KeyPair::generate(&mut rng, 256).unwrap();
        let b = KeyPair::generate(&mut rng, 256).unwrap();
        assert_ne!(a.private_key(), b.private_key());
    }
}
