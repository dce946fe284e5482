//! Prime search for new RSA keys.

use num_bigint::{BigUint, RandPrime};
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;

use crate::algorithms::rsa::mod_inverse_uint;
use crate::errors::{Error, Result};

/// Rounds of fresh prime pairs drawn before generation gives up.
///
/// Each round is independent, so at usable modulus sizes exhausting the
/// budget is effectively unreachable; it exists so generation at degenerate
/// test sizes fails instead of spinning.
const RETRY_BUDGET: usize = 128;

/// Numeric components of a freshly generated two-prime key.
pub(crate) struct KeyComponents {
    pub(crate) n: BigUint,
    pub(crate) e: BigUint,
    pub(crate) d: BigUint,
    pub(crate) p: BigUint,
    pub(crate) q: BigUint,
}

/// Generates the components of a two-prime RSA key whose modulus has
/// exactly `bit_size` bits, using the given public exponent and random
/// source.
///
/// A round is discarded when the primes coincide, their product misses the
/// requested bit length, or the exponent is not invertible modulo the
/// totient.
pub(crate) fn generate_key_with_exp<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
    exp: &BigUint,
) -> Result<KeyComponents> {
    if exp.is_even() {
        return Err(Error::PublicExponentEven);
    }
    if exp < &BigUint::from(3u8) {
        return Err(Error::PublicExponentTooSmall);
    }
    // Each prime must strictly dominate the exponent or no inverse exists.
    if bit_size < 16 || exp.bits() >= bit_size / 2 {
        return Err(Error::BitSizeTooSmall);
    }

    let one = BigUint::one();

    for _ in 0..RETRY_BUDGET {
        // gen_prime sets the top two bits of each prime, so complementary
        // widths multiply to exactly `bit_size` bits in almost every draw.
        let mut todo = bit_size;
        let p: BigUint = rng.gen_prime(todo / 2);
        todo -= p.bits();
        let q: BigUint = rng.gen_prime(todo);

        if p == q {
            continue;
        }

        let n = &p * &q;
        if n.bits() != bit_size {
            continue;
        }

        let totient = (&p - &one) * (&q - &one);
        if let Some(d) = mod_inverse_uint(exp, &totient) {
            return Ok(KeyComponents {
                n,
                e: exp.clone(),
                d,
                p,
                q,
            });
        }
    }

    Err(Error::PrimeSearchExhausted)
}
