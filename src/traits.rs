//! Traits related to the key components.
//!
//! Export and encoding routines dispatch on these capabilities rather than
//! on concrete key types: anything presenting `{n, e}` can be rendered in a
//! public form, anything additionally presenting the private field set can
//! be rendered in a private form.

use num_bigint::BigUint;

/// Components of an RSA public key.
pub trait PublicKeyParts {
    /// Returns the modulus of the key.
    fn n(&self) -> &BigUint;

    /// Returns the public exponent of the key.
    fn e(&self) -> &BigUint;

    /// Returns the modulus size in bytes. Raw signatures for or by this key
    /// have the same size.
    fn size(&self) -> usize {
        (self.n().bits() + 7) / 8
    }
}

/// Components of an RSA private key.
pub trait PrivateKeyParts: PublicKeyParts {
    /// Returns the private exponent of the key.
    fn d(&self) -> &BigUint;

    /// Returns the first prime factor.
    fn p(&self) -> &BigUint;

    /// Returns the second prime factor.
    fn q(&self) -> &BigUint;

    /// Returns the precomputed `d mod (p-1)`.
    fn dp(&self) -> &BigUint;

    /// Returns the precomputed `d mod (q-1)`.
    fn dq(&self) -> &BigUint;

    /// Returns the precomputed `q⁻¹ mod p`.
    fn qinv(&self) -> &BigUint;
}
