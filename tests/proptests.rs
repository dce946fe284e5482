//! Property-based tests for the integer codec.

use proptest::prelude::*;
use rsa_keymat::{bigint, BigUint};

prop_compose! {
    fn biguint()(bytes in proptest::collection::vec(any::<u8>(), 0..64)) -> BigUint {
        BigUint::from_bytes_be(&bytes)
    }
}

proptest! {
    #[test]
    fn bytes_roundtrip(x in biguint()) {
        prop_assert_eq!(bigint::from_bytes_be(&bigint::to_bytes_be(&x)), x);
    }

    #[test]
    fn base64_std_roundtrip(x in biguint()) {
        prop_assert_eq!(bigint::from_base64(&bigint::to_base64(&x)).unwrap(), x);
    }

    #[test]
    fn base64_url_roundtrip(x in biguint()) {
        prop_assert_eq!(bigint::from_base64url(&bigint::to_base64url(&x)).unwrap(), x);
    }

    #[test]
    fn byte_form_is_minimal(x in biguint()) {
        let bytes = bigint::to_bytes_be(&x);
        prop_assert_eq!(bytes.len(), core::cmp::max(1, (x.bits() + 7) / 8));
        if bytes.len() > 1 {
            prop_assert_ne!(bytes[0], 0);
        }
    }

    #[test]
    fn url_alphabet_stays_url_safe(x in biguint()) {
        let encoded = bigint::to_base64url(&x);
        prop_assert!(!encoded.contains(['+', '/', '=']));

        let std_encoded = bigint::to_base64(&x);
        prop_assert_eq!(std_encoded.len() % 4, 0);
    }
}
