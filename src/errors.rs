//! Error types.

use core::fmt;

/// Alias for [`core::result::Result`] with the crate [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The requested modulus size cannot accommodate the public exponent.
    BitSizeTooSmall,

    /// The public exponent must be odd.
    PublicExponentEven,

    /// The public exponent must be greater than 2.
    PublicExponentTooSmall,

    /// The public exponent exceeds the supported ceiling.
    PublicExponentTooLarge,

    /// No suitable prime pair was found within the retry budget.
    PrimeSearchExhausted,

    /// A prime factor is unsuitable, e.g. not coprime to its partner.
    InvalidPrime,

    /// The modulus is even or disagrees with the prime factors.
    InvalidModulus,

    /// The private and public exponents are not inverses of each other.
    InvalidExponent,

    /// No CRT coefficient exists for the given primes.
    InvalidCoefficient,

    /// Malformed base64 input.
    Decode(base64ct::Error),

    /// Malformed PEM armor or ASN.1 structure.
    PemParse(pkcs8::Error),

    /// Malformed `<RSAKeyValue>` document.
    XmlParse {
        /// What the parser objected to.
        reason: String,
    },

    /// The key is not an RSA key, or presents an unusable field set.
    UnsupportedKeyType,

    /// JWK serialization failure.
    Json(serde_json::Error),

    /// Writing key material to disk failed.
    FileWrite(std::io::Error),

    /// The encoded message does not fit the modulus width.
    MessageTooLong,

    /// Signature verification failed.
    Verification,

    /// Internal arithmetic invariant violated.
    Internal,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BitSizeTooSmall => {
                write!(f, "modulus bit size too small for the public exponent")
            }
            Error::PublicExponentEven => write!(f, "public exponent must be odd"),
            Error::PublicExponentTooSmall => write!(f, "public exponent too small"),
            Error::PublicExponentTooLarge => write!(f, "public exponent too large"),
            Error::PrimeSearchExhausted => {
                write!(f, "no suitable prime pair found within the retry budget")
            }
            Error::InvalidPrime => write!(f, "invalid prime value"),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::InvalidExponent => write!(f, "invalid exponent"),
            Error::InvalidCoefficient => write!(f, "invalid CRT coefficient"),
            Error::Decode(err) => write!(f, "base64 decode error: {}", err),
            Error::PemParse(err) => write!(f, "PEM parse error: {}", err),
            Error::XmlParse { reason } => write!(f, "XML parse error: {}", reason),
            Error::UnsupportedKeyType => write!(f, "unsupported key type"),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::FileWrite(err) => write!(f, "file write error: {}", err),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::Verification => write!(f, "verification error"),
            Error::Internal => write!(f, "internal error"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Decode(err) => Some(err),
            Error::PemParse(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::FileWrite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<base64ct::Error> for Error {
    fn from(err: base64ct::Error) -> Error {
        Error::Decode(err)
    }
}

impl From<pkcs8::Error> for Error {
    fn from(err: pkcs8::Error) -> Error {
        match err {
            pkcs8::Error::PublicKey(pkcs8::spki::Error::OidUnknown { .. }) => {
                Error::UnsupportedKeyType
            }
            err => Error::PemParse(err),
        }
    }
}

impl From<pkcs8::spki::Error> for Error {
    fn from(err: pkcs8::spki::Error) -> Error {
        match err {
            pkcs8::spki::Error::OidUnknown { .. } => Error::UnsupportedKeyType,
            err => Error::PemParse(pkcs8::Error::PublicKey(err)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Json(err)
    }
}
