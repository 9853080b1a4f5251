//! Crate-wide error type.
//!
//! Every fallible operation in the crate reports one of these variants.
//! Mismatched operand fields or domains inside the polynomial ring are
//! treated as programmer errors and panic instead; see [`crate::ring`].

use thiserror::Error;

/// Errors surfaced by field construction, polynomial arithmetic, and the
/// codec.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The modulus does not fit in 63 bits.
    #[error("prime moduli above 63 bits are not supported")]
    PrimeTooLarge,

    /// The modulus failed the primality test.
    #[error("modulus is not prime")]
    NotPrime,

    /// Code parameters violate `n >= k >= 1`.
    #[error("block length `n` must be at least the data length `k`, and `k` at least 1")]
    NSmallerThanK,

    /// A root of unity of order 0 or 1 was requested.
    #[error("root-of-unity order must be at least 2")]
    NTooSmall,

    /// The requested root-of-unity order is not a power of two.
    #[error("root-of-unity order must be a power of two")]
    NotPowerOfTwo,

    /// The requested root-of-unity order does not divide `p - 1`.
    #[error("root-of-unity order must divide p - 1")]
    NotDivisible,

    /// The message is longer than the code dimension `k`.
    #[error("data is longer than the code dimension `k`")]
    DataTooLarge,

    /// A message element is not a reduced field element.
    #[error("data elements must be smaller than the field modulus")]
    DataElementsTooLarge,

    /// More points were received than the block length `n`.
    #[error("received more evaluation points than the block length `n`")]
    TooManyPoints,

    /// More points are missing than the code can correct.
    #[error("more missing points than the code can correct")]
    TooManyMissingPoints,

    /// Interpolation received x and y slices of different lengths.
    #[error("x and y point slices differ in length")]
    PointsSizeMismatch,

    /// Interpolation received a repeated x value.
    #[error("interpolation x values must be distinct")]
    NonUniqueXs,

    /// A coefficient-domain operation was applied to an NTT-domain
    /// polynomial.
    #[error("polynomial is not in coefficient form")]
    NotInCoefficientForm,

    /// The backward transform was applied to a coefficient-domain
    /// polynomial.
    #[error("polynomial is not in NTT form")]
    NotInNttDomain,

    /// A transform was applied to a vector whose length is not a power of
    /// two, or a polynomial was built from an empty coefficient vector.
    #[error("length must be a non-empty power of two")]
    BadLength,

    /// An inverse of zero was requested. This signals a logic bug in the
    /// caller, not bad user data.
    #[error("zero has no multiplicative inverse")]
    ZeroInverse,

    /// The received word is corrupted beyond the correction capability of
    /// the code.
    #[error("received word is beyond the correction capability")]
    Decoding,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
