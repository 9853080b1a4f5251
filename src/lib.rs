#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
//!
//! # Crate layout
//!
//! The codec sits on top of a small algebra stack, each layer usable on its
//! own:
//!
//! - [`PrimeField`] — modular arithmetic on `u64` values for primes below
//!   `2^63`, with root-of-unity lookup.
//! - [`Polynomial`] / [`DensePolyRing`] — dense polynomials with a
//!   coefficient/NTT domain tag; schoolbook and transform-accelerated
//!   arithmetic, long division, and the partial extended Euclidean
//!   algorithm.
//! - [`Interpolator`] — quadratic Lagrange interpolation.
//! - [`EvaluationMap`] — where codewords live: [`SlowEvaluator`] for
//!   arbitrary block lengths, [`NttEvaluator`] for power-of-two lengths
//!   with transform-speed encoding.
//! - [`GaoCode`] — the Reed-Solomon codec itself.

pub mod error;
pub mod evaluator;
pub mod field;
pub mod gao;
pub mod interp;
pub mod poly;
pub mod primes;
pub mod ring;

mod fast;
mod ntt;

#[cfg(test)]
mod test_util;

pub use error::{Error, Result};
pub use evaluator::{EvaluationMap, NttEvaluator, SlowEvaluator};
pub use field::PrimeField;
pub use gao::{CodeParams, GaoCode};
pub use interp::Interpolator;
pub use poly::{Domain, Polynomial};
pub use ring::DensePolyRing;
