//! Reed-Solomon encoding and Gao decoding.
//!
//! Encoding is plain: pad the message to the block length, evaluate it at
//! the map's points. Decoding follows Gao's algorithm, which skips syndromes
//! entirely:
//!
//! 1. Interpolate the received word into `g1` (for the NTT map this is one
//!    backward transform).
//! 2. Run the extended Euclidean algorithm on `(g0, g1)` — `g0` being the
//!    locator of the full point set — and stop the first time the remainder
//!    degree falls below `(n + k) / 2`. At that point the remainder is
//!    `f * v`, the message polynomial times the error locator, and the
//!    Bezout cofactor of `g1` is `v` itself.
//! 3. Divide. A zero remainder and a small enough quotient yield the
//!    message; anything else means the corruption exceeded `(n - k) / 2`
//!    combined errors and erasures.
//!
//! Reference: S. Gao, "A new algorithm for decoding Reed-Solomon codes",
//! Communications, Information and Network Security, 2003.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::evaluator::EvaluationMap;
use crate::interp::Interpolator;
use crate::poly::{Domain, Polynomial};
use crate::ring::DensePolyRing;

/// Validated code parameters bound to an evaluation map.
///
/// `n` is the block length (how many points a codeword has), `k` the code
/// dimension (how many field elements a message holds). Up to
/// `(n - k) / 2` combined errors and erasures are correctable.
pub struct CodeParams {
    map: Arc<dyn EvaluationMap>,
    n: usize,
    k: usize,
    max_errors: usize,
}

impl CodeParams {
    /// Binds `(n, k)` to an evaluation map.
    ///
    /// Fails with [`Error::NSmallerThanK`] unless `n >= k >= 1`. The NTT
    /// map additionally needs `n` to be a power of two dividing `p - 1`,
    /// which surfaces when the code is built.
    pub fn new(map: Arc<dyn EvaluationMap>, n: usize, k: usize) -> Result<Self> {
        if k == 0 || n < k {
            return Err(Error::NSmallerThanK);
        }
        Ok(Self {
            map,
            n,
            k,
            max_errors: (n - k) / 2,
        })
    }

    /// Block length `n`.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Code dimension `k`.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Correction capability `(n - k) / 2`.
    #[must_use]
    pub fn max_errors(&self) -> usize {
        self.max_errors
    }

    /// The evaluation map the code runs on.
    #[must_use]
    pub fn evaluation_map(&self) -> &Arc<dyn EvaluationMap> {
        &self.map
    }
}

/// A Reed-Solomon code with Gao's Euclidean decoder.
///
/// Construction precomputes the locator polynomial `g0` of the full point
/// set and the Euclidean stopping degree; `encode` and `decode` are then
/// read-only and may be called from several threads on clones or behind a
/// shared reference, as long as each call owns its inputs.
pub struct GaoCode {
    params: CodeParams,
    ring: DensePolyRing,
    interpolator: Interpolator,
    g0: Polynomial,
    stop_degree: usize,
}

impl GaoCode {
    /// Builds the code: locator polynomial, interpolator, stopping degree.
    ///
    /// The evaluation points are materialised here, so a block length the
    /// map cannot serve (an NTT map with `n` not a power of two dividing
    /// `p - 1`) fails construction instead of the first encode.
    pub fn new(params: CodeParams) -> Result<Self> {
        let field = params.map.prime_field().clone();
        params.map.evaluation_points(params.n)?;
        let g0 = params.map.locator_polynomial(params.n)?;
        Ok(Self {
            ring: DensePolyRing::new(field.clone()),
            interpolator: Interpolator::new(field),
            g0,
            stop_degree: (params.n + params.k) / 2,
            params,
        })
    }

    /// The parameters this code was built with.
    #[must_use]
    pub fn params(&self) -> &CodeParams {
        &self.params
    }

    /// Block length `n`.
    #[must_use]
    pub fn n(&self) -> usize {
        self.params.n
    }

    /// Code dimension `k`.
    #[must_use]
    pub fn k(&self) -> usize {
        self.params.k
    }

    /// Correction capability `(n - k) / 2`.
    #[must_use]
    pub fn max_errors(&self) -> usize {
        self.params.max_errors
    }

    /// Encodes up to `k` field elements into the map `{ x_i -> y_i }` of
    /// all `n` codeword points.
    ///
    /// Fails with [`Error::DataElementsTooLarge`] when an element is not
    /// reduced and [`Error::DataTooLarge`] when the message is longer than
    /// `k`. Short messages are zero-padded.
    pub fn encode(&self, data: &[u64]) -> Result<HashMap<u64, u64>> {
        let field = self.params.map.prime_field();
        let modulus = field.modulus();
        if data.iter().any(|&d| d >= modulus) {
            return Err(Error::DataElementsTooLarge);
        }
        if data.len() > self.params.k {
            return Err(Error::DataTooLarge);
        }

        let mut padded = vec![0u64; self.params.n];
        padded[..data.len()].copy_from_slice(data);
        let mut poly = Polynomial::new(field, padded, Domain::Coefficient)?;

        let ys = self.params.map.evaluate_polynomial(&mut poly)?;
        let xs = self.params.map.evaluation_points(self.params.n)?;

        Ok(xs.iter().copied().zip(ys).collect())
    }

    /// Decodes a possibly corrupted, possibly incomplete point map back to
    /// the original message, always returning exactly `k` elements.
    ///
    /// Points absent from `received` count as erasures and are treated as
    /// errors at value zero; the input map itself is never modified. Fails
    /// with [`Error::TooManyPoints`], [`Error::TooManyMissingPoints`], or
    /// [`Error::Decoding`] when the corruption exceeds
    /// [`GaoCode::max_errors`].
    pub fn decode(&self, received: &HashMap<u64, u64>) -> Result<Vec<u64>> {
        let n = self.params.n;
        let k = self.params.k;
        if received.len() > n {
            return Err(Error::TooManyPoints);
        }

        let xs = self.params.map.evaluation_points(n)?;
        let mut ys = Vec::with_capacity(n);
        let mut missing = 0usize;
        for x in xs.iter() {
            match received.get(x) {
                Some(&y) => ys.push(y),
                None => {
                    ys.push(0);
                    missing += 1;
                }
            }
        }
        if missing > self.params.max_errors {
            return Err(Error::TooManyMissingPoints);
        }

        // An all-zero word within the correction radius can only come from
        // the zero codeword; the Euclidean stage cannot express it because
        // the interpolant g1 vanishes entirely.
        if ys.iter().all(|&y| y == 0) {
            return Ok(vec![0; k]);
        }

        let field = self.params.map.prime_field();
        let (message, remainder) = if self.params.map.is_ntt() {
            let mut g1 = Polynomial::new(field, ys, Domain::Ntt)?;
            self.ring.ntt_backward(&mut g1)?;
            let (g, _, v) =
                self.ring
                    .ntt_partial_extended_euclidean(&self.g0, &g1, self.stop_degree)?;
            if v.is_zero() {
                return Err(Error::Decoding);
            }
            self.ring.long_div_ntt(&g, &v)?
        } else {
            let g1 = self.interpolator.interpolate(&xs, &ys)?;
            let (g, _, v) = self
                .ring
                .partial_extended_euclidean(&self.g0, &g1, self.stop_degree)?;
            if v.is_zero() {
                return Err(Error::Decoding);
            }
            self.ring.long_div(&g, &v)?
        };

        if !remainder.is_zero() || message.degree().is_some_and(|d| d > k) {
            return Err(Error::Decoding);
        }

        let mut out = message.into_coeffs();
        out.resize(k, 0);
        Ok(out)
    }
}
