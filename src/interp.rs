//! Lagrange interpolation in O(n^2).
//!
//! The naive Lagrange formula rebuilds every basis polynomial from scratch;
//! this implementation builds the master product `m(x) = prod (x - x_i)`
//! once and recovers each `q_i = m / (x - x_i)` with a linear-time synthetic
//! division, so the whole interpolation stays quadratic:
//!
//! 1. `m(x) = prod m_i(x)` with `m_i(x) = x - x_i`.
//! 2. `q_i(x) = m(x) / m_i(x)` by synthetic division (no remainder by
//!    construction).
//! 3. `s_i = q_i(x_i)`; the Lagrange basis is `l_i = q_i * s_i^{-1}`.
//! 4. The interpolant is `sum y_i * l_i`, accumulated coefficient-wise.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::poly::{Domain, Polynomial};
use crate::ring::DensePolyRing;

/// Quadratic-time Lagrange interpolator over a prime field.
#[derive(Debug)]
pub struct Interpolator {
    ring: DensePolyRing,
}

impl Interpolator {
    /// An interpolator over `field`.
    #[must_use]
    pub fn new(field: PrimeField) -> Self {
        Self {
            ring: DensePolyRing::new(field),
        }
    }

    /// The coefficient field.
    #[must_use]
    pub fn field(&self) -> &PrimeField {
        self.ring.field()
    }

    /// The unique polynomial of degree below `xs.len()` passing through all
    /// `(x_i, y_i)`.
    ///
    /// Fails with [`Error::PointsSizeMismatch`] when the slices differ in
    /// length and [`Error::NonUniqueXs`] when two x values coincide as field
    /// elements.
    pub fn interpolate(&self, xs: &[u64], ys: &[u64]) -> Result<Polynomial> {
        if xs.len() != ys.len() {
            return Err(Error::PointsSizeMismatch);
        }
        let f = self.ring.field();

        let mut seen = HashSet::with_capacity(xs.len());
        for &x in xs {
            if !seen.insert(f.reduce(x)) {
                return Err(Error::NonUniqueXs);
            }
        }

        let n = xs.len();
        let m = self.ring.monic_from_roots(xs);
        let mc = m.coeffs();

        let mut acc = vec![0u64; n.max(1)];
        let mut q = vec![0u64; n.max(1)];

        for (&x, &y) in xs.iter().zip(ys) {
            let x = f.reduce(x);

            // Synthetic division m / (x - x_i); the remainder is m(x_i) = 0
            // by construction and is not stored.
            let mut carry = mc[n];
            for j in (1..=n).rev() {
                q[j - 1] = carry;
                carry = f.add(mc[j - 1], f.mul(x, carry));
            }

            // s = q(x_i), the denominator prod_{j != i} (x_i - x_j).
            let mut s = 0u64;
            for &c in q.iter().rev() {
                s = f.add(c, f.mul(x, s));
            }
            let scale = f.mul(f.inverse(s)?, f.reduce(y));

            for (slot, &c) in acc.iter_mut().zip(q.iter()) {
                *slot = f.add(*slot, f.mul(c, scale));
            }
        }

        let mut out = Polynomial::from_raw(acc, Domain::Coefficient, f.modulus());
        out.trim();
        Ok(out)
    }
}
