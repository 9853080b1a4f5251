//! Radix-2 number-theoretic transforms with cached twiddle factors.
//!
//! The forward transform maps a coefficient vector of power-of-two length
//! `n` to its evaluations at the `n`-th roots of unity, in the output order
//! of an iterative decimation-in-time Cooley-Tukey butterfly network over an
//! in-place bit-reversal permutation. The backward transform runs the same
//! network with inverse roots and scales by `n^{-1}`.
//!
//! # Twiddle tables
//!
//! Every stage `s` of an `n`-point transform multiplies by powers of the
//! stage root `w_m = root^(n/m)` with span `m = 2^(s+1)`. Those powers are
//! precomputed once per distinct `n` — forward and inverse, plus `n^{-1}` —
//! and cached inside the owning [`DensePolyRing`]. Lookups take a shared
//! lock; a miss builds the table with no lock held and inserts it under the
//! exclusive lock, keeping whichever table got there first.
//!
//! # References
//!
//! - Cooley-Tukey radix-2 DIT as given in von zur Gathen & Gerhard,
//!   *Modern Computer Algebra*, chapter 8.
//! - The length constraint `n | p - 1` comes from needing a principal
//!   `n`-th root of unity in the field.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::poly::{Domain, Polynomial};
use crate::ring::DensePolyRing;

/// Precomputed butterfly factors for one transform length.
#[derive(Debug)]
pub(crate) struct TwiddleTable {
    /// `forward[s][j] = w_m^j` for stage span `m = 2^(s+1)`, `j < m/2`.
    forward: Vec<Vec<u64>>,
    /// Mirror table over the inverse stage roots.
    inverse: Vec<Vec<u64>>,
    /// Scale factor applied by the backward transform.
    n_inv: u64,
}

impl TwiddleTable {
    fn build(field: &PrimeField, n: usize) -> Result<Self> {
        let root = field.root_of_unity(n as u64)?;
        let root_inv = field.inverse(root)?;

        let stages = n.trailing_zeros() as usize;
        let mut forward = Vec::with_capacity(stages);
        let mut inverse = Vec::with_capacity(stages);
        for s in 0..stages {
            let m = 2usize << s;
            let wm = field.pow(root, (n / m) as u64);
            let wm_inv = field.pow(root_inv, (n / m) as u64);

            let mut fwd = Vec::with_capacity(m / 2);
            let mut inv = Vec::with_capacity(m / 2);
            let (mut wf, mut wi) = (1u64, 1u64);
            for _ in 0..m / 2 {
                fwd.push(wf);
                inv.push(wi);
                wf = field.mul(wf, wm);
                wi = field.mul(wi, wm_inv);
            }
            forward.push(fwd);
            inverse.push(inv);
        }

        // n divides p - 1, so n is a unit in the field.
        let n_inv = field.inverse(n as u64)?;
        Ok(Self {
            forward,
            inverse,
            n_inv,
        })
    }
}

impl DensePolyRing {
    /// Cached twiddle table for an `n`-point transform, built on first use.
    pub(crate) fn twiddle_table(&self, n: usize) -> Result<Arc<TwiddleTable>> {
        if let Some(table) = self
            .twiddles
            .read()
            .expect("twiddle cache poisoned")
            .get(&n)
        {
            return Ok(Arc::clone(table));
        }

        // Built without holding the lock; a racing builder may win the
        // insert below, in which case this copy is dropped.
        let built = Arc::new(TwiddleTable::build(self.field(), n)?);
        let mut cache = self.twiddles.write().expect("twiddle cache poisoned");
        Ok(Arc::clone(cache.entry(n).or_insert(built)))
    }

    /// In-place forward transform into the NTT domain.
    ///
    /// No-op for vectors of length 0 or 1 and for operands already in the
    /// NTT domain. Fails with [`Error::BadLength`] unless the length is a
    /// power of two; root-of-unity errors propagate from the field when the
    /// length does not divide `p - 1`.
    pub fn ntt_forward(&self, a: &mut Polynomial) -> Result<()> {
        if a.len() <= 1 || a.domain() == Domain::Ntt {
            return Ok(());
        }
        let n = a.len();
        if !n.is_power_of_two() {
            return Err(Error::BadLength);
        }
        let table = self.twiddle_table(n)?;

        let coeffs = a.coeffs_mut();
        bit_reverse_permute(coeffs);
        butterflies(self.field(), coeffs, &table.forward);
        a.set_domain(Domain::Ntt);
        Ok(())
    }

    /// In-place backward transform into the coefficient domain, trimming
    /// trailing zeros.
    ///
    /// Fails with [`Error::NotInNttDomain`] for a coefficient-domain operand
    /// of length above 1 and [`Error::BadLength`] for a non-power-of-two
    /// length.
    pub fn ntt_backward(&self, a: &mut Polynomial) -> Result<()> {
        self.ntt_backward_inner(a, true)
    }

    /// Backward transform that keeps the padded length, for callers that
    /// slice a deterministic prefix afterwards.
    pub(crate) fn ntt_backward_no_trim(&self, a: &mut Polynomial) -> Result<()> {
        self.ntt_backward_inner(a, false)
    }

    fn ntt_backward_inner(&self, a: &mut Polynomial, trim: bool) -> Result<()> {
        if a.len() <= 1 {
            // A 1-point transform is the identity.
            a.set_domain(Domain::Coefficient);
            return Ok(());
        }
        if a.domain() != Domain::Ntt {
            return Err(Error::NotInNttDomain);
        }
        let n = a.len();
        if !n.is_power_of_two() {
            return Err(Error::BadLength);
        }
        let table = self.twiddle_table(n)?;
        let field = self.field();

        let coeffs = a.coeffs_mut();
        bit_reverse_permute(coeffs);
        butterflies(field, coeffs, &table.inverse);
        for c in coeffs.iter_mut() {
            *c = field.mul(*c, table.n_inv);
        }

        a.set_domain(Domain::Coefficient);
        if trim {
            a.trim();
        }
        Ok(())
    }
}

/// One full butterfly network over `v`, using the per-stage twiddle rows.
fn butterflies(field: &PrimeField, v: &mut [u64], stages: &[Vec<u64>]) {
    let n = v.len();
    for (s, row) in stages.iter().enumerate() {
        let m = 2usize << s;
        let half = m / 2;
        let mut base = 0;
        while base < n {
            for j in 0..half {
                let u = v[base + j];
                let t = field.mul(row[j], v[base + j + half]);
                v[base + j] = field.add(u, t);
                v[base + j + half] = field.sub(u, t);
            }
            base += m;
        }
    }
}

/// In-place bit-reversal permutation of a power-of-two-length slice.
fn bit_reverse_permute(v: &mut [u64]) {
    let n = v.len();
    if n <= 2 {
        return;
    }
    let mut j = 0usize;
    for i in 1..n - 1 {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j &= !bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            v.swap(i, j);
        }
    }
}
