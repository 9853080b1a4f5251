//! Arithmetic on dense polynomials: the schoolbook ring.
//!
//! [`DensePolyRing`] owns the field and the twiddle-factor cache used by the
//! transform engine (see [`crate::ring::DensePolyRing::ntt_forward`]). The
//! operations here are the classical ones: Horner evaluation, coefficient-wise
//! add/sub, schoolbook convolution, long division with remainder (Algorithm
//! 2.5 in von zur Gathen & Gerhard, *Modern Computer Algebra*), and the
//! partial extended Euclidean algorithm that drives Gao decoding.
//!
//! Binary operations allocate their result; the borrow checker rules out the
//! aliased-output mistakes an in-place API would invite, and the Euclidean
//! loop reuses its rotating locals instead.
//!
//! Mixing operands from different fields or domains is a caller bug and
//! panics; errors that user input can trigger come back as `Result`s.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{Error, Result};
use crate::fast::NTT_MUL_THRESHOLD;
use crate::field::PrimeField;
use crate::ntt::TwiddleTable;
use crate::poly::{Domain, Polynomial};

/// Polynomial ring over a [`PrimeField`] with cached transform tables.
#[derive(Debug)]
pub struct DensePolyRing {
    field: PrimeField,
    pub(crate) twiddles: RwLock<HashMap<usize, Arc<TwiddleTable>>>,
}

impl DensePolyRing {
    /// A ring over `field` with an empty twiddle cache.
    #[must_use]
    pub fn new(field: PrimeField) -> Self {
        Self {
            field,
            twiddles: RwLock::new(HashMap::new()),
        }
    }

    /// The coefficient field.
    #[inline]
    #[must_use]
    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    fn check_operands(&self, a: &Polynomial, b: &Polynomial) {
        assert_eq!(a.modulus(), self.field.modulus(), "operand field mismatch");
        assert_eq!(b.modulus(), self.field.modulus(), "operand field mismatch");
        assert_eq!(a.domain(), b.domain(), "operand domain mismatch");
        if a.domain() == Domain::Ntt {
            assert_eq!(a.len(), b.len(), "NTT operands must share a length");
        }
    }

    /// Horner evaluation of `a` at `x`.
    ///
    /// Fails with [`Error::NotInCoefficientForm`] for an NTT-domain operand.
    pub fn evaluate(&self, a: &Polynomial, x: u64) -> Result<u64> {
        if a.domain() == Domain::Ntt {
            return Err(Error::NotInCoefficientForm);
        }
        let f = &self.field;
        let x = f.reduce(x);
        let mut acc = 0u64;
        for &c in a.coeffs().iter().rev() {
            acc = f.add(c, f.mul(x, acc));
        }
        Ok(acc)
    }

    /// `a * scalar`, preserving the operand's domain.
    #[must_use]
    pub fn mul_scalar(&self, a: &Polynomial, scalar: u64) -> Polynomial {
        assert_eq!(a.modulus(), self.field.modulus(), "operand field mismatch");
        let f = &self.field;
        let s = f.reduce(scalar);
        let coeffs = a.coeffs().iter().map(|&c| f.mul(c, s)).collect();
        let mut out = Polynomial::from_raw(coeffs, a.domain(), f.modulus());
        out.trim();
        out
    }

    /// `a + b`, zero-padded to the longer operand in the coefficient domain.
    #[must_use]
    pub fn add(&self, a: &Polynomial, b: &Polynomial) -> Polynomial {
        self.add_sub(a, b, false)
    }

    /// `a - b`, zero-padded to the longer operand in the coefficient domain.
    #[must_use]
    pub fn sub(&self, a: &Polynomial, b: &Polynomial) -> Polynomial {
        self.add_sub(a, b, true)
    }

    fn add_sub(&self, a: &Polynomial, b: &Polynomial, subtract: bool) -> Polynomial {
        self.check_operands(a, b);
        let f = &self.field;
        let n = a.len().max(b.len());
        let mut coeffs = Vec::with_capacity(n);
        for i in 0..n {
            let av = a.coeffs().get(i).copied().unwrap_or(0);
            let bv = b.coeffs().get(i).copied().unwrap_or(0);
            coeffs.push(if subtract { f.sub(av, bv) } else { f.add(av, bv) });
        }
        let mut out = Polynomial::from_raw(coeffs, a.domain(), f.modulus());
        out.trim();
        out
    }

    /// `a * b`.
    ///
    /// In the NTT domain this is the pointwise product of two equal-length
    /// evaluation vectors; in the coefficient domain it is the schoolbook
    /// convolution (skipping zero coefficients of `a`), trimmed.
    #[must_use]
    pub fn mul(&self, a: &Polynomial, b: &Polynomial) -> Polynomial {
        self.check_operands(a, b);
        let f = &self.field;

        if a.domain() == Domain::Ntt {
            let coeffs = a
                .coeffs()
                .iter()
                .zip(b.coeffs())
                .map(|(&x, &y)| f.mul(x, y))
                .collect();
            return Polynomial::from_raw(coeffs, Domain::Ntt, f.modulus());
        }

        if a.is_empty() || b.is_empty() {
            return Polynomial::from_raw(Vec::new(), Domain::Coefficient, f.modulus());
        }

        let mut out = vec![0u64; a.len() + b.len() - 1];
        for (i, &ai) in a.coeffs().iter().enumerate() {
            if ai == 0 {
                continue;
            }
            for (j, &bj) in b.coeffs().iter().enumerate() {
                out[i + j] = f.add(out[i + j], f.mul(ai, bj));
            }
        }
        let mut prod = Polynomial::from_raw(out, Domain::Coefficient, f.modulus());
        prod.trim();
        prod
    }

    /// Quotient and remainder with `a = q*b + r` and `deg r < deg b`.
    ///
    /// Classical long division; the remainder buffer is updated in place by
    /// subtracting the scaled, shifted divisor, which zeroes one leading
    /// position per step. Fails with [`Error::ZeroInverse`] when `b` is the
    /// zero polynomial and [`Error::NotInCoefficientForm`] for NTT operands.
    pub fn long_div(&self, a: &Polynomial, b: &Polynomial) -> Result<(Polynomial, Polynomial)> {
        if a.domain() == Domain::Ntt || b.domain() == Domain::Ntt {
            return Err(Error::NotInCoefficientForm);
        }
        self.check_operands(a, b);
        let f = &self.field;

        let m = b.degree().ok_or(Error::ZeroInverse)?;
        let Some(n) = a.degree() else {
            return Ok((Polynomial::zero(f), Polynomial::zero(f)));
        };
        if n < m {
            let mut r = a.clone();
            r.trim();
            return Ok((Polynomial::zero(f), r));
        }

        let u = f.inverse(b.leading_coeff())?;
        let bc = &b.coeffs()[..=m];
        let mut rem: Vec<u64> = a.coeffs()[..=n].to_vec();
        let mut q = vec![0u64; n - m + 1];

        for i in (0..=n - m).rev() {
            let lead = rem[m + i];
            if lead == 0 {
                continue;
            }
            let qi = f.mul(lead, u);
            q[i] = qi;
            for (j, &bj) in bc.iter().enumerate() {
                if bj != 0 {
                    rem[i + j] = f.sub(rem[i + j], f.mul(qi, bj));
                }
            }
        }

        rem.truncate(m);
        let mut rem = Polynomial::from_raw(rem, Domain::Coefficient, f.modulus());
        rem.trim();
        let q = Polynomial::from_raw(q, Domain::Coefficient, f.modulus());
        Ok((q, rem))
    }

    /// Extended Euclidean algorithm stopped early: returns `(g, x, y)` with
    /// `a*x + b*y = g`, where `g` is the first remainder whose degree drops
    /// below `stop_degree`.
    ///
    /// Stopping at degree `(n + k) / 2` is what turns the gcd computation
    /// into a decoder: the remainder at that point is the product of the
    /// message polynomial and the error locator. Inputs are not mutated.
    pub fn partial_extended_euclidean(
        &self,
        a: &Polynomial,
        b: &Polynomial,
        stop_degree: usize,
    ) -> Result<(Polynomial, Polynomial, Polynomial)> {
        if a.domain() == Domain::Ntt || b.domain() == Domain::Ntt {
            return Err(Error::NotInCoefficientForm);
        }
        self.partial_eea(a, b, stop_degree, false)
    }

    /// Shared Euclidean loop. With `accelerated` set, division and cofactor
    /// products switch to the transform-based routines once operands are
    /// large enough to pay for them.
    pub(crate) fn partial_eea(
        &self,
        a: &Polynomial,
        b: &Polynomial,
        stop_degree: usize,
        accelerated: bool,
    ) -> Result<(Polynomial, Polynomial, Polynomial)> {
        let f = &self.field;

        let mut big_a = a.clone();
        big_a.trim();
        let mut big_b = b.clone();
        big_b.trim();

        // Loop invariants: big_a = x0*a + y0*b and big_b = x1*a + y1*b.
        let mut x0 = Polynomial::constant(f, 1);
        let mut x1 = Polynomial::zero(f);
        let mut y0 = Polynomial::zero(f);
        let mut y1 = Polynomial::constant(f, 1);

        while big_a.degree().is_some_and(|d| d >= stop_degree) {
            if big_b.is_zero() {
                break;
            }

            let (q, r) = if accelerated && big_a.len() + big_b.len() >= NTT_MUL_THRESHOLD {
                self.long_div_ntt(&big_a, &big_b)?
            } else {
                self.long_div(&big_a, &big_b)?
            };
            // gcd(A, B) = gcd(B, r)
            big_a = std::mem::replace(&mut big_b, r);

            // (x0, x1) <- (x1, x0 - q*x1), and the same for y.
            let next = self.sub(&x0, &self.mul_full(&q, &x1, accelerated)?);
            x0 = std::mem::replace(&mut x1, next);
            let next = self.sub(&y0, &self.mul_full(&q, &y1, accelerated)?);
            y0 = std::mem::replace(&mut y1, next);
        }

        Ok((big_a, x0, y0))
    }

    /// Product of a list of polynomials, folded into an accumulator.
    #[must_use]
    pub fn poly_product(&self, polys: &[Polynomial]) -> Polynomial {
        let mut acc = Polynomial::constant(&self.field, 1);
        for p in polys {
            acc = self.mul(&acc, p);
        }
        acc
    }

    /// The monic polynomial `(x - roots[0]) * ... * (x - roots[n-1])`.
    ///
    /// Built incrementally in O(n^2): appending a root `r` maps the current
    /// coefficients through `new[j+1] += old[j]`, `new[j] = old[j] * (-r)`.
    #[must_use]
    pub fn monic_from_roots(&self, roots: &[u64]) -> Polynomial {
        let f = &self.field;
        let n = roots.len();
        let mut coeffs = vec![0u64; n + 1];
        coeffs[0] = 1;

        let mut deg = 0;
        for &root in roots {
            let neg = f.neg(f.reduce(root));
            coeffs[deg + 1] = 0;
            for j in (0..=deg).rev() {
                coeffs[j + 1] = f.add(coeffs[j + 1], coeffs[j]);
                coeffs[j] = f.mul(coeffs[j], neg);
            }
            deg += 1;
        }

        coeffs.truncate(deg + 1);
        Polynomial::from_raw(coeffs, Domain::Coefficient, f.modulus())
    }
}
