//! Transform-accelerated polynomial division and Euclidean steps.
//!
//! Long division by way of reversed polynomials (von zur Gathen & Gerhard,
//! *Modern Computer Algebra*, section 9.1): reverse both operands, invert the
//! reversed divisor as a power series with Newton iteration, multiply to get
//! the reversed quotient, un-reverse, and recover the remainder from
//! `r = a - q*b`. Every multiplication runs through the NTT, so the whole
//! division costs O(n log n) instead of O(n^2).

use crate::error::{Error, Result};
use crate::poly::{Domain, Polynomial};
use crate::ring::DensePolyRing;

/// Combined coefficient count at which transform-based multiplication
/// overtakes the schoolbook loop.
pub(crate) const NTT_MUL_THRESHOLD: usize = 256;

impl DensePolyRing {
    /// First `l` coefficients of `x^deg(f) * f(1/x)`, using the true degree
    /// of `f` (trailing zeros ignored).
    fn reversed_top(&self, fpoly: &Polynomial, l: usize) -> Polynomial {
        let modulus = self.field().modulus();
        let mut out = vec![0u64; l];
        if let Some(deg) = fpoly.degree() {
            let coeffs = fpoly.coeffs();
            for (i, slot) in out.iter_mut().enumerate().take(deg + 1) {
                *slot = coeffs[deg - i];
            }
        }
        Polynomial::from_raw(out, Domain::Coefficient, modulus)
    }

    /// `a * b mod x^l` through the transform.
    ///
    /// Both inputs are clamped to `l` coefficients, padded to the next power
    /// of two that holds the product, multiplied pointwise in the NTT
    /// domain, and the un-trimmed backward transform is sliced to a
    /// deterministic `min(l, |a|+|b|-1)` terms.
    pub fn mul_trunc(&self, a: &Polynomial, b: &Polynomial, l: usize) -> Result<Polynomial> {
        let modulus = self.field().modulus();
        let la = a.len().min(l);
        let lb = b.len().min(l);
        if l == 0 || la == 0 || lb == 0 {
            return Ok(Polynomial::from_raw(Vec::new(), Domain::Coefficient, modulus));
        }

        let total = la + lb - 1;
        let conv_len = l.min(total);
        let n = total.next_power_of_two();

        let mut abuf = vec![0u64; n];
        abuf[..la].copy_from_slice(&a.coeffs()[..la]);
        let mut apoly = Polynomial::from_raw(abuf, Domain::Coefficient, modulus);

        let mut bbuf = vec![0u64; n];
        bbuf[..lb].copy_from_slice(&b.coeffs()[..lb]);
        let mut bpoly = Polynomial::from_raw(bbuf, Domain::Coefficient, modulus);

        self.ntt_forward(&mut apoly)?;
        self.ntt_forward(&mut bpoly)?;

        let field = self.field();
        for (x, &y) in apoly.coeffs_mut().iter_mut().zip(bpoly.coeffs()) {
            *x = field.mul(*x, y);
        }

        self.ntt_backward_no_trim(&mut apoly)?;
        let mut out = apoly.into_coeffs();
        out.truncate(conv_len);
        Ok(Polynomial::from_raw(out, Domain::Coefficient, modulus))
    }

    /// Power-series inverse: `t` with `b * t = 1 mod x^k`.
    ///
    /// Newton iteration doubling the precision each round:
    /// `t <- t * (2 - b*t) mod x^m`. Requires an invertible constant term;
    /// fails with [`Error::ZeroInverse`] otherwise.
    pub fn series_inverse(&self, b: &Polynomial, k: usize) -> Result<Polynomial> {
        let field = self.field();
        let modulus = field.modulus();
        if k == 0 {
            return Ok(Polynomial::from_raw(Vec::new(), Domain::Coefficient, modulus));
        }
        let b0 = b.coeffs().first().copied().unwrap_or(0);
        if b0 == 0 {
            return Err(Error::ZeroInverse);
        }

        let mut t = Polynomial::from_raw(
            vec![field.inverse(b0)?],
            Domain::Coefficient,
            modulus,
        );
        let two = field.reduce(2);

        let mut precision = 1usize;
        while precision < k {
            let m = (precision * 2).min(k);

            // tmp = 2 - b*t (mod x^m)
            let mut tmp = self.mul_trunc(b, &t, m)?;
            let coeffs = tmp.coeffs_mut();
            coeffs.resize(m, 0);
            coeffs[0] = field.sub(two, coeffs[0]);
            for c in coeffs[1..].iter_mut() {
                *c = field.neg(*c);
            }

            t = self.mul_trunc(&t, &tmp, m)?;
            precision = m;
        }
        Ok(t)
    }

    /// Quotient and remainder through reversed polynomials and a Newton
    /// series inverse; same contract as [`DensePolyRing::long_div`].
    pub fn long_div_ntt(&self, a: &Polynomial, b: &Polynomial) -> Result<(Polynomial, Polynomial)> {
        if a.domain() == Domain::Ntt || b.domain() == Domain::Ntt {
            return Err(Error::NotInCoefficientForm);
        }
        let field = self.field();

        let m = b.degree().ok_or(Error::ZeroInverse)?;
        let Some(n) = a.degree() else {
            return Ok((Polynomial::zero(field), Polynomial::zero(field)));
        };
        if n < m {
            let mut r = a.clone();
            r.trim();
            return Ok((Polynomial::zero(field), r));
        }

        let k = n - m + 1;
        let a_rev = self.reversed_top(a, k);
        let b_rev = self.reversed_top(b, m + 1);

        let t = self.series_inverse(&b_rev, k)?;
        let q_rev = self.mul_trunc(&a_rev, &t, k)?;

        // Un-reverse at fixed length k. The true quotient has degree exactly
        // k - 1, so q[i] = q_rev[k-1-i]; reversing at q_rev's own degree
        // would mis-shift any quotient that is divisible by x.
        let src = q_rev.coeffs();
        let mut q = vec![0u64; k];
        for (i, slot) in q.iter_mut().enumerate() {
            let from = k - 1 - i;
            if from < src.len() {
                *slot = src[from];
            }
        }
        let q = Polynomial::from_raw(q, Domain::Coefficient, field.modulus());

        let prod = self.mul_trunc(&q, b, n + 1)?;
        let rem = self.sub(a, &prod);
        Ok((q, rem))
    }

    /// Euclidean loop with the same contract as
    /// [`DensePolyRing::partial_extended_euclidean`], switching division and
    /// cofactor products to the transform-based routines once operands grow
    /// past [`NTT_MUL_THRESHOLD`] combined coefficients.
    pub fn ntt_partial_extended_euclidean(
        &self,
        a: &Polynomial,
        b: &Polynomial,
        stop_degree: usize,
    ) -> Result<(Polynomial, Polynomial, Polynomial)> {
        if a.domain() == Domain::Ntt || b.domain() == Domain::Ntt {
            return Err(Error::NotInCoefficientForm);
        }
        self.partial_eea(a, b, stop_degree, true)
    }

    /// Full product `a * b`, routed through the transform when the result is
    /// large enough to pay for it.
    pub(crate) fn mul_full(
        &self,
        a: &Polynomial,
        b: &Polynomial,
        accelerated: bool,
    ) -> Result<Polynomial> {
        if accelerated && !a.is_empty() && !b.is_empty() {
            let total = a.len() + b.len() - 1;
            if total >= NTT_MUL_THRESHOLD {
                return self.mul_trunc(a, b, total);
            }
        }
        Ok(self.mul(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::PrimeField;
    use crate::test_util::TestRng;

    fn ring(p: u64) -> DensePolyRing {
        DensePolyRing::new(PrimeField::new(p).unwrap())
    }

    fn poly(ring: &DensePolyRing, coeffs: &[u64]) -> Polynomial {
        Polynomial::new(ring.field(), coeffs.to_vec(), Domain::Coefficient).unwrap()
    }

    fn random_poly(ring: &DensePolyRing, rng: &mut TestRng, len: usize) -> Polynomial {
        let p = ring.field().modulus();
        let coeffs = (0..len).map(|_| rng.next_u64() % p).collect();
        Polynomial::new(ring.field(), coeffs, Domain::Coefficient).unwrap()
    }

    #[test]
    fn mul_trunc_matches_truncated_schoolbook() {
        let mut rng = TestRng::new();
        let r = ring(65537);
        for _ in 0..30 {
            let a_deg = 1 + rng.gen_usize(32);
            let a = random_poly(&r, &mut rng, a_deg);
            let b_deg = 1 + rng.gen_usize(32);
            let b = random_poly(&r, &mut rng, b_deg);
            let l = 1 + rng.gen_usize(48);

            let full = r.mul(&a, &b);
            let mut want = full.to_vec();
            want.truncate(l);
            let want =
                Polynomial::new(r.field(), want.iter().copied().chain([0]).collect(), Domain::Coefficient)
                    .unwrap();

            let got = r.mul_trunc(&a, &b, l).unwrap();
            assert!(got.equals(&want), "l={l}");
        }
    }

    #[test]
    fn series_inverse_is_inverse_mod_x_k() {
        let mut rng = TestRng::new();
        let r = ring(65537);
        for _ in 0..20 {
            let b_deg = 1 + rng.gen_usize(24);
            let b = random_poly(&r, &mut rng, b_deg);
            if b.coeffs()[0] == 0 {
                continue;
            }
            let k = 1 + rng.gen_usize(40);
            let t = r.series_inverse(&b, k).unwrap();
            let check = r.mul_trunc(&b, &t, k).unwrap();
            assert_eq!(check.coeffs().first().copied().unwrap_or(0), 1);
            for &c in check.coeffs().iter().skip(1) {
                assert_eq!(c, 0, "k={k}");
            }
        }
    }

    #[test]
    fn series_inverse_rejects_zero_constant_term() {
        let r = ring(65537);
        let b = poly(&r, &[0, 1]);
        assert!(matches!(r.series_inverse(&b, 4), Err(Error::ZeroInverse)));
    }

    #[test]
    fn division_agrees_with_classical() {
        let mut rng = TestRng::new();
        let r = ring(65537);
        for max in [16usize, 64, 256, 1024] {
            let a = random_poly(&r, &mut rng, max);
            let b = random_poly(&r, &mut rng, max / 2);
            if b.is_zero() {
                continue;
            }
            let (q1, r1) = r.long_div(&a, &b).unwrap();
            let (q2, r2) = r.long_div_ntt(&a, &b).unwrap();
            assert!(q1.equals(&q2), "max={max}");
            assert!(r1.equals(&r2), "max={max}");
        }
    }

    #[test]
    fn division_handles_quotients_divisible_by_x() {
        let r = ring(65537);

        // x^2 / x = x rem 0
        let a = poly(&r, &[0, 0, 1]);
        let b = poly(&r, &[0, 1]);
        let (q, rem) = r.long_div_ntt(&a, &b).unwrap();
        assert_eq!(q.coeffs(), &[0, 1]);
        assert!(rem.is_zero());

        // (x^3 + x^2) / x = x^2 + x rem 0
        let a = poly(&r, &[0, 0, 1, 1]);
        let (q, rem) = r.long_div_ntt(&a, &b).unwrap();
        assert_eq!(q.coeffs(), &[0, 1, 1]);
        assert!(rem.is_zero());
    }

    #[test]
    fn division_by_higher_degree_returns_input() {
        let r = ring(65537);
        let a = poly(&r, &[1, 2]);
        let b = poly(&r, &[1, 2, 3]);
        let (q, rem) = r.long_div_ntt(&a, &b).unwrap();
        assert!(q.is_zero());
        assert!(rem.equals(&a));
    }

    #[test]
    fn division_invariant_on_random_inputs() {
        let mut rng = TestRng::new();
        let r = ring(65537);
        for _ in 0..40 {
            let a_deg = 1 + rng.gen_usize(60);
            let a = random_poly(&r, &mut rng, a_deg);
            let b_deg = 1 + rng.gen_usize(30);
            let b = random_poly(&r, &mut rng, b_deg);
            if b.is_zero() {
                continue;
            }
            let (q, rem) = r.long_div_ntt(&a, &b).unwrap();
            let back = r.add(&r.mul(&q, &b), &rem);
            assert!(back.equals(&a));
            if let Some(rd) = rem.degree() {
                assert!(rd < b.degree().unwrap());
            }
        }
    }

    #[test]
    fn accelerated_euclidean_matches_classical() {
        let mut rng = TestRng::new();
        let r = ring(65537);
        for len in [12usize, 80, 300] {
            let a = random_poly(&r, &mut rng, len);
            let b = random_poly(&r, &mut rng, len - 4);
            let stop = len / 2;
            let (g1, x1, y1) = r.partial_extended_euclidean(&a, &b, stop).unwrap();
            let (g2, x2, y2) = r.ntt_partial_extended_euclidean(&a, &b, stop).unwrap();
            assert!(g1.equals(&g2), "len={len}");
            assert!(x1.equals(&x2), "len={len}");
            assert!(y1.equals(&y2), "len={len}");
        }
    }

    #[test]
    fn accelerated_euclidean_satisfies_bezout() {
        let mut rng = TestRng::new();
        let r = ring(65537);
        let a = random_poly(&r, &mut rng, 300);
        let b = random_poly(&r, &mut rng, 290);
        let (g, x, y) = r.ntt_partial_extended_euclidean(&a, &b, 150).unwrap();
        let combo = r.add(&r.mul(&a, &x), &r.mul(&b, &y));
        assert!(combo.equals(&g));
    }
}
