//! Evaluation maps: where a codeword's points live.
//!
//! A code is defined relative to an ordered set of evaluation points
//! `x_1 ... x_n`. The [`EvaluationMap`] capability bundles everything the
//! codec needs to know about that set: the field, the points themselves, a
//! batch evaluation routine, and the locator polynomial `prod (x - x_i)`
//! that vanishes on the whole set.
//!
//! Two implementations are provided. [`SlowEvaluator`] uses the points
//! `1, 2, ..., n` and Horner evaluation, and works for any `n`.
//! [`NttEvaluator`] uses the `n`-th roots of unity, so batch evaluation is a
//! single forward transform; `n` must then be a power of two dividing
//! `p - 1`.
//!
//! Point sequences are cached per `n` under a mutex; on a miss the sequence
//! is computed without the lock and the first writer wins, so concurrent
//! first users converge on one stored copy.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::poly::{Domain, Polynomial};
use crate::ring::DensePolyRing;

/// The point set a code evaluates on, with its batch-evaluation and locator
/// routines.
pub trait EvaluationMap: Send + Sync {
    /// The field the points live in.
    fn prime_field(&self) -> &PrimeField;

    /// The first `n` evaluation points, in the order evaluations are
    /// produced. Cached per `n`.
    fn evaluation_points(&self, n: usize) -> Result<Arc<Vec<u64>>>;

    /// Evaluates `p` at the first `len(p)` evaluation points; callers pad
    /// the coefficient vector to the block length first. May transform `p`
    /// in place.
    fn evaluate_polynomial(&self, p: &mut Polynomial) -> Result<Vec<u64>>;

    /// The locator polynomial `(x - x_1) * ... * (x - x_n)` of the point
    /// set (up to a unit).
    fn locator_polynomial(&self, n: usize) -> Result<Polynomial>;

    /// Whether decoding may take the transform-based fast path.
    fn is_ntt(&self) -> bool;
}

/// Per-length cache of evaluation-point sequences.
#[derive(Debug, Default)]
struct PointCache {
    points: Mutex<HashMap<usize, Arc<Vec<u64>>>>,
}

impl PointCache {
    fn load(&self, n: usize) -> Option<Arc<Vec<u64>>> {
        self.points
            .lock()
            .expect("point cache poisoned")
            .get(&n)
            .cloned()
    }

    /// Inserts `points` unless a racing caller beat us to it; either way the
    /// stored sequence is returned.
    fn store(&self, n: usize, points: Vec<u64>) -> Arc<Vec<u64>> {
        let mut guard = self.points.lock().expect("point cache poisoned");
        Arc::clone(guard.entry(n).or_insert_with(|| Arc::new(points)))
    }
}

/// Evaluation at the points `1, 2, ..., n` by Horner's rule.
///
/// Quadratic in the block length but free of any constraint on `n` (beyond
/// staying below the modulus, or points would repeat).
#[derive(Debug)]
pub struct SlowEvaluator {
    ring: DensePolyRing,
    cache: PointCache,
}

impl SlowEvaluator {
    /// A slow evaluator over `field`.
    #[must_use]
    pub fn new(field: PrimeField) -> Self {
        Self {
            ring: DensePolyRing::new(field),
            cache: PointCache::default(),
        }
    }
}

impl EvaluationMap for SlowEvaluator {
    fn prime_field(&self) -> &PrimeField {
        self.ring.field()
    }

    fn evaluation_points(&self, n: usize) -> Result<Arc<Vec<u64>>> {
        if let Some(points) = self.cache.load(n) {
            return Ok(points);
        }
        let points: Vec<u64> = (1..=n as u64).collect();
        Ok(self.cache.store(n, points))
    }

    fn evaluate_polynomial(&self, p: &mut Polynomial) -> Result<Vec<u64>> {
        if p.domain() == Domain::Ntt {
            return Err(Error::NotInCoefficientForm);
        }
        let points = self.evaluation_points(p.len())?;
        points
            .iter()
            .map(|&x| self.ring.evaluate(p, x))
            .collect()
    }

    fn locator_polynomial(&self, n: usize) -> Result<Polynomial> {
        let points = self.evaluation_points(n)?;
        Ok(self.ring.monic_from_roots(&points))
    }

    fn is_ntt(&self) -> bool {
        false
    }
}

/// Evaluation at the `n`-th roots of unity through the forward transform.
///
/// The point order is the transform's output order, captured once by
/// transforming `p(x) = x` and cached. Requires `n` to be a power of two
/// dividing `p - 1`.
#[derive(Debug)]
pub struct NttEvaluator {
    ring: DensePolyRing,
    cache: PointCache,
}

impl NttEvaluator {
    /// An NTT evaluator over `field`.
    #[must_use]
    pub fn new(field: PrimeField) -> Self {
        Self {
            ring: DensePolyRing::new(field),
            cache: PointCache::default(),
        }
    }
}

impl EvaluationMap for NttEvaluator {
    fn prime_field(&self) -> &PrimeField {
        self.ring.field()
    }

    fn evaluation_points(&self, n: usize) -> Result<Arc<Vec<u64>>> {
        if let Some(points) = self.cache.load(n) {
            return Ok(points);
        }

        let points = if n < 2 {
            // Degenerate sets: the single first root of unity, or nothing.
            vec![1; n]
        } else {
            // The transform of p(x) = x lists every point in the order the
            // forward NTT emits evaluations.
            let mut inner = vec![0u64; n];
            inner[1] = 1;
            let mut p =
                Polynomial::from_raw(inner, Domain::Coefficient, self.ring.field().modulus());
            self.ring.ntt_forward(&mut p)?;
            p.into_coeffs()
        };

        Ok(self.cache.store(n, points))
    }

    fn evaluate_polynomial(&self, p: &mut Polynomial) -> Result<Vec<u64>> {
        self.ring.ntt_forward(p)?;
        Ok(p.to_vec())
    }

    fn locator_polynomial(&self, n: usize) -> Result<Polynomial> {
        // The locator vanishing on all n-th roots of unity is x^n - 1; the
        // unit multiple 1 - x^n is kept so the constant term stays 1.
        let f = self.ring.field();
        let mut inner = vec![0u64; n + 1];
        inner[0] = 1;
        inner[n] = f.neg(1);
        Ok(Polynomial::from_raw(inner, Domain::Coefficient, f.modulus()))
    }

    fn is_ntt(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(p: u64) -> PrimeField {
        PrimeField::new(p).unwrap()
    }

    #[test]
    fn slow_points_are_consecutive_integers() {
        let e = SlowEvaluator::new(field(157));
        let points = e.evaluation_points(16).unwrap();
        assert_eq!(points.as_slice(), &(1..=16u64).collect::<Vec<_>>()[..]);
    }

    #[test]
    fn slow_point_sequences_are_cached() {
        let e = SlowEvaluator::new(field(157));
        let a = e.evaluation_points(16).unwrap();
        let b = e.evaluation_points(16).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        let c = e.evaluation_points(8).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn slow_evaluation_matches_horner() {
        let f = field(157);
        let ring = DensePolyRing::new(f.clone());
        let e = SlowEvaluator::new(f.clone());
        let mut p = Polynomial::new(&f, vec![3, 1, 4, 1, 5, 0, 0, 0], Domain::Coefficient).unwrap();
        let ys = e.evaluate_polynomial(&mut p).unwrap();
        assert_eq!(ys.len(), 8);
        for (i, &y) in ys.iter().enumerate() {
            assert_eq!(y, ring.evaluate(&p, i as u64 + 1).unwrap());
        }
    }

    #[test]
    fn slow_evaluation_rejects_ntt_input() {
        let f = field(157);
        let e = SlowEvaluator::new(f.clone());
        let mut p = Polynomial::new(&f, vec![1, 2, 3, 4], Domain::Ntt).unwrap();
        assert_eq!(
            e.evaluate_polynomial(&mut p),
            Err(Error::NotInCoefficientForm)
        );
    }

    #[test]
    fn slow_locator_vanishes_on_all_points() {
        let f = field(157);
        let ring = DensePolyRing::new(f.clone());
        let e = SlowEvaluator::new(f);
        let locator = e.locator_polynomial(16).unwrap();
        assert_eq!(locator.degree(), Some(16));
        for x in 1..=16u64 {
            assert_eq!(ring.evaluate(&locator, x).unwrap(), 0);
        }
    }

    #[test]
    fn ntt_points_are_distinct_roots_of_unity() {
        let f = field(65537);
        let e = NttEvaluator::new(f.clone());
        let n = 16usize;
        let points = e.evaluation_points(n).unwrap();
        assert_eq!(points.len(), n);

        let mut seen = std::collections::HashSet::new();
        for &x in points.iter() {
            assert_eq!(f.pow(x, n as u64), 1, "every point is an n-th root");
            seen.insert(x);
        }
        assert_eq!(seen.len(), n, "points are pairwise distinct");
    }

    #[test]
    fn ntt_evaluation_agrees_with_horner() {
        let f = field(65537);
        let ring = DensePolyRing::new(f.clone());
        let e = NttEvaluator::new(f.clone());
        let n = 16usize;

        let coeffs: Vec<u64> = (1..=n as u64).collect();
        let reference = Polynomial::new(&f, coeffs.clone(), Domain::Coefficient).unwrap();
        let mut p = Polynomial::new(&f, coeffs, Domain::Coefficient).unwrap();

        let ys = e.evaluate_polynomial(&mut p).unwrap();
        let points = e.evaluation_points(n).unwrap();
        for (&x, &y) in points.iter().zip(&ys) {
            assert_eq!(ring.evaluate(&reference, x).unwrap(), y);
        }
    }

    #[test]
    fn ntt_locator_vanishes_on_all_points() {
        let f = field(65537);
        let ring = DensePolyRing::new(f.clone());
        let e = NttEvaluator::new(f);
        let n = 16usize;
        let locator = e.locator_polynomial(n).unwrap();
        assert_eq!(locator.degree(), Some(n));
        let points = e.evaluation_points(n).unwrap();
        for &x in points.iter() {
            assert_eq!(ring.evaluate(&locator, x).unwrap(), 0);
        }
    }

    #[test]
    fn ntt_points_require_a_friendly_length() {
        let e = NttEvaluator::new(field(157));
        // 157 - 1 = 156 is not divisible by 8.
        assert_eq!(e.evaluation_points(8), Err(Error::NotDivisible));
    }

    #[test]
    fn degenerate_single_point_set() {
        let e = NttEvaluator::new(field(65537));
        let points = e.evaluation_points(1).unwrap();
        assert_eq!(points.as_slice(), &[1]);
    }
}
