//! Dense polynomials over a prime field.
//!
//! A polynomial is a coefficient vector (constant term first) plus a domain
//! tag: either plain coefficients or the evaluation form produced by the
//! forward transform. The tag gates which ring operations apply; degree, for
//! instance, is meaningless for the evaluation form.
//!
//! The value also records the modulus it was reduced under so the ring can
//! refuse to mix operands from different fields.

use core::fmt;

use crate::error::{Error, Result};
use crate::field::PrimeField;

/// Representation domain of a [`Polynomial`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// `coeffs[i]` is the coefficient of `x^i`.
    Coefficient,
    /// `coeffs` holds evaluations in the transform's output order. The
    /// length is a power of two and trailing zeros are never trimmed.
    Ntt,
}

/// Dense polynomial with reduced `u64` coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<u64>,
    domain: Domain,
    modulus: u64,
}

impl Polynomial {
    /// Builds a polynomial from `coeffs`, reducing every entry into the
    /// field. An empty coefficient vector is rejected with
    /// [`Error::BadLength`].
    pub fn new(field: &PrimeField, mut coeffs: Vec<u64>, domain: Domain) -> Result<Self> {
        if coeffs.is_empty() {
            return Err(Error::BadLength);
        }
        for c in &mut coeffs {
            *c = field.reduce(*c);
        }
        Ok(Self {
            coeffs,
            domain,
            modulus: field.modulus(),
        })
    }

    /// The constant polynomial `value`.
    #[must_use]
    pub fn constant(field: &PrimeField, value: u64) -> Self {
        Self {
            coeffs: vec![field.reduce(value)],
            domain: Domain::Coefficient,
            modulus: field.modulus(),
        }
    }

    /// The zero polynomial.
    #[must_use]
    pub fn zero(field: &PrimeField) -> Self {
        Self::constant(field, 0)
    }

    /// Wraps already-reduced coefficients without re-reducing them.
    pub(crate) fn from_raw(coeffs: Vec<u64>, domain: Domain, modulus: u64) -> Self {
        debug_assert!(coeffs.iter().all(|&c| c < modulus));
        Self {
            coeffs,
            domain,
            modulus,
        }
    }

    /// Current representation domain.
    #[inline]
    #[must_use]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub(crate) fn set_domain(&mut self, domain: Domain) {
        self.domain = domain;
    }

    /// The modulus the coefficients are reduced under.
    #[inline]
    #[must_use]
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Number of stored coefficients, trailing zeros included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Whether no coefficients are stored. An empty vector is one of the two
    /// accepted encodings of the zero polynomial (the other being `[0]`).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Borrowed view of the coefficients.
    #[inline]
    #[must_use]
    pub fn coeffs(&self) -> &[u64] {
        &self.coeffs
    }

    pub(crate) fn coeffs_mut(&mut self) -> &mut Vec<u64> {
        &mut self.coeffs
    }

    pub(crate) fn into_coeffs(self) -> Vec<u64> {
        self.coeffs
    }

    /// Defensive copy of the coefficients.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u64> {
        self.coeffs.clone()
    }

    /// True when every stored coefficient is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0)
    }

    /// Index of the highest non-zero coefficient, `None` for the zero
    /// polynomial.
    ///
    /// Defined only in the coefficient domain; asking for the degree of an
    /// evaluation vector is a bug in the caller.
    #[must_use]
    pub fn degree(&self) -> Option<usize> {
        debug_assert!(
            self.domain == Domain::Coefficient,
            "degree is undefined in the NTT domain"
        );
        self.coeffs.iter().rposition(|&c| c != 0)
    }

    /// Coefficient of the highest power, 0 for the zero polynomial.
    #[must_use]
    pub fn leading_coeff(&self) -> u64 {
        self.degree().map_or(0, |d| self.coeffs[d])
    }

    /// Drops trailing zero coefficients. A no-op in the NTT domain, where
    /// the vector length is structural.
    pub fn trim(&mut self) {
        if self.domain == Domain::Ntt {
            return;
        }
        let len = self.coeffs.iter().rposition(|&c| c != 0).map_or(0, |d| d + 1);
        self.coeffs.truncate(len);
    }

    /// Structural equality: same field and domain, and the same element.
    ///
    /// Coefficient-domain comparison ignores trailing zeros; NTT-domain
    /// comparison requires identical lengths.
    #[must_use]
    pub fn equals(&self, other: &Polynomial) -> bool {
        if self.modulus != other.modulus || self.domain != other.domain {
            return false;
        }
        match self.domain {
            Domain::Ntt => self.coeffs == other.coeffs,
            Domain::Coefficient => {
                let a = effective(&self.coeffs);
                let b = effective(&other.coeffs);
                a == b
            }
        }
    }
}

/// The slice without its trailing zeros.
fn effective(coeffs: &[u64]) -> &[u64] {
    let len = coeffs.iter().rposition(|&c| c != 0).map_or(0, |d| d + 1);
    &coeffs[..len]
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.domain == Domain::Ntt {
            return write!(f, "ntt{:?}", self.coeffs);
        }
        let slice = effective(&self.coeffs);
        if slice.is_empty() {
            return write!(f, "0");
        }
        let mut first = true;
        for (i, &c) in slice.iter().enumerate().rev() {
            if c == 0 {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            match i {
                0 => write!(f, "{c}")?,
                1 => write!(f, "{c}*x")?,
                _ => write!(f, "{c}*x^{i}")?,
            }
        }
        Ok(())
    }
}
