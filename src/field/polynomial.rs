//! Polynomial utilities operating over the prime field.
//! The module provides deterministic evaluation and coset interpolation for
//! trace and composition polynomials.

use super::prime_field::PrimeField;

/// Dense polynomial represented by coefficients in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<F> {
    /// Coefficients starting from the constant term.
    pub coefficients: Vec<F>,
}

impl<F: PrimeField> Polynomial<F> {
    /// Constructs a polynomial from raw coefficients.
    pub fn new(coefficients: Vec<F>) -> Self {
        Self { coefficients }
    }

    /// Evaluates the polynomial at the provided point using Horner's method.
    pub fn evaluate(&self, point: F) -> F {
        let mut result = F::ZERO;
        for coeff in self.coefficients.iter().rev() {
            result = result.mul(&point).add(coeff);
        }
        result
    }

    /// Returns the degree of the polynomial or `None` if the polynomial is zero.
    pub fn degree(&self) -> Option<usize> {
        for (idx, coeff) in self.coefficients.iter().enumerate().rev() {
            if !coeff.is_zero() {
                return Some(idx);
            }
        }
        None
    }

    /// Interpolates the unique polynomial of degree `< values.len()` that takes
    /// `values[j]` at `shift * root^j`.
    ///
    /// `root` must be a primitive root of unity of order `values.len()`.
    /// Returns `None` when the shift or the domain size are not invertible.
    pub fn interpolate_coset(values: &[F], shift: F, root: F) -> Option<Self> {
        let size = values.len();
        let size_inv = F::from(size as u64).inv()?;
        let root_inv = root.inv()?;
        let shift_inv = shift.inv()?;

        let mut coefficients = Vec::with_capacity(size);
        let mut root_inv_k = F::ONE;
        let mut shift_inv_k = F::ONE;
        for _ in 0..size {
            // Inverse DFT row k: sum_j values[j] * root^(-jk).
            let mut acc = F::ZERO;
            let mut twiddle = F::ONE;
            for value in values {
                acc = acc.add(&value.mul(&twiddle));
                twiddle = twiddle.mul(&root_inv_k);
            }
            coefficients.push(acc.mul(&size_inv).mul(&shift_inv_k));
            root_inv_k = root_inv_k.mul(&root_inv);
            shift_inv_k = shift_inv_k.mul(&shift_inv);
        }
        Some(Self { coefficients })
    }

    /// Splits `self` into `width` polynomials `p_i` such that
    /// `self(x) = sum_i x^i * p_i(x^width)`.
    pub fn split_columns(&self, width: usize) -> Vec<Self> {
        let width = width.max(1);
        let mut columns = vec![Vec::new(); width];
        for (ix, coeff) in self.coefficients.iter().enumerate() {
            columns[ix % width].push(*coeff);
        }
        columns.into_iter().map(Self::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldElementOps;

    type F97 = crate::field::Fp<97, 5>;

    fn poly(values: &[u64]) -> Polynomial<F97> {
        Polynomial::new(values.iter().copied().map(F97::new).collect())
    }

    #[test]
    fn horner_evaluation_matches_direct_sum() {
        let p = poly(&[3, 0, 2]);
        assert_eq!(p.evaluate(F97::new(5)), F97::new(53));
        assert_eq!(p.degree(), Some(2));
        assert_eq!(poly(&[0, 0]).degree(), None);
    }

    #[test]
    fn coset_interpolation_recovers_coefficients() {
        let p = poly(&[4, 9, 1, 60]);
        let root = F97::root_of_unity(4).unwrap();
        let shift = F97::GENERATOR;
        let mut values = Vec::new();
        let mut point = shift;
        for _ in 0..4 {
            values.push(p.evaluate(point));
            point = point.mul(&root);
        }
        let recovered = Polynomial::interpolate_coset(&values, shift, root).unwrap();
        assert_eq!(recovered, p);
    }

    #[test]
    fn column_split_recombines_at_any_point() {
        let p = poly(&[1, 2, 3, 4, 5, 6, 7]);
        let columns = p.split_columns(3);
        assert_eq!(columns.len(), 3);
        let z = F97::new(11);
        let z_cubed = z.pow(3);
        let mut recombined = F97::ZERO;
        let mut z_pow = F97::ONE;
        for column in &columns {
            recombined = recombined.add(&z_pow.mul(&column.evaluate(z_cubed)));
            z_pow = z_pow.mul(&z);
        }
        assert_eq!(recombined, p.evaluate(z));
    }
}
