//! Execution trace container and its low-degree interpolation.
//!
//! Traces are stored column-major. Each column is interpolated over the
//! multiplicative subgroup of size `num_rows`, which yields the trace
//! polynomials whose values at `z` and `g * z` form the OOD frame.

use crate::field::{Polynomial, PrimeField};

use super::traits::TransitionEvaluator;
use super::types::{AirError, Assertion, ColIx, EvaluationFrame};

/// Execution trace backed by one vector per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceTable<F> {
    columns: Vec<Vec<F>>,
    length: usize,
}

impl<F: PrimeField> TraceTable<F> {
    /// Creates a trace from a column-major matrix.
    ///
    /// Every column must have the same power-of-two length of at least two.
    pub fn from_columns(columns: Vec<Vec<F>>) -> Result<Self, AirError> {
        let first = columns.first().ok_or(AirError::SchemaMismatch {
            what: "trace column count",
            expected: 1,
            actual: 0,
        })?;
        let length = first.len();
        if length < 2 {
            return Err(AirError::SchemaMismatch {
                what: "trace row count",
                expected: 2,
                actual: length,
            });
        }
        if !length.is_power_of_two() {
            return Err(AirError::LayoutViolation(
                "trace row count must be a power of two",
            ));
        }
        if let Some(ragged) = columns.iter().find(|column| column.len() != length) {
            return Err(AirError::SchemaMismatch {
                what: "trace row count",
                expected: length,
                actual: ragged.len(),
            });
        }
        Ok(Self { columns, length })
    }

    /// Creates a trace from a row-major matrix.
    pub fn from_rows(rows: Vec<Vec<F>>) -> Result<Self, AirError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let mut columns = vec![Vec::with_capacity(rows.len()); width];
        for row in rows {
            if row.len() != width {
                return Err(AirError::SchemaMismatch {
                    what: "trace column count",
                    expected: width,
                    actual: row.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }
        Self::from_columns(columns)
    }

    /// Returns the trace width (number of columns).
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns the trace length (number of rows).
    pub fn num_rows(&self) -> usize {
        self.length
    }

    /// Returns the values of a single column.
    pub fn column(&self, column: ColIx) -> Result<&[F], AirError> {
        self.columns
            .get(column.as_usize())
            .map(Vec::as_slice)
            .ok_or(AirError::SchemaMismatch {
                what: "trace column index",
                expected: self.columns.len(),
                actual: column.as_usize(),
            })
    }

    /// Returns the values of a single row.
    pub fn row(&self, row: usize) -> Result<Vec<F>, AirError> {
        if row >= self.length {
            return Err(AirError::SchemaMismatch {
                what: "trace row index",
                expected: self.length,
                actual: row,
            });
        }
        Ok(self.columns.iter().map(|column| column[row]).collect())
    }

    /// Returns the frame formed by `row` and its successor (wrapping at the end).
    pub fn frame(&self, row: usize) -> Result<EvaluationFrame<F>, AirError> {
        let current = self.row(row)?;
        let next = self.row((row + 1) % self.length)?;
        EvaluationFrame::new(current, next)
    }

    /// Checks that every transition residue vanishes on rows `0..n-1`.
    ///
    /// The wrap-around frame from the last row back to the first is exempt,
    /// matching the transition divisor used by the verifier.
    pub fn validate_transitions<E>(&self, evaluator: &E) -> Result<(), AirError>
    where
        E: TransitionEvaluator<F> + ?Sized,
    {
        for step in 0..self.length - 1 {
            let evaluation = evaluator.evaluate_transitions(&self.frame(step)?)?;
            if let Some(column) = evaluation.residues.iter().position(|r| !r.is_zero()) {
                return Err(AirError::InvalidTransition {
                    column: ColIx::new(column),
                    step,
                });
            }
        }
        Ok(())
    }

    /// Checks every boundary assertion against the stored rows.
    pub fn check_assertions(&self, assertions: &[Assertion<F>]) -> Result<(), AirError> {
        for assertion in assertions {
            let column = self.column(assertion.column)?;
            let observed = column.get(assertion.step).ok_or(AirError::SchemaMismatch {
                what: "assertion step",
                expected: self.length,
                actual: assertion.step,
            })?;
            if *observed != assertion.value {
                return Err(AirError::BoundaryViolation {
                    column: assertion.column,
                    step: assertion.step,
                });
            }
        }
        Ok(())
    }

    /// Interpolates every column over the trace domain.
    pub fn interpolate(&self) -> Result<TracePolynomials<F>, AirError> {
        let g_trace = F::root_of_unity(self.length as u64).ok_or(AirError::DomainUnsupported {
            size: self.length as u64,
        })?;
        let polys = self
            .columns
            .iter()
            .map(|column| {
                Polynomial::interpolate_coset(column, F::ONE, g_trace).ok_or(
                    AirError::LayoutViolation("trace domain is not invertible in the field"),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TracePolynomials { polys, g_trace })
    }

    /// Evaluates the trace polynomials at `z` and `g * z`.
    pub fn ood_frame(&self, z: F) -> Result<EvaluationFrame<F>, AirError> {
        self.interpolate()?.frame_at(z)
    }
}

/// Column polynomials of a trace together with the trace-domain generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracePolynomials<F> {
    polys: Vec<Polynomial<F>>,
    g_trace: F,
}

impl<F: PrimeField> TracePolynomials<F> {
    /// Generator of the trace domain the columns were interpolated over.
    pub fn g_trace(&self) -> F {
        self.g_trace
    }

    /// Column polynomials in column order.
    pub fn columns(&self) -> &[Polynomial<F>] {
        &self.polys
    }

    /// Builds the frame `(T(x), T(g * x))` for an arbitrary point `x`.
    pub fn frame_at(&self, x: F) -> Result<EvaluationFrame<F>, AirError> {
        let shifted = x.mul(&self.g_trace);
        let current = self.polys.iter().map(|p| p.evaluate(x)).collect();
        let next = self.polys.iter().map(|p| p.evaluate(shifted)).collect();
        EvaluationFrame::new(current, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldElementOps;
    use crate::air::types::TransitionEvaluation;

    type F97 = crate::field::Fp<97, 5>;

    struct Doubling;

    impl TransitionEvaluator<F97> for Doubling {
        fn evaluate_transitions(
            &self,
            frame: &EvaluationFrame<F97>,
        ) -> Result<TransitionEvaluation<F97>, AirError> {
            let cur = frame.current()[0];
            let residue = frame.next()[0].sub(&cur.add(&cur));
            TransitionEvaluation::new(vec![residue], vec![1])
        }
    }

    fn doubling_trace() -> TraceTable<F97> {
        TraceTable::from_columns(vec![[1, 2, 4, 8].map(F97::new).to_vec()]).unwrap()
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(TraceTable::<F97>::from_columns(vec![]).is_err());
        assert!(TraceTable::from_columns(vec![vec![F97::ONE]]).is_err());
        assert_eq!(
            TraceTable::from_columns(vec![vec![F97::ONE; 3]]).unwrap_err(),
            AirError::LayoutViolation("trace row count must be a power of two")
        );
        let ragged = vec![vec![F97::ONE; 4], vec![F97::ONE; 2]];
        assert!(TraceTable::from_columns(ragged).is_err());
    }

    #[test]
    fn rows_and_columns_agree() {
        let rows = vec![
            vec![F97::new(1), F97::new(10)],
            vec![F97::new(2), F97::new(20)],
        ];
        let trace = TraceTable::from_rows(rows).unwrap();
        assert_eq!(trace.num_columns(), 2);
        assert_eq!(trace.num_rows(), 2);
        assert_eq!(
            trace.column(ColIx::new(1)).unwrap(),
            &[F97::new(10), F97::new(20)]
        );
        assert_eq!(trace.row(1).unwrap(), vec![F97::new(2), F97::new(20)]);
        assert!(trace.row(2).is_err());
    }

    #[test]
    fn wrap_around_row_is_exempt() {
        let trace = doubling_trace();
        trace.validate_transitions(&Doubling).unwrap();

        let tampered =
            TraceTable::from_columns(vec![[1, 2, 5, 10].map(F97::new).to_vec()]).unwrap();
        assert_eq!(
            tampered.validate_transitions(&Doubling).unwrap_err(),
            AirError::InvalidTransition {
                column: ColIx::new(0),
                step: 1,
            }
        );
    }

    #[test]
    fn assertions_are_checked_against_rows() {
        let trace = doubling_trace();
        let ok = [
            Assertion::new(ColIx::new(0), 0, F97::new(1)),
            Assertion::new(ColIx::new(0), 3, F97::new(8)),
        ];
        trace.check_assertions(&ok).unwrap();

        let wrong = [Assertion::new(ColIx::new(0), 2, F97::new(5))];
        assert_eq!(
            trace.check_assertions(&wrong).unwrap_err(),
            AirError::BoundaryViolation {
                column: ColIx::new(0),
                step: 2,
            }
        );
        let out_of_range = [Assertion::new(ColIx::new(0), 4, F97::new(5))];
        assert!(trace.check_assertions(&out_of_range).is_err());
    }

    #[test]
    fn interpolation_reproduces_rows_on_domain() {
        let trace = doubling_trace();
        let polys = trace.interpolate().unwrap();
        let g = polys.g_trace();
        let mut point = F97::ONE;
        for row in 0..trace.num_rows() {
            let frame = polys.frame_at(point).unwrap();
            assert_eq!(frame.current(), trace.row(row).unwrap().as_slice());
            assert_eq!(
                frame.next(),
                trace.row((row + 1) % trace.num_rows()).unwrap().as_slice()
            );
            point = point.mul(&g);
        }
    }
}
