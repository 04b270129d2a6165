//! Differential comparator
//!
//! Decides whether a candidate result is equivalent to the trusted naive
//! result for one test case, and reports disagreement as a value the
//! battery driver turns into an abort. Equivalence depends on the result
//! shape: positions and counts compare for exact equality; mutating
//! algorithms compare whole resulting sequences element by element.

use std::fmt::Debug;

use crate::error::{CentellaError, Result};

/// Compare one scalar-shaped result (position, count, ordering, value).
pub fn verify<T>(op: &str, expected: T, actual: T) -> Result<()>
where
    T: PartialEq + Debug,
{
    if expected == actual {
        Ok(())
    } else {
        Err(mismatch(op, &expected, &actual))
    }
}

/// Compare the full resulting sequences of a mutating algorithm, element
/// by element, in order. The failing index is named in the diagnostic.
pub fn verify_seq<T>(op: &str, expected: &[T], actual: &[T]) -> Result<()>
where
    T: PartialEq + Debug,
{
    if expected.len() != actual.len() {
        return Err(mismatch(
            &format!("{op} (length)"),
            &expected.len(),
            &actual.len(),
        ));
    }
    for (index, (lhs, rhs)) in expected.iter().zip(actual.iter()).enumerate() {
        if lhs != rhs {
            return Err(mismatch(&format!("{op}[{index}]"), lhs, rhs));
        }
    }
    Ok(())
}

fn mismatch<E, A>(op: &str, expected: &E, actual: &A) -> CentellaError
where
    E: Debug,
    A: Debug,
{
    CentellaError::Mismatch {
        op: op.to_string(),
        expected: format!("{expected:?}"),
        actual: format!("{actual:?}"),
    }
}
