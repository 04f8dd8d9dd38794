//! Evaluation of one shared tree under many binding contexts at once.
//!
//! Elements are immutable after construction, so a single tree can be read by
//! every rayon worker while each worker resolves variables against its own
//! [`Bindings`].

use rayon::prelude::*;

use crate::binding::Bindings;
use crate::element::Element;
use crate::equation::Equation;
use crate::error::Result;

/// Evaluates `element` once per context, preserving the order of `contexts`.
///
/// Fails with the first lookup error reported by any worker.
pub fn values_par(element: &Element, contexts: &[Bindings]) -> Result<Vec<f64>> {
    contexts
        .par_iter()
        .map(|bindings| element.value(Some(bindings)))
        .collect()
}

/// Checks `equation` once per context, preserving the order of `contexts`.
pub fn validity_par(equation: &Equation, contexts: &[Bindings]) -> Result<Vec<bool>> {
    contexts
        .par_iter()
        .map(|bindings| equation.is_valid(Some(bindings)))
        .collect()
}
