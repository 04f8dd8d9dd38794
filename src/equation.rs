//! Equations as pairs of elements that are transformed side by side.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::binding::Bindings;
use crate::element::{add, div, mul, sub, Element, Operand};
use crate::error::Result;
use crate::options::{CalcOptions, CalcSummary};

/// Two elements standing on either side of `=`.
///
/// Every transform replaces both sides with the same operation applied to the
/// same operand, so an equation that holds under some bindings keeps holding.
/// Sides are only ever lent out by reference, which means a borrowed side can
/// never be observed after a transform has replaced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Equation {
    left: Element,
    right: Element,
}

impl Equation {
    pub fn new<L: Into<Element>, R: Into<Element>>(left: L, right: R) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn left(&self) -> &Element {
        &self.left
    }

    pub fn right(&self) -> &Element {
        &self.right
    }

    /// Consumes the equation and returns `(left, right)`.
    pub fn into_sides(self) -> (Element, Element) {
        (self.left, self.right)
    }

    /// Checks whether both sides evaluate to exactly the same number.
    pub fn is_valid(&self, bindings: Option<&Bindings>) -> Result<bool> {
        Ok(self.left.value(bindings)? == self.right.value(bindings)?)
    }

    /// Adds `operand` to both sides.
    pub fn add<O: Into<Operand>>(&mut self, operand: O) -> Result<()> {
        self.apply("add", operand, |side, operand| add(side, operand))
    }

    /// Subtracts `operand` from both sides.
    pub fn sub<O: Into<Operand>>(&mut self, operand: O) -> Result<()> {
        self.apply("sub", operand, |side, operand| sub(side, operand))
    }

    /// Multiplies both sides by `operand`.
    pub fn mul<O: Into<Operand>>(&mut self, operand: O) -> Result<()> {
        self.apply("mul", operand, |side, operand| mul(side, operand))
    }

    /// Divides both sides by `operand`.
    pub fn div<O: Into<Operand>>(&mut self, operand: O) -> Result<()> {
        self.apply("div", operand, |side, operand| div(side, operand))
    }

    fn apply<O: Into<Operand>>(
        &mut self,
        op: &str,
        operand: O,
        build: fn(Element, Element) -> Element,
    ) -> Result<()> {
        // Coerce first so a rejected operand leaves both sides untouched.
        let operand = Element::coerce(operand)?;
        let left = std::mem::replace(&mut self.left, Element::ZERO);
        let right = std::mem::replace(&mut self.right, Element::ZERO);
        self.left = build(left, operand.clone());
        self.right = build(right, operand);
        debug!("equation {op}: {self}");
        Ok(())
    }

    /// Replaces both sides with their single-pass simplified forms.
    pub fn solve(&mut self) {
        self.left = self.left.calc();
        self.right = self.right.calc();
        debug!("equation solved: {self}");
    }

    /// Simplifies both sides with up to `options.max_passes` passes each.
    ///
    /// The returned summary reports the larger pass count of the two sides and
    /// converges only if both sides did.
    pub fn solve_with_options(&mut self, options: &CalcOptions) -> CalcSummary {
        let (left, left_summary) = self.left.calc_with(options);
        let (right, right_summary) = self.right.calc_with(options);
        self.left = left;
        self.right = right;
        let summary = CalcSummary {
            passes: left_summary.passes.max(right_summary.passes),
            converged: left_summary.converged && right_summary.converged,
        };
        debug!("equation solved in {} pass(es): {self}", summary.passes);
        summary
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.left, self.right)
    }
}

/// An ordered list of equations with no behaviour of its own.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquationGroup {
    equations: Vec<Equation>,
}

impl EquationGroup {
    pub fn new(equations: Vec<Equation>) -> Self {
        Self { equations }
    }

    pub fn push(&mut self, equation: Equation) {
        self.equations.push(equation);
    }

    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Equation> {
        self.equations.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Equation> {
        self.equations.iter_mut()
    }
}

impl From<Vec<Equation>> for EquationGroup {
    fn from(equations: Vec<Equation>) -> Self {
        Self::new(equations)
    }
}

impl IntoIterator for EquationGroup {
    type Item = Equation;
    type IntoIter = std::vec::IntoIter<Equation>;

    fn into_iter(self) -> Self::IntoIter {
        self.equations.into_iter()
    }
}

impl<'a> IntoIterator for &'a EquationGroup {
    type Item = &'a Equation;
    type IntoIter = std::slice::Iter<'a, Equation>;

    fn into_iter(self) -> Self::IntoIter {
        self.equations.iter()
    }
}
