//! Bottom-up rewriting of element trees.
//!
//! A single `calc` pass simplifies operands first, folds nodes whose operands
//! are all constants, then applies the rewrite rule owned by the node kind:
//!
//! - `--a` becomes `a`,
//! - `a + b` becomes `0` when `a` equals the simplified `-b`,
//! - `a - a` becomes `0`,
//! - products distribute over a sum or difference on either side,
//! - quotients distribute over a sum or difference in the numerator only,
//! - an operand added and then subtracted again (or the reverse) cancels out.
//!
//! The engine only ever folds constant operands, so it never consults a
//! binding context and cannot fail.

use log::{debug, trace};

use crate::element::{add, div, mul, negate, sub, Element};
use crate::options::{CalcOptions, CalcSummary};

impl Element {
    /// Returns a simplified equivalent of this element after one pass.
    pub fn calc(&self) -> Element {
        match self {
            Element::Constant(_) | Element::Variable(_) => self.clone(),
            Element::Negate(a) => match a.calc() {
                Element::Constant(value) => Element::Constant(-value),
                Element::Negate(inner) => *inner,
                other => negate(other),
            },
            Element::Add(a, b) => match (a.calc(), b.calc()) {
                (Element::Constant(x), Element::Constant(y)) => Element::Constant(x + y),
                (a, b) => rewrite_add(a, b),
            },
            Element::Subtract(a, b) => match (a.calc(), b.calc()) {
                (Element::Constant(x), Element::Constant(y)) => Element::Constant(x - y),
                (a, b) => rewrite_sub(a, b),
            },
            Element::Multiply(a, b) => match (a.calc(), b.calc()) {
                (Element::Constant(x), Element::Constant(y)) => Element::Constant(x * y),
                (a, b) => rewrite_mul(a, b),
            },
            Element::Divide(a, b) => match (a.calc(), b.calc()) {
                (Element::Constant(x), Element::Constant(y)) => Element::Constant(x / y),
                (a, b) => rewrite_div(a, b),
            },
        }
    }

    /// Runs `calc` repeatedly until the tree stops changing or
    /// `options.max_passes` passes have been made.
    pub fn calc_with(&self, options: &CalcOptions) -> (Element, CalcSummary) {
        let max_passes = options.max_passes.max(1);
        let mut current = self.clone();

        for pass in 1..=max_passes {
            let next = current.calc();
            trace!("calc pass {pass}: {current} => {next}");
            if next == current {
                debug!("calc converged after {pass} pass(es): {next}");
                let summary = CalcSummary {
                    passes: pass,
                    converged: true,
                };
                return (next, summary);
            }
            current = next;
        }

        debug!("calc stopped after {max_passes} pass(es) without converging: {current}");
        let summary = CalcSummary {
            passes: max_passes,
            converged: false,
        };
        (current, summary)
    }
}

fn rewrite_add(a: Element, b: Element) -> Element {
    if a == negate(b.clone()).calc() {
        return Element::ZERO;
    }
    // (p - q) + q and q + (p - q)
    let a = match a {
        Element::Subtract(p, q) if *q == b => return *p,
        a => a,
    };
    match b {
        Element::Subtract(p, q) if *q == a => *p,
        b => add(a, b),
    }
}

fn rewrite_sub(a: Element, b: Element) -> Element {
    if a == b {
        return Element::ZERO;
    }
    match a {
        Element::Add(p, q) if *q == b => *p,
        Element::Add(p, q) if *p == b => *q,
        a => sub(a, b),
    }
}

fn rewrite_mul(a: Element, b: Element) -> Element {
    match (a, b) {
        (Element::Add(l, r), b) => add(mul(*l, b.clone()).calc(), mul(*r, b).calc()),
        (Element::Subtract(l, r), b) => sub(mul(*l, b.clone()).calc(), mul(*r, b).calc()),
        (a, Element::Add(l, r)) => add(mul(a.clone(), *l).calc(), mul(a, *r).calc()),
        (a, Element::Subtract(l, r)) => sub(mul(a.clone(), *l).calc(), mul(a, *r).calc()),
        (a, b) => mul(a, b),
    }
}

fn rewrite_div(a: Element, b: Element) -> Element {
    match (a, b) {
        (Element::Add(l, r), b) => add(div(*l, b.clone()).calc(), div(*r, b).calc()),
        (Element::Subtract(l, r), b) => sub(div(*l, b.clone()).calc(), div(*r, b).calc()),
        (a, b) => div(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Bindings;
    use crate::element::ElementKind;
    use crate::variable::Variable;

    fn x() -> Element {
        Variable::X.into()
    }

    fn y() -> Element {
        Variable::Y.into()
    }

    fn z() -> Element {
        Variable::Z.into()
    }

    #[test]
    fn leaves_are_returned_unchanged() {
        assert_eq!(x().calc(), x());
        assert_eq!(Element::Constant(4.5).calc(), Element::Constant(4.5));
    }

    #[test]
    fn double_negation_is_eliminated() {
        assert_eq!(negate(negate(x())).calc(), x());
        assert_eq!(negate(negate(add(x(), y()))).calc(), add(x(), y()));
        assert_eq!(negate(x()).calc(), negate(x()));
    }

    #[test]
    fn constant_subtrees_fold() {
        assert_eq!(add(2.0, 3.0).calc(), Element::Constant(5.0));
        assert_eq!(sub(2.0, 3.0).calc(), Element::Constant(-1.0));
        assert_eq!(mul(2.0, 3.0).calc(), Element::Constant(6.0));
        assert_eq!(div(3.0, 2.0).calc(), Element::Constant(1.5));
        assert_eq!(negate(2.0).calc(), Element::Constant(-2.0));
        assert_eq!(
            mul(add(1.0, 2.0), negate(sub(4.0, 6.0))).calc(),
            Element::Constant(6.0)
        );
    }

    #[test]
    fn opposites_cancel_in_sums() {
        assert_eq!(add(x(), negate(x())).calc(), Element::ZERO);
        assert_eq!(add(negate(x()), x()).calc(), Element::ZERO);
        let product = mul(x(), y());
        assert_eq!(add(product.clone(), negate(product)).calc(), Element::ZERO);
        assert_eq!(add(x(), y()).calc(), add(x(), y()));
    }

    #[test]
    fn identical_operands_cancel_in_differences() {
        assert_eq!(sub(x(), x()).calc(), Element::ZERO);
        assert_eq!(sub(add(x(), y()), add(y(), x())).calc(), Element::ZERO);
        assert_eq!(sub(x(), y()).calc(), sub(x(), y()));
    }

    #[test]
    fn products_distribute_on_both_sides() {
        let left = mul(add(x(), y()), z()).calc();
        assert_eq!(left, add(mul(x(), z()), mul(y(), z())).calc());

        let right = mul(z(), sub(x(), y())).calc();
        assert_eq!(right, sub(mul(z(), x()), mul(z(), y())));
    }

    #[test]
    fn quotients_distribute_over_numerator_only() {
        let numerator = div(add(x(), y()), z()).calc();
        assert_eq!(numerator, add(div(x(), z()), div(y(), z())));

        let denominator = div(z(), add(x(), y())).calc();
        assert_eq!(denominator.kind(), ElementKind::Divide);
        assert_eq!(denominator, div(z(), add(x(), y())));
    }

    #[test]
    fn inverse_operations_cancel() {
        assert_eq!(sub(add(x(), 2.0), 2.0).calc(), x());
        assert_eq!(sub(add(2.0, x()), 2.0).calc(), x());
        assert_eq!(add(sub(x(), 2.0), 2.0).calc(), x());
        assert_eq!(add(y(), sub(x(), y())).calc(), x());
    }

    #[test]
    fn products_and_quotients_are_not_cancelled() {
        assert_eq!(mul(div(x(), y()), y()).calc(), mul(div(x(), y()), y()));
        assert_eq!(mul(y(), div(x(), y())).calc(), mul(y(), div(x(), y())));
        assert_eq!(div(mul(x(), y()), y()).calc(), div(mul(x(), y()), y()));
        assert_eq!(div(mul(2.0, x()), 2.0).calc(), div(mul(2.0, x()), 2.0));

        // y = 0 must keep the NaN of the unsimplified tree.
        let bindings = Bindings::new().with("x", 5.0).with("y", 0.0);
        let expr = mul(div(x(), y()), y());
        assert!(expr.calc().value(Some(&bindings)).unwrap().is_nan());
    }

    #[test]
    fn repeated_passes_reach_a_fixed_point() {
        // ((x + 1) - 2) * 0 distributes into (x * 0 + 0) - 0, which only a
        // second pass cancels.
        let expr = mul(sub(add(x(), 1.0), 2.0), 0.0);

        let (once, summary) = expr.calc_with(&CalcOptions::default());
        assert_eq!(once, sub(add(mul(x(), 0.0), 0.0), 0.0));
        assert_eq!(
            summary,
            CalcSummary {
                passes: 1,
                converged: false
            }
        );

        let options = CalcOptions::default().with_max_passes(5);
        let (fixed, summary) = expr.calc_with(&options);
        assert_eq!(fixed, mul(x(), 0.0));
        assert_eq!(summary.passes, 3);
        assert!(summary.converged);
    }
}
