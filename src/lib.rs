//! Minimal symbolic-algebra kernel over floating-point constants and named variables.
//!
//! This crate represents arithmetic expressions as immutable trees, evaluates
//! them under caller-supplied variable bindings, and simplifies them with a
//! fixed set of rewrite rules. It offers tools to
//!
//! - build expression trees from numbers, names and other trees (`element` module),
//! - bind variable names to values for evaluation (`binding` module),
//! - simplify trees bottom-up with constant folding, cancellation and
//!   distribution (`simplify` module), and
//! - manipulate both sides of an equation in lockstep (`equation` module).
//!
//! Evaluation never reads ambient state: every call that may resolve a variable
//! takes an `Option<&Bindings>`, and `None` means no context is active. The
//! `parallel` module uses this to evaluate one shared tree under many bindings
//! with rayon.
//!
//! # Quick start
//!
//! ```
//! use symalg::{add, Bindings, Element, Equation, Variable};
//!
//! let mut equation = Equation::new(add(Variable::X, 2.0), 5.0);
//!
//! let bindings = Bindings::new().with("x", 3.0);
//! assert!(equation.is_valid(Some(&bindings)).unwrap());
//!
//! equation.sub(2.0).unwrap();
//! equation.solve();
//! assert_eq!(equation.left(), &Element::from(Variable::X));
//! assert_eq!(equation.right(), &Element::Constant(3.0));
//! ```

pub mod binding;
pub mod element;
pub mod equation;
pub mod error;
pub mod options;
pub mod parallel;
pub mod simplify;
pub mod variable;

pub use binding::Bindings;
pub use element::{
    add, div, mul, negate, sub, try_add, try_div, try_mul, try_negate, try_sub, Element,
    ElementKind, Operand,
};
pub use equation::{Equation, EquationGroup};
pub use error::{AlgebraError, Result};
pub use options::{CalcOptions, CalcSummary};
pub use variable::Variable;
