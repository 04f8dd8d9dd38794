//! Immutable expression trees over constants and named variables.
//!
//! An [`Element`] is a closed sum type: leaves are constants and variables,
//! inner nodes are negation and the four binary arithmetic operations. Every
//! node exclusively owns its operands, so a tree is built bottom-up by moving
//! sub-trees into their parent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::binding::Bindings;
use crate::error::{AlgebraError, Result};
use crate::variable::Variable;

/// A node of the symbolic expression tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Element {
    Constant(f64),
    Variable(Variable),
    Negate(Box<Element>),
    Add(Box<Element>, Box<Element>),
    Subtract(Box<Element>, Box<Element>),
    Multiply(Box<Element>, Box<Element>),
    Divide(Box<Element>, Box<Element>),
}

/// Discriminant of an [`Element`], handy for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Constant,
    Variable,
    Negate,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Element {
    pub const ZERO: Element = Element::Constant(0.0);
    pub const ONE: Element = Element::Constant(1.0);

    /// Coerces a raw number, a variable name or an existing element into an element.
    pub fn coerce<O: Into<Operand>>(operand: O) -> Result<Self> {
        match operand.into() {
            Operand::Number(value) => Ok(Element::Constant(value)),
            Operand::Name(name) => Variable::new(name).map(Element::Variable),
            Operand::Element(element) => Ok(element),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Constant(_) => ElementKind::Constant,
            Element::Variable(_) => ElementKind::Variable,
            Element::Negate(_) => ElementKind::Negate,
            Element::Add(..) => ElementKind::Add,
            Element::Subtract(..) => ElementKind::Subtract,
            Element::Multiply(..) => ElementKind::Multiply,
            Element::Divide(..) => ElementKind::Divide,
        }
    }

    /// Returns the first operand of an expression node, `None` for leaves.
    pub fn op1(&self) -> Option<&Element> {
        match self {
            Element::Constant(_) | Element::Variable(_) => None,
            Element::Negate(a)
            | Element::Add(a, _)
            | Element::Subtract(a, _)
            | Element::Multiply(a, _)
            | Element::Divide(a, _) => Some(a.as_ref()),
        }
    }

    /// Returns the second operand of a binary node, `None` otherwise.
    pub fn op2(&self) -> Option<&Element> {
        match self {
            Element::Add(_, b)
            | Element::Subtract(_, b)
            | Element::Multiply(_, b)
            | Element::Divide(_, b) => Some(b.as_ref()),
            _ => None,
        }
    }

    /// Returns the stored value when the element is a constant leaf.
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Element::Constant(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Element::Constant(_))
    }

    /// Evaluates the tree under `bindings`.
    ///
    /// Division by zero follows IEEE semantics and yields an infinity or NaN.
    pub fn value(&self, bindings: Option<&Bindings>) -> Result<f64> {
        Ok(match self {
            Element::Constant(value) => *value,
            Element::Variable(variable) => variable.value(bindings)?,
            Element::Negate(a) => -a.value(bindings)?,
            Element::Add(a, b) => a.value(bindings)? + b.value(bindings)?,
            Element::Subtract(a, b) => a.value(bindings)? - b.value(bindings)?,
            Element::Multiply(a, b) => a.value(bindings)? * b.value(bindings)?,
            Element::Divide(a, b) => a.value(bindings)? / b.value(bindings)?,
        })
    }

    /// Rounds half up: a fractional part of at least `0.5` rounds toward `+inf`.
    pub fn round(&self, bindings: Option<&Bindings>) -> Result<i64> {
        let value = self.value(bindings)?;
        let rounded = if value.rem_euclid(1.0) >= 0.5 {
            value.ceil()
        } else {
            value.floor()
        };
        to_integer(rounded)
    }

    pub fn floor(&self, bindings: Option<&Bindings>) -> Result<i64> {
        to_integer(self.value(bindings)?.floor())
    }

    pub fn ceil(&self, bindings: Option<&Bindings>) -> Result<i64> {
        to_integer(self.value(bindings)?.ceil())
    }

    /// Integer conversion toward zero.
    pub fn truncate(&self, bindings: Option<&Bindings>) -> Result<i64> {
        to_integer(self.value(bindings)?.trunc())
    }

    /// Value equality: structurally equal, or both sides evaluate to the same number.
    pub fn veq(&self, other: &Element, bindings: Option<&Bindings>) -> Result<bool> {
        if self == other {
            return Ok(true);
        }
        Ok(self.value(bindings)? == other.value(bindings)?)
    }

    /// Ordering by value, except that `-a < -b` is decided as `a > b`.
    pub fn lt(&self, other: &Element, bindings: Option<&Bindings>) -> Result<bool> {
        match (self, other) {
            (Element::Negate(a), Element::Negate(b)) => Element::gt(a, b, bindings),
            _ => Ok(self.value(bindings)? < other.value(bindings)?),
        }
    }

    pub fn le(&self, other: &Element, bindings: Option<&Bindings>) -> Result<bool> {
        Ok(self.veq(other, bindings)? || self.lt(other, bindings)?)
    }

    pub fn gt(&self, other: &Element, bindings: Option<&Bindings>) -> Result<bool> {
        Ok(!self.veq(other, bindings)? && !self.lt(other, bindings)?)
    }

    pub fn ge(&self, other: &Element, bindings: Option<&Bindings>) -> Result<bool> {
        Ok(!self.lt(other, bindings)?)
    }
}

/// Converts an already integral float, rejecting NaN, infinities and values
/// outside `[i64::MIN, i64::MAX]` instead of saturating.
fn to_integer(value: f64) -> Result<i64> {
    // 2^63 is exactly representable, i64::MAX is not.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if value.is_finite() && value >= -LIMIT && value < LIMIT {
        Ok(value as i64)
    } else {
        Err(AlgebraError::unrepresentable(value))
    }
}

/// `true` when `candidate` is literally `Negate(operand)`.
fn negates(candidate: &Element, operand: &Element) -> bool {
    matches!(candidate, Element::Negate(inner) if **inner == *operand)
}

/// Structural equality.
///
/// Constants compare with IEEE equality, variables by name. `Add` is
/// commutative and `Subtract` also matches its negation-mirrored form
/// `(-b) - (-a)`, checked from both sides so the relation stays symmetric.
/// Elements of different kinds are never equal.
impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Element::Constant(a), Element::Constant(b)) => a == b,
            (Element::Variable(a), Element::Variable(b)) => a == b,
            (Element::Negate(a), Element::Negate(b)) => a == b,
            (Element::Add(a1, a2), Element::Add(b1, b2)) => {
                (a1 == b1 && a2 == b2) || (a1 == b2 && a2 == b1)
            }
            (Element::Subtract(a1, a2), Element::Subtract(b1, b2)) => {
                (a1 == b1 && a2 == b2)
                    || (negates(a1, b2) && negates(a2, b1))
                    || (negates(b2, a1) && negates(b1, a2))
            }
            (Element::Multiply(a1, a2), Element::Multiply(b1, b2))
            | (Element::Divide(a1, a2), Element::Divide(b1, b2)) => a1 == b1 && a2 == b2,
            _ => false,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Constant(value) => write!(f, "{value:?}"),
            Element::Variable(variable) => write!(f, "{variable}"),
            Element::Negate(a) => write!(f, "-{a}"),
            Element::Add(a, b) => write!(f, "({a} + {b})"),
            Element::Subtract(a, b) => write!(f, "({a} - {b})"),
            Element::Multiply(a, b) => write!(f, "{a} * {b}"),
            Element::Divide(a, b) => write!(f, "{a} / {b}"),
        }
    }
}

pub fn negate<A: Into<Element>>(operand: A) -> Element {
    Element::Negate(Box::new(operand.into()))
}

pub fn add<L: Into<Element>, R: Into<Element>>(lhs: L, rhs: R) -> Element {
    Element::Add(Box::new(lhs.into()), Box::new(rhs.into()))
}

pub fn sub<L: Into<Element>, R: Into<Element>>(lhs: L, rhs: R) -> Element {
    Element::Subtract(Box::new(lhs.into()), Box::new(rhs.into()))
}

pub fn mul<L: Into<Element>, R: Into<Element>>(lhs: L, rhs: R) -> Element {
    Element::Multiply(Box::new(lhs.into()), Box::new(rhs.into()))
}

pub fn div<L: Into<Element>, R: Into<Element>>(lhs: L, rhs: R) -> Element {
    Element::Divide(Box::new(lhs.into()), Box::new(rhs.into()))
}

/// Fallible counterparts of the constructors above that also accept raw
/// numbers and variable names, coercing them with [`Element::coerce`].
pub fn try_negate<A: Into<Operand>>(operand: A) -> Result<Element> {
    Ok(negate(Element::coerce(operand)?))
}

pub fn try_add<L: Into<Operand>, R: Into<Operand>>(lhs: L, rhs: R) -> Result<Element> {
    Ok(add(Element::coerce(lhs)?, Element::coerce(rhs)?))
}

pub fn try_sub<L: Into<Operand>, R: Into<Operand>>(lhs: L, rhs: R) -> Result<Element> {
    Ok(sub(Element::coerce(lhs)?, Element::coerce(rhs)?))
}

pub fn try_mul<L: Into<Operand>, R: Into<Operand>>(lhs: L, rhs: R) -> Result<Element> {
    Ok(mul(Element::coerce(lhs)?, Element::coerce(rhs)?))
}

pub fn try_div<L: Into<Operand>, R: Into<Operand>>(lhs: L, rhs: R) -> Result<Element> {
    Ok(div(Element::coerce(lhs)?, Element::coerce(rhs)?))
}

impl From<Variable> for Element {
    fn from(value: Variable) -> Self {
        Element::Variable(value)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Element {
                fn from(value: $ty) -> Self {
                    Element::Constant(value as f64)
                }
            }

            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Operand::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64);

impl std::ops::Neg for Element {
    type Output = Element;

    fn neg(self) -> Element {
        negate(self)
    }
}

macro_rules! impl_binary_ops {
    ($($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $build:ident;)*) => {
        $(
            impl<R: Into<Element>> std::ops::$trait<R> for Element {
                type Output = Element;

                fn $method(self, rhs: R) -> Element {
                    $build(self, rhs)
                }
            }

            impl<R: Into<Element>> std::ops::$assign_trait<R> for Element {
                fn $assign_method(&mut self, rhs: R) {
                    let lhs = std::mem::replace(self, Element::ZERO);
                    *self = $build(lhs, rhs);
                }
            }
        )*
    };
}

impl_binary_ops! {
    Add, add, AddAssign, add_assign, add;
    Sub, sub, SubAssign, sub_assign, sub;
    Mul, mul, MulAssign, mul_assign, mul;
    Div, div, DivAssign, div_assign, div;
}

/// Raw input accepted wherever an element is expected.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// Becomes an [`Element::Constant`].
    Number(f64),
    /// Becomes an [`Element::Variable`] once the name is validated.
    Name(String),
    /// Passed through unchanged.
    Element(Element),
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Name(value.to_owned())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Name(value)
    }
}

impl From<Element> for Operand {
    fn from(value: Element) -> Self {
        Operand::Element(value)
    }
}

impl From<Variable> for Operand {
    fn from(value: Variable) -> Self {
        Operand::Element(Element::Variable(value))
    }
}

impl TryFrom<Operand> for Element {
    type Error = AlgebraError;

    fn try_from(value: Operand) -> Result<Self> {
        Element::coerce(value)
    }
}

/// Recognises a single textual token.
///
/// Valid variable names take precedence over float spellings such as `inf`,
/// anything else that parses as `f64` is a number, and every other token is
/// rejected with [`AlgebraError::UnsupportedOperand`].
impl FromStr for Operand {
    type Err = AlgebraError;

    fn from_str(token: &str) -> Result<Self> {
        let token = token.trim();
        if Variable::is_valid_name(token) {
            return Ok(Operand::Name(token.to_owned()));
        }
        token
            .parse::<f64>()
            .map(Operand::Number)
            .map_err(|_| AlgebraError::unsupported(token))
    }
}
