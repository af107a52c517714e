use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::tape::Tape;

/// Scalar recorded on a [`Tape`].
///
/// `Var` is `Copy`; arithmetic on it records a new node and returns the
/// result. Mixing variables from different tapes is a logic error.
#[derive(Clone, Copy)]
pub struct Var<'t> {
    tape: &'t Tape,
    index: usize,
    value: f64,
}

impl fmt::Debug for Var<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Var")
            .field("index", &self.index)
            .field("value", &self.value)
            .finish()
    }
}

impl<'t> Var<'t> {
    pub(crate) fn new(tape: &'t Tape, index: usize, value: f64) -> Self {
        Self { tape, index, value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn tape(&self) -> &'t Tape {
        self.tape
    }

    pub(crate) fn belongs_to(&self, tape: &Tape) -> bool {
        std::ptr::eq(self.tape, tape)
    }

    fn unary(self, value: f64, partial: f64) -> Self {
        self.tape.push(value, &[(self.index, partial)])
    }

    fn binary(self, rhs: Self, value: f64, d_lhs: f64, d_rhs: f64) -> Self {
        debug_assert!(rhs.belongs_to(self.tape), "variables from different tapes");
        self.tape
            .push(value, &[(self.index, d_lhs), (rhs.index, d_rhs)])
    }

    pub fn exp(self) -> Self {
        let e = self.value.exp();
        self.unary(e, e)
    }

    /// Natural logarithm. Non-positive inputs yield NaN or -inf, which the
    /// backends report as a non-differentiable point.
    pub fn ln(self) -> Self {
        self.unary(self.value.ln(), 1.0 / self.value)
    }

    pub fn powi(self, n: i32) -> Self {
        let d = if n == 0 {
            0.0
        } else {
            f64::from(n) * self.value.powi(n - 1)
        };
        self.unary(self.value.powi(n), d)
    }

    pub fn powf(self, p: f64) -> Self {
        self.unary(self.value.powf(p), p * self.value.powf(p - 1.0))
    }

    pub fn square(self) -> Self {
        self.unary(self.value * self.value, 2.0 * self.value)
    }

    /// Square root; the derivative is infinite at zero.
    pub fn sqrt(self) -> Self {
        let s = self.value.sqrt();
        self.unary(s, 0.5 / s)
    }

    pub fn sigmoid(self) -> Self {
        let s = sigmoid(self.value);
        self.unary(s, s * (1.0 - s))
    }

    /// `ln(sigmoid(x))`, stable for large `|x|`.
    pub fn ln_sigmoid(self) -> Self {
        self.unary(-softplus(-self.value), sigmoid(-self.value))
    }

    /// `ln(1 + exp(x))`, stable for large `|x|`.
    pub fn softplus(self) -> Self {
        self.unary(softplus(self.value), sigmoid(self.value))
    }
}

pub(crate) fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

pub(crate) fn softplus(x: f64) -> f64 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}

impl<'t> Add for Var<'t> {
    type Output = Var<'t>;

    fn add(self, rhs: Var<'t>) -> Var<'t> {
        self.binary(rhs, self.value + rhs.value, 1.0, 1.0)
    }
}

impl<'t> Sub for Var<'t> {
    type Output = Var<'t>;

    fn sub(self, rhs: Var<'t>) -> Var<'t> {
        self.binary(rhs, self.value - rhs.value, 1.0, -1.0)
    }
}

impl<'t> Mul for Var<'t> {
    type Output = Var<'t>;

    fn mul(self, rhs: Var<'t>) -> Var<'t> {
        self.binary(rhs, self.value * rhs.value, rhs.value, self.value)
    }
}

impl<'t> Div for Var<'t> {
    type Output = Var<'t>;

    fn div(self, rhs: Var<'t>) -> Var<'t> {
        let q = self.value / rhs.value;
        self.binary(rhs, q, 1.0 / rhs.value, -q / rhs.value)
    }
}

impl<'t> Neg for Var<'t> {
    type Output = Var<'t>;

    fn neg(self) -> Var<'t> {
        self.unary(-self.value, -1.0)
    }
}

// --- mixed operations with plain constants ---

impl<'t> Add<f64> for Var<'t> {
    type Output = Var<'t>;

    fn add(self, rhs: f64) -> Var<'t> {
        self.unary(self.value + rhs, 1.0)
    }
}

impl<'t> Sub<f64> for Var<'t> {
    type Output = Var<'t>;

    fn sub(self, rhs: f64) -> Var<'t> {
        self.unary(self.value - rhs, 1.0)
    }
}

impl<'t> Mul<f64> for Var<'t> {
    type Output = Var<'t>;

    fn mul(self, rhs: f64) -> Var<'t> {
        self.unary(self.value * rhs, rhs)
    }
}

impl<'t> Div<f64> for Var<'t> {
    type Output = Var<'t>;

    fn div(self, rhs: f64) -> Var<'t> {
        self.unary(self.value / rhs, 1.0 / rhs)
    }
}

impl<'t> Add<Var<'t>> for f64 {
    type Output = Var<'t>;

    fn add(self, rhs: Var<'t>) -> Var<'t> {
        rhs + self
    }
}

impl<'t> Sub<Var<'t>> for f64 {
    type Output = Var<'t>;

    fn sub(self, rhs: Var<'t>) -> Var<'t> {
        rhs.unary(self - rhs.value, -1.0)
    }
}

impl<'t> Mul<Var<'t>> for f64 {
    type Output = Var<'t>;

    fn mul(self, rhs: Var<'t>) -> Var<'t> {
        rhs * self
    }
}

impl<'t> Div<Var<'t>> for f64 {
    type Output = Var<'t>;

    fn div(self, rhs: Var<'t>) -> Var<'t> {
        let q = self / rhs.value;
        rhs.unary(q, -q / rhs.value)
    }
}
