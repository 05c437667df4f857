use crate::{error::VectorError, scalar::Scalar};
use core::ops::{Add, Bound, Deref, Mul, Neg, RangeBounds, Sub};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{convert::TryFrom, fmt};

/// An immutable Euclidean vector with one or more `f64` components.
///
/// Every operation returns a new `Vector`; there is no way to change the
/// components or the dimension of an existing one.
///
/// A literal on the left of `*` needs a suffix when the product is used
/// directly, e.g. `(3i32 * v).norm()`, since every primitive implements
/// `Mul<Vector>`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Vector(Vec<f64>);

#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .fold(0.0, |dot, (&lhs, &rhs)| dot + lhs * rhs)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Vector {
    pub fn new(numbers: &[f64]) -> Result<Self, VectorError> {
        Self::from_vec(numbers.to_vec())
    }

    /// Builds a vector from any primitive numbers, converting each to `f64`.
    pub fn from_numbers<I, S>(numbers: I) -> Result<Self, VectorError>
    where
        I: IntoIterator<Item = S>,
        S: Scalar,
    {
        Self::from_vec(numbers.into_iter().map(Scalar::to_f64).collect())
    }

    fn from_vec(numbers: Vec<f64>) -> Result<Self, VectorError> {
        if numbers.is_empty() {
            return Err(VectorError::Empty);
        }
        Ok(Self(numbers))
    }

    /// Builds a vector from untyped JSON values.
    ///
    /// Every value is checked before the length, so `[true]` reports the
    /// offending `true` rather than anything about the dimension.
    pub fn from_json_values(values: &[Value]) -> Result<Self, VectorError> {
        let mut numbers = Vec::with_capacity(values.len());
        for value in values {
            match value.as_f64() {
                Some(number) => numbers.push(number),
                None => {
                    return Err(VectorError::NotANumber {
                        value: value.to_string(),
                        kind: json_kind(value),
                    })
                }
            }
        }
        Self::from_vec(numbers)
    }

    /// Parses `[1, 2.5, 3]`. A bare scalar such as `4` is a one component vector.
    pub fn from_json_str(text: &str) -> Result<Self, VectorError> {
        match serde_json::from_str::<Value>(text)? {
            Value::Array(values) => Self::from_json_values(&values),
            value => Self::from_json_values(&[value]),
        }
    }

    #[inline]
    pub fn numbers(&self) -> &[f64] {
        &self.0
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// Succeeds only if `other` has the same dimension as `self`.
    pub fn validate_shape(&self, other: &Vector) -> Result<(), VectorError> {
        if self.dimension() != other.dimension() {
            return Err(VectorError::ShapeMismatch {
                left: self.dimension(),
                right: other.dimension(),
            });
        }
        Ok(())
    }

    fn zip_with(&self, other: &Vector, f: impl Fn(f64, f64) -> f64) -> Result<Vector, VectorError> {
        self.validate_shape(other)?;
        Ok(Vector(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        ))
    }

    pub fn try_add(&self, other: &Vector) -> Result<Vector, VectorError> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn try_sub(&self, other: &Vector) -> Result<Vector, VectorError> {
        self.zip_with(other, |a, b| a - b)
    }

    pub fn try_dot(&self, other: &Vector) -> Result<f64, VectorError> {
        self.validate_shape(other)?;
        Ok(dot(&self.0, &other.0))
    }

    pub fn scale<S: Scalar>(&self, scalar: S) -> Vector {
        let scalar = scalar.to_f64();
        Vector(self.0.iter().map(|&a| scalar * a).collect())
    }

    /// Euclidean norm, `sqrt(x0^2 + x1^2 + ...)`.
    #[inline]
    pub fn norm(&self) -> f64 {
        dot(&self.0, &self.0).sqrt()
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.norm()
    }

    pub fn component_at(&self, index: usize) -> Result<f64, VectorError> {
        self.0
            .get(index)
            .copied()
            .ok_or(VectorError::IndexOutOfRange {
                index,
                dimension: self.dimension(),
            })
    }

    /// Components in `range`, clamped to the dimension.
    ///
    /// Unlike `component_at` this never fails: a range past the end is cut
    /// short and an empty or reversed range gives an empty slice.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> &[f64] {
        let dimension = self.dimension();
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(dimension);
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => dimension,
        }
        .min(dimension);
        if start >= end {
            return &[];
        }
        &self.0[start..end]
    }

    pub fn is_2d(vector: &Vector) -> bool {
        vector.dimension() == 2
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        if Vector::is_2d(self) {
            Some(Vec2::new(self.0[0] as f32, self.0[1] as f32))
        } else {
            None
        }
    }

    pub fn abs_diff_eq(&self, other: &Vector, max_abs_diff: f64) -> bool {
        self.dimension() == other.dimension()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(a, b)| (a - b).abs() <= max_abs_diff)
    }
}

impl Deref for Vector {
    type Target = [f64];
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for Vector {
    type Error = VectorError;
    fn try_from(numbers: Vec<f64>) -> Result<Self, Self::Error> {
        Vector::from_vec(numbers)
    }
}

impl TryFrom<&[f64]> for Vector {
    type Error = VectorError;
    fn try_from(numbers: &[f64]) -> Result<Self, Self::Error> {
        Vector::new(numbers)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(vector: Vector) -> Self {
        vector.0
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = core::slice::Iter<'a, f64>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// Matches the tuple formatting of `(1.0,)` for a single component.
fn write_components(f: &mut fmt::Formatter<'_>, numbers: &[f64]) -> fmt::Result {
    write!(f, "(")?;
    for (i, number) in numbers.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:?}", number)?;
    }
    if numbers.len() == 1 {
        write!(f, ",")?;
    }
    write!(f, ")")
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector")?;
        write_components(f, &self.0)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_components(f, &self.0)
    }
}

impl Add<&Vector> for &Vector {
    type Output = Result<Vector, VectorError>;
    #[inline]
    fn add(self, rhs: &Vector) -> Self::Output {
        self.try_add(rhs)
    }
}

impl Add<Vector> for Vector {
    type Output = Result<Vector, VectorError>;
    #[inline]
    fn add(self, rhs: Vector) -> Self::Output {
        self.try_add(&rhs)
    }
}

impl Sub<&Vector> for &Vector {
    type Output = Result<Vector, VectorError>;
    #[inline]
    fn sub(self, rhs: &Vector) -> Self::Output {
        self.try_sub(rhs)
    }
}

impl Sub<Vector> for Vector {
    type Output = Result<Vector, VectorError>;
    #[inline]
    fn sub(self, rhs: Vector) -> Self::Output {
        self.try_sub(&rhs)
    }
}

impl<S: Scalar> Mul<S> for &Vector {
    type Output = Vector;
    #[inline]
    fn mul(self, rhs: S) -> Self::Output {
        log::trace!("vector * scalar");
        self.scale(rhs)
    }
}

impl<S: Scalar> Mul<S> for Vector {
    type Output = Vector;
    #[inline]
    fn mul(self, rhs: S) -> Self::Output {
        &self * rhs
    }
}

macro_rules! impl_scalar_mul_vector {
    ($($t:ty),*) => {
        $(
            impl Mul<&Vector> for $t {
                type Output = Vector;
                #[inline]
                fn mul(self, rhs: &Vector) -> Self::Output {
                    log::trace!("scalar * vector");
                    rhs.scale(self)
                }
            }

            impl Mul<Vector> for $t {
                type Output = Vector;
                #[inline]
                fn mul(self, rhs: Vector) -> Self::Output {
                    self * &rhs
                }
            }
        )*
    };
}

impl_scalar_mul_vector!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Neg for &Vector {
    type Output = Vector;
    #[inline]
    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

impl Neg for Vector {
    type Output = Vector;
    #[inline]
    fn neg(self) -> Self::Output {
        -&self
    }
}

#[cfg(test)]
fn v(numbers: &[f64]) -> Vector {
    Vector::new(numbers).unwrap()
}

#[cfg(test)]
fn random_vector(rng: &mut rand_pcg::Pcg32, dimension: usize) -> Vector {
    use rand::Rng;
    Vector::from_numbers((0..dimension).map(|_| rng.gen_range(-100.0f64..100.0))).unwrap()
}

#[test]
fn test_construction() {
    let a = Vector::from_numbers(vec![1, 2, 3]).unwrap();
    assert_eq!(a.numbers(), &[1.0, 2.0, 3.0]);

    let b = Vector::from_numbers([1.5f32, -2.0]).unwrap();
    assert_eq!(b.numbers(), &[1.5, -2.0]);

    let err = Vector::new(&[]).unwrap_err();
    assert!(matches!(err, VectorError::Empty));
    assert!(err.is_value_error());

    let err = Vector::from_numbers(Vec::<i32>::new()).unwrap_err();
    assert!(matches!(err, VectorError::Empty));

    assert!(Vector::try_from(vec![0.5]).is_ok());
    assert!(Vector::try_from(Vec::<f64>::new()).is_err());
}

#[test]
fn test_construction_matches_inputs() {
    use rand::{Rng, SeedableRng};
    let mut rng = rand_pcg::Pcg32::seed_from_u64(0x5eed);
    for _ in 0..100 {
        let len: usize = rng.gen_range(1..8);
        let ints: Vec<i64> = (0..len).map(|_| rng.gen_range(-1000..1000)).collect();
        let vector = Vector::from_numbers(ints.iter().copied()).unwrap();
        let expected: Vec<f64> = ints.iter().map(|&i| i as f64).collect();
        assert_eq!(vector.numbers(), &expected[..]);
    }
}

#[test]
fn test_from_json() {
    let a = Vector::from_json_str("[1, 2.5, -3]").unwrap();
    assert_eq!(a.numbers(), &[1.0, 2.5, -3.0]);

    let b = Vector::from_json_str("4").unwrap();
    assert_eq!(b.numbers(), &[4.0]);

    match Vector::from_json_str("[1, \"a\"]").unwrap_err() {
        VectorError::NotANumber { value, kind } => {
            assert_eq!(value, "\"a\"");
            assert_eq!(kind, "string");
        }
        err => panic!("unexpected error {:?}", err),
    }

    let err = Vector::from_json_str("[true]").unwrap_err();
    assert!(err.is_type_error());
    assert!(matches!(err, VectorError::NotANumber { kind: "bool", .. }));

    let err = Vector::from_json_str("[null, 1]").unwrap_err();
    assert!(matches!(err, VectorError::NotANumber { kind: "null", .. }));

    let err = Vector::from_json_str("[]").unwrap_err();
    assert!(matches!(err, VectorError::Empty));

    let err = Vector::from_json_str("[1,").unwrap_err();
    assert!(matches!(err, VectorError::Json(_)));
}

#[test]
fn test_serde() {
    let a = v(&[1.0, 2.0]);
    assert_eq!(serde_json::to_string(&a).unwrap(), "[1.0,2.0]");

    let b: Vector = serde_json::from_str("[3.0, 4.0]").unwrap();
    assert_eq!(b, v(&[3.0, 4.0]));

    assert!(serde_json::from_str::<Vector>("[]").is_err());
}

#[test]
fn test_add_sub() {
    let sum = (v(&[1.0, 2.0]) + v(&[3.0, 4.0])).unwrap();
    assert_eq!(sum.numbers(), &[4.0, 6.0]);

    let diff = (v(&[3.0, 4.0]) - v(&[1.0, 2.0])).unwrap();
    assert_eq!(diff.numbers(), &[2.0, 2.0]);

    let a = v(&[1.0, 2.0]);
    let b = v(&[1.0, 2.0, 3.0]);
    let err = (&a + &b).unwrap_err();
    assert!(err.is_type_error());
    assert!(matches!(
        err,
        VectorError::ShapeMismatch { left: 2, right: 3 }
    ));
    assert!((&b - &a).is_err());

    // operands are untouched
    assert_eq!(a.numbers(), &[1.0, 2.0]);
    assert_eq!(b.numbers(), &[1.0, 2.0, 3.0]);
}

#[test]
fn test_add_then_sub_round_trips() {
    use rand::{Rng, SeedableRng};
    let mut rng = rand_pcg::Pcg32::seed_from_u64(42);
    for _ in 0..100 {
        let dimension = rng.gen_range(1..10);
        let u = random_vector(&mut rng, dimension);
        let w = random_vector(&mut rng, dimension);
        let sum = (&u + &w).unwrap();
        let back = (&sum - &w).unwrap();
        assert!(back.abs_diff_eq(&u, 1e-9), "{:?} != {:?}", back, u);
    }
}

#[test]
fn test_scalar_mul() {
    assert_eq!((3i32 * v(&[1.0, 2.0])).numbers(), &[3.0, 6.0]);
    assert_eq!((3.0f64 * v(&[1.0, 2.0])).numbers(), &[3.0, 6.0]);
    let scaled: Vector = 3 * v(&[1.0, 2.0]);
    assert_eq!(scaled.numbers(), &[3.0, 6.0]);
    assert_eq!((v(&[1.0, 2.0]) * 3).numbers(), &[3.0, 6.0]);
    assert_eq!((v(&[1.0, -2.0]) * 0.5).numbers(), &[0.5, -1.0]);
    assert_eq!((2u8 * &v(&[1.5])).numbers(), &[3.0]);
    assert_eq!((-v(&[1.0, -2.0])).numbers(), &[-1.0, 2.0]);
}

#[test]
fn test_scalar_mul_commutes() {
    use rand::{Rng, SeedableRng};
    let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
    for _ in 0..100 {
        let dimension = rng.gen_range(1..10);
        let vector = random_vector(&mut rng, dimension);
        let s: f64 = rng.gen_range(-10.0..10.0);
        let left = s * &vector;
        let right = &vector * s;
        assert_eq!(left, right);
        for i in 0..dimension {
            assert_eq!(left[i], s * vector[i]);
        }
    }
}

#[test]
fn test_norm_and_dimension() {
    assert_eq!(v(&[3.0, 4.0]).norm(), 5.0);
    assert_eq!(v(&[3.0, 4.0]).magnitude(), 5.0);
    assert_eq!(v(&[-2.0]).norm(), 2.0);
    assert_eq!(Vector::from_numbers([1, 2, 3]).unwrap().dimension(), 3);
    assert_eq!(v(&[1.0, 2.0, 3.0]).len(), 3);

    assert_eq!(v(&[1.0, 2.0, 3.0]).try_dot(&v(&[4.0, 5.0, 6.0])).unwrap(), 32.0);
    assert!(v(&[1.0]).try_dot(&v(&[1.0, 2.0])).is_err());
}

#[test]
fn test_indexing_and_slicing() {
    let a = Vector::from_numbers([10, 20, 30]).unwrap();
    assert_eq!(a[1], 20.0);
    assert_eq!(&a[1..], &[20.0, 30.0]);
    assert_eq!(a.component_at(1).unwrap(), 20.0);

    let err = a.component_at(5).unwrap_err();
    assert!(err.is_value_error());
    assert!(matches!(
        err,
        VectorError::IndexOutOfRange {
            index: 5,
            dimension: 3
        }
    ));

    assert_eq!(a.slice(..2), &[10.0, 20.0]);
    assert_eq!(a.slice(1..=2), &[20.0, 30.0]);
    assert_eq!(a.slice(..), &[10.0, 20.0, 30.0]);
    assert!(a.slice(3..3).is_empty());

    // ranges past the end are clamped
    assert_eq!(a.slice(1..10), &[20.0, 30.0]);
    assert_eq!(a.slice(..=usize::MAX), &[10.0, 20.0, 30.0]);
    assert!(a.slice(5..).is_empty());
    #[allow(clippy::reversed_empty_ranges)]
    let reversed = a.slice(2..1);
    assert!(reversed.is_empty());
}

#[test]
fn test_shape_and_2d() {
    let a = v(&[1.0, 2.0]);
    let b = v(&[1.0, 2.0, 3.0]);
    assert!(a.validate_shape(&v(&[5.0, 6.0])).is_ok());
    assert!(a.validate_shape(&b).unwrap_err().is_type_error());

    assert!(Vector::is_2d(&a));
    assert!(!Vector::is_2d(&b));

    assert_eq!(a.as_vec2(), Some(Vec2::new(1.0, 2.0)));
    assert_eq!(b.as_vec2(), None);
}

#[test]
fn test_repr() {
    assert_eq!(format!("{:?}", v(&[1.0, 2.0])), "Vector(1.0, 2.0)");
    assert_eq!(format!("{:?}", v(&[5.0])), "Vector(5.0,)");
    assert_eq!(format!("{}", v(&[1.5, -2.0, 0.0])), "(1.5, -2.0, 0.0)");
    assert_eq!(
        Vec::<f64>::from(v(&[1.0, 2.0])),
        vec![1.0, 2.0]
    );
    assert_eq!((&v(&[1.0, 2.0])).into_iter().sum::<f64>(), 3.0);
}
