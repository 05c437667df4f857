/// Primitive numbers that can become vector components or scale a vector.
///
/// `bool` deliberately has no impl, so `Vector::from_numbers([true, false])`
/// does not compile.
pub trait Scalar: Copy {
    fn to_f64(self) -> f64;
}

macro_rules! impl_scalar {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

#[test]
fn test_scalar_to_f64() {
    assert_eq!(3i32.to_f64(), 3.0);
    assert_eq!(255u8.to_f64(), 255.0);
    assert_eq!((-7i64).to_f64(), -7.0);
    assert_eq!(0.5f32.to_f64(), 0.5);
    assert_eq!(2.25f64.to_f64(), 2.25);
}
