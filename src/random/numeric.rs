use std::ops::{Add, Div, Mul, Sub};

use rand::distr::uniform::SampleUniform;
use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError};

mod sealed {
    pub trait Sealed {}
}

/// Primitive integer types accepted by the integral sampling operations.
///
/// Sealed: floating point types are rejected at compile time.
pub trait Integral: SampleUniform + Copy + PartialOrd + sealed::Sealed {
    const MIN: Self;
    const MAX: Self;
    const ZERO: Self;
    const ONE: Self;
    const HUNDRED: Self;
}

/// Primitive floating point types accepted by the floating sampling operations.
pub trait Floating:
    SampleUniform
    + Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + sealed::Sealed
{
    const ZERO: Self;
    const ONE: Self;

    /// Smallest representable value greater than `self`. `MAX` maps to
    /// itself.
    ///
    /// Used to turn a half-open `[low, high)` range into a closed one.
    fn next_representable(self) -> Self;

    /// Uniform over `[0, 1)`.
    fn unit<R: Rng + ?Sized>(rng: &mut R) -> Self;

    fn sqrt(self) -> Self;

    fn sample_normal<R: Rng + ?Sized>(rng: &mut R, mean: Self, stddev: Self) -> Result<Self, NormalError>;
}

macro_rules! impl_integral {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Integral for $t {
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const HUNDRED: Self = 100;
            }
        )*
    };
}

impl_integral!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize);

macro_rules! impl_floating {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Floating for $t {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;

                fn next_representable(self) -> Self {
                    if self.is_nan() || self >= <$t>::MAX {
                        return self;
                    }
                    if self == 0.0 {
                        // covers -0.0 as well
                        return <$t>::from_bits(1);
                    }
                    let bits = self.to_bits();
                    if self > 0.0 {
                        <$t>::from_bits(bits + 1)
                    } else {
                        <$t>::from_bits(bits - 1)
                    }
                }

                fn unit<R: Rng + ?Sized>(rng: &mut R) -> Self {
                    rng.random::<$t>()
                }

                fn sqrt(self) -> Self {
                    <$t>::sqrt(self)
                }

                fn sample_normal<R: Rng + ?Sized>(
                    rng: &mut R,
                    mean: Self,
                    stddev: Self,
                ) -> Result<Self, NormalError> {
                    Ok(Normal::new(mean, stddev)?.sample(rng))
                }
            }
        )*
    };
}

impl_floating!(f32, f64);
