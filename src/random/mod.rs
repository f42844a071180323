//! Range-correct sampling helpers parameterized over a generator binding.
//!
//! [`Random`] draws from a fast, entropy-seeded generator. [`ServerRandom`]
//! draws from a generator that has to be seeded with [`ServerTraits::seed`]
//! first. Both share the same operations through [`RandomBase`]; pass your own
//! generator with [`RandomBase::with`] to avoid the shared instance.

use std::marker::PhantomData;

pub use self::error::RandomError;
pub use self::generator::{FastTraits, GeneratorTraits, ServerTraits};
pub use self::numeric::{Floating, Integral};
pub use self::sampler::Sampler;

mod error;
mod generator;
mod numeric;
mod sampler;

pub type Random = RandomBase<FastTraits>;
pub type ServerRandom = RandomBase<ServerTraits>;

/// Sampling operations drawing from the shared generator of `G`.
///
/// See [`Sampler`] for the exact interval of each operation.
pub struct RandomBase<G>(PhantomData<G>);

impl<G: GeneratorTraits> RandomBase<G> {
    /// Samples from `generator` instead of the shared instance.
    pub fn with(generator: &mut G::Generator) -> Sampler<'_, G::Generator> {
        Sampler::new(generator)
    }

    fn sample<F, R>(f: F) -> R
    where
        F: FnOnce(&mut Sampler<'_, G::Generator>) -> R,
    {
        G::with_generator(|generator| f(&mut Sampler::new(generator)))
    }

    pub fn uniform<T: Integral>() -> T {
        Self::sample(|s| s.uniform())
    }

    pub fn uniform_to<T: Integral>(to: T) -> T {
        Self::sample(|s| s.uniform_to(to))
    }

    pub fn uniform_in<T: Integral>(from: T, to: T) -> T {
        Self::sample(|s| s.uniform_in(from, to))
    }

    pub fn probability<T: Integral>() -> T {
        Self::sample(|s| s.probability())
    }

    pub fn uniformf<T: Floating>() -> T {
        Self::sample(|s| s.uniformf())
    }

    pub fn uniformf_to<T: Floating>(to: T) -> T {
        Self::sample(|s| s.uniformf_to(to))
    }

    pub fn uniformf_in<T: Floating>(from: T, to: T) -> T {
        Self::sample(|s| s.uniformf_in(from, to))
    }

    pub fn probabilityf<T: Floating>() -> T {
        Self::sample(|s| s.probabilityf())
    }

    pub fn yes_no() -> bool {
        Self::sample(|s| s.yes_no())
    }

    pub fn normalf<T: Floating>(mean: T, stddev: T) -> T {
        Self::sample(|s| s.normalf(mean, stddev))
    }

    pub fn try_normalf<T: Floating>(mean: T, stddev: T) -> Result<T, RandomError> {
        Self::sample(|s| s.try_normalf(mean, stddev))
    }

    pub fn triangularf<T: Floating>(a: T, b: T, c: T) -> T {
        Self::sample(|s| s.triangularf(a, b, c))
    }

    pub fn uniform_from<C>(collection: C) -> C::Item
    where
        C: IntoIterator,
        C::IntoIter: ExactSizeIterator,
    {
        Self::try_uniform_from(collection).unwrap_or_else(|err| panic!("{err}"))
    }

    // Only the offset is drawn under the lock. Advancing the caller's
    // iterator may sample again.
    pub fn try_uniform_from<C>(collection: C) -> Result<C::Item, RandomError>
    where
        C: IntoIterator,
        C::IntoIter: ExactSizeIterator,
    {
        let iter = collection.into_iter();
        let len = iter.len();
        let offset = Self::sample(|s| s.uniform_offset(len))?;
        sampler::nth_item(iter, offset)
    }

    pub fn weighted_from<C>(weights: &[f32], collection: C) -> C::Item
    where
        C: IntoIterator,
        C::IntoIter: ExactSizeIterator,
    {
        Self::try_weighted_from(weights, collection).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_weighted_from<C>(weights: &[f32], collection: C) -> Result<C::Item, RandomError>
    where
        C: IntoIterator,
        C::IntoIter: ExactSizeIterator,
    {
        let iter = collection.into_iter();
        let offset = Self::sample(|s| s.weighted_offset(weights))?;
        sampler::nth_item(iter, offset)
    }

    pub fn shuffle<T>(items: &mut [T]) {
        Self::sample(|s| s.shuffle(items))
    }
}
