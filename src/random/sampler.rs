use std::cmp::Ordering;

use rand::distr::weighted::WeightedIndex;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::NormalError;

use super::error::RandomError;
use super::numeric::{Floating, Integral};

/// Sampling operations over an explicitly supplied generator.
///
/// Every operation advances the wrapped generator; nothing else is touched.
/// [`RandomBase`](super::RandomBase) forwards to this type after locking the
/// shared instance of its generator traits.
pub struct Sampler<'a, R: ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Sampler<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Sampler { rng }
    }

    /// Uniform over the whole representable range of `T`.
    pub fn uniform<T: Integral>(&mut self) -> T {
        self.rng.random_range(T::MIN..=T::MAX)
    }

    /// Uniform over the closed interval `[0, to]`.
    pub fn uniform_to<T: Integral>(&mut self, to: T) -> T {
        self.uniform_in(T::ZERO, to)
    }

    /// Uniform over the closed interval `[from, to]`.
    ///
    /// # Panics
    ///
    /// Panics if `from > to`.
    pub fn uniform_in<T: Integral>(&mut self, from: T, to: T) -> T {
        self.rng.random_range(from..=to)
    }

    /// Uniform over `[0, 100]`, for percentage checks.
    pub fn probability<T: Integral>(&mut self) -> T {
        self.uniform_in(T::ZERO, T::HUNDRED)
    }

    /// Uniform over `(0, 1]`: zero is never returned, one is.
    pub fn uniformf<T: Floating>(&mut self) -> T {
        T::ONE - T::unit(&mut *self.rng)
    }

    /// Uniform over the closed interval `[0, to]`.
    ///
    /// # Panics
    ///
    /// Panics if `to` is negative.
    pub fn uniformf_to<T: Floating>(&mut self, to: T) -> T {
        self.half_open(T::ZERO, to.next_representable())
    }

    /// Uniform over the half-open interval `[from, to)`.
    ///
    /// Unlike [`uniformf_to`](Self::uniformf_to) the upper bound is not
    /// reachable.
    ///
    /// # Panics
    ///
    /// Panics if `from >= to`.
    pub fn uniformf_in<T: Floating>(&mut self, from: T, to: T) -> T {
        self.half_open(from, to)
    }

    /// Uniform over the closed interval `[0, 1]`.
    pub fn probabilityf<T: Floating>(&mut self) -> T {
        self.half_open(T::ZERO, T::ONE.next_representable())
    }

    pub fn yes_no(&mut self) -> bool {
        self.uniform_in(0i32, 1) == 1
    }

    pub fn try_normalf<T: Floating>(&mut self, mean: T, stddev: T) -> Result<T, RandomError> {
        // rand_distr only rejects a non-finite deviation
        if matches!(stddev.partial_cmp(&T::ZERO), None | Some(Ordering::Less)) {
            return Err(RandomError::InvalidNormal(NormalError::BadVariance));
        }
        Ok(T::sample_normal(&mut *self.rng, mean, stddev)?)
    }

    /// Normal distribution with the given mean and standard deviation.
    ///
    /// # Panics
    ///
    /// Panics if `stddev` is negative or not finite.
    pub fn normalf<T: Floating>(&mut self, mean: T, stddev: T) -> T {
        self.try_normalf(mean, stddev)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Triangular distribution on `[a, b]` with mode `c`, where `a <= c <= b`.
    pub fn triangularf<T: Floating>(&mut self, a: T, b: T, c: T) -> T {
        // inverse of the triangular CDF
        let u: T = self.uniformf();
        let f = (c - a) / (b - a);

        if u < f {
            a + (u * (b - a) * (c - a)).sqrt()
        } else {
            b - ((T::ONE - u) * (b - a) * (b - c)).sqrt()
        }
    }

    /// Picks one element of `collection` with equal probability.
    ///
    /// The element is returned as the collection's iterator yields it: a
    /// borrowed collection gives a reference, an owned one gives the value.
    pub fn try_uniform_from<C>(&mut self, collection: C) -> Result<C::Item, RandomError>
    where
        C: IntoIterator,
        C::IntoIter: ExactSizeIterator,
    {
        let iter = collection.into_iter();
        let offset = self.uniform_offset(iter.len())?;
        nth_item(iter, offset)
    }

    /// # Panics
    ///
    /// Panics if `collection` is empty.
    pub fn uniform_from<C>(&mut self, collection: C) -> C::Item
    where
        C: IntoIterator,
        C::IntoIter: ExactSizeIterator,
    {
        self.try_uniform_from(collection)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Picks one element of `collection` with probability proportional to the
    /// weight at the same position in `weights`.
    pub fn try_weighted_from<C>(&mut self, weights: &[f32], collection: C) -> Result<C::Item, RandomError>
    where
        C: IntoIterator,
        C::IntoIter: ExactSizeIterator,
    {
        let offset = self.weighted_offset(weights)?;
        nth_item(collection.into_iter(), offset)
    }

    /// # Panics
    ///
    /// Panics if the weights are invalid (empty, negative, all zero) or select
    /// a position past the end of `collection`.
    pub fn weighted_from<C>(&mut self, weights: &[f32], collection: C) -> C::Item
    where
        C: IntoIterator,
        C::IntoIter: ExactSizeIterator,
    {
        self.try_weighted_from(weights, collection)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Fisher-Yates shuffle of `items` in place. Shuffle a sub-range by
    /// passing a sub-slice.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut *self.rng);
    }

    /// Position drawn for [`try_uniform_from`](Self::try_uniform_from) on a
    /// collection of `len` elements.
    pub(super) fn uniform_offset(&mut self, len: usize) -> Result<usize, RandomError> {
        if len == 0 {
            return Err(RandomError::EmptyCollection);
        }
        Ok(self.uniform_to(len - 1))
    }

    pub(super) fn weighted_offset(&mut self, weights: &[f32]) -> Result<usize, RandomError> {
        let distribution = WeightedIndex::new(weights)?;
        Ok(self.rng.sample(&distribution))
    }

    fn half_open<T: Floating>(&mut self, low: T, high: T) -> T {
        // rounding in the scaled draw can land exactly on `high`
        loop {
            let value = self.rng.random_range(low..high);
            if value < high {
                return value;
            }
        }
    }
}

/// Advances `iter` to `offset`. Runs caller code, so it must not be called
/// while a shared generator is locked.
pub(super) fn nth_item<I: ExactSizeIterator>(mut iter: I, offset: usize) -> Result<I::Item, RandomError> {
    let len = iter.len();
    iter.nth(offset)
        .ok_or(RandomError::OffsetOutOfRange { offset, len })
}
