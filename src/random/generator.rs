use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info};
use once_cell::sync::Lazy;
use rand::{RngCore, SeedableRng};
use rand_mt::{Mt, Mt64};

use super::error::RandomError;

/// Binds a bit generator type to its process-wide shared instance.
pub trait GeneratorTraits {
    type Generator: RngCore;

    /// Runs `f` with exclusive access to the shared generator instance.
    ///
    /// The instance is created on first access and lives until the process
    /// exits. Calls from other threads block until `f` returns.
    fn with_generator<F, R>(f: F) -> R
    where
        F: FnOnce(&mut Self::Generator) -> R;
}

/// 32-bit Mersenne Twister seeded from operating system entropy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastTraits;

static FAST_GENERATOR: Lazy<Mutex<Mt>> = Lazy::new(|| {
    debug!("seeding fast random generator from os entropy");
    Mutex::new(Mt::from_os_rng())
});

impl GeneratorTraits for FastTraits {
    type Generator = Mt;

    fn with_generator<F, R>(f: F) -> R
    where
        F: FnOnce(&mut Self::Generator) -> R,
    {
        let mut generator = lock(&FAST_GENERATOR);
        f(&mut generator)
    }
}

/// 64-bit Mersenne Twister that must be seeded explicitly with
/// [`ServerTraits::seed`] before use.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerTraits;

static SERVER_GENERATOR: Mutex<Option<Mt64>> = Mutex::new(None);

impl ServerTraits {
    /// Installs the server generator, replacing any previous one.
    pub fn seed(seed: u64) {
        info!("installing server random seed {seed}");
        *lock(&SERVER_GENERATOR) = Some(Mt64::new(seed));
    }

    /// Whether [`ServerTraits::seed`] has installed a generator yet.
    pub fn is_seeded() -> bool {
        lock(&SERVER_GENERATOR).is_some()
    }

    /// Like [`GeneratorTraits::with_generator`] but reports a missing seed
    /// instead of panicking.
    pub fn try_with_generator<F, R>(f: F) -> Result<R, RandomError>
    where
        F: FnOnce(&mut Mt64) -> R,
    {
        let mut slot = lock(&SERVER_GENERATOR);
        let generator = slot.as_mut().ok_or(RandomError::ServerUnseeded)?;
        Ok(f(generator))
    }
}

impl GeneratorTraits for ServerTraits {
    type Generator = Mt64;

    /// # Panics
    ///
    /// Panics unless [`ServerTraits::seed`] has been called. Server randomness
    /// is never auto-seeded.
    fn with_generator<F, R>(f: F) -> R
    where
        F: FnOnce(&mut Self::Generator) -> R,
    {
        Self::try_with_generator(f).unwrap_or_else(|err| panic!("{err}"))
    }
}

// A panic while sampling leaves the generator in a valid state, so a
// poisoned lock is still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use rand::Rng;

    use super::*;

    #[test]
    fn test_fast_generator_is_shared() {
        let first = FastTraits::with_generator(|g| g.next_u32());
        let second = FastTraits::with_generator(|g| g.next_u32());
        // consecutive draws advance the same instance
        assert_ne!(first, second);
    }

    #[test]
    fn test_fast_generator_from_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    (0..100)
                        .map(|_| FastTraits::with_generator(|g| g.random_range(0..10u32)))
                        .sum::<u32>()
                })
            })
            .collect();

        for handle in handles {
            let total = handle.join().expect("sampling thread panicked");
            assert!(total <= 900);
        }
    }

    #[test]
    fn test_fast_generator_survives_poisoning() {
        let result = std::panic::catch_unwind(|| {
            FastTraits::with_generator(|_| panic!("boom"));
        });
        assert!(result.is_err());

        let value = FastTraits::with_generator(|g| g.random_range(1..=6u8));
        assert!((1..=6).contains(&value));
    }

    // The server slot is process-wide, so its whole lifecycle lives in one
    // test to keep the ordering deterministic.
    #[test]
    fn test_server_generator_lifecycle() {
        static CALLED: AtomicBool = AtomicBool::new(false);

        assert!(!ServerTraits::is_seeded());
        assert_eq!(
            ServerTraits::try_with_generator(|_| CALLED.store(true, Ordering::SeqCst)),
            Err(RandomError::ServerUnseeded)
        );
        assert!(!CALLED.load(Ordering::SeqCst));

        let unseeded = std::panic::catch_unwind(|| ServerTraits::with_generator(|g| g.next_u64()));
        assert!(unseeded.is_err());

        ServerTraits::seed(42);
        assert!(ServerTraits::is_seeded());
        let first: Vec<u64> = (0..8)
            .map(|_| ServerTraits::with_generator(|g| g.next_u64()))
            .collect();

        ServerTraits::seed(42);
        let second: Vec<u64> = (0..8)
            .map(|_| ServerTraits::with_generator(|g| g.next_u64()))
            .collect();
        assert_eq!(first, second);

        let mut reference = Mt64::new(42);
        assert_eq!(first[0], reference.next_u64());
    }
}
