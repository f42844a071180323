//! Random number utilities: uniform integer and float sampling with explicit
//! interval semantics, percentage draws, normal and triangular distributions,
//! uniform and weighted selection, and shuffling.
//!
//! ```
//! use randkit::Random;
//!
//! let die = Random::uniform_in(1u8, 6);
//! assert!((1..=6).contains(&die));
//!
//! let unit: f64 = Random::uniformf();
//! assert!(unit > 0.0 && unit <= 1.0);
//! ```

pub mod config;
pub mod random;

pub use config::RandomConfig;
pub use random::{
    FastTraits, Floating, GeneratorTraits, Integral, Random, RandomBase, RandomError, Sampler,
    ServerRandom, ServerTraits,
};
