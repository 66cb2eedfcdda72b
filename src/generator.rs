//! Random keys for seeding a [`Tree`][crate::owned::Tree].
//!
//! # Examples
//!
//! ```
//! use bst::generator::random_keys;
//! use bst::owned::Tree;
//!
//! let keys = random_keys(15, 100).unwrap();
//! assert_eq!(keys.len(), 15);
//! assert!(keys.iter().all(|&k| k < 100));
//!
//! // Duplicates are fine, the tree drops them.
//! let tree = Tree::from_values(keys);
//! assert!(tree.len() <= 15);
//! ```

use rand::Rng;

/// Errors that can occur while generating keys.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// Keys are drawn from `[0, max)` so `max` must be positive.
    #[error("Cannot draw keys from the empty range [0, 0).")]
    EmptyRange,
}

/// Draws `size` keys uniformly from `[0, max)` using the thread-local RNG. The keys may repeat.
pub fn random_keys(size: usize, max: u32) -> Result<Vec<u32>, GeneratorError> {
    random_keys_with(&mut rand::thread_rng(), size, max)
}

/// Like [`random_keys`] but draws from the given RNG, so a seeded RNG gives reproducible keys.
pub fn random_keys_with<R>(rng: &mut R, size: usize, max: u32) -> Result<Vec<u32>, GeneratorError>
where
    R: Rng + ?Sized,
{
    if max == 0 {
        return Err(GeneratorError::EmptyRange);
    }

    let keys = (0..size).map(|_| rng.gen_range(0..max)).collect();
    log::trace!("generated {} keys below {}", size, max);
    Ok(keys)
}
