//! Primality oracle
//!
//! Naive trial division up to the integer square root. The function is pure and
//! carries no state, so any number of workers may call it concurrently without
//! synchronization.
//!
//! # Example
//!
//! ```
//! use primepulse::oracle::is_prime;
//!
//! assert!(is_prime(97));
//! assert!(!is_prime(49));
//! ```

/// Decide whether `n` is prime
///
/// Returns `false` for `n <= 1`, `false` if any `i` in `[2, floor(sqrt(n))]`
/// divides `n`, and `true` otherwise.
///
/// The loop bound is `i <= n / i`, which is `i * i <= n` without the
/// multiplication overflowing for `n` close to `u64::MAX`. No floating-point
/// square root is involved, so perfect squares are always caught.
#[inline]
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }

    let mut i = 2u64;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }

    true
}
