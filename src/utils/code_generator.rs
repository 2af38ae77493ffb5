//! Short code generation.
//!
//! Codes are drawn uniformly from a 62-symbol alphanumeric alphabet using the
//! thread-local CSPRNG (ChaCha, seeded from the operating system). The
//! generator does not check uniqueness; the durable store's unique index does,
//! and the create path retries on [`crate::AppError::DuplicateCode`].

use rand::Rng;

/// Symbols a short code may contain.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of generated short codes.
pub const CODE_LENGTH: usize = 6;

/// Generates a random short code of [`CODE_LENGTH`] characters.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    generate_code_with_length(CODE_LENGTH)
}

/// Generates a random short code of the given length.
pub fn generate_code_with_length(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
