//! Login token generation.

use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const TOKEN_LEN: usize = 48;

/// Generates a random login token.
///
/// # Format
///
/// - Length: 48 characters
/// - Character set: A-Z, a-z, 0-9
/// - Entropy: ~286 bits
pub fn generate_token() -> String {
    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
