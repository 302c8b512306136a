// File: promobot-core/src/utils/codegen.rs

use std::collections::HashSet;

use rand::Rng;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LETTERS_AND_DIGITS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a single promo code: an uppercase letter followed by uppercase
/// letters and digits. The first character is never a digit.
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();
    let mut code = String::with_capacity(length);
    code.push(LETTERS[rng.random_range(0..LETTERS.len())] as char);
    for _ in 1..length {
        code.push(LETTERS_AND_DIGITS[rng.random_range(0..LETTERS_AND_DIGITS.len())] as char);
    }
    code
}

/// Generate `count` distinct codes. Collisions are regenerated rather than
/// treated as errors; at the default length of 8 over a 36-symbol alphabet
/// the collision probability is so small that the loop terminates without a
/// retry cap (a cap could legitimately fail for very large batches).
pub fn generate_codes(count: usize, length: usize) -> HashSet<String> {
    let mut codes = HashSet::with_capacity(count);
    while codes.len() < count {
        codes.insert(generate_code(length));
    }
    codes
}
