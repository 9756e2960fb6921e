//! Short token generation.
//!
//! Tokens are [`TOKEN_LENGTH`] characters, each drawn independently and
//! uniformly from the 62-character [`ALPHABET`]. The generator uses the
//! thread-local ChaCha RNG from `rand`, so tokens are not predictable from
//! previously issued ones.

use rand::Rng;

/// Characters a token may contain.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of characters in every token.
pub const TOKEN_LENGTH: usize = 6;

/// Generates a random token of [`TOKEN_LENGTH`] alphabet characters.
pub fn generate_token() -> String {
    generate_token_with(&mut rand::rng())
}

/// Generates a token using the given RNG.
pub fn generate_token_with<R: Rng>(rng: &mut R) -> String {
    (0..TOKEN_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `token` has the exact shape of a generated token.
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_LENGTH && token.bytes().all(|b| ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    #[test]
    fn test_generate_token_has_correct_length() {
        assert_eq!(generate_token().len(), TOKEN_LENGTH);
    }

    #[test]
    fn test_generate_token_uses_alphabet_only() {
        for _ in 0..500 {
            let token = generate_token();
            assert!(is_well_formed(&token), "unexpected token {token:?}");
        }
    }

    #[test]
    fn test_alphabet_has_no_duplicates() {
        let mut seen = [false; 256];
        for &b in ALPHABET.iter() {
            assert!(!seen[b as usize], "duplicate {}", b as char);
            seen[b as usize] = true;
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = generate_token_with(&mut StdRng::seed_from_u64(7));
        let b = generate_token_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_distribution_covers_whole_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<char, usize> = HashMap::new();

        for _ in 0..5_000 {
            for c in generate_token_with(&mut rng).chars() {
                *counts.entry(c).or_default() += 1;
            }
        }

        // 30k samples over 62 symbols, ~484 expected per symbol.
        assert_eq!(counts.len(), ALPHABET.len());
        for (c, n) in counts {
            assert!((300..700).contains(&n), "{c} drawn {n} times");
        }
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("aZ09xY"));
        assert!(!is_well_formed("aZ09x"));
        assert!(!is_well_formed("aZ09xYz"));
        assert!(!is_well_formed("aZ-9xY"));
        assert!(!is_well_formed(""));
    }
}
