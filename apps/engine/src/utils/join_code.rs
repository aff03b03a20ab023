//! Join code generation for sessions.
//!
//! Codes are 6-character uppercase alphanumeric strings that players type
//! in by hand, so ambiguous characters are excluded (Crockford's Base32
//! alphabet: no I, L, O, U).

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U

pub const CODE_LEN: usize = 6;

/// Attempts before collision checking gives up. At realistic session counts
/// a collision is astronomically unlikely, but the bound keeps exhaustion a
/// handled failure rather than a spin.
pub const MAX_CODE_ATTEMPTS: usize = 10;

/// Generate one candidate join code. Uniqueness against the live-code set
/// is the registry's job.
pub fn generate_join_code() -> String {
    let mut rng = rand::rng();
    let mut s = String::with_capacity(CODE_LEN);
    for _ in 0..CODE_LEN {
        let idx = rng.random_range(0..CROCKFORD.len());
        s.push(CROCKFORD[idx] as char);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_have_correct_length_and_alphabet() {
        for _ in 0..100 {
            let code = generate_join_code();
            assert_eq!(code.len(), CODE_LEN);
            assert!(code.bytes().all(|b| CROCKFORD.contains(&b)));
        }
    }

    #[test]
    fn consecutive_codes_differ() {
        let a = generate_join_code();
        let b = generate_join_code();
        assert_ne!(a, b);
    }
}
