use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Salted one-way digest used for both passwords and session tokens:
/// lowercase hex of SHA-256 over `salt:input`. Login looks users up by this
/// digest directly, so it must stay deterministic.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{salt}:{password}").as_bytes());
    hex::encode(hasher.finalize())
}

/// Mints a session token by pushing a short random alphanumeric seed through
/// the same salted digest. The seed source is not a dedicated CSPRNG; the
/// scheme is kept compatible with existing session fixtures.
pub fn new_session_token(salt: &str) -> String {
    let seed: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect();
    hash_password(salt, &seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_known_vector() {
        // sha256("pepper:hunter2")
        assert_eq!(
            hash_password("pepper", "hunter2"),
            "9233be6f17d2a39b72bc27cc9bc736cedce055fadb20c811b3c1142c9f8d7f1d"
        );
    }

    #[test]
    fn digest_is_deterministic_and_salt_sensitive() {
        assert_eq!(hash_password("s", "pw"), hash_password("s", "pw"));
        assert_ne!(hash_password("s1", "pw"), hash_password("s2", "pw"));
    }

    #[test]
    fn tokens_are_hex_digests_and_unique() {
        let a = new_session_token("salt");
        let b = new_session_token("salt");
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
