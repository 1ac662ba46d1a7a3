use sha2::{Digest, Sha256};

/// Derive a stable identifier for a sub-entity the store has no id for
/// (an author name, an image URL).
pub fn digest(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}
