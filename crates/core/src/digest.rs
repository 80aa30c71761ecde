//! Stable-digest helper used by watchers to detect item changes without
//! byte-comparing raw payloads.

use sha2::{Digest, Sha256};

/// Hash of a summary-equivalent tuple: join fields with a separator byte
/// that cannot appear inside any individual field value (`\u{1f}`, unit
/// separator), so `hash(("a", "bc")) != hash(("ab", "c"))`.
pub fn stable_digest<'a, I: IntoIterator<Item = &'a str>>(fields: I) -> String {
    let mut hasher = Sha256::new();
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            hasher.update([0x1f]);
        }
        hasher.update(field.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
#[path = "digest_tests.rs"]
mod tests;
