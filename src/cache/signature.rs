// ABOUTME: Order-independent identity for a set of local variable names
// ABOUTME: Rendered as identifier-safe hex so it can suffix installed artifact names

use sha2::{Digest, Sha256};
use std::fmt;

/// Cache key derived from a locals name set, independent of value or supply order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalsSignature(String);

impl LocalsSignature {
    /// Digest a set of names; duplicates and ordering do not affect the result
    pub fn of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sorted: Vec<String> = names
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        sorted.sort();
        sorted.dedup();

        let mut hasher = Sha256::new();
        for name in &sorted {
            hasher.update(name.as_bytes());
            // Separator byte keeps ["ab"] distinct from ["a", "b"]
            hasher.update([0u8]);
        }
        let digest = hasher.finalize();

        let mut hex = String::with_capacity(16);
        for byte in &digest[..8] {
            hex.push_str(&format!("{byte:02x}"));
        }
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocalsSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
