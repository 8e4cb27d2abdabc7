/// LTO Event Chain: Accounts
///
/// Pure data. An account is identified by its public sign key;
/// signing itself happens outside this crate.

use serde::{Deserialize, Serialize};

use crate::hashing::{sha256, to_hex};

/// An identity that can own chains and act in processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Public sign key, hex encoded.
    pub public_key: String,
}

impl Account {
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
        }
    }

    /// Address derived from the public key: first 20 bytes of
    /// SHA-256(SHA-256(public_key)), hex encoded.
    pub fn address(&self) -> String {
        let inner = sha256(self.public_key.as_bytes());
        to_hex(&sha256(&inner)[..20])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_is_stable_per_key() {
        let a = Account::new("key-a");
        assert_eq!(a.address(), Account::new("key-a").address());
        assert_ne!(a.address(), Account::new("key-b").address());
        assert_eq!(a.address().len(), 40);
    }
}
