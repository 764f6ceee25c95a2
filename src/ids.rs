//! Injectable transaction identifier sources

use uuid::Uuid;

/// Source of transaction identifiers
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Monotonic counter ids, e.g. `TXN-000001`
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Start counting at 1
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    pub fn starting_at(prefix: impl Into<String>, first: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: first,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("TXN")
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{:06}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Random v4 UUID ids, e.g. `TXN-6f1c...`
#[derive(Debug, Clone)]
pub struct UuidIds {
    prefix: String,
}

impl UuidIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for UuidIds {
    fn default() -> Self {
        Self::new("TXN")
    }
}

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        format!("{}-{}", self.prefix, Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::default();
        assert_eq!(ids.next_id(), "TXN-000001");
        assert_eq!(ids.next_id(), "TXN-000002");

        let mut ids = SequentialIds::starting_at("DEMO", 42);
        assert_eq!(ids.next_id(), "DEMO-000042");
    }

    #[test]
    fn test_uuid_ids_are_unique() {
        let mut ids = UuidIds::default();
        let first = ids.next_id();
        let second = ids.next_id();

        assert!(first.starts_with("TXN-"));
        assert_ne!(first, second);
    }
}
