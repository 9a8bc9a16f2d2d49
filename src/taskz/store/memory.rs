use super::StringStore;
use crate::error::Result;
use std::collections::HashMap;

/// In-memory storage for testing and embedding.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    values: HashMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StringStore for InMemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::error::TaskzError;

    /// A store preloaded with a raw value, for exercising load paths.
    pub fn store_with(key: &str, value: &str) -> InMemoryStore {
        let mut store = InMemoryStore::new();
        store.write(key, value).unwrap();
        store
    }

    /// A store whose writes always fail, for exercising error propagation.
    #[derive(Default)]
    pub struct FailingStore;

    impl StringStore for FailingStore {
        fn read(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(TaskzError::Store("write refused".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
    }
}
