use std::collections::HashMap;

/// Host-side entity store, addressed by (entity type, id). Values are
/// proto-encoded entity messages. Writes are last-write-wins per id; the
/// host serializes invocations so no locking happens here.
pub trait EntityStore {
    fn get(&self, entity: &str, id: &str) -> Option<Vec<u8>>;
    fn set(&mut self, entity: &str, id: &str, value: Vec<u8>);
    fn delete(&mut self, entity: &str, id: &str);
}

/// In-memory reference adapter, also the test double.
#[derive(Default)]
pub struct MemoryStore {
    rows: HashMap<(String, String), Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl EntityStore for MemoryStore {
    fn get(&self, entity: &str, id: &str) -> Option<Vec<u8>> {
        self.rows
            .get(&(entity.to_string(), id.to_string()))
            .cloned()
    }

    fn set(&mut self, entity: &str, id: &str, value: Vec<u8>) {
        self.rows.insert((entity.to_string(), id.to_string()), value);
    }

    fn delete(&mut self, entity: &str, id: &str) {
        self.rows.remove(&(entity.to_string(), id.to_string()));
    }
}
