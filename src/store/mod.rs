//! Process-local record stores for keyword sessions and generated content.

pub mod ids;
pub mod memory;
pub mod records;

use async_trait::async_trait;

pub use ids::IdGenerator;
pub use memory::MemoryStore;
pub use records::{ContentRecord, SessionRecord};

/// Keyed record storage that remembers insertion order.
#[async_trait]
pub trait RecordStore<T>: Send + Sync
where
    T: Clone + Send + Sync + 'static,
{
    /// Insert or replace. A replaced record keeps its original position.
    async fn put(&self, id: String, record: T);

    async fn get(&self, id: &str) -> Option<T>;

    /// Apply `f` to the record under `id`. Returns false when the id is unknown.
    async fn update(&self, id: &str, f: Box<dyn for<'a> FnOnce(&'a mut T) + Send>) -> bool;

    /// The last `n` records in insertion order (oldest first).
    async fn recent(&self, n: usize) -> Vec<T>;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Mean of `metric` over all records, 0 when the store is empty.
    async fn average(&self, metric: for<'a> fn(&'a T) -> f64) -> f64;
}
