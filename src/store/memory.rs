use super::RecordStore;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Inner<T> {
    order: Vec<String>,
    records: HashMap<String, T>,
}

/// In-memory [`RecordStore`]; contents are lost when the process exits.
#[derive(Debug)]
pub struct MemoryStore<T> {
    inner: RwLock<Inner<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                order: Vec::new(),
                records: HashMap::new(),
            }),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> RecordStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn put(&self, id: String, record: T) {
        let mut inner = self.inner.write().await;
        if inner.records.insert(id.clone(), record).is_none() {
            inner.order.push(id);
        }
    }

    async fn get(&self, id: &str) -> Option<T> {
        self.inner.read().await.records.get(id).cloned()
    }

    async fn update(&self, id: &str, f: Box<dyn for<'a> FnOnce(&'a mut T) + Send>) -> bool {
        let mut inner = self.inner.write().await;
        match inner.records.get_mut(id) {
            Some(record) => {
                f(record);
                true
            }
            None => false,
        }
    }

    async fn recent(&self, n: usize) -> Vec<T> {
        let inner = self.inner.read().await;
        let start = inner.order.len().saturating_sub(n);
        inner.order[start..]
            .iter()
            .filter_map(|id| inner.records.get(id).cloned())
            .collect()
    }

    async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    async fn average(&self, metric: for<'a> fn(&'a T) -> f64) -> f64 {
        let inner = self.inner.read().await;
        if inner.records.is_empty() {
            return 0.0;
        }
        let total: f64 = inner.records.values().map(metric).sum();
        total / inner.records.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_and_len() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        store.put("a".to_string(), 1u32).await;
        store.put("b".to_string(), 2u32).await;

        assert_eq!(store.get("a").await, Some(1));
        assert_eq!(store.get("missing").await, None);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_recent_keeps_insertion_order() {
        let store = MemoryStore::new();
        for i in 0..7u32 {
            store.put(format!("id_{i}"), i).await;
        }

        assert_eq!(store.recent(5).await, vec![2, 3, 4, 5, 6]);
        assert_eq!(store.recent(100).await.len(), 7);
        assert!(store.recent(0).await.is_empty());
    }

    #[tokio::test]
    async fn test_replace_keeps_position() {
        let store = MemoryStore::new();
        store.put("a".to_string(), 1u32).await;
        store.put("b".to_string(), 2u32).await;
        store.put("a".to_string(), 10u32).await;

        assert_eq!(store.len().await, 2);
        assert_eq!(store.recent(5).await, vec![10, 2]);
    }

    #[tokio::test]
    async fn test_update() {
        let store = MemoryStore::new();
        store.put("a".to_string(), vec!["x".to_string()]).await;

        let updated = store
            .update("a", Box::new(|v: &mut Vec<String>| v.push("y".to_string())))
            .await;
        assert!(updated);
        assert_eq!(store.get("a").await.unwrap(), vec!["x", "y"]);

        assert!(!store.update("nope", Box::new(|v: &mut Vec<String>| v.clear())).await);
    }

    #[tokio::test]
    async fn test_average() {
        let store: MemoryStore<u8> = MemoryStore::new();
        assert_eq!(store.average(|v| *v as f64).await, 0.0);

        store.put("a".to_string(), 55).await;
        store.put("b".to_string(), 60).await;
        store.put("c".to_string(), 70).await;
        let avg = store.average(|v| *v as f64).await;
        assert!((avg - 61.666_666).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_update_and_average_through_trait_object() {
        use std::sync::Arc;

        let store: Arc<dyn RecordStore<(String, u8)>> = Arc::new(MemoryStore::new());
        store.put("a".to_string(), ("draft".to_string(), 40)).await;
        store.put("b".to_string(), ("final".to_string(), 61)).await;

        let suffix = String::from(" (edited)");
        let updated = store
            .update(
                "a",
                Box::new(move |record: &mut (String, u8)| {
                    record.0.push_str(&suffix);
                    record.1 = 45;
                }),
            )
            .await;
        assert!(updated);
        assert_eq!(
            store.get("a").await,
            Some(("draft (edited)".to_string(), 45))
        );

        fn score(record: &(String, u8)) -> f64 {
            f64::from(record.1)
        }
        assert_eq!(store.average(score).await, 53.0);
    }
}
