use crate::promise::Promise;
use async_trait::async_trait;

/// Read-only keyed lookup. Absence is `None`, never an error; callers must
/// check for it explicitly.
#[async_trait]
pub trait ReadOnlyDao<K: ?Sized + Sync, V>: Send + Sync {
    async fn get(&self, key: &K) -> Option<V>;
}

/// A promise authority: computes the delivery promise window for a single
/// order item. Both authorities share this contract, which makes them
/// interchangeable sources to the reconciliation layer.
pub trait PromiseSource: Send + Sync {
    /// Label identifying this authority in `Promise::provided_by`.
    fn provided_by(&self) -> &'static str;

    fn promise_for_item(&self, item_id: &str) -> Option<Promise>;
}
