use typed_builder::TypedBuilder;

/// Tunables for a [`Coordinator`](crate::Coordinator).
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct CoordinatorConfig {
    /// Write durable hits back into the cache on lookup.
    ///
    /// A failed backfill is logged and does not fail the lookup.
    #[builder(default)]
    pub backfill_cache: bool,
}
