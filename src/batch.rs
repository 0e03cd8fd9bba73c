use crate::constants::MAX_BATCH;
use crate::store::{DocumentStore, Mutation, WriteBatch};
use crate::AdminError;
use log::{debug, info};

/// Applies one mutation per key, committing in chunks of at most [`MAX_BATCH`]
/// writes. Chunks go out strictly one at a time; a rejected commit propagates
/// immediately, leaving earlier chunks applied (every caller is idempotent on
/// rerun, so that's fine). Returns how many writes were committed.
pub async fn apply_in_batches<S, F>(
    store: &S,
    collection: &str,
    keys: &[String],
    mutation_for: F,
) -> Result<usize, AdminError>
where
    S: DocumentStore + ?Sized,
    F: Fn(&str) -> Mutation,
{
    if keys.is_empty() {
        debug!("nothing to do for {collection}");
        return Ok(0);
    }
    let mut applied = 0;
    for chunk in keys.chunks(MAX_BATCH) {
        let mut batch = WriteBatch::new();
        for key in chunk {
            match mutation_for(key) {
                Mutation::Delete => batch.delete(collection, key),
                Mutation::Set(fields) => batch.set(collection, key, fields),
                Mutation::Update(fields) => batch.update(collection, key, fields),
            };
        }
        store.commit(batch).await?;
        applied += chunk.len();
        info!("{collection}: committed {applied}/{} writes", keys.len());
    }
    Ok(applied)
}

pub async fn delete_in_batches<S>(
    store: &S,
    collection: &str,
    keys: &[String],
) -> Result<usize, AdminError>
where
    S: DocumentStore + ?Sized,
{
    apply_in_batches(store, collection, keys, |_| Mutation::Delete).await
}
