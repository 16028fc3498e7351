//! Batched embedding executor with bounded concurrency and dimension checks.

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::{embed::EmbeddingsProvider, errors::RagError};

/// Embeds `texts` in batches of `batch_size`, running at most `concurrency`
/// requests at once. Output order matches input order.
///
/// # Errors
/// Propagates provider errors; [`RagError::VectorSizeMismatch`] if a batch
/// returns the wrong count or vectors disagree on dimension.
pub async fn embed_all(
    texts: &[String],
    provider: &dyn EmbeddingsProvider,
    batch_size: usize,
    concurrency: usize,
) -> Result<Vec<Vec<f32>>, RagError> {
    let batch_size = batch_size.max(1);
    info!(
        total = texts.len(),
        batch_size,
        concurrency,
        "embed_pool::embed_all"
    );

    let mut batches: Vec<(usize, Vec<Vec<f32>>)> = stream::iter(texts.chunks(batch_size).enumerate())
        .map(|(i, batch)| async move {
            let vecs = provider.embed_documents(batch).await?;
            if vecs.len() != batch.len() {
                return Err(RagError::VectorSizeMismatch {
                    got: vecs.len(),
                    want: batch.len(),
                });
            }
            debug!(batch = i, size = batch.len(), "batch embedded");
            Ok::<_, RagError>((i, vecs))
        })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>, RagError>>()?;

    batches.sort_by_key(|(i, _)| *i);
    let vectors: Vec<Vec<f32>> = batches.into_iter().flat_map(|(_, v)| v).collect();

    if let Some(want) = vectors.first().map(Vec::len) {
        if let Some(bad) = vectors.iter().find(|v| v.len() != want) {
            return Err(RagError::VectorSizeMismatch {
                got: bad.len(),
                want,
            });
        }
    }

    Ok(vectors)
}
