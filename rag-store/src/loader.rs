//! Corpus loading: read one text file and cut it into indexed chunks.

use std::path::Path;

use tracing::{debug, info};

use crate::{errors::RagError, record::Document, splitter::RecursiveCharacterSplitter};

/// Reads `path` and splits it into [`Document`]s tagged with the path as source.
///
/// # Errors
/// `RagError::Io` if the file cannot be read, `RagError::EmptyCorpus` if it
/// yields no chunks.
pub async fn load_documents(
    path: impl AsRef<Path>,
    splitter: &RecursiveCharacterSplitter,
) -> Result<Vec<Document>, RagError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await?;
    debug!(path = %path.display(), chars = text.chars().count(), "corpus read");

    let docs = split_into_documents(&text, &path.display().to_string(), splitter);
    if docs.is_empty() {
        return Err(RagError::EmptyCorpus(path.display().to_string()));
    }

    info!(path = %path.display(), chunks = docs.len(), "corpus split");
    Ok(docs)
}

/// Splits raw text into numbered documents.
pub fn split_into_documents(
    text: &str,
    source: &str,
    splitter: &RecursiveCharacterSplitter,
) -> Vec<Document> {
    splitter
        .split_text(text)
        .into_iter()
        .enumerate()
        .map(|(chunk, text)| Document {
            text,
            source: source.to_string(),
            chunk,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let splitter = RecursiveCharacterSplitter::new(400, 40).unwrap();
        let err = load_documents("./definitely/not/here.txt", &splitter)
            .await
            .unwrap_err();
        assert!(matches!(err, RagError::Io(_)));
    }

    #[tokio::test]
    async fn blank_file_is_empty_corpus() {
        let path = std::env::temp_dir().join(format!("rag-store-blank-{}.txt", std::process::id()));
        tokio::fs::write(&path, "  \n\n  ").await.unwrap();
        let splitter = RecursiveCharacterSplitter::new(400, 40).unwrap();
        let err = load_documents(&path, &splitter).await.unwrap_err();
        let _ = tokio::fs::remove_file(&path).await;
        assert!(matches!(err, RagError::EmptyCorpus(_)));
    }

    #[test]
    fn documents_are_numbered_per_source() {
        let splitter = RecursiveCharacterSplitter::new(20, 2).unwrap();
        let docs = split_into_documents("alpha beta\n\ngamma delta", "faq.txt", &splitter);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].chunk, 1);
        assert_eq!(docs[1].text, "gamma delta");
        assert!(docs.iter().all(|d| d.source == "faq.txt"));
    }
}
