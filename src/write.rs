//! Entry writer.
//!
//! Inserts or replaces the entry at a path. Input is validated before the
//! archive is touched, including whether the result could still be
//! serialized, so a failed write leaves it unchanged. No parent
//! directory entries are created: `a/b/c.txt` adds exactly one entry.

use serde::Serialize;

use crate::archive::Archive;
use crate::document::{Document, Encoding};
use crate::error::{Error, Result};
use crate::zip::StoredEntry;

impl Archive {
    /// Write `document` at `path`.
    ///
    /// Bytes are stored verbatim. Text needs an `encoding`; both
    /// [`Encoding::Utf8`] and [`Encoding::Binary`] store it as UTF-8.
    /// Bytes written with [`Encoding::Utf8`] must already be valid UTF-8.
    pub async fn write(
        &mut self,
        path: &str,
        document: impl Into<Document>,
        encoding: Option<Encoding>,
    ) -> Result<()> {
        tracing::trace!(method = "write", path, ?encoding, "called");

        if path.is_empty() {
            return Err(Error::InvalidArgument("entry path is empty".into()));
        }
        let content = encode(document.into(), encoding)?;
        let entry = StoredEntry::compress(path, &content, self.options().compression)?;
        self.zip().check_capacity(&entry)?;

        self.zip_mut().set(entry);
        Ok(())
    }

    /// Write raw bytes; text is stored as its UTF-8 bytes.
    pub async fn write_buffer(&mut self, path: &str, document: impl Into<Document>) -> Result<()> {
        self.write(path, document, Some(Encoding::Binary)).await
    }

    /// Write UTF-8 text.
    pub async fn write_utf8(&mut self, path: &str, document: impl Into<Document>) -> Result<()> {
        self.write(path, document, Some(Encoding::Utf8)).await
    }

    /// Serialize `value` as indented JSON and write it as UTF-8 text.
    pub async fn write_json<T>(&mut self, path: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let text = serde_json::to_string_pretty(value).map_err(Error::Serialization)?;
        self.write_utf8(path, text).await
    }
}

fn encode(document: Document, encoding: Option<Encoding>) -> Result<Vec<u8>> {
    match (document, encoding) {
        (Document::Binary(bytes), Some(Encoding::Utf8)) => match String::from_utf8(bytes) {
            Ok(text) => Ok(text.into_bytes()),
            Err(e) => Err(Error::InvalidArgument(format!(
                "document is not valid UTF-8: {}",
                e.utf8_error()
            ))),
        },
        (Document::Binary(bytes), _) => Ok(bytes),
        (Document::Text(text), Some(_)) => Ok(text.into_bytes()),
        (Document::Text(_), None) => Err(Error::InvalidArgument(
            "a text document needs a document encoding".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn text_without_encoding_is_rejected() {
        let mut archive = Archive::new();
        let err = archive.write("a.txt", "hello", None).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(archive.is_empty());
    }

    #[tokio::test]
    async fn bytes_need_no_encoding() {
        let mut archive = Archive::new();
        archive.write("a.bin", vec![0u8, 159, 146, 150], None).await.unwrap();
        let read = archive.read_buffer("a.bin", None).await.unwrap();
        assert_eq!(read.document, vec![0u8, 159, 146, 150]);
    }

    #[tokio::test]
    async fn utf8_write_of_invalid_bytes_fails_cleanly() {
        let mut archive = Archive::new();
        archive.write_utf8("a.txt", "original").await.unwrap();

        let err = archive
            .write_utf8("a.txt", vec![0xFFu8, 0xFE])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(
            archive.read_utf8("a.txt", None).await.unwrap().document,
            "original"
        );
    }

    #[tokio::test]
    async fn buffer_write_of_text_stores_utf8() {
        let mut archive = Archive::new();
        archive.write_buffer("a.txt", "héllo").await.unwrap();
        let read = archive.read_buffer("a.txt", None).await.unwrap();
        assert_eq!(read.document, "héllo".as_bytes());
    }

    #[tokio::test]
    async fn second_write_replaces() {
        let mut archive = Archive::new();
        archive.write_utf8("a.txt", "one").await.unwrap();
        archive.write_utf8("b.txt", "two").await.unwrap();
        archive.write_utf8("a.txt", "three").await.unwrap();

        assert_eq!(archive.list(), vec!["a.txt", "b.txt"]);
        assert_eq!(
            archive.read_utf8("a.txt", None).await.unwrap().document,
            "three"
        );
    }

    #[tokio::test]
    async fn nested_path_adds_no_folders() {
        let mut archive = Archive::new();
        archive
            .write_utf8("contents/deep/a.txt", "x")
            .await
            .unwrap();
        assert_eq!(archive.list(), vec!["contents/deep/a.txt"]);
    }

    #[tokio::test]
    async fn empty_path_is_rejected() {
        let mut archive = Archive::new();
        let err = archive.write_buffer("", vec![1u8]).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn name_too_long_to_serialize_is_rejected() {
        let mut archive = Archive::new();
        archive.write_utf8("keep.txt", "kept").await.unwrap();

        let err = archive
            .write_utf8(&"a".repeat(70_000), "x")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(archive.list(), vec!["keep.txt"]);
        assert!(archive.generate().await.is_ok());
    }

    #[tokio::test]
    async fn write_json_is_indented() {
        let mut archive = Archive::new();
        archive
            .write_json("a.json", &json!({ "k": 1 }))
            .await
            .unwrap();
        let text = archive.read_utf8("a.json", None).await.unwrap().document;
        assert_eq!(text, "{\n  \"k\": 1\n}");
    }

    #[tokio::test]
    async fn write_json_round_trips() {
        let mut archive = Archive::new();
        let value = json!({ "name": "zipdoc", "tags": ["a", "b"], "n": 1.5, "nested": { "ok": true } });
        archive.write_json("meta.json", &value).await.unwrap();
        assert_eq!(
            archive.read_json("meta.json", None).await.unwrap().document,
            value
        );
    }

    #[tokio::test]
    async fn non_string_map_keys_fail_serialization() {
        let mut archive = Archive::new();
        let mut value = BTreeMap::new();
        value.insert(vec![1u8, 2], "x");

        let err = archive.write_json("bad.json", &value).await.unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(!archive.exists("bad.json"));
    }
}
