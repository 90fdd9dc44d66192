// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Writing outbound sentences

use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::length::encode_length;
use crate::mikrotik::error::RouterOsError;

/// Buffers one outbound sentence and writes it in a single flush
#[derive(Debug, Default)]
pub struct SentenceWriter {
    buf: Vec<u8>,
}

impl SentenceWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a word verbatim, prefixed by its length
    ///
    /// # Errors
    ///
    /// Returns [`RouterOsError::WordTooLong`] if the word exceeds `u32::MAX` bytes.
    pub fn word(&mut self, word: &[u8]) -> Result<&mut Self, RouterOsError> {
        let len = u32::try_from(word.len()).map_err(|_| RouterOsError::WordTooLong(word.len()))?;
        self.buf.extend_from_slice(&encode_length(len));
        self.buf.extend_from_slice(word);
        Ok(self)
    }

    /// Terminates the sentence with a zero-length word and returns the bytes
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        // zero length word terminator
        self.buf.push(0);
        self.buf
    }

    /// Terminates the sentence and flushes it to the stream
    ///
    /// # Errors
    ///
    /// Returns the stream's I/O error.
    pub async fn send<W>(self, stream: &mut W) -> Result<(), RouterOsError>
    where
        W: AsyncWrite + Unpin,
    {
        let bytes = self.finish();
        stream.write_all(&bytes).await?;
        stream.flush().await?;
        Ok(())
    }
}

/// Encodes a complete sentence including its terminator
///
/// # Errors
///
/// Returns [`RouterOsError::WordTooLong`] for an oversized word.
pub fn encode_sentence<I, W>(words: I) -> Result<Vec<u8>, RouterOsError>
where
    I: IntoIterator<Item = W>,
    W: AsRef<[u8]>,
{
    let mut writer = SentenceWriter::new();
    for word in words {
        writer.word(word.as_ref())?;
    }
    Ok(writer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_sentence_layout() {
        let bytes = encode_sentence(["/login", "=name=admin"]).unwrap();
        let mut expected = vec![6];
        expected.extend_from_slice(b"/login");
        expected.push(11);
        expected.extend_from_slice(b"=name=admin");
        expected.push(0);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_empty_sentence_is_single_terminator() {
        let bytes = encode_sentence(Vec::<&str>::new()).unwrap();
        assert_eq!(bytes, vec![0]);
    }

    #[test]
    fn test_long_word_gets_two_byte_prefix() {
        let word = vec![b'a'; 200];
        let bytes = encode_sentence([word.as_slice()]).unwrap();
        assert_eq!(&bytes[..2], &[0x80, 200]);
        assert_eq!(bytes.len(), 2 + 200 + 1);
    }

    #[tokio::test]
    async fn test_send_writes_whole_sentence() {
        let mut out = Vec::new();
        let mut writer = SentenceWriter::new();
        writer.word(b"/system/resource/print").unwrap();
        writer.send(&mut out).await.unwrap();
        assert_eq!(out.first(), Some(&22));
        assert_eq!(out.last(), Some(&0));
    }
}
