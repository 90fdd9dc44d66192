// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Reading words and sentences from a stream

use tokio::io::{AsyncRead, AsyncReadExt};

use super::length::read_length;
use super::sentence::Sentence;
use crate::mikrotik::error::RouterOsError;

/// Largest inbound word accepted; the prefix itself allows up to 4 GiB
pub const MAX_WORD_LEN: u32 = 16 * 1024 * 1024;

/// Reads one raw word; an empty vector is the sentence terminator
///
/// # Errors
///
/// Returns [`RouterOsError::WordTooLong`] for a length above
/// [`MAX_WORD_LEN`] before reading the payload, or an error on a malformed
/// prefix or a short read.
pub async fn read_word<R>(stream: &mut R) -> Result<Vec<u8>, RouterOsError>
where
    R: AsyncRead + Unpin,
{
    let len = read_length(stream).await?;
    if len > MAX_WORD_LEN {
        return Err(RouterOsError::WordTooLong(len as usize));
    }
    let len = len as usize;
    let mut buf = vec![0u8; len];
    if len > 0 {
        stream.read_exact(&mut buf).await?;
    }
    Ok(buf)
}

/// Reads words up to and including the zero-length terminator
///
/// # Errors
///
/// Returns an error on framing, decoding or I/O failure.
pub async fn read_sentence<R>(stream: &mut R) -> Result<Sentence, RouterOsError>
where
    R: AsyncRead + Unpin,
{
    let mut words = Vec::new();
    loop {
        let word = read_word(stream).await?;
        if word.is_empty() {
            break;
        }
        words.push(word);
    }
    Sentence::from_words(words)
}
