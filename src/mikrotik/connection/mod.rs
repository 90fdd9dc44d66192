// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! RouterOS API client over a single duplex stream
//!
//! One request is in flight at a time: every operation takes `&mut self`,
//! and replies come back in the order commands were sent.

mod auth;
mod reply;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufStream};

use super::error::RouterOsError;
use super::proto::{Sentence, SentenceWriter, read_sentence};

pub use auth::challenge_response;
pub use reply::Reply;

/// Control word of a reply sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplyWord {
    Re,
    Done,
    Trap,
    Fatal,
    Empty,
    Unknown,
}

impl From<&str> for ReplyWord {
    fn from(word: &str) -> Self {
        match word {
            "!re" => Self::Re,
            "!done" => Self::Done,
            "!trap" => Self::Trap,
            "!fatal" => Self::Fatal,
            "" => Self::Empty,
            _ => Self::Unknown,
        }
    }
}

/// RouterOS API client
///
/// The stream is opened by the caller (plain TCP, TLS, or anything else
/// implementing tokio's I/O traits) together with its timeout policy.
pub struct Client<S> {
    stream: Option<BufStream<S>>,
}

impl<S> Client<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps an already open stream
    pub fn new(stream: S) -> Self {
        Self {
            stream: Some(BufStream::new(stream)),
        }
    }

    /// Sends one command and reads sentences until `!done` or `!fatal`
    ///
    /// Words are written verbatim, including any `=` or `?` prefix.
    ///
    /// # Errors
    ///
    /// - [`RouterOsError::Trap`] if the device reported a `!trap`; the
    ///   complete reply is carried inside the error
    /// - [`RouterOsError::Fatal`] on `!fatal`
    /// - [`RouterOsError::UnknownReplyWord`] on any other control word
    /// - [`RouterOsError::Closed`] after [`Client::close`]
    /// - framing and I/O errors from the stream
    pub async fn run<I, W>(&mut self, words: I) -> Result<Reply, RouterOsError>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let stream = self.stream.as_mut().ok_or(RouterOsError::Closed)?;

        let mut writer = SentenceWriter::new();
        for word in words {
            writer.word(word.as_ref().as_bytes())?;
        }
        writer.send(stream).await?;

        let mut reply = Reply::default();
        let mut trap = None;
        loop {
            let sentence = read_sentence(stream).await?;
            match ReplyWord::from(sentence.word()) {
                ReplyWord::Re => reply.re.push(sentence),
                ReplyWord::Done => {
                    reply.done = Some(sentence);
                    break;
                }
                ReplyWord::Trap => {
                    // a device may emit several traps before !done; the first wins
                    if trap.is_none() {
                        trap = Some(device_message(&sentence));
                    }
                }
                ReplyWord::Fatal => {
                    return Err(RouterOsError::Fatal {
                        message: device_message(&sentence),
                    });
                }
                ReplyWord::Empty => {}
                ReplyWord::Unknown => {
                    return Err(RouterOsError::UnknownReplyWord(sentence.word().to_string()));
                }
            }
        }

        match trap {
            Some(message) => Err(RouterOsError::Trap {
                message,
                reply: Box::new(reply),
            }),
            None => Ok(reply),
        }
    }

    /// Shuts the stream down; calling it again is a no-op
    ///
    /// # Errors
    ///
    /// Returns the shutdown error of the first close only.
    pub async fn close(&mut self) -> Result<(), RouterOsError> {
        match self.stream.take() {
            Some(mut stream) => {
                stream.shutdown().await?;
                Ok(())
            }
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }
}

fn device_message(sentence: &Sentence) -> String {
    sentence
        .get("message")
        .map_or_else(|| format!("unknown error: {sentence}"), str::to_string)
}
