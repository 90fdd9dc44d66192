// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Errors produced by the RouterOS wire codec and client

use thiserror::Error;

use super::connection::Reply;

/// Failure of a single RouterOS API exchange
#[derive(Debug, Error)]
pub enum RouterOsError {
    /// Read or write on the underlying stream failed
    #[error("RouterOS transport error: {0}")]
    Io(#[from] std::io::Error),

    /// First byte of a word length prefix is not a known length class
    #[error("invalid word length prefix: {0:#04x}")]
    InvalidLength(u8),

    /// Outbound word does not fit into a 32-bit length prefix, or an inbound
    /// prefix announces more than [`MAX_WORD_LEN`](crate::mikrotik::proto::MAX_WORD_LEN) bytes
    #[error("word of {0} bytes is too long")]
    WordTooLong(usize),

    /// A word after the control word is neither an attribute nor a tag
    #[error("invalid sentence word: {0:?}")]
    InvalidWord(Vec<u8>),

    /// Reply sentence carried a control word outside `!re`/`!done`/`!trap`/`!fatal`
    #[error("unknown RouterOS reply word: {0}")]
    UnknownReplyWord(String),

    /// Device answered with `!trap`; the reply was still read up to `!done`
    #[error("from RouterOS device: {message}")]
    Trap { message: String, reply: Box<Reply> },

    /// Device answered with `!fatal` and will close the connection
    #[error("from RouterOS device: {message}")]
    Fatal { message: String },

    /// `/login` finished without a `!done` sentence
    #[error("RouterOS: /login: no ret (challenge) received")]
    NoChallenge,

    /// Legacy login challenge is not valid hex
    #[error("RouterOS: /login: invalid challenge: {0}")]
    Challenge(#[from] hex::FromHexError),

    /// The client was closed
    #[error("RouterOS connection is closed")]
    Closed,
}

impl RouterOsError {
    /// Partial reply carried by a `!trap`, if any
    #[must_use]
    pub fn reply(&self) -> Option<&Reply> {
        match self {
            Self::Trap { reply, .. } => Some(reply),
            _ => None,
        }
    }
}
