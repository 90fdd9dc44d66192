// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! RouterOS API wire format
//!
//! Words are length-prefixed byte strings, sentences are word lists
//! terminated by a zero-length word.

mod length;
mod reader;
mod sentence;
mod writer;

pub use length::{encode_length, read_length};
pub use reader::{MAX_WORD_LEN, read_sentence, read_word};
pub use sentence::{Sentence, decode_word};
pub use writer::{SentenceWriter, encode_sentence};
