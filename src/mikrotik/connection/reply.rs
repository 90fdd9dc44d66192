// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Aggregated result of one command

use crate::mikrotik::proto::Sentence;

/// `!re` rows of a command plus its terminating `!done`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub(super) re: Vec<Sentence>,
    pub(super) done: Option<Sentence>,
}

impl Reply {
    /// Data rows in the order the device sent them
    #[must_use]
    pub fn rows(&self) -> &[Sentence] {
        &self.re
    }

    /// Terminating `!done` sentence
    #[must_use]
    pub fn done(&self) -> Option<&Sentence> {
        self.done.as_ref()
    }

    /// Builds a reply from already decoded sentences
    #[must_use]
    pub fn from_parts(re: Vec<Sentence>, done: Sentence) -> Self {
        Self {
            re,
            done: Some(done),
        }
    }
}
