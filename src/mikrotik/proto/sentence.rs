// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Sentence classification
//!
//! A sentence is a control word (`!re`, `!done`, `!trap`, `!fatal`), an
//! optional `.tag=` and any number of `=key=value` attribute words.

use std::collections::HashMap;
use std::fmt;

use encoding_rs::WINDOWS_1250;

use crate::mikrotik::error::RouterOsError;

const TAG_PREFIX: &str = ".tag=";

/// One decoded RouterOS sentence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    word: String,
    tag: Option<String>,
    map: HashMap<String, String>,
}

impl Sentence {
    /// Creates a sentence with the given control word and no attributes
    #[must_use]
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute, replacing any previous value for the key
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.map.insert(key.into(), value.into());
        self
    }

    /// Sets the `.tag=` correlation tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Builds a sentence from raw words, without the terminating empty word
    ///
    /// # Errors
    ///
    /// Returns [`RouterOsError::InvalidWord`] for a word after the control word
    /// that is neither `=key=value` nor `.tag=`.
    pub fn from_words<I, W>(words: I) -> Result<Self, RouterOsError>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<[u8]>,
    {
        let mut sentence = Self::default();
        let mut first = true;
        for raw in words {
            let raw = raw.as_ref();
            if raw.is_empty() {
                break;
            }
            let text = decode_word(raw);
            if first {
                sentence.word = text;
                first = false;
            } else if let Some(tag) = text.strip_prefix(TAG_PREFIX) {
                sentence.tag = Some(tag.to_string());
            } else if let Some(attribute) = text.strip_prefix('=') {
                let (key, value) = attribute.split_once('=').unwrap_or((attribute, ""));
                sentence.map.insert(key.to_string(), value.to_string());
            } else {
                return Err(RouterOsError::InvalidWord(raw.to_vec()));
            }
        }
        Ok(sentence)
    }

    /// Control word, empty for an empty sentence
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Correlation tag
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Attribute value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Whether the attribute is present
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Read-only view of all attributes
    #[must_use]
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.map
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word)?;
        if let Some(tag) = &self.tag {
            write!(f, " @{tag}")?;
        }
        let mut keys: Vec<_> = self.map.keys().collect();
        keys.sort();
        for key in keys {
            write!(f, " ={key}={}", self.map[key])?;
        }
        Ok(())
    }
}

/// Decodes Windows-1250 word bytes
#[must_use]
pub fn decode_word(raw: &[u8]) -> String {
    WINDOWS_1250
        .decode_without_bom_handling(raw)
        .0
        .into_owned()
}
