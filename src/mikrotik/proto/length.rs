// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Word length prefixes

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::mikrotik::error::RouterOsError;

/// Encodes a word length into its 1..=5 byte prefix
// RouterOS protocol length encoding - intentional truncation is part of the wire format
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn encode_length(len: u32) -> Vec<u8> {
    if len < 0x80 {
        vec![len as u8]
    } else if len < 0x4000 {
        vec![((len >> 8) as u8) | 0x80, (len & 0xFF) as u8]
    } else if len < 0x0020_0000 {
        vec![
            ((len >> 16) as u8) | 0xC0,
            ((len >> 8) & 0xFF) as u8,
            (len & 0xFF) as u8,
        ]
    } else if len < 0x1000_0000 {
        vec![
            ((len >> 24) as u8) | 0xE0,
            ((len >> 16) & 0xFF) as u8,
            ((len >> 8) & 0xFF) as u8,
            (len & 0xFF) as u8,
        ]
    } else {
        let mut out = Vec::with_capacity(5);
        out.push(0xF0);
        out.extend_from_slice(&len.to_be_bytes());
        out
    }
}

/// Reads one length prefix from the stream
///
/// # Errors
///
/// Returns [`RouterOsError::InvalidLength`] for a first byte of `0xF8` or above,
/// or the stream's I/O error.
pub async fn read_length<R>(stream: &mut R) -> Result<u32, RouterOsError>
where
    R: AsyncRead + Unpin,
{
    let first = stream.read_u8().await?;
    let len = if first & 0x80 == 0 {
        u32::from(first)
    } else if first & 0xC0 == 0x80 {
        let second = stream.read_u8().await?;
        (u32::from(first & 0x3F) << 8) | u32::from(second)
    } else if first & 0xE0 == 0xC0 {
        let mut rest = [0u8; 2];
        stream.read_exact(&mut rest).await?;
        (u32::from(first & 0x1F) << 16) | (u32::from(rest[0]) << 8) | u32::from(rest[1])
    } else if first & 0xF0 == 0xE0 {
        let mut rest = [0u8; 3];
        stream.read_exact(&mut rest).await?;
        (u32::from(first & 0x0F) << 24)
            | (u32::from(rest[0]) << 16)
            | (u32::from(rest[1]) << 8)
            | u32::from(rest[2])
    } else if first & 0xF8 == 0xF0 {
        // the low bits of the marker byte are not part of the length
        stream.read_u32().await?
    } else {
        return Err(RouterOsError::InvalidLength(first));
    };
    Ok(len)
}
