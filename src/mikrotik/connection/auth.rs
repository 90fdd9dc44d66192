// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! RouterOS authentication

use md5::compute as md5_compute;
use tokio::io::{AsyncRead, AsyncWrite};

use super::{Client, Reply};
use crate::mikrotik::error::RouterOsError;

/// Legacy login response: `"00"` followed by hex `md5(0x00 ‖ password ‖ challenge)`
#[must_use]
pub fn challenge_response(password: &str, challenge: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + password.len() + challenge.len());
    data.push(0u8);
    data.extend_from_slice(password.as_bytes());
    data.extend_from_slice(challenge);
    let digest = md5_compute(&data);
    let mut response = String::from("00");
    response.push_str(&hex::encode(digest.0));
    response
}

/// Challenge bytes of a first `/login` reply; `None` means logged in
///
/// `run` only returns once `!done` arrived, so a reply without one is
/// never produced by the client itself.
fn login_challenge(reply: &Reply) -> Result<Option<Vec<u8>>, RouterOsError> {
    let done = reply.done().ok_or(RouterOsError::NoChallenge)?;
    done.get("ret")
        .map(hex::decode)
        .transpose()
        .map_err(RouterOsError::from)
}

impl<S> Client<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Logs in with plaintext credentials, answering a challenge if the
    /// device still uses the pre-6.43 scheme
    ///
    /// # Errors
    ///
    /// - [`RouterOsError::NoChallenge`] if the first `/login` has no `!done`
    /// - [`RouterOsError::Challenge`] if the challenge is not valid hex
    /// - any error of either `/login` round-trip, e.g. a `!trap` for bad credentials
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), RouterOsError> {
        let reply = self
            .run([
                "/login".to_string(),
                format!("=name={username}"),
                format!("=password={password}"),
            ])
            .await?;

        let Some(challenge) = login_challenge(&reply)? else {
            return Ok(());
        };

        let response = challenge_response(password, &challenge);
        self.run([
            "/login".to_string(),
            format!("=name={username}"),
            format!("=response={response}"),
        ])
        .await?;
        Ok(())
    }
}
