// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Opening plain and TLS connections to a device

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use rustls::pki_types::ServerName;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::TlsConnector;

use super::connection::Client;

/// Any byte stream a [`Client`] can run over
pub trait DeviceStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T> DeviceStream for T where T: AsyncRead + AsyncWrite + Unpin + Send {}

/// Client over either a plain TCP or a TLS stream
pub type DeviceClient = Client<Box<dyn DeviceStream>>;

fn tls_connector() -> TlsConnector {
    static CONFIG: OnceLock<Arc<rustls::ClientConfig>> = OnceLock::new();
    let config = CONFIG.get_or_init(|| {
        let mut roots = rustls::RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        Arc::new(
            rustls::ClientConfig::builder()
                .with_root_certificates(roots)
                .with_no_client_auth(),
        )
    });
    TlsConnector::from(config.clone())
}

/// Host part of `host:port`, without IPv6 brackets
fn host_of(addr: &str) -> &str {
    let host = addr.rsplit_once(':').map_or(addr, |(host, _)| host);
    host.trim_start_matches('[').trim_end_matches(']')
}

/// Connects to `addr` (`host:port`) and wraps the stream in a [`Client`]
///
/// The timeout covers TCP connect and, with `tls`, the handshake.
///
/// # Errors
///
/// Returns `TimedOut` if the deadline passes, `InvalidInput` for a host
/// that is not a valid TLS server name, or the underlying I/O error.
pub async fn connect(
    addr: &str,
    tls: bool,
    connect_timeout: Duration,
) -> std::io::Result<DeviceClient> {
    let attempt = async {
        tracing::trace!("Attempting TCP connection to: {}", addr);
        let tcp = TcpStream::connect(addr).await?;
        tcp.set_nodelay(true)?;
        tracing::trace!("TCP connection established to: {}", addr);

        let stream: Box<dyn DeviceStream> = if tls {
            let server_name = ServerName::try_from(host_of(addr).to_string())
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
            let stream = tls_connector().connect(server_name, tcp).await?;
            tracing::trace!("TLS handshake completed with: {}", addr);
            Box::new(stream)
        } else {
            Box::new(tcp)
        };
        Ok::<_, std::io::Error>(stream)
    };

    let stream = timeout(connect_timeout, attempt).await.map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            format!("connection to {addr} timed out after {connect_timeout:?}"),
        )
    })??;
    Ok(Client::new(stream))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("192.168.88.1:8729"), "192.168.88.1");
        assert_eq!(host_of("router.lan:8729"), "router.lan");
        assert_eq!(host_of("[fe80::1]:8729"), "fe80::1");
        assert_eq!(host_of("router.lan"), "router.lan");
    }

    #[tokio::test]
    async fn test_connect_and_run_against_local_listener() {
        use crate::mikrotik::proto::{encode_sentence, read_sentence};
        use tokio::io::AsyncWriteExt;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let device = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_sentence(&mut socket).await.unwrap();
            socket
                .write_all(&encode_sentence(["!re", "=name=MikroTik"]).unwrap())
                .await
                .unwrap();
            socket
                .write_all(&encode_sentence(["!done"]).unwrap())
                .await
                .unwrap();
            request.word().to_string()
        });

        let mut client = connect(&addr, false, Duration::from_secs(5)).await.unwrap();
        let reply = client.run(["/system/identity/print"]).await.unwrap();
        assert_eq!(reply.rows()[0].get("name"), Some("MikroTik"));
        assert_eq!(device.await.unwrap(), "/system/identity/print");
    }
}
