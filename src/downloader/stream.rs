//! Forwarding of extractor streams to clients

use crate::extractor::MediaStream;
use crate::utils::error::{Result, TubegrabError};
use futures::StreamExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error};

/// Wait for the first bytes of a stream before anything is committed to the client.
///
/// Until the first chunk arrives an upstream failure can still be reported as a proper
/// error response. Once this returns, later failures can only cut the transfer short.
pub async fn prime(mut stream: MediaStream) -> Result<MediaStream> {
    let first = loop {
        match stream.next().await {
            Some(Ok(chunk)) if chunk.is_empty() => continue,
            Some(Ok(chunk)) => break chunk,
            Some(Err(e)) => return Err(TubegrabError::StreamFailure(e.to_string())),
            None => {
                return Err(TubegrabError::StreamFailure(
                    "stream ended before any data".to_string(),
                ))
            }
        }
    };

    debug!("First chunk received ({} bytes)", first.len());
    Ok(futures::stream::once(async move { Ok(first) })
        .chain(stream)
        .boxed())
}

/// Log the outcome of a transfer without altering it
pub fn instrument(stream: MediaStream, label: String) -> MediaStream {
    let sent = Arc::new(AtomicU64::new(0));
    let sent_at_end = Arc::clone(&sent);

    stream
        .inspect(move |item| match item {
            Ok(chunk) => {
                sent.fetch_add(chunk.len() as u64, Ordering::Relaxed);
            }
            Err(e) => error!(
                "Stream error for {} after {} bytes: {}",
                label,
                sent.load(Ordering::Relaxed),
                e
            ),
        })
        .chain(futures::stream::once(async move {
            debug!("Stream finished after {} bytes", sent_at_end.load(Ordering::Relaxed));
            None::<std::io::Result<bytes::Bytes>>
        })
        .filter_map(futures::future::ready))
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::io;

    fn stream_of(items: Vec<io::Result<&'static str>>) -> MediaStream {
        futures::stream::iter(
            items
                .into_iter()
                .map(|item| item.map(|s| Bytes::from_static(s.as_bytes())))
                .collect::<Vec<_>>(),
        )
        .boxed()
    }

    fn broken() -> io::Error {
        io::Error::new(io::ErrorKind::BrokenPipe, "upstream hung up")
    }

    #[tokio::test]
    async fn test_prime_keeps_every_chunk() {
        let primed = prime(stream_of(vec![Ok("ab"), Ok("cd")])).await.unwrap();
        let chunks: Vec<_> = primed.map(|c| c.unwrap()).collect().await;
        assert_eq!(chunks, vec![Bytes::from_static(b"ab"), Bytes::from_static(b"cd")]);
    }

    #[tokio::test]
    async fn test_prime_skips_leading_empty_chunks() {
        let primed = prime(stream_of(vec![Ok(""), Ok("x")])).await.unwrap();
        let chunks: Vec<_> = primed.map(|c| c.unwrap()).collect().await;
        assert_eq!(chunks, vec![Bytes::from_static(b"x")]);
    }

    #[tokio::test]
    async fn test_prime_reports_early_error() {
        let result = prime(stream_of(vec![Err(broken())])).await;
        assert!(matches!(result, Err(TubegrabError::StreamFailure(_))));
    }

    #[tokio::test]
    async fn test_prime_reports_empty_stream() {
        let result = prime(stream_of(vec![])).await;
        assert!(matches!(result, Err(TubegrabError::StreamFailure(_))));
    }

    #[tokio::test]
    async fn test_late_error_passes_through() {
        let primed = prime(stream_of(vec![Ok("ab"), Err(broken())])).await.unwrap();
        let items: Vec<_> = instrument(primed, "test".to_string()).collect().await;
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
    }
}
