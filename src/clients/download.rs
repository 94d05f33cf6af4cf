//! Incremental copy of a streamed response body into a sink.

use futures_util::{Stream, StreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::ApiError;

/// Writes every chunk of `stream` into `sink` in order and returns the total
/// number of bytes written.
///
/// The sink is flushed on every exit path, including when the stream or the
/// sink fails midway. The first error wins; a flush error is only reported
/// when the copy itself succeeded.
pub(crate) async fn write_chunks<S, B, E, W>(mut stream: S, sink: &mut W) -> Result<u64, ApiError>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Into<ApiError>,
    W: AsyncWrite + Unpin + ?Sized,
{
    let copied = copy_chunks(&mut stream, sink).await;
    let flushed = sink.flush().await;

    let written = copied?;
    flushed?;
    Ok(written)
}

async fn copy_chunks<S, B, E, W>(stream: &mut S, sink: &mut W) -> Result<u64, ApiError>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Into<ApiError>,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(Into::into)?;
        let bytes = chunk.as_ref();
        sink.write_all(bytes).await?;
        written += bytes.len() as u64;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use std::io;

    fn chunk(byte: u8, len: usize) -> Vec<u8> {
        vec![byte; len]
    }

    #[tokio::test]
    async fn test_chunks_are_written_in_order() {
        let chunks = vec![chunk(b'a', 4096), chunk(b'b', 4096), chunk(b'c', 123)];
        let mut sink = tokio_test::io::Builder::new()
            .write(&chunks[0])
            .write(&chunks[1])
            .write(&chunks[2])
            .build();

        let source = stream::iter(chunks.clone().into_iter().map(Ok::<_, io::Error>));
        let written = write_chunks(source, &mut sink).await.unwrap();

        assert_eq!(written, 8315);
    }

    #[tokio::test]
    async fn test_stream_error_stops_copy_and_keeps_prefix() {
        let source = stream::iter(vec![
            Ok(chunk(b'a', 10)),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
            Ok(chunk(b'b', 10)),
        ]);
        let mut sink: Vec<u8> = Vec::new();

        let result = write_chunks(source, &mut sink).await;

        assert!(matches!(result, Err(ApiError::Io(_))));
        assert_eq!(sink, chunk(b'a', 10));
    }

    #[tokio::test]
    async fn test_sink_error_is_reported_as_io() {
        let mut sink = tokio_test::io::Builder::new()
            .write_error(io::Error::new(io::ErrorKind::Other, "disk full"))
            .build();
        let source = stream::iter(vec![Ok::<_, io::Error>(chunk(b'a', 16))]);

        let result = write_chunks(source, &mut sink).await;

        assert!(matches!(result, Err(ApiError::Io(e)) if e.to_string() == "disk full"));
    }

    #[tokio::test]
    async fn test_empty_stream_writes_nothing() {
        let source = stream::iter(Vec::<Result<Vec<u8>, io::Error>>::new());
        let mut sink: Vec<u8> = Vec::new();

        assert_eq!(write_chunks(source, &mut sink).await.unwrap(), 0);
        assert!(sink.is_empty());
    }
}
