use crate::error::{FetchError, Result};
use crate::utils::fs;
use flate2::read::GzDecoder;
use reqwest::header::USER_AGENT;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Retrieves a remote resource into a local file.
pub trait Transport {
    fn download(&self, url: &str, destination: &Path) -> Result<()>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    fn fetch_into(&self, url: &str, destination: &Path) -> Result<()> {
        let mut response = self
            .client
            .get(url)
            .header(USER_AGENT, concat!("mnist-fetch/", env!("CARGO_PKG_VERSION")))
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| FetchError::transport(url, e))?;

        let file = File::create(destination)
            .map_err(|e| FetchError::transport(url, format!("{}: {e}", destination.display())))?;
        let mut writer = BufWriter::new(file);
        response
            .copy_to(&mut writer)
            .map_err(|e| FetchError::transport(url, e))?;
        writer
            .flush()
            .map_err(|e| FetchError::transport(url, e))?;

        Ok(())
    }
}

impl Transport for HttpTransport {
    fn download(&self, url: &str, destination: &Path) -> Result<()> {
        let result = self.fetch_into(url, destination);
        if result.is_err() {
            // Never leave a truncated archive behind
            fs::discard_file(destination);
        }
        result
    }
}

/// Decompress a gzip archive into `destination`.
///
/// The stream is decoded into a sibling `.part` file that is renamed into
/// place only once decoding finished, so `destination` either holds the whole
/// payload or does not exist. Returns the number of decompressed bytes.
pub fn extract_gzip(archive_path: &Path, destination: &Path) -> Result<u64> {
    let partial = partial_path(destination);

    let result = decode_into(archive_path, &partial).and_then(|written| {
        std::fs::rename(&partial, destination)?;
        Ok(written)
    });

    if result.is_err() {
        fs::discard_file(&partial);
    }
    result
}

fn decode_into(archive_path: &Path, output: &Path) -> Result<u64> {
    let input = File::open(archive_path)?;
    let mut decoder = GzDecoder::new(BufReader::new(input));
    let mut writer = BufWriter::new(File::create(output)?);

    let written = std::io::copy(&mut decoder, &mut writer).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidInput
        | std::io::ErrorKind::InvalidData
        | std::io::ErrorKind::UnexpectedEof => FetchError::decompression(archive_path, e),
        _ => FetchError::from(e),
    })?;
    writer.flush()?;

    Ok(written)
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use pretty_assertions::assert_eq;
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    fn gzip(payload: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(payload).unwrap();
        encoder.finish().unwrap()
    }

    /// Answer a single request on a loopback port with `response`.
    /// The handle yields the raw request head.
    fn serve_once(response: Vec<u8>) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(&response).unwrap();
            stream.flush().unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{addr}/train-images-idx3-ubyte.gz"), handle)
    }

    fn http_response(status: &str, body: &[u8]) -> Vec<u8> {
        let mut response = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        )
        .into_bytes();
        response.extend_from_slice(body);
        response
    }

    #[test]
    fn test_extract_gzip_writes_payload() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("labels.gz");
        let output = temp.path().join("labels");
        std::fs::write(&archive, gzip(b"0123456789")).unwrap();

        let written = extract_gzip(&archive, &output).unwrap();

        assert_eq!(written, 10);
        assert_eq!(std::fs::read(&output).unwrap(), b"0123456789");
        assert!(!partial_path(&output).exists());
        // The archive is left for the caller to remove
        assert!(archive.exists());
    }

    #[test]
    fn test_extract_truncated_archive_leaves_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("images.gz");
        let output = temp.path().join("images");
        let payload: Vec<u8> = (0..4096u32).map(|i| (i * 31 % 251) as u8).collect();
        let mut bytes = gzip(&payload);
        bytes.truncate(bytes.len() / 2);
        std::fs::write(&archive, bytes).unwrap();

        assert!(extract_gzip(&archive, &output).is_err());
        assert!(!output.exists());
        assert!(!partial_path(&output).exists());
    }

    #[test]
    fn test_extract_non_gzip_is_decompression_error() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("bogus.gz");
        let output = temp.path().join("bogus");
        std::fs::write(&archive, b"<html>not found</html>").unwrap();

        let err = extract_gzip(&archive, &output).unwrap_err();

        assert!(matches!(err, FetchError::Decompression { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_partial_path_appends_suffix() {
        let path = Path::new("/data/train-images-idx3-ubyte");
        assert_eq!(
            partial_path(path),
            PathBuf::from("/data/train-images-idx3-ubyte.part")
        );
    }

    #[test]
    fn test_http_transport_unreachable_host_fails() {
        let temp = tempfile::tempdir().unwrap();
        let destination = temp.path().join("archive.gz");
        let transport = HttpTransport::new();

        // Nothing listens on the loopback discard port
        let err = transport
            .download("http://127.0.0.1:9/archive.gz", &destination)
            .unwrap_err();

        assert!(matches!(err, FetchError::Transport { .. }));
        assert!(!destination.exists());
    }

    #[test]
    fn test_http_transport_not_found_is_transport_error() {
        let temp = tempfile::tempdir().unwrap();
        let destination = temp.path().join("train-images-idx3-ubyte.gz");
        let (url, server) = serve_once(http_response("404 Not Found", b"not found"));

        let err = HttpTransport::new()
            .download(&url, &destination)
            .unwrap_err();
        server.join().unwrap();

        match err {
            FetchError::Transport { url: failed, message } => {
                assert_eq!(failed, url);
                assert!(message.contains("404"), "unexpected message: {message}");
            }
            other => panic!("expected transport error, got {other:?}"),
        }
        assert!(!destination.exists());
    }

    #[test]
    fn test_http_transport_streams_body_to_disk() {
        let temp = tempfile::tempdir().unwrap();
        let destination = temp.path().join("train-images-idx3-ubyte.gz");
        let body = gzip(b"HELLOWRLD");
        let (url, server) = serve_once(http_response("200 OK", &body));

        HttpTransport::new().download(&url, &destination).unwrap();
        let request = server.join().unwrap().to_lowercase();

        assert_eq!(std::fs::read(&destination).unwrap(), body);
        assert!(request.starts_with("get /train-images-idx3-ubyte.gz "));
        assert!(request.contains("user-agent: mnist-fetch/"));
    }
}
