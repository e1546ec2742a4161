use reqwest::blocking::Client;
use std::io::Read;

use crate::errors::FetchError;
use crate::options::verbose::Reporter;

/// Blocking HTTP GET with logging routed through a [`Reporter`].
pub struct Fetcher<'r> {
    client: Client,
    reporter: &'r dyn Reporter,
}

impl<'r> Fetcher<'r> {
    pub fn new(reporter: &'r dyn Reporter) -> Self {
        Self {
            client: Client::new(),
            reporter,
        }
    }

    pub fn log(&self, message: &str) {
        self.reporter.log(message);
    }

    /// Downloads the whole body of `url`. Non-2xx statuses are errors.
    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.log(&format!("GET {}", url));

        let resp = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| FetchError::network(url, e))?;

        let total_size = resp.content_length();
        let pb = self.reporter.progress(total_size);

        // Content-Length only sizes the bar; the buffer grows with what arrives.
        let mut content = Vec::new();
        pb.wrap_read(resp)
            .read_to_end(&mut content)
            .map_err(|e| FetchError::network_io(url, e))?;
        pb.finish_and_clear();

        Ok(content)
    }

    pub fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let bytes = self.fetch_bytes(url)?;
        String::from_utf8(bytes).map_err(|e| FetchError::decode(url, e))
    }
}
