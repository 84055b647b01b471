use reqwest::blocking::Client;
use tracing::debug;

use crate::config::HttpSettings;
use crate::errors::MirrorResult;

/// Blocking GET client carrying the mirror's User-Agent and timeout
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &HttpSettings) -> MirrorResult<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout)
            .build()?;

        Ok(Self { client })
    }

    /// GET a page as text; non-success status codes are errors
    pub fn get_text(&self, url: &str) -> MirrorResult<String> {
        debug!(%url, "GET");
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.text()?)
    }

    /// GET a document as raw bytes, leaving decoding to the XML reader
    pub fn get_bytes(&self, url: &str) -> MirrorResult<Vec<u8>> {
        debug!(%url, "GET");
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MirrorError;

    #[test]
    fn test_sends_user_agent() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/page")
            .match_header("user-agent", "mirror-test/1.0")
            .with_status(200)
            .with_body("hello")
            .create();

        let settings = HttpSettings {
            user_agent: "mirror-test/1.0".to_string(),
            ..HttpSettings::default()
        };
        let http = HttpFetcher::new(&settings).unwrap();

        let body = http.get_text(&format!("{}/page", server.url())).unwrap();
        assert_eq!(body, "hello");
        mock.assert();
    }

    #[test]
    fn test_error_status_is_upstream_unavailable() {
        let mut server = mockito::Server::new();
        server.mock("GET", "/gone").with_status(503).create();

        let http = HttpFetcher::new(&HttpSettings::default()).unwrap();
        let err = http.get_text(&format!("{}/gone", server.url())).unwrap_err();

        assert!(matches!(err, MirrorError::UpstreamUnavailable(_)));
    }
}
