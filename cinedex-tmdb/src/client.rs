use std::path::PathBuf;

use cinedex_catalog::{CatalogId, Credits, Movie, Person, SearchResults, Season, TitleKind, Tv};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::catalog::Catalog;
use crate::config::TmdbConfig;
use crate::error::CatalogError;
use crate::images::{self, ImageKind};

/// Status message the provider returns for unknown ids.
const NOT_FOUND_MARKER: &str = "could not be found";

/// Error object the provider sends in place of a payload.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    status_code: i64,
    status_message: String,
}

/// Blocking HTTP client for the TMDB v3 API.
pub struct TmdbClient {
    http: reqwest::blocking::Client,
    config: TmdbConfig,
}

impl TmdbClient {
    /// Build a client with the configured timeout and proxy. No request is made.
    pub fn new(config: TmdbConfig) -> Result<Self, CatalogError> {
        let mut builder = reqwest::blocking::Client::builder().timeout(config.timeout);
        if let Some(ref proxy) = config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        let http = builder.build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    /// GET `path` under the API base and decode the JSON body.
    ///
    /// For detail lookups, a 404 or an error object saying the resource
    /// "could not be found" is reported as [`CatalogError::Missing`], even
    /// when it arrives with a success status.
    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        detail: bool,
    ) -> Result<T, CatalogError> {
        let url = format!("{}/{}", self.config.api_base, path);
        log::debug!("GET {}", url);

        let resp = self
            .http
            .get(&url)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("language", self.config.language.as_str()),
            ])
            .query(query)
            .send()?;

        let status = resp.status();
        let text = resp.text()?;
        decode_body(path, status, &text, detail)
    }
}

fn decode_body<T: DeserializeOwned>(
    path: &str,
    status: reqwest::StatusCode,
    text: &str,
    detail: bool,
) -> Result<T, CatalogError> {
    let envelope = serde_json::from_str::<ErrorEnvelope>(text).ok();

    if detail {
        let unknown_id = envelope
            .as_ref()
            .is_some_and(|e| e.status_message.contains(NOT_FOUND_MARKER));
        if unknown_id || status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::Missing(path.to_string()));
        }
    }
    if !status.is_success() {
        return Err(CatalogError::Status {
            status: status.as_u16(),
            message: text.chars().take(200).collect(),
        });
    }
    if let Some(e) = envelope {
        return Err(CatalogError::Status {
            status: status.as_u16(),
            message: format!("provider error {}: {}", e.status_code, e.status_message),
        });
    }

    Ok(serde_json::from_str(text)?)
}

impl Catalog for TmdbClient {
    fn search(&self, query: &str, kind: TitleKind) -> Result<SearchResults, CatalogError> {
        self.get(
            &format!("search/{}", kind.as_str()),
            &[("query", query), ("page", "1")],
            false,
        )
    }

    fn movie(&self, id: CatalogId) -> Result<Movie, CatalogError> {
        self.get(&format!("movie/{id}"), &[], true)
    }

    fn tv(&self, id: CatalogId) -> Result<Tv, CatalogError> {
        self.get(&format!("tv/{id}"), &[], true)
    }

    fn season(&self, tv_id: CatalogId, season_number: u32) -> Result<Season, CatalogError> {
        self.get(&format!("tv/{tv_id}/season/{season_number}"), &[], true)
    }

    fn credits(&self, kind: TitleKind, id: CatalogId) -> Result<Credits, CatalogError> {
        self.get(&format!("{}/{id}/credits", kind.as_str()), &[], true)
    }

    fn person(&self, id: CatalogId) -> Result<Person, CatalogError> {
        self.get(&format!("person/{id}"), &[], true)
    }

    fn download_image(&self, kind: ImageKind, path: &str) -> Result<PathBuf, CatalogError> {
        let dest = images::local_image_path(&self.config.images.dir, kind, path)
            .ok_or_else(|| CatalogError::ImagePath(path.to_string()))?;
        if dest.exists() {
            return Ok(dest);
        }

        let url = images::image_url(&self.config.image_base, kind, path);
        log::debug!("Downloading {} image {}", kind, url);
        let resp = self.http.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message: format!("image {}", url),
            });
        }
        let bytes = resp.bytes()?;

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&dest, &bytes)?;
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one canned HTTP response on a local port and return its base URL.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
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
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(api_base: String) -> TmdbClient {
        let mut config = TmdbConfig::new("key");
        config.api_base = api_base;
        TmdbClient::new(config).unwrap()
    }

    #[test]
    fn client_builds_with_proxy() {
        let mut config = TmdbConfig::new("key");
        config.proxy = Some("http://127.0.0.1:7890".to_string());
        assert!(TmdbClient::new(config).is_ok());
    }

    #[test]
    fn movie_decodes_from_success_body() {
        let base = serve_once("200 OK", r#"{"id":42,"title":"Lost","runtime":101}"#);
        let movie = client_for(base).movie(42).unwrap();
        assert_eq!(movie.id, 42);
        assert_eq!(movie.title, "Lost");
        assert_eq!(movie.runtime, Some(101));
    }

    #[test]
    fn overview_mentioning_not_found_still_decodes() {
        let base = serve_once(
            "200 OK",
            r#"{"id":42,"title":"Lost","overview":"The treasure could not be found anywhere."}"#,
        );
        let movie = client_for(base).movie(42).unwrap();
        assert_eq!(movie.overview.as_deref(), Some("The treasure could not be found anywhere."));
    }

    #[test]
    fn biography_mentioning_not_found_still_decodes() {
        let base = serve_once(
            "200 OK",
            r#"{"id":5,"name":"Jane Roe","biography":"Her first reel could not be found until 1990."}"#,
        );
        let person = client_for(base).person(5).unwrap();
        assert_eq!(person.id, 5);
        assert_eq!(person.name, "Jane Roe");
    }

    #[test]
    fn not_found_envelope_is_missing() {
        let base = serve_once(
            "404 Not Found",
            r#"{"success":false,"status_code":34,"status_message":"The resource you requested could not be found."}"#,
        );
        let err = client_for(base).season(7, 9).unwrap_err();
        assert!(matches!(err, CatalogError::Missing(ref p) if p == "tv/7/season/9"));
    }

    #[test]
    fn not_found_envelope_with_success_status_is_missing() {
        let base = serve_once(
            "200 OK",
            r#"{"status_code":34,"status_message":"The resource you requested could not be found."}"#,
        );
        let err = client_for(base).tv(7).unwrap_err();
        assert!(matches!(err, CatalogError::Missing(_)));
    }

    #[test]
    fn server_error_is_status() {
        let base = serve_once("500 Internal Server Error", "upstream exploded");
        let err = client_for(base).movie(42).unwrap_err();
        match err {
            CatalogError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn search_404_is_status_not_missing() {
        let status = reqwest::StatusCode::NOT_FOUND;
        let body = r#"{"status_code":34,"status_message":"The resource you requested could not be found."}"#;
        let err = decode_body::<SearchResults>("search/movie", status, body, false).unwrap_err();
        assert!(matches!(err, CatalogError::Status { status: 404, .. }));
    }

    #[test]
    fn auth_envelope_is_status() {
        let body = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key."}"#;
        let err = decode_body::<Movie>("movie/1", reqwest::StatusCode::OK, body, true).unwrap_err();
        assert!(matches!(err, CatalogError::Status { status: 200, ref message } if message.contains("Invalid API key")));
    }

    #[test]
    fn existing_image_is_not_refetched() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TmdbConfig::new("key");
        config.images.dir = dir.path().to_path_buf();
        // Unroutable base: any network attempt would fail the test
        config.image_base = "http://127.0.0.1:1/".to_string();

        let dest = images::local_image_path(dir.path(), ImageKind::Poster, "/p.jpg").unwrap();
        std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
        std::fs::write(&dest, b"jpeg").unwrap();

        let client = TmdbClient::new(config).unwrap();
        assert_eq!(client.download_image(ImageKind::Poster, "/p.jpg").unwrap(), dest);
    }

    #[test]
    fn escaping_image_path_is_rejected_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TmdbConfig::new("key");
        config.images.dir = dir.path().join("images");
        config.image_base = "http://127.0.0.1:1/".to_string();

        let client = TmdbClient::new(config).unwrap();
        let err = client
            .download_image(ImageKind::Poster, "/../../etc/passwd")
            .unwrap_err();
        assert!(matches!(err, CatalogError::ImagePath(_)));
        assert!(!dir.path().join("etc").exists());
    }
}
