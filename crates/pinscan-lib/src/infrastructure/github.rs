use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::Settings;
use crate::domain::{ContentLocation, ContentSource, FetchError};

const USER_AGENT: &str = "pinscan";
const ACCEPT: &str = "application/vnd.github.v3+json";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur when interacting with the Github API
#[derive(Debug, Error)]
pub enum GithubError {
    #[error(
        "GITHUB_TOKEN environment variable is required for this operation.\n\
         Set it with: export GITHUB_TOKEN=<your-token>\n\
         Create a token at: https://github.com/settings/tokens"
    )]
    TokenRequired,

    #[error("failed to create HTTP client")]
    ClientInit(#[source] reqwest::Error),

    #[error("invalid Github API base URL {api_base:?}")]
    ApiBase {
        api_base: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Github API base URL {api_base} cannot hold a path")]
    ApiBasePath { api_base: String },

    #[error("failed to fetch contents from {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Github API returned status {status} for {url}")]
    ApiStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("failed to parse response from {url}")]
    ParseResponse {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unsupported content encoding {encoding:?} for {url}")]
    Encoding { encoding: String, url: String },

    #[error("failed to decode base64 content from {url}")]
    Base64 {
        url: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("content from {url} is not valid UTF-8")]
    Utf8 {
        url: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// File entry returned by the contents API
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    #[serde(default = "default_encoding")]
    encoding: String,
}

fn default_encoding() -> String {
    "base64".to_string()
}

/// Client for the repository contents endpoint of the Github API
pub struct GithubContents {
    client: reqwest::blocking::Client,
    api_base: Url,
    token: Option<String>,
}

impl GithubContents {
    /// Create a client from runtime settings.
    ///
    /// # Errors
    ///
    /// Returns `GithubError::ApiBase` if the configured base URL is invalid, or
    /// `GithubError::ClientInit` if the HTTP client cannot be initialized.
    pub fn from_settings(settings: &Settings) -> Result<Self, GithubError> {
        Self::new(settings.api_base.clone(), settings.github_token.clone())
    }

    /// Create a client against `api_base` with an optional token.
    ///
    /// # Errors
    ///
    /// Returns `GithubError::ApiBase` if `api_base` is not a URL. Fails as well
    /// if the TLS backend cannot be initialized, or the resolver cannot load the
    /// system configuration.
    pub fn new(api_base: String, token: Option<String>) -> Result<Self, GithubError> {
        let api_base = Url::parse(&api_base).map_err(|source| GithubError::ApiBase {
            api_base,
            source,
        })?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(GithubError::ClientInit)?;

        Ok(Self {
            client,
            api_base,
            token,
        })
    }

    /// URL of the contents endpoint for a file at a given ref. Path segments
    /// and the ref are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns `GithubError::ApiBasePath` if the base URL cannot hold a path.
    pub fn contents_url(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<Url, GithubError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| GithubError::ApiBasePath {
                api_base: self.api_base.to_string(),
            })?
            .pop_if_empty()
            .extend(["repos", owner, repo, "contents"])
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        url.query_pairs_mut().append_pair("ref", git_ref);
        Ok(url)
    }

    /// Fetch a file's text from a repository at the given ref.
    ///
    /// # Errors
    ///
    /// Returns `GithubError::TokenRequired` if the client does not have a token.
    /// Returns `GithubError::ApiStatus` for non-success responses, and a decoding
    /// error if the payload is not base64 encoded UTF-8.
    pub fn fetch_workflow_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<String, GithubError> {
        let token = self.token.as_ref().ok_or(GithubError::TokenRequired)?;
        let url = self.contents_url(owner, repo, path, git_ref)?.to_string();

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .header("Accept", ACCEPT)
            .send()
            .map_err(|source| GithubError::Request {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(GithubError::ApiStatus {
                status: response.status(),
                url,
            });
        }

        let contents: ContentsResponse =
            response
                .json()
                .map_err(|source| GithubError::ParseResponse {
                    url: url.clone(),
                    source,
                })?;

        if contents.encoding != "base64" {
            return Err(GithubError::Encoding {
                encoding: contents.encoding,
                url,
            });
        }

        decode_content(&contents.content).map_err(|e| match e {
            ContentDecodeError::Base64(source) => GithubError::Base64 { url, source },
            ContentDecodeError::Utf8(source) => GithubError::Utf8 { url, source },
        })
    }
}

#[derive(Debug)]
enum ContentDecodeError {
    Base64(base64::DecodeError),
    Utf8(std::string::FromUtf8Error),
}

/// Decode the base64 payload of the contents API. The API wraps lines, so
/// whitespace is dropped before decoding.
fn decode_content(encoded: &str) -> Result<String, ContentDecodeError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(ContentDecodeError::Base64)?;
    String::from_utf8(bytes).map_err(ContentDecodeError::Utf8)
}

impl ContentSource for GithubContents {
    fn fetch(&self, location: &ContentLocation) -> Result<String, FetchError> {
        self.fetch_workflow_content(
            &location.owner,
            &location.repo,
            &location.path,
            &location.git_ref,
        )
        .map_err(|e| match e {
            GithubError::TokenRequired => FetchError::TokenRequired,
            _ => FetchError::Failed {
                location: location.clone(),
                reason: e.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contents_url_includes_ref() {
        let client = GithubContents::new("https://api.github.com/".to_string(), None).unwrap();
        let url = client
            .contents_url("octo", "app", ".github/workflows/ci.yml", "abc123")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/octo/app/contents/.github/workflows/ci.yml?ref=abc123"
        );
    }

    #[test]
    fn contents_url_keeps_enterprise_prefix() {
        let client =
            GithubContents::new("https://ghe.example.com/api/v3".to_string(), None).unwrap();
        let url = client
            .contents_url("octo", "app", "/.github/workflows/ci.yml", "main")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/octo/app/contents/.github/workflows/ci.yml?ref=main"
        );
    }

    #[test]
    fn contents_url_encodes_path_and_ref() {
        let client = GithubContents::new("https://api.github.com".to_string(), None).unwrap();
        let url = client
            .contents_url("octo", "app", ".github/workflows/my ci#1.yml", "feat/a&b#c")
            .unwrap();

        assert_eq!(
            url.path(),
            "/repos/octo/app/contents/.github/workflows/my%20ci%231.yml"
        );
        assert_eq!(url.query(), Some("ref=feat%2Fa%26b%23c"));
        let refs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(refs, vec![("ref".to_string(), "feat/a&b#c".to_string())]);
    }

    #[test]
    fn invalid_api_base_is_rejected() {
        assert!(matches!(
            GithubContents::new("not a url".to_string(), None),
            Err(GithubError::ApiBase { .. })
        ));
    }

    #[test]
    fn decode_error_is_debuggable() {
        let err = decode_content("!!!").unwrap_err();
        assert!(format!("{err:?}").starts_with("Base64"));
    }

    #[test]
    fn decode_content_ignores_line_wraps() {
        // "name: CI\n" split across lines the way the API returns it
        let decoded = decode_content("bmFtZTog\nQ0kK\n").unwrap();
        assert_eq!(decoded, "name: CI\n");
    }

    #[test]
    fn decode_content_rejects_invalid_base64() {
        assert!(matches!(
            decode_content("!!!"),
            Err(ContentDecodeError::Base64(_))
        ));
    }

    #[test]
    fn fetch_without_token_is_token_required() {
        let client = GithubContents::new("https://api.github.com".to_string(), None).unwrap();
        let location = ContentLocation {
            owner: "octo".to_string(),
            repo: "app".to_string(),
            path: ".github/workflows/ci.yml".to_string(),
            git_ref: "main".to_string(),
        };

        let err = client.fetch(&location).unwrap_err();
        assert!(matches!(err, FetchError::TokenRequired));
    }
}
