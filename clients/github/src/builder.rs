use crate::GithubClient;
use airdrop::api::Result;
use reqwest::header;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use url::Url;

const DEFAULT_GITHUB_URL: &str = "https://api.github.com";
const DEFAULT_USER_AGENT: &str = concat!("airdrop-checker/", env!("CARGO_PKG_VERSION"));

pub struct GithubClientBuilder {
    client_builder: ClientBuilder,
    github_url: String,
    headers: HeaderMap,
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        let mut headers = HeaderMap::default();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));
        headers.insert(
            HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static("2022-11-28"),
        );
        Self {
            client_builder: ClientBuilder::default(),
            github_url: DEFAULT_GITHUB_URL.to_string(),
            headers,
        }
    }
}

impl GithubClientBuilder {
    pub fn try_with_token(self, token: secrecy::SecretString) -> Result<GithubClientBuilder> {
        Ok(self.try_with_header(header::AUTHORIZATION, format!("Bearer {}", token.expose_secret()))?)
    }

    pub fn with_github_url<STR: AsRef<str>>(mut self, url: STR) -> GithubClientBuilder {
        self.github_url = url.as_ref().to_string();
        self
    }

    fn try_with_header(mut self, key: HeaderName, val: impl AsRef<str>) -> anyhow::Result<GithubClientBuilder> {
        let mut val = HeaderValue::from_str(val.as_ref())?;
        if key == header::AUTHORIZATION {
            val.set_sensitive(true);
        }
        self.headers.insert(key, val);
        Ok(self)
    }

    pub fn build(self) -> Result<GithubClient> {
        let github_url = Url::parse(&self.github_url).map_err(anyhow::Error::from)?;
        if github_url.cannot_be_a_base() {
            return Err(airdrop::api::Error::Error("GitHub API URL cannot be a base URL."));
        }
        let client = self.client_builder.default_headers(self.headers).build()?;
        Ok(GithubClient { client, github_url })
    }
}

#[test]
fn rejects_unusable_url_test() {
    let err = GithubClientBuilder::default()
        .with_github_url("mailto:octocat@github.com")
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, airdrop::api::Error::Error(_)));

    let err = GithubClientBuilder::default().with_github_url("not a url").build().err().unwrap();
    assert!(matches!(err, airdrop::api::Error::Other(_)));
}
