//! GitHub REST API source of account statistics.

mod builder;
mod payload;

use airdrop::api::{ActivityEvent, Client, Error, Profile, Result};
use async_trait::async_trait;
pub use builder::GithubClientBuilder;
use log::debug;
use reqwest::Response;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

const EVENTS_PAGE_SIZE: u32 = 100;

pub struct GithubClient {
    client: reqwest::Client,
    github_url: Url,
}

impl GithubClient {
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.github_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Error("GitHub API URL cannot be a base URL."))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl Client for GithubClient {
    async fn user_profile(&self, username: &str) -> Result<Profile> {
        let request_url = self.endpoint(&["users", username])?;
        let response = self.client.get(request_url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(username.to_string()));
        }
        let user = read_response::<payload::User>(response, "user profile").await?;
        Ok(user.into())
    }

    async fn pull_request_count(&self, username: &str) -> Result<u64> {
        let request_url = self.endpoint(&["search", "issues"])?;
        let query = format!("author:{} is:pr is:public", username);
        let response = self.client.get(request_url).query(&[("q", query)]).send().await?;
        let search = read_response::<payload::SearchIssues>(response, "pull requests").await?;
        Ok(search.total_count)
    }

    async fn recent_activity(&self, username: &str) -> Result<Vec<ActivityEvent>> {
        let request_url = self.endpoint(&["users", username, "events"])?;
        let response = self
            .client
            .get(request_url)
            .query(&[("per_page", EVENTS_PAGE_SIZE)])
            .send()
            .await?;
        let events = read_response::<Vec<payload::Event>>(response, "events").await?;
        debug!("Found {} events of {}", events.len(), username);
        Ok(events.into_iter().filter_map(payload::Event::into_activity).collect())
    }
}

async fn read_response<T: DeserializeOwned>(response: Response, resource: &'static str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Retrieval {
            resource,
            status: status.as_u16(),
        });
    }
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use crate::GithubClientBuilder;
    use airdrop::api::{Client, Error, EventKind};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> crate::GithubClient {
        GithubClientBuilder::default()
            .with_github_url(server.uri())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn user_profile_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .and(header("Accept", "application/vnd.github.v3+json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{
                    "login": "octocat",
                    "id": 583231,
                    "created_at": "2011-01-25T18:44:36Z",
                    "public_repos": 8,
                    "followers": 9001
                }"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let profile = client(&server).await.user_profile("octocat").await.unwrap();
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.public_repos, 8);
        assert_eq!(profile.followers, 9001);
        assert_eq!(profile.created_at.to_rfc3339(), "2011-01-25T18:44:36+00:00");
    }

    #[tokio::test]
    async fn missing_user_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/ghost-user"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client(&server).await.user_profile("ghost-user").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(username) if username == "ghost-user"));
    }

    #[tokio::test]
    async fn profile_without_creation_date_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{ "login": "octocat", "public_repos": 8, "followers": 1 }"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let err = client(&server).await.user_profile("octocat").await.unwrap_err();
        assert!(matches!(err, Error::RequestError(_)));
    }

    #[tokio::test]
    async fn pull_request_count_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .and(query_param("q", "author:octocat is:pr is:public"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{ "total_count": 42, "incomplete_results": false, "items": [] }"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let count = client(&server).await.pull_request_count("octocat").await.unwrap();
        assert_eq!(count, 42);
    }

    #[tokio::test]
    async fn default_headers_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .and(header("User-Agent", concat!("airdrop-checker/", env!("CARGO_PKG_VERSION"))))
            .and(header("X-GitHub-Api-Version", "2022-11-28"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{ "total_count": 1 }"#, "application/json"))
            .mount(&server)
            .await;

        let count = client(&server).await.pull_request_count("octocat").await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn failing_profile_lookup_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server).await.user_profile("octocat").await.unwrap_err();
        assert!(matches!(err, Error::Retrieval { status: 500, .. }));
    }

    #[tokio::test]
    async fn rejected_search_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let err = client(&server).await.pull_request_count("octocat").await.unwrap_err();
        assert!(matches!(err, Error::Retrieval { status: 422, .. }));
    }

    #[tokio::test]
    async fn recent_activity_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/events"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"[
                    { "type": "PullRequestEvent", "repo": { "name": "octocat/hello" }, "created_at": "2024-05-01T10:00:00Z" },
                    { "type": "ForkEvent", "repo": { "name": "octocat/hello" }, "created_at": "2024-05-01T11:00:00Z" }
                ]"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let events = client(&server).await.recent_activity("octocat").await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::PullRequestEvent);
    }
}
