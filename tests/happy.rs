use airdrop::CheckError;
use airdrop_checker_app::{check, ClientArgs, Error};
use chrono::{Duration, SecondsFormat, Utc};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DAYS_PER_DECADE: i64 = 3653;

fn client_args(server: &MockServer) -> ClientArgs {
    ClientArgs {
        api_token: None,
        api_url: server.uri(),
    }
}

async fn mock_user(server: &MockServer, login: &str, created_days_ago: i64, public_repos: u64, followers: u64) {
    let created_at = (Utc::now() - Duration::days(created_days_ago)).to_rfc3339_opts(SecondsFormat::Secs, true);
    let body = format!(
        r#"{{
            "login": "{}",
            "id": 1,
            "type": "User",
            "created_at": "{}",
            "public_repos": {},
            "followers": {}
        }}"#,
        login, created_at, public_repos, followers
    );
    Mock::given(method("GET"))
        .and(path(format!("/users/{}", login)))
        .and(header("Accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(server)
        .await;
}

async fn mock_pull_requests(server: &MockServer, login: &str, total_count: u64) {
    let body = format!(
        r#"{{ "total_count": {}, "incomplete_results": false, "items": [] }}"#,
        total_count
    );
    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .and(query_param("q", format!("author:{} is:pr is:public", login)))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn happy_path_veteran() {
    let server = MockServer::start().await;
    mock_user(&server, "octocat", DAYS_PER_DECADE, 20, 100).await;
    mock_pull_requests(&server, "octocat", 10).await;

    let result = check(client_args(&server), "octocat").await.unwrap();

    assert_eq!(result.username, "octocat");
    assert_eq!(result.account_age_years, 10);
    assert_eq!(result.public_repos, 20);
    assert_eq!(result.followers, 100);
    assert_eq!(result.pull_requests, 10);
    assert_eq!(result.score, 340);
    assert_eq!(result.allocation, 5000);
}

#[tokio::test]
async fn happy_path_newcomer() {
    let server = MockServer::start().await;
    mock_user(&server, "newcomer", 30, 1, 2).await;
    mock_pull_requests(&server, "newcomer", 0).await;

    let result = check(client_args(&server), "  newcomer  ").await.unwrap();

    assert_eq!(result.account_age_years, 0);
    assert_eq!(result.score, 6);
    assert_eq!(result.allocation, 100);
}

#[tokio::test]
async fn unknown_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ghost-user"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(r#"{ "message": "Not Found" }"#, "application/json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let err = check(client_args(&server), "ghost-user").await.unwrap_err();

    assert!(matches!(&err, Error::Check(CheckError::NotFound(username)) if username == "ghost-user"));
    assert!(err.to_string().contains("ghost-user"));
}

#[tokio::test]
async fn blank_username_never_reaches_github() {
    let server = MockServer::start().await;

    let err = check(client_args(&server), "   ").await.unwrap_err();

    assert!(matches!(err, Error::Check(CheckError::Validation)));
    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "No request should be sent for a blank username");
}

#[tokio::test]
async fn failing_search_is_retrieval_error() {
    let server = MockServer::start().await;
    mock_user(&server, "octocat", DAYS_PER_DECADE, 20, 100).await;
    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = check(client_args(&server), "octocat").await.unwrap_err();

    assert!(matches!(err, Error::Check(CheckError::Retrieval)));
}

#[tokio::test]
async fn malformed_profile_is_unexpected_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{ "login": "octocat", "created_at": "yesterday", "public_repos": 1, "followers": 1 }"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    mock_pull_requests(&server, "octocat", 1).await;

    let err = check(client_args(&server), "octocat").await.unwrap_err();

    assert!(matches!(err, Error::Check(CheckError::Unexpected)));
    assert_eq!(err.to_string(), "Something went wrong while processing your request.");
}
