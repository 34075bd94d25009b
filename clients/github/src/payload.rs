use airdrop::api::{ActivityEvent, EventKind, Profile};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::str::FromStr;

#[derive(Deserialize, Debug)]
pub struct User {
    pub login: String,
    pub created_at: DateTime<Utc>,
    pub public_repos: u64,
    pub followers: u64,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Profile::new(user.login, user.created_at, user.public_repos, user.followers)
    }
}

#[derive(Deserialize, Debug)]
pub struct SearchIssues {
    pub total_count: u64,
}

#[derive(Deserialize, Debug)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: EventRepo,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
pub struct EventRepo {
    pub name: String,
}

impl Event {
    /// `None` for event kinds that are not reported as activity.
    pub fn into_activity(self) -> Option<ActivityEvent> {
        let kind = EventKind::from_str(&self.kind).ok()?;
        Some(ActivityEvent::new(kind, self.repo.name, self.created_at))
    }
}

#[test]
fn event_filter_test() {
    let events: Vec<Event> = serde_json::from_str(
        r#"[
            { "type": "PushEvent", "repo": { "name": "octocat/hello" }, "created_at": "2024-05-01T10:00:00Z" },
            { "type": "WatchEvent", "repo": { "name": "octocat/hello" }, "created_at": "2024-05-01T11:00:00Z" },
            { "type": "IssuesEvent", "repo": { "name": "octocat/spoon" }, "created_at": "2024-05-02T09:30:00Z" }
        ]"#,
    )
    .unwrap();
    let activity: Vec<ActivityEvent> = events.into_iter().filter_map(Event::into_activity).collect();
    assert_eq!(activity.len(), 2);
    assert_eq!(activity[0].kind, EventKind::PushEvent);
    assert_eq!(activity[1].kind, EventKind::IssuesEvent);
    assert_eq!(activity[1].repo, "octocat/spoon");
}
