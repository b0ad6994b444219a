//! Data sources: the live GitHub API or the static mock fixture.

use chrono::{DateTime, Utc};

use crate::activity::{collect_from_github, MaintainerActivity};
use crate::github::{GithubClient, GithubError};

const MOCK_FIXTURE: &str = include_str!("../fixtures/mock_activity.json");

pub enum Source {
  Github(GithubClient),
  /// Static data for one maintainer; other usernames are not found.
  Mock(Box<MaintainerActivity>),
}

impl Source {
  /// The bundled fixture.
  pub fn mock() -> Result<Self, serde_json::Error> {
    let activity: MaintainerActivity = serde_json::from_str(MOCK_FIXTURE)?;
    Ok(Self::Mock(Box::new(activity)))
  }

  pub fn name(&self) -> &'static str {
    match self {
      Self::Github(_) => "github",
      Self::Mock(_) => "mock",
    }
  }

  pub async fn maintainer_activity(
    &self,
    username: &str,
    max_repositories: usize,
    now: DateTime<Utc>,
  ) -> Result<MaintainerActivity, GithubError> {
    match self {
      Self::Github(client) => collect_from_github(client, username, max_repositories, now).await,
      Self::Mock(activity) => {
        if !activity.user.login.eq_ignore_ascii_case(username) {
          return Err(GithubError::NotFound(format!("users/{}", username)));
        }
        let mut activity = activity.as_ref().clone();
        activity.repositories.truncate(max_repositories);
        activity.fetched_at = now;
        Ok(activity)
      }
    }
  }
}
