//! Pure derivations over a `MaintainerActivity`: the texts to score, review
//! and issue summaries, and the inputs to the impact score.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use impact_engine::health::percent_change;
use impact_engine::{
  ActivitySummary, ContributorSummary, Engine, Granularity, ImpactInputs, MentorshipSummary,
  RepositoryHealthInput, RepositoryHeatmapEntry, RepositoryMetrics, ScoredSample, SentimentTrend,
};
use sentiment_engine::{maintainer_personality, Analyzer, PersonalityTraits, Sentiment, SentimentResult};
use serde::{Deserialize, Serialize};

use crate::activity::{MaintainerActivity, RepositoryActivity};
use crate::config::MAX_ACTIVITY_WINDOW_DAYS;
use crate::github::{Account, Label};

/// Number of most recent reviews returned with a review summary.
const RECENT_REVIEWS: usize = 10;

fn is_user(account: Option<&Account>, username: &str) -> bool {
  account.is_some_and(|a| a.login.eq_ignore_ascii_case(username))
}

/// A human other than the maintainer.
fn is_contributor(account: Option<&Account>, username: &str) -> bool {
  account.is_some_and(|a| !a.is_bot() && !a.login.eq_ignore_ascii_case(username))
}

fn matches_repo(repo: &RepositoryActivity, filter: Option<&str>) -> bool {
  match filter {
    Some(name) => {
      repo.repository.full_name.eq_ignore_ascii_case(name)
        || repo.repository.name.eq_ignore_ascii_case(name)
    }
    None => true,
  }
}

fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
  (to - from).num_seconds() as f64 / 3600.0
}

fn mean(values: &[f64]) -> f64 {
  if values.is_empty() {
    return 0.0;
  }
  values.iter().sum::<f64>() / values.len() as f64
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// One piece of maintainer-authored text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSample {
  pub text: String,
  pub timestamp: DateTime<Utc>,
  pub repository: String,
}

/// Review bodies and issue comments written by `username`, oldest first.
/// Empty bodies and reviews without a submission time are skipped.
pub fn text_samples(
  activity: &MaintainerActivity,
  username: &str,
  repo: Option<&str>,
) -> Vec<TextSample> {
  let mut samples = Vec::new();
  for repository in activity.repositories.iter().filter(|r| matches_repo(r, repo)) {
    let name = &repository.repository.full_name;
    let reviews = repository.pulls.iter().flat_map(|p| &p.reviews);
    for review in reviews.filter(|r| is_user(r.user.as_ref(), username)) {
      if let (Some(body), Some(at)) = (review.body.as_deref(), review.submitted_at) {
        if !body.trim().is_empty() {
          samples.push(TextSample {
            text: body.to_string(),
            timestamp: at,
            repository: name.clone(),
          });
        }
      }
    }
    for comment in repository
      .comments
      .iter()
      .filter(|c| is_user(c.user.as_ref(), username))
    {
      if let Some(body) = comment.body.as_deref().filter(|b| !b.trim().is_empty()) {
        samples.push(TextSample {
          text: body.to_string(),
          timestamp: comment.created_at,
          repository: name.clone(),
        });
      }
    }
  }
  samples.sort_by_key(|s| s.timestamp);
  samples
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Distribution {
  pub positive: u32,
  pub neutral: u32,
  pub negative: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentReport {
  pub total_samples: usize,
  pub distribution: Distribution,
  pub average_score: f64,
  pub granularity: Granularity,
  pub results: Vec<SentimentResult>,
  pub trends: Vec<SentimentTrend>,
  pub daily: Vec<SentimentTrend>,
  pub heatmap: Vec<RepositoryHeatmapEntry>,
  pub personality: PersonalityTraits,
}

/// Score every sample (through the memoizing analyzer) and aggregate.
/// The daily window ends at `today`.
pub fn sentiment_report(
  engine: &Engine,
  analyzer: &mut Analyzer,
  samples: &[TextSample],
  granularity: Granularity,
  today: NaiveDate,
) -> SentimentReport {
  let results: Vec<SentimentResult> = samples.iter().map(|s| analyzer.score(&s.text)).collect();
  let scored: Vec<ScoredSample> = samples
    .iter()
    .zip(&results)
    .map(|(s, r)| ScoredSample::from_result(r, s.repository.clone(), s.timestamp))
    .collect();

  let mut distribution = Distribution::default();
  for r in &results {
    match r.sentiment {
      Sentiment::Positive => distribution.positive += 1,
      Sentiment::Neutral => distribution.neutral += 1,
      Sentiment::Negative => distribution.negative += 1,
    }
  }
  let scores: Vec<f64> = results.iter().map(|r| r.score).collect();
  let traits: Vec<PersonalityTraits> = results.iter().map(|r| r.personality).collect();

  SentimentReport {
    total_samples: samples.len(),
    distribution,
    average_score: mean(&scores),
    granularity,
    trends: engine.trends(&scored, granularity),
    daily: engine.daily(&scored, today),
    heatmap: engine.heatmap(&scored),
    personality: maintainer_personality(&traits),
    results,
  }
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
  pub repo: Option<String>,
  /// Review state, case-insensitive (`approved`, `changes_requested`, `commented`).
  pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryReviewCount {
  pub repository: String,
  pub reviews: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
  pub repository: String,
  pub pull_number: u64,
  pub pull_title: String,
  pub state: String,
  pub body: Option<String>,
  pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
  pub total_reviews: u32,
  pub approved: u32,
  pub changes_requested: u32,
  pub commented: u32,
  pub dismissed: u32,
  pub reviewed_pulls: u32,
  /// Mean hours from a pull being opened to the maintainer's first review of it.
  pub average_response_hours: f64,
  pub by_repository: Vec<RepositoryReviewCount>,
  pub recent: Vec<ReviewItem>,
}

pub fn review_summary(
  activity: &MaintainerActivity,
  username: &str,
  filter: &ReviewFilter,
) -> ReviewSummary {
  let mut items = Vec::new();
  let mut by_repository = Vec::new();
  let mut response_hours = Vec::new();

  for repository in activity
    .repositories
    .iter()
    .filter(|r| matches_repo(r, filter.repo.as_deref()))
  {
    let name = &repository.repository.full_name;
    let mut count = 0;
    for entry in &repository.pulls {
      let reviews: Vec<_> = entry
        .reviews
        .iter()
        .filter(|r| is_user(r.user.as_ref(), username))
        .filter(|r| match &filter.state {
          Some(state) => r.state.eq_ignore_ascii_case(state),
          None => true,
        })
        .collect();
      if reviews.is_empty() {
        continue;
      }
      if let Some(first) = reviews.iter().filter_map(|r| r.submitted_at).min() {
        response_hours.push(hours_between(entry.pull.created_at, first).max(0.0));
      }
      count += reviews.len() as u32;
      items.extend(reviews.into_iter().map(|r| ReviewItem {
        repository: name.clone(),
        pull_number: entry.pull.number,
        pull_title: entry.pull.title.clone(),
        state: r.state.clone(),
        body: r.body.clone(),
        submitted_at: r.submitted_at,
      }));
    }
    if count > 0 {
      by_repository.push(RepositoryReviewCount {
        repository: name.clone(),
        reviews: count,
      });
    }
  }

  let count_state = |s: &str| items.iter().filter(|i| i.state.eq_ignore_ascii_case(s)).count() as u32;
  let summary_counts = (
    count_state("APPROVED"),
    count_state("CHANGES_REQUESTED"),
    count_state("COMMENTED"),
    count_state("DISMISSED"),
  );

  items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
  let total_reviews = items.len() as u32;
  items.truncate(RECENT_REVIEWS);

  ReviewSummary {
    total_reviews,
    approved: summary_counts.0,
    changes_requested: summary_counts.1,
    commented: summary_counts.2,
    dismissed: summary_counts.3,
    reviewed_pulls: response_hours.len() as u32,
    average_response_hours: mean(&response_hours),
    by_repository,
    recent: items,
  }
}

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

/// Ordered most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  Critical,
  High,
  Medium,
  Low,
  None,
}

impl Priority {
  pub fn parse(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "critical" | "p0" => Some(Self::Critical),
      "high" | "p1" => Some(Self::High),
      "medium" | "p2" => Some(Self::Medium),
      "low" | "p3" => Some(Self::Low),
      "none" => Some(Self::None),
      _ => None,
    }
  }

  /// The most urgent priority named by any word of any label.
  pub fn from_labels(labels: &[Label]) -> Self {
    labels
      .iter()
      .flat_map(|l| l.name.split(|c: char| !c.is_ascii_alphanumeric()))
      .filter_map(|word| match Self::parse(word) {
        Some(Self::None) | None => None,
        p => p,
      })
      .min()
      .unwrap_or(Self::None)
  }
}

#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
  pub repo: Option<String>,
  /// `open` or `closed`.
  pub state: Option<String>,
  pub priority: Option<Priority>,
  /// Every listed label must be present (case-insensitive).
  pub labels: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
  pub critical: u32,
  pub high: u32,
  pub medium: u32,
  pub low: u32,
  pub none: u32,
}

impl PriorityCounts {
  fn add(&mut self, p: Priority) {
    match p {
      Priority::Critical => self.critical += 1,
      Priority::High => self.high += 1,
      Priority::Medium => self.medium += 1,
      Priority::Low => self.low += 1,
      Priority::None => self.none += 1,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriagedIssue {
  pub repository: String,
  pub number: u64,
  pub title: String,
  pub state: String,
  pub priority: Priority,
  pub labels: Vec<String>,
  pub comments: u32,
  pub created_at: DateTime<Utc>,
  pub closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTriage {
  pub total: u32,
  pub open: u32,
  pub closed: u32,
  pub by_priority: PriorityCounts,
  /// Mean open-to-close time of the closed issues in the result.
  pub average_close_hours: f64,
  /// Most urgent first, newest first within a priority.
  pub issues: Vec<TriagedIssue>,
}

/// Issues (pull requests excluded) across the maintainer's repositories.
pub fn issue_triage(activity: &MaintainerActivity, filter: &IssueFilter) -> IssueTriage {
  let wanted_labels: Vec<String> = filter.labels.iter().map(|l| l.to_ascii_lowercase()).collect();

  let mut issues: Vec<TriagedIssue> = activity
    .repositories
    .iter()
    .filter(|r| matches_repo(r, filter.repo.as_deref()))
    .flat_map(|r| {
      r.issues
        .iter()
        .filter(|i| !i.is_pull_request())
        .map(move |i| TriagedIssue {
          repository: r.repository.full_name.clone(),
          number: i.number,
          title: i.title.clone(),
          state: i.state.clone(),
          priority: Priority::from_labels(&i.labels),
          labels: i.labels.iter().map(|l| l.name.clone()).collect(),
          comments: i.comments,
          created_at: i.created_at,
          closed_at: i.closed_at,
        })
    })
    .filter(|i| match &filter.state {
      Some(state) => i.state.eq_ignore_ascii_case(state),
      None => true,
    })
    .filter(|i| filter.priority.map_or(true, |p| i.priority == p))
    .filter(|i| {
      wanted_labels
        .iter()
        .all(|w| i.labels.iter().any(|l| l.to_ascii_lowercase() == *w))
    })
    .collect();

  issues.sort_by(|a, b| {
    a.priority
      .cmp(&b.priority)
      .then_with(|| b.created_at.cmp(&a.created_at))
  });

  let mut by_priority = PriorityCounts::default();
  let mut close_hours = Vec::new();
  let mut open = 0;
  for issue in &issues {
    by_priority.add(issue.priority);
    match issue.closed_at {
      Some(closed) => close_hours.push(hours_between(issue.created_at, closed).max(0.0)),
      None => open += 1,
    }
  }

  IssueTriage {
    total: issues.len() as u32,
    open,
    closed: issues.len() as u32 - open,
    by_priority,
    average_close_hours: mean(&close_hours),
    issues,
  }
}

// ---------------------------------------------------------------------------
// Impact inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
  Current,
  Previous,
}

/// Two consecutive windows of `days` ending at `now`; `days` is clamped to the configurable range.
#[derive(Debug, Clone, Copy)]
struct Windows {
  now: DateTime<Utc>,
  length: Duration,
}

impl Windows {
  fn new(now: DateTime<Utc>, days: i64) -> Self {
    Self {
      now,
      length: Duration::days(days.clamp(1, MAX_ACTIVITY_WINDOW_DAYS)),
    }
  }

  fn of(&self, t: DateTime<Utc>) -> Option<Window> {
    if t > self.now {
      None
    } else if t >= self.now - self.length {
      Some(Window::Current)
    } else if t >= self.now - self.length - self.length {
      Some(Window::Previous)
    } else {
      None
    }
  }

  fn count<I: IntoIterator<Item = DateTime<Utc>>>(&self, times: I) -> (u32, u32) {
    times.into_iter().fold((0, 0), |(cur, prev), t| match self.of(t) {
      Some(Window::Current) => (cur + 1, prev),
      Some(Window::Previous) => (cur, prev + 1),
      None => (cur, prev),
    })
  }
}

/// Pull request authors (humans other than the maintainer) per window.
fn authors_by_window<'a>(
  repos: impl IntoIterator<Item = &'a RepositoryActivity>,
  username: &str,
  windows: &Windows,
) -> (HashSet<String>, HashSet<String>) {
  let mut current = HashSet::new();
  let mut previous = HashSet::new();
  for repo in repos {
    for entry in &repo.pulls {
      let pull = &entry.pull;
      if !is_contributor(pull.user.as_ref(), username) {
        continue;
      }
      let Some(author) = pull.user.as_ref().map(|a| a.login.to_ascii_lowercase()) else {
        continue;
      };
      match windows.of(pull.created_at) {
        Some(Window::Current) => {
          current.insert(author);
        }
        Some(Window::Previous) => {
          previous.insert(author);
        }
        None => {}
      }
    }
  }
  (current, previous)
}

pub fn repository_metrics(repo: &RepositoryActivity) -> RepositoryMetrics {
  RepositoryMetrics {
    stars: repo.repository.stargazers_count,
    forks: repo.repository.forks_count,
    contributors: repo.contributors.len() as u32,
    open_issues: repo.repository.open_issues_count,
  }
}

fn repository_health_input(
  repo: &RepositoryActivity,
  username: &str,
  windows: &Windows,
  previous: Option<&RepositoryMetrics>,
) -> RepositoryHealthInput {
  let now = repository_metrics(repo);
  let (star_growth, fork_growth) = match previous {
    Some(before) => (
      percent_change(before.stars, now.stars),
      percent_change(before.forks, now.forks),
    ),
    None => (0.0, 0.0),
  };

  let issues = repo.issues.iter().filter(|i| !i.is_pull_request());
  let (issues_resolved, _) = windows.count(issues.clone().filter_map(|i| i.closed_at));
  let (prs_merged, _) = windows.count(repo.pulls.iter().filter_map(|p| p.pull.merged_at));

  let (current_authors, previous_authors) = authors_by_window([repo], username, windows);
  let contributor_growth = current_authors.difference(&previous_authors).count();

  let opened = repo
    .pulls
    .iter()
    .map(|p| p.pull.created_at)
    .chain(issues.map(|i| i.created_at));
  let (opened_now, opened_before) = windows.count(opened);

  RepositoryHealthInput {
    repository: repo.repository.full_name.clone(),
    star_growth,
    fork_growth,
    issues_resolved: f64::from(issues_resolved),
    prs_merged: f64::from(prs_merged),
    contributor_growth: contributor_growth as f64,
    activity_growth: percent_change(opened_before, opened_now),
  }
}

const COUNTED_EVENT_TYPES: &[&str] = &[
  "PullRequestReviewEvent",
  "PullRequestReviewCommentEvent",
  "IssueCommentEvent",
];

/// Derive impact inputs from fetched activity. `previous` holds the last stored
/// metrics per repository full name and drives star and fork growth.
pub fn impact_inputs(
  activity: &MaintainerActivity,
  username: &str,
  previous: &HashMap<String, RepositoryMetrics>,
  now: DateTime<Utc>,
  window_days: i64,
) -> ImpactInputs {
  let windows = Windows::new(now, window_days);

  let (current, before) = authors_by_window(&activity.repositories, username, &windows);
  let contributors = ContributorSummary {
    previous_contributors: before.len() as u32,
    retained_contributors: before.intersection(&current).count() as u32,
    new_contributors: current.difference(&before).count() as u32,
  };

  // Mentees: authors whose pulls the maintainer reviewed; successful once merged.
  let mut mentees: BTreeMap<String, bool> = BTreeMap::new();
  for repo in &activity.repositories {
    for entry in &repo.pulls {
      let author = entry.pull.user.as_ref();
      if !is_contributor(author, username) {
        continue;
      }
      let login = author.map(|a| a.login.to_ascii_lowercase()).unwrap_or_default();
      if entry.reviews.iter().any(|r| is_user(r.user.as_ref(), username)) {
        mentees.entry(login).or_insert(false);
      }
    }
  }
  for repo in &activity.repositories {
    for entry in repo.pulls.iter().filter(|p| p.pull.merged_at.is_some()) {
      if let Some(a) = entry.pull.user.as_ref() {
        if let Some(merged) = mentees.get_mut(&a.login.to_ascii_lowercase()) {
          *merged = true;
        }
      }
    }
  }
  let mentorship = MentorshipSummary {
    mentees: mentees.len() as u32,
    successful_mentees: mentees.values().filter(|m| **m).count() as u32,
  };

  let authored = activity.repositories.iter().flat_map(move |r| {
    let reviews = r
      .pulls
      .iter()
      .flat_map(|p| &p.reviews)
      .filter(move |rv| is_user(rv.user.as_ref(), username))
      .filter_map(|rv| rv.submitted_at);
    let comments = r
      .comments
      .iter()
      .filter(move |c| is_user(c.user.as_ref(), username))
      .map(|c| c.created_at);
    reviews.chain(comments)
  });
  // Events of these kinds duplicate reviews and comments already counted above.
  let other_events = activity
    .events
    .iter()
    .filter(|e| !COUNTED_EVENT_TYPES.contains(&e.event_type.as_str()))
    .map(|e| e.created_at);
  let (current_period, previous_period) = windows.count(authored.chain(other_events));

  let repositories = activity
    .repositories
    .iter()
    .map(|r| {
      repository_health_input(r, username, &windows, previous.get(&r.repository.full_name))
    })
    .collect();

  ImpactInputs {
    contributors,
    repositories,
    mentorship,
    activity: ActivitySummary {
      current_period,
      previous_period,
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::source::Source;
  use chrono::TimeZone;

  fn fixture() -> MaintainerActivity {
    match Source::mock().unwrap() {
      Source::Mock(a) => *a,
      Source::Github(_) => unreachable!(),
    }
  }

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap()
  }

  fn label(name: &str) -> Label {
    Label { name: name.into() }
  }

  #[test]
  fn text_samples_are_maintainer_authored_and_ordered() {
    let samples = text_samples(&fixture(), "octo-maintainer", None);
    assert_eq!(samples.len(), 10);
    assert!(samples.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert!(samples.iter().all(|s| s.text != "looks good to me"));

    let gadgets = text_samples(&fixture(), "octo-maintainer", Some("gadgets"));
    assert_eq!(gadgets.len(), 3);
    assert!(gadgets.iter().all(|s| s.repository == "octo-org/gadgets"));
  }

  #[test]
  fn sentiment_report_counts_every_sample() {
    let samples = text_samples(&fixture(), "octo-maintainer", None);
    let mut analyzer = Analyzer::new(16);
    let report = sentiment_report(
      &Engine::with_defaults(),
      &mut analyzer,
      &samples,
      Granularity::Month,
      now().date_naive(),
    );
    let d = report.distribution;
    assert_eq!(report.total_samples, 10);
    assert_eq!(d.positive + d.neutral + d.negative, 10);
    assert_eq!(report.results.len(), 10);
    assert_eq!(report.trends.len(), 2);
    assert_eq!(report.daily.len(), 30);
    assert_eq!(report.heatmap.len(), 2);
  }

  #[test]
  fn review_summary_counts_states_and_response_time() {
    let s = review_summary(&fixture(), "octo-maintainer", &ReviewFilter::default());
    assert_eq!(s.total_reviews, 7);
    assert_eq!((s.approved, s.changes_requested, s.commented), (4, 2, 1));
    assert_eq!(s.dismissed, 0);
    assert_eq!(s.reviewed_pulls, 6);
    assert!((s.average_response_hours - 21.0).abs() < 1e-9);
    assert_eq!(s.by_repository.len(), 2);
    assert_eq!(s.recent[0].pull_number, 49);
  }

  #[test]
  fn review_summary_filters_by_state_and_repo() {
    let filter = ReviewFilter {
      repo: Some("octo-org/widgets".into()),
      state: Some("approved".into()),
    };
    let s = review_summary(&fixture(), "octo-maintainer", &filter);
    assert_eq!(s.total_reviews, 3);
    assert_eq!(s.approved, 3);
    assert_eq!(s.changes_requested, 0);
  }

  #[test]
  fn dismissed_reviews_are_counted_and_filterable() {
    let mut activity = fixture();
    let review = activity
      .repositories
      .iter_mut()
      .flat_map(|r| r.pulls.iter_mut())
      .flat_map(|p| p.reviews.iter_mut())
      .find(|r| is_user(r.user.as_ref(), "octo-maintainer") && r.state == "APPROVED")
      .unwrap();
    review.state = "DISMISSED".into();

    let s = review_summary(&activity, "octo-maintainer", &ReviewFilter::default());
    assert_eq!(s.total_reviews, 7);
    assert_eq!((s.approved, s.dismissed), (3, 1));

    let filter = ReviewFilter {
      repo: None,
      state: Some("dismissed".into()),
    };
    let s = review_summary(&activity, "octo-maintainer", &filter);
    assert_eq!(s.total_reviews, 1);
    assert_eq!(s.dismissed, 1);
    assert_eq!(s.recent[0].state, "DISMISSED");
  }

  #[test]
  fn priority_comes_from_label_words() {
    assert_eq!(Priority::from_labels(&[label("priority: high")]), Priority::High);
    assert_eq!(Priority::from_labels(&[label("bug"), label("P0")]), Priority::Critical);
    assert_eq!(Priority::from_labels(&[label("p3"), label("medium")]), Priority::Medium);
    assert_eq!(Priority::from_labels(&[label("p10")]), Priority::None);
    assert_eq!(Priority::from_labels(&[]), Priority::None);
  }

  #[test]
  fn issue_triage_excludes_pull_requests_and_sorts_by_priority() {
    let t = issue_triage(&fixture(), &IssueFilter::default());
    assert_eq!(t.total, 5);
    assert_eq!((t.open, t.closed), (2, 3));
    assert_eq!(t.by_priority.critical, 1);
    assert_eq!(t.by_priority.none, 2);
    assert_eq!(t.issues[0].number, 10);
    assert!((t.average_close_hours - 392.0).abs() < 1e-9);
  }

  #[test]
  fn issue_triage_filters() {
    let filter = IssueFilter {
      state: Some("open".into()),
      labels: vec!["BUG".into()],
      ..IssueFilter::default()
    };
    let t = issue_triage(&fixture(), &filter);
    assert_eq!(t.total, 1);
    assert_eq!(t.issues[0].priority, Priority::Critical);

    let filter = IssueFilter {
      priority: Some(Priority::Low),
      ..IssueFilter::default()
    };
    assert_eq!(issue_triage(&fixture(), &filter).issues[0].number, 51);
  }

  #[test]
  fn impact_inputs_from_fixture() {
    let inputs = impact_inputs(&fixture(), "octo-maintainer", &HashMap::new(), now(), 30);
    assert_eq!(
      inputs.contributors,
      ContributorSummary {
        previous_contributors: 2,
        retained_contributors: 2,
        new_contributors: 2,
      }
    );
    assert_eq!(
      inputs.mentorship,
      MentorshipSummary {
        mentees: 4,
        successful_mentees: 3,
      }
    );
    assert_eq!(
      inputs.activity,
      ActivitySummary {
        current_period: 8,
        previous_period: 3,
      }
    );

    let widgets = &inputs.repositories[0];
    assert_eq!(widgets.repository, "octo-org/widgets");
    assert_eq!(widgets.issues_resolved, 1.0);
    assert_eq!(widgets.prs_merged, 2.0);
    assert_eq!(widgets.contributor_growth, 2.0);
    assert_eq!(widgets.activity_growth, 500.0);
    assert_eq!(widgets.star_growth, 0.0);
  }

  #[test]
  fn activity_counts_events_not_seen_as_reviews_or_comments() {
    let mut activity = fixture();
    activity.repositories.clear();
    let inputs = impact_inputs(&activity, "octo-maintainer", &HashMap::new(), now(), 30);
    assert_eq!(
      inputs.activity,
      ActivitySummary {
        current_period: 1,
        previous_period: 0,
      }
    );

    activity.events.clear();
    let inputs = impact_inputs(&activity, "octo-maintainer", &HashMap::new(), now(), 30);
    assert_eq!(inputs.activity, ActivitySummary::default());
  }

  #[test]
  fn oversized_window_is_clamped() {
    let inputs = impact_inputs(&fixture(), "octo-maintainer", &HashMap::new(), now(), i64::MAX);
    assert_eq!(inputs.activity.previous_period, 0);
    assert_eq!(inputs.activity.current_period, 11);
  }

  #[test]
  fn star_growth_uses_previous_snapshot() {
    let mut previous = HashMap::new();
    previous.insert(
      "octo-org/widgets".to_string(),
      RepositoryMetrics {
        stars: 100,
        forks: 30,
        contributors: 4,
        open_issues: 5,
      },
    );
    let inputs = impact_inputs(&fixture(), "octo-maintainer", &previous, now(), 30);
    assert!((inputs.repositories[0].star_growth - 20.0).abs() < 1e-9);
    assert_eq!(inputs.repositories[0].fork_growth, 0.0);
    assert_eq!(inputs.repositories[1].star_growth, 0.0);
  }

  #[test]
  fn repository_metrics_reads_counters() {
    let m = repository_metrics(&fixture().repositories[0]);
    assert_eq!(
      m,
      RepositoryMetrics {
        stars: 120,
        forks: 30,
        contributors: 4,
        open_issues: 5,
      }
    );
  }
}
