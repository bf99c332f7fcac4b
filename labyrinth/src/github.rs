// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// GitHub GraphQL collaborator.
///
/// Fetches the user snapshot behind [`GithubStats`] and per-language byte
/// totals. Network access is isolated in the `fetch_*` functions; the
/// summarizers work on decoded responses and are tested offline.
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use masterror::AppError;
use octocrab::Octocrab;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::{
    attributes::GithubStats,
    retry::{RetryConfig, retry_with_backoff},
    streak::{ContributionWeek, compute_streaks_from_weeks},
};

const STATS_QUERY: &str = r#"
query ($login: String!) {
  user(login: $login) {
    repositories(first: 100, ownerAffiliations: OWNER, orderBy: { field: STARGAZERS, direction: DESC }) {
      nodes {
        stargazerCount
        primaryLanguage { name }
      }
    }
    contributionsCollection {
      totalCommitContributions
      restrictedContributionsCount
      totalPullRequestContributions
      totalIssueContributions
      contributionCalendar {
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
      totalRepositoriesWithContributedCommits
    }
    pullRequests(first: 1) { totalCount }
    issues(first: 1) { totalCount }
    followers { totalCount }
    createdAt
  }
}
"#;

const LANGUAGE_BYTES_QUERY: &str = r#"
query ($login: String!) {
  user(login: $login) {
    repositories(first: 100, ownerAffiliations: OWNER, orderBy: { field: UPDATED_AT, direction: DESC }) {
      nodes {
        languages(first: 10, orderBy: { field: SIZE, direction: DESC }) {
          edges {
            size
            node { name }
          }
        }
      }
    }
  }
}
"#;

/// Top-level GraphQL response body.
#[derive(Debug, Clone, Deserialize,)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct GraphqlEnvelope<T,>
{
    #[serde(default)]
    pub data:   Option<T,>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError,>,>,
}

/// Error entry reported by the GraphQL endpoint.
#[derive(Debug, Clone, Deserialize,)]
pub struct GraphqlError
{
    pub message: String,
}

impl<T,> GraphqlEnvelope<T,>
{
    /// Extracts the payload, turning reported errors or a missing payload
    /// into a service error.
    pub fn into_data(self,) -> Result<T, AppError,>
    {
        if let Some(errors,) = self.errors
            && !errors.is_empty()
        {
            let messages: Vec<String,> = errors.into_iter().map(|e| e.message,).collect();
            return Err(AppError::service(format!(
                "GitHub GraphQL error: {}",
                messages.join("; ")
            ),),);
        }
        self.data
            .ok_or_else(|| AppError::service("GitHub GraphQL response has no data",),)
    }
}

/// `user` wrapper of both queries; GitHub returns `null` for unknown logins.
#[derive(Debug, Clone, Deserialize,)]
pub struct UserData<U,>
{
    pub user: Option<U,>,
}

#[derive(Debug, Clone, Deserialize,)]
#[serde(bound(deserialize = "N: Deserialize<'de>"))]
pub struct Nodes<N,>
{
    #[serde(default)]
    pub nodes: Vec<N,>,
}

#[derive(Debug, Clone, Copy, Deserialize,)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount
{
    pub total_count: u64,
}

#[derive(Debug, Clone, Deserialize,)]
pub struct LanguageName
{
    pub name: String,
}

#[derive(Debug, Clone, Deserialize,)]
#[serde(rename_all = "camelCase")]
pub struct StarredRepository
{
    pub stargazer_count:  u64,
    pub primary_language: Option<LanguageName,>,
}

#[derive(Debug, Clone, Deserialize,)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar
{
    #[serde(default)]
    pub weeks: Vec<ContributionWeek,>,
}

#[derive(Debug, Clone, Deserialize,)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection
{
    pub total_commit_contributions:                  u64,
    pub restricted_contributions_count:              u64,
    pub total_pull_request_contributions:            u64,
    pub total_issue_contributions:                   u64,
    pub contribution_calendar:                       ContributionCalendar,
    pub total_repositories_with_contributed_commits: u64,
}

/// Decoded `user` node of the stats query.
#[derive(Debug, Clone, Deserialize,)]
#[serde(rename_all = "camelCase")]
pub struct StatsUser
{
    pub repositories:             Nodes<StarredRepository,>,
    pub contributions_collection: ContributionsCollection,
    pub pull_requests:            TotalCount,
    pub issues:                   TotalCount,
    pub followers:                TotalCount,
    pub created_at:               DateTime<Utc,>,
}

#[derive(Debug, Clone, Deserialize,)]
pub struct LanguageEdge
{
    pub size: u64,
    pub node: LanguageName,
}

#[derive(Debug, Clone, Deserialize,)]
pub struct LanguageEdges
{
    #[serde(default)]
    pub edges: Vec<LanguageEdge,>,
}

#[derive(Debug, Clone, Deserialize,)]
pub struct LanguageRepository
{
    pub languages: LanguageEdges,
}

/// Decoded `user` node of the language bytes query.
#[derive(Debug, Clone, Deserialize,)]
pub struct LanguagesUser
{
    pub repositories: Nodes<LanguageRepository,>,
}

/// Most frequent primary language; the first language to reach the maximum
/// count wins ties.
fn top_language(repositories: &[StarredRepository],) -> Option<String,>
{
    let mut counts: Vec<(&str, u32,),> = Vec::new();
    for name in repositories
        .iter()
        .filter_map(|repo| repo.primary_language.as_ref().map(|lang| lang.name.as_str(),),)
    {
        match counts.iter_mut().find(|(seen, _,)| *seen == name,) {
            Some((_, count,),) => *count += 1,
            None => counts.push((name, 1,),),
        }
    }

    let mut best: Option<(&str, u32,),> = None;
    for (name, count,) in counts {
        if best.is_none_or(|(_, max,)| count > max,) {
            best = Some((name, count,),);
        }
    }
    best.map(|(name, _,)| name.to_owned(),)
}

/// Builds a [`GithubStats`] snapshot from a decoded stats response.
///
/// `today` is the UTC date used for the streak grace rule.
pub fn summarize_stats(user: &StatsUser, today: NaiveDate,) -> GithubStats
{
    let contributions = &user.contributions_collection;
    let streaks = compute_streaks_from_weeks(&contributions.contribution_calendar.weeks, today,);

    GithubStats {
        total_stars:         user.repositories.nodes.iter().map(|repo| repo.stargazer_count,).sum(),
        total_commits:       contributions.total_commit_contributions
            + contributions.restricted_contributions_count,
        total_prs:           user.pull_requests.total_count,
        total_issues:        user.issues.total_count,
        top_language:        top_language(&user.repositories.nodes,),
        current_streak:      streaks.current_streak,
        longest_streak:      streaks.longest_streak,
        followers:           user.followers.total_count,
        created_at:          user.created_at,
        total_contributions: contributions.total_commit_contributions
            + contributions.restricted_contributions_count
            + contributions.total_pull_request_contributions
            + contributions.total_issue_contributions,
        contributed_repos:   contributions.total_repositories_with_contributed_commits,
    }
}

/// Sums language edge sizes across repositories, keyed by GitHub's language
/// name.
pub fn aggregate_language_bytes(user: &LanguagesUser,) -> BTreeMap<String, u64,>
{
    let mut totals = BTreeMap::new();
    for edge in user.repositories.nodes.iter().flat_map(|repo| &repo.languages.edges,) {
        let total = totals.entry(edge.node.name.clone(),).or_insert(0u64,);
        *total = total.saturating_add(edge.size,);
    }
    totals
}

/// Creates an Octocrab client, authenticated when a token is supplied.
///
/// # Errors
///
/// Returns [`AppError`] when the client cannot be constructed.
pub fn build_client(token: Option<&str,>,) -> Result<Octocrab, AppError,>
{
    let builder = Octocrab::builder();
    let builder = match token {
        Some(token,) if !token.trim().is_empty() => builder.personal_token(token.trim().to_owned(),),
        _ => builder,
    };
    builder
        .build()
        .map_err(|e| AppError::service(format!("failed to build GitHub client: {e}"),),)
}

async fn query_user<U,>(
    octocrab: &Octocrab,
    query: &'static str,
    login: &str,
    operation_name: &str,
    retry_config: &RetryConfig,
) -> Result<U, AppError,>
where
    U: serde::de::DeserializeOwned + Send + 'static,
{
    let payload = json!({ "query": query, "variables": { "login": login } });

    let envelope: GraphqlEnvelope<UserData<U,>,> =
        retry_with_backoff(retry_config, operation_name, || {
            let octocrab = octocrab.clone();
            let payload = payload.clone();
            async move {
                octocrab
                    .graphql(&payload,)
                    .await
                    .map_err(|e| AppError::service(format!("GitHub GraphQL request failed: {e}"),),)
            }
        },)
        .await?;

    envelope
        .into_data()?
        .user
        .ok_or_else(|| AppError::service(format!("GitHub user '{login}' not found"),),)
}

/// Fetches the statistics snapshot for `login`.
///
/// # Errors
///
/// Returns [`AppError`] when the request fails after retries, GitHub reports
/// errors, or the user does not exist.
///
/// # Example
///
/// ```no_run
/// use labyrinth::{RetryConfig, build_client, fetch_github_stats};
/// use masterror::AppError;
///
/// # async fn example() -> Result<(), AppError> {
/// let octocrab = build_client(Some("token",),)?;
/// let today = chrono::Utc::now().date_naive();
/// let stats = fetch_github_stats(&octocrab, "octocat", &RetryConfig::default(), today,).await?;
/// println!("{} stars", stats.total_stars);
/// # Ok(())
/// # }
/// ```
pub async fn fetch_github_stats(
    octocrab: &Octocrab,
    login: &str,
    retry_config: &RetryConfig,
    today: NaiveDate,
) -> Result<GithubStats, AppError,>
{
    debug!("Fetching GitHub stats for {}", login);
    let user: StatsUser = query_user(
        octocrab,
        STATS_QUERY,
        login,
        &format!("stats for {login}"),
        retry_config,
    )
    .await?;

    let stats = summarize_stats(&user, today,);
    info!(
        login,
        stars = stats.total_stars,
        commits = stats.total_commits,
        current_streak = stats.current_streak,
        "fetched GitHub stats"
    );
    Ok(stats,)
}

/// Fetches per-language byte totals across repositories owned by `login`.
///
/// # Errors
///
/// Same failure modes as [`fetch_github_stats`].
pub async fn fetch_language_bytes(
    octocrab: &Octocrab,
    login: &str,
    retry_config: &RetryConfig,
) -> Result<BTreeMap<String, u64,>, AppError,>
{
    debug!("Fetching language bytes for {}", login);
    let user: LanguagesUser = query_user(
        octocrab,
        LANGUAGE_BYTES_QUERY,
        login,
        &format!("language bytes for {login}"),
        retry_config,
    )
    .await?;

    let totals = aggregate_language_bytes(&user,);
    info!(login, languages = totals.len(), "fetched language bytes");
    Ok(totals,)
}
