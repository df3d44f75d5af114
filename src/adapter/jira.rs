//! JIRA adapter
//!
//! Authenticates with HTTP Basic credentials against the JIRA Cloud REST
//! API. A successful `test` proves the credentials by loading the project
//! list and the caller's own profile; a 200 response without a usable
//! `accountId` or project array is still an authentication failure, since
//! some proxies answer unauthenticated requests with empty 200 bodies.

use super::types::{FetchResponse, JiraFilter, JiraProject, TestResponse};
use super::SourceAdapter;
use crate::auth::{AuthConfig, Authenticator};
use crate::config::JiraConfig;
use crate::error::{Error, Result};
use crate::flatten;
use crate::http::{HttpClient, RequestConfig};
use crate::types::{Row, StringMap};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Search page size; no further pagination is attempted
const MAX_RESULTS: u32 = 100;

/// How many searchable filters to merge with favourites
const FILTER_SEARCH_LIMIT: u32 = 20;

/// Fixed issue-field layout: (field path, default display name)
const FIELD_LABELS: &[(&str, &str)] = &[
    ("key", "Key"),
    ("summary", "Summary"),
    ("status", "Status"),
    ("assignee", "Assignee"),
    ("reporter", "Reporter"),
    ("priority", "Priority"),
    ("issueType", "Issue Type"),
    ("created", "Created"),
    ("updated", "Updated"),
    ("resolved", "Resolved"),
    ("project", "Project"),
    ("projectKey", "Project Key"),
    ("description", "Description"),
    ("labels", "Labels"),
    ("components", "Components"),
    ("fixVersions", "Fix Versions"),
    ("storyPoints", "Story Points"),
    ("sprint", "Sprint"),
];

/// Jira Cloud default custom field ids
const STORY_POINTS_FIELD: &str = "customfield_10016";
const SPRINT_FIELD: &str = "customfield_10020";

/// Adapter for JIRA sources
pub struct JiraAdapter {
    config: JiraConfig,
    http: HttpClient,
    auth: Authenticator,
}

impl JiraAdapter {
    /// Create an adapter with the default HTTP client
    pub fn new(config: JiraConfig) -> Self {
        Self::with_client(config, HttpClient::new())
    }

    /// Create an adapter with a custom HTTP client
    pub fn with_client(config: JiraConfig, http: HttpClient) -> Self {
        let auth = Authenticator::new(AuthConfig::Basic {
            username: config.jira_username.clone(),
            password: config.jira_password.clone(),
        });
        Self { config, http, auth }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/rest/api/3/{}", self.config.jira_url.trim_end_matches('/'), path)
    }

    async fn get_json(&self, path: &str, req: RequestConfig) -> Result<Value> {
        let req = self.auth.apply(req, &self.http).await?;
        self.http.get_json_with_config(&self.endpoint(path), req).await
    }

    /// Load the project list; a non-array response means the credentials
    /// did not produce a real session
    async fn projects(&self) -> Result<Vec<JiraProject>> {
        let body = self.get_json("project", RequestConfig::new()).await?;

        let Some(entries) = body.as_array() else {
            return Err(Error::auth(
                "project list request did not return a list; check credentials",
            ));
        };

        Ok(entries
            .iter()
            .map(|p| JiraProject {
                id: text_of(&p["id"]),
                key: text_of(&p["key"]),
                name: text_of(&p["name"]),
            })
            .collect())
    }

    /// Load the caller's own profile and require an account id
    async fn profile(&self) -> Result<Value> {
        let body = self.get_json("myself", RequestConfig::new()).await?;

        match body.get("accountId").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => Ok(body),
            _ => Err(Error::auth(
                "profile response has no account id; check credentials",
            )),
        }
    }

    /// Favourite filters merged with the first searchable page.
    ///
    /// Favourites win id collisions. Any failure here is reported as `None`;
    /// filters are a convenience and must never fail the test.
    async fn saved_filters(&self) -> Option<Vec<JiraFilter>> {
        let favourites = match self.get_json("filter/favourite", RequestConfig::new()).await {
            Ok(body) => parse_filters(body.as_array().cloned().unwrap_or_default(), true),
            Err(e) => {
                warn!("favourite filter lookup failed: {e}");
                Vec::new()
            }
        };

        let searched = match self
            .get_json(
                "filter/search",
                RequestConfig::new().query("maxResults", FILTER_SEARCH_LIMIT.to_string()),
            )
            .await
        {
            Ok(body) => parse_filters(
                body["values"].as_array().cloned().unwrap_or_default(),
                false,
            ),
            Err(e) => {
                warn!("filter search failed: {e}");
                Vec::new()
            }
        };

        if favourites.is_empty() && searched.is_empty() {
            return None;
        }

        let mut merged = favourites;
        for filter in searched {
            if !merged.iter().any(|f| f.id == filter.id) {
                merged.push(filter);
            }
        }
        Some(merged)
    }

    /// Run one bounded issue search and map the fixed field layout
    async fn search_issues(&self) -> Result<Vec<Row>> {
        let jql = build_jql(
            self.config.selected_jira_project.as_deref(),
            self.config.jira_query.as_deref(),
        );
        debug!("searching issues with jql: {jql}");

        let body = self
            .get_json(
                "search",
                RequestConfig::new()
                    .query("jql", jql)
                    .query("maxResults", MAX_RESULTS.to_string()),
            )
            .await?;

        let issues = body["issues"].as_array().cloned().unwrap_or_default();
        Ok(issues.iter().map(map_issue).collect())
    }

    /// Default labels merged under user overrides
    fn display_names(&self) -> StringMap {
        let mut names: StringMap = FIELD_LABELS
            .iter()
            .map(|(field, label)| ((*field).to_string(), (*label).to_string()))
            .collect();
        for (field, label) in &self.config.field_display_names {
            names.insert(field.clone(), label.clone());
        }
        names
    }
}

#[async_trait]
impl SourceAdapter for JiraAdapter {
    async fn test(&self) -> Result<TestResponse> {
        let projects = self.projects().await?;
        let profile = self.profile().await?;
        let saved_filters = self.saved_filters().await;

        Ok(TestResponse {
            fields: FIELD_LABELS.iter().map(|(f, _)| (*f).to_string()).collect(),
            projects: Some(projects),
            saved_filters,
            user: Some(json!({
                "accountId": profile["accountId"],
                "displayName": profile["displayName"],
                "emailAddress": profile["emailAddress"],
            })),
            ..TestResponse::success()
        })
    }

    async fn fetch(&self) -> FetchResponse {
        match self.search_issues().await {
            Ok(rows) => FetchResponse::success(flatten::finish(
                rows,
                &self.config.selected_fields,
                &self.display_names(),
            )),
            Err(e) => {
                warn!("JIRA fetch failed: {e}");
                FetchResponse::failure(e.to_string())
            }
        }
    }
}

/// Build the JQL for a fetch
///
/// A selected project scopes the query, conjoining any extra fragment;
/// without a project the raw query is used verbatim; without either, newest
/// issues come first.
pub fn build_jql(project: Option<&str>, query: Option<&str>) -> String {
    let query = query.map(str::trim).filter(|q| !q.is_empty());

    match (project.map(str::trim).filter(|p| !p.is_empty()), query) {
        (Some(project), Some(query)) => format!("project = \"{project}\" AND ({query})"),
        (Some(project), None) => format!("project = \"{project}\""),
        (None, Some(query)) => query.to_string(),
        (None, None) => "ORDER BY created DESC".to_string(),
    }
}

/// Map one issue into the fixed flat layout
fn map_issue(issue: &Value) -> Row {
    let fields = &issue["fields"];
    let mut row = Row::new();

    row.insert("key".into(), issue["key"].clone());
    row.insert("summary".into(), fields["summary"].clone());
    row.insert("status".into(), at(fields, "/status/name"));
    row.insert("assignee".into(), at(fields, "/assignee/displayName"));
    row.insert("reporter".into(), at(fields, "/reporter/displayName"));
    row.insert("priority".into(), at(fields, "/priority/name"));
    row.insert("issueType".into(), at(fields, "/issuetype/name"));
    row.insert("created".into(), fields["created"].clone());
    row.insert("updated".into(), fields["updated"].clone());
    row.insert("resolved".into(), fields["resolutiondate"].clone());
    row.insert("project".into(), at(fields, "/project/name"));
    row.insert("projectKey".into(), at(fields, "/project/key"));
    row.insert("description".into(), fields["description"].clone());
    row.insert("labels".into(), fields["labels"].clone());
    row.insert("components".into(), names_of(&fields["components"]));
    row.insert("fixVersions".into(), names_of(&fields["fixVersions"]));
    row.insert("storyPoints".into(), fields[STORY_POINTS_FIELD].clone());
    row.insert("sprint".into(), sprint_name(&fields[SPRINT_FIELD]));

    row
}

fn at(value: &Value, pointer: &str) -> Value {
    value.pointer(pointer).cloned().unwrap_or(Value::Null)
}

/// Collapse an array of named objects into an array of their names
fn names_of(value: &Value) -> Value {
    match value.as_array() {
        Some(entries) => Value::Array(entries.iter().map(|e| e["name"].clone()).collect()),
        None => Value::Null,
    }
}

/// The sprint custom field holds every sprint the issue passed through;
/// the last entry is the current one
fn sprint_name(value: &Value) -> Value {
    value
        .as_array()
        .and_then(|sprints| sprints.last())
        .map(|sprint| sprint["name"].clone())
        .unwrap_or(Value::Null)
}

fn parse_filters(entries: Vec<Value>, favourite: bool) -> Vec<JiraFilter> {
    entries
        .iter()
        .filter_map(|f| {
            let id = f.get("id").map(text_of)?;
            Some(JiraFilter {
                id,
                name: text_of(&f["name"]),
                jql: f["jql"].as_str().map(String::from),
                favourite,
            })
        })
        .collect()
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
