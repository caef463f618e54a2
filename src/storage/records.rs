//! History record types.

use serde::{Deserialize, Deserializer, Serialize};

/// Cap on stored interaction payloads, in characters.
pub const MAX_PAYLOAD_CHARS: usize = 5000;

/// Stored in place of a missing resume field.
pub const UNKNOWN: &str = "Unknown";

/// Structured resume data produced by the parsing agent.
///
/// Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedResume {
    /// Candidate name.
    pub name: Option<String>,

    /// Skills, as a list or one comma-separated string.
    #[serde(deserialize_with = "list_or_string")]
    pub skills: Vec<String>,

    /// Education summary.
    pub education: Option<String>,

    /// Experience summary.
    pub experience: Option<String>,
}

/// Job match output from the analysis agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchResult {
    /// Match score, nominally 0–100.
    pub match_percent: f64,

    /// Role the resume was matched against.
    pub job_title: String,

    /// Short feedback text.
    pub feedback_summary: String,

    /// Suggested job roles.
    #[serde(deserialize_with = "list_or_string")]
    pub job_roles: Vec<String>,
}

/// Full analysis report as the resume analysis page produces it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisReport {
    /// Parsed resume.
    pub parsed_data: ParsedResume,

    /// Overall score, nominally 0–100.
    pub overall_score: f64,

    /// Target job title.
    pub target_job: String,

    /// Improvement recommendations.
    pub recommendations: Vec<String>,

    /// Suggested job titles.
    pub job_suggestions: Vec<String>,
}

impl AnalysisReport {
    /// The match result this report stands for.
    #[must_use]
    pub fn match_result(&self) -> MatchResult {
        MatchResult {
            match_percent: self.overall_score,
            job_title: self.target_job.clone(),
            feedback_summary: self.recommendations.join(", "),
            job_roles: self.job_suggestions.clone(),
        }
    }
}

/// A resume analysis row before the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResumeLog {
    pub name: String,
    pub skills: String,
    pub education: String,
    pub experience: String,
    pub match_percent: i64,
    pub job_title: String,
    pub feedback_summary: String,
    pub suggested_jobs: String,
}

impl NewResumeLog {
    /// Flatten agent output into a row, filling gaps with defaults.
    ///
    /// Missing text fields become `"Unknown"`, a missing match result
    /// becomes score 0 with empty job fields. Lists are comma-joined and
    /// the score is clamped to 0–100.
    #[must_use]
    pub fn from_analysis(parsed: &ParsedResume, match_result: Option<&MatchResult>) -> Self {
        let or_unknown = |v: &Option<String>| v.clone().unwrap_or_else(|| UNKNOWN.to_string());

        let (match_percent, job_title, feedback_summary, suggested_jobs) = match match_result {
            Some(m) => (
                clamp_percent(m.match_percent),
                m.job_title.clone(),
                m.feedback_summary.clone(),
                m.job_roles.join(","),
            ),
            None => (0, String::new(), String::new(), String::new()),
        };

        Self {
            name: or_unknown(&parsed.name),
            skills: parsed.skills.join(","),
            education: or_unknown(&parsed.education),
            experience: or_unknown(&parsed.experience),
            match_percent,
            job_title,
            feedback_summary,
            suggested_jobs,
        }
    }
}

/// A stored resume analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResumeLogRecord {
    pub id: i64,
    /// RFC 3339, assigned at insert time.
    pub timestamp: String,
    pub name: String,
    /// Comma-joined.
    pub skills: String,
    pub education: String,
    pub experience: String,
    pub match_percent: i64,
    pub job_title: String,
    pub feedback_summary: String,
    /// Comma-joined.
    pub suggested_jobs: String,
}

impl ResumeLogRecord {
    /// Skills split back into a list.
    #[must_use]
    pub fn skill_list(&self) -> Vec<&str> {
        split_joined(&self.skills)
    }

    /// Suggested jobs split back into a list.
    #[must_use]
    pub fn suggested_job_list(&self) -> Vec<&str> {
        split_joined(&self.suggested_jobs)
    }
}

/// An agent interaction row before the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInteraction {
    pub agent_name: String,
    pub action: String,
    pub input_data: String,
    pub output_data: String,
}

impl NewInteraction {
    /// Build a row, truncating payloads to [`MAX_PAYLOAD_CHARS`].
    ///
    /// Truncation is irreversible; the dropped tail is not kept anywhere.
    #[must_use]
    pub fn new(agent_name: &str, action: &str, input_data: &str, output_data: &str) -> Self {
        Self {
            agent_name: agent_name.to_string(),
            action: action.to_string(),
            input_data: truncate_chars(input_data, MAX_PAYLOAD_CHARS),
            output_data: truncate_chars(output_data, MAX_PAYLOAD_CHARS),
        }
    }
}

/// A stored agent interaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentInteractionRecord {
    pub id: i64,
    pub timestamp: String,
    pub agent_name: String,
    pub action: String,
    pub input_data: String,
    pub output_data: String,
}

/// Keep at most `max` characters of `s`.
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => s[..cut].to_string(),
        None => s.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn clamp_percent(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as i64
}

fn split_joined(joined: &str) -> Vec<&str> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Accept either a JSON list of strings or one comma-separated string.
fn list_or_string<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrString {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match Option::<ListOrString>::deserialize(deserializer)? {
        Some(ListOrString::List(items)) => items,
        Some(ListOrString::Joined(s)) => split_joined(&s).into_iter().map(String::from).collect(),
        None => Vec::new(),
    })
}
