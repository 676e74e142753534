use serde::{Deserialize, Serialize};

use crate::user;

/// Skill sets of one candidate, as handed to the matching flow.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSkills {
    pub user_id: user::Id,
    pub skills_to_learn: Vec<String>,
    pub skills_to_teach: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMatch {
    pub user_id: user::Id,
    pub matched_skills_to_learn: Vec<String>,
    pub matched_skills_to_teach: Vec<String>,
    pub relevance_score: f64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetPreview {
    pub rich_preview: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CertificateVerdict {
    pub verified: bool,
    pub reason: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Verified,
    Failed,
    NeedsMoreInfo,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractiveVerdict {
    pub status: VerificationStatus,
    pub message_to_user: String,
    pub reason: String,
}

/// Certificate photo as a data URI (`data:<mimetype>;base64,<data>`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CertificateImage(String);

impl CertificateImage {
    pub fn new(data_uri: impl Into<String>) -> Self {
        Self(data_uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
