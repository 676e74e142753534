use serde::Serialize;

use crate::ai::model::ScoredMatch;
use crate::user;

/// A mutually beneficial swap candidate.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    user_id: user::Id,
    /// Skills the candidate can teach that the requester wants to learn.
    matched_skills_to_learn: Vec<String>,
    /// Skills the candidate wants to learn that the requester can teach.
    matched_skills_to_teach: Vec<String>,
}

impl Match {
    pub fn new(
        user_id: user::Id,
        matched_skills_to_learn: Vec<String>,
        matched_skills_to_teach: Vec<String>,
    ) -> Self {
        Self {
            user_id,
            matched_skills_to_learn,
            matched_skills_to_teach,
        }
    }

    pub const fn user_id(&self) -> &user::Id {
        &self.user_id
    }

    pub fn matched_skills_to_learn(&self) -> &[String] {
        &self.matched_skills_to_learn
    }

    pub fn matched_skills_to_teach(&self) -> &[String] {
        &self.matched_skills_to_teach
    }
}

/// Gateway-ranked variant of [`Match`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMatch {
    user_id: user::Id,
    matched_skills_to_learn: Vec<String>,
    matched_skills_to_teach: Vec<String>,
    relevance_score: f64,
}

impl RankedMatch {
    pub const fn user_id(&self) -> &user::Id {
        &self.user_id
    }

    pub fn matched_skills_to_learn(&self) -> &[String] {
        &self.matched_skills_to_learn
    }

    pub fn matched_skills_to_teach(&self) -> &[String] {
        &self.matched_skills_to_teach
    }

    pub const fn relevance_score(&self) -> f64 {
        self.relevance_score
    }
}

impl From<ScoredMatch> for RankedMatch {
    fn from(scored: ScoredMatch) -> Self {
        Self {
            user_id: scored.user_id,
            matched_skills_to_learn: scored.matched_skills_to_learn,
            matched_skills_to_teach: scored.matched_skills_to_teach,
            relevance_score: scored.relevance_score,
        }
    }
}
