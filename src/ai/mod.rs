use std::sync::Arc;

use async_trait::async_trait;

pub mod model;

use model::{
    CertificateImage, CertificateVerdict, InteractiveVerdict, ProfileSkills, ScoredMatch,
    SnippetPreview,
};

pub type Result<T> = std::result::Result<T, Error>;
pub type Gateway = Arc<dyn AiGateway + Send + Sync>;

/// Black-box generative-model flows. Implementations own prompting and model
/// choice; only the data contracts below are guaranteed, and consumers still
/// re-check them defensively.
#[async_trait]
pub trait AiGateway {
    /// Up to `count` skills the user might want to learn, none of which they
    /// already have.
    async fn suggest_skills(
        &self,
        user_skills: &[String],
        all_skills: &[String],
        count: usize,
    ) -> Result<Vec<String>>;

    /// Relevance-ranked swap candidates, descending by score. The output may
    /// only reference ids present in `profiles`.
    async fn match_skills(
        &self,
        skills_to_learn: &[String],
        skills_to_teach: &[String],
        profiles: &[ProfileSkills],
    ) -> Result<Vec<ScoredMatch>>;

    /// Rich preview for a snippet shared in chat, capped at ~200 words.
    async fn generate_snippet_preview(
        &self,
        snippet: &str,
        context: &str,
    ) -> Result<SnippetPreview>;

    /// Single-shot certificate check.
    async fn verify_certificate(
        &self,
        user_name: &str,
        skill_to_verify: &str,
        certificate: &CertificateImage,
    ) -> Result<CertificateVerdict>;

    /// Stateless conversational variant: prior context travels in
    /// `user_message`, and a `NeedsMoreInfo` status is not terminal.
    async fn verify_certificate_interactive(
        &self,
        user_name: &str,
        skill_to_verify: &str,
        certificate: &CertificateImage,
        user_message: Option<&str>,
    ) -> Result<InteractiveVerdict>;
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("generative model rejected the request: {0}")]
    Rejected(String),
    #[error("malformed model output: {0}")]
    MalformedOutput(String),
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}
