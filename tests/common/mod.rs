#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;

use devswap_service::ai::model::{
    CertificateImage, CertificateVerdict, InteractiveVerdict, ProfileSkills, ScoredMatch,
    SnippetPreview, VerificationStatus,
};
use devswap_service::ai::{self, AiGateway};
use devswap_service::state::AppState;
use devswap_service::store::access::Rules;
use devswap_service::store::memory::MemoryStore;
use devswap_service::user::{
    self,
    model::{LearnSkill, TeachSkill, User},
};

pub fn state() -> AppState {
    state_with(StubGateway::default())
}

pub fn state_with(gateway: StubGateway) -> AppState {
    AppState::with_store(
        Arc::new(MemoryStore::new(Arc::new(Rules))),
        Arc::new(gateway),
    )
}

pub async fn seed_user(
    state: &AppState,
    id: &str,
    name: &str,
    teach: &[&str],
    learn: &[&str],
) -> User {
    let mut user = User::new(user::Id::new(id), name, format!("{id}@devswap.dev"), None).unwrap();

    for skill in teach {
        user.add_teach_skill(TeachSkill::new(*skill));
    }
    for skill in learn {
        user.add_learn_skill(LearnSkill::new(*skill));
    }

    state.user_service.create(&user).await.unwrap();
    user
}

pub fn certificate() -> CertificateImage {
    CertificateImage::new("data:image/png;base64,aGVsbG8=")
}

/// Scripted gateway: flows answer from the fields below.
#[derive(Default)]
pub struct StubGateway {
    pub suggestions: Vec<String>,
    pub matches: Vec<ScoredMatch>,
    pub verified: bool,
}

#[async_trait]
impl AiGateway for StubGateway {
    async fn suggest_skills(
        &self,
        _user_skills: &[String],
        _all_skills: &[String],
        _count: usize,
    ) -> ai::Result<Vec<String>> {
        Ok(self.suggestions.clone())
    }

    async fn match_skills(
        &self,
        _skills_to_learn: &[String],
        _skills_to_teach: &[String],
        _profiles: &[ProfileSkills],
    ) -> ai::Result<Vec<ScoredMatch>> {
        Ok(self.matches.clone())
    }

    async fn generate_snippet_preview(
        &self,
        snippet: &str,
        _context: &str,
    ) -> ai::Result<SnippetPreview> {
        Ok(SnippetPreview {
            rich_preview: format!("Preview: {snippet}"),
        })
    }

    async fn verify_certificate(
        &self,
        _user_name: &str,
        _skill_to_verify: &str,
        _certificate: &CertificateImage,
    ) -> ai::Result<CertificateVerdict> {
        Ok(CertificateVerdict {
            verified: self.verified,
            reason: "stub verdict".into(),
        })
    }

    async fn verify_certificate_interactive(
        &self,
        _user_name: &str,
        _skill_to_verify: &str,
        _certificate: &CertificateImage,
        user_message: Option<&str>,
    ) -> ai::Result<InteractiveVerdict> {
        let status = if user_message.is_some() {
            VerificationStatus::Verified
        } else {
            VerificationStatus::NeedsMoreInfo
        };

        Ok(InteractiveVerdict {
            status,
            message_to_user: "stub".into(),
            reason: "stub".into(),
        })
    }
}
