use std::collections::HashSet;

use async_trait::async_trait;

use crate::ai::{
    self,
    model::{CertificateImage, CertificateVerdict, InteractiveVerdict, VerificationStatus},
};

use super::Id;
use super::model::{LearnSkill, TeachSkill, User};

#[async_trait]
pub trait UserService {
    async fn create(&self, user: &User) -> super::Result<()>;

    async fn find(&self, auth_id: &Id, id: &Id) -> super::Result<User>;

    async fn find_all(&self, auth_id: &Id) -> super::Result<Vec<User>>;

    /// Adds a teach skill; a case-insensitive duplicate is a no-op.
    async fn add_teach_skill(&self, auth_id: &Id, name: &str) -> super::Result<User>;

    async fn add_learn_skill(&self, auth_id: &Id, name: &str) -> super::Result<User>;

    async fn remove_teach_skill(&self, auth_id: &Id, name: &str) -> super::Result<User>;

    async fn remove_learn_skill(&self, auth_id: &Id, name: &str) -> super::Result<User>;

    /// Up to `count` gateway suggestions, never one the user already has.
    async fn suggest_skills(&self, auth_id: &Id, count: usize) -> super::Result<Vec<String>>;

    /// Single-shot certificate check; a verified verdict flips the teach
    /// skill's verified flag.
    async fn verify_skill(
        &self,
        auth_id: &Id,
        skill: &str,
        certificate: &CertificateImage,
    ) -> super::Result<CertificateVerdict>;

    /// Conversational variant; `NeedsMoreInfo` is not terminal, the caller
    /// continues by passing the user's answer as `user_message`.
    async fn verify_skill_interactive(
        &self,
        auth_id: &Id,
        skill: &str,
        certificate: &CertificateImage,
        user_message: Option<&str>,
    ) -> super::Result<InteractiveVerdict>;
}

pub struct UserServiceImpl {
    repo: super::Repository,
    gateway: ai::Gateway,
}

impl UserServiceImpl {
    pub fn new(repo: super::Repository, gateway: ai::Gateway) -> Self {
        Self { repo, gateway }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create(&self, user: &User) -> super::Result<()> {
        self.repo.upsert(user.id(), user).await
    }

    async fn find(&self, auth_id: &Id, id: &Id) -> super::Result<User> {
        self.repo.find_by_id(auth_id, id).await
    }

    async fn find_all(&self, auth_id: &Id) -> super::Result<Vec<User>> {
        self.repo.find_all(auth_id).await
    }

    async fn add_teach_skill(&self, auth_id: &Id, name: &str) -> super::Result<User> {
        let name = validated(name)?;
        let mut user = self.repo.find_by_id(auth_id, auth_id).await?;
        if user.add_teach_skill(TeachSkill::new(name)) {
            self.repo.update_skills(auth_id, &user).await?;
        }
        Ok(user)
    }

    async fn add_learn_skill(&self, auth_id: &Id, name: &str) -> super::Result<User> {
        let name = validated(name)?;
        let mut user = self.repo.find_by_id(auth_id, auth_id).await?;
        if user.add_learn_skill(LearnSkill::new(name)) {
            self.repo.update_skills(auth_id, &user).await?;
        }
        Ok(user)
    }

    async fn remove_teach_skill(&self, auth_id: &Id, name: &str) -> super::Result<User> {
        let mut user = self.repo.find_by_id(auth_id, auth_id).await?;
        if user.remove_teach_skill(name) {
            self.repo.update_skills(auth_id, &user).await?;
        }
        Ok(user)
    }

    async fn remove_learn_skill(&self, auth_id: &Id, name: &str) -> super::Result<User> {
        let mut user = self.repo.find_by_id(auth_id, auth_id).await?;
        if user.remove_learn_skill(name) {
            self.repo.update_skills(auth_id, &user).await?;
        }
        Ok(user)
    }

    async fn suggest_skills(&self, auth_id: &Id, count: usize) -> super::Result<Vec<String>> {
        let user = self.repo.find_by_id(auth_id, auth_id).await?;
        let roster = self.repo.find_all(auth_id).await?;

        let mine = user.skill_names().map(String::from).collect::<Vec<_>>();
        let all = known_skills(&roster);

        let owned = mine
            .iter()
            .map(|name| name.to_lowercase())
            .collect::<HashSet<_>>();

        let mut suggestions = self.gateway.suggest_skills(&mine, &all, count).await?;
        // the gateway promises neither bound, enforce both
        suggestions.retain(|name| !owned.contains(&name.to_lowercase()));
        suggestions.truncate(count);

        Ok(suggestions)
    }

    async fn verify_skill(
        &self,
        auth_id: &Id,
        skill: &str,
        certificate: &CertificateImage,
    ) -> super::Result<CertificateVerdict> {
        let mut user = self.repo.find_by_id(auth_id, auth_id).await?;
        if !user
            .skills_to_teach()
            .iter()
            .any(|s| s.name().eq_ignore_ascii_case(skill))
        {
            return Err(super::Error::UnknownSkill(skill.to_owned()));
        }

        let verdict = self
            .gateway
            .verify_certificate(user.name(), skill, certificate)
            .await?;

        if verdict.verified && user.set_teach_verified(skill, true) {
            self.repo.update_skills(auth_id, &user).await?;
        }

        Ok(verdict)
    }

    async fn verify_skill_interactive(
        &self,
        auth_id: &Id,
        skill: &str,
        certificate: &CertificateImage,
        user_message: Option<&str>,
    ) -> super::Result<InteractiveVerdict> {
        let mut user = self.repo.find_by_id(auth_id, auth_id).await?;
        if !user
            .skills_to_teach()
            .iter()
            .any(|s| s.name().eq_ignore_ascii_case(skill))
        {
            return Err(super::Error::UnknownSkill(skill.to_owned()));
        }

        let verdict = self
            .gateway
            .verify_certificate_interactive(user.name(), skill, certificate, user_message)
            .await?;

        if verdict.status == VerificationStatus::Verified && user.set_teach_verified(skill, true) {
            self.repo.update_skills(auth_id, &user).await?;
        }

        Ok(verdict)
    }
}

fn validated(name: &str) -> super::Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(super::Error::EmptySkillName);
    }
    Ok(name)
}

/// Distinct skill names across the whole roster, first casing wins.
fn known_skills(roster: &[User]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut skills = Vec::new();

    for user in roster {
        for name in user.skill_names() {
            if seen.insert(name.to_lowercase()) {
                skills.push(name.to_owned());
            }
        }
    }

    skills
}
