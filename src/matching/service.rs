use std::collections::HashSet;

use async_trait::async_trait;

use crate::ai::{self, model::ProfileSkills};
use crate::user::{
    self,
    model::{LearnSkill, TeachSkill, User},
};

use super::model::{Match, RankedMatch};

#[async_trait]
pub trait MatchService {
    /// Deterministic mutual-benefit matches, unranked.
    async fn find_matches(&self, auth_id: &user::Id) -> super::Result<Vec<Match>>;

    /// Gateway-ranked variant, descending by relevance score.
    async fn find_matches_ranked(&self, auth_id: &user::Id) -> super::Result<Vec<RankedMatch>>;
}

pub struct MatchServiceImpl {
    user_service: user::Service,
    gateway: ai::Gateway,
}

impl MatchServiceImpl {
    pub fn new(user_service: user::Service, gateway: ai::Gateway) -> Self {
        Self {
            user_service,
            gateway,
        }
    }
}

#[async_trait]
impl MatchService for MatchServiceImpl {
    async fn find_matches(&self, auth_id: &user::Id) -> super::Result<Vec<Match>> {
        let requester = self.user_service.find(auth_id, auth_id).await?;
        let candidates = self.roster(auth_id).await?;

        Ok(find_matches(&requester, &candidates))
    }

    async fn find_matches_ranked(&self, auth_id: &user::Id) -> super::Result<Vec<RankedMatch>> {
        let requester = self.user_service.find(auth_id, auth_id).await?;
        let candidates = self.roster(auth_id).await?;

        let profiles = candidates
            .iter()
            .filter(|candidate| candidate.id() != auth_id)
            .map(to_profile_skills)
            .collect::<Vec<_>>();

        let to_learn = skill_names(requester.skills_to_learn().iter().map(LearnSkill::name));
        let to_teach = skill_names(requester.skills_to_teach().iter().map(TeachSkill::name));

        let mut scored = self
            .gateway
            .match_skills(&to_learn, &to_teach, &profiles)
            .await?;

        // never trust the model with user identity
        let known = profiles.iter().map(|p| &p.user_id).collect::<HashSet<_>>();
        scored.retain(|m| known.contains(&m.user_id));
        scored.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));

        Ok(scored.into_iter().map(RankedMatch::from).collect())
    }
}

impl MatchServiceImpl {
    async fn roster(&self, auth_id: &user::Id) -> super::Result<Vec<User>> {
        self.user_service
            .find_all(auth_id)
            .await
            .map_err(|e| super::Error::RosterUnavailable(Box::new(e)))
    }
}

/// Mutual-benefit matches: a candidate qualifies only when they can teach
/// something the requester wants to learn AND want something the requester
/// can teach. Comparison is case-insensitive, output keeps original casing.
pub fn find_matches(requester: &User, candidates: &[User]) -> Vec<Match> {
    let want_to_learn = lowered(requester.skills_to_learn().iter().map(LearnSkill::name));
    let can_teach = lowered(requester.skills_to_teach().iter().map(TeachSkill::name));

    candidates
        .iter()
        .filter(|candidate| candidate.id() != requester.id())
        .filter_map(|candidate| {
            let they_can_teach = candidate
                .skills_to_teach()
                .iter()
                .map(TeachSkill::name)
                .filter(|name| want_to_learn.contains(&name.to_lowercase()))
                .map(String::from)
                .collect::<Vec<_>>();

            let they_want_to_learn = candidate
                .skills_to_learn()
                .iter()
                .map(LearnSkill::name)
                .filter(|name| can_teach.contains(&name.to_lowercase()))
                .map(String::from)
                .collect::<Vec<_>>();

            (!they_can_teach.is_empty() && !they_want_to_learn.is_empty()).then(|| {
                Match::new(candidate.id().clone(), they_can_teach, they_want_to_learn)
            })
        })
        .collect()
}

fn to_profile_skills(user: &User) -> ProfileSkills {
    ProfileSkills {
        user_id: user.id().clone(),
        skills_to_learn: skill_names(user.skills_to_learn().iter().map(LearnSkill::name)),
        skills_to_teach: skill_names(user.skills_to_teach().iter().map(TeachSkill::name)),
    }
}

fn skill_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    names.map(String::from).collect()
}

fn lowered<'a>(names: impl Iterator<Item = &'a str>) -> HashSet<String> {
    names.map(str::to_lowercase).collect()
}
