use std::str::FromStr;

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: Id,
    name: String,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    photo_url: Option<String>,
    #[serde(default)]
    skills_to_teach: Vec<TeachSkill>,
    #[serde(default)]
    skills_to_learn: Vec<LearnSkill>,
}

impl User {
    pub fn new(
        id: Id,
        name: impl Into<String>,
        email: impl Into<String>,
        photo_url: Option<String>,
    ) -> super::Result<Self> {
        let email = email.into();
        EmailAddress::from_str(&email).map_err(|_| super::Error::InvalidEmail(email.clone()))?;

        Ok(Self {
            id,
            name: name.into(),
            email,
            photo_url,
            skills_to_teach: Vec::new(),
            skills_to_learn: Vec::new(),
        })
    }

    pub const fn id(&self) -> &Id {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }

    pub fn skills_to_teach(&self) -> &[TeachSkill] {
        &self.skills_to_teach
    }

    pub fn skills_to_learn(&self) -> &[LearnSkill] {
        &self.skills_to_learn
    }

    /// Every skill name on the profile, teach and learn side.
    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills_to_teach
            .iter()
            .map(TeachSkill::name)
            .chain(self.skills_to_learn.iter().map(LearnSkill::name))
    }
}

// skill mutations; names are unique case-insensitively within each list
impl User {
    /// False when an equal name is already present.
    pub fn add_teach_skill(&mut self, skill: TeachSkill) -> bool {
        if contains_name(self.skills_to_teach.iter().map(TeachSkill::name), &skill.name) {
            return false;
        }
        self.skills_to_teach.push(skill);
        true
    }

    /// False when an equal name is already present.
    pub fn add_learn_skill(&mut self, skill: LearnSkill) -> bool {
        if contains_name(self.skills_to_learn.iter().map(LearnSkill::name), &skill.name) {
            return false;
        }
        self.skills_to_learn.push(skill);
        true
    }

    pub fn remove_teach_skill(&mut self, name: &str) -> bool {
        let before = self.skills_to_teach.len();
        self.skills_to_teach
            .retain(|skill| !skill.name.eq_ignore_ascii_case(name));
        self.skills_to_teach.len() < before
    }

    pub fn remove_learn_skill(&mut self, name: &str) -> bool {
        let before = self.skills_to_learn.len();
        self.skills_to_learn
            .retain(|skill| !skill.name.eq_ignore_ascii_case(name));
        self.skills_to_learn.len() < before
    }

    /// False when no teach skill carries this name.
    pub fn set_teach_verified(&mut self, name: &str, verified: bool) -> bool {
        match self
            .skills_to_teach
            .iter_mut()
            .find(|skill| skill.name.eq_ignore_ascii_case(name))
        {
            Some(skill) => {
                skill.verified = verified;
                true
            }
            None => false,
        }
    }
}

fn contains_name<'a>(mut names: impl Iterator<Item = &'a str>, name: &str) -> bool {
    names.any(|existing| existing.eq_ignore_ascii_case(name))
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeachSkill {
    name: String,
    #[serde(default)]
    verified: bool,
}

impl TeachSkill {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verified: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn verified(&self) -> bool {
        self.verified
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LearnSkill {
    name: String,
}

impl LearnSkill {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
