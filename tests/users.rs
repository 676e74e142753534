mod common;

#[cfg(test)]
mod tests {
    use devswap_service::ai::model::VerificationStatus;
    use devswap_service::user::{self, model::User};

    use crate::common::{self, StubGateway};

    #[tokio::test]
    async fn test_create_and_fetch_profile() {
        let state = common::state();
        common::seed_user(&state, "alice", "Alice Doe", &["Rust"], &["Go"]).await;

        let alice = user::Id::new("alice");
        let bob = user::Id::new("bob");

        // profiles are readable by any signed-in user
        let profile = state.user_service.find(&bob, &alice).await.unwrap();
        assert_eq!(profile.name(), "Alice Doe");
        assert_eq!(profile.email(), "alice@devswap.dev");
        assert_eq!(profile.skills_to_teach().len(), 1);
        assert_eq!(profile.skills_to_teach()[0].name(), "Rust");
        assert!(!profile.skills_to_teach()[0].verified());
    }

    #[test]
    fn test_profile_email_is_validated() {
        let result = User::new(user::Id::new("alice"), "Alice Doe", "not-an-email", None);
        assert!(matches!(result, Err(user::Error::InvalidEmail(_))));
    }

    #[tokio::test]
    async fn test_blank_skill_names_are_rejected() {
        let state = common::state();
        common::seed_user(&state, "alice", "Alice Doe", &[], &[]).await;

        let alice = user::Id::new("alice");

        let result = state.user_service.add_teach_skill(&alice, "   ").await;
        assert!(matches!(result, Err(user::Error::EmptySkillName)));
    }

    #[tokio::test]
    async fn test_duplicate_skill_add_is_a_noop() {
        let state = common::state();
        common::seed_user(&state, "alice", "Alice Doe", &["Rust"], &[]).await;

        let alice = user::Id::new("alice");

        let profile = state
            .user_service
            .add_teach_skill(&alice, "rust")
            .await
            .unwrap();

        assert_eq!(profile.skills_to_teach().len(), 1);
        assert_eq!(profile.skills_to_teach()[0].name(), "Rust");
    }

    #[tokio::test]
    async fn test_skill_removal_matches_case_insensitively() {
        let state = common::state();
        common::seed_user(&state, "alice", "Alice Doe", &[], &["Rust", "Go"]).await;

        let alice = user::Id::new("alice");

        state
            .user_service
            .remove_learn_skill(&alice, "RUST")
            .await
            .unwrap();

        let profile = state.user_service.find(&alice, &alice).await.unwrap();
        assert_eq!(profile.skills_to_learn().len(), 1);
        assert_eq!(profile.skills_to_learn()[0].name(), "Go");
    }

    #[tokio::test]
    async fn test_suggestions_never_repeat_existing_skills() {
        let gateway = StubGateway {
            suggestions: vec!["rust".into(), "Go".into(), "Zig".into(), "Lua".into()],
            ..StubGateway::default()
        };

        let state = common::state_with(gateway);
        common::seed_user(&state, "alice", "Alice Doe", &["Rust"], &[]).await;

        let alice = user::Id::new("alice");

        let suggestions = state.user_service.suggest_skills(&alice, 2).await.unwrap();
        assert_eq!(suggestions, ["Go", "Zig"]);
    }

    #[tokio::test]
    async fn test_verified_certificate_flips_the_skill_flag() {
        let gateway = StubGateway {
            verified: true,
            ..StubGateway::default()
        };

        let state = common::state_with(gateway);
        common::seed_user(&state, "alice", "Alice Doe", &["Rust"], &[]).await;

        let alice = user::Id::new("alice");

        let verdict = state
            .user_service
            .verify_skill(&alice, "Rust", &common::certificate())
            .await
            .unwrap();
        assert!(verdict.verified);

        let profile = state.user_service.find(&alice, &alice).await.unwrap();
        assert!(profile.skills_to_teach()[0].verified());
    }

    #[tokio::test]
    async fn test_verifying_an_unlisted_skill_is_an_error() {
        let state = common::state();
        common::seed_user(&state, "alice", "Alice Doe", &["Rust"], &[]).await;

        let alice = user::Id::new("alice");

        let result = state
            .user_service
            .verify_skill(&alice, "Cobol", &common::certificate())
            .await;
        assert!(matches!(result, Err(user::Error::UnknownSkill(_))));
    }

    #[tokio::test]
    async fn test_interactive_verification_resumes_after_more_info() {
        let state = common::state();
        common::seed_user(&state, "alice", "Alice Doe", &["Rust"], &[]).await;

        let alice = user::Id::new("alice");

        let first = state
            .user_service
            .verify_skill_interactive(&alice, "Rust", &common::certificate(), None)
            .await
            .unwrap();
        assert_eq!(first.status, VerificationStatus::NeedsMoreInfo);

        let profile = state.user_service.find(&alice, &alice).await.unwrap();
        assert!(!profile.skills_to_teach()[0].verified());

        // the caller answers the model's question and tries again
        let second = state
            .user_service
            .verify_skill_interactive(&alice, "Rust", &common::certificate(), Some("yes, that is me"))
            .await
            .unwrap();
        assert_eq!(second.status, VerificationStatus::Verified);

        let profile = state.user_service.find(&alice, &alice).await.unwrap();
        assert!(profile.skills_to_teach()[0].verified());
    }
}
