mod common;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::Value;

    use devswap_service::ai::model::ScoredMatch;
    use devswap_service::matching::{self, service::find_matches};
    use devswap_service::state::AppState;
    use devswap_service::store::access::AccessPolicy;
    use devswap_service::store::memory::MemoryStore;
    use devswap_service::store::model::{Document, Patch};
    use devswap_service::{store, user};

    use crate::common::{self, StubGateway};

    #[tokio::test]
    async fn test_mutual_swap_is_found() {
        let state = common::state();
        common::seed_user(&state, "alice", "Alice Doe", &["Go"], &["Rust"]).await;
        common::seed_user(&state, "bob", "Bob Ray", &["Rust"], &["Go"]).await;

        let alice = user::Id::new("alice");

        let matches = state.match_service.find_matches(&alice).await.unwrap();
        assert_eq!(matches.len(), 1);

        let swap = &matches[0];
        assert_eq!(swap.user_id(), &user::Id::new("bob"));
        assert_eq!(swap.matched_skills_to_learn(), ["Rust"]);
        assert_eq!(swap.matched_skills_to_teach(), ["Go"]);
    }

    #[tokio::test]
    async fn test_one_sided_overlap_is_not_a_match() {
        let state = common::state();
        common::seed_user(&state, "alice", "Alice Doe", &["Go"], &["Rust"]).await;
        // bob teaches what alice wants but wants nothing she teaches
        common::seed_user(&state, "bob", "Bob Ray", &["Rust"], &["Haskell"]).await;

        let alice = user::Id::new("alice");

        let matches = state.match_service.find_matches(&alice).await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_matching_is_case_insensitive_and_keeps_casing() {
        let state = common::state();
        common::seed_user(&state, "alice", "Alice Doe", &["go"], &["Python"]).await;
        common::seed_user(&state, "bob", "Bob Ray", &["python"], &["GO"]).await;

        let alice = user::Id::new("alice");

        let matches = state.match_service.find_matches(&alice).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_skills_to_learn(), ["python"]);
        assert_eq!(matches[0].matched_skills_to_teach(), ["GO"]);
    }

    #[tokio::test]
    async fn test_requester_never_matches_themselves() {
        let state = common::state();
        let alice_profile =
            common::seed_user(&state, "alice", "Alice Doe", &["Rust"], &["Rust"]).await;

        let matches = find_matches(&alice_profile, &[alice_profile.clone()]);
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_no_matches_is_an_empty_result_not_an_error() {
        let state = common::state();
        common::seed_user(&state, "alice", "Alice Doe", &["Go"], &["Rust"]).await;
        common::seed_user(&state, "bob", "Bob Ray", &["Lua"], &["Perl"]).await;

        let alice = user::Id::new("alice");

        let matches = state.match_service.find_matches(&alice).await.unwrap();
        assert!(matches.is_empty());
    }

    /// Profiles are readable by their owner only; the roster scan fails.
    struct OwnerOnly;

    impl AccessPolicy for OwnerOnly {
        fn can_create(&self, _: &user::Id, _: &str, _: &Value) -> bool {
            false
        }

        fn can_put(&self, actor: &user::Id, _: &str, id: &store::Id, _: &Value) -> bool {
            store::Id::from(actor) == *id
        }

        fn can_read(&self, actor: &user::Id, _: &str, doc: &Document) -> bool {
            store::Id::from(actor) == *doc.id()
        }

        fn can_update(&self, _: &user::Id, _: &str, _: &Document, _: &Patch) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn test_unavailable_roster_is_distinct_from_no_matches() {
        let state = AppState::with_store(
            Arc::new(MemoryStore::new(Arc::new(OwnerOnly))),
            Arc::new(StubGateway::default()),
        );
        common::seed_user(&state, "alice", "Alice Doe", &["Go"], &["Rust"]).await;
        common::seed_user(&state, "bob", "Bob Ray", &["Rust"], &["Go"]).await;

        let alice = user::Id::new("alice");

        let result = state.match_service.find_matches(&alice).await;
        assert!(matches!(
            result,
            Err(matching::Error::RosterUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_ranked_matches_drop_fabricated_users_and_sort() {
        let gateway = StubGateway {
            matches: vec![
                ScoredMatch {
                    user_id: user::Id::new("ghost"),
                    matched_skills_to_learn: vec!["Rust".into()],
                    matched_skills_to_teach: vec!["Go".into()],
                    relevance_score: 9.9,
                },
                ScoredMatch {
                    user_id: user::Id::new("bob"),
                    matched_skills_to_learn: vec!["Rust".into()],
                    matched_skills_to_teach: vec!["Go".into()],
                    relevance_score: 1.0,
                },
                ScoredMatch {
                    user_id: user::Id::new("carol"),
                    matched_skills_to_learn: vec!["Rust".into()],
                    matched_skills_to_teach: vec!["Go".into()],
                    relevance_score: 5.0,
                },
            ],
            ..StubGateway::default()
        };

        let state = common::state_with(gateway);
        common::seed_user(&state, "alice", "Alice Doe", &["Go"], &["Rust"]).await;
        common::seed_user(&state, "bob", "Bob Ray", &["Rust"], &["Go"]).await;
        common::seed_user(&state, "carol", "Carol Fay", &["Rust"], &["Go"]).await;

        let alice = user::Id::new("alice");

        let ranked = state
            .match_service
            .find_matches_ranked(&alice)
            .await
            .unwrap();

        let ids = ranked.iter().map(|m| m.user_id().as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["carol", "bob"]);
        assert!(ranked[0].relevance_score() > ranked[1].relevance_score());
    }
}
