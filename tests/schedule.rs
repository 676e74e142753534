mod common;

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use devswap_service::message::model::Content;
    use devswap_service::message::repository::{MessageRepository, StoreMessageRepository};
    use devswap_service::schedule::model::ScheduleDraft;
    use devswap_service::schedule::{self, Status};
    use devswap_service::{chat, message, user};

    use crate::common;

    fn draft() -> ScheduleDraft {
        let date = "2026-08-20T15:00:00Z".parse::<DateTime<Utc>>().unwrap();
        ScheduleDraft::new("Rust basics", date)
    }

    #[tokio::test]
    async fn test_proposal_starts_pending_with_generated_link() {
        let state = common::state();
        common::seed_user(&state, "alice", "Alice Doe", &[], &[]).await;
        common::seed_user(&state, "bob", "Bob Ray", &[], &[]).await;

        let alice = user::Id::new("alice");
        let bob = user::Id::new("bob");

        let sent = state
            .chat_service
            .send_schedule(&alice, &bob, draft())
            .await
            .unwrap();

        let details = sent.content.as_schedule().expect("schedule content");
        assert_eq!(details.proposer_id(), &alice);
        assert_eq!(details.status(), Status::Pending);
        assert_eq!(details.title(), "Rust basics");
        assert!(
            details
                .meet_link()
                .as_str()
                .starts_with("https://meet.devswap.dev/")
        );

        let other = state
            .chat_service
            .send_schedule(&alice, &bob, draft())
            .await
            .unwrap();
        let other_details = other.content.as_schedule().unwrap();
        assert_ne!(details.meet_link(), other_details.meet_link());
    }

    #[tokio::test]
    async fn test_accept_transitions_once_and_only_changes_status() {
        let state = common::state();
        common::seed_user(&state, "alice", "Alice Doe", &[], &[]).await;
        common::seed_user(&state, "bob", "Bob Ray", &[], &[]).await;

        let alice = user::Id::new("alice");
        let bob = user::Id::new("bob");

        let sent = state
            .chat_service
            .send_schedule(&alice, &bob, draft())
            .await
            .unwrap();
        let proposed = sent.content.as_schedule().unwrap().clone();

        let accepted = state
            .chat_service
            .accept_schedule(&bob, &sent.id)
            .await
            .unwrap();
        let details = accepted.content.as_schedule().unwrap();

        assert_eq!(details.status(), Status::Accepted);
        assert_eq!(details.proposer_id(), proposed.proposer_id());
        assert_eq!(details.title(), proposed.title());
        assert_eq!(details.date(), proposed.date());
        assert_eq!(details.meet_link(), proposed.meet_link());

        // the transition is persisted, not just echoed back
        let thread = state.chat_service.load_thread(&alice, &bob).await.unwrap();
        let stored = thread[0].content.as_schedule().unwrap();
        assert_eq!(stored.status(), Status::Accepted);

        // a racing second accept is a harmless no-op
        let again = state
            .chat_service
            .accept_schedule(&bob, &sent.id)
            .await
            .unwrap();
        assert_eq!(
            again.content.as_schedule().unwrap().status(),
            Status::Accepted
        );
    }

    #[tokio::test]
    async fn test_proposer_cannot_accept_own_proposal() {
        let state = common::state();
        common::seed_user(&state, "alice", "Alice Doe", &[], &[]).await;
        common::seed_user(&state, "bob", "Bob Ray", &[], &[]).await;

        let alice = user::Id::new("alice");
        let bob = user::Id::new("bob");

        let sent = state
            .chat_service
            .send_schedule(&alice, &bob, draft())
            .await
            .unwrap();

        let result = state.chat_service.accept_schedule(&alice, &sent.id).await;
        assert!(matches!(
            result,
            Err(chat::Error::_Schedule(
                schedule::Error::ProposerCannotAccept
            ))
        ));

        let thread = state.chat_service.load_thread(&bob, &alice).await.unwrap();
        assert_eq!(
            thread[0].content.as_schedule().unwrap().status(),
            Status::Pending
        );
    }

    #[tokio::test]
    async fn test_store_rejects_accept_bypassing_the_service() {
        let state = common::state();
        common::seed_user(&state, "alice", "Alice Doe", &[], &[]).await;
        common::seed_user(&state, "bob", "Bob Ray", &[], &[]).await;

        let alice = user::Id::new("alice");
        let bob = user::Id::new("bob");

        let sent = state
            .chat_service
            .send_schedule(&alice, &bob, draft())
            .await
            .unwrap();

        let mut details = sent.content.as_schedule().unwrap().clone();
        details.accept(&bob).unwrap();
        let accepted = Content::Schedule(details);

        // the proposer writing the accepted content directly must be denied
        let repo = StoreMessageRepository::new(state.store.clone());
        let result = repo.update_content(&alice, &sent.id, &accepted).await;

        assert!(matches!(
            result,
            Err(message::Error::_Store(e)) if e.is_permission_denied()
        ));
    }

    #[tokio::test]
    async fn test_text_messages_are_not_acceptable() {
        let state = common::state();
        common::seed_user(&state, "alice", "Alice Doe", &[], &[]).await;
        common::seed_user(&state, "bob", "Bob Ray", &[], &[]).await;

        let alice = user::Id::new("alice");
        let bob = user::Id::new("bob");

        let sent = state
            .chat_service
            .send_text(&alice, &bob, "not a proposal")
            .await
            .unwrap();

        let result = state.chat_service.accept_schedule(&bob, &sent.id).await;
        assert!(matches!(result, Err(chat::Error::NotSchedule)));
    }
}
