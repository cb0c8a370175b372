//! Tests for the action executor.

use jiff::civil::datetime;
use serde_json::{json, Value};

use super::*;
use crate::{
    codec,
    ids::EntityId,
    models::{Action, BoardContext},
    store::EntityStore,
    testing::{sample_board, FakeRemote},
};

fn actions(value: Value) -> Vec<Action> {
    serde_json::from_value(value).expect("valid action list")
}

async fn run(remote: FakeRemote, plan: Value) -> (SharedStore, FakeRemote, Vec<ActionReport>) {
    let store = EntityStore::from_snapshot(sample_board()).into_shared();
    let context = BoardContext::from_store(&*store.read().await);
    let ids = LocalIdAllocator::new();
    let plan = actions(plan);

    let reports = {
        let mut executor = ActionExecutor::new(&store, &remote, &ids, &context);
        executor.execute(&plan).await
    };
    (store, remote, reports)
}

fn remote() -> FakeRemote {
    FakeRemote::new(&sample_board())
}

fn skip_reason(report: &ActionReport) -> &str {
    match &report.outcome {
        Outcome::Skipped { reason } => reason,
        other => panic!("expected a skipped action, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_card_with_nested_effects() {
    let (store, _remote, reports) = run(
        remote(),
        json!([{
            "type": "createCard",
            "listName": "in lucru",
            "name": "Dacia Logan",
            "memberNames": ["andrei", "Vlad"],
            "labelNames": ["urgent"],
            "tasks": ["PPF luneta"],
            "phoneNo": "0722",
            "dueDate": "2024-03-20"
        }]),
    )
    .await;

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].outcome, Outcome::Applied);
    let effects: Vec<_> = reports[0]
        .effects
        .iter()
        .map(|e| (e.effect.as_str(), e.outcome.is_applied()))
        .collect();
    assert_eq!(
        effects,
        [
            ("member andrei", true),
            ("member Vlad", false),
            ("label urgent", true),
            ("task PPF luneta", true),
        ]
    );

    let store = store.read().await;
    assert!(!store.has_local_ids());
    let card = store.card(&EntityId::server("1000")).expect("card reconciled");
    assert_eq!(card.list_id, EntityId::server("2"));
    assert_eq!(card.member_ids, vec![EntityId::server("m1")]);
    assert_eq!(card.label_ids, vec![EntityId::server("l1")]);
    assert_eq!(card.due_date, Some(datetime(2024, 3, 20, 9, 0, 0, 0)));
    let description = codec::Description::from_raw(card.description.as_deref());
    assert_eq!(description.fields.phone_no.as_deref(), Some("0722"));
    assert_eq!(store.tasks_for_card(&card.id).len(), 1);
}

#[tokio::test]
async fn test_later_actions_see_cards_created_earlier() {
    let (store, _remote, reports) = run(
        remote(),
        json!([
            { "type": "createCard", "name": "Dacia Logan" },
            { "type": "addTaskToCard", "cardName": "dacia logan", "tasks": ["PPF luneta"] },
            { "type": "moveCard", "cardName": "Dacia", "listName": "In lucru" }
        ]),
    )
    .await;

    assert!(reports.iter().all(|r| r.outcome.is_applied()), "{reports:?}");
    let store = store.read().await;
    let card = store.card(&EntityId::server("1000")).unwrap();
    assert_eq!(card.list_id, EntityId::server("2"));
    assert_eq!(store.tasks_for_card(&card.id)[0].name, "PPF luneta");
}

#[tokio::test]
async fn test_remote_calls_follow_plan_order() {
    let (_store, remote, reports) = run(
        remote(),
        json!([
            { "type": "createCard", "listName": "Planificat", "name": "Dacia Logan" },
            { "type": "addMemberToCard", "cardName": "Dacia", "memberNames": ["Maria"] },
            { "type": "moveCard", "cardName": "BMW X5", "listName": "In lucru" },
            { "type": "completeTask", "taskName": "Polish faruri" },
            { "type": "addLabelToCard", "cardName": "Audi Q7", "labelNames": ["Garantie"] },
            { "type": "deleteCard", "cardName": "Audi Q7" },
            { "type": "addTaskToCard", "cardName": "Dacia Logan", "tasks": ["PPF luneta"] }
        ]),
    )
    .await;

    assert!(reports.iter().all(|r| r.outcome.is_applied()), "{reports:?}");
    let indices: Vec<_> = reports.iter().map(|r| r.index).collect();
    assert_eq!(indices, [0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(
        remote.calls(),
        [
            "create_card Dacia Logan",
            "add_card_member 1000 m2",
            "move_card 10 2",
            "update_task 22 Some(true)",
            "add_card_label 12 l2",
            "delete_card 12",
            "create_task 1000 PPF luneta",
        ]
    );
}

#[tokio::test]
async fn test_create_card_without_list_uses_first_list() {
    let (store, _remote, reports) = run(
        remote(),
        json!([{ "type": "createCard", "listName": "Arhiva", "name": "Skoda Octavia" }]),
    )
    .await;

    assert!(reports[0].outcome.is_applied());
    let store = store.read().await;
    let last = store.cards_in_list(&EntityId::server("1")).last().map(|c| c.name.clone());
    assert_eq!(last.as_deref(), Some("Skoda Octavia"));
}

#[tokio::test]
async fn test_failed_create_skips_dependent_actions() {
    let remote = remote();
    remote.fail_on("create_card");
    let (store, _remote, reports) = run(
        remote,
        json!([
            { "type": "createCard", "name": "Dacia Logan", "tasks": ["PPF"] },
            { "type": "addTaskToCard", "cardName": "Dacia Logan", "tasks": ["Polish"] }
        ]),
    )
    .await;

    assert!(matches!(reports[0].outcome, Outcome::Failed { .. }));
    assert!(reports[0].effects.is_empty());
    assert_eq!(skip_reason(&reports[1]), "card not found");
    assert_eq!(store.read().await.card_count(), 3);
}

#[tokio::test]
async fn test_unresolved_card_is_skipped_and_plan_continues() {
    let (_store, remote, reports) = run(
        remote(),
        json!([
            { "type": "deleteCard", "cardName": "Skoda" },
            { "type": "moveCard", "cardName": "BMW X5", "listName": "In lucru" }
        ]),
    )
    .await;

    assert_eq!(skip_reason(&reports[0]), "card not found");
    assert!(reports[1].outcome.is_applied());
    assert_eq!(remote.calls(), ["move_card 10 2"]);
}

#[tokio::test]
async fn test_remote_failure_is_isolated() {
    let remote = remote();
    remote.fail_on("update_card");
    let (store, _remote, reports) = run(
        remote,
        json!([
            { "type": "updateCard", "cardName": "BMW X5", "name": "BMW X5 M" },
            { "type": "completeTask", "taskName": "Polish" }
        ]),
    )
    .await;

    assert!(matches!(reports[0].outcome, Outcome::Failed { .. }));
    assert!(reports[1].outcome.is_applied());

    let store = store.read().await;
    assert_eq!(store.card(&EntityId::server("10")).unwrap().name, "BMW X5");
    assert!(store.task(&EntityId::server("22")).unwrap().is_completed);
}

#[tokio::test]
async fn test_update_merges_into_json_description() {
    let (store, _remote, reports) = run(
        remote(),
        json!([{ "type": "updateCard", "cardName": "BMW X3", "phoneNo": "0722" }]),
    )
    .await;

    assert!(reports[0].outcome.is_applied());
    let store = store.read().await;
    let card = store.card(&EntityId::server("11")).unwrap();
    let fields = codec::Description::from_raw(card.description.as_deref()).fields;
    assert_eq!(fields.client_name.as_deref(), Some("Ion"));
    assert_eq!(fields.phone_no.as_deref(), Some("0722"));
}

#[tokio::test]
async fn test_update_plain_text_card() {
    let (store, remote, reports) = run(
        remote(),
        json!([
            { "type": "updateCard", "cardName": "BMW X5", "clientName": "Ion" },
            { "type": "updateCard", "cardName": "BMW X5", "description": "Nota noua" }
        ]),
    )
    .await;

    assert_eq!(skip_reason(&reports[0]), "nothing to update");
    assert!(reports[1].outcome.is_applied());
    assert_eq!(remote.calls(), ["update_card 10"]);
    assert_eq!(
        store.read().await.card(&EntityId::server("10")).unwrap().description.as_deref(),
        Some("Nota noua")
    );
}

#[tokio::test]
async fn test_complete_and_uncomplete_tasks() {
    let (_store, remote, reports) = run(
        remote(),
        json!([
            { "type": "completeTask", "taskName": "PPF capota", "cardName": "BMW X3" },
            { "type": "completeTask", "taskName": "PPF capota" },
            { "type": "uncompleteTask", "taskName": "Polish faruri" },
            { "type": "completeTask", "taskName": "Polish faruri", "cardName": "Audi" }
        ]),
    )
    .await;

    assert!(reports[..3].iter().all(|r| r.outcome.is_applied()));
    assert_eq!(skip_reason(&reports[3]), "task not found");
    assert_eq!(
        remote.calls(),
        [
            "update_task 21 Some(true)",
            "update_task 20 Some(true)",
            "update_task 22 Some(false)",
        ]
    );
}

#[tokio::test]
async fn test_member_and_label_actions() {
    let (store, _remote, reports) = run(
        remote(),
        json!([
            { "type": "addMemberToCard", "cardName": "Audi", "memberNames": ["Maria"] },
            { "type": "addLabelToCard", "cardName": "Audi", "labelNames": ["Garantie", "Urgent"] },
            { "type": "removeLabelFromCard", "cardName": "Audi", "labelNames": ["urgent"] },
            { "type": "removeMemberFromCard", "cardName": "Audi", "memberNames": ["Vlad"] }
        ]),
    )
    .await;

    assert!(reports[..3].iter().all(|r| r.outcome.is_applied()));
    assert_eq!(skip_reason(&reports[3]), "no member to change");

    let store = store.read().await;
    let card = store.card(&EntityId::server("12")).unwrap();
    assert_eq!(card.member_ids, vec![EntityId::server("m2")]);
    assert_eq!(card.label_ids, vec![EntityId::server("l2")]);
}

#[tokio::test]
async fn test_unsupported_action_is_skipped() {
    let (_store, remote, reports) = run(remote(), json!([{ "type": "archiveBoard" }])).await;

    assert_eq!(reports[0].kind, "unsupported");
    assert_eq!(skip_reason(&reports[0]), "unsupported action type");
    assert!(remote.calls().is_empty());
}

#[test]
fn test_parse_due_date() {
    assert_eq!(
        parse_due_date("2024-03-20T14:30:00"),
        Some(datetime(2024, 3, 20, 14, 30, 0, 0))
    );
    assert_eq!(
        parse_due_date("2024-03-20T14:30:00Z"),
        Some(datetime(2024, 3, 20, 14, 30, 0, 0))
    );
    assert_eq!(parse_due_date("2024-03-20"), Some(datetime(2024, 3, 20, 9, 0, 0, 0)));
    assert_eq!(parse_due_date("maine"), None);
    assert_eq!(parse_due_date(" "), None);
}
