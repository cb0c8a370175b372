use jiff::civil::datetime;
use tempfile::NamedTempFile;
use voxboard_core::{
    remote::{CardData, CardPatch, TaskData, TaskPatch},
    BoardError, Database, EntityId,
};

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn card_data(name: &str, position: f64) -> CardData {
    CardData {
        name: name.to_string(),
        position,
        ..Default::default()
    }
}

#[test]
fn test_lists_are_appended_in_order() {
    let (_temp_file, mut db) = create_test_db();

    let first = db.insert_list("Planificat").unwrap();
    let second = db.insert_list("In lucru").unwrap();

    assert!(!first.id.is_local());
    assert!(second.position > first.position);

    let snapshot = db.load_snapshot().unwrap();
    let names: Vec<_> = snapshot.lists.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Planificat", "In lucru"]);
}

#[test]
fn test_card_lifecycle() {
    let (_temp_file, mut db) = create_test_db();
    let list = db.insert_list("Planificat").unwrap();
    let other = db.insert_list("In lucru").unwrap();

    let card = db
        .insert_card(
            &list.id,
            &CardData {
                name: "Dacia Logan".to_string(),
                description: Some("Suna clientul".to_string()),
                due_date: Some(datetime(2024, 3, 20, 9, 0, 0, 0)),
                position: 65536.0,
            },
        )
        .unwrap();

    let stored = db.get_card(&card.id).unwrap().expect("card exists");
    assert_eq!(stored, card);

    let updated = db
        .update_card(
            &card.id,
            &CardPatch {
                name: Some("Dacia Logan MCV".to_string()),
                description: Some(String::new()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.name, "Dacia Logan MCV");
    assert_eq!(updated.description, None);
    assert_eq!(updated.due_date, card.due_date);

    let moved = db.move_card(&card.id, &other.id, 131072.0).unwrap();
    assert_eq!(moved.list_id, other.id);

    db.delete_card(&card.id).unwrap();
    assert!(db.get_card(&card.id).unwrap().is_none());
}

#[test]
fn test_missing_rows_are_not_found() {
    let (_temp_file, mut db) = create_test_db();

    let err = db
        .insert_card(&EntityId::server("42"), &card_data("Orfan", 1.0))
        .unwrap_err();
    assert!(matches!(err, BoardError::NotFound { kind: "List", .. }));

    let err = db.delete_card(&EntityId::server("7")).unwrap_err();
    assert!(matches!(err, BoardError::NotFound { kind: "Card", .. }));

    let err = db.delete_card(&EntityId::Local(1)).unwrap_err();
    assert!(matches!(err, BoardError::NotFound { .. }));

    let err = db
        .update_task(&EntityId::server("3"), &TaskPatch::default())
        .unwrap_err();
    assert!(matches!(err, BoardError::NotFound { kind: "Task", .. }));
}

#[test]
fn test_deleting_card_removes_tasks_and_associations() {
    let (_temp_file, mut db) = create_test_db();
    let list = db.insert_list("Planificat").unwrap();
    let member = db.insert_member("Andrei Popescu", Some("andrei")).unwrap();
    let label = db.insert_label(Some("Urgent"), "berry-red").unwrap();
    let card = db.insert_card(&list.id, &card_data("BMW X5", 1.0)).unwrap();

    db.insert_task(
        &card.id,
        &TaskData {
            name: "PPF capota".to_string(),
            position: 1.0,
        },
    )
    .unwrap();
    db.add_card_member(&card.id, &member.id).unwrap();
    db.add_card_label(&card.id, &label.id).unwrap();

    let snapshot = db.load_snapshot().unwrap();
    assert_eq!(snapshot.cards[0].member_ids, vec![member.id.clone()]);
    assert_eq!(snapshot.cards[0].label_ids, vec![label.id.clone()]);
    assert_eq!(snapshot.tasks.len(), 1);

    db.delete_card(&card.id).unwrap();
    let snapshot = db.load_snapshot().unwrap();
    assert!(snapshot.cards.is_empty());
    assert!(snapshot.tasks.is_empty());
}

#[test]
fn test_associations_are_idempotent_and_removable() {
    let (_temp_file, mut db) = create_test_db();
    let list = db.insert_list("Planificat").unwrap();
    let member = db.insert_member("Maria Ionescu", None).unwrap();
    let card = db.insert_card(&list.id, &card_data("Audi Q7", 1.0)).unwrap();

    db.add_card_member(&card.id, &member.id).unwrap();
    db.add_card_member(&card.id, &member.id).unwrap();
    assert_eq!(db.get_card(&card.id).unwrap().unwrap().member_ids.len(), 1);

    db.remove_card_member(&card.id, &member.id).unwrap();
    assert!(db.get_card(&card.id).unwrap().unwrap().member_ids.is_empty());

    let err = db
        .add_card_label(&card.id, &EntityId::server("99"))
        .unwrap_err();
    assert!(matches!(err, BoardError::NotFound { kind: "Label", .. }));
}

#[test]
fn test_task_completion_persists() {
    let (_temp_file, mut db) = create_test_db();
    let list = db.insert_list("Planificat").unwrap();
    let card = db.insert_card(&list.id, &card_data("BMW X3", 1.0)).unwrap();
    let task = db
        .insert_task(
            &card.id,
            &TaskData {
                name: "Polish faruri".to_string(),
                position: 1.0,
            },
        )
        .unwrap();

    let patch = TaskPatch {
        is_completed: Some(true),
        ..Default::default()
    };
    assert!(db.update_task(&task.id, &patch).unwrap().is_completed);
    assert!(db.get_task(&task.id).unwrap().unwrap().is_completed);
}

#[test]
fn test_duplicate_username_is_invalid_input() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_member("Andrei Popescu", Some("andrei")).unwrap();

    let err = db.insert_member("Andrei Ionescu", Some("andrei")).unwrap_err();
    assert!(matches!(err, BoardError::InvalidInput { .. }));
}
