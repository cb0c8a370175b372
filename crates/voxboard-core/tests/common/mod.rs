#![allow(dead_code)]

use voxboard_core::{BoardService, BoardServiceBuilder, CommandPlan};
use tempfile::TempDir;

/// Helper function to create a board service backed by a temporary database
pub async fn create_test_service() -> (TempDir, BoardService) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let service = BoardServiceBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create board service");
    (temp_dir, service)
}

/// Creates the lists, labels and members of a small auto-shop board
pub async fn seed_board(service: &BoardService) {
    for list in ["Planificat", "In lucru", "Finalizat"] {
        service.add_list(list).await.expect("Failed to add list");
    }
    service
        .add_label(Some("Urgent"), "berry-red")
        .await
        .expect("Failed to add label");
    service
        .add_member("Andrei Popescu", Some("andrei"))
        .await
        .expect("Failed to add member");
    service
        .add_member("Maria Ionescu", None)
        .await
        .expect("Failed to add member");
}

/// Parses a plan from JSON text
pub fn plan(json: &str) -> CommandPlan {
    serde_json::from_str(json).expect("Failed to parse plan")
}
