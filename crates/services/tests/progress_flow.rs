use roadmap_core::model::NodeId;
use roadmap_core::time::fixed_clock;
use services::{AppServices, ProgressError};

const DATASET: &str = r#"[
    {
        "id": "foundations",
        "label": "Foundations",
        "badge": "badge-green",
        "nodes": [
            {
                "id": "algebra",
                "title": "Algebra Basics",
                "sub": "Algebra",
                "desc": "Equations.",
                "icon": "x",
                "topics": ["Linear equations"],
                "estimatedHours": 6
            },
            {
                "id": "calculus",
                "title": "Calculus",
                "sub": "Analysis",
                "desc": "Limits.",
                "icon": "i",
                "topics": ["Limits"],
                "requires": ["algebra"],
                "estimatedHours": 9
            }
        ]
    }
]"#;

async fn build_services(db: &str) -> AppServices {
    let url = format!("sqlite:file:{db}?mode=memory&cache=shared");
    AppServices::new_sqlite(&url, fixed_clock(), DATASET)
        .await
        .expect("build services")
}

#[tokio::test]
async fn progress_flow_gate_toggle_and_restore() {
    let services = build_services("memdb_progress_flow").await;
    let progress = services.progress();

    let done = progress.load().await;
    assert!(done.is_empty());

    // Locked until the prerequisite lands.
    let err = progress
        .toggle(&done, &NodeId::new("calculus"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ProgressError::Locked {
            pending: vec!["Algebra Basics".to_string()]
        }
    );

    let done = progress
        .toggle(&done, &NodeId::new("algebra"))
        .await
        .unwrap()
        .update
        .done;
    let done = progress
        .toggle(&done, &NodeId::new("calculus"))
        .await
        .unwrap()
        .update
        .done;
    assert_eq!(done.len(), 2);

    // A fresh load sees the persisted set.
    let restored = progress.load().await;
    assert_eq!(restored, done);
}

#[tokio::test]
async fn progress_flow_export_import_round_trip() {
    let services = build_services("memdb_progress_transfer").await;
    let progress = services.progress();
    let transfer = services.transfer();

    let done = progress.load().await;
    let done = progress
        .toggle(&done, &NodeId::new("algebra"))
        .await
        .unwrap()
        .update
        .done;

    let document = transfer.export(&done).expect("export");

    // Wipe, then re-import the exported document.
    progress.clear().await;
    let ids = transfer.parse(&document).expect("parse");
    let applied = progress.replace(ids).await;

    assert_eq!(applied.imported, 1);
    assert_eq!(applied.dropped, 0);
    assert_eq!(applied.update.done, done);
    assert_eq!(progress.load().await, done);
}

#[tokio::test]
async fn progress_flow_import_drops_ghost_ids() {
    let services = build_services("memdb_progress_ghosts").await;
    let progress = services.progress();
    let transfer = services.transfer();

    let ids = transfer
        .parse(r#"{"done": ["algebra", "ghost-id"]}"#)
        .expect("parse");
    let applied = progress.replace(ids).await;

    assert_eq!(applied.imported, 1);
    assert_eq!(applied.dropped, 1);
    assert!(applied.update.done.contains(&NodeId::new("algebra")));
    assert!(!applied.update.done.contains(&NodeId::new("ghost-id")));
}
