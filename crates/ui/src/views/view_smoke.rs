use storage::repository::ProgressRepository;

use super::test_harness::setup_view_harness;

#[tokio::test(flavor = "current_thread")]
async fn roadmap_renders_levels_and_progress() {
    let mut harness = setup_view_harness(None, &[]).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Foundations"), "missing level label in {html}");
    assert!(html.contains("Advanced"), "missing level label in {html}");
    assert!(html.contains("Algebra Basics"), "missing card in {html}");
    assert!(
        html.contains("0 of 3 topics complete"),
        "missing progress label in {html}"
    );
    assert!(
        html.contains("~20h of study remaining"),
        "missing hours label in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn locked_node_gets_locked_class_until_prerequisite_done() {
    let mut harness = setup_view_harness(None, &[]).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Calculus — locked"),
        "calculus should be locked in {html}"
    );
    assert!(html.contains("node locked"), "missing locked class in {html}");

    let mut harness = setup_view_harness(None, &["algebra"]).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        !html.contains("Calculus — locked"),
        "calculus should be unlocked in {html}"
    );
    assert!(
        html.contains("Algebra Basics — completed"),
        "algebra should be done in {html}"
    );
    assert!(
        html.contains("1 of 3 topics complete"),
        "missing progress label in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn detail_panel_shows_pending_prerequisite_and_disabled_action() {
    let mut harness = setup_view_harness(Some("calculus"), &[]).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(
        html.contains("Prerequisite pending: Algebra Basics"),
        "missing pending banner in {html}"
    );
    assert!(
        html.contains("Complete first: Algebra Basics"),
        "missing locked action label in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn detail_panel_shows_satisfied_prerequisite_after_completion() {
    let mut harness = setup_view_harness(Some("calculus"), &["algebra"]).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(
        html.contains("Prerequisite complete: Algebra Basics"),
        "missing satisfied banner in {html}"
    );
    assert!(
        html.contains("Mark as complete"),
        "missing mark action in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn unsafe_resource_is_dropped_from_rendered_list() {
    let mut harness = setup_view_harness(Some("algebra"), &[]).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(
        html.contains("https://example.com/algebra"),
        "missing safe resource in {html}"
    );
    assert!(
        !html.contains("javascript:"),
        "unsafe resource leaked into {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn node_without_resources_shows_default_fallback() {
    let mut harness = setup_view_harness(Some("calculus"), &[]).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(
        html.contains("Khan Academy"),
        "missing fallback resource in {html}"
    );
    assert!(
        html.contains("MIT OpenCourseWare"),
        "missing fallback resource in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn done_node_keeps_badge_when_prerequisite_is_undone() {
    // "calculus" completed while "algebra" was done; "algebra" has since been
    // un-marked. No cascading revocation: the badge stays, the banner warns.
    let mut harness = setup_view_harness(Some("calculus"), &["calculus"]).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(
        html.contains("Calculus — completed"),
        "done badge should survive in {html}"
    );
    assert!(
        html.contains("Prerequisite pending: Algebra Basics"),
        "banner should warn in {html}"
    );
    assert!(
        html.contains("Undo completion"),
        "undo action should stay available in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn corrupt_saved_progress_loads_as_empty() {
    let harness = setup_view_harness(None, &[]).await;
    harness.repo.put_raw("{broken");
    let mut harness = harness;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(
        html.contains("0 of 3 topics complete"),
        "corrupt record should load as empty in {html}"
    );
    // The corrupt record was discarded on load.
    assert_eq!(harness.repo.raw_record(), None);
    assert_eq!(harness.repo.load().await.unwrap(), Vec::<String>::new());
}

#[tokio::test(flavor = "current_thread")]
async fn deep_link_to_unknown_node_renders_closed() {
    let mut harness = setup_view_harness(Some("ghost"), &[]).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(
        !html.contains("role=\"dialog\""),
        "unknown deep link should not open the panel in {html}"
    );
    assert!(html.contains("Foundations"), "page should still render in {html}");
}
