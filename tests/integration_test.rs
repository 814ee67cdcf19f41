/// Integration tests for the BOM structure core and the editor session
mod test_utilities;

use bom_explorer::prelude::*;
use test_utilities::mocks::*;

const GEARBOX: &str = include_str!("fixtures/gearbox.json");

fn gearbox() -> BomSnapshot {
    serde_json::from_str(GEARBOX).unwrap()
}

fn build(snapshot: &BomSnapshot) -> BomForest {
    BomTreeBuilder::build(&RowNormalizer::normalize(&snapshot.components), &snapshot.routing)
}

fn walk<'a>(nodes: &'a [TreeNode], out: &mut Vec<&'a TreeNode>) {
    for node in nodes {
        out.push(node);
        walk(&node.children, out);
    }
}

fn all_nodes(forest: &BomForest) -> Vec<&TreeNode> {
    let mut out = Vec::new();
    walk(forest.roots(), &mut out);
    out
}

fn session_for(
    repository: MockBomRepository,
    notifier: MockNotifier,
) -> BomEditorSession<MockBomRepository, MockNotifier> {
    BomEditorSession::new(
        repository,
        notifier,
        BomRequest::new("B-100", None, LoadMode::Full),
    )
}

#[test]
fn test_normalization_is_idempotent() {
    let snapshot = gearbox();
    let once = RowNormalizer::normalize(&snapshot.components);
    let raw_again: Vec<RawComponentRow> = once.iter().map(RawComponentRow::from).collect();
    let twice = RowNormalizer::normalize(&raw_again);

    assert_eq!(once, twice);
    assert_eq!(
        serde_json::to_string(&once).unwrap(),
        serde_json::to_string(&twice).unwrap()
    );
}

#[test]
fn test_path_parent_invariant() {
    let forest = build(&gearbox());

    for node in all_nodes(&forest) {
        let Some(row) = node.component() else { continue };
        if let Some(parent) = forest.parent_of(&node.id).and_then(|p| p.component()) {
            assert_eq!(row.parent_path(), Some(parent.path.as_str()), "{}", node.id);
        }
    }
}

#[test]
fn test_bom_id_propagates_to_children_without_one() {
    let forest = build(&gearbox());

    for node in all_nodes(&forest) {
        let Some(row) = node.component() else { continue };
        if row.bom_id_inherited {
            let parent = forest.parent_of(&node.id).and_then(|p| p.component()).unwrap();
            assert_eq!(row.bom_id, parent.bom_id, "{}", node.id);
        }
    }

    let cast = forest
        .find(&NodeId::from("CAST-10-GBX.HSG.CAST"))
        .and_then(|n| n.component())
        .unwrap();
    assert_eq!(cast.bom_id.as_deref(), Some("B-110"));
}

#[test]
fn test_siblings_sorted_by_line_with_cycles_last() {
    let forest = build(&gearbox());

    for node in all_nodes(&forest) {
        let first_cycle = node
            .children
            .iter()
            .position(TreeNode::is_cycle)
            .unwrap_or(node.children.len());
        assert!(node.children[first_cycle..].iter().all(TreeNode::is_cycle));

        let lines: Vec<i64> = node.children[..first_cycle]
            .iter()
            .filter_map(|c| c.component().map(|row| row.line))
            .collect();
        assert!(lines.windows(2).all(|w| w[0] <= w[1]), "{}", node.id);
    }

    let housing = forest.find(&NodeId::from("HSG-10-GBX.HSG")).unwrap();
    let steps: Vec<i64> = housing
        .children
        .iter()
        .filter_map(|c| c.cycle().map(RoutingRow::step))
        .collect();
    assert_eq!(steps, vec![10, 20]);
}

#[test]
fn test_root_cycle_attached_to_a_single_root_level_node() {
    let forest = build(&gearbox());

    let owners: Vec<&TreeNode> = all_nodes(&forest)
        .into_iter()
        .filter(|node| {
            node.children
                .iter()
                .filter_map(TreeNode::cycle)
                .any(RoutingRow::is_root_cycle)
        })
        .collect();

    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].id, NodeId::from("GBX-0-GBX"));
}

#[test]
fn test_root_level_drop_zones_partition_the_box() {
    let rect = NodeRect::new(40.0, 0.0, 600.0, 24.0);

    for level in [0, 1] {
        let modes: Vec<DropMode> = (0..=600)
            .map(|x| DropZoneClassifier::classify(level, rect, 40.0 + x as f64, false))
            .collect();

        let first_under = modes.iter().position(|m| *m == DropMode::AddUnder).unwrap();
        let first_sibling = modes.iter().position(|m| *m == DropMode::AddSibling).unwrap();
        assert_eq!(first_under, 200);
        assert_eq!(first_sibling, 400);
        assert!(modes[..first_under].iter().all(|m| *m == DropMode::Replace));
        assert!(modes[first_under..first_sibling]
            .iter()
            .all(|m| *m == DropMode::AddUnder));
        assert!(modes[first_sibling..].iter().all(|m| *m == DropMode::AddSibling));
    }
}

#[test]
fn test_lock_asymmetry_on_erp_owned_line() {
    let forest = build(&gearbox());
    let seal = NodeId::from("SEAL-20-GBX.HSG.SEAL");

    assert_eq!(
        LockEvaluator::is_node_locked(&forest, &seal, Operation::Replace),
        Some(true)
    );
    assert_eq!(
        LockEvaluator::is_node_locked(&forest, &seal, Operation::AddSibling),
        Some(false)
    );
}

#[test]
fn test_example_bom_id_propagation_and_root_cycle() {
    let snapshot: BomSnapshot = serde_json::from_str(
        r#"{
            "components": [
                {"ComponentId": 1, "Level": 0, "Path": "1", "BOMId": "B1"},
                {"ComponentId": 2, "Level": 1, "Path": "1.2"},
                {"ComponentId": 3, "Level": 2, "Path": "1.2.3"}
            ],
            "routing": [{"BOMId": "B1", "RtgStep": 10, "Level": 0}]
        }"#,
    )
    .unwrap();
    let forest = build(&snapshot);

    let components: Vec<&ComponentRow> = all_nodes(&forest)
        .into_iter()
        .filter_map(TreeNode::component)
        .collect();
    for id in ["2", "3"] {
        let row = components.iter().find(|r| r.component_id == id).unwrap();
        assert_eq!(row.bom_id.as_deref(), Some("B1"));
    }

    let with_cycles: Vec<String> = all_nodes(&forest)
        .into_iter()
        .filter(|node| node.children.iter().any(TreeNode::is_cycle))
        .filter_map(|node| node.component().map(|r| r.component_id.clone()))
        .collect();
    assert_eq!(with_cycles, vec!["1"]);
}

#[test]
fn test_example_root_cycle_associates_with_owner_only() {
    let snapshot: BomSnapshot = serde_json::from_str(
        r#"{
            "components": [
                {"ComponentId": 1, "Level": 0, "Path": "1", "BOMId": "B1"},
                {"ComponentId": 2, "Level": 1, "Path": "1.2"},
                {"ComponentId": 3, "Level": 2, "Path": "1.2.3"}
            ],
            "routing": [{"BOMId": "B1", "RtgStep": 10, "Level": 0}]
        }"#,
    )
    .unwrap();
    let forest = build(&snapshot);

    let counts: Vec<(String, usize)> = all_nodes(&forest)
        .into_iter()
        .filter_map(|node| {
            node.component().map(|row| {
                (
                    row.component_id.clone(),
                    CycleAssociator::associate(node, &snapshot.routing).len(),
                )
            })
        })
        .collect();
    assert_eq!(
        counts,
        vec![
            ("1".to_string(), 1),
            ("2".to_string(), 0),
            ("3".to_string(), 0)
        ]
    );
}

#[test]
fn test_example_drop_zones_by_level() {
    let rect = NodeRect::new(0.0, 0.0, 200.0, 20.0);
    let at = |fraction: f64| 200.0 * fraction;

    let root: Vec<DropMode> = [0.1, 0.5, 0.9]
        .iter()
        .map(|&f| DropZoneClassifier::classify(0, rect, at(f), false))
        .collect();
    assert_eq!(
        root,
        vec![DropMode::Replace, DropMode::AddUnder, DropMode::AddSibling]
    );

    let nested: Vec<DropMode> = [0.1, 0.5, 0.9]
        .iter()
        .map(|&f| DropZoneClassifier::classify(3, rect, at(f), false))
        .collect();
    assert_eq!(
        nested,
        vec![DropMode::Replace, DropMode::AddUnder, DropMode::AddUnder]
    );
}

#[test]
fn test_cycle_associator_matches_tree_builder() {
    let snapshot = gearbox();
    let forest = build(&snapshot);

    let housing = forest.find(&NodeId::from("HSG-10-GBX.HSG")).unwrap();
    let steps: Vec<i64> = CycleAssociator::associate(housing, &snapshot.routing)
        .into_iter()
        .map(RoutingRow::step)
        .collect();
    assert_eq!(steps, vec![10, 20]);

    let cast = forest.find(&NodeId::from("CAST-10-GBX.HSG.CAST")).unwrap();
    assert!(CycleAssociator::associate(cast, &snapshot.routing).is_empty());
}

#[tokio::test]
async fn test_session_drag_and_drop_happy_path() {
    let repository = MockBomRepository::new(gearbox())
        .with_response(MutationResponse::ok());
    let notifier = MockNotifier::new();
    let session = session_for(repository.clone(), notifier.clone());
    session.reload().await.unwrap();

    let housing = NodeId::from("HSG-10-GBX.HSG");
    let mut gesture = DragGesture::start(ComponentSource::Existing {
        item_id: "COVER".to_string(),
        quantity: Some(1.0),
    });
    gesture.hover(&housing, 1, NodeRect::new(0.0, 0.0, 300.0, 20.0), 290.0);
    let drop = gesture.drop().unwrap();
    assert_eq!(drop.mode, DropMode::AddSibling);

    let outcome = session.apply_drop(&drop).await;

    assert!(outcome.is_applied());
    assert_eq!(
        repository.get_dispatched(),
        vec![MutationIntent::AddComponent {
            bom_id: Some("B-100".to_string()),
            parent_component_id: Some("GBX".to_string()),
            after_line: Some(10),
            source: ComponentSource::Existing {
                item_id: "COVER".to_string(),
                quantity: Some(1.0),
            },
        }]
    );
    assert_eq!(repository.fetch_count(), 2);
    assert!(notifier.errors().is_empty());
}

#[tokio::test]
async fn test_session_picks_up_backend_changes_after_edit() {
    let repository = MockBomRepository::new(gearbox());
    let session = session_for(repository.clone(), MockNotifier::new());
    session.reload().await.unwrap();
    assert_eq!(session.forest().component_count(), 6);

    let mut edited = gearbox();
    edited.components.retain(|row| row.component_id.as_deref() != Some("SHAFT"));
    repository.set_snapshot(edited);

    let outcome = session
        .submit(|planner| planner.plan_delete(&NodeId::from("SHAFT-20-GBX.SHAFT")))
        .await;

    assert!(outcome.is_applied());
    assert_eq!(session.forest().component_count(), 5);
}

#[tokio::test]
async fn test_session_blocks_locked_root_line() {
    let repository = MockBomRepository::new(gearbox());
    let notifier = MockNotifier::new();
    let session = session_for(repository.clone(), notifier.clone());
    session.reload().await.unwrap();

    let outcome = session
        .submit(|planner| {
            planner.plan_update(
                &NodeId::from("BRG-30-GBX.BRG"),
                ComponentChanges {
                    quantity: Some(6.0),
                    ..Default::default()
                },
            )
        })
        .await;

    assert!(matches!(
        outcome,
        EditOutcome::Blocked(PolicyViolation::Locked {
            operation: Operation::Modify,
            ..
        })
    ));
    assert!(repository.get_dispatched().is_empty());
    assert_eq!(notifier.errors().len(), 1);
}

#[tokio::test]
async fn test_session_rejection_and_failure_keep_tree() {
    let repository = MockBomRepository::new(gearbox())
        .with_response(MutationResponse::failed("Line 20 is referenced by a work order"))
        .with_failure("HTTP 503");
    let notifier = MockNotifier::new();
    let session = session_for(repository.clone(), notifier.clone());
    session.reload().await.unwrap();
    let shaft = NodeId::from("SHAFT-20-GBX.SHAFT");

    let rejected = session.submit(|planner| planner.plan_delete(&shaft)).await;
    let failed = session.submit(|planner| planner.plan_delete(&shaft)).await;

    assert_eq!(
        rejected,
        EditOutcome::Rejected("Line 20 is referenced by a work order".to_string())
    );
    assert!(matches!(failed, EditOutcome::Failed(ref m) if m.contains("HTTP 503")));
    assert_eq!(repository.fetch_count(), 1);
    assert!(session.forest().find(&shaft).is_some());
    assert_eq!(notifier.errors().len(), 2);
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_session_routing_step_edits() {
    let repository = MockBomRepository::new(gearbox());
    let session = session_for(repository.clone(), MockNotifier::new());
    session.reload().await.unwrap();
    let housing = NodeId::from("HSG-10-GBX.HSG");

    let reorder = session
        .submit(|planner| {
            planner.plan_reorder_routing_steps(
                &housing,
                &[
                    NodeId::from("HSG-10-GBX.HSG/cycle-20"),
                    NodeId::from("HSG-10-GBX.HSG/cycle-10"),
                ],
            )
        })
        .await;
    assert!(reorder.is_applied());

    let on_inherited = session
        .submit(|planner| {
            planner.plan_add_routing_step(
                &NodeId::from("CAST-10-GBX.HSG.CAST"),
                RoutingStepDraft::default(),
            )
        })
        .await;
    assert!(matches!(
        on_inherited,
        EditOutcome::Blocked(PolicyViolation::MissingBomId { .. })
    ));

    assert_eq!(
        repository.get_dispatched(),
        vec![MutationIntent::ReorderRoutingSteps {
            bom_id: "B-110".to_string(),
            steps: vec![20, 10],
        }]
    );
}

#[tokio::test]
async fn test_session_multilevel_truncates_levels() {
    let repository = MockBomRepository::new(gearbox());
    let session = BomEditorSession::new(
        repository,
        MockNotifier::new(),
        BomRequest::new("B-100", None, LoadMode::Multilevel { max_level: 1 }),
    );

    session.reload().await.unwrap();

    let forest = session.forest();
    assert_eq!(forest.component_count(), 4);
    assert!(all_nodes(&forest)
        .iter()
        .filter_map(|n| n.component())
        .all(|row| row.level <= 1));
}

#[tokio::test]
async fn test_session_warns_about_anomalies() {
    let repository = MockBomRepository::from_json(include_str!("fixtures/no_root.json"));
    let notifier = MockNotifier::new();
    let session = session_for(repository, notifier.clone());

    session.reload().await.unwrap();

    assert_eq!(session.forest().roots().len(), 1);
    assert_eq!(notifier.warnings().len(), 1);
    assert!(notifier.warnings()[0].contains("X-10-A.B.X"));
}
