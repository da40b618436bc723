use crate::nn::{
    Command, CommandOutcome, GraphError, LayerGraph, LayerKind, NodeId, PatchOutcome, Position,
};

fn added_id(outcome: CommandOutcome) -> NodeId {
    match outcome {
        CommandOutcome::NodeAdded(node) => node.id().clone(),
        other => panic!("预期 NodeAdded，实际得到 {other:?}"),
    }
}

#[test]
fn test_apply_command_sequence() {
    let mut graph = LayerGraph::new();
    let conv = added_id(graph.apply(Command::AddNode {
        kind: LayerKind::Conv2d,
    }));
    let relu = added_id(graph.apply(Command::AddNode {
        kind: LayerKind::Relu,
    }));

    let outcome = graph.apply(Command::Connect {
        source: conv.clone(),
        target: relu.clone(),
    });
    assert!(matches!(outcome, CommandOutcome::Connected(_)));
    assert!(outcome.is_success());
    assert_eq!(outcome.message(), None);

    let outcome = graph.apply(Command::MoveNode {
        id: relu.clone(),
        position: Position::new(1.0, 2.0),
    });
    assert_eq!(outcome, CommandOutcome::NodeMoved);

    let outcome = graph.apply(Command::PatchParam {
        id: conv.clone(),
        name: "strideH".to_string(),
        value: 2.0,
    });
    assert!(outcome.is_success());

    let outcome = graph.apply(Command::RemoveNode { id: conv.clone() });
    assert!(matches!(outcome, CommandOutcome::NodeRemoved(_)));
    assert_eq!(graph.edges_count(), 0);
    assert_eq!(graph.snapshot().revision(), 6);
}

#[test]
fn test_apply_failed_command() {
    let mut graph = LayerGraph::new();
    let fc = added_id(graph.apply(Command::AddNode {
        kind: LayerKind::Linear,
    }));
    let emb = added_id(graph.apply(Command::AddNode {
        kind: LayerKind::Embedding,
    }));
    let revision = graph.snapshot().revision();

    let outcome = graph.apply(Command::Connect {
        source: fc,
        target: emb,
    });
    assert!(matches!(
        outcome,
        CommandOutcome::Failed(GraphError::ConnectionRejected { .. })
    ));
    assert!(!outcome.is_success());
    assert_eq!(
        outcome.message().as_deref(),
        Some("无法连接 linear → embedding：embedding 层不能作为连接目标")
    );
    assert_eq!(graph.snapshot().revision(), revision);

    let outcome = graph.apply(Command::Disconnect {
        id: "a->b".into(),
    });
    assert!(matches!(
        outcome,
        CommandOutcome::Failed(GraphError::EdgeNotFound(_))
    ));
}

#[test]
fn test_apply_rejected_patch() {
    let mut graph = LayerGraph::new();
    let dropout = added_id(graph.apply(Command::AddNode {
        kind: LayerKind::Dropout,
    }));

    let outcome = graph.apply(Command::PatchParamText {
        id: dropout.clone(),
        name: "p".to_string(),
        raw: "half".to_string(),
    });
    assert!(matches!(
        outcome,
        CommandOutcome::ParamPatched(PatchOutcome::Rejected { .. })
    ));
    assert!(!outcome.is_success());
    assert_eq!(
        outcome.message().as_deref(),
        Some("参数p的输入“half”不是数字")
    );

    let outcome = graph.apply(Command::PatchParamText {
        id: dropout,
        name: "p".to_string(),
        raw: "0.2".to_string(),
    });
    assert!(outcome.is_success());
}
