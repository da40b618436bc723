/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 一次完整的编辑会话：搭建层图、填写训练数据、提交训练并取回结果
 */
use std::sync::Mutex;

use layer_canvas::data::build_training_batch;
use layer_canvas::nn::{Command, CommandOutcome, GraphError, LayerGraph, LayerKind, Rejection};
use layer_canvas::service::{
    HyperParams, Outcome, RawResponse, ServiceError, TrainerClient, TrainerConfig,
    TrainingDispatcher, Transport, to_training_request,
};
use layer_canvas::tensor::Tensor;
use layer_canvas::utils::init_logger;

/// 模拟的训练服务：记录请求体，返回固定的训练结果
struct FakeTrainer {
    bodies: Mutex<Vec<String>>,
}

impl Transport for FakeTrainer {
    fn post_json(&self, _path: &str, body: &str) -> Result<RawResponse, ServiceError> {
        self.bodies.lock().unwrap().push(body.to_string());
        Ok(RawResponse::new(
            200,
            r#"{"message": "done", "output": [[0.9], [0.1]], "loss": 0.02, "loss_history": [0.5, 0.1, 0.02]}"#,
        ))
    }
}

#[test]
fn test_editing_session() {
    init_logger();
    let mut graph = LayerGraph::with_name("session");

    // 1. 添加节点
    let fc = graph.add_node(LayerKind::Linear);
    let conv = graph.add_node(LayerKind::Conv1d);
    let relu = graph.add_node(LayerKind::Relu);
    let emb = graph.add_node(LayerKind::Embedding);

    // 2. conv1d 默认 inChannels=1，与 linear 的 16 不符
    let result = graph.connect(fc.id(), conv.id());
    assert!(matches!(
        result,
        Err(GraphError::ConnectionRejected {
            reason: Rejection::DimensionMismatch {
                source_dim: 16,
                target_dim: 1
            },
            ..
        })
    ));

    // 3. 改成 16 后可以连接
    let outcome = graph.apply(Command::PatchParamText {
        id: conv.id().clone(),
        name: "inChannels".to_string(),
        raw: "16".to_string(),
    });
    assert!(outcome.is_success());
    assert!(graph.connect(fc.id(), conv.id()).is_ok());
    assert!(graph.connect(conv.id(), relu.id()).is_ok());

    // 4. embedding 只能作为起点
    let outcome = graph.apply(Command::Connect {
        source: relu.id().clone(),
        target: emb.id().clone(),
    });
    assert!(matches!(outcome, CommandOutcome::Failed(_)));
    assert!(outcome.message().is_some());

    // 5. 删除不需要的节点
    graph.remove_node(emb.id()).unwrap();
    assert_eq!(graph.nodes_count(), 3);
    assert_eq!(graph.edges_count(), 2);

    // 6. 训练数据：每行一个样本
    let samples = build_training_batch(
        "0.1 0.2 0.3 0.4\n0.5 0.6 0.7 0.8",
        "1\n0",
        Some(2),
    )
    .unwrap();
    let snapshot = graph.snapshot();
    let request =
        to_training_request(&snapshot, &samples, &HyperParams::new(3, 0.05).unwrap()).unwrap();

    // 提交后继续编辑不影响已生成的请求
    graph.add_node(LayerKind::Dropout);
    assert_eq!(request.nodes.len(), 3);

    // 7. 提交训练
    let trainer = FakeTrainer {
        bodies: Mutex::new(Vec::new()),
    };
    let dispatcher = TrainingDispatcher::new(TrainerClient::new(trainer, TrainerConfig::default()));
    let result = match dispatcher.submit_train(request).wait() {
        Outcome::Completed(result) => result,
        Outcome::Superseded => panic!("唯一的请求不应被取代"),
    };
    assert!(!result.is_error());
    assert_eq!(result.message.as_deref(), Some("done"));
    assert_eq!(result.loss_history, Some(vec![0.5, 0.1, 0.02]));
    let output: Tensor = result.output_tensor().unwrap().unwrap();
    assert_eq!(output.shape(), &[2, 1]);

    // 8. 服务端收到的请求
    let bodies = dispatcher.client().transport().bodies.lock().unwrap();
    let body: serde_json::Value = serde_json::from_str(&bodies[0]).unwrap();
    assert_eq!(body["epochs"], 3);
    assert_eq!(body["nodes"][1]["kind"], "conv1d");
    assert_eq!(body["nodes"][1]["type"], "conv");
    assert_eq!(body["nodes"][1]["dim"], "1d");
    assert_eq!(body["nodes"][1]["inChannels"], 16);
    assert_eq!(body["nodes"][2]["inChannels"], serde_json::Value::Null);
    assert_eq!(body["edges"].as_array().unwrap().len(), 2);
    assert_eq!(body["training"][0]["input"]["shape"], serde_json::json!([4]));
}
