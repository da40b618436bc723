use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};

use super::MockTransport;
use crate::service::{
    Outcome, RawResponse, ServiceError, TrainerClient, TrainerConfig, TrainingDispatcher,
    Transport,
};
use crate::tensor::Tensor;

/// 收到放行信号后才返回响应的传输实现
struct GatedTransport {
    gate: Mutex<Receiver<()>>,
}

impl GatedTransport {
    fn new() -> (Self, Sender<()>) {
        let (sender, receiver) = mpsc::channel();
        (
            Self {
                gate: Mutex::new(receiver),
            },
            sender,
        )
    }
}

impl Transport for GatedTransport {
    fn post_json(&self, _path: &str, body: &str) -> Result<RawResponse, ServiceError> {
        let _ = self.gate.lock().unwrap().recv();
        // 把请求体原样作为输出返回，便于区分是哪个请求的结果
        let input: serde_json::Value = serde_json::from_str(body).unwrap();
        let output = serde_json::json!({"output": input["input"]["data"]});
        Ok(RawResponse::new(200, output.to_string()))
    }
}

fn tensor(values: &[f32]) -> Tensor {
    Tensor::new(values, &[values.len()]).unwrap()
}

#[test]
fn test_single_request_completes() {
    let client = TrainerClient::new(
        MockTransport::replying(200, r#"{"loss": 0.1}"#),
        TrainerConfig::default(),
    );
    let dispatcher = TrainingDispatcher::new(client);
    let pending = dispatcher.submit_run(tensor(&[1.0]));
    assert_eq!(pending.id(), dispatcher.latest_id());

    match pending.wait() {
        Outcome::Completed(result) => assert_eq!(result.loss, Some(0.1)),
        Outcome::Superseded => panic!("唯一的请求不应被取代"),
    }
}

#[test]
fn test_failures_become_error_results() {
    crate::utils::init_test_logger();
    let client = TrainerClient::new(
        MockTransport::unreachable("connection refused"),
        TrainerConfig::default(),
    );
    let dispatcher = TrainingDispatcher::new(client);
    match dispatcher.submit_run(tensor(&[1.0])).wait() {
        Outcome::Completed(result) => {
            assert_eq!(
                result.error.as_deref(),
                Some("网络请求失败: connection refused")
            );
        }
        Outcome::Superseded => panic!("唯一的请求不应被取代"),
    }
}

#[test]
fn test_malformed_response_becomes_error_result() {
    let client = TrainerClient::new(
        MockTransport::replying(502, "<html>502 Bad Gateway</html>"),
        TrainerConfig::default(),
    );
    let dispatcher = TrainingDispatcher::new(client);
    match dispatcher.submit_run(tensor(&[1.0])).wait() {
        Outcome::Completed(result) => {
            assert!(result.is_error());
            let error = result.error.unwrap();
            assert!(error.contains("<html>502 Bad Gateway</html>"));
            assert_eq!(result.output, None);
        }
        Outcome::Superseded => panic!("唯一的请求不应被取代"),
    }
}

#[test]
fn test_newer_request_supersedes_older() {
    let (transport, gate) = GatedTransport::new();
    let dispatcher = TrainingDispatcher::new(TrainerClient::new(transport, TrainerConfig::default()));

    let first = dispatcher.submit_run(tensor(&[1.0]));
    let second = dispatcher.submit_run(tensor(&[2.0]));
    assert!(second.id() > first.id());
    assert!(!first.is_current());
    assert!(second.is_current());

    // 尚未放行
    assert_eq!(second.try_poll(), None);
    assert_eq!(first.try_poll(), Some(Outcome::Superseded));

    gate.send(()).unwrap();
    gate.send(()).unwrap();

    assert_eq!(first.wait(), Outcome::Superseded);
    match second.wait() {
        Outcome::Completed(result) => {
            assert_eq!(result.output, Some(serde_json::json!([2.0])));
        }
        Outcome::Superseded => panic!("最新的请求不应被取代"),
    }
}

#[test]
fn test_cancel() {
    let (transport, gate) = GatedTransport::new();
    let dispatcher = TrainingDispatcher::new(TrainerClient::new(transport, TrainerConfig::default()));
    let pending = dispatcher.submit_run(tensor(&[1.0]));
    dispatcher.cancel();
    assert!(!pending.is_current());
    gate.send(()).unwrap();
    assert_eq!(pending.wait(), Outcome::Superseded);
}
