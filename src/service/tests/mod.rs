mod dispatch;

use std::sync::Mutex;

use crate::service::{RawResponse, ServiceError, Transport};

/// 内存中的传输实现：记录收到的请求，按顺序返回预设响应
pub(super) struct MockTransport {
    responses: Mutex<Vec<Result<RawResponse, String>>>,
    pub(super) requests: Mutex<Vec<(String, String)>>,
}

impl MockTransport {
    pub(super) fn replying(status: u16, body: &str) -> Self {
        Self {
            responses: Mutex::new(vec![Ok(RawResponse::new(status, body))]),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn unreachable(reason: &str) -> Self {
        Self {
            responses: Mutex::new(vec![Err(reason.to_string())]),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 最后一次请求的（路径, JSON 请求体）
    pub(super) fn last_request(&self) -> (String, serde_json::Value) {
        let requests = self.requests.lock().unwrap();
        let (path, body) = requests.last().unwrap();
        (path.clone(), serde_json::from_str(body).unwrap())
    }
}

impl Transport for MockTransport {
    fn post_json(&self, path: &str, body: &str) -> Result<RawResponse, ServiceError> {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), body.to_string()));
        let mut responses = self.responses.lock().unwrap();
        // 最后一个预设响应重复使用
        let next = if responses.len() > 1 {
            responses.remove(0)
        } else {
            responses[0].clone()
        };
        next.map_err(ServiceError::Network)
    }
}
