//! 后台发送训练/推理请求
//!
//! 每次提交都会分配一个递增的请求编号，新请求会使此前尚未取回的请求失效：
//! 旧请求的结果即使晚到，也只会以`Outcome::Superseded`返回，不会覆盖新结果。
//! 请求内容在提交时就已确定，之后对图的编辑不影响已提交的请求。

use log::{debug, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use super::client::{TrainerClient, Transport};
use super::error::ServiceError;
use super::payload::{TrainingRequest, TrainingResult};
use crate::tensor::Tensor;

/// 请求的最终结果
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 请求完成（服务端报错、网络错误等也在此，见`TrainingResult::error`）
    Completed(TrainingResult),
    /// 已被更新的请求取代
    Superseded,
}

/// 请求调度器
pub struct TrainingDispatcher<T: Transport + 'static> {
    client: Arc<TrainerClient<T>>,
    latest: Arc<AtomicU64>,
}

impl<T: Transport + 'static> TrainingDispatcher<T> {
    pub fn new(client: TrainerClient<T>) -> Self {
        Self {
            client: Arc::new(client),
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn client(&self) -> &TrainerClient<T> {
        &self.client
    }

    /// 提交训练请求
    pub fn submit_train(&self, request: TrainingRequest) -> PendingRequest {
        self.spawn(move |client| client.train(&request))
    }

    /// 提交推理请求
    pub fn submit_run(&self, input: Tensor) -> PendingRequest {
        self.spawn(move |client| client.run(&input))
    }

    /// 使所有已提交的请求失效
    pub fn cancel(&self) {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("取消编号{}之前的所有请求", id);
    }

    /// 最近一次分配的请求编号
    pub fn latest_id(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    fn spawn<F>(&self, job: F) -> PendingRequest
    where
        F: FnOnce(&TrainerClient<T>) -> Result<TrainingResult, ServiceError> + Send + 'static,
    {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let (sender, receiver) = mpsc::channel();
        let client = Arc::clone(&self.client);
        thread::spawn(move || {
            let result = job(client.as_ref()).unwrap_or_else(|e| {
                warn!("请求{}失败: {}", id, e);
                TrainingResult::from_error(e.to_string())
            });
            // 调用方可能已丢弃句柄
            let _ = sender.send(result);
        });
        debug!("已提交请求{}", id);

        PendingRequest {
            id,
            latest: Arc::clone(&self.latest),
            receiver,
        }
    }
}

/// 已提交、尚未取回结果的请求
#[derive(Debug)]
pub struct PendingRequest {
    id: u64,
    latest: Arc<AtomicU64>,
    receiver: Receiver<TrainingResult>,
}

impl PendingRequest {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// 是否仍是最新的请求
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.id
    }

    /// 阻塞等待结果；已被取代的请求立即返回`Outcome::Superseded`
    pub fn wait(self) -> Outcome {
        if !self.is_current() {
            return Outcome::Superseded;
        }
        match self.receiver.recv() {
            Ok(result) => self.settle(result),
            Err(_) => Outcome::Completed(TrainingResult::from_error("请求线程意外退出")),
        }
    }

    /// 非阻塞地查看结果，尚未完成时返回 None
    pub fn try_poll(&self) -> Option<Outcome> {
        match self.receiver.try_recv() {
            Ok(result) => Some(self.settle(result)),
            Err(TryRecvError::Empty) if self.is_current() => None,
            Err(TryRecvError::Empty) => Some(Outcome::Superseded),
            Err(TryRecvError::Disconnected) => Some(Outcome::Completed(
                TrainingResult::from_error("请求线程意外退出"),
            )),
        }
    }

    fn settle(&self, result: TrainingResult) -> Outcome {
        if self.is_current() {
            Outcome::Completed(result)
        } else {
            debug!("请求{}的结果已过期，丢弃", self.id);
            Outcome::Superseded
        }
    }
}
