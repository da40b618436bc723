//! 请求/响应的序列化约定
//!
//! 训练请求中的每个节点被展平为一个`LayerSpec`：所有种类的所有参数都会出现，
//! 与本层无关的为`null`，接收方只需按`kind`（或`type`+`dim`）分派，无需按种类区分载荷结构。

use log::info;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::error::ServiceError;
use crate::data::{DataError, TrainingSample};
use crate::errors::TensorError;
use crate::nn::{GraphSnapshot, LayerKind, Node, NodeId, ParamValue, TraitForLayer};
use crate::tensor::Tensor;

/// 池化层参数在训练服务中的别名：(别名, 参数名)
const POOL_ALIASES: [(&str, &str); 4] = [
    ("poolKernelH", "kernelH"),
    ("poolKernelW", "kernelW"),
    ("poolStrideH", "strideH"),
    ("poolStrideW", "strideW"),
];

/// 所有种类参数名的并集（按层目录顺序，去重）
pub fn all_param_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for kind in LayerKind::all() {
        for spec in kind.param_schema() {
            if !names.contains(&spec.name) {
                names.push(spec.name);
            }
        }
    }
    names
}

/// 展平后的节点描述
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: NodeId,
    pub kind: LayerKind,
    /// 层族名，如`conv`、`maxpool`
    #[serde(rename = "type")]
    pub family: &'static str,
    pub dim: Option<&'static str>,
    #[serde(flatten)]
    pub params: BTreeMap<String, Option<ParamValue>>,
}

impl LayerSpec {
    pub fn from_node(node: &Node) -> Self {
        let kind = node.kind();
        let mut params: BTreeMap<String, Option<ParamValue>> = all_param_names()
            .into_iter()
            .map(|name| (name.to_string(), node.params().get_param(name)))
            .collect();
        for (alias, name) in POOL_ALIASES {
            let value = if kind.is_pool() {
                node.params().get_param(name)
            } else {
                None
            };
            params.insert(alias.to_string(), value);
        }

        Self {
            id: node.id().clone(),
            kind,
            family: kind.family(),
            dim: kind.spatial_dim(),
            params,
        }
    }

    pub fn param(&self, name: &str) -> Option<ParamValue> {
        self.params.get(name).copied().flatten()
    }
}

/// 边的（源, 目标）对
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgePair {
    pub source: NodeId,
    pub target: NodeId,
}

/// 训练超参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HyperParams {
    pub epochs: usize,
    pub learning_rate: f64,
}

impl Default for HyperParams {
    fn default() -> Self {
        Self {
            epochs: 20,
            learning_rate: 0.01,
        }
    }
}

impl HyperParams {
    pub fn new(epochs: usize, learning_rate: f64) -> Result<Self, ServiceError> {
        let hyper = Self {
            epochs,
            learning_rate,
        };
        hyper.validate()?;
        Ok(hyper)
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.epochs < 1 {
            return Err(ServiceError::InvalidHyperParams(format!(
                "epochs须≥1，实际为{}",
                self.epochs
            )));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ServiceError::InvalidHyperParams(format!(
                "learningRate须为大于0的有限值，实际为{}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

/// 训练请求
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingRequest {
    pub nodes: Vec<LayerSpec>,
    pub edges: Vec<EdgePair>,
    pub epochs: usize,
    #[serde(rename = "learningRate")]
    pub learning_rate: f64,
    pub training: Vec<TrainingSample>,
}

/// 推理请求
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRequest {
    pub input: Tensor,
}

/// 由图快照、训练样本与超参数生成训练请求。
///
/// 节点与边都按加入图的顺序排列；样本批次允许为空（由训练服务自行生成数据），
/// 非空时所有样本的输入形状、输出形状须分别一致。
pub fn to_training_request(
    snapshot: &GraphSnapshot,
    samples: &[TrainingSample],
    hyper: &HyperParams,
) -> Result<TrainingRequest, ServiceError> {
    hyper.validate()?;
    check_sample_shapes(samples)?;

    let nodes: Vec<LayerSpec> = snapshot.nodes().iter().map(LayerSpec::from_node).collect();
    let edges: Vec<EdgePair> = snapshot
        .edges()
        .iter()
        .map(|edge| EdgePair {
            source: edge.source().clone(),
            target: edge.target().clone(),
        })
        .collect();

    info!(
        "生成训练请求：{}个节点，{}条边，{}个样本，epochs={}",
        nodes.len(),
        edges.len(),
        samples.len(),
        hyper.epochs
    );
    Ok(TrainingRequest {
        nodes,
        edges,
        epochs: hyper.epochs,
        learning_rate: hyper.learning_rate,
        training: samples.to_vec(),
    })
}

fn check_sample_shapes(samples: &[TrainingSample]) -> Result<(), DataError> {
    let Some(first) = samples.first() else {
        return Ok(());
    };
    for (offset, sample) in samples.iter().enumerate().skip(1) {
        for (expected, got) in [
            (first.input.shape(), sample.input.shape()),
            (first.output.shape(), sample.output.shape()),
        ] {
            if expected != got {
                return Err(DataError::ShapeMismatch {
                    index: offset + 1,
                    expected: expected.to_vec(),
                    got: got.to_vec(),
                });
            }
        }
    }
    Ok(())
}

/// 由输入张量生成推理请求
pub fn to_run_request(input: &Tensor) -> RunRequest {
    RunRequest {
        input: input.clone(),
    }
}

/// 训练/推理结果（字段都可能缺省）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrainingResult {
    /// 模型输出（嵌套数组）
    pub output: Option<Value>,
    /// 最后一轮的损失
    pub loss: Option<f64>,
    /// 每轮的损失
    pub loss_history: Option<Vec<f64>>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl TrainingResult {
    pub fn from_error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// 把输出还原为张量
    pub fn output_tensor(&self) -> Result<Option<Tensor>, TensorError> {
        self.output.as_ref().map(Tensor::from_nested).transpose()
    }
}

/// 解析训练服务的响应。
///
/// 兼容`output`/`outputs`和`loss_history`/`lossHistory`两种字段名；
/// 没有`error`但有 FastAPI 风格的`detail`时，以`detail`作为错误信息。
/// `loss_history`中有非数字项时整体视为无法解析。
/// 响应不是 JSON 对象时返回`ServiceError::InvalidResponse`，其中保留原文。
pub fn from_training_response(raw: &str) -> Result<TrainingResult, ServiceError> {
    let invalid = |reason: String| ServiceError::InvalidResponse {
        raw: raw.to_string(),
        reason,
    };
    let value: Value = serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(invalid("响应不是 JSON 对象".to_string()));
    };

    // 逐轮损失须全为数字，跳过个别项会使后面各轮错位
    let loss_history = match field(&fields, &["loss_history", "lossHistory"]) {
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .map(Value::as_f64)
                .collect::<Option<Vec<f64>>>()
                .ok_or_else(|| invalid("loss_history 中含有非数字项".to_string()))?,
        ),
        _ => None,
    };

    Ok(TrainingResult {
        output: field(&fields, &["output", "outputs"]).cloned(),
        loss: field(&fields, &["loss"]).and_then(Value::as_f64),
        loss_history,
        error: field(&fields, &["error", "detail"]).map(text_of),
        message: field(&fields, &["message"]).map(text_of),
    })
}

/// 按顺序取第一个存在且非`null`的字段
fn field<'a>(fields: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| fields.get(*name))
        .find(|value| !value.is_null())
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
