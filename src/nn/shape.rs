/*
 * 形状推断：节点输出（以及期望输入）的特征数/通道数
 *
 * 这里的“维度”只是用于连接兼容性检查的单个数值，不是完整的张量形状。
 * 维度未知（None）是正常结果而非错误：刚添加的节点、池化/激活层等都可能无法确定，
 * 校验时对未知维度一律宽松处理。
 *
 * # 示例
 * ```
 * use layer_canvas::nn::{LayerGraph, LayerKind, output_dim, input_dim};
 *
 * let mut graph = LayerGraph::new();
 * let fc = graph.add_node(LayerKind::Linear);
 * let relu = graph.add_node(LayerKind::Relu);
 * assert_eq!(output_dim(&fc), Some(16));
 * assert_eq!(input_dim(&fc), Some(16));
 * assert_eq!(output_dim(&relu), None);
 * ```
 */

use crate::nn::layer::{ParamValue, TraitForLayer};
use crate::nn::node::Node;

/// 维度值：Some(n) 表示确定的 n，None 表示未知
pub type Dim = Option<usize>;

/// 节点输出的特征数/通道数
pub fn output_dim(node: &Node) -> Dim {
    dim_of(node, node.kind().output_dim_key())
}

/// 节点期望输入的特征数/通道数
pub fn input_dim(node: &Node) -> Dim {
    dim_of(node, node.kind().input_dim_key())
}

fn dim_of(node: &Node, key: Option<&str>) -> Dim {
    key.and_then(|key| node.params().get_param(key))
        .and_then(|value| ParamValue::as_usize(&value))
}

/// 用于显示的维度文本：未知维度显示为`?`
pub fn format_dim(dim: Dim) -> String {
    match dim {
        Some(n) => n.to_string(),
        None => "?".to_string(),
    }
}
