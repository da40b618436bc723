mod graph_command;
mod shape;

use crate::nn::layer::TraitForLayer;
use crate::nn::{LayerKind, Node, NodeId};

/// 以默认参数创建节点，再依次覆盖给定参数
pub(super) fn node_with(kind: LayerKind, params: &[(&str, f64)]) -> Node {
    let mut layer = kind.default_params();
    for (name, value) in params {
        layer.set_param(name, *value).unwrap();
    }
    Node::with_params(NodeId::generate(kind), layer)
}
