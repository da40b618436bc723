/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 负责神经网络层图（layer graph）的编辑：层目录、图存储、形状推断与连接校验
 */

mod graph;
pub mod layer;
mod node;
mod shape;
mod validator;

pub use graph::{
    Command, CommandOutcome, DimHint, GraphError, GraphSnapshot, LayerGraph, PatchOutcome,
};
pub use layer::{LayerKind, LayerParams, ParamConstraint, ParamSpec, ParamValue, TraitForLayer};
pub use node::{Edge, EdgeId, Node, NodeId, Position};
pub use shape::{Dim, format_dim, input_dim, output_dim};
pub use validator::{Rejection, can_connect, check_connection};

#[cfg(test)]
mod tests;
