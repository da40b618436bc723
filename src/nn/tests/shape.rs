use super::node_with;
use crate::nn::layer::ConvTranspose1d;
use crate::nn::{LayerKind, Node, NodeId, format_dim, input_dim, output_dim};

#[test]
fn test_output_dim_defaults() {
    let expected = [
        (LayerKind::Linear, Some(16)),
        (LayerKind::LayerNorm, Some(16)),
        (LayerKind::Embedding, Some(16)),
        (LayerKind::Conv1d, Some(32)),
        (LayerKind::Conv2d, Some(32)),
        (LayerKind::Conv3d, Some(32)),
        (LayerKind::ConvTranspose1d, None),
        (LayerKind::ConvTranspose2d, None),
        (LayerKind::Relu, None),
        (LayerKind::Dropout, None),
        (LayerKind::MaxPool2d, None),
        (LayerKind::AdaptiveAvgPool1d, None),
    ];
    for (kind, dim) in expected {
        assert_eq!(output_dim(&node_with(kind, &[])), dim, "{kind}");
    }
}

#[test]
fn test_input_dim_defaults() {
    assert_eq!(input_dim(&node_with(LayerKind::Linear, &[])), Some(16));
    assert_eq!(input_dim(&node_with(LayerKind::LayerNorm, &[])), Some(16));
    assert_eq!(input_dim(&node_with(LayerKind::Conv2d, &[])), Some(1));
    assert_eq!(input_dim(&node_with(LayerKind::Embedding, &[])), None);
    assert_eq!(input_dim(&node_with(LayerKind::Relu, &[])), None);
    assert_eq!(input_dim(&node_with(LayerKind::AvgPool3d, &[])), None);
}

#[test]
fn test_dim_follows_params() {
    let fc = node_with(LayerKind::Linear, &[("inFeatures", 8.0), ("outFeatures", 4.0)]);
    assert_eq!(input_dim(&fc), Some(8));
    assert_eq!(output_dim(&fc), Some(4));

    let emb = node_with(LayerKind::Embedding, &[("embeddingDim", 64.0)]);
    assert_eq!(output_dim(&emb), Some(64));

    // 转置卷积设置了输出通道数后维度随之确定
    let transpose = node_with(LayerKind::ConvTranspose1d, &[("outChannels", 6.0)]);
    assert_eq!(output_dim(&transpose), Some(6));
    assert_eq!(input_dim(&transpose), None);

    let partial = Node::with_params(
        NodeId::from("tconv"),
        ConvTranspose1d {
            in_channels: Some(3),
            ..ConvTranspose1d::default()
        }
        .into(),
    );
    assert_eq!(input_dim(&partial), Some(3));
    assert_eq!(output_dim(&partial), None);
}

#[test]
fn test_format_dim() {
    assert_eq!(format_dim(Some(32)), "32");
    assert_eq!(format_dim(None), "?");
}
