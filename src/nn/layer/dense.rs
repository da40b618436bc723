/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 全连接、激活、Dropout、LayerNorm、Embedding 的参数记录
 */

use super::{LayerKind, ParamConstraint, ParamScalar, ParamSpec, ParamValue, TraitForLayer};
use crate::errors::ParamError;

layer_params! {
    /// 全连接层：`[*, in_features] -> [*, out_features]`
    Linear => Linear {
        in_features: usize = Some(16) => "inFeatures", PositiveInt;
        out_features: usize = Some(16) => "outFeatures", PositiveInt;
    }
}

layer_params! {
    /// ReLU 激活，无参数
    Relu => Relu {}
}

layer_params! {
    Dropout => Dropout {
        p: f32 = Some(0.5) => "p", Probability;
    }
}

layer_params! {
    LayerNorm => LayerNorm {
        normalized_shape: usize = Some(16) => "normalizedShape", PositiveInt;
    }
}

layer_params! {
    /// 词嵌入层：只能作为序列的起点，不能作为连接目标
    Embedding => Embedding {
        num_embeddings: usize = Some(100) => "numEmbeddings", PositiveInt;
        embedding_dim: usize = Some(16) => "embeddingDim", PositiveInt;
        seq_len: usize = Some(1) => "seqLen", PositiveInt;
    }
}
