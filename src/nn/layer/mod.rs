/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 层目录（Layer Catalog）：封闭的层种类集合，以及每种层自带的参数表
 *
 * 每种层对应一个带类型的参数记录（如`Linear`、`Conv2d`），
 * 统一收拢在`LayerParams`枚举中，经`TraitForLayer`（enum_dispatch）分发。
 * 形状推断与连接校验都对`LayerKind`做穷尽匹配，不存在“其它情况一律放行”的兜底分支。
 */

mod param;

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::errors::ParamError;

pub use param::{ParamConstraint, ParamScalar, ParamSpec, ParamValue};

/// 生成某种层的参数记录：结构体、默认值、参数表以及`TraitForLayer`实现。
///
/// 每行格式：`字段: 类型 = 默认值 => "序列化字段名", 约束;`
macro_rules! layer_params {
    (
        $(#[$meta:meta])*
        $name:ident => $kind:ident {
            $( $field:ident : $ty:ty = $default:expr => $wire:literal, $constraint:ident; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $( pub $field: Option<$ty>, )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: $default, )*
                }
            }
        }

        impl $name {
            /// 参数表（按序列化顺序）
            pub const SCHEMA: &'static [ParamSpec] = &[
                $( ParamSpec { name: $wire, constraint: ParamConstraint::$constraint }, )*
            ];
        }

        impl TraitForLayer for $name {
            fn kind(&self) -> LayerKind {
                LayerKind::$kind
            }

            fn get_param(&self, name: &str) -> Option<ParamValue> {
                match name {
                    $( $wire => self.$field.map(ParamScalar::into_value), )*
                    _ => None,
                }
            }

            #[allow(unused_variables)]
            fn set_param(&mut self, name: &str, value: f64) -> Result<(), ParamError> {
                match name {
                    $(
                        $wire => {
                            let checked = ParamConstraint::$constraint.check($wire, value)?;
                            let typed = <$ty as ParamScalar>::from_value(checked).ok_or_else(|| {
                                ParamError::MustBeInteger { name: $wire.to_string(), value }
                            })?;
                            self.$field = Some(typed);
                            Ok(())
                        }
                    )*
                    _ => Err(ParamError::UnknownParam {
                        kind: LayerKind::$kind.to_string(),
                        name: name.to_string(),
                    }),
                }
            }

            fn values(&self) -> Vec<(&'static str, Option<ParamValue>)> {
                vec![ $( ($wire, self.$field.map(ParamScalar::into_value)), )* ]
            }
        }
    };
}

mod conv;
mod dense;
mod pool;

pub use conv::{Conv1d, Conv2d, Conv3d, ConvTranspose1d, ConvTranspose2d};
pub use dense::{Dropout, Embedding, LayerNorm, Linear, Relu};
pub use pool::{
    AdaptiveAvgPool1d, AdaptiveAvgPool2d, AvgPool1d, AvgPool2d, AvgPool3d, MaxPool1d, MaxPool2d,
    MaxPool3d,
};

/// 层参数记录的公共接口
#[enum_dispatch]
pub trait TraitForLayer {
    /// 本记录所属的层种类
    fn kind(&self) -> LayerKind;
    /// 读取参数；不属于本层或尚未设置时返回 None
    fn get_param(&self, name: &str) -> Option<ParamValue>;
    /// 写入参数（先按参数表校验），失败时本记录保持不变
    fn set_param(&mut self, name: &str, value: f64) -> Result<(), ParamError>;
    /// 按参数表顺序列出全部参数
    fn values(&self) -> Vec<(&'static str, Option<ParamValue>)>;
}

/// 层参数：每个变体携带对应层的参数记录
#[enum_dispatch(TraitForLayer)]
#[derive(Debug, Clone, PartialEq)]
pub enum LayerParams {
    Linear,
    Relu,
    Dropout,
    LayerNorm,
    Embedding,
    Conv1d,
    Conv2d,
    Conv3d,
    ConvTranspose1d,
    ConvTranspose2d,
    AvgPool1d,
    AvgPool2d,
    AvgPool3d,
    MaxPool1d,
    MaxPool2d,
    MaxPool3d,
    AdaptiveAvgPool1d,
    AdaptiveAvgPool2d,
}

/// 层种类（封闭集合），显示与序列化时均为全小写，如`conv2d`、`adaptiveavgpool1d`
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LayerKind {
    Linear,
    Relu,
    Dropout,
    LayerNorm,
    Embedding,
    Conv1d,
    Conv2d,
    Conv3d,
    ConvTranspose1d,
    ConvTranspose2d,
    AvgPool1d,
    AvgPool2d,
    AvgPool3d,
    MaxPool1d,
    MaxPool2d,
    MaxPool3d,
    AdaptiveAvgPool1d,
    AdaptiveAvgPool2d,
}

impl LayerKind {
    /// 所有层种类
    pub fn all() -> impl Iterator<Item = LayerKind> {
        LayerKind::iter()
    }

    /// 新建节点时使用的默认参数
    pub fn default_params(&self) -> LayerParams {
        match self {
            LayerKind::Linear => Linear::default().into(),
            LayerKind::Relu => Relu::default().into(),
            LayerKind::Dropout => Dropout::default().into(),
            LayerKind::LayerNorm => LayerNorm::default().into(),
            LayerKind::Embedding => Embedding::default().into(),
            LayerKind::Conv1d => Conv1d::default().into(),
            LayerKind::Conv2d => Conv2d::default().into(),
            LayerKind::Conv3d => Conv3d::default().into(),
            LayerKind::ConvTranspose1d => ConvTranspose1d::default().into(),
            LayerKind::ConvTranspose2d => ConvTranspose2d::default().into(),
            LayerKind::AvgPool1d => AvgPool1d::default().into(),
            LayerKind::AvgPool2d => AvgPool2d::default().into(),
            LayerKind::AvgPool3d => AvgPool3d::default().into(),
            LayerKind::MaxPool1d => MaxPool1d::default().into(),
            LayerKind::MaxPool2d => MaxPool2d::default().into(),
            LayerKind::MaxPool3d => MaxPool3d::default().into(),
            LayerKind::AdaptiveAvgPool1d => AdaptiveAvgPool1d::default().into(),
            LayerKind::AdaptiveAvgPool2d => AdaptiveAvgPool2d::default().into(),
        }
    }

    /// 参数表
    pub fn param_schema(&self) -> &'static [ParamSpec] {
        match self {
            LayerKind::Linear => Linear::SCHEMA,
            LayerKind::Relu => Relu::SCHEMA,
            LayerKind::Dropout => Dropout::SCHEMA,
            LayerKind::LayerNorm => LayerNorm::SCHEMA,
            LayerKind::Embedding => Embedding::SCHEMA,
            LayerKind::Conv1d => Conv1d::SCHEMA,
            LayerKind::Conv2d => Conv2d::SCHEMA,
            LayerKind::Conv3d => Conv3d::SCHEMA,
            LayerKind::ConvTranspose1d => ConvTranspose1d::SCHEMA,
            LayerKind::ConvTranspose2d => ConvTranspose2d::SCHEMA,
            LayerKind::AvgPool1d => AvgPool1d::SCHEMA,
            LayerKind::AvgPool2d => AvgPool2d::SCHEMA,
            LayerKind::AvgPool3d => AvgPool3d::SCHEMA,
            LayerKind::MaxPool1d => MaxPool1d::SCHEMA,
            LayerKind::MaxPool2d => MaxPool2d::SCHEMA,
            LayerKind::MaxPool3d => MaxPool3d::SCHEMA,
            LayerKind::AdaptiveAvgPool1d => AdaptiveAvgPool1d::SCHEMA,
            LayerKind::AdaptiveAvgPool2d => AdaptiveAvgPool2d::SCHEMA,
        }
    }

    /// 决定本层输出特征数/通道数的参数名；池化与激活类层没有（输出维度随输入）
    pub fn output_dim_key(&self) -> Option<&'static str> {
        match self {
            LayerKind::Linear => Some("outFeatures"),
            LayerKind::LayerNorm => Some("normalizedShape"),
            LayerKind::Embedding => Some("embeddingDim"),
            LayerKind::Conv1d
            | LayerKind::Conv2d
            | LayerKind::Conv3d
            | LayerKind::ConvTranspose1d
            | LayerKind::ConvTranspose2d => Some("outChannels"),
            LayerKind::Relu
            | LayerKind::Dropout
            | LayerKind::AvgPool1d
            | LayerKind::AvgPool2d
            | LayerKind::AvgPool3d
            | LayerKind::MaxPool1d
            | LayerKind::MaxPool2d
            | LayerKind::MaxPool3d
            | LayerKind::AdaptiveAvgPool1d
            | LayerKind::AdaptiveAvgPool2d => None,
        }
    }

    /// 本层期望的输入特征数/通道数对应的参数名
    pub fn input_dim_key(&self) -> Option<&'static str> {
        match self {
            LayerKind::Linear => Some("inFeatures"),
            LayerKind::LayerNorm => Some("normalizedShape"),
            LayerKind::Conv1d
            | LayerKind::Conv2d
            | LayerKind::Conv3d
            | LayerKind::ConvTranspose1d
            | LayerKind::ConvTranspose2d => Some("inChannels"),
            LayerKind::Relu
            | LayerKind::Dropout
            | LayerKind::Embedding
            | LayerKind::AvgPool1d
            | LayerKind::AvgPool2d
            | LayerKind::AvgPool3d
            | LayerKind::MaxPool1d
            | LayerKind::MaxPool2d
            | LayerKind::MaxPool3d
            | LayerKind::AdaptiveAvgPool1d
            | LayerKind::AdaptiveAvgPool2d => None,
        }
    }

    /// 层族名（外部训练服务按它和`spatial_dim`分派），如`conv2d`的族名为`conv`
    pub fn family(&self) -> &'static str {
        match self {
            LayerKind::Linear => "linear",
            LayerKind::Relu => "relu",
            LayerKind::Dropout => "dropout",
            LayerKind::LayerNorm => "layernorm",
            LayerKind::Embedding => "embedding",
            LayerKind::Conv1d | LayerKind::Conv2d | LayerKind::Conv3d => "conv",
            LayerKind::ConvTranspose1d | LayerKind::ConvTranspose2d => "convtranspose",
            LayerKind::AvgPool1d | LayerKind::AvgPool2d | LayerKind::AvgPool3d => "avgpool",
            LayerKind::MaxPool1d | LayerKind::MaxPool2d | LayerKind::MaxPool3d => "maxpool",
            LayerKind::AdaptiveAvgPool1d | LayerKind::AdaptiveAvgPool2d => "adaptiveavgpool",
        }
    }

    /// 空间维度（`"1d"`/`"2d"`/`"3d"`），非卷积/池化层为 None
    pub fn spatial_dim(&self) -> Option<&'static str> {
        match self {
            LayerKind::Conv1d
            | LayerKind::ConvTranspose1d
            | LayerKind::AvgPool1d
            | LayerKind::MaxPool1d
            | LayerKind::AdaptiveAvgPool1d => Some("1d"),
            LayerKind::Conv2d
            | LayerKind::ConvTranspose2d
            | LayerKind::AvgPool2d
            | LayerKind::MaxPool2d
            | LayerKind::AdaptiveAvgPool2d => Some("2d"),
            LayerKind::Conv3d | LayerKind::AvgPool3d | LayerKind::MaxPool3d => Some("3d"),
            LayerKind::Linear
            | LayerKind::Relu
            | LayerKind::Dropout
            | LayerKind::LayerNorm
            | LayerKind::Embedding => None,
        }
    }

    /// 是否为（非自适应的）池化层
    pub fn is_pool(&self) -> bool {
        matches!(self.family(), "avgpool" | "maxpool")
    }
}
