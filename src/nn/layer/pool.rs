/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 池化层的参数记录（池化不改变通道数，因此都没有输出维度参数）
 */

use super::{LayerKind, ParamConstraint, ParamScalar, ParamSpec, ParamValue, TraitForLayer};
use crate::errors::ParamError;

layer_params! {
    AvgPool1d => AvgPool1d {
        kernel: usize = Some(2) => "kernel", PositiveInt;
        stride: usize = Some(2) => "stride", PositiveInt;
        padding: usize = Some(0) => "padding", NonNegativeInt;
    }
}

layer_params! {
    AvgPool2d => AvgPool2d {
        kernel_h: usize = Some(2) => "kernelH", PositiveInt;
        kernel_w: usize = Some(2) => "kernelW", PositiveInt;
        stride_h: usize = Some(1) => "strideH", PositiveInt;
        stride_w: usize = Some(1) => "strideW", PositiveInt;
    }
}

layer_params! {
    AvgPool3d => AvgPool3d {
        kernel_d: usize = Some(2) => "kernelD", PositiveInt;
        kernel_h: usize = Some(2) => "kernelH", PositiveInt;
        kernel_w: usize = Some(2) => "kernelW", PositiveInt;
        stride_d: usize = Some(1) => "strideD", PositiveInt;
        stride_h: usize = Some(1) => "strideH", PositiveInt;
        stride_w: usize = Some(1) => "strideW", PositiveInt;
    }
}

layer_params! {
    MaxPool1d => MaxPool1d {
        kernel: usize = Some(2) => "kernel", PositiveInt;
        stride: usize = Some(1) => "stride", PositiveInt;
    }
}

layer_params! {
    MaxPool2d => MaxPool2d {
        kernel_h: usize = Some(2) => "kernelH", PositiveInt;
        kernel_w: usize = Some(2) => "kernelW", PositiveInt;
        stride_h: usize = Some(1) => "strideH", PositiveInt;
        stride_w: usize = Some(1) => "strideW", PositiveInt;
    }
}

layer_params! {
    MaxPool3d => MaxPool3d {
        kernel_d: usize = Some(2) => "kernelD", PositiveInt;
        kernel_h: usize = Some(2) => "kernelH", PositiveInt;
        kernel_w: usize = Some(2) => "kernelW", PositiveInt;
        stride_d: usize = Some(1) => "strideD", PositiveInt;
        stride_h: usize = Some(1) => "strideH", PositiveInt;
        stride_w: usize = Some(1) => "strideW", PositiveInt;
    }
}

layer_params! {
    /// 自适应平均池化：直接指定输出长度
    AdaptiveAvgPool1d => AdaptiveAvgPool1d {
        output_size: usize = Some(1) => "outputSize", PositiveInt;
    }
}

layer_params! {
    AdaptiveAvgPool2d => AdaptiveAvgPool2d {
        output_h: usize = Some(1) => "outputH", PositiveInt;
        output_w: usize = Some(1) => "outputW", PositiveInt;
    }
}
