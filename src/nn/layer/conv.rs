/*
 * @Author       : 老董
 * @Date         : 2026-10-19
 * @Description  : 卷积与转置卷积层的参数记录
 *
 * 1d 卷积使用单值的 kernelSize/stride/padding，2d/3d 按轴拆成 H/W/D 分量。
 * 转置卷积的输入/输出通道数默认不设置，此时其输出维度未知。
 */

use super::{LayerKind, ParamConstraint, ParamScalar, ParamSpec, ParamValue, TraitForLayer};
use crate::errors::ParamError;

layer_params! {
    Conv1d => Conv1d {
        in_channels: usize = Some(1) => "inChannels", PositiveInt;
        out_channels: usize = Some(32) => "outChannels", PositiveInt;
        kernel_size: usize = Some(3) => "kernelSize", PositiveInt;
        stride: usize = Some(1) => "stride", PositiveInt;
        padding: usize = Some(0) => "padding", NonNegativeInt;
    }
}

layer_params! {
    Conv2d => Conv2d {
        in_channels: usize = Some(1) => "inChannels", PositiveInt;
        out_channels: usize = Some(32) => "outChannels", PositiveInt;
        kernel_h: usize = Some(3) => "kernelH", PositiveInt;
        kernel_w: usize = Some(3) => "kernelW", PositiveInt;
        stride_h: usize = Some(1) => "strideH", PositiveInt;
        stride_w: usize = Some(1) => "strideW", PositiveInt;
        pad_h: usize = Some(0) => "padH", NonNegativeInt;
        pad_w: usize = Some(0) => "padW", NonNegativeInt;
    }
}

layer_params! {
    Conv3d => Conv3d {
        in_channels: usize = Some(1) => "inChannels", PositiveInt;
        out_channels: usize = Some(32) => "outChannels", PositiveInt;
        kernel_d: usize = Some(3) => "kernelD", PositiveInt;
        kernel_h: usize = Some(3) => "kernelH", PositiveInt;
        kernel_w: usize = Some(3) => "kernelW", PositiveInt;
        stride_d: usize = Some(1) => "strideD", PositiveInt;
        stride_h: usize = Some(1) => "strideH", PositiveInt;
        stride_w: usize = Some(1) => "strideW", PositiveInt;
        pad_d: usize = Some(0) => "padD", NonNegativeInt;
        pad_h: usize = Some(0) => "padH", NonNegativeInt;
        pad_w: usize = Some(0) => "padW", NonNegativeInt;
    }
}

layer_params! {
    ConvTranspose1d => ConvTranspose1d {
        in_channels: usize = None => "inChannels", PositiveInt;
        out_channels: usize = None => "outChannels", PositiveInt;
        kernel_size: usize = Some(3) => "kernelSize", PositiveInt;
        stride: usize = Some(1) => "stride", PositiveInt;
        padding: usize = Some(0) => "padding", NonNegativeInt;
        out_padding: usize = Some(0) => "outPadding", NonNegativeInt;
    }
}

layer_params! {
    ConvTranspose2d => ConvTranspose2d {
        in_channels: usize = None => "inChannels", PositiveInt;
        out_channels: usize = None => "outChannels", PositiveInt;
        kernel_h: usize = Some(3) => "kernelH", PositiveInt;
        kernel_w: usize = Some(3) => "kernelW", PositiveInt;
        stride_h: usize = Some(1) => "strideH", PositiveInt;
        stride_w: usize = Some(1) => "strideW", PositiveInt;
        pad_h: usize = Some(0) => "padH", NonNegativeInt;
        pad_w: usize = Some(0) => "padW", NonNegativeInt;
        out_pad_h: usize = Some(0) => "outPadH", NonNegativeInt;
        out_pad_w: usize = Some(0) => "outPadW", NonNegativeInt;
        in_h: usize = Some(28) => "inH", PositiveInt;
        in_w: usize = Some(28) => "inW", PositiveInt;
    }
}
