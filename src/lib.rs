//! # Layer Canvas
//!
//! `layer_canvas`是可视化搭建神经网络层图的核心：用户在画布上摆放各种层（linear、conv、pool……）
//! 并连线，本库负责维护层图、校验相邻层的形状是否兼容，
//! 并把层图连同训练样本序列化为外部训练服务的请求。
//!
//! 张量计算、训练循环与梯度计算都交给外部训练服务，本库不做任何数值计算。
//!

pub mod data;
pub mod errors;
pub mod nn;
pub mod service;
pub mod tensor;
pub mod utils;
