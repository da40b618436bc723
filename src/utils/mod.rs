//! # 常用接口模块
//!
//! 本模块提供单元测试宏和日志初始化等通用工具

pub mod macro_for_unit_test;

/// 初始化日志输出（基于`env_logger`，默认级别由`RUST_LOG`控制）。
///
/// 可重复调用：已初始化时直接返回。
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .try_init();
}

/// 测试专用的日志初始化：输出交给测试框架捕获
#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
