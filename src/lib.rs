//! # Inception Viz
//!
//! 对Inception卷积网络做一次前向推理，采集每一层的输出（滤波器响应），
//! 并把每层前若干个通道渲染为热力图：或显示到编号窗口，或按
//! `object-<对象名>/layer-<k>/filter-<i>.png`的目录结构写入本地。
//!

pub mod config;
pub mod errors;
pub mod nn;
pub mod tensor;
pub mod vision;
pub mod visualize;
