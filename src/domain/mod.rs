//! Domain Layer - 领域层
//!
//! 包含一个限界上下文:
//! - Speech Context: 输出格式、音色参数、语言支持与输出路径规则

pub mod speech;
