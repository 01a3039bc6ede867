//! # Bank Rebalance
//!
//! 一个用于重排题库正确答案位置的 Rust 应用程序
//!
//! 每个题组按固定循环把正确答案轮流放到 A/B/C/D，
//! 同时统一四个选项的写法，去掉能暗示答案的文风差异。
//!
//! ## 架构设计
//!
//! ### ① 规则层（Rules）
//! - `rules/` - 目标循环、开头动词、引导语、形容词开头等查表数据
//! - 所有规则都是不可变的值，由调用方传入
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 只处理单个题目
//! - `normalize` - 选项文本规范化（动词引导 / 分句分类两种风格）
//! - `SlotRebalancer` - 交换选项与解析，并规范化四个选项
//! - `verify` - 正确答案与解析标记一致性校验
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整处理流程
//! - `RecordCtx` - 上下文封装（题组 + 位置）
//! - `RecordFlow` - 流程编排（解析 → 重排 → 写回）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量文件处理器，管理并发与运行模式
//! - `orchestrator/set_processor` - 单个题组处理器，遍历题目列表

pub mod cli;
pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod rules;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use cli::{Cli, RunMode};
pub use config::{Config, Manifest};
pub use error::{AppError, AppResult};
pub use models::{QuestionBank, QuestionRecord, Slot};
pub use orchestrator::{process_bank, App, ProcessingStats, SetStats};
pub use rules::{CycleTable, RewriteRules, TargetCycle};
pub use services::{normalize, verify, Style};
pub use workflow::{RecordCtx, RecordFlow};
