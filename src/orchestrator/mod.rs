//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量题库处理器
//! - 管理应用生命周期（初始化、运行）
//! - 按清单发现题库文件
//! - 控制并发数量（Semaphore）
//! - 重排模式与校验模式
//! - 输出全局统计信息
//!
//! ### `set_processor` - 单个题组处理器
//! - 查找题组的目标循环
//! - 遍历题组的所有题目，复用同一个 RecordFlow
//! - 输出单个题组的统计信息与正确答案分布
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<BankTarget>)
//!     ↓
//! set_processor (处理 questions 数组)
//!     ↓
//! workflow::RecordFlow (处理单个题目)
//!     ↓
//! services (能力层：rebalancer / normalizer / verifier)
//!     ↓
//! rules (规则表：循环 / 引导语 / 动词)
//! ```

pub mod batch_processor;
pub mod set_processor;

// 重新导出主要类型
pub use batch_processor::{App, ProcessingStats};
pub use set_processor::{process_bank, process_questions, SetStats};
