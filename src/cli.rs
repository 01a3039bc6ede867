//! 命令行参数
//!
//! 只负责解析参数，执行逻辑在编排层

use clap::Parser;

use crate::config::Config;

/// 题库正确答案位置重排工具
#[derive(Parser, Debug, Default)]
#[command(name = "bank_rebalance")]
#[command(about = "按题组循环重排正确答案位置，并统一选项写法", long_about = None)]
pub struct Cli {
    /// 只校验正确答案与解析标记是否一致，不修改文件
    #[arg(long)]
    pub verify: bool,

    /// 清单文件路径（覆盖 $REBALANCE_MANIFEST）
    #[arg(long)]
    pub manifest: Option<String>,

    /// 题库根目录（覆盖 $BANK_ROOT）
    #[arg(long)]
    pub root: Option<String>,

    /// 只处理不写回
    #[arg(long)]
    pub dry_run: bool,

    /// 显示详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

/// 运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Rebalance,
    Verify,
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::Rebalance => write!(f, "重排模式"),
            RunMode::Verify => write!(f, "校验模式"),
        }
    }
}

impl Cli {
    pub fn mode(&self) -> RunMode {
        if self.verify {
            RunMode::Verify
        } else {
            RunMode::Rebalance
        }
    }

    /// 用命令行参数覆盖环境变量配置
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(root) = &self.root {
            config.bank_root = root.clone();
        }
        if let Some(manifest) = &self.manifest {
            config.manifest_path = Some(manifest.clone());
        }
        config.dry_run |= self.dry_run;
        config.verbose_logging |= self.verbose;
        config
    }
}
