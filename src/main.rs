use anyhow::Result;
use clap::Parser;

use bank_rebalance::utils::logging;
use bank_rebalance::{App, Cli, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置，命令行参数优先
    let config = cli.apply_to(Config::from_env());

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).await?.run(cli.mode()).await?;

    Ok(())
}
