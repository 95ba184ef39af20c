//! Web 服务器主程序入口

use std::path::PathBuf;

use clap::Parser;
use multilingual_faq::env::{core, EnvVar};
use multilingual_faq::translation::ConfigManager;
use multilingual_faq::web::{WebConfig, WebServer};

/// 多语言 FAQ 服务
#[derive(Parser, Debug)]
#[command(name = "faq-web", author, version, about)]
struct Args {
    /// 绑定地址（覆盖 FAQ_WEB_BIND_ADDRESS）
    #[arg(short, long)]
    bind: Option<String>,

    /// 端口（覆盖 FAQ_WEB_PORT）
    #[arg(short, long)]
    port: Option<u16>,

    /// 翻译配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 日志级别（覆盖 FAQ_LOG_LEVEL）
    #[arg(long)]
    log_level: Option<String>,

    /// 忽略 MONGODB_URL 和 FAQ_REDIS_URL，只使用进程内存储
    #[arg(long)]
    memory: bool,

    /// 打印支持的环境变量并退出
    #[arg(long)]
    env_docs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    if args.env_docs {
        println!("{}", multilingual_faq::env::generate_env_docs());
        return Ok(());
    }

    let log_level = match args.log_level {
        Some(level) => level,
        None => core::LogLevel::get()?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_target(true)
        .init();

    let mut web_config = WebConfig::from_env()?;
    if let Some(bind) = args.bind {
        web_config.bind_addr = bind;
    }
    if let Some(port) = args.port {
        web_config.port = port;
    }
    if args.memory {
        web_config.mongo_config = None;
    }

    let manager = match args.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    let mut translation_config = manager.load()?;
    if args.memory {
        translation_config.redis_url = None;
    }

    let server = WebServer::new(web_config, translation_config);
    server.start().await?;

    Ok(())
}
