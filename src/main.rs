//! Forkful - 餐厅点评服务
//!
//! 启动顺序：配置 → 日志 → 数据库 → HTTP 服务

use forkful::config::{load_config, print_config};
use forkful::infrastructure::http::{AppState, HttpServer, ServerConfig, VerificationSettings};
use forkful::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, seed_demo_data_if_empty, DatabaseConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log.filter())),
        )
        .init();

    tracing::info!("Forkful - 餐厅点评服务");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig::new(&config.database.path, config.database.max_connections);
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    if config.database.seed_demo_data {
        seed_demo_data_if_empty(&pool).await?;
    }

    // 创建 HTTP 服务器
    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    if let Some(dir) = config.server.static_dir() {
        server_config = server_config.with_static_files(dir);
    }
    let verification = VerificationSettings {
        review_threshold: config.verification.review_threshold,
        max_attempts: config.verification.max_attempts,
    };
    let state = AppState::from_pool(pool, verification);

    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
