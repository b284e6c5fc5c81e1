use anyhow::Context;
use products_api::{
    build_router,
    infrastructure::{database::DatabaseManager, logger::Logger},
    AppConfig, AppState,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("加载配置失败")?;
    let _log_guard = Logger::init(&config).context("初始化日志失败")?;

    info!("启动 Products API 服务器...");

    let store = match DatabaseManager::connect(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!("数据库连接失败: {}", e);
            return Err(e.into());
        }
    };

    let app = build_router(AppState::new(store));

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("无法绑定到 {}:{}", config.host, config.port))?;

    info!("🚀 Server running on http://localhost:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    info!("服务器已关闭");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("无法监听 Ctrl-C 信号: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("无法监听 SIGTERM 信号: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("收到关闭信号，等待进行中的请求完成...");
}
