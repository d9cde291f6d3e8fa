use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use tracing::{error, info};
use uid2phone::{
    env::Settings, metrics, server, server::end_point::not_found_handler, AppState, LoggerManager,
};

#[derive(Parser)]
#[command(
    name = "uid2phone",
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,
)]
struct Args {
    /// Directory searched for `{RUN_MODE}.toml`.
    #[arg(long = "config-dir", default_value = "config")]
    config_dir: String,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // 1. 환경변수 로드
    dotenv::dotenv().ok();

    // 2. 설정 파일 로드
    let settings = Settings::load(&args.config_dir).map_err(|e| {
        eprintln!("Failed to load settings: {}", e);
        std::io::Error::other(e)
    })?;

    // 3. 로거 초기화 (guard는 main이 끝날 때까지 유지)
    let _logger_manager = LoggerManager::setup(&settings)?;
    info!("Logger initialized");

    // 4. 변환기 및 공유 상태 구성
    let app_state = AppState::from_settings(settings.clone()).map_err(|e| {
        error!("Invalid converter tables: {}", e);
        std::io::Error::other(e)
    })?;
    info!(
        "Converter ready: {} prefixes, {} special mappings",
        app_state.converter.prefixes().len(),
        app_state.converter.special_mappings().len()
    );

    // 5. Metrics 등록
    metrics::register_custom_metrics(&app_state.metrics_registry)
        .map_err(std::io::Error::other)?;
    info!("Metrics initialized and registered");

    // 6. HTTP 서버 시작
    let bind_address = settings.bind_address();
    let public_url = format!("http://localhost:{}", settings.server.port);
    info!("Starting UID2Phone API on {}", bind_address);
    info!("API docs: {}/docs", public_url);
    info!("Health check: {}/health", public_url);

    let mut http_server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(server::configure)
            .default_service(web::to(not_found_handler))
    })
    .disable_signals();

    if let Some(workers) = settings.server.workers {
        http_server = http_server.workers(workers);
    }

    let server = http_server.bind(&bind_address)?.run();
    let handle = server.handle();
    let mut server = Box::pin(server);

    // 7. 종료 신호 대기
    tokio::select! {
        res = &mut server => {
            error!("Server exited unexpectedly");
            return res;
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl+C received. Initiating graceful shutdown...");
            handle.stop(true).await;
        },
    }

    server.await?;
    info!("Service stopped");

    Ok(())
}
