use std::io;
use std::sync::Arc;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{converter::UidConverter, env::Settings, metrics::MetricsCtx};

pub mod converter;
pub mod env;
pub mod metrics;
pub mod server;

pub const SERVICE_NAME: &str = "UID2Phone API";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct LoggerManager {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

impl LoggerManager {
    pub fn setup(settings: &Settings) -> io::Result<Self> {
        // 1. 파일 로거 설정
        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(&settings.logging.filename)
            .build(&settings.logging.directory)
            .map_err(io::Error::other)?;
        let (non_blocking_file_writer, guard) = tracing_appender::non_blocking(file_appender);

        // 2. 로그 레벨 필터 설정 (환경 변수 또는 설정 파일 값)
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&settings.server.log_level));

        // 3. 콘솔 출력 레이어
        let console_layer = fmt::layer()
            .with_writer(io::stdout)
            .with_ansi(true)
            .with_thread_names(true)
            .with_target(false);

        // 4. 파일 출력 레이어
        let file_layer = fmt::layer()
            .with_writer(non_blocking_file_writer)
            .with_ansi(false)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .map_err(io::Error::other)?;

        tracing::info!(
            "Logger initialized: console and file ({}/{}) output enabled.",
            settings.logging.directory,
            settings.logging.filename
        );

        Ok(Self { _guard: guard })
    }
}

// 서버 전체에서 공유되는 상태
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub converter: Arc<UidConverter>,
    pub metrics: Arc<MetricsCtx>,
    pub metrics_registry: prometheus::Registry,
}

impl AppState {
    pub fn new(settings: Settings, converter: UidConverter) -> Self {
        Self {
            settings,
            converter: Arc::new(converter),
            metrics: Arc::new(MetricsCtx::new()),
            metrics_registry: prometheus::Registry::new(),
        }
    }

    /// Builds the converter from the `converter` settings section.
    pub fn from_settings(settings: Settings) -> Result<Self, converter::TableError> {
        let converter = match &settings.converter.special_mappings {
            Some(mappings) => UidConverter::with_special_mappings(mappings.clone())?,
            None => UidConverter::new(),
        };
        Ok(Self::new(settings, converter))
    }
}
