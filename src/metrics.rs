use lazy_static::lazy_static;
use prometheus::{IntCounterVec, Opts, Registry};

use crate::converter::{ConversionError, ConversionPath};

lazy_static! {
    // 기본 레지스트리에 자동 등록하지 않고 register_custom_metrics에서 수동으로 등록한다.

    /// Successful conversions by the converter branch that produced the number.
    pub static ref CONVERSIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("uid_conversions_total", "Total successful uid conversions by path"),
        &["path"],
    )
    .unwrap();

    /// Failed conversions by error kind.
    pub static ref CONVERSION_FAILURES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("uid_conversion_failures_total", "Total failed uid conversions by kind"),
        &["kind"],
    )
    .unwrap();

    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("http_requests_total", "Total HTTP requests by endpoint"),
        &["endpoint"],
    )
    .unwrap();
}

pub fn register_custom_metrics(registry: &Registry) -> Result<(), prometheus::Error> {
    registry.register(Box::new(CONVERSIONS_TOTAL.clone()))?;
    registry.register(Box::new(CONVERSION_FAILURES_TOTAL.clone()))?;
    registry.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    Ok(())
}

pub struct MetricsCtx;

impl MetricsCtx {
    pub fn new() -> Self {
        Self
    }

    pub fn inc_conversion(&self, path: ConversionPath) {
        CONVERSIONS_TOTAL.with_label_values(&[path.as_str()]).inc();
    }

    pub fn inc_conversion_failure(&self, error: &ConversionError) {
        CONVERSION_FAILURES_TOTAL
            .with_label_values(&[error.kind()])
            .inc();
    }

    pub fn inc_request(&self, endpoint: &str) {
        HTTP_REQUESTS_TOTAL.with_label_values(&[endpoint]).inc();
    }
}

impl Default for MetricsCtx {
    fn default() -> Self {
        Self::new()
    }
}
