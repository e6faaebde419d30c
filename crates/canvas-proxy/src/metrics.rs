//! Prometheus counters for relayed traffic.
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

pub struct ProxyMetrics {
    registry: Registry,
    requests: IntCounterVec,
}

impl ProxyMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        let requests = IntCounterVec::new(
            Opts::new(
                "canvas_relay_requests_total",
                "Relayed requests by route and outcome",
            ),
            &["route", "outcome"],
        )
        .expect("static metric definition");
        registry
            .register(Box::new(requests.clone()))
            .expect("fresh registry accepts the metric");
        Self { registry, requests }
    }

    /// Outcomes: `ok`, `upstream_error`, `validation_error`, `transport_error`.
    pub fn observe(&self, route: &str, outcome: &str) {
        self.requests.with_label_values(&[route, outcome]).inc();
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

impl Default for ProxyMetrics {
    fn default() -> Self {
        Self::new()
    }
}
