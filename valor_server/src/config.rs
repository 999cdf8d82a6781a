//! Service configuration, loaded from environment variables.

const DEFAULT_FUENTE: &str = "MEF – Valores Arancelarios Oficiales";
const DEFAULT_NOTA: &str = "Valor oficial referencial (no es valor comercial).";

#[derive(Clone, Debug)]
pub struct ValorConfig {
    /// Source attribution attached to every district response.
    pub fuente: String,
    /// Year the official values apply to.
    pub anio: i32,
    /// Disclaimer attached to every district response.
    pub nota: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Prometheus exporter port; 0 disables the exporter.
    pub metrics_port: u16,
}

impl Default for ValorConfig {
    fn default() -> Self {
        Self {
            fuente: DEFAULT_FUENTE.to_string(),
            anio: 2026,
            nota: DEFAULT_NOTA.to_string(),
            request_timeout_secs: 10,
            metrics_port: 9000,
        }
    }
}

impl ValorConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let fuente = std::env::var("VALOR_FUENTE").unwrap_or(defaults.fuente);
        let anio = std::env::var("VALOR_ANIO")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.anio);
        let nota = std::env::var("VALOR_NOTA").unwrap_or(defaults.nota);
        let request_timeout_secs = std::env::var("VALOR_REQUEST_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.request_timeout_secs);
        let metrics_port = std::env::var("VALOR_METRICS_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.metrics_port);

        if request_timeout_secs == 0 {
            tracing::warn!("VALOR_REQUEST_TIMEOUT is 0 -- every request will time out");
        }
        if metrics_port == 0 {
            tracing::info!("VALOR_METRICS_PORT is 0 -- Prometheus exporter disabled");
        }

        Self {
            fuente,
            anio,
            nota,
            request_timeout_secs,
            metrics_port,
        }
    }
}
