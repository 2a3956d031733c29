use std::env;
use std::path::PathBuf;

const DEFAULT_CLASSIFIER_FILES: &str =
    "log_reg_model.json,knn_model.json,rf_model.json,xgb_class_model.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Model artifacts
    pub model_dir: PathBuf,
    pub scaler_file: String,
    pub classifier_files: Vec<String>,

    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let classifier_files =
            parse_list(&env::var("CLASSIFIER_FILES").unwrap_or_else(|_| DEFAULT_CLASSIFIER_FILES.into()));
        if classifier_files.is_empty() {
            anyhow::bail!("CLASSIFIER_FILES must name at least one model file");
        }

        let log_format = match env::var("LOG_FORMAT").unwrap_or_default().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            model_dir: env::var("MODEL_DIR")
                .unwrap_or_else(|_| "models".into())
                .into(),
            scaler_file: env::var("SCALER_FILE").unwrap_or_else(|_| "scaler_class.json".into()),
            classifier_files,

            log_format,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
