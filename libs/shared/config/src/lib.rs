use std::env;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub max_slot_range_days: i64,
    pub default_company_id: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_slot_range_days: 62,
            default_company_id: 1,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            host: env::var("APP_HOST")
                .unwrap_or_else(|_| {
                    warn!("APP_HOST not set, using {}", defaults.host);
                    defaults.host.clone()
                }),
            port: parse_var("APP_PORT", defaults.port),
            max_slot_range_days: parse_var("MAX_SLOT_RANGE_DAYS", defaults.max_slot_range_days),
            default_company_id: parse_var("COMPANY_ID", defaults.default_company_id),
        };

        if !config.is_valid() {
            warn!("MAX_SLOT_RANGE_DAYS must be positive, falling back to {}", defaults.max_slot_range_days);
            return Self {
                max_slot_range_days: defaults.max_slot_range_days,
                ..config
            };
        }

        config
    }

    pub fn is_valid(&self) -> bool {
        self.max_slot_range_days > 0
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {}", name, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default {}", name, default);
            default
        }
    }
}
