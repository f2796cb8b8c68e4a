use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// `production`/`prod` select production, anything else development.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

#[derive(Clone, Debug)]
pub struct EncryptionSettings {
    pub enabled: bool,
    pub key: String,
}

impl EncryptionSettings {
    /// Records are only encrypted when the flag is on and a key is present.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.key.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct CacheSettings {
    pub encryption: EncryptionSettings,
    pub data_dir: String,
    pub limit_bytes: u64,
}

#[derive(Clone, Debug)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
}

/// Environment-selected settings, built once at process start.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub environment: Environment,
    pub api_base_url: String,
    pub cache: CacheSettings,
    pub app: AppInfo,
}

impl AppConfig {
    const DEV_API_BASE_URL: &str = "https://dev-api.example.com";
    const PROD_API_BASE_URL: &str = "https://api.example.com";
    const PROD_CACHE_KEY: &str = "8H5uCVr7xgUf@LyMwZW2A=iSESH1Lx%";
    const DEFAULT_DATA_DIR: &str = "./data";
    const DEFAULT_LIMIT_BYTES: u64 = 10 * 1024 * 1024;

    /// The fixed profile for a deployment environment.
    pub fn for_environment(environment: Environment) -> Self {
        let (api_base_url, encryption, name) = match environment {
            Environment::Development => (
                Self::DEV_API_BASE_URL,
                EncryptionSettings {
                    enabled: false,
                    key: String::new(),
                },
                "satchel (development)",
            ),
            Environment::Production => (
                Self::PROD_API_BASE_URL,
                EncryptionSettings {
                    enabled: true,
                    key: Self::PROD_CACHE_KEY.to_string(),
                },
                "satchel",
            ),
        };

        Self {
            environment,
            api_base_url: api_base_url.to_string(),
            cache: CacheSettings {
                encryption,
                data_dir: Self::DEFAULT_DATA_DIR.to_string(),
                limit_bytes: Self::DEFAULT_LIMIT_BYTES,
            },
            app: AppInfo {
                name: name.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn from_env() -> Self {
        let environment = Environment::parse(
            &std::env::var("SATCHEL_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let mut config = Self::for_environment(environment);

        if let Ok(url) = std::env::var("SATCHEL_API_BASE_URL") {
            config.api_base_url = url;
        }

        match std::env::var("SATCHEL_CACHE_KEY") {
            Ok(key) if !key.is_empty() => config.cache.encryption.key = key,
            _ if environment == Environment::Production => {
                warn!("SATCHEL_CACHE_KEY not set, using the built-in production cache key");
            }
            _ => {}
        }

        if let Ok(dir) = std::env::var("SATCHEL_DATA_DIR") {
            config.cache.data_dir = dir;
        }

        config.cache.limit_bytes = std::env::var("SATCHEL_CACHE_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(config.cache.limit_bytes);

        config
    }
}
