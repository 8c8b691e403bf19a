use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

// 常用环境变量到配置项的映射，优先级高于配置文件
fn apply_env_overrides(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
        .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
        .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
        .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
        .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
        .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
        .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
        .set_override_option("database.url", std::env::var("DATABASE_URL").ok())
}

impl AppConfig {
    /// 加载配置
    ///
    /// 层叠顺序：config.toml → config.{APP_ENV}.toml → ACADSYS_* 前缀
    /// 环境变量 → 常用环境变量别名（DATABASE_URL、JWT_SECRET 等）。
    pub fn load() -> Result<Self, ConfigError> {
        let env_name = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{env_name}")).required(false))
            .add_source(
                Environment::with_prefix("ACADSYS")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = apply_env_overrides(builder)?.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // workers = 0 表示按 CPU 核数取，但不超过 max_workers
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}
