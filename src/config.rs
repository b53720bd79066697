use crate::api::assets::derive_storage_base;
use crate::api::urls::DEFAULT_API_URL;
use log::info;
use std::path::PathBuf;
use std::time::Duration;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// 运行配置
#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    pub api_url: String,
    pub storage_url: String,
    pub entity_id: u64,
    pub unit_id: u64,
    pub posts_per_page: u32,
    pub home_posts: u32,
    pub hero_interval: Duration,
    pub log_dir: PathBuf,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            storage_url: derive_storage_base(DEFAULT_API_URL),
            entity_id: 1,
            unit_id: 1,
            posts_per_page: 9,
            home_posts: 3,
            hero_interval: Duration::from_secs(5),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl PortalConfig {
    /// 先加载工作目录下的 `.env`（不存在不算错误），再读取进程环境变量
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenv::dotenv() {
            Ok(path) => info!("loaded env file {}", path.display()),
            Err(e) => info!("no env file loaded: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源构建配置；空值视为未设置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let api_url = get("PORTAL_API_URL").unwrap_or(defaults.api_url);
        let storage_url =
            get("PORTAL_STORAGE_URL").unwrap_or_else(|| derive_storage_base(&api_url));

        Ok(Self {
            storage_url,
            entity_id: parse_num(get("PPDB_ENTITY_ID"), "PPDB_ENTITY_ID", defaults.entity_id)?,
            unit_id: parse_num(get("PPDB_UNIT_ID"), "PPDB_UNIT_ID", defaults.unit_id)?,
            posts_per_page: parse_positive(
                get("PORTAL_POSTS_PER_PAGE"),
                "PORTAL_POSTS_PER_PAGE",
                defaults.posts_per_page,
            )?,
            home_posts: parse_positive(
                get("PORTAL_HOME_POSTS"),
                "PORTAL_HOME_POSTS",
                defaults.home_posts,
            )?,
            hero_interval: Duration::from_secs(parse_positive(
                get("PORTAL_HERO_INTERVAL_SECS"),
                "PORTAL_HERO_INTERVAL_SECS",
                defaults.hero_interval.as_secs(),
            )?),
            log_dir: get("PORTAL_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            api_url,
        })
    }
}

fn parse_num<T: std::str::FromStr>(
    raw: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn parse_positive<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let v = parse_num(raw.clone(), key, default)?;
    if v == T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: raw.unwrap_or_default(),
        });
    }
    Ok(v)
}
