use std::env;
use std::sync::OnceLock;

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: i32,
    pub db_url: String,
    pub salt_token: String,
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        EnvConfig {
            port: env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(8080),
            db_url: Self::get_env("DATABASE_URL"),
            salt_token: Self::get_env("SALT_TOKEN"),
        }
    }
}

static CONFIG: OnceLock<EnvConfig> = OnceLock::new();

pub fn load() -> &'static EnvConfig {
    CONFIG.get_or_init(EnvConfig::from_env)
}
