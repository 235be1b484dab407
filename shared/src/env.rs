use std::env;
use strum::EnumString;

#[derive(Debug, Default, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Per-environment dotenv file, e.g. `.env.development`.
    pub fn dotenv_file(&self) -> &'static str {
        match self {
            Environment::Development => ".env.development",
            Environment::Production => ".env.production",
        }
    }
}

// ENV が未設定、または解釈できない値の場合はビルドプロファイルから決める
pub fn which() -> Environment {
    #[cfg(debug_assertions)]
    let default_env = Environment::Development;
    #[cfg(not(debug_assertions))]
    let default_env = Environment::Production;

    match env::var("ENV") {
        Err(_) => default_env,
        Ok(v) => v.parse().unwrap_or(default_env),
    }
}
