use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub reset_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct EmailConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub from: Option<String>,
}

impl EmailConfig {
    pub fn is_configured(&self) -> bool {
        self.host.is_some() && self.user.is_some() && self.pass.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub email: EmailConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        // missing JWT_SECRET is a startup failure, never a request-time one
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "talenthub".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "talenthub-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(120),
            reset_ttl_minutes: std::env::var("JWT_RESET_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(15),
        };
        let email = EmailConfig {
            host: std::env::var("EMAIL_HOST").ok(),
            port: std::env::var("EMAIL_PORT").ok().and_then(|v| v.parse().ok()),
            user: std::env::var("EMAIL_USER").ok(),
            pass: std::env::var("EMAIL_PASS").ok(),
            from: std::env::var("EMAIL_FROM").ok(),
        };
        Ok(Self {
            database_url,
            jwt,
            email,
        })
    }
}
