pub use crate::utils::database;
use crate::modules::payment::service::alatpay;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use uri_parser::parse_uri;
use urlencoding::decode;

const DEFAULT_JWT_SECRET_KEY: &str = "ficago-default-jwt-secret-key";
const DEFAULT_JWT_EXPIRES_IN_SECS: i64 = 60 * 60 * 24;

#[derive(Clone, Debug, PartialEq)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct JwtContext {
    pub secret_key: String,
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct StorageContext {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_endpoint: String,
    pub folder: String,
}

#[derive(Clone)]
pub struct FlutterwaveContext {
    pub api_endpoint: String,
    pub public_key: String,
    pub secret_key: String,
    pub webhook_secret: String,
    pub redirect_url: String,
}

#[derive(Clone)]
pub struct AlatPayContext {
    pub ledger: alatpay::Ledger,
}

#[derive(Clone)]
pub struct PaymentContext {
    pub flutterwave: FlutterwaveContext,
    pub alatpay: AlatPayContext,
}

#[derive(Clone)]
pub struct MailContext {
    pub host: String,
    pub sender: String,
    pub user: String,
    pub password: String,
}

#[derive(Clone)]
pub struct SmsContext {
    pub api_endpoint: String,
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub db_conn: database::DatabaseConnection,
    pub jwt: JwtContext,
    pub storage: StorageContext,
    pub payment: PaymentContext,
    pub mail: Option<MailContext>,
    pub sms: Option<SmsContext>,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct StorageConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_endpoint: String,
    pub folder: String,
}

#[derive(Clone)]
pub struct FlutterwaveConfig {
    pub api_endpoint: String,
    pub public_key: String,
    pub secret_key: String,
    pub webhook_secret: String,
    pub redirect_url: String,
}

#[derive(Clone)]
pub struct MailConfig {
    pub sender: String,
    pub uri: String,
}

#[derive(Clone)]
pub struct SmsConfig {
    pub api_endpoint: String,
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

#[derive(Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    pub flutterwave: FlutterwaveConfig,
    pub mail: Option<MailConfig>,
    pub sms: Option<SmsConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Job(DateTime<Utc>);

impl apalis::prelude::Job for Job {
    const NAME: &'static str = "ficago::Job";
}

impl From<DateTime<Utc>> for Job {
    fn from(t: DateTime<Utc>) -> Self {
        Self(t)
    }
}

pub type JobFuture = Pin<Box<dyn Future<Output = Result<(), apalis::prelude::Error>> + Send>>;

pub type JobFn = Arc<dyn Fn() -> JobFuture + Send + Sync>;

pub struct SchedulableJob {
    pub name: &'static str,
    pub schedule: apalis::cron::Schedule,
    pub job: JobFn,
}

impl Default for Config {
    fn default() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL not set");
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u32>()
            .expect("Invalid PORT number");
        let url = env::var("URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let jwt_secret_key = env::var("JWT_SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET_KEY not set, falling back to the default secret key");
            DEFAULT_JWT_SECRET_KEY.to_string()
        });
        let jwt_expires_in = env::var("JWT_EXPIRES_IN_SECS")
            .ok()
            .map(|raw| raw.parse::<i64>().expect("Invalid JWT_EXPIRES_IN_SECS"))
            .unwrap_or(DEFAULT_JWT_EXPIRES_IN_SECS);
        let storage_cloud_name =
            env::var("CLOUDINARY_CLOUD_NAME").expect("CLOUDINARY_CLOUD_NAME not set");
        let storage_api_key = env::var("CLOUDINARY_API_KEY").expect("CLOUDINARY_API_KEY not set");
        let storage_api_secret =
            env::var("CLOUDINARY_API_SECRET").expect("CLOUDINARY_API_SECRET not set");
        let storage_api_endpoint = env::var("CLOUDINARY_API_ENDPOINT")
            .unwrap_or_else(|_| "https://api.cloudinary.com/v1_1".to_string());
        let storage_folder =
            env::var("CLOUDINARY_UPLOAD_FOLDER").unwrap_or_else(|_| "ficago".to_string());
        let flutterwave_api_endpoint = env::var("FLUTTERWAVE_API_ENDPOINT")
            .unwrap_or_else(|_| "https://api.flutterwave.com/v3".to_string());
        let flutterwave_public_key =
            env::var("FLUTTERWAVE_PUBLIC_KEY").expect("FLUTTERWAVE_PUBLIC_KEY not set");
        let flutterwave_secret_key =
            env::var("FLUTTERWAVE_SECRET_KEY").expect("FLUTTERWAVE_SECRET_KEY not set");
        let flutterwave_webhook_secret =
            env::var("FLUTTERWAVE_WEBHOOK_SECRET").expect("FLUTTERWAVE_WEBHOOK_SECRET not set");
        let flutterwave_redirect_url = env::var("FLUTTERWAVE_REDIRECT_URL")
            .unwrap_or_else(|_| format!("{}/v1/api/vendor/plans/payment-callback", url));

        let mail = match (env::var("MAIL_SENDER"), env::var("MAIL_URI")) {
            (Ok(sender), Ok(uri)) => Some(MailConfig { sender, uri }),
            _ => {
                tracing::warn!("MAIL_SENDER or MAIL_URI not set, emails will not be sent");
                None
            }
        };

        let sms = match (
            env::var("TWILIO_ACCOUNT_SID"),
            env::var("TWILIO_AUTH_TOKEN"),
            env::var("TWILIO_FROM_NUMBER"),
        ) {
            (Ok(account_sid), Ok(auth_token), Ok(from_number)) => Some(SmsConfig {
                api_endpoint: env::var("TWILIO_API_ENDPOINT")
                    .unwrap_or_else(|_| "https://api.twilio.com/2010-04-01".to_string()),
                account_sid,
                auth_token,
                from_number,
            }),
            _ => {
                tracing::warn!("Twilio credentials not set, OTP codes will not be sent by SMS");
                None
            }
        };

        Self {
            database: DatabaseConfig { url: database_url },
            app: AppConfig {
                host,
                environment: AppEnvironment::from(environment),
                port,
                url,
            },
            jwt: JwtConfig {
                secret_key: jwt_secret_key,
                expires_in: jwt_expires_in,
            },
            storage: StorageConfig {
                cloud_name: storage_cloud_name,
                api_key: storage_api_key,
                api_secret: storage_api_secret,
                api_endpoint: storage_api_endpoint,
                folder: storage_folder,
            },
            flutterwave: FlutterwaveConfig {
                api_endpoint: flutterwave_api_endpoint,
                public_key: flutterwave_public_key,
                secret_key: flutterwave_secret_key,
                webhook_secret: flutterwave_webhook_secret,
                redirect_url: flutterwave_redirect_url,
            },
            mail,
            sms,
        }
    }
}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Context;
}

fn parse_mail_config(cfg: MailConfig) -> Option<MailContext> {
    let parsed_mail_uri = match parse_uri(&cfg.uri) {
        Ok(uri) => uri,
        Err(_) => {
            tracing::error!("Invalid mail uri");
            return None;
        }
    };

    let host = parsed_mail_uri.host?.to_string();
    let user = parsed_mail_uri.user?;
    let password = decode(user.password?).ok()?.to_string();
    let user = decode(user.name).ok()?.to_string();

    Some(MailContext {
        host,
        sender: cfg.sender,
        user,
        password,
    })
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Context {
        let db_conn = database::connect(self.database.url.as_str()).await;
        database::migrate(db_conn.clone()).await;

        Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
                url: self.app.url,
            },
            db_conn,
            jwt: JwtContext {
                secret_key: self.jwt.secret_key,
                expires_in: self.jwt.expires_in,
            },
            storage: StorageContext {
                cloud_name: self.storage.cloud_name,
                api_key: self.storage.api_key,
                api_secret: self.storage.api_secret,
                api_endpoint: self.storage.api_endpoint,
                folder: self.storage.folder,
            },
            payment: PaymentContext {
                flutterwave: FlutterwaveContext {
                    api_endpoint: self.flutterwave.api_endpoint,
                    public_key: self.flutterwave.public_key,
                    secret_key: self.flutterwave.secret_key,
                    webhook_secret: self.flutterwave.webhook_secret,
                    redirect_url: self.flutterwave.redirect_url,
                },
                alatpay: AlatPayContext {
                    ledger: alatpay::Ledger::default(),
                },
            },
            mail: self.mail.and_then(parse_mail_config),
            sms: self.sms.map(|sms| SmsContext {
                api_endpoint: sms.api_endpoint,
                account_sid: sms.account_sid,
                auth_token: sms.auth_token,
                from_number: sms.from_number,
            }),
        }
    }
}
