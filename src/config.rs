use clap::Parser;
use serde::Deserialize;
use std::net::IpAddr;

/// Command line overrides. Anything left out falls back to the
/// environment, then the config file, then the built-in defaults.
#[derive(Parser, Debug, Default, PartialEq)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Config file to read, without extension
    #[clap(short, long, default_value = "setup")]
    pub config: String,
    /// Which errors we want to log (info, warn or error)
    #[clap(short, long)]
    pub log_level: Option<String>,
    /// Address the web server binds to
    #[clap(long)]
    pub host: Option<String>,
    /// Web server port
    #[clap(short, long)]
    pub port: Option<u16>,
    /// Backing store: postgres or memory
    #[clap(short, long)]
    pub store: Option<String>,
    /// URL for the postgres database
    #[clap(long)]
    pub database_host: Option<String>,
    /// PORT number for the database connection
    #[clap(long)]
    pub database_port: Option<u16>,
    /// Database name
    #[clap(long)]
    pub database_name: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Postgres,
    Memory,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        )
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: String,
    pub host: IpAddr,
    pub port: u16,
    pub store: StoreKind,
    pub database: DatabaseConfig,
}

const ENV_PREFIX: &str = "TRIVIA";

impl Config {
    pub fn new() -> Result<Config, handle_errors::Error> {
        dotenv::dotenv().ok();
        Config::load(&Args::parse())
    }

    pub fn load(args: &Args) -> Result<Config, handle_errors::Error> {
        let mut builder = config::Config::builder()
            .set_default("log_level", "warn")?
            .set_default("host", "127.0.0.1")?
            .set_default("port", 3030_i64)?
            .set_default("store", "postgres")?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432_i64)?
            .set_default("database.name", "trivia")?
            .set_default("database.user", "postgres")?
            .set_default("database.password", "")?
            .set_default("database.max_connections", 5_i64)?
            .add_source(config::File::with_name(&args.config).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

        if let Some(log_level) = &args.log_level {
            builder = builder.set_override("log_level", log_level.as_str())?;
        }
        if let Some(host) = &args.host {
            builder = builder.set_override("host", host.as_str())?;
        }
        if let Some(port) = args.port {
            builder = builder.set_override("port", i64::from(port))?;
        }
        if let Some(store) = &args.store {
            builder = builder.set_override("store", store.as_str())?;
        }
        if let Some(host) = &args.database_host {
            builder = builder.set_override("database.host", host.as_str())?;
        }
        if let Some(port) = args.database_port {
            builder = builder.set_override("database.port", i64::from(port))?;
        }
        if let Some(name) = &args.database_name {
            builder = builder.set_override("database.name", name.as_str())?;
        }

        Ok(builder.build()?.try_deserialize::<Config>()?)
    }
}
