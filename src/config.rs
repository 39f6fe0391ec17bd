use clap::Parser;
use sea_orm::ConnectOptions;

/// Runtime settings, read from the command line with environment fallbacks.
#[derive(Clone, Debug, Parser)]
#[clap(version, about)]
pub struct Config {
    #[clap(value_parser, long, env = "DATABASE_URL", help = "Database URL")]
    pub database_url: String,

    #[clap(value_parser, long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[clap(value_parser, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    #[clap(
        value_parser,
        long,
        env = "BLOGLY_MAX_CONNECTIONS",
        default_value_t = 10,
        help = "Size of the database connection pool"
    )]
    pub max_connections: u32,

    #[clap(
        action,
        long,
        env = "BLOGLY_SQL_ECHO",
        help = "Log every SQL statement"
    )]
    pub sql_echo: bool,

    #[clap(
        value_parser,
        long,
        env = "BLOGLY_TEMPLATES",
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*"),
        help = "Glob matching the tera templates"
    )]
    pub templates: String,
}

impl Config {
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.database_url.to_owned());
        opt.max_connections(self.max_connections)
            .sqlx_logging(self.sql_echo);
        opt
    }
}
