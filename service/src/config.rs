use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::{warn, LevelFilter};
use std::num::{NonZeroU64, NonZeroUsize};
use std::time::Duration;

const APP_NAME: &str = "sse-hub";
const DEFAULT_KEEP_ALIVE_SECS: u64 = 15;

#[derive(Clone, Debug, Parser)]
#[command(name = APP_NAME, author, version, about, long_about = None)]
pub struct Config {
    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "0.0.0.0")]
    pub interface: String,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 8080)]
    pub port: u16,

    /// Number of pending messages each SSE subscriber may buffer. Messages
    /// published while a subscriber's mailbox is full are dropped for it.
    #[arg(
        long,
        env,
        default_value_t = NonZeroUsize::new(sse::DEFAULT_MAILBOX_CAPACITY).unwrap_or(NonZeroUsize::MIN)
    )]
    pub mailbox_capacity: NonZeroUsize,

    /// Seconds between SSE keep-alive comments on idle streams (non-zero)
    #[arg(
        long,
        env,
        default_value_t = NonZeroU64::new(DEFAULT_KEEP_ALIVE_SECS).unwrap_or(NonZeroU64::MIN)
    )]
    pub keep_alive_secs: NonZeroU64,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

impl Default for Config {
    /// Built-in defaults, still honoring environment variables but ignoring
    /// command line arguments. Invalid environment values fall back to the
    /// built-in defaults instead of exiting.
    fn default() -> Self {
        Config::parse_or_defaults([APP_NAME])
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    fn parse_or_defaults<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Config::try_parse_from(args).unwrap_or_else(|e| {
            warn!("Ignoring invalid configuration, using defaults: {e}");
            Config::builtin()
        })
    }

    fn builtin() -> Self {
        Self {
            interface: "0.0.0.0".to_string(),
            port: 8080,
            mailbox_capacity: NonZeroUsize::new(sse::DEFAULT_MAILBOX_CAPACITY)
                .unwrap_or(NonZeroUsize::MIN),
            keep_alive_secs: NonZeroU64::new(DEFAULT_KEEP_ALIVE_SECS).unwrap_or(NonZeroU64::MIN),
            log_level_filter: LevelFilter::Info,
        }
    }

    /// The `interface:port` pair to bind the listener to.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.interface, self.port)
    }

    pub fn keep_alive_interval(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs.get())
    }
}
