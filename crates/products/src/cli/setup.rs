use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.1"
/// Format for dev builds: "v0.3.1\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "products",
    bin_name = "products",
    version = get_version(),
    disable_help_subcommand = true,
    after_help = "Settings can also come from products.toml or PRODUCTS_* environment variables."
)]
#[command(about = "Serve a product catalog stored in a JSON file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (defaults to ./products.toml when present)
    #[arg(short, long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Path of the product document
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub data_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Address to listen on, e.g. 0.0.0.0:8080
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,

        /// Directory served for GET paths outside the API
        #[arg(long, value_name = "DIR")]
        static_dir: Option<PathBuf>,

        /// Write an empty collection first if the document is missing
        #[arg(long)]
        create_if_missing: bool,
    },

    /// Create an empty product document if none exists
    Init,
}

impl Commands {
    /// What a bare `products` invocation runs.
    pub fn default_command() -> Self {
        Commands::Serve {
            bind: None,
            static_dir: None,
            create_if_missing: false,
        }
    }
}
