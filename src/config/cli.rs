use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "deeplink-route")]
#[command(about = "Resolve a navigation deep link and render its fastest route")]
pub struct CliConfig {
    #[arg(long, help = "Deep link URI, e.g. routedemo://navigate?origin=Seattle&dest=Portland")]
    pub uri: Option<String>,

    #[arg(long, default_value = "android.intent.action.VIEW")]
    pub action: String,

    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, env = "GOOGLE_MAPS_API_KEY", help = "Overrides directions.api_key")]
    pub api_key: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}
