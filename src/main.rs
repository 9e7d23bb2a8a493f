use anyhow::Result;
use clap::Parser;
use trello_client::client::DEFAULT_HOST;
use trello_client::commands::{Connection, Method, Param, call};

/// trello - Trello REST API client
///
/// Sends an authenticated request to the Trello API and prints the response
/// body. The API key and token are appended to every request as query
/// parameters.
///
/// Examples:
///   trello get /1/members/me -p fields=username
///   trello post /1/cards -p idList=<list> -p name="New card"
#[derive(Parser, Debug)]
#[command(author, version = env!("TRELLO_CLIENT_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Trello API host (also via TRELLO_HOST)
    #[arg(long, env = "TRELLO_HOST", value_name = "URL", default_value = DEFAULT_HOST, global = true)]
    pub host: String,

    /// API key (also via TRELLO_KEY)
    #[arg(long, env = "TRELLO_KEY", hide_env_values = true, global = true)]
    pub key: Option<String>,

    /// API token (also via TRELLO_TOKEN)
    #[arg(long, env = "TRELLO_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Send a GET request
    Get(RequestArgs),

    /// Send a POST request
    Post(RequestArgs),

    /// Send a PUT request
    Put(RequestArgs),

    /// Send a DELETE request
    Delete(RequestArgs),
}

#[derive(clap::Args, Debug)]
pub struct RequestArgs {
    /// Resource path, e.g. /1/boards/<id>
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Query parameter, may be repeated
    #[arg(long = "param", short = 'p', value_name = "NAME=VALUE")]
    pub params: Vec<Param>,

    /// Pretty print JSON responses
    #[arg(long)]
    pub pretty: bool,
}

impl Commands {
    fn into_parts(self) -> (Method, RequestArgs) {
        match self {
            Commands::Get(args) => (Method::Get, args),
            Commands::Post(args) => (Method::Post, args),
            Commands::Put(args) => (Method::Put, args),
            Commands::Delete(args) => (Method::Delete, args),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let Some(key) = cli.key else {
        anyhow::bail!("No API key given. Use --key or set TRELLO_KEY.");
    };
    let Some(token) = cli.token else {
        anyhow::bail!("No API token given. Use --token or set TRELLO_TOKEN.");
    };

    let connection = Connection {
        host: cli.host,
        key,
        token,
        timeout: cli.timeout,
    };
    let (method, args) = cli.command.into_parts();

    call(&connection, method, &args.path, args.params, args.pretty).await
}
