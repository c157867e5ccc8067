use std::path::PathBuf;
use std::process;

use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use rescale::api::{self, HetznerClient};
use rescale::config::{self, ConfigSource, Overrides};
use rescale::error::{Error, Result};
use rescale::output;

#[derive(Parser)]
#[command(
    name = "rescale",
    author,
    version,
    about = "Scale a Hetzner Cloud server by changing its server type.",
    long_about = r#"rescale: change the type (CPU, RAM and optionally disk) of one Hetzner Cloud server.

Values are read from the [default] section of an INI file and may be overridden on the command line:

    [default]
    api_key = <token>
    server_id = 12345
    server_type = cpx21
    upgrade_disk = false

The change is requested once; the command returns when Hetzner accepts it, not when the resize is done.

Examples:
  rescale --server_type cpx31
  rescale --config prod.ini --section hetzner --server_type cpx21 --upgrade_disk --yes
"#,
    after_help = "Pass --yes when running from scripts; without it the command asks for confirmation on stdin and aborts on anything but 'y'.\nSet RUST_LOG=debug to see how each value was resolved."
)]
struct Cli {
    /// Path to the configuration file [default: config.ini]
    #[arg(long)]
    config: Option<PathBuf>,
    /// INI section holding the settings [default: default]
    #[arg(long)]
    section: Option<String>,
    /// Path to .env file
    #[arg(long)]
    env_file: Option<String>,
    /// Hetzner API key (falls back to the config file, then HCLOUD_TOKEN)
    #[arg(long = "api_key")]
    api_key: Option<String>,
    /// ID of the Hetzner server to scale
    #[arg(long = "server_id")]
    server_id: Option<u64>,
    /// Server type to scale to (e.g. 'cpx11', 'cpx21', 'cpx31')
    #[arg(long = "server_type")]
    server_type: Option<String>,
    /// Upgrade the disk along with CPU and RAM
    #[arg(long = "upgrade_disk")]
    upgrade_disk: bool,
    /// Do not ask for confirmation
    #[arg(long, short = 'y')]
    yes: bool,
    /// Do not fetch the server's current state before resizing
    #[arg(long)]
    skip_check: bool,
    /// Disable colorized output
    #[arg(long)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long)]
    silent: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            server_id: self.server_id,
            server_type: self.server_type.clone(),
            upgrade_disk: self.upgrade_disk,
            env_api_key: config::get_api_token(),
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let source = ConfigSource::new(cli.config.clone(), cli.section.clone());
    let request = config::resolve_request(&source, &cli.overrides())?;
    let base_url = config::get_api_base_url();

    let client = HetznerClient::new(base_url, request.api_key.as_str())?;

    if cli.skip_check {
        output::print_plan(&request, None);
    } else {
        let server = client.get_server(request.server_id).await?;
        output::print_plan(&request, Some(&server));
    }

    if !cli.yes {
        let mut stdin = BufReader::new(tokio::io::stdin());
        let question = format!(
            "Do you want to proceed with scaling server {} to {}?",
            request.server_id, request.server_type
        );
        if !output::confirm(&mut stdin, &question).await? {
            return Err(Error::Aborted);
        }
    }

    let action = client.change_type(&request).await?;
    output::print_success(&request, &action);
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    config::load_env_file(cli.env_file.as_deref());

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::set_silent(true);
    }

    if let Err(e) = run(cli).await {
        tracing::error!(%e, "Rescale failed");
        output::print_error(&e);
        process::exit(1);
    }
}
