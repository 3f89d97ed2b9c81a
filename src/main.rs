use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use make_portal::api::{ApiError, HttpMakeApi, MakeApi};
use make_portal::bootstrap::Bootstrap;
use make_portal::config::{ConfigError, PortalConfig};
use make_portal::console::{self, ConsoleCommand};
use make_portal::controls::{ControlPanel, FilterControls};
use make_portal::render::{Renderer, TerminalRenderer};
use make_portal::session::Session;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("api client: {0}")]
    Api(#[from] ApiError),
    #[error("stdin: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "make-portal", about = "MAKE makerspace inventory and storage client")]
struct Cli {
    #[arg(long, env = "MAKE_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "MAKE_COLLEGE_ID", help = "Log in as this college ID")]
    college_id: Option<String>,

    #[arg(long, default_value = "")]
    query: String,

    #[arg(long, default_value_t = false)]
    in_stock: bool,

    #[arg(long, default_value = "any")]
    room: String,

    #[arg(long, default_value = "any")]
    material: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = PortalConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    info!(base_url = %config.base_url, "starting make-portal");

    let session = Session::from_raw(cli.college_id.as_deref());
    let api: Arc<dyn MakeApi> = Arc::new(HttpMakeApi::new(&config)?);
    let renderer: Arc<dyn Renderer> = Arc::new(TerminalRenderer::new(std::io::stdout()));

    let panel = Arc::new(ControlPanel::new());
    panel.set_query(&cli.query);
    panel.set_in_stock_only(cli.in_stock);
    panel.set_room(&cli.room);
    panel.set_material(&cli.material);

    let controls: Arc<dyn FilterControls> = Arc::clone(&panel) as Arc<dyn FilterControls>;
    let portal = Bootstrap::new(session, api, renderer, controls).start().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match console::parse_line(&line) {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(ConsoleCommand::Refresh) => {
                        // Failure is already logged; the current view stays.
                        let _ = portal.refresh_inventory().await;
                    }
                    Ok(command) => console::apply(&panel, &command),
                    Err(e) => warn!(error = %e, "ignoring input"),
                }
            }
        }
    }

    portal.shutdown();
    Ok(())
}
