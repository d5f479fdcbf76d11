use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod utils;

use api::finsage::FinsageClient;
use commands::{Flow, Shell};
use services::chart_controller::ChartController;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    let mut filter = EnvFilter::from_default_env();
    for directive in ["mf_chart=debug", "reqwest=warn", "hyper=warn"] {
        match directive.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("Ignoring log directive {}: {}", directive, e),
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let settings = match config::Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let client = FinsageClient::with_base_url(settings.api_base_url.clone());

    info!("📊 Starting fund chart for {} ({})", settings.isin, settings.range);
    info!("   API: {}", client.base_url());
    info!("   Today marker: {}", settings.chart.reference_date);

    let controller = ChartController::new(
        client,
        settings.chart.clone(),
        settings.isin.clone(),
        settings.range,
    );
    let shell = Shell {
        controller,
        output_dir: settings.output_dir.clone(),
    };

    let mounted = shell.controller.mount().await;
    if let Err(e) = commands::report_outcome(mounted).await {
        error!("{}", e);
    }

    println!("Type `help` for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if commands::handle_line(&shell, &line).await == Flow::Quit {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }

    info!("Goodbye");
}
