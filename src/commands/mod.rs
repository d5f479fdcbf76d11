use std::path::PathBuf;
use tokio::task::JoinHandle;
use crate::models::RenderOutcome;
use crate::services::chart_controller::ChartController;

pub mod export;
pub mod help;
pub mod hover;
pub mod range;
pub mod status;

/// Everything a command needs: the mounted chart and where to write files
pub struct Shell {
    pub controller: ChartController,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parse and run one input line
pub async fn run_command(shell: &Shell, line: &str) -> Result<Flow, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return Ok(Flow::Continue);
    }

    let command = parts[0].to_lowercase();
    let args = &parts[1..];

    match command.as_str() {
        "range" | "r" => range::execute(shell, args).await?,
        "isin" => range::execute_isin(shell, args).await?,
        "buttons" => range::execute_buttons(shell).await?,
        "hover" | "move" => hover::execute(shell, args).await?,
        "leave" => hover::execute_leave(shell).await?,
        "status" => status::execute(shell).await?,
        "save" | "svg" => export::execute_svg(shell, args).await?,
        "page" | "html" => export::execute_page(shell, args).await?,
        "help" | "?" => help::execute()?,
        "quit" | "exit" | "q" => return Ok(Flow::Quit),
        _ => {
            return Err(format!(
                "Unknown command '{}'. Type `help` for a list of commands.",
                parts[0]
            ))
        }
    }

    Ok(Flow::Continue)
}

/// Run one line, reporting failures on stderr
pub async fn handle_line(shell: &Shell, line: &str) -> Flow {
    match run_command(shell, line).await {
        Ok(flow) => flow,
        Err(e) => {
            tracing::debug!("Command '{}' failed: {}", line.trim(), e);
            eprintln!("❌ {}", e.trim_start_matches("❌ "));
            Flow::Continue
        }
    }
}

/// Wait for a render cycle and print how it ended
pub async fn report_outcome(handle: JoinHandle<RenderOutcome>) -> Result<RenderOutcome, String> {
    let outcome = handle
        .await
        .map_err(|e| format!("Render task failed: {}", e))?;

    match &outcome {
        RenderOutcome::Drawn { points } => println!("📈 Chart drawn ({} points)", points),
        RenderOutcome::Empty => println!("⚠️ No data to draw"),
        RenderOutcome::Failed(reason) => println!("⚠️ Fetch failed, nothing drawn: {}", reason),
        RenderOutcome::Stale => println!("Superseded by a newer request"),
    }

    Ok(outcome)
}
