use std::path::PathBuf;
use crate::services::page_service;
use super::Shell;

/// Resolve the target file: explicit argument, or a name derived from the selection
async fn target_path(shell: &Shell, args: &[&str], extension: &str) -> PathBuf {
    match args.first() {
        Some(name) => shell.output_dir.join(name),
        None => {
            let isin = shell.controller.isin().await;
            let range = shell.controller.range().await;
            shell.output_dir.join(format!("mf_chart_{}_{}.{}", isin, range, extension))
        }
    }
}

/// `save [file]`: write the chart as SVG
pub async fn execute_svg(shell: &Shell, args: &[&str]) -> Result<(), String> {
    let path = target_path(shell, args, "svg").await;
    let surface = shell.controller.surface();
    let surface = surface.lock().await;

    let written = page_service::save_svg(&surface, &path).map_err(|e| e.to_string())?;
    if written {
        println!("💾 Saved {}", path.display());
    } else {
        println!("Nothing drawn yet, no file written");
    }
    Ok(())
}

/// `page [file]`: write buttons, chart and tooltip as an HTML page
pub async fn execute_page(shell: &Shell, args: &[&str]) -> Result<(), String> {
    let path = target_path(shell, args, "html").await;
    let title = format!(
        "{} ({})",
        shell.controller.isin().await,
        shell.controller.range().await
    );
    let buttons = shell.controller.buttons().await;

    let surface = shell.controller.surface();
    let surface = surface.lock().await;
    page_service::save_page(&title, &buttons, &surface, &path).map_err(|e| e.to_string())?;

    println!("💾 Saved {}", path.display());
    Ok(())
}
