use crate::models::PointerEvent;
use crate::services::chart_service::MARGIN;
use super::Shell;

fn parse_coord(raw: &str, name: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("❌ Invalid {} coordinate: '{}'", name, raw))
}

/// `hover <x> [y]`: move the pointer over the overlay
///
/// Coordinates are relative to the overlay's top-left corner. The page is
/// assumed to place the chart at its origin.
pub async fn execute(shell: &Shell, args: &[&str]) -> Result<(), String> {
    let x = parse_coord(args.first().ok_or("❌ Usage: `hover <x> [y]`")?, "x")?;
    let y = match args.get(1) {
        Some(raw) => parse_coord(raw, "y")?,
        None => MARGIN.inner_height() as f64 / 2.0,
    };

    let event = PointerEvent::new(x, y, x + MARGIN.left as f64, y + MARGIN.top as f64);
    if shell.controller.pointer_move(event).await.is_none() {
        println!("Nothing under the pointer");
        return Ok(());
    }

    let surface = shell.controller.surface();
    let surface = surface.lock().await;
    if let Some(tooltip) = surface.tooltip() {
        println!("{}", tooltip.html.replace("<br/>", " | "));
    }

    Ok(())
}

/// `leave`: move the pointer off the chart
pub async fn execute_leave(shell: &Shell) -> Result<(), String> {
    shell.controller.pointer_leave().await;
    println!("Tooltip hidden");
    Ok(())
}
