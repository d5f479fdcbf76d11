use crate::utils::Table;
use super::Shell;

/// `status`: what the chart currently shows
pub async fn execute(shell: &Shell) -> Result<(), String> {
    let controller = &shell.controller;
    let mut table = Table::new(&["Field", "Value"]);

    table.add_row(["ISIN".to_string(), controller.isin().await]);
    table.add_row(["Range".to_string(), controller.range().await.to_string()]);

    let surface = controller.surface();
    let surface = surface.lock().await;

    table.add_row(["State", if surface.is_drawn() { "drawn" } else { "nothing drawn" }]);

    if let Some(chart) = surface.chart() {
        let (start, end) = chart.x_scale.domain();
        let (low, high) = chart.y_scale.domain();

        table.add_row(["Historical points".to_string(), chart.series.historical.len().to_string()]);
        table.add_row(["Predicted points".to_string(), chart.series.predicted.len().to_string()]);
        table.add_row([
            "Dates".to_string(),
            format!("{} → {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d")),
        ]);
        table.add_row(["Price axis".to_string(), format!("{:.2} → {:.2}", low, high)]);
        table.add_row([
            "Today marker".to_string(),
            match chart.reference_marker {
                Some(marker) => format!("{} at x={:.1}", marker.date, marker.x),
                None => format!("hidden ({} out of range)", chart.config.reference_date),
            },
        ]);
    }

    if let Some(focus) = surface.focus() {
        table.add_row([
            "Focus".to_string(),
            format!("{} {}{}", focus.point.date, controller.config().currency_symbol, focus.point.price),
        ]);
    }

    println!("{}", table.render());
    Ok(())
}
