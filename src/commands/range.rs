use crate::models::ChartRange;
use super::{report_outcome, Shell};

/// `range <R>`: click one of the six range buttons
pub async fn execute(shell: &Shell, args: &[&str]) -> Result<(), String> {
    let raw = args
        .first()
        .ok_or("❌ Usage: `range <1M|3M|6M|1Y|3Y|5Y>`")?;
    let range: ChartRange = raw.parse()?;

    tracing::info!("🔘 Range button {} clicked", range);
    match shell.controller.set_range(range).await {
        Some(handle) => {
            report_outcome(handle).await?;
        }
        None => println!("Range {} is already selected", range),
    }

    Ok(())
}

/// `isin <id>`: switch the chart to another instrument
pub async fn execute_isin(shell: &Shell, args: &[&str]) -> Result<(), String> {
    let isin = args.first().ok_or("❌ Usage: `isin <identifier>`")?;

    match shell.controller.set_isin(isin).await {
        Some(handle) => {
            report_outcome(handle).await?;
        }
        None => println!("{} is already shown", isin),
    }

    Ok(())
}

/// `buttons`: show the button row with the active range bracketed
pub async fn execute_buttons(shell: &Shell) -> Result<(), String> {
    let row: Vec<String> = shell
        .controller
        .buttons()
        .await
        .iter()
        .map(|b| {
            if b.active {
                format!("[{}]", b.range)
            } else {
                format!(" {} ", b.range)
            }
        })
        .collect();

    println!("{}", row.join(" "));
    Ok(())
}
