pub fn execute() -> Result<(), String> {
    println!("📖 Fund chart commands");
    println!();
    println!("  range <1M|3M|6M|1Y|3Y|5Y>  select a range and redraw");
    println!("  isin <identifier>          switch instrument and redraw");
    println!("  buttons                    show the range buttons");
    println!("  hover <x> [y]              move the pointer over the chart area");
    println!("  leave                      move the pointer off the chart");
    println!("  status                     show what is drawn");
    println!("  save [file]                write the chart as SVG");
    println!("  page [file]                write buttons, chart and tooltip as HTML");
    println!("  help                       show this message");
    println!("  quit                       exit");
    println!();
    println!("Pointer coordinates are relative to the plot area (0..690 x 0..310).");
    Ok(())
}
