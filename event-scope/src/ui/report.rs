use std::fmt;

use crate::{
    model::{agg::Snapshot, cli::RunConfig},
    ui::live::clock,
};

pub fn print_report(config: &RunConfig, snapshot: &Snapshot) {
    print!("{}", render_report_to_string(config, snapshot));
}

pub fn render_report_to_string(config: &RunConfig, snapshot: &Snapshot) -> String {
    let mut out = String::new();
    write_report(&mut out, config, snapshot).expect("formatting into a String cannot fail");
    out
}

fn write_report<W: fmt::Write>(
    out: &mut W,
    config: &RunConfig,
    snapshot: &Snapshot,
) -> fmt::Result {
    let tally = &snapshot.tally;

    writeln!(out, "Log file:     {}", config.logfile.display())?;
    writeln!(out, "Role:         {}", config.role)?;
    writeln!(out, "Ruleset:      {}", config.ruleset.name())?;
    writeln!(
        out,
        "Taken at:     {}",
        clock(snapshot.taken_at.to_offset(config.utc_offset))
    )?;
    writeln!(out, "Lines:        {}", tally.lines)?;
    writeln!(out, "Unclassified: {}", tally.unclassified())?;

    if let Some(issue) = &snapshot.issue {
        writeln!(out, "Warning:      {issue}")?;
    }

    writeln!(out)?;
    writeln!(out, "{:<24} {:>10}", "Event", "Count")?;
    writeln!(out, "{:-<24} {:-<10}", "", "")?;
    for (cat, count) in config.ruleset.categories().iter().zip(&tally.counts) {
        writeln!(out, "{:<24} {:>10}", cat.label, count)?;
    }
    writeln!(out, "{:-<24} {:-<10}", "", "")?;
    writeln!(out, "{:<24} {:>10}", "Total", tally.classified())?;

    Ok(())
}
