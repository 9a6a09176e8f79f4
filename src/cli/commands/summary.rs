use crate::cli::commands::resolve_site;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::core::summary::summarize;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{RESET, color_for_compliance};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Summary { site, date, json } = cmd else {
        return Ok(());
    };

    let site = resolve_site(site, cfg)?;
    let rows = ReportLogic::generate(&cfg.database, &site, date)?;
    let summary = summarize(&site, date, &rows);

    if *json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    header(format!("Patrol summary: site {} on {}", site, date));
    println!("Checkpoints     : {}", summary.checkpoints);
    println!("Expected rounds : {}", summary.total_expected_rounds);
    println!("Completed       : {}", summary.completed_rounds);
    println!("Missed          : {}", summary.missed_rounds);
    println!(
        "Compliance      : {}{:.2}%{}\n",
        color_for_compliance(summary.compliance_percent),
        summary.compliance_percent,
        RESET
    );

    if !summary.scans_by_guard.is_empty() {
        let mut guards = Table::new(&["Guard", "Scans"]);
        for g in &summary.scans_by_guard {
            guards.add_row(vec![g.guard_name.clone(), g.scan_count.to_string()]);
        }
        println!("{}", guards.render());
    }

    if !summary.missed_by_checkpoint.is_empty() {
        let mut missed = Table::new(&["Checkpoint", "Missed rounds"]);
        for m in &summary.missed_by_checkpoint {
            let rounds: Vec<String> = m.missed_rounds.iter().map(u32::to_string).collect();
            missed.add_row(vec![m.checkpoint_name.clone(), rounds.join(", ")]);
        }
        println!("{}", missed.render());
    }

    Ok(())
}
