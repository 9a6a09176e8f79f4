use crate::cli::parser::Commands;
use crate::core::schedule::{ROUNDS, generate_round_slots};
use crate::errors::AppResult;
use crate::utils::table::Table;

/// Print the round table, or the slots stamped onto `--date`.
pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Rounds { date, json } = cmd {
        match date {
            Some(d) => {
                let slots = generate_round_slots(d)?;

                if *json {
                    println!("{}", serde_json::to_string_pretty(&slots)?);
                    return Ok(());
                }

                let mut table = Table::new(&["Round", "Window", "Slot"]);
                for (slot, def) in slots.iter().zip(ROUNDS.iter()) {
                    table.add_row(vec![
                        slot.round_number.to_string(),
                        def.window_label(),
                        slot.slot_str(),
                    ]);
                }
                println!("🕘 Rounds for {}:\n", d);
                println!("{}", table.render());
            }
            None => {
                if *json {
                    println!("{}", serde_json::to_string_pretty(ROUNDS.as_slice())?);
                    return Ok(());
                }

                let mut table = Table::new(&["Round", "Start", "End"]);
                for def in ROUNDS.iter() {
                    table.add_row(vec![
                        def.round_number.to_string(),
                        def.window_start.format("%H:%M").to_string(),
                        def.window_end.format("%H:%M").to_string(),
                    ]);
                }
                println!("🕘 Patrol rounds ({}):\n", ROUNDS.len());
                println!("{}", table.render());
            }
        }
    }

    Ok(())
}
