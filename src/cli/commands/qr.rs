use crate::cli::commands::resolve_site;
use crate::cli::parser::{Commands, QrAction};
use crate::config::Config;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{
    create_checkpoint, delete_checkpoint, get_checkpoint, list_checkpoints, update_checkpoint,
};
use crate::errors::{AppError, AppResult};
use crate::models::checkpoint::{Checkpoint, CheckpointUpdate, NewCheckpoint};
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::ask_confirmation;
use crate::utils::path::expand_tilde;
use crate::utils::table::Table;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Qr { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::open_existing(&cfg.database)?;

    match action {
        QrAction::Add { name, site, wait } => {
            let site = resolve_site(site, cfg)?;
            let new = NewCheckpoint::new(name, &site, Some(wait.unwrap_or(cfg.default_wait_minutes)));
            validate(&new)?;

            let cp = create_checkpoint(&pool.conn, &new)?;
            audit(
                &pool.conn,
                "qr_add",
                &cp.checkpoint_id.to_string(),
                &format!("Added checkpoint '{}' at site {}", cp.display_name, cp.site_id),
            );
            success(format!(
                "Checkpoint {} '{}' added (site {}, wait {} min)",
                cp.checkpoint_id, cp.display_name, cp.site_id, cp.default_wait_minutes
            ));
        }

        QrAction::List { site } => {
            let site = site.clone().or_else(|| cfg.default_site.clone());
            let checkpoints = list_checkpoints(&pool.conn, site.as_deref())?;

            if checkpoints.is_empty() {
                warning("No checkpoints found.");
                return Ok(());
            }
            println!("{}", checkpoint_table(&checkpoints));
        }

        QrAction::Show { id } => {
            let cp = get_checkpoint(&pool.conn, *id)?;
            println!("{}", checkpoint_table(std::slice::from_ref(&cp)));
        }

        QrAction::Update {
            id,
            name,
            site,
            wait,
            reset_wait,
        } => {
            let update = CheckpointUpdate {
                display_name: name.clone(),
                site_id: site.clone(),
                default_wait_minutes: if *reset_wait {
                    Some(None)
                } else {
                    wait.map(Some)
                },
            };

            if update.is_empty() {
                warning("Nothing to update: pass --name, --site, --wait or --reset-wait.");
                return Ok(());
            }

            let cp = update_checkpoint(&pool.conn, *id, &update)?;
            audit(
                &pool.conn,
                "qr_update",
                &cp.checkpoint_id.to_string(),
                &format!(
                    "Checkpoint now '{}' at site {} (wait {} min)",
                    cp.display_name, cp.site_id, cp.default_wait_minutes
                ),
            );
            success(format!("Checkpoint {} updated", cp.checkpoint_id));
        }

        QrAction::Del { id, force } => {
            let cp = get_checkpoint(&pool.conn, *id)?;

            if !*force
                && !ask_confirmation(&format!(
                    "Delete checkpoint {} '{}' (site {})?",
                    cp.checkpoint_id, cp.display_name, cp.site_id
                ))
            {
                info("Deletion cancelled.");
                return Ok(());
            }

            delete_checkpoint(&pool.conn, *id)?;
            audit(
                &pool.conn,
                "qr_del",
                &id.to_string(),
                &format!("Deleted checkpoint '{}'", cp.display_name),
            );
            success(format!("Checkpoint {} deleted", id));
        }

        QrAction::Import { file } => {
            let path = expand_tilde(file);
            let content = fs::read_to_string(&path)?;
            let items: Vec<NewCheckpoint> = serde_json::from_str(&content)?;

            for item in &items {
                validate(item)?;
            }

            let tx = pool.conn.unchecked_transaction()?;
            let mut created = Vec::with_capacity(items.len());
            for item in &items {
                created.push(create_checkpoint(&tx, item)?);
            }
            tx.commit()?;

            audit(
                &pool.conn,
                "qr_import",
                &path.to_string_lossy(),
                &format!("Imported {} checkpoints", created.len()),
            );
            success(format!(
                "Imported {} checkpoints from {}",
                created.len(),
                path.display()
            ));
        }
    }

    Ok(())
}

fn validate(cp: &NewCheckpoint) -> AppResult<()> {
    if cp.display_name.trim().is_empty() {
        return Err(AppError::Other("checkpoint name must not be empty".into()));
    }
    if cp.site_id.trim().is_empty() {
        return Err(AppError::Other("checkpoint site must not be empty".into()));
    }
    Ok(())
}

fn checkpoint_table(checkpoints: &[Checkpoint]) -> String {
    let mut table = Table::new(&["ID", "Name", "Site", "Wait (min)"]);
    for cp in checkpoints {
        table.add_row(vec![
            cp.checkpoint_id.to_string(),
            cp.display_name.clone(),
            cp.site_id.clone(),
            cp.default_wait_minutes.to_string(),
        ]);
    }
    table.render()
}
