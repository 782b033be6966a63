use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::{pool::DbPool, queries};
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History { person } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let events = queries::load_history(&pool.conn, *person, cfg.history_limit)?;

        if events.is_empty() {
            info(format!("No events for person {}", person));
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("DATE", 10),
            Column::new("TIME", 8),
            Column::new("KIND", 10),
            Column::new("MANUAL", 6),
            Column::new("NOTE", 30),
        ]);
        for ev in events {
            table.add_row(vec![
                ev.date_str(),
                ev.time_str(),
                ev.kind.label().to_string(),
                if ev.manual { "yes" } else { "" }.to_string(),
                ev.note.clone(),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
