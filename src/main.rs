use chrono::Local;
use clap::Parser;
use tradejournal::cli::commands::{Cli, Commands};
use tradejournal::cli::overlay::render_overlay;
use tradejournal::config::Config;
use tradejournal::domain::entities::trade_record::{TradeFields, TradeUpdate};
use tradejournal::domain::values::emotion::Emotion;
use tradejournal::domain::values::record_id::RecordId;
use tradejournal::domain::values::trade_date::format_trade_date;
use tradejournal::logging::init_logging;
use tradejournal::TradeJournal;

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();
    let config = Config::from_env().with_overrides(cli.db.clone(), cli.user.clone());

    let mut journal = match TradeJournal::new(&config) {
        Ok(journal) => journal,
        Err(e) => {
            eprintln!("Error opening journal: {e}");
            std::process::exit(1);
        }
    };
    journal.load().await;

    if let Err(e) = run_command(&mut journal, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(journal: &mut TradeJournal, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::List { filters } => {
            let spec = filters.into_spec()?;
            let visible = journal.dashboard_mut().apply_filters(spec);
            println!("{}", serde_json::to_string_pretty(&visible)?);
        }
        Commands::Add { emotion, json, public } => {
            let emotion: Emotion = emotion.parse()?;
            let mut fields: TradeFields = serde_json::from_str(&json)?;
            stamp_now(&mut fields);

            if public {
                let record = journal.publish(fields, emotion).await?;
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                let dashboard = journal.dashboard_mut();
                dashboard.open_create_form(emotion);
                let pending = dashboard.save_form(fields).await?;
                let id = pending.id().clone();
                pending.wait().await?;
                if let Some(record) = journal.dashboard().record(&id) {
                    println!("{}", serde_json::to_string_pretty(record)?);
                }
            }
        }
        Commands::Edit { id, json } => {
            let id = RecordId::new(id)?;
            let update: TradeUpdate = serde_json::from_str(&json)?;
            let pending = journal.dashboard_mut().update_record(&id, update)?;
            pending.wait().await?;
            if let Some(record) = journal.dashboard().record(&id) {
                println!("{}", serde_json::to_string_pretty(record)?);
            }
        }
        Commands::Delete { id } => {
            let id = RecordId::new(id)?;
            journal.dashboard_mut().delete_record(&id)?.wait().await?;
            println!("Trade {id} deleted");
        }
        Commands::Show { id } => {
            let id = RecordId::new(id)?;
            let dashboard = journal.dashboard_mut();
            let visibility = dashboard
                .record(&id)
                .map(|r| r.visibility)
                .ok_or_else(|| format!("Trade not found: {id}"))?;
            dashboard.select_for_overlay(visibility, &id)?;
            if let Some(record) = dashboard.overlay() {
                print!("{}", render_overlay(record));
            }
            dashboard.close();
        }
        Commands::Options => {
            let options = journal.dashboard().filter_options();
            println!("{}", serde_json::to_string_pretty(&options)?);
        }
        Commands::Stats { filters } => {
            let spec = filters.into_spec()?;
            let dashboard = journal.dashboard_mut();
            let _ = dashboard.apply_filters(spec);
            let stats = dashboard.stats();
            println!("{}", serde_json::to_string_pretty(&stats)?);
            if let Some(rate) = stats.win_rate() {
                println!("Win rate: {:.1}%", rate * 100.0);
            }
        }
    }
    Ok(())
}

/// Blank date/time default to the local clock.
fn stamp_now(fields: &mut TradeFields) {
    let now = Local::now();
    if fields.date.trim().is_empty() {
        fields.date = format_trade_date(now.date_naive());
    }
    if fields.time.trim().is_empty() {
        fields.time = now.format("%H:%M").to_string();
    }
}
