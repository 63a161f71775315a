use crate::application::filter::{DateRange, FilterSpec};
use crate::domain::values::emotion::Emotion;
use crate::domain::values::trade_date::parse_trade_date;
use clap::{Args, Parser, Subcommand};
use std::collections::BTreeSet;

#[derive(Parser)]
#[command(name = "tradejournal", about = "Emotion-tagged trading journal")]
pub struct Cli {
    /// SQLite database path (overrides TRADEJOURNAL_DB)
    #[arg(long, global = true)]
    pub db: Option<String>,
    /// User whose private journal to open (overrides TRADEJOURNAL_USER)
    #[arg(long, global = true)]
    pub user: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List private then public trades, optionally filtered
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Record a new trade
    Add {
        /// Emotion name or emoji (confident, happy, excited, neutral, anxious, fearful, greedy, frustrated, angry, sad)
        emotion: String,
        /// JSON with symbol, instrument, session, strategy, entryPoint, exitPoint, positionSize, profitLoss, reason, description, tags, date, time
        json: String,
        /// Write to the shared public collection instead of the private journal
        #[arg(long)]
        public: bool,
    },
    /// Edit a private trade
    Edit {
        /// Trade ID
        id: String,
        /// JSON with only the fields to change (emotion allowed)
        json: String,
    },
    /// Delete a private trade
    Delete {
        /// Trade ID
        id: String,
    },
    /// Show one trade in detail
    Show {
        /// Trade ID
        id: String,
    },
    /// List the distinct emotions, symbols, sessions and strategies present
    Options,
    /// Summarize P&L over the (filtered) journal
    Stats {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Emotion to include (repeatable)
    #[arg(long = "emotion")]
    pub emotions: Vec<String>,
    /// Symbol to include (repeatable)
    #[arg(long = "symbol")]
    pub symbols: Vec<String>,
    /// Session to include (repeatable)
    #[arg(long = "session")]
    pub sessions: Vec<String>,
    /// Strategy to include (repeatable)
    #[arg(long = "strategy")]
    pub strategies: Vec<String>,
    /// Start of date range (dd-MM-yyyy, inclusive)
    #[arg(long, requires = "to")]
    pub from: Option<String>,
    /// End of date range (dd-MM-yyyy, inclusive)
    #[arg(long, requires = "from")]
    pub to: Option<String>,
}

impl FilterArgs {
    /// Convert to a filter spec. Range bounds are validated here so a typo is
    /// reported rather than silently matching nothing.
    pub fn into_spec(self) -> Result<FilterSpec, String> {
        let emotions = self
            .emotions
            .iter()
            .map(|e| e.parse::<Emotion>())
            .collect::<Result<BTreeSet<Emotion>, String>>()?;
        let date_range = match (self.from, self.to) {
            (Some(start), Some(end)) => {
                parse_trade_date(&start)?;
                parse_trade_date(&end)?;
                Some(DateRange::new(start, end))
            }
            (None, None) => None,
            _ => return Err("--from and --to must be given together".into()),
        };
        Ok(FilterSpec {
            emotions,
            symbols: self.symbols.into_iter().collect(),
            sessions: self.sessions.into_iter().collect(),
            strategies: self.strategies.into_iter().collect(),
            date_range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::parse_from([
            "tradejournal", "list", "--emotion", "happy", "--emotion", "😡", "--symbol", "EURUSD",
            "--from", "01-06-2023", "--to", "30-06-2023",
        ]);
        let Commands::List { filters } = cli.command else {
            panic!("expected list");
        };
        let spec = filters.into_spec().unwrap();
        assert_eq!(spec.emotions.len(), 2);
        assert!(spec.emotions.contains(&Emotion::Angry));
        assert!(spec.symbols.contains("EURUSD"));
        assert_eq!(spec.date_range, Some(DateRange::new("01-06-2023", "30-06-2023")));
    }

    #[test]
    fn test_from_requires_to() {
        assert!(Cli::try_parse_from(["tradejournal", "list", "--from", "01-06-2023"]).is_err());
    }

    #[test]
    fn test_bad_bound_rejected() {
        let args = FilterArgs {
            from: Some("2023-06-01".into()),
            to: Some("30-06-2023".into()),
            ..Default::default()
        };
        assert!(args.into_spec().is_err());
    }

    #[test]
    fn test_global_user_flag() {
        let cli = Cli::parse_from(["tradejournal", "show", "abc", "--user", "bob"]);
        assert_eq!(cli.user.as_deref(), Some("bob"));
    }
}
