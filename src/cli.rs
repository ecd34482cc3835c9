use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Browse the webtoon catalog, keep favorites and preview audio
#[derive(Parser)]
#[command(name = "toonshelf")]
#[command(about = "A CLI for browsing webtoons, favorites and ratings", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub opts: GlobalOpts,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Settings database URL (defaults to a SQLite file in the user data directory)
    #[arg(long, global = true)]
    pub database: Option<String>,
    /// Keep favorites in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,
    /// Config file to read instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// One line typed into `toonshelf shell`.
#[derive(Parser)]
#[command(no_binary_name = true, name = "toonshelf")]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List the catalog's categories
    Categories,
    /// List webtoons, optionally only one category
    List {
        /// Category name (exact match)
        category: Option<String>,
    },
    /// Show one webtoon
    Show {
        /// Catalog position (1-based) or id
        item: String,
    },
    /// Add a webtoon to favorites, or remove it if already there
    Favorite {
        /// Catalog position (1-based) or id
        item: String,
    },
    /// List favorites
    Favorites,
    /// Rate a webtoon from 1 to 5 stars
    Rate {
        /// Catalog position (1-based) or id
        item: String,
        /// Number of stars
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        stars: u8,
    },
    /// Play or pause a webtoon's audio clip
    Play {
        /// Catalog position (1-based) or id
        item: String,
    },
    /// Interactive session; ratings and playback last until exit
    Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["toonshelf", "favorites", "--ephemeral"]).unwrap();
        assert!(cli.opts.ephemeral);
        assert_eq!(cli.command, Some(Commands::Favorites));
    }

    #[test]
    fn rate_rejects_out_of_range_stars() {
        assert!(Cli::try_parse_from(["toonshelf", "rate", "1", "6"]).is_err());
        assert!(Cli::try_parse_from(["toonshelf", "rate", "1", "0"]).is_err());
        let cli = Cli::try_parse_from(["toonshelf", "rate", "1", "5"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Rate { item: "1".into(), stars: 5 }));
    }

    #[test]
    fn shell_line_has_no_binary_name() {
        let line = ShellLine::try_parse_from(["list", "Horror"]).unwrap();
        assert_eq!(line.command, Commands::List { category: Some("Horror".into()) });
    }
}
