mod loader;
mod views;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sinodex::{Database, Locale};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loader::FileLoader;

#[derive(Parser)]
#[command(name = "sinodex")]
#[command(about = "Viewer for fused SINoALICE master data")]
struct Cli {
    /// Directory holding the dataset JSON files
    #[arg(long, env = "SINODEX_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Dataset localization (en or jp; anything else falls back to en)
    #[arg(long, default_value = "en")]
    locale: String,

    /// Show raw ids and unreleased records where applicable
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Weapon listing with skills and community multipliers
    Weapons,

    /// Bilingual skill listing
    Skills,

    /// Cross-source weapon/skill identity table
    SkillMap,

    /// Character stat growth
    Classes,

    /// Nightmare listing with art names
    Nightmares,

    /// Parse and resolve a library export
    Library {
        /// Tab-separated export file
        #[arg(short, long)]
        import: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sinodex=info,sinodex_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let locale = Locale::sanitize(Some(&cli.locale));
    let db = Database::new(FileLoader::new(&cli.data_dir));

    match cli.command {
        Command::Weapons => views::weapons(&db, locale, cli.debug).await?,
        Command::Skills => views::skills(&db).await?,
        Command::SkillMap => views::skill_map(&db).await?,
        Command::Classes => views::classes(&db, locale, cli.debug).await?,
        Command::Nightmares => views::nightmares(&db, locale, cli.debug).await?,
        Command::Library { import } => {
            let text = std::fs::read_to_string(&import)
                .with_context(|| format!("reading library export {}", import.display()))?;
            views::library(&db, locale, &text).await?;
        }
    }

    Ok(())
}
