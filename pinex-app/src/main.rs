mod app;
pub use app::App;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "pinex")]
#[command(version)]
#[command(about = "PIN-entry user study console driver")]
struct Cli {
    /// Participant number (1-based)
    #[arg(short, long)]
    participant: u32,

    /// Directory holding the per-participant trial logs
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Directory the combined CSV is exported to
    #[arg(long, default_value = "results")]
    out_dir: PathBuf,

    /// Secondary export directory; failures there are logged, not fatal
    #[arg(long)]
    mirror_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = App::new(cli.participant, cli.data_dir, cli.out_dir, cli.mirror_dir)?;
    app.run()?;

    Ok(())
}
