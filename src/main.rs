// ==========================================
// Загрузчик МТР - CLI entry point
// ==========================================
// Fatal configuration/connection errors terminate the run with a
// non-zero status; per-file errors are reported and the run goes on.
// ==========================================

use clap::Parser;
use ods_mtr_loader::{db, logging, FileProcessor, LoadContext, Settings};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "ods-mtr-loader", version, about = "Загрузка данных о переносе МТР из ODS-файлов в БД")]
struct Cli {
    /// Path of the TOML settings file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

fn main() {
    logging::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!(error = %e, "fatal error, run aborted");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> ods_mtr_loader::LoadResult<()> {
    info!("==================================================");
    info!("{}", ods_mtr_loader::APP_NAME);
    info!("version: {}", ods_mtr_loader::VERSION);
    info!("==================================================");

    let settings = Settings::load(&cli.config)?;
    info!(
        input_dir = %settings.input_dir.display(),
        table = %settings.database.table_name,
        "settings loaded"
    );

    // Principal and start time are captured once, here, and passed
    // down explicitly
    let ctx = LoadContext::from_env();

    // One connection for the whole run
    let mut conn = db::open_connection(&settings.database.path)?;

    let processor = FileProcessor::with_defaults();
    let summary = processor.run(&mut conn, &settings, &ctx)?;

    println!();
    println!("Файлов найдено:    {}", summary.files_found);
    println!("Файлов обработано: {}", summary.files_processed);
    println!("Файлов с данными:  {}", summary.files_contributing());
    println!("Всего добавлено строк: {}", summary.total_rows_inserted);

    Ok(())
}
