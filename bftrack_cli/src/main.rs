use bftrack_core::*;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bftrack")]
#[command(about = "Body composition tracking with the U.S. Navy circumference method", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the live body-fat estimate for the given measurements (default)
    Estimate {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Record today's measurements and estimate
    Record {
        #[command(flatten)]
        fields: FieldArgs,

        /// Show the estimate without recording it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show recorded history
    History {
        /// Render a bar chart of body fat per day
        #[arg(long)]
        chart: bool,
    },
}

/// Measurement overrides; anything not given comes from the saved preferences
#[derive(Args, Default)]
struct FieldArgs {
    /// Height in cm
    #[arg(long)]
    height: Option<f64>,

    /// Neck circumference in cm (narrowest point)
    #[arg(long)]
    neck: Option<f64>,

    /// Waist circumference in cm (narrowest point)
    #[arg(long)]
    waist: Option<f64>,

    /// Hip circumference in cm (widest point, used for female estimates)
    #[arg(long)]
    hip: Option<f64>,

    /// Sex selection for the estimation formula
    #[arg(long, value_enum)]
    sex: Option<SexArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SexArg {
    Male,
    Female,
}

impl From<SexArg> for Sex {
    fn from(arg: SexArg) -> Self {
        match arg {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    bftrack_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    let store = FileStore::open(&data_dir)?;
    let mut tracker = Tracker::open(store);

    match cli.command {
        Some(Commands::Estimate { fields }) => cmd_estimate(&mut tracker, &fields),
        Some(Commands::Record { fields, dry_run }) => cmd_record(&mut tracker, &fields, dry_run),
        Some(Commands::History { chart }) => {
            cmd_history(&tracker, chart, &config);
            Ok(())
        }
        None => {
            // Default to "estimate" with the saved preferences
            cmd_estimate(&mut tracker, &FieldArgs::default())
        }
    }
}

/// Apply the given fields through the session layer, persisting preferences
/// on every change the way the form does
fn apply_fields(tracker: &mut Tracker<FileStore>, fields: &FieldArgs) -> Result<()> {
    if let Some(sex) = fields.sex {
        tracker.set_sex(sex.into())?;
    }
    if let Some(height) = fields.height {
        tracker.update(Field::Height, height)?;
    }
    if let Some(neck) = fields.neck {
        tracker.update(Field::Neck, neck)?;
    }
    if let Some(waist) = fields.waist {
        tracker.update(Field::Waist, waist)?;
    }
    if let Some(hip) = fields.hip {
        tracker.update(Field::Hip, hip)?;
    }
    Ok(())
}

fn cmd_estimate(tracker: &mut Tracker<FileStore>, fields: &FieldArgs) -> Result<()> {
    apply_fields(tracker, fields)?;
    display_estimate(tracker.snapshot(), tracker.live_estimate());
    Ok(())
}

fn cmd_record(tracker: &mut Tracker<FileStore>, fields: &FieldArgs, dry_run: bool) -> Result<()> {
    apply_fields(tracker, fields)?;
    display_estimate(tracker.snapshot(), tracker.live_estimate());

    if dry_run {
        println!("\n[Dry run - not recording]");
        return Ok(());
    }

    let record = tracker.capture()?;
    println!("\n✓ Recorded {:.2}% for {}", record.body_fat, record.date);
    Ok(())
}

fn cmd_history(tracker: &Tracker<FileStore>, chart: bool, config: &Config) {
    let history = tracker.sorted_history();

    if history.is_empty() {
        println!("No records yet.");
        return;
    }

    println!();
    println!(
        "  {:<12}{:>8}{:>8}{:>8}{:>8}{:>10}",
        "Date", "Height", "Neck", "Waist", "Hip", "Body fat"
    );
    for record in &history {
        println!(
            "  {:<12}{:>8.1}{:>8.1}{:>8.1}{:>8.1}{:>9.2}%",
            record.date.to_string(),
            record.height,
            record.neck,
            record.waist,
            record.hip,
            record.body_fat
        );
    }

    if chart {
        println!();
        display_chart(&history, config.chart.width);
    }
}

fn display_estimate(snapshot: &Snapshot, estimate: Option<f64>) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  BODY FAT ESTIMATE");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Sex: {}", snapshot.sex.as_str());
    print!(
        "  Height: {} cm   Neck: {} cm   Waist: {} cm",
        snapshot.height, snapshot.neck, snapshot.waist
    );
    if snapshot.sex == Sex::Female {
        print!("   Hip: {} cm", snapshot.hip);
    }
    println!();
    println!();

    match estimate {
        Some(percent) => println!("  → Estimated body fat: {:.2}%", percent),
        None => println!("  → Estimate undefined for the current measurements"),
    }
}

/// Horizontal bar per day, widest bar scaled to the configured width
fn display_chart(history: &[Record], width: usize) {
    let max = history.iter().map(|r| r.body_fat).fold(f64::MIN, f64::max);
    if max <= 0.0 {
        return;
    }

    for record in history {
        let len = ((record.body_fat / max) * width as f64).round().max(0.0) as usize;
        println!(
            "  {}  {:>6.2}  {}",
            record.date,
            record.body_fat,
            "█".repeat(len)
        );
    }
}
