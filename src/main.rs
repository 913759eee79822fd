use anyhow::Result;
use clap::Parser;
use oasis_lib::app::App;
use oasis_lib::model::config::SimConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path (defaults are used when it does not exist)
    #[arg(short, long, default_value = "oasis.toml")]
    config: String,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 1_000)]
    ticks: u64,

    /// Real seconds per frame before time scaling
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// RNG seed; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Initial time scale; clamped to the configured range
    #[arg(long)]
    time_scale: Option<f64>,

    /// Print a summary every N frames
    #[arg(short, long, default_value_t = 100)]
    report_every: u64,

    /// Emit summaries as JSON lines
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "oasis_lib=info,oasis_core=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = SimConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }

    let mut app = App::new(config, args.dt, args.report_every)?;
    if let Some(scale) = args.time_scale {
        let applied = app.world.set_time_scale(scale);
        if applied != scale {
            tracing::warn!(requested = scale, applied, "Time scale clamped");
        }
    }

    let json = args.json;
    let mut write_error = None;
    app.run(args.ticks, |report| {
        if write_error.is_some() {
            return;
        }
        if json {
            match serde_json::to_string(report) {
                Ok(line) => println!("{line}"),
                Err(e) => write_error = Some(e),
            }
        } else {
            println!("{report}");
        }
    });
    if let Some(e) = write_error {
        return Err(e.into());
    }

    let final_report = app.take_report();
    if json {
        println!("{}", serde_json::to_string(&final_report)?);
    } else {
        println!("Finished: {final_report}");
    }
    Ok(())
}
