//! Shell ballistics CLI
//!
//! Launch-angle solving, trajectory traces, and roster-wide speed factor
//! reports for naval guns.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;

use shell_ballistics::io::{csv, json};
use shell_ballistics::ship::{presets, ShellParameters, ShellKind, ShipClass};
use shell_ballistics::sim::simulate_path;
use shell_ballistics::solver::{max_range_angle, solve_angle_checked, solve_angle_for_range};
use shell_ballistics::{
    ballistics_at_range, converted_range, run_batch, speed_factor, try_ballistics_at_range,
    BallisticsAtRange, EngineConfig, RangeModifierInputs, SpeedFactor,
};

#[derive(Parser)]
#[command(name = "shell-ballistics")]
#[command(version)]
#[command(about = "Naval shell ballistics and speed factor calculator", long_about = None)]
struct Cli {
    /// Log solver and batch progress (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the elevation for a range and report the impact ballistics
    Solve {
        /// Target range (km)
        #[arg(short, long)]
        range: f64,

        #[command(flatten)]
        shell: ShellArgs,

        /// Fail on targets beyond maximum range instead of best effort
        #[arg(long)]
        checked: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,
    },

    /// Trace one shot and write its trajectory as CSV
    Trace {
        /// Elevation (degrees)
        #[arg(short, long, conflicts_with = "range")]
        angle: Option<f64>,

        /// Target range (km); the elevation is solved first
        #[arg(short, long)]
        range: Option<f64>,

        #[command(flatten)]
        shell: ShellArgs,

        /// Output CSV file path
        #[arg(long)]
        csv: PathBuf,

        /// Output summary JSON file path
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Produce speed factors for every ship of a roster
    Batch {
        /// Input roster JSON file (array of ships); built-in presets when omitted
        #[arg(long)]
        r#in: Option<PathBuf>,

        /// Output report JSON file
        #[arg(long)]
        out: PathBuf,

        /// Engine configuration JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Evaluate ships one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Show the modified firing range of a ship
    Modifiers {
        /// Base maximum firing range (km)
        #[arg(long)]
        base_range: f64,

        /// Hull class
        #[arg(long, value_enum)]
        class: ClassArg,

        /// Nation
        #[arg(long, default_value = "usa")]
        nation: String,

        /// Ship name
        #[arg(long, default_value = "")]
        name: String,

        /// Ship carries a spotter aircraft
        #[arg(long)]
        spotter: bool,

        /// Engine configuration JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Find the maximum range of a shell and its elevation
    Envelope {
        #[command(flatten)]
        shell: ShellArgs,
    },
}

/// Shell given either by a preset ship or by its raw parameters.
#[derive(Args)]
struct ShellArgs {
    /// Preset ship (baltimore, bismarck, fletcher); overrides raw parameters
    #[arg(long)]
    ship: Option<String>,

    /// Shell type of the preset ship
    #[arg(long, value_enum, default_value = "he")]
    kind: KindArg,

    /// Muzzle velocity (m/s)
    #[arg(long, default_value = "830.0")]
    velocity: f64,

    /// Caliber (mm)
    #[arg(short, long, default_value = "203.0")]
    caliber: f64,

    /// Mass (kg)
    #[arg(short, long, default_value = "118.0")]
    mass: f64,

    /// Drag coefficient
    #[arg(short = 'd', long, default_value = "0.3")]
    cd: f64,
}

impl ShellArgs {
    fn resolve(&self) -> Result<ShellParameters> {
        let shell = match &self.ship {
            Some(name) => {
                let ship = presets::all()
                    .into_iter()
                    .find(|s| s.name.eq_ignore_ascii_case(name))
                    .with_context(|| format!("unknown preset ship '{}'", name))?;
                let kind = ShellKind::from(self.kind);
                *ship
                    .shell(kind)
                    .with_context(|| format!("{} carries no {} shell", ship.name, kind))?
            }
            None => ShellParameters::new(self.velocity, self.caliber, self.mass, self.cd),
        };
        shell.validate()?;
        Ok(shell)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Ap,
    He,
    Sap,
}

impl From<KindArg> for ShellKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Ap => ShellKind::AP,
            KindArg::He => ShellKind::HE,
            KindArg::Sap => ShellKind::SAP,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ClassArg {
    Destroyer,
    Cruiser,
    Battleship,
    AircraftCarrier,
    Submarine,
}

impl From<ClassArg> for ShipClass {
    fn from(c: ClassArg) -> Self {
        match c {
            ClassArg::Destroyer => ShipClass::Destroyer,
            ClassArg::Cruiser => ShipClass::Cruiser,
            ClassArg::Battleship => ShipClass::Battleship,
            ClassArg::AircraftCarrier => ShipClass::AircraftCarrier,
            ClassArg::Submarine => ShipClass::Submarine,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match cli.command {
        Commands::Solve { range, shell, checked, output } => {
            let shell = shell.resolve()?;
            let b = if checked {
                try_ballistics_at_range(range, &shell)?
            } else {
                ballistics_at_range(range, &shell)
            };
            let factor = speed_factor(range, b.flight_time, b.impact_angle);

            match output {
                OutputFormat::Table => print_solution(range, &shell, &b, factor),
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "range_km": range,
                        "converted_range": converted_range(range),
                        "shell": shell,
                        "ballistics": b,
                        "factor": factor.value(),
                    });
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
            }
        }

        Commands::Trace { angle, range, shell, csv: csv_path, summary } => {
            let shell = shell.resolve()?;
            let angle = match (angle, range) {
                (Some(a), _) => a,
                (None, Some(km)) => solve_angle_for_range(km * 1000.0, &shell),
                (None, None) => bail!("either --angle or --range is required"),
            };

            let path = simulate_path(angle, &shell);
            csv::write_trace_file(&csv_path, &path)
                .with_context(|| format!("writing {}", csv_path.display()))?;

            let s = json::TraceSummary::from_path(&path);
            print_trace(&s, &csv_path);

            if let Some(summary_path) = summary {
                json::write_summary_file(&summary_path, &s)?;
                println!("  Summary saved to: {}", summary_path.display());
            }
        }

        Commands::Batch { r#in, out, config, sequential } => {
            let mut config = load_config(config.as_deref())?;
            if sequential {
                config.batch.parallel = false;
            }

            let roster = match &r#in {
                Some(path) => json::read_roster(path)
                    .with_context(|| format!("reading roster {}", path.display()))?,
                None => presets::all(),
            };
            info!("evaluating {} ships", roster.len());

            let report = run_batch(&roster, &config);
            json::write_report_file(&out, &report)
                .with_context(|| format!("writing {}", out.display()))?;

            println!();
            println!("  Batch: {} ships", report.ships.len());
            println!("  ──────────────────────────────────────────────────────────────────");
            for ship in &report.ships {
                println!(
                    "  {:<16} {:<12} {:>7.2} km  {}",
                    ship.name,
                    ship.class.to_string(),
                    ship.modified_range_km,
                    ship.applied_modifiers.join(", ")
                );
            }
            println!();
            println!("  Points:  {:>4}", report.point_count());
            println!("  Skipped: {:>4}", report.skipped_count());
            println!("  Report saved to: {}", out.display());
            println!();
        }

        Commands::Modifiers { base_range, class, nation, name, spotter, config } => {
            let config = load_config(config.as_deref())?;
            let inputs = RangeModifierInputs {
                base_max_range_km: base_range,
                class: class.into(),
                has_spotter: spotter,
                name: &name,
                nation: &nation,
            };
            let modified = config.modifiers.evaluate(&inputs);

            println!("  Base range:     {:>8.2} km", base_range);
            for rule in &modified.applied {
                println!("    + {}", rule);
            }
            println!("  Modified range: {:>8.2} km ({} units)", modified.range_km, converted_range(modified.range_km));
        }

        Commands::Envelope { shell } => {
            let shell = shell.resolve()?;
            let envelope = max_range_angle(&shell);
            println!(
                "  Max range: {:>8.0} m ({:.2} km) at {:.2}°",
                envelope.range,
                envelope.range / 1000.0,
                envelope.angle
            );
            for fraction in [0.5, 0.75, 1.0] {
                let target = envelope.range * fraction;
                let angle = solve_angle_checked(target, &shell)?;
                println!("    {:>3.0}%  {:>8.0} m  {:>7.3}°", fraction * 100.0, target, angle);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::load(p).with_context(|| format!("loading config {}", p.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn print_solution(range_km: f64, shell: &ShellParameters, b: &BallisticsAtRange, factor: SpeedFactor) {
    println!();
    println!("====================================================================");
    println!("  SHELL BALLISTICS at {:.2} km ({} units)", range_km, converted_range(range_km));
    println!("====================================================================");
    println!();
    println!("  Shell");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Muzzle vel:    {:>8.1} m/s   Caliber:      {:>8.1} mm",
        shell.muzzle_velocity, shell.caliber
    );
    println!(
        "  Mass:          {:>8.1} kg    Cd:           {:>8.3}",
        shell.mass, shell.drag_coefficient
    );
    println!();
    println!("  Solution");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Elevation:     {:>8.3}°", b.launch_angle);
    println!("  Flight time:   {:>8.3} s (game)", b.flight_time);
    println!("  Impact angle:  {:>8.2}°", b.impact_angle);
    println!("  Impact speed:  {:>8.1} m/s", b.impact_velocity);
    match factor {
        SpeedFactor::Valid(f) => println!("  Speed factor:  {:>8.3}", f),
        SpeedFactor::Rejected(r) => println!("  Speed factor:  rejected ({})", r),
    }
    println!("====================================================================");
    println!();
}

fn print_trace(s: &json::TraceSummary, csv_path: &Path) {
    println!();
    println!("  Trace at {:.3}°", s.launch_angle_deg);
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Range:         {:>8.0} m", s.range_m);
    println!("  Max height:    {:>8.0} m", s.max_height_m);
    if let Some(t) = s.apex_time_s {
        println!("  Apex time:     {:>8.2} s", t);
    }
    println!("  Flight time:   {:>8.2} s ({:.2} s game)", s.flight_time_s, s.adjusted_flight_time_s);
    println!("  Impact:        {:>8.2}° at {:.1} m/s", s.impact_angle_deg, s.impact_velocity_ms);
    if s.hit_time_ceiling {
        println!("  Stopped at the flight time ceiling");
    }
    println!("  Simulation: {} steps, {} rows -> {}", s.steps, s.steps + 1, csv_path.display());
    println!();
}
