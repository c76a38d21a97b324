use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use fm_app::{
    export, project_service, query, report, run_service, runtime_compile, AppError, AppResult,
};
use fm_lcc::{EnergyMode, LifecycleCostResult};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fm-cli")]
#[command(about = "Booster fan design margin and lifecycle cost calculator", long_about = None)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the reference project file
    Init {
        /// Output path (.yaml or .json)
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate project file syntax and values
    Validate {
        /// Path to the project file
        project_path: PathBuf,
    },
    /// Evaluate one design margin
    Evaluate {
        /// Path to the project file
        project_path: PathBuf,
        /// Design margin above nominal flow (%)
        #[arg(long)]
        margin: f64,
        /// Run the nominal point for all operating hours
        #[arg(long)]
        nominal_only: bool,
    },
    /// Compare profile and nominal-only energy for one margin
    Compare {
        /// Path to the project file
        project_path: PathBuf,
        /// Design margin above nominal flow (%)
        #[arg(long)]
        margin: f64,
    },
    /// Sweep the design margin range of the project
    Sweep {
        /// Path to the project file
        project_path: PathBuf,
        #[arg(long)]
        nominal_only: bool,
        /// Evaluate margins in parallel
        #[arg(long)]
        parallel: bool,
        /// Output CSV file path (optional, defaults to a table on stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Summary table against the baseline margin, with recommendation
    Summary {
        /// Path to the project file
        project_path: PathBuf,
        /// Output CSV file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export plot-ready curve data as CSV
    Curves {
        /// Path to the project file
        project_path: PathBuf,
        #[arg(long, value_enum)]
        kind: CurveKind,
        /// Fan speeds for `--kind fan` (defaults to the speed grid)
        #[arg(long, value_delimiter = ',')]
        speed: Vec<f64>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CurveKind {
    Fan,
    System,
    Drive,
    Points,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path, force } => cmd_init(&path, force),
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Evaluate {
            project_path,
            margin,
            nominal_only,
        } => cmd_evaluate(&project_path, margin, mode(nominal_only)),
        Commands::Compare {
            project_path,
            margin,
        } => cmd_compare(&project_path, margin),
        Commands::Sweep {
            project_path,
            nominal_only,
            parallel,
            output,
        } => cmd_sweep(&project_path, mode(nominal_only), parallel, output.as_deref()),
        Commands::Summary {
            project_path,
            output,
        } => cmd_summary(&project_path, output.as_deref()),
        Commands::Curves {
            project_path,
            kind,
            speed,
            output,
        } => cmd_curves(&project_path, kind, &speed, output.as_deref()),
    }
}

fn mode(nominal_only: bool) -> EnergyMode {
    if nominal_only {
        EnergyMode::NominalOnly
    } else {
        EnergyMode::Profile
    }
}

fn cmd_init(path: &Path, force: bool) -> AppResult<()> {
    if path.exists() && !force {
        return Err(AppError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    project_service::save_project(path, &fm_project::reference_project())?;
    println!("✓ Reference project written to {}", path.display());
    Ok(())
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    runtime_compile::compile_project(&project)?;
    let summary = project_service::describe_project(&project);
    println!("✓ Project is valid");
    println!(
        "  {} (v{}): {} profile segments over {} h, {} sweep points, {} report margins",
        summary.name,
        summary.version,
        summary.segment_count,
        summary.profile_hours,
        summary.sweep_points,
        summary.report_margins
    );
    Ok(())
}

fn print_result(r: &LifecycleCostResult) {
    println!("Design margin: {}% ({})", r.design_margin_pct, r.mode.label());
    println!(
        "  Design point:        {:.0} m3/h at {:.2} mbar",
        r.design_flow, r.design_pressure
    );
    println!(
        "  Fan:                 {:.1}% at {:.0} rpm, {:.1} kW shaft",
        r.design_efficiency, r.design_speed, r.fan_shaft_power_kw
    );
    println!("  Motor rated:         {:.1} kW", r.motor_rated_kw);
    println!("  Avg motor load:      {:.1}%", r.avg_motor_load_pct);
    println!("  Avg motor eff:       {:.1}%", r.avg_motor_efficiency * 100.0);
    println!("  Avg motor input:     {:.1} kW", r.avg_motor_input_kw);
    println!("  Annual energy:       {:.0} kWh", r.annual_energy_kwh);
    println!("  Annual energy cost:  €{:.0}", r.annual_energy_cost);
    println!("  Annual maintenance:  €{:.0}", r.annual_maintenance);
    println!("  Annual OPEX:         €{:.0}", r.annual_opex);
    println!("  CAPEX:               €{:.0}", r.capex);
    println!("  NPV OPEX:            €{:.0}", r.npv_opex);
    println!("  Total lifecycle:     €{:.0}", r.total_lifecycle_cost);
    println!("  CO2:                 {:.1} t/year", r.annual_co2_tons);
    for seg in &r.segments {
        debug!(
            segment = %seg.name,
            hours = seg.hours,
            load_pct = seg.motor_load_pct,
            energy_kwh = seg.energy_kwh,
            "Segment breakdown"
        );
    }
}

fn cmd_evaluate(project_path: &Path, margin: f64, mode: EnergyMode) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let model = runtime_compile::compile_project(&project)?;
    let result = run_service::evaluate(&model, margin, mode);
    print_result(&result);
    Ok(())
}

fn cmd_compare(project_path: &Path, margin: f64) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let model = runtime_compile::compile_project(&project)?;
    let cmp = run_service::compare_modes(&model, margin);
    print_result(&cmp.profile);
    println!();
    print_result(&cmp.nominal_only);
    println!();
    println!(
        "Profile vs nominal-only: {:+.0} kWh/year, {:+.0} € lifecycle",
        cmp.energy_difference_kwh(),
        cmp.total_cost_difference()
    );
    Ok(())
}

fn cmd_sweep(
    project_path: &Path,
    mode: EnergyMode,
    parallel: bool,
    output: Option<&Path>,
) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let model = runtime_compile::compile_project(&project)?;
    let sweep = runtime_compile::build_sweep(&project.sweep)?;
    let result = run_service::run_sweep(&model, &sweep, mode, parallel);

    if let Some(path) = output {
        export::write_csv(Some(path), &export::sweep_csv(&result))?;
        println!("✓ Exported {} margins to {}", result.results.len(), path.display());
        return Ok(());
    }

    println!(
        "{:<8} {:<10} {:<10} {:<12} {:<12} {:<14} {:<10}",
        "Margin", "Motor kW", "Load %", "CAPEX €", "NPV OPEX €", "Total €", "CO2 t/yr"
    );
    for r in &result.results {
        println!(
            "{:<8} {:<10.1} {:<10.1} {:<12.0} {:<12.0} {:<14.0} {:<10.1}",
            r.design_margin_pct,
            r.motor_rated_kw,
            r.avg_motor_load_pct,
            r.capex,
            r.npv_opex,
            r.total_lifecycle_cost,
            r.annual_co2_tons
        );
    }
    if let Some(best) = result.cheapest() {
        println!("Lowest lifecycle cost at {}% margin", best.design_margin_pct);
    }
    Ok(())
}

fn cmd_summary(project_path: &Path, output: Option<&Path>) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let model = runtime_compile::compile_project(&project)?;
    let summary = report::build_summary(&model, &project.scenarios);

    println!(
        "{:<8} {:<10} {:<10} {:<10} {:<12} {:<12} {:<12} {:<12} {:<10}",
        "Margin", "Motor kW", "Load %", "Eff %", "OPEX €/yr", "CAPEX €", "NPV OPEX €", "Total €",
        "CO2 t/yr"
    );
    for row in &summary.rows {
        let r = &row.result;
        let marker = row.class.label();
        println!(
            "{:<8} {:<10.1} {:<10.1} {:<10.1} {:<12.0} {:<12.0} {:<12.0} {:<12.0} {:<10.1}{}",
            row.margin(),
            r.motor_rated_kw,
            r.avg_motor_load_pct,
            r.avg_motor_efficiency * 100.0,
            r.annual_opex,
            r.capex,
            r.npv_opex,
            r.total_lifecycle_cost,
            r.annual_co2_tons,
            if marker.is_empty() {
                String::new()
            } else {
                format!(" [{}]", marker)
            }
        );
        if row.class != report::ScenarioClass::Baseline {
            println!(
                "{:<8} {:<10} {:<10} {:<10} {:<+12.0} {:<+12.0} {:<+12.0} {:<+12.0} {:<+10.1}",
                "  Δ", "", "", "", row.delta_annual_opex, row.delta_capex, row.delta_npv_opex,
                row.delta_total, row.delta_co2_tons
            );
        }
    }
    println!(
        "\nKey insight: every 1% of margin above {}% costs about €{:.0} over the plant lifetime",
        project.scenarios.baseline_margin, summary.cost_per_margin_point
    );

    let rec = report::build_recommendation(&model, &project.scenarios);
    println!("\nRecommendation");
    for (title, r, savings) in [
        ("Current design", &rec.current, None),
        ("Baseline (API 560)", &rec.baseline, Some(rec.baseline_savings())),
        ("Best practice", &rec.best_practice, Some(rec.best_practice_savings())),
    ] {
        println!("  {} ({}% margin)", title, r.design_margin_pct);
        println!("    Total lifecycle cost: €{:.0}", r.total_lifecycle_cost);
        if let Some(s) = savings {
            println!("    Savings vs current:   €{:.0}", s);
        }
        println!(
            "    Motor load {:.1}%, efficiency {:.1}%",
            r.avg_motor_load_pct,
            r.avg_motor_efficiency * 100.0
        );
    }

    if let Some(path) = output {
        export::write_csv(Some(path), &export::summary_csv(&summary))?;
        println!("\n✓ Summary exported to {}", path.display());
    }
    Ok(())
}

fn cmd_curves(
    project_path: &Path,
    kind: CurveKind,
    speeds: &[f64],
    output: Option<&Path>,
) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let model = runtime_compile::compile_project(&project)?;

    let csv = match kind {
        CurveKind::Fan => {
            let speeds = if speeds.is_empty() {
                model.config().speed_grid().speeds().to_vec()
            } else {
                speeds.to_vec()
            };
            export::fan_curves_csv(&query::fan_curve_series(&model, &speeds))
        }
        CurveKind::System => {
            let max_flow = project.datasheet.design.flow * 1.2;
            export::system_curve_csv(&query::system_curve_series(&model, max_flow, 100)?)
        }
        CurveKind::Drive => export::drive_csv(&query::drive_efficiency_series(120.0, 121)?),
        CurveKind::Points => export::points_csv(&query::operating_points(&model)),
    };

    export::write_csv(output, &csv)?;
    if let Some(path) = output {
        println!("✓ Exported to {}", path.display());
    }
    Ok(())
}
