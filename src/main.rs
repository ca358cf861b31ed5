use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use solar_sizing::{run, ChartSurface, Console, NoChart, PartialInputs, SvgFile};

/// Size a solar panel for a motor and chart its output against incidence angle.
///
/// Values not given on the command line or in the config file are asked for
/// interactively.
#[derive(Parser, Debug)]
#[command(name = "solar-sizing", version, about)]
struct Args {
    /// TOML file with any of the input quantities
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Motor power in Watts
    #[arg(long, value_name = "W")]
    motor_power: Option<f64>,

    /// Motor efficiency as a decimal
    #[arg(long, value_name = "E")]
    motor_efficiency: Option<f64>,

    /// Motor load as a percentage of rated load
    #[arg(long, value_name = "P")]
    load_percent: Option<f64>,

    /// Solar panel efficiency used for sizing, as a decimal
    #[arg(long, value_name = "E")]
    panel_efficiency: Option<f64>,

    /// Solar irradiance in Watts per square meter
    #[arg(long, value_name = "W/M2")]
    irradiance: Option<f64>,

    /// Output rating of the installed panel in Watts
    #[arg(long, value_name = "W")]
    panel_rating: Option<f64>,

    /// Efficiency of the installed panel, as a decimal
    #[arg(long, value_name = "E")]
    rated_panel_efficiency: Option<f64>,

    /// Where to write the power-vs-angle chart
    #[arg(long, value_name = "PATH", default_value = "solar_output.svg")]
    chart: PathBuf,

    /// Skip writing the chart
    #[arg(long)]
    no_chart: bool,
}

impl Args {
    fn overrides(&self) -> PartialInputs {
        PartialInputs {
            motor_power: self.motor_power,
            motor_efficiency: self.motor_efficiency,
            load_percent: self.load_percent,
            panel_efficiency: self.panel_efficiency,
            irradiance: self.irradiance,
            panel_rating: self.panel_rating,
            rated_panel_efficiency: self.rated_panel_efficiency,
        }
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_timed();
    let args = Args::parse();
    info!("initialising solar sizing calculator");

    let file = match &args.config {
        Some(path) => PartialInputs::load(path)
            .with_context(|| format!("loading inputs from {}", path.display()))?,
        None => PartialInputs::default(),
    };
    let preset = file.overlay(&args.overrides());

    let mut surface: Box<dyn ChartSurface> = if args.no_chart {
        Box::new(NoChart)
    } else {
        Box::new(SvgFile::new(&args.chart))
    };

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    run(preset, &mut console, surface.as_mut()).context("calculator run failed")?;

    info!("calculation completed");
    Ok(())
}
