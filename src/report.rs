use std::io::{BufRead, Write};

use log::{debug, info};

use crate::chart::{ChartSurface, LineChart};
use crate::config::PartialInputs;
use crate::error::{Error, Result};
use crate::prompt::Console;
use crate::sizing::{
    angle_sweep_output, load_adjusted_power, max_operable_angle, required_panel_area,
};
use crate::types::{
    AngleOutputEntry, AngleOutputTable, InputField, PanelSizing, ReportMetadata, SizingInputs,
};

pub const HEADER: &str = "Solar Panel and Motor Calculator";
pub const CUTOFF_NOTE: &str = " : Maximum angle for functioning motor.";

/// Everything one calculator run works out from its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingReport {
    pub inputs: SizingInputs,
    /// Motor draw at the requested load, before efficiency losses.
    pub motor_draw: f64,
    pub sizing: PanelSizing,
    pub table: AngleOutputTable,
    /// First angle whose output no longer covers `sizing.adjusted_power`.
    pub cutoff: Option<AngleOutputEntry>,
    pub max_angle: Option<u32>,
    pub metadata: ReportMetadata,
}

impl SizingReport {
    pub fn compute(inputs: &SizingInputs) -> Result<Self> {
        inputs.validate()?;
        let motor_draw = inputs.load_adjusted_motor_power();
        let sizing = required_panel_area(
            motor_draw,
            inputs.motor_efficiency,
            inputs.panel_efficiency,
            inputs.irradiance,
        )?;
        let table = angle_sweep_output(inputs.panel_rating)?;
        debug_assert!(table.is_non_increasing());
        let cutoff = table.first_below(sizing.adjusted_power).copied();
        let max_angle = max_operable_angle(
            motor_draw,
            inputs.panel_rating,
            inputs.rated_panel_efficiency,
        )?;
        debug!(
            "cutoff at {:?}, max operable angle {:?}",
            cutoff.map(|e| e.angle),
            max_angle
        );
        Ok(Self {
            inputs: *inputs,
            motor_draw,
            sizing,
            table,
            cutoff,
            max_angle,
            metadata: ReportMetadata::now(),
        })
    }

    pub fn chart(&self) -> LineChart {
        LineChart::power_vs_angle(&self.table)
            .with_footnote(format!("generated {}", self.metadata.generated_at))
    }

    /// The whole console report, without prompts.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", HEADER)?;
        write_panel_area(out, &self.sizing)?;
        write_sweep(out, &self.table, self.sizing.adjusted_power)?;
        write_max_angle(out, self.max_angle)
    }
}

pub fn write_panel_area<W: Write>(out: &mut W, sizing: &PanelSizing) -> std::io::Result<()> {
    writeln!(out, "\nRequired solar panel area: {:.2} square meters", sizing.area)
}

/// Prints rows until the first one that falls short of `required_power`,
/// which is printed with [`CUTOFF_NOTE`] and ends the listing.
pub fn write_sweep<W: Write>(
    out: &mut W,
    table: &AngleOutputTable,
    required_power: f64,
) -> std::io::Result<()> {
    writeln!(out, "\nSolar Panel Power Output at Different Angles:")?;
    for entry in table {
        if entry.output >= required_power {
            writeln!(out, "Angle {}°: {:.2} W", entry.angle, entry.output)?;
        } else {
            writeln!(out, "Angle {}°: {:.2} W {}", entry.angle, entry.output, CUTOFF_NOTE)?;
            break;
        }
    }
    Ok(())
}

pub fn write_max_angle<W: Write>(out: &mut W, max_angle: Option<u32>) -> std::io::Result<()> {
    match max_angle {
        Some(angle) => writeln!(out, "\nMaximum angle before the motor won't turn: {}°", angle),
        None => writeln!(
            out,
            "\nThe motor cannot turn at any angle: the panel falls short even facing the light."
        ),
    }
}

fn required(inputs: &PartialInputs, field: InputField) -> Result<f64> {
    inputs
        .get(field)
        .ok_or(Error::MissingInput(field.key()))
}

fn fill<R: BufRead, W: Write>(
    inputs: &mut PartialInputs,
    fields: &[InputField],
    console: &mut Console<R, W>,
) -> Result<()> {
    for &field in fields {
        if inputs.get(field).is_none() {
            let value = console.ask(field)?;
            inputs.set(field, value);
        }
    }
    Ok(())
}

/// Runs the calculator end to end: asks for whatever `preset` lacks, prints
/// the report through `console` and hands the full sweep to `surface`.
pub fn run<R, W, S>(
    preset: PartialInputs,
    console: &mut Console<R, W>,
    surface: &mut S,
) -> Result<SizingReport>
where
    R: BufRead,
    W: Write,
    S: ChartSurface + ?Sized,
{
    preset.validate_present()?;
    let mut inputs = preset;
    info!(
        "{} of {} inputs preset",
        InputField::ALL.len() - inputs.missing().count(),
        InputField::ALL.len()
    );

    writeln!(console.output(), "{}", HEADER)?;
    fill(&mut inputs, &InputField::MOTOR, console)?;
    let sizing = required_panel_area(
        load_adjusted_power(
            required(&inputs, InputField::MotorPower)?,
            required(&inputs, InputField::LoadPercent)?,
        ),
        required(&inputs, InputField::MotorEfficiency)?,
        required(&inputs, InputField::PanelEfficiency)?,
        required(&inputs, InputField::Irradiance)?,
    )?;
    write_panel_area(console.output(), &sizing)?;

    fill(&mut inputs, &InputField::PANEL, console)?;
    let inputs = match inputs.complete()? {
        Some(inputs) => inputs,
        None => {
            let field = inputs.missing().next().unwrap_or(InputField::PanelRating);
            return Err(Error::MissingInput(field.key()));
        }
    };
    let report = SizingReport::compute(&inputs)?;

    write_sweep(console.output(), &report.table, report.sizing.adjusted_power)?;
    surface.plot(&report.chart())?;
    write_max_angle(console.output(), report.max_angle)?;
    console.output().flush()?;

    info!(
        "panel area {:.4} m2, max operable angle {:?}",
        report.sizing.area, report.max_angle
    );
    Ok(report)
}
