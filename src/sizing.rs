use log::{debug, trace};

use crate::angles::{self, GRAZING_INCIDENCE};
use crate::error::{self, InputError};
use crate::types::{AngleOutputEntry, AngleOutputTable, PanelSizing};

/// Motor draw when running at `load_percent` of its rated load.
pub fn load_adjusted_power(motor_power: f64, load_percent: f64) -> f64 {
    motor_power * load_percent / 100.0
}

/// Panel output for every whole-degree incidence angle from 0° to 90°.
pub fn angle_sweep_output(max_output: f64) -> Result<AngleOutputTable, InputError> {
    let max_output = error::positive("max_output", max_output)?;
    let entries = angles::incidence_angles()
        .map(|angle| AngleOutputEntry {
            angle,
            output: angles::output_at_angle(max_output, angle),
        })
        .collect();
    Ok(AngleOutputTable {
        max_output,
        entries,
    })
}

/// Panel area needed to supply `motor_power` through a motor of `motor_efficiency`.
///
/// The motor draw is first scaled up by its efficiency, then divided by the
/// power a square meter of panel delivers under `irradiance`.
pub fn required_panel_area(
    motor_power: f64,
    motor_efficiency: f64,
    panel_efficiency: f64,
    irradiance: f64,
) -> Result<PanelSizing, InputError> {
    let motor_power = error::positive("motor_power", motor_power)?;
    let motor_efficiency = error::efficiency("motor_efficiency", motor_efficiency)?;
    let panel_efficiency = error::efficiency("panel_efficiency", panel_efficiency)?;
    let irradiance = error::positive_divisor("irradiance", irradiance)?;

    let adjusted_power = motor_power / motor_efficiency;
    let area = adjusted_power / (irradiance * panel_efficiency);
    let sizing = PanelSizing {
        area,
        adjusted_power,
        irradiance,
        panel_efficiency,
    };
    debug!(
        "sized panel: {:.4} m2 for {:.2} W, rated output {:.2} W",
        area,
        adjusted_power,
        sizing.rated_output()
    );
    Ok(sizing)
}

/// Largest incidence angle at which the panel still covers `motor_min_power`.
///
/// Returns `None` when even normal incidence falls short.
pub fn max_operable_angle(
    motor_min_power: f64,
    panel_max_output: f64,
    panel_efficiency: f64,
) -> Result<Option<u32>, InputError> {
    let motor_min_power = error::non_negative("motor_min_power", motor_min_power)?;
    let panel_max_output = error::non_negative("panel_max_output", panel_max_output)?;
    let panel_efficiency = error::efficiency("panel_efficiency", panel_efficiency)?;

    let peak = panel_max_output * panel_efficiency;
    for angle in angles::incidence_angles() {
        let output = angles::output_at_angle(peak, angle);
        trace!("{}°: {:.4} W against {:.4} W", angle, output, motor_min_power);
        if output < motor_min_power {
            return Ok(angle.checked_sub(1));
        }
    }
    Ok(Some(GRAZING_INCIDENCE))
}
