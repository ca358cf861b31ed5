use crate::error::{self, InputError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleOutputEntry {
    pub angle: u32,
    pub output: f64,
}

/// Power output per whole-degree incidence angle, ascending from 0°.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleOutputTable {
    pub max_output: f64,
    pub entries: Vec<AngleOutputEntry>,
}

impl AngleOutputTable {
    pub fn get(&self, angle: u32) -> Option<f64> {
        let first = self.entries.first()?.angle;
        let idx = angle.checked_sub(first)? as usize;
        self.entries.get(idx).map(|e| e.output)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AngleOutputEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (angle, watts) pairs in table order, as handed to a chart surface.
    pub fn points(&self) -> Vec<(u32, f64)> {
        self.entries.iter().map(|e| (e.angle, e.output)).collect()
    }

    /// First entry whose output falls short of `threshold`.
    pub fn first_below(&self, threshold: f64) -> Option<&AngleOutputEntry> {
        self.entries.iter().find(|e| e.output < threshold)
    }

    pub fn is_non_increasing(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].output >= w[1].output)
    }
}

impl<'a> IntoIterator for &'a AngleOutputTable {
    type Item = &'a AngleOutputEntry;
    type IntoIter = std::slice::Iter<'a, AngleOutputEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Panel size needed to drive a motor, with the power it has to deliver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSizing {
    /// Square meters.
    pub area: f64,
    /// Motor draw corrected for motor efficiency, Watts.
    pub adjusted_power: f64,
    pub irradiance: f64,
    pub panel_efficiency: f64,
}

impl PanelSizing {
    /// Electrical output of the sized panel at normal incidence.
    pub fn rated_output(&self) -> f64 {
        self.area * self.irradiance * self.panel_efficiency
    }
}

/// One user-supplied quantity, in the order the calculator asks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    MotorPower,
    MotorEfficiency,
    LoadPercent,
    PanelEfficiency,
    Irradiance,
    PanelRating,
    RatedPanelEfficiency,
}

impl InputField {
    pub const ALL: [InputField; 7] = [
        InputField::MotorPower,
        InputField::MotorEfficiency,
        InputField::LoadPercent,
        InputField::PanelEfficiency,
        InputField::Irradiance,
        InputField::PanelRating,
        InputField::RatedPanelEfficiency,
    ];

    /// Quantities needed to size the panel.
    pub const MOTOR: [InputField; 5] = [
        InputField::MotorPower,
        InputField::MotorEfficiency,
        InputField::LoadPercent,
        InputField::PanelEfficiency,
        InputField::Irradiance,
    ];

    /// Quantities describing the panel actually installed.
    pub const PANEL: [InputField; 2] = [InputField::PanelRating, InputField::RatedPanelEfficiency];

    /// Config key and error label.
    pub fn key(self) -> &'static str {
        match self {
            InputField::MotorPower => "motor_power",
            InputField::MotorEfficiency => "motor_efficiency",
            InputField::LoadPercent => "load_percent",
            InputField::PanelEfficiency => "panel_efficiency",
            InputField::Irradiance => "irradiance",
            InputField::PanelRating => "panel_rating",
            InputField::RatedPanelEfficiency => "rated_panel_efficiency",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            InputField::MotorPower => "Enter motor power in Watts: ",
            InputField::MotorEfficiency => "Enter motor efficiency (as a decimal): ",
            InputField::LoadPercent => "Enter motor load as a percentage of rated load: ",
            InputField::PanelEfficiency => "Enter solar panel efficiency (as a decimal): ",
            InputField::Irradiance => "Enter solar irradiance in Watts per square meter: ",
            InputField::PanelRating => "Enter your solar panel output rating: ",
            InputField::RatedPanelEfficiency => {
                "Enter your solar panel efficiency (as a decimal): "
            }
        }
    }

    pub fn check(self, value: f64) -> Result<f64, InputError> {
        let key = self.key();
        match self {
            InputField::MotorEfficiency
            | InputField::PanelEfficiency
            | InputField::RatedPanelEfficiency => error::efficiency(key, value),
            InputField::Irradiance => error::positive_divisor(key, value),
            InputField::MotorPower | InputField::LoadPercent | InputField::PanelRating => {
                error::positive(key, value)
            }
        }
    }
}

/// Everything a calculator run asks the user for, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingInputs {
    pub motor_power: f64,
    pub motor_efficiency: f64,
    pub load_percent: f64,
    pub panel_efficiency: f64,
    pub irradiance: f64,
    pub panel_rating: f64,
    pub rated_panel_efficiency: f64,
}

impl SizingInputs {
    pub fn value(&self, field: InputField) -> f64 {
        match field {
            InputField::MotorPower => self.motor_power,
            InputField::MotorEfficiency => self.motor_efficiency,
            InputField::LoadPercent => self.load_percent,
            InputField::PanelEfficiency => self.panel_efficiency,
            InputField::Irradiance => self.irradiance,
            InputField::PanelRating => self.panel_rating,
            InputField::RatedPanelEfficiency => self.rated_panel_efficiency,
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        for field in InputField::ALL {
            field.check(self.value(field))?;
        }
        Ok(())
    }

    /// Motor draw at the configured share of its rated load.
    pub fn load_adjusted_motor_power(&self) -> f64 {
        crate::sizing::load_adjusted_power(self.motor_power, self.load_percent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportMetadata {
    pub generated_at: String,
}

impl ReportMetadata {
    pub fn now() -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
