use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::Result;
use crate::types::{InputField, SizingInputs};

/// Inputs known before any prompting, from a TOML file or command-line flags.
///
/// Keys match [`InputField::key`]:
///
/// ```toml
/// motor_power = 60.0
/// motor_efficiency = 0.85
/// load_percent = 75.0
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialInputs {
    pub motor_power: Option<f64>,
    pub motor_efficiency: Option<f64>,
    pub load_percent: Option<f64>,
    pub panel_efficiency: Option<f64>,
    pub irradiance: Option<f64>,
    pub panel_rating: Option<f64>,
    pub rated_panel_efficiency: Option<f64>,
}

impl PartialInputs {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("reading inputs from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn get(&self, field: InputField) -> Option<f64> {
        *self.slot(field)
    }

    pub fn set(&mut self, field: InputField, value: f64) {
        *self.slot_mut(field) = Some(value);
    }

    /// Values present in `other` replace ours.
    pub fn overlay(mut self, other: &PartialInputs) -> Self {
        for field in InputField::ALL {
            if let Some(value) = other.get(field) {
                self.set(field, value);
            }
        }
        self
    }

    pub fn missing(&self) -> impl Iterator<Item = InputField> + '_ {
        InputField::ALL
            .into_iter()
            .filter(|&field| self.get(field).is_none())
    }

    /// Checks the values that are present without demanding the rest.
    pub fn validate_present(&self) -> Result<()> {
        for field in InputField::ALL {
            if let Some(value) = self.get(field) {
                field.check(value)?;
            }
        }
        Ok(())
    }

    /// Returns `None` while any field is still missing.
    pub fn complete(&self) -> Result<Option<SizingInputs>> {
        let inputs = match *self {
            PartialInputs {
                motor_power: Some(motor_power),
                motor_efficiency: Some(motor_efficiency),
                load_percent: Some(load_percent),
                panel_efficiency: Some(panel_efficiency),
                irradiance: Some(irradiance),
                panel_rating: Some(panel_rating),
                rated_panel_efficiency: Some(rated_panel_efficiency),
            } => SizingInputs {
                motor_power,
                motor_efficiency,
                load_percent,
                panel_efficiency,
                irradiance,
                panel_rating,
                rated_panel_efficiency,
            },
            _ => return Ok(None),
        };
        inputs.validate()?;
        Ok(Some(inputs))
    }

    fn slot(&self, field: InputField) -> &Option<f64> {
        match field {
            InputField::MotorPower => &self.motor_power,
            InputField::MotorEfficiency => &self.motor_efficiency,
            InputField::LoadPercent => &self.load_percent,
            InputField::PanelEfficiency => &self.panel_efficiency,
            InputField::Irradiance => &self.irradiance,
            InputField::PanelRating => &self.panel_rating,
            InputField::RatedPanelEfficiency => &self.rated_panel_efficiency,
        }
    }

    fn slot_mut(&mut self, field: InputField) -> &mut Option<f64> {
        match field {
            InputField::MotorPower => &mut self.motor_power,
            InputField::MotorEfficiency => &mut self.motor_efficiency,
            InputField::LoadPercent => &mut self.load_percent,
            InputField::PanelEfficiency => &mut self.panel_efficiency,
            InputField::Irradiance => &mut self.irradiance,
            InputField::PanelRating => &mut self.panel_rating,
            InputField::RatedPanelEfficiency => &mut self.rated_panel_efficiency,
        }
    }
}

impl From<SizingInputs> for PartialInputs {
    fn from(inputs: SizingInputs) -> Self {
        let mut partial = PartialInputs::default();
        for field in InputField::ALL {
            partial.set(field, inputs.value(field));
        }
        partial
    }
}
