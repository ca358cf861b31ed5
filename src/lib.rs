pub mod angles;
pub mod chart;
pub mod config;
pub mod error;
pub mod prompt;
pub mod report;
pub mod sizing;
pub mod types;

pub use angles::{
    cosine_factor, deg_to_rad, incidence_angles, output_at_angle, GRAZING_INCIDENCE,
    NORMAL_INCIDENCE,
};

pub use chart::{render_svg, ChartSurface, LineChart, NoChart, SvgFile, POWER_VS_ANGLE_TITLE};

pub use config::PartialInputs;

pub use error::{Error, InputError, Result};

pub use prompt::Console;

pub use report::{run, write_max_angle, write_panel_area, write_sweep, SizingReport};

pub use sizing::{angle_sweep_output, load_adjusted_power, max_operable_angle, required_panel_area};

pub use types::{
    AngleOutputEntry, AngleOutputTable, InputField, PanelSizing, ReportMetadata, SizingInputs,
};
