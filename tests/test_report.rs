use solar_sizing::chart::{render_svg, ChartSurface, LineChart, SvgFile, POWER_VS_ANGLE_TITLE};
use solar_sizing::config::PartialInputs;
use solar_sizing::error::{Error, InputError};
use solar_sizing::prompt::Console;
use solar_sizing::report::{run, write_max_angle, write_sweep, SizingReport, CUTOFF_NOTE};
use solar_sizing::sizing::angle_sweep_output;
use solar_sizing::types::SizingInputs;

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

#[derive(Default)]
struct Recorder {
    charts: Vec<LineChart>,
}

impl ChartSurface for Recorder {
    fn plot(&mut self, chart: &LineChart) -> std::io::Result<()> {
        self.charts.push(chart.clone());
        Ok(())
    }
}

/// 60 W motor needing 80 W from the panel; installed panel peaks at 50 W.
fn weak_panel() -> SizingInputs {
    SizingInputs {
        motor_power: 60.0,
        motor_efficiency: 0.75,
        load_percent: 100.0,
        panel_efficiency: 0.2,
        irradiance: 1000.0,
        panel_rating: 100.0,
        rated_panel_efficiency: 0.5,
    }
}

fn strong_panel() -> SizingInputs {
    SizingInputs {
        rated_panel_efficiency: 1.0,
        ..weak_panel()
    }
}

const WEAK_PANEL_ANSWERS: &str = "60\n0.75\n100\n0.2\n1000\n100\n0.5\n";

fn run_with(preset: PartialInputs, answers: &str) -> (Result<SizingReport, Error>, String, Recorder) {
    let mut console = Console::new(answers.as_bytes(), Vec::new());
    let mut recorder = Recorder::default();
    let result = run(preset, &mut console, &mut recorder);
    let shown = String::from_utf8(console.into_output()).unwrap();
    (result, shown, recorder)
}

fn angle_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|l| l.starts_with("Angle ")).collect()
}

// ── Report computation ──

#[test]
fn test_compute_weak_panel() {
    let report = SizingReport::compute(&weak_panel()).unwrap();
    assert_approx!(report.motor_draw, 60.0, 1e-12);
    assert_approx!(report.sizing.adjusted_power, 80.0, 1e-12);
    assert_approx!(report.sizing.area, 0.4, 1e-12);
    assert_eq!(report.table.len(), 91);
    assert_eq!(report.cutoff.map(|e| e.angle), Some(37));
    assert_eq!(report.max_angle, None);
    assert!(!report.metadata.generated_at.is_empty());
}

#[test]
fn test_compute_strong_panel() {
    let report = SizingReport::compute(&strong_panel()).unwrap();
    assert_eq!(report.max_angle, Some(53));
}

#[test]
fn test_compute_applies_load_percentage() {
    let inputs = SizingInputs {
        load_percent: 50.0,
        ..strong_panel()
    };
    let report = SizingReport::compute(&inputs).unwrap();
    assert_approx!(report.motor_draw, 30.0, 1e-12);
    assert_approx!(report.sizing.adjusted_power, 40.0, 1e-12);
    assert_approx!(report.sizing.area, 0.2, 1e-12);
    assert_eq!(report.max_angle, Some(72));
}

#[test]
fn test_compute_rejects_invalid_inputs() {
    let inputs = SizingInputs {
        irradiance: 0.0,
        ..weak_panel()
    };
    match SizingReport::compute(&inputs) {
        Err(Error::Input(err)) => assert!(err.is_division_by_zero()),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_write_to_matches_console_format() {
    let report = SizingReport::compute(&weak_panel()).unwrap();
    let mut out = Vec::new();
    report.write_to(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("Solar Panel and Motor Calculator\n"));
    assert!(text.contains("\nRequired solar panel area: 0.40 square meters\n"));
    assert!(text.contains("\nSolar Panel Power Output at Different Angles:\n"));
    assert!(text.contains("Angle 0°: 100.00 W\n"));
    assert!(text.contains("Angle 36°: 80.90 W\n"));
    assert!(text.contains(&format!("Angle 37°: 79.86 W {}\n", CUTOFF_NOTE)));
    assert!(text.ends_with(
        "\nThe motor cannot turn at any angle: the panel falls short even facing the light.\n"
    ));
}

#[test]
fn test_sweep_listing_stops_at_cutoff() {
    let report = SizingReport::compute(&weak_panel()).unwrap();
    let mut out = Vec::new();
    report.write_to(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines = angle_lines(&text);
    assert_eq!(lines.len(), 38);
    assert!(lines[..37].iter().all(|l| !l.contains("Maximum angle")));
    assert!(lines[37].ends_with("Maximum angle for functioning motor."));
}

#[test]
fn test_sweep_listing_without_demand_runs_to_ninety() {
    let table = angle_sweep_output(100.0).unwrap();
    let mut out = Vec::new();
    write_sweep(&mut out, &table, 0.0).unwrap();
    write_max_angle(&mut out, Some(90)).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(angle_lines(&text).len(), 91);
    assert!(!text.contains(CUTOFF_NOTE));
    assert!(text.ends_with("\nMaximum angle before the motor won't turn: 90°\n"));
}

#[test]
fn test_any_demand_cuts_off_at_grazing_incidence() {
    let inputs = SizingInputs {
        motor_power: 1e-6,
        ..strong_panel()
    };
    let report = SizingReport::compute(&inputs).unwrap();
    assert_eq!(report.cutoff.map(|e| e.angle), Some(90));
    assert_eq!(report.max_angle, Some(89));
}

// ── Interactive run ──

#[test]
fn test_run_prompts_in_order() {
    let (result, shown, _) = run_with(PartialInputs::default(), WEAK_PANEL_ANSWERS);
    result.unwrap();
    let prompts = [
        "Enter motor power in Watts: ",
        "Enter motor efficiency (as a decimal): ",
        "Enter motor load as a percentage of rated load: ",
        "Enter solar panel efficiency (as a decimal): ",
        "Enter solar irradiance in Watts per square meter: ",
        "Required solar panel area: 0.40 square meters",
        "Enter your solar panel output rating: ",
        "Enter your solar panel efficiency (as a decimal): ",
        "Solar Panel Power Output at Different Angles:",
    ];
    let mut from = 0;
    for prompt in prompts {
        let at = shown[from..]
            .find(prompt)
            .unwrap_or_else(|| panic!("missing or out of order: {:?}", prompt));
        from += at + prompt.len();
    }
}

#[test]
fn test_run_plots_full_table() {
    let (result, shown, recorder) = run_with(PartialInputs::default(), WEAK_PANEL_ANSWERS);
    let report = result.unwrap();
    assert_eq!(recorder.charts.len(), 1);
    let chart = &recorder.charts[0];
    assert_eq!(chart.title, POWER_VS_ANGLE_TITLE);
    assert_eq!(chart.points.len(), 91);
    assert_eq!(chart.points, report.table.points());
    // the console listing is truncated, the chart is not
    assert_eq!(angle_lines(&shown).len(), 38);
}

#[test]
fn test_run_with_preset_skips_prompts() {
    let (result, shown, _) = run_with(PartialInputs::from(strong_panel()), "");
    let report = result.unwrap();
    assert!(!shown.contains("Enter "));
    assert_eq!(report.max_angle, Some(53));
    assert!(shown.ends_with("\nMaximum angle before the motor won't turn: 53°\n"));
}

#[test]
fn test_run_prompts_only_for_missing_fields() {
    let preset = PartialInputs {
        panel_rating: None,
        ..PartialInputs::from(strong_panel())
    };
    let (result, shown, _) = run_with(preset, "100\n");
    result.unwrap();
    assert_eq!(shown.matches("Enter ").count(), 1);
    assert!(shown.contains("Enter your solar panel output rating: "));
}

#[test]
fn test_run_rejects_non_numeric_answer() {
    let (result, shown, recorder) = run_with(PartialInputs::default(), "sixty\n");
    match result {
        Err(Error::Input(InputError::NotNumeric { field, value })) => {
            assert_eq!(field, "motor_power");
            assert_eq!(value, "sixty");
        }
        other => panic!("unexpected {:?}", other.map(|r| r.max_angle)),
    }
    assert!(!shown.contains("Required solar panel area"));
    assert!(recorder.charts.is_empty());
}

#[test]
fn test_run_rejects_zero_irradiance_before_sizing() {
    let (result, shown, _) = run_with(PartialInputs::default(), "60\n0.75\n100\n0.2\n0\n");
    match result {
        Err(Error::Input(err)) => {
            assert!(err.is_division_by_zero());
            assert_eq!(err.field(), "irradiance");
        }
        other => panic!("unexpected {:?}", other.map(|r| r.max_angle)),
    }
    assert!(!shown.contains("Required solar panel area"));
}

#[test]
fn test_run_rejects_invalid_preset_before_prompting() {
    let preset = PartialInputs {
        motor_efficiency: Some(1.5),
        ..Default::default()
    };
    let (result, shown, _) = run_with(preset, WEAK_PANEL_ANSWERS);
    assert!(matches!(
        result,
        Err(Error::Input(InputError::EfficiencyOutOfRange { field: "motor_efficiency", .. }))
    ));
    assert!(shown.is_empty());
}

#[test]
fn test_run_reports_closed_input() {
    let (result, _, _) = run_with(PartialInputs::default(), "60\n0.75\n");
    assert!(matches!(result, Err(Error::UnexpectedEof("load_percent"))));
}

// ── Chart rendering ──

#[test]
fn test_svg_has_title_labels_and_markers() {
    let table = angle_sweep_output(120.0).unwrap();
    let text = render_svg(&LineChart::power_vs_angle(&table)).to_string();
    assert!(text.contains(POWER_VS_ANGLE_TITLE));
    assert!(text.contains("Angle (degrees)"));
    assert!(text.contains("Power Output (Watts)"));
    assert_eq!(text.matches("class=\"marker\"").count(), 91);
}

#[test]
fn test_svg_file_surface_writes_document() {
    let path = std::env::temp_dir().join(format!("solar_sizing_{}.svg", std::process::id()));
    let report = SizingReport::compute(&strong_panel()).unwrap();
    let mut surface = SvgFile::new(&path);
    surface.plot(&report.chart()).unwrap();

    let written = std::fs::read_to_string(surface.path()).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(written.contains("<svg"));
    assert!(written.contains(POWER_VS_ANGLE_TITLE));
    assert!(written.contains(&report.metadata.generated_at));
}
