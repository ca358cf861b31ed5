use std::io;

use solar_sizing::{run, Console, PartialInputs, SizingInputs, SvgFile};

fn main() -> solar_sizing::Result<()> {
    pretty_env_logger::init_timed();

    // 60 W gear motor on a small single-axis tracker
    let inputs = SizingInputs {
        motor_power: 60.0,
        motor_efficiency: 0.85,
        load_percent: 75.0,
        panel_efficiency: 0.2,
        irradiance: 1000.0,
        panel_rating: 100.0,
        rated_panel_efficiency: 0.8,
    };

    let mut surface = SvgFile::new(std::env::temp_dir().join("solar_output.svg"));
    let mut console = Console::new(io::empty(), io::stdout());
    let report = run(PartialInputs::from(inputs), &mut console, &mut surface)?;

    println!();
    println!("--- Summary ---");
    println!("Motor draw at load: {:.2} W", report.motor_draw);
    println!("Power the panel must deliver: {:.2} W", report.sizing.adjusted_power);
    println!("Sized panel rated output: {:.2} W", report.sizing.rated_output());
    match report.cutoff {
        Some(entry) => println!("Output first falls short at {}°", entry.angle),
        None => println!("Output covers the motor at every angle"),
    }
    println!("Chart: {}", surface.path().display());
    Ok(())
}
