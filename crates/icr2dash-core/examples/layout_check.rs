use icr2dash_core::config::DashLayout;
use std::env;
use std::path::Path;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: layout_check <overlay_ini>");
        return;
    }

    let path = Path::new(&args[1]);
    println!("Checking: {}", path.display());

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };

    match DashLayout::from_str(&text) {
        Ok(layout) => {
            println!("Successfully parsed layout!");
            println!("Cockpit: {}", layout.cockpit_path);
            println!("Gauges: {}", layout.gauges.len());
            println!("Anchors: {}", layout.anchors().len());
            println!("Assets referenced: {}", layout.asset_paths().len());

            println!("\nGauges:");
            let mut names: Vec<_> = layout.gauges.keys().collect();
            names.sort();
            for name in &names {
                let gauge = &layout.gauges[*name];
                println!(
                    "  - {}: range {}..{}, sweep {} to {} deg, center ({}, {})",
                    name,
                    gauge.min_value,
                    gauge.max_value,
                    gauge.min_angle,
                    gauge.max_angle_section_two,
                    gauge.gauge_center.x,
                    gauge.gauge_center.y
                );
            }

            // Check referenced art against the directory the INI sits in
            let report = layout.validate(path.parent());
            println!(
                "\nReport: {} gauges, {} anchors, {} assets",
                report.stats.gauge_count, report.stats.anchor_count, report.stats.asset_count
            );
            for warning in &report.warnings {
                println!("  warning: {:?}", warning);
            }
            for error in &report.errors {
                println!("  error: {}", error);
            }

            if report.has_errors() {
                std::process::exit(1);
            }
            println!("Layout OK");
        }
        Err(e) => {
            eprintln!("Failed to parse layout: {:?}", e);
            std::process::exit(1);
        }
    }
}
