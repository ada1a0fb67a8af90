//! Demo Session - Session loop against the simulated instrument feed
//!
//! Runs the dash session with readings from the demo simulator instead of a
//! live game capture, printing a frame plan snapshot once a second. Useful for
//! watching the needles move without ICR2 or any overlay art present.
//!
//! Usage:
//!   cargo run --example demo_session

use anyhow::Result;
use icr2dash_core::config::{AppSettings, DashLayout};
use icr2dash_core::demo::DemoInstruments;
use icr2dash_core::session::DashSession;
use std::time::Duration;

const SAMPLE_LAYOUT: &str = r#"
[General]
cockpit_path = cockpit.png
low_fuel = 15
critical_fuel = 5
high_temp = 205
high_rpm = 1100
fuellight = 408, 344
fuellight_path = fuellight.png
templight = 318, 344
rpmlight = 51, 344
rpmlight_path = rpmlight.png

[LCD display]
lcdnums_path = lcdnums.png
lcd_speed1 = 118, 341
lcd_speed2 = 131, 341
lcd_speed3 = 144, 341
lcd_gear = 201, 341

[Rollbars]
rollbar1 = rollbar1.png
rollbar2 = rollbar2.png
rollbar3 = rollbar3.png
rollbar4 = rollbar4.png
rollbar5 = rollbar5.png
rollbar6 = rollbar6.png
rollbar7 = rollbar7.png
rollbar8 = rollbar8.png
front_rollbar = 255, 322
rear_rollbar = 255, 372

[Shifter]
shifter = 576, 320
gear1 = gear1.png
gear2 = gear2.png
gear3 = gear3.png
gear4 = gear4.png
gear5 = gear5.png
gear6 = gear6.png

[Tachometer]
needle_image_path = tachneedle.png
pivot = 60, 60
gauge_center = 120, 120
min_value = 0
max_value = 1500
section_one_end = 600
section_two_start = 600
min_angle = 222
max_angle_section_one = 180
max_angle_section_two = -47

[Boost]
needle_image_path = boostneedle.png
pivot = 40, 40
gauge_center = 320, 120
min_value = 25
max_value = 60
section_one_end = 45
section_two_start = 45
min_angle = 225
max_angle_section_one = 90
max_angle_section_two = -45

[Temperature]
needle_image_path = tempneedle.png
pivot = 40, 40
gauge_center = 460, 120
min_value = 100
max_value = 305
section_one_end = 220
section_two_start = 220
min_angle = 202
max_angle_section_one = 100
max_angle_section_two = -22

[Fuel]
needle_image_path = fuelneedle.png
pivot = 40, 40
gauge_center = 560, 200
min_value = 0
max_value = 40
section_one_end = 20
section_two_start = 20
min_angle = 210
max_angle_section_one = 90
max_angle_section_two = -30

[Brake bias]
needle_image_path = bbneedle.png
pivot = 25, 25
gauge_center = 520, 300
min_value = 0
max_value = 100
section_one_end = 50
section_two_start = 50
min_angle = 180
max_angle_section_one = 90
max_angle_section_two = 0

[Boost knob]
needle_image_path = knobneedle.png
pivot = 20, 20
gauge_center = 600, 320
min_value = 1
max_value = 8
section_one_end = 4
section_two_start = 4
min_angle = 150
max_angle_section_one = 90
max_angle_section_two = 30
"#;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let layout = DashLayout::from_str(SAMPLE_LAYOUT)?;
    let settings = AppSettings::default();
    let (session, sender) = DashSession::new(layout, &settings);

    // Feed simulated readings at the capture cadence, then hang up
    let feeder = tokio::spawn(async move {
        let mut sim = DemoInstruments::new();
        let mut ticker = tokio::time::interval(Duration::from_millis(16));
        for tick in 0..600u64 {
            ticker.tick().await;
            sender.publish(sim.update(tick * 16));
        }
    });

    let mut frames = 0u64;
    session
        .run(|plan| {
            if frames % 60 == 0 {
                match serde_json::to_string(&plan) {
                    Ok(json) => println!("frame {}: {}", frames, json),
                    Err(e) => eprintln!("frame {}: serialize failed: {}", frames, e),
                }
            }
            frames += 1;
        })
        .await;

    feeder.await?;
    println!("Session ended after {} frames", frames);
    Ok(())
}
