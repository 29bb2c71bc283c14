//! saavy-crush - plays a test tone through the bit-crusher
//!
//! Run with: cargo run

mod app;

use app::CrushDemo;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    CrushDemo::new()
        .tone(220.0)
        .resolution(0.45)
        .lfo(0.2, 0.8)
        .mix(0.0, 1.0)
        .sweep(true)
        .seconds(12.0)
        .run()
}
