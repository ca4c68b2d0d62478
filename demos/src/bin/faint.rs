//! Slowly cycles all lights between black, a pale green and a dark red.

use std::{error::Error, time::Duration};

use clap::Parser;
use log::{info, LevelFilter};
use opc_client::OpcClient;
use pixelfx::{Color, Frame};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "localhost:7890")]
    endpoint: String,
    #[arg(short, long, default_value_t = 512)]
    lights: usize,
    #[arg(short, long, default_value_t = 3)]
    delay_secs: u64,
    #[arg(short, long, default_value_t = 2)]
    brightness: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let cli = Cli::parse();
    let client = OpcClient::new(&cli.endpoint);
    let bright = cli.brightness;
    let phases = [
        Frame::new_black(cli.lights),
        Frame::new(cli.lights, Color::rgb(bright, bright.saturating_mul(4), bright)),
        Frame::new(cli.lights, Color::rgb(bright.saturating_mul(3), 0, 0)),
    ];
    let delay = Duration::from_secs(cli.delay_secs);
    info!("Fading {} lights via {}", cli.lights, cli.endpoint);

    for frame in phases.iter().cycle() {
        let _ = client.put_pixels(frame).await;

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    info!("Shutting down");
    client.close().await;
    Ok(())
}
