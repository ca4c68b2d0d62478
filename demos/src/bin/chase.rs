//! Lights each LED in sequence, and repeats.

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
    #[arg(short, long, default_value_t = 240)]
    lights: usize,
    #[arg(short, long, default_value_t = 50)]
    delay_ms: u64,
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
    let color = Color::gray(40);
    let delay = Duration::from_millis(cli.delay_ms);
    info!("Chasing {} lights via {}", cli.lights, cli.endpoint);

    let mut lit = 0;
    loop {
        let frame = Frame::new_black(cli.lights).with_pixel(lit, color);
        // a dropped frame just skips one step of the chase
        let _ = client.put_pixels(&frame).await;
        lit = (lit + 1) % cli.lights;

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    info!("Shutting down");
    client.close().await;
    Ok(())
}
