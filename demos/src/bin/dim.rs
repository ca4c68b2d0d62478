//! All lights to a constant faint red, resent continuously.

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
    #[arg(short, long, default_value_t = 16)]
    refresh_ms: u64,
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
    let frame = Frame::new(cli.lights, Color::rgb(1, 0, 0));
    let refresh = Duration::from_millis(cli.refresh_ms);
    info!("Holding {} lights dim via {}", cli.lights, cli.endpoint);

    loop {
        let _ = client.put_pixels(&frame).await;

        tokio::select! {
            _ = tokio::time::sleep(refresh) => {}
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    info!("Shutting down");
    client.close().await;
    Ok(())
}
