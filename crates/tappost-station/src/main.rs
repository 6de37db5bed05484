//! Badge station emulator.
//!
//! Runs the full firmware loop against mock peripherals and the real HTTP
//! backend. Peripherals are driven from an interactive console on stdin:
//!
//! ```text
//! card AA:BB:CC:DD        tap a card on the reader
//! press fetch [ms]        press the fetch/mode button for ms (default 200)
//! press clear [ms]        press the clear button for ms (default 200)
//! screen                  print the last rendered frame
//! quit                    exit the emulator
//! ```

use anyhow::Context;
use std::time::Duration;
use tappost_api::{
    BackendConfig, HttpBackend, MockProvisioner, NetworkLink, ProvisionConfig,
};
use tappost_hardware::{
    AnyButton, AnyBuzzer, AnyCardReader, AnyDisplay,
    mock::{
        MockButton, MockButtonHandle, MockBuzzer, MockCardReader, MockCardReaderHandle,
        MockDisplay, MockDisplayHandle,
    },
};
use tappost_station::{BootError, Peripherals, RESTART_EXIT_CODE, Station, StationConfig, boot};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = StationConfig::from_env().context("loading station configuration")?;

    let (reader, reader_handle) = MockCardReader::new();
    let (fetch_button, fetch_handle) = MockButton::new();
    let (clear_button, clear_handle) = MockButton::new();
    let (buzzer, _buzzer_handle) = MockBuzzer::new();
    let (display, display_handle) = MockDisplay::new();

    let link = NetworkLink::new();
    let backend = HttpBackend::new(
        BackendConfig::new(&config.api_url, &config.api_key, &config.device_id),
        link.clone(),
    )
    .context("building backend client")?;

    let peripherals = Peripherals {
        reader: AnyCardReader::Mock(reader),
        fetch_button: AnyButton::Mock(fetch_button),
        clear_button: AnyButton::Mock(clear_button),
        buzzer: AnyBuzzer::Mock(buzzer),
        display: AnyDisplay::Mock(display),
    };

    let mut station = Station::new(config, peripherals, backend);
    let mut provisioner = MockProvisioner::new(ProvisionConfig::default(), link.clone());

    match station.bootstrap(&mut provisioner, &link).await {
        Ok(()) => {}
        Err(BootError::Hardware(hw_error)) => {
            error!(error = %hw_error, "hardware initialization failed");
            boot::park_forever().await;
        }
        Err(BootError::RestartRequired) => {
            info!("restart requested, exiting for supervisor");
            std::process::exit(RESTART_EXIT_CODE);
        }
    }

    tokio::spawn(run_console(
        reader_handle,
        fetch_handle,
        clear_handle,
        display_handle,
    ));

    info!("emulator console ready, type 'card <uid>' to tap a card");
    station.run().await?;
    Ok(())
}

/// Read console commands from stdin and drive the mock peripherals.
async fn run_console(
    reader: MockCardReaderHandle,
    fetch: MockButtonHandle,
    clear: MockButtonHandle,
    display: MockDisplayHandle,
) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["card", uid] => match uid.parse() {
                Ok(uid) => {
                    if reader.present(uid).await.is_err() {
                        warn!("card reader gone, console stopping");
                        return;
                    }
                }
                Err(parse_error) => warn!(%parse_error, "not a valid UID"),
            },
            ["press", button, rest @ ..] => {
                let handle = match *button {
                    "fetch" => &fetch,
                    "clear" => &clear,
                    other => {
                        warn!(button = other, "unknown button");
                        continue;
                    }
                };
                let hold_ms = rest
                    .first()
                    .and_then(|ms| ms.parse().ok())
                    .unwrap_or(200u64);

                handle.press();
                tokio::time::sleep(Duration::from_millis(hold_ms)).await;
                handle.release();
            }
            ["screen"] => match display.last_frame() {
                Some(frame) => {
                    println!("+----------------------+");
                    for (size, text) in &frame.lines {
                        println!("| {} {text}", if *size > 1 { "#" } else { " " });
                    }
                    println!("+----------------------+");
                }
                None => println!("(no frame rendered yet)"),
            },
            ["quit"] | ["exit"] => {
                info!("console quit");
                std::process::exit(0);
            }
            [] => {}
            other => warn!(input = ?other, "unknown command"),
        }
    }
}
