//! Terminal self-checkout kiosk
//!
//! Reads one command per line (a barcode scanner in keyboard mode works for
//! the barcode argument) and redraws the screen after each.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use self_checkout::{
    config::KioskConfig,
    kiosk::{
        command::{Input, HELP},
        CheckoutBackend, Command, Controller, HttpBackend, KioskError,
    },
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = KioskConfig::load()?;

    // stdout is the kiosk screen
    let _log_guard = telemetry::init_tracing(
        &config.logging,
        format!("self_checkout={}", config.logging.level),
        BoxMakeWriter::new(std::io::stderr),
    );

    let backend = HttpBackend::new(
        &config.server_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    tracing::info!("Kiosk using checkout service at {}", backend.base_url());

    let mut controller = Controller::new(backend);

    println!("Self-checkout. Scan your library card: patron <barcode>");
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = match line.parse::<Input>() {
            Ok(input) => input,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        let command = match input {
            Input::Help => {
                println!("{}", HELP);
                continue;
            }
            Input::Quit => break,
            Input::Command(command) => command,
        };

        let outcome = if command == Command::Checkout {
            checkout(&mut controller).await
        } else {
            controller.dispatch(command).await
        };

        if let Err(alert) = outcome {
            println!("\n*** {} ***", alert);
        }
        println!("\n{}\n", controller.view());
    }

    Ok(())
}

/// Checkout with the in-flight status drawn before waiting on the service
async fn checkout(controller: &mut Controller<HttpBackend>) -> Result<(), KioskError> {
    let request = controller.begin_checkout()?;
    println!("\n{}\n", controller.view());

    let result = controller.backend().checkout(&request).await;
    controller.finish_checkout(result).map(|_| ())
}
