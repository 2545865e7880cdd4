//! AirLock - renter-side client for NFC key-box access
//!
//! Usage:
//!   airlock resolve [--address ADDR] [--port PORT]
//!   airlock status [--address ADDR] [--port PORT]
//!   airlock unlock [--address ADDR] [--port PORT]
//!   airlock window --check-in T --check-out T [--leeway-hours H]
//!   airlock countdown --check-in T
//!   airlock scan --check-in T --check-out T [--address ADDR] [--port PORT]
//!
//! Timestamps are RFC 3339, e.g. 2026-08-26T15:00:00Z. `scan` runs the full
//! guarded flow: gate check, simulated tag tap (press Enter), open command.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use airlock_core::{Booking, BookingStatus, SCAN_LEEWAY_HOURS, classify_bookings};
use airlock_device::LockClient;
use airlock_scan::{NfcError, NfcReader, SUCCESS_LINGER, ScanSession, ScanState, Tag};

#[derive(Parser)]
#[command(name = "airlock")]
#[command(about = "NFC key-box access client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DeviceArgs {
    /// Controller address; defaults to AIRLOCK_DEVICE_ADDR or the built-in
    /// default
    #[arg(long)]
    address: Option<String>,
    /// Controller port
    #[arg(long)]
    port: Option<u16>,
}

impl DeviceArgs {
    fn base_url(&self) -> String {
        let device = self.address.clone().map(|address| airlock_core::DeviceAddress {
            address,
            port: self.port,
        });
        airlock_device::base_url(device.as_ref(), &airlock_device::default_address())
    }
}

#[derive(Args)]
struct StayArgs {
    /// Stay check-in (RFC 3339)
    #[arg(long)]
    check_in: DateTime<Utc>,
    /// Stay check-out (RFC 3339)
    #[arg(long)]
    check_out: DateTime<Utc>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved controller base URL
    Resolve {
        #[command(flatten)]
        device: DeviceArgs,
    },
    /// Query controller health
    Status {
        #[command(flatten)]
        device: DeviceArgs,
    },
    /// Send the open command directly, without a gate check
    Unlock {
        #[command(flatten)]
        device: DeviceArgs,
    },
    /// Check whether the scan window is open for a stay
    Window {
        #[command(flatten)]
        stay: StayArgs,
        /// Hours before check-in during which pre-scanning is allowed
        #[arg(long, default_value_t = SCAN_LEEWAY_HOURS)]
        leeway_hours: i64,
    },
    /// Live countdown to check-in, ticking once per second
    Countdown {
        /// Stay check-in (RFC 3339)
        #[arg(long)]
        check_in: DateTime<Utc>,
    },
    /// Full guarded unlock flow for a stay
    Scan {
        #[command(flatten)]
        stay: StayArgs,
        #[command(flatten)]
        device: DeviceArgs,
    },
}

/// Stand-in for the phone's NFC radio: Enter simulates the tag tap, EOF
/// counts as the renter backing out.
struct ConsoleReader;

impl NfcReader for ConsoleReader {
    async fn read_tag(&mut self) -> Result<Tag, NfcError> {
        use tokio::io::AsyncBufReadExt;

        println!("Hold your phone near the key box (press Enter to simulate the tag tap)...");
        let mut line = String::new();
        let mut stdin = tokio::io::BufReader::new(tokio::io::stdin());
        match stdin.read_line(&mut line).await {
            Ok(0) => Err(NfcError::Cancelled),
            Ok(_) => Ok(Tag { id: None }),
            Err(e) => Err(NfcError::Read(e.to_string())),
        }
    }

    async fn release(&mut self) {}
}

fn stay_booking(stay: &StayArgs) -> Booking {
    Booking {
        id: uuid::Uuid::new_v4(),
        renter_id: uuid::Uuid::new_v4(),
        property_id: uuid::Uuid::new_v4(),
        check_in: stay.check_in,
        check_out: stay.check_out,
        status: BookingStatus::Confirmed,
    }
}

#[tokio::main]
async fn main() {
    let cli: Cli = clap::Parser::parse();

    match cli.command {
        Commands::Resolve { device } => {
            println!("{}", device.base_url());
        }
        Commands::Status { device } => {
            let client = LockClient::new();
            match client.status(&device.base_url()).await {
                Ok(status) => println!("{}", serde_json::to_string_pretty(&status).unwrap()),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Unlock { device } => {
            let client = LockClient::new();
            match client.open(&device.base_url()).await {
                Ok(reply) => println!("{}", reply.message_or("Lock opened successfully")),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Window { stay, leeway_hours } => {
            let now = Utc::now();
            if stay.check_out <= stay.check_in {
                eprintln!("check-out must be after check-in");
                std::process::exit(1);
            }
            let bookings = vec![stay_booking(&stay)];
            let (active, upcoming) = classify_bookings(&bookings, now);
            if airlock_core::scan_window_open(active, upcoming, now, leeway_hours) {
                println!("Scan window is open");
            } else if let Some(b) = upcoming {
                println!(
                    "Scan window is closed; check-in in {}",
                    airlock_core::countdown(b.check_in, now)
                );
            } else {
                println!("Scan window is closed; the stay is over");
            }
        }
        Commands::Countdown { check_in } => {
            let mut ticker = tokio::time::interval(std::time::Duration::from_secs(1));
            loop {
                ticker.tick().await;
                let text = airlock_core::countdown(check_in, Utc::now());
                println!("Check-in in {text}");
                if text == "Starting now" {
                    break;
                }
            }
        }
        Commands::Scan { stay, device } => {
            let now = Utc::now();
            let bookings = vec![stay_booking(&stay)];
            let (active, upcoming) = classify_bookings(&bookings, now);
            if !airlock_core::scan_window_open(active, upcoming, now, SCAN_LEEWAY_HOURS) {
                match upcoming {
                    Some(b) => eprintln!(
                        "Scanning is not available yet; check-in in {}",
                        airlock_core::countdown(b.check_in, now)
                    ),
                    None => eprintln!("Scanning is not available; no current stay"),
                }
                std::process::exit(1);
            }

            let mut session =
                ScanSession::new(ConsoleReader, LockClient::new(), device.base_url());
            match session.attempt().await {
                Ok(ScanState::Success { message }) => {
                    println!("{message}");
                    tokio::time::sleep(SUCCESS_LINGER).await;
                    println!("You can now access the keys from the key box");
                }
                Ok(ScanState::Error { message }) => {
                    eprintln!("{message}");
                    std::process::exit(1);
                }
                Ok(_) => {
                    // Cancelled read: back to ready with nothing to report.
                }
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
