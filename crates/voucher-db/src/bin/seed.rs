//! # Seed Data Generator
//!
//! Populates a voucher database for trying out the UI.
//!
//! ## Usage
//! ```bash
//! # Create 20 vouchers in ./database.sqlite (default)
//! cargo run -p voucher-db --bin seed
//!
//! # Create 200, redeeming every third one
//! cargo run -p voucher-db --bin seed -- --count 200 --redeemed-every 3
//!
//! # Specify database path
//! cargo run -p voucher-db --bin seed -- --db ./data/vouchers.sqlite
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use voucher_core::{RedeemOutcome, VoucherCode};
use voucher_db::{Database, DbConfig};

/// Fill a voucher database with generated codes.
#[derive(Parser, Debug)]
#[command(name = "seed", about)]
struct Args {
    /// Number of vouchers to create
    #[arg(short, long, default_value_t = 20)]
    count: u32,

    /// Database file
    #[arg(long, default_value = "database.sqlite")]
    db: PathBuf,

    /// Redeem every K-th voucher (0 disables)
    #[arg(long, default_value_t = 0)]
    redeemed_every: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let args = Args::parse();

    let db = Database::new(DbConfig::new(&args.db))
        .await
        .with_context(|| format!("failed to open {}", args.db.display()))?;
    let vouchers = db.vouchers();

    let mut redeemed = 0u32;
    for i in 1..=args.count {
        let code = VoucherCode::generate();
        vouchers.create(code.as_str()).await?;

        if args.redeemed_every > 0 && i % args.redeemed_every == 0 {
            if vouchers.redeem(code.as_str()).await? == RedeemOutcome::Success {
                redeemed += 1;
            }
        }
    }

    info!(
        created = args.count,
        redeemed,
        total = vouchers.count().await?,
        "Seeding complete"
    );

    db.close().await;
    Ok(())
}
