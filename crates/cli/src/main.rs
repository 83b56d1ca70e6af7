//! Falcons Nest CLI - drive the storefront cart from a terminal.
//!
//! The cart is saved in the data directory between runs, the same way the
//! storefront page keeps it between visits.
//!
//! # Usage
//!
//! ```bash
//! # Add a sized item
//! nest-cli add "Falcons Hoodie" 35.00 --size M --image img/hoodie.png
//!
//! # Show the cart with totals
//! nest-cli show
//!
//! # Bump the first line by one, then set the second to 3
//! nest-cli adjust 0 1
//! nest-cli set 1 3
//!
//! # Check out with a student ID
//! nest-cli checkout --first-name Ada --last-name Lovelace \
//!     --email ada@example.com --payment student-id --student-id 123456
//! ```
//!
//! # Commands
//!
//! - `add` / `set` / `adjust` / `remove` / `clear` - Edit the cart
//! - `show` / `count` - Inspect the cart
//! - `checkout` - Validate the order form and place the order

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use falcons_nest_core::PaymentMethod;
use falcons_nest_storefront::StoreConfig;
use falcons_nest_storefront::config::LogFormat;
use falcons_nest_storefront::telemetry::init_tracing;

mod commands;

#[derive(Parser)]
#[command(name = "nest-cli")]
#[command(author, version, about = "Falcons Nest cart tools")]
struct Cli {
    /// Directory holding the saved cart (overrides `NEST_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add {
        /// Product name
        name: String,

        /// Unit price in dollars, e.g. `19.99` or `$19.99`
        price: String,

        /// Size label; omit for unsized items
        #[arg(short, long, default_value = "")]
        size: String,

        /// Product image path
        #[arg(short, long, default_value = "")]
        image: String,

        /// Units to add (1-10)
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a cart line (raw text, as typed in the quantity field)
    Set {
        /// Line position as shown by `show`
        index: usize,

        /// New quantity; clamped to 1-10, unparsable input means 1
        quantity: String,
    },
    /// Step the quantity of a cart line up or down
    Adjust {
        /// Line position as shown by `show`
        index: usize,

        /// Change to apply, e.g. `1` or `-1`
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Remove a cart line
    Remove {
        /// Line position as shown by `show`
        index: usize,
    },
    /// Empty the cart
    Clear,
    /// Show cart contents and totals
    Show {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the badge count (total units)
    Count,
    /// Place the order
    Checkout {
        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        #[arg(long, default_value = "")]
        email: String,

        /// Payment method (`student-id`, `credit-card`, `other`)
        #[arg(long)]
        payment: Option<PaymentMethod>,

        #[arg(long, default_value = "")]
        student_id: String,

        #[arg(long, default_value = "")]
        card_number: String,

        #[arg(long, default_value = "")]
        expiry_date: String,

        #[arg(long, default_value = "")]
        cvv: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, mut config: StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let mut session = commands::open_session(&config).await;

    match cli.command {
        Commands::Add {
            name,
            price,
            size,
            image,
            quantity,
        } => {
            commands::cart::add(&mut session, &name, &price, &size, &image, quantity).await?;
        }
        Commands::Set { index, quantity } => {
            commands::cart::set(&mut session, index, &quantity).await?;
        }
        Commands::Adjust { index, delta } => {
            commands::cart::adjust(&mut session, index, delta).await?;
        }
        Commands::Remove { index } => commands::cart::remove(&mut session, index).await?,
        Commands::Clear => commands::cart::clear(&mut session).await,
        Commands::Show { json } => commands::cart::show(&session, json)?,
        Commands::Count => commands::cart::count(&session),
        Commands::Checkout {
            first_name,
            last_name,
            email,
            payment,
            student_id,
            card_number,
            expiry_date,
            cvv,
        } => {
            let form = commands::checkout::CheckoutForm {
                first_name,
                last_name,
                email,
                payment,
                student_id,
                card_number,
                expiry_date,
                cvv,
            };
            commands::checkout::place_order(&mut session, form).await?;
        }
    }
    Ok(())
}
