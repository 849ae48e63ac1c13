//! Catalog service - command line front end
//!
//! Drives the item, price and user use-cases against the configured
//! database and prints presenter JSON on stdout.
//!
//! ```sh
//! # Run migrations using the default config (~/.config/catalog-service/config.toml)
//! catalog-cli migrate
//!
//! # Create an item with its first price (tax-inclusive amount derived)
//! catalog-cli item create --user-id <UUID> --name Teapot --description "Cast iron" \
//!     --price-without-tax 1000 --tax-rate 10 --currency JPY
//!
//! # Reprice it
//! catalog-cli item update --id <UUID> --name Teapot --description "Cast iron" \
//!     --price-without-tax 1200 --tax-rate 10 --currency JPY
//!
//! # Full price history, newest first
//! catalog-cli price history --item-id <UUID>
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};

use catalog::application::{CreateItemRequest, PriceInput, UpdateItemRequest};
use catalog::config::{AppConfig, CONFIG_ENV};
use catalog::domain::value_objects::Permission;
use catalog::domain::DomainError;
use catalog::presenter::{ItemResponse, PriceResponse, UserResponse};
use catalog::runtime::{init_tracing, AppContext, RuntimeOptions};
use catalog::shared::errors::{AppError, InfraError};

/// Catalog service - items, prices and users from the command line.
#[derive(Parser, Debug)]
#[command(
    name = "catalog-cli",
    version,
    about = "Item catalog with temporally versioned prices",
    long_about = "Catalog service command line front end.\n\n\
                  Default config: ~/.config/catalog-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV, global = true)]
    config: Option<PathBuf>,

    /// Override the database URL.
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Skip database migrations on startup.
    #[arg(long, global = true)]
    no_migrate: bool,

    /// Skip creating the default admin user.
    #[arg(long, global = true)]
    no_admin: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending database migrations and exit.
    Migrate,
    /// Validate the configuration and exit.
    Check,
    /// User accounts.
    #[command(subcommand)]
    User(UserCommand),
    /// Catalog items.
    #[command(subcommand)]
    Item(ItemCommand),
    /// Price history of an item.
    #[command(subcommand)]
    Price(PriceCommand),
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Register a user with role USER.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show one user.
    Show {
        #[arg(long)]
        id: String,
    },
    /// Check a user's credentials and show the account.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[derive(Subcommand, Debug)]
enum ItemCommand {
    /// Create an item, optionally with its first price.
    Create {
        #[arg(long)]
        user_id: String,
        #[command(flatten)]
        fields: ItemFields,
        #[command(flatten)]
        price: PriceArgs,
    },
    /// Replace an item's fields, optionally repricing it.
    Update {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: ItemFields,
        #[command(flatten)]
        price: PriceArgs,
    },
    /// Show an item with its current price.
    Show {
        #[arg(long)]
        id: String,
    },
    /// List all items.
    List,
    /// Delete an item. Its price history is kept. Requires an administrator.
    Delete {
        #[arg(long)]
        id: String,
        /// Id of the administrator performing the deletion.
        #[arg(long)]
        actor: String,
    },
}

#[derive(Subcommand, Debug)]
enum PriceCommand {
    /// Every price window, newest first.
    History {
        #[arg(long)]
        item_id: String,
    },
    /// The price in effect now.
    Current {
        #[arg(long)]
        item_id: String,
    },
}

#[derive(Args, Debug)]
struct ItemFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: String,
    /// Whether the item is in stock.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    stock: bool,
}

/// New price. Either all of it or none of it.
#[derive(Args, Debug)]
struct PriceArgs {
    /// Tax-exclusive amount in the smallest currency unit.
    #[arg(long, requires_all = ["tax_rate", "currency"])]
    price_without_tax: Option<i64>,
    /// Tax-inclusive amount. Derived from the tax rate when omitted.
    #[arg(long, requires = "price_without_tax")]
    price_with_tax: Option<i64>,
    /// Tax rate in percent.
    #[arg(long, requires = "price_without_tax")]
    tax_rate: Option<f64>,
    /// ISO 4217 code.
    #[arg(long, requires = "price_without_tax")]
    currency: Option<String>,
}

impl PriceArgs {
    fn into_input(self) -> Option<PriceInput> {
        match (self.price_without_tax, self.tax_rate, self.currency) {
            (Some(price_without_tax), Some(tax_rate), Some(currency)) => Some(PriceInput {
                price_with_tax: self.price_with_tax,
                price_without_tax,
                tax_rate,
                currency,
            }),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(catalog::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .with_writer(std::io::stderr)
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    // ── Apply env and CLI overrides ────────────────────────────
    config.apply_env_overrides();
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref url) = cli.database_url {
        config.database.url = url.clone();
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    match run(cli, config, &config_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

async fn run(cli: Cli, config: AppConfig, config_path: &std::path::Path) -> Result<(), AppError> {
    if let Command::Check = cli.command {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   Log format  : {}", config.logging.format);
        return Ok(());
    }

    let migrate_only = matches!(cli.command, Command::Migrate);
    let ctx = AppContext::start(RuntimeOptions {
        config,
        auto_migrate: migrate_only || !cli.no_migrate,
        create_default_admin: !migrate_only && !cli.no_admin,
    })
    .await?;

    let result = dispatch(&ctx, cli.command).await;
    ctx.close().await;
    result
}

async fn dispatch(ctx: &AppContext, command: Command) -> Result<(), AppError> {
    match command {
        Command::Migrate => {
            println!("Migrations applied");
            Ok(())
        }
        Command::Check => Ok(()),

        Command::User(UserCommand::Signup {
            name,
            email,
            password,
        }) => {
            let user = ctx.users.sign_up(&name, &email, &password).await?;
            print_json(&UserResponse::from(user))
        }
        Command::User(UserCommand::Show { id }) => {
            let user = ctx.users.get_user(&id).await?;
            print_json(&UserResponse::from(user))
        }
        Command::User(UserCommand::Login { email, password }) => {
            let user = ctx.users.authenticate(&email, &password).await?;
            print_json(&UserResponse::from(user))
        }

        Command::Item(ItemCommand::Create {
            user_id,
            fields,
            price,
        }) => {
            let details = ctx
                .items
                .create_item(CreateItemRequest {
                    user_id,
                    item_name: fields.name,
                    stock: fields.stock,
                    description: fields.description,
                    price: price.into_input(),
                })
                .await?;
            print_json(&ItemResponse::from(details))
        }
        Command::Item(ItemCommand::Update { id, fields, price }) => {
            let details = ctx
                .items
                .update_item(UpdateItemRequest {
                    item_id: id,
                    item_name: fields.name,
                    stock: fields.stock,
                    description: fields.description,
                    price: price.into_input(),
                })
                .await?;
            print_json(&ItemResponse::from(details))
        }
        Command::Item(ItemCommand::Show { id }) => {
            let details = ctx.items.item_details(&id).await?;
            print_json(&ItemResponse::from(details))
        }
        Command::Item(ItemCommand::List) => {
            let items: Vec<ItemResponse> = ctx
                .items
                .list_items()
                .await?
                .iter()
                .map(ItemResponse::from)
                .collect();
            print_json(&items)
        }
        Command::Item(ItemCommand::Delete { id, actor }) => {
            ctx.users.authorize(&actor, Permission::Admin).await?;
            ctx.items.delete_item(&id).await?;
            println!("Item {} deleted", id);
            Ok(())
        }

        Command::Price(PriceCommand::History { item_id }) => {
            let prices: Vec<PriceResponse> = ctx
                .items
                .price_history(&item_id)
                .await?
                .iter()
                .map(PriceResponse::from)
                .collect();
            print_json(&prices)
        }
        Command::Price(PriceCommand::Current { item_id }) => {
            let current = ctx
                .items
                .current_price(&item_id)
                .await?
                .map(PriceResponse::from);
            print_json(&current)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let out = serde_json::to_string_pretty(value).map_err(InfraError::from)?;
    println!("{}", out);
    Ok(())
}

/// Process exit status per error class.
fn exit_code(e: &AppError) -> u8 {
    match e {
        AppError::Domain(DomainError::Validation(_)) => 2,
        AppError::Domain(DomainError::NotFound { .. }) => 3,
        AppError::Domain(DomainError::Conflict(_)) | AppError::Domain(DomainError::NoActivePrice(_)) => 4,
        AppError::Domain(DomainError::Unauthorized(_)) | AppError::Domain(DomainError::Forbidden(_)) => 5,
        _ => 1,
    }
}
