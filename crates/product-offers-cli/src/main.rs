use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use product_offers_client::prelude::*;
use product_offers_stub::prelude::{fixtures, DefaultCollector, ScenarioBuilder, StubServer};

#[derive(Parser, Debug)]
#[command(name = "product-offers", version, about = "Query and update the product offers API")]
struct Cli {
    /// TOML configuration file (defaults to ./product-offers.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// GraphQL endpoint, overriding the configuration
    #[arg(long, global = true)]
    endpoint: Option<String>,
    /// Request timeout in milliseconds, overriding the configuration
    #[arg(long, global = true)]
    timeout_ms: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a product
    CreateProduct {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        inventory: String,
        #[arg(long = "type", default_value = "gadget")]
        product_type: String,
    },
    /// List the products available in the north-west region
    FindProducts {
        #[arg(long = "type", default_value = "gadget")]
        product_type: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        page_size: String,
    },
    /// List the offers valid on a date
    FindOffers {
        #[arg(long, default_value = "")]
        date: String,
    },
    /// Offers for a date and available products in one request
    FindOffersAndProducts {
        #[arg(long, default_value = "")]
        date: String,
        #[arg(long = "type", default_value = "gadget")]
        product_type: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        page_size: String,
    },
    /// Serve the canned examples until interrupted
    Stub {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(endpoint) = &cli.endpoint {
        config = config.with_endpoint(endpoint)?;
    }
    if let Some(timeout_ms) = &cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms)?;
    }
    Ok(config)
}

fn init_logging(config: &ClientConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Submit a filled form once, print its view and what it notified
async fn run_form<K: FormKind>(
    mut form: FormController<K>,
    transport: &ReqwestTransport,
) -> ExitCode {
    let notifications = NotificationCenter::new();
    let result = form.submit(transport, &notifications).await;

    print!("{}", form.view());
    for notification in notifications.history() {
        eprintln!("{notification}");
    }

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(SubmitError::Failed { source, .. }) => {
            tracing::error!(error = %source, "{} failed", K::OPERATION);
            ExitCode::FAILURE
        }
        Err(SubmitError::Invalid(_)) => ExitCode::from(2),
    }
}

async fn serve_stub(host: IpAddr, port: u16) -> Result<()> {
    let running = ScenarioBuilder::new()
        .server(StubServer::bind((host, port)))
        .collector(DefaultCollector::new())
        .operations(fixtures::product_offers())
        .start()
        .await
        .context("failed to start the stub")?;

    tracing::info!(url = %running.url(), "stub serving canned examples");
    println!("{}", running.url());

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;

    let requests = running.stop().await?;
    tracing::info!(requests = requests.len(), "stub stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config);

    let transport = ReqwestTransport::from_config(&config)?;

    let code = match cli.command {
        Command::CreateProduct {
            name,
            inventory,
            product_type,
        } => {
            let mut form = CreateProductForm::new();
            form.set_field(fields::NAME, name);
            form.set_field(fields::INVENTORY, inventory);
            form.set_field(fields::TYPE, product_type);
            run_form(form, &transport).await
        }
        Command::FindProducts {
            product_type,
            page_size,
        } => {
            let mut form = FindAvailableProductsForm::new();
            form.set_field(fields::TYPE, product_type);
            form.set_field(fields::PAGE_SIZE, page_size);
            run_form(form, &transport).await
        }
        Command::FindOffers { date } => {
            let mut form = FindOffersForDateForm::new();
            form.set_field(fields::DATE, date);
            run_form(form, &transport).await
        }
        Command::FindOffersAndProducts {
            date,
            product_type,
            page_size,
        } => {
            let mut form = FindOffersAndProductsForm::new();
            form.set_field(fields::DATE, date);
            form.set_field(fields::TYPE, product_type);
            form.set_field(fields::PAGE_SIZE, page_size);
            run_form(form, &transport).await
        }
        Command::Stub { host, port } => {
            serve_stub(host, port).await?;
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}
