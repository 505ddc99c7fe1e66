use clap::{Parser, Subcommand};
use colored::Colorize;
use pharmadesk_cli::commands::crud::CrudAction;
use pharmadesk_cli::commands::{
    alerts, crud, dashboard, form_from_fields, invoicing, login, parse_field, Resource,
};
use pharmadesk_cli::CommandError;
use pharmadesk_client::{ApiClient, ApiConfig, DEFAULT_TOP_SELLING};
use pharmadesk_core::{try_init_tracing, ConfigProperties, DeskConfig, LogSettings};
use pharmadesk_data::{EntityId, Timeframe};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "pharmadesk", version, about = "Pharmacy back-office client")]
struct Cli {
    /// Configuration profile, selects application-{profile}.yaml
    #[arg(long, global = true, default_value = "dev")]
    profile: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and print the bearer token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// List every record of a resource
    List { resource: Resource },
    /// Fetch one record
    Get { resource: Resource, id: EntityId },
    /// Create a record from --field key=value pairs
    Create {
        resource: Resource,
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Patch a record; only the given fields are sent
    Update {
        resource: Resource,
        id: EntityId,
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Delete a record
    Delete { resource: Resource, id: EntityId },
    /// Mark an alert as resolved
    ResolveAlert { id: EntityId },
    /// Check whether a client has the fiscal data needed for invoicing
    Invoicing { id: EntityId },
    /// Print the dashboard statistics
    Dashboard {
        /// 7d or 30d
        #[arg(long, default_value = "7d")]
        timeframe: Timeframe,
        /// Size of the best-sellers list
        #[arg(long, default_value_t = DEFAULT_TOP_SELLING)]
        top: u32,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{text}"),
            Err(e) => fail(&CommandError::from(e)),
        },
        Err(e) => fail(&e),
    }
}

fn fail(error: &CommandError) -> ! {
    eprintln!("{}", format!("Error: {error}").red());
    std::process::exit(1);
}

async fn run(cli: Cli) -> Result<Value, CommandError> {
    let config = DeskConfig::load(&cli.profile)?;

    let mut log = LogSettings::from_config(&config)?;
    if !config.contains_key("pharmadesk.log.filter") {
        log.filter = "warn".to_string();
    }
    let _ = try_init_tracing(&log);

    let config = config.with_typed::<ApiConfig>()?;
    let api = ApiClient::from_config(config.typed())?;

    match cli.command {
        Commands::Login { username, password } => login::run(&api, &username, &password).await,
        Commands::List { resource } => crud::run(&api, resource, CrudAction::List).await,
        Commands::Get { resource, id } => crud::run(&api, resource, CrudAction::Get(id)).await,
        Commands::Create { resource, fields } => {
            let form = form_from_fields(&fields);
            crud::run(&api, resource, CrudAction::Create(form)).await
        }
        Commands::Update {
            resource,
            id,
            fields,
        } => {
            let form = form_from_fields(&fields);
            crud::run(&api, resource, CrudAction::Update(id, form)).await
        }
        Commands::Delete { resource, id } => {
            crud::run(&api, resource, CrudAction::Delete(id)).await
        }
        Commands::ResolveAlert { id } => alerts::resolve(&api, id).await,
        Commands::Invoicing { id } => invoicing::run(&api, id).await,
        Commands::Dashboard { timeframe, top } => dashboard::run(&api, timeframe, top).await,
    }
}
