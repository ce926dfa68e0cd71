//! Realm GraphQL CLI - connection and schema smoke tests.
//!
//! # Usage
//!
//! ```bash
//! # Hit the app's ping webhook (no auth)
//! REALM_APP_ID=myapp-abcde realm-gql ping
//!
//! # Verify auth and the health-check resolver
//! REALM_APP_ID=myapp-abcde realm-gql health
//!
//! # Log in and show the session (user id, device id, expiry)
//! realm-gql token
//!
//! # Query the sample dataset's listingsAndReviews collection
//! realm-gql sample --limit 3
//!
//! # Run a pre-formed mutation
//! realm-gql mutate 'mutation{insertOneListing(data:{name:"casa"}){_id}}'
//! ```
//!
//! Credentials come from the environment (see `realm_graphql::ClientOptions::from_env`);
//! `--app-id` overrides `REALM_APP_ID` and forces anonymous auth.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use realm_graphql::{Client, ClientOptions, Credential, Error, Field, Shape, Variables};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "realm-gql")]
#[command(author, version, about = "Smoke tests for a Realm GraphQL app")]
struct Cli {
    /// Realm application id; overrides REALM_APP_ID and uses anonymous auth
    #[arg(long, global = true)]
    app_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Call the app's ping webhook (no authentication)
    Ping,
    /// Run the health-check query
    Health,
    /// Authenticate and print the session details
    Token,
    /// Query the sample dataset's listingsAndReviews collection
    Sample {
        /// Maximum number of listings to fetch
        #[arg(short, long, default_value_t = 3)]
        limit: i64,
    },
    /// Execute a pre-formed mutation document
    Mutate {
        /// Full document, e.g. mutation{insertOneListing(data:{name:"casa"}){_id}}
        document: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "command failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let cli = Cli::parse();

    let options = match &cli.app_id {
        Some(app_id) => ClientOptions::new(app_id, Credential::Anonymous),
        None => ClientOptions::from_env()?,
    };
    let client = Client::new(options)?;

    // The ping webhook is unauthenticated; everything else logs in first.
    match cli.command {
        Commands::Ping => {
            client.ping().await?;
            println!("ping ok");
            Ok(())
        }
        command => {
            client.connect().await?;
            match command {
                Commands::Ping => Ok(()),
                Commands::Health => health(&client).await,
                Commands::Token => token(&client).await,
                Commands::Sample { limit } => sample(&client, limit).await,
                Commands::Mutate { document } => mutate(&client, &document).await,
            }
        }
    }
}

async fn health(client: &Client) -> Result<(), Error> {
    let response = client.health().await?;
    for error in &response.errors {
        tracing::warn!(message = %error.message, "GraphQL error");
    }
    match response.data {
        Some(health) => {
            println!("status:      {}", health.status);
            println!("id:          {}", health.id);
            println!("description: {}", health.description);
            println!("endpoint:    {}", health.endpoint);
        }
        None => println!("no health document returned"),
    }
    Ok(())
}

async fn token(client: &Client) -> Result<(), Error> {
    // connect() succeeded, so a token is present.
    let Some(token) = client.auth().token().await else {
        return Err(Error::NotConnected);
    };
    println!("expires at: {}", token.expires_at());
    if let Some(user_id) = token.extra("user_id") {
        println!("user id:    {user_id}");
    }
    if let Some(device_id) = token.extra("device_id") {
        println!("device id:  {device_id}");
    }
    Ok(())
}

async fn mutate(client: &Client, document: &str) -> Result<(), Error> {
    let response: realm_graphql::Response<serde_json::Value> =
        client.mutate(document, &Variables::new()).await?;
    for error in &response.errors {
        tracing::warn!(message = %error.message, "GraphQL error");
    }
    if let Some(data) = response.data {
        println!("{}", serde_json::to_string_pretty(&data)?);
    }
    Ok(())
}

async fn sample(client: &Client, limit: i64) -> Result<(), Error> {
    let shape = Shape::object([Field::named(
        "listingsAndReviews(limit: $limit)",
        Shape::object([
            Field::named("_id", Shape::Scalar),
            Field::auto("Name", Shape::Scalar),
            Field::named("listing_url", Shape::Scalar),
        ]),
    )]);
    let variables = Variables::new().with("limit", limit)?;

    let response: realm_graphql::Response<serde_json::Value> =
        client.query(&shape, &variables).await?;
    for error in &response.errors {
        tracing::warn!(message = %error.message, "GraphQL error");
    }
    if let Some(data) = response.data {
        println!("{}", serde_json::to_string_pretty(&data)?);
    }
    Ok(())
}
