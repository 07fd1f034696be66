mod errors;
mod kubectl;
mod watch;

use errors::Error;
use kubectl::Kubectl;
use watch::EventWatcher;

use clap::Parser;
use clap::Subcommand;
use std::io;

#[derive(Parser)]
#[command(name = "queryctl")]
#[command(about = "Operate query resources on a cluster through kubectl")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one resource and print it as JSON. The name @latest picks
    /// the most recently created resource of the kind.
    Get { kind: String, name: String },

    /// List resources of a kind, one name per line.
    List {
        kind: String,

        /// Server-side sort field, e.g. .metadata.creationTimestamp
        #[arg(long)]
        sort_by: Option<String>,
    },

    /// Delete one resource, or every resource of a kind with --all.
    Delete {
        kind: String,

        #[arg(required_unless_present = "all")]
        name: Option<String>,

        #[arg(long)]
        all: bool,
    },

    /// Stream events for a query until its Completed condition settles.
    Watch { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let cli = Cli::parse();
    let kubectl = Kubectl::new();

    match cli.command {
        Commands::Get { kind, name } => {
            let obj = kubectl.get(&kind, &name).await?;
            println!("{}", serde_json::to_string_pretty(&obj)?);
        }
        Commands::List { kind, sort_by } => {
            for obj in kubectl.list(&kind, sort_by.as_deref()).await? {
                let name = match &obj.metadata.name {
                    Some(name) => name,
                    None => continue,
                };
                match &obj.metadata.creation_timestamp {
                    Some(created) => println!("{}\t{}", name, created.0.to_rfc3339()),
                    None => println!("{}", name),
                }
            }
        }
        Commands::Delete { kind, name, all } => {
            kubectl.delete(&kind, name.as_deref(), all).await?;
            log::info!("deleted {} {}", kind, name.as_deref().unwrap_or("--all"));
        }
        Commands::Watch { name } => {
            log::info!("watching events for query {}", name);
            EventWatcher::new(kubectl).watch(&name, io::stdout()).await;
        }
    }

    Ok(())
}
