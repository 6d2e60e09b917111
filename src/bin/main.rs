use anyhow::Error;
use medevents::{endpoints, ApiClient, MemoryStore};
use std::sync::Arc;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "Poke the MedEvents API from the command line")]
struct Args {
    /// The API origin, including the /api prefix.
    #[structopt(
        long,
        env = "MEDEVENTS_BASE_URL",
        default_value = "http://localhost:5000/api"
    )]
    base_url: String,
    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Log in and print the returned profile.
    Login { email: String, password: String },
    /// List events, optionally filtered by status.
    Events {
        #[structopt(long)]
        status: Option<String>,
    },
    /// List courses.
    Courses,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::from_args();

    let store = Arc::new(MemoryStore::new());
    let client = ApiClient::new(&args.base_url, store)?;

    match args.cmd {
        Command::Login { email, password } => {
            let session =
                endpoints::auth::login(&client, &email, &password).await?;
            println!("{}", serde_json::to_string_pretty(&session.user)?);
        },
        Command::Events { status } => {
            let filters: Vec<(&str, String)> = status
                .map(|status| vec![("status", status)])
                .unwrap_or_default();
            let events =
                endpoints::events::list_events(&client, &filters).await?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        },
        Command::Courses => {
            let courses = endpoints::courses::list_courses(&client).await?;
            println!("{}", serde_json::to_string_pretty(&courses)?);
        },
    }

    Ok(())
}
