use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use foodtein_client::app::chat_use_case::ChatService;
use foodtein_client::app::ports::ConversationBackend;
use foodtein_client::config::Config;
use foodtein_client::constants::DIETARY_TYPE_OPTIONS;
use foodtein_client::conversation::MessageRole;
use foodtein_client::infra::ReqwestBackend;
use foodtein_client::logging;
use foodtein_client::normalize::{self, normalize_with_window};
use foodtein_client::session::Session;
use foodtein_client::tabular;
use foodtein_client::types::{Assistant, RecordKind};

#[derive(Parser)]
#[command(name = "foodtein")]
#[command(about = "Chat with the Foodtein AI nutritionist and coach")]
#[command(version = "0.1.0")]
struct Cli {
    /// Which assistant to talk to
    #[arg(long, global = true, default_value = "nutritionist")]
    assistant: Assistant,

    /// Session file (defaults to session.path from config)
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    /// Config file (defaults to ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the backend is reachable
    Check,
    /// Fetch and print the conversation
    History,
    /// Send a message with the session's data attached
    Send {
        message: String,
        /// Send the message without attaching tables or profile
        #[arg(long)]
        plain: bool,
    },
    /// Clear the conversation on the backend and locally
    Clear,
    /// Load a CSV upload into the session
    Load { kind: RecordKind, csv: PathBuf },
    /// Fill the session with example tables
    Sample,
    /// Write an example CSV for a table kind
    Template {
        kind: RecordKind,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show what would be sent for a session table
    Preview { kind: RecordKind },
    /// Update or show the profile
    Profile(ProfileArgs),
    /// Normalize a CSV file and print the records as JSON
    Normalize {
        kind: RecordKind,
        csv: PathBuf,
        /// Number of most recent days to keep
        #[arg(long)]
        window: Option<usize>,
    },
}

#[derive(Args)]
struct ProfileArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    age: Option<u32>,
    #[arg(long)]
    gender: Option<String>,
    /// Height in cm
    #[arg(long)]
    height: Option<f64>,
    /// Weight in kg
    #[arg(long)]
    weight: Option<f64>,
    /// Dietary preference; repeat for several
    #[arg(long = "dietary-type")]
    dietary_types: Vec<String>,
    /// e.g. "peanuts:severe:swelling | shellfish:mild"
    #[arg(long)]
    allergies: Option<String>,
    /// e.g. "broccoli:doesn't like texture | mushrooms"
    #[arg(long)]
    disliked: Option<String>,
    /// e.g. "diabetes:chronic:active:insulin"
    #[arg(long)]
    diseases: Option<String>,
    /// e.g. "flu:moderate:recovering"
    #[arg(long)]
    illnesses: Option<String>,
}

impl ProfileArgs {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.height.is_none()
            && self.weight.is_none()
            && self.dietary_types.is_empty()
            && self.allergies.is_none()
            && self.disliked.is_none()
            && self.diseases.is_none()
            && self.illnesses.is_none()
    }

    fn apply(self, session: &mut Session) -> Result<()> {
        let profile = &mut session.profile;
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(age) = self.age {
            profile.age = age;
        }
        if let Some(gender) = self.gender {
            profile.gender = gender;
        }
        if let Some(height) = self.height {
            profile.height = height;
        }
        if let Some(weight) = self.weight {
            profile.weight = weight;
        }
        if !self.dietary_types.is_empty() {
            for choice in &self.dietary_types {
                if !DIETARY_TYPE_OPTIONS.iter().any(|o| o.eq_ignore_ascii_case(choice)) {
                    anyhow::bail!(
                        "Unknown dietary type '{}'. Choose from: {}",
                        choice,
                        DIETARY_TYPE_OPTIONS.join(", ")
                    );
                }
            }
            profile.dietary_types = self.dietary_types;
        }
        if let Some(text) = self.allergies {
            profile.food_allergies = text;
        }
        if let Some(text) = self.disliked {
            profile.disliked_foods = text;
        }
        if let Some(text) = self.diseases {
            profile.diseases = text;
        }
        if let Some(text) = self.illnesses {
            profile.illnesses = text;
        }
        Ok(())
    }
}

fn print_messages(session: &Session) {
    if session.messages.is_empty() {
        println!("💬 No messages yet");
        return;
    }
    for message in &session.messages {
        let who = match message.role {
            MessageRole::User => "🧑 You".to_string(),
            MessageRole::Assistant => format!("🤖 {}", session.assistant),
            MessageRole::Unknown(_) => format!("❔ {}", message.role),
        };
        println!("\n{} [{}]", who, message.display_time());
        println!("{}", message.content);
    }
    println!(
        "\n📊 Tokens: {} in / {} out",
        session.total_input_tokens, session.total_output_tokens
    );
}

fn print_profile(session: &Session) -> Result<()> {
    let profile = &session.profile;
    println!("👤 Profile");
    println!("   Name: {}", profile.name);
    println!("   Age: {}", profile.age);
    println!("   Gender: {}", profile.gender);
    println!("   Height: {} cm", profile.height);
    println!("   Weight: {} kg", profile.weight);
    println!("   Dietary type: {}", profile.dietary_type());
    println!("   Allergies: {}", serde_json::to_string(&profile.food_allergy_entries())?);
    println!("   Disliked foods: {}", serde_json::to_string(&profile.disliked_food_entries())?);
    println!("   Diseases: {}", serde_json::to_string(&profile.disease_entries())?);
    println!("   Illnesses: {}", serde_json::to_string(&profile.illness_entries())?);
    let missing = profile.missing_fields();
    if !missing.is_empty() {
        println!("⚠️  Missing: {}", missing.join(", "));
    }
    Ok(())
}

fn save(session: &Session, path: &Path) -> Result<()> {
    session
        .save(path)
        .with_context(|| format!("saving session to {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let session_path = cli.session.clone().unwrap_or_else(|| config.session.path.clone());
    let window_days = config.session.window_days;
    let assistant = cli.assistant;

    match cli.command {
        Commands::Check => {
            let backend = ReqwestBackend::new(&config.backend, assistant)?;
            let status = backend.check_connection().await;
            if status.is_connected() {
                println!("✅ {}", status);
            } else {
                println!("❌ {}", status);
            }
        }
        Commands::History => {
            let backend = ReqwestBackend::new(&config.backend, assistant)?;
            let mut session = Session::load(&session_path, assistant)?;
            ChatService::new(&backend, &mut session, window_days).refresh().await?;
            print_messages(&session);
            save(&session, &session_path)?;
        }
        Commands::Send { message, plain } => {
            let backend = ReqwestBackend::new(&config.backend, assistant)?;
            let mut session = Session::load(&session_path, assistant)?;
            let mut chat = ChatService::new(&backend, &mut session, window_days);
            let result = if plain {
                chat.send_plain(&message).await
            } else {
                chat.send(&message).await
            };
            if let Err(e) = result {
                error!("Send failed: {}", e);
                println!("❌ {}", e);
                return Ok(());
            }
            if let Some(reply) = session.messages.last() {
                println!("🤖 {}", reply.content);
            }
            println!(
                "📊 Tokens: {} in / {} out",
                session.total_input_tokens, session.total_output_tokens
            );
            save(&session, &session_path)?;
        }
        Commands::Clear => {
            let backend = ReqwestBackend::new(&config.backend, assistant)?;
            let mut session = Session::load(&session_path, assistant)?;
            ChatService::new(&backend, &mut session, window_days).clear().await?;
            save(&session, &session_path)?;
            println!("🗑️  Conversation cleared");
        }
        Commands::Load { kind, csv } => {
            let rows = tabular::load_rows(&csv, kind)?;
            let mut session = Session::load(&session_path, assistant)?;
            let count = rows.len();
            session.set_rows(kind, rows);
            save(&session, &session_path)?;
            println!("✅ Loaded {} {} row(s) from {}", count, kind, csv.display());
        }
        Commands::Sample => {
            let mut session = Session::load(&session_path, assistant)?;
            session.load_samples();
            save(&session, &session_path)?;
            println!("✅ Loaded sample data for the {}", assistant);
        }
        Commands::Template { kind, output } => match output {
            Some(path) => {
                let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
                tabular::write_template(file, kind)?;
                println!("📄 Wrote {} template to {}", kind, path.display());
            }
            None => tabular::write_template(io::stdout().lock(), kind)?,
        },
        Commands::Preview { kind } => {
            let session = Session::load(&session_path, assistant)?;
            let records = normalize::preview(session.rows(kind), kind, window_days);
            if records.is_empty() {
                println!("📭 No {} data in the session", kind);
            } else {
                println!("📋 {} {} record(s):", records.len(), kind);
                for record in &records {
                    println!("{}", serde_json::to_string(record)?);
                }
            }
        }
        Commands::Profile(args) => {
            let mut session = Session::load(&session_path, assistant)?;
            if !args.is_empty() {
                args.apply(&mut session)?;
                save(&session, &session_path)?;
                info!("Profile updated");
            }
            print_profile(&session)?;
        }
        Commands::Normalize { kind, csv, window } => {
            let rows = tabular::load_rows(&csv, kind)?;
            let records = normalize_with_window(&rows, kind, window.unwrap_or(window_days));
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }
    Ok(())
}
