use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use survey_editor::{
    util, AppStateStore, Config, Database, EditorRuntime, Intent, SavedSurveyStore, SurveyStore,
};

#[derive(Parser)]
#[command(name = "survey-editor", version, about = "Survey document editor")]
struct Cli {
    /// Data directory (default: ~/.survey-editor)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List saved surveys
    List,
    /// Print a saved survey as JSON
    Show {
        title: String,
    },
    /// Apply intents from a JSON-lines file and print the resulting survey
    Replay {
        file: PathBuf,
        /// Save the result under this title
        #[arg(long)]
        save: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir);

    // Initialize logging to file (~/.survey-editor/logs/survey-editor.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let config = Config::load();
    let db = Database::open_default().context("Failed to open survey database")?;
    let storage = AppStateStore::new(db.connection());

    match cli.command {
        Command::List => {
            let saved = SavedSurveyStore::new(Box::new(storage), config.storage_key.clone());
            for entry in saved.list()? {
                let blocks = entry.survey().map(|s| s.blocks.len()).unwrap_or(0);
                println!(
                    "{}\t{}\t{} blocks",
                    entry.title,
                    entry.created_at.to_rfc3339(),
                    blocks
                );
            }
        }
        Command::Show { title } => {
            let saved = SavedSurveyStore::new(Box::new(storage), config.storage_key.clone());
            let Some(entry) = saved.find(&title)? else {
                bail!("No saved survey titled {title:?}");
            };
            println!("{}", serde_json::to_string_pretty(&entry.data)?);
        }
        Command::Replay { file, save } => {
            let intents = read_intents(&file)?;
            let store = SurveyStore::new(config, Box::new(storage))?;
            let store = replay(store, intents, save).await?;
            println!("{}", serde_json::to_string_pretty(&store.survey_json())?);
        }
    }

    Ok(())
}

fn read_intents(path: &Path) -> Result<Vec<Intent>> {
    let file =
        fs::File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut intents = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let intent = serde_json::from_str(line)
            .with_context(|| format!("Invalid intent on line {}", index + 1))?;
        intents.push(intent);
    }
    Ok(intents)
}

async fn replay(
    store: SurveyStore,
    intents: Vec<Intent>,
    save: Option<String>,
) -> Result<SurveyStore> {
    let (mut runtime, handle) = EditorRuntime::new(store);

    // Report each alert once on stderr
    let last_reported = AtomicU64::new(0);
    runtime.store_mut().subscribe(move |state| {
        let alert = &state.alert;
        if alert.visible
            && last_reported.swap(alert.generation, Ordering::Relaxed) != alert.generation
        {
            eprintln!("[{}] {}", alert.level, alert.message);
        }
    });

    let task = tokio::spawn(runtime.run());

    handle.dispatch(Intent::Load);
    for intent in intents {
        handle.dispatch(intent);
    }
    if let Some(title) = save {
        handle.dispatch(Intent::SaveSurvey { title });
    }
    handle.shutdown();

    task.await.context("Editor runtime failed")
}
