//! Surveyor CLI - menu-driven survey manager over a SQLite store

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use surveyor::config::{self, SurveyorConfig};
use surveyor::storage::SurveyStore;
use surveyor::ui::{self, Icons};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "surveyor")]
#[command(version)]
#[command(about = "Command-line survey manager - define surveys, collect responses, tally results")]
#[command(long_about = r#"
Surveyor keeps surveys, their questions and answer choices, and recorded
responses in a single SQLite database, enabling:
  • Interactive survey creation and response collection
  • Aggregate tally reports per answer choice
  • Scriptable subcommands for each step

Example usage:
  surveyor create
  surveyor run
  surveyor report --format json

Run without a subcommand for the interactive menu.
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (overrides surveyor.toml)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a surveyor.toml and create the database
    Init {
        /// Overwrite an existing surveyor.toml
        #[arg(short, long)]
        force: bool,
    },

    /// Create a survey interactively (questions, then answer choices)
    Create,

    /// Run a survey and record the respondent's choices
    Run,

    /// List all surveys
    List,

    /// Print the aggregate response report
    Report {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show row counts for the survey database
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let database = resolve_database(cli.database.as_deref())?;
    config::ensure_db_dir(&database)?;
    let store = SurveyStore::open(&database)?;
    tracing::debug!("opened database {:?}", database);

    match cli.command {
        None => menu_loop(&store)?,
        Some(Commands::Init { force }) => run_init(&database, force)?,
        Some(Commands::Create) => run_create(&store)?,
        Some(Commands::Run) => run_collect(&store)?,
        Some(Commands::List) => run_list(&store)?,
        Some(Commands::Report { format }) => run_report(&store, &format)?,
        Some(Commands::Stats) => run_stats(&store, &database)?,
    }

    Ok(())
}

/// Database path precedence: CLI flag, then surveyor.toml, then the default.
fn resolve_database(flag: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }

    if let Some(config) = config::load_config(None)? {
        if let Some(database) = config.database {
            return Ok(PathBuf::from(database));
        }
    }

    Ok(PathBuf::from(config::DEFAULT_DATABASE))
}

/// The four-choice interactive menu. A failed flow aborts back to the menu;
/// only a dead input stream ends the loop early.
fn menu_loop(store: &SurveyStore) -> anyhow::Result<()> {
    loop {
        println!();
        ui::header("Survey Software");
        println!("1. Create a survey");
        println!("2. Run a survey");
        println!("3. Generate report");
        println!("4. Exit");

        let choice = prompt("Enter your choice")?;
        let result = match choice.as_str() {
            "1" => run_create(store),
            "2" => run_collect(store),
            "3" => run_report(store, "text"),
            "4" => break,
            _ => {
                ui::warn("Invalid choice");
                continue;
            }
        };

        if let Err(err) = result {
            ui::error(&format!("{err:#}"));
        }
    }

    Ok(())
}

fn run_init(database: &Path, force: bool) -> anyhow::Result<()> {
    let config_path = config::default_config_path();
    let config = SurveyorConfig {
        database: Some(database.display().to_string()),
    };
    config::write_config(&config_path, &config, force)?;

    ui::status(Icons::DATABASE, "Database", &database.display().to_string());
    ui::success(&format!("Wrote {}", config_path.display()));
    Ok(())
}

fn run_create(store: &SurveyStore) -> anyhow::Result<()> {
    let name = prompt("Enter the survey name")?;
    let survey_id = store.create_survey(&name)?;
    tracing::debug!(survey_id, "created survey");

    loop {
        let question = prompt("Enter a question (or 'done' to finish)")?;
        if question.eq_ignore_ascii_case("done") {
            break;
        }
        let question_id = store.add_question(survey_id, &question)?;

        loop {
            let answer = prompt("Enter an answer choice (or 'done' to finish)")?;
            if answer.eq_ignore_ascii_case("done") {
                break;
            }
            store.add_answer_choice(question_id, &answer)?;
        }
    }

    ui::success(&format!("Survey '{}' saved with id {}", name, survey_id));
    Ok(())
}

fn run_collect(store: &SurveyStore) -> anyhow::Result<()> {
    let surveys = store.list_surveys()?;
    if surveys.is_empty() {
        ui::warn("No surveys available. Please create a survey first.");
        return Ok(());
    }

    ui::section("Available Surveys");
    for survey in &surveys {
        println!("{}) {}", survey.id, survey.name);
    }

    let survey_id = loop {
        let id = prompt_number("Enter the survey ID to run")?;
        match store.survey_name(id)? {
            Some(name) => {
                ui::info("Running survey", &name);
                break id;
            }
            None => ui::warn("Invalid survey ID. Please enter a valid ID."),
        }
    };

    for question in store.list_questions(survey_id)? {
        println!();
        println!("{} {}", Icons::MEMO, question.text.bold());
        for choice in store.list_answer_choices(question.id)? {
            println!("{}) {}", choice.id, choice.text);
        }

        // Recorded as typed; the store does not check that the id names one
        // of the listed choices.
        let answer_id = prompt_number("Enter your choice")?;
        store.record_response(question.id, answer_id)?;
    }

    ui::success("Responses recorded");
    Ok(())
}

fn run_list(store: &SurveyStore) -> anyhow::Result<()> {
    let surveys = store.list_surveys()?;
    if surveys.is_empty() {
        println!("∅ No surveys found.");
    } else {
        println!("{}", ui::survey_table(&surveys));
    }
    Ok(())
}

fn run_report(store: &SurveyStore, format: &str) -> anyhow::Result<()> {
    let rows = store.generate_report()?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("∅ No responses recorded yet.");
    } else {
        println!("{}", ui::report_table(&rows));
    }
    Ok(())
}

fn run_stats(store: &SurveyStore, database: &Path) -> anyhow::Result<()> {
    let stats = store.stats()?;

    println!("{} Surveyor Statistics ({:?})", Icons::STATS, database);
    println!("------------------------------------");
    println!("{}", stats);
    Ok(())
}

/// Print a prompt and read one trimmed line from stdin. Errors only when the
/// input stream is closed.
fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        anyhow::bail!("input stream closed");
    }
    Ok(line.trim().to_string())
}

/// Like [`prompt`], but re-prompts until the line parses as a number.
fn prompt_number(label: &str) -> anyhow::Result<i64> {
    loop {
        let raw = prompt(label)?;
        match raw.parse::<i64>() {
            Ok(n) => return Ok(n),
            Err(_) => ui::warn("Invalid input. Please enter a number."),
        }
    }
}
