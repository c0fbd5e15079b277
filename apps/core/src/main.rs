// Post-care assessment CLI
// Thin command layer over the postcare_core library

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use postcare_core::accounts;
use postcare_core::analysis::summary::truncate_response;
use postcare_core::analysis::{
    AssessmentAnalyzer, AssessmentInput, AssessmentReport, Category, RiskLevel,
};
use postcare_core::assessments;
use postcare_core::config::AppConfig;
use postcare_core::database;
use postcare_core::models::{AssessmentStats, NewUser, PatientAssessment, UserRole};
use postcare_core::questionnaire::question_for;
use postcare_core::telemetry;
use sqlx::SqlitePool;
use tracing::{debug, info};

const PREVIEW_CHARS: usize = 60;

#[derive(Parser)]
#[command(name = "postcare", version, about = "Cardiac post-care self-assessment")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the database and its tables
    Init,
    /// Register a patient or doctor account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        full_name: String,
        /// "patient" or "doctor"
        #[arg(long, default_value = "patient")]
        role: UserRole,
        /// Assigned doctor (patients only)
        #[arg(long)]
        doctor_id: Option<i64>,
    },
    /// List registered doctors
    Doctors,
    /// Analyze responses without storing them
    Analyze {
        #[command(flatten)]
        responses: Responses,
        /// Read responses from a JSON file instead of flags
        #[arg(long, conflicts_with_all = ["cardiac", "breathing", "medication", "activity"])]
        input: Option<PathBuf>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log in as a patient, answer the questionnaire and store the result
    Assess {
        #[command(flatten)]
        login: Login,
        #[command(flatten)]
        responses: Responses,
    },
    /// Show the assessments visible to an account
    History {
        #[command(flatten)]
        login: Login,
        /// Only show one risk level: "low", "medium" or "high"
        #[arg(long)]
        risk: Option<RiskLevel>,
        /// Print the full stored summary of each assessment
        #[arg(long)]
        full: bool,
    },
    /// Doctor dashboard: patient counters and the assessment list
    Dashboard {
        #[command(flatten)]
        login: Login,
        /// Only list one risk level: "low", "medium" or "high"
        #[arg(long)]
        risk: Option<RiskLevel>,
    },
    /// Show a doctor's most recent patient assessments
    Recent {
        #[command(flatten)]
        login: Login,
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
}

#[derive(Args)]
struct Login {
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: Option<String>,
}

#[derive(Args)]
struct Responses {
    #[arg(long)]
    cardiac: Option<String>,
    #[arg(long)]
    breathing: Option<String>,
    #[arg(long)]
    medication: Option<String>,
    #[arg(long)]
    activity: Option<String>,
}

impl Responses {
    fn given(&self, category: Category) -> Option<&String> {
        match category {
            Category::Cardiac => self.cardiac.as_ref(),
            Category::Respiratory => self.breathing.as_ref(),
            Category::Medication => self.medication.as_ref(),
            Category::Activity => self.activity.as_ref(),
        }
    }

    /// Use the flags given and ask for the rest on stdin
    fn collect(&self) -> Result<AssessmentInput> {
        let mut input = AssessmentInput::default();
        for category in Category::ALL {
            let text = match self.given(category) {
                Some(text) => text.clone(),
                None => {
                    let question = question_for(category);
                    println!("\nStep {} of 4: {}", question.step, question.title);
                    println!("{}", question.text);
                    prompt("> ")?
                }
            };
            input.set_response(category, text);
        }
        Ok(input)
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn password_or_prompt(password: &Option<String>) -> Result<String> {
    match password {
        Some(p) => Ok(p.clone()),
        None => prompt("Password: "),
    }
}

fn print_report(report: &AssessmentReport) {
    println!("{}", report.summary);
}

fn print_record(record: &PatientAssessment, full: bool) {
    let when = chrono::DateTime::from_timestamp(record.timestamp, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| record.timestamp.to_string());

    println!(
        "#{} {} | {} | risk: {}",
        record.id,
        when,
        record.patient_name,
        record.risk().as_str().to_uppercase()
    );
    if full {
        println!("{}\n", record.ai_summary);
    } else {
        println!("  cardiac:    {}", truncate_response(&record.cardiac_symptoms, PREVIEW_CHARS));
        println!("  breathing:  {}", truncate_response(&record.breathing_physical, PREVIEW_CHARS));
        println!("  medication: {}", truncate_response(&record.medication_response, PREVIEW_CHARS));
        println!("  activity:   {}", truncate_response(&record.activity_fatigue, PREVIEW_CHARS));
    }
}

fn print_stats(stats: &AssessmentStats) {
    println!("Total patients:       {}", stats.total_patients);
    println!("Total assessments:    {}", stats.total_assessments);
    println!("High-risk patients:   {}", stats.high_risk_patients);
    println!("Today's assessments:  {}", stats.todays_assessments);
}

fn print_records(records: &[PatientAssessment], full: bool) {
    if records.is_empty() {
        println!("No assessments found.");
    }
    for record in records {
        print_record(record, full);
    }
}

async fn open_db(config: &AppConfig) -> Result<SqlitePool> {
    database::init_db(config)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_path.display()))
}

fn read_input_file(path: &Path) -> Result<AssessmentInput> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid assessment JSON in {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init_tracing(config.log_format)?;
    debug!("Configuration: {:?}", config);

    let analyzer = AssessmentAnalyzer::with_config(config.analyzer)?;

    match cli.command {
        Command::Init => {
            open_db(&config).await?.close().await;
            println!("Database ready at {}", config.database_path.display());
        }
        Command::Register {
            username,
            email,
            password,
            full_name,
            role,
            doctor_id,
        } => {
            let pool = open_db(&config).await?;
            let password = password_or_prompt(&password)?;
            let user = accounts::register(
                &pool,
                NewUser {
                    username,
                    email,
                    password,
                    role,
                    full_name,
                    doctor_id,
                },
            )
            .await?;
            println!("Registered {} #{} ({})", user.user_type, user.id, user.full_name);
        }
        Command::Doctors => {
            let pool = open_db(&config).await?;
            let doctors = accounts::doctors(&pool).await?;
            if doctors.is_empty() {
                println!("No doctors registered.");
            }
            for doctor in doctors {
                println!("{:>4}  {}", doctor.id, doctor.full_name);
            }
        }
        Command::Analyze {
            responses,
            input,
            json,
        } => {
            let input = match input {
                Some(path) => read_input_file(&path)?,
                None => responses.collect()?,
            };
            let report = analyzer.analyze_now(&input);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Command::Assess { login, responses } => {
            let pool = open_db(&config).await?;
            let password = password_or_prompt(&login.password)?;
            let user = accounts::login(&pool, &login.username, &password).await?;
            if user.is_doctor() {
                bail!("Only patients can submit assessments");
            }
            let input = responses.collect()?;
            let (record, report) = assessments::submit(&pool, &analyzer, &user, &input).await?;
            info!("Assessment #{} saved", record.id);
            println!();
            print_report(&report);
        }
        Command::History { login, risk, full } => {
            let pool = open_db(&config).await?;
            let password = password_or_prompt(&login.password)?;
            let user = accounts::login(&pool, &login.username, &password).await?;
            let records = assessments::history(&pool, &user, risk).await?;
            print_records(&records, full);
        }
        Command::Dashboard { login, risk } => {
            let pool = open_db(&config).await?;
            let password = password_or_prompt(&login.password)?;
            let user = accounts::login(&pool, &login.username, &password).await?;
            let stats = assessments::dashboard(&pool, &user).await?;
            print_stats(&stats);
            println!();
            let records = assessments::history(&pool, &user, risk).await?;
            print_records(&records, false);
        }
        Command::Recent { login, limit } => {
            let pool = open_db(&config).await?;
            let password = password_or_prompt(&login.password)?;
            let user = accounts::login(&pool, &login.username, &password).await?;
            let records = assessments::recent(&pool, &user, limit).await?;
            print_records(&records, false);
        }
    }

    Ok(())
}
