//! elearn CLI: course enrollment, tests, and certificates.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "elearn", version, about = "E-learning student records and assessments")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config, dataset, and question bank
    Init,

    /// Validate the question bank
    ValidateBank {
        /// Question bank file (defaults to the configured one)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Create a student account
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Check credentials
    Login {
        #[arg(long)]
        user: String,

        #[arg(long)]
        password: String,
    },

    /// List courses open for enrollment
    Courses {
        #[arg(long)]
        user: String,

        #[arg(long)]
        password: String,
    },

    /// Enroll in a course
    Enroll {
        #[arg(long)]
        user: String,

        #[arg(long)]
        password: String,

        /// Course id
        #[arg(long)]
        course: String,
    },

    /// List tests that can be taken now
    Tests {
        #[arg(long)]
        user: String,

        #[arg(long)]
        password: String,
    },

    /// Sit a test; answers (A-D, blank to skip) are read from stdin, one per line
    TakeTest {
        #[arg(long)]
        user: String,

        #[arg(long)]
        password: String,

        /// Course id
        #[arg(long)]
        course: String,

        /// Test id
        #[arg(long)]
        test: String,
    },

    /// Show registrations, attempts, and certificates
    Dashboard {
        #[arg(long)]
        user: String,

        #[arg(long)]
        password: String,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Administrator console
    Admin {
        /// Admin password
        #[arg(long)]
        password: String,

        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
pub enum AdminAction {
    /// List students and their attempts
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Update a student's contact details
    EditStudent {
        /// Student id
        #[arg(long)]
        student: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },

    /// Delete a student and all their records
    DeleteStudent {
        /// Student id
        #[arg(long)]
        student: String,
    },

    /// Delete a single attempt record
    DeleteAttempt {
        #[arg(long)]
        student: String,

        #[arg(long)]
        course: String,

        #[arg(long)]
        test: String,

        /// Attempt number
        #[arg(long)]
        attempt: u8,
    },

    /// Clear a failed second attempt so the test can be taken again
    GrantAttempt {
        #[arg(long)]
        student: String,

        #[arg(long)]
        course: String,

        #[arg(long)]
        test: String,
    },
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("elearn=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::ValidateBank { bank } => commands::validate_bank::execute(bank, config),
        Commands::Register { username, password } => {
            commands::register::execute(&username, &password, config)
        }
        Commands::Login { user, password } => commands::login::execute(&user, &password, config),
        Commands::Courses { user, password } => {
            commands::courses::execute(&user, &password, config)
        }
        Commands::Enroll {
            user,
            password,
            course,
        } => commands::enroll::execute(&user, &password, &course, config),
        Commands::Tests { user, password } => commands::tests::execute(&user, &password, config),
        Commands::TakeTest {
            user,
            password,
            course,
            test,
        } => commands::take_test::execute(&user, &password, &course, &test, config),
        Commands::Dashboard {
            user,
            password,
            json,
        } => commands::dashboard::execute(&user, &password, json, config),
        Commands::Admin { password, action } => {
            commands::admin::execute(&password, action, config)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
