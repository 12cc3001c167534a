use clap::{Parser, Subcommand};
use std::path::PathBuf;

const EXIT_SUCCESS: i32 = 0;
const EXIT_READ: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Guided risk entry and review in the terminal UI (default if no subcommand)
    Wizard,
    /// Print the Assessment sheet of a workbook with coloured scores
    Show {
        /// Workbook (.xlsx) containing an Assessment sheet
        file: PathBuf,
    },
    /// Export rows with a high Risk Score to CSV
    Export {
        /// Workbook (.xlsx) containing an Assessment sheet
        file: PathBuf,
        /// Output CSV path (defaults to export_path from config, then high_risks.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the questions visible for a role
    Questions {
        /// Role filter ("All" shows every question)
        #[arg(short, long, default_value = "All")]
        role: String,
    },
}

#[derive(Parser, Debug)]
#[command(name = "risk-builder")]
#[command(about = "Guided risk assessment builder", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/risk-builder/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    risk_builder::logging::init(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Wizard);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match risk_builder::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = risk_builder::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let scoring = config.scoring();

    // Question library (built-in unless configured)
    let questions = match risk_builder::questions::load_questions(config.questions_path()) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("Question library error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Err(errors) = risk_builder::questions::validate_questions(&questions) {
        eprintln!("Question library errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    tracing::debug!(questions = questions.len(), "configuration loaded");

    match command {
        Commands::Wizard => {
            let template_path = config.template_path();
            let template = match risk_builder::assessment::load_template(Some(&template_path)) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("Template error: {:#}", e);
                    std::process::exit(EXIT_READ);
                }
            };

            let app = risk_builder::tui::App::new(
                questions,
                template,
                scoring,
                config.export_path(),
                config.flash_duration(),
            );
            if let Err(e) = risk_builder::tui::run_tui(app).await {
                eprintln!("Terminal error: {:#}", e);
                std::process::exit(EXIT_READ);
            }
        }
        Commands::Show { file } => {
            let table = read_or_exit(&file);
            let use_colors = risk_builder::output::should_use_colors();
            println!(
                "{}",
                risk_builder::output::format_table(&table, &scoring, use_colors)
            );
            if let Some(summary) =
                risk_builder::output::format_band_summary(&table, &scoring, use_colors)
            {
                println!("{}", summary);
            }
        }
        Commands::Export { file, output } => {
            let table = read_or_exit(&file);
            let output = output.unwrap_or_else(|| config.export_path());
            match risk_builder::assessment::export_high_csv(&table, scoring.high, &output) {
                Ok(count) => println!("Exported {} high risks to {}", count, output.display()),
                Err(e) => {
                    eprintln!("Export failed: {:#}", e);
                    std::process::exit(EXIT_READ);
                }
            }
        }
        Commands::Questions { role } => {
            let filter = risk_builder::questions::RoleFilter::parse(&role);
            let visible = risk_builder::questions::filter_questions(&questions, &filter);
            let use_colors = risk_builder::output::should_use_colors();
            println!(
                "{}",
                risk_builder::output::format_questions(&visible, use_colors)
            );
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn read_or_exit(file: &std::path::Path) -> risk_builder::assessment::Table {
    match risk_builder::assessment::read_assessment(file) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Read error: {}", e);
            std::process::exit(EXIT_READ);
        }
    }
}
