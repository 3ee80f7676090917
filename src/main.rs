//! Resume tailor: tailored resumes and cover letters from a master profile

use clap::Parser;
use log::{error, info, warn};
use resume_tailor::cli::{self, Cli, Commands, ConfigAction};
use resume_tailor::input::InputManager;
use resume_tailor::output::{ConsoleFormatter, JsonFormatter, OutputFormatter};
use resume_tailor::processing::impact::{generate_impact_variants, ImpactRequest};
use resume_tailor::processing::metrics::MetricsRecord;
use resume_tailor::tailor::{GenerationOptions, Generator};
use resume_tailor::{Config, Result, TailorError};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_override: Option<PathBuf>) -> Result<()> {
    let console = ConsoleFormatter::new(config.output.color_output);

    match command {
        Commands::Generate {
            role,
            all,
            job,
            no_pdf,
            format,
        } => {
            let format = match format {
                Some(format) => cli::parse_document_format(&format).map_err(TailorError::InvalidInput)?,
                None => config.output.format,
            };
            if let Some(job) = &job {
                cli::validate_file_extension(job, &["pdf", "txt", "md", "markdown", "html", "htm"])
                    .map_err(|e| TailorError::InvalidInput(format!("Job description file: {}", e)))?;
            }

            config.ensure_output_dir()?;
            let options = GenerationOptions {
                format,
                convert: !no_pdf,
                date: chrono::Local::now().date_naive(),
                letter_style: None,
                job_override: job,
            };

            let mut generator = Generator::new(config);
            let profile = generator.load_profile().await?;

            let generated = if all {
                info!("Generating documents for every role");
                generator.generate_all(&profile, &options).await?
            } else {
                vec![generator.generate(&profile, role.as_deref(), &options).await?]
            };

            println!("{}", console.format_generated(&generated)?);
        }

        Commands::Analyze { job, domain, json } => {
            let domain = domain
                .as_deref()
                .map(cli::parse_domain)
                .transpose()
                .map_err(TailorError::InvalidInput)?;

            let mut generator = Generator::new(config);
            let job = generator.inputs().load_job(&job).await?;
            let profile = match generator.load_profile().await {
                Ok(profile) => Some(profile),
                Err(e) => {
                    warn!("Analyzing without a profile: {}", e);
                    None
                }
            };

            let analysis = generator.engine().analyze(profile.as_ref(), &job, domain)?;
            if json {
                println!("{}", JsonFormatter::new(true).format_analysis(&analysis)?);
            } else {
                println!("{}", console.format_analysis(&analysis)?);
            }
        }

        Commands::Bullets {
            responsibility,
            metrics,
            job,
            context,
            json,
        } => {
            let metrics: MetricsRecord = match metrics {
                Some(raw) => serde_json::from_str(&raw)
                    .map_err(|e| TailorError::InvalidInput(format!("Metrics must be a JSON object: {}", e)))?,
                None => MetricsRecord::new(),
            };
            let job = match job {
                Some(path) => Some(InputManager::new().load_job(&path).await?),
                None => None,
            };

            let mut request = ImpactRequest::new(&responsibility, &metrics);
            if let Some(job) = &job {
                request = request.with_job(job);
            }
            if let Some(context) = context.as_deref() {
                request = request.with_context(context);
            }

            let variants = generate_impact_variants(&request);
            if json {
                println!("{}", JsonFormatter::new(true).format_variants(&variants)?);
            } else {
                println!("{}", console.format_variants(&variants)?);
            }
        }

        Commands::CoverLetter {
            role,
            job,
            style,
            all_styles,
            json,
        } => {
            let style = style
                .as_deref()
                .map(cli::parse_letter_style)
                .transpose()
                .map_err(TailorError::InvalidInput)?;

            let mut generator = Generator::new(config);
            let profile = generator.load_profile().await?;
            let role_config = generator.load_role(&role).await?;
            let job = generator.resolve_job(&role_config, Some(&role), job.as_deref()).await?;
            let date = chrono::Local::now().date_naive();

            let letters = if all_styles {
                generator
                    .engine()
                    .cover_letter_variants(&profile, &role_config, job.as_ref(), date)?
            } else {
                vec![generator
                    .engine()
                    .cover_letter(&profile, &role_config, job.as_ref(), date, style)?]
            };

            if json {
                println!("{}", JsonFormatter::new(true).format_letters(&letters)?);
            } else {
                println!("{}", console.format_letters(&letters)?);
            }
        }

        Commands::Config { action } => {
            let config_path = config_override.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", config_path.display());
                    println!("Paths:");
                    println!("  Data: {}", config.paths.data_dir.display());
                    println!("  Private: {}", config.paths.private_dir.display());
                    println!("  Roles: {}", config.paths.roles_dir.display());
                    println!("  Output: {}", config.paths.output_dir.display());
                    println!("\nTailoring:");
                    println!("  Max skills: {}", config.tailoring.max_skills);
                    println!("  Proof examples: {}", config.tailoring.proof_examples);
                    println!(
                        "  Default projects: {} (first {})",
                        config.tailoring.default_project_category, config.tailoring.default_project_limit
                    );
                    println!(
                        "  Max keyword density: {:.1}%",
                        config.tailoring.max_keyword_density * 100.0
                    );
                    println!("\nConversion:");
                    println!("  Converter: {:?}", config.conversion.converter);
                    println!("  Pandoc: {}", config.conversion.pandoc_path);
                    println!("  Margin: {}", config.conversion.margin);
                    println!("\nOutput format: {}", config.output.format);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&config_path)?;
                    println!("✅ Configuration reset: {}", config_path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", config_path.display());
                }
            }
        }
    }

    Ok(())
}
