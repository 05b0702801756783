mod config;
mod export;
mod interactive;
mod output;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use thesis_core::ThesisUpdate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wizard::{ThesisOracle, WizardSession};

use config::{config_path, ForgeConfig, CONFIG_FILE, FORGE_DIR};
use export::{read_thesis_file, write_export, ThesisExport};
use interactive::InteractiveWizard;

#[derive(Parser)]
#[command(name = "thesis-forge")]
#[command(about = "Turn a domain into a business thesis and an MVP coding manifesto", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output language tag, e.g. en, pt-BR, es
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Chat model to use instead of the configured one
    #[arg(long, global = true)]
    model: Option<String>,

    /// Ignore any API key and use the built-in sample responses
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config to .thesis-forge/config.toml
    Init,
    /// Walk through the wizard step by step (default)
    Run {
        /// Write the finished thesis as JSON
        #[arg(long)]
        export: Option<PathBuf>,
        /// Continue from a previously exported thesis
        #[arg(long)]
        resume: Option<PathBuf>,
    },
    /// Generate a complete thesis from the three activation seeds
    Generate {
        #[arg(long)]
        domain: String,
        #[arg(long)]
        context: String,
        #[arg(long)]
        ambition: String,
        /// Write the manifesto here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Write the generated thesis as JSON
        #[arg(long)]
        export: Option<PathBuf>,
        /// Copy the manifesto to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Render the manifesto for a saved thesis file
    Render {
        file: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        copy: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let cwd = std::env::current_dir()?;
    let mut config = ForgeConfig::load(&config_path(&cwd))?;
    if let Some(locale) = cli.locale {
        config.wizard.locale = locale;
    }
    if let Some(model) = cli.model {
        config.provider.model = model;
    }

    match cli.command {
        Some(Commands::Init) => init_project(&cwd),
        Some(Commands::Run { export, resume }) => {
            let oracle = config.build_oracle(cli.offline);
            run_wizard(&config, oracle.as_ref(), resume.as_deref(), export.as_deref()).await
        }
        Some(Commands::Generate {
            domain,
            context,
            ambition,
            out,
            export,
            copy,
        }) => {
            let oracle = config.build_oracle(cli.offline);
            let seeds = [
                ThesisUpdate::ExcavationDomain(domain),
                ThesisUpdate::CreatorContext(context),
                ThesisUpdate::AmbitionLevel(ambition),
            ];
            generate(&config, oracle.as_ref(), seeds, out.as_deref(), export.as_deref(), copy)
                .await
        }
        Some(Commands::Render { file, out, copy }) => render(&file, out.as_deref(), copy),
        None => {
            let oracle = config.build_oracle(cli.offline);
            run_wizard(&config, oracle.as_ref(), None, None).await
        }
    }
}

fn new_session(config: &ForgeConfig) -> WizardSession {
    WizardSession::new(config.locale())
        .with_max_generation_attempts(config.wizard.max_generation_attempts)
}

fn init_project(cwd: &Path) -> Result<()> {
    let path = config_path(cwd);
    if path.exists() {
        println!("Already initialized at {}", path.display());
        return Ok(());
    }

    ForgeConfig::default().save(&path)?;

    println!();
    println!("Initialized Thesis Forge in {}", cwd.display());
    println!();
    println!("Created:");
    println!("  {}/", FORGE_DIR);
    println!("  └── {}", CONFIG_FILE);
    println!();
    println!("Next steps:");
    println!("  1. export OPENROUTER_API_KEY=... (or set provider.api_key)");
    println!("  2. Run 'thesis-forge' to start the wizard");

    Ok(())
}

async fn run_wizard(
    config: &ForgeConfig,
    oracle: &dyn ThesisOracle,
    resume: Option<&Path>,
    export: Option<&Path>,
) -> Result<()> {
    let mut session = new_session(config);
    println!("{}", "Thesis Forge".bold());
    println!("Session {} ({})", session.id(), session.locale());

    if let Some(path) = resume {
        let saved = read_thesis_file(path)?;
        let step = session.resume(saved.thesis_data, saved.manifesto, &saved.step);
        println!("Resuming {} at {}", path.display(), step.title());
    }

    let session = InteractiveWizard::new(session, oracle).run().await?;

    if let Some(path) = export {
        write_export(path, &ThesisExport::from_session(&session))?;
        println!("{} {}", "Exported".green(), path.display());
    }
    Ok(())
}

async fn generate(
    config: &ForgeConfig,
    oracle: &dyn ThesisOracle,
    seeds: [ThesisUpdate; 3],
    out: Option<&Path>,
    export: Option<&Path>,
    copy: bool,
) -> Result<()> {
    let mut session = new_session(config);
    session.update_all(seeds);

    let bar = output::spinner(&format!("Generating thesis with {}...", oracle.name()));
    let result = session.generate(oracle).await;
    bar.finish_and_clear();
    result.context("Thesis generation failed")?;

    eprintln!("{}", session.summary());

    if let Some(path) = export {
        write_export(path, &ThesisExport::from_session(&session))?;
    }
    emit_manifesto(&session.manifesto(), out, copy)
}

fn render(file: &Path, out: Option<&Path>, copy: bool) -> Result<()> {
    let export = read_thesis_file(file)?;
    emit_manifesto(&export.draft().render(), out, copy)
}

fn emit_manifesto(manifesto: &str, out: Option<&Path>, copy: bool) -> Result<()> {
    match out {
        Some(path) => output::write_text(path, manifesto)?,
        None => println!("{manifesto}"),
    }
    if copy {
        output::copy_to_clipboard(manifesto);
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thesis_forge=info,wizard=info,genai=info".into()),
        )
        .init();
}
