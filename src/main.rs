use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use quotecraft::{explain_match, ExportOutcome, LogoState, Studio, StudioConfig, TemplateId, TEMPLATES};

#[derive(Parser, Debug)]
#[command(name = "quotecraft")]
#[command(about = "Render quotes and scripture into branded 1080x1080 PNG designs")]
struct Args {
    /// Logo store directory (defaults to the platform data directory)
    #[arg(long, global = true, env = "QUOTECRAFT_STORE_DIR")]
    store_dir: Option<PathBuf>,

    /// Debug logging (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available templates
    Templates,

    /// Show which template auto-match picks for some text
    Match {
        text: String,
    },

    /// Render a design and write it as PNG
    Export {
        #[arg(long)]
        text: String,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        church_name: Option<String>,
        #[arg(long)]
        church_handle: Option<String>,
        /// Template id; auto-matched from the text when omitted
        #[arg(long)]
        template: Option<TemplateId>,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// Directory bundled assets are read from
        #[arg(long, default_value = "public")]
        assets: PathBuf,
        /// Render without any logo
        #[arg(long)]
        no_logo: bool,
    },

    /// Manage the stored church logo
    Logo {
        #[command(subcommand)]
        action: LogoAction,
    },
}

#[derive(Subcommand, Debug)]
enum LogoAction {
    /// Store a logo image (max 5MB)
    Upload { file: PathBuf },
    /// Forget the stored logo
    Remove,
    /// Print which logo is in use
    Show,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = StudioConfig {
        store_dir: args.store_dir.clone(),
        ..Default::default()
    };

    match args.command {
        Command::Templates => {
            for t in &TEMPLATES {
                println!("{:<16} {:<16} {}", t.id, t.name, t.description);
            }
        }
        Command::Match { text } => {
            let report = explain_match(&text);
            match report.keyword {
                Some(k) => println!("{} (keyword '{}')", report.template, k),
                None => println!("{} (no keyword, default)", report.template),
            }
        }
        Command::Export {
            text,
            author,
            church_name,
            church_handle,
            template,
            out,
            assets,
            no_logo,
        } => {
            let mut config = config;
            config.asset_root = assets;
            config.export.output_dir = out;
            let mut studio = Studio::open(config).context("Failed to open studio")?;

            if !studio.set_text(text.as_str()) {
                anyhow::bail!("Quote is longer than {} characters", studio.config().max_chars);
            }
            if let Some(a) = author {
                studio.set_author(a);
            }
            if let Some(n) = church_name {
                studio.set_church_name(n);
            }
            if let Some(h) = church_handle {
                studio.set_church_handle(h);
            }
            if let Some(id) = template {
                studio.select_template(id);
            }
            if no_logo {
                studio.clear_session_logo();
            }

            match studio.export().await? {
                ExportOutcome::Delivered(img) => println!("{}", img.path.display()),
                ExportOutcome::NothingToExport => log::warn!("nothing to export"),
                ExportOutcome::AlreadyRunning => log::warn!("an export is already running"),
            }
        }
        Command::Logo { action } => {
            let mut studio = Studio::open(config).context("Failed to open studio")?;
            match action {
                LogoAction::Upload { file } => {
                    if studio.upload_logo(&file)? {
                        println!("Logo stored");
                    } else {
                        println!("No logo stored: {} is not a readable image", file.display());
                    }
                }
                LogoAction::Remove => {
                    studio.remove_logo()?;
                    println!("Logo removed");
                }
                LogoAction::Show => match studio.logo() {
                    LogoState::None => println!("none"),
                    LogoState::Default(src) => println!("default ({})", src),
                    LogoState::Uploaded(uri) => println!("uploaded ({} bytes as data URI)", uri.len()),
                },
            }
        }
    }
    Ok(())
}
