use anyhow::{bail, Context};
use bigtext_rs::preferences::{load_preferences, reset_preferences, save_preferences};
use bigtext_rs::{
    report_export_outcome, Animation, BackgroundMode, DirectorySink, DownloadSink, ExportConfig,
    ExportOptions, FontConfig, HexColor, JsonFileStore, LogNotifier, OutputFormat,
    PreferenceStore, PrintService, PrintToFile, RasterExporter, StyleCatalog, UiState,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// bigtext: render big styled text as PNG, JPEG, SVG, or a print document
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Additional directory to search for fonts (repeatable)
    #[arg(long, global = true)]
    font_dir: Vec<PathBuf>,

    /// Do not load system fonts
    #[arg(long, global = true)]
    no_system_fonts: bool,

    /// File holding saved preferences
    #[arg(long, global = true, default_value = "bigtext-preferences.json")]
    prefs: PathBuf,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export styled text to a file
    Render {
        #[command(flatten)]
        settings: Settings,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List available styles
    Styles,

    /// Print the preview classes and CSS for the current settings
    Preview {
        #[command(flatten)]
        settings: Settings,
    },

    /// Manage saved preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand, Debug)]
enum PrefsAction {
    /// Save the current settings: saved values overridden by flags
    Save {
        #[command(flatten)]
        settings: Settings,
    },
    /// Print saved preferences as JSON
    Show,
    /// Forget saved preferences
    Reset,
}

/// Editor settings. Each flag overrides the saved value.
#[derive(Args, Debug)]
struct Settings {
    /// Text to render
    #[arg(short, long)]
    text: Option<String>,

    /// Style id (see `bigtext styles`)
    #[arg(short, long)]
    style: Option<String>,

    /// CSS font family list, e.g. "Georgia, serif"
    #[arg(long)]
    font_family: Option<String>,

    /// Font size in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    size: Option<u32>,

    /// Text color as #rrggbb
    #[arg(long)]
    color: Option<HexColor>,

    /// Preview animation
    #[arg(long)]
    animation: Option<Animation>,
}

impl Settings {
    fn apply(&self, state: &mut UiState, catalog: &StyleCatalog) {
        if let Some(text) = &self.text {
            state.text = text.clone();
        }
        if let Some(style) = &self.style {
            if !state.set_style(style, catalog) {
                log::warn!(
                    "Unknown style {:?}, keeping {:?}",
                    style,
                    state.style_id()
                );
            }
        }
        if let Some(family) = &self.font_family {
            state.font_family = family.clone();
        }
        if let Some(size) = self.size {
            state.font_size = size;
        }
        if let Some(color) = self.color {
            state.text_color = color;
        }
        if let Some(animation) = self.animation {
            state.animation = animation;
        }
    }
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output format: png, jpg, svg, or pdf
    #[arg(short, long, default_value = "png")]
    format: OutputFormat,

    /// Resolution multiplier
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,

    /// transparent, white, black, or #rrggbb
    #[arg(short, long, default_value = "transparent")]
    background: BackgroundMode,

    /// Directory for the generated file
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Exact output path. Overrides --out-dir and the generated name
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = StyleCatalog::builtin();
    let mut store = JsonFileStore::new(&cli.prefs);

    match &cli.command {
        Commands::Render { settings, output } => {
            let mut state = saved_state(&store, catalog);
            settings.apply(&mut state, catalog);
            render(&cli, &mut state, output).await
        }
        Commands::Styles => {
            for descriptor in catalog.iter() {
                println!(
                    "{:<20} {:<20} {:<12} {}",
                    descriptor.id,
                    descriptor.display_name,
                    descriptor.kind.family(),
                    if descriptor.accepts_user_color() {
                        "color"
                    } else {
                        "fixed"
                    }
                );
            }
            Ok(())
        }
        Commands::Preview { settings } => {
            let mut state = saved_state(&store, catalog);
            settings.apply(&mut state, catalog);
            let preview = state.preview(catalog);
            println!("text:  {}", state.preview_text());
            println!("class: {}", preview.class_attr());
            println!("style: {}", preview.to_css());
            Ok(())
        }
        Commands::Prefs { action } => match action {
            PrefsAction::Save { settings } => {
                let mut state = saved_state(&store, catalog);
                settings.apply(&mut state, catalog);
                if !save_preferences(&state, &mut store, &LogNotifier) {
                    bail!("Failed to save preferences to {}", cli.prefs.display());
                }
                Ok(())
            }
            PrefsAction::Show => {
                let mut state = UiState::default();
                if load_preferences(&mut state, &store, catalog, &LogNotifier) {
                    println!("{}", serde_json::to_string_pretty(&state.to_preferences())?);
                }
                Ok(())
            }
            PrefsAction::Reset => {
                let mut state = UiState::default();
                if !reset_preferences(&mut state, &mut store, &LogNotifier) {
                    bail!("Failed to reset preferences in {}", cli.prefs.display());
                }
                Ok(())
            }
        },
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Defaults, overlaid with saved preferences when there are any.
fn saved_state(store: &JsonFileStore, catalog: &StyleCatalog) -> UiState {
    let mut state = UiState::default();
    match store.load() {
        Ok(Some(preferences)) => state.apply_preferences(&preferences, catalog),
        Ok(None) => {}
        Err(err) => log::warn!(
            "Ignoring unreadable preferences in {}: {}",
            store.path().display(),
            err
        ),
    }
    state
}

async fn render(cli: &Cli, state: &mut UiState, output: &OutputArgs) -> anyhow::Result<()> {
    state.export = ExportOptions {
        scale_factor: output.scale,
        background: output.background,
    };
    let exporter = RasterExporter::new(ExportConfig {
        font: FontConfig {
            load_system_fonts: !cli.no_system_fonts,
            font_dirs: cli.font_dir.clone(),
            ..FontConfig::default()
        },
        ..ExportConfig::default()
    });

    let request = state.render_request(output.format);
    let result = exporter.export(&request).await;
    report_export_outcome(&result, output.format, &LogNotifier);
    let artifact = result.context("Export failed")?;

    let path = match (&output.output, artifact.data.as_markup()) {
        (target, Some(document)) if output.format == OutputFormat::Pdf => {
            let printer = PrintToFile::new(
                target
                    .clone()
                    .unwrap_or_else(|| output.out_dir.join(&artifact.file_name)),
            );
            printer
                .print(document)
                .with_context(|| format!("Failed to print to {}", printer.path().display()))?;
            printer.path().to_path_buf()
        }
        (Some(path), _) => {
            std::fs::write(path, artifact.data.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            path.clone()
        }
        (None, _) => DirectorySink::new(&output.out_dir)
            .save(&artifact)
            .with_context(|| format!("Failed to save into {}", output.out_dir.display()))?,
    };
    println!("{}", path.display());
    Ok(())
}
