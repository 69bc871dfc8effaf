//! Country Picker - Entry Point

use clap::Parser;
use country_picker::config::{self, CliOverrides, TriggerStyle};
use country_picker::model::{AppError, CountryCatalog, SelectorMode};
use country_picker::source::CatalogSource;
use country_picker::state::SelectionStore;
use country_picker::view::{self, ColorConfig, PickerStyles, ViewSettings};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Country Picker - searchable dial code / nationality selector
#[derive(Parser, Debug)]
#[command(name = "country-picker")]
#[command(version)]
#[command(about = "Searchable country picker for dial codes and nationalities")]
pub struct Args {
    /// What to select: dial-code or nationality
    #[arg(short, long)]
    pub mode: Option<SelectorMode>,

    /// Catalog JSON file (the bundled sample catalog if not provided)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Initial value (dial code or short name, depending on mode)
    #[arg(short, long)]
    pub value: Option<String>,

    /// Treat --value as owned by the caller and echo selections back
    #[arg(long, requires = "value")]
    pub controlled: bool,

    /// Hidden form field name; the exit line becomes name=value
    #[arg(short, long)]
    pub name: Option<String>,

    /// Label shown above the picker
    #[arg(long)]
    pub label: Option<String>,

    /// Mark the field as required
    #[arg(long)]
    pub required: bool,

    /// Start disabled
    #[arg(long)]
    pub disabled: bool,

    /// Start with an empty catalog and load the real one after N milliseconds
    #[arg(long)]
    pub simulate_loading_ms: Option<u64>,

    /// Screen row of the trigger
    #[arg(long, default_value = "1")]
    pub row: u16,

    /// Trigger style: button or input
    #[arg(long)]
    pub trigger_style: Option<TriggerStyle>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = config::load_config_with_precedence(args.config.clone())?;
        let merged = config::merge_config(config_file)?;
        let with_env = config::apply_env_overrides(merged)?;
        config::apply_cli_overrides(
            with_env,
            CliOverrides {
                mode: args.mode,
                catalog: args.catalog.clone(),
                field_name: args.name.clone(),
                label: args.label.clone(),
                required: args.required,
                disabled: args.disabled,
                trigger_style: args.trigger_style,
            },
        )
    };

    init_logging(&config)?;

    let catalog = CatalogSource::from_path(config.catalog_path.clone()).load()?;

    let mut options = config.picker_options();
    match args.value.clone() {
        Some(value) if args.controlled => options.value = Some(value),
        Some(value) => options.default_value = Some(value),
        None => {}
    }

    let (initial, pending) = match args.simulate_loading_ms {
        Some(ms) => {
            options.is_loading = Some(true);
            (CountryCatalog::empty(), Some((catalog, Duration::from_millis(ms))))
        }
        None => (catalog, None),
    };

    let store = SelectionStore::new(options, initial).with_timing(config.timing);
    let settings = ViewSettings {
        trigger_style: config.trigger_style,
        limits: config.placement,
        trigger_row: args.row,
        echo_controlled: args.controlled,
        styles: PickerStyles::new(ColorConfig::from_env_and_args(args.no_color)),
        ..ViewSettings::default()
    };

    let line = view::run(store, settings, pending)?;
    info!(exit = %line, "picker closed");
    println!("{line}");

    Ok(())
}

fn init_logging(config: &config::ResolvedConfig) -> Result<(), AppError> {
    country_picker::logging::init(&config.log_file_path)?;
    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );
    Ok(())
}
