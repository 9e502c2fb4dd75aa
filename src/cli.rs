use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use common::WidgetId;
use engine::{Catalog, Dashboard, KeyValueStore};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::storage::JsonFileStore;

pub mod commands;

use commands::{catalog, feed, layout, profile, show, widget};

#[derive(Parser)]
#[command(name = "bankboard")]
#[command(about = "Configurable banking dashboard: profiles, widgets and their grid layout")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML)
    ///
    /// Defaults to ./bankboard.toml when it exists.
    #[arg(short, long, env = "BANKBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Overrides the configured storage file
    #[arg(short, long)]
    pub storage: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the active profiles, widgets and the current layout
    Show,
    /// List the profiles and widgets of the catalog
    Catalog,
    /// Enable or disable profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Show or hide single widgets
    Widget {
        #[command(subcommand)]
        action: WidgetAction,
    },
    /// Edit, reset, save or export the layout
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },
    /// Print what a widget's data source returns
    Feed {
        #[command(subcommand)]
        feed: FeedKind,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Flip a profile on or off. The base profile cannot be turned off.
    Toggle { id: String },
}

#[derive(Subcommand)]
pub enum WidgetAction {
    /// Flip a widget on or off. Base widgets are always shown.
    Toggle { id: String },
}

#[derive(Subcommand)]
pub enum LayoutAction {
    /// Throw the saved layout away and lay the visible widgets out again
    Reset,
    /// Persist the current layout
    Save,
    /// Move a widget to a grid position
    Move { id: String, x: u32, y: u32 },
    /// Resize a widget, clamped to its bounds
    Resize { id: String, w: u32, h: u32 },
    /// Print the layout as JSON
    Export,
}

#[derive(Subcommand)]
pub enum FeedKind {
    /// Financial news, optionally restricted to topics
    News {
        /// Keep items tagged with any of these topics
        #[arg(short, long)]
        topic: Vec<String>,
    },
    /// Quotes for a watch list
    Topics {
        /// Watched symbols; the default watch list when empty
        names: Vec<String>,
    },
    /// Balance breakdown per product family
    Balance,
    /// Recent transactions
    Transactions,
}

impl Commands {
    /// Whether the command changes the dashboard and ends with a layout save.
    fn mutates(&self) -> bool {
        match self {
            Commands::Profile { .. } | Commands::Widget { .. } => true,
            Commands::Layout { action } => !matches!(action, LayoutAction::Export | LayoutAction::Save),
            Commands::Show | Commands::Catalog | Commands::Feed { .. } => false,
        }
    }
}

/// Store key of the widgets hidden with `widget toggle`. Startup re-derives
/// the active widgets from the profiles, so each invocation restores them.
pub const HIDDEN_WIDGETS_KEY: &str = "hiddenWidgets";

fn load_hidden(store: &JsonFileStore) -> Vec<WidgetId> {
    let raw = match store.get(HIDDEN_WIDGETS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read hidden widgets");
            return Vec::new();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring unreadable hidden widget list");
        Vec::new()
    })
}

fn save_hidden(board: &mut Dashboard<JsonFileStore>) -> Result<()> {
    let hidden = serde_json::to_string(&board.hidden_widgets())?;
    if board.store().get(HIDDEN_WIDGETS_KEY)?.as_deref() == Some(hidden.as_str()) {
        return Ok(());
    }
    board.store_mut().set(HIDDEN_WIDGETS_KEY, &hidden)?;
    Ok(())
}

/// Builds the dashboard for one invocation from the configured catalog and store.
pub fn open_dashboard(config: &AppConfig) -> Result<Dashboard<JsonFileStore>> {
    let catalog = match &config.catalog_path {
        Some(path) => {
            let document = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog {}", path.display()))?;
            Catalog::from_json(&document).with_context(|| format!("Invalid catalog {}", path.display()))?
        }
        None => Catalog::banking(),
    };
    let store = JsonFileStore::open(&config.storage_path);
    let hidden = load_hidden(&store);

    let mut board = Dashboard::init(catalog, store, config.dashboard_options());
    let restored = board.restore_hidden(&hidden);
    debug!(hidden = restored.len(), "Dashboard opened");
    Ok(board)
}

impl Cli {
    pub async fn run(self, config: &AppConfig, out: &mut dyn Write) -> Result<()> {
        let mut config = config.clone();
        if let Some(storage) = self.storage {
            config.storage_path = storage;
        }
        debug!(storage = %config.storage_path.display(), "Opening dashboard");

        let mut board = open_dashboard(&config)?;
        let mutates = self.command.mutates();

        match self.command {
            Commands::Show => show(&board, out)?,
            Commands::Catalog => catalog(board.catalog(), out)?,
            Commands::Profile {
                action: ProfileAction::Toggle { id },
            } => profile::toggle(&mut board, &id, out)?,
            Commands::Widget {
                action: WidgetAction::Toggle { id },
            } => widget::toggle(&mut board, &id, out)?,
            Commands::Layout { action } => layout::run(&mut board, action, out)?,
            Commands::Feed { feed: kind } => feed::run(kind, config.feed_latency_ms, out).await?,
        }

        if mutates {
            if !board.save_layout() {
                warn!("Layout could not be saved");
            }
            if let Err(e) = save_hidden(&mut board) {
                warn!(error = %e, "Hidden widgets could not be saved");
                writeln!(out, "! Could not remember hidden widgets ({e}); they reappear on the next run")?;
            }
        }
        for notice in board.take_notices() {
            writeln!(out, "! {notice}")?;
        }
        info!("Done");
        Ok(())
    }
}
