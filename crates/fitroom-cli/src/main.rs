//! Fitroom CLI - virtual try-on from the terminal

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fitroom_core::asset::ImageAsset;
use fitroom_core::config::Config;
use fitroom_core::error::Error;
use fitroom_core::generation::{BACKGROUND_PRESETS, GeminiClient, POSE_PRESETS, Studio};
use fitroom_core::wardrobe::{self, WardrobeCategory, WardrobeItem};
use tracing::debug;

#[derive(Parser)]
#[command(name = "fitroom")]
#[command(author, version, about = "Virtual try-on studio", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn a photo into a standardized studio model shot
    ModelShot {
        /// Path to the user photo
        photo: PathBuf,
        /// Output file (defaults to a timestamped name in the output dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Try a garment or accessory on a model image
    TryOn {
        /// Path to the model image (a model-shot or earlier try-on output)
        model_image: PathBuf,
        /// Path to the garment or accessory image
        #[arg(required_unless_present = "item")]
        garment_image: Option<PathBuf>,
        /// Use a catalog item instead of a local image
        #[arg(long, conflicts_with = "garment_image")]
        item: Option<String>,
        /// Item category when using a local image (garment or accessory)
        #[arg(long, default_value = "garment")]
        category: String,
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-render an image from a different perspective
    Pose {
        /// Path to the base image
        image: PathBuf,
        /// Perspective instruction
        #[arg(required_unless_present = "preset")]
        perspective: Option<String>,
        /// Preset index from `fitroom poses`
        #[arg(long, conflicts_with = "perspective")]
        preset: Option<usize>,
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the background of an image
    Background {
        /// Path to the base image
        image: PathBuf,
        /// Backdrop description
        #[arg(required_unless_present = "preset")]
        backdrop: Option<String>,
        /// Preset name from `fitroom backgrounds`
        #[arg(long, conflicts_with = "backdrop")]
        preset: Option<String>,
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Browse the wardrobe catalog
    Wardrobe {
        #[command(subcommand)]
        action: WardrobeAction,
    },

    /// List built-in background presets
    Backgrounds,

    /// List built-in pose presets
    Poses,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum WardrobeAction {
    /// List all catalog items
    List,
    /// Show item details
    Show { id: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Reset configuration to defaults
    Reset,
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitroom=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ModelShot { photo, output } => {
            cmd_model_shot(&photo, output.as_deref(), cli.quiet).await
        }

        Commands::TryOn {
            model_image,
            garment_image,
            item,
            category,
            output,
        } => {
            cmd_try_on(
                &model_image,
                garment_image.as_deref(),
                item.as_deref(),
                &category,
                output.as_deref(),
                cli.quiet,
            )
            .await
        }

        Commands::Pose {
            image,
            perspective,
            preset,
            output,
        } => cmd_pose(&image, perspective.as_deref(), preset, output.as_deref(), cli.quiet).await,

        Commands::Background {
            image,
            backdrop,
            preset,
            output,
        } => {
            cmd_background(
                &image,
                backdrop.as_deref(),
                preset.as_deref(),
                output.as_deref(),
                cli.quiet,
            )
            .await
        }

        Commands::Wardrobe { action } => cmd_wardrobe(action, cli.quiet),

        Commands::Backgrounds => cmd_backgrounds(cli.quiet),

        Commands::Poses => cmd_poses(cli.quiet),

        Commands::Config { action } => cmd_config(action, cli.quiet),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

async fn cmd_model_shot(photo: &Path, output: Option<&Path>, quiet: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let studio = build_studio(&config)?;
    let asset = ImageAsset::from_path(photo)?;

    if !quiet {
        println!("Generating model shot from {}...", photo.display());
    }

    let result = studio.generate_model_shot(&asset).await?;
    let saved = save_image(&result, output, &config.output.dir)?;

    if !quiet {
        println!("Model shot saved to {}", saved.display());
        println!("\nNext steps:");
        println!("  fitroom try-on {} --item denim-jacket", saved.display());
        println!("  fitroom wardrobe list");
    }

    Ok(())
}

async fn cmd_try_on(
    model_image: &Path,
    garment_image: Option<&Path>,
    item: Option<&str>,
    category: &str,
    output: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let studio = build_studio(&config)?;
    let model_asset = ImageAsset::from_path(model_image)?;

    let (garment_asset, category, label) = match item {
        Some(id) => {
            let catalog = wardrobe::default_wardrobe();
            let entry = wardrobe::find_item(&catalog, id)
                .ok_or_else(|| Error::WardrobeItemNotFound(id.to_string()))?;
            let asset = fetch_item_image(entry).await?;
            (asset, entry.category, entry.name.clone())
        }
        None => {
            // Clap guarantees the path is present when --item is absent
            let path = garment_image.expect("garment image path");
            let parsed = WardrobeCategory::parse(category).ok_or_else(|| {
                anyhow::anyhow!("Invalid category '{}'. Use 'garment' or 'accessory'.", category)
            })?;
            (
                ImageAsset::from_path(path)?,
                parsed,
                path.display().to_string(),
            )
        }
    };

    if !quiet {
        println!("Trying on {} ({})...", label, category);
    }

    let result = studio
        .generate_try_on(&model_asset, &garment_asset, category)
        .await?;
    let saved = save_image(&result, output, &config.output.dir)?;

    if !quiet {
        println!("Try-on image saved to {}", saved.display());
    }

    Ok(())
}

async fn cmd_pose(
    image: &Path,
    perspective: Option<&str>,
    preset: Option<usize>,
    output: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let studio = build_studio(&config)?;
    let asset = ImageAsset::from_path(image)?;

    let perspective = match (perspective, preset) {
        (Some(text), _) => text.to_string(),
        (None, Some(index)) => POSE_PRESETS
            .get(index)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown pose preset index {}. Run `fitroom poses` to see all presets.",
                    index
                )
            })?
            .to_string(),
        (None, None) => unreachable!("clap enforces perspective or preset"),
    };

    if !quiet {
        println!("Regenerating from perspective: {}", perspective);
    }

    let result = studio.generate_pose_variation(&asset, &perspective).await?;
    let saved = save_image(&result, output, &config.output.dir)?;

    if !quiet {
        println!("Pose variation saved to {}", saved.display());
    }

    Ok(())
}

async fn cmd_background(
    image: &Path,
    backdrop: Option<&str>,
    preset: Option<&str>,
    output: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let studio = build_studio(&config)?;
    let asset = ImageAsset::from_path(image)?;

    let backdrop = match (backdrop, preset) {
        (Some(text), _) => text.to_string(),
        (None, Some(name)) => BACKGROUND_PRESETS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown background preset '{}'. Run `fitroom backgrounds` to see all presets.",
                    name
                )
            })?
            .instruction
            .to_string(),
        (None, None) => unreachable!("clap enforces backdrop or preset"),
    };

    if !quiet {
        println!("Replacing background with: {}", backdrop);
    }

    let result = studio.generate_background(&asset, &backdrop).await?;
    let saved = save_image(&result, output, &config.output.dir)?;

    if !quiet {
        println!("Edited image saved to {}", saved.display());
    }

    Ok(())
}

fn cmd_wardrobe(action: WardrobeAction, quiet: bool) -> anyhow::Result<()> {
    let catalog = wardrobe::default_wardrobe();

    match action {
        WardrobeAction::List => {
            if !quiet {
                println!("Wardrobe:");
            }
            for item in &catalog {
                println!("  {:<16} {} [{}] {}", item.id, item.name, item.category, item.price);
            }
            if !quiet {
                println!("\nTry one on with: fitroom try-on <model-image> --item <id>");
            }
        }
        WardrobeAction::Show { id } => {
            let item = wardrobe::find_item(&catalog, &id)
                .ok_or_else(|| Error::WardrobeItemNotFound(id.clone()))?;
            println!("{} ({})", item.name, item.id);
            println!("  Category: {}", item.category);
            println!("  Price: {}", item.price);
            println!("  Image: {}", item.image_url);
            println!("  {}", item.description);
        }
    }

    Ok(())
}

fn cmd_backgrounds(quiet: bool) -> anyhow::Result<()> {
    if !quiet {
        println!("Background presets:");
    }
    for preset in BACKGROUND_PRESETS {
        println!("  {:<10} {}", preset.name, preset.instruction);
    }
    Ok(())
}

fn cmd_poses(quiet: bool) -> anyhow::Result<()> {
    if !quiet {
        println!("Pose presets:");
    }
    for (index, pose) in POSE_PRESETS.iter().enumerate() {
        println!("  {}: {}", index, pose);
    }
    Ok(())
}

fn cmd_config(action: ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if !quiet {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            for (key, value) in config.list()? {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if !quiet {
                println!("Configuration reset to defaults");
            }
        }
        ConfigAction::Path => {
            println!("{}", Config::config_path()?.display());
        }
    }

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Build the studio from configuration and the environment API key
fn build_studio(config: &Config) -> anyhow::Result<Studio> {
    let api_key = config.generation.resolved_api_key()?.context(
        "API key missing. Set the FITROOM_API_KEY or GEMINI_API_KEY environment variable.",
    )?;

    let client = GeminiClient::builder()
        .api_key(api_key)
        .model(&config.generation.model)
        .timeout_secs(config.generation.timeout_secs)
        .build()?;

    Ok(Studio::new(Arc::new(client)))
}

/// Download a catalog item's source image
async fn fetch_item_image(item: &WardrobeItem) -> anyhow::Result<ImageAsset> {
    debug!(item = %item.id, url = %item.image_url, "Fetching catalog item image");

    let bytes = reqwest::get(&item.image_url)
        .await
        .and_then(|response| response.error_for_status())
        .with_context(|| format!("Failed to fetch catalog image for '{}'", item.id))?
        .bytes()
        .await
        .with_context(|| format!("Failed to read catalog image for '{}'", item.id))?;

    Ok(ImageAsset::from_bytes(&bytes)?)
}

/// Decode a generated data URI and write it next to the configured output dir
fn save_image(data_uri: &str, output: Option<&Path>, output_dir: &str) -> anyhow::Result<PathBuf> {
    let asset = ImageAsset::from_data_uri(data_uri)?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            Path::new(output_dir).join(format!("fitroom_{}.{}", timestamp, asset.extension()))
        }
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, asset.decode()?)
        .with_context(|| format!("Failed to write image: {}", path.display()))?;

    Ok(path)
}
