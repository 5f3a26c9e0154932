use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use paywallgen::host::RecordingHost;
use paywallgen::orchestrator::{self, Assets};
use paywallgen::GeneratorConfig;

/// Generate the light and dark paywall layout trees
#[derive(Parser, Debug)]
#[command(name = "paywallgen", version, about)]
struct Cli {
    /// JSON configuration (themes, fonts, copy, gutter)
    #[arg(long)]
    config: Option<PathBuf>,

    /// File holding the app icon PNG as base64 text
    #[arg(long)]
    icon: Option<PathBuf>,

    /// File holding the hero background PNG as base64 text
    #[arg(long)]
    hero: Option<PathBuf>,

    /// Write the generated document here instead of stdout
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// Font family the host should refuse to load (repeatable)
    #[arg(long = "unavailable-font", value_name = "FAMILY")]
    unavailable_fonts: Vec<String>,

    /// Override the gap between the two roots
    #[arg(long)]
    gutter: Option<f64>,

    /// Print the structural fingerprint of each theme tree
    #[arg(long)]
    digest: bool,
}

fn read_asset(path: &Option<PathBuf>) -> anyhow::Result<Option<Vec<u8>>> {
    path.as_ref()
        .map(|p| paywallgen::b64::read_file(p).with_context(|| format!("reading {}", p.display())))
        .transpose()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_json_file(path).context("loading configuration")?,
        None => GeneratorConfig::default(),
    };
    if let Some(gutter) = cli.gutter {
        config.gutter = gutter;
    }

    let placeholder = Assets::placeholder();
    let assets = Assets {
        app_icon: read_asset(&cli.icon)?.unwrap_or(placeholder.app_icon),
        hero_background: read_asset(&cli.hero)?.unwrap_or(placeholder.hero_background),
    };

    let mut host = cli
        .unavailable_fonts
        .iter()
        .fold(RecordingHost::new(), |host, family| host.with_unavailable_family(family.clone()));

    let generated = orchestrator::run(&mut host, &config, &assets)
        .await
        .context("paywall generation failed; no output written")?;

    if cli.digest {
        println!("{}  {}", generated.light.tree.fingerprint(), generated.light.tree.name());
        println!("{}  {}", generated.dark.tree.fingerprint(), generated.dark.tree.name());
    }

    let json = serde_json::to_string_pretty(&host.snapshot())?;
    match &cli.out {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None if !cli.digest => println!("{}", json),
        None => {}
    }
    Ok(())
}
