// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::InspectorConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "explode-inspector")]
#[command(about = "Exploded-view part inspector for glTF models", long_about = None)]
pub struct Cli {
    /// glTF/GLB model to load at startup
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Event script to replay (defaults to stdin)
    #[arg(long)]
    pub events: Option<PathBuf>,

    /// Explosion parameter applied right after loading
    #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
    pub explode: Option<f32>,

    /// Displacement at explosion parameter 1
    #[arg(long = "scale-factor")]
    pub scale_factor: Option<f32>,

    /// Clamp explosion parameters to the configured range
    #[arg(long, default_value = "false")]
    pub clamp: bool,

    /// Viewport size, e.g. 1280x720
    #[arg(long, value_parser = parse_viewport)]
    pub viewport: Option<[f32; 2]>,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied
    pub fn resolve_config(&self) -> Result<InspectorConfig> {
        let mut config = match &self.config {
            Some(path) => InspectorConfig::load(path)?,
            None => InspectorConfig::default(),
        };

        if let Some(scale) = self.scale_factor {
            config.explode.scale_factor = scale;
        }
        if self.clamp {
            config.explode.clamp = true;
        }
        if let Some(viewport) = self.viewport {
            config.viewport = viewport;
        }

        config.validate().context("Invalid command-line options")?;
        Ok(config)
    }
}

fn parse_finite(text: &str) -> Result<f32, String> {
    text.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("expected a finite number, got {:?}", text))
}

fn parse_viewport(text: &str) -> Result<[f32; 2], String> {
    let (w, h) = text
        .split_once(|c| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", text))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| *v > 0.0 && v.is_finite())
            .ok_or_else(|| format!("invalid viewport dimension {:?}", s))
    };
    Ok([parse(w)?, parse(h)?])
}
