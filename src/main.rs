use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;

use magnifier::capture::image::SourceImage;
use magnifier::config::MagnifierConfig;
use magnifier::render::image::{PixmapRenderer, rgba_from_pixmap};
use magnifier::render::surface::SurfaceId;
use magnifier::session::messages::{Msg, Script};
use magnifier::widget::magnifier::Magnifier;

/// Drag rectangles over an image and write the magnified result
#[derive(Parser, Debug)]
#[command(name = "magnifier", version, about)]
struct Cli {
    /// Image to display
    image: PathBuf,

    /// Drag from (X0, Y0) to (X1, Y1) in surface pixels. Repeatable.
    #[arg(long, value_name = "X0,Y0,X1,Y1", value_parser = parse_drag)]
    drag: Vec<[f64; 4]>,

    /// JSON list of messages replayed after the drags
    #[arg(long)]
    script: Option<PathBuf>,

    /// Surface width in pixels (overrides config)
    #[arg(long)]
    width: Option<u32>,

    /// Surface height in pixels (overrides config)
    #[arg(long)]
    height: Option<u32>,

    /// Where to write the primary surface
    #[arg(short, long, default_value = "magnified.png")]
    output: PathBuf,

    /// Paint the selection indicator into the output
    #[arg(long)]
    show_indicator: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective configuration back to the user config directory
    #[arg(long)]
    save_config: bool,
}

fn parse_drag(value: &str) -> Result<[f64; 4], String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("invalid coordinate: {err}"))?;
    <[f64; 4]>::try_from(parts).map_err(|parts| {
        format!("expected 4 comma-separated numbers, got {}", parts.len())
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Cli::parse();

    let mut config = match &args.config {
        Some(path) => MagnifierConfig::load_from(path)?,
        None => MagnifierConfig::load(),
    };
    if let Some(width) = args.width {
        config.surface_width = width;
    }
    if let Some(height) = args.height {
        config.surface_height = height;
    }
    if config.surface_width == 0 || config.surface_height == 0 {
        bail!(
            "surface must be at least 1x1, got {}x{}",
            config.surface_width,
            config.surface_height
        );
    }
    if args.save_config {
        config.save();
    }

    let renderer = PixmapRenderer::new(config.surface_width, config.surface_height)?
        .with_indicator_style(config.indicator_style())
        .with_smooth_scaling(config.smooth_scaling);
    let mut magnifier = Magnifier::new(renderer);
    magnifier.load(SourceImage::open(&args.image)?)?;

    let mut steps: Vec<Msg> = args
        .drag
        .iter()
        .flat_map(|&[x0, y0, x1, y1]| Msg::drag(x0, y0, x1, y1))
        .collect();
    if let Some(path) = &args.script {
        steps.extend(Script::load(path)?.steps);
    }

    for (index, msg) in steps.into_iter().enumerate() {
        let event = magnifier
            .update(msg)
            .with_context(|| format!("Step {index} ({msg:?}) failed"))?;
        log::debug!("Step {index}: {msg:?} -> {event:?}");
    }

    let renderer = magnifier.into_renderer();
    let output = if args.show_indicator {
        rgba_from_pixmap(&renderer.composite())
    } else {
        renderer.snapshot(SurfaceId::Primary)
    };
    output
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Wrote {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drag() {
        assert_eq!(parse_drag("1,2.5, 3,4").unwrap(), [1.0, 2.5, 3.0, 4.0]);
        assert!(parse_drag("1,2,3").is_err());
        assert!(parse_drag("1,2,3,x").is_err());
    }

    #[test]
    fn test_args_accept_repeated_drags() {
        let args = Cli::try_parse_from([
            "magnifier",
            "photo.png",
            "--drag",
            "0,0,10,10",
            "--drag",
            "5,5,1,1",
            "--width",
            "320",
        ])
        .unwrap();
        assert_eq!(args.drag.len(), 2);
        assert_eq!(args.drag[1], [5.0, 5.0, 1.0, 1.0]);
        assert_eq!(args.width, Some(320));
        assert_eq!(args.output, PathBuf::from("magnified.png"));
    }
}
