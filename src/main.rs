//! Flashlight demo - headless grid simulation

use clap::Parser;
use flashlight::controller::{Controller, VisibleWindow};
use flashlight::delegate::{Dimensions, ItemMount, Teardown};
use flashlight::host::{HeadlessViewport, Size, Viewport};
use flashlight::model::{GridError, ItemId, RawItem, SectionIndex};
use flashlight::pager::MemoryPager;
use serde::Serialize;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::info;

/// Flashlight - simulate a virtualized justified grid and print its state
#[derive(Parser, Debug)]
#[command(name = "flashlight")]
#[command(version)]
#[command(about = "Simulate a virtualized justified-row grid over synthetic items")]
pub struct Args {
    /// Number of synthetic items
    #[arg(short = 'n', long, default_value = "500")]
    pub items: usize,

    /// Items per page served by the pager
    #[arg(short, long, default_value = "50", value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: u32,

    /// Viewport width in pixels
    #[arg(long, default_value = "1200")]
    pub width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value = "800")]
    pub height: f64,

    /// Pixels scrolled per step
    #[arg(long, default_value = "400")]
    pub step: f64,

    /// Number of scroll steps
    #[arg(short, long, default_value = "10")]
    pub steps: usize,

    /// Seed for synthetic aspect ratios
    #[arg(long, default_value = "7")]
    pub seed: u64,

    /// Resize the viewport to this width halfway through
    #[arg(long)]
    pub resize: Option<f64>,

    /// Gap between items and rows, in pixels
    #[arg(long)]
    pub margin: Option<f64>,

    /// Sum of aspect ratios at which a row closes
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Rows per section
    #[arg(long)]
    pub section_rows: Option<usize>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// One line of output.
#[derive(Debug, Serialize)]
struct StepReport {
    step: usize,
    scroll_top: f64,
    content_height: f64,
    sections: usize,
    mounted: Vec<SectionIndex>,
    window: Option<VisibleWindow>,
    tiled_items: usize,
    rendered: usize,
    exhausted: bool,
}

/// Multiplier of Knuth's MMIX 64-bit linear congruential generator.
const LCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
/// Increment of Knuth's MMIX 64-bit linear congruential generator.
const LCG_INCREMENT: u64 = 1_442_695_040_888_963_407;
/// Bits of an `f64` mantissa; the top bits of the state become a unit float.
const MANTISSA_BITS: u32 = 53;

/// Deterministic aspect ratios in `[0.5, 2.0)`, from an MMIX LCG stream.
fn synthetic_items(count: usize, seed: u64) -> Vec<RawItem> {
    let mut state = seed;
    (0..count)
        .map(|i| {
            state = state.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT);
            let unit = (state >> (64 - MANTISSA_BITS)) as f64 / (1u64 << MANTISSA_BITS) as f64;
            RawItem::new(format!("item-{i}"), 0.5 + unit * 1.5)
        })
        .collect()
}

/// Resolve pages and visibility batches until nothing changes.
fn settle(
    controller: &mut Controller<HeadlessViewport>,
    pager: &MemoryPager,
) -> Result<(), GridError> {
    loop {
        let mut progressed = false;
        while let Some(response) = pager.resolve_next() {
            controller.receive(response)?;
            progressed = true;
        }

        let update = controller.pump_visibility();
        if !(progressed || update.changed() || update.requested_page) {
            return Ok(());
        }
    }
}

fn report(controller: &Controller<HeadlessViewport>, step: usize, rendered: usize) -> StepReport {
    StepReport {
        step,
        scroll_top: controller.host().scroll_top(),
        content_height: controller.content_height(),
        sections: controller.sections().len(),
        mounted: controller.mounted(),
        window: controller.window(),
        tiled_items: controller.tiled_items(),
        rendered,
        exhausted: controller.cursor().is_none(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = flashlight::config::load_config_with_precedence(args.config.clone())?;
        let merged = flashlight::config::merge_config(config_file);
        let with_env = flashlight::config::apply_env_overrides(merged);
        flashlight::config::apply_cli_overrides(
            with_env,
            args.margin,
            args.threshold,
            args.section_rows,
        )
    };

    flashlight::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let pager = MemoryPager::new(synthetic_items(args.items, args.seed), args.page_size as usize);
    let rendered = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&rendered);
    let render = move |_id: &ItemId, _mount: &ItemMount, _dims: Dimensions| -> Option<Teardown> {
        counter.set(counter.get() + 1);
        None
    };

    let mut controller = Controller::new(
        HeadlessViewport::new(args.width, args.height),
        pager.clone(),
        render,
        config.grid_options(),
        MemoryPager::first_cursor(),
    );
    controller.attach()?;
    settle(&mut controller, &pager)?;

    for step in 0..=args.steps {
        if step > 0 {
            controller.host_mut().scroll_by(args.step);
        }
        if let Some(width) = args.resize.filter(|_| step == args.steps / 2 && step > 0) {
            controller.host_mut().resize(width, args.height);
            controller.on_resize(Size::new(width, args.height));
            controller.tick();
        }
        settle(&mut controller, &pager)?;

        println!(
            "{}",
            serde_json::to_string(&report(&controller, step, rendered.get()))?
        );
    }

    info!(
        "Simulation finished: {} sections, {} items rendered",
        controller.sections().len(),
        rendered.get()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["flashlight", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["flashlight", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["flashlight"]);
        assert_eq!(args.items, 500);
        assert_eq!(args.page_size, 50);
        assert_eq!(args.width, 1200.0);
        assert_eq!(args.height, 800.0);
        assert_eq!(args.steps, 10);
        assert_eq!(args.resize, None);
        assert_eq!(args.margin, None);
        assert_eq!(args.threshold, None);
        assert_eq!(args.section_rows, None);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_page_size_rejects_zero() {
        let result = Args::try_parse_from(["flashlight", "--page-size", "0"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_short_flags() {
        let args = Args::parse_from(["flashlight", "-n", "42", "-p", "7", "-s", "3"]);
        assert_eq!(args.items, 42);
        assert_eq!(args.page_size, 7);
        assert_eq!(args.steps, 3);
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["flashlight", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_layout_overrides_flow_through_precedence_chain() {
        use flashlight::config::{apply_cli_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            margin: Some(6.0),
            row_aspect_ratio_threshold: Some(4.0),
            ..ConfigFile::default()
        };
        let merged = merge_config(Some(config_file));
        assert_eq!(merged.margin, 6.0);

        let args = Args::parse_from(["flashlight", "--margin", "1.5"]);
        let with_cli = apply_cli_overrides(merged, args.margin, args.threshold, args.section_rows);
        assert_eq!(with_cli.margin, 1.5, "CLI margin overrides the file");
        assert_eq!(with_cli.row_aspect_ratio_threshold, 4.0);
    }

    #[test]
    fn test_synthetic_items_are_deterministic_and_in_range() {
        let a = synthetic_items(100, 7);
        let b = synthetic_items(100, 7);
        assert_eq!(a, b);
        assert!(a.iter().all(|i| (0.5..2.0).contains(&i.aspect_ratio)));
        assert_ne!(a, synthetic_items(100, 8));
    }

    #[test]
    fn test_settle_loads_enough_to_fill_viewport() {
        let pager = MemoryPager::new(synthetic_items(200, 1), 20);
        let mut controller = Controller::new(
            HeadlessViewport::new(600.0, 400.0),
            pager.clone(),
            |_: &ItemId, _: &ItemMount, _: Dimensions| -> Option<Teardown> { None },
            flashlight::config::GridOptions::default(),
            MemoryPager::first_cursor(),
        );
        controller.attach().expect("attach");
        settle(&mut controller, &pager).expect("settle");

        assert!(controller.content_height() >= 400.0);
        assert!(!controller.mounted().is_empty());
        assert_eq!(pager.pending_len(), 0);
    }
}
