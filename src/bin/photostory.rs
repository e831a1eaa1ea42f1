use std::{io::Write, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use photostory::{
    BackgroundStrategy, ImageSizes, LayoutOpts, LayoutRng, PlanOpts, Photostory, ProbedImageSizes,
    Rectangle,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "photostory", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out every slide of a story and write the layout as JSON.
    Layout(LayoutArgs),
    /// Validate a story and print the size of every referenced image.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input story JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Slide canvas width.
    #[arg(long, default_value_t = 1920.0)]
    width: f64,

    /// Slide canvas height.
    #[arg(long, default_value_t = 1080.0)]
    height: f64,

    /// Story seed; the same seed reproduces the same layout. Random when absent.
    #[arg(long)]
    seed: Option<u64>,

    /// Background placement strategy.
    #[arg(long, value_enum, default_value_t = StrategyArg::Radial)]
    strategy: StrategyArg,

    /// Output JSON path (stdout when absent).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input story JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Radial,
    Regions,
}

impl From<StrategyArg> for BackgroundStrategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::Radial => BackgroundStrategy::Radial,
            StrategyArg::Regions => BackgroundStrategy::Regions,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("photostory=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let story = Photostory::load(&args.in_path)
        .with_context(|| format!("load story '{}'", args.in_path.display()))?;

    let seed = args
        .seed
        .unwrap_or_else(|| LayoutRng::from_entropy().next_seed());
    tracing::info!(seed, "planning story");

    let opts = PlanOpts {
        canvas: Rectangle::new(0.0, 0.0, args.width, args.height),
        seed,
        layout: LayoutOpts {
            background_strategy: args.strategy.into(),
            ..LayoutOpts::default()
        },
        ..PlanOpts::default()
    };
    let mut sizes = ProbedImageSizes::new();
    let paths = story.unique_image_paths();
    let ok = sizes.prefetch(&paths);
    tracing::info!("probed {ok} of {} images", paths.len());
    let layout = photostory::plan_story(&story, &mut sizes, &opts)?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = std::fs::File::create(out)
                .with_context(|| format!("create layout file '{}'", out.display()))?;
            serde_json::to_writer_pretty(std::io::BufWriter::new(f), &layout)
                .with_context(|| format!("write layout '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &layout).context("write layout to stdout")?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let story = Photostory::load(&args.in_path)
        .with_context(|| format!("load story '{}'", args.in_path.display()))?;

    let paths = story.unique_image_paths();
    let mut sizes = ProbedImageSizes::new();
    let mut failed = 0;

    let mut stdout = std::io::stdout().lock();
    for path in &paths {
        match sizes.size_of(path) {
            Ok(size) => writeln!(stdout, "{} {}x{}", path.display(), size.width, size.height)?,
            Err(_) => failed += 1,
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} images could not be read", paths.len());
    }
    eprintln!("{} slides, {} images ok", story.slides.len(), paths.len());
    Ok(())
}
