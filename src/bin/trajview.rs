use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use trajview::{
    Canvas, FontSource, Orchestrator, ProjectLayout, RenderMode, RenderOpts, RenderOutcome, RenderReport,
    RenderSession, parse_point_file, render_point_file, write_png,
};

#[derive(Parser, Debug)]
#[command(name = "trajview", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the simulator, then animate the path it writes.
    Run(RunArgs),
    /// Animate an existing point file.
    Show(ShowArgs),
    /// Render only the final frame of a point file as a PNG.
    Still(StillArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Project root: searched for the simulator and used as its working directory.
    #[arg(long, default_value = ".")]
    project_dir: PathBuf,

    /// Simulator executable name (`.exe` suffix is also matched).
    #[arg(long, default_value = trajview::DEFAULT_EXE_NAME)]
    exe_name: String,

    #[command(flatten)]
    render: RenderFlags,
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Input point file.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    render: RenderFlags,
}

#[derive(Args, Debug)]
struct StillArgs {
    /// Input point file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Canvas edge length in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Annotation font: `auto`, `none`, or a TTF/OTF path.
    #[arg(long)]
    font: Option<String>,
}

#[derive(Args, Debug)]
struct RenderFlags {
    /// Presentation mode; `auto` inspects the host.
    #[arg(long, value_enum, default_value_t = ModeChoice::Auto)]
    mode: ModeChoice,

    /// Delay between frames in milliseconds.
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Headless artifact path.
    #[arg(long)]
    artifact: Option<PathBuf>,

    /// Canvas edge length in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Annotation font: `auto`, `none`, or a TTF/OTF path.
    #[arg(long)]
    font: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Auto,
    Interactive,
    Headless,
}

impl RenderFlags {
    fn mode(&self) -> Option<RenderMode> {
        match self.mode {
            ModeChoice::Auto => None,
            ModeChoice::Interactive => Some(RenderMode::Interactive),
            ModeChoice::Headless => Some(RenderMode::Headless),
        }
    }

    fn opts(&self) -> anyhow::Result<RenderOpts> {
        let mut opts = base_opts(self.size, self.font.as_deref())?;
        if let Some(ms) = self.interval_ms {
            opts = opts.with_frame_interval(Duration::from_millis(ms));
        }
        if let Some(path) = &self.artifact {
            opts = opts.with_artifact_path(path.clone());
        }
        Ok(opts)
    }
}

fn base_opts(size: Option<u32>, font: Option<&str>) -> anyhow::Result<RenderOpts> {
    let mut opts = RenderOpts::from_env();
    if let Some(px) = size {
        opts = opts.with_canvas(Canvas::new(px, px)?);
    }
    if let Some(raw) = font {
        opts = opts.with_font(FontSource::parse(raw));
    }
    Ok(opts)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trajview=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Show(args) => cmd_show(args),
        Command::Still(args) => cmd_still(args),
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let layout = ProjectLayout::new(args.project_dir).with_exe_name(args.exe_name);
    let orchestrator = Orchestrator::new(layout);

    let elapsed = orchestrator
        .execute()
        .context("error executing the simulator")?
        .into_result()
        .context("error executing the simulator")?;
    println!("Simulator executed successfully.");
    println!("Execution Time: {:.4} seconds", elapsed.as_secs_f64());

    let report = orchestrator.render_output(args.render.mode(), args.render.opts()?)?;
    print_report(&report);
    Ok(())
}

fn cmd_show(args: ShowArgs) -> anyhow::Result<()> {
    let report = render_point_file(&args.in_path, args.render.mode(), args.render.opts()?)?;
    print_report(&report);
    Ok(())
}

fn cmd_still(args: StillArgs) -> anyhow::Result<()> {
    let parsed = parse_point_file(&args.in_path)?;
    if parsed.dataset.is_empty() {
        println!("No valid points found in the file.");
        return Ok(());
    }
    let opts = base_opts(args.size, args.font.as_deref())?;
    let background = opts.palette.background;
    let mut session = RenderSession::new(parsed.dataset, opts)?;
    let frame = session.render_still()?;
    write_png(&frame, &args.out, background)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn print_report(report: &RenderReport) {
    if report.skipped_lines > 0 {
        eprintln!("skipped {} invalid line(s)", report.skipped_lines);
    }
    match &report.outcome {
        RenderOutcome::NoData => println!("No valid points found in the file."),
        RenderOutcome::Exported { frames, path } => match path {
            Some(p) => println!("Animation saved as GIF ({frames} frames): {}", p.display()),
            None => println!("Animation exported ({frames} frames)."),
        },
        RenderOutcome::Displayed { frames_shown } => {
            println!("Window closed after {frames_shown} frames.")
        }
    }
}
