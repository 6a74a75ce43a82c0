use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bioslide::{
    FrameIndex, JobRequest, OverlayAssets, OverlayCompositor, Pipeline, PipelineConfig,
    ProcessResponse, Workspace, text::svg::TextRenderer, wrap_bio,
};

#[derive(Parser, Debug)]
#[command(name = "bioslide", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one overlay job against a working directory (requires `ffmpeg` on PATH).
    Process(ProcessArgs),
    /// Drive the request handler with a raw method and JSON body.
    Request(RequestArgs),
    /// Annotate a single frame image as a PNG preview.
    Frame(FrameArgs),
    /// Print how a bio wraps onto the card's two lines.
    Wrap(WrapArgs),
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Working directory holding the uploaded inputs and overlay art.
    #[arg(long)]
    workspace: PathBuf,

    /// Creator bio.
    #[arg(long)]
    bio: String,

    /// Creator display name.
    #[arg(long)]
    name: String,

    /// Optional JSON pipeline config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Annotate frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Annotation chunk size (parallel mode only).
    #[arg(long)]
    chunk_size: Option<usize>,
}

#[derive(Parser, Debug)]
struct RequestArgs {
    /// Working directory holding the uploaded inputs and overlay art.
    #[arg(long)]
    workspace: PathBuf,

    /// Request method.
    #[arg(long, default_value = "POST")]
    method: String,

    /// File holding the JSON request body.
    #[arg(long)]
    body: PathBuf,

    /// Optional JSON pipeline config.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Working directory holding the creator photo, logo and overlay art.
    #[arg(long)]
    workspace: PathBuf,

    /// Frame index (1-based).
    #[arg(long)]
    frame: u64,

    /// Input frame PNG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Creator bio.
    #[arg(long)]
    bio: String,

    /// Creator display name.
    #[arg(long)]
    name: String,

    /// Optional JSON pipeline config.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct WrapArgs {
    /// Bio to wrap.
    #[arg(long)]
    bio: String,

    /// First-line character budget.
    #[arg(long, default_value_t = bioslide::text::wrap::DEFAULT_LINE_BUDGET)]
    budget: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Process(args) => cmd_process(args),
        Command::Request(args) => cmd_request(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Wrap(args) => cmd_wrap(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    match path {
        Some(p) => Ok(PipelineConfig::from_path(p)?),
        None => Ok(PipelineConfig::default()),
    }
}

fn print_response(resp: &ProcessResponse) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string(resp).context("serialize response")?
    );
    if !resp.is_success() {
        anyhow::bail!("request failed with status {}", resp.status);
    }
    Ok(())
}

fn cmd_process(args: ProcessArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    let threading = &mut config.opts.threading;
    threading.parallel |= args.parallel;
    if args.threads.is_some() {
        threading.threads = args.threads;
    }
    if let Some(n) = args.chunk_size {
        threading.chunk_size = n;
    }

    let pipeline = Pipeline::new(&args.workspace, config);
    let report = pipeline.run(&JobRequest::new(args.name, args.bio));
    let resp = match report.outcome.error() {
        None => ProcessResponse::success(),
        Some(e) => {
            eprintln!("error: {e:#}");
            ProcessResponse::video_failed()
        }
    };
    print_response(&resp)
}

fn cmd_request(args: RequestArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let body = std::fs::read(&args.body)
        .with_context(|| format!("read request body '{}'", args.body.display()))?;
    let pipeline = Pipeline::new(&args.workspace, config);
    let resp = bioslide::handle_process(&args.method, &body, &pipeline);
    print_response(&resp)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    config.validate()?;
    JobRequest::new(args.name.clone(), args.bio.clone()).validate()?;

    let workspace = Workspace::new(&args.workspace, config.workspace.clone());
    let assets = OverlayAssets::load(&workspace)?;
    let fonts_dir = workspace.fonts_dir();
    let text = TextRenderer::new(&[fonts_dir.as_path()]);
    let lines = wrap_bio(&args.bio, config.layout.wrap_budget);
    let compositor = OverlayCompositor::new(
        &assets,
        &args.name,
        &lines,
        &config.layout,
        config.timeline,
        &text,
    )?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    compositor.annotate_file(&args.in_path, &args.out, FrameIndex(args.frame))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_wrap(args: WrapArgs) -> anyhow::Result<()> {
    let lines = wrap_bio(&args.bio, args.budget);
    println!("{}", lines.line1);
    println!("{}", lines.line2);
    Ok(())
}
