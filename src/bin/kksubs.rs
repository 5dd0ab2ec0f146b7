use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "kksubs", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply one subtitle group to one image.
    Apply(ApplyArgs),
    /// Apply scripts to every image of a folder.
    Batch(BatchArgs),
    /// Load and validate scripts without rendering.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Source image.
    #[arg(long)]
    image: PathBuf,

    /// Subtitle script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Output image path; the extension picks the format.
    #[arg(long)]
    out: PathBuf,

    /// Group to apply; defaults to the group whose image id matches the image file name.
    #[arg(long)]
    group: Option<String>,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Folder of source images.
    #[arg(long)]
    input: PathBuf,

    /// Output root; one sub-folder per script.
    #[arg(long)]
    output: PathBuf,

    /// Subtitle script JSON (repeatable).
    #[arg(long, required = true)]
    script: Vec<PathBuf>,

    /// Worker threads (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Subtitle script JSON (repeatable).
    #[arg(long, required = true)]
    script: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Apply(args) => cmd_apply(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_script(path: &Path) -> anyhow::Result<kksubs::SubtitleScript> {
    kksubs::SubtitleScript::from_path(path)
        .with_context(|| format!("load script '{}'", path.display()))
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let script = load_script(&args.script)?;
    let image_id = match args.group {
        Some(id) => id,
        None => args
            .image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .context("image path has no file name")?,
    };

    let groups = script.into_groups()?;
    let group = groups
        .iter()
        .find(|g| g.image_id == image_id)
        .with_context(|| format!("script has no group for image '{image_id}'"))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let mut app = kksubs::Applicator::new(kksubs::VelloTextRasterizer::new());
    kksubs::apply_group_to_file(&mut app, &args.image, group, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let mut job = kksubs::BatchJob::new(&args.input, &args.output);
    job.threads = args.threads;
    for path in &args.script {
        let script = load_script(path)?;
        let text_id = script
            .text_id()
            .map(str::to_owned)
            .with_context(|| format!("script path '{}' has no file stem", path.display()))?;
        job = job.with_script(text_id, script);
    }

    let report = job.run()?;
    eprintln!(
        "processed={} copied={} failed={}",
        report.processed,
        report.copied,
        report.failed.len()
    );
    for failure in &report.failed {
        eprintln!(
            "  {}/{}: {}",
            failure.text_id, failure.image_id, failure.error
        );
    }
    if !report.is_success() {
        anyhow::bail!("{} image(s) failed", report.failed.len());
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    for path in &args.script {
        let script = load_script(path)?;
        script
            .validate()
            .with_context(|| format!("validate script '{}'", path.display()))?;
        eprintln!(
            "ok {} ({} group(s))",
            path.display(),
            script.image_ids().count()
        );
    }
    Ok(())
}
