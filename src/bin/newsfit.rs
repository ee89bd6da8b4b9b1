use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use newsfit::{
    LayoutDescription, LayoutError, LayoutOpts, Page, SplitPolicy, Typesetter, TypesetterConfig,
    plan_page, read_size_report, write_lay_file,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "newsfit", version, about = "Lay out a newspaper page")]
struct Cli {
    /// Log each placement attempt and echo typesetter output.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a page described by a JSON file or a saved size report.
    Plan(PlanArgs),
    /// Size, lay out, and typeset a LaTeX newspaper page.
    Run(RunArgs),
}

#[derive(clap::Args, Debug)]
struct LayoutArgs {
    /// How free space is cut after each placement.
    #[arg(long, value_enum, default_value_t = SplitChoice::WidthFirst)]
    split: SplitChoice,

    /// Stretch articles out to the edges of the layout.
    #[arg(long)]
    stretch: bool,
}

impl LayoutArgs {
    fn opts(&self) -> LayoutOpts {
        LayoutOpts {
            split: self.split.into(),
            stretch_edges: self.stretch,
        }
    }
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["page", "report"])))]
struct PlanArgs {
    /// Page description JSON.
    #[arg(long)]
    page: Option<PathBuf>,

    /// Size report captured from a sizing pass.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Layout file to write (defaults to the page's own layout target).
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,

    /// Print the layout description as JSON on stdout.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// LaTeX source of the page.
    #[arg(long)]
    file: PathBuf,

    /// Which passes to run.
    #[arg(long, value_enum, default_value_t = Stage::All)]
    stage: Stage,

    /// LaTeX program to run.
    #[arg(long, default_value = "pdflatex")]
    latex: String,

    /// Passed to LaTeX; also searched for the document class.
    #[arg(long, default_value = ".")]
    output_directory: PathBuf,

    /// Document class that understands the sizing and layoutnews options.
    #[arg(long, default_value = "rjlnewsp4")]
    class: String,

    #[command(flatten)]
    layout: LayoutArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SplitChoice {
    WidthFirst,
    HeightFirst,
}

impl From<SplitChoice> for SplitPolicy {
    fn from(c: SplitChoice) -> Self {
        match c {
            SplitChoice::WidthFirst => SplitPolicy::WidthFirst,
            SplitChoice::HeightFirst => SplitPolicy::HeightFirst,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Stage {
    /// Sizing pass and layout file only.
    Size,
    /// Typeset with an existing layout file.
    Lay,
    /// Both.
    All,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Run(args) => cmd_run(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let infeasible = e
                .downcast_ref::<LayoutError>()
                .is_some_and(LayoutError::is_infeasible);
            if infeasible {
                eprintln!("{e}");
                ExitCode::from(1)
            } else {
                eprintln!("error: {e:#}");
                ExitCode::from(2)
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "newsfit=debug" } else { "newsfit=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_page(args: &PlanArgs) -> anyhow::Result<Page> {
    if let Some(path) = &args.page {
        return Ok(Page::from_path(path)?);
    }
    let path = args
        .report
        .as_deref()
        .context("one of --page or --report is required")?;
    let f = File::open(path).with_context(|| format!("open size report '{}'", path.display()))?;
    Ok(read_size_report(BufReader::new(f))?)
}

/// `explicit`, else the layout file the page names, else `fallback`.
fn lay_target(
    page: &Page,
    explicit: Option<&Path>,
    fallback: Option<PathBuf>,
) -> anyhow::Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    if !page.output_target().is_empty() {
        return Ok(PathBuf::from(page.output_target()));
    }
    fallback.context("no --out given and the page names no layout file")
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let mut page = load_page(&args)?;
    let desc = plan_page(&mut page, &args.layout.opts())?;
    let out = lay_target(&page, args.out.as_deref(), None)?;
    write_lay_file(&desc, &out)?;

    if args.json {
        print_json(&desc)?;
    }
    Ok(())
}

fn print_json(desc: &LayoutDescription) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(desc).context("serialize layout description")?;
    println!("{s}");
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let ts = Typesetter::new(TypesetterConfig {
        program: args.latex.clone(),
        output_dir: args.output_directory.clone(),
        document_class: args.class.clone(),
    });
    tracing::info!(file = %args.file.display(), stage = ?args.stage, "processing");

    if matches!(args.stage, Stage::Size | Stage::All) {
        let mut page = ts.sizing(&args.file)?;
        let desc = plan_page(&mut page, &args.layout.opts())?;
        let fallback = args.file.file_stem().map(|stem| {
            let mut name = stem.to_os_string();
            name.push(".lay");
            args.output_directory.join(name)
        });
        let out = lay_target(&page, None, fallback)?;
        write_lay_file(&desc, &out)?;
    }

    if matches!(args.stage, Stage::Lay | Stage::All) {
        ts.typeset(&args.file)?;
    }
    Ok(())
}
