use std::{collections::BTreeMap, path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "kriti", version)]
struct Cli {
    /// JSON config file; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transform one image with an option string.
    Transform(TransformArgs),
    /// Render a template to PNG.
    Template(TemplateArgs),
    /// Store a local image file under the images root.
    Upload(UploadArgs),
}

#[derive(Parser, Debug)]
struct TransformArgs {
    /// Source path relative to the images root, or an http(s) URL.
    path: String,

    /// Comma separated options, e.g. `width=400,height=300,fit=pad,background=blue`.
    #[arg(long, default_value = "")]
    options: String,

    /// Output file.
    #[arg(long)]
    out: PathBuf,

    /// Give up after this many milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[derive(Parser, Debug)]
struct TemplateArgs {
    /// Template name relative to the templates root.
    name: String,

    /// Template variable as `key=value`; repeatable.
    #[arg(long = "var", value_parser = parse_var)]
    vars: Vec<(String, String)>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct UploadArgs {
    /// Local image file to upload.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Destination path under the images root; its extension picks the stored format.
    #[arg(long)]
    dest: String,
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => kriti::KritiConfig::from_path(path)?,
        None => kriti::KritiConfig::default(),
    };
    let kriti = kriti::Kriti::new(config)?;

    match cli.cmd {
        Command::Transform(args) => cmd_transform(&kriti, args),
        Command::Template(args) => cmd_template(&kriti, args),
        Command::Upload(args) => cmd_upload(&kriti, args),
    }
}

fn cmd_transform(kriti: &kriti::Kriti, args: TransformArgs) -> anyhow::Result<()> {
    let cancel = match args.timeout_ms {
        Some(ms) => kriti::CancelToken::with_timeout(Duration::from_millis(ms)),
        None => kriti::CancelToken::new(),
    };
    let out = kriti.transform(&args.path, &args.options, &cancel)?;
    write_output(&args.out, &out)
}

fn cmd_template(kriti: &kriti::Kriti, args: TemplateArgs) -> anyhow::Result<()> {
    let vars: BTreeMap<String, String> = args.vars.into_iter().collect();
    let out = kriti.render_template(&args.name, &vars, &kriti::CancelToken::new())?;
    write_output(&args.out, &out)
}

fn cmd_upload(kriti: &kriti::Kriti, args: UploadArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read '{}'", args.in_path.display()))?;
    kriti.upload(&args.dest, &bytes)?;
    eprintln!("stored {}", args.dest);
    Ok(())
}

fn write_output(path: &std::path::Path, image: &kriti::EncodedImage) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, &image.bytes)
        .with_context(|| format!("write {} '{}'", image.format, path.display()))?;
    eprintln!(
        "wrote {} ({}x{}, {})",
        path.display(),
        image.width,
        image.height,
        image.content_type()
    );
    Ok(())
}
