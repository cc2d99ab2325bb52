use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use hdrpr_codegen::{GenerateOpts, Platform, SettingsTable};

#[derive(Parser, Debug)]
#[command(name = "hdrpr-codegen", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate config.h/config.cpp (and HdRprPlugin_Global.ds) from the render settings.
    Render(RenderArgs),
    /// Generate HdRprPlugin_Geometry.ds.
    Geometry(InstallArgs),
    /// Generate HdRprPlugin_Light.ds.
    Light(InstallArgs),
    /// Generate every built-in artifact.
    All(AllArgs),
    /// Generate from a custom JSON settings table.
    Table(TableArgs),
    /// Validate the built-in tables, or a JSON table, without writing anything.
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct InstallArgs {
    /// Install root for generated files.
    install: PathBuf,
}

#[derive(Args, Debug)]
struct QualityArgs {
    /// Comma-separated render-quality keys to drop from the menu.
    #[arg(long, value_delimiter = ',', default_value = "")]
    hidden_render_qualities: Vec<String>,

    /// Target platform (windows, linux, darwin). Defaults to the host.
    #[arg(long)]
    platform: Option<Platform>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    install: InstallArgs,

    /// Also emit the Houdini .ds file.
    #[arg(long)]
    generate_ds_files: bool,

    #[command(flatten)]
    quality: QualityArgs,
}

#[derive(Args, Debug)]
struct AllArgs {
    #[command(flatten)]
    install: InstallArgs,

    /// Houdini install root; .ds files are emitted only when given.
    #[arg(long)]
    houdini_root: Option<PathBuf>,

    #[command(flatten)]
    quality: QualityArgs,
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Input settings table JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// .ds name suffix (`HdRprPlugin_<NAME>.ds`).
    #[arg(long)]
    name: String,

    #[command(flatten)]
    install: InstallArgs,

    /// Emit config.h/config.cpp.
    #[arg(long)]
    cpp: bool,

    /// Emit the Houdini .ds file.
    #[arg(long)]
    generate_ds_files: bool,

    /// Target platform (windows, linux, darwin). Defaults to the host.
    #[arg(long)]
    platform: Option<Platform>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Settings table JSON to check instead of the built-in tables.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    #[command(flatten)]
    quality: QualityArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Geometry(args) => cmd_ds_only(args, hdrpr_codegen::generate_geometry_settings),
        Command::Light(args) => cmd_ds_only(args, hdrpr_codegen::generate_light_settings),
        Command::All(args) => cmd_all(args),
        Command::Table(args) => cmd_table(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("install tracing subscriber")
}

fn hidden_qualities(args: &QualityArgs) -> Vec<String> {
    args.hidden_render_qualities
        .iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect()
}

fn opts(install: InstallArgs, platform: Option<Platform>) -> GenerateOpts {
    GenerateOpts {
        install_path: install.install,
        platform: platform.unwrap_or_else(Platform::current),
        ..GenerateOpts::default()
    }
}

fn report(written: &[PathBuf]) {
    for p in written {
        eprintln!("wrote {}", p.display());
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let opts = GenerateOpts {
        generate_ds_files: args.generate_ds_files,
        hidden_render_qualities: hidden_qualities(&args.quality),
        ..opts(args.install, args.quality.platform)
    };
    let written = hdrpr_codegen::generate_render_settings(&opts)
        .context("generate render settings")?;
    report(&written);
    Ok(())
}

fn cmd_ds_only(
    args: InstallArgs,
    generate: fn(&GenerateOpts) -> hdrpr_codegen::CodegenResult<Vec<PathBuf>>,
) -> anyhow::Result<()> {
    // These tables only exist as .ds files; asking for them means asking for the file.
    let opts = GenerateOpts {
        generate_ds_files: true,
        ..opts(args, None)
    };
    let written = generate(&opts)?;
    report(&written);
    Ok(())
}

fn cmd_all(args: AllArgs) -> anyhow::Result<()> {
    let opts = GenerateOpts {
        generate_ds_files: args.houdini_root.is_some(),
        hidden_render_qualities: hidden_qualities(&args.quality),
        ..opts(args.install, args.quality.platform)
    };
    let written = hdrpr_codegen::generate_all(&opts)?;
    report(&written);
    Ok(())
}

fn cmd_table(args: TableArgs) -> anyhow::Result<()> {
    let table = SettingsTable::from_path(&args.in_path)
        .with_context(|| format!("load settings table '{}'", args.in_path.display()))?;
    let opts = GenerateOpts {
        generate_ds_files: args.generate_ds_files,
        ..opts(args.install, args.platform)
    };
    let written = hdrpr_codegen::generate_from_table(&table, &args.name, args.cpp, &opts)?;
    if written.is_empty() {
        tracing::warn!("nothing to generate; pass --cpp and/or --generate-ds-files");
    }
    report(&written);
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let platform = args.quality.platform.unwrap_or_else(Platform::current);
    let tables = match &args.in_path {
        Some(path) => {
            let table = SettingsTable::from_path(path)
                .with_context(|| format!("load settings table '{}'", path.display()))?;
            vec![("custom", table)]
        }
        None => vec![
            (
                "render",
                hdrpr_codegen::tables::render_settings_table_with(&hidden_qualities(
                    &args.quality,
                ))?,
            ),
            ("geometry", hdrpr_codegen::tables::geometry_settings_table()?),
            ("light", hdrpr_codegen::tables::light_settings_table()?),
        ],
    };

    for (name, table) in &tables {
        let layout = hdrpr_codegen::compile_layout(table, platform)
            .with_context(|| format!("check {name} settings"))?;
        eprintln!(
            "{name}: ok ({} categories, {} settings, prefs version {:#010x})",
            layout.categories.len(),
            layout.settings.len(),
            layout.prefs_version
        );
    }
    Ok(())
}
