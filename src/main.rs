use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use memmap2::Mmap;

use pagetoc::config::{self, ConfigFile, LevelRange, TocConfig};
use pagetoc::error::PagetocError;
use pagetoc::types::Mount;
use pagetoc::view::TocView;
use pagetoc::{bridge, format, inject, scan, toc};

#[derive(Parser)]
#[command(
    name = "pagetoc",
    version,
    about = "Auto-generated, navigable table of contents for web pages"
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the heading outline of a page
    Outline {
        file: PathBuf,
        /// Emit entries as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        opts: TocOpts,
    },
    /// Splice the panel, overlay and toggle markup into a page
    Inject {
        file: PathBuf,
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        #[command(flatten)]
        opts: TocOpts,
    },
    /// Run the host event protocol over stdio for a page
    Serve {
        file: PathBuf,
        #[command(flatten)]
        opts: TocOpts,
    },
    /// Generate shell completions
    Completions { shell: Shell },
}

#[derive(clap::Args)]
struct TocOpts {
    /// Preset: page, article, or one defined in the config file
    #[arg(long)]
    preset: Option<String>,
    /// Heading ranks to include, e.g. "2-3"
    #[arg(long, value_name = "MIN-MAX")]
    levels: Option<String>,
    /// Activation offset from the viewport top, in px
    #[arg(long, value_name = "PX")]
    offset: Option<u32>,
    /// Id of the container the panel mounts into
    #[arg(long, value_name = "ID")]
    mount: Option<String>,
    /// Panel title
    #[arg(long)]
    title: Option<String>,
    /// TOML config file with defaults and extra presets
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pagetoc: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Cmd::Outline { file, json, opts } => {
            let config = resolve_config(&opts)?;
            let doc = map_document(&file)?;
            let result = scan::scan(doc.bytes(), config.levels, &config.mount_id);
            match toc::build(&result.headings) {
                Some(toc) if json => println!("{}", serde_json::to_string_pretty(toc.entries())?),
                Some(toc) => print!("{}", format::outline(&file, &toc)),
                None if json => println!("[]"),
                None => println!("{}", format::outline_header(&file, 0)),
            }
        }

        Cmd::Inject { file, output, opts } => {
            let config = resolve_config(&opts)?;
            let doc = map_document(&file)?;
            let bytes = doc.bytes();
            let result = scan::scan(bytes, config.levels, &config.mount_id);
            // Zero matched headings: the page passes through untouched.
            let out = match toc::build(&result.headings) {
                Some(toc) => inject::inject(bytes, &result, &toc, &config),
                None => bytes.to_vec(),
            };
            match output {
                Some(path) => fs::write(&path, out).map_err(|e| PagetocError::IoError {
                    path: path.clone(),
                    source: e,
                })?,
                None => io::stdout().write_all(&out)?,
            }
        }

        Cmd::Serve { file, opts } => {
            let config = resolve_config(&opts)?;
            let doc = map_document(&file)?;
            let result = scan::scan(doc.bytes(), config.levels, &config.mount_id);
            let view = toc::build(&result.headings).map(|toc| {
                let mount = if result.mount_at.is_some() {
                    Mount::Container
                } else {
                    Mount::Body
                };
                TocView::new(toc, config, mount)
            });
            if view.is_none() {
                log::info!("{}: no headings matched, serving a no-op session", file.display());
            }
            bridge::run(view)?;
        }

        Cmd::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pagetoc", &mut io::stdout());
        }
    }
    Ok(())
}

/// Layering: built-in default → config file → preset → CLI flags.
fn resolve_config(opts: &TocOpts) -> Result<TocConfig, PagetocError> {
    let file = match &opts.config {
        Some(path) => Some(ConfigFile::load(path)?),
        None => None,
    };
    let mut config = config::resolve(opts.preset.as_deref(), file.as_ref())?;
    if let Some(spec) = &opts.levels {
        config.levels = LevelRange::parse(spec)?;
    }
    if let Some(px) = opts.offset {
        config.offset_px = px;
    }
    if let Some(mount) = &opts.mount {
        config.mount_id = mount.clone();
    }
    if let Some(title) = &opts.title {
        config.panel_title = title.clone();
    }
    Ok(config)
}

enum Doc {
    Empty,
    Mapped(Mmap),
}

impl Doc {
    fn bytes(&self) -> &[u8] {
        match self {
            Self::Empty => &[],
            Self::Mapped(mmap) => &mmap[..],
        }
    }
}

/// Map the page into memory. Empty check before mmap — mmap on a 0-byte
/// file may fail on some platforms.
fn map_document(path: &Path) -> Result<Doc, PagetocError> {
    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(PagetocError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            return Err(PagetocError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(PagetocError::IoError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    if meta.len() == 0 {
        return Ok(Doc::Empty);
    }

    let file = fs::File::open(path).map_err(|e| PagetocError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| PagetocError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Doc::Mapped(mmap))
}
