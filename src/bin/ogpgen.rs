//! ogpgen CLI - render text onto an OGP background image
//!
//! Commands: render, layout
//! Outputs JSON to stdout, logs to stderr
//! Returns non-zero on any failure

use clap::{Args, Parser, Subcommand};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ogpgen::{write_image, OgpError, OgpImage, RenderOptions, RenderReport};

#[derive(Parser)]
#[command(name = "ogpgen", version)]
#[command(about = "ogpgen - OGP Image Generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON options file; flags given on the command line take precedence
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log line breaking and drawing details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the text and write the image
    Render {
        #[command(flatten)]
        args: TextArgs,

        /// Output file path (.png writes PNG, anything else JPEG)
        #[arg(short, long, default_value = "out.jpg")]
        output: PathBuf,
    },

    /// Print the broken lines and their positions without drawing
    Layout {
        #[command(flatten)]
        args: TextArgs,
    },
}

#[derive(Args)]
struct TextArgs {
    /// Output text
    #[arg(long, default_value = "")]
    text: String,

    /// Font path (TrueType/OpenType)
    #[arg(long)]
    fpath: Option<PathBuf>,

    /// Font size
    #[arg(long)]
    fsize: Option<f32>,

    /// Font color code (#RRGGBB or #RRGGBBAA)
    #[arg(long)]
    fcolor: Option<String>,

    /// Background image path
    #[arg(long)]
    bpath: Option<PathBuf>,

    /// Top margin
    #[arg(long, allow_negative_numbers = true)]
    tmargin: Option<i32>,

    /// Side margin
    #[arg(long, allow_negative_numbers = true)]
    smargin: Option<i32>,

    /// Line space
    #[arg(long, allow_negative_numbers = true)]
    lspace: Option<i32>,
}

impl TextArgs {
    fn options(&self, config: Option<&Path>) -> Result<RenderOptions, OgpError> {
        let mut opts = match config {
            Some(path) => RenderOptions::load(path)?,
            None => RenderOptions::default(),
        };

        if let Some(v) = &self.fpath { opts.font_path = v.clone(); }
        if let Some(v) = self.fsize { opts.font_size = v; }
        if let Some(v) = &self.fcolor { opts.font_color = v.clone(); }
        if let Some(v) = &self.bpath { opts.background_image_path = v.clone(); }
        if let Some(v) = self.tmargin { opts.top_margin = v; }
        if let Some(v) = self.smargin { opts.side_margin = v; }
        if let Some(v) = self.lspace { opts.line_space = v; }

        Ok(opts)
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(cli: &Cli) -> Result<RenderReport, OgpError> {
    let config = cli.config.as_deref();

    match &cli.command {
        Commands::Render { args, output } => {
            let ogp = OgpImage::new(&args.options(config)?)?;
            let rendered = ogp.draw(&args.text)?;
            write_image(&rendered.image, output)?;

            let report = RenderReport::new(ogp.dimensions(), &rendered.lines, &rendered.forced_breaks);
            match fs::read(output) {
                Ok(bytes) => Ok(report.with_output(output.clone(), &bytes)),
                Err(e) => {
                    warn!("could not read back {} for hashing: {}", output.display(), e);
                    Ok(RenderReport { output: Some(output.clone()), ..report })
                }
            }
        }

        Commands::Layout { args } => {
            let ogp = OgpImage::new(&args.options(config)?)?;
            let (lines, forced_breaks) = ogp.layout(&args.text)?;
            Ok(RenderReport::new(ogp.dimensions(), &lines, &forced_breaks))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                println!("{}", serde_json::json!({ "success": false, "error": e.to_string() }));
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            println!("{}", serde_json::json!({ "success": false, "error": e.to_string() }));
            ExitCode::FAILURE
        }
    }
}
