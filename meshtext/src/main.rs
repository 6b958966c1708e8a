use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use glyph_mesh::{FontData, OutlineSource, Rasterizer, SkrifaSource, SourceOptions};
use rayon::prelude::*;

mod output;

use output::{OutlineReport, RasterReport, WidthReport};

#[derive(clap::Parser, Debug)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Rasterize each text into per-character triangle meshes
    Rasterize {
        #[command(flatten)]
        font: FontArgs,
        #[command(flatten)]
        layout: LayoutArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: Format,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Texts to rasterize
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Print the classified contours of each text
    Outline {
        #[command(flatten)]
        font: FontArgs,
        #[command(flatten)]
        layout: LayoutArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: Format,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Texts to outline
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Print the advance of each text in pixels
    Width {
        #[command(flatten)]
        font: FontArgs,
        /// Character height in pixels
        #[arg(long, default_value_t = 64)]
        height: u32,
        /// Texts to measure
        #[arg(required = true)]
        texts: Vec<String>,
    },
}

#[derive(clap::Args, Debug)]
struct FontArgs {
    /// Path to a font file or collection
    #[arg(long)]
    font: PathBuf,
    /// Index of the face in a collection
    #[arg(long, default_value_t = 0)]
    index: usize,
    /// Hinting applied to outlines
    #[arg(long, value_enum, default_value_t)]
    hinting: HintingMode,
    /// Library used to load outlines
    #[arg(long, value_enum, default_value_t)]
    backend: Backend,
}

#[derive(clap::Args, Debug)]
struct LayoutArgs {
    /// Character height in pixels
    #[arg(long, default_value_t = 64)]
    height: u32,
    /// Number of line segments per curve
    #[arg(long, default_value_t = 6)]
    steps: u32,
}

#[derive(clap::ValueEnum, Copy, Clone, Default, PartialEq, Eq, Debug)]
enum HintingMode {
    /// Disable hinting.
    None,
    /// The TrueType or CFF interpreter.
    Native,
    /// The autohinter.
    Auto,
    /// The interpreter, falling back to the autohinter.
    #[default]
    Default,
}

impl From<HintingMode> for glyph_mesh::Hinting {
    fn from(mode: HintingMode) -> Self {
        match mode {
            HintingMode::None => Self::None,
            HintingMode::Native => Self::Native,
            HintingMode::Auto => Self::Auto,
            HintingMode::Default => Self::Default,
        }
    }
}

#[derive(clap::ValueEnum, Copy, Clone, Default, Debug)]
enum Backend {
    #[default]
    Skrifa,
    #[cfg(feature = "freetype")]
    Freetype,
}

#[derive(clap::ValueEnum, Copy, Clone, Default, PartialEq, Eq, Debug)]
enum Format {
    /// JSON document with one entry per text.
    #[default]
    Json,
    /// Human readable counts.
    Summary,
    /// Triangle vertices as native endian f32 values, nine per triangle.
    Raw,
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)]
    Mesh(#[from] glyph_mesh::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("The {0:?} format is not available for this command")]
    Format(Format),
}

fn main() {
    env_logger::init();
    use clap::Parser as _;
    let args = Args::parse_from(wild::args());
    if let Err(e) = run(args.command) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Error> {
    match command {
        Command::Rasterize {
            font,
            layout,
            format,
            output,
            texts,
        } => {
            let data = load_font(&font)?;
            // Each worker builds its own source from the shared data
            let meshes = texts
                .par_iter()
                .map(|text| {
                    with_rasterizer(&data, &font, |mut rasterizer| {
                        rasterizer.rasterize_text(text, layout.height, layout.steps)
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let report = RasterReport::new(&texts, meshes);
            let mut writer = writer(output.as_ref())?;
            match format {
                Format::Json => report.write_json(&mut writer)?,
                Format::Summary => report.write_summary(&mut writer)?,
                Format::Raw => report.write_raw(&mut writer)?,
            }
            writer.flush()?;
        }
        Command::Outline {
            font,
            layout,
            format,
            output,
            texts,
        } => {
            let data = load_font(&font)?;
            let outlines = texts
                .par_iter()
                .map(|text| {
                    with_rasterizer(&data, &font, |mut rasterizer| {
                        rasterizer.outline_text(text, layout.height, layout.steps)
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let report = OutlineReport::new(&texts, outlines);
            let mut writer = writer(output.as_ref())?;
            match format {
                Format::Json => report.write_json(&mut writer)?,
                Format::Summary => report.write_summary(&mut writer)?,
                Format::Raw => return Err(Error::Format(format)),
            }
            writer.flush()?;
        }
        Command::Width {
            font,
            height,
            texts,
        } => {
            let data = load_font(&font)?;
            let widths = texts
                .par_iter()
                .map(|text| {
                    with_rasterizer(&data, &font, |mut rasterizer| {
                        rasterizer.text_width(text, height)
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let mut writer = writer(None)?;
            WidthReport::new(&texts, widths).write(&mut writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

fn load_font(font: &FontArgs) -> Result<FontData, Error> {
    let data = FontData::from_path(&font.font)?;
    log::info!(
        "loaded {} with {} face(s), using face {} via {:?}",
        font.font.display(),
        data.face_count()?,
        font.index,
        font.backend
    );
    Ok(data)
}

/// Creates a source for the selected backend and passes a rasterizer
/// borrowing it to `f`.
fn with_rasterizer<T>(
    data: &FontData,
    font: &FontArgs,
    f: impl FnOnce(Rasterizer<&mut dyn OutlineSource>) -> Result<T, glyph_mesh::Error>,
) -> Result<T, glyph_mesh::Error> {
    let options = SourceOptions::new(font.index, font.hinting.into());
    match font.backend {
        Backend::Skrifa => {
            let mut source = SkrifaSource::new(data, &options)?;
            f(Rasterizer::new(&mut source as &mut dyn OutlineSource))
        }
        #[cfg(feature = "freetype")]
        Backend::Freetype => {
            let mut source = glyph_mesh::FreeTypeSource::new(data, &options)?;
            f(Rasterizer::new(&mut source as &mut dyn OutlineSource))
        }
    }
}

fn writer(path: Option<&PathBuf>) -> Result<Box<dyn Write>, Error> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    })
}
