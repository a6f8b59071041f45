//! group-bubbles - Group OCR line detections into speech-bubble paragraphs
//!
//! Reads detection lists recorded from a recognition engine (JSON), mends
//! glued words with an optional dictionary, groups the lines into paragraphs
//! in comic reading order and writes the result as JSON or plain text.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fukidashi_core::api::{ReadTextResponse, read_detections};
use fukidashi_core::layout::GroupingParams;
use fukidashi_core::model::parse_detections;
use fukidashi_core::segment::{DictionarySegmenter, WordSegmenter};

/// Output type for the grouped paragraphs.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum OutputType {
    /// Full response as JSON (default)
    #[default]
    Json,
    /// One paragraph per line
    Text,
}

/// Group OCR line detections into speech-bubble paragraphs.
#[derive(Parser, Debug)]
#[command(name = "group-bubbles")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more JSON files holding detections
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    // === Segmentation options ===
    /// Word list (one word per line, most frequent first) used to split
    /// detections that contain no space
    #[arg(short = 'w', long)]
    wordlist: Option<PathBuf>,

    // === Grouping options ===
    /// JSON file with grouping parameters; flags below override it
    #[arg(long)]
    params: Option<PathBuf>,

    /// Overlap needed for two lines to count as aligned (relative to the
    /// smaller box)
    #[arg(long = "alignment-tolerance")]
    alignment_tolerance: Option<f64>,

    /// Lines further apart than this never merge (relative to average size)
    #[arg(short = 'M', long = "max-distance-factor")]
    max_distance_factor: Option<f64>,

    /// Aligned lines closer than this merge (relative to average size)
    #[arg(long = "aligned-distance")]
    aligned_distance: Option<f64>,

    /// Lines closer than this merge regardless of alignment
    #[arg(long = "close-distance")]
    close_distance: Option<f64>,

    // === Output options ===
    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 't', long = "output-type", value_enum, default_value = "json")]
    output_type: OutputType,

    /// Pretty-print JSON output
    #[arg(short = 'p', long, action = ArgAction::SetTrue)]
    pretty: bool,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Infer output type from file extension.
fn infer_output_type(path: &str) -> Option<OutputType> {
    let path_lower = path.to_lowercase();
    if path_lower.ends_with(".txt") {
        Some(OutputType::Text)
    } else if path_lower.ends_with(".json") {
        Some(OutputType::Json)
    } else {
        None
    }
}

/// Build GroupingParams from the params file and command line overrides.
fn build_params(args: &Args) -> Result<GroupingParams> {
    let mut params = match &args.params {
        Some(path) => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("failed to read params file {}", path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("invalid params file {}", path.display()))?
        }
        None => GroupingParams::default(),
    };

    if let Some(v) = args.alignment_tolerance {
        params.alignment_tolerance = v;
    }
    if let Some(v) = args.max_distance_factor {
        params.max_distance_factor = v;
    }
    if let Some(v) = args.aligned_distance {
        params.aligned_merge_distance = v;
    }
    if let Some(v) = args.close_distance {
        params.close_merge_distance = v;
    }

    params.validate()?;
    Ok(params)
}

fn load_segmenter(args: &Args) -> Result<Option<DictionarySegmenter>> {
    let Some(path) = &args.wordlist else {
        return Ok(None);
    };
    let segmenter = DictionarySegmenter::from_path(path)
        .with_context(|| format!("failed to load word list {}", path.display()))?;
    if segmenter.is_empty() {
        bail!("word list {} is empty", path.display());
    }
    debug!(words = segmenter.len(), "loaded word list");
    Ok(Some(segmenter))
}

/// Process a single detections file.
fn process_file(
    path: &Path,
    segmenter: Option<&dyn WordSegmenter>,
    params: &GroupingParams,
) -> Result<ReadTextResponse> {
    let data = fs::read_to_string(path)?;
    let raw = parse_detections(&data)?;
    debug!(
        file = %path.display(),
        lines = raw.len(),
        "loaded detections"
    );
    Ok(read_detections(raw, segmenter, params)?)
}

fn write_response<W: Write>(
    writer: &mut W,
    response: &ReadTextResponse,
    output_type: OutputType,
    pretty: bool,
) -> Result<()> {
    match output_type {
        OutputType::Json => {
            if pretty {
                serde_json::to_writer_pretty(&mut *writer, response)?;
            } else {
                serde_json::to_writer(&mut *writer, response)?;
            }
            writeln!(writer)?;
        }
        OutputType::Text => {
            for paragraph in &response.paragraphs {
                writeln!(writer, "{}", paragraph.text)?;
            }
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let params = build_params(&args)?;
    let segmenter = load_segmenter(&args)?;

    // Determine output type (may be inferred from output filename)
    let output_type = if args.output_type == OutputType::Json && args.outfile != "-" {
        infer_output_type(&args.outfile).unwrap_or(args.output_type)
    } else {
        args.output_type
    };

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("failed to create output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    for path in &args.files {
        let response = process_file(
            path,
            segmenter.as_ref().map(|s| s as &dyn WordSegmenter),
            &params,
        )
        .with_context(|| format!("error processing {}", path.display()))?;
        write_response(&mut output, &response, output_type, args.pretty)?;
    }

    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fukidashi_core::model::Detection;
    use std::time::Duration;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_match_library_params() {
        let args = parse(&["group-bubbles", "page.json"]);
        assert_eq!(build_params(&args).unwrap(), GroupingParams::default());
        assert_eq!(args.output_type, OutputType::Json);
        assert_eq!(args.outfile, "-");
    }

    #[test]
    fn flags_override_params() {
        let args = parse(&[
            "group-bubbles",
            "-M",
            "3.0",
            "--close-distance",
            "0.5",
            "page.json",
        ]);
        let params = build_params(&args).unwrap();
        assert_eq!(params.max_distance_factor, 3.0);
        assert_eq!(params.close_merge_distance, 0.5);
        assert_eq!(params.aligned_merge_distance, 1.5);
    }

    #[test]
    fn rejects_negative_thresholds() {
        let args = parse(&["group-bubbles", "--aligned-distance=-1", "page.json"]);
        assert!(build_params(&args).is_err());
    }

    #[test]
    fn requires_input_files() {
        assert!(Args::try_parse_from(["group-bubbles"]).is_err());
    }

    #[test]
    fn infers_output_type_from_extension() {
        assert_eq!(infer_output_type("out.TXT"), Some(OutputType::Text));
        assert_eq!(infer_output_type("out.json"), Some(OutputType::Json));
        assert_eq!(infer_output_type("out"), None);
    }

    #[test]
    fn writes_text_output() {
        let det = Detection::new([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)], "A", 1.0);
        let params = GroupingParams::default();
        let paragraphs = fukidashi_core::group_paragraphs(&[det.clone()], &params).unwrap();
        let response = ReadTextResponse::new(vec![det], paragraphs, Duration::ZERO);

        let mut buf = Vec::new();
        write_response(&mut buf, &response, OutputType::Text, false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "A\n\n");
    }
}
