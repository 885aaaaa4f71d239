//! CLI for replaying landmark frame recordings through the metric pipeline.
//!
//! Usage:
//!   apparent-age <recording.json>              # Human-readable output
//!   apparent-age <recording.json> --json       # JSON output
//!   apparent-age <recording.json> -o out.json  # Save to file
//!
//! A recording is a JSON array of frames; each frame is an array of
//! `[x, y, z]` landmark triples normalized to [0,1]. An empty frame means
//! the detector found no face that cycle: it is skipped without touching
//! the pipeline state.

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use apparent_age::{AgePipeline, LandmarkSet, LockState, SkinMetrics};

#[derive(Parser, Debug)]
#[command(name = "apparent-age")]
#[command(author, version, about = "Facial-geometry apparent-age metrics", long_about = None)]
struct Args {
    /// Input recording: a JSON array of frames, each an array of [x, y, z]
    /// landmark triples
    #[arg(required = true)]
    recording: PathBuf,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit raw per-frame estimates without temporal stabilization
    #[arg(long)]
    no_stabilize: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output structure for JSON serialization
#[derive(Serialize)]
struct Output {
    recording: String,
    frames_total: usize,
    frames_skipped: usize,
    frames: Vec<FrameOutput>,
    summary: Summary,
}

#[derive(Serialize)]
struct FrameOutput {
    /// Frame index in the recording (1-based)
    frame: usize,
    locked: bool,
    metrics: SkinMetrics,
}

#[derive(Serialize)]
struct Summary {
    locked: bool,
    locked_age: Option<u8>,
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    debug!("Loading recording from {:?}", args.recording);
    let data = std::fs::read_to_string(&args.recording)?;
    let frames: Vec<Vec<[f64; 3]>> = serde_json::from_str(&data)?;
    info!("Loaded {} frame(s)", frames.len());

    let mut pipeline = AgePipeline::new();
    let mut frame_outputs = Vec::new();
    let mut skipped = 0usize;

    for (i, triples) in frames.iter().enumerate() {
        if triples.is_empty() {
            // No face this cycle; the pipeline state is left untouched.
            skipped += 1;
            continue;
        }

        let set = LandmarkSet::from_triples(triples);
        let metrics = if args.no_stabilize {
            AgePipeline::raw_estimate(&set)?
        } else {
            pipeline.process(&set)?
        };

        frame_outputs.push(FrameOutput {
            frame: i + 1,
            locked: pipeline.is_locked(),
            metrics,
        });
    }

    let summary = match pipeline.state() {
        LockState::Locked { value, .. } => Summary {
            locked: true,
            locked_age: Some(value.estimated_age),
        },
        LockState::Unlocked => Summary {
            locked: false,
            locked_age: None,
        },
    };

    let output = Output {
        recording: args.recording.display().to_string(),
        frames_total: frames.len(),
        frames_skipped: skipped,
        frames: frame_outputs,
        summary,
    };

    // Generate output
    let output_str = if args.json {
        serde_json::to_string_pretty(&output)?
    } else {
        format_human_readable(&output)
    };

    // Write output
    if let Some(ref path) = args.output {
        std::fs::write(path, &output_str)?;
        debug!("Output written to {:?}", path);
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn format_human_readable(output: &Output) -> String {
    let mut s = String::new();

    s.push_str(&format!("Recording: {}\n", output.recording));
    s.push_str(&format!(
        "Frames: {} ({} without a face, skipped)\n",
        output.frames_total, output.frames_skipped
    ));

    if output.frames.is_empty() {
        s.push_str("\nNo frames with a detected face.\n");
        return s;
    }

    s.push('\n');
    for f in &output.frames {
        let status = if f.locked { "locked" } else { "accumulating" };
        s.push_str(&format!(
            "Frame {:>5}  age {:>2}  {}\n",
            f.frame, f.metrics.estimated_age, status
        ));
    }

    let last = &output.frames[output.frames.len() - 1].metrics;
    s.push_str("\n--- Result ---\n");
    match output.summary.locked_age {
        Some(age) => s.push_str(&format!("Locked apparent age: {} years\n", age)),
        None => s.push_str(&format!(
            "Not locked; last estimate: {} years\n",
            last.estimated_age
        )),
    }
    s.push_str(&format!("  Wrinkles:  {:>3}\n", last.wrinkles));
    s.push_str(&format!("  Texture:   {:>3}\n", last.texture));
    s.push_str(&format!("  Volume:    {:>3}\n", last.volume));
    s.push_str(&format!("  Eye aging: {:>3}\n", last.eye_aging));
    s.push_str(&format!("  Skin tone: {:>3}\n", last.skin_tone));

    s
}
