use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use detect_shots::capture::FrameDirectory;
use detect_shots::config::{
    DEFAULT_BINS, DEFAULT_FPS, DEFAULT_HIST_THRESH, DEFAULT_MIN_SHOT_LENGTH, DEFAULT_MIN_SHOT_SCORE,
};
use detect_shots::output::BoundaryFile;
use detect_shots::{run_pipeline, ShotConfig, ShotError};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "detect_shots", author, version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Folder with the input frames, one file per frame named by its zero-padded index
    input_frames_dir: PathBuf,

    /// Output shot boundaries file
    output_file: PathBuf,

    /// Minimum shot length in frames (values below 1 are raised to 1)
    #[arg(short = 'm', default_value_t = DEFAULT_MIN_SHOT_LENGTH as i64)]
    min_shot_length: i64,

    /// Number of histogram bins per colour channel
    #[arg(short = 'b', default_value_t = DEFAULT_BINS)]
    bins: u32,

    /// Histogram threshold, as a fraction of the frame's total channel mass
    #[arg(short = 't', default_value_t = DEFAULT_HIST_THRESH)]
    hist_thresh: f64,

    /// Frames per second of the source video (values below 1 are raised to 1)
    #[arg(short = 'f', default_value_t = DEFAULT_FPS as i64)]
    fps: i64,

    /// Minimum qualifying shot score
    #[arg(short = 'r', default_value_t = DEFAULT_MIN_SHOT_SCORE as i64)]
    min_shot_score: i64,

    /// Convert shot boundary indexes to seconds
    #[arg(short = 's')]
    seconds: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn to_config(&self) -> ShotConfig {
        ShotConfig {
            min_shot_length: self.min_shot_length.max(1) as u64,
            bins: self.bins,
            hist_thresh: self.hist_thresh,
            fps: self.fps.clamp(1, u32::MAX as i64) as u32,
            min_shot_score: self.min_shot_score.max(0) as u64,
            convert_to_seconds: self.seconds,
        }
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.to_config();
    config.validate().context("Invalid parameters")?;

    tracing::info!("detect_shots starting");
    tracing::info!("Input: {}", args.input_frames_dir.display());
    tracing::info!("Output: {}", args.output_file.display());
    if config.convert_to_seconds {
        if config.time_mapping_enabled() {
            tracing::info!("Reporting boundaries in seconds at {} fps", config.fps);
        } else {
            tracing::info!("1 fps source, reporting boundaries in frames");
        }
    }

    if !args.input_frames_dir.is_dir() {
        return Err(ShotError::InputPath(args.input_frames_dir.clone()).into());
    }

    let mut output =
        BoundaryFile::create(&args.output_file).context("Failed to open output file")?;

    let mut source =
        FrameDirectory::open(&args.input_frames_dir).context("Failed to read input frames")?;

    let start = Instant::now();
    let summary =
        run_pipeline(&mut source, &mut output, &config).context("Shot detection aborted")?;

    tracing::info!(
        "Detected {} shots in {} frames ({:.2}s)",
        summary.shots,
        summary.frames,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
