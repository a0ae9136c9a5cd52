use crate::error::EncodeError;
use crate::util::{canonicalize_cli_path, find_all_files, handle_process_entry_error, output_path_for};
use argh::FromArgs;
use bytesize::ByteSize;
use rif_api::file_io::encode_to_file;
use rif_api::{AlphaCostModel, RifEncodeBuilder};
use rif_image::{is_supported_image, load_pixel_grid, preview_path_for, save_grayscale_preview};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(FromArgs, Debug)]
/// Encode PNG and JPEG images into RIF files
#[argh(subcommand, name = "encode")]
pub struct EncodeCmd {
    /// input file or directory [default: src]
    #[argh(option, short = 'i', default = "PathBuf::from(\"src\")")]
    pub input: PathBuf,

    /// output directory [default: dst for a directory input, the current directory for a file]
    #[argh(option, short = 'o', from_str_fn(canonicalize_cli_path))]
    pub output: Option<PathBuf>,

    /// store deduplicated blocks instead of raw samples
    #[argh(switch, short = 'c')]
    pub compress: bool,

    /// smallest pattern size to try when compressing [default: 8]
    #[argh(option, default = "8")]
    pub pattern_min: u32,

    /// largest pattern size to try when compressing [default: 8]
    #[argh(option, default = "8")]
    pub pattern_max: u32,

    /// step between tried pattern sizes [default: 2]
    #[argh(option, default = "2")]
    pub pattern_step: u32,

    /// alpha cost used when comparing pattern sizes: opaque, every [default: opaque]
    #[argh(option, default = "AlphaCostModel::OpaqueSamples")]
    pub alpha_cost: AlphaCostModel,

    /// evaluate every pattern size completely instead of abandoning losing ones early
    #[argh(switch)]
    pub exhaustive: bool,

    /// also write a <name>-grayscale.png preview next to each output
    #[argh(switch)]
    pub png: bool,

    /// log progress for every pattern size and block row
    #[argh(switch, short = 'v')]
    pub verbose: bool,
}

impl EncodeCmd {
    fn builder(&self) -> RifEncodeBuilder {
        RifEncodeBuilder::new()
            .compress(self.compress)
            .pattern_min(self.pattern_min)
            .pattern_max(self.pattern_max)
            .pattern_step(self.pattern_step)
            .alpha_cost(self.alpha_cost)
            .prune(!self.exhaustive)
    }
}

#[derive(Debug, Default)]
struct EncodeTotals {
    files: u64,
    failed: u64,
    input_bytes: u64,
    output_bytes: u64,
}

pub fn handle_encode_command(cmd: EncodeCmd) -> Result<(), Box<dyn std::error::Error>> {
    let builder = cmd.builder();
    builder.validate().map_err(EncodeError::from)?;

    if !cmd.input.exists() {
        return Err(EncodeError::MissingInput(cmd.input.clone()).into());
    }
    let input = cmd.input.canonicalize()?;

    let (files, output) = if input.is_dir() {
        let mut files = Vec::new();
        find_all_files(&input, &mut files)?;
        files.sort();
        let output = match &cmd.output {
            Some(output) => output.clone(),
            None => canonicalize_cli_path("dst")?,
        };
        (files, output)
    } else {
        let output = match &cmd.output {
            Some(output) => output.clone(),
            None => std::env::current_dir()?,
        };
        (vec![input.clone()], output)
    };

    let files: Vec<PathBuf> = files.into_iter().filter(|f| is_supported_image(f)).collect();
    if files.is_empty() {
        println!("No PNG or JPEG files found in {}.", input.display());
        return Ok(());
    }
    println!("Found {} files to encode\n", files.len());

    let start = Instant::now();
    let mut totals = EncodeTotals::default();

    for file in &files {
        let result = encode_file(file, &input, &output, &builder, cmd.png, &mut totals);
        if !handle_process_entry_error(file, result) {
            totals.failed += 1;
        }
    }

    let elapsed = start.elapsed();
    println!("\n=== Encode Complete ===");
    println!("Files encoded: {}", totals.files);
    if totals.failed > 0 {
        println!("Files failed: {}", totals.failed);
    }
    println!("Time taken: {elapsed:.2?}");
    println!("Input size: {}", ByteSize(totals.input_bytes));
    println!("Output size: {}", ByteSize(totals.output_bytes));

    Ok(())
}

fn encode_file(
    file: &Path,
    input_root: &Path,
    output_dir: &Path,
    builder: &RifEncodeBuilder,
    png: bool,
    totals: &mut EncodeTotals,
) -> Result<(), EncodeError> {
    info!(path = %file.display(), "encoding");
    let grid = load_pixel_grid(file)?;
    let target = output_path_for(file, input_root, output_dir);

    if png {
        // The preview sits next to the .rif output.
        let preview_dir = target.parent().unwrap_or(output_dir);
        std::fs::create_dir_all(preview_dir)?;
        save_grayscale_preview(&grid, &preview_path_for(file, preview_dir))?;
    }

    let summary = encode_to_file(builder, &grid, &target)?;
    info!(path = %target.display(), bytes = summary.bytes_written, "saved");

    totals.files += 1;
    totals.input_bytes += std::fs::metadata(file)?.len();
    totals.output_bytes += summary.bytes_written as u64;
    Ok(())
}
