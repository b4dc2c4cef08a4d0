//! File-based waveshaper processing command.

use crate::preset::Preset;
use crate::settings::apply_settings;
use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use polyshaper_core::{Monitored, StreamFormat};
use polyshaper_effects::Waveshaper;
use polyshaper_io::{StreamRunner, WavSpec, mix_to_mono, read_wav, write_wav};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (mono, or any channel count with --mixdown)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset file (TOML); --param values override it
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Waveshaper parameters (e.g., "order=4")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Average multi-channel input down to mono before processing
    #[arg(long)]
    mixdown: bool,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter format: '{}' (expected key=value)", s))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if !matches!(args.bit_depth, 16 | 24 | 32) {
        anyhow::bail!("Unsupported bit depth {} (use 16, 24, or 32)", args.bit_depth);
    }
    if args.block_size == 0 {
        anyhow::bail!("Block size must be at least 1");
    }

    // Configure the waveshaper before touching any audio
    let shaper = Waveshaper::new();

    if let Some(preset_path) = &args.preset {
        let preset = Preset::load(preset_path)
            .with_context(|| format!("Failed to load preset {}", preset_path.display()))?;
        println!("Loading preset: {}", preset.name);
        if let Some(description) = &preset.description {
            println!("  {}", description);
        }
        apply_settings(
            shaper.params(),
            preset.params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )
        .with_context(|| format!("Invalid preset {}", preset_path.display()))?;
    }

    apply_settings(
        shaper.params(),
        args.param.iter().map(|(k, v)| (k.as_str(), v.as_str())),
    )?;

    // Read input file
    println!("Reading {}...", args.input.display());
    let (mut samples, mut spec) = read_wav(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    println!(
        "  {} frames, {} ch, {} Hz, {:.2}s",
        samples.len() / usize::from(spec.channels.max(1)),
        spec.channels,
        spec.sample_rate,
        samples.len() as f32 / spec.channels.max(1) as f32 / spec.sample_rate as f32
    );

    if args.mixdown && spec.channels > 1 {
        println!("  Mixing {} channels to mono", spec.channels);
        samples = mix_to_mono(&samples, spec.channels);
        spec.channels = 1;
    }

    let format = StreamFormat {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    };
    let mut runner = StreamRunner::new(Monitored::new(shaper), format, args.block_size)
        .with_context(|| {
            if spec.channels > 1 {
                "Input must be mono (pass --mixdown to downmix)".to_string()
            } else {
                "Unsupported input format".to_string()
            }
        })?;

    println!("Parameters:");
    for (desc, value) in runner.transform().inner().params().iter() {
        println!("  {:18} {}", desc.name, desc.format_value(value));
    }

    println!("Processing...");

    // Process with progress bar
    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let start = Instant::now();
    let output = runner.run_with_progress(&samples, |n| pb.inc(n as u64))?;
    let elapsed = start.elapsed();

    pb.finish_with_message("done");

    // Calculate stats
    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&samples)),
        linear_to_db(peak(&samples))
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&output)),
        linear_to_db(peak(&output))
    );

    let non_finite = output.iter().filter(|s| !s.is_finite()).count();
    if non_finite > 0 {
        println!("  Warning: {} non-finite output samples", non_finite);
    }

    match runner.transform().last_report() {
        Some(report) => println!("  Throughput: {:.0} samples/sec", report.samples_per_sec),
        None => println!(
            "  Throughput: {:.0} samples/sec (short input)",
            samples.len() as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
        ),
    }

    // Write output file
    let out_spec = WavSpec {
        channels: 1,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, out_spec)?;
    println!("Done!");

    Ok(())
}

fn rms(samples: &[f32]) -> f32 {
    let finite: Vec<f32> = samples.iter().copied().filter(|s| s.is_finite()).collect();
    if finite.is_empty() {
        return 0.0;
    }
    let sum: f32 = finite.iter().map(|s| s * s).sum();
    (sum / finite.len() as f32).sqrt()
}

fn peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .filter(|s| s.is_finite())
        .map(|s| s.abs())
        .fold(0.0, f32::max)
}

fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("order=4").unwrap(),
            ("order".to_string(), "4".to_string())
        );
        assert_eq!(
            parse_key_val("index = 1.5").unwrap(),
            ("index".to_string(), "1.5".to_string())
        );
        assert!(parse_key_val("order").is_err());
    }

    #[test]
    fn test_stats() {
        assert_eq!(rms(&[]), 0.0);
        assert_eq!(peak(&[0.5, -0.75, f32::INFINITY]), 0.75);
        assert!((rms(&[1.0, -1.0]) - 1.0).abs() < 1e-6);
        assert_eq!(linear_to_db(0.0), -120.0);
        assert!((linear_to_db(1.0)).abs() < 1e-6);
    }
}
