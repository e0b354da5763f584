//! prime-bit-corr CLI: bit-level structure of primes vs composites.
//!
//! Usage:
//!   prime-bit-corr --corr  [--min-bits=8] [--max-bits=20] [--exclude-low=2]
//!                          [--ceiling=20] [--count-rejected] [--parallel] [--json]
//!   prime-bit-corr --count [--count-bits=24]
//!
//! Modes:
//!   corr   sweep the prime/composite correlation gain over bit widths,
//!          write gain.png and print the linear trend
//!   count  plot set-bit count against magnitude, writing primes.png and
//!          composites.png
//!
//! `--out-dir=<path>` sets where images go (default: current directory).
//! With neither mode flag nothing is done.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process;

use serde::Serialize;

use prime_bit_corr::{
    finite_points, linear_regression, popcount_series, render_scatter, sweep, GainPolicy,
    GainSample, LinearFit, PopcountConfig, ScatterStyle, SweepConfig,
};

#[derive(Debug, Clone, PartialEq)]
enum Mode {
    Corr,
    Count,
    Idle,
}

/// CLI configuration parsed from command-line arguments.
#[derive(Debug)]
struct CliConfig {
    mode: Mode,
    sweep: SweepConfig,
    popcount: PopcountConfig,
    out_dir: PathBuf,
    json: bool,
}

/// JSON summary of a gain sweep.
#[derive(Serialize)]
struct SweepSummary<'a> {
    config: &'a SweepConfig,
    samples: &'a [GainSample],
    fit: LinearFit,
}

fn parse_opts(args: &[String]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for arg in args {
        if let Some(kv) = arg.strip_prefix("--") {
            if let Some((k, v)) = kv.split_once('=') {
                map.insert(k.to_string(), v.to_string());
            } else {
                map.insert(kv.to_string(), "true".to_string());
            }
        }
    }
    map
}

fn parse_value<T: std::str::FromStr>(
    opts: &HashMap<String, String>,
    key: &str,
    default: T,
) -> Result<T, String> {
    match opts.get(key) {
        Some(v) => v
            .parse()
            .map_err(|_| format!("invalid value for --{}: {}", key, v)),
        None => Ok(default),
    }
}

fn flag(opts: &HashMap<String, String>, key: &str) -> bool {
    opts.get(key).map(|v| v == "true").unwrap_or(false)
}

fn parse_args(args: &[String]) -> Result<CliConfig, String> {
    let opts = parse_opts(args);

    let mode = match (flag(&opts, "corr"), flag(&opts, "count")) {
        (true, true) => return Err("--corr and --count are mutually exclusive".to_string()),
        (true, false) => Mode::Corr,
        (false, true) => Mode::Count,
        (false, false) => Mode::Idle,
    };

    let sweep_defaults = SweepConfig::default();
    let policy_defaults = GainPolicy::default();
    let sweep = SweepConfig {
        min_bits: parse_value(&opts, "min-bits", sweep_defaults.min_bits)?,
        max_bits: parse_value(&opts, "max-bits", sweep_defaults.max_bits)?,
        policy: GainPolicy {
            excluded_low_bits: parse_value(
                &opts,
                "exclude-low",
                policy_defaults.excluded_low_bits,
            )?,
            ceiling: parse_value(&opts, "ceiling", policy_defaults.ceiling)?,
            count_rejected: flag(&opts, "count-rejected"),
        },
        parallel: flag(&opts, "parallel"),
    };

    let popcount = PopcountConfig {
        bits: parse_value(&opts, "count-bits", PopcountConfig::default().bits)?,
    };

    let out_dir = opts
        .get("out-dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(CliConfig {
        mode,
        sweep,
        popcount,
        out_dir,
        json: flag(&opts, "json"),
    })
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Usage: prime-bit-corr --corr|--count [options]");
            process::exit(2);
        }
    };

    let result = match config.mode {
        Mode::Corr => run_corr(&config),
        Mode::Count => run_count(&config),
        Mode::Idle => {
            log::info!("no mode selected (use --corr or --count)");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_corr(config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let sweep_config = &config.sweep;
    println!(
        "Gain sweep: bits {}..{} (exclude low {}, ceiling {}, count rejected: {})",
        sweep_config.min_bits,
        sweep_config.max_bits,
        sweep_config.policy.excluded_low_bits,
        sweep_config.policy.ceiling,
        sweep_config.policy.count_rejected
    );

    let samples = sweep(sweep_config)?;

    println!();
    println!("  {:>5} | {:>9} | {:>10} | {:>12} | {:>6} | {:>6}",
        "Bits", "Primes", "Composites", "Gain", "Degen", "Over");
    println!("  {}", "-".repeat(62));
    for s in &samples {
        println!(
            "  {:>5} | {:>9} | {:>10} | {:>12.6} | {:>6} | {:>6}",
            s.bits, s.primes, s.composites, s.gain, s.report.degenerate, s.report.overflow
        );
    }

    let points: Vec<(f64, f64)> = samples.iter().map(GainSample::point).collect();
    let (finite, skipped) = finite_points(&points);
    if skipped > 0 {
        log::warn!("{} widths produced a NaN gain and are left out of the fit", skipped);
    }

    let path = config.out_dir.join("gain.png");
    render_scatter(&path, &ScatterStyle::new("bits vs gain", "bits", "gain"), &points)?;
    println!();
    println!("Wrote {}", path.display());

    let fit = linear_regression(&finite)?;
    let phi = (1.0 + 5.0f64.sqrt()) / 2.0;
    println!("phi   = {}", phi);
    println!("1/phi = {}", 1.0 / phi);
    match fit {
        LinearFit::Line { slope, intercept } => {
            println!("m     = {}", slope);
            println!("b     = {}", intercept);
        }
        LinearFit::Vertical { x } => {
            println!("m     = inf (all samples at bits = {})", x);
        }
    }

    if config.json {
        let summary = SweepSummary {
            config: sweep_config,
            samples: &samples,
            fit,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

fn run_count(config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Population count: numbers below 2^{}", config.popcount.bits);

    let series = popcount_series(&config.popcount)?;
    println!(
        "  {} primes, {} composites",
        series.primes.len(),
        series.composites.len()
    );

    let style = ScatterStyle::new("number vs bits", "number", "bits");
    for (name, points) in [("primes.png", &series.primes), ("composites.png", &series.composites)] {
        let path = config.out_dir.join(name);
        render_scatter(&path, &style, points)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}
