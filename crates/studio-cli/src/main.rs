//! signal-studio CLI: numeric convolution, surfaces, and spectra from the
//! command line.
//!
//! Expressions use the engine's restricted grammar (`u`, `d`, `pi`, the
//! trigonometric and exponential primitives, implicit multiplication);
//! pole/zero commands accept inline flags or a JSON/TOML request file.

mod output;
mod request;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lib_dsp::convolution::{convolve_continuous, convolve_discrete, ConvolutionConfig};
use lib_dsp::sample::{sample_continuous, sample_discrete, DEFAULT_SAMPLE_POINTS};
use lib_dsp::spectrum::{dtfs_coefficients, dtft};
use lib_dsp::surface::{frequency_response, magnitude_surface};
use lib_dsp::{detect_period, period::MAX_PERIOD};
use lib_expr::{normalize, SignalExpr};
use lib_types::{Complex64, Domain, PoleZeroSet, RocSide, TransformPlane};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "sig-studio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Which time axis an expression lives on.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum DomainArg {
    /// Continuous time, free variable `t`
    #[default]
    Continuous,
    /// Discrete time, free variable `n`
    Discrete,
}

impl From<DomainArg> for Domain {
    fn from(arg: DomainArg) -> Self {
        match arg {
            DomainArg::Continuous => Domain::Continuous,
            DomainArg::Discrete => Domain::Discrete,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum PlaneArg {
    /// Continuous-time s-plane
    #[default]
    Laplace,
    /// Discrete-time z-plane
    Z,
}

impl From<PlaneArg> for TransformPlane {
    fn from(arg: PlaneArg) -> Self {
        match arg {
            PlaneArg::Laplace => TransformPlane::Laplace,
            PlaneArg::Z => TransformPlane::Z,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum RocArg {
    /// ROC right of / outside the critical pole
    #[default]
    Causal,
    /// ROC left of / inside the critical pole
    Anticausal,
}

impl From<RocArg> for RocSide {
    fn from(arg: RocArg) -> Self {
        match arg {
            RocArg::Causal => RocSide::Causal,
            RocArg::Anticausal => RocSide::Anticausal,
        }
    }
}

/// Pole/zero source shared by the surface and response commands.
#[derive(clap::Args)]
struct PoleZeroArgs {
    /// JSON or TOML request file (overrides the inline flags)
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Pole location as `re` or `re,im` (repeatable)
    #[arg(long = "pole", value_parser = parse_complex, allow_hyphen_values = true)]
    poles: Vec<Complex64>,

    /// Zero location as `re` or `re,im` (repeatable)
    #[arg(long = "zero", value_parser = parse_complex, allow_hyphen_values = true)]
    zeros: Vec<Complex64>,

    /// Transfer-function gain
    #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
    gain: f64,

    /// Complex plane to evaluate on
    #[arg(long, default_value = "laplace")]
    plane: PlaneArg,

    /// Region-of-convergence side
    #[arg(long, default_value = "causal")]
    roc: RocArg,
}

impl PoleZeroArgs {
    /// Resolve to a pole/zero set plus plane/ROC selectors; the request
    /// file, when present, supplies everything including its half-range.
    fn resolve(&self) -> Result<(PoleZeroSet, TransformPlane, RocSide, Option<f64>)> {
        if let Some(path) = &self.request {
            let req = request::load_request(path)?;
            Ok((req.pole_zero_set(), req.plane, req.roc, Some(req.half_range)))
        } else {
            Ok((
                PoleZeroSet::new(self.poles.clone(), self.zeros.clone(), self.gain),
                self.plane.into(),
                self.roc.into(),
                None,
            ))
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convolve two signal expressions
    Convolve {
        /// First operand, e.g. "u(t)-u(t-2)"
        x: String,

        /// Second operand, e.g. "exp(-3t)u(t)"
        h: String,

        /// Time domain of both operands
        #[arg(short, long, default_value = "continuous")]
        domain: DomainArg,

        /// Output window override as `lo,hi`
        #[arg(long, value_parser = parse_window, allow_hyphen_values = true)]
        output_window: Option<(f64, f64)>,

        /// Integration window override as `lo,hi`
        #[arg(long, value_parser = parse_window, allow_hyphen_values = true)]
        integration_window: Option<(f64, f64)>,

        /// Write the full result (curve, frames) as JSON
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Also write the output curve as `t,y` CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Sample one expression over a window
    Sample {
        /// Expression, e.g. "exp(-2t)u(t)"
        expr: String,

        /// Time domain of the expression
        #[arg(short, long, default_value = "continuous")]
        domain: DomainArg,

        /// Window lower edge
        #[arg(long, default_value = "-5.0", allow_negative_numbers = true)]
        lo: f64,

        /// Window upper edge
        #[arg(long, default_value = "5.0", allow_negative_numbers = true)]
        hi: f64,

        /// Sample count (continuous domain only)
        #[arg(short, long, default_value_t = DEFAULT_SAMPLE_POINTS)]
        points: usize,

        /// Write the series as JSON
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Also write the series as `x,y` CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Generate a transfer-function magnitude surface
    Surface {
        #[command(flatten)]
        source: PoleZeroArgs,

        /// Plot half-range (a request file's value wins when present)
        #[arg(long, default_value = "10.0")]
        half_range: f64,

        /// Write the surface as JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Pole/zero frequency response along the frequency axis
    Response {
        #[command(flatten)]
        source: PoleZeroArgs,

        /// Frequency window lower edge
        #[arg(long, default_value = "-10.0", allow_negative_numbers = true)]
        w_lo: f64,

        /// Frequency window upper edge
        #[arg(long, default_value = "10.0", allow_negative_numbers = true)]
        w_hi: f64,

        /// Sample count
        #[arg(short, long, default_value = "400")]
        points: usize,

        /// Write the spectrum as JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Numeric DTFT spectrum of a discrete signal
    Spectrum {
        /// Discrete expression, e.g. "u(n)-u(n-4)"
        expr: String,

        /// Frequency window lower edge (radians)
        #[arg(long, default_value_t = -std::f64::consts::PI, allow_negative_numbers = true)]
        w_lo: f64,

        /// Frequency window upper edge (radians)
        #[arg(long, default_value_t = std::f64::consts::PI, allow_negative_numbers = true)]
        w_hi: f64,

        /// Sample count
        #[arg(short, long, default_value = "400")]
        points: usize,

        /// Write the spectrum as JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Fourier-series coefficients of a periodic discrete signal
    Dtfs {
        /// Discrete expression, e.g. "cos(2pi*n/8)"
        expr: String,

        /// Period; detected numerically when omitted
        #[arg(short = 'n', long)]
        period: Option<usize>,

        /// Write the coefficient list as JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Detect the period of a discrete signal
    Period {
        /// Discrete expression, e.g. "cos(2pi*n/8)"
        expr: String,
    },

    /// Print the normalized (implicit multiplication expanded) form
    Rewrite {
        /// Expression to normalize
        expr: String,

        /// Time domain (chooses the free variable)
        #[arg(short, long, default_value = "continuous")]
        domain: DomainArg,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Convolve {
            x,
            h,
            domain,
            output_window,
            integration_window,
            out,
            csv,
        } => {
            run_convolve(&x, &h, domain, output_window, integration_window, out, csv)?;
        }
        Commands::Sample { expr, domain, lo, hi, points, out, csv } => {
            run_sample(&expr, domain, lo, hi, points, out, csv)?;
        }
        Commands::Surface { source, half_range, out } => {
            run_surface(&source, half_range, out)?;
        }
        Commands::Response { source, w_lo, w_hi, points, out } => {
            run_response(&source, w_lo, w_hi, points, out)?;
        }
        Commands::Spectrum { expr, w_lo, w_hi, points, out } => {
            run_spectrum(&expr, w_lo, w_hi, points, out)?;
        }
        Commands::Dtfs { expr, period, out } => {
            run_dtfs(&expr, period, out)?;
        }
        Commands::Period { expr } => {
            run_period(&expr)?;
        }
        Commands::Rewrite { expr, domain } => {
            let domain: Domain = domain.into();
            println!("{}", normalize(&expr, domain.variable())?);
        }
    }

    Ok(())
}

fn run_convolve(
    x: &str,
    h: &str,
    domain: DomainArg,
    output_window: Option<(f64, f64)>,
    integration_window: Option<(f64, f64)>,
    out: Option<PathBuf>,
    csv: Option<PathBuf>,
) -> Result<()> {
    let domain: Domain = domain.into();
    let x = SignalExpr::parse(x, domain).context("first operand rejected")?;
    let h = SignalExpr::parse(h, domain).context("second operand rejected")?;
    tracing::info!("Convolving '{}' with '{}'", x.normalized(), h.normalized());

    let config = ConvolutionConfig {
        output_window,
        integration_window,
        ..ConvolutionConfig::default()
    };
    let result = match domain {
        Domain::Continuous => convolve_continuous(&x, &h, &config)?,
        Domain::Discrete => convolve_discrete(&x, &h, &config)?,
    };

    eprintln!(
        "{} output samples over [{:.3}, {:.3}], {} animation frames",
        result.len(),
        result.t.first().copied().unwrap_or(0.0),
        result.t.last().copied().unwrap_or(0.0),
        result.frames.len()
    );

    if let Some(path) = &csv {
        output::write_csv_pairs("t,y", &result.t, &result.y, path)?;
    }
    output::write_json(&result, out.as_deref())?;

    Ok(())
}

fn run_sample(
    expr: &str,
    domain: DomainArg,
    lo: f64,
    hi: f64,
    points: usize,
    out: Option<PathBuf>,
    csv: Option<PathBuf>,
) -> Result<()> {
    let domain: Domain = domain.into();
    let signal = SignalExpr::parse(expr, domain).context("expression rejected")?;

    let series = match domain {
        Domain::Continuous => sample_continuous(&signal, lo, hi, points)?,
        Domain::Discrete => sample_discrete(&signal, lo.round() as i64, hi.round() as i64)?,
    };

    eprintln!("{} samples of '{}'", series.len(), signal.normalized());

    if let Some(path) = &csv {
        output::write_csv_pairs("x,y", &series.x, &series.y, path)?;
    }
    output::write_json(&series, out.as_deref())?;

    Ok(())
}

fn run_surface(source: &PoleZeroArgs, half_range: f64, out: Option<PathBuf>) -> Result<()> {
    let (pz, plane, roc, requested_range) = source.resolve()?;
    let half_range = requested_range.unwrap_or(half_range);
    tracing::info!(
        "Surface of {} poles / {} zeros, half-range {}",
        pz.poles.len(),
        pz.zeros.len(),
        half_range
    );

    let surface = magnitude_surface(&pz, plane, roc, half_range)?;

    eprintln!(
        "{} x {} surface, {} cells inside the ROC",
        surface.x.len(),
        surface.y.len(),
        surface.defined_cells()
    );
    output::write_json(&surface, out.as_deref())?;

    Ok(())
}

fn run_response(
    source: &PoleZeroArgs,
    w_lo: f64,
    w_hi: f64,
    points: usize,
    out: Option<PathBuf>,
) -> Result<()> {
    let (pz, plane, _, _) = source.resolve()?;
    let spectrum = frequency_response(&pz, plane, w_lo, w_hi, points)?;

    let peak = spectrum.magnitude.y.iter().cloned().fold(0.0_f64, f64::max);
    eprintln!(
        "{} response points over [{:.3}, {:.3}], peak magnitude {:.4}",
        points, w_lo, w_hi, peak
    );
    output::write_json(&spectrum, out.as_deref())?;

    Ok(())
}

fn run_spectrum(
    expr: &str,
    w_lo: f64,
    w_hi: f64,
    points: usize,
    out: Option<PathBuf>,
) -> Result<()> {
    let signal = SignalExpr::parse(expr, Domain::Discrete).context("expression rejected")?;
    let spectrum = dtft(&signal, w_lo, w_hi, points)?;

    let peak = spectrum.magnitude.y.iter().cloned().fold(0.0_f64, f64::max);
    eprintln!(
        "DTFT of '{}': {} points, peak magnitude {:.4}",
        signal.normalized(),
        points,
        peak
    );
    output::write_json(&spectrum, out.as_deref())?;

    Ok(())
}

fn run_dtfs(expr: &str, period: Option<usize>, out: Option<PathBuf>) -> Result<()> {
    let signal = SignalExpr::parse(expr, Domain::Discrete).context("expression rejected")?;

    let period = match period {
        Some(n) => n,
        None => match detect_period(&signal)? {
            Some(n) => {
                tracing::info!("Detected period {}", n);
                n
            }
            None => anyhow::bail!(
                "No period up to {} detected; pass --period explicitly",
                MAX_PERIOD
            ),
        },
    };

    let coefficients = dtfs_coefficients(&signal, period)?;

    eprintln!("DTFS of '{}' with period {}:", signal.normalized(), period);
    eprintln!("   k     |a_k|     phase");
    for c in coefficients.iter().take(16) {
        eprintln!("  {:>2}  {:8.5}  {:8.5}", c.k, c.magnitude, c.phase);
    }
    if coefficients.len() > 16 {
        eprintln!("  ... {} more", coefficients.len() - 16);
    }
    output::write_json(&coefficients, out.as_deref())?;

    Ok(())
}

fn run_period(expr: &str) -> Result<()> {
    let signal = SignalExpr::parse(expr, Domain::Discrete).context("expression rejected")?;

    match detect_period(&signal)? {
        Some(n) => println!("Period: {}", n),
        None => println!("Aperiodic within the scan window (periods up to {})", MAX_PERIOD),
    }

    Ok(())
}

/// Parse `re` or `re,im` into a complex number.
fn parse_complex(s: &str) -> Result<Complex64, String> {
    let (re, im) = match s.split_once(',') {
        Some((re, im)) => (re, im),
        None => (s, "0"),
    };
    let re: f64 = re.trim().parse().map_err(|_| format!("invalid real part: {}", re))?;
    let im: f64 = im.trim().parse().map_err(|_| format!("invalid imaginary part: {}", im))?;
    Ok(Complex64::new(re, im))
}

/// Parse `lo,hi` into a window tuple.
fn parse_window(s: &str) -> Result<(f64, f64), String> {
    let (lo, hi) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `lo,hi`, got `{}`", s))?;
    let lo: f64 = lo.trim().parse().map_err(|_| format!("invalid lower edge: {}", lo))?;
    let hi: f64 = hi.trim().parse().map_err(|_| format!("invalid upper edge: {}", hi))?;
    Ok((lo, hi))
}
