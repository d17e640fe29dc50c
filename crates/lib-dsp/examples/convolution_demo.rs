//! Rectangular pulse against a unit step, end to end.
//!
//! This example demonstrates:
//! 1. Parsing the two operand expressions
//! 2. Estimating their supports and planning the windows
//! 3. Running the continuous convolution
//! 4. Printing a handful of output samples

use lib_dsp::convolution::{convolve_continuous, ConvolutionConfig};
use lib_dsp::ranges::plan_windows;
use lib_dsp::support::{estimate_support, ScanConfig};
use lib_expr::SignalExpr;
use lib_types::Domain;

fn main() -> anyhow::Result<()> {
    let x = SignalExpr::parse("u(t)-u(t-2)", Domain::Continuous)?;
    let h = SignalExpr::parse("u(t)", Domain::Continuous)?;

    println!("=== signal-studio convolution demo ===\n");
    println!("x(t) = {}", x.normalized());
    println!("h(t) = {}", h.normalized());

    let scan = ScanConfig::default();
    let x_support = estimate_support(&x, &scan)?;
    let h_support = estimate_support(&h, &scan)?;
    match x_support {
        Some(s) => println!("\nsupport of x: [{:.2}, {:.2}]", s.lo, s.hi),
        None => println!("\nsupport of x: none above tolerance"),
    }
    match h_support {
        Some(s) => println!("support of h: [{:.2}, {:.2}]", s.lo, s.hi),
        None => println!("support of h: none above tolerance"),
    }

    let windows = plan_windows(x_support, h_support);
    println!(
        "output window [{:.2}, {:.2}], integration window [{:.2}, {:.2}]",
        windows.output.lo, windows.output.hi, windows.integration.lo, windows.integration.hi
    );

    let result = convolve_continuous(&x, &h, &ConvolutionConfig::default())?;
    println!(
        "\n{} output samples, {} animation frames",
        result.len(),
        result.frames.len()
    );

    println!("\n       t      y(t)");
    for i in (0..result.len()).step_by((result.len() / 12).max(1)) {
        println!("  {:8.3}  {:8.4}", result.t[i], result.y[i]);
    }

    Ok(())
}
