//! Output formatting for CLI

use crate::report::RunReport;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Render a 0/1 sequence as `[0, 1, 1]`.
pub fn format_bits(bits: &[u8]) -> String {
    let inner: Vec<String> = bits.iter().map(u8::to_string).collect();
    format!("[{}]", inner.join(", "))
}

/// Print the final belief table of a run.
pub fn print_run_report(report: &RunReport, show_history: bool) {
    print_kv("Model", &report.model);
    print_kv("Strategy", &report.strategy.to_string());
    print_kv(
        "Noise",
        &format!(
            "sense {:.0}% / move {:.0}%",
            report.noise_observation * 100.0,
            report.noise_actuation * 100.0
        ),
    );
    print_kv("World tiles", &format_bits(&report.labels));
    if show_history {
        print_kv("History", &format!("{:?}", report.history));
    }
    print_kv(
        "Flips",
        &format!(
            "{} sensed, {} moves",
            report.summary.observation_flips, report.summary.actuation_flips
        ),
    );

    print_subsection("Final Predictions and Variances");
    for cell in &report.cells {
        println!(
            "Position {}: Mean = {:.3}, Variance = {:.3}  (black {}, white {}, 95% CI [{:.2}, {:.2}]){}",
            cell.position,
            cell.mean,
            cell.variance,
            cell.black,
            cell.white,
            cell.credible_interval.0,
            cell.credible_interval.1,
            if cell.is_correct() { "" } else { "  *" }
        );
    }
    print_kv("Accuracy", &format!("{:.1}%", report.accuracy() * 100.0));
    let unvisited = report.unvisited();
    if !unvisited.is_empty() {
        print_kv("Never visited", &format!("{unvisited:?}"));
    }
}
