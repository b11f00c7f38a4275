//! Terminal output helpers.
//!
//! Resolved versions and changelog lines go to stdout unstyled so they stay
//! machine-readable; diagnostics go to stderr with styling.

use console::style;

/// Print an error message to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print a non-fatal warning to stderr.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), message);
}

/// Print the changelog line list to stdout, preceded by a header.
pub fn display_changelog_with_header(lines: &[String]) {
    println!("Changelog:");
    for line in lines {
        println!("{}", line);
    }
}
