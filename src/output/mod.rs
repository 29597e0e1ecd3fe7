//! Styled terminal output for the cachecraft CLI
//!
//! Operator-facing messages go to stdout. Diagnostic logging is separate
//! and goes through `tracing` on stderr.

use owo_colors::OwoColorize;

type Rgb = (u8, u8, u8);

const MINT: Rgb = (152, 225, 152);
const CREAM: Rgb = (255, 230, 160);
const SKY: Rgb = (160, 200, 255);
const LAVENDER: Rgb = (181, 174, 254);
const TEAL: Rgb = (120, 180, 195);
const GREY: Rgb = (160, 160, 160);

fn paint(text: &str, (r, g, b): Rgb) -> String {
    text.truecolor(r, g, b).to_string()
}

fn paint_bold(text: &str, (r, g, b): Rgb) -> String {
    text.truecolor(r, g, b).bold().to_string()
}

/// Print a success message with a green checkmark
pub fn success(message: &str) {
    println!("{} {}", paint_bold("✓", MINT), message.bright_white());
}

/// Print a warning message with a yellow warning symbol
pub fn warning(message: &str) {
    println!("{} {}", paint_bold("⚠", CREAM), message.bright_white());
}

/// Print an info message with a blue info symbol
pub fn info(message: &str) {
    println!("{} {}", paint_bold("ℹ", SKY), message.bright_white());
}

/// Print a section header with a separator line
pub fn section(title: &str) {
    println!("\n{}", paint_bold(title, LAVENDER));
    println!("{}", paint(&"─".repeat(50), GREY));
}

/// Print a small section header with a dotted rule
pub fn subsection(title: &str) {
    println!("\n{}", paint(title, TEAL));
    println!("{}", paint(&"·".repeat(30), GREY));
}

/// Print a key-value pair with styled key and value
pub fn key_value(key: &str, value: &str) {
    println!(
        "  {} {}",
        paint(&format!("{}:", key), GREY),
        value.bright_white()
    );
}

/// Print a key-value pair where the value is highlighted
pub fn key_value_highlight(key: &str, value: &str) {
    println!(
        "  {} {}",
        paint(&format!("{}:", key), GREY),
        paint_bold(value, TEAL)
    );
}

/// Print a dimmed/muted message
pub fn dimmed(message: &str) {
    println!("{}", paint(message, GREY));
}

/// Print a catalog listing line
pub fn list_item(text: &str) {
    println!("  {}", text.bright_white());
}

/// Print text as-is
pub fn plain(text: &str) {
    println!("{}", text);
}

/// Print a blank line for spacing
pub fn blank() {
    println!();
}
