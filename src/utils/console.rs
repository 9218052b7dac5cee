//! User facing output. Everything here goes to stdout, diagnostics go through `tracing`.

use ansi_term::{Colour, Style};

const RULE_WIDTH: usize = 50;

pub fn heading(title: &str) {
    println!();
    println!("{}", Style::new().bold().paint(title));
    rule();
}

pub fn rule() {
    println!("{}", "=".repeat(RULE_WIDTH));
}

pub fn success(message: &str) {
    println!("{} {message}", Colour::Green.bold().paint("ok"));
}

pub fn info(message: &str) {
    println!("{} {message}", Colour::Cyan.paint("::"));
}

pub fn warning(message: &str) {
    println!("{} {message}", Colour::Yellow.bold().paint("warning:"));
}
