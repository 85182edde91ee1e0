//! General message formatting functions for prettifying the CLI.
//! Includes basic utility functions such as:
//!
//! - Highlight Text (make the text tabula teal but not bold)
//! - System message formatting functions that produce the same
//! format messages.
//! - Engine errors, turned into system messages.
//! - The banner printed when a client starts.

use colored::{Color, Colorize};

use crate::persistence::Error;

/// Main color of the client, every highlight uses it.
pub(crate) const TABULA_TEAL: Color = Color::TrueColor {
    r: 64,
    g: 190,
    b: 176,
};

const BANNER_PADDING: usize = 4;

pub fn highlight_argument(argument: &str) -> String {
    //! Highlight a piece of text in the tabula teal
    //! color to make it obvious.
    //!
    //! Returns a formatted string.

    format!("{}", argument.color(TABULA_TEAL))
}

pub fn system_message(source_name: &str, message: String) -> String {
    //! Write a system message on the command line, properly
    //! formatted, according to the command line theme.
    //!
    //! Takes in a source name (like 'system') as [`str`] and
    //! the message as a formatted text; output of [`format!`].

    let source_formatted = format!("{:6}", source_name.color(TABULA_TEAL).bold());

    format!("[{}] {}", source_formatted, message)
}

pub fn engine_error(error: Error) -> String {
    system_message("engine", error.to_string())
}

fn banner_lines() -> Vec<String> {
    let title = format!("TABULA {}", env!("CARGO_PKG_VERSION"));
    let description = env!("CARGO_PKG_DESCRIPTION");
    let width = title.chars().count().max(description.chars().count()) + BANNER_PADDING;
    let rule = "─".repeat(width);

    vec![
        format!("┌{}┐", rule),
        format!("│{:^width$}│", title),
        format!("│{:^width$}│", description),
        format!("└{}┘", rule),
    ]
}

pub fn splash_screen() {
    //! Print the boxed name, version and description of the client.

    println!();
    for line in banner_lines() {
        println!("    {}", line.color(TABULA_TEAL));
    }
    println!();
}
