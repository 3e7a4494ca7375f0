//! Startup splash screen.

use colored::*;
use std::io::{self, Write};

const LOGO: &[&str] = &[
    r" _____         _    _____ _               ",
    r"|_   _|_ _ ___| | _|  ___| | _____      __",
    r"  | |/ _` / __| |/ / |_  | |/ _ \ \ /\ / /",
    r"  | | (_| \__ \   <|  _| | | (_) \ V  V / ",
    r"  |_|\__,_|___/_|\_\_|   |_|\___/ \_/\_/  ",
];

const TAGLINE: &str = "Nested-loop task simulator";

/// Uncolored splash text for `version`
pub fn splash_text(version: &str) -> String {
    let mut out = LOGO.join("\n");
    out.push('\n');
    out.push_str(&format!("v{} · {}\n", version, TAGLINE));
    out
}

/// Write the logo, version and tagline
pub fn write_splash<W: Write>(out: &mut W, version: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", splash_text(version).bright_magenta().bold())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splash_text_contains_version() {
        let text = splash_text("1.2.3");
        assert!(text.contains("v1.2.3"));
        assert!(text.contains(TAGLINE));
        assert_eq!(text.lines().count(), LOGO.len() + 1);
    }

    #[test]
    fn test_write_splash() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        write_splash(&mut out, "0.1.0").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with('\n'));
        assert!(text.contains("v0.1.0"));
    }
}
