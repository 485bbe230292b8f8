//! Welcome banner: "ASSISTANT" in figlet standard font with a vertical gradient.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

const BANNER_TEXT: &str = "ASSISTANT";

/// Warm amber (#ffb000).
const AMBER: (u8, u8, u8) = (0xff, 0xb0, 0x00);
/// Sky blue (#3fa9f5).
const SKY: (u8, u8, u8) = (0x3f, 0xa9, 0xf5);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let mix = |x: u8, y: u8| (f64::from(x) * (1.0 - t) + f64::from(y) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Figlet art for the banner, or the plain text if the font cannot render it.
fn banner_art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(BANNER_TEXT).map(|figure| figure.to_string()))
        .unwrap_or_else(|| BANNER_TEXT.to_string())
}

/// Prints the banner with an amber-to-sky gradient, then version and usage hint.
pub fn print_welcome() {
    let mut out = stdout();
    let art = banner_art();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(AMBER, SKY, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: SKY.0,
        g: SKY.1,
        b: SKY.2,
    }));
    let _ = out.execute(Print(format!(
        "v{}  calendar · email · telegram · guidance\r\n",
        env!("CARGO_PKG_VERSION")
    )));
    let _ = out.execute(Print("Type 'help' for examples, 'quit' to leave.\r\n\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
