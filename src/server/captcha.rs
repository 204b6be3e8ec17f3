// file: src/server/captcha.rs
// description: captcha challenge generation and noisy SVG rendering
// reference: https://docs.rs/rand

use rand::Rng;
use rand::distributions::Alphanumeric;

pub const CAPTCHA_LENGTH: usize = 5;

const WIDTH: u32 = 200;
const HEIGHT: u32 = 70;
const NOISE_LINES: usize = 8;
const NOISE_DOTS: usize = 250;

pub fn random_text<R: Rng>(rng: &mut R, length: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Render `text` with per-character rotation and jitter over random lines
/// and dots.
pub fn render_svg<R: Rng>(rng: &mut R, text: &str) -> String {
    let mut svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect width="100%" height="100%" fill="#ffffff"/>"##,
        w = WIDTH,
        h = HEIGHT
    );

    for _ in 0..NOISE_LINES {
        svg.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="rgb({},{},{})" stroke-width="2"/>"#,
            rng.gen_range(0..=WIDTH),
            rng.gen_range(0..=HEIGHT),
            rng.gen_range(0..=WIDTH),
            rng.gen_range(0..=HEIGHT),
            rng.gen_range(100..=200),
            rng.gen_range(100..=200),
            rng.gen_range(100..=200),
        ));
    }

    for (i, ch) in text.chars().enumerate() {
        let x = 20 + i as i32 * 30 + rng.gen_range(-5..=5);
        let y = 45 + rng.gen_range(0..=10);
        let angle = rng.gen_range(-25..=25);
        svg.push_str(&format!(
            r##"<text x="{x}" y="{y}" font-family="Arial, sans-serif" font-size="38" fill="#000000" transform="rotate({angle} {x} {y})">{ch}</text>"##,
        ));
    }

    for _ in 0..NOISE_DOTS {
        svg.push_str(&format!(
            r#"<rect x="{}" y="{}" width="1" height="1" fill="rgb({},{},{})"/>"#,
            rng.gen_range(0..WIDTH),
            rng.gen_range(0..HEIGHT),
            rng.gen_range(0..=255),
            rng.gen_range(0..=255),
            rng.gen_range(0..=255),
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// Exact, case-sensitive comparison against the stored challenge.
pub fn verify(expected: Option<&str>, answer: &str) -> bool {
    let answer = answer.trim();
    match expected {
        Some(expected) => !answer.is_empty() && !expected.is_empty() && answer == expected,
        None => false,
    }
}
