//! Text measurement and word-wrapping for the built-in Helvetica font.
//!
//! Widths come from the standard Helvetica AFM metrics so layout does not
//! need a font file.

/// Millimetres per PDF point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Fallback advance for characters outside printable ASCII.
const DEFAULT_ADVANCE: u16 = 556;

/// Helvetica advance widths (1/1000 em) for ASCII 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

fn advance(ch: char) -> u16 {
    let code = ch as u32;
    if (32..=126).contains(&code) {
        HELVETICA_WIDTHS[(code - 32) as usize]
    } else {
        DEFAULT_ADVANCE
    }
}

/// Measure the width of a string in millimetres at the given point size.
pub fn measure_text_mm(text: &str, font_size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(advance(c))).sum();
    units as f32 / 1000.0 * font_size_pt * MM_PER_PT
}

/// Wrap text to fit within `max_width_mm`.
///
/// Breaks at whitespace. A single word wider than the limit starts on the
/// current line and is split character by character into the remaining
/// width. Always returns at least one line.
pub fn wrap_text(text: &str, font_size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0.0f32;

    for word in text.split_inclusive(|c: char| c.is_whitespace()) {
        let word_width = measure_text_mm(word.trim_end(), font_size_pt);

        if word_width > max_width_mm {
            for ch in word.chars() {
                let ch_w = measure_text_mm(&ch.to_string(), font_size_pt);
                if current_width + ch_w > max_width_mm && !current_line.is_empty() {
                    lines.push(std::mem::take(&mut current_line).trim_end().to_string());
                    current_width = 0.0;
                }
                current_line.push(ch);
                current_width += ch_w;
            }
            continue;
        }

        if current_width + word_width > max_width_mm && !current_line.is_empty() {
            lines.push(current_line.trim_end().to_string());
            current_line = String::new();
            current_width = 0.0;
        }

        current_line.push_str(word);
        current_width += measure_text_mm(word, font_size_pt);
    }

    if !current_line.is_empty() {
        lines.push(current_line.trim_end().to_string());
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
