use pdf_writer::Name;

/// Width used for characters outside the ASCII tables.
const FALLBACK_WIDTH: u16 = 556;
const BULLET_WIDTH: u16 = 350;

const MM_PER_POINT: f32 = 25.4 / 72.0;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Font faces available to the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Regular,
    Bold,
    Oblique,
}

impl Face {
    pub const ALL: [Face; 3] = [Face::Regular, Face::Bold, Face::Oblique];

    pub fn resource_name(self) -> Name<'static> {
        match self {
            Face::Regular => Name(b"F1"),
            Face::Bold => Name(b"F2"),
            Face::Oblique => Name(b"F3"),
        }
    }

    pub fn base_font(self) -> Name<'static> {
        match self {
            Face::Regular => Name(b"Helvetica"),
            Face::Bold => Name(b"Helvetica-Bold"),
            Face::Oblique => Name(b"Helvetica-Oblique"),
        }
    }

    fn table(self) -> &'static [u16; 95] {
        match self {
            Face::Bold => &HELVETICA_BOLD,
            // Oblique shares the upright advance widths.
            Face::Regular | Face::Oblique => &HELVETICA,
        }
    }

    pub fn char_width(self, ch: char) -> u16 {
        match ch {
            ' '..='~' => self.table()[ch as usize - 0x20],
            '•' => BULLET_WIDTH,
            _ => FALLBACK_WIDTH,
        }
    }

    /// Advance width of `text` in millimetres at `size` points.
    pub fn text_width_mm(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|ch| u32::from(self.char_width(ch))).sum();
        units as f32 / 1000.0 * size * MM_PER_POINT
    }
}

/// Encode text for a simple font using `WinAnsiEncoding`. Characters the
/// encoding cannot express become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        ' '..='~' => ch as u8,
        '\u{a0}'..='\u{ff}' => ch as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        '\t' => b' ',
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_is_wider_than_regular_for_lowercase() {
        let regular = Face::Regular.text_width_mm("budget", 11.0);
        let bold = Face::Bold.text_width_mm("budget", 11.0);
        assert!(bold > regular);
        assert_eq!(
            Face::Oblique.text_width_mm("budget", 11.0),
            regular,
            "oblique uses upright metrics"
        );
    }

    #[test]
    fn width_scales_with_size() {
        let small = Face::Regular.text_width_mm("Width", 10.0);
        let large = Face::Regular.text_width_mm("Width", 20.0);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn encodes_typographic_punctuation() {
        assert_eq!(encode_win_ansi("“a” – b…"), vec![0x93, b'a', 0x94, b' ', 0x96, b' ', b'b', 0x85]);
        assert_eq!(encode_win_ansi("café €5"), vec![b'c', b'a', b'f', 0xe9, b' ', 0x80, b'5']);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }
}
