//! Standard 14 PDF fonts used by the report
//!
//! The report only uses base fonts every PDF viewer ships, so nothing is
//! embedded. Text is encoded as WinAnsiEncoding and measured with the AFM
//! advance widths below.

use lopdf::{Dictionary, Document, Object};

/// Fonts referenced from page resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    CourierBold,
}

impl StandardFont {
    pub const ALL: [StandardFont; 3] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::CourierBold,
    ];

    /// Name of the font in the page `/Font` resource dictionary
    pub fn resource_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
            StandardFont::CourierBold => "F3",
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::CourierBold => "Courier-Bold",
        }
    }

    /// Advance width of one character in 1/1000ths of the em square
    fn char_width(&self, c: char) -> u16 {
        let code = c as u32;
        match self {
            StandardFont::CourierBold => 600,
            StandardFont::Helvetica if (32..=126).contains(&code) => {
                HELVETICA_WIDTHS[(code - 32) as usize]
            }
            StandardFont::HelveticaBold if (32..=126).contains(&code) => {
                HELVETICA_BOLD_WIDTHS[(code - 32) as usize]
            }
            // Latin-1 and punctuation outside ASCII: average lowercase width
            _ => 556,
        }
    }

    /// Width of `text` in points when set at `size` points
    pub fn text_width(&self, text: &str, size: f64) -> f64 {
        let units: u32 = text.chars().map(|c| u32::from(self.char_width(c))).sum();
        f64::from(units) * size / 1000.0
    }
}

/// Helvetica widths for characters 32-126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // space - /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0 - 9
    278, 278, 584, 584, 584, 556, 1015, // : - @
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A - M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N - Z
    278, 278, 278, 469, 556, 333, // [ - `
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a - m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n - z
    334, 260, 334, 584, // { - ~
];

/// Helvetica-Bold widths for characters 32-126
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // space - /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0 - 9
    333, 333, 584, 584, 584, 611, 975, // : - @
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A - M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N - Z
    333, 278, 333, 584, 556, 333, // [ - `
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a - m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n - z
    389, 280, 389, 584, // { - ~
];

/// Encode text for a WinAnsiEncoding simple font
///
/// Characters with no WinAnsi code point become `?`; control characters
/// become spaces.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            c if c.is_control() => b' ',
            _ => b'?',
        })
        .collect()
}

/// Add the font objects to `doc` and return the `/Font` resource dictionary
pub fn add_standard_fonts(doc: &mut Document) -> Dictionary {
    let mut fonts = Dictionary::new();

    for font in StandardFont::ALL {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"Font".to_vec()));
        dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        dict.set("BaseFont", Object::Name(font.base_font().as_bytes().to_vec()));
        dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));

        let font_id = doc.add_object(Object::Dictionary(dict));
        fonts.set(font.resource_name(), Object::Reference(font_id));
    }

    fonts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_tables_cover_printable_ascii() {
        assert_eq!(StandardFont::Helvetica.char_width(' '), 278);
        assert_eq!(StandardFont::Helvetica.char_width('A'), 667);
        assert_eq!(StandardFont::Helvetica.char_width('i'), 222);
        assert_eq!(StandardFont::Helvetica.char_width('~'), 584);
        assert_eq!(StandardFont::HelveticaBold.char_width('m'), 889);
        assert_eq!(StandardFont::HelveticaBold.char_width('z'), 500);
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let w10 = StandardFont::Helvetica.text_width("Title", 10.0);
        let w20 = StandardFont::Helvetica.text_width("Title", 20.0);
        assert!((w20 - 2.0 * w10).abs() < 1e-9);
        assert!(StandardFont::HelveticaBold.text_width("Title", 10.0) > w10);
    }

    #[test]
    fn test_courier_is_monospaced() {
        let font = StandardFont::CourierBold;
        assert_eq!(font.text_width("iii", 10.0), font.text_width("MMM", 10.0));
        assert!((font.text_width("abcd", 10.0) - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Page 1"), b"Page 1".to_vec());
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("a–b"), vec![b'a', 0x96, b'b']);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
        assert_eq!(encode_win_ansi("a\tb"), b"a b".to_vec());
    }

    #[test]
    fn test_add_standard_fonts() {
        let mut doc = Document::with_version("1.5");
        let fonts = add_standard_fonts(&mut doc);
        assert_eq!(fonts.len(), 3);
        assert!(fonts.get(b"F1").is_ok());
        assert!(fonts.get(b"F3").is_ok());
    }
}
