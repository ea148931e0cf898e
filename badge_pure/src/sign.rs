//! SSD1306 command and data sequences, built as plain byte payloads.
//!
//! Every function returns exactly one bus transaction: the leading control
//! byte tells the controller whether the rest is a command stream or column
//! data, and the whole slice goes out in a single addressed write.

use heapless::Vec;

use crate::font8x8;

/// Display width in columns, which is also the byte count of one page.
pub const WIDTH: usize = 128;
/// The 64 rows are addressed as eight 8-row pages.
pub const PAGES: u8 = 8;
/// Glyphs that fit on one page line.
pub const LINE_GLYPHS: usize = WIDTH / font8x8::GLYPH_WIDTH;

/// Control byte opening a command stream.
pub const COMMAND_STREAM: u8 = 0x00;
/// Control byte opening a data stream (column bytes for the current page).
pub const DATA_STREAM: u8 = 0x40;

// Command opcodes, per the SSD1306 datasheet.
const SET_LOWER_COLUMN: u8 = 0x00;
const SET_UPPER_COLUMN: u8 = 0x10;
const SCROLL_RIGHT_VERTICAL: u8 = 0x29;
const SCROLL_ACTIVATE: u8 = 0x2F;
const DISPLAY_NORMAL: u8 = 0xA6;
const DISPLAY_INVERTED: u8 = 0xA7;
const SCROLL_AREA: u8 = 0xA3;
const SEGMENT_REMAP: u8 = 0xA1;
const DISPLAY_ON: u8 = 0xAF;
const PAGE_START: u8 = 0xB0;
const COM_SCAN_DECREMENT: u8 = 0xC8;
const CHARGE_PUMP: u8 = 0x8D;
const CHARGE_PUMP_ON: u8 = 0x14;

/// Power-up configuration: charge pump on, segment/COM mapping flipped so
/// the common modules read upright, normal mode, display on.
pub fn init_sequence() -> [u8; 7] {
    [
        COMMAND_STREAM,
        CHARGE_PUMP,
        CHARGE_PUMP_ON,
        SEGMENT_REMAP,
        COM_SCAN_DECREMENT,
        DISPLAY_NORMAL,
        DISPLAY_ON,
    ]
}

/// Move the write cursor to column 0 of the given page. Pages past the last
/// wrap back to the top, so overlong text folds instead of addressing
/// nonexistent rows.
pub fn page_cursor(page: u8) -> [u8; 4] {
    [
        COMMAND_STREAM,
        SET_LOWER_COLUMN,
        SET_UPPER_COLUMN,
        PAGE_START | (page % PAGES),
    ]
}

/// One page worth of cleared columns.
pub fn blank_page() -> [u8; WIDTH + 1] {
    let mut payload = [0; WIDTH + 1];
    payload[0] = DATA_STREAM;
    payload
}

/// Column data for one line of text, truncated at the display edge.
pub fn line_payload(line: &str) -> Vec<u8, { WIDTH + 1 }> {
    let mut payload = Vec::new();
    payload.push(DATA_STREAM).unwrap();
    for c in line.chars().take(LINE_GLYPHS) {
        payload.extend_from_slice(&column_glyph(c)).unwrap();
    }
    payload
}

/// One glyph transposed from the font's row bitmaps into page column bytes
/// (bit 0 is the top row).
pub fn column_glyph(c: char) -> [u8; font8x8::GLYPH_WIDTH] {
    let rows = font8x8::glyph(c);
    let mut columns = [0u8; font8x8::GLYPH_WIDTH];
    for (y, row) in rows.iter().enumerate() {
        for (x, column) in columns.iter_mut().enumerate() {
            if row & (1 << x) != 0 {
                *column |= 1 << y;
            }
        }
    }
    columns
}

/// Continuous marquee: right horizontal scroll with a one-row vertical
/// crawl across all pages, then activate. The controller keeps the scroll
/// running without further traffic.
pub fn marquee_sequence() -> [u8; 11] {
    [
        COMMAND_STREAM,
        SCROLL_RIGHT_VERTICAL,
        0x00,      // dummy byte
        0x00,      // start page
        0x07,      // frame interval
        PAGES - 1, // end page
        0x01,      // vertical offset per scroll step
        SCROLL_AREA,
        0x00, // fixed rows
        0x40, // scrolling rows
        SCROLL_ACTIVATE,
    ]
}

pub fn invert_sequence(inverted: bool) -> [u8; 2] {
    [
        COMMAND_STREAM,
        if inverted {
            DISPLAY_INVERTED
        } else {
            DISPLAY_NORMAL
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_sequence_is_one_command_stream_ending_display_on() {
        let seq = init_sequence();
        assert_eq!(seq[0], COMMAND_STREAM);
        assert_eq!(*seq.last().unwrap(), 0xAF);
    }

    #[test]
    fn page_cursor_selects_the_page_and_wraps() {
        assert_eq!(page_cursor(3)[3], 0xB3);
        assert_eq!(page_cursor(8)[3], 0xB0);
    }

    #[test]
    fn blank_page_covers_every_column() {
        let payload = blank_page();
        assert_eq!(payload[0], DATA_STREAM);
        assert!(payload[1..].iter().all(|&b| b == 0));
        assert_eq!(payload.len(), 1 + WIDTH);
    }

    #[test]
    fn line_payload_is_column_data_for_each_glyph() {
        let payload = line_payload("hi");
        assert_eq!(payload[0], DATA_STREAM);
        assert_eq!(payload.len(), 1 + 2 * font8x8::GLYPH_WIDTH);
        assert_eq!(&payload[1..9], &column_glyph('h'));
    }

    #[test]
    fn line_payload_truncates_at_the_display_edge() {
        let payload = line_payload("a line much wider than sixteen glyphs");
        assert_eq!(payload.len(), 1 + WIDTH);
    }

    #[test]
    fn column_glyph_transposes_rows_to_columns() {
        // '_' is a single full-width bottom row, so every column carries
        // only bit 7
        assert_eq!(column_glyph('_'), [0x80; font8x8::GLYPH_WIDTH]);
        assert_eq!(column_glyph(' '), [0; font8x8::GLYPH_WIDTH]);
        // outside the table falls back to the blank glyph
        assert_eq!(column_glyph('é'), [0; font8x8::GLYPH_WIDTH]);
    }

    #[test]
    fn marquee_sequence_activates_last() {
        let seq = marquee_sequence();
        assert_eq!(seq[0], COMMAND_STREAM);
        assert_eq!(*seq.last().unwrap(), SCROLL_ACTIVATE);
    }
}
