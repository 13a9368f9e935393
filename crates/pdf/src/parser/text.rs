//! Plain-text extraction from page content streams.
//!
//! A reduced version of the PDF text-rendering state machine: only the
//! vertical position is tracked, and a new line starts whenever text is shown
//! on a different baseline than the previous run. A baseline jump wider than
//! `BLOCK_GAP_FACTOR` times the font size also emits an empty line, so
//! paragraphs come out separated by blank lines.
//!
//! | Operator     | Action                                   |
//! |--------------|------------------------------------------|
//! | `BT`         | Begin text object, reset position        |
//! | `Tf`         | Remember the font used for decoding      |
//! | `Tm`         | Set the baseline from the matrix         |
//! | `Td` / `TD`  | Move the baseline (and set leading, `TD`)|
//! | `TL`         | Set text leading                         |
//! | `T*`         | Move to the next line                    |
//! | `Tj`         | Show a string                            |
//! | `TJ`         | Show strings with kerning adjustments    |
//! | `'` / `"`    | Move to the next line and show a string  |

use super::backend::{get_number_from_value, ContentOp, PageId, PdfBackend, PdfValue};
use crate::PdfError;

/// Marker placed in front of every page's text.
const PAGE_MARKER: char = '\u{000C}';

/// Baselines closer than this (in text space units) belong to the same line.
const BASELINE_TOLERANCE: f32 = 2.0;

/// A `TJ` adjustment at or beyond this many thousandths of an em to the right
/// reads as a word gap.
const WORD_GAP_THOUSANDTHS: f32 = 150.0;

/// A vertical jump larger than this multiple of the font size separates two
/// paragraphs.
const BLOCK_GAP_FACTOR: f32 = 1.4;

/// Font size assumed until a `Tf` operator sets one.
const DEFAULT_FONT_SIZE: f32 = 12.0;

#[derive(Debug, Default)]
struct LineWriter {
    lines: Vec<String>,
    current: String,
    current_y: Option<f32>,
    y: f32,
    leading: f32,
    font: Vec<u8>,
    font_size: f32,
    /// Vertical scale of the text matrix; `Td`, `TD` and `T*` moves and the
    /// font size are multiplied by it.
    scale: f32,
    pending_space: bool,
}

impl LineWriter {
    fn flush(&mut self) {
        let line = std::mem::take(&mut self.current);
        let line = line.trim_end();
        if !line.is_empty() {
            self.lines.push(line.to_string());
        }
        self.current_y = None;
        self.pending_space = false;
    }

    fn begin_text(&mut self) {
        self.y = 0.0;
        self.scale = 1.0;
    }

    fn set_matrix(&mut self, d: f32, f: f32) {
        self.y = f;
        self.scale = if d == 0.0 { 1.0 } else { d.abs() };
    }

    fn move_by(&mut self, ty: f32) {
        self.y += ty * self.scale;
    }

    fn next_line(&mut self) {
        self.move_by(-self.leading);
    }

    /// Effective font size in user space.
    fn line_height(&self) -> f32 {
        let size = if self.font_size > 0.0 {
            self.font_size
        } else {
            DEFAULT_FONT_SIZE
        };
        size * self.scale
    }

    fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|line| !line.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn show(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        if let Some(line_y) = self.current_y {
            let jump = (self.y - line_y).abs();
            if jump > BASELINE_TOLERANCE {
                self.flush();
                if jump > self.line_height() * BLOCK_GAP_FACTOR {
                    self.blank_line();
                }
            }
        }

        if self.pending_space && !self.current.is_empty() && !self.current.ends_with(' ') {
            self.current.push(' ');
        }
        self.pending_space = false;

        self.current.push_str(text);
        self.current_y = Some(self.y);
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        if self.lines.last().is_some_and(|line| line.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Extract the text lines of a single page, in content-stream order.
pub fn extract_page_lines(
    backend: &dyn PdfBackend,
    page_id: PageId,
) -> Result<Vec<String>, PdfError> {
    let ops = backend.page_operations(page_id)?;
    let mut writer = LineWriter {
        scale: 1.0,
        ..LineWriter::default()
    };

    for op in &ops {
        apply_operation(backend, page_id, op, &mut writer);
    }

    Ok(writer.finish())
}

fn apply_operation(backend: &dyn PdfBackend, page_id: PageId, op: &ContentOp, w: &mut LineWriter) {
    let number = |i: usize| {
        op.operands
            .get(i)
            .and_then(get_number_from_value)
            .unwrap_or(0.0)
    };

    match op.operator.as_str() {
        "BT" => w.begin_text(),
        "Tf" => {
            if let Some(PdfValue::Name(name)) = op.operands.first() {
                w.font = name.clone();
            }
            w.font_size = number(1).abs();
        }
        "Tm" => {
            if op.operands.len() >= 6 {
                w.set_matrix(number(3), number(5));
            }
        }
        "Td" => {
            let (tx, ty) = (number(0), number(1));
            if ty == 0.0 && tx > 0.0 {
                w.pending_space = true;
            }
            w.move_by(ty);
        }
        "TD" => {
            let ty = number(1);
            w.leading = -ty;
            w.move_by(ty);
        }
        "TL" => w.leading = number(0),
        "T*" => w.next_line(),
        "Tj" => {
            if let Some(val) = op.operands.first() {
                let text = decode_operand(backend, page_id, &w.font, val);
                w.show(&text);
            }
        }
        "'" => {
            w.next_line();
            if let Some(val) = op.operands.first() {
                let text = decode_operand(backend, page_id, &w.font, val);
                w.show(&text);
            }
        }
        "\"" => {
            w.next_line();
            if let Some(val) = op.operands.get(2) {
                let text = decode_operand(backend, page_id, &w.font, val);
                w.show(&text);
            }
        }
        "TJ" => {
            if let Some(PdfValue::Array(items)) = op.operands.first() {
                show_kerned(backend, page_id, items, w);
            }
        }
        _ => {}
    }
}

fn show_kerned(backend: &dyn PdfBackend, page_id: PageId, items: &[PdfValue], w: &mut LineWriter) {
    let mut buf = String::new();

    for item in items {
        match item {
            PdfValue::Str(_) => buf.push_str(&decode_operand(backend, page_id, &w.font, item)),
            other => {
                // Negative adjustments move the next glyph to the right.
                if let Some(adj) = get_number_from_value(other) {
                    if -adj >= WORD_GAP_THOUSANDTHS && !buf.is_empty() && !buf.ends_with(' ') {
                        buf.push(' ');
                    }
                }
            }
        }
    }

    w.show(&buf);
}

fn decode_operand(backend: &dyn PdfBackend, page_id: PageId, font: &[u8], val: &PdfValue) -> String {
    match val {
        PdfValue::Str(bytes) => backend.decode_text(page_id, font, bytes),
        _ => String::new(),
    }
}

/// Extract the whole document as one string.
///
/// Every page starts with a form feed glued to its first line; a page
/// without text contributes a lone marker line. Pages are separated by a
/// blank line.
pub fn extract_document_text(backend: &dyn PdfBackend) -> Result<String, PdfError> {
    let pages = backend.pages();
    let mut out: Vec<String> = Vec::with_capacity(pages.len());

    for (&page_num, &page_id) in &pages {
        let mut lines = extract_page_lines(backend, page_id)?;
        attach_footer(&mut lines);
        log::debug!("page {}: {} line(s)", page_num, lines.len());

        let mut page = String::new();
        page.push(PAGE_MARKER);
        page.push_str(&lines.join("\n"));
        out.push(page);
    }

    Ok(out.join("\n\n"))
}

/// Drop the blank line in front of a trailing page-number footer. The page
/// marker already counts that break; a footer after a blank line would count
/// it a second time.
fn attach_footer(lines: &mut Vec<String>) {
    let n = lines.len();
    if n >= 2
        && lines[n - 2].is_empty()
        && lines[n - 1].chars().all(|c| c.is_ascii_digit())
    {
        lines.remove(n - 2);
    }
}
