//! Reflection document export.
//!
//! Layout is computed separately from PDF encoding so pagination and wrapping
//! can be checked without parsing PDF output. Text is set in the built-in
//! Helvetica faces, which only cover printable ASCII here; anything else is
//! reported instead of being dropped.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

use super::{JournalError, ReflectionEntry, GOALS_HEADING};
use crate::identity::Identity;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const CELL_PADDING_MM: f32 = 1.0;
const BOTTOM_MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 10.0;
const GOALS_GAP_MM: f32 = 5.0;
const MM_PER_PT: f32 = 25.4 / 72.0;

/// Helvetica advance widths (1/1000 em) for `' '..='~'`.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Helvetica-Bold advance widths (1/1000 em) for `' '..='~'`.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading,
    Body,
}

impl LineStyle {
    fn font_size(self) -> f32 {
        match self {
            LineStyle::Title => 16.0,
            LineStyle::Heading | LineStyle::Body => 12.0,
        }
    }

    fn is_bold(self) -> bool {
        !matches!(self, LineStyle::Body)
    }

    fn widths(self) -> &'static [u16; 95] {
        if self.is_bold() {
            &HELVETICA_BOLD_WIDTHS
        } else {
            &HELVETICA_WIDTHS
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLine {
    pub text: String,
    pub style: LineStyle,
    pub centered: bool,
    /// Extra vertical space before this line.
    pub gap_before_mm: f32,
    /// Left edge of the text, from the page's left side.
    pub x_mm: f32,
    /// Baseline, from the page's bottom.
    pub y_mm: f32,
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub pages: Vec<Vec<DocumentLine>>,
}

impl PageLayout {
    /// All lines in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &DocumentLine> {
        self.pages.iter().flatten()
    }
}

/// Lay out the document for `entry`, paginating on the bottom margin.
pub fn layout(identity: &Identity, entry: &ReflectionEntry) -> Result<PageLayout, JournalError> {
    check_renderable("name", &identity.name)?;
    check_renderable("profession", &identity.profession)?;
    check_renderable("reflection", &entry.reflection)?;
    check_renderable("goals", &entry.goals)?;

    let title = format!("Reflection Journal - {}", identity.display());
    let mut flow = Vec::new();
    push_wrapped(&mut flow, &title, LineStyle::Title, true, 0.0);
    push_wrapped(
        &mut flow,
        &format!("Date: {}", entry.date.format("%Y-%m-%d")),
        LineStyle::Body,
        false,
        0.0,
    );
    push_wrapped(&mut flow, &entry.reflection, LineStyle::Body, false, 0.0);
    push_wrapped(&mut flow, GOALS_HEADING, LineStyle::Heading, false, GOALS_GAP_MM);
    push_wrapped(&mut flow, &entry.goals, LineStyle::Body, false, 0.0);

    Ok(paginate(flow))
}

/// Render the document for `entry` as PDF bytes.
pub fn render(identity: &Identity, entry: &ReflectionEntry) -> Result<Vec<u8>, JournalError> {
    let layout = layout(identity, entry)?;
    let title = format!("Reflection Journal - {}", identity.display());

    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1".to_string(),
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| JournalError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| JournalError::Render(e.to_string()))?;

    let mut first = Some((first_page, first_layer));
    for lines in &layout.pages {
        let (page, layer) = match first.take() {
            Some(indices) => indices,
            None => doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1".to_string()),
        };
        let layer = doc.get_page(page).get_layer(layer);
        for line in lines {
            if line.text.is_empty() {
                continue;
            }
            let font: &IndirectFontRef = if line.style.is_bold() { &bold } else { &regular };
            layer.use_text(
                line.text.clone(),
                line.style.font_size(),
                Mm(line.x_mm),
                Mm(line.y_mm),
                font,
            );
        }
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| JournalError::Render(e.to_string()))?;
    tracing::info!(
        "Rendered reflection document for {}: {} page(s), {} bytes",
        identity.display(),
        layout.pages.len(),
        bytes.len()
    );
    Ok(bytes)
}

fn check_renderable(field: &'static str, text: &str) -> Result<(), JournalError> {
    match text
        .chars()
        .find(|ch| !matches!(*ch, ' '..='~' | '\n' | '\r' | '\t'))
    {
        Some(ch) => Err(JournalError::UnsupportedCharacter { field, ch }),
        None => Ok(()),
    }
}

fn text_width_mm(text: &str, style: LineStyle) -> f32 {
    let widths = style.widths();
    let units: u32 = text
        .chars()
        .map(|ch| {
            // Tabs are written through as-is and advance like a space.
            let ch = if ch == '\t' { ' ' } else { ch };
            let idx = (ch as u32).saturating_sub(' ' as u32) as usize;
            u32::from(widths.get(idx).copied().unwrap_or(widths[0]))
        })
        .sum();
    units as f32 / 1000.0 * style.font_size() * MM_PER_PT
}

fn max_text_width_mm() -> f32 {
    PAGE_WIDTH_MM - 2.0 * MARGIN_MM - 2.0 * CELL_PADDING_MM
}

/// Wrap `text` to the printable width, keeping its spacing. Newlines start
/// new lines. An overflowing line breaks at its last space, which is dropped;
/// a line without one breaks between characters.
fn wrap(text: &str, style: LineStyle) -> Vec<String> {
    let max = max_text_width_mm();
    let mut out = Vec::new();
    for paragraph in text.replace('\r', "").split('\n') {
        let mut current = String::new();
        for ch in paragraph.chars() {
            current.push(ch);
            while text_width_mm(&current, style) > max {
                current = break_line(current, &mut out);
            }
        }
        out.push(current);
    }
    out
}

/// Emit the head of an overflowing line and return what carries over.
/// The carry-over is always shorter than `line`.
fn break_line(mut line: String, out: &mut Vec<String>) -> String {
    let last = match line.pop() {
        Some(ch) => ch,
        None => return line,
    };
    if last == ' ' {
        out.push(line);
        return String::new();
    }
    match line.rfind(' ') {
        Some(sep) if sep > 0 => {
            let mut rest = line[sep + 1..].to_string();
            rest.push(last);
            line.truncate(sep);
            out.push(line);
            rest
        }
        _ => {
            out.push(line);
            last.to_string()
        }
    }
}

fn push_wrapped(
    flow: &mut Vec<DocumentLine>,
    text: &str,
    style: LineStyle,
    centered: bool,
    gap_before_mm: f32,
) {
    for (i, text) in wrap(text, style).into_iter().enumerate() {
        let x_mm = if centered {
            ((PAGE_WIDTH_MM - text_width_mm(&text, style)) / 2.0).max(MARGIN_MM)
        } else {
            MARGIN_MM + CELL_PADDING_MM
        };
        flow.push(DocumentLine {
            text,
            style,
            centered,
            gap_before_mm: if i == 0 { gap_before_mm } else { 0.0 },
            x_mm,
            y_mm: 0.0,
        });
    }
}

fn paginate(flow: Vec<DocumentLine>) -> PageLayout {
    let mut pages: Vec<Vec<DocumentLine>> = vec![Vec::new()];
    let mut top = MARGIN_MM;
    for mut line in flow {
        top += line.gap_before_mm;
        if top + LINE_HEIGHT_MM > PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM {
            pages.push(Vec::new());
            top = MARGIN_MM;
        }
        let baseline = top + LINE_HEIGHT_MM / 2.0 + 0.3 * line.style.font_size() * MM_PER_PT;
        line.y_mm = PAGE_HEIGHT_MM - baseline;
        top += LINE_HEIGHT_MM;
        if let Some(page) = pages.last_mut() {
            page.push(line);
        }
    }
    PageLayout { pages }
}
