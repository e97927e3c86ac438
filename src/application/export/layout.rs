//! Page layout for the PDF export.
//!
//! Coordinates are millimetres measured from the top-left corner of an A4
//! page. Each block is wrapped to the content width and placed at the cursor;
//! a block that would cross the bottom limit moves to a fresh page, and a
//! block taller than a whole page continues line by line.

use crate::application::render::{Block, Document, RichText};

use super::fonts::Face;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 15.0;
pub const TOP_MM: f32 = 20.0;
pub const BOTTOM_LIMIT_MM: f32 = 280.0;
pub const BLOCK_SPACING_MM: f32 = 4.0;
pub const BULLET_INDENT_MM: f32 = 5.0;
pub const BULLET_PREFIX: &str = "• ";

const TITLE_GAP_MM: f32 = 5.0;
const SECTION_GAP_MM: f32 = 10.0;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 11.0;
const SCORE_SIZE: f32 = 12.0;

/// jsPDF-style line height: font size in points divided by 2.5, in mm.
pub fn line_height_mm(size: f32) -> f32 {
    size / 2.5
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRole {
    Title,
    Heading,
    Lead,
    Paragraph,
    Field,
    Bullet,
    Score,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub face: Face,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// Zero-based page index.
    pub page: usize,
    pub x_mm: f32,
    pub baseline_mm: f32,
    pub size: f32,
    pub runs: Vec<TextRun>,
}

impl PlacedLine {
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    pub role: BlockRole,
    pub lines: Vec<PlacedLine>,
}

impl PlacedBlock {
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(PlacedLine::text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub page_count: usize,
    pub blocks: Vec<PlacedBlock>,
}

impl Layout {
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.blocks.iter().flat_map(|block| block.lines.iter())
    }

    pub fn blocks_with_role(&self, role: BlockRole) -> impl Iterator<Item = &PlacedBlock> {
        self.blocks.iter().filter(move |block| block.role == role)
    }
}

#[derive(Debug, Clone, Copy)]
struct BlockStyle {
    role: BlockRole,
    size: f32,
    face: Face,
    indent: f32,
}

impl BlockStyle {
    const fn new(role: BlockRole, size: f32, face: Face) -> Self {
        Self {
            role,
            size,
            face,
            indent: 0.0,
        }
    }
}

const TITLE: BlockStyle = BlockStyle::new(BlockRole::Title, TITLE_SIZE, Face::Bold);
const HEADING: BlockStyle = BlockStyle::new(BlockRole::Heading, HEADING_SIZE, Face::Bold);
const LEAD: BlockStyle = BlockStyle::new(BlockRole::Lead, BODY_SIZE, Face::Oblique);
const PARAGRAPH: BlockStyle = BlockStyle::new(BlockRole::Paragraph, BODY_SIZE, Face::Regular);
const FIELD: BlockStyle = BlockStyle::new(BlockRole::Field, BODY_SIZE, Face::Regular);
const SCORE: BlockStyle = BlockStyle::new(BlockRole::Score, SCORE_SIZE, Face::Regular);
const BULLET: BlockStyle = BlockStyle {
    indent: BULLET_INDENT_MM,
    ..BlockStyle::new(BlockRole::Bullet, BODY_SIZE, Face::Regular)
};

/// Lay out a projected document onto A4 pages.
pub fn layout(document: &Document) -> Layout {
    let mut paginator = Paginator::new();

    if let Some(title) = &document.title {
        if paginator.place(TITLE, &[TextRun::new(TITLE.face, title)]) {
            paginator.advance(TITLE_GAP_MM);
        }
    }

    for section in &document.sections {
        if let Some(heading) = &section.heading {
            paginator.place(HEADING, &[TextRun::new(HEADING.face, heading)]);
        }
        for block in &section.blocks {
            place_block(&mut paginator, block);
        }
        paginator.advance(SECTION_GAP_MM);
    }

    paginator.finish()
}

fn place_block(paginator: &mut Paginator, block: &Block) {
    match block {
        Block::Lead { text } => {
            paginator.place(LEAD, &styled_runs(text, LEAD.face));
        }
        Block::Paragraph { text } => {
            paginator.place(PARAGRAPH, &styled_runs(text, PARAGRAPH.face));
        }
        Block::Field { label, value } => {
            if value.is_empty() {
                return;
            }
            let mut runs = vec![TextRun::new(Face::Bold, format!("{label}: "))];
            runs.extend(styled_runs(value, FIELD.face));
            paginator.place(FIELD, &runs);
        }
        Block::BulletList { items } => {
            for item in items.iter().filter(|item| !item.is_empty()) {
                let mut runs = vec![TextRun::new(BULLET.face, BULLET_PREFIX)];
                runs.extend(styled_runs(item, BULLET.face));
                paginator.place(BULLET, &runs);
            }
        }
        Block::Score { text } => {
            paginator.place(SCORE, &[TextRun::new(SCORE.face, text)]);
        }
    }
}

fn styled_runs(text: &RichText, base: Face) -> Vec<TextRun> {
    text.spans
        .iter()
        .map(|span| TextRun {
            face: if span.strong { Face::Bold } else { base },
            text: span.text.clone(),
        })
        .collect()
}

impl TextRun {
    fn new(face: Face, text: impl Into<String>) -> Self {
        Self {
            face,
            text: text.into(),
        }
    }
}

struct Paginator {
    page: usize,
    cursor: f32,
    blocks: Vec<PlacedBlock>,
}

impl Paginator {
    fn new() -> Self {
        Self {
            page: 0,
            cursor: TOP_MM,
            blocks: Vec::new(),
        }
    }

    fn advance(&mut self, gap: f32) {
        self.cursor += gap;
    }

    fn new_page(&mut self) {
        self.page += 1;
        self.cursor = TOP_MM;
    }

    /// Wrap and place one block. Returns `false` when there was nothing to
    /// draw, in which case the cursor does not move.
    fn place(&mut self, style: BlockStyle, runs: &[TextRun]) -> bool {
        let max_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM - style.indent;
        let wrapped = wrap(runs, style.size, max_width);
        if wrapped.iter().all(Vec::is_empty) {
            return false;
        }

        let line_height = line_height_mm(style.size);
        let block_height = wrapped.len() as f32 * line_height;
        let x_mm = MARGIN_MM + style.indent;

        if self.cursor + block_height > BOTTOM_LIMIT_MM && TOP_MM + block_height <= BOTTOM_LIMIT_MM
        {
            self.new_page();
        }

        let mut lines = Vec::with_capacity(wrapped.len());
        for runs in wrapped {
            if self.cursor + line_height > BOTTOM_LIMIT_MM && self.cursor > TOP_MM {
                self.new_page();
            }
            lines.push(PlacedLine {
                page: self.page,
                x_mm,
                baseline_mm: self.cursor,
                size: style.size,
                runs,
            });
            self.cursor += line_height;
        }
        self.cursor += BLOCK_SPACING_MM;

        self.blocks.push(PlacedBlock {
            role: style.role,
            lines,
        });
        true
    }

    fn finish(self) -> Layout {
        Layout {
            page_count: self.page + 1,
            blocks: self.blocks,
        }
    }
}

#[derive(Debug)]
enum Token {
    Word(Vec<TextRun>),
    Space(Face),
    Break,
}

fn tokenize(runs: &[TextRun]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word: Vec<TextRun> = Vec::new();

    for run in runs {
        for ch in run.text.chars() {
            if ch.is_whitespace() {
                if !word.is_empty() {
                    tokens.push(Token::Word(std::mem::take(&mut word)));
                }
                if ch == '\n' {
                    tokens.push(Token::Break);
                } else if !matches!(tokens.last(), Some(Token::Space(_))) {
                    tokens.push(Token::Space(run.face));
                }
            } else {
                push_char(&mut word, run.face, ch);
            }
        }
    }
    if !word.is_empty() {
        tokens.push(Token::Word(word));
    }
    tokens
}

fn push_char(runs: &mut Vec<TextRun>, face: Face, ch: char) {
    match runs.last_mut() {
        Some(last) if last.face == face => last.text.push(ch),
        _ => runs.push(TextRun {
            face,
            text: ch.to_string(),
        }),
    }
}

fn runs_width(runs: &[TextRun], size: f32) -> f32 {
    runs.iter()
        .map(|run| run.face.text_width_mm(&run.text, size))
        .sum()
}

/// Greedy line fill. Explicit newlines always break; a word wider than the
/// whole line is split between characters.
fn wrap(runs: &[TextRun], size: f32, max_width: f32) -> Vec<Vec<TextRun>> {
    let mut lines = Vec::new();
    let mut line: Vec<TextRun> = Vec::new();
    let mut width = 0.0_f32;
    let mut pending_space: Option<Face> = None;

    for token in tokenize(runs) {
        match token {
            Token::Break => {
                lines.push(std::mem::take(&mut line));
                width = 0.0;
                pending_space = None;
            }
            Token::Space(face) => {
                if !line.is_empty() {
                    pending_space = Some(face);
                }
            }
            Token::Word(word) => {
                let word_width = runs_width(&word, size);
                let space_width = pending_space
                    .map(|face| face.text_width_mm(" ", size))
                    .unwrap_or(0.0);

                if !line.is_empty() && width + space_width + word_width > max_width {
                    lines.push(std::mem::take(&mut line));
                    width = 0.0;
                    pending_space = None;
                }

                if line.is_empty() && word_width > max_width {
                    for run in &word {
                        for ch in run.text.chars() {
                            let char_width = run.face.text_width_mm(ch.encode_utf8(&mut [0; 4]), size);
                            if !line.is_empty() && width + char_width > max_width {
                                lines.push(std::mem::take(&mut line));
                                width = 0.0;
                            }
                            push_char(&mut line, run.face, ch);
                            width += char_width;
                        }
                    }
                    continue;
                }

                if let Some(face) = pending_space.take() {
                    if !line.is_empty() {
                        push_char(&mut line, face, ' ');
                        width += space_width;
                    }
                }
                for run in word {
                    for ch in run.text.chars() {
                        push_char(&mut line, run.face, ch);
                    }
                }
                width += word_width;
            }
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
