use pdf_writer::{Content, Date, Filter, Pdf, Rect, Ref, Str, TextStr};
use time::OffsetDateTime;

use super::fonts::{Face, encode_win_ansi};
use super::layout::{Layout, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

const POINTS_PER_MM: f32 = 72.0 / 25.4;
const PRODUCER: &str = concat!("docintel/", env!("CARGO_PKG_VERSION"));

fn pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Serialize a laid-out document. Page content streams are deflated.
pub(crate) fn encode(layout: &Layout, title: Option<&str>, created: OffsetDateTime) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();
    let font_ids: Vec<(Face, Ref)> = Face::ALL.iter().map(|face| (*face, alloc())).collect();

    let page_count = layout.page_count.max(1);
    let page_ids: Vec<Ref> = (0..page_count).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..page_count).map(|_| alloc()).collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_count as i32);

    for (face, font_id) in &font_ids {
        pdf.type1_font(*font_id)
            .base_font(face.base_font())
            .encoding_predefined(pdf_writer::Name(b"WinAnsiEncoding"));
    }

    let mut contents: Vec<Content> = (0..page_count).map(|_| Content::new()).collect();
    for line in layout.lines() {
        let Some(content) = contents.get_mut(line.page) else {
            continue;
        };
        content.begin_text();
        content.next_line(pt(line.x_mm), pt(PAGE_HEIGHT_MM - line.baseline_mm));
        for run in &line.runs {
            content.set_font(run.face.resource_name(), line.size);
            content.show(Str(&encode_win_ansi(&run.text)));
        }
        content.end_text();
    }

    for (index, content) in contents.into_iter().enumerate() {
        let raw = content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[index], &compressed)
            .filter(Filter::FlateDecode);

        let mut page = pdf.page(page_ids[index]);
        page.media_box(Rect::new(0.0, 0.0, pt(PAGE_WIDTH_MM), pt(PAGE_HEIGHT_MM)))
            .parent(pages_id)
            .contents(content_ids[index]);
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        for (face, font_id) in &font_ids {
            fonts.pair(face.resource_name(), *font_id);
        }
    }

    let mut info = pdf.document_info(info_id);
    if let Some(title) = title {
        info.title(TextStr(title));
    }
    info.producer(TextStr(PRODUCER));
    info.creation_date(pdf_date(created));
    drop(info);

    pdf.finish()
}

fn pdf_date(at: OffsetDateTime) -> Date {
    let year = u16::try_from(at.year()).unwrap_or(0);
    Date::new(year)
        .month(u8::from(at.month()))
        .day(at.day())
        .hour(at.hour())
        .minute(at.minute())
        .second(at.second())
        .utc_offset_hour(at.offset().whole_hours())
        .utc_offset_minute(at.offset().minutes_past_hour().unsigned_abs())
}
