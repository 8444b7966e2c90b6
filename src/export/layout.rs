//! Lays out the expense report as pages of positioned text lines.
//!
//! Positions are in points, measured from the top-left corner of an A4 page.

use crate::{
    expense::{Expense, format_amount},
    export::font::text_width,
    summary::NO_EXPENSES_NOTICE,
};

/// A4 page width.
pub const PAGE_WIDTH: f32 = 595.28;
/// A4 page height.
pub const PAGE_HEIGHT: f32 = 841.89;
/// The font size for all text.
pub const FONT_SIZE: f32 = 12.0;

/// 10mm left, right and top margins.
const MARGIN: f32 = 28.35;
/// Lines start a new page once they would cross 20mm above the bottom edge.
const BOTTOM_MARGIN: f32 = 56.69;
/// 10mm per line.
const LINE_HEIGHT: f32 = 28.35;
/// 5mm between the summary and the details heading.
const PARAGRAPH_GAP: f32 = 14.17;
/// 1mm between the margin and left-aligned text.
const TEXT_PADDING: f32 = 2.83;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

/// The title at the top of the first page.
pub const TITLE: &str = "Expense Summary";
/// The heading above the list of expenses.
pub const DETAILS_HEADING: &str = "Expense Details:";

/// A single line of text placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// The text, without any trailing newline.
    pub text: String,
    /// Distance from the left edge of the page to the start of the text.
    pub x: f32,
    /// Distance from the top edge of the page to the text baseline.
    pub baseline: f32,
}

/// The lines on one page of the report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    /// Lines in the order they are drawn, top to bottom.
    pub lines: Vec<TextLine>,
}

/// Lay out the report for `expenses` with the generated `summary`.
///
/// The report has a centered title followed by either a single
/// [NO_EXPENSES_NOTICE] line when `expenses` is empty, or the wrapped summary,
/// the [DETAILS_HEADING] and one line per expense.
pub fn layout_document(summary: &str, expenses: &[Expense]) -> Vec<PageLayout> {
    let mut writer = PageWriter::new();

    writer.write_line(TITLE, Align::Center);

    if expenses.is_empty() {
        writer.write_line(NO_EXPENSES_NOTICE, Align::Left);
        return writer.finish();
    }

    for line in wrap_text(summary, CONTENT_WIDTH - 2.0 * TEXT_PADDING, FONT_SIZE) {
        writer.write_line(&line, Align::Left);
    }

    writer.skip(PARAGRAPH_GAP);
    writer.write_line(DETAILS_HEADING, Align::Left);

    for expense in expenses {
        writer.write_line(&format_detail_line(expense), Align::Left);
    }

    writer.finish()
}

/// Render an expense as `<title> - Rs.<amount> on <date>`.
pub fn format_detail_line(expense: &Expense) -> String {
    format!(
        "{} - Rs.{} on {}",
        expense.title,
        format_amount(expense.amount),
        expense.date
    )
}

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
}

struct PageWriter {
    pages: Vec<PageLayout>,
    cursor: f32,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            pages: vec![PageLayout::default()],
            cursor: MARGIN,
        }
    }

    fn write_line(&mut self, text: &str, align: Align) {
        if self.cursor + LINE_HEIGHT > PAGE_HEIGHT - BOTTOM_MARGIN {
            self.pages.push(PageLayout::default());
            self.cursor = MARGIN;
        }

        let x = match align {
            Align::Left => MARGIN + TEXT_PADDING,
            Align::Center => {
                let offset = (CONTENT_WIDTH - text_width(text, FONT_SIZE)) / 2.0;
                MARGIN + offset.max(TEXT_PADDING)
            }
        };
        // Vertically centre the glyphs within the line box.
        let baseline = self.cursor + LINE_HEIGHT / 2.0 + 0.3 * FONT_SIZE;

        if let Some(page) = self.pages.last_mut() {
            page.lines.push(TextLine {
                text: text.to_owned(),
                x,
                baseline,
            });
        }

        self.cursor += LINE_HEIGHT;
    }

    fn skip(&mut self, height: f32) {
        self.cursor += height;
    }

    fn finish(self) -> Vec<PageLayout> {
        self.pages
    }
}

/// Break `text` into lines no wider than `max_width`.
///
/// Lines break between words; a word wider than a whole line is split between
/// characters. Newlines in `text` always start a new line.
fn wrap_text(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            if text_width(word, font_size) > max_width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }

                for c in word.chars() {
                    current.push(c);
                    if text_width(&current, font_size) > max_width {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(c);
                    }
                }
                continue;
            }

            let candidate = if current.is_empty() {
                word.to_owned()
            } else {
                format!("{current} {word}")
            };

            if text_width(&candidate, font_size) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_owned()));
            }
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod layout_tests {
    use time::macros::date;

    use crate::{
        expense::Expense,
        export::font::text_width,
        summary::NO_EXPENSES_NOTICE,
    };

    use super::{
        BOTTOM_MARGIN, DETAILS_HEADING, FONT_SIZE, MARGIN, PAGE_HEIGHT, PAGE_WIDTH, PageLayout,
        TITLE, layout_document, wrap_text,
    };

    fn expense(id: i64, title: &str, amount: f64) -> Expense {
        Expense {
            id,
            title: title.to_owned(),
            amount,
            category: "Misc".to_owned(),
            date: date!(2024 - 01 - 01),
        }
    }

    fn all_text(pages: &[PageLayout]) -> Vec<&str> {
        pages
            .iter()
            .flat_map(|page| page.lines.iter().map(|line| line.text.as_str()))
            .collect()
    }

    fn detail_lines(pages: &[PageLayout]) -> Vec<&str> {
        all_text(pages)
            .into_iter()
            .skip_while(|text| *text != DETAILS_HEADING)
            .skip(1)
            .collect()
    }

    #[test]
    fn empty_report_has_title_and_notice_only() {
        let pages = layout_document("ignored", &[]);

        assert_eq!(pages.len(), 1);
        assert_eq!(all_text(&pages), vec![TITLE, NO_EXPENSES_NOTICE]);
    }

    #[test]
    fn title_is_centered() {
        let pages = layout_document("", &[]);
        let title = &pages[0].lines[0];

        let left_gap = title.x;
        let right_gap = PAGE_WIDTH - (title.x + text_width(TITLE, FONT_SIZE));
        assert!((left_gap - right_gap).abs() < 0.01, "{left_gap} != {right_gap}");
    }

    #[test]
    fn report_lists_summary_then_one_line_per_expense() {
        let expenses = vec![
            expense(1, "Coffee", 4.5),
            expense(2, "Groceries", 3200.0),
            expense(3, "Bus", 2.25),
        ];

        let pages = layout_document("You spent the most on groceries.", &expenses);

        assert_eq!(
            all_text(&pages),
            vec![
                TITLE,
                "You spent the most on groceries.",
                DETAILS_HEADING,
                "Coffee - Rs.4.5 on 2024-01-01",
                "Groceries - Rs.3200.0 on 2024-01-01",
                "Bus - Rs.2.25 on 2024-01-01",
            ]
        );
    }

    #[test]
    fn long_reports_continue_on_new_pages() {
        let expenses: Vec<Expense> = (1..=60)
            .map(|id| expense(id, &format!("Item {id}"), id as f64))
            .collect();

        let pages = layout_document("A short summary.", &expenses);

        assert!(pages.len() > 1, "want several pages, got {}", pages.len());
        assert_eq!(detail_lines(&pages).len(), 60);
        for page in &pages {
            for line in &page.lines {
                assert!(line.baseline > MARGIN);
                assert!(line.baseline < PAGE_HEIGHT - BOTTOM_MARGIN);
            }
        }
    }

    #[test]
    fn wraps_long_summary_within_width() {
        let summary = "You spent the most on groceries this month, followed by transport \
            and eating out. The total expense is Rs.3,200 across 12 items, which is a little \
            more than last month.";

        let lines = wrap_text(summary, 200.0, 12.0);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 12.0) <= 200.0, "{line:?} is too wide");
        }
        assert_eq!(
            lines.join(" "),
            summary.split_whitespace().collect::<Vec<_>>().join(" ")
        );
    }

    #[test]
    fn splits_words_wider_than_a_line() {
        let word = "a".repeat(100);

        let lines = wrap_text(&word, 50.0, 12.0);

        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(text_width(line, 12.0) <= 50.0, "{line:?} is too wide");
        }
    }

    #[test]
    fn newlines_start_new_lines() {
        let lines = wrap_text("First line.\nSecond line.", 500.0, 12.0);

        assert_eq!(lines, vec!["First line.", "Second line."]);
    }
}
