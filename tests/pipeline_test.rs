//! Integration tests for the extraction pipeline over a mock page source.

use pdfsift::error::{Error, Result};
use pdfsift::model::ContentBlock;
use pdfsift::parser::{
    Char, ChartSource, PageSource, ParseOptions, PdfParser, PlacedImage, Ruling, TableGrid,
    TableSource,
};
use pdfsift::render::{to_json, JsonFormat};
use pdfsift::ChartBlock;

/// Fixed per-page content for the mock source.
#[derive(Default)]
struct MockPage {
    chars: Vec<Char>,
    images: Vec<PlacedImage>,
    rulings: Vec<Ruling>,
}

/// Mock page source serving canned fixtures.
struct MockSource {
    pages: Vec<MockPage>,
}

impl MockSource {
    fn page(&self, page_number: u32) -> Result<&MockPage> {
        self.pages
            .get(page_number as usize - 1)
            .ok_or(Error::PageOutOfRange(page_number, self.pages.len() as u32))
    }
}

impl PageSource for MockSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn chars(&self, page_number: u32) -> Result<Vec<Char>> {
        Ok(self.page(page_number)?.chars.clone())
    }

    fn images(&self, page_number: u32) -> Result<Vec<PlacedImage>> {
        Ok(self.page(page_number)?.images.clone())
    }

    fn rulings(&self, page_number: u32) -> Result<Vec<Ruling>> {
        Ok(self.page(page_number)?.rulings.clone())
    }
}

/// Table service that fails on one specific page.
struct FlakyTables {
    fail_on: u32,
}

impl TableSource for FlakyTables {
    fn tables(&self, page_number: u32) -> Result<Vec<TableGrid>> {
        if page_number == self.fail_on {
            Err(Error::TableExtract("ruling decode failed".to_string()))
        } else {
            Ok(vec![vec![vec!["a".to_string(), "b".to_string()]]])
        }
    }
}

struct NoCharts;

impl ChartSource for NoCharts {
    fn charts(&self, _page_number: u32) -> Result<Vec<ChartBlock>> {
        Ok(Vec::new())
    }
}

fn text_char(text: &str, x: f32, y: f32) -> Char {
    Char::new(text, x, y, x + text.len() as f32 * 5.0, y + 10.0)
}

/// Three horizontal and three vertical rulings forming a 2x2 grid between
/// (72, bottom) and (372, bottom + 60).
fn grid_rulings(bottom: f32) -> Vec<Ruling> {
    let top = bottom + 60.0;
    let mid = bottom + 30.0;
    vec![
        Ruling::horizontal(top, 72.0, 372.0),
        Ruling::horizontal(mid, 72.0, 372.0),
        Ruling::horizontal(bottom, 72.0, 372.0),
        Ruling::vertical(72.0, bottom, top),
        Ruling::vertical(222.0, bottom, top),
        Ruling::vertical(372.0, bottom, top),
    ]
}

/// One page with a heading, body text, a ruled 2x2 table, a caption line,
/// and a chart-sized image.
fn report_page() -> MockPage {
    let mut chars = vec![
        text_char("2. Results", 72.0, 700.0),
        text_char(
            "Revenue increased across all regions this quarter.",
            72.0,
            688.0,
        ),
        text_char("Figure 1: Revenue by region", 72.0, 60.0),
    ];
    // Table cells, one char per cell
    chars.push(text_char("North", 100.0, 540.0));
    chars.push(text_char("1,200", 250.0, 540.0));
    chars.push(text_char("South", 100.0, 505.0));
    chars.push(text_char("950", 250.0, 505.0));

    MockPage {
        chars,
        images: vec![PlacedImage::new("Im1", 72.0, 80.0, 292.0, 240.0)],
        rulings: grid_rulings(500.0),
    }
}

#[test]
fn test_full_page_extraction() {
    let source = MockSource {
        pages: vec![report_page()],
    };
    let parser = PdfParser::with_source(source, ParseOptions::default());
    let document = parser.parse().unwrap();

    assert_eq!(document.page_count(), 1);
    let page = &document.pages[0];
    assert_eq!(page.block_count(), 4);

    // Paragraphs come first, then tables, then charts.
    match &page.content[0] {
        ContentBlock::Paragraph(p) => {
            assert_eq!(p.section.as_deref(), Some("2. Results"));
            assert!(p.text.contains("Revenue increased"));
        }
        other => panic!("expected paragraph, got {:?}", other),
    }
    match &page.content[1] {
        ContentBlock::Paragraph(p) => {
            assert_eq!(p.text, "Figure 1: Revenue by region");
        }
        other => panic!("expected paragraph, got {:?}", other),
    }
    match &page.content[2] {
        ContentBlock::Table(t) => {
            assert_eq!(t.description, "Table 1 from page 1");
            assert_eq!(
                t.table_data,
                vec![
                    vec!["North".to_string(), "1,200".to_string()],
                    vec!["South".to_string(), "950".to_string()],
                ]
            );
            assert_eq!(t.section.as_deref(), Some("2. Results"));
        }
        other => panic!("expected table, got {:?}", other),
    }
    match &page.content[3] {
        ContentBlock::Chart(c) => {
            assert_eq!(
                c.description,
                "Chart/Image 1 - Figure 1: Revenue by region..."
            );
            assert_eq!(c.dimensions.width, 220.0);
            assert_eq!(c.dimensions.height, 160.0);
            assert_eq!(c.section.as_deref(), Some("2. Results"));
            assert!(c.table_data.is_empty());
        }
        other => panic!("expected chart, got {:?}", other),
    }
}

#[test]
fn test_table_inherits_latest_section() {
    // Sections run A, None, B down the page; the table takes B.
    let mut chars = vec![
        text_char("1. Alpha", 72.0, 700.0),
        text_char("Opening remarks with enough text to keep.", 72.0, 688.0),
        text_char("Unattributed middle paragraph text.", 72.0, 600.0),
        text_char("2. Beta", 72.0, 500.0),
        text_char("Second section body with enough text.", 72.0, 488.0),
    ];
    chars.push(text_char("East", 100.0, 340.0));
    chars.push(text_char("2,400", 250.0, 340.0));
    chars.push(text_char("West", 100.0, 310.0));
    chars.push(text_char("1,100", 250.0, 310.0));

    let source = MockSource {
        pages: vec![MockPage {
            chars,
            rulings: grid_rulings(300.0),
            ..Default::default()
        }],
    };
    let parser = PdfParser::with_source(source, ParseOptions::default());
    let document = parser.parse().unwrap();

    let page = &document.pages[0];
    let table = page
        .content
        .iter()
        .find_map(|block| match block {
            ContentBlock::Table(t) => Some(t),
            _ => None,
        })
        .expect("table block");

    assert_eq!(table.section.as_deref(), Some("2. Beta"));
    assert_eq!(table.sub_section, None);
}

#[test]
fn test_table_failure_on_one_page_does_not_abort() {
    let pages = vec![report_page(), report_page(), report_page()];
    let source = MockSource { pages };
    let parser = PdfParser::with_source(source, ParseOptions::default());

    let tables = FlakyTables { fail_on: 2 };
    let document = parser.parse_with_services(&tables, &NoCharts).unwrap();

    assert_eq!(document.page_count(), 3);
    let table_counts: Vec<usize> = document
        .pages
        .iter()
        .map(|p| p.content.iter().filter(|b| b.is_table()).count())
        .collect();
    assert_eq!(table_counts, vec![1, 0, 1]);
}

#[test]
fn test_chart_size_thresholds() {
    // 50x200 is not a chart; 150x150 is.
    let source = MockSource {
        pages: vec![MockPage {
            images: vec![
                PlacedImage::new("Im1", 0.0, 0.0, 50.0, 200.0),
                PlacedImage::new("Im2", 300.0, 300.0, 450.0, 450.0),
            ],
            ..Default::default()
        }],
    };
    let parser = PdfParser::with_source(source, ParseOptions::default());
    let document = parser.parse().unwrap();

    let page = &document.pages[0];
    assert_eq!(page.block_count(), 1);
    match &page.content[0] {
        ContentBlock::Chart(c) => {
            // The rejected image ahead of it still counts toward the index.
            assert_eq!(c.description, "Chart/Image 2");
            assert_eq!(c.dimensions.width, 150.0);
            assert_eq!(c.dimensions.height, 150.0);
            assert_eq!(c.section, None);
        }
        other => panic!("expected chart, got {:?}", other),
    }
}

#[test]
fn test_page_selection_keeps_document_numbers() {
    let pages = vec![report_page(), MockPage::default(), report_page()];
    let source = MockSource { pages };
    let options = ParseOptions::new().with_pages(vec![1, 3]);
    let parser = PdfParser::with_source(source, options);

    let document = parser.parse().unwrap();
    assert_eq!(document.page_count(), 2);
    assert_eq!(document.pages[0].page_number, 1);
    assert_eq!(document.pages[1].page_number, 3);
}

#[test]
fn test_selection_outside_document_yields_empty() {
    let source = MockSource {
        pages: vec![report_page(), report_page()],
    };
    let options = ParseOptions::new().with_pages(vec![5]);
    let parser = PdfParser::with_source(source, options);

    let document = parser.parse().unwrap();
    assert!(document.is_empty());
}

#[test]
fn test_empty_source_serializes_to_empty_pages() {
    let source = MockSource { pages: vec![] };
    let parser = PdfParser::with_source(source, ParseOptions::default());
    let document = parser.parse().unwrap();

    let json = to_json(&document, JsonFormat::Compact).unwrap();
    assert_eq!(json, r#"{"pages":[]}"#);
}

#[test]
fn test_single_paragraph_json_shape() {
    let source = MockSource {
        pages: vec![MockPage {
            chars: vec![text_char(
                "Margins improved modestly year over year.",
                72.0,
                700.0,
            )],
            ..Default::default()
        }],
    };
    let parser = PdfParser::with_source(source, ParseOptions::default());
    let document = parser.parse().unwrap();

    let json = to_json(&document, JsonFormat::Pretty).unwrap();
    let expected = r#"{
  "pages": [
    {
      "page_number": 1,
      "content": [
        {
          "type": "paragraph",
          "section": null,
          "sub_section": null,
          "text": "Margins improved modestly year over year."
        }
      ]
    }
  ]
}"#;
    assert_eq!(json, expected);
}
