//! PDF page access behind a narrow trait.
//!
//! [`PageSource`] is the seam between the extraction pipeline and the
//! concrete PDF library: per page it exposes positioned characters, image
//! placements, and ruling lines. [`LopdfSource`] implements it on top of
//! `lopdf` by interpreting each page's content stream with a graphics and
//! text state machine.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use lopdf::content::Operation;
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

use super::content::{Char, PlacedImage, Ruling};

/// Abstract page access for the extraction pipeline.
///
/// Page numbers are 1-based document page numbers.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Positioned characters for a page, in content-stream order.
    fn chars(&self, page_number: u32) -> Result<Vec<Char>>;

    /// Image placements for a page.
    fn images(&self, page_number: u32) -> Result<Vec<PlacedImage>>;

    /// Ruling lines for a page: painted axis-aligned path segments and
    /// rectangle edges.
    fn rulings(&self, page_number: u32) -> Result<Vec<Ruling>>;
}

/// Simple text decoding fallback when no font encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // Try UTF-16BE first (BOM marker)
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    // Try UTF-8
    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

// ---------------------------------------------------------------------------
// LopdfSource: concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

/// Concrete [`PageSource`] backed by `lopdf::Document`.
///
/// Interpreted pages are memoized, so the chars/images/rulings accessors
/// share one content-stream pass per page.
pub struct LopdfSource {
    doc: LopdfDocument,
    cache: RefCell<HashMap<u32, PageItems>>,
}

impl LopdfSource {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self {
            doc,
            cache: RefCell::new(HashMap::new()),
        })
    }

    /// Items for one page, interpreting its content stream on first access.
    fn page_items(&self, page_number: u32) -> Result<PageItems> {
        if let Some(items) = self.cache.borrow().get(&page_number) {
            return Ok(items.clone());
        }

        let items = self.interpret_page(page_number)?;
        self.cache
            .borrow_mut()
            .insert(page_number, items.clone());
        Ok(items)
    }

    /// Interpret one page's content stream into characters, image
    /// placements, and rulings.
    fn interpret_page(&self, page_number: u32) -> Result<PageItems> {
        let pages = self.doc.get_pages();
        let page_id = *pages
            .get(&page_number)
            .ok_or(Error::PageOutOfRange(page_number, pages.len() as u32))?;

        // Pages without fonts (image-only pages) are fine.
        let fonts = self.doc.get_page_fonts(page_id).unwrap_or_default();
        let image_names = self.image_xobject_names(page_id);

        let content = self.page_content(page_id)?;
        if content.is_empty() {
            return Ok(PageItems::default());
        }

        let decoded = lopdf::content::Content::decode(&content)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut interpreter = ContentInterpreter::new(&self.doc, fonts, image_names);
        interpreter.run(&decoded.operations);
        Ok(interpreter.finish())
    }

    /// Get a page's content stream bytes. A page with no `Contents` entry
    /// simply has no content.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(obj) => obj,
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return s
                        .decompressed_content()
                        .map_err(|e| Error::PdfParse(e.to_string()));
                }
                Err(Error::PdfParse("Invalid content stream".to_string()))
            }
            Object::Stream(s) => s
                .decompressed_content()
                .map_err(|e| Error::PdfParse(e.to_string())),
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    /// Names of the page's XObjects whose subtype is `Image`, so `Do`
    /// operators can be told apart from form XObject invocations.
    fn image_xobject_names(&self, page_id: ObjectId) -> HashSet<Vec<u8>> {
        let mut names = HashSet::new();

        let page_dict = match self.doc.get_dictionary(page_id) {
            Ok(dict) => dict,
            Err(_) => return names,
        };

        let resources = match page_dict.get(b"Resources") {
            Ok(Object::Reference(id)) => self.doc.get_dictionary(*id).ok(),
            Ok(Object::Dictionary(dict)) => Some(dict),
            _ => None,
        };

        let xobjects = resources.and_then(|res| match res.get(b"XObject") {
            Ok(Object::Reference(id)) => self.doc.get_dictionary(*id).ok(),
            Ok(Object::Dictionary(dict)) => Some(dict),
            _ => None,
        });

        if let Some(xobjects) = xobjects {
            for (name, value) in xobjects.iter() {
                let stream = match value {
                    Object::Reference(id) => self
                        .doc
                        .get_object(*id)
                        .ok()
                        .and_then(|obj| obj.as_stream().ok()),
                    Object::Stream(s) => Some(s),
                    _ => None,
                };

                if let Some(stream) = stream {
                    let is_image = stream
                        .dict
                        .get(b"Subtype")
                        .ok()
                        .and_then(|s| s.as_name().ok())
                        .map(|n| n == b"Image")
                        .unwrap_or(false);
                    if is_image {
                        names.insert(name.clone());
                    }
                }
            }
        }

        names
    }
}

impl PageSource for LopdfSource {
    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn chars(&self, page_number: u32) -> Result<Vec<Char>> {
        Ok(self.page_items(page_number)?.chars)
    }

    fn images(&self, page_number: u32) -> Result<Vec<PlacedImage>> {
        Ok(self.page_items(page_number)?.images)
    }

    fn rulings(&self, page_number: u32) -> Result<Vec<Ruling>> {
        Ok(self.page_items(page_number)?.rulings)
    }
}

// ---------------------------------------------------------------------------
// Content stream interpretation
// ---------------------------------------------------------------------------

/// Everything one interpreter pass extracts from a page.
#[derive(Debug, Clone, Default)]
struct PageItems {
    chars: Vec<Char>,
    images: Vec<PlacedImage>,
    rulings: Vec<Ruling>,
}

/// Average glyph advance as a fraction of font size. Character widths are
/// estimated rather than read from font width tables.
const GLYPH_WIDTH_FACTOR: f32 = 0.5;

/// Kerning adjustments beyond this many thousandths of text space read as
/// word gaps in `TJ` arrays.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Graphics and text state machine over a page's content operations.
struct ContentInterpreter<'a> {
    doc: &'a LopdfDocument,
    fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
    image_names: HashSet<Vec<u8>>,
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    text: TextState,
    path: PathState,
    items: PageItems,
}

impl<'a> ContentInterpreter<'a> {
    fn new(
        doc: &'a LopdfDocument,
        fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
        image_names: HashSet<Vec<u8>>,
    ) -> Self {
        Self {
            doc,
            fonts,
            image_names,
            ctm: Matrix::IDENTITY,
            ctm_stack: Vec::new(),
            text: TextState::default(),
            path: PathState::default(),
            items: PageItems::default(),
        }
    }

    fn run(&mut self, operations: &[Operation]) {
        let mut in_text = false;

        for op in operations {
            match op.operator.as_str() {
                "q" => self.ctm_stack.push(self.ctm),
                "Q" => {
                    if let Some(m) = self.ctm_stack.pop() {
                        self.ctm = m;
                    }
                }
                "cm" => {
                    if op.operands.len() >= 6 {
                        let m = Matrix::from_operands(&op.operands);
                        self.ctm = m.then(&self.ctm);
                    }
                }

                "BT" => {
                    in_text = true;
                    self.text.text_matrix = Matrix::IDENTITY;
                    self.text.line_matrix = Matrix::IDENTITY;
                }
                "ET" => in_text = false,
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(name) = &op.operands[0] {
                            self.text.font_name = name.clone();
                        }
                        self.text.font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(leading) = op.operands.first().and_then(get_number) {
                        self.text.leading = leading;
                    }
                }
                "Td" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        self.text.translate_line(tx, ty);
                    }
                }
                "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        self.text.leading = -ty;
                        self.text.translate_line(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        let m = Matrix::from_operands(&op.operands);
                        self.text.text_matrix = m;
                        self.text.line_matrix = m;
                    }
                }
                "T*" => self.text.next_line(),

                "Tj" => {
                    if in_text {
                        if let Some(Object::String(bytes, _)) = op.operands.first() {
                            let text = self.decode_string(bytes);
                            self.show_text(text);
                        }
                    }
                }
                "'" => {
                    if in_text {
                        self.text.next_line();
                        if let Some(Object::String(bytes, _)) = op.operands.first() {
                            let text = self.decode_string(bytes);
                            self.show_text(text);
                        }
                    }
                }
                "\"" => {
                    if in_text {
                        self.text.next_line();
                        if let Some(Object::String(bytes, _)) = op.operands.get(2) {
                            let text = self.decode_string(bytes);
                            self.show_text(text);
                        }
                    }
                }
                "TJ" => {
                    if in_text {
                        if let Some(Object::Array(arr)) = op.operands.first() {
                            self.show_text_array(arr);
                        }
                    }
                }

                "m" => {
                    if op.operands.len() >= 2 {
                        let point = self.transform_operands(&op.operands[0], &op.operands[1]);
                        self.path.move_to(point);
                    }
                }
                "l" => {
                    if op.operands.len() >= 2 {
                        let point = self.transform_operands(&op.operands[0], &op.operands[1]);
                        self.path.line_to(point);
                    }
                }
                "h" => self.path.close(),
                "c" => {
                    if op.operands.len() >= 6 {
                        let point = self.transform_operands(&op.operands[4], &op.operands[5]);
                        self.path.curve_to(point);
                    }
                }
                "v" | "y" => {
                    if op.operands.len() >= 4 {
                        let point = self.transform_operands(&op.operands[2], &op.operands[3]);
                        self.path.curve_to(point);
                    }
                }
                "re" => {
                    if op.operands.len() >= 4 {
                        self.rectangle(&op.operands);
                    }
                }
                // Painting makes the pending segments real rulings.
                "S" | "f" | "F" | "f*" | "B" | "B*" => self.paint_path(false),
                "s" | "b" | "b*" => self.paint_path(true),
                // Path ended without painting (e.g. clipping only).
                "n" => self.path.reset(),

                "Do" => {
                    if let Some(Object::Name(name)) = op.operands.first() {
                        if self.image_names.contains(name.as_slice()) {
                            self.place_image(name);
                        }
                    }
                }

                _ => {}
            }
        }
    }

    fn finish(self) -> PageItems {
        self.items
    }

    /// Decode a string operand with the current font's encoding.
    fn decode_string(&self, bytes: &[u8]) -> String {
        if let Some(font) = self.fonts.get(&self.text.font_name) {
            if let Ok(encoding) = font.get_font_encoding(self.doc) {
                if let Ok(text) = LopdfDocument::decode_text(&encoding, bytes) {
                    return text;
                }
            }
        }
        decode_text_simple(bytes)
    }

    /// Emit one character run at the current text position and advance the
    /// text matrix by the estimated width.
    fn show_text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }

        let count = text.chars().count() as f32;
        let trm = self.text.text_matrix.then(&self.ctm);
        let (x, y) = trm.apply(0.0, 0.0);
        let size = self.text.font_size * trm.vertical_scale();
        let width = GLYPH_WIDTH_FACTOR * size * count;

        self.items.chars.push(Char::new(text, x, y, x + width, y + size));

        let advance = GLYPH_WIDTH_FACTOR * self.text.font_size * count;
        self.text.advance(advance);
    }

    /// `TJ`: alternating string runs and kerning adjustments.
    fn show_text_array(&mut self, array: &[Object]) {
        for item in array {
            match item {
                Object::String(bytes, _) => {
                    let text = self.decode_string(bytes);
                    self.show_text(text);
                }
                Object::Integer(_) | Object::Real(_) => {
                    let n = get_number(item).unwrap_or(0.0);
                    // Positive adjustments pull text back, negative push it on.
                    let shift = -n / 1000.0 * self.text.font_size;
                    self.text.advance(shift);
                    if -n > TJ_SPACE_THRESHOLD {
                        self.show_text(" ".to_string());
                    }
                }
                _ => {}
            }
        }
    }

    fn transform_operands(&self, x: &Object, y: &Object) -> (f32, f32) {
        let x = get_number(x).unwrap_or(0.0);
        let y = get_number(y).unwrap_or(0.0);
        self.ctm.apply(x, y)
    }

    /// `re`: four rectangle edges become pending rulings.
    fn rectangle(&mut self, operands: &[Object]) {
        let x = get_number(&operands[0]).unwrap_or(0.0);
        let y = get_number(&operands[1]).unwrap_or(0.0);
        let w = get_number(&operands[2]).unwrap_or(0.0);
        let h = get_number(&operands[3]).unwrap_or(0.0);

        let p00 = self.ctm.apply(x, y);
        let p10 = self.ctm.apply(x + w, y);
        let p11 = self.ctm.apply(x + w, y + h);
        let p01 = self.ctm.apply(x, y + h);

        for (from, to) in [(p00, p10), (p10, p11), (p11, p01), (p01, p00)] {
            if let Some(ruling) = Ruling::from_points(from.0, from.1, to.0, to.1) {
                self.path.pending.push(ruling);
            }
        }

        self.path.current = Some(p00);
        self.path.subpath_start = Some(p00);
    }

    fn paint_path(&mut self, close_first: bool) {
        if close_first {
            self.path.close();
        }
        self.items.rulings.append(&mut self.path.pending);
        self.path.reset();
    }

    /// `Do` on an image XObject: the image fills the unit square mapped
    /// through the current transform.
    fn place_image(&mut self, name: &[u8]) {
        let corners = [
            self.ctm.apply(0.0, 0.0),
            self.ctm.apply(1.0, 0.0),
            self.ctm.apply(0.0, 1.0),
            self.ctm.apply(1.0, 1.0),
        ];

        let mut x0 = f32::INFINITY;
        let mut y0 = f32::INFINITY;
        let mut x1 = f32::NEG_INFINITY;
        let mut y1 = f32::NEG_INFINITY;
        for (x, y) in corners {
            x0 = x0.min(x);
            y0 = y0.min(y);
            x1 = x1.max(x);
            y1 = y1.max(y);
        }

        let name = String::from_utf8_lossy(name).to_string();
        self.items.images.push(PlacedImage::new(name, x0, y0, x1, y1));
    }
}

/// Text object state: current font plus the text and line matrices.
struct TextState {
    font_name: Vec<u8>,
    font_size: f32,
    leading: f32,
    text_matrix: Matrix,
    line_matrix: Matrix,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_name: Vec::new(),
            font_size: 12.0,
            leading: 0.0,
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
        }
    }
}

impl TextState {
    /// `Td`/`TD`: move the line matrix, and restart the text matrix there.
    fn translate_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).then(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    /// `T*`: next line using the current leading.
    fn next_line(&mut self) {
        let leading = self.leading;
        self.translate_line(0.0, -leading);
    }

    /// Advance the text matrix along the baseline after showing text.
    fn advance(&mut self, tx: f32) {
        self.text_matrix = Matrix::translation(tx, 0.0).then(&self.text_matrix);
    }
}

/// Path construction state. Segments collect as pending rulings until a
/// painting operator confirms them.
#[derive(Default)]
struct PathState {
    current: Option<(f32, f32)>,
    subpath_start: Option<(f32, f32)>,
    pending: Vec<Ruling>,
}

impl PathState {
    fn move_to(&mut self, point: (f32, f32)) {
        self.current = Some(point);
        self.subpath_start = Some(point);
    }

    fn line_to(&mut self, to: (f32, f32)) {
        if let Some(from) = self.current {
            if let Some(ruling) = Ruling::from_points(from.0, from.1, to.0, to.1) {
                self.pending.push(ruling);
            }
        }
        self.current = Some(to);
    }

    /// Curves only move the current point; they never produce rulings.
    fn curve_to(&mut self, to: (f32, f32)) {
        self.current = Some(to);
    }

    fn close(&mut self) {
        if let (Some(from), Some(start)) = (self.current, self.subpath_start) {
            if from != start {
                if let Some(ruling) = Ruling::from_points(from.0, from.1, start.0, start.1) {
                    self.pending.push(ruling);
                }
            }
            self.current = Some(start);
        }
    }

    fn reset(&mut self) {
        self.current = None;
        self.subpath_start = None;
        self.pending.clear();
    }
}

/// 2D affine transform in PDF's six-number form.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translation(tx: f32, ty: f32) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    /// Read `a b c d e f` from the first six operands.
    fn from_operands(operands: &[Object]) -> Self {
        Self {
            a: get_number(&operands[0]).unwrap_or(1.0),
            b: get_number(&operands[1]).unwrap_or(0.0),
            c: get_number(&operands[2]).unwrap_or(0.0),
            d: get_number(&operands[3]).unwrap_or(1.0),
            e: get_number(&operands[4]).unwrap_or(0.0),
            f: get_number(&operands[5]).unwrap_or(0.0),
        }
    }

    /// Compose: `self` applied first, then `after`.
    fn then(&self, after: &Matrix) -> Matrix {
        Matrix {
            a: self.a * after.a + self.b * after.c,
            b: self.a * after.b + self.b * after.d,
            c: self.c * after.a + self.d * after.c,
            d: self.c * after.b + self.d * after.d,
            e: self.e * after.a + self.f * after.c + after.e,
            f: self.e * after.b + self.f * after.d + after.f,
        }
    }

    /// Transform a point.
    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Length of the mapped vertical unit vector, for effective font sizes.
    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Helper: extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
