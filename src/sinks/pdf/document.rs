//! PDF document assembly over `lopdf`.
//!
//! [`QuizDocument`] accumulates drawing operations and form-field widgets
//! per page, then serializes everything in one pass: content streams, the
//! page tree, the AcroForm dictionary, and document metadata. Nothing is
//! written until [`QuizDocument::finish`], so a failed render never leaves a
//! partial file behind.
//!
//! Text is drawn with the built-in Helvetica Type1 font; glyph widths are
//! never measured here (layout uses its own estimate). Radio buttons are
//! proper exclusive-choice groups: one parent `Btn` field per question with
//! one widget kid per choice, sharing a pair of circle appearance streams
//! for the on/off states. `NeedAppearances` is set so viewers regenerate
//! text-field appearances on fill-in.

use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// Width and height of a radio-button widget, in points.
pub const RADIO_SIZE_PT: f32 = 15.0;

/// Handle to a radio group opened with [`QuizDocument::begin_radio_group`].
#[derive(Debug, Clone, Copy)]
pub struct RadioGroupHandle(usize);

#[derive(Default)]
struct PageInProgress {
    operations: Vec<Operation>,
    annotations: Vec<Object>,
}

struct RadioGroup {
    field_id: ObjectId,
    name: String,
    kids: Vec<Object>,
}

/// An in-progress quiz PDF.
pub struct QuizDocument {
    doc: Document,
    pages_id: ObjectId,
    font_id: ObjectId,
    radio_on_ap: ObjectId,
    radio_off_ap: ObjectId,
    page_width_pt: f32,
    page_height_pt: f32,
    pages: Vec<PageInProgress>,
    fields: Vec<ObjectId>,
    groups: Vec<RadioGroup>,
}

impl QuizDocument {
    /// Create an empty document with one open page.
    pub fn new(page_width_pt: f32, page_height_pt: f32) -> Result<QuizDocument> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let radio_on_ap = add_radio_appearance(&mut doc, true)
            .with_context(|| "Failed to build selected radio appearance")?;
        let radio_off_ap = add_radio_appearance(&mut doc, false)
            .with_context(|| "Failed to build unselected radio appearance")?;

        Ok(QuizDocument {
            doc,
            pages_id,
            font_id,
            radio_on_ap,
            radio_off_ap,
            page_width_pt,
            page_height_pt,
            pages: vec![PageInProgress::default()],
            fields: Vec::new(),
            groups: Vec::new(),
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Close the current page and start drawing on a fresh one.
    pub fn add_page(&mut self) {
        self.pages.push(PageInProgress::default());
    }

    fn current_page(&mut self) -> &mut PageInProgress {
        self.pages.last_mut().expect("a page is always open")
    }

    /// Draw a single line of black text with its baseline at (`x`, `y`).
    pub fn draw_text(&mut self, text: &str, x: f32, y: f32, size_pt: f32) {
        self.draw_text_colored(text, x, y, size_pt, (0.0, 0.0, 0.0));
    }

    /// Draw a single line of text in the given RGB fill color.
    pub fn draw_text_colored(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        size_pt: f32,
        (r, g, b): (f32, f32, f32),
    ) {
        let ops = &mut self.current_page().operations;
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec!["Helv".into(), size_pt.into()]));
        ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
        ops.push(Operation::new("ET", vec![]));
    }

    /// Open a new exclusive-choice group bound to the field `name`.
    ///
    /// Options are added to the group with [`Self::add_radio_option`]; the
    /// parent field object is emitted at [`Self::finish`] once all kids are
    /// known.
    pub fn begin_radio_group(&mut self, name: &str) -> RadioGroupHandle {
        let field_id = self.doc.new_object_id();
        self.fields.push(field_id);
        self.groups.push(RadioGroup {
            field_id,
            name: name.to_string(),
            kids: Vec::new(),
        });
        RadioGroupHandle(self.groups.len() - 1)
    }

    /// Add one selectable choice to a radio group, as a 15x15 pt widget with
    /// its lower-left corner at (`x`, `y`) on the current page.
    pub fn add_radio_option(&mut self, group: RadioGroupHandle, export_name: &str, x: f32, y: f32) {
        let parent_id = self.groups[group.0].field_id;

        let mut on_states = Dictionary::new();
        on_states.set(export_name, Object::Reference(self.radio_on_ap));
        on_states.set("Off", Object::Reference(self.radio_off_ap));

        let widget = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "Rect" => vec![
                x.into(),
                y.into(),
                (x + RADIO_SIZE_PT).into(),
                (y + RADIO_SIZE_PT).into(),
            ],
            "Parent" => Object::Reference(parent_id),
            "F" => 4_i64,
            "AS" => "Off",
            "MK" => dictionary! {
                "BC" => vec![0.0_f32.into(), 0.0_f32.into(), 0.0_f32.into()],
                "BG" => vec![1.0_f32.into(), 1.0_f32.into(), 1.0_f32.into()],
            },
            "AP" => dictionary! {
                "N" => on_states,
            },
        };
        let widget_id = self.doc.add_object(widget);

        self.groups[group.0].kids.push(Object::Reference(widget_id));
        self.current_page()
            .annotations
            .push(Object::Reference(widget_id));
    }

    /// Add an empty fillable text field covering the given rectangle on the
    /// current page.
    pub fn add_text_field(&mut self, name: &str, x: f32, y: f32, width: f32, height: f32) {
        let field = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => "Tx",
            "T" => Object::string_literal(name),
            "V" => Object::string_literal(""),
            "DA" => Object::string_literal("/Helv 0 Tf 0 g"),
            "Rect" => vec![
                x.into(),
                y.into(),
                (x + width).into(),
                (y + height).into(),
            ],
            "F" => 4_i64,
            "MK" => dictionary! {
                "BC" => vec![0.75_f32.into(), 0.75_f32.into(), 0.75_f32.into()],
            },
        };
        let field_id = self.doc.add_object(field);

        self.fields.push(field_id);
        self.current_page()
            .annotations
            .push(Object::Reference(field_id));
    }

    /// Serialize the document to PDF bytes.
    pub fn finish(mut self, title: &str) -> Result<Vec<u8>> {
        // emit radio parent fields now that their kids are complete
        for group in self.groups {
            let field = dictionary! {
                "FT" => "Btn",
                // radio flag + no-toggle-to-off
                "Ff" => 49152_i64,
                "T" => Object::string_literal(group.name.as_str()),
                "V" => "Off",
                "Kids" => group.kids,
            };
            self.doc
                .objects
                .insert(group.field_id, Object::Dictionary(field));
        }

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        let page_count = self.pages.len();
        for page in self.pages {
            let content = Content {
                operations: page.operations,
            };
            let encoded = content
                .encode()
                .with_context(|| "Failed to encode page content stream")?;
            let content_id = self.doc.add_object(Stream::new(dictionary! {}, encoded));

            let mut page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(self.pages_id),
                "Contents" => Object::Reference(content_id),
                "MediaBox" => vec![
                    0.0_f32.into(),
                    0.0_f32.into(),
                    self.page_width_pt.into(),
                    self.page_height_pt.into(),
                ],
            };
            if !page.annotations.is_empty() {
                page_dict.set("Annots", page.annotations);
            }
            kids.push(Object::Reference(self.doc.add_object(page_dict)));
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    "Helv" => Object::Reference(self.font_id),
                },
            },
        };
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(self.pages_id),
        };
        if !self.fields.is_empty() {
            let field_refs: Vec<Object> =
                self.fields.iter().map(|id| Object::Reference(*id)).collect();
            catalog.set(
                "AcroForm",
                dictionary! {
                    "Fields" => field_refs,
                    "NeedAppearances" => true,
                    "DA" => Object::string_literal("/Helv 0 Tf 0 g"),
                    "DR" => dictionary! {
                        "Font" => dictionary! {
                            "Helv" => Object::Reference(self.font_id),
                        },
                    },
                },
            );
        }
        let catalog_id = self.doc.add_object(catalog);

        let info_id = self.doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
            "Creator" => Object::string_literal(concat!("quizpress v", env!("CARGO_PKG_VERSION"))),
            "CreationDate" => Object::string_literal(
                chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string()
            ),
        });

        self.doc.trailer.set("Root", Object::Reference(catalog_id));
        self.doc.trailer.set("Info", Object::Reference(info_id));

        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .with_context(|| "Failed to serialize PDF")?;
        Ok(bytes)
    }
}

/// Build a shared appearance stream for radio widgets: a stroked circle,
/// with a filled dot when `selected`.
fn add_radio_appearance(doc: &mut Document, selected: bool) -> Result<ObjectId> {
    let center = RADIO_SIZE_PT / 2.0;
    let mut operations = vec![
        Operation::new("w", vec![1.0_f32.into()]),
        Operation::new("RG", vec![0.0_f32.into(), 0.0_f32.into(), 0.0_f32.into()]),
    ];
    operations.extend(circle_path(center, center, center - 1.5));
    operations.push(Operation::new("S", vec![]));

    if selected {
        operations.push(Operation::new(
            "g",
            vec![0.0_f32.into()],
        ));
        operations.extend(circle_path(center, center, center - 4.0));
        operations.push(Operation::new("f", vec![]));
    }

    let encoded = Content { operations }
        .encode()
        .with_context(|| "Failed to encode appearance stream")?;
    let stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => vec![
                0.0_f32.into(),
                0.0_f32.into(),
                RADIO_SIZE_PT.into(),
                RADIO_SIZE_PT.into(),
            ],
        },
        encoded,
    );
    Ok(doc.add_object(stream))
}

/// Approximate a circle with four cubic Bezier arcs.
fn circle_path(cx: f32, cy: f32, r: f32) -> Vec<Operation> {
    // magic constant for a four-arc circle approximation
    let k = r * 0.552_285;
    vec![
        Operation::new("m", vec![(cx + r).into(), cy.into()]),
        Operation::new(
            "c",
            vec![
                (cx + r).into(),
                (cy + k).into(),
                (cx + k).into(),
                (cy + r).into(),
                cx.into(),
                (cy + r).into(),
            ],
        ),
        Operation::new(
            "c",
            vec![
                (cx - k).into(),
                (cy + r).into(),
                (cx - r).into(),
                (cy + k).into(),
                (cx - r).into(),
                cy.into(),
            ],
        ),
        Operation::new(
            "c",
            vec![
                (cx - r).into(),
                (cy - k).into(),
                (cx - k).into(),
                (cy - r).into(),
                cx.into(),
                (cy - r).into(),
            ],
        ),
        Operation::new(
            "c",
            vec![
                (cx + k).into(),
                (cy - r).into(),
                (cx + r).into(),
                (cy - k).into(),
                (cx + r).into(),
                cy.into(),
            ],
        ),
        Operation::new("h", vec![]),
    ]
}
