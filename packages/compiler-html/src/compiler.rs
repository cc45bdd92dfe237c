use quizsheet_editor::{option_label, QuizCollection, QuizRecord};
use thiserror::Error;

/// Id of the element holding the read-only listing
pub const PREVIEW_ELEMENT_ID: &str = "quiz-print";

/// Errors that can occur during HTML compilation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Question {0} is incomplete")]
    Incomplete(usize),
}

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Document title
    pub title: String,
    /// Refuse to render when any record is incomplete
    pub require_complete: bool,
    /// Width of the listing in CSS pixels
    pub content_width: u32,
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            title: "English Quiz".to_string(),
            require_complete: false,
            content_width: 800,
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile every record of the collection into a standalone preview document
pub fn compile_to_html(collection: &QuizCollection, options: CompileOptions) -> Result<String, CompileError> {
    if options.require_complete {
        if let Some(position) = collection.records().iter().position(|r| !r.is_complete()) {
            return Err(CompileError::Incomplete(position + 1));
        }
    }

    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    compile_head(&mut ctx);

    ctx.add_line("<body>");
    ctx.indent();

    ctx.add_line(&format!("<div id=\"{}\" class=\"quiz-preview\">", PREVIEW_ELEMENT_ID));
    ctx.indent();

    let records = collection.records();
    for (index, record) in records.iter().enumerate() {
        compile_record(index, record, index + 1 < records.len(), &mut ctx);
    }

    ctx.dedent();
    ctx.add_line("</div>");

    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    Ok(ctx.get_output())
}

fn compile_head(ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    let title = format!("<title>{}</title>", escape_html(&ctx.options.title));
    ctx.add_line(&title);

    ctx.add_line("<style>");
    ctx.indent();
    let width = ctx.options.content_width;
    for rule in stylesheet(width) {
        ctx.add_line(&rule);
    }
    ctx.dedent();
    ctx.add_line("</style>");

    ctx.dedent();
    ctx.add_line("</head>");
}

fn stylesheet(content_width: u32) -> Vec<String> {
    vec![
        "* { margin: 0; padding: 0; box-sizing: border-box; }".to_string(),
        "body { background: #ffffff; color: #333333; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; }".to_string(),
        format!(".quiz-preview {{ width: {}px; padding: 40px; background: #ffffff; }}", content_width),
        ".quiz-item h3 { margin-bottom: 15px; font-size: 20px; }".to_string(),
        ".quiz-question { margin-bottom: 15px; line-height: 1.6; white-space: pre-wrap; }".to_string(),
        ".quiz-options { display: grid; gap: 10px; }".to_string(),
        ".quiz-option { padding: 10px 15px; border: 1px solid #e1e5e9; border-radius: 8px; }".to_string(),
        ".quiz-explanation { margin-top: 20px; padding: 15px; background-color: #f8f9fa; border-radius: 8px; white-space: pre-wrap; }".to_string(),
        ".quiz-separator { margin: 30px 0; border: 1px solid #e1e5e9; }".to_string(),
        "@media print { .quiz-preview { width: auto; padding: 0; } .quiz-item { break-inside: avoid; } }".to_string(),
    ]
}

fn compile_record(index: usize, record: &QuizRecord, separator: bool, ctx: &mut Context) {
    ctx.add_line(&format!("<div class=\"quiz-item\" data-record-id=\"{}\">", record.id));
    ctx.indent();

    ctx.add_line(&format!("<h3>Question {}</h3>", index + 1));
    ctx.add_line(&format!(
        "<div class=\"quiz-question\"><strong>Question:</strong> {}</div>",
        escape_html(&record.question)
    ));

    ctx.add_line("<div class=\"quiz-options\">");
    ctx.indent();
    for (option_index, option) in record.options.iter().enumerate() {
        ctx.add_line(&format!(
            "<div class=\"quiz-option\"><strong>{}.</strong> {}</div>",
            option_label(option_index),
            escape_html(option)
        ));
    }
    ctx.dedent();
    ctx.add_line("</div>");

    if record.has_explanation() {
        ctx.add_line(&format!(
            "<div class=\"quiz-explanation\"><strong>Explanation:</strong> {}</div>",
            escape_html(&record.explanation)
        ));
    }

    if separator {
        ctx.add_line("<hr class=\"quiz-separator\" />");
    }

    ctx.dedent();
    ctx.add_line("</div>");
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Rendered preview, present only while the preview is visible
///
/// This is the handle export and print consume. Its absence means the
/// preview region does not exist and those operations do nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewDocument {
    pub html: String,
    pub record_count: usize,
}

impl PreviewDocument {
    /// Render the preview, or `None` while the preview is hidden
    pub fn from_collection(
        collection: &QuizCollection,
        options: CompileOptions,
    ) -> Result<Option<Self>, CompileError> {
        if !collection.preview_visible() {
            return Ok(None);
        }

        let html = compile_to_html(collection, options)?;
        Ok(Some(Self {
            html,
            record_count: collection.len(),
        }))
    }

    pub fn element_selector(&self) -> String {
        format!("#{}", PREVIEW_ELEMENT_ID)
    }
}
