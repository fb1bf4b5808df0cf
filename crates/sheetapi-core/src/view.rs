//! Dense text view of a spreadsheet
//!
//! The view is a header line followed by one line per row, fields separated
//! by a delimiter:
//!
//! ```text
//! *	A	B
//! 1	a1
//! 2		b2
//! ```
//!
//! The grid always spans the full bounding box `[1..=max_row] x [1..=max_col]`
//! of populated cells, so every line has exactly `max_col + 1` fields. An
//! empty spreadsheet renders as the empty string.

use std::borrow::Cow;
use std::io::{self, Write};

use crate::cell::{column_to_label, Bounds, CellStorage};

/// Options for rendering a view
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Field delimiter (default: tab)
    pub delimiter: char,
    /// Text in the top-left header field (default: `*`)
    pub corner: String,
    /// Line separator placed between lines, never after the last (default: LF)
    pub line_separator: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            delimiter: '\t',
            corner: "*".to_string(),
            line_separator: "\n".to_string(),
        }
    }
}

/// Renders sparse cell storage into a dense grid
#[derive(Debug, Clone, Default)]
pub struct ViewRenderer {
    options: ViewOptions,
}

impl ViewRenderer {
    /// Create a renderer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with custom options
    pub fn with_options(options: ViewOptions) -> Self {
        Self { options }
    }

    /// Get the renderer's options
    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Render cells to a string
    pub fn render(&self, cells: &CellStorage) -> String {
        let mut out = String::new();
        let Some(bounds) = cells.bounds() else {
            return out;
        };

        self.push_header(&mut out, bounds);
        for row in 1..=bounds.max_row {
            out.push_str(&self.options.line_separator);
            self.push_row(&mut out, cells, row, bounds);
        }

        out
    }

    /// Render cells to a writer, one line at a time
    pub fn write<W: Write>(&self, cells: &CellStorage, mut writer: W) -> io::Result<()> {
        let Some(bounds) = cells.bounds() else {
            return writer.flush();
        };

        let mut line = String::new();
        self.push_header(&mut line, bounds);
        writer.write_all(line.as_bytes())?;

        for row in 1..=bounds.max_row {
            line.clear();
            line.push_str(&self.options.line_separator);
            self.push_row(&mut line, cells, row, bounds);
            writer.write_all(line.as_bytes())?;
        }

        writer.flush()
    }

    /// Turn owned cells into an iterator of output chunks
    ///
    /// The first chunk is the header; each following chunk is a line
    /// separator plus one row. Concatenated, the chunks equal [`render`].
    ///
    /// [`render`]: ViewRenderer::render
    pub fn into_lines(self, cells: CellStorage) -> ViewLines {
        ViewLines {
            bounds: cells.bounds(),
            renderer: self,
            cells,
            next_row: 0,
        }
    }

    fn push_header(&self, out: &mut String, bounds: Bounds) {
        out.push_str(&self.escape(&self.options.corner));
        for col in 1..=bounds.max_col {
            out.push(self.options.delimiter);
            out.push_str(&column_to_label(col));
        }
    }

    fn push_row(&self, out: &mut String, cells: &CellStorage, row: u32, bounds: Bounds) {
        out.push_str(&row.to_string());

        // Walk the populated cells of this row alongside the column range
        let mut populated = cells.iter_row(row).peekable();
        for col in 1..=bounds.max_col {
            out.push(self.options.delimiter);
            if let Some((_, data)) = populated.next_if(|(c, _)| *c == col) {
                out.push_str(&self.escape(data.display_value()));
            }
        }
    }

    fn needs_escape(&self, c: char) -> bool {
        c == '\\'
            || c == '\n'
            || c == '\r'
            || c == self.options.delimiter
            || self.options.line_separator.contains(c)
    }

    /// Escape characters that would break the grid shape
    ///
    /// Backslash is escaped too, so distinct values stay distinct.
    fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.contains(|c: char| self.needs_escape(c)) {
            return Cow::Borrowed(text);
        }

        let mut escaped = String::with_capacity(text.len() + 4);
        for c in text.chars() {
            if !self.needs_escape(c) {
                escaped.push(c);
                continue;
            }
            match c {
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                c => {
                    escaped.push('\\');
                    escaped.push(c);
                }
            }
        }
        Cow::Owned(escaped)
    }
}

/// Owned, row-at-a-time view output
///
/// Produced by [`ViewRenderer::into_lines`]. Lets a caller stream a large
/// grid without holding all of it in memory.
#[derive(Debug)]
pub struct ViewLines {
    renderer: ViewRenderer,
    cells: CellStorage,
    bounds: Option<Bounds>,
    /// 0 is the header line
    next_row: u32,
}

impl Iterator for ViewLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let bounds = self.bounds?;
        if self.next_row > bounds.max_row {
            return None;
        }

        let mut line = String::new();
        if self.next_row == 0 {
            self.renderer.push_header(&mut line, bounds);
        } else {
            line.push_str(&self.renderer.options.line_separator);
            self.renderer
                .push_row(&mut line, &self.cells, self.next_row, bounds);
        }
        self.next_row += 1;
        Some(line)
    }
}
