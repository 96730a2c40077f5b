//! Result sinks: where projected results end up.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::models::DisplayResult;

/// A renderer for one query's worth of display results.
///
/// Every call to [`render`](ResultSink::render) emits the complete list for
/// one query. A sink painting a screen ([`ListSink::clear_screen`]) wipes the
/// previous list first; stream sinks append one self-contained block per
/// query instead, so a reader of the stream can tell the queries apart.
pub trait ResultSink {
    fn render(&mut self, query: &str, results: &[DisplayResult]) -> io::Result<()>;
}

impl<S: ResultSink + ?Sized> ResultSink for Box<S> {
    fn render(&mut self, query: &str, results: &[DisplayResult]) -> io::Result<()> {
        (**self).render(query, results)
    }
}

/// ANSI sequence that erases the screen and homes the cursor
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Numbered plain-text list, optionally coloured.
#[derive(Debug)]
pub struct ListSink<W> {
    out: W,
    color: bool,
    clear: bool,
}

impl<W: Write> ListSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: false,
            clear: false,
        }
    }

    /// Enable ANSI colour output
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Erase the terminal before each list so only the latest query's
    /// results stay on screen. Only meaningful when writing to a TTY.
    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for ListSink<W> {
    fn render(&mut self, _query: &str, results: &[DisplayResult]) -> io::Result<()> {
        if self.clear {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        for (i, result) in results.iter().enumerate() {
            let n = format!("{:>3}.", i + 1);
            if self.color {
                writeln!(
                    self.out,
                    "{} {}",
                    n.dimmed(),
                    result.title_line().blue().bold()
                )?;
            } else {
                writeln!(self.out, "{} {}", n, result.title_line())?;
            }

            if let Some(authors) = result.author_line() {
                if self.color {
                    writeln!(self.out, "     {}", authors.green())?;
                } else {
                    writeln!(self.out, "     {}", authors)?;
                }
            }
            if let Some(snippet) = result.snippet_line() {
                writeln!(self.out, "     {}", snippet)?;
            }
        }
        self.out.flush()
    }
}

/// Table layout using comfy-table.
#[derive(Debug)]
pub struct TableSink<W> {
    out: W,
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for TableSink<W> {
    fn render(&mut self, _query: &str, results: &[DisplayResult]) -> io::Result<()> {
        use comfy_table::{Attribute, Cell, Table};

        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);

        let full = results.iter().any(DisplayResult::is_full);
        if full {
            table.set_header(vec!["Title", "Authors", "Snippet"]);
        } else {
            table.set_header(vec!["Title"]);
        }

        for result in results {
            let mut row = vec![Cell::new(result.title_line()).add_attribute(Attribute::Bold)];
            if full {
                row.push(Cell::new(result.author_line().unwrap_or_default()));
                row.push(Cell::new(result.snippet_line().unwrap_or_default()));
            }
            table.add_row(row);
        }

        writeln!(self.out, "{table}")?;
        self.out.flush()
    }
}

/// One JSON array per query.
///
/// By default each array sits on a single line (JSON Lines), so a stream of
/// queries can be split on newlines. [`pretty`](JsonSink::pretty) spreads a
/// document over several lines and suits one-shot output.
#[derive(Debug)]
pub struct JsonSink<W> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, pretty: false }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for JsonSink<W> {
    fn render(&mut self, _query: &str, results: &[DisplayResult]) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, results)?;
        } else {
            serde_json::to_writer(&mut self.out, results)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}
