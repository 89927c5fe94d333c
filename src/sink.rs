use crate::types::{DateGroup, LineRecord, Result};
use crate::utils::strip_html;
use std::io::Write;
use tracing::debug;

/// Presentation boundary. A sink consumes finished date groups one line at
/// a time; how it animates, paginates, or styles them is its own business.
///
/// `emit_line` returns `Ok(false)` to cancel the remainder of the render.
pub trait ReportSink {
    fn begin_group(&mut self, group: &DateGroup) -> Result<()>;
    fn emit_line(&mut self, line: &LineRecord) -> Result<bool>;
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Drive a sink over the aggregated report: header first, then each line in
/// order, stopping the whole render if the sink cancels.
pub fn render_report<S: ReportSink>(groups: &[DateGroup], sink: &mut S) -> Result<()> {
    'render: for group in groups {
        sink.begin_group(group)?;
        for line in &group.lines {
            if !sink.emit_line(line)? {
                debug!("Sink cancelled render at {}", group.header);
                break 'render;
            }
        }
    }
    sink.finish()
}

/// Terminal renderer: strips markup from the fragments and flags A-tier
/// lines with a leading asterisk.
pub struct PlainTextSink<W: Write> {
    out: W,
}

impl<W: Write> PlainTextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ReportSink for PlainTextSink<W> {
    fn begin_group(&mut self, group: &DateGroup) -> Result<()> {
        writeln!(self.out, "\n== {} ==", group.header)?;
        Ok(())
    }

    fn emit_line(&mut self, line: &LineRecord) -> Result<bool> {
        let marker = if line.is_a_tier { "*" } else { " " };
        writeln!(self.out, "{} {}", marker, strip_html(&line.html_fragment))?;
        Ok(true)
    }
}

/// Collects the rendered groups and writes them as one JSON document on
/// `finish`, fragments intact for a downstream page to consume.
pub struct JsonSink<W: Write> {
    out: W,
    groups: Vec<DateGroup>,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            groups: Vec::new(),
        }
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn begin_group(&mut self, group: &DateGroup) -> Result<()> {
        self.groups.push(DateGroup {
            date: group.date,
            header: group.header.clone(),
            lines: Vec::new(),
        });
        Ok(())
    }

    fn emit_line(&mut self, line: &LineRecord) -> Result<bool> {
        if let Some(group) = self.groups.last_mut() {
            group.lines.push(line.clone());
        }
        Ok(true)
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &self.groups)?;
        writeln!(self.out)?;
        Ok(())
    }
}
