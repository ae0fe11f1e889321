//! Renders [`sgrep_core::Match`] results as terminal text.
//!
//! This is the only crate in the workspace that performs I/O on behalf of a
//! match; the matcher contract itself never touches a writer. Highlighting
//! is optional (bold the whole match, underline each captured
//! metavariable span) and built on `crossterm::style`, the same dependency
//! this codebase otherwise reaches for terminal interaction.

use std::io::{self, Write};

use crossterm::style::Stylize;
use sgrep_core::Match;

#[derive(Debug, Clone)]
pub struct Source {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub color: bool,
    /// Print a `label:line` heading before every match, not just when more
    /// than one source is being rendered.
    pub force_heading: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            force_heading: false,
        }
    }
}

/// Render every match across every source, separated by a blank line.
pub fn render<W: Write>(
    out: &mut W,
    files: &[(Source, Vec<Match>)],
    opts: &RenderOptions,
) -> io::Result<()> {
    let multi = files.len() > 1;
    let mut first = true;
    for (source, matches) in files {
        for m in matches {
            if !first {
                writeln!(out)?;
            }
            first = false;
            if multi || opts.force_heading {
                writeln!(out, "{}:{}", source.label, m.region.0.start.line + 1)?;
            }
            render_match(out, source, m, opts.color)?;
        }
    }
    Ok(())
}

fn render_match<W: Write>(out: &mut W, source: &Source, m: &Match, color: bool) -> io::Result<()> {
    let start = m.region.0.start.byte_offset;
    let end = m.region.1.end.byte_offset;
    let text = &source.text[start..end];

    if !color {
        return writeln!(out, "{}", text);
    }

    let mut captures: Vec<_> = m.captures.iter().collect();
    captures.sort_by_key(|c| c.loc.start.byte_offset);

    let mut cursor = start;
    for cap in captures {
        let cs = cap.loc.start.byte_offset.clamp(start, end);
        let ce = cap.loc.end.byte_offset.clamp(start, end);
        if cs <= cursor {
            // overlapping/zero-width capture relative to cursor; skip ahead
            cursor = cursor.max(ce);
            continue;
        }
        write!(out, "{}", source.text[cursor..cs].bold())?;
        write!(out, "{}", source.text[cs..ce].bold().underlined())?;
        cursor = ce;
    }
    if cursor < end {
        write!(out, "{}", source.text[cursor..end].bold())?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgrep_core::loc::{Loc, Position};
    use sgrep_core::result::CaptureValue;

    fn pos(col: usize) -> Position {
        Position::new(0, col, col)
    }

    #[test]
    fn plain_render_prints_exact_slice() {
        let source = Source {
            label: "f.txt".into(),
            text: "f(x);".into(),
        };
        let m = Match {
            region: (Loc::at(pos(0)), Loc::new(pos(4), pos(5))),
            captures: vec![],
        };
        let mut buf = Vec::new();
        render(&mut buf, &[(source, vec![m])], &RenderOptions { color: false, force_heading: false }).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "f(x);\n");
    }

    #[test]
    fn multi_file_adds_headings() {
        let a = Source { label: "a.txt".into(), text: "x".into() };
        let b = Source { label: "b.txt".into(), text: "y".into() };
        let ma = Match { region: (Loc::at(pos(0)), Loc::new(pos(0), pos(1))), captures: vec![] };
        let mb = Match { region: (Loc::at(pos(0)), Loc::new(pos(0), pos(1))), captures: vec![] };
        let mut buf = Vec::new();
        render(
            &mut buf,
            &[(a, vec![ma]), (b, vec![mb])],
            &RenderOptions { color: false, force_heading: false },
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("a.txt:1"));
        assert!(text.contains("b.txt:1"));
    }

    #[test]
    fn captures_present_does_not_panic_colorized() {
        let source = Source { label: "f.txt".into(), text: "f(x);".into() };
        let m = Match {
            region: (Loc::at(pos(0)), Loc::new(pos(4), pos(5))),
            captures: vec![CaptureValue {
                name: "X".into(),
                value: "x".into(),
                loc: Loc::new(pos(2), pos(3)),
            }],
        };
        let mut buf = Vec::new();
        render(&mut buf, &[(source, vec![m])], &RenderOptions::default()).unwrap();
        assert!(!buf.is_empty());
    }
}
