//! Terminal rendering of passages and the table of contents.

use std::io::{self, Write};

use crossterm::style::Stylize;
use folio_config::DisplayConfig;
use folio_engine::{Attribution, ContentBlock, Dialogue, Line, SceneHeading, SceneMetadata};

const RULE_WIDTH: usize = 48;

pub fn passage<W: Write>(
    out: &mut W,
    blocks: &[ContentBlock],
    display: &DisplayConfig,
) -> io::Result<()> {
    for block in blocks {
        match block {
            ContentBlock::SceneHeading(heading) => scene_heading(out, heading)?,
            ContentBlock::Dialogue(dialogue) => self::dialogue(out, dialogue)?,
        }
    }
    if let Some(attribution) = Attribution::of(blocks) {
        writeln!(out, "{}", attribution_line(&attribution, display))?;
    }
    Ok(())
}

fn scene_heading<W: Write>(out: &mut W, heading: &SceneHeading) -> io::Result<()> {
    writeln!(out, "{}", heading.setting.as_str().bold())?;
    line(out, &heading.staging)?;
    writeln!(out)
}

fn dialogue<W: Write>(out: &mut W, dialogue: &Dialogue) -> io::Result<()> {
    writeln!(out, "{}", dialogue.character.as_str().bold())?;
    for l in &dialogue.lines {
        line(out, l)?;
    }
    writeln!(out)
}

fn line<W: Write>(out: &mut W, line: &Line) -> io::Result<()> {
    if line.is_spoken() {
        writeln!(out, "\t{}", line.text())
    } else {
        writeln!(out, "\t{}", line.text().italic())
    }
}

/// `(Lr. 1.1.1-5)`, right-aligned to the display width.
pub fn attribution_line(attribution: &Attribution, display: &DisplayConfig) -> String {
    let text = format!("({} {attribution})", display.abbreviation);
    format!("{text:>width$}", width = display.width)
}

pub fn contents<W: Write>(
    out: &mut W,
    listing: &[SceneMetadata],
    display: &DisplayConfig,
) -> io::Result<()> {
    if let Some(title) = &display.title {
        writeln!(out, "{}", title.as_str().bold())?;
        if let Some(author) = &display.author {
            writeln!(out, "{}", author.as_str().italic())?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{:>4} {:>6} {:>6}", "Act", "Scene", "Lines")?;
    let mut last_act = None;
    for meta in listing.iter().filter(|m| !m.is_empty()) {
        let (Some(act), Some(scene)) = (meta.act, meta.scene) else {
            continue;
        };
        if last_act != Some(act) {
            writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
            last_act = Some(act);
        }
        let setting = meta.setting.as_deref().unwrap_or_default();
        writeln!(out, "{act:>4} {scene:>6} {:>6}  {setting}", meta.lines)?;
    }
    Ok(())
}
