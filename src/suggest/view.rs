use unicode_width::UnicodeWidthChar;

use crate::suggest::dropdown::Dropdown;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

/// Presentation knobs for the dropdown rows. `max_visible` caps how
/// many rows are produced; the backend list itself stays uncapped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewOptions {
    pub max_visible: Option<usize>,
    pub width: Option<usize>,
}

/// Pure renderer: maps the dropdown state to span lines. Same state in,
/// same rows out; a cursor move only changes which row carries the
/// highlight background, never row order or content.
pub fn render_dropdown(dropdown: &Dropdown, options: ViewOptions) -> Vec<SpanLine> {
    let items = dropdown.items();
    let cursor = dropdown.cursor();
    let visible = options.max_visible.unwrap_or(items.len()).min(items.len());

    items[..visible]
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let highlighted = cursor == Some(index);
            let mut name_style = Style::new().bold();
            let mut desc_style = Style::new().dim();
            if highlighted {
                name_style = name_style.background(Color::Blue).color(Color::White);
                desc_style = desc_style.background(Color::Blue).color(Color::White);
            }

            let mut line: SpanLine = vec![Span::styled(sanitize_text(&item.name), name_style)];
            if let Some(desc) = &item.short_desc {
                line.push(Span::styled(
                    format!("  {}", sanitize_text(desc)),
                    desc_style,
                ));
            }
            if let Some(width) = options.width {
                truncate_line(&mut line, width);
            }
            line
        })
        .collect()
}

/// Strips control and escape characters from backend-supplied text so
/// it always lands on the display surface as literal visible text.
/// Markup like `<script>` needs no treatment here: spans carry plain
/// text, never interpreted markup.
pub fn sanitize_text(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_control()).collect()
}

fn truncate_line(line: &mut SpanLine, width: usize) {
    let mut remaining = width;
    line.retain_mut(|span| {
        if remaining == 0 {
            return false;
        }
        let mut kept = String::new();
        for c in span.text.chars() {
            let w = c.width().unwrap_or(0);
            if w > remaining {
                break;
            }
            remaining -= w;
            kept.push(c);
        }
        let keep = !kept.is_empty();
        span.text = kept;
        keep
    });
}
