//! Text rendering of a checked crossword for the content panel.

use cxw_engine::{ClueEntry, Crossword, Direction, Highlight, Joiner};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub fn highlight_style() -> Style {
    Style::default().bg(Color::Yellow).fg(Color::Black)
}

fn joiner_mark(joiner: Joiner) -> &'static str {
    match joiner {
        Joiner::None => " ",
        Joiner::Space => "/",
        Joiner::Hyphen => "-",
    }
}

/// One line per grid row. Across joiners sit between cells; down joiners
/// get their own line under the row, only when the row has any.
pub fn render_grid(crossword: &Crossword, highlight: &Highlight) -> Vec<Line<'static>> {
    let highlighted = highlight.cells(crossword);
    let mut lines = Vec::new();

    for (y, row) in crossword.cells().iter().enumerate() {
        let mut spans = Vec::new();
        let mut below = String::new();
        for (x, cell) in row.iter().enumerate() {
            let (text, across, down) = match cell.as_letter() {
                Some(letter) if letter.solution.is_empty() => {
                    (".".to_string(), letter.follows_across, letter.follows_down)
                }
                Some(letter) => (
                    letter.solution.clone(),
                    letter.follows_across,
                    letter.follows_down,
                ),
                None => ("#".to_string(), Joiner::None, Joiner::None),
            };
            let style = if highlighted.contains(&(x, y)) {
                highlight_style()
            } else {
                Style::default()
            };
            spans.push(Span::styled(text, style));
            if x + 1 < row.len() {
                spans.push(Span::raw(joiner_mark(across)));
            }
            below.push_str(joiner_mark(down));
            below.push(' ');
        }
        lines.push(Line::from(spans));
        if !below.trim().is_empty() {
            lines.push(Line::from(below.trim_end().to_string()));
        }
    }
    lines
}

fn entry_line(crossword: &Crossword, entry: &ClueEntry<'_>, direction: Direction) -> String {
    let id = crossword.friendly_clue_key(&entry.id(), direction);
    match entry {
        ClueEntry::Clue(clue) => format!("  {id}. {} ({})", clue.text, clue.format),
        ClueEntry::Placeholder { text, .. } => format!("  {id}. {text}"),
    }
}

/// `explanation 🡒 SOLUTION`, or whichever half the clue has.
fn citation(entry: &ClueEntry<'_>) -> Option<String> {
    let ClueEntry::Clue(clue) = entry else {
        return None;
    };
    let explanation = clue.explanation.as_deref().filter(|e| !e.is_empty());
    let solution = clue
        .solution
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase);
    match (explanation, solution) {
        (Some(explanation), Some(solution)) => Some(format!("{explanation} 🡒 {solution}")),
        (Some(explanation), None) => Some(explanation.to_string()),
        (None, solution) => solution,
    }
}

pub fn render_clues(crossword: &Crossword, highlight: &Highlight) -> Vec<Line<'static>> {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let cited = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);
    let mut lines = Vec::new();
    for direction in Direction::ALL {
        lines.push(Line::styled(direction.to_string(), heading));
        for entry in crossword.clues_in_direction(direction) {
            let text = entry_line(crossword, &entry, direction);
            if !entry.is_placeholder() && highlight.current() == Some(entry.id().as_ref()) {
                lines.push(Line::styled(text, highlight_style()));
            } else {
                lines.push(Line::from(text));
            }
            if let Some(citation) = citation(&entry) {
                lines.push(Line::styled(format!("     {citation}"), cited));
            }
        }
    }
    lines
}

pub fn render_warnings(crossword: &Crossword) -> Vec<Line<'static>> {
    if crossword.warnings().is_empty() {
        return vec![Line::from("No warnings")];
    }
    let mut lines = vec![Line::styled(
        "Warnings",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )];
    lines.extend(
        crossword
            .warnings()
            .iter()
            .map(|warning| Line::from(format!("  {warning}"))),
    );
    lines
}

/// Grid, clue lists and (optionally) warnings, separated by blank lines.
pub fn render_crossword(
    crossword: &Crossword,
    highlight: &Highlight,
    show_warnings: bool,
) -> Vec<Line<'static>> {
    let mut lines = render_grid(crossword, highlight);
    lines.push(Line::default());
    lines.extend(render_clues(crossword, highlight));
    if show_warnings {
        lines.push(Line::default());
        lines.extend(render_warnings(crossword));
    }
    lines
}
