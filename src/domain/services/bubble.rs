#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use std::mem;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use syntect::easy::HighlightLines;

use super::Syntaxes;
use super::SYNTAX_SET;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

fn repeat_from_subtractions(text: &str, subtractions: Vec<usize>) -> String {
    let count = subtractions
        .into_iter()
        .map(|e| {
            return e as i64;
        })
        .reduce(|a, b| {
            return a - b;
        })
        .unwrap_or(0);

    if count <= 0 {
        return "".to_string();
    }

    return [text].repeat(count as usize).join("");
}

/// Word wraps prose. Words longer than a full row are split across rows.
fn wrap_words(line: &str, max_line_length: usize) -> Vec<String> {
    let mut rows = vec![];
    let mut word_set: Vec<String> = vec![];
    let mut line_char_count = 0;

    for word in line.split(' ') {
        let mut word = word.to_string();
        let mut word_len = word.chars().count();
        if !word_set.is_empty() && word_len + line_char_count > max_line_length {
            rows.push(word_set.join(" "));
            word_set = vec![];
            line_char_count = 0;
        }

        while word_len > max_line_length {
            rows.push(word.chars().take(max_line_length).collect());
            word = word.chars().skip(max_line_length).collect();
            word_len -= max_line_length;
        }

        word_set.push(word);
        line_char_count += word_len + 1;
    }

    rows.push(word_set.join(" "));
    return rows;
}

/// Hard wraps styled code segments at exactly `max_line_length` characters.
fn wrap_chars<'a>(segments: Vec<(Style, String)>, max_line_length: usize) -> Vec<Vec<Span<'a>>> {
    let mut rows = vec![];
    let mut row: Vec<Span<'a>> = vec![];
    let mut row_len = 0;

    for (style, text) in segments {
        let mut chunk = String::new();
        for char in text.chars() {
            if row_len == max_line_length {
                if !chunk.is_empty() {
                    row.push(Span::styled(mem::take(&mut chunk), style));
                }
                rows.push(mem::take(&mut row));
                row_len = 0;
            }

            chunk.push(char);
            row_len += 1;
        }

        if !chunk.is_empty() {
            row.push(Span::styled(chunk, style));
        }
    }

    rows.push(row);
    return rows;
}

impl<'a> Bubble<'_> {
    pub fn new(message: &'a Message, alignment: BubbleAlignment, window_max_width: usize) -> Bubble {
        return Bubble {
            alignment,
            message,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // Unicode character border + padding.
            bubble_padding: 8,
            // left border + left padding + (text, not counted) + right padding + right border +
            // scrollbar.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'a>> {
        let max_line_length = self.get_max_line_length().max(1);
        let mut highlight: Option<HighlightLines> = None;
        let mut rows: Vec<Vec<Span<'a>>> = vec![];

        for line in self.message.text.lines() {
            if line.trim().starts_with("```") {
                if highlight.is_none() {
                    let lang = line.trim().trim_start_matches('`');
                    highlight = Some(HighlightLines::new(
                        Syntaxes::get(lang),
                        Syntaxes::theme(),
                    ));
                } else {
                    highlight = None;
                }

                rows.extend(
                    wrap_words(line, max_line_length)
                        .into_iter()
                        .map(|row| return vec![Span::styled(row, Syntaxes::fence_style())]),
                );
                continue;
            }

            if let Some(highlighter) = highlight.as_mut() {
                // Highlighting is only accurate when each line ends in '\n'.
                match highlighter.highlight_line(&format!("{line}\n"), &SYNTAX_SET) {
                    Ok(segments) => {
                        let segments = segments
                            .into_iter()
                            .map(|(style, text)| {
                                let style = Style {
                                    fg: Syntaxes::translate_colour(style.foreground),
                                    ..Style::default()
                                };
                                return (style, text.trim_end_matches('\n').to_string());
                            })
                            .collect::<Vec<(Style, String)>>();

                        rows.extend(wrap_chars(segments, max_line_length));
                        continue;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Failed to highlight code line");
                    }
                }
            }

            rows.extend(
                wrap_words(line, max_line_length)
                    .into_iter()
                    .map(|row| return vec![Span::styled(row, self.text_style())]),
            );
        }

        let mut lines = rows
            .into_iter()
            .map(|spans| return self.spans_to_line(spans, max_line_length))
            .collect::<Vec<Line<'a>>>();

        if lines.is_empty() {
            lines.push(self.spans_to_line(vec![], max_line_length));
        }

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn spans_to_line(&self, mut spans: Vec<Span<'a>>, max_line_length: usize) -> Line<'a> {
        let line_str_len: usize = spans
            .iter()
            .map(|span| return span.content.chars().count())
            .sum();
        let fill = repeat_from_subtractions(" ", vec![max_line_length, line_str_len]);
        let formatted_line_length =
            line_str_len + fill.len() + Bubble::style_config().bubble_padding;

        let mut wrapped_spans = vec![self.highlight_span("│ ".to_string())];
        wrapped_spans.append(&mut spans);
        wrapped_spans.push(self.highlight_span(format!("{fill} │")));

        let outer_bubble_padding =
            repeat_from_subtractions(" ", vec![self.window_max_width, formatted_line_length]);

        if self.alignment == BubbleAlignment::Left {
            wrapped_spans.push(Span::from(outer_bubble_padding));
            return Line::from(wrapped_spans);
        }

        let mut line_spans = vec![Span::from(outer_bubble_padding)];
        line_spans.extend(wrapped_spans);

        return Line::from(line_spans);
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        // Border elements + minimum bubble padding.
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;
        let available = self.window_max_width.saturating_sub(line_border_width).max(1);

        let mut max_line_length = self
            .message
            .text
            .lines()
            .map(|line| {
                return line.chars().count();
            })
            .max()
            .unwrap_or(0)
            .min(available);

        let username_len = self.message.author.to_string().chars().count();
        if max_line_length < username_len {
            max_line_length = username_len;
        }

        return max_line_length;
    }

    fn wrap_lines_in_bubble(&self, lines: Vec<Line<'a>>, max_line_length: usize) -> Vec<Line<'a>> {
        let username = self.message.author.to_string();
        let username_len = username.chars().count();

        // Add 2 for the vertical bars.
        let inner_bar = ["─"]
            .repeat((max_line_length + 2).saturating_sub(username_len))
            .join("");
        let top_bar = format!("╭{username}{inner_bar}╮");
        let bottom_bar = format!("╰{}╯", ["─"].repeat(max_line_length + 2).join(""));
        let bar_bubble_padding = repeat_from_subtractions(
            " ",
            vec![
                self.window_max_width,
                max_line_length,
                Bubble::style_config().bubble_padding,
            ],
        );

        let mut res = vec![];
        if self.alignment == BubbleAlignment::Left {
            res.push(self.highlight_line(format!("{top_bar}{bar_bubble_padding}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bottom_bar}{bar_bubble_padding}")));
        } else {
            res.push(self.highlight_line(format!("{bar_bubble_padding}{top_bar}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bar_bubble_padding}{bottom_bar}")));
        }

        return res;
    }

    fn border_style(&self) -> Style {
        if self.message.message_type() == MessageType::Error {
            return Style {
                fg: Some(Color::Red),
                ..Style::default()
            };
        }

        match self.message.author {
            Author::User => return Style::default(),
            Author::Assistant => {
                return Style {
                    fg: Some(Color::Cyan),
                    ..Style::default()
                };
            }
            Author::Parley => {
                return Style {
                    fg: Some(Color::Rgb(138, 85, 63)), // Brown
                    ..Style::default()
                };
            }
        }
    }

    fn text_style(&self) -> Style {
        if self.message.message_type() == MessageType::Error {
            return self.border_style();
        }

        return Style::default();
    }

    fn highlight_span(&self, text: String) -> Span<'a> {
        return Span::styled(text, self.border_style());
    }

    fn highlight_line(&self, text: String) -> Line<'a> {
        return Line::from(self.highlight_span(text));
    }
}
