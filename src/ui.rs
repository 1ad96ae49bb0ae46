use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Paragraph, Widget, Wrap},
};

use crate::{
    app::{App, AppState},
    countdown::Scheduler,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Timer turns red for the last few seconds.
const LOW_TIME_SECS: u64 = 10;

impl<S: Scheduler + Clone> Widget for &App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session();
        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);

        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1), // timer / heading
                Constraint::Length(1), // padding
                Constraint::Length(1), // word / final score
                Constraint::Length(1), // padding
                Constraint::Length(1), // score
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        match self.state() {
            AppState::Playing => {
                let timer_style = if session.remaining_secs() <= LOW_TIME_SECS {
                    Style::default().patch(bold_style).fg(Color::Red)
                } else {
                    dim_bold_style
                };
                Paragraph::new(Span::styled(session.remaining_formatted(), timer_style))
                    .alignment(Alignment::Center)
                    .render(chunks[1], buf);

                Paragraph::new(Span::styled(
                    session.current_word().to_uppercase(),
                    Style::default().patch(bold_style).fg(Color::Cyan),
                ))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunks[3], buf);

                Paragraph::new(Span::styled(
                    format!("score {}", session.score()),
                    bold_style,
                ))
                .alignment(Alignment::Center)
                .render(chunks[5], buf);

                Paragraph::new(Span::styled(
                    "(enter) got it / (space) skip / (esc)ape",
                    italic_style,
                ))
                .alignment(Alignment::Center)
                .render(chunks[7], buf);
            }
            AppState::Results => {
                Paragraph::new(Span::styled(
                    "time's up",
                    Style::default().patch(bold_style).fg(Color::Magenta),
                ))
                .alignment(Alignment::Center)
                .render(chunks[1], buf);

                let score = self.final_score().unwrap_or_else(|| session.score());
                let score_color = if score < 0 { Color::Red } else { Color::Green };
                Paragraph::new(Span::styled(
                    format!("final score {}", score),
                    Style::default().patch(bold_style).fg(score_color),
                ))
                .alignment(Alignment::Center)
                .render(chunks[3], buf);

                Paragraph::new(Span::styled("(r)estart / (esc)ape", italic_style))
                    .alignment(Alignment::Center)
                    .render(chunks[7], buf);
            }
        }
    }
}
