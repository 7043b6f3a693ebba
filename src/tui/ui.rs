use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::state::{App, ToastKind};
use crate::core::stats::last_set_for;
use crate::core::workout::SessionState;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    AiPanel, ExerciseCard, HistoryList, LogPanel, MenuPicker, RestTimerView, SessionSummary,
    StatsPanel, TitleBar,
};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, now: DateTime<Utc>) {
    use Constraint::{Length, Min, Percentage};
    let [title_area, main_area, footer_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());
    let [left, right] = Layout::horizontal([Percentage(60), Percentage(40)]).areas(main_area);

    TitleBar::new(
        app.user_id.clone(),
        app.status_message.clone(),
        app.session.as_ref().map(|s| s.total_volume),
        app.submitting || app.editing,
    )
    .render(frame, title_area);

    match &app.session {
        Some(session) if !session.complete => draw_workout(frame, left, app, session, tui, now),
        finished => {
            let picker_area = match finished {
                Some(session) => {
                    let [summary_area, rest] = Layout::vertical([Length(4), Min(0)]).areas(left);
                    SessionSummary::from_session(session).render(frame, summary_area);
                    rest
                }
                None => left,
            };
            MenuPicker::new(&mut tui.menu_picker, tui.menu_loading).render(frame, picker_area);
        }
    }

    StatsPanel::from_history(&app.history).render(frame, right);
    draw_footer(frame, footer_area, app);

    if let Some(history) = tui.history.as_mut() {
        history.sync(&app.history);
        HistoryList::new(history, app.editing).render(frame, main_area);
    } else if tui.ai_open {
        AiPanel {
            loading: app.ai_loading,
            output: app.ai_output.as_ref(),
            scroll: tui.ai_scroll,
        }
        .render(frame, main_area);
    }
}

fn draw_workout(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    session: &SessionState,
    tui: &mut TuiState,
    now: DateTime<Utc>,
) {
    use Constraint::{Length, Min};
    let rest = if session.resting { session.rest } else { None };
    let [card_area, timer_area, log_area] = Layout::vertical([
        Min(6),
        Length(if rest.is_some() { 3 } else { 0 }),
        Length(5),
    ])
    .areas(area);

    let last_set = session
        .current_exercise()
        .and_then(|e| last_set_for(&app.history, &e.exercise_name));
    if let Some(mut card) = ExerciseCard::from_session(session, last_set) {
        card.render(frame, card_area);
    }
    if let Some(timer) = rest {
        RestTimerView::new(&timer, now).render(frame, timer_area);
    }
    LogPanel::new(&tui.log_panel, app.submitting).render(frame, log_area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.toast {
        Some(toast) => {
            let color = match toast.kind {
                ToastKind::Success => Color::Green,
                ToastKind::Error => Color::Red,
            };
            Line::from(Span::styled(toast.message.clone(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(
            "h History  a AI  q Quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(line, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Toast;
    use crate::core::workout::start_menu;
    use crate::test_support::{menu_with_sets, t0, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, t0())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_idle_shows_picker() {
        let app = test_app();
        let text = render(&app, &mut TuiState::new());
        assert!(text.contains("Pick a workout"));
        assert!(text.contains("15 min"));
    }

    #[test]
    fn test_workout_shows_card_and_toast() {
        let mut app = test_app();
        app.session = start_menu(menu_with_sets(&[3]));
        app.toast = Some(Toast::error("Sync failed - saved locally"));
        let text = render(&app, &mut TuiState::new());
        assert!(text.contains("Exercise 1"));
        assert!(text.contains("Sync failed - saved locally"));
    }

    #[test]
    fn test_complete_shows_summary_over_picker() {
        let mut app = test_app();
        let mut session = start_menu(menu_with_sets(&[1])).unwrap();
        session.complete = true;
        app.session = Some(session);
        let text = render(&app, &mut TuiState::new());
        assert!(text.contains("Workout complete!"));
        assert!(text.contains("Pick a workout"));
    }
}
