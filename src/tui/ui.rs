use crate::core::nav::Route;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    ChatScreen, MealScreen, SettingsScreen, Sidebar, TrendsScreen, sidebar_width,
};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Layout shell: one-line header, sidebar + content, one-line footer.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [header_area, body_area, footer_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    draw_header(frame, header_area, app);

    let [sidebar_area, content_area] =
        Layout::horizontal([Length(sidebar_width(tui.sidebar_collapsed)), Min(0)])
            .areas(body_area);

    Sidebar::new(app.route, tui.sidebar_collapsed).render(frame, sidebar_area);
    draw_screen(frame, content_area, app, tui, spinner_frame);
    draw_footer(frame, footer_area, app.route);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = if app.status_message.is_empty() {
        format!("glucodash · {}", app.route.title())
    } else {
        format!("glucodash · {} | {}", app.route.title(), app.status_message)
    };
    frame.render_widget(
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        area,
    );
}

fn draw_screen(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    match app.route {
        Route::Chat => {
            let next_quick_action = tui.next_quick_action();
            ChatScreen {
                chat: &app.chat,
                state: &mut tui.chat,
                spinner_frame,
                next_quick_action,
            }
            .render(frame, area)
        }
        Route::Trends => TrendsScreen { trends: &app.trends }.render(frame, area),
        Route::MealSim => MealScreen {
            meal: &app.meal,
            state: &tui.meal,
            spinner_frame,
        }
        .render(frame, area),
        Route::Settings => SettingsScreen {
            state: &app.settings,
            focus: tui.settings_focus,
        }
        .render(frame, area),
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, route: Route) {
    let screen_keys = match route {
        Route::Chat => "Enter send · Ctrl+T quick prompt · PgUp/PgDn scroll",
        Route::Trends => "←/→ shift week · f meal filter",
        Route::MealSim => "↑/↓ field · Space GI · Ctrl+P preset · Enter simulate",
        Route::Settings => "↑/↓ field · Space toggle · Enter save",
    };
    let line = Line::from(vec![
        Span::styled(
            "Tab screens · Ctrl+B sidebar · Esc quit",
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)),
        Span::styled(screen_keys, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(line, area);
}
