// TUI widget modules for each dashboard panel.

pub mod candidates;
pub mod next_up;
pub mod notice_bar;
pub mod pick_log;
pub mod quit_confirm;
pub mod status_bar;
