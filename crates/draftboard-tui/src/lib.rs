// Terminal view for the draft board: layout, input handling, widgets.

pub mod tui;
