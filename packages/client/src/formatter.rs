//! Message formatting utilities for client display.

use std::path::Path;

use sketchboard_shared::domain::ParticipantId;

use crate::{
    store::StrokeStore,
    tool::{Brush, Tool},
};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Banner shown once the relay has assigned a session id
    pub fn format_session_started(session_id: &ParticipantId) -> String {
        format!(
            "\n\n============================================================\n\
             Joined the canvas as {}\n\
             Type 'help' for commands. Press Ctrl+C to exit.\n\
             ============================================================\n",
            session_id
        )
    }

    pub fn format_online_count(count: usize) -> String {
        let noun = if count == 1 { "participant" } else { "participants" };
        format!("\n* {} {} online\n", count, noun)
    }

    /// Summary of the local canvas state for the `status` command
    pub fn format_status(
        store: &StrokeStore,
        brush: &Brush,
        online_count: Option<usize>,
    ) -> String {
        let tool = match brush.tool() {
            Tool::Brush => "brush",
            Tool::Eraser => "eraser",
        };
        let online = online_count.map_or_else(|| "?".to_string(), |c| c.to_string());
        let drawing = match store.in_progress() {
            Some(stroke) => format!("yes ({} points)", stroke.points.len()),
            None => "no".to_string(),
        };
        format!(
            "------------------------------------------------------------\n\
             session : {}\n\
             online  : {}\n\
             visible : {} strokes\n\
             undo    : {} / redo: {}\n\
             drawing : {}\n\
             tool    : {} {} width {}\n\
             ------------------------------------------------------------\n",
            store.local_id(),
            online,
            store.visible_strokes().len(),
            store.undo_stack().len(),
            store.redo_stack().len(),
            drawing,
            tool,
            brush.stroke_color(),
            brush.width().value()
        )
    }

    pub fn format_saved(path: &Path, bytes: usize) -> String {
        format!("saved {} ({} bytes)\n", path.display(), bytes)
    }

    pub fn format_error(message: &str) -> String {
        format!("! {}\n", message)
    }
}
