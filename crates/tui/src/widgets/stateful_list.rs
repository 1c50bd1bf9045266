use ratatui::{prelude::*, widgets::*};

/// A list with a wrapping cursor that survives the list shrinking, for
/// example when a student is deleted or filtered out.
#[derive(Default)]
pub struct StatefulList {
    state: ListState,
    last_item_count: usize,
}

impl StatefulList {
    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn next(&mut self) {
        if self.last_item_count == 0 {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.last_item_count - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.last_item_count == 0 {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.last_item_count - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn render_to(&mut self, frame: &mut Frame, target: Rect, list: List) {
        self.last_item_count = list.len();

        // keep the cursor in bounds if items disappeared under it
        if let Some(i) = self.state.selected() {
            if self.last_item_count == 0 {
                self.state.select(None);
            } else if i >= self.last_item_count {
                self.state.select(Some(self.last_item_count - 1));
            }
        }

        frame.render_stateful_widget(list, target, &mut self.state);
    }
}
