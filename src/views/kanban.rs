use crate::board::{StatusCounts, TaskList};
use crate::task::{Task, TaskStatus};

/// Where a move shortcut sends the selected task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    Back,
    Forward,
    Left,
    Right,
    Column(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEntry {
    pub status: TaskStatus,
    pub count: usize,
    pub percent: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KanbanView {
    focused_column: usize,
    selected_row: usize,
}

impl KanbanView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused_column(&self) -> usize {
        self.focused_column
    }

    pub fn focused_status(&self) -> TaskStatus {
        TaskStatus::from_index(self.focused_column).unwrap_or(TaskStatus::Todo)
    }

    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    pub fn focus_next_column(&mut self) {
        if self.focused_column + 1 < TaskStatus::ALL.len() {
            self.focused_column += 1;
            self.selected_row = 0;
        }
    }

    pub fn focus_previous_column(&mut self) {
        if self.focused_column > 0 {
            self.focused_column -= 1;
            self.selected_row = 0;
        }
    }

    pub fn focus_column(&mut self, column: usize) {
        if column < TaskStatus::ALL.len() && column != self.focused_column {
            self.focused_column = column;
            self.selected_row = 0;
        }
    }

    pub fn visible_tasks<'a>(&self, list: &'a TaskList) -> Vec<&'a Task> {
        list.with_status(self.focused_status())
    }

    pub fn select_next(&mut self, list: &TaskList) {
        if self.selected_row + 1 < self.visible_tasks(list).len() {
            self.selected_row += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn selected_task<'a>(&self, list: &'a TaskList) -> Option<&'a Task> {
        self.visible_tasks(list).get(self.selected_row).copied()
    }

    /// Keeps the selected row inside the focused column after the list shrank.
    pub fn clamp_selection(&mut self, list: &TaskList) {
        let len = self.visible_tasks(list).len();
        self.selected_row = self.selected_row.min(len.saturating_sub(1));
    }

    /// Status a move shortcut leads to from the focused column, `None` when the
    /// shortcut is unavailable there.
    pub fn target_status(&self, target: MoveTarget) -> Option<TaskStatus> {
        let current = self.focused_status();
        let status = match target {
            MoveTarget::Back => TaskStatus::Todo,
            MoveTarget::Forward => TaskStatus::Done,
            MoveTarget::Left => TaskStatus::from_index(self.focused_column.checked_sub(1)?)?,
            MoveTarget::Right => TaskStatus::from_index(self.focused_column + 1)?,
            MoveTarget::Column(index) => TaskStatus::from_index(index)?,
        };
        (status != current).then_some(status)
    }

    /// Task id and new status for moving the selected task.
    pub fn move_request(&self, list: &TaskList, target: MoveTarget) -> Option<(String, TaskStatus)> {
        let task = self.selected_task(list)?;
        let status = self.target_status(target)?;
        Some((task.id.clone(), status))
    }
}

pub fn progress(counts: &StatusCounts) -> Vec<ProgressEntry> {
    TaskStatus::ALL
        .iter()
        .map(|status| ProgressEntry {
            status: *status,
            count: counts.get(*status),
            percent: counts.percent(*status),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn create_task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            status,
            due_date: None,
            start_time: None,
            end_time: None,
            color: None,
            owner: Uuid::nil(),
        }
    }

    fn create_list() -> TaskList {
        TaskList::from_tasks(
            Uuid::nil(),
            vec![
                create_task("a", TaskStatus::Todo),
                create_task("b", TaskStatus::Doing),
                create_task("c", TaskStatus::Todo),
                create_task("d", TaskStatus::Done),
            ],
        )
    }

    #[test]
    fn focus_is_clamped_at_edges() {
        let mut view = KanbanView::new();

        view.focus_previous_column();
        assert_eq!(view.focused_column(), 0);

        view.focus_next_column();
        view.focus_next_column();
        view.focus_next_column();
        assert_eq!(view.focused_column(), 2);
        assert_eq!(view.focused_status(), TaskStatus::Done);
    }

    #[test]
    fn visible_tasks_follow_list_order() {
        let list = create_list();
        let view = KanbanView::new();

        let ids: Vec<_> = view.visible_tasks(&list).iter().map(|t| t.id.as_str()).collect();

        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn selection_stays_inside_column() {
        let list = create_list();
        let mut view = KanbanView::new();

        view.select_next(&list);
        view.select_next(&list);

        assert_eq!(view.selected_task(&list).map(|t| t.id.as_str()), Some("c"));
    }

    #[test]
    fn back_is_unavailable_in_todo_column() {
        let view = KanbanView::new();

        assert_eq!(view.target_status(MoveTarget::Back), None);
        assert_eq!(view.target_status(MoveTarget::Forward), Some(TaskStatus::Done));
    }

    #[test]
    fn forward_is_unavailable_in_done_column() {
        let mut view = KanbanView::new();
        view.focus_column(2);

        assert_eq!(view.target_status(MoveTarget::Forward), None);
        assert_eq!(view.target_status(MoveTarget::Back), Some(TaskStatus::Todo));
        assert_eq!(view.target_status(MoveTarget::Right), None);
    }

    #[test]
    fn neighbour_moves_from_middle_column() {
        let mut view = KanbanView::new();
        view.focus_next_column();

        assert_eq!(view.target_status(MoveTarget::Left), Some(TaskStatus::Todo));
        assert_eq!(view.target_status(MoveTarget::Right), Some(TaskStatus::Done));
        assert_eq!(view.target_status(MoveTarget::Column(1)), None);
        assert_eq!(view.target_status(MoveTarget::Column(7)), None);
    }

    #[test]
    fn move_request_names_selected_task() {
        let list = create_list();
        let mut view = KanbanView::new();
        view.select_next(&list);

        let request = view.move_request(&list, MoveTarget::Column(1));

        assert_eq!(request, Some(("c".to_string(), TaskStatus::Doing)));
    }

    #[test]
    fn move_request_on_empty_column_is_none() {
        let list = TaskList::from_tasks(Uuid::nil(), vec![create_task("a", TaskStatus::Done)]);
        let view = KanbanView::new();

        assert_eq!(view.move_request(&list, MoveTarget::Forward), None);
    }

    #[test]
    fn clamp_selection_after_removal() {
        let list = create_list();
        let mut view = KanbanView::new();
        view.select_next(&list);
        let shrunk = TaskList::from_tasks(Uuid::nil(), vec![create_task("a", TaskStatus::Todo)]);

        view.clamp_selection(&shrunk);

        assert_eq!(view.selected_row(), 0);
    }

    #[test]
    fn progress_reports_every_column() {
        let list = create_list();

        let entries = progress(&list.counts());

        assert_eq!(
            entries,
            vec![
                ProgressEntry { status: TaskStatus::Todo, count: 2, percent: 50 },
                ProgressEntry { status: TaskStatus::Doing, count: 1, percent: 25 },
                ProgressEntry { status: TaskStatus::Done, count: 1, percent: 25 },
            ]
        );
    }
}
