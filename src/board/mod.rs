pub mod task_list;

pub use task_list::{Mutation, StatusCounts, TaskList};
