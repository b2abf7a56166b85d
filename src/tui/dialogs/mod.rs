pub mod delete_confirmation;
pub mod help;
pub mod notification;
pub mod task_form;
