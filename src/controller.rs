use std::time::Instant;

use crate::app::{Action, AppState, AuthForm, Mode, SIGNUP_CONFIRMATION, SIGNUP_REDIRECT_DELAY, SyncStatus, Tab};
use crate::board::Mutation;
use crate::gate::Route;
use crate::sync::auth_session::AuthSession;
use crate::sync::supabase_auth::SignUpOutcome;
use crate::sync::task_api::{ApiError, TaskApi};
use crate::views::ProfileView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Initial session check followed by the first fetch when a session exists.
pub async fn mount(app: &mut AppState, api: &dyn TaskApi, auth: &AuthSession) {
    let route = app.gate.on_mount(auth).await;
    if route == Route::Dashboard {
        refresh_tab(app, api, auth).await;
    }
}

pub async fn apply(app: &mut AppState, action: Action, api: &dyn TaskApi, auth: &AuthSession) -> Flow {
    tracing::debug!("Applying {:?}", action);

    match action {
        Action::Quit => return Flow::Quit,
        Action::SubmitLogin => submit_login(app, api, auth).await,
        Action::SubmitSignup => submit_signup(app, api, auth).await,
        Action::Reload => refresh_tab(app, api, auth).await,
        Action::SwitchTab(tab) => switch_tab(app, tab, api, auth).await,
        Action::SubmitTaskForm => submit_task_form(app, api, auth).await,
        Action::MoveTask { task_id, status } => {
            app.sync_status = SyncStatus::Syncing;
            match app.tasks.update_status(api, &task_id, status).await {
                Ok(_) => {
                    app.kanban.clamp_selection(&app.tasks);
                    app.sync_status = SyncStatus::Synced;
                }
                Err(e) => report_api_error(app, auth, "Failed to move task", e),
            }
        }
        Action::DeleteTask(task_id) => {
            app.delete_confirmation_task_id = None;
            app.mode = Mode::Normal;
            app.sync_status = SyncStatus::Syncing;
            match app.tasks.remove(api, &task_id).await {
                Ok(_) => {
                    tracing::info!("Task {} deleted", task_id);
                    app.kanban.clamp_selection(&app.tasks);
                    app.calendar.select_previous_event();
                    app.sync_status = SyncStatus::Synced;
                }
                Err(e) => report_api_error(app, auth, "Failed to delete task", e),
            }
        }
        Action::Logout => logout(app, auth).await,
        Action::CopyUserId => {
            let copied = app.profile.as_ref().map(ProfileView::copy_user_id);
            match copied {
                Some(Ok(())) => app.notify("User id copied to clipboard"),
                Some(Err(e)) => app.notify_error(e),
                None => {}
            }
        }
    }

    Flow::Continue
}

async fn submit_login(app: &mut AppState, api: &dyn TaskApi, auth: &AuthSession) {
    app.login_form.error = None;
    app.login_form.submitting = true;
    let result = auth.sign_in(&app.login_form.email, &app.login_form.password).await;
    app.login_form.submitting = false;

    match result {
        Ok(session) => {
            app.login_form = AuthForm::default();
            app.on_session_change(Some(&session));
            refresh_tab(app, api, auth).await;
        }
        Err(e) => {
            tracing::warn!("Sign-in failed: {}", e);
            app.login_form.error = Some(e.to_string());
        }
    }
}

async fn submit_signup(app: &mut AppState, api: &dyn TaskApi, auth: &AuthSession) {
    app.signup_form.error = None;
    app.signup_form.message = None;
    app.signup_form.submitting = true;
    let result = auth.sign_up(&app.signup_form.email, &app.signup_form.password).await;
    app.signup_form.submitting = false;

    match result {
        Ok(SignUpOutcome::SignedIn(session)) => {
            app.signup_form = AuthForm::default();
            app.on_session_change(Some(&session));
            app.gate.navigate(Route::Dashboard);
            refresh_tab(app, api, auth).await;
        }
        Ok(SignUpOutcome::ConfirmationRequired { email }) => {
            tracing::info!("Account created for {}, confirmation pending", email);
            app.signup_form.password.clear();
            app.signup_form.message = Some(SIGNUP_CONFIRMATION.to_string());
            app.signup_form.redirect_at = Some(Instant::now() + SIGNUP_REDIRECT_DELAY);
        }
        Err(e) => {
            tracing::warn!("Sign-up failed: {}", e);
            app.signup_form.error = Some(e.to_string());
        }
    }
}

async fn switch_tab(app: &mut AppState, tab: Tab, api: &dyn TaskApi, auth: &AuthSession) {
    app.tab = tab;
    app.tasks.reset();
    app.kanban.clamp_selection(&app.tasks);
    refresh_tab(app, api, auth).await;
}

/// Fresh fetch for the active tab: the task list for the board and the
/// calendar, a user lookup for the profile.
pub async fn refresh_tab(app: &mut AppState, api: &dyn TaskApi, auth: &AuthSession) {
    if app.route() != Route::Dashboard {
        return;
    }

    match app.tab {
        Tab::Profile => match auth.current_user().await {
            Ok(Some(user)) => app.profile = Some(ProfileView::from_user(&user)),
            Ok(None) => app.on_session_change(None),
            Err(e) => {
                tracing::error!("User lookup failed: {}", e);
                app.notify_error(format!("Failed to load profile: {}", e));
            }
        },
        Tab::Kanban | Tab::Calendar => {
            let Some(owner) = app.gate.user().map(|user| user.id) else {
                return;
            };
            app.sync_status = SyncStatus::Syncing;
            match app.tasks.load(api, owner).await {
                Ok(count) => {
                    tracing::info!("Loaded {} tasks", count);
                    app.kanban.clamp_selection(&app.tasks);
                    app.sync_status = SyncStatus::Synced;
                }
                Err(e) => report_api_error(app, auth, "Failed to load tasks", e),
            }
        }
    }
}

async fn submit_task_form(app: &mut AppState, api: &dyn TaskApi, auth: &AuthSession) {
    let Some(form) = app.task_form.clone() else {
        return;
    };
    let Some(owner) = app.gate.user().map(|user| user.id) else {
        app.close_task_form();
        return;
    };

    let outcome = match &form.task_id {
        Some(task_id) => {
            let Some(original) = app.tasks.get(task_id).cloned() else {
                app.close_task_form();
                app.notify_error("Task no longer exists");
                return;
            };
            let patch = match form.to_patch(&original) {
                Ok(patch) => patch,
                Err(e) => return set_form_error(app, e.to_string()),
            };
            if patch.is_empty() {
                app.close_task_form();
                return;
            }
            app.tasks.update_fields(api, task_id, patch).await
        }
        None => {
            let draft = match form.to_draft() {
                Ok(draft) => draft,
                Err(e) => return set_form_error(app, e.to_string()),
            };
            app.tasks.add(api, owner, &draft).await
        }
    };

    match outcome {
        Ok(Mutation::Applied) => {
            app.close_task_form();
            app.kanban.clamp_selection(&app.tasks);
            app.sync_status = SyncStatus::Synced;
            app.notify(if form.is_editing() { "Task updated" } else { "Task added" });
        }
        Ok(Mutation::Declined) => {}
        Err(e) => {
            let context = if form.is_editing() { "Failed to update task" } else { "Failed to add task" };
            report_api_error(app, auth, context, e);
        }
    }
}

fn set_form_error(app: &mut AppState, message: String) {
    if let Some(form) = app.task_form.as_mut() {
        form.error = Some(message);
    }
}

async fn logout(app: &mut AppState, auth: &AuthSession) {
    if let Err(e) = auth.sign_out().await {
        tracing::warn!("Remote sign-out failed: {}", e);
    }
    app.on_session_change(None);
    app.login_form = AuthForm::default();
}

fn report_api_error(app: &mut AppState, auth: &AuthSession, context: &str, error: ApiError) {
    tracing::error!("{}: {}", context, error);

    if error.is_auth_failure() {
        auth.invalidate();
        app.on_session_change(None);
        app.notify_error("Session expired. Please sign in again.");
    } else {
        app.notify_error(format!("{}: {}", context, error));
    }
}
