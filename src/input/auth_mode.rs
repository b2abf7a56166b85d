use crossterm::event::KeyCode;

use crate::app::{Action, AppState, AuthField, AuthForm};
use crate::gate::Route;

/// Keys on the login and signup screens.
pub fn handle_key(key: KeyCode, state: &mut AppState) -> Option<Action> {
    if state.dismiss_notification() && key == KeyCode::Esc {
        return None;
    }

    if key == KeyCode::Esc {
        return Some(Action::Quit);
    }

    let signup = state.route() == Route::Signup;
    let form = if signup { &mut state.signup_form } else { &mut state.login_form };

    if form.submitting || form.redirect_at.is_some() {
        return None;
    }

    match key {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Enter => {
            if form.active_field == AuthField::Switch {
                switch_screen(state, signup);
                return None;
            }
            return Some(if signup { Action::SubmitSignup } else { Action::SubmitLogin });
        }
        KeyCode::Backspace => {
            form.error = None;
            match form.active_field {
                AuthField::Email => {
                    form.email.pop();
                }
                AuthField::Password => {
                    form.password.pop();
                }
                AuthField::Switch => {}
            }
        }
        KeyCode::Char(c) => {
            form.error = None;
            match form.active_field {
                AuthField::Email => form.email.push(c),
                AuthField::Password => form.password.push(c),
                AuthField::Switch => {}
            }
        }
        _ => {}
    }

    None
}

fn switch_screen(state: &mut AppState, from_signup: bool) {
    if from_signup {
        state.signup_form = AuthForm::default();
        state.gate.navigate(Route::Login);
    } else {
        state.login_form = AuthForm::default();
        state.gate.navigate(Route::Signup);
    }
}
