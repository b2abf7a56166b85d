use uuid::Uuid;

use crate::sync::supabase_auth::User;

const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/identicon/svg";

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub email: String,
    pub user_id: Uuid,
    pub avatar_url: String,
}

impl ProfileView {
    pub fn from_user(user: &User) -> Self {
        let email = user.display_email().to_string();
        Self {
            avatar_url: avatar_url(&email),
            email,
            user_id: user.id,
        }
    }

    pub fn copy_user_id(&self) -> Result<(), String> {
        copy_to_clipboard(&self.user_id.to_string())
    }
}

/// Identicon seeded with the account's email address.
pub fn avatar_url(email: &str) -> String {
    format!("{}?seed={}", AVATAR_BASE_URL, urlencoding::encode(email))
}

pub fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| {
        let err = format!("Failed to access clipboard: {}", e);
        tracing::error!("{}", err);
        err
    })?;

    match clipboard.set_text(text) {
        Ok(()) => {
            tracing::info!("Copied {} characters to clipboard", text.len());
            Ok(())
        }
        Err(e) => {
            let err = format!("Failed to set clipboard text: {}", e);
            tracing::error!("{}", err);
            Err(err)
        }
    }
}
