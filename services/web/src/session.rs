//! Typed access to the values Snippetbox keeps in a session
//!
//! A session holds at most three keys. `flash` and `targetURL` are one-shot:
//! reading them through [`Flash::pop`] and [`TargetUrl::pop`] removes them.
//! `authenticatedUserID` stays until [`AuthenticatedUserId::remove`].

use tower_sessions::{Session, session::Error};

pub const SESSION_FLASH_KEY: &str = "flash";
pub const SESSION_USER_ID_KEY: &str = "authenticatedUserID";
pub const SESSION_TARGET_URL_KEY: &str = "targetURL";

/// Message shown once on the next rendered page
pub struct Flash;

impl Flash {
    pub async fn insert(session: &Session, message: &str) -> Result<(), Error> {
        session.insert(SESSION_FLASH_KEY, message).await
    }

    /// Returns the pending message and deletes it
    pub async fn pop(session: &Session) -> Result<Option<String>, Error> {
        session.remove(SESSION_FLASH_KEY).await
    }
}

/// Id of the logged-in user
pub struct AuthenticatedUserId;

impl AuthenticatedUserId {
    pub async fn insert(session: &Session, user_id: i64) -> Result<(), Error> {
        session.insert(SESSION_USER_ID_KEY, user_id).await
    }

    pub async fn get(session: &Session) -> Result<Option<i64>, Error> {
        session.get(SESSION_USER_ID_KEY).await
    }

    pub async fn remove(session: &Session) -> Result<(), Error> {
        session.remove::<i64>(SESSION_USER_ID_KEY).await?;
        Ok(())
    }
}

/// Page an anonymous visitor asked for before being sent to log in
pub struct TargetUrl;

impl TargetUrl {
    pub async fn insert(session: &Session, path: &str) -> Result<(), Error> {
        session.insert(SESSION_TARGET_URL_KEY, path).await
    }

    /// Returns the stashed path and deletes it
    pub async fn pop(session: &Session) -> Result<Option<String>, Error> {
        session.remove(SESSION_TARGET_URL_KEY).await
    }
}

/// Rotate the session id, keeping the session data
///
/// Called whenever the authentication state changes.
pub async fn renew(session: &Session) -> Result<(), Error> {
    session.cycle_id().await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};

    use super::*;

    fn new_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_flash_is_read_once() -> Result<(), Error> {
        let session = new_session();
        Flash::insert(&session, "Snippet successfully created!").await?;

        assert_eq!(
            Flash::pop(&session).await?,
            Some("Snippet successfully created!".to_string())
        );
        assert_eq!(Flash::pop(&session).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_flash_overwrites_pending_message() -> Result<(), Error> {
        let session = new_session();
        Flash::insert(&session, "first").await?;
        Flash::insert(&session, "second").await?;

        assert_eq!(Flash::pop(&session).await?, Some("second".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_user_id_survives_reads_until_removed() -> Result<(), Error> {
        let session = new_session();
        assert_eq!(AuthenticatedUserId::get(&session).await?, None);

        AuthenticatedUserId::insert(&session, 42).await?;
        assert_eq!(AuthenticatedUserId::get(&session).await?, Some(42));
        assert_eq!(AuthenticatedUserId::get(&session).await?, Some(42));

        AuthenticatedUserId::remove(&session).await?;
        assert_eq!(AuthenticatedUserId::get(&session).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_missing_user_id_is_ok() -> Result<(), Error> {
        let session = new_session();
        AuthenticatedUserId::remove(&session).await
    }

    #[tokio::test]
    async fn test_target_url_is_read_once() -> Result<(), Error> {
        let session = new_session();
        TargetUrl::insert(&session, "/account/view").await?;

        assert_eq!(
            TargetUrl::pop(&session).await?,
            Some("/account/view".to_string())
        );
        assert_eq!(TargetUrl::pop(&session).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_renew_keeps_data() -> Result<(), Error> {
        let session = new_session();
        AuthenticatedUserId::insert(&session, 7).await?;
        session.save().await?;
        let before = session.id();

        renew(&session).await?;
        session.save().await?;

        assert_ne!(session.id(), before);
        assert_eq!(AuthenticatedUserId::get(&session).await?, Some(7));
        Ok(())
    }
}
