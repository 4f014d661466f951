use actix_session::Session;

use crate::errors::AppError;

const ADMIN_KEY: &str = "admin";

pub fn is_admin(session: &Session) -> bool {
    session.get::<bool>(ADMIN_KEY).unwrap_or(None).unwrap_or(false)
}

/// Mark the session as the admin's, rotating the session id.
pub fn start_admin_session(session: &Session) -> Result<(), AppError> {
    session.renew();
    session.insert(ADMIN_KEY, true)?;
    Ok(())
}

pub fn end_admin_session(session: &Session) {
    session.purge();
}

/// Returns Err(AppError::Unauthorized) unless the admin is logged in.
pub fn require_admin(session: &Session) -> Result<(), AppError> {
    if is_admin(session) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}
