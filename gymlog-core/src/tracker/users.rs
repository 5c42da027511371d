use log::info;

use super::requests::{LoginRequest, RegisterRequest, UpdateProfileRequest, trimmed};
use super::views::{WorkoutView, load_workouts};
use super::{AuthSession, Tracker, require_user};
use crate::auth::{AuthError, hash_password_with_cost, verify_password};
use crate::db::models::{NewUser, UpdateUser, User};
use crate::db::operations;
use crate::error::{Result, TrackerError};

const MIN_PASSWORD_LEN: usize = 4;

impl Tracker {
    pub fn register(&self, req: RegisterRequest) -> Result<AuthSession> {
        let (Some(username), Some(password)) =
            (trimmed(req.username.as_deref()), trimmed(req.password.as_deref()))
        else {
            return Err(TrackerError::validation("Username and password required"));
        };
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(TrackerError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        let email = trimmed(req.email.as_deref());
        let password_hash = hash_password_with_cost(&password, self.password_cost)?;

        let user = self.write(|conn| {
            if operations::find_user_by_username(conn, &username)?.is_some() {
                return Err(TrackerError::conflict("Username already exists"));
            }
            if let Some(email) = &email {
                if operations::email_taken(conn, email, None)? {
                    return Err(TrackerError::conflict("Email already in use"));
                }
            }
            Ok(operations::insert_user(
                conn,
                &NewUser {
                    username: username.clone(),
                    email: email.clone(),
                    password_hash,
                    profile_picture: None,
                    created_at: operations::now(),
                },
            )?)
        })?;

        info!("Registered user {} ({})", user.username, user.id);
        Ok(AuthSession {
            access_token: self.tokens.issue(user.id),
            user,
        })
    }

    pub fn login(&self, req: LoginRequest) -> Result<AuthSession> {
        let (Some(username), Some(password)) =
            (trimmed(req.username.as_deref()), trimmed(req.password.as_deref()))
        else {
            return Err(TrackerError::validation("Username and password required"));
        };

        let user = self
            .read(|conn| Ok(operations::find_user_by_username(conn, &username)?))?
            .filter(|user| verify_password(&password, &user.password_hash))
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(AuthSession {
            access_token: self.tokens.issue(user.id),
            user,
        })
    }

    pub fn current_user(&self, caller: i32) -> Result<User> {
        self.read(|conn| require_user(conn, caller))
    }

    /// Only `email` and `profile_picture` can change. A blank email clears it.
    pub fn update_current_user(&self, caller: i32, req: UpdateProfileRequest) -> Result<User> {
        self.write(|conn| {
            let user = require_user(conn, caller)?;
            let mut changes = UpdateUser {
                profile_picture: req.profile_picture,
                ..Default::default()
            };
            if let Some(raw) = req.email {
                let email = trimmed(raw.as_deref());
                if email != user.email {
                    if let Some(email) = &email {
                        if operations::email_taken(conn, email, Some(caller))? {
                            return Err(TrackerError::conflict("Email already in use"));
                        }
                    }
                    changes.email = Some(email);
                }
            }
            Ok(operations::update_user(conn, caller, &changes)?)
        })
    }

    /// Operator view of someone's history, bypassing ownership. Used by the CLI.
    pub fn workouts_for_username(&self, username: &str) -> Result<(User, Vec<WorkoutView>)> {
        self.read(|conn| {
            let user = operations::find_user_by_username(conn, username)?
                .ok_or_else(|| TrackerError::not_found("User"))?;
            let sessions = operations::list_user_sessions(conn, user.id)?;
            let workouts = load_workouts(conn, sessions)?;
            Ok((user, workouts))
        })
    }
}
