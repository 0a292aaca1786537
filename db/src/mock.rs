//! In-memory repositories used by service and route tests.

use std::sync::{
    Mutex, MutexGuard,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use common::{
    error::{AppError, Res},
    validation::is_property_of,
};

use crate::{
    dtos::{reimb::ReimbPayload, user::UserPayload},
    models::{reimb::Reimbursement, user::User},
    reimb::ReimbRepository,
    user::UserRepository,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Shared bookkeeping: the list of calls made and a switch that turns every
/// call into a storage fault.
#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl Recorder {
    fn record(&self, call: String) -> Res<()> {
        lock(&self.calls).push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
    recorder: Recorder,
}

impl MemoryUserRepository {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            recorder: Recorder::default(),
        }
    }

    /// Calls received so far, e.g. `get_by_id(1)`.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.recorder.calls).clone()
    }

    pub fn fail_queries(&self) {
        self.recorder.failing.store(true, Ordering::SeqCst);
    }

    pub fn users(&self) -> Vec<User> {
        lock(&self.users).clone()
    }

    fn find(&self, predicate: impl Fn(&User) -> bool) -> Option<User> {
        lock(&self.users).iter().find(|u| predicate(u)).cloned()
    }
}

fn user_from_payload(user_id: i32, payload: &UserPayload) -> User {
    User {
        user_id,
        username: payload.username.clone().unwrap_or_default(),
        password: payload.password.clone().unwrap_or_default(),
        first_name: payload.first_name.clone().unwrap_or_default(),
        last_name: payload.last_name.clone().unwrap_or_default(),
        email: payload.email.clone().unwrap_or_default(),
        role_id: payload.role_id.unwrap_or_default(),
    }
}

fn user_column(user: &User, key: &str) -> String {
    match key {
        "user_id" => user.user_id.to_string(),
        "username" => user.username.clone(),
        "password" => user.password.clone(),
        "first_name" => user.first_name.clone(),
        "last_name" => user.last_name.clone(),
        "email" => user.email.clone(),
        _ => user.role_id.to_string(),
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn get_all(&self) -> Res<Vec<User>> {
        self.recorder.record("get_all()".to_string())?;
        let mut users = self.users();
        users.sort_by_key(|u| u.user_id);
        Ok(users)
    }

    async fn get_by_id(&self, user_id: i32) -> Res<Option<User>> {
        self.recorder.record(format!("get_by_id({user_id})"))?;
        Ok(self.find(|u| u.user_id == user_id))
    }

    async fn save(&self, new_user: &UserPayload) -> Res<User> {
        self.recorder.record(format!("save({:?})", new_user.username))?;
        let mut users = lock(&self.users);
        let next_id = users.iter().map(|u| u.user_id).max().unwrap_or(0) + 1;
        let user = user_from_payload(next_id, new_user);
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, updated_user: &UserPayload) -> Res<bool> {
        self.recorder.record(format!("update({:?})", updated_user.user_id))?;
        let mut users = lock(&self.users);
        match users.iter_mut().find(|u| Some(u.user_id) == updated_user.user_id) {
            Some(existing) => {
                *existing = user_from_payload(existing.user_id, updated_user);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, user_id: i32) -> Res<bool> {
        self.recorder.record(format!("delete_by_id({user_id})"))?;
        let mut users = lock(&self.users);
        let before = users.len();
        users.retain(|u| u.user_id != user_id);
        Ok(users.len() != before)
    }

    async fn get_by_username(&self, username: &str) -> Res<Option<User>> {
        self.recorder.record(format!("get_by_username({username})"))?;
        Ok(self.find(|u| u.username == username))
    }

    async fn get_by_email(&self, email: &str) -> Res<Option<User>> {
        self.recorder.record(format!("get_by_email({email})"))?;
        Ok(self.find(|u| u.email == email))
    }

    async fn get_by_unique_key(&self, key: &str, val: &str) -> Res<Option<User>> {
        self.recorder.record(format!("get_by_unique_key({key}, {val})"))?;
        if !is_property_of::<User>(key) {
            return Err(AppError::InvalidRequest(format!("Unknown user field: {}", key)));
        }
        Ok(self.find(|u| user_column(u, key) == val))
    }
}

#[derive(Default)]
pub struct MemoryReimbRepository {
    reimbs: Mutex<Vec<Reimbursement>>,
    recorder: Recorder,
}

impl MemoryReimbRepository {
    pub fn new(reimbs: Vec<Reimbursement>) -> Self {
        Self {
            reimbs: Mutex::new(reimbs),
            recorder: Recorder::default(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        lock(&self.recorder.calls).clone()
    }

    pub fn fail_queries(&self) {
        self.recorder.failing.store(true, Ordering::SeqCst);
    }

    pub fn reimbs(&self) -> Vec<Reimbursement> {
        lock(&self.reimbs).clone()
    }
}

#[async_trait]
impl ReimbRepository for MemoryReimbRepository {
    async fn get_all(&self) -> Res<Vec<Reimbursement>> {
        self.recorder.record("get_all()".to_string())?;
        let mut reimbs = self.reimbs();
        reimbs.sort_by_key(|r| r.id);
        Ok(reimbs)
    }

    async fn get_by_id(&self, id: i32) -> Res<Option<Reimbursement>> {
        self.recorder.record(format!("get_by_id({id})"))?;
        Ok(lock(&self.reimbs).iter().find(|r| r.id == id).cloned())
    }

    async fn save(&self, new_reimb: &ReimbPayload) -> Res<Reimbursement> {
        self.recorder.record(format!("save({:?})", new_reimb.description))?;
        let mut reimbs = lock(&self.reimbs);
        let next_id = reimbs.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let reimb = Reimbursement {
            id: next_id,
            amount: new_reimb.amount.clone().unwrap_or_default(),
            submitted: Utc::now(),
            resolved: None,
            description: new_reimb.description.clone().unwrap_or_default(),
            author_id: new_reimb.author_id.unwrap_or_default(),
            resolver_id: None,
            status_id: new_reimb.status_id.unwrap_or_default(),
            type_id: new_reimb.type_id.unwrap_or_default(),
        };
        reimbs.push(reimb.clone());
        Ok(reimb)
    }

    async fn update(&self, updated_reimb: &ReimbPayload) -> Res<bool> {
        self.recorder.record(format!("update({:?})", updated_reimb.id))?;
        let mut reimbs = lock(&self.reimbs);
        let Some(existing) = reimbs.iter_mut().find(|r| Some(r.id) == updated_reimb.id) else {
            return Ok(false);
        };
        // full-row overwrite, as the UPDATE statement does
        existing.amount = updated_reimb.amount.clone().unwrap_or_default();
        existing.description = updated_reimb.description.clone().unwrap_or_default();
        existing.resolved = match updated_reimb.resolver_id {
            Some(_) => existing.resolved.or_else(|| Some(Utc::now())),
            None => None,
        };
        existing.resolver_id = updated_reimb.resolver_id;
        existing.status_id = updated_reimb.status_id.unwrap_or_default();
        existing.type_id = updated_reimb.type_id.unwrap_or_default();
        Ok(true)
    }

    async fn delete_by_id(&self, id: i32) -> Res<bool> {
        self.recorder.record(format!("delete_by_id({id})"))?;
        let mut reimbs = lock(&self.reimbs);
        let before = reimbs.len();
        reimbs.retain(|r| r.id != id);
        Ok(reimbs.len() != before)
    }
}
