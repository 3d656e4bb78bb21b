//! In-memory data layer.
//!
//! `Store` bundles the ID generator and both keyed collections. Handlers get
//! it through an axum `Extension`, never through globals, so tests can build
//! a fresh instance per case.
//!
//! Lock discipline: each collection has its own reader/writer lock and no
//! operation holds one while acquiring the other. Submitting a complaint is
//! two critical sections (complaint insert, then owner append), both finished
//! before the response goes out.

pub mod complaints;
mod error;
pub mod ids;
pub mod model;
pub mod users;

pub use self::complaints::ComplaintStore;
pub use self::error::StoreError;
pub use self::ids::IdGenerator;
pub use self::model::{Complaint, ComplaintStatus, User};
pub use self::users::UserStore;

use rand::{RngCore, rngs::OsRng};
use tracing::{debug, warn};

/// Fresh secret codes tried before a registration gives up on collisions.
const SECRET_CODE_ATTEMPTS: usize = 5;

#[derive(Debug, Default)]
pub struct Store {
    ids: IdGenerator,
    users: UserStore,
    complaints: ComplaintStore,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.users
    }

    #[must_use]
    pub fn complaints(&self) -> &ComplaintStore {
        &self.complaints
    }

    /// Insert the administrator account configured at startup.
    ///
    /// # Errors
    /// Fails if the secret code or email is already taken.
    pub fn seed_admin(
        &self,
        name: &str,
        email: &str,
        secret_code: &str,
    ) -> Result<User, StoreError> {
        let admin = User::new(
            self.ids.next_id(),
            secret_code.to_string(),
            name.to_string(),
            email.to_string(),
        )
        .admin();
        self.users.insert(admin.clone())?;
        Ok(admin)
    }

    /// Create and store a regular user with a freshly generated secret code.
    ///
    /// A generated code that collides with an existing one is replaced with a
    /// new one instead of overwriting the existing user.
    ///
    /// # Errors
    /// Returns `DuplicateEmail` if the email is taken, or `DuplicateSecretCode`
    /// if every attempt collided.
    pub fn register_user(&self, name: &str, email: &str) -> Result<User, StoreError> {
        self.register_user_with(name, email, &mut OsRng)
    }

    /// `register_user` drawing secret codes from `rng`.
    pub(crate) fn register_user_with<R: RngCore>(
        &self,
        name: &str,
        email: &str,
        rng: &mut R,
    ) -> Result<User, StoreError> {
        let id = self.ids.next_id();

        for attempt in 1..=SECRET_CODE_ATTEMPTS {
            let user = User::new(
                id.clone(),
                ids::secret_code_from(rng),
                name.to_string(),
                email.to_string(),
            );
            match self.users.insert(user.clone()) {
                Ok(()) => return Ok(user),
                Err(StoreError::DuplicateSecretCode) => {
                    warn!(attempt, "generated secret code collided, retrying");
                }
                Err(err) => return Err(err),
            }
        }

        Err(StoreError::DuplicateSecretCode)
    }

    /// Store a new pending complaint for `owner` and append it to the owner's list.
    ///
    /// # Errors
    /// Returns `UserNotFound` if the owner vanished, or a lock error.
    pub fn submit_complaint(
        &self,
        owner: &User,
        title: &str,
        summary: &str,
        rating: i64,
    ) -> Result<Complaint, StoreError> {
        let complaint = Complaint::pending(
            self.ids.complaint_id(),
            owner,
            title.to_string(),
            summary.to_string(),
            rating,
        );

        self.complaints.insert(complaint.clone())?;
        self.users
            .append_complaint(&owner.secret_code, complaint.id.clone())?;

        debug!(complaint_id = %complaint.id, user_id = %owner.id, "complaint stored");
        Ok(complaint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        collections::HashSet,
        sync::{Arc, Barrier},
        thread,
    };

    /// Hands out the given byte patterns in order, repeating the last one.
    struct ScriptedRng {
        patterns: Vec<[u8; 8]>,
        next: usize,
    }

    impl ScriptedRng {
        fn new(patterns: Vec<[u8; 8]>) -> Self {
            Self { patterns, next: 0 }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let last = self.patterns.len().saturating_sub(1);
            if let Some(pattern) = self.patterns.get(self.next.min(last)) {
                for (byte, value) in dest.iter_mut().zip(pattern.iter().cycle()) {
                    *byte = *value;
                }
            }
            self.next += 1;
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn seed_admin_creates_admin_with_empty_list() -> anyhow::Result<()> {
        let store = Store::new();
        let admin = store.seed_admin("Admin User", "admin@example.com", "ADMIN123")?;

        assert!(admin.is_admin);
        assert_eq!(admin.id, "1");
        let found = store.users().find_by_code("ADMIN123")?;
        assert_eq!(found.as_ref().map(|u| u.is_admin), Some(true));
        assert_eq!(found.map(|u| u.complaints.len()), Some(0));
        Ok(())
    }

    #[test]
    fn registered_users_get_distinct_codes() -> anyhow::Result<()> {
        let store = Store::new();
        let mut codes = HashSet::new();
        for n in 0..50 {
            let user = store.register_user("Ann", &format!("ann{n}@b.com"))?;
            assert!(!user.is_admin);
            assert!(codes.insert(user.secret_code.clone()));
            let found = store.users().find_by_code(&user.secret_code)?;
            assert_eq!(found, Some(user));
        }
        Ok(())
    }

    #[test]
    fn register_user_rejects_taken_email() -> anyhow::Result<()> {
        let store = Store::new();
        store.register_user("Ann", "a@b.com")?;
        assert_eq!(
            store.register_user("Bob", "a@b.com"),
            Err(StoreError::DuplicateEmail)
        );
        Ok(())
    }

    #[test]
    fn submit_complaint_updates_both_stores() -> anyhow::Result<()> {
        let store = Store::new();
        let user = store.register_user("Ann", "a@b.com")?;
        let complaint = store.submit_complaint(&user, "Slow", "too slow", 5)?;

        assert!(complaint.id.starts_with('C'));
        assert_eq!(complaint.user_name, "Ann");
        assert_eq!(store.complaints().find_by_id(&complaint.id)?, Some(complaint.clone()));
        let owner = store.users().find_by_code(&user.secret_code)?;
        assert_eq!(owner.map(|u| u.complaints), Some(vec![complaint.id]));
        Ok(())
    }

    #[test]
    fn concurrent_submissions_are_all_recorded() -> anyhow::Result<()> {
        let store = Arc::new(Store::new());
        let user = store.register_user("Ann", "a@b.com")?;

        let handles: Vec<_> = (0..32)
            .map(|n| {
                let store = Arc::clone(&store);
                let user = user.clone();
                thread::spawn(move || store.submit_complaint(&user, &format!("t{n}"), "s", 3))
            })
            .collect();
        for handle in handles {
            handle
                .join()
                .map_err(|_| anyhow::anyhow!("submit worker panicked"))??;
        }

        assert_eq!(store.complaints().len()?, 32);
        let owned = store
            .users()
            .find_by_code(&user.secret_code)?
            .map(|u| u.complaints)
            .unwrap_or_default();
        let unique: HashSet<_> = owned.iter().collect();
        assert_eq!(owned.len(), 32);
        assert_eq!(unique.len(), 32);
        Ok(())
    }

    #[test]
    fn colliding_secret_code_is_regenerated() -> anyhow::Result<()> {
        let store = Store::new();
        store.seed_admin("Admin User", "admin@example.com", "0000000000000000")?;

        let mut rng = ScriptedRng::new(vec![[0; 8], [0; 8], [0xAB; 8]]);
        let user = store.register_user_with("Ann", "a@b.com", &mut rng)?;

        assert_eq!(user.id, "2");
        assert_eq!(user.secret_code, "ABABABABABABABAB");
        assert_eq!(rng.next, 3);

        let admin = store.users().find_by_code("0000000000000000")?;
        assert_eq!(admin.map(|u| u.email), Some("admin@example.com".to_string()));
        assert_eq!(store.users().len()?, 2);

        // retries draw new codes, not new ids
        let complaint = store.submit_complaint(&user, "Slow", "too slow", 5)?;
        assert_eq!(complaint.id, "C3");
        Ok(())
    }

    #[test]
    fn registration_gives_up_after_repeated_collisions() -> anyhow::Result<()> {
        let store = Store::new();
        store.seed_admin("Admin User", "admin@example.com", "0000000000000000")?;

        let mut rng = ScriptedRng::new(vec![[0; 8]]);
        let result = store.register_user_with("Ann", "a@b.com", &mut rng);

        assert_eq!(result, Err(StoreError::DuplicateSecretCode));
        assert_eq!(rng.next, SECRET_CODE_ATTEMPTS);
        assert_eq!(store.users().len()?, 1);
        assert!(!store.users().email_taken("a@b.com")?);
        Ok(())
    }

    #[test]
    fn concurrent_registrations_with_one_email_admit_one() -> anyhow::Result<()> {
        let store = Arc::new(Store::new());
        let barrier = Arc::new(Barrier::new(32));

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    store.register_user("Ann", "a@b.com")
                })
            })
            .collect();

        let mut registered = 0;
        for handle in handles {
            match handle
                .join()
                .map_err(|_| anyhow::anyhow!("register worker panicked"))?
            {
                Ok(_) => registered += 1,
                Err(StoreError::DuplicateEmail) => {}
                Err(err) => anyhow::bail!("unexpected error: {err}"),
            }
        }

        assert_eq!(registered, 1);
        assert_eq!(store.users().len()?, 1);
        Ok(())
    }

    #[test]
    fn register_on_poisoned_users_lock_fails_cleanly() {
        let store = Store::new();
        store.users().poison();

        assert_eq!(
            store.register_user("Ann", "a@b.com"),
            Err(StoreError::LockPoisoned("users"))
        );
    }
}
