//! Credential checks and password changes for every role.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{AccountRepository, HostelRepository, LoginService, PasswordHasher};
use crate::domain::validation::{FieldError, email};
use crate::domain::{
    Account, AccountId, Error, Hostel, LoginCredentials, NewPassword, PasswordChange, Principal,
    Role,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Authentication use-cases backed by the account and hostel repositories.
#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    hostels: Arc<dyn HostelRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    /// Create the service.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hostels: Arc<dyn HostelRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            hostels,
            hasher,
            clock,
        }
    }

    /// Make sure a super-admin account exists for `email`.
    ///
    /// Returns `true` when a new account was created. An existing account
    /// with the same email and another role is a conflict.
    pub async fn ensure_super_admin(&self, raw_email: &str, password: &str) -> Result<bool, Error> {
        let email = email("email", raw_email)?;
        let password = NewPassword::new("password", password)?;

        if let Some(existing) = self.accounts.find_by_email(&email).await? {
            return if existing.role == Role::SuperAdmin {
                Ok(false)
            } else {
                Err(Error::conflict(format!(
                    "{email} is already registered with role {}",
                    existing.role
                )))
            };
        }

        let account = Account {
            id: AccountId::random(),
            email,
            password_hash: self.hasher.hash(password.expose()).await?,
            role: Role::SuperAdmin,
            hostel_id: None,
            profile_id: None,
        };
        self.accounts.insert(&account).await?;
        info!(account_id = %account.id, "bootstrapped super-admin account");
        Ok(true)
    }

    async fn check_hostel(
        &self,
        account: &Account,
        credentials: &LoginCredentials,
    ) -> Result<Option<Hostel>, Error> {
        if !account.role.is_hostel_scoped() {
            return Ok(None);
        }
        let hostel_id = account
            .hostel_id
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;
        let hostel = self
            .hostels
            .find_by_id(hostel_id)
            .await?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;
        if credentials.hostel_number() != Some(hostel.details.hostel_number.as_str()) {
            debug!(role = %account.role, "login rejected: hostel number mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(Some(hostel))
    }
}

#[async_trait]
impl LoginService for AuthService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        let Some(account) = self.accounts.find_by_email(credentials.email()).await? else {
            debug!("login rejected: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        if account.role != credentials.role() {
            debug!(claimed = %credentials.role(), "login rejected: role mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        let hostel = self.check_hostel(&account, credentials).await?;
        if !self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .await?
        {
            debug!(role = %account.role, "login rejected: wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let today = self.clock.utc().date_naive();
        if hostel.is_some_and(|hostel| hostel.is_expired(today)) {
            return Err(Error::forbidden("hostel subscription has expired"));
        }

        Ok(account.principal())
    }

    async fn change_password(
        &self,
        principal: &Principal,
        change: &PasswordChange,
    ) -> Result<(), Error> {
        let account = self
            .accounts
            .find_by_id(principal.account_id)
            .await?
            .ok_or_else(|| Error::unauthorized("account no longer exists"))?;
        if !self
            .hasher
            .verify(change.current(), &account.password_hash)
            .await?
        {
            return Err(FieldError::new(
                "currentPassword",
                "mismatch",
                "current password is incorrect",
            )
            .into());
        }

        let hash = self.hasher.hash(change.new_password().expose()).await?;
        if !self.accounts.update_password_hash(account.id, &hash).await? {
            return Err(Error::unauthorized("account no longer exists"));
        }
        info!(account_id = %account.id, "password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockAccountRepository, MockHostelRepository, RepositoryError};
    use crate::domain::test_support::{MutableClock, PlainHasher, date};
    use crate::domain::{ErrorCode, HostelDetails, HostelId};
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    struct Fixture {
        hostel: Hostel,
        admin: Account,
        root: Account,
    }

    #[fixture]
    fn fixture() -> Fixture {
        let hostel = Hostel {
            id: HostelId::random(),
            details: HostelDetails {
                name: "Harbour House".into(),
                hostel_number: "HH-1".into(),
                address: "1 Quay Road".into(),
                contact_email: "desk@harbour.example".into(),
                contact_phone: "+44 1632 960000".into(),
                room_limit: 10,
                student_limit: 20,
            },
            expires_on: date("2026-06-30"),
            created_at: date("2026-01-01")
                .and_hms_opt(0, 0, 0)
                .expect("midnight")
                .and_utc(),
        };
        let admin = Account {
            id: AccountId::random(),
            email: "warden@harbour.example".into(),
            password_hash: "plain:correct horse".into(),
            role: Role::Admin,
            hostel_id: Some(hostel.id),
            profile_id: Some(Uuid::new_v4()),
        };
        let root = Account {
            id: AccountId::random(),
            email: "root@platform.example".into(),
            password_hash: "plain:root password".into(),
            role: Role::SuperAdmin,
            hostel_id: None,
            profile_id: None,
        };
        Fixture { hostel, admin, root }
    }

    fn service(fixture: &Fixture, today: &str) -> AuthService {
        let mut accounts = MockAccountRepository::new();
        let known = vec![fixture.admin.clone(), fixture.root.clone()];
        accounts.expect_find_by_email().returning(move |email| {
            Ok(known.iter().find(|account| account.email == email).cloned())
        });
        let mut hostels = MockHostelRepository::new();
        let hostel = fixture.hostel.clone();
        hostels
            .expect_find_by_id()
            .returning(move |id| Ok((id == hostel.id).then(|| hostel.clone())));
        AuthService::new(
            Arc::new(accounts),
            Arc::new(hostels),
            Arc::new(PlainHasher),
            Arc::new(MutableClock::on(date(today))),
        )
    }

    fn creds(email: &str, password: &str, role: Role, hostel: Option<&str>) -> LoginCredentials {
        LoginCredentials::try_from_parts(email, password, role, hostel).expect("credential shape")
    }

    #[rstest]
    #[tokio::test]
    async fn admin_logs_in_with_matching_hostel(fixture: Fixture) {
        let service = service(&fixture, "2026-06-30");
        let principal = service
            .authenticate(&creds(
                "Warden@Harbour.example",
                "correct horse",
                Role::Admin,
                Some("hh-1"),
            ))
            .await
            .expect("login succeeds on the expiry day");
        assert_eq!(principal.account_id, fixture.admin.id);
        assert_eq!(principal.hostel_id, Some(fixture.hostel.id));
    }

    #[rstest]
    #[case("warden@harbour.example", "wrong", Role::Admin, Some("HH-1"))]
    #[case("warden@harbour.example", "correct horse", Role::Student, Some("HH-1"))]
    #[case("warden@harbour.example", "correct horse", Role::Admin, Some("HH-2"))]
    #[case("nobody@harbour.example", "correct horse", Role::Admin, Some("HH-1"))]
    #[case("root@platform.example", "root password", Role::Admin, Some("HH-1"))]
    #[tokio::test]
    async fn every_mismatch_is_invalid_credentials(
        fixture: Fixture,
        #[case] email: &str,
        #[case] password: &str,
        #[case] role: Role,
        #[case] hostel: Option<&str>,
    ) {
        let service = service(&fixture, "2026-03-01");
        let err = service
            .authenticate(&creds(email, password, role, hostel))
            .await
            .expect_err("mismatch must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[rstest]
    #[tokio::test]
    async fn expired_hostel_is_forbidden(fixture: Fixture) {
        let service = service(&fixture, "2026-07-01");
        let err = service
            .authenticate(&creds(
                "warden@harbour.example",
                "correct horse",
                Role::Admin,
                Some("HH-1"),
            ))
            .await
            .expect_err("expired hostel");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(err.message(), "hostel subscription has expired");
    }

    #[rstest]
    #[tokio::test]
    async fn super_admin_needs_no_hostel(fixture: Fixture) {
        let service = service(&fixture, "2030-01-01");
        let principal = service
            .authenticate(&creds("root@platform.example", "root password", Role::SuperAdmin, None))
            .await
            .expect("super-admin login");
        assert_eq!(principal.role, Role::SuperAdmin);
        assert_eq!(principal.hostel_id, None);
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_surface_as_service_unavailable(fixture: Fixture) {
        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_find_by_email()
            .returning(|_| Err(RepositoryError::connection("pool exhausted")));
        let service = AuthService::new(
            Arc::new(accounts),
            Arc::new(MockHostelRepository::new()),
            Arc::new(PlainHasher),
            Arc::new(MutableClock::on(date("2026-01-01"))),
        );
        let err = service
            .authenticate(&creds(&fixture.root.email, "root password", Role::SuperAdmin, None))
            .await
            .expect_err("repository down");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn change_password_requires_current_password(fixture: Fixture) {
        let mut accounts = MockAccountRepository::new();
        let root = fixture.root.clone();
        accounts
            .expect_find_by_id()
            .returning(move |_| Ok(Some(root.clone())));
        accounts
            .expect_update_password_hash()
            .withf(|_, hash| hash == "plain:a brand new secret")
            .times(1)
            .returning(|_, _| Ok(true));
        let service = AuthService::new(
            Arc::new(accounts),
            Arc::new(MockHostelRepository::new()),
            Arc::new(PlainHasher),
            Arc::new(MutableClock::on(date("2026-01-01"))),
        );
        let principal = fixture.root.principal();

        let wrong = PasswordChange::try_new("guess", "a brand new secret").expect("shape");
        let err = service
            .change_password(&principal, &wrong)
            .await
            .expect_err("wrong current password");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);

        let right = PasswordChange::try_new("root password", "a brand new secret").expect("shape");
        service
            .change_password(&principal, &right)
            .await
            .expect("password changed");
    }

    #[rstest]
    #[tokio::test]
    async fn ensure_super_admin_is_idempotent(fixture: Fixture) {
        let mut accounts = MockAccountRepository::new();
        let root = fixture.root.clone();
        accounts
            .expect_find_by_email()
            .returning(move |email| Ok((email == root.email).then(|| root.clone())));
        accounts.expect_insert().times(1).returning(|_| Ok(()));
        let service = AuthService::new(
            Arc::new(accounts),
            Arc::new(MockHostelRepository::new()),
            Arc::new(PlainHasher),
            Arc::new(MutableClock::on(date("2026-01-01"))),
        );

        let existing = service
            .ensure_super_admin("Root@Platform.example", "whatever123")
            .await
            .expect("existing account");
        assert!(!existing);
        let created = service
            .ensure_super_admin("ops@platform.example", "long password")
            .await
            .expect("new account");
        assert!(created);
    }
}
