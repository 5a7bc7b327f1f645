//! Integration tests driving the full email OTP journeys through the
//! public API: registration, login, resend, and token-gated profile
//! access, wired with the in-memory repository and a capturing mailer.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vm_shared::config::auth::JwtConfig;
use vm_shared::config::otp::OtpConfig;

use vm_core::{
    AuthError, AuthService, AuthServiceConfig, DomainError, InMemoryUserRepository,
    JwtTokenService, Mailer, OtpRegistry, RegistrationProfile, SystemClock, TokenIssuer,
    TokenServiceConfig, UserRole, UserStatus,
};

/// Mailer that records codes instead of delivering them
struct CaptureMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl CaptureMailer {
    fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }
}

#[async_trait]
impl Mailer for CaptureMailer {
    async fn send_code(&self, email: &str, code: &str) -> Result<String, String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push((email.to_string(), code.to_string()));
        Ok(format!("msg-{}", sent.len()))
    }
}

struct TestEnv {
    service: AuthService<InMemoryUserRepository, CaptureMailer, JwtTokenService, SystemClock>,
    mailer: Arc<CaptureMailer>,
    tokens: Arc<JwtTokenService>,
}

fn test_env() -> TestEnv {
    let repo = Arc::new(InMemoryUserRepository::new());
    let mailer = Arc::new(CaptureMailer::new());
    let registry = Arc::new(OtpRegistry::new(OtpConfig::default(), SystemClock));
    let tokens = Arc::new(JwtTokenService::new(TokenServiceConfig::new(JwtConfig::new(
        "integration-test-secret",
    ))));
    let service = AuthService::new(
        repo,
        registry,
        Arc::clone(&tokens),
        Arc::clone(&mailer),
        AuthServiceConfig::default(),
    );
    TestEnv {
        service,
        mailer,
        tokens,
    }
}

#[tokio::test]
async fn test_full_registration_then_login_journey() {
    let env = test_env();
    let email = "ada@example.com";

    // Phase 1: request a registration code
    let profile = RegistrationProfile::new()
        .with_name("Ada", "Lovelace")
        .with_phone("+61400000000");
    let ack = env
        .service
        .request_registration(email, &profile)
        .await
        .unwrap();
    assert_eq!(ack.email, email);

    // Phase 2: confirm with the mailed code
    let code = env.mailer.last_code_for(email).unwrap();
    let registered = env
        .service
        .confirm_registration(email, &code, profile)
        .await
        .unwrap();
    assert!(registered.role.is_none());

    let claims = env.tokens.verify(&registered.access_token).unwrap();
    assert_eq!(claims.email, email);
    assert!(claims.user_role().is_none());

    // A second registration for the same email now conflicts
    let err = env
        .service
        .request_registration(email, &RegistrationProfile::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::EmailAlreadyRegistered)
    ));

    // Login with a fresh code
    env.service.request_login(email, None).await.unwrap();
    let code = env.mailer.last_code_for(email).unwrap();
    let logged_in = env.service.confirm_login(email, &code).await.unwrap();
    assert_eq!(logged_in.role, Some(UserRole::User));

    // The session token grants profile access
    let user = env.service.profile(&logged_in.access_token).await.unwrap();
    assert_eq!(user.email, email);
    assert_eq!(user.status, UserStatus::Pending);
    assert_eq!(user.first_name.as_deref(), Some("Ada"));
    assert_eq!(user.phone.as_deref(), Some("+61400000000"));

    // But not the admin listing
    let err = env
        .service
        .list_users(&logged_in.access_token)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::InsufficientPermissions)
    ));
}

#[tokio::test]
async fn test_resend_journey_with_cooldown() {
    let env = test_env();
    let email = "bob@example.com";

    env.service
        .request_registration(email, &RegistrationProfile::new())
        .await
        .unwrap();

    // First resend goes through and replaces the code
    env.service.resend(email, None).await.unwrap();
    let code = env.mailer.last_code_for(email).unwrap();

    // A second resend inside the cooldown window is throttled
    let err = env.service.resend(email, None).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::CooldownActive { .. })
    ));

    // The replaced code still confirms the registration
    env.service
        .confirm_registration(email, &code, RegistrationProfile::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_wrong_then_right_code() {
    let env = test_env();
    let email = "carol@example.com";

    env.service
        .request_registration(email, &RegistrationProfile::new())
        .await
        .unwrap();

    let err = env
        .service
        .confirm_registration(email, "000000", RegistrationProfile::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::InvalidOrExpiredCode)
    ));

    let code = env.mailer.last_code_for(email).unwrap();
    env.service
        .confirm_registration(email, &code, RegistrationProfile::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_admin_registration_and_listing() {
    let env = test_env();

    env.service
        .request_registration("root@example.com", &RegistrationProfile::new())
        .await
        .unwrap();
    let code = env.mailer.last_code_for("root@example.com").unwrap();
    env.service
        .confirm_registration(
            "root@example.com",
            &code,
            RegistrationProfile::new().with_role(UserRole::Admin),
        )
        .await
        .unwrap();

    // Log the admin in; the login token carries the role claim
    env.service.request_login("root@example.com", None).await.unwrap();
    let code = env.mailer.last_code_for("root@example.com").unwrap();
    let session = env
        .service
        .confirm_login("root@example.com", &code)
        .await
        .unwrap();
    assert_eq!(session.role, Some(UserRole::Admin));

    let users = env.service.list_users(&session.access_token).await.unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].is_admin());
}
