use entity::{member, user};
use platform_authn::{JwtService, PasswordError, TokenError, hash_password, verify_password};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, TransactionTrait,
};
use thiserror::Error;
use uuid::Uuid;

/// The authenticated account a request runs as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: Uuid,
    pub username: String,
    /// Member profile, when the account has one.
    pub member_id: Option<Uuid>,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl Viewer {
    pub async fn load(db: &DatabaseConnection, user_id: Uuid) -> Result<Option<Self>, DbErr> {
        let Some(account) = user::Entity::find_by_id(user_id).one(db).await? else {
            return Ok(None);
        };
        if !account.is_active {
            return Ok(None);
        }
        let profile = account.find_related(member::Entity).one(db).await?;
        Ok(Some(Self::from_parts(account, profile)))
    }

    fn from_parts(account: user::Model, profile: Option<member::Model>) -> Self {
        Self {
            user_id: account.id,
            username: account.username,
            member_id: profile.map(|m| m.id),
            is_staff: account.is_staff || account.is_superuser,
            is_superuser: account.is_superuser,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please enter valid credentials")]
    InvalidCredentials,
    #[error("User is disabled or no longer exists")]
    UnknownUser,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Check a username/password pair and record the login.
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model, AuthError> {
    let account = user::Entity::find()
        .filter(user::Column::Username.eq(username.trim()))
        .one(db)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;
    if !account.is_active || !verify_password(password, &account.password_hash)? {
        tracing::info!(username = %account.username, "rejected login");
        return Err(AuthError::InvalidCredentials);
    }
    let mut active: user::ActiveModel = account.into();
    active.last_login = Set(Some(entity::now()));
    Ok(active.update(db).await?)
}

/// Resolve a bearer token into the viewer it was issued for.
pub async fn viewer_from_token(
    db: &DatabaseConnection,
    jwt: &JwtService,
    token: &str,
) -> Result<Viewer, AuthError> {
    let claims = jwt.verify(token)?;
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| TokenError::Invalid)?;
    Viewer::load(db, user_id)
        .await?
        .ok_or(AuthError::UnknownUser)
}

/// Create an active superuser together with its member profile.
pub async fn create_superuser(
    db: &DatabaseConnection,
    username: &str,
    email: &str,
    password: &str,
) -> Result<user::Model, AuthError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AuthError::Invalid("Username is required".into()));
    }
    if password.len() < 8 {
        return Err(AuthError::Invalid(
            "Password must be at least 8 characters".into(),
        ));
    }
    let taken = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;
    if taken.is_some() {
        return Err(AuthError::Invalid(format!(
            "A user with username '{username}' already exists"
        )));
    }
    let password_hash = hash_password(password)?;

    let txn = db.begin().await?;
    let account = user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(email.trim().to_string()),
        password_hash: Set(password_hash),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        is_staff: Set(true),
        is_superuser: Set(true),
        is_active: Set(true),
        last_login: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    member::ActiveModel {
        user_id: Set(account.id),
        member_type: Set(member::MemberType::Honorary),
        join_date: Set(entity::today()),
        status: Set(member::Status::Active),
        skills: Set(String::new()),
        certifications: Set(String::new()),
        bio: Set(String::new()),
        linkedin_profile: Set(None),
        github_profile: Set(None),
        profile_picture: Set(None),
        phone_number: Set(None),
        emergency_contact: Set(None),
        last_active: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(username = %account.username, "created superuser");
    Ok(account)
}
