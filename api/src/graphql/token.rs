use async_graphql::{Context, Error, ErrorExtensions, Json, Object, SimpleObject};
use platform_api::{ApiError, error_with_code, internal_error};
use platform_authn::{Claims, JwtService, TokenError};
use tracing::{Instrument, info_span};

use super::context::{database, jwt};
use crate::auth::{AuthError, authenticate};

#[derive(SimpleObject)]
pub struct ObtainTokenPayload {
    pub token: String,
    pub payload: Json<Claims>,
    /// Unix timestamp after which the token can no longer be refreshed.
    pub refresh_expires_in: i64,
}

#[derive(SimpleObject)]
pub struct VerifyTokenPayload {
    pub payload: Json<Claims>,
}

#[derive(SimpleObject)]
pub struct RefreshTokenPayload {
    pub token: String,
    pub payload: Json<Claims>,
    pub refresh_expires_in: i64,
}

fn token_error(err: TokenError) -> Error {
    match err {
        TokenError::Encoding(_) => internal_error(err),
        other => error_with_code("UNAUTHENTICATED", other.to_string()),
    }
}

fn auth_error(err: AuthError) -> Error {
    match err {
        AuthError::InvalidCredentials | AuthError::UnknownUser => {
            error_with_code("UNAUTHENTICATED", err.to_string())
        }
        AuthError::Token(inner) => token_error(inner),
        AuthError::Invalid(message) => ApiError::BadRequest(message).extend(),
        AuthError::Password(inner) => internal_error(inner),
        AuthError::Db(inner) => internal_error(inner),
    }
}

fn verify(jwt: &JwtService, token: &str) -> async_graphql::Result<VerifyTokenPayload> {
    let claims = jwt.verify(token).map_err(token_error)?;
    Ok(VerifyTokenPayload {
        payload: Json(claims),
    })
}

/// Re-sign a valid token. The original issue time is kept, so refreshing
/// stops working once the refresh window has elapsed.
fn refresh(jwt: &JwtService, token: &str) -> async_graphql::Result<RefreshTokenPayload> {
    let (token, claims) = jwt.refresh(token).map_err(token_error)?;
    let refresh_expires_in = jwt.refresh_expires_at(&claims);
    Ok(RefreshTokenPayload {
        token,
        payload: Json(claims),
        refresh_expires_in,
    })
}

fn obtain(
    jwt: &JwtService,
    subject: &str,
    username: &str,
) -> async_graphql::Result<ObtainTokenPayload> {
    let (token, claims) = jwt.issue(subject, username).map_err(token_error)?;
    let refresh_expires_in = jwt.refresh_expires_at(&claims);
    Ok(ObtainTokenPayload {
        token,
        payload: Json(claims),
        refresh_expires_in,
    })
}

/// Login and session operations. None of them require an authenticated
/// viewer.
#[derive(Default)]
pub struct TokenMutation;

#[Object]
impl TokenMutation {
    /// Exchange a username and password for a signed token.
    async fn token_auth(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> async_graphql::Result<ObtainTokenPayload> {
        let db = database(ctx)?;
        let jwt = jwt(ctx)?;
        async move {
            let account = authenticate(db.as_ref(), &username, &password)
                .await
                .map_err(auth_error)?;
            tracing::info!(user_id = %account.id, "token issued");
            obtain(&jwt, &account.id.to_string(), &account.username)
        }
        .instrument(info_span!("auth.token"))
        .await
    }

    async fn verify_token(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> async_graphql::Result<VerifyTokenPayload> {
        verify(&*jwt(ctx)?, &token)
    }

    async fn refresh_token(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> async_graphql::Result<RefreshTokenPayload> {
        refresh(&*jwt(ctx)?, &token)
    }
}

/// The same checks exposed as queries, for clients that poll session state.
#[derive(Default)]
pub struct TokenQuery;

#[Object]
impl TokenQuery {
    async fn verify_token(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> async_graphql::Result<VerifyTokenPayload> {
        verify(&*jwt(ctx)?, &token)
    }

    async fn refresh_token(
        &self,
        ctx: &Context<'_>,
        token: String,
    ) -> async_graphql::Result<RefreshTokenPayload> {
        refresh(&*jwt(ctx)?, &token)
    }
}
