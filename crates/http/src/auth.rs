//! Cookie sessions and Microsoft account login.
//!
//! Both cookies are signed with one server key: `natura.user` carries the
//! session (user id plus expiry), `natura.oauth` carries the CSRF state and
//! return URL between the login redirect and the OAuth callback.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use natura_core::{OAUTH_STATE_COOKIE_NAME, SESSION_COOKIE_NAME, SESSION_TTL_MINUTES};
use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::url::Url;
use oauth2::{
    AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope,
    TokenUrl,
};
use time::OffsetDateTime;

use crate::api_error::ApiError;

pub const MICROSOFT_AUTHORIZE_URL: &str =
    "https://login.microsoftonline.com/common/oauth2/v2.0/authorize";
pub const MICROSOFT_TOKEN_URL: &str = "https://login.microsoftonline.com/common/oauth2/v2.0/token";

/// Path the identity provider redirects back to.
pub const CALLBACK_PATH: &str = "/api/user/callback";

const STATE_TTL_MINUTES: i64 = 10;

/// OAuth2 client registration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Externally visible origin of this server, e.g. `https://natura.example`.
    pub public_url: String,
    pub authorize_url: String,
    pub token_url: String,
}

impl OAuthConfig {
    /// Registration against the Microsoft identity platform.
    #[must_use]
    pub fn microsoft(client_id: String, client_secret: String, public_url: String) -> Self {
        Self {
            client_id,
            client_secret,
            public_url,
            authorize_url: MICROSOFT_AUTHORIZE_URL.to_owned(),
            token_url: MICROSOFT_TOKEN_URL.to_owned(),
        }
    }
}

/// Session handling shared by all handlers.
pub struct Auth {
    key: Key,
    oauth: Option<BasicClient>,
    default_user_id: String,
    secure_cookies: bool,
}

impl Auth {
    #[must_use]
    pub fn new(key: Key, default_user_id: String) -> Self {
        Self { key, oauth: None, default_user_id, secure_cookies: false }
    }

    /// Enables the login flow.
    ///
    /// # Errors
    /// Returns an error if one of the configured URLs does not parse.
    pub fn with_oauth(mut self, config: &OAuthConfig) -> anyhow::Result<Self> {
        let public_url = config.public_url.trim_end_matches('/');
        let client = BasicClient::new(
            ClientId::new(config.client_id.clone()),
            Some(ClientSecret::new(config.client_secret.clone())),
            AuthUrl::new(config.authorize_url.clone())?,
            Some(TokenUrl::new(config.token_url.clone())?),
        )
        .set_auth_type(AuthType::RequestBody)
        .set_redirect_uri(RedirectUrl::new(format!("{public_url}{CALLBACK_PATH}"))?);

        self.secure_cookies = public_url.starts_with("https://");
        self.oauth = Some(client);
        Ok(self)
    }

    #[must_use]
    pub const fn oauth_enabled(&self) -> bool {
        self.oauth.is_some()
    }

    #[must_use]
    pub fn default_user_id(&self) -> &str {
        &self.default_user_id
    }

    /// Signed view of the request cookies.
    #[must_use]
    pub fn jar(&self, headers: &HeaderMap) -> SignedCookieJar {
        SignedCookieJar::from_headers(headers, self.key.clone())
    }

    /// User id of a valid, unexpired session.
    #[must_use]
    pub fn session_user(&self, jar: &SignedCookieJar) -> Option<String> {
        let cookie = jar.get(SESSION_COOKIE_NAME)?;
        parse_session(cookie.value(), OffsetDateTime::now_utc().unix_timestamp())
    }

    /// The session user, or the default collection owner.
    #[must_use]
    pub fn current_user(&self, headers: &HeaderMap) -> String {
        self.session_user(&self.jar(headers)).unwrap_or_else(|| self.default_user_id.clone())
    }

    /// Session cookie for `user_id`, valid for the session lifetime.
    #[must_use]
    pub fn session_cookie(&self, user_id: &str) -> Cookie<'static> {
        let ttl = time::Duration::minutes(SESSION_TTL_MINUTES);
        let expires_at = (OffsetDateTime::now_utc() + ttl).unix_timestamp();
        Cookie::build((SESSION_COOKIE_NAME, format!("{user_id}|{expires_at}")))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .max_age(ttl)
            .build()
    }

    /// Cookie that clears the session when removed from a jar.
    #[must_use]
    pub fn session_removal(&self) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE_NAME).path("/").build()
    }

    /// Authorization URL plus the state cookie remembering where to go after.
    ///
    /// # Errors
    /// `ServiceUnavailable` when no OAuth client is configured.
    pub fn authorize(&self, return_url: &str) -> Result<(Url, Cookie<'static>), ApiError> {
        let client = self.client()?;
        let (url, csrf) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_owned()))
            .add_scope(Scope::new("email".to_owned()))
            .url();

        let value = format!("{}|{return_url}", csrf.secret());
        let cookie = Cookie::build((OAUTH_STATE_COOKIE_NAME, value))
            .path("/api/user")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .max_age(time::Duration::minutes(STATE_TTL_MINUTES))
            .build();
        Ok((url, cookie))
    }

    /// Cookie that clears the OAuth state when removed from a jar.
    #[must_use]
    pub fn state_removal(&self) -> Cookie<'static> {
        Cookie::build(OAUTH_STATE_COOKIE_NAME).path("/api/user").build()
    }

    /// Redeems an authorization code with the identity provider.
    ///
    /// # Errors
    /// `Forbidden` when the provider rejects the code.
    pub async fn exchange_code(&self, code: String) -> Result<(), ApiError> {
        let client = self.client()?;
        client
            .exchange_code(AuthorizationCode::new(code))
            .request_async(async_http_client)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "authorization code exchange failed");
                ApiError::Forbidden("login was rejected by the identity provider".to_owned())
            })?;
        Ok(())
    }

    fn client(&self) -> Result<&BasicClient, ApiError> {
        self.oauth
            .as_ref()
            .ok_or_else(|| ApiError::ServiceUnavailable("login is not configured".to_owned()))
    }
}

/// `(csrf_state, return_url)` from the state cookie value.
#[must_use]
pub fn parse_state(value: &str) -> Option<(&str, &str)> {
    value.split_once('|').filter(|(state, _)| !state.is_empty())
}

fn parse_session(value: &str, now: i64) -> Option<String> {
    let (user_id, expires_at) = value.rsplit_once('|')?;
    let expires_at: i64 = expires_at.parse().ok()?;
    (!user_id.is_empty() && expires_at > now).then(|| user_id.to_owned())
}
